//! Intake CLI - collect validated patient fields from free-text answers.

use clap::Parser;
use intake_cli::commands;
use intake_cli::{Cli, Command, Config, Formatter};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // Provider keys such as GROQ_API_KEY may live in .env
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    match run().await {
        Ok(true) => {}
        Ok(false) => std::process::exit(2),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

/// Returns false when the command ran but the value was rejected.
async fn run() -> intake_cli::Result<bool> {
    let cli = Cli::parse();

    let config_path = cli.config.map(PathBuf::from);
    let mut config = Config::load(config_path.as_deref())?;

    if let Some(profile_name) = cli.profile {
        config.switch_profile(profile_name)?;
    }

    let format = cli
        .format
        .map(Into::into)
        .unwrap_or(config.settings.format);

    let color_enabled = !cli.no_color && config.settings.color;

    let formatter = Formatter::new(format, color_enabled);

    match cli.command {
        Command::Collect(args) => commands::execute_collect(args, &config, &formatter).await?,
        Command::Register(args) => commands::execute_register(args, &config, &formatter).await?,
        Command::Check(args) => return commands::execute_check(args, &config, &formatter),
        Command::Fields => commands::execute_fields(&config, &formatter)?,
        Command::Profile(args) => commands::execute_profile(args, &mut config, &formatter)?,
    }

    Ok(true)
}
