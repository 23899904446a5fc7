//! Profile command implementation.

use crate::cli::{KindArg, ProfileAction, ProfileArgs};
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use intake_llm::{ProviderKind, ProviderSettings};

/// Execute the profile command.
pub fn execute_profile(args: ProfileArgs, config: &mut Config, formatter: &Formatter) -> Result<()> {
    match args.action {
        ProfileAction::List => list_profiles(config, formatter),
        ProfileAction::Show => show_active_profile(config, formatter),
        ProfileAction::Switch { name } => switch_profile(config, name, formatter),
        ProfileAction::Set {
            name,
            kind,
            endpoint,
            model,
            api_key_env,
        } => set_profile(config, name, kind, endpoint, model, api_key_env, formatter),
        ProfileAction::Delete { name } => delete_profile(config, name, formatter),
    }
}

/// List all profiles.
fn list_profiles(config: &Config, formatter: &Formatter) -> Result<()> {
    if config.profiles.is_empty() {
        println!("{}", formatter.info("No profiles configured"));
        return Ok(());
    }

    println!("Available profiles:");
    for (name, profile) in &config.profiles {
        if name == &config.active_profile {
            println!("* {}", formatter.success(name));
        } else {
            println!("  {}", name);
        }
        print_settings(profile, "    ");
    }

    Ok(())
}

/// Show the active profile.
fn show_active_profile(config: &Config, formatter: &Formatter) -> Result<()> {
    let profile = config.get_active_profile()?;

    println!("Active profile: {}", formatter.success(&config.active_profile));
    print_settings(profile, "  ");

    Ok(())
}

fn print_settings(profile: &ProviderSettings, indent: &str) {
    let kind = match profile.kind {
        ProviderKind::Ollama => "ollama",
        ProviderKind::Groq => "groq",
    };
    println!("{}Provider: {}", indent, kind);
    println!("{}Endpoint: {}", indent, profile.effective_endpoint());
    println!("{}Model: {}", indent, profile.effective_model());
    if let Some(var) = &profile.api_key_env {
        println!("{}API key variable: {}", indent, var);
    }
}

/// Switch to a different profile.
fn switch_profile(config: &mut Config, name: String, formatter: &Formatter) -> Result<()> {
    config.switch_profile(name.clone())?;
    config.save()?;
    println!(
        "{}",
        formatter.success(&format!("Switched to profile '{}'", name))
    );
    Ok(())
}

/// Create or update a profile.
fn set_profile(
    config: &mut Config,
    name: String,
    kind: KindArg,
    endpoint: Option<String>,
    model: Option<String>,
    api_key_env: Option<String>,
    formatter: &Formatter,
) -> Result<()> {
    let profile = ProviderSettings {
        kind: kind.into(),
        endpoint,
        model,
        api_key_env,
        ..ProviderSettings::default()
    };

    let action = if config.profiles.contains_key(&name) {
        "Updated"
    } else {
        "Created"
    };

    config.set_profile(name.clone(), profile);
    config.save()?;

    println!(
        "{}",
        formatter.success(&format!("{} profile '{}'", action, name))
    );

    Ok(())
}

/// Delete a profile.
fn delete_profile(config: &mut Config, name: String, formatter: &Formatter) -> Result<()> {
    if name == config.active_profile {
        return Err(CliError::NotPermitted(
            "Cannot delete the active profile".to_string(),
        ));
    }

    if config.profiles.remove(&name).is_some() {
        config.save()?;
        println!(
            "{}",
            formatter.success(&format!("Deleted profile '{}'", name))
        );
    } else {
        println!(
            "{}",
            formatter.warning(&format!("Profile '{}' does not exist", name))
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;
    use tempfile::TempDir;

    fn temp_config(dir: &TempDir) -> Config {
        Config::load(Some(&dir.path().join("config.toml"))).unwrap()
    }

    #[test]
    fn test_set_and_switch_profile() {
        let dir = TempDir::new().unwrap();
        let mut config = temp_config(&dir);
        let formatter = Formatter::new(OutputFormat::Table, false);

        set_profile(
            &mut config,
            "local".to_string(),
            KindArg::Ollama,
            Some("http://gpu-box:11434".to_string()),
            Some("qwen2.5".to_string()),
            None,
            &formatter,
        )
        .unwrap();

        assert!(config.profiles.contains_key("local"));

        switch_profile(&mut config, "local".to_string(), &formatter).unwrap();
        assert_eq!(config.active_profile, "local");

        let reloaded = temp_config(&dir);
        assert_eq!(reloaded.active_profile, "local");
        assert_eq!(
            reloaded.get_active_profile().unwrap().effective_endpoint(),
            "http://gpu-box:11434"
        );
    }

    #[test]
    fn test_delete_active_profile() {
        let dir = TempDir::new().unwrap();
        let mut config = temp_config(&dir);
        let formatter = Formatter::new(OutputFormat::Table, false);

        let result = delete_profile(&mut config, "groq".to_string(), &formatter);
        assert!(matches!(result, Err(CliError::NotPermitted(_))));
    }

    #[test]
    fn test_delete_inactive_profile() {
        let dir = TempDir::new().unwrap();
        let mut config = temp_config(&dir);
        let formatter = Formatter::new(OutputFormat::Table, false);

        delete_profile(&mut config, "ollama".to_string(), &formatter).unwrap();
        assert!(!temp_config(&dir).profiles.contains_key("ollama"));
    }
}
