//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};
use intake_llm::ProviderKind;

/// Intake - collect validated patient fields from free-text answers.
#[derive(Debug, Parser)]
#[command(name = "intake")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true, env = "INTAKE_CONFIG")]
    pub config: Option<String>,

    /// Provider profile to use
    #[arg(short, long, global = true)]
    pub profile: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (values only)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Collect a single field, re-prompting until the value is valid
    Collect(CollectArgs),

    /// Collect every patient registration field
    Register(RegisterArgs),

    /// Validate a value against a field's rules without calling a provider
    Check(CheckArgs),

    /// List available fields
    Fields,

    /// Manage provider profiles
    Profile(ProfileArgs),
}

/// Arguments for the collect command.
#[derive(Debug, Parser)]
pub struct CollectArgs {
    /// Field name (see `intake fields`)
    pub field: String,

    /// Answer to use instead of prompting; repeat for retries
    #[arg(short, long)]
    pub input: Vec<String>,

    /// Give up after this many rejected answers
    #[arg(short, long)]
    pub max_attempts: Option<u32>,
}

/// Arguments for the register command.
#[derive(Debug, Parser)]
pub struct RegisterArgs {
    /// Answers to use instead of prompting, in prompt order
    #[arg(short, long)]
    pub input: Vec<String>,

    /// Give up on a field after this many rejected answers
    #[arg(short, long)]
    pub max_attempts: Option<u32>,
}

/// Arguments for the check command.
#[derive(Debug, Parser)]
pub struct CheckArgs {
    /// Field name
    pub field: String,

    /// Value to validate
    pub value: String,
}

/// Arguments for profile management.
#[derive(Debug, Parser)]
pub struct ProfileArgs {
    #[command(subcommand)]
    pub action: ProfileAction,
}

/// Profile management actions.
#[derive(Debug, Subcommand)]
pub enum ProfileAction {
    /// List all profiles
    List,

    /// Show active profile
    Show,

    /// Switch to a different profile
    Switch {
        /// Profile name
        name: String,
    },

    /// Create or update a profile
    Set {
        /// Profile name
        name: String,
        /// Provider backend
        #[arg(short, long, value_enum)]
        kind: KindArg,
        /// Endpoint URL
        #[arg(short, long)]
        endpoint: Option<String>,
        /// Model name
        #[arg(short, long)]
        model: Option<String>,
        /// Environment variable holding the API key
        #[arg(long)]
        api_key_env: Option<String>,
    },

    /// Delete a profile
    Delete {
        /// Profile name
        name: String,
    },
}

/// Provider backend argument.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum KindArg {
    /// Local Ollama server
    Ollama,
    /// Groq hosted API
    Groq,
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}

impl From<KindArg> for ProviderKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Ollama => ProviderKind::Ollama,
            KindArg::Groq => ProviderKind::Groq,
        }
    }
}
