//! Intake CLI library.
//!
//! This library provides the core functionality for the `intake` command-line interface,
//! including configuration management, the terminal operator channel, command execution,
//! and output formatting.

pub mod channel;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod output;

pub use channel::TerminalChannel;
pub use cli::{Cli, Command};
pub use config::Config;
pub use error::{CliError, Result};
pub use output::Formatter;
