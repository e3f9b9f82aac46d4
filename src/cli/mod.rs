//! CLI module for ocm
//!
//! This module provides command-line interface functionality including:
//! - Argument parsing with clap
//! - Location and classpath root validation
//! - Command handlers for read, get, tree and env-key

pub mod executor;
pub mod handlers;
pub mod parser;
pub mod validation;

// Re-export public types for convenience
pub use executor::execute_command;
pub use parser::{Cli, Commands, LogFormatArg, LogLevel, OutputFormat};

use crate::logger::{LoggerConfig, init_logger};

/// Build the logger configuration selected by the global flags
pub fn logger_config(cli: &Cli) -> LoggerConfig {
    LoggerConfig {
        level: cli.effective_log_level().into(),
        format: cli.log_format.into(),
        ..LoggerConfig::default()
    }
}

/// Initialize logging from the parsed CLI arguments
///
/// # Errors
/// Returns error if logger initialization fails
pub fn init_logger_from_cli(cli: &Cli) -> anyhow::Result<()> {
    init_logger(logger_config(cli))
}
