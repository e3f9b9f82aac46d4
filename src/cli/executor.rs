//! Command executor for dispatching CLI commands
//!
//! This module provides the main entry point for executing CLI commands
//! after parsing and logger initialization.

use std::io::Write;

use super::handlers::{EnvKeyCommandHandler, ReadCommandHandler};
use super::parser::{Cli, Commands};
use crate::config::SearchPath;

/// Environment variable holding extra classpath roots
pub const CLASSPATH_ENV: &str = "OCM_CLASSPATH";

/// Execute a CLI command, writing its output to `out`
///
/// # Errors
/// Returns errors from loading, binding or writing the output
pub fn execute_command<W: Write>(cli: &Cli, out: &mut W) -> anyhow::Result<()> {
    match &cli.command {
        Commands::Read { locations, format } => {
            ReadCommandHandler::new(search_path(cli)).read(locations, *format, out)
        }
        Commands::Get { key, locations } => {
            ReadCommandHandler::new(search_path(cli)).get(key, locations, out)
        }
        Commands::Tree { locations } => ReadCommandHandler::new(search_path(cli)).tree(locations, out),
        Commands::EnvKey { names } => EnvKeyCommandHandler::new().execute(names, out),
    }
}

/// Search path from `-C` roots followed by the roots in `OCM_CLASSPATH`
///
/// Without either, the current directory is the only root.
pub fn search_path(cli: &Cli) -> SearchPath {
    let mut search_path: SearchPath = cli.classpath.iter().cloned().collect();
    for root in SearchPath::from_env_var(CLASSPATH_ENV).roots() {
        search_path.push(root.clone());
    }

    if search_path.roots().is_empty() {
        search_path.push(".");
    }
    search_path
}
