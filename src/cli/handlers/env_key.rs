//! env-key command handler
//!
//! Shows how environment variable names are rewritten into flat keys.

use std::io::Write;

use crate::config::to_flat_key;

/// Handler for the env-key command
pub struct EnvKeyCommandHandler;

impl EnvKeyCommandHandler {
    pub fn new() -> Self {
        Self
    }

    /// Write one `NAME -> key` line per name
    pub fn execute<W: Write>(&self, names: &[String], out: &mut W) -> anyhow::Result<()> {
        for name in names {
            writeln!(out, "{} -> {}", name, to_flat_key(name))?;
        }
        Ok(())
    }
}

impl Default for EnvKeyCommandHandler {
    fn default() -> Self {
        Self::new()
    }
}
