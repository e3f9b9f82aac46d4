//! read, get and tree command handlers
//!
//! All three merge the given locations first and differ only in how the
//! merged mapping is printed.

use std::io::Write;

use anyhow::Context;

use crate::binder;
use crate::cli::parser::OutputFormat;
use crate::config::{EnvSource, FlatConfig, Loader, Location, SearchPath, StdEnv};

/// Handler for the commands that load configuration
pub struct ReadCommandHandler<E = StdEnv> {
    loader: Loader<SearchPath, E>,
}

impl ReadCommandHandler<StdEnv> {
    /// Create a handler reading `env:` from the process environment
    pub fn new(search_path: SearchPath) -> Self {
        Self {
            loader: Loader::new(search_path),
        }
    }
}

impl<E: EnvSource> ReadCommandHandler<E> {
    /// Create a handler over an explicit environment source
    pub fn with_env(search_path: SearchPath, env: E) -> Self {
        Self {
            loader: Loader::new(search_path).with_env(env),
        }
    }

    /// Print the merged mapping
    pub fn read<W: Write>(
        &self,
        locations: &[Location],
        format: OutputFormat,
        out: &mut W,
    ) -> anyhow::Result<()> {
        let config = self.load(locations)?;
        match format {
            OutputFormat::Properties => out.write_all(config.to_properties_string().as_bytes())?,
            OutputFormat::Json => {
                serde_json::to_writer_pretty(&mut *out, &config)?;
                writeln!(out)?;
            }
        }
        Ok(())
    }

    /// Print the value of `key`, failing when it is absent
    pub fn get<W: Write>(&self, key: &str, locations: &[Location], out: &mut W) -> anyhow::Result<()> {
        let config = self.load(locations)?;
        let value = config
            .get(key)
            .with_context(|| format!("Key '{}' is not defined by any location", key))?;
        writeln!(out, "{}", value)?;
        Ok(())
    }

    /// Print the merged mapping as a nested JSON document
    pub fn tree<W: Write>(&self, locations: &[Location], out: &mut W) -> anyhow::Result<()> {
        let config = self.load(locations)?;
        let tree: serde_json::Value = binder::bind(&config)?;
        serde_json::to_writer_pretty(&mut *out, &tree)?;
        writeln!(out)?;
        Ok(())
    }

    fn load(&self, locations: &[Location]) -> anyhow::Result<FlatConfig> {
        tracing::debug!(roots = ?self.loader.resolver().roots(), "Classpath search path");
        let config = self.loader.load(locations.iter().map(Location::as_str))?;
        Ok(config)
    }
}
