//! Configuration types for the logger

use std::str::FromStr;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::Level;

/// Diagnostics configuration
///
/// Events always go to stderr; stdout is reserved for command output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    /// One of trace, debug, info, warn, error (any case)
    pub level: String,
    pub format: LogFormat,
    /// Color escapes; only honored when stderr is a terminal
    pub ansi: bool,
}

impl LoggerConfig {
    pub fn new(level: impl Into<String>, format: LogFormat) -> Result<Self> {
        let config = Self {
            level: level.into(),
            format,
            ..Self::default()
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.parse_level().map(|_| ())
    }

    pub fn parse_level(&self) -> Result<Level> {
        if self.level.trim().chars().all(|c| c.is_ascii_digit()) {
            anyhow::bail!("Invalid log level '{}': use a level name", self.level);
        }
        Level::from_str(self.level.trim()).with_context(|| {
            format!(
                "Invalid log level '{}'. Valid levels are: trace, debug, info, warn, error",
                self.level
            )
        })
    }

    /// Disable color escapes
    pub fn without_ansi(mut self) -> Self {
        self.ansi = false;
        self
    }
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            format: LogFormat::Full,
            ansi: true,
        }
    }
}

/// Event line format
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Full,
    Compact,
    Json,
}

impl FromStr for LogFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        [LogFormat::Full, LogFormat::Compact, LogFormat::Json]
            .into_iter()
            .find(|format| format.as_str().eq_ignore_ascii_case(s.trim()))
            .with_context(|| format!("Invalid log format '{}'. Valid formats are: full, compact, json", s))
    }
}

impl LogFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogFormat::Full => "full",
            LogFormat::Compact => "compact",
            LogFormat::Json => "json",
        }
    }
}
