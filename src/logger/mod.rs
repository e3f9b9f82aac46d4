//! Logger Module
//!
//! Installs a `tracing-subscriber` registry writing to stderr, so that
//! command output on stdout stays machine-readable. Supports:
//! - Level filtering through `EnvFilter`
//! - ANSI colors only when stderr is a terminal
//! - Full, Compact and JSON line formats

pub mod config;


// Re-export main types
pub use self::config::*;

use std::io::IsTerminal;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Install the global subscriber
///
/// Fails on an unknown level or when a global subscriber is already set.
pub fn init_logger(config: LoggerConfig) -> anyhow::Result<()> {
    config.validate()?;

    let filter = build_filter(&config);
    let use_ansi = config.ansi && std::io::stderr().is_terminal();

    let registry = tracing_subscriber::registry().with(filter);
    match config.format {
        LogFormat::Full => registry
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_ansi(use_ansi)
                    .with_target(true)
                    .with_level(true),
            )
            .try_init()?,
        LogFormat::Compact => registry
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_ansi(use_ansi)
                    .with_target(true)
                    .compact(),
            )
            .try_init()?,
        LogFormat::Json => registry
            .with(fmt::layer().with_writer(std::io::stderr).with_ansi(false).json())
            .try_init()?,
    }

    Ok(())
}

fn build_filter(config: &LoggerConfig) -> EnvFilter {
    EnvFilter::try_new(config.level.trim().to_lowercase()).unwrap_or_else(|_| EnvFilter::new("warn"))
}
