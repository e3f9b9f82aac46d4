//! CLI argument parsing with clap
//!
//! This module defines the command-line interface structure using clap,
//! including all commands, arguments, and their documentation.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::config::Location;
use crate::logger::LogFormat;

/// Merge property files and environment variables into one configuration
#[derive(Parser, Debug)]
#[command(name = "ocm")]
#[command(about = "Merge property files and environment variables into one configuration")]
#[command(long_about = "
ocm reads configuration from an ordered list of locations and merges them
into one flat, lower-cased key namespace. Later locations override earlier ones.

LOCATIONS:
    env:                      Process environment (DB_HOSTS_0_PORT -> db.hosts[0].port)
    classpath:<name>          Resource looked up in each --classpath root, in order
    file:<path>               Property file on disk

Missing classpath: and file: resources are skipped silently.

EXAMPLES:
    # Print the merged mapping as property text
    ocm -C conf read classpath:defaults.properties file:/etc/app.properties env:

    # Print the merged mapping as nested JSON
    ocm -C conf tree classpath:defaults.properties env:

    # Look up a single key
    ocm get server.port file:app.properties env:

    # Show the key an environment variable maps to
    ocm env-key DB_HOSTS_0_PORT
")]
#[command(version = crate::build::CLAP_LONG_VERSION)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Classpath root directory
    ///
    /// Directory searched for classpath: locations. May be given several
    /// times; roots are searched in order. Roots listed in OCM_CLASSPATH
    /// (platform path-list syntax) are searched after these.
    #[arg(short = 'C', long = "classpath", value_name = "DIR", global = true,
          value_parser = super::validation::validate_classpath_dir)]
    pub classpath: Vec<PathBuf>,

    /// Log level override
    ///
    /// Available levels: error, warn, info, debug, trace
    #[arg(long, value_enum, env = "OCM_LOG", global = true)]
    pub log_level: Option<LogLevel>,

    /// Log line format
    #[arg(long, value_enum, default_value_t = LogFormatArg::Full, global = true)]
    pub log_format: LogFormatArg,

    /// Enable verbose logging
    ///
    /// Logs every location as it is loaded. Cannot be used with --quiet.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress everything but errors
    ///
    /// Cannot be used with --verbose.
    #[arg(short, long, conflicts_with = "verbose", global = true)]
    pub quiet: bool,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the merged flat mapping
    ///
    /// Examples:
    ///   ocm read file:app.properties env:
    ///   ocm read --format json classpath:defaults.properties
    Read {
        /// Locations, lowest precedence first
        #[arg(required = true, value_name = "LOCATION",
              value_parser = super::validation::validate_location)]
        locations: Vec<Location>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Properties)]
        format: OutputFormat,
    },
    /// Print the value of one key
    ///
    /// Exits with a non-zero status when the key is not present.
    Get {
        /// Key to look up (case-insensitive)
        key: String,

        /// Locations, lowest precedence first
        #[arg(required = true, value_name = "LOCATION",
              value_parser = super::validation::validate_location)]
        locations: Vec<Location>,
    },
    /// Print the merged mapping as nested JSON
    ///
    /// Dotted keys become nested objects and indexed keys become arrays.
    Tree {
        /// Locations, lowest precedence first
        #[arg(required = true, value_name = "LOCATION",
              value_parser = super::validation::validate_location)]
        locations: Vec<Location>,
    },
    /// Show the flat key each environment variable name maps to
    EnvKey {
        /// Environment variable names
        #[arg(required = true, value_name = "NAME")]
        names: Vec<String>,
    },
}

/// Output format for `read`
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    #[value(name = "properties", alias = "props")]
    Properties,
    #[value(name = "json")]
    Json,
}

/// Log level options
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogLevel {
    #[value(name = "error")]
    Error,
    #[value(name = "warn", alias = "warning")]
    Warn,
    #[value(name = "info")]
    Info,
    #[value(name = "debug")]
    Debug,
    #[value(name = "trace")]
    Trace,
}

/// Log format options
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogFormatArg {
    #[value(name = "full")]
    Full,
    #[value(name = "compact")]
    Compact,
    #[value(name = "json")]
    Json,
}

impl Cli {
    /// Effective log level: --log-level / OCM_LOG, then --verbose / --quiet
    pub fn effective_log_level(&self) -> LogLevel {
        match (self.log_level, self.verbose, self.quiet) {
            (Some(level), _, _) => level,
            (None, true, _) => LogLevel::Debug,
            (None, _, true) => LogLevel::Error,
            (None, false, false) => LogLevel::Warn,
        }
    }
}

impl From<LogLevel> for String {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => "error".to_string(),
            LogLevel::Warn => "warn".to_string(),
            LogLevel::Info => "info".to_string(),
            LogLevel::Debug => "debug".to_string(),
            LogLevel::Trace => "trace".to_string(),
        }
    }
}

impl From<LogFormatArg> for LogFormat {
    fn from(format: LogFormatArg) -> Self {
        match format {
            LogFormatArg::Full => LogFormat::Full,
            LogFormatArg::Compact => LogFormat::Compact,
            LogFormatArg::Json => LogFormat::Json,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Scheme;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_help_flag() {
        let result = Cli::try_parse_from(["ocm", "--help"]);
        let err = result.unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
    }

    #[test]
    fn test_version_flag() {
        let result = Cli::try_parse_from(["ocm", "--version"]);
        let err = result.unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);
    }

    #[test]
    fn test_subcommand_required() {
        assert!(Cli::try_parse_from(["ocm"]).is_err());
    }

    #[test]
    fn test_read_command() {
        let cli = Cli::try_parse_from(["ocm", "read", "classpath:app.properties", "ENV:"]).unwrap();
        match cli.command {
            Commands::Read { locations, format } => {
                assert_eq!(locations.len(), 2);
                assert_eq!(*locations[0].scheme(), Scheme::Classpath);
                assert_eq!(*locations[1].scheme(), Scheme::Env);
                assert_eq!(format, OutputFormat::Properties);
            }
            other => panic!("Expected Read command, got {:?}", other),
        }
    }

    #[test]
    fn test_read_json_format() {
        let cli = Cli::try_parse_from(["ocm", "read", "--format", "json", "env:"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Read {
                format: OutputFormat::Json,
                ..
            }
        ));
    }

    #[test]
    fn test_read_requires_locations() {
        assert!(Cli::try_parse_from(["ocm", "read"]).is_err());
    }

    #[test]
    fn test_unsupported_location_rejected() {
        let err = Cli::try_parse_from(["ocm", "read", "ftp:thing"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
    }

    #[test]
    fn test_get_command() {
        let cli = Cli::try_parse_from(["ocm", "get", "server.port", "env:"]).unwrap();
        match cli.command {
            Commands::Get { key, locations } => {
                assert_eq!(key, "server.port");
                assert_eq!(locations.len(), 1);
            }
            other => panic!("Expected Get command, got {:?}", other),
        }
    }

    #[test]
    fn test_env_key_command() {
        let cli = Cli::try_parse_from(["ocm", "env-key", "A_0_B", "PORT"]).unwrap();
        match cli.command {
            Commands::EnvKey { names } => assert_eq!(names, vec!["A_0_B", "PORT"]),
            other => panic!("Expected EnvKey command, got {:?}", other),
        }
    }

    #[test]
    fn test_conflicting_verbose_quiet() {
        let result = Cli::try_parse_from(["ocm", "--verbose", "--quiet", "env-key", "A"]);
        let err = result.unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ArgumentConflict);
    }

    fn cli_with(log_level: Option<LogLevel>, verbose: bool, quiet: bool) -> Cli {
        Cli {
            command: Commands::EnvKey {
                names: vec!["A".to_string()],
            },
            classpath: Vec::new(),
            log_level,
            log_format: LogFormatArg::Full,
            verbose,
            quiet,
        }
    }

    #[test]
    fn test_effective_log_level() {
        assert_eq!(cli_with(None, false, false).effective_log_level(), LogLevel::Warn);
        assert_eq!(cli_with(None, true, false).effective_log_level(), LogLevel::Debug);
        assert_eq!(cli_with(None, false, true).effective_log_level(), LogLevel::Error);
        assert_eq!(
            cli_with(Some(LogLevel::Trace), false, true).effective_log_level(),
            LogLevel::Trace
        );
    }

    #[test]
    fn test_explicit_log_level_flag() {
        let cli = Cli::try_parse_from(["ocm", "--log-level", "trace", "-q", "env-key", "A"]).unwrap();
        assert_eq!(cli.log_level, Some(LogLevel::Trace));
        assert_eq!(cli.effective_log_level(), LogLevel::Trace);
    }

    #[test]
    fn test_log_format_conversion() {
        assert_eq!(LogFormat::from(LogFormatArg::Json), LogFormat::Json);
        assert_eq!(String::from(LogLevel::Warn), "warn");
    }
}
