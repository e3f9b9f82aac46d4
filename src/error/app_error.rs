use thiserror::Error;

use crate::binder::BindError;

/// Errors raised while reading configuration sources or binding them.
///
/// An absent `classpath:` or `file:` resource has no variant: it contributes
/// nothing and the read carries on.
#[derive(Error, Debug)]
pub enum Error {
    /// The descriptor's scheme is not `env`, `classpath` or `file`
    #[error("Unsupported scheme '{scheme}' in location '{location}'")]
    UnsupportedScheme { location: String, scheme: String },

    /// The descriptor is syntactically unusable (empty path, `..` escapes)
    #[error("Invalid location '{location}': {reason}")]
    InvalidLocation { location: String, reason: String },

    /// The property parser rejected the resource content
    #[error("Malformed property text in '{location}' at line {line}: {message}")]
    MalformedPropertyText {
        location: String,
        line: usize,
        message: String,
    },

    /// Reading an existing resource failed
    #[error("Failed to read '{location}'")]
    Io {
        location: String,
        #[source]
        source: std::io::Error,
    },

    /// The merged mapping does not fit the target type
    #[error(transparent)]
    Binding(#[from] BindError),
}

impl Error {
    pub fn unsupported_scheme(location: impl Into<String>, scheme: impl Into<String>) -> Self {
        Error::UnsupportedScheme {
            location: location.into(),
            scheme: scheme.into(),
        }
    }

    pub fn invalid_location(location: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::InvalidLocation {
            location: location.into(),
            reason: reason.into(),
        }
    }

    pub fn io(location: impl Into<String>, source: std::io::Error) -> Self {
        Error::Io {
            location: location.into(),
            source,
        }
    }
}

/// Type alias for Result with the crate error
pub type Result<T> = std::result::Result<T, Error>;
