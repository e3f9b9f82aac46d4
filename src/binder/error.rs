//! Binding error type

use std::fmt;

use config::ConfigError;

/// The flat mapping does not fit the target type
///
/// Carries the dotted path of the offending entry when one is known.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindError {
    path: Option<String>,
    message: String,
}

impl BindError {
    pub(crate) fn new(path: &str, message: impl Into<String>) -> Self {
        Self {
            path: (!path.is_empty()).then(|| path.to_string()),
            message: message.into(),
        }
    }

    /// Dotted path of the entry that failed, e.g. `server.hosts[1]`
    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for BindError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.path {
            Some(path) => write!(f, "Binding failed at '{}': {}", path, self.message),
            None => write!(f, "Binding failed: {}", self.message),
        }
    }
}

impl std::error::Error for BindError {}

impl From<ConfigError> for BindError {
    fn from(error: ConfigError) -> Self {
        let path = match &error {
            ConfigError::Type { key, .. } => key.clone(),
            ConfigError::NotFound(key) => Some(key.clone()),
            _ => None,
        };
        Self {
            path: path.filter(|p| !p.is_empty()),
            message: error.to_string(),
        }
    }
}
