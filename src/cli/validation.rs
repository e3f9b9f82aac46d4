//! CLI argument validation functions
//!
//! This module provides custom validation functions for CLI arguments
//! that go beyond what clap can validate automatically.

use std::path::PathBuf;

use crate::config::Location;

/// Validate a location descriptor before any source is read
///
/// Only the scheme and the shape of the path are checked here. Whether the
/// resource exists is decided at load time, where absent resources are
/// skipped.
pub fn validate_location(raw: &str) -> Result<Location, String> {
    let location = Location::parse(raw);

    if !location.scheme().is_supported() {
        return Err(if location.scheme().as_str().is_empty() {
            format!("Location '{}' has no scheme. Use env:, classpath:<name> or file:<path>", raw)
        } else {
            format!(
                "Unsupported scheme '{}' in '{}'. Supported schemes are: env, classpath, file",
                location.scheme(),
                raw
            )
        });
    }

    match location.scheme() {
        crate::config::Scheme::Classpath => {
            location.resource_name().map_err(|e| e.to_string())?;
        }
        crate::config::Scheme::File => {
            location.file_path().map_err(|e| e.to_string())?;
        }
        _ => {}
    }

    Ok(location)
}

/// Validate a classpath root
///
/// A root that does not exist is accepted (lookups under it simply miss),
/// but a regular file cannot serve as a root.
pub fn validate_classpath_dir(path_str: &str) -> Result<PathBuf, String> {
    if path_str.trim().is_empty() {
        return Err("Classpath root cannot be empty".to_string());
    }

    let path = PathBuf::from(path_str);
    if path.is_file() {
        return Err(format!("Classpath root is a file, not a directory: '{}'", path_str));
    }

    Ok(path)
}
