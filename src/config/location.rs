//! Location descriptors
//!
//! A descriptor is a URI-like string `<scheme>:<scheme-specific-part>`:
//! - `env:` - the process environment (the part after the colon is unused)
//! - `classpath:app.properties` - a resource resolved against the search path
//! - `file:/etc/app.properties` - a filesystem path, absolute or relative

use std::fmt;
use std::path::PathBuf;

use percent_encoding::percent_decode_str;

use crate::error::{Error, Result};

/// Descriptor scheme, matched case-insensitively
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scheme {
    Env,
    Classpath,
    File,
    /// Anything else, including a missing scheme (empty string)
    Unknown(String),
}

impl Scheme {
    fn from_name(name: &str) -> Self {
        if name.eq_ignore_ascii_case("env") {
            Scheme::Env
        } else if name.eq_ignore_ascii_case("classpath") {
            Scheme::Classpath
        } else if name.eq_ignore_ascii_case("file") {
            Scheme::File
        } else {
            Scheme::Unknown(name.to_string())
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Scheme::Env => "env",
            Scheme::Classpath => "classpath",
            Scheme::File => "file",
            Scheme::Unknown(name) => name,
        }
    }

    pub fn is_supported(&self) -> bool {
        !matches!(self, Scheme::Unknown(_))
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A parsed location descriptor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    raw: String,
    scheme: Scheme,
    path: String,
}

impl Location {
    /// Parse a descriptor. Parsing never fails: a descriptor without a
    /// recognisable scheme carries `Scheme::Unknown("")` and is rejected
    /// when it is loaded.
    pub fn parse(raw: &str) -> Self {
        let without_fragment = raw.split_once('#').map_or(raw, |(head, _)| head);

        let (scheme, path) = match without_fragment.split_once(':') {
            Some((name, rest)) if is_scheme_name(name) => (Scheme::from_name(name), rest),
            _ => (Scheme::Unknown(String::new()), without_fragment),
        };

        Self {
            raw: raw.to_string(),
            scheme,
            path: percent_decode_str(path).decode_utf8_lossy().into_owned(),
        }
    }

    pub fn scheme(&self) -> &Scheme {
        &self.scheme
    }

    /// The scheme-specific part, fragment excluded and `%XX` escapes decoded
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Filesystem path for a `file:` descriptor
    ///
    /// `file:///p` and `file://localhost/p` both yield `/p`; any other
    /// form is taken literally.
    pub fn file_path(&self) -> Result<PathBuf> {
        self.require_path()?;

        if let Some(rest) = self.path.strip_prefix("//") {
            let authority_end = rest.find('/').unwrap_or(rest.len());
            let authority = &rest[..authority_end];
            if authority.is_empty() || authority.eq_ignore_ascii_case("localhost") {
                let local = &rest[authority_end..];
                if local.is_empty() {
                    return Err(Error::invalid_location(&self.raw, "file URI has no path"));
                }
                return Ok(PathBuf::from(local));
            }
        }

        Ok(PathBuf::from(&self.path))
    }

    /// Resource name for a `classpath:` descriptor, relative to every root
    pub fn resource_name(&self) -> Result<&str> {
        self.require_path()?;

        let name = self.path.trim_start_matches('/');
        if name.is_empty() {
            return Err(Error::invalid_location(&self.raw, "resource name is empty"));
        }
        if name.split(['/', '\\']).any(|segment| segment == "..") {
            return Err(Error::invalid_location(
                &self.raw,
                "resource name must not contain '..' segments",
            ));
        }

        Ok(name)
    }

    fn require_path(&self) -> Result<()> {
        if self.path.is_empty() {
            return Err(Error::invalid_location(
                &self.raw,
                format!("'{}' location requires a path", self.scheme),
            ));
        }
        Ok(())
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// `[A-Za-z][A-Za-z0-9+.-]*`
fn is_scheme_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() => {
            chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
        }
        _ => false,
    }
}
