//! ocm
//!
//! Materializes configuration from an ordered list of sources
//! (`env:`, `classpath:`, `file:`) into one flat, lower-cased key mapping,
//! and binds that mapping onto typed structures.
//!
//! ```no_run
//! use serde::Deserialize;
//!
//! #[derive(Debug, Default, Deserialize)]
//! #[serde(default)]
//! struct Server {
//!     port: u16,
//!     hosts: Vec<String>,
//! }
//!
//! #[derive(Debug, Default, Deserialize)]
//! #[serde(default)]
//! struct AppConfig {
//!     server: Server,
//! }
//!
//! let config: AppConfig =
//!     ocm::read_as_from_current_dir(["classpath:app.properties", "env:"])?;
//! # Ok::<(), ocm::Error>(())
//! ```

use shadow_rs::shadow;
shadow!(build);

pub mod binder;
pub mod cli;
pub mod config;
pub mod error;
pub mod logger;

pub use binder::{BindError, bind};
pub use crate::config::{
    FlatConfig, Loader, Location, ResourceResolver, SearchPath, read, read_as,
    read_as_from_current_dir, read_from_current_dir,
};
pub use error::{Error, Result};

pub fn pkg_version() -> &'static str {
    build::PKG_VERSION
}

pub fn clap_long_version() -> &'static str {
    build::CLAP_LONG_VERSION
}
