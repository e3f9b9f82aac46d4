//! Configuration source loading
//!
//! Merges configuration from an ordered list of location descriptors:
//! - `env:` - process environment variables, keys transformed so that
//!   `DB_HOSTS_0_PORT` becomes `db.hosts[0].port`
//! - `classpath:<name>` - property resources resolved through a [`ResourceResolver`]
//! - `file:<path>` - property files on disk
//!
//! # Precedence
//! Locations are applied in order; a key set by a later location overrides
//! the same key from an earlier one. Missing `classpath:` and `file:`
//! resources contribute nothing, so optional override files can be listed
//! unconditionally.

pub mod environment;
pub mod flat;
pub mod loader;
pub mod location;
pub mod properties;
pub mod resource;

// Re-export public types
pub use environment::{EnvSource, MapEnv, StdEnv, to_flat_key};
pub use flat::FlatConfig;
pub use loader::{Loader, read, read_as, read_as_from_current_dir, read_from_current_dir};
pub use location::{Location, Scheme};
pub use resource::{MemoryResources, NoResources, ResourceResolver, SearchPath};
