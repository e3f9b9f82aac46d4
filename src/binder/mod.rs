//! Structural binder
//!
//! Projects a [`FlatConfig`] onto any `serde` deserializable type by applying
//! every entry as a `config` override and deserializing the resulting tree:
//! - dotted segments are nested fields: `server.port`
//! - `name[i]` is element `i` of a sequence; sequences grow to the highest
//!   index referenced and gaps hold nil (`None` for `Option` elements)
//! - all-digit segments (`codes.007`) stay map keys
//! - a segment matches a field whose name equals it; keys are lower-case, so
//!   `max_connections` binds from `max_connections` only
//! - keys without a matching field are ignored
//!
//! Targets describe defaults with `#[serde(default)]`; missing fields without
//! a default are reported by serde as usual.

mod error;
mod keys;

use config::Config;
use serde::de::DeserializeOwned;

use crate::config::FlatConfig;

pub use error::BindError;

/// Highest sequence index a key may address
pub const MAX_INDEX: usize = 65_535;

/// Bind a flat mapping onto `T`
pub fn bind<T: DeserializeOwned>(config: &FlatConfig) -> Result<T, BindError> {
    let mut builder = Config::builder();
    for (path, value) in keys::overrides(config)? {
        builder = builder.set_override(path, value)?;
    }
    Ok(builder.build()?.try_deserialize()?)
}
