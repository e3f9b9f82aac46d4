//! Environment variable sources and the environment key transform
//!
//! Environment names cannot carry dots or brackets, so underscores play both
//! roles: `_<digits>_` marks an array index and any other `_` separates path
//! segments. `DB_HOSTS_0_PORT` therefore maps to `db.hosts[0].port`.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;

/// `_<digits>_`, matched leftmost-first without overlap
static INDEX_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"_([0-9]+)_").expect("index pattern is a valid regex"));

/// Transform an environment variable name into a flat configuration key
///
/// 1. every `_<digits>_` run becomes `[<digits>].`
/// 2. every remaining `_` becomes `.`
/// 3. the result is lower-cased
///
/// Overlapping runs resolve leftmost-first: `A_12_3_B` becomes `a[12].3.b`.
pub fn to_flat_key(name: &str) -> String {
    let indexed = INDEX_RUN.replace_all(name, "[$1].");
    indexed.replace('_', ".").to_lowercase()
}

/// Abstraction over the environment variable table
///
/// Lets callers read configuration against a fixed snapshot instead of the
/// live process environment.
pub trait EnvSource {
    /// All variables, in no particular order
    fn vars(&self) -> Box<dyn Iterator<Item = (String, String)> + '_>;
}

/// The live process environment
///
/// Variables whose name or value is not valid Unicode are skipped.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdEnv;

impl EnvSource for StdEnv {
    fn vars(&self) -> Box<dyn Iterator<Item = (String, String)> + '_> {
        Box::new(std::env::vars_os().filter_map(|(name, value)| {
            match (name.into_string(), value.into_string()) {
                (Ok(name), Ok(value)) => Some((name, value)),
                (Ok(name), Err(_)) => {
                    tracing::warn!(variable = %name, "Skipping environment variable with non-Unicode value");
                    None
                }
                (Err(name), _) => {
                    tracing::warn!(variable = ?name, "Skipping environment variable with non-Unicode name");
                    None
                }
            }
        }))
    }
}

/// An explicit environment snapshot
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MapEnv {
    vars: BTreeMap<String, String>,
}

impl MapEnv {
    pub fn new() -> Self {
        Self::default()
    }

    /// Capture the current process environment
    pub fn snapshot() -> Self {
        StdEnv.vars().collect()
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.vars.insert(name.into(), value.into());
        self
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MapEnv {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            vars: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl EnvSource for MapEnv {
    fn vars(&self) -> Box<dyn Iterator<Item = (String, String)> + '_> {
        Box::new(self.vars.iter().map(|(k, v)| (k.clone(), v.clone())))
    }
}
