//! Resource resolution for `classpath:` locations
//!
//! A [`ResourceResolver`] plays the part of a class loader: given a relative
//! resource name it returns the resource bytes, or `None` when nothing by that
//! name exists.

use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};

/// Resolves relative resource names to their content
pub trait ResourceResolver {
    /// Read a resource fully
    ///
    /// Returns `Ok(None)` when the resource does not exist. Any other failure
    /// is an error.
    fn open(&self, name: &str) -> io::Result<Option<Vec<u8>>>;
}

impl<R: ResourceResolver + ?Sized> ResourceResolver for &R {
    fn open(&self, name: &str) -> io::Result<Option<Vec<u8>>> {
        (**self).open(name)
    }
}

impl<R: ResourceResolver + ?Sized> ResourceResolver for Box<R> {
    fn open(&self, name: &str) -> io::Result<Option<Vec<u8>>> {
        (**self).open(name)
    }
}

/// Ordered list of root directories; the first root holding the resource wins
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchPath {
    roots: Vec<PathBuf>,
}

impl SearchPath {
    pub fn new() -> Self {
        Self::default()
    }

    /// Search path with the current working directory as its only root
    pub fn current_dir() -> io::Result<Self> {
        Ok(Self::new().with_root(std::env::current_dir()?))
    }

    /// Search path built from an environment variable holding a path list
    /// in the platform's syntax (`:`-separated on Unix)
    ///
    /// An unset variable yields an empty search path.
    pub fn from_env_var(name: &str) -> Self {
        let roots = std::env::var_os(name)
            .map(|value| std::env::split_paths(&value).collect())
            .unwrap_or_default();
        Self { roots }
    }

    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.roots.push(root.into());
        self
    }

    pub fn push(&mut self, root: impl Into<PathBuf>) {
        self.roots.push(root.into());
    }

    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }

    fn candidate(root: &Path, name: &str) -> PathBuf {
        name.split('/')
            .filter(|segment| !segment.is_empty() && *segment != ".")
            .fold(root.to_path_buf(), |path, segment| path.join(segment))
    }
}

impl<P: Into<PathBuf>> FromIterator<P> for SearchPath {
    fn from_iter<I: IntoIterator<Item = P>>(iter: I) -> Self {
        Self {
            roots: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl ResourceResolver for SearchPath {
    fn open(&self, name: &str) -> io::Result<Option<Vec<u8>>> {
        for root in &self.roots {
            let candidate = Self::candidate(root, name);
            match std::fs::read(&candidate) {
                Ok(bytes) => {
                    tracing::trace!(path = %candidate.display(), "Resolved resource");
                    return Ok(Some(bytes));
                }
                Err(e) if e.kind() == io::ErrorKind::NotFound => continue,
                Err(e) => return Err(e),
            }
        }
        Ok(None)
    }
}

/// In-memory resources, e.g. defaults compiled in with `include_str!`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryResources {
    resources: HashMap<String, Vec<u8>>,
}

impl MemoryResources {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        self.insert(name, content);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, content: impl Into<Vec<u8>>) {
        self.resources.insert(name.into(), content.into());
    }
}

impl ResourceResolver for MemoryResources {
    fn open(&self, name: &str) -> io::Result<Option<Vec<u8>>> {
        Ok(self.resources.get(name).cloned())
    }
}

/// Resolver with no resources at all
#[derive(Debug, Clone, Copy, Default)]
pub struct NoResources;

impl ResourceResolver for NoResources {
    fn open(&self, _name: &str) -> io::Result<Option<Vec<u8>>> {
        Ok(None)
    }
}
