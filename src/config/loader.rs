//! Source loader
//!
//! Walks an ordered list of location descriptors and merges every source
//! into one [`FlatConfig`]. Later sources override earlier ones key by key.

use serde::de::DeserializeOwned;

use crate::binder;
use crate::config::environment::{EnvSource, StdEnv, to_flat_key};
use crate::config::flat::FlatConfig;
use crate::config::location::{Location, Scheme};
use crate::config::properties;
use crate::config::resource::{ResourceResolver, SearchPath};
use crate::error::{Error, Result};

/// Loader over a resource resolver and an environment source
///
/// The loader holds no mutable state; every [`Loader::load`] call builds a
/// fresh mapping.
#[derive(Debug, Clone)]
pub struct Loader<R, E = StdEnv> {
    resolver: R,
    env: E,
}

impl<R: ResourceResolver> Loader<R, StdEnv> {
    /// Loader reading `env:` locations from the live process environment
    pub fn new(resolver: R) -> Self {
        Self {
            resolver,
            env: StdEnv,
        }
    }
}

impl<R: ResourceResolver, E: EnvSource> Loader<R, E> {
    /// Replace the environment source, e.g. with a fixed `MapEnv` snapshot
    pub fn with_env<E2: EnvSource>(self, env: E2) -> Loader<R, E2> {
        Loader {
            resolver: self.resolver,
            env,
        }
    }

    pub fn resolver(&self) -> &R {
        &self.resolver
    }

    /// Merge all locations, in order, into one flat mapping
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - a location has an unsupported or missing scheme
    /// - a location is malformed (empty path, `..` in a resource name)
    /// - an existing resource cannot be read or is not valid property text
    ///
    /// Absent `classpath:` and `file:` resources are skipped.
    pub fn load<I>(&self, locations: I) -> Result<FlatConfig>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut config = FlatConfig::new();
        let mut sources = 0usize;

        for raw in locations {
            let location = Location::parse(raw.as_ref());
            self.load_location(&location, &mut config)?;
            sources += 1;
        }

        tracing::info!(sources, keys = config.len(), "Configuration sources merged");
        Ok(config)
    }

    /// Merge all locations and bind the result onto `T`
    pub fn load_as<T, I>(&self, locations: I) -> Result<T>
    where
        T: DeserializeOwned,
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let config = self.load(locations)?;
        Ok(binder::bind(&config)?)
    }

    fn load_location(&self, location: &Location, config: &mut FlatConfig) -> Result<()> {
        match location.scheme() {
            Scheme::Env => {
                self.load_env(config);
                Ok(())
            }
            _ => self.load_resource(location, config),
        }
    }

    fn load_env(&self, config: &mut FlatConfig) {
        let mut count = 0usize;
        for (name, value) in self.env.vars() {
            config.set(to_flat_key(&name), value);
            count += 1;
        }
        tracing::debug!(variables = count, "Loaded environment variables");
    }

    fn load_resource(&self, location: &Location, config: &mut FlatConfig) -> Result<()> {
        let Some(bytes) = self.read_resource(location)? else {
            tracing::debug!(location = %location, "Resource not found, skipping");
            return Ok(());
        };

        let entries = properties::parse_bytes(&bytes).map_err(|e| Error::MalformedPropertyText {
            location: location.to_string(),
            line: e.line,
            message: e.message,
        })?;

        tracing::debug!(location = %location, entries = entries.len(), "Loaded properties");
        config.extend(entries);
        Ok(())
    }

    fn read_resource(&self, location: &Location) -> Result<Option<Vec<u8>>> {
        match location.scheme() {
            Scheme::Classpath => {
                let name = location.resource_name()?;
                self.resolver
                    .open(name)
                    .map_err(|e| Error::io(location.as_str(), e))
            }
            Scheme::File => {
                let path = location.file_path()?;
                match std::fs::read(&path) {
                    Ok(bytes) => Ok(Some(bytes)),
                    Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
                    Err(e) => Err(Error::io(location.as_str(), e)),
                }
            }
            Scheme::Env | Scheme::Unknown(_) => Err(Error::unsupported_scheme(
                location.as_str(),
                location.scheme().as_str(),
            )),
        }
    }
}

/// Merge `locations` into a flat mapping, reading `env:` from the process
/// environment and `classpath:` through `resolver`
pub fn read<R, I>(resolver: R, locations: I) -> Result<FlatConfig>
where
    R: ResourceResolver,
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    Loader::new(resolver).load(locations)
}

/// Like [`read`], then bind the mapping onto `T`
pub fn read_as<T, R, I>(resolver: R, locations: I) -> Result<T>
where
    T: DeserializeOwned,
    R: ResourceResolver,
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    Loader::new(resolver).load_as(locations)
}

/// [`read`] with the current working directory as the only `classpath:` root
pub fn read_from_current_dir<I>(locations: I) -> Result<FlatConfig>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    read(current_dir_resolver()?, locations)
}

/// [`read_as`] with the current working directory as the only `classpath:` root
pub fn read_as_from_current_dir<T, I>(locations: I) -> Result<T>
where
    T: DeserializeOwned,
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    read_as(current_dir_resolver()?, locations)
}

fn current_dir_resolver() -> Result<SearchPath> {
    SearchPath::current_dir().map_err(|e| Error::io("classpath:", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::environment::MapEnv;
    use crate::config::resource::{MemoryResources, NoResources};
    use serde::Deserialize;
    use std::fs;
    use std::sync::Mutex;
    use tempfile::TempDir;

    // Tests touching the real process environment run one at a time
    static TEST_MUTEX: Mutex<()> = Mutex::new(());

    /// Helper to create a temporary directory with property files
    fn setup_dir(files: &[(&str, &str)]) -> TempDir {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        for (name, content) in files {
            let path = temp_dir.path().join(name);
            fs::write(&path, content).expect("Failed to write property file");
        }
        temp_dir
    }

    fn file_location(dir: &TempDir, name: &str) -> String {
        format!("file:{}", dir.path().join(name).display())
    }

    /// Helper to safely set environment variables for a test
    struct EnvGuard {
        vars_to_restore: Vec<(String, Option<String>)>,
    }

    impl EnvGuard {
        fn new() -> Self {
            Self {
                vars_to_restore: Vec::new(),
            }
        }

        fn set(&mut self, key: &str, value: &str) {
            let original = std::env::var(key).ok();
            self.vars_to_restore.push((key.to_string(), original));
            unsafe {
                std::env::set_var(key, value);
            }
        }
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            for (key, original_value) in self.vars_to_restore.iter().rev() {
                unsafe {
                    match original_value {
                        Some(value) => std::env::set_var(key, value),
                        None => std::env::remove_var(key),
                    }
                }
            }
        }
    }

    #[test]
    fn test_later_sources_override_earlier() {
        let dir = setup_dir(&[
            ("1.properties", "a=1\nonly.first=x"),
            ("2.properties", "a=2\nb=2"),
            ("3.properties", "c=3"),
            ("4.properties", "d=4"),
            ("5.properties", "a=5\nb=5"),
        ]);
        let locations: Vec<String> = (1..=5)
            .map(|i| file_location(&dir, &format!("{}.properties", i)))
            .collect();

        let config = Loader::new(NoResources)
            .with_env(MapEnv::new())
            .load(&locations)
            .expect("Should load");

        assert_eq!(config.get("a"), Some("5"));
        assert_eq!(config.get("b"), Some("5"));
        assert_eq!(config.get("c"), Some("3"));
        assert_eq!(config.get("only.first"), Some("x"));
    }

    #[test]
    fn test_resource_keys_lowercased_values_verbatim() {
        let resources = MemoryResources::new().with("app.properties", "Server.Port=8080\nNAME=Mixed Value");
        let config = Loader::new(resources)
            .with_env(MapEnv::new())
            .load(["classpath:app.properties"])
            .expect("Should load");

        assert_eq!(config.keys().collect::<Vec<_>>(), vec!["name", "server.port"]);
        assert_eq!(config.get("name"), Some("Mixed Value"));
    }

    #[test]
    fn test_env_location_transforms_keys() {
        let env: MapEnv = [("DB_HOSTS_0_PORT", "5432"), ("PORT", "80"), ("A_B", "x")]
            .into_iter()
            .collect();
        let config = Loader::new(NoResources)
            .with_env(env)
            .load(["env:"])
            .expect("Should load");

        assert_eq!(config.get("db.hosts[0].port"), Some("5432"));
        assert_eq!(config.get("port"), Some("80"));
        assert_eq!(config.get("a.b"), Some("x"));
        assert_eq!(config.len(), 3);
    }

    #[test]
    fn test_env_scheme_case_insensitive_and_ordered() {
        let resources = MemoryResources::new().with("app.properties", "port=1\nhost=file-host");
        let env: MapEnv = [("PORT", "2")].into_iter().collect();
        let loader = Loader::new(resources).with_env(env);

        let env_last = loader.load(["classpath:app.properties", "ENV:"]).unwrap();
        assert_eq!(env_last.get("port"), Some("2"));
        assert_eq!(env_last.get("host"), Some("file-host"));

        let env_first = loader.load(["Env:", "CLASSPATH:app.properties"]).unwrap();
        assert_eq!(env_first.get("port"), Some("1"));
    }

    #[test]
    fn test_absent_resources_are_skipped() {
        let dir = setup_dir(&[("present.properties", "k=v")]);
        let locations = vec![
            "classpath:missing.properties".to_string(),
            file_location(&dir, "missing.properties"),
            file_location(&dir, "present.properties"),
        ];

        let config = Loader::new(SearchPath::new().with_root(dir.path()))
            .with_env(MapEnv::new())
            .load(&locations)
            .expect("Absent resources are not errors");

        assert_eq!(config.get("k"), Some("v"));
        assert_eq!(config.len(), 1);
    }

    #[test]
    fn test_classpath_resolves_through_search_path() {
        let dir = setup_dir(&[("app.properties", "name=from-classpath")]);
        let config = Loader::new(SearchPath::new().with_root(dir.path()))
            .with_env(MapEnv::new())
            .load(["classpath:/app.properties"])
            .unwrap();
        assert_eq!(config.get("name"), Some("from-classpath"));
    }

    #[test]
    fn test_unsupported_scheme_fails_whole_load() {
        let resources = MemoryResources::new().with("app.properties", "a=1");
        let result = Loader::new(resources)
            .with_env(MapEnv::new())
            .load(["classpath:app.properties", "ftp:thing"]);

        match result {
            Err(Error::UnsupportedScheme { location, scheme }) => {
                assert_eq!(location, "ftp:thing");
                assert_eq!(scheme, "ftp");
            }
            other => panic!("Expected UnsupportedScheme, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_scheme_is_unsupported() {
        let result = Loader::new(NoResources).with_env(MapEnv::new()).load(["app.properties"]);
        assert!(matches!(result, Err(Error::UnsupportedScheme { .. })));
    }

    #[test]
    fn test_malformed_property_text_fails_whole_load() {
        let resources = MemoryResources::new()
            .with("good.properties", "a=1")
            .with("bad.properties", "ok=1\n\nbroken=\\uZZZZ");
        let result = Loader::new(resources)
            .with_env(MapEnv::new())
            .load(["classpath:good.properties", "classpath:bad.properties"]);

        match result {
            Err(Error::MalformedPropertyText { location, line, .. }) => {
                assert_eq!(location, "classpath:bad.properties");
                assert_eq!(line, 3);
            }
            other => panic!("Expected MalformedPropertyText, got {:?}", other),
        }
    }

    #[test]
    fn test_unreadable_file_is_io_error() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        fs::create_dir(dir.path().join("dir.properties")).unwrap();

        let result = Loader::new(NoResources)
            .with_env(MapEnv::new())
            .load([file_location(&dir, "dir.properties")]);
        assert!(matches!(result, Err(Error::Io { .. })));
    }

    #[test]
    fn test_invalid_locations() {
        let loader = Loader::new(NoResources).with_env(MapEnv::new());
        assert!(matches!(loader.load(["file:"]), Err(Error::InvalidLocation { .. })));
        assert!(matches!(
            loader.load(["classpath:../etc/passwd"]),
            Err(Error::InvalidLocation { .. })
        ));
    }

    #[test]
    fn test_empty_location_list() {
        let config = Loader::new(NoResources)
            .with_env(MapEnv::new())
            .load(Vec::<String>::new())
            .unwrap();
        assert!(config.is_empty());
    }

    #[test]
    fn test_load_is_idempotent() {
        let dir = setup_dir(&[("app.properties", "a=1\nb=2")]);
        let env: MapEnv = [("A", "env")].into_iter().collect();
        let loader = Loader::new(SearchPath::new().with_root(dir.path())).with_env(env);
        let locations = ["classpath:app.properties", "env:"];

        assert_eq!(loader.load(locations).unwrap(), loader.load(locations).unwrap());
    }

    #[test]
    fn test_load_as_binds_merged_mapping() {
        #[derive(Debug, Default, Deserialize)]
        #[serde(default)]
        struct Server {
            port: u16,
            hosts: Vec<String>,
        }

        #[derive(Debug, Default, Deserialize)]
        #[serde(default)]
        struct AppConfig {
            server: Server,
        }

        let resources = MemoryResources::new().with(
            "app.properties",
            "server.port=80\nserver.hosts[0]=a\nserver.hosts[1]=b\nunrelated.key=ignored",
        );
        let env: MapEnv = [("SERVER_PORT", "8080")].into_iter().collect();

        let config: AppConfig = Loader::new(resources)
            .with_env(env)
            .load_as(["classpath:app.properties", "env:"])
            .expect("Should bind");

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.hosts, vec!["a", "b"]);
    }

    #[test]
    fn test_load_as_binding_error() {
        #[derive(Debug, Deserialize)]
        #[allow(dead_code)]
        struct Strict {
            port: u16,
        }

        let resources = MemoryResources::new().with("app.properties", "port=not-a-number");
        let result: Result<Strict> = Loader::new(resources)
            .with_env(MapEnv::new())
            .load_as(["classpath:app.properties"]);
        assert!(matches!(result, Err(Error::Binding(_))));
    }

    #[test]
    fn test_load_as_differently_spelled_keys_across_sources() {
        #[derive(Debug, Default, Deserialize)]
        #[serde(default)]
        struct Server {
            max_connections: u32,
        }

        #[derive(Debug, Default, Deserialize)]
        #[serde(default)]
        struct AppConfig {
            server: Server,
        }

        let resources = MemoryResources::new()
            .with("a.properties", "server.max_connections=1")
            .with("b.properties", "server.maxConnections=2");

        for order in [
            ["classpath:a.properties", "classpath:b.properties"],
            ["classpath:b.properties", "classpath:a.properties"],
        ] {
            let config: AppConfig = Loader::new(&resources)
                .with_env(MapEnv::new())
                .load_as(order)
                .expect("Should bind regardless of source order");
            assert_eq!(config.server.max_connections, 1);
        }
    }

    #[test]
    fn test_load_as_env_scalar_does_not_shadow_nested_keys() {
        #[derive(Debug, Default, Deserialize)]
        #[serde(default)]
        struct User {
            name: String,
        }

        #[derive(Debug, Default, Deserialize)]
        #[serde(default)]
        struct AppConfig {
            user: User,
        }

        let resources = MemoryResources::new().with("app.properties", "user.name=alice");
        let env: MapEnv = [("USER", "root"), ("HOME", "/root")].into_iter().collect();

        let config: AppConfig = Loader::new(resources)
            .with_env(env)
            .load_as(["classpath:app.properties", "env:"])
            .expect("Should bind");
        assert_eq!(config.user.name, "alice");
    }

    #[test]
    fn test_read_uses_process_environment() {
        let _guard = TEST_MUTEX.lock().unwrap();
        let mut env = EnvGuard::new();
        env.set("OCM_LOADER_TEST_LIST_0_NAME", "first");

        let config = read(NoResources, ["env:"]).expect("Should read");
        assert_eq!(config.get("ocm.loader.test.list[0].name"), Some("first"));
    }
}
