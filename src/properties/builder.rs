use std::path::Path;

use tracing::debug;

use super::env::EnvSource;
use super::file::FileSource;
use super::source::{MapSource, PropertySource};
use super::{PropertyError, PropertyStore};

/// Builder for layering properties from multiple sources.
///
/// Sources are applied in registration order, with later sources overriding
/// earlier ones key by key.
///
/// ## Example
///
/// ```no_run
/// use testdb_config::PropertyStore;
///
/// // defaults -> local file -> env overrides -> explicit pairs
/// let store = PropertyStore::builder()
///     .with_file("test-db.toml", true)
///     .with_file("test-db.local.toml", false)
///     .with_env("TESTDB", "__")
///     .with_properties([("ebean.test.ddlMode", "create")])
///     .build()?;
///
/// assert_eq!(store.get("ebean.test.ddlMode"), Some("create"));
/// # Ok::<(), testdb_config::PropertyError>(())
/// ```
#[derive(Debug, Default)]
#[must_use = "builders do nothing until .build() is called"]
pub struct PropertyStoreBuilder {
    sources: Vec<Box<dyn PropertySource>>,
}

impl PropertyStoreBuilder {
    /// Adds a TOML file to be loaded.
    ///
    /// If `required` is `true`, the build will fail if the file doesn't exist.
    pub fn with_file(self, path: impl AsRef<Path>, required: bool) -> Self {
        self.with_source(FileSource::new(path, required))
    }

    /// Loads properties from environment variables with the given prefix.
    ///
    /// See [`EnvSource`] for how variable names map to property keys.
    pub fn with_env(self, prefix: impl Into<String>, separator: impl Into<String>) -> Self {
        self.with_source(EnvSource::new(prefix, separator))
    }

    /// Adds literal key/value pairs.
    pub fn with_properties<K, V>(self, pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.with_source(MapSource::new(pairs))
    }

    pub fn with_source(mut self, source: impl PropertySource + 'static) -> Self {
        self.sources.push(Box::new(source));
        self
    }

    /// Loads every source in order and merges the results.
    pub fn build(self) -> Result<PropertyStore, PropertyError> {
        let mut store = PropertyStore::new();

        for source in &self.sources {
            let entries = source.entries()?;
            debug!(?source, count = entries.len(), "loaded property source");
            store.extend(entries.into_iter().map(|e| (e.key, e.value)));
        }

        Ok(store)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_later_sources_override_earlier() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
            [ebean.test]
            ddlMode = "dropCreate"
            useDocker = "false"
            "#
        )
        .unwrap();

        let store = PropertyStore::builder()
            .with_file(file.path(), true)
            .with_properties([("ebean.test.ddlMode", "migration")])
            .build()
            .unwrap();

        assert_eq!(store.get("ebean.test.ddlMode"), Some("migration"));
        assert_eq!(store.get("ebean.test.useDocker"), Some("false"));
    }

    #[test]
    fn test_env_layer_applies_in_order() {
        std::env::set_var("TESTDB_BUILDER__ebean__test__containerMode", "container");

        let store = PropertyStore::builder()
            .with_properties([("ebean.test.containerMode", "dropCreate")])
            .with_env("TESTDB_BUILDER", "__")
            .build()
            .unwrap();

        assert_eq!(store.get("ebean.test.containerMode"), Some("container"));
        std::env::remove_var("TESTDB_BUILDER__ebean__test__containerMode");
    }

    #[test]
    fn test_missing_required_file_fails_build() {
        let result = PropertyStore::builder()
            .with_properties([("a", "b")])
            .with_file("/nonexistent/test-db.toml", true)
            .build();

        assert!(matches!(result, Err(PropertyError::FileNotFound(_))));
    }
}
