use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::PropertyStoreBuilder;

/// Dotted-key string properties shared by every resolver of one run.
///
/// The store is both the configuration input and an output sink: resolved
/// values are written back under datasource-specific keys so that other
/// collaborators can read them from the same place.
///
/// ## Example
///
/// ```
/// use testdb_config::PropertyStore;
///
/// let mut store = PropertyStore::new();
/// store.set("ebean.test.postgres.port", "6432");
///
/// assert_eq!(store.get("ebean.test.postgres.port"), Some("6432"));
/// assert_eq!(store.get("ebean.test.postgres.url"), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PropertyStore {
    entries: BTreeMap<String, String>,
}

impl PropertyStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a builder that layers files, environment variables and
    /// literal pairs into a store.
    pub fn builder() -> PropertyStoreBuilder {
        PropertyStoreBuilder::default()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Sets a property, replacing any previous value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.entries.remove(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates properties in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K, V> FromIterator<(K, V)> for PropertyStore
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl<K, V> Extend<(K, V)> for PropertyStore
where
    K: Into<String>,
    V: Into<String>,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.set(k, v);
        }
    }
}
