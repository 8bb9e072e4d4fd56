use super::PropertyError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyEntry {
    pub key: String,
    pub value: String,
}

impl PropertyEntry {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// A layer of properties applied by [`PropertyStoreBuilder`](super::PropertyStoreBuilder).
pub trait PropertySource: Send + Sync + std::fmt::Debug {
    fn entries(&self) -> Result<Vec<PropertyEntry>, PropertyError>;
}

/// Literal in-memory pairs.
#[derive(Debug, Clone, Default)]
pub struct MapSource {
    entries: Vec<PropertyEntry>,
}

impl MapSource {
    pub fn new<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: pairs
                .into_iter()
                .map(|(k, v)| PropertyEntry::new(k, v))
                .collect(),
        }
    }
}

impl PropertySource for MapSource {
    fn entries(&self) -> Result<Vec<PropertyEntry>, PropertyError> {
        Ok(self.entries.clone())
    }
}
