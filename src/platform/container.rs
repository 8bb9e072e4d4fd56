//! Parameters for launching a disposable database container.

use std::collections::BTreeMap;

use serde::Serialize;

use super::resolver::{KeyResolver, PlatformKey};
use crate::PropertyStore;

/// Global switch for container use.
pub const USE_DOCKER_KEY: &str = "ebean.test.useDocker";

/// Global override of the computed container start mode.
pub const CONTAINER_MODE_KEY: &str = "ebean.test.containerMode";

/// Launch parameters keyed `<platform>.<key>`, read by the container launcher.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ContainerProperties {
    entries: BTreeMap<String, String>,
}

impl ContainerProperties {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn into_inner(self) -> BTreeMap<String, String> {
        self.entries
    }
}

/// Whether a container should be launched: the platform `useDocker` key,
/// falling back to `ebean.test.useDocker`. Anything but `false` enables it.
pub(crate) fn use_docker(keys: &KeyResolver, store: &PropertyStore) -> bool {
    keys.resolve(store, PlatformKey::UseDocker, store.get(USE_DOCKER_KEY))
        .map_or(true, |val| !val.eq_ignore_ascii_case("false"))
}

/// The resolved connection state copied into the container parameters.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ConnectionMirror<'a> {
    pub port: u16,
    pub database_name: &'a str,
    pub username: Option<&'a str>,
    pub password: Option<&'a str>,
    pub url: Option<&'a str>,
    pub driver: Option<&'a str>,
}

pub(crate) struct ContainerParamBuilder<'a> {
    keys: &'a KeyResolver,
    store: &'a PropertyStore,
    props: ContainerProperties,
}

impl<'a> ContainerParamBuilder<'a> {
    pub fn new(keys: &'a KeyResolver, store: &'a PropertyStore, props: ContainerProperties) -> Self {
        Self { keys, store, props }
    }

    fn set(&mut self, key: &str, value: impl Into<String>) {
        self.props
            .entries
            .insert(format!("{}.{}", self.keys.platform(), key), value.into());
    }

    /// Sets the image version and the start mode.
    ///
    /// `drop_create` gives start mode `dropCreate`; `ebean.test.containerMode`
    /// replaces whatever was computed.
    pub fn version(mut self, default: &str, drop_create: bool) -> Self {
        let store = self.store;
        let version = self.keys.resolve_or(store, PlatformKey::Version, default);
        self.set("version", version);

        if drop_create {
            self.set("startMode", "dropCreate");
        }
        if let Some(mode) = store.get(CONTAINER_MODE_KEY) {
            self.set("startMode", mode);
        }
        self
    }

    /// Copies the resolved connection fields. Unset fields are skipped.
    pub fn connection(mut self, conn: ConnectionMirror<'_>) -> Self {
        self.set("port", conn.port.to_string());
        self.set("dbName", conn.database_name);
        let optional = [
            ("dbUser", conn.username),
            ("dbPassword", conn.password),
            ("url", conn.url),
            ("driver", conn.driver),
        ];
        for (key, value) in optional {
            if let Some(value) = value {
                self.set(key, value);
            }
        }
        self
    }

    /// Applies each passthrough parameter that resolves through either the
    /// platform key or the `docker.<platform>.<key>` override.
    pub fn optional_params(mut self) -> Self {
        for key in PlatformKey::CONTAINER_PARAMS {
            if let Some(value) = self.keys.resolve_docker(self.store, key) {
                self.set(key.as_str(), value);
            }
        }
        self
    }

    /// Sets `dbExtensions` from the platform `extensions` key, normalized.
    pub fn extensions(mut self, default: Option<&str>) -> Self {
        if let Some(value) = self.keys.resolve(self.store, PlatformKey::Extensions, default) {
            self.set("dbExtensions", trim_extensions(&value));
        }
        self
    }

    pub fn build(self) -> ContainerProperties {
        self.props
    }
}

/// Removes spaces and collapses doubled separators: `" hstore,, pgcrypto "`
/// becomes `"hstore,pgcrypto"`.
pub(crate) fn trim_extensions(value: &str) -> String {
    value
        .split(',')
        .map(|ext| ext.replace(' ', ""))
        .filter(|ext| !ext.is_empty())
        .collect::<Vec<_>>()
        .join(",")
}
