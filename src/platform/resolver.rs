//! Platform-scoped override lookup.
//!
//! Every platform-specific behavior is an optional `ebean.test.<platform>.<key>`
//! property. Container-only parameters get one more layer on top,
//! `docker.<platform>.<key>`, which wins when present.

use std::fmt;

use tracing::trace;

use crate::PropertyStore;

/// The keys that can be overridden per platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlatformKey {
    Port,
    DatabaseName,
    Username,
    Password,
    Url,
    Driver,
    UseDocker,
    Version,
    Extensions,
    DatabasePlatformName,
    ContainerName,
    Image,
    InternalPort,
    StartMode,
    StopMode,
    MaxReadyAttempts,
    Tmpfs,
    DbAdminUser,
    DbAdminPassword,
}

impl PlatformKey {
    /// Optional container parameters passed through as-is, in application order.
    pub const CONTAINER_PARAMS: [PlatformKey; 9] = [
        PlatformKey::ContainerName,
        PlatformKey::Image,
        PlatformKey::InternalPort,
        PlatformKey::StartMode,
        PlatformKey::StopMode,
        PlatformKey::MaxReadyAttempts,
        PlatformKey::Tmpfs,
        PlatformKey::DbAdminUser,
        PlatformKey::DbAdminPassword,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Port => "port",
            Self::DatabaseName => "databaseName",
            Self::Username => "username",
            Self::Password => "password",
            Self::Url => "url",
            Self::Driver => "driver",
            Self::UseDocker => "useDocker",
            Self::Version => "version",
            Self::Extensions => "extensions",
            Self::DatabasePlatformName => "databasePlatformName",
            Self::ContainerName => "containerName",
            Self::Image => "image",
            Self::InternalPort => "internalPort",
            Self::StartMode => "startMode",
            Self::StopMode => "stopMode",
            Self::MaxReadyAttempts => "maxReadyAttempts",
            Self::Tmpfs => "tmpfs",
            Self::DbAdminUser => "dbAdminUser",
            Self::DbAdminPassword => "dbAdminPassword",
        }
    }
}

impl fmt::Display for PlatformKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Looks up overrides for one platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyResolver {
    platform: String,
}

impl KeyResolver {
    pub fn new(platform: impl Into<String>) -> Self {
        Self {
            platform: platform.into(),
        }
    }

    pub fn platform(&self) -> &str {
        &self.platform
    }

    /// The full property name, e.g. `ebean.test.postgres.port`.
    pub fn platform_key(&self, key: PlatformKey) -> String {
        format!("ebean.test.{}.{}", self.platform, key)
    }

    /// The container override property name, e.g. `docker.postgres.image`.
    pub fn docker_key(&self, key: PlatformKey) -> String {
        format!("docker.{}.{}", self.platform, key)
    }

    /// Returns the platform override for `key`, or `default` when absent.
    pub fn resolve(
        &self,
        store: &PropertyStore,
        key: PlatformKey,
        default: Option<&str>,
    ) -> Option<String> {
        let name = self.platform_key(key);
        match store.get(&name) {
            Some(value) => {
                trace!(key = %name, "platform override");
                Some(value.to_owned())
            }
            None => default.map(str::to_owned),
        }
    }

    /// Like [`resolve`](Self::resolve) with a mandatory default.
    pub fn resolve_or(&self, store: &PropertyStore, key: PlatformKey, default: &str) -> String {
        store
            .get(&self.platform_key(key))
            .unwrap_or(default)
            .to_owned()
    }

    /// Resolves a container parameter: `docker.<platform>.<key>` first, then
    /// the platform override, then nothing.
    pub fn resolve_docker(&self, store: &PropertyStore, key: PlatformKey) -> Option<String> {
        let fallback = self.resolve(store, key, None);
        let name = self.docker_key(key);
        match store.get(&name) {
            Some(value) => {
                trace!(key = %name, "docker override");
                Some(value.to_owned())
            }
            None => fallback,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store(pairs: &[(&str, &str)]) -> PropertyStore {
        pairs.iter().copied().collect()
    }

    #[test]
    fn test_platform_key_wins_over_default() {
        let keys = KeyResolver::new("postgres");
        let store = store(&[("ebean.test.postgres.port", "6432")]);

        assert_eq!(
            keys.resolve(&store, PlatformKey::Port, Some("5432")).as_deref(),
            Some("6432")
        );
        assert_eq!(keys.resolve_or(&store, PlatformKey::Port, "5432"), "6432");
    }

    #[test]
    fn test_absent_key_falls_back_to_default() {
        let keys = KeyResolver::new("postgres");
        let store = store(&[("ebean.test.mysql.port", "3307")]);

        assert_eq!(
            keys.resolve(&store, PlatformKey::Port, Some("5432")).as_deref(),
            Some("5432")
        );
        assert_eq!(keys.resolve(&store, PlatformKey::Port, None), None);
    }

    #[test]
    fn test_docker_key_overrides_platform_key() {
        let keys = KeyResolver::new("postgres");
        let store = store(&[
            ("ebean.test.postgres.image", "postgres:15"),
            ("docker.postgres.image", "postgres:16-alpine"),
        ]);

        assert_eq!(
            keys.resolve_docker(&store, PlatformKey::Image).as_deref(),
            Some("postgres:16-alpine")
        );
    }

    #[test]
    fn test_docker_lookup_uses_platform_key_when_no_docker_key() {
        let keys = KeyResolver::new("postgres");
        let store = store(&[("ebean.test.postgres.tmpfs", "/var/lib/postgresql/data:rw")]);

        assert_eq!(
            keys.resolve_docker(&store, PlatformKey::Tmpfs).as_deref(),
            Some("/var/lib/postgresql/data:rw")
        );
        assert_eq!(keys.resolve_docker(&store, PlatformKey::Image), None);
    }

    #[test]
    fn test_key_names() {
        let keys = KeyResolver::new("sqlserver");

        assert_eq!(
            keys.platform_key(PlatformKey::DatabasePlatformName),
            "ebean.test.sqlserver.databasePlatformName"
        );
        assert_eq!(
            keys.docker_key(PlatformKey::MaxReadyAttempts),
            "docker.sqlserver.maxReadyAttempts"
        );
    }
}
