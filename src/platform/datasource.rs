use std::collections::BTreeSet;

use serde::Serialize;
use tracing::debug;

use super::resolver::{KeyResolver, PlatformKey};
use super::ConfigError;
use crate::PropertyStore;

/// The connection settings handed to the datasource pool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DataSourceConfig {
    pub url: String,
    pub driver: Option<String>,
    pub username: String,
    #[serde(skip_serializing)]
    pub password: String,
}

/// Answers whether a driver identifier can be loaded in this environment.
///
/// Implemented for [`DriverSet`] and for any `Fn(&str) -> bool`.
pub trait DriverRegistry: Send + Sync {
    fn is_registered(&self, driver: &str) -> bool;
}

impl<F> DriverRegistry for F
where
    F: Fn(&str) -> bool + Send + Sync,
{
    fn is_registered(&self, driver: &str) -> bool {
        self(driver)
    }
}

/// A fixed set of known driver identifiers.
///
/// ```
/// use testdb_config::{DriverRegistry, DriverSet};
///
/// let drivers = DriverSet::new(["org.postgresql.Driver"]);
/// assert!(drivers.is_registered("org.postgresql.Driver"));
/// assert!(!drivers.is_registered("com.mysql.cj.jdbc.Driver"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DriverSet {
    drivers: BTreeSet<String>,
}

impl DriverSet {
    pub fn new<S: Into<String>>(drivers: impl IntoIterator<Item = S>) -> Self {
        Self {
            drivers: drivers.into_iter().map(Into::into).collect(),
        }
    }

    pub fn register(&mut self, driver: impl Into<String>) {
        self.drivers.insert(driver.into());
    }
}

impl DriverRegistry for DriverSet {
    fn is_registered(&self, driver: &str) -> bool {
        self.drivers.contains(driver)
    }
}

/// Connection fields resolved by the earlier setup steps.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ConnectionFields<'a> {
    pub url: Option<&'a str>,
    pub driver: Option<&'a str>,
    pub username: Option<&'a str>,
    pub password: Option<&'a str>,
}

fn required(value: Option<String>, field: &'static str) -> Result<String, ConfigError> {
    value
        .filter(|v| !v.is_empty())
        .ok_or(ConfigError::MissingField(field))
}

/// Builds the [`DataSourceConfig`] for `db`, mirroring each field into
/// `datasource.<db>.<key>`. Username, password and url must resolve to
/// non-empty values; nothing is mirrored otherwise.
pub(crate) fn resolve_data_source(
    keys: &KeyResolver,
    store: &mut PropertyStore,
    db: &str,
    fields: ConnectionFields<'_>,
    registry: &dyn DriverRegistry,
) -> Result<DataSourceConfig, ConfigError> {
    let username = fields.username.ok_or(ConfigError::MissingField("username"))?;
    let password = fields.password.ok_or(ConfigError::MissingField("password"))?;

    let username = keys.resolve(store, PlatformKey::Username, Some(username));
    let username = required(username, "username")?;
    let password = keys.resolve(store, PlatformKey::Password, Some(password));
    let password = required(password, "password")?;
    let url = keys.resolve(store, PlatformKey::Url, fields.url);
    let url = required(url, "url")?;
    let driver = keys.resolve(store, PlatformKey::Driver, fields.driver);

    let resolved = [
        (PlatformKey::Username, Some(&username)),
        (PlatformKey::Password, Some(&password)),
        (PlatformKey::Url, Some(&url)),
        (PlatformKey::Driver, driver.as_ref()),
    ];
    for (key, value) in resolved {
        if let Some(value) = value {
            store.set(format!("datasource.{db}.{key}"), value.as_str());
        }
    }

    if let Some(driver) = &driver {
        if !registry.is_registered(driver) {
            return Err(ConfigError::DriverNotFound(driver.clone()));
        }
    }

    debug!(db, %url, ?driver, %username, "resolved datasource");
    Ok(DataSourceConfig {
        url,
        driver,
        username,
        password,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields<'a>(username: Option<&'a str>, password: Option<&'a str>) -> ConnectionFields<'a> {
        ConnectionFields {
            url: Some("jdbc:postgresql://localhost:5432/orders"),
            driver: Some("org.postgresql.Driver"),
            username,
            password,
        }
    }

    fn postgres_drivers() -> DriverSet {
        DriverSet::new(["org.postgresql.Driver"])
    }

    #[test]
    fn test_resolves_and_mirrors_into_store() {
        let keys = KeyResolver::new("postgres");
        let mut store = PropertyStore::new();

        let ds = resolve_data_source(
            &keys,
            &mut store,
            "orders",
            fields(Some("orders"), Some("test")),
            &postgres_drivers(),
        )
        .unwrap();

        assert_eq!(ds.url, "jdbc:postgresql://localhost:5432/orders");
        assert_eq!(ds.driver.as_deref(), Some("org.postgresql.Driver"));
        assert_eq!(ds.username, "orders");
        assert_eq!(ds.password, "test");
        assert_eq!(store.get("datasource.orders.username"), Some("orders"));
        assert_eq!(store.get("datasource.orders.password"), Some("test"));
        assert_eq!(
            store.get("datasource.orders.url"),
            Some("jdbc:postgresql://localhost:5432/orders")
        );
        assert_eq!(store.get("datasource.orders.driver"), Some("org.postgresql.Driver"));
    }

    #[test]
    fn test_platform_overrides_apply_at_resolution() {
        let keys = KeyResolver::new("postgres");
        let mut store: PropertyStore = [("ebean.test.postgres.password", "s3cret")]
            .into_iter()
            .collect();

        let ds = resolve_data_source(
            &keys,
            &mut store,
            "orders",
            fields(Some("orders"), Some("test")),
            &postgres_drivers(),
        )
        .unwrap();

        assert_eq!(ds.password, "s3cret");
        assert_eq!(store.get("datasource.orders.password"), Some("s3cret"));
    }

    #[test]
    fn test_missing_username_or_password() {
        let keys = KeyResolver::new("postgres");
        let mut store = PropertyStore::new();

        let err = resolve_data_source(
            &keys,
            &mut store,
            "orders",
            fields(None, Some("test")),
            &postgres_drivers(),
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::MissingField("username")));

        let err = resolve_data_source(
            &keys,
            &mut store,
            "orders",
            fields(Some("orders"), None),
            &postgres_drivers(),
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::MissingField("password")));
        assert!(store.is_empty());
    }

    #[test]
    fn test_empty_credential_overrides_are_rejected() {
        let keys = KeyResolver::new("postgres");
        let mut store: PropertyStore = [("ebean.test.postgres.username", "")]
            .into_iter()
            .collect();

        let err = resolve_data_source(
            &keys,
            &mut store,
            "orders",
            fields(Some("orders"), Some("test")),
            &postgres_drivers(),
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::MissingField("username")));

        store.remove("ebean.test.postgres.username");
        store.set("ebean.test.postgres.password", "");
        let err = resolve_data_source(
            &keys,
            &mut store,
            "orders",
            fields(Some("orders"), Some("test")),
            &postgres_drivers(),
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::MissingField("password")));
        assert!(!store.contains_key("datasource.orders.username"));
    }

    #[test]
    fn test_empty_credentials_at_call_time_are_rejected() {
        let keys = KeyResolver::new("postgres");
        let mut store = PropertyStore::new();

        let err = resolve_data_source(
            &keys,
            &mut store,
            "orders",
            fields(Some(""), Some("test")),
            &postgres_drivers(),
        )
        .unwrap_err();

        assert!(matches!(err, ConfigError::MissingField("username")));
        assert!(store.is_empty());
    }

    #[test]
    fn test_unregistered_driver_is_named() {
        let keys = KeyResolver::new("postgres");
        let mut store = PropertyStore::new();

        let err = resolve_data_source(
            &keys,
            &mut store,
            "orders",
            fields(Some("orders"), Some("test")),
            &DriverSet::default(),
        )
        .unwrap_err();

        assert!(matches!(&err, ConfigError::DriverNotFound(d) if d == "org.postgresql.Driver"));
        assert!(err.to_string().contains("org.postgresql.Driver"));
    }

    #[test]
    fn test_registered_driver_is_accepted() {
        let keys = KeyResolver::new("postgres");
        let mut store = PropertyStore::new();
        let mut drivers = DriverSet::default();
        drivers.register("org.postgresql.Driver");

        let ds = resolve_data_source(
            &keys,
            &mut store,
            "orders",
            fields(Some("orders"), Some("test")),
            &drivers,
        )
        .unwrap();

        assert_eq!(ds.driver.as_deref(), Some("org.postgresql.Driver"));
        assert!(drivers.is_registered("org.postgresql.Driver"));
    }

    #[test]
    fn test_absent_driver_skips_registry_check() {
        let keys = KeyResolver::new("h2");
        let mut store = PropertyStore::new();
        let fields = ConnectionFields {
            url: Some("jdbc:h2:mem:orders"),
            driver: None,
            username: Some("sa"),
            password: Some("sa"),
        };

        let ds = resolve_data_source(&keys, &mut store, "orders", fields, &|_: &str| false)
            .unwrap();

        assert_eq!(ds.driver, None);
        assert!(!store.contains_key("datasource.orders.driver"));
    }
}
