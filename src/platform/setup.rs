use serde::Serialize;
use tracing::info;

use super::config::Config;
use super::container::ContainerProperties;
use super::datasource::{DataSourceConfig, DriverRegistry};
use super::ddl::{DdlFlags, DdlMode, MigrationRun};
use super::ConfigError;
use crate::PropertyStore;

/// Built-in defaults for one database platform.
///
/// Every value can still be overridden through `ebean.test.<platform>.<key>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformDefaults {
    pub platform: String,
    pub port: u16,
    pub url_template: String,
    pub driver: Option<String>,
    pub docker_version: String,
    pub extensions: Option<String>,
    pub ddl_mode: Option<String>,
}

impl PlatformDefaults {
    pub fn new(
        platform: impl Into<String>,
        port: u16,
        url_template: impl Into<String>,
        docker_version: impl Into<String>,
    ) -> Self {
        Self {
            platform: platform.into(),
            port,
            url_template: url_template.into(),
            driver: None,
            docker_version: docker_version.into(),
            extensions: None,
            ddl_mode: None,
        }
    }

    pub fn with_driver(mut self, driver: impl Into<String>) -> Self {
        self.driver = Some(driver.into());
        self
    }

    pub fn with_extensions(mut self, extensions: impl Into<String>) -> Self {
        self.extensions = Some(extensions.into());
        self
    }

    /// Mode used when `ebean.test.ddlMode` is not set.
    pub fn with_ddl_mode(mut self, mode: impl Into<String>) -> Self {
        self.ddl_mode = Some(mode.into());
        self
    }

    pub fn postgres() -> Self {
        Self::new(
            "postgres",
            6432,
            "jdbc:postgresql://localhost:${port}/${databaseName}",
            "16",
        )
        .with_driver("org.postgresql.Driver")
        .with_ddl_mode("dropCreate")
    }

    pub fn mysql() -> Self {
        Self::new(
            "mysql",
            4306,
            "jdbc:mysql://localhost:${port}/${databaseName}",
            "8.0",
        )
        .with_driver("com.mysql.cj.jdbc.Driver")
        .with_ddl_mode("dropCreate")
    }

    pub fn sqlserver() -> Self {
        Self::new(
            "sqlserver",
            1433,
            "jdbc:sqlserver://localhost:${port};databaseName=${databaseName};\
             integratedSecurity=false;trustServerCertificate=true",
            "2019-latest",
        )
        .with_driver("com.microsoft.sqlserver.jdbc.SQLServerDriver")
        .with_ddl_mode("dropCreate")
    }
}

/// Everything the setup decided, for the ORM and the container launcher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedConfig {
    pub db: String,
    pub platform: String,
    pub ddl_mode: DdlMode,
    pub ddl: DdlFlags,
    pub container_drop_create: bool,
    pub use_docker: bool,
    pub data_source: DataSourceConfig,
    /// Empty when container use is disabled.
    pub container: ContainerProperties,
}

impl ResolvedConfig {
    /// Whether the ORM must not run migrations on startup.
    pub fn migration_disabled(&self) -> bool {
        self.ddl.migration == MigrationRun::Disable
    }
}

/// Resolves the settings for datasource `db` in the fixed order: connection
/// fields, ddl mode, datasource, then container parameters if enabled.
///
/// ## Example
///
/// ```
/// use testdb_config::{setup, DriverSet, PlatformDefaults, PropertyStore};
///
/// let mut store: PropertyStore = [("ebean.test.ddlMode", "migration")].into_iter().collect();
/// let drivers = DriverSet::new(["org.postgresql.Driver"]);
///
/// let resolved = setup("orders", "orders", &PlatformDefaults::postgres(), &mut store, &drivers)?;
///
/// assert_eq!(resolved.data_source.url, "jdbc:postgresql://localhost:6432/orders");
/// assert_eq!(store.get("ebean.orders.migration.run"), Some("true"));
/// # Ok::<(), testdb_config::ConfigError>(())
/// ```
pub fn setup(
    db: &str,
    database_name: &str,
    defaults: &PlatformDefaults,
    store: &mut PropertyStore,
    registry: &dyn DriverRegistry,
) -> Result<ResolvedConfig, ConfigError> {
    let mut config = Config::new(db, defaults.platform.as_str(), database_name, store);

    config.set_default_port(defaults.port)?;
    config.set_database_name(database_name);
    config.set_username_default();
    config.set_password_default();
    config.set_url(&defaults.url_template);
    if let Some(driver) = &defaults.driver {
        config.set_driver(driver);
    }
    config.set_database_platform_name();

    let ddl_mode = config.ddl_mode(defaults.ddl_mode.as_deref())?;
    let data_source = config.datasource_defaults(registry)?.clone();

    let use_docker = config.is_use_docker();
    info!(db, platform = %defaults.platform, use_docker, "container use");
    if use_docker {
        config.set_docker_version(&defaults.docker_version);
        config.set_db_extensions(defaults.extensions.as_deref());
    }

    Ok(ResolvedConfig {
        db: db.to_string(),
        platform: defaults.platform.clone(),
        ddl_mode,
        ddl: ddl_mode.flags(),
        container_drop_create: config.container_drop_create(),
        use_docker,
        data_source,
        container: config.container_properties().clone(),
    })
}
