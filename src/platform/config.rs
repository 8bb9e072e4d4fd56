use tracing::{debug, info};

use super::container::{self, ConnectionMirror, ContainerParamBuilder, ContainerProperties};
use super::datasource::{self, ConnectionFields, DataSourceConfig, DriverRegistry};
use super::ddl::{DdlFlags, DdlMode, MigrationRun, DDL_MODE_KEY};
use super::resolver::{KeyResolver, PlatformKey};
use super::template::substitute;
use super::ConfigError;
use crate::PropertyStore;

/// Default password when nothing overrides it.
pub const DEFAULT_PASSWORD: &str = "test";

/// Settings for one test datasource on one database platform.
///
/// Built once at startup and driven through a fixed sequence of setup
/// calls: the connection setters, then [`ddl_mode`](Self::ddl_mode), then
/// [`datasource_defaults`](Self::datasource_defaults), then (only if
/// [`is_use_docker`](Self::is_use_docker)) the container setters.
/// [`setup`](fn@super::setup) runs that sequence from a [`PlatformDefaults`](super::PlatformDefaults).
///
/// Every setter first consults `ebean.test.<platform>.<key>` and only uses
/// its argument when that property is absent.
#[derive(Debug)]
pub struct Config<'s> {
    db: String,
    keys: KeyResolver,
    database_name: String,
    port: u16,
    url: Option<String>,
    driver: Option<String>,
    username: Option<String>,
    password: Option<String>,
    container_drop_create: bool,
    ddl: Option<(DdlMode, DdlFlags)>,
    data_source: Option<DataSourceConfig>,
    container_properties: ContainerProperties,
    store: &'s mut PropertyStore,
}

impl<'s> Config<'s> {
    pub fn new(
        db: impl Into<String>,
        platform: impl Into<String>,
        database_name: impl Into<String>,
        store: &'s mut PropertyStore,
    ) -> Self {
        Self {
            db: db.into(),
            keys: KeyResolver::new(platform),
            database_name: database_name.into(),
            port: 0,
            url: None,
            driver: None,
            username: None,
            password: None,
            container_drop_create: false,
            ddl: None,
            data_source: None,
            container_properties: ContainerProperties::default(),
            store,
        }
    }

    pub fn set_default_port(&mut self, default: u16) -> Result<(), ConfigError> {
        let key = self.keys.platform_key(PlatformKey::Port);
        self.port = match self.store.get(&key) {
            Some(val) => val.trim().parse().map_err(|_| ConfigError::InvalidPort {
                value: val.to_string(),
                key,
            })?,
            None => default,
        };
        Ok(())
    }

    pub fn set_database_name(&mut self, database_name: &str) {
        self.database_name = self.resolve(PlatformKey::DatabaseName, database_name);
    }

    pub fn set_username(&mut self, username: &str) {
        self.username = Some(self.resolve(PlatformKey::Username, username));
    }

    /// Username defaults to the database name.
    pub fn set_username_default(&mut self) {
        let database_name = self.resolve(PlatformKey::DatabaseName, &self.database_name);
        self.username = Some(self.resolve(PlatformKey::Username, &database_name));
    }

    pub fn set_password(&mut self, password: &str) {
        self.password = Some(self.resolve(PlatformKey::Password, password));
    }

    pub fn set_password_default(&mut self) {
        self.set_password(DEFAULT_PASSWORD);
    }

    /// Sets the url from `template`, substituting `${port}` and `${databaseName}`.
    pub fn set_url(&mut self, template: &str) {
        let template = self.resolve(PlatformKey::Url, template);
        let url = substitute(&template, |name| match name {
            "port" => Some(self.port.to_string()),
            "databaseName" => Some(self.database_name.clone()),
            _ => None,
        });
        debug!(db = %self.db, %url, "resolved url");
        self.url = Some(url);
    }

    pub fn set_driver(&mut self, driver: &str) {
        self.driver = Some(self.resolve(PlatformKey::Driver, driver));
    }

    /// Copies the platform `databasePlatformName` override, if any, into
    /// `ebean.<db>.databasePlatformName`. Used where one database has
    /// several platform variants, such as SQL Server.
    pub fn set_database_platform_name(&mut self) {
        if let Some(name) = self
            .keys
            .resolve(self.store, PlatformKey::DatabasePlatformName, None)
        {
            self.store
                .set(format!("ebean.{}.databasePlatformName", self.db), name);
        }
    }

    /// Selects the ddl mode from `ebean.test.ddlMode`, falling back to
    /// `default`, and writes the resulting flags.
    ///
    /// Each set flag is written as `ebean.<db>.ddl.<flag> = true`; migration
    /// modes write `ebean.<db>.migration.run = true`. Migration disabling is
    /// only reported through [`DdlMode::flags`] for the caller to act on.
    pub fn ddl_mode(&mut self, default: Option<&str>) -> Result<DdlMode, ConfigError> {
        let mode = DdlMode::select(self.store.get(DDL_MODE_KEY), default)?;
        let flags = mode.flags();
        info!(db = %self.db, platform = self.keys.platform(), %mode, "selected ddl mode");

        if flags.migration == MigrationRun::Enable {
            self.store
                .set(format!("ebean.{}.migration.run", self.db), "true");
        }
        let ddl = [
            ("generate", flags.generate),
            ("run", flags.run),
            ("createOnly", flags.create_only),
        ];
        for (key, set) in ddl {
            if set {
                self.store
                    .set(format!("ebean.{}.ddl.{}", self.db, key), "true");
            }
        }
        if flags.container_drop_create {
            self.container_drop_create = true;
        }

        self.ddl = Some((mode, flags));
        Ok(mode)
    }

    /// Resolves the connection descriptor, mirroring every field into
    /// `datasource.<db>.<key>`.
    ///
    /// Fails if the username, password or url is unset or resolves empty, or
    /// if the driver is not known to `registry`.
    pub fn datasource_defaults(
        &mut self,
        registry: &dyn DriverRegistry,
    ) -> Result<&DataSourceConfig, ConfigError> {
        let fields = ConnectionFields {
            url: self.url.as_deref(),
            driver: self.driver.as_deref(),
            username: self.username.as_deref(),
            password: self.password.as_deref(),
        };
        let ds = datasource::resolve_data_source(&self.keys, self.store, &self.db, fields, registry)?;
        Ok(self.data_source.insert(ds))
    }

    pub fn is_use_docker(&self) -> bool {
        container::use_docker(&self.keys, &*self.store)
    }

    /// Sets the container version, start mode, connection mirror and
    /// passthrough parameters.
    pub fn set_docker_version(&mut self, version: &str) {
        let props = std::mem::take(&mut self.container_properties);
        let conn = ConnectionMirror {
            port: self.port,
            database_name: &self.database_name,
            username: self.username.as_deref(),
            password: self.password.as_deref(),
            url: self.url.as_deref(),
            driver: self.driver.as_deref(),
        };
        self.container_properties = ContainerParamBuilder::new(&self.keys, self.store, props)
            .version(version, self.container_drop_create)
            .connection(conn)
            .optional_params()
            .build();
    }

    /// Sets `dbExtensions` from the platform `extensions` key, e.g.
    /// `ebean.test.postgres.extensions=hstore,pgcrypto`.
    pub fn set_db_extensions(&mut self, default: Option<&str>) {
        let props = std::mem::take(&mut self.container_properties);
        self.container_properties = ContainerParamBuilder::new(&self.keys, self.store, props)
            .extensions(default)
            .build();
    }

    fn resolve(&self, key: PlatformKey, default: &str) -> String {
        self.keys.resolve_or(&*self.store, key, default)
    }

    pub fn db(&self) -> &str {
        &self.db
    }

    pub fn platform(&self) -> &str {
        self.keys.platform()
    }

    pub fn database_name(&self) -> &str {
        &self.database_name
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    pub fn driver(&self) -> Option<&str> {
        self.driver.as_deref()
    }

    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    pub fn password(&self) -> Option<&str> {
        self.password.as_deref()
    }

    pub fn container_drop_create(&self) -> bool {
        self.container_drop_create
    }

    /// The selected mode and its flags, once [`ddl_mode`](Self::ddl_mode) has run.
    pub fn ddl(&self) -> Option<(DdlMode, DdlFlags)> {
        self.ddl
    }

    pub fn data_source(&self) -> Option<&DataSourceConfig> {
        self.data_source.as_ref()
    }

    pub fn container_properties(&self) -> &ContainerProperties {
        &self.container_properties
    }

    pub fn store(&self) -> &PropertyStore {
        &*self.store
    }
}
