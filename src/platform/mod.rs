//! Resolution of test-database settings for one platform.
//!
//! All platform-specific behavior is expressed as optional
//! `ebean.test.<platform>.<key>` properties over built-in defaults; container
//! parameters add a `docker.<platform>.<key>` layer on top.

mod config;
mod container;
mod datasource;
mod ddl;
mod error;
mod resolver;
mod setup;
mod template;

pub use config::{Config, DEFAULT_PASSWORD};
pub use container::{ContainerProperties, CONTAINER_MODE_KEY, USE_DOCKER_KEY};
pub use datasource::{DataSourceConfig, DriverRegistry, DriverSet};
pub use ddl::{DdlFlags, DdlMode, MigrationRun, DDL_MODE_KEY, DDL_MODE_OPTIONS};
pub use error::ConfigError;
pub use resolver::{KeyResolver, PlatformKey};
pub use setup::{setup, PlatformDefaults, ResolvedConfig};
