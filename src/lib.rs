pub mod platform;
pub mod properties;
mod error;

pub use error::Error;
pub use platform::{
    setup, Config, ConfigError, ContainerProperties, DataSourceConfig, DdlFlags, DdlMode,
    DriverRegistry, DriverSet, MigrationRun, PlatformDefaults, PlatformKey, ResolvedConfig,
};
pub use properties::{PropertyError, PropertyStore};
