use thiserror::Error;

use super::ddl::DDL_MODE_OPTIONS;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("no ebean.test.ddlMode set, expecting one of {options}", options = DDL_MODE_OPTIONS)]
    MissingDdlMode,

    #[error(
        "unknown ebean.test.ddlMode [{0}] expecting one of {options}",
        options = DDL_MODE_OPTIONS
    )]
    UnknownDdlMode(String),

    #[error("{0} not set")]
    MissingField(&'static str),

    #[error("driver {0} is not registered in this environment")]
    DriverNotFound(String),

    #[error("invalid port '{value}' for {key}")]
    InvalidPort { key: String, value: String },
}
