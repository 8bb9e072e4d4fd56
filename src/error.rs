use crate::platform::ConfigError;
use crate::properties::PropertyError;
use thiserror::Error;

/// Top-level error type for the testdb-config library.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error("property loading error: {0}")]
    Properties(#[from] PropertyError),

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}
