use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum PropertyError {
    #[error("required properties file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("failed to read properties file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse properties file '{path}': {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("cannot flatten non-scalar value at key: {0}")]
    NonScalarValue(String),
}
