//! The property store and the layered sources that populate it.

mod builder;
mod env;
mod error;
mod file;
mod source;
mod store;

pub use builder::PropertyStoreBuilder;
pub use env::EnvSource;
pub use error::PropertyError;
pub use file::FileSource;
pub use source::{MapSource, PropertyEntry, PropertySource};
pub use store::PropertyStore;
