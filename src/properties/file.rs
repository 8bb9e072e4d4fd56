//! File-based property source.

use std::path::{Path, PathBuf};

use toml::{Table, Value};

use super::source::{PropertyEntry, PropertySource};
use super::PropertyError;

/// A property source that loads from a TOML file.
///
/// Nested tables flatten into dotted keys, so these two files produce the
/// same property:
///
/// ```toml
/// [ebean.test.postgres]
/// port = 6432
/// ```
///
/// ```toml
/// "ebean.test.postgres.port" = "6432"
/// ```
///
/// Arrays of scalars are joined with `,`. A missing file is an error only
/// when the source is `required`.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
    required: bool,
}

impl FileSource {
    pub fn new(path: impl AsRef<Path>, required: bool) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            required,
        }
    }

    /// The parsed file, or `None` for an absent optional file.
    fn read_table(&self) -> Result<Option<Table>, PropertyError> {
        let path = self.path.as_path();
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound && !self.required => {
                return Ok(None)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(PropertyError::FileNotFound(path.to_path_buf()))
            }
            Err(source) => {
                return Err(PropertyError::ReadError {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        toml::from_str(&contents)
            .map(Some)
            .map_err(|source| PropertyError::ParseError {
                path: path.to_path_buf(),
                source,
            })
    }
}

impl PropertySource for FileSource {
    fn entries(&self) -> Result<Vec<PropertyEntry>, PropertyError> {
        let mut entries = Vec::new();
        if let Some(table) = self.read_table()? {
            flatten_table(&table, "", &mut entries)?;
        }
        Ok(entries)
    }
}

fn flatten_table(
    table: &Table,
    prefix: &str,
    out: &mut Vec<PropertyEntry>,
) -> Result<(), PropertyError> {
    for (key, value) in table {
        let path = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}.{key}")
        };

        match value {
            Value::Table(nested) => flatten_table(nested, &path, out)?,
            Value::Array(items) => {
                let joined = items
                    .iter()
                    .map(|item| scalar_to_string(item, &path))
                    .collect::<Result<Vec<_>, _>>()?
                    .join(",");
                out.push(PropertyEntry::new(path, joined));
            }
            scalar => {
                let value = scalar_to_string(scalar, &path)?;
                out.push(PropertyEntry::new(path, value));
            }
        }
    }
    Ok(())
}

/// Converts a TOML scalar to its property string form.
fn scalar_to_string(value: &Value, path: &str) -> Result<String, PropertyError> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Integer(i) => Ok(i.to_string()),
        Value::Float(f) => Ok(f.to_string()),
        Value::Boolean(b) => Ok(b.to_string()),
        Value::Datetime(dt) => Ok(dt.to_string()),
        Value::Array(_) | Value::Table(_) => Err(PropertyError::NonScalarValue(path.to_string())),
    }
}
