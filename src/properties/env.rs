use super::source::{PropertyEntry, PropertySource};
use super::PropertyError;

/// Reads properties from process environment variables.
///
/// A variable named `<prefix><sep>seg1<sep>seg2` becomes the property
/// `seg1.seg2`. Segment case is kept as-is since property keys are
/// case-sensitive: `TESTDB__ebean__test__ddlMode` maps to `ebean.test.ddlMode`.
#[derive(Debug, Clone)]
pub struct EnvSource {
    prefix: String,
    separator: String,
}

impl EnvSource {
    pub fn new(prefix: impl Into<String>, separator: impl Into<String>) -> Self {
        let separator = separator.into();
        assert!(!separator.is_empty(), "separator must not be empty");
        Self {
            prefix: prefix.into(),
            separator,
        }
    }

    fn to_key(&self, var: &str) -> Option<String> {
        let prefix_with_sep = format!("{}{}", self.prefix, self.separator);
        let path = var.strip_prefix(&prefix_with_sep)?;
        if path.is_empty() || path.split(&self.separator).any(str::is_empty) {
            return None;
        }
        Some(path.split(&self.separator).collect::<Vec<_>>().join("."))
    }
}

impl PropertySource for EnvSource {
    /// Variables whose name or value is not valid UTF-8 are skipped.
    fn entries(&self) -> Result<Vec<PropertyEntry>, PropertyError> {
        let entries = std::env::vars_os()
            .filter_map(|(var, value)| {
                let key = self.to_key(var.to_str()?)?;
                Some(PropertyEntry::new(key, value.into_string().ok()?))
            })
            .collect();
        Ok(entries)
    }
}
