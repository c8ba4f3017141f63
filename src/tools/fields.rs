use std::fmt;
use std::path::{Path, PathBuf};

use crate::ast::Value;
use crate::config::TomletConfig;
use crate::error::ConfigError;

/// Read a top-level string field from a manifest.
pub fn read_field(path: &Path, field: &str) -> Result<String, ConfigError> {
    let config = TomletConfig::from_file(path)?;
    match config.document().get(field) {
        Some(Value::Str(s)) => Ok(s.clone()),
        Some(_) => Err(ConfigError::runtime(format!(
            "field '{}' must be a string",
            field
        ))),
        None => Err(ConfigError::runtime(format!(
            "missing field '{}' in {}",
            field,
            path.display()
        ))),
    }
}

/// One row of a manifest listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptEntry {
    pub id: String,
    pub name: String,
    pub path: PathBuf,
}

impl fmt::Display for ScriptEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\t{}\t{}", self.id, self.name, self.path.display())
    }
}

/// Parse a manifest and pick out its `id` and `name` (empty when absent or
/// not a string).
pub fn list_entry(path: &Path) -> Result<ScriptEntry, ConfigError> {
    let config = TomletConfig::from_file(path)?;
    let text = |key: &str| {
        config
            .document()
            .get(key)
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string()
    };

    Ok(ScriptEntry {
        id: text("id"),
        name: text("name"),
        path: path.to_path_buf(),
    })
}
