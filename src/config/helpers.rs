use std::path::PathBuf;

use crate::error::ConfigError;
use crate::lexer::{find_top_level, physical_lines, strip_comment};

/// Expand a leading `~/` to the home directory. Other paths are returned as given.
pub fn resolve_path(raw_path: &str) -> Result<PathBuf, ConfigError> {
    let path_str = raw_path.trim();

    let p = if let Some(rest) = path_str.strip_prefix("~/") {
        let home = dirs::home_dir().ok_or_else(|| ConfigError::FileError {
            message: "Could not determine home directory for ~ expansion".into(),
            path: path_str.to_string(),
            hint: Some("Set HOME or use an absolute path".into()),
            code: Some(300),
        })?;
        home.join(rest)
    } else {
        PathBuf::from(path_str)
    };
    Ok(p)
}

/// Find the 1-based line where the dotted `key` is assigned, and its text.
///
/// Returns `(0, "")` when the key cannot be located. Array-of-tables headers
/// scope their keys like plain tables, so the first match wins.
pub(super) fn find_config_line(key: &str, raw_content: &str) -> (usize, String) {
    let mut scope: Vec<String> = Vec::new();

    for (idx, raw) in physical_lines(raw_content).enumerate() {
        let line = strip_comment(raw).trim();
        if line.is_empty() {
            continue;
        }

        let header = line
            .strip_prefix("[[")
            .and_then(|s| s.strip_suffix("]]"))
            .or_else(|| line.strip_prefix('[').and_then(|s| s.strip_suffix(']')));
        if let Some(header) = header {
            scope = header.split('.').map(|s| s.trim().to_string()).collect();
            if scope.join(".") == key {
                return (idx + 1, line.to_string());
            }
            continue;
        }

        let Some(eq) = find_top_level(line, '=') else {
            continue;
        };

        let mut full_path = scope.clone();
        full_path.push(line[..eq].trim().to_string());
        if full_path.join(".") == key {
            return (idx + 1, line.to_string());
        }
    }

    (0, String::new())
}
