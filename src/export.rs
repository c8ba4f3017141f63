// Author: tomlet contributors
// License: GPL-3.0-or-later

use std::path::Path;

use crate::ast::Document;
use crate::config::TomletConfig;
use crate::error::ConfigError;

/// Export a document to pretty-printed JSON.
///
/// Strings and string arrays map directly; tables become JSON objects (keys
/// in first-insertion order) and arrays of tables become arrays of objects.
///
/// # Examples
/// ```
/// let doc = tomlet::parse("[[step]]\nkind = \"bash\"").unwrap();
/// let json = tomlet::export::document_to_json(&doc).unwrap();
/// assert!(json.contains("\"kind\": \"bash\""));
/// ```
pub fn document_to_json(doc: &Document) -> Result<String, ConfigError> {
    serde_json::to_string_pretty(doc).map_err(|e| ConfigError::RuntimeError {
        message: format!("Failed to serialize document: {}", e),
        hint: None,
        code: Some(500),
    })
}

/// Read, parse and export a file in one call.
///
/// # Errors
/// Returns error if the file doesn't exist or is not valid config-subset text.
pub fn file_to_json<P: AsRef<Path>>(path: P) -> Result<String, ConfigError> {
    let config = TomletConfig::from_file(path)?;
    document_to_json(config.document())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_export_manifest_to_json() {
        let doc = crate::parse(
            "id = \"x\"\nlist = [\"a\", \"b\"]\n[t.u]\nk = \"v\"\n[[steps]]\nkind = \"bash\"\n[[steps]]\n",
        )
        .expect("Failed to parse");

        let json_output = document_to_json(&doc).expect("Failed to export document to JSON");
        println!("--- Exported JSON ---\n{}", json_output);

        let v: serde_json::Value = serde_json::from_str(&json_output).unwrap();
        assert_eq!(v["id"], "x");
        assert_eq!(v["list"][1], "b");
        assert_eq!(v["t"]["u"]["k"], "v");
        assert_eq!(v["steps"][0]["kind"], "bash");
        assert!(v["steps"][1].as_object().is_some_and(|o| o.is_empty()));
    }

    #[test]
    fn test_export_preserves_key_order() {
        let doc = crate::parse("zeta = \"1\"\nalpha = \"2\"").unwrap();
        let json_output = document_to_json(&doc).unwrap();
        let zeta = json_output.find("zeta").unwrap();
        let alpha = json_output.find("alpha").unwrap();
        assert!(zeta < alpha);
    }

    #[test]
    fn test_file_to_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("m.toml");
        fs::write(&path, "name = 'n'").unwrap();

        let json_output = file_to_json(&path).unwrap();
        assert!(json_output.contains("\"name\": \"n\""));

        assert!(file_to_json(dir.path().join("missing.toml")).is_err());
    }
}
