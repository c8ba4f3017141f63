// Author: tomlet contributors
// License: GPL-3.0-or-later

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::ast::{Document, Value};
use crate::error::ConfigError;

mod access;
mod conversion;
mod helpers;
mod validation;

pub use helpers::resolve_path;

/// A parsed manifest plus the raw text it came from (kept for error reporting).
#[derive(Debug, Clone)]
pub struct TomletConfig {
    document: Document,
    raw_content: String,
    source: Option<PathBuf>,
}

impl TomletConfig {
    /// Load and parse a file. A leading `~/` is expanded to the home directory.
    ///
    /// # Example
    /// ```ignore
    /// let config = TomletConfig::from_file("scripts/hello/script.toml")?;
    /// ```
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let raw = path.as_ref().to_string_lossy();
        let resolved = resolve_path(&raw)?;

        let content = fs::read_to_string(&resolved).map_err(|e| ConfigError::FileError {
            message: format!("Failed to read file: {}", e),
            path: resolved.display().to_string(),
            hint: Some("Check that the file exists and is readable".into()),
            code: Some(301),
        })?;

        debug!(path = %resolved.display(), bytes = content.len(), "loaded config file");
        let mut config = Self::from_str(&content)?;
        config.source = Some(resolved);
        Ok(config)
    }

    /// Load from `primary`, or from `fallback` if `primary` cannot be read.
    ///
    /// Parse errors in `primary` are returned as-is; only file errors fall back.
    pub fn from_file_with_fallback<P: AsRef<Path>>(primary: P, fallback: P) -> Result<Self, ConfigError> {
        match Self::from_file(&primary) {
            Ok(config) => Ok(config),
            Err(ConfigError::FileError { .. }) => {
                Self::from_file(&fallback).map_err(|e| match e {
                    ConfigError::FileError { message, .. } => ConfigError::FileError {
                        message: format!(
                            "Failed to load config from primary path '{}' or fallback path '{}': {}",
                            primary.as_ref().display(),
                            fallback.as_ref().display(),
                            message
                        ),
                        path: format!(
                            "{} (fallback: {})",
                            primary.as_ref().display(),
                            fallback.as_ref().display()
                        ),
                        hint: Some("Check that at least one of the config files exists".into()),
                        code: Some(302),
                    },
                    other => other,
                })
            }
            Err(other) => Err(other),
        }
    }

    /// Parse from a string (no file I/O).
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        let document = crate::parse(content)?;
        Ok(Self {
            document,
            raw_content: content.to_string(),
            source: None,
        })
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn into_document(self) -> Document {
        self.document
    }

    /// Path the config was loaded from, if it came from a file.
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// Exact, borrowed lookup of a dotted path. `""` is not a valid path here.
    pub fn lookup(&self, path: &str) -> Option<&Value> {
        let mut segments = path.split('.');
        let mut current = self.document.get(segments.next()?)?;
        for segment in segments {
            current = current.as_table()?.get(segment)?;
        }
        Some(current)
    }
}
