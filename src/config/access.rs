use super::*;

impl TomletConfig {
    /// Get a typed value using dot notation.
    ///
    /// Automatically handles both `snake_case` and `kebab-case` key names.
    ///
    /// # Examples
    /// ```no_run
    /// # use tomlet::TomletConfig;
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// # let config = TomletConfig::from_file("script.toml")?;
    /// let id: String = config.get("id")?;
    /// let args: Vec<String> = config.get("defaults.args")?;
    /// # Ok(())
    /// # }
    /// ```
    ///
    /// # Errors
    /// Returns error if the path doesn't exist or the value has another shape.
    pub fn get<T>(&self, path: &str) -> Result<T, ConfigError>
    where
        T: TryFrom<Value, Error = ConfigError>,
    {
        let value = self.get_value_flexible(path)?;
        T::try_from(value).map_err(|e| enhance_error_with_line_info(e, path, &self.raw_content))
    }

    /// Get an optional typed value - returns `None` if the key doesn't exist.
    pub fn get_optional<T>(&self, path: &str) -> Result<Option<T>, ConfigError>
    where
        T: TryFrom<Value, Error = ConfigError>,
    {
        match self.get(path) {
            Ok(value) => Ok(Some(value)),
            Err(ConfigError::PathNotFound { .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Get a value with a fallback default.
    pub fn get_or<T>(&self, path: &str, default: T) -> T
    where
        T: TryFrom<Value, Error = ConfigError>,
    {
        self.get(path).unwrap_or(default)
    }

    /// Tries the exact path first, then `_`/`-` spelling variants per segment.
    fn get_value_flexible(&self, path: &str) -> Result<Value, ConfigError> {
        if let Ok(v) = self.get_value(path) {
            return Ok(v);
        }
        if path.trim().is_empty() {
            return self.get_value(path);
        }

        let segs: Vec<&str> = path.split('.').collect();

        fn variants(seg: &str) -> Vec<String> {
            let mut out = vec![seg.to_string(), seg.replace('-', "_"), seg.replace('_', "-")];
            out.sort();
            out.dedup();
            out
        }

        // DFS over spelling combinations, first hit wins
        fn dfs(cfg: &TomletConfig, segs: &[&str], cur: &mut Vec<String>) -> Option<Value> {
            if cur.len() == segs.len() {
                return cfg.get_value(&cur.join(".")).ok();
            }
            for v in variants(segs[cur.len()]) {
                cur.push(v);
                if let Some(val) = dfs(cfg, segs, cur) {
                    return Some(val);
                }
                cur.pop();
            }
            None
        }

        dfs(self, &segs, &mut Vec::new()).ok_or_else(|| ConfigError::PathNotFound {
            path: path.to_string(),
            hint: Some("Check that the path exists in your config file".into()),
            code: Some(304),
        })
    }

    /// Get a raw `Value` by exact dotted path. `""` returns the whole document.
    pub fn get_value(&self, path: &str) -> Result<Value, ConfigError> {
        if path.trim().is_empty() {
            return Ok(Value::Table(self.document.clone()));
        }

        self.lookup(path).cloned().ok_or_else(|| {
            let (line, snippet) = helpers::find_config_line(path, &self.raw_content);
            if line > 0 {
                ConfigError::PathNotFound {
                    path: path.to_string(),
                    hint: Some(format!("Line {} looks related: {}", line, snippet)),
                    code: Some(304),
                }
            } else {
                ConfigError::PathNotFound {
                    path: path.to_string(),
                    hint: Some("Check that the path exists in your config file".into()),
                    code: Some(304),
                }
            }
        })
    }

    /// Get all keys of the table at `path`, in insertion order.
    pub fn get_keys(&self, path: &str) -> Result<Vec<String>, ConfigError> {
        match self.get_value(path)? {
            Value::Table(table) => Ok(table.keys().cloned().collect()),
            other => Err(ConfigError::TypeError {
                message: format!("Path '{}' is a {}, not a table", path, other.type_name()),
                line: helpers::find_config_line(path, &self.raw_content).0,
                hint: Some("Only tables have keys".into()),
                code: Some(306),
            }),
        }
    }

    /// Check if a configuration path exists.
    pub fn has(&self, path: &str) -> bool {
        self.get_value_flexible(path).is_ok()
    }
}

/// Enhance type/validation errors with line number information from the config text.
fn enhance_error_with_line_info(e: ConfigError, path: &str, raw_content: &str) -> ConfigError {
    match e {
        ConfigError::TypeError { message, hint, code, .. } => {
            let (line, snippet) = helpers::find_config_line(path, raw_content);
            if line > 0 {
                ConfigError::TypeError {
                    message: format!("{} for `{}`\n  → {}", message, path, snippet),
                    line,
                    hint,
                    code,
                }
            } else {
                ConfigError::TypeError {
                    message: format!("{} for `{}`", message, path),
                    line: 0,
                    hint,
                    code,
                }
            }
        }
        other => other,
    }
}
