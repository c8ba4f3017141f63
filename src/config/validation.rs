use super::*;

impl TomletConfig {
    /// Get a value and check it with `validator`; failures carry the config line.
    pub fn get_validated<T, F>(&self, path: &str, validator: F, valid_values: &str) -> Result<T, ConfigError>
    where
        T: TryFrom<Value, Error = ConfigError>,
        F: FnOnce(&T) -> bool,
    {
        let typed_value: T = self.get(path)?;

        if !validator(&typed_value) {
            let (line, snippet) = helpers::find_config_line(path, &self.raw_content);
            return Err(ConfigError::ValidationError {
                message: format!("Invalid value for `{}`\nExpected: {}", path, valid_values),
                line,
                hint: Some(format!("Valid values are: {}\n  → {}", valid_values, snippet)),
                code: Some(450),
            });
        }

        Ok(typed_value)
    }

    /// Get a string and check it is one of `allowed_values` (exact match).
    pub fn get_string_enum(&self, path: &str, allowed_values: &[&str]) -> Result<String, ConfigError> {
        let value: String = self.get(path)?;

        if !allowed_values.contains(&value.as_str()) {
            let (line, snippet) = helpers::find_config_line(path, &self.raw_content);
            return Err(ConfigError::ValidationError {
                message: format!("Invalid value '{}' for `{}`", value, path),
                line,
                hint: Some(format!("Expected one of: {}\n  → {}", allowed_values.join(", "), snippet)),
                code: Some(451),
            });
        }

        Ok(value)
    }
}
