// Author: tomlet contributors
// License: GPL-3.0-or-later

use crate::ast::{Table, Value};
use crate::error::ConfigError;

fn type_error(expected: &str, value: &Value, hint: &str, code: u32) -> ConfigError {
    ConfigError::TypeError {
        message: format!("Expected {}, got {}", expected, value.type_name()),
        line: 0,
        hint: Some(hint.into()),
        code: Some(code),
    }
}

impl TryFrom<Value> for String {
    type Error = ConfigError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Str(s) => Ok(s),
            other => Err(type_error("string", &other, "Use a quoted string value", 401)),
        }
    }
}

impl TryFrom<Value> for Vec<String> {
    type Error = ConfigError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::StrArray(items) => Ok(items),
            other => Err(type_error(
                "string array",
                &other,
                "Use an array of quoted strings, e.g. [\"a\", \"b\"]",
                402,
            )),
        }
    }
}

impl TryFrom<Value> for Table {
    type Error = ConfigError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Table(table) => Ok(table),
            other => Err(type_error("table", &other, "Declare it with a [header]", 403)),
        }
    }
}

impl TryFrom<Value> for Vec<Table> {
    type Error = ConfigError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::TableArray(tables) => Ok(tables),
            other => Err(type_error(
                "array of tables",
                &other,
                "Declare each element with a [[header]]",
                404,
            )),
        }
    }
}
