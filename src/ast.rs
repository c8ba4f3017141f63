use indexmap::IndexMap;
use serde::Serialize;

/// A table node: unique keys, kept in first-insertion order.
pub type Table = IndexMap<String, Value>;

/// The root table produced by a single parse.
pub type Document = Table;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Str(String),
    StrArray(Vec<String>),
    Table(Table),
    TableArray(Vec<Table>),
}

impl Value {
    pub fn as_str(&self) -> Option<&str> {
        if let Value::Str(s) = self {
            Some(s)
        } else {
            None
        }
    }

    pub fn as_str_array(&self) -> Option<&[String]> {
        if let Value::StrArray(items) = self {
            Some(items)
        } else {
            None
        }
    }

    pub fn as_table(&self) -> Option<&Table> {
        if let Value::Table(table) = self {
            Some(table)
        } else {
            None
        }
    }

    pub fn as_table_array(&self) -> Option<&[Table]> {
        if let Value::TableArray(tables) = self {
            Some(tables)
        } else {
            None
        }
    }

    /// Short shape name used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Str(_) => "string",
            Value::StrArray(_) => "string array",
            Value::Table(_) => "table",
            Value::TableArray(_) => "array of tables",
        }
    }
}
