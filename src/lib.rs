pub mod ast;
pub mod config;
pub mod error;
pub mod export;
pub mod lexer;
pub mod parser;
pub mod tools;

pub use ast::{Document, Table, Value};
pub use config::TomletConfig;
pub use error::{ConfigError, ParseError};

/// Parse config-subset text into a document tree.
///
/// ```
/// let doc = tomlet::parse("[a.b]\nc = \"1\"").unwrap();
/// assert!(doc.get("a").and_then(|v| v.as_table()).is_some());
/// ```
pub fn parse(text: &str) -> Result<Document, ParseError> {
    parser::Parser::new(text).parse_document()
}
