use std::iter::Enumerate;

use crate::ast::{Document, Table, Value};
use crate::error::ParseError;
use crate::lexer::{physical_lines, strip_comment, PhysicalLines};

mod document;
mod path;
mod value;

pub use path::is_identifier;
pub use value::{parse_string, parse_string_array, parse_value};

/// One step from the root towards the current insertion context.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum PathStep {
    /// Descend into the table stored under this key.
    Table(String),
    /// Descend into the last table of the array stored under this key.
    LastOf(String),
}

impl PathStep {
    fn key(&self) -> &str {
        match self {
            PathStep::Table(k) | PathStep::LastOf(k) => k,
        }
    }
}

/// Line-driven parser for the config subset.
///
/// The tree is owned by the parser while it is being built; the insertion
/// context is a path into it that is re-walked on every assignment.
pub struct Parser<'a> {
    lines: Enumerate<PhysicalLines<'a>>,
    root: Document,
    context: Vec<PathStep>,
}

impl<'a> Parser<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            lines: physical_lines(input).enumerate(),
            root: Document::new(),
            context: Vec::new(),
        }
    }

    /// Next non-blank line with comments stripped, plus its 1-based number.
    pub(crate) fn next_line(&mut self) -> Option<(usize, &'a str)> {
        for (idx, raw) in self.lines.by_ref() {
            let line = strip_comment(raw).trim();
            if !line.is_empty() {
                return Some((idx + 1, line));
            }
        }
        None
    }

    /// Table that currently receives `key = value` assignments.
    pub(crate) fn context_table(&mut self) -> Result<&mut Table, ParseError> {
        let context = &self.context;
        let mut current = &mut self.root;
        for (depth, step) in context.iter().enumerate() {
            let conflict = |found: &'static str| ParseError::ShapeConflict {
                path: join_steps(&context[..=depth]),
                expected: match step {
                    PathStep::Table(_) => "table",
                    PathStep::LastOf(_) => "array of tables",
                },
                found,
                line: 0,
                hint: None,
                code: Some(205),
            };

            current = match (step, current.get_mut(step.key())) {
                (PathStep::Table(_), Some(Value::Table(table))) => table,
                (PathStep::LastOf(_), Some(Value::TableArray(tables))) => {
                    match tables.last_mut() {
                        Some(table) => table,
                        None => return Err(conflict("empty array of tables")),
                    }
                }
                (_, Some(other)) => return Err(conflict(other.type_name())),
                (_, None) => return Err(conflict("nothing")),
            };
        }
        Ok(current)
    }

    pub fn parse_document(mut self) -> Result<Document, ParseError> {
        document::parse_document(&mut self)?;
        Ok(self.root)
    }
}

fn join_steps(steps: &[PathStep]) -> String {
    steps.iter().map(PathStep::key).collect::<Vec<_>>().join(".")
}

#[cfg(test)]
mod tests;
