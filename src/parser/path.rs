use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use super::*;

static IDENTIFIER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").expect("identifier pattern is valid"));

/// Whether `s` is a valid bare key / header segment (`[A-Za-z0-9_-]+`).
pub fn is_identifier(s: &str) -> bool {
    IDENTIFIER.is_match(s)
}

fn split_header(header: &str) -> Result<Vec<&str>, ParseError> {
    let header = header.trim();
    if header.is_empty() {
        return Err(ParseError::InvalidHeader {
            header: header.to_string(),
            line: 0,
            hint: Some("Headers need at least one name, e.g. `[tests]`".into()),
            code: Some(203),
        });
    }

    let segments: Vec<&str> = header.split('.').map(str::trim).collect();
    if let Some(bad) = segments.iter().find(|s| !is_identifier(s)) {
        return Err(ParseError::InvalidHeader {
            header: header.to_string(),
            line: 0,
            hint: Some(format!(
                "Segment {:?} may only contain letters, digits, '_' and '-'",
                bad
            )),
            code: Some(204),
        });
    }
    Ok(segments)
}

/// Walk `segments` from `table`, creating missing tables on the way.
fn descend<'t>(table: &'t mut Table, segments: &[&str]) -> Result<&'t mut Table, ParseError> {
    let mut current = table;
    for (idx, segment) in segments.iter().enumerate() {
        let slot = current
            .entry((*segment).to_string())
            .or_insert_with(|| Value::Table(Table::new()));
        current = match slot {
            Value::Table(next) => next,
            other => {
                return Err(ParseError::ShapeConflict {
                    path: segments[..=idx].join("."),
                    expected: "table",
                    found: other.type_name(),
                    line: 0,
                    hint: None,
                    code: Some(205),
                });
            }
        };
    }
    Ok(current)
}

/// `[a.b.c]`: make `a.b.c` the insertion context.
pub(super) fn open_table(parser: &mut Parser, header: &str) -> Result<(), ParseError> {
    let segments = split_header(header)?;
    descend(&mut parser.root, &segments)?;

    debug!(header = %segments.join("."), "opened table");
    parser.context = segments
        .iter()
        .map(|s| PathStep::Table((*s).to_string()))
        .collect();
    Ok(())
}

/// `[[a.b.c]]`: append a fresh table to the array `a.b.c` and make it the
/// insertion context.
pub(super) fn open_table_array(parser: &mut Parser, header: &str) -> Result<(), ParseError> {
    let segments = split_header(header)?;
    let Some((leaf, parents)) = segments.split_last() else {
        return Err(ParseError::InvalidHeader {
            header: header.to_string(),
            line: 0,
            hint: None,
            code: Some(203),
        });
    };

    let parent = descend(&mut parser.root, parents)?;
    let slot = parent
        .entry((*leaf).to_string())
        .or_insert_with(|| Value::TableArray(Vec::new()));
    let len = match slot {
        Value::TableArray(tables) => {
            tables.push(Table::new());
            tables.len()
        }
        other => {
            return Err(ParseError::ShapeConflict {
                path: segments.join("."),
                expected: "array of tables",
                found: other.type_name(),
                line: 0,
                hint: None,
                code: Some(205),
            });
        }
    };

    debug!(header = %segments.join("."), element = len, "appended table to array");
    let mut context: Vec<PathStep> = parents
        .iter()
        .map(|s| PathStep::Table((*s).to_string()))
        .collect();
    context.push(PathStep::LastOf((*leaf).to_string()));
    parser.context = context;
    Ok(())
}
