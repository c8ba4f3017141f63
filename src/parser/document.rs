use std::borrow::Cow;

use tracing::debug;

use super::*;
use crate::lexer::{find_top_level, is_complete_array};

pub(super) fn parse_document(parser: &mut Parser) -> Result<(), ParseError> {
    while let Some((line_no, line)) = parser.next_line() {
        if let Some(header) = line.strip_prefix("[[").and_then(|s| s.strip_suffix("]]")) {
            path::open_table_array(parser, header).map_err(|e| e.at_line(line_no))?;
        } else if let Some(header) = line.strip_prefix('[').and_then(|s| s.strip_suffix(']')) {
            path::open_table(parser, header).map_err(|e| e.at_line(line_no))?;
        } else if let Some(eq) = find_top_level(line, '=') {
            parse_assignment(parser, line_no, &line[..eq], &line[eq + 1..])?;
        } else {
            return Err(ParseError::InvalidLine {
                text: line.to_string(),
                line: line_no,
                hint: Some("Expected `[table]`, `[[array]]` or `key = value`".into()),
                code: Some(201),
            });
        }
    }
    Ok(())
}

fn parse_assignment(
    parser: &mut Parser,
    line_no: usize,
    key: &str,
    raw_value: &str,
) -> Result<(), ParseError> {
    let key = key.trim();
    if !is_identifier(key) {
        return Err(ParseError::InvalidKey {
            key: key.to_string(),
            line: line_no,
            hint: Some("Keys may only contain letters, digits, '_' and '-'".into()),
            code: Some(202),
        });
    }

    let mut raw_value = Cow::Borrowed(raw_value.trim());
    if raw_value.starts_with('[') && !is_complete_array(&raw_value) {
        raw_value = Cow::Owned(join_continuation_lines(parser, key, line_no, &raw_value)?);
    }

    let value = parse_value(&raw_value).map_err(|e| e.at_line(line_no))?;
    parser
        .context_table()
        .map_err(|e| e.at_line(line_no))?
        .insert(key.to_string(), value);
    Ok(())
}

/// Pull following lines into an array literal until its brackets balance.
fn join_continuation_lines(
    parser: &mut Parser,
    key: &str,
    start_line: usize,
    first: &str,
) -> Result<String, ParseError> {
    let mut buf = first.to_string();
    while let Some((line_no, next)) = parser.next_line() {
        buf.push(' ');
        buf.push_str(next);
        if is_complete_array(&buf) {
            debug!(key, start_line, end_line = line_no, "joined multi-line array");
            return Ok(buf);
        }
    }

    Err(ParseError::UnterminatedArray {
        key: key.to_string(),
        line: start_line,
        hint: Some("Close the array with `]`".into()),
        code: Some(206),
    })
}
