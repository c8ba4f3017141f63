use super::*;
use crate::lexer::split_top_level_commas;

/// Decode one value token: a string array if it starts with `[`, else a string.
pub fn parse_value(text: &str) -> Result<Value, ParseError> {
    let text = text.trim();
    if text.starts_with('[') {
        parse_string_array(text).map(Value::StrArray)
    } else {
        parse_string(text).map(Value::Str)
    }
}

/// Decode a single `"..."` or `'...'` literal.
///
/// Double-quoted strings understand `\\`, `\"`, `\n` and `\t`, substituted in
/// that order over the whole string. Single-quoted strings are verbatim.
pub fn parse_string(token: &str) -> Result<String, ParseError> {
    let s = token.trim();
    let mut chars = s.chars();

    match (chars.next(), chars.next_back()) {
        (Some('"'), Some('"')) => {
            let inner = &s[1..s.len() - 1];
            Ok(inner
                .replace(r"\\", "\\")
                .replace(r#"\""#, "\"")
                .replace(r"\n", "\n")
                .replace(r"\t", "\t"))
        }
        (Some('\''), Some('\'')) => Ok(s[1..s.len() - 1].to_string()),
        _ => Err(ParseError::InvalidString {
            text: s.to_string(),
            line: 0,
            hint: Some("Values must be quoted with \" or '".into()),
            code: Some(101),
        }),
    }
}

/// Decode `[ "a", 'b', ... ]`. Only quoted strings are allowed as elements.
pub fn parse_string_array(text: &str) -> Result<Vec<String>, ParseError> {
    let s = text.trim();
    let Some(inner) = s.strip_prefix('[').and_then(|rest| rest.strip_suffix(']')) else {
        return Err(ParseError::InvalidArray {
            text: s.to_string(),
            line: 0,
            hint: Some("Arrays must start with `[` and end with `]`".into()),
            code: Some(102),
        });
    };

    if inner.trim().is_empty() {
        return Ok(Vec::new());
    }

    split_top_level_commas(inner)
        .into_iter()
        .map(|item| {
            parse_string(item).map_err(|_| ParseError::InvalidArray {
                text: s.to_string(),
                line: 0,
                hint: Some(format!("Element {:?} is not a quoted string", item)),
                code: Some(103),
            })
        })
        .collect()
}
