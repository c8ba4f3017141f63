use std::borrow::Cow;

use once_cell::sync::Lazy;
use regex::Regex;

static SAFE_WORD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_@%+=:,./-]+$").expect("safe-word pattern is valid"));

/// Quote `word` for a POSIX shell. Safe words are returned unchanged.
pub fn quote(word: &str) -> Cow<'_, str> {
    if word.is_empty() {
        return Cow::Borrowed("''");
    }
    if SAFE_WORD.is_match(word) {
        return Cow::Borrowed(word);
    }
    Cow::Owned(format!("'{}'", word.replace('\'', r#"'"'"'"#)))
}

/// Render a command argument. Arguments containing `$` are double-quoted so
/// the shell expands environment variables in them.
pub fn arg_expr(arg: &str) -> Cow<'_, str> {
    if arg.contains('$') {
        let escaped = arg.replace('\\', r"\\").replace('"', r#"\""#);
        Cow::Owned(format!("\"{}\"", escaped))
    } else {
        quote(arg)
    }
}
