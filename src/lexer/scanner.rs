use super::*;

/// Cut the line at the first unquoted `#` and trim trailing whitespace.
pub fn strip_comment(line: &str) -> &str {
    let end = scan(line, |_, ch, state| {
        if ch == '#' && state.is_top_level() {
            ControlFlow::Break(())
        } else {
            ControlFlow::Continue(())
        }
    });

    match end {
        Some(idx) => line[..idx].trim_end(),
        None => line.trim_end(),
    }
}

/// Split array contents on unquoted commas; empty items are dropped.
pub fn split_top_level_commas(text: &str) -> Vec<&str> {
    let mut items = Vec::new();
    let mut start = 0;

    scan(text, |idx, ch, state| {
        if ch == ',' && state.is_top_level() {
            let item = text[start..idx].trim();
            if !item.is_empty() {
                items.push(item);
            }
            start = idx + ch.len_utf8();
        }
        ControlFlow::Continue(())
    });

    let last = text[start..].trim();
    if !last.is_empty() {
        items.push(last);
    }
    items
}

/// True once the first top-level `[` has been matched by its `]`.
pub fn is_complete_array(text: &str) -> bool {
    let mut depth: i64 = 0;

    scan(text, |_, ch, state| {
        if !state.is_top_level() {
            return ControlFlow::Continue(());
        }
        match ch {
            '[' => depth += 1,
            ']' => {
                depth -= 1;
                if depth == 0 {
                    return ControlFlow::Break(());
                }
            }
            _ => {}
        }
        ControlFlow::Continue(())
    })
    .is_some()
}

/// Byte offset of the first unquoted `target`.
pub fn find_top_level(text: &str, target: char) -> Option<usize> {
    scan(text, |_, ch, state| {
        if ch == target && state.is_top_level() {
            ControlFlow::Break(())
        } else {
            ControlFlow::Continue(())
        }
    })
}

/// Physical lines of `text`. `\n`, `\r\n` and a lone `\r` all end a line.
#[derive(Debug, Clone)]
pub struct PhysicalLines<'a> {
    rest: Option<&'a str>,
}

pub fn physical_lines(text: &str) -> PhysicalLines<'_> {
    PhysicalLines {
        rest: Some(text).filter(|t| !t.is_empty()),
    }
}

impl<'a> Iterator for PhysicalLines<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        let text = self.rest?;
        match text.find(['\n', '\r']) {
            Some(idx) => {
                let skip = if text[idx..].starts_with("\r\n") { 2 } else { 1 };
                self.rest = Some(&text[idx + skip..]).filter(|r| !r.is_empty());
                Some(&text[..idx])
            }
            None => {
                self.rest = None;
                Some(text)
            }
        }
    }
}
