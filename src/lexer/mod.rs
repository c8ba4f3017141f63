// Author: tomlet contributors
// License: GPL-3.0-or-later

use std::ops::ControlFlow;

mod scanner;

pub use scanner::{
    find_top_level, is_complete_array, physical_lines, split_top_level_commas, strip_comment,
    PhysicalLines,
};

/// Quote/escape state of a single left-to-right pass over a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QuoteState {
    #[default]
    Default,
    InDouble,
    InSingle,
    EscapedInDouble,
}

impl QuoteState {
    /// State after consuming `ch`.
    ///
    /// A quote only toggles its own mode, so `'` inside a double-quoted run
    /// (and `"` inside a single-quoted one) is an ordinary character.
    pub fn next(self, ch: char) -> QuoteState {
        match (self, ch) {
            (QuoteState::Default, '"') => QuoteState::InDouble,
            (QuoteState::Default, '\'') => QuoteState::InSingle,
            (QuoteState::InDouble, '\\') => QuoteState::EscapedInDouble,
            (QuoteState::InDouble, '"') => QuoteState::Default,
            (QuoteState::EscapedInDouble, _) => QuoteState::InDouble,
            (QuoteState::InSingle, '\'') => QuoteState::Default,
            (state, _) => state,
        }
    }

    pub fn is_top_level(self) -> bool {
        self == QuoteState::Default
    }
}

/// Run the quote automaton over `text`.
///
/// `visit` sees each character's byte offset, the character, and the state it
/// is read in (before the transition). Returns the offset at which `visit`
/// broke out, or `None` if the whole text was consumed.
pub fn scan<F>(text: &str, mut visit: F) -> Option<usize>
where
    F: FnMut(usize, char, QuoteState) -> ControlFlow<()>,
{
    let mut state = QuoteState::Default;
    for (idx, ch) in text.char_indices() {
        if visit(idx, ch, state).is_break() {
            return Some(idx);
        }
        state = state.next(ch);
    }
    None
}
