//! Line-level helpers for the open/done sentinel glyphs.

use crate::model::{DONE_SENTINEL, OPEN_SENTINEL};

pub fn is_sentinel(c: char) -> bool {
    c == OPEN_SENTINEL || c == DONE_SENTINEL
}

/// The opposite sentinel, or `None` for any other character.
pub fn toggled(c: char) -> Option<char> {
    match c {
        OPEN_SENTINEL => Some(DONE_SENTINEL),
        DONE_SENTINEL => Some(OPEN_SENTINEL),
        _ => None,
    }
}

/// Whitespace that may precede a sentinel on the same line.
pub(crate) fn is_indent(c: char) -> bool {
    c.is_whitespace() && c != '\n' && c != '\r'
}

/// Char index and glyph of the sentinel leading `line`, allowing indentation.
pub fn leading_sentinel(line: &str) -> Option<(usize, char)> {
    line.chars()
        .enumerate()
        .find(|(_, c)| !is_indent(*c))
        .filter(|(_, c)| is_sentinel(*c))
}

/// Same test as press and hover, used by the bulk checkbox action.
pub fn starts_with_sentinel(line: &str) -> bool {
    leading_sentinel(line).is_some()
}

/// Flips the leading sentinel of `line`; `None` when the line has none.
pub fn toggle_line(line: &str) -> Option<String> {
    let (index, glyph) = leading_sentinel(line)?;
    let replacement = toggled(glyph)?;
    Some(
        line.chars()
            .enumerate()
            .map(|(i, c)| if i == index { replacement } else { c })
            .collect(),
    )
}

/// Completed and total checklist lines in `text`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChecklistProgress {
    pub done: usize,
    pub total: usize,
}

pub fn checklist_progress(text: &str) -> ChecklistProgress {
    text.lines()
        .filter_map(leading_sentinel)
        .fold(ChecklistProgress::default(), |mut acc, (_, glyph)| {
            acc.total += 1;
            if glyph == DONE_SENTINEL {
                acc.done += 1;
            }
            acc
        })
}
