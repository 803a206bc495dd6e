//! Character styling carried alongside the plain text.

use std::ops::Range;

/// Rich formatting attached to a run of characters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextStyle {
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub strikethrough: bool,
    /// CSS-style colour, e.g. `#e74c3c`.
    pub color: Option<String>,
    pub font_size: Option<u16>,
}

impl TextStyle {
    pub fn is_plain(&self) -> bool {
        *self == Self::default()
    }
}

/// A styled half-open char range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleSpan {
    pub range: Range<usize>,
    pub style: TextStyle,
}

/// Removes styling inside `clear` from `spans`, splitting spans that cross
/// its edges. Returns whether anything changed.
pub(crate) fn clear_range(spans: &mut Vec<StyleSpan>, clear: Range<usize>) -> bool {
    let mut changed = false;
    let mut kept = Vec::with_capacity(spans.len());
    for span in spans.drain(..) {
        let overlaps = span.range.start < clear.end && clear.start < span.range.end;
        if !overlaps {
            kept.push(span);
            continue;
        }
        changed = true;
        if span.range.start < clear.start {
            kept.push(StyleSpan {
                range: span.range.start..clear.start,
                style: span.style.clone(),
            });
        }
        if span.range.end > clear.end {
            kept.push(StyleSpan {
                range: clear.end..span.range.end,
                style: span.style,
            });
        }
    }
    *spans = kept;
    changed
}

/// Moves span boundaries across a replacement of `removed` chars at `at` by
/// `inserted` chars. Spans that collapse are dropped.
pub(crate) fn shift_spans(spans: &mut Vec<StyleSpan>, at: usize, removed: usize, inserted: usize) {
    let removed_end = at + removed;
    for span in spans.iter_mut() {
        let start = span.range.start;
        let end = span.range.end;
        let new_start = if start <= at {
            start
        } else if start >= removed_end {
            start - removed + inserted
        } else {
            at + inserted
        };
        let new_end = if end <= at {
            end
        } else if end >= removed_end {
            end - removed + inserted
        } else {
            at
        };
        span.range = new_start..new_end.max(new_start);
    }
    spans.retain(|span| !span.range.is_empty());
}
