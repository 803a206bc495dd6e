//! Markdown snippet insertion for the note editor toolbar.

use std::ops::Range;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Markup {
    Header,
    Bold,
    Italic,
    List,
    Link,
    Quote,
    CodeBlock,
    Emoji(String),
}

impl Markup {
    /// Text placed before and after the selection.
    pub fn affixes(&self) -> (&str, &str) {
        match self {
            Self::Header => ("# ", ""),
            Self::Bold => ("**", "**"),
            Self::Italic => ("*", "*"),
            Self::List => ("- ", ""),
            Self::Link => ("[", "](url)"),
            Self::Quote => ("> ", ""),
            Self::CodeBlock => ("```\n", "\n```"),
            Self::Emoji(glyph) => (glyph.as_str(), ""),
        }
    }
}

/// Text and caret after inserting markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkupEdit {
    pub text: String,
    /// Char offset of the caret.
    pub caret: usize,
}

/// Wraps the selected chars of `text` in `markup`. Without a selection the
/// affixes are inserted at the caret, which lands between them when there
/// is a suffix.
pub fn apply_markup(text: &str, selection: Range<usize>, markup: &Markup) -> MarkupEdit {
    let (prefix, suffix) = markup.affixes();
    let total = text.chars().count();
    let start = selection.start.min(total);
    let end = selection.end.clamp(start, total);

    let head: String = text.chars().take(start).collect();
    let selected: String = text.chars().skip(start).take(end - start).collect();
    let tail: String = text.chars().skip(end).collect();

    let mut out = String::with_capacity(text.len() + prefix.len() + suffix.len());
    out.push_str(&head);
    out.push_str(prefix);
    out.push_str(&selected);
    out.push_str(suffix);
    out.push_str(&tail);

    let prefix_len = prefix.chars().count();
    let caret = if selected.is_empty() && !suffix.is_empty() {
        start + prefix_len
    } else {
        start + prefix_len + selected.chars().count() + suffix.chars().count()
    };

    MarkupEdit { text: out, caret }
}
