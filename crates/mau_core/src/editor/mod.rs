//! Checkbox-aware plain-text editing model.
//!
//! # Responsibility
//! - Hold the to-do body as a rope with caret, selection and style spans.
//! - Recognize sentinel glyphs leading a line and toggle them on press.
//! - Group every mutation into one undoable step and bump the revision.
//!
//! # Invariants
//! - A sentinel is interactive only when it is the first non-whitespace
//!   character of its line.
//! - Toggling replaces exactly one character and never moves the caret.
//! - `revision` increases on every notifying change; loading text with
//!   `set_text` is silent.

mod history;
pub mod layout;
pub mod sentinel;
pub mod style;

use crate::model::OPEN_SENTINEL;
use history::{Edit, EditGroup, History};
use layout::{HitTest, Point};
use ropey::Rope;
use sentinel::{is_indent, is_sentinel, starts_with_sentinel, toggled};
use std::ops::Range;
use style::{StyleSpan, TextStyle};

/// Pointer style a host should show at a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Affordance {
    /// Over a toggleable sentinel.
    Pointer,
    /// Regular text caret.
    Text,
}

/// Result of a primary-button press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PressOutcome {
    /// A sentinel was flipped; the press is consumed.
    Toggled { offset: usize, glyph: char },
    /// No sentinel under the pointer; the caret moved to `offset`.
    Caret { offset: usize },
}

impl PressOutcome {
    pub fn consumed(&self) -> bool {
        matches!(self, Self::Toggled { .. })
    }
}

/// Anchor/caret pair in char offsets. Equal values mean no selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Selection {
    pub anchor: usize,
    pub caret: usize,
}

impl Selection {
    pub fn caret(offset: usize) -> Self {
        Self {
            anchor: offset,
            caret: offset,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.anchor == self.caret
    }

    pub fn range(&self) -> Range<usize> {
        self.anchor.min(self.caret)..self.anchor.max(self.caret)
    }
}

#[derive(Debug, Clone, Default)]
pub struct CheckboxEditor {
    doc: Rope,
    selection: Selection,
    spans: Vec<StyleSpan>,
    history: History,
    revision: u64,
}

impl CheckboxEditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_text(text: &str) -> Self {
        let mut editor = Self::new();
        editor.set_text(text);
        editor
    }

    /// Replaces the whole document, dropping history, styling and
    /// selection. Does not count as an edit.
    pub fn set_text(&mut self, text: &str) {
        self.doc = Rope::from_str(text);
        self.selection = Selection::default();
        self.spans.clear();
        self.history.clear();
    }

    pub fn text(&self) -> String {
        self.doc.to_string()
    }

    pub fn len_chars(&self) -> usize {
        self.doc.len_chars()
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn line_count(&self) -> usize {
        self.doc.len_lines().max(1)
    }

    /// Length of `line` in chars, without its line break.
    pub fn line_len(&self, line: usize) -> usize {
        if line >= self.doc.len_lines() {
            return 0;
        }
        let slice = self.doc.line(line);
        let mut len = slice.len_chars();
        if len > 0 && slice.char(len - 1) == '\n' {
            len -= 1;
            if len > 0 && slice.char(len - 1) == '\r' {
                len -= 1;
            }
        }
        len
    }

    pub fn line_text(&self, line: usize) -> String {
        if line >= self.doc.len_lines() {
            return String::new();
        }
        self.doc.line(line).chars().take(self.line_len(line)).collect()
    }

    pub fn line_start(&self, line: usize) -> usize {
        let last = self.doc.len_lines().saturating_sub(1);
        self.doc.line_to_char(line.min(last))
    }

    pub fn line_of(&self, offset: usize) -> usize {
        self.doc.char_to_line(self.clamp(offset))
    }

    pub fn char_at(&self, offset: usize) -> Option<char> {
        (offset < self.doc.len_chars()).then(|| self.doc.char(offset))
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn set_caret(&mut self, offset: usize) {
        self.selection = Selection::caret(self.clamp(offset));
    }

    pub fn select(&mut self, anchor: usize, caret: usize) {
        self.selection = Selection {
            anchor: self.clamp(anchor),
            caret: self.clamp(caret),
        };
    }

    pub fn spans(&self) -> &[StyleSpan] {
        &self.spans
    }

    /// Style in effect at `offset`; plain when no span covers it.
    pub fn style_at(&self, offset: usize) -> TextStyle {
        self.spans
            .iter()
            .rev()
            .find(|span| span.range.contains(&offset))
            .map(|span| span.style.clone())
            .unwrap_or_default()
    }

    /// Offset of the line-leading sentinel right of `offset`, or else left
    /// of it.
    pub fn sentinel_near(&self, offset: usize) -> Option<usize> {
        let offset = self.clamp(offset);
        if self.is_leading_sentinel(offset) {
            return Some(offset);
        }
        offset
            .checked_sub(1)
            .filter(|left| self.is_leading_sentinel(*left))
    }

    pub fn affordance_at(&self, offset: usize) -> Affordance {
        if self.sentinel_near(offset).is_some() {
            Affordance::Pointer
        } else {
            Affordance::Text
        }
    }

    pub fn hover(&self, layout: &impl HitTest, point: Point) -> Affordance {
        self.affordance_at(layout.offset_at(self, point))
    }

    /// Primary-button press at a document offset.
    pub fn press(&mut self, offset: usize) -> PressOutcome {
        let Some(index) = self.sentinel_near(offset) else {
            let offset = self.clamp(offset);
            self.set_caret(offset);
            return PressOutcome::Caret { offset };
        };

        let current = self.doc.char(index);
        let Some(glyph) = toggled(current) else {
            self.set_caret(index);
            return PressOutcome::Caret { offset: index };
        };
        self.run_group(vec![Edit {
            at: index,
            removed: current.to_string(),
            inserted: glyph.to_string(),
        }]);
        PressOutcome::Toggled {
            offset: index,
            glyph,
        }
    }

    pub fn click(&mut self, layout: &impl HitTest, point: Point) -> PressOutcome {
        let offset = layout.offset_at(self, point);
        self.press(offset)
    }

    /// Types `text` over the selection (or at the caret).
    pub fn insert_text(&mut self, text: &str) {
        let range = self.selection.range();
        let removed: String = self.doc.slice(range.clone()).chars().collect();
        let caret = range.start + text.chars().count();
        self.run_group(vec![Edit {
            at: range.start,
            removed,
            inserted: text.to_string(),
        }]);
        self.selection = Selection::caret(caret);
        self.relabel_last_group_selection();
    }

    /// Prefixes each selected line (or the caret line) with an open
    /// checkbox, skipping lines that already carry a sentinel. Returns the
    /// number of prefixed lines.
    pub fn add_checkboxes(&mut self) -> usize {
        let range = self.selection.range();
        let first = self.line_of(range.start);
        let mut last = self.line_of(range.end);
        if !self.selection.is_empty() && last > first && range.end == self.line_start(last) {
            last -= 1;
        }

        let prefix = checkbox_prefix();
        let edits: Vec<Edit> = (first..=last)
            .rev()
            .filter(|line| !starts_with_sentinel(&self.line_text(*line)))
            .map(|line| Edit::insert(self.line_start(line), prefix.clone()))
            .collect();

        let count = edits.len();
        if count > 0 {
            self.run_group(edits);
        }
        count
    }

    /// Inserts an open checkbox at the caret, breaking the line first when
    /// the caret is not at a line start.
    pub fn insert_task_at_caret(&mut self) {
        let caret = self.selection.caret;
        self.selection = Selection::caret(caret);
        let at_line_start = caret == self.line_start(self.line_of(caret));
        let text = if at_line_start {
            checkbox_prefix()
        } else {
            format!("\n{}", checkbox_prefix())
        };
        let caret_after = caret + text.chars().count();
        self.run_group(vec![Edit::insert(caret, text)]);
        self.selection = Selection::caret(caret_after);
        self.relabel_last_group_selection();
    }

    /// Applies `style` to a char range as one undoable step.
    pub fn apply_style(&mut self, range: Range<usize>, style: TextStyle) {
        let range = self.clamp(range.start)..self.clamp(range.end);
        if range.is_empty() {
            return;
        }
        let spans_before = self.spans.clone();
        style::clear_range(&mut self.spans, range.clone());
        if !style.is_plain() {
            self.spans.push(StyleSpan { range, style });
            self.spans.sort_by_key(|span| span.range.start);
        }
        self.record_style_change(spans_before);
    }

    /// Drops rich formatting in the selection (whole document without one).
    /// Text and line breaks are untouched. Always notifies.
    pub fn clear_formatting(&mut self) {
        let range = if self.selection.is_empty() {
            0..self.doc.len_chars()
        } else {
            self.selection.range()
        };
        let spans_before = self.spans.clone();
        style::clear_range(&mut self.spans, range);
        self.record_style_change(spans_before);
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn undo(&mut self) -> bool {
        let Some(group) = self.history.pop_undo() else {
            return false;
        };
        for edit in group.edits.iter().rev() {
            self.apply_raw(&edit.inverse());
        }
        self.spans = group.spans_before.clone();
        self.selection = group.selection_before;
        self.history.push_redo(group);
        self.revision += 1;
        true
    }

    pub fn redo(&mut self) -> bool {
        let Some(group) = self.history.pop_redo() else {
            return false;
        };
        for edit in &group.edits {
            self.apply_raw(edit);
        }
        self.spans = group.spans_after.clone();
        self.selection = group.selection_after;
        self.history.push_undo(group);
        self.revision += 1;
        true
    }

    fn clamp(&self, offset: usize) -> usize {
        offset.min(self.doc.len_chars())
    }

    fn is_leading_sentinel(&self, index: usize) -> bool {
        let Some(c) = self.char_at(index) else {
            return false;
        };
        if !is_sentinel(c) {
            return false;
        }
        let start = self.line_start(self.doc.char_to_line(index));
        self.doc.slice(start..index).chars().all(is_indent)
    }

    fn run_group(&mut self, edits: Vec<Edit>) {
        let spans_before = self.spans.clone();
        let selection_before = self.selection;
        for edit in &edits {
            self.apply_raw(edit);
            let removed = edit.removed.chars().count();
            let inserted = edit.inserted.chars().count();
            style::shift_spans(&mut self.spans, edit.at, removed, inserted);
            self.selection = Selection {
                anchor: shift_offset(self.selection.anchor, edit.at, removed, inserted),
                caret: shift_offset(self.selection.caret, edit.at, removed, inserted),
            };
        }
        self.history.record(EditGroup {
            edits,
            spans_before,
            spans_after: self.spans.clone(),
            selection_before,
            selection_after: self.selection,
        });
        self.revision += 1;
    }

    fn record_style_change(&mut self, spans_before: Vec<StyleSpan>) {
        self.history.record(EditGroup {
            edits: Vec::new(),
            spans_before,
            spans_after: self.spans.clone(),
            selection_before: self.selection,
            selection_after: self.selection,
        });
        self.revision += 1;
    }

    /// Callers that place the caret explicitly after `run_group` keep redo
    /// consistent with what the user saw.
    fn relabel_last_group_selection(&mut self) {
        if let Some(mut group) = self.history.pop_undo() {
            group.selection_after = self.selection;
            self.history.push_undo(group);
        }
    }

    fn apply_raw(&mut self, edit: &Edit) {
        let removed = edit.removed.chars().count();
        self.doc.remove(edit.at..edit.at + removed);
        self.doc.insert(edit.at, &edit.inserted);
    }
}

fn checkbox_prefix() -> String {
    format!("{OPEN_SENTINEL} ")
}

/// Maps an offset across a replacement. An offset sitting exactly at the
/// start of a replaced run stays put.
fn shift_offset(pos: usize, at: usize, removed: usize, inserted: usize) -> usize {
    if pos < at || (pos == at && removed > 0) {
        pos
    } else if pos >= at + removed {
        pos - removed + inserted
    } else {
        at + inserted
    }
}

#[cfg(test)]
mod tests {
    use super::shift_offset;

    #[test]
    fn replacement_keeps_offset_at_its_start() {
        assert_eq!(shift_offset(4, 4, 1, 1), 4);
        assert_eq!(shift_offset(5, 4, 1, 1), 5);
    }

    #[test]
    fn insertion_pushes_offsets_at_or_after_it() {
        assert_eq!(shift_offset(0, 0, 0, 2), 2);
        assert_eq!(shift_offset(3, 5, 0, 2), 3);
    }
}
