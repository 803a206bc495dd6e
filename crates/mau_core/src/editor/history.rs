//! Undo/redo bookkeeping for the checkbox editor.

use crate::editor::style::StyleSpan;
use crate::editor::Selection;

const UNDO_LIMIT: usize = 256;

/// Replacement of `removed` by `inserted` starting at char index `at`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Edit {
    pub at: usize,
    pub removed: String,
    pub inserted: String,
}

impl Edit {
    pub fn insert(at: usize, text: impl Into<String>) -> Self {
        Self {
            at,
            removed: String::new(),
            inserted: text.into(),
        }
    }

    pub fn inverse(&self) -> Self {
        Self {
            at: self.at,
            removed: self.inserted.clone(),
            inserted: self.removed.clone(),
        }
    }
}

/// One user-visible undo step.
#[derive(Debug, Clone)]
pub(crate) struct EditGroup {
    pub edits: Vec<Edit>,
    pub spans_before: Vec<StyleSpan>,
    pub spans_after: Vec<StyleSpan>,
    pub selection_before: Selection,
    pub selection_after: Selection,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct History {
    undo: Vec<EditGroup>,
    redo: Vec<EditGroup>,
}

impl History {
    pub fn record(&mut self, group: EditGroup) {
        if self.undo.len() == UNDO_LIMIT {
            self.undo.remove(0);
        }
        self.undo.push(group);
        self.redo.clear();
    }

    pub fn pop_undo(&mut self) -> Option<EditGroup> {
        self.undo.pop()
    }

    pub fn push_redo(&mut self, group: EditGroup) {
        self.redo.push(group);
    }

    pub fn pop_redo(&mut self) -> Option<EditGroup> {
        self.redo.pop()
    }

    /// Re-stacks a redone group without clearing the redo chain.
    pub fn push_undo(&mut self, group: EditGroup) {
        self.undo.push(group);
    }

    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    pub fn clear(&mut self) {
        self.undo.clear();
        self.redo.clear();
    }
}
