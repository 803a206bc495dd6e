//! Todo record.

use crate::model::project::ProjectId;
use crate::model::OPEN_SENTINEL;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type TodoId = Uuid;

pub const NEW_TODO_TITLE: &str = "New note";

/// Body given to freshly created todos.
pub fn new_todo_content() -> String {
    format!("{OPEN_SENTINEL} My first task")
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    pub id: TodoId,
    pub project_id: ProjectId,
    pub title: String,
    /// Plain text; lines may start with a sentinel glyph.
    pub content: String,
}

impl Todo {
    pub fn new(
        project_id: ProjectId,
        title: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            project_id,
            title: title.into(),
            content: content.into(),
        }
    }

    /// Placeholder record inserted by the "new" action.
    pub fn placeholder(project_id: ProjectId) -> Self {
        Self::new(project_id, NEW_TODO_TITLE, new_todo_content())
    }
}

/// Partial-field update for a todo. `None` leaves the field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoPatch {
    pub title: Option<String>,
    pub content: Option<String>,
    pub project_id: Option<ProjectId>,
}

/// List row shown in the todo panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoSummary {
    pub id: TodoId,
    pub title: String,
}
