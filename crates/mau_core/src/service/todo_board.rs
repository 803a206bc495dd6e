//! To-do panel with debounced autosave.
//!
//! # Responsibility
//! - List the todos of one project and keep one of them open for editing.
//! - Batch title/body edits into a single write after a quiet period.
//! - Flush pending edits before anything replaces the open todo.
//!
//! # Invariants
//! - Only todos whose `project_id` equals the board's project are listed.
//! - The timer is armed only while a todo is open.
//! - A flush writes at most once and only when the open todo has unsaved edits.

use crate::editor::CheckboxEditor;
use crate::model::project::ProjectId;
use crate::model::todo::{Todo, TodoId, TodoPatch, TodoSummary};
use crate::repo::todo_repo::TodoRepository;
use crate::repo::{RepoError, RepoResult};
use crate::service::debounce::Debounce;
use log::{debug, info};
use std::time::Instant;

pub struct TodoBoard<R: TodoRepository> {
    repo: R,
    project_id: Option<ProjectId>,
    items: Vec<TodoSummary>,
    current: Option<TodoId>,
    title: String,
    saved_title: String,
    editor: CheckboxEditor,
    saved_revision: u64,
    observed_revision: u64,
    timer: Debounce,
}

impl<R: TodoRepository> TodoBoard<R> {
    pub fn new(repo: R) -> Self {
        Self::with_timer(repo, Debounce::default())
    }

    pub fn with_timer(repo: R, timer: Debounce) -> Self {
        Self {
            repo,
            project_id: None,
            items: Vec::new(),
            current: None,
            title: String::new(),
            saved_title: String::new(),
            editor: CheckboxEditor::new(),
            saved_revision: 0,
            observed_revision: 0,
            timer,
        }
    }

    pub fn repo(&self) -> &R {
        &self.repo
    }

    pub fn project_id(&self) -> Option<ProjectId> {
        self.project_id
    }

    pub fn items(&self) -> &[TodoSummary] {
        &self.items
    }

    pub fn current(&self) -> Option<TodoId> {
        self.current
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn editor(&self) -> &CheckboxEditor {
        &self.editor
    }

    pub fn is_save_pending(&self) -> bool {
        self.timer.is_pending()
    }

    pub fn is_dirty(&self) -> bool {
        self.current.is_some()
            && (self.title != self.saved_title || self.editor.revision() != self.saved_revision)
    }

    /// Flushes, switches to `project_id`, reloads and opens the first todo.
    pub fn set_project(&mut self, project_id: ProjectId) -> RepoResult<()> {
        self.flush()?;
        self.project_id = Some(project_id);
        self.close_current();
        self.reload()
    }

    /// Re-reads the list; opens the first entry when there is one.
    pub fn reload(&mut self) -> RepoResult<()> {
        self.items = match self.project_id {
            Some(project_id) => self
                .repo
                .list_todos(project_id)?
                .into_iter()
                .map(|todo| TodoSummary {
                    id: todo.id,
                    title: todo.title,
                })
                .collect(),
            None => Vec::new(),
        };
        match self.items.first().map(|item| item.id) {
            Some(first) => self.select(first),
            None => {
                self.close_current();
                Ok(())
            }
        }
    }

    /// Saves the open todo if needed, then loads `id` into the editor.
    pub fn select(&mut self, id: TodoId) -> RepoResult<()> {
        self.flush()?;
        let todo = self.repo.get_todo(id)?.ok_or(RepoError::NotFound {
            collection: "todos",
            id,
        })?;
        self.load(todo);
        Ok(())
    }

    /// Inserts a placeholder todo for the board's project and opens it.
    /// Does nothing without a project.
    pub fn create(&mut self) -> RepoResult<Option<TodoId>> {
        let Some(project_id) = self.project_id else {
            return Ok(None);
        };
        self.flush()?;
        let id = self.repo.create_todo(&Todo::placeholder(project_id))?;
        info!(
            "event=todo_create module=todo_board status=ok todo_id={} project_id={}",
            id, project_id
        );
        self.reload()?;
        self.select(id)?;
        Ok(Some(id))
    }

    /// Deletes the open todo when `confirm` approves it.
    pub fn delete_current(&mut self, confirm: impl FnOnce(&str) -> bool) -> RepoResult<bool> {
        let Some(id) = self.current else {
            return Ok(false);
        };
        if !confirm(&self.title) {
            return Ok(false);
        }
        self.timer.cancel();
        self.repo.delete_todo(id)?;
        info!("event=todo_delete module=todo_board status=ok todo_id={}", id);
        self.close_current();
        self.reload()?;
        Ok(true)
    }

    /// Replaces the title and arms the autosave timer.
    pub fn set_title(&mut self, title: impl Into<String>, now: Instant) {
        self.title = title.into();
        self.touch(now);
    }

    /// Runs `change` against the body editor and arms the timer when the
    /// document changed.
    pub fn edit<T>(&mut self, now: Instant, change: impl FnOnce(&mut CheckboxEditor) -> T) -> T {
        let result = change(&mut self.editor);
        self.observe_editor(now);
        result
    }

    /// Drives the timer. Returns `true` when a save was written.
    pub fn poll(&mut self, now: Instant) -> RepoResult<bool> {
        self.observe_editor(now);
        if self.timer.fire_if_due(now) {
            return self.save_current();
        }
        Ok(false)
    }

    /// Writes pending edits right away.
    pub fn flush(&mut self) -> RepoResult<bool> {
        self.timer.cancel();
        if !self.is_dirty() {
            return Ok(false);
        }
        self.save_current()
    }

    fn touch(&mut self, now: Instant) {
        if self.current.is_some() {
            self.timer.restart(now);
        }
    }

    fn observe_editor(&mut self, now: Instant) {
        let revision = self.editor.revision();
        if revision != self.observed_revision {
            self.observed_revision = revision;
            self.touch(now);
        }
    }

    fn save_current(&mut self) -> RepoResult<bool> {
        let (Some(id), Some(project_id)) = (self.current, self.project_id) else {
            return Ok(false);
        };
        self.timer.cancel();
        let patch = TodoPatch {
            title: Some(self.title.clone()),
            content: Some(self.editor.text()),
            project_id: Some(project_id),
        };
        self.repo.update_todo(id, &patch)?;
        self.saved_title = self.title.clone();
        self.saved_revision = self.editor.revision();
        self.observed_revision = self.saved_revision;
        if let Some(item) = self.items.iter_mut().find(|item| item.id == id) {
            item.title = self.title.clone();
        }
        debug!("event=todo_save module=todo_board status=ok todo_id={}", id);
        Ok(true)
    }

    fn load(&mut self, todo: Todo) {
        self.current = Some(todo.id);
        self.title = todo.title;
        self.saved_title = self.title.clone();
        self.editor.set_text(&todo.content);
        self.saved_revision = self.editor.revision();
        self.observed_revision = self.saved_revision;
    }

    fn close_current(&mut self) {
        self.timer.cancel();
        self.current = None;
        self.title.clear();
        self.saved_title.clear();
        self.editor.set_text("");
        self.saved_revision = self.editor.revision();
        self.observed_revision = self.saved_revision;
    }
}
