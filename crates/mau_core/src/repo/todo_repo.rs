//! Todo collection contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide CRUD over the `todos` collection.
//! - Filter listings by exact `project_id` match.
//!
//! # Invariants
//! - `project_id` is stored as given; unknown projects are not rejected.
//! - Listing order is insertion order.

use crate::model::project::ProjectId;
use crate::model::todo::{Todo, TodoId, TodoPatch};
use crate::repo::{parse_uuid, RepoError, RepoResult};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row};

const COLLECTION: &str = "todos";

const TODO_SELECT_SQL: &str = "SELECT
    uuid,
    project_id,
    title,
    content
FROM todos";

/// Repository interface for the `todos` collection.
pub trait TodoRepository {
    fn create_todo(&self, todo: &Todo) -> RepoResult<TodoId>;
    fn get_todo(&self, id: TodoId) -> RepoResult<Option<Todo>>;
    fn list_todos(&self, project_id: ProjectId) -> RepoResult<Vec<Todo>>;
    /// Sets only the fields present in `patch`.
    fn update_todo(&self, id: TodoId, patch: &TodoPatch) -> RepoResult<()>;
    fn delete_todo(&self, id: TodoId) -> RepoResult<()>;
}

impl<R: TodoRepository + ?Sized> TodoRepository for &R {
    fn create_todo(&self, todo: &Todo) -> RepoResult<TodoId> {
        (**self).create_todo(todo)
    }

    fn get_todo(&self, id: TodoId) -> RepoResult<Option<Todo>> {
        (**self).get_todo(id)
    }

    fn list_todos(&self, project_id: ProjectId) -> RepoResult<Vec<Todo>> {
        (**self).list_todos(project_id)
    }

    fn update_todo(&self, id: TodoId, patch: &TodoPatch) -> RepoResult<()> {
        (**self).update_todo(id, patch)
    }

    fn delete_todo(&self, id: TodoId) -> RepoResult<()> {
        (**self).delete_todo(id)
    }
}

/// SQLite-backed todo repository.
pub struct SqliteTodoRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteTodoRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl TodoRepository for SqliteTodoRepository<'_> {
    fn create_todo(&self, todo: &Todo) -> RepoResult<TodoId> {
        self.conn.execute(
            "INSERT INTO todos (uuid, project_id, title, content)
             VALUES (?1, ?2, ?3, ?4);",
            params![
                todo.id.to_string(),
                todo.project_id.to_string(),
                todo.title.as_str(),
                todo.content.as_str(),
            ],
        )?;
        Ok(todo.id)
    }

    fn get_todo(&self, id: TodoId) -> RepoResult<Option<Todo>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{TODO_SELECT_SQL} WHERE uuid = ?1;"))?;
        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_todo_row(row)?));
        }
        Ok(None)
    }

    fn list_todos(&self, project_id: ProjectId) -> RepoResult<Vec<Todo>> {
        let mut stmt = self.conn.prepare(&format!(
            "{TODO_SELECT_SQL} WHERE project_id = ?1 ORDER BY rowid ASC;"
        ))?;
        let mut rows = stmt.query([project_id.to_string()])?;
        let mut todos = Vec::new();
        while let Some(row) = rows.next()? {
            todos.push(parse_todo_row(row)?);
        }
        Ok(todos)
    }

    fn update_todo(&self, id: TodoId, patch: &TodoPatch) -> RepoResult<()> {
        let mut assignments: Vec<&str> = Vec::new();
        let mut bind_values: Vec<Value> = Vec::new();

        if let Some(title) = patch.title.as_ref() {
            assignments.push("title = ?");
            bind_values.push(Value::Text(title.clone()));
        }
        if let Some(content) = patch.content.as_ref() {
            assignments.push("content = ?");
            bind_values.push(Value::Text(content.clone()));
        }
        if let Some(project_id) = patch.project_id {
            assignments.push("project_id = ?");
            bind_values.push(Value::Text(project_id.to_string()));
        }
        assignments.push("updated_at = (strftime('%s', 'now') * 1000)");

        let sql = format!("UPDATE todos SET {} WHERE uuid = ?;", assignments.join(", "));
        bind_values.push(Value::Text(id.to_string()));

        let changed = self.conn.execute(&sql, params_from_iter(bind_values))?;
        if changed == 0 {
            return Err(RepoError::NotFound {
                collection: COLLECTION,
                id,
            });
        }
        Ok(())
    }

    fn delete_todo(&self, id: TodoId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM todos WHERE uuid = ?1;", [id.to_string()])?;
        if changed == 0 {
            return Err(RepoError::NotFound {
                collection: COLLECTION,
                id,
            });
        }
        Ok(())
    }
}

fn parse_todo_row(row: &Row<'_>) -> RepoResult<Todo> {
    let uuid_text: String = row.get("uuid")?;
    let project_text: String = row.get("project_id")?;
    Ok(Todo {
        id: parse_uuid(&uuid_text, "todos.uuid")?,
        project_id: parse_uuid(&project_text, "todos.project_id")?,
        title: row.get("title")?,
        content: row.get("content")?,
    })
}
