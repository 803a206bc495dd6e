//! Project collection contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide CRUD over the `projects` collection.
//! - Store the `info` map as a JSON object column.
//!
//! # Invariants
//! - Write paths call `Project::validate()` before SQL mutations.
//! - Listing order is insertion order.

use crate::model::project::{
    Project, ProjectId, ProjectInfo, ProjectPatch, ProjectValidationError,
};
use crate::repo::{parse_uuid, RepoError, RepoResult};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row};

const COLLECTION: &str = "projects";

const PROJECT_SELECT_SQL: &str = "SELECT
    uuid,
    name,
    description,
    icon_path,
    info
FROM projects";

/// Repository interface for the `projects` collection.
pub trait ProjectRepository {
    fn create_project(&self, project: &Project) -> RepoResult<ProjectId>;
    fn get_project(&self, id: ProjectId) -> RepoResult<Option<Project>>;
    fn list_projects(&self) -> RepoResult<Vec<Project>>;
    /// Exact-match lookup on `name`.
    fn find_projects_by_name(&self, name: &str) -> RepoResult<Vec<Project>>;
    /// Sets only the fields present in `patch`.
    fn update_project(&self, id: ProjectId, patch: &ProjectPatch) -> RepoResult<()>;
    fn count_projects(&self) -> RepoResult<u64>;
}

impl<R: ProjectRepository + ?Sized> ProjectRepository for &R {
    fn create_project(&self, project: &Project) -> RepoResult<ProjectId> {
        (**self).create_project(project)
    }

    fn get_project(&self, id: ProjectId) -> RepoResult<Option<Project>> {
        (**self).get_project(id)
    }

    fn list_projects(&self) -> RepoResult<Vec<Project>> {
        (**self).list_projects()
    }

    fn find_projects_by_name(&self, name: &str) -> RepoResult<Vec<Project>> {
        (**self).find_projects_by_name(name)
    }

    fn update_project(&self, id: ProjectId, patch: &ProjectPatch) -> RepoResult<()> {
        (**self).update_project(id, patch)
    }

    fn count_projects(&self) -> RepoResult<u64> {
        (**self).count_projects()
    }
}

/// SQLite-backed project repository.
pub struct SqliteProjectRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteProjectRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl ProjectRepository for SqliteProjectRepository<'_> {
    fn create_project(&self, project: &Project) -> RepoResult<ProjectId> {
        project.validate()?;

        self.conn.execute(
            "INSERT INTO projects (uuid, name, description, icon_path, info)
             VALUES (?1, ?2, ?3, ?4, ?5);",
            params![
                project.id.to_string(),
                project.name.as_str(),
                project.description.as_str(),
                project.icon_path.as_str(),
                info_to_db(&project.info)?,
            ],
        )?;

        Ok(project.id)
    }

    fn get_project(&self, id: ProjectId) -> RepoResult<Option<Project>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{PROJECT_SELECT_SQL} WHERE uuid = ?1;"))?;
        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_project_row(row)?));
        }
        Ok(None)
    }

    fn list_projects(&self) -> RepoResult<Vec<Project>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{PROJECT_SELECT_SQL} ORDER BY rowid ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut projects = Vec::new();
        while let Some(row) = rows.next()? {
            projects.push(parse_project_row(row)?);
        }
        Ok(projects)
    }

    fn find_projects_by_name(&self, name: &str) -> RepoResult<Vec<Project>> {
        let mut stmt = self.conn.prepare(&format!(
            "{PROJECT_SELECT_SQL} WHERE name = ?1 ORDER BY rowid ASC;"
        ))?;
        let mut rows = stmt.query([name])?;
        let mut projects = Vec::new();
        while let Some(row) = rows.next()? {
            projects.push(parse_project_row(row)?);
        }
        Ok(projects)
    }

    fn update_project(&self, id: ProjectId, patch: &ProjectPatch) -> RepoResult<()> {
        if let Some(name) = patch.name.as_deref() {
            if name.trim().is_empty() {
                return Err(ProjectValidationError::EmptyName.into());
            }
        }

        let mut assignments: Vec<&str> = Vec::new();
        let mut bind_values: Vec<Value> = Vec::new();

        if let Some(name) = patch.name.as_ref() {
            assignments.push("name = ?");
            bind_values.push(Value::Text(name.clone()));
        }
        if let Some(description) = patch.description.as_ref() {
            assignments.push("description = ?");
            bind_values.push(Value::Text(description.clone()));
        }
        if let Some(icon_path) = patch.icon_path.as_ref() {
            assignments.push("icon_path = ?");
            bind_values.push(Value::Text(icon_path.clone()));
        }
        if let Some(info) = patch.info.as_ref() {
            assignments.push("info = ?");
            bind_values.push(Value::Text(info_to_db(info)?));
        }
        assignments.push("updated_at = (strftime('%s', 'now') * 1000)");

        let sql = format!(
            "UPDATE projects SET {} WHERE uuid = ?;",
            assignments.join(", ")
        );
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

    fn count_projects(&self) -> RepoResult<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM projects;", [], |row| row.get(0))?;
        u64::try_from(count)
            .map_err(|_| RepoError::InvalidData(format!("negative project count {count}")))
    }
}

fn parse_project_row(row: &Row<'_>) -> RepoResult<Project> {
    let uuid_text: String = row.get("uuid")?;
    let info_text: String = row.get("info")?;
    let project = Project {
        id: parse_uuid(&uuid_text, "projects.uuid")?,
        name: row.get("name")?,
        description: row.get("description")?,
        icon_path: row.get("icon_path")?,
        info: info_from_db(&info_text)?,
    };
    project.validate()?;
    Ok(project)
}

fn info_to_db(info: &ProjectInfo) -> RepoResult<String> {
    serde_json::to_string(info)
        .map_err(|err| RepoError::InvalidData(format!("cannot encode project info: {err}")))
}

fn info_from_db(value: &str) -> RepoResult<ProjectInfo> {
    serde_json::from_str(value).map_err(|err| {
        RepoError::InvalidData(format!("invalid JSON `{value}` in projects.info: {err}"))
    })
}
