//! Project form and information panel.
//!
//! # Responsibility
//! - Create and edit projects from form input.
//! - Persist icon and info changes immediately.
//! - Build sidebar rows and filter the info table.
//!
//! # Invariants
//! - Saving an existing project never touches its icon.
//! - Blank form input is ignored, not rejected.

use crate::model::project::{IconKind, Project, ProjectId, ProjectInfo, ProjectPatch};
use crate::repo::project_repo::ProjectRepository;
use crate::repo::{RepoError, RepoResult};
use log::info;

/// One row of the project sidebar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SidebarEntry {
    pub id: ProjectId,
    pub label: String,
    pub icon_path: String,
    pub icon_kind: IconKind,
}

impl From<&Project> for SidebarEntry {
    fn from(project: &Project) -> Self {
        Self {
            id: project.id,
            label: project.sidebar_label(),
            icon_path: project.icon_path.clone(),
            icon_kind: project.icon_kind(),
        }
    }
}

/// Info rows whose key or value contains `query`, ignoring case.
pub fn filter_info<'a>(info: &'a ProjectInfo, query: &str) -> Vec<(&'a str, &'a str)> {
    let needle = query.trim().to_lowercase();
    info.iter()
        .filter(|(key, value)| {
            needle.is_empty()
                || key.to_lowercase().contains(&needle)
                || value.to_lowercase().contains(&needle)
        })
        .map(|(key, value)| (key.as_str(), value.as_str()))
        .collect()
}

pub struct ProjectDesk<R: ProjectRepository> {
    repo: R,
    current: Option<Project>,
}

impl<R: ProjectRepository> ProjectDesk<R> {
    pub fn new(repo: R) -> Self {
        Self {
            repo,
            current: None,
        }
    }

    pub fn current(&self) -> Option<&Project> {
        self.current.as_ref()
    }

    pub fn sidebar(&self) -> RepoResult<Vec<SidebarEntry>> {
        Ok(self
            .repo
            .list_projects()?
            .iter()
            .map(SidebarEntry::from)
            .collect())
    }

    /// Loads `id` as the current project.
    pub fn open(&mut self, id: ProjectId) -> RepoResult<&Project> {
        let project = self.repo.get_project(id)?.ok_or(RepoError::NotFound {
            collection: "projects",
            id,
        })?;
        Ok(&*self.current.insert(project))
    }

    /// Clears the form so the next save creates a project.
    pub fn start_new(&mut self) {
        self.current = None;
    }

    /// Inserts or updates from form input. Returns `None` when either field
    /// is blank.
    pub fn save(&mut self, name: &str, description: &str) -> RepoResult<Option<&Project>> {
        if name.trim().is_empty() || description.trim().is_empty() {
            return Ok(None);
        }
        match self.current.as_mut() {
            None => {
                let project = Project::new(name, description);
                self.repo.create_project(&project)?;
                info!(
                    "event=project_create module=project_desk status=ok project_id={}",
                    project.id
                );
                self.current = Some(project);
            }
            Some(project) => {
                let patch = ProjectPatch {
                    name: Some(name.to_string()),
                    description: Some(description.to_string()),
                    icon_path: None,
                    info: Some(project.info.clone()),
                };
                self.repo.update_project(project.id, &patch)?;
                project.name = name.to_string();
                project.description = description.to_string();
                info!(
                    "event=project_update module=project_desk status=ok project_id={}",
                    project.id
                );
            }
        }
        Ok(self.current.as_ref())
    }

    /// Stores a new icon for the current project. `false` without one.
    pub fn change_icon(&mut self, icon_path: &str) -> RepoResult<bool> {
        let Some(project) = self.current.as_mut() else {
            return Ok(false);
        };
        let patch = ProjectPatch {
            icon_path: Some(icon_path.to_string()),
            ..ProjectPatch::default()
        };
        self.repo.update_project(project.id, &patch)?;
        project.icon_path = icon_path.to_string();
        Ok(true)
    }

    /// Adds or replaces one info entry. Blank keys or values are ignored.
    pub fn add_info(&mut self, key: &str, value: &str) -> RepoResult<bool> {
        if key.is_empty() || value.is_empty() {
            return Ok(false);
        }
        let Some(project) = self.current.as_mut() else {
            return Ok(false);
        };
        let mut info = project.info.clone();
        info.insert(key.to_string(), value.to_string());
        let patch = ProjectPatch {
            info: Some(info.clone()),
            ..ProjectPatch::default()
        };
        self.repo.update_project(project.id, &patch)?;
        project.info = info;
        Ok(true)
    }
}
