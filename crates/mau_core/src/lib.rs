//! Core domain logic for Mau.
//! Projects, to-do lists and notes live here; front ends only drive it.

pub mod config;
pub mod db;
pub mod editor;
pub mod emoji;
pub mod logging;
pub mod markdown;
pub mod model;
pub mod paths;
pub mod repo;
pub mod restore;
pub mod service;
pub mod shell;
pub mod update;

pub use config::{AppConfig, CloseAction, ConfigError, ConfigStore, SidebarPosition};
pub use db::{open_db, open_db_in_memory, DbError};
pub use editor::{Affordance, CheckboxEditor, PressOutcome, Selection};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::project::{Project, ProjectId, ProjectInfo, ProjectPatch};
pub use model::todo::{Todo, TodoId, TodoPatch, TodoSummary};
pub use paths::{AppPaths, ResourceResolver};
pub use repo::project_repo::{ProjectRepository, SqliteProjectRepository};
pub use repo::todo_repo::{SqliteTodoRepository, TodoRepository};
pub use repo::{RepoError, RepoResult};
pub use shell::{Shell, ShellError, Workspace};

/// Minimal health-check API for front ends.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
