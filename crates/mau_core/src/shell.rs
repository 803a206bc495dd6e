//! Application shell: store handle, current project and panel wiring.
//!
//! # Responsibility
//! - Prepare the data layout and open the store on startup.
//! - Seed a demo project into an empty store.
//! - Track the selected project and build its panels.
//!
//! # Invariants
//! - Every listed project has a notes directory once the shell is open.
//! - The current project, when set, exists in the store.

use crate::config::{AppConfig, CloseAction};
use crate::db::{open_db, DbError};
use crate::model::project::{Project, ProjectId};
use crate::paths::{AppPaths, ResourceResolver};
use crate::repo::project_repo::{ProjectRepository, SqliteProjectRepository};
use crate::repo::todo_repo::SqliteTodoRepository;
use crate::repo::RepoError;
use crate::service::note_pad::{NoteError, NotePad, NoteShelf};
use crate::service::project_desk::{ProjectDesk, SidebarEntry};
use crate::service::todo_board::TodoBoard;
use log::{info, warn};
use rusqlite::Connection;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub const DEMO_PROJECT_NAME: &str = "Demo project";
pub const DEMO_PROJECT_DESCRIPTION: &str = "This is a test project.";

#[derive(Debug)]
pub enum ShellError {
    Db(DbError),
    Repo(RepoError),
    Note(NoteError),
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl Display for ShellError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "{err}"),
            Self::Note(err) => write!(f, "{err}"),
            Self::Io { path, source } => {
                write!(f, "cannot prepare `{}`: {source}", path.display())
            }
        }
    }
}

impl Error for ShellError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Repo(err) => Some(err),
            Self::Note(err) => Some(err),
            Self::Io { source, .. } => Some(source),
        }
    }
}

impl From<DbError> for ShellError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<RepoError> for ShellError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

impl From<NoteError> for ShellError {
    fn from(value: NoteError) -> Self {
        Self::Note(value)
    }
}

pub type ShellResult<T> = Result<T, ShellError>;

/// Panels bound to one selected project.
pub struct Workspace<'conn> {
    pub project: Project,
    pub desk: ProjectDesk<SqliteProjectRepository<'conn>>,
    pub board: TodoBoard<SqliteTodoRepository<'conn>>,
    pub notes: NotePad,
}

pub struct Shell {
    conn: Connection,
    paths: AppPaths,
    resources: ResourceResolver,
    current_project: Option<ProjectId>,
}

impl Shell {
    /// Creates the data layout, opens the store file and selects the first
    /// project.
    pub fn open(paths: AppPaths, resources: ResourceResolver) -> ShellResult<Self> {
        paths.ensure_dirs().map_err(|source| ShellError::Io {
            path: paths.data_dir.clone(),
            source,
        })?;
        let conn = open_db(&paths.database_file)?;
        Self::with_connection(conn, paths, resources)
    }

    /// Same as [`Shell::open`] over an already migrated connection.
    pub fn with_connection(
        conn: Connection,
        paths: AppPaths,
        resources: ResourceResolver,
    ) -> ShellResult<Self> {
        let mut shell = Self {
            conn,
            paths,
            resources,
            current_project: None,
        };
        shell.seed_demo_project()?;
        shell.ensure_project_folders()?;
        let first = shell.projects().list_projects()?.first().map(|p| p.id);
        shell.current_project = first;
        Ok(shell)
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    pub fn paths(&self) -> &AppPaths {
        &self.paths
    }

    pub fn resources(&self) -> &ResourceResolver {
        &self.resources
    }

    pub fn projects(&self) -> SqliteProjectRepository<'_> {
        SqliteProjectRepository::new(&self.conn)
    }

    pub fn todos(&self) -> SqliteTodoRepository<'_> {
        SqliteTodoRepository::new(&self.conn)
    }

    pub fn current_project(&self) -> Option<ProjectId> {
        self.current_project
    }

    pub fn sidebar(&self) -> ShellResult<Vec<SidebarEntry>> {
        Ok(ProjectDesk::new(self.projects()).sidebar()?)
    }

    /// Makes `id` the current project.
    pub fn select_project(&mut self, id: ProjectId) -> ShellResult<()> {
        if self.projects().get_project(id)?.is_none() {
            return Err(RepoError::NotFound {
                collection: "projects",
                id,
            }
            .into());
        }
        self.current_project = Some(id);
        info!("event=project_select module=shell status=ok project_id={}", id);
        Ok(())
    }

    /// Panels for the current project, or `None` when nothing is selected.
    pub fn workspace(&self) -> ShellResult<Option<Workspace<'_>>> {
        let Some(id) = self.current_project else {
            return Ok(None);
        };
        let mut desk = ProjectDesk::new(self.projects());
        let project = desk.open(id)?.clone();
        let mut board = TodoBoard::new(self.todos());
        board.set_project(id)?;
        let shelf = NoteShelf::open(&self.paths.storage_dir, &id.to_string())?;
        Ok(Some(Workspace {
            project,
            desk,
            board,
            notes: NotePad::new(shelf),
        }))
    }

    /// Project form in "create" mode.
    pub fn new_project_form(&self) -> ProjectDesk<SqliteProjectRepository<'_>> {
        ProjectDesk::new(self.projects())
    }

    pub fn close_action(&self, config: &AppConfig, tray_available: bool) -> CloseAction {
        config.close_action(tray_available)
    }

    fn seed_demo_project(&self) -> ShellResult<()> {
        let repo = self.projects();
        if repo.count_projects()? > 0 {
            return Ok(());
        }
        let demo = Project::new(DEMO_PROJECT_NAME, DEMO_PROJECT_DESCRIPTION);
        repo.create_project(&demo)?;
        info!(
            "event=seed_demo module=shell status=ok project_id={}",
            demo.id
        );
        Ok(())
    }

    fn ensure_project_folders(&self) -> ShellResult<()> {
        for project in self.projects().list_projects()? {
            let dir = self.paths.project_notes_dir(&project.id.to_string());
            if let Err(source) = std::fs::create_dir_all(&dir) {
                warn!(
                    "event=project_folder module=shell status=error path={} error={}",
                    dir.display(),
                    source
                );
            }
        }
        Ok(())
    }
}
