//! Resource lookup and on-disk data layout.
//!
//! # Responsibility
//! - Resolve bundled assets for packaged and development runs.
//! - Name every directory and file the application writes.
//!
//! # Invariants
//! - Missing assets resolve to a placeholder instead of failing.

use std::path::{Path, PathBuf};

/// Overrides resource detection when set.
pub const RESOURCE_DIR_ENV: &str = "MAU_RESOURCE_DIR";
pub const PLACEHOLDER_ICON: &str = "assets/project_images/default_icon.png";
pub const DARK_THEME_STYLESHEET: &str = "dark_theme.qss";
pub const STORAGE_DIR_NAME: &str = "storage";
pub const DATABASE_DIR_NAME: &str = "database";
const DATABASE_FILE_NAME: &str = "mau.sqlite3";
const LOG_DIR_NAME: &str = "logs";
const VERSION_FILE_NAME: &str = "version.txt";
const ASSETS_DIR_NAME: &str = "assets";

/// Maps logical asset names to files on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceResolver {
    base: PathBuf,
    packaged: bool,
}

impl ResourceResolver {
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self {
            base: base.into(),
            packaged: false,
        }
    }

    /// Picks the base directory: `MAU_RESOURCE_DIR`, then the executable's
    /// directory when it ships an `assets` folder, then the working dir.
    pub fn detect() -> std::io::Result<Self> {
        if let Some(dir) = std::env::var_os(RESOURCE_DIR_ENV).filter(|v| !v.is_empty()) {
            return Ok(Self::new(PathBuf::from(dir)));
        }
        let exe_dir = std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(Path::to_path_buf));
        if let Some(dir) = exe_dir.filter(|dir| dir.join(ASSETS_DIR_NAME).is_dir()) {
            return Ok(Self {
                base: dir,
                packaged: true,
            });
        }
        Ok(Self::new(std::env::current_dir()?))
    }

    pub fn base(&self) -> &Path {
        &self.base
    }

    /// Whether assets were found next to the executable.
    pub fn is_packaged(&self) -> bool {
        self.packaged
    }

    pub fn resolve(&self, relative: impl AsRef<Path>) -> PathBuf {
        self.base.join(relative)
    }

    pub fn existing(&self, relative: impl AsRef<Path>) -> Option<PathBuf> {
        let path = self.resolve(relative);
        path.exists().then_some(path)
    }

    /// Path to draw for a project icon; unknown files fall back to the
    /// placeholder.
    pub fn icon_or_placeholder(&self, icon_path: &str) -> PathBuf {
        let candidate = Path::new(icon_path);
        if candidate.is_absolute() && candidate.exists() {
            return candidate.to_path_buf();
        }
        self.existing(candidate)
            .unwrap_or_else(|| self.resolve(PLACEHOLDER_ICON))
    }

    /// Contents of a bundled stylesheet, `None` when missing or unreadable.
    pub fn read_stylesheet(&self, name: &str) -> Option<String> {
        std::fs::read_to_string(self.resolve(name)).ok()
    }
}

/// Every location the application writes under its data directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppPaths {
    pub data_dir: PathBuf,
    /// One sub-directory of notes per project.
    pub storage_dir: PathBuf,
    pub database_dir: PathBuf,
    pub database_file: PathBuf,
    pub log_dir: PathBuf,
    pub version_file: PathBuf,
}

impl AppPaths {
    pub fn under(data_dir: impl Into<PathBuf>) -> Self {
        let data_dir = data_dir.into();
        let database_dir = data_dir.join(DATABASE_DIR_NAME);
        Self {
            storage_dir: data_dir.join(STORAGE_DIR_NAME),
            database_file: database_dir.join(DATABASE_FILE_NAME),
            database_dir,
            log_dir: data_dir.join(LOG_DIR_NAME),
            version_file: data_dir.join(VERSION_FILE_NAME),
            data_dir,
        }
    }

    /// Per-user data directory, e.g. `~/.local/share/mau` on Linux.
    pub fn default_data_dir() -> Option<PathBuf> {
        directories_next::ProjectDirs::from("org", "gnu", "mau")
            .map(|dirs| dirs.data_dir().to_path_buf())
    }

    /// Notes directory of one project.
    pub fn project_notes_dir(&self, project_id: &str) -> PathBuf {
        self.storage_dir.join(project_id)
    }

    pub fn ensure_dirs(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.storage_dir)?;
        std::fs::create_dir_all(&self.database_dir)?;
        Ok(())
    }
}
