//! JSON settings file (`~/.myapp/config.json`).
//!
//! # Responsibility
//! - Load typed settings with defaults for missing keys or a missing file.
//! - Save by merging into the file on disk, preserving unknown keys.
//!
//! # Invariants
//! - `sidebar_position` is persisted as its dock-area number (1, 2, 4, 8).

use log::{info, warn};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

const CONFIG_DIR_NAME: &str = ".myapp";
const CONFIG_FILE_NAME: &str = "config.json";

pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(Debug)]
pub enum ConfigError {
    NoHomeDirectory,
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    Encode(serde_json::Error),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoHomeDirectory => write!(f, "cannot locate the user home directory"),
            Self::Io { path, source } => {
                write!(f, "config file `{}` I/O failed: {source}", path.display())
            }
            Self::Parse { path, source } => {
                write!(f, "config file `{}` is not valid: {source}", path.display())
            }
            Self::Encode(err) => write!(f, "cannot encode config: {err}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::NoHomeDirectory => None,
            Self::Io { source, .. } => Some(source),
            Self::Parse { source, .. } => Some(source),
            Self::Encode(err) => Some(err),
        }
    }
}

/// Window edge the project sidebar docks to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum SidebarPosition {
    #[default]
    Left,
    Right,
    Top,
    Bottom,
}

impl SidebarPosition {
    pub const ALL: [Self; 4] = [Self::Left, Self::Right, Self::Top, Self::Bottom];

    pub fn label(self) -> &'static str {
        match self {
            Self::Left => "Left",
            Self::Right => "Right",
            Self::Top => "Top",
            Self::Bottom => "Bottom",
        }
    }

    /// Case-insensitive lookup by label.
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|position| position.label().eq_ignore_ascii_case(label.trim()))
    }
}

impl From<SidebarPosition> for u8 {
    fn from(value: SidebarPosition) -> Self {
        match value {
            SidebarPosition::Left => 1,
            SidebarPosition::Right => 2,
            SidebarPosition::Top => 4,
            SidebarPosition::Bottom => 8,
        }
    }
}

impl TryFrom<u8> for SidebarPosition {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::Left),
            2 => Ok(Self::Right),
            4 => Ok(Self::Top),
            8 => Ok(Self::Bottom),
            other => Err(format!("unknown sidebar position {other}")),
        }
    }
}

fn default_minimize_to_tray() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub dark_mode: bool,
    #[serde(default = "default_minimize_to_tray")]
    pub minimize_to_tray: bool,
    #[serde(default)]
    pub sidebar_position: SidebarPosition,
    /// Keys written by other versions; kept verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            dark_mode: false,
            minimize_to_tray: default_minimize_to_tray(),
            sidebar_position: SidebarPosition::default(),
            extra: Map::new(),
        }
    }
}

/// What closing the main window should do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseAction {
    MinimizeToTray,
    Quit,
}

impl AppConfig {
    /// Closing hides to the tray only when enabled and a tray is present.
    pub fn close_action(&self, tray_available: bool) -> CloseAction {
        if self.minimize_to_tray && tray_available {
            CloseAction::MinimizeToTray
        } else {
            CloseAction::Quit
        }
    }
}

/// Settings file handle.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `~/.myapp/config.json`.
    pub fn at_default_location() -> ConfigResult<Self> {
        let dirs = directories_next::BaseDirs::new().ok_or(ConfigError::NoHomeDirectory)?;
        Ok(Self::new(
            dirs.home_dir().join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME),
        ))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the file; a missing file yields defaults.
    pub fn load(&self) -> ConfigResult<AppConfig> {
        match std::fs::read_to_string(&self.path) {
            Ok(text) => serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
                path: self.path.clone(),
                source,
            }),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(AppConfig::default()),
            Err(source) => Err(ConfigError::Io {
                path: self.path.clone(),
                source,
            }),
        }
    }

    /// Like `load`, but an unreadable file degrades to defaults.
    pub fn load_or_default(&self) -> AppConfig {
        self.load().unwrap_or_else(|err| {
            warn!("event=config_load module=config status=error error={}", err);
            AppConfig::default()
        })
    }

    /// Writes `config` over the file.
    pub fn save(&self, config: &AppConfig) -> ConfigResult<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| ConfigError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        let text = serde_json::to_string_pretty(config).map_err(ConfigError::Encode)?;
        std::fs::write(&self.path, text).map_err(|source| ConfigError::Io {
            path: self.path.clone(),
            source,
        })?;
        info!(
            "event=config_save module=config status=ok path={}",
            self.path.display()
        );
        Ok(())
    }

    /// Re-reads the file, applies `change` and writes it back, so fields
    /// saved by other writers survive.
    pub fn update(&self, change: impl FnOnce(&mut AppConfig)) -> ConfigResult<AppConfig> {
        let mut config = self.load()?;
        change(&mut config);
        self.save(&config)?;
        Ok(config)
    }
}
