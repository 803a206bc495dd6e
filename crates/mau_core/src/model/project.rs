//! Project record.
//!
//! # Invariants
//! - `name` is never empty for persisted projects.
//! - `info` keys are unique; iteration follows key order.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

pub type ProjectId = Uuid;

/// Icon assigned to projects that never picked one.
pub const DEFAULT_ICON_PATH: &str = "assets/project_images/default_icon.png";

/// Visible length of a description in sidebar labels.
const SIDEBAR_DESCRIPTION_CHARS: usize = 8;

/// Free-form key/value annotations attached to a project.
pub type ProjectInfo = BTreeMap<String, String>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: ProjectId,
    pub name: String,
    pub description: String,
    pub icon_path: String,
    #[serde(default)]
    pub info: ProjectInfo,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProjectValidationError {
    EmptyName,
}

impl Display for ProjectValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName => write!(f, "project name cannot be empty"),
        }
    }
}

impl Error for ProjectValidationError {}

/// How a project icon is drawn in the sidebar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IconKind {
    /// Multi-frame image refreshed by the host's frame timer.
    Animated,
    Static,
}

impl Project {
    /// Creates a project with a fresh id, the default icon and no info.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            description: description.into(),
            icon_path: DEFAULT_ICON_PATH.to_string(),
            info: ProjectInfo::new(),
        }
    }

    pub fn validate(&self) -> Result<(), ProjectValidationError> {
        if self.name.trim().is_empty() {
            return Err(ProjectValidationError::EmptyName);
        }
        Ok(())
    }

    /// Label shown in the project sidebar: `"<name>: <description>"`, with
    /// the description cut to eight characters plus `...` when longer.
    pub fn sidebar_label(&self) -> String {
        let description = if self.description.chars().count() <= SIDEBAR_DESCRIPTION_CHARS {
            self.description.clone()
        } else {
            let head: String = self
                .description
                .chars()
                .take(SIDEBAR_DESCRIPTION_CHARS)
                .collect();
            format!("{head}...")
        };
        format!("{}: {}", self.name, description)
    }

    pub fn icon_kind(&self) -> IconKind {
        icon_kind_for(&self.icon_path)
    }
}

pub fn icon_kind_for(path: &str) -> IconKind {
    if path.to_ascii_lowercase().ends_with(".gif") {
        IconKind::Animated
    } else {
        IconKind::Static
    }
}

/// Partial-field update for a project. `None` leaves the field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub icon_path: Option<String>,
    pub info: Option<ProjectInfo>,
}

impl ProjectPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.icon_path.is_none()
            && self.info.is_none()
    }
}
