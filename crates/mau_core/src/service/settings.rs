//! Settings panel: theme, tray behavior and sidebar placement.
//!
//! Every change is merged into the config file right away.

use crate::config::{AppConfig, ConfigError, ConfigStore, SidebarPosition};
use crate::paths::{ResourceResolver, DARK_THEME_STYLESHEET};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

#[derive(Debug)]
pub enum SettingsError {
    Config(ConfigError),
    MissingStylesheet(PathBuf),
}

impl Display for SettingsError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Config(err) => write!(f, "{err}"),
            Self::MissingStylesheet(path) => {
                write!(f, "dark theme stylesheet not found: `{}`", path.display())
            }
        }
    }
}

impl Error for SettingsError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Config(err) => Some(err),
            Self::MissingStylesheet(_) => None,
        }
    }
}

impl From<ConfigError> for SettingsError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

#[derive(Debug)]
pub struct Settings {
    store: ConfigStore,
    resources: ResourceResolver,
    config: AppConfig,
}

impl Settings {
    /// Reads the config file, falling back to defaults when it is unusable.
    pub fn load(store: ConfigStore, resources: ResourceResolver) -> Self {
        let config = store.load_or_default();
        Self {
            store,
            resources,
            config,
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Stylesheet to apply: the dark theme when enabled and present,
    /// otherwise none.
    pub fn active_stylesheet(&self) -> Option<String> {
        if !self.config.dark_mode {
            return None;
        }
        let sheet = self.resources.read_stylesheet(DARK_THEME_STYLESHEET);
        if sheet.is_none() {
            warn!("event=theme_apply module=settings status=error reason=stylesheet_missing");
        }
        sheet
    }

    /// Flips dark mode. Turning it on fails when the stylesheet is missing,
    /// leaving the config unchanged.
    pub fn toggle_theme(&mut self) -> Result<bool, SettingsError> {
        let dark_mode = !self.config.dark_mode;
        if dark_mode
            && self
                .resources
                .read_stylesheet(DARK_THEME_STYLESHEET)
                .is_none()
        {
            return Err(SettingsError::MissingStylesheet(
                self.resources.resolve(DARK_THEME_STYLESHEET),
            ));
        }
        self.config = self.store.update(|config| config.dark_mode = dark_mode)?;
        info!(
            "event=theme_toggle module=settings status=ok dark_mode={}",
            dark_mode
        );
        Ok(dark_mode)
    }

    pub fn set_minimize_to_tray(&mut self, enabled: bool) -> Result<(), SettingsError> {
        self.config = self
            .store
            .update(|config| config.minimize_to_tray = enabled)?;
        Ok(())
    }

    pub fn set_sidebar_position(&mut self, position: SidebarPosition) -> Result<(), SettingsError> {
        self.config = self
            .store
            .update(|config| config.sidebar_position = position)?;
        Ok(())
    }
}
