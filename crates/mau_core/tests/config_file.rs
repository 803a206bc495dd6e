use mau_core::paths::{ResourceResolver, DARK_THEME_STYLESHEET};
use mau_core::service::settings::{Settings, SettingsError};
use mau_core::{AppConfig, ConfigError, ConfigStore, SidebarPosition};
use serde_json::Value;

#[test]
fn missing_file_yields_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let store = ConfigStore::new(dir.path().join(".myapp").join("config.json"));

    assert_eq!(store.load().unwrap(), AppConfig::default());
}

#[test]
fn update_merges_and_preserves_unknown_keys() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(&path, r#"{"dark_mode": true, "window": {"w": 800}}"#).unwrap();
    let store = ConfigStore::new(&path);

    store
        .update(|config| config.sidebar_position = SidebarPosition::Right)
        .unwrap();

    let raw: Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(raw["dark_mode"], true);
    assert_eq!(raw["sidebar_position"], 2);
    assert_eq!(raw["minimize_to_tray"], true);
    assert_eq!(raw["window"]["w"], 800);
}

#[test]
fn invalid_json_is_an_error_but_settings_fall_back() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(&path, "{not json").unwrap();
    let store = ConfigStore::new(&path);

    assert!(matches!(store.load(), Err(ConfigError::Parse { .. })));
    let settings = Settings::load(store, ResourceResolver::new(dir.path()));
    assert_eq!(settings.config(), &AppConfig::default());
}

#[test]
fn enabling_dark_theme_requires_stylesheet() {
    let dir = tempfile::tempdir().unwrap();
    let store = ConfigStore::new(dir.path().join("config.json"));
    let mut settings = Settings::load(store.clone(), ResourceResolver::new(dir.path()));

    assert!(matches!(
        settings.toggle_theme(),
        Err(SettingsError::MissingStylesheet(_))
    ));
    assert!(!settings.config().dark_mode);
    assert!(!store.path().exists());

    std::fs::write(dir.path().join(DARK_THEME_STYLESHEET), "QWidget {}").unwrap();
    assert!(settings.toggle_theme().unwrap());
    assert_eq!(settings.active_stylesheet().as_deref(), Some("QWidget {}"));
    assert!(store.load().unwrap().dark_mode);

    assert!(!settings.toggle_theme().unwrap());
    assert_eq!(settings.active_stylesheet(), None);
}

#[test]
fn tray_and_sidebar_changes_are_persisted() {
    let dir = tempfile::tempdir().unwrap();
    let store = ConfigStore::new(dir.path().join("config.json"));
    let mut settings = Settings::load(store.clone(), ResourceResolver::new(dir.path()));

    settings.set_minimize_to_tray(false).unwrap();
    settings.set_sidebar_position(SidebarPosition::Top).unwrap();

    let saved = store.load().unwrap();
    assert!(!saved.minimize_to_tray);
    assert_eq!(saved.sidebar_position, SidebarPosition::Top);
}
