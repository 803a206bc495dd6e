use mau_core::config::{AppConfig, CloseAction};
use mau_core::db::open_db_in_memory;
use mau_core::paths::{AppPaths, ResourceResolver};
use mau_core::shell::{DEMO_PROJECT_DESCRIPTION, DEMO_PROJECT_NAME};
use mau_core::{Project, ProjectRepository, Shell, ShellError, TodoRepository};
use std::time::Instant;
use uuid::Uuid;

fn open_shell(data: &std::path::Path) -> Shell {
    let paths = AppPaths::under(data);
    paths.ensure_dirs().unwrap();
    Shell::with_connection(
        open_db_in_memory().unwrap(),
        paths,
        ResourceResolver::new(data),
    )
    .unwrap()
}

#[test]
fn empty_store_is_seeded_with_demo_project() {
    let data = tempfile::tempdir().unwrap();
    let shell = open_shell(data.path());

    let projects = shell.projects().list_projects().unwrap();
    assert_eq!(projects.len(), 1);
    assert_eq!(projects[0].name, DEMO_PROJECT_NAME);
    assert_eq!(projects[0].description, DEMO_PROJECT_DESCRIPTION);
    assert_eq!(shell.current_project(), Some(projects[0].id));
    assert!(shell
        .paths()
        .project_notes_dir(&projects[0].id.to_string())
        .is_dir());
}

#[test]
fn unwritable_storage_does_not_block_startup() {
    let data = tempfile::tempdir().unwrap();
    let paths = AppPaths::under(data.path());
    std::fs::write(&paths.storage_dir, b"not a directory").unwrap();

    let shell = Shell::with_connection(
        open_db_in_memory().unwrap(),
        paths,
        ResourceResolver::new(data.path()),
    )
    .unwrap();

    assert_eq!(shell.projects().count_projects().unwrap(), 1);
    assert!(shell.current_project().is_some());
}

#[test]
fn open_creates_layout_and_reopens_without_reseeding() {
    let data = tempfile::tempdir().unwrap();
    let paths = AppPaths::under(data.path());

    let first = Shell::open(paths.clone(), ResourceResolver::new(data.path())).unwrap();
    assert!(paths.database_file.exists());
    drop(first);

    let second = Shell::open(paths, ResourceResolver::new(data.path())).unwrap();
    assert_eq!(second.projects().count_projects().unwrap(), 1);
}

#[test]
fn workspace_wires_board_and_notes_to_selected_project() {
    let data = tempfile::tempdir().unwrap();
    let mut shell = open_shell(data.path());
    let project = Project::new("Infra", "Cluster notes");
    shell.projects().create_project(&project).unwrap();

    shell.select_project(project.id).unwrap();
    let mut workspace = shell.workspace().unwrap().unwrap();
    assert_eq!(workspace.project.name, "Infra");
    assert!(workspace.board.items().is_empty());

    let todo_id = workspace.board.create().unwrap().unwrap();
    workspace.board.set_title("Rotate keys", Instant::now());
    workspace.board.flush().unwrap();
    workspace.notes.shelf().create("runbook").unwrap();

    let saved = shell.todos().get_todo(todo_id).unwrap().unwrap();
    assert_eq!(saved.project_id, project.id);
    assert_eq!(saved.title, "Rotate keys");
    assert!(data
        .path()
        .join("storage")
        .join(project.id.to_string())
        .join("runbook.md")
        .exists());
}

#[test]
fn selecting_unknown_project_fails() {
    let data = tempfile::tempdir().unwrap();
    let mut shell = open_shell(data.path());
    let before = shell.current_project();

    assert!(matches!(
        shell.select_project(Uuid::new_v4()),
        Err(ShellError::Repo(_))
    ));
    assert_eq!(shell.current_project(), before);
}

#[test]
fn close_minimizes_only_when_enabled_and_tray_present() {
    let data = tempfile::tempdir().unwrap();
    let shell = open_shell(data.path());
    let mut config = AppConfig::default();

    assert_eq!(shell.close_action(&config, true), CloseAction::MinimizeToTray);
    assert_eq!(shell.close_action(&config, false), CloseAction::Quit);
    config.minimize_to_tray = false;
    assert_eq!(shell.close_action(&config, true), CloseAction::Quit);
}
