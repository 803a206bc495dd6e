use mau_core::markdown::markup::Markup;
use mau_core::markdown::{render_html, render_preview, PREVIEW_CSS};
use mau_core::service::note_pad::{NoteError, NoteMode, NotePad, NoteShelf};

#[test]
fn shelf_creates_project_directory_on_demand() {
    let storage = tempfile::tempdir().unwrap();
    let shelf = NoteShelf::open(storage.path(), "project-1").unwrap();

    assert!(storage.path().join("project-1").is_dir());
    assert!(shelf.list().unwrap().is_empty());
}

#[test]
fn create_appends_extension_and_writes_template() {
    let storage = tempfile::tempdir().unwrap();
    let shelf = NoteShelf::open(storage.path(), "p").unwrap();

    let path = shelf.create("Deploy").unwrap();
    assert!(path.ends_with("Deploy.md"));
    assert_eq!(
        std::fs::read_to_string(&path).unwrap(),
        "# Deploy\n\n Write here..."
    );

    let same = shelf.create("Backlog.md").unwrap();
    assert!(same.ends_with("Backlog.md"));
    assert!(matches!(shelf.create("  "), Err(NoteError::InvalidName(_))));
    assert!(matches!(shelf.create("../x"), Err(NoteError::InvalidName(_))));
}

#[test]
fn list_only_shows_notes_sorted_and_filter_ignores_case() {
    let storage = tempfile::tempdir().unwrap();
    let shelf = NoteShelf::open(storage.path(), "p").unwrap();
    std::fs::write(shelf.dir().join("zeta.txt"), "z").unwrap();
    std::fs::write(shelf.dir().join("Alpha.md"), "a").unwrap();
    std::fs::write(shelf.dir().join("image.png"), "png").unwrap();
    std::fs::create_dir(shelf.dir().join("folder.md")).unwrap();

    assert_eq!(shelf.list().unwrap(), vec!["Alpha.md", "zeta.txt"]);
    assert_eq!(shelf.filter("ALP").unwrap(), vec!["Alpha.md"]);
    assert_eq!(shelf.filter("").unwrap().len(), 2);
}

#[test]
fn open_renders_and_switches_to_preview() {
    let storage = tempfile::tempdir().unwrap();
    let shelf = NoteShelf::open(storage.path(), "p").unwrap();
    shelf.create("todo").unwrap();

    let mut pad = NotePad::new(shelf);
    pad.open("todo.md").unwrap();
    assert_eq!(pad.mode(), NoteMode::Preview);
    assert!(pad.preview_html().starts_with(PREVIEW_CSS));
    assert!(pad.preview_html().contains("<h1>todo</h1>"));
}

#[test]
fn open_missing_note_reports_error_and_keeps_state() {
    let storage = tempfile::tempdir().unwrap();
    let shelf = NoteShelf::open(storage.path(), "p").unwrap();
    let mut pad = NotePad::new(shelf);

    assert!(matches!(pad.open("ghost.md"), Err(NoteError::Io { .. })));
    assert!(pad.current().is_none());
    assert!(matches!(pad.save(), Err(NoteError::NoNoteOpen)));
}

#[test]
fn save_overwrites_and_rerenders_in_preview() {
    let storage = tempfile::tempdir().unwrap();
    let shelf = NoteShelf::open(storage.path(), "p").unwrap();
    let path = shelf.create("log").unwrap();
    let mut pad = NotePad::new(shelf);
    pad.open("log.md").unwrap();

    pad.set_buffer("## Changed");
    pad.save().unwrap();
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "## Changed");
    assert!(pad.preview_html().contains("<h2>Changed</h2>"));
}

#[test]
fn markup_only_applies_in_edit_mode() {
    let storage = tempfile::tempdir().unwrap();
    let shelf = NoteShelf::open(storage.path(), "p").unwrap();
    let mut pad = NotePad::new(shelf);
    pad.set_buffer("hello world");

    assert_eq!(pad.insert_markup(6..11, &Markup::Bold), Some(15));
    assert_eq!(pad.buffer(), "hello **world**");

    assert_eq!(pad.toggle_mode(), NoteMode::Preview);
    assert_eq!(pad.insert_markup(0..0, &Markup::Header), None);
    assert_eq!(pad.buffer(), "hello **world**");

    pad.set_mode(NoteMode::Edit);
    assert_eq!(pad.insert_markup(0..0, &Markup::Link), Some(1));
    assert_eq!(pad.buffer(), "[](url)hello **world**");
}

#[test]
fn rendering_is_deterministic() {
    let source = "# Title\n\n> quote\n\n```rust\nfn main() {}\n```\n\n| k | v |\n|---|---|\n| a | 1 |\n";
    let first = render_preview(source);
    let second = render_preview(source);
    assert_eq!(first, second);
    assert!(first.contains("<blockquote>"));
    assert!(first.contains("<pre><code"));
    assert!(first.contains("<code class=\"language-rust\">"));
    assert!(render_html(source).contains("<table>"));
}
