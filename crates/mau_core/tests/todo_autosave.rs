use mau_core::db::open_db_in_memory;
use mau_core::model::todo::{new_todo_content, NEW_TODO_TITLE};
use mau_core::service::debounce::{Debounce, AUTOSAVE_INTERVAL};
use mau_core::service::todo_board::TodoBoard;
use mau_core::{
    ProjectId, RepoResult, SqliteTodoRepository, Todo, TodoId, TodoPatch, TodoRepository,
};
use std::cell::RefCell;
use std::time::{Duration, Instant};
use uuid::Uuid;

/// Records every update passed to the inner repository.
struct CountingRepo<R> {
    inner: R,
    updates: RefCell<Vec<TodoId>>,
}

impl<R> CountingRepo<R> {
    fn new(inner: R) -> Self {
        Self {
            inner,
            updates: RefCell::new(Vec::new()),
        }
    }

    fn updates(&self) -> Vec<TodoId> {
        self.updates.borrow().clone()
    }
}

impl<R: TodoRepository> TodoRepository for CountingRepo<R> {
    fn create_todo(&self, todo: &Todo) -> RepoResult<TodoId> {
        self.inner.create_todo(todo)
    }

    fn get_todo(&self, id: TodoId) -> RepoResult<Option<Todo>> {
        self.inner.get_todo(id)
    }

    fn list_todos(&self, project_id: ProjectId) -> RepoResult<Vec<Todo>> {
        self.inner.list_todos(project_id)
    }

    fn update_todo(&self, id: TodoId, patch: &TodoPatch) -> RepoResult<()> {
        self.updates.borrow_mut().push(id);
        self.inner.update_todo(id, patch)
    }

    fn delete_todo(&self, id: TodoId) -> RepoResult<()> {
        self.inner.delete_todo(id)
    }
}

fn seed(repo: &impl TodoRepository, project_id: ProjectId, titles: &[&str]) -> Vec<TodoId> {
    titles
        .iter()
        .map(|title| {
            repo.create_todo(&Todo::new(project_id, *title, "☐ item"))
                .unwrap()
        })
        .collect()
}

#[test]
fn save_and_reload_keeps_title_and_content() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTodoRepository::new(&conn);
    let project = Uuid::new_v4();
    let todo = Todo::new(project, "Groceries", "☐ milk\n☑ bread");
    let id = repo.create_todo(&todo).unwrap();

    let loaded = repo.get_todo(id).unwrap().unwrap();
    assert_eq!(loaded.title, "Groceries");
    assert_eq!(loaded.content, "☐ milk\n☑ bread");
    assert_eq!(loaded.project_id, project);
}

#[test]
fn listing_filters_by_project() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTodoRepository::new(&conn);
    let mine = Uuid::new_v4();
    let other = Uuid::new_v4();
    seed(&repo, mine, &["a", "b"]);
    seed(&repo, other, &["orphan"]);

    let titles: Vec<String> = repo
        .list_todos(mine)
        .unwrap()
        .into_iter()
        .map(|todo| todo.title)
        .collect();
    assert_eq!(titles, vec!["a", "b"]);
}

#[test]
fn edits_are_written_once_after_quiet_period() {
    let conn = open_db_in_memory().unwrap();
    let repo = CountingRepo::new(SqliteTodoRepository::new(&conn));
    let project = Uuid::new_v4();
    let ids = seed(&repo, project, &["first"]);

    let mut board = TodoBoard::new(&repo);
    board.set_project(project).unwrap();
    assert_eq!(board.current(), Some(ids[0]));

    let start = Instant::now();
    board.set_title("first (edited)", start);
    board.edit(start + Duration::from_millis(400), |editor| {
        editor.set_caret(editor.len_chars());
        editor.insert_text("\n☐ more");
    });

    assert!(!board.poll(start + Duration::from_millis(1000)).unwrap());
    assert!(board.poll(start + Duration::from_millis(1400)).unwrap());
    assert!(!board.poll(start + Duration::from_millis(3000)).unwrap());
    assert_eq!(repo.updates(), vec![ids[0]]);

    let saved = repo.get_todo(ids[0]).unwrap().unwrap();
    assert_eq!(saved.title, "first (edited)");
    assert_eq!(saved.content, "☐ item\n☐ more");
    assert_eq!(board.items()[0].title, "first (edited)");
}

#[test]
fn switching_todos_flushes_previous_exactly_once() {
    let conn = open_db_in_memory().unwrap();
    let repo = CountingRepo::new(SqliteTodoRepository::new(&conn));
    let project = Uuid::new_v4();
    let ids = seed(&repo, project, &["one", "two"]);

    let mut board = TodoBoard::new(&repo);
    board.set_project(project).unwrap();
    let now = Instant::now();
    board.edit(now, |editor| {
        editor.press(0);
    });
    assert!(board.is_save_pending());

    board.select(ids[1]).unwrap();
    assert_eq!(repo.updates(), vec![ids[0]]);
    assert!(!board.is_save_pending());
    assert_eq!(board.current(), Some(ids[1]));
    assert_eq!(board.editor().text(), "☐ item");
    assert_eq!(repo.get_todo(ids[0]).unwrap().unwrap().content, "☑ item");

    // Nothing pending for the new todo, so switching back writes nothing.
    board.select(ids[0]).unwrap();
    assert_eq!(repo.updates(), vec![ids[0]]);
    assert!(!board.poll(now + AUTOSAVE_INTERVAL * 3).unwrap());
}

#[test]
fn no_timer_without_an_open_todo() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTodoRepository::new(&conn);
    let mut board = TodoBoard::new(&repo);

    let now = Instant::now();
    board.set_title("typed into nothing", now);
    board.edit(now, |editor| editor.insert_text("x"));
    assert!(!board.is_save_pending());
    assert!(!board.poll(now + Duration::from_secs(5)).unwrap());
}

#[test]
fn create_flushes_then_opens_placeholder() {
    let conn = open_db_in_memory().unwrap();
    let repo = CountingRepo::new(SqliteTodoRepository::new(&conn));
    let project = Uuid::new_v4();
    let ids = seed(&repo, project, &["existing"]);

    let mut board = TodoBoard::new(&repo);
    board.set_project(project).unwrap();
    board.set_title("existing!", Instant::now());

    let created = board.create().unwrap().unwrap();
    assert_eq!(repo.updates(), vec![ids[0]]);
    assert_eq!(board.current(), Some(created));
    assert_eq!(board.title(), NEW_TODO_TITLE);
    assert_eq!(board.editor().text(), new_todo_content());
    assert_eq!(board.items().len(), 2);
}

#[test]
fn create_without_project_does_nothing() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTodoRepository::new(&conn);
    let mut board = TodoBoard::new(&repo);

    assert_eq!(board.create().unwrap(), None);
}

#[test]
fn delete_requires_confirmation() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTodoRepository::new(&conn);
    let project = Uuid::new_v4();
    let ids = seed(&repo, project, &["keep", "drop"]);

    let mut board = TodoBoard::new(&repo);
    board.set_project(project).unwrap();
    board.select(ids[1]).unwrap();

    assert!(!board.delete_current(|_| false).unwrap());
    assert_eq!(repo.list_todos(project).unwrap().len(), 2);

    let mut asked_about = String::new();
    assert!(board
        .delete_current(|title| {
            asked_about = title.to_string();
            true
        })
        .unwrap());
    assert_eq!(asked_about, "drop");
    assert!(repo.get_todo(ids[1]).unwrap().is_none());
    assert_eq!(board.items().len(), 1);
    assert_eq!(board.current(), Some(ids[0]));
}

#[test]
fn switching_project_flushes_and_selects_first() {
    let conn = open_db_in_memory().unwrap();
    let repo = CountingRepo::new(SqliteTodoRepository::new(&conn));
    let first_project = Uuid::new_v4();
    let second_project = Uuid::new_v4();
    let first_ids = seed(&repo, first_project, &["a"]);
    let second_ids = seed(&repo, second_project, &["b1", "b2"]);
    let empty_project = Uuid::new_v4();

    let mut board = TodoBoard::with_timer(&repo, Debounce::new(Duration::from_millis(50)));
    board.set_project(first_project).unwrap();
    board.set_title("a2", Instant::now());

    board.set_project(second_project).unwrap();
    assert_eq!(repo.updates(), vec![first_ids[0]]);
    assert_eq!(board.current(), Some(second_ids[0]));
    assert_eq!(board.items().len(), 2);

    board.set_project(empty_project).unwrap();
    assert_eq!(board.current(), None);
    assert!(board.items().is_empty());
    assert_eq!(board.editor().text(), "");
}
