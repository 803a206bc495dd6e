//! Command-line front end for the Mau core.
//!
//! # Responsibility
//! - Drive every panel-level core operation from the terminal.
//! - Keep output plain and line-oriented for scripting.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use log::info;
use mau_core::config::{AppConfig, SidebarPosition};
use mau_core::editor::sentinel::{checklist_progress, leading_sentinel};
use mau_core::markdown::markup::Markup;
use mau_core::paths::{AppPaths, ResourceResolver};
use mau_core::restore::{
    launch_restore_script, restore_from, write_restore_script, RestoreOptions,
};
use mau_core::service::note_pad::{NotePad, NoteShelf};
use mau_core::service::project_desk::{filter_info, ProjectDesk};
use mau_core::service::settings::Settings;
use mau_core::service::todo_board::TodoBoard;
use mau_core::update::{spawn_update_check, UpdateEvent, PROJECT_PAGE_URL, REPO_VERSION_URL};
use mau_core::{
    default_log_level, init_logging, ConfigStore, ProjectId, Shell, TodoId, TodoRepository,
};
use std::path::PathBuf;
use std::time::{Duration, Instant};

#[derive(Parser, Debug)]
#[command(author, version, about = "GNU Mau - projects, notes and to-do lists")]
struct Cli {
    /// Data directory holding `storage/` and `database/`.
    #[arg(long, value_name = "DIR")]
    data_dir: Option<PathBuf>,
    /// Settings file; defaults to `~/.myapp/config.json`.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
    #[arg(long)]
    log_level: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    #[command(subcommand)]
    Project(ProjectCommand),
    #[command(subcommand)]
    Todo(TodoCommand),
    #[command(subcommand)]
    Note(NoteCommand),
    #[command(subcommand)]
    Config(ConfigCommand),
    /// Compares `version.txt` with the published version.
    CheckUpdate {
        #[arg(long, default_value = REPO_VERSION_URL)]
        url: String,
    },
    /// Restores `storage` and `database` from a backup `_internal` folder.
    Restore {
        source: PathBuf,
        /// Write and launch a script that restores after this process exits.
        #[arg(long)]
        deferred: bool,
    },
    About,
}

#[derive(Subcommand, Debug)]
enum ProjectCommand {
    List,
    Add {
        name: String,
        description: String,
    },
    Edit {
        id: ProjectId,
        name: String,
        description: String,
    },
    Icon {
        id: ProjectId,
        path: String,
    },
    /// Shows the info table, or adds an entry when KEY and VALUE are given.
    Info {
        id: ProjectId,
        key: Option<String>,
        value: Option<String>,
        #[arg(long)]
        filter: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
enum TodoCommand {
    List { project: ProjectId },
    Add { project: ProjectId },
    Show { id: TodoId },
    Title { id: TodoId, title: String },
    /// Flips the checkbox leading LINE (1-based).
    Toggle { id: TodoId, line: usize },
    /// Appends a new open task line.
    Task { id: TodoId, text: String },
    Delete {
        id: TodoId,
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Subcommand, Debug)]
enum NoteCommand {
    List {
        project: ProjectId,
        #[arg(long)]
        filter: Option<String>,
    },
    New { project: ProjectId, name: String },
    /// Prints the note rendered as an HTML preview.
    Render { project: ProjectId, name: String },
    /// Appends markup to the end of a note.
    Append {
        project: ProjectId,
        name: String,
        #[arg(value_enum)]
        markup: MarkupKind,
        #[arg(default_value = "")]
        text: String,
    },
    Emoji { query: Option<String> },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum MarkupKind {
    Header,
    Bold,
    Italic,
    List,
    Link,
    Quote,
    Code,
}

impl From<MarkupKind> for Markup {
    fn from(value: MarkupKind) -> Self {
        match value {
            MarkupKind::Header => Markup::Header,
            MarkupKind::Bold => Markup::Bold,
            MarkupKind::Italic => Markup::Italic,
            MarkupKind::List => Markup::List,
            MarkupKind::Link => Markup::Link,
            MarkupKind::Quote => Markup::Quote,
            MarkupKind::Code => Markup::CodeBlock,
        }
    }
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    Show,
    ToggleTheme,
    Tray {
        #[arg(action = clap::ArgAction::Set)]
        enabled: bool,
    },
    /// left, right, top or bottom.
    Sidebar { position: String },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let data_dir = match cli.data_dir.clone() {
        Some(dir) => dir,
        None => AppPaths::default_data_dir().context("cannot locate a data directory")?,
    };
    let data_dir = std::path::absolute(&data_dir)
        .with_context(|| format!("resolving {}", data_dir.display()))?;
    let paths = AppPaths::under(data_dir);

    let level = cli.log_level.as_deref().unwrap_or(default_log_level());
    init_logging(level, &paths.log_dir).context("starting logging")?;
    info!("event=cli_start module=cli status=ok command={:?}", cli.command);

    let resources = ResourceResolver::detect().context("locating resources")?;
    let config_store = match cli.config.clone() {
        Some(path) => ConfigStore::new(path),
        None => ConfigStore::at_default_location()?,
    };

    match cli.command {
        Command::Project(command) => run_project(command, paths, resources),
        Command::Todo(command) => run_todo(command, paths, resources),
        Command::Note(command) => run_note(command, &paths),
        Command::Config(command) => run_config(command, config_store, resources),
        Command::CheckUpdate { url } => check_update(&paths, url),
        Command::Restore { source, deferred } => restore(&source, &paths, deferred),
        Command::About => {
            println!("{}", mau_core::service::about::about_text());
            Ok(())
        }
    }
}

fn run_project(
    command: ProjectCommand,
    paths: AppPaths,
    resources: ResourceResolver,
) -> Result<()> {
    let shell = Shell::open(paths, resources)?;
    let mut desk = ProjectDesk::new(shell.projects());
    match command {
        ProjectCommand::List => {
            for entry in desk.sidebar()? {
                println!("{}\t{}\t{}", entry.id, entry.label, entry.icon_path);
            }
        }
        ProjectCommand::Add { name, description } => match desk.save(&name, &description)? {
            Some(project) => println!("{}", project.id),
            None => bail!("name and description are both required"),
        },
        ProjectCommand::Edit {
            id,
            name,
            description,
        } => {
            desk.open(id)?;
            if desk.save(&name, &description)?.is_none() {
                bail!("name and description are both required");
            }
        }
        ProjectCommand::Icon { id, path } => {
            desk.open(id)?;
            desk.change_icon(&path)?;
            println!("{}", shell.resources().icon_or_placeholder(&path).display());
        }
        ProjectCommand::Info {
            id,
            key,
            value,
            filter,
        } => {
            desk.open(id)?;
            if let (Some(key), Some(value)) = (key, value) {
                if !desk.add_info(&key, &value)? {
                    bail!("key and value must not be empty");
                }
            }
            let project = desk.current().context("project not loaded")?;
            for (key, value) in filter_info(&project.info, filter.as_deref().unwrap_or("")) {
                println!("{key}\t{value}");
            }
        }
    }
    Ok(())
}

fn run_todo(command: TodoCommand, paths: AppPaths, resources: ResourceResolver) -> Result<()> {
    let shell = Shell::open(paths, resources)?;
    let repo = shell.todos();
    let mut board = TodoBoard::new(&repo);

    match command {
        TodoCommand::List { project } => {
            board.set_project(project)?;
            for item in board.items() {
                println!("{}\t{}", item.id, item.title);
            }
        }
        TodoCommand::Add { project } => {
            board.set_project(project)?;
            if let Some(id) = board.create()? {
                println!("{id}");
            }
        }
        TodoCommand::Show { id } => {
            let todo = repo.get_todo(id)?.context("todo not found")?;
            let progress = checklist_progress(&todo.content);
            println!("# {} ({}/{})", todo.title, progress.done, progress.total);
            println!("{}", todo.content);
        }
        TodoCommand::Title { id, title } => {
            open_todo(&mut board, id)?;
            board.set_title(title, Instant::now());
            board.flush()?;
        }
        TodoCommand::Toggle { id, line } => {
            open_todo(&mut board, id)?;
            let index = line.checked_sub(1).context("lines are numbered from 1")?;
            let text = board.editor().line_text(index);
            let (column, _) = leading_sentinel(&text).context("line has no checkbox")?;
            let offset = board.editor().line_start(index) + column;
            board.edit(Instant::now(), |editor| editor.press(offset));
            board.flush()?;
            println!("{}", board.editor().line_text(index));
        }
        TodoCommand::Task { id, text } => {
            open_todo(&mut board, id)?;
            board.edit(Instant::now(), |editor| {
                editor.set_caret(editor.len_chars());
                editor.insert_task_at_caret();
                editor.insert_text(&text);
            });
            board.flush()?;
        }
        TodoCommand::Delete { id, yes } => {
            open_todo(&mut board, id)?;
            if !board.delete_current(|_| yes)? {
                bail!("refusing to delete without --yes");
            }
        }
    }
    Ok(())
}

fn open_todo<R: TodoRepository>(board: &mut TodoBoard<R>, id: TodoId) -> Result<()> {
    let todo = board.repo().get_todo(id)?.context("todo not found")?;
    board.set_project(todo.project_id)?;
    board.select(id)?;
    Ok(())
}

fn run_note(command: NoteCommand, paths: &AppPaths) -> Result<()> {
    let shelf_for = |project: ProjectId| NoteShelf::open(&paths.storage_dir, &project.to_string());
    match command {
        NoteCommand::List { project, filter } => {
            let shelf = shelf_for(project)?;
            let names = match filter {
                Some(query) => shelf.filter(&query)?,
                None => shelf.list()?,
            };
            for name in names {
                println!("{name}");
            }
        }
        NoteCommand::New { project, name } => {
            println!("{}", shelf_for(project)?.create(&name)?.display());
        }
        NoteCommand::Render { project, name } => {
            let mut pad = NotePad::new(shelf_for(project)?);
            pad.open(&name)?;
            println!("{}", pad.preview_html());
        }
        NoteCommand::Append {
            project,
            name,
            markup,
            text,
        } => {
            let mut pad = NotePad::new(shelf_for(project)?);
            pad.open(&name)?;
            pad.toggle_mode();
            let mut buffer = pad.buffer().to_string();
            if !buffer.ends_with('\n') {
                buffer.push('\n');
            }
            let start = buffer.chars().count();
            buffer.push_str(&text);
            let end = buffer.chars().count();
            pad.set_buffer(buffer);
            pad.insert_markup(start..end, &Markup::from(markup));
            pad.save()?;
        }
        NoteCommand::Emoji { query } => {
            for (glyph, keywords) in mau_core::emoji::search(query.as_deref().unwrap_or("")) {
                println!("{glyph}\t{keywords}");
            }
        }
    }
    Ok(())
}

fn run_config(
    command: ConfigCommand,
    store: ConfigStore,
    resources: ResourceResolver,
) -> Result<()> {
    let mut settings = Settings::load(store, resources);
    match command {
        ConfigCommand::Show => print_config(settings.config()),
        ConfigCommand::ToggleTheme => {
            let dark = settings.toggle_theme()?;
            println!("{}", if dark { "Dark Theme" } else { "Light Theme" });
        }
        ConfigCommand::Tray { enabled } => settings.set_minimize_to_tray(enabled)?,
        ConfigCommand::Sidebar { position } => {
            let position = SidebarPosition::from_label(&position)
                .with_context(|| format!("unknown sidebar position `{position}`"))?;
            settings.set_sidebar_position(position)?;
        }
    }
    Ok(())
}

fn print_config(config: &AppConfig) {
    println!("dark_mode={}", config.dark_mode);
    println!("minimize_to_tray={}", config.minimize_to_tray);
    println!("sidebar_position={}", config.sidebar_position.label());
}

fn check_update(paths: &AppPaths, url: String) -> Result<()> {
    let events = spawn_update_check(&paths.version_file, url);
    match events.recv_timeout(Duration::from_secs(30))? {
        UpdateEvent::Checked(status) if status.available => {
            println!(
                "Version {} available (current: {}). Download: {PROJECT_PAGE_URL}",
                status.remote, status.local
            );
        }
        UpdateEvent::Checked(status) => println!("You're up to date ({}).", status.local),
        UpdateEvent::Failed(message) => bail!(message),
    }
    Ok(())
}

fn restore(source: &std::path::Path, paths: &AppPaths, deferred: bool) -> Result<()> {
    if deferred {
        let exe = std::env::current_exe().context("locating the executable")?;
        let script = write_restore_script(source, &paths.data_dir, &exe)?;
        launch_restore_script(&script)?;
        println!("restore scheduled via {}", script.display());
        return Ok(());
    }
    let report = restore_from(source, &paths.data_dir, RestoreOptions::default())?;
    for folder in &report.copied {
        println!("restored {folder}");
    }
    for folder in &report.skipped {
        println!("warning: `{folder}` not found in backup, skipped");
    }
    Ok(())
}
