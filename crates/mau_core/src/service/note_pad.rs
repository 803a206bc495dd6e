//! Per-project markdown notes stored as plain files.
//!
//! # Responsibility
//! - Manage the note directory of one project (list, filter, create).
//! - Hold the open note's buffer and its edit/preview mode.
//! - Render previews through [`crate::markdown`].
//!
//! # Invariants
//! - A note's identity is its path; notes are never renamed or deleted.
//! - Saving overwrites the whole file.
//! - Markup insertion is ignored while previewing.

use crate::markdown::markup::{apply_markup, Markup};
use crate::markdown::render_preview;
use log::{error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::ops::Range;
use std::path::{Path, PathBuf};

const NOTE_EXTENSIONS: [&str; 2] = ["md", "txt"];
const NEW_NOTE_EXTENSION: &str = ".md";

#[derive(Debug)]
pub enum NoteError {
    /// Empty or path-like file name.
    InvalidName(String),
    NoNoteOpen,
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl Display for NoteError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidName(name) => write!(f, "invalid note name `{name}`"),
            Self::NoNoteOpen => write!(f, "no note is open"),
            Self::Io { path, source } => {
                write!(f, "note file `{}` failed: {source}", path.display())
            }
        }
    }
}

impl Error for NoteError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

pub type NoteResult<T> = Result<T, NoteError>;

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> NoteError + '_ {
    move |source| NoteError::Io {
        path: path.to_path_buf(),
        source,
    }
}

/// Body written into a new note called `file_name`.
pub fn note_template(file_name: &str) -> String {
    let stem = file_name
        .strip_suffix(NEW_NOTE_EXTENSION)
        .unwrap_or(file_name);
    format!("# {stem}\n\n Write here...")
}

/// Directory holding one project's notes.
#[derive(Debug, Clone)]
pub struct NoteShelf {
    dir: PathBuf,
}

impl NoteShelf {
    /// Opens `<storage_dir>/<project_id>`, creating it on demand.
    pub fn open(storage_dir: &Path, project_id: &str) -> NoteResult<Self> {
        let dir = storage_dir.join(project_id);
        std::fs::create_dir_all(&dir).map_err(io_error(&dir))?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File names of every `.md`/`.txt` note, sorted.
    pub fn list(&self) -> NoteResult<Vec<String>> {
        let mut names = Vec::new();
        for entry in std::fs::read_dir(&self.dir).map_err(io_error(&self.dir))? {
            let entry = entry.map_err(io_error(&self.dir))?;
            let path = entry.path();
            let is_note = path
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| NOTE_EXTENSIONS.contains(&ext));
            if path.is_file() && is_note {
                if let Some(name) = path.file_name().and_then(|name| name.to_str()) {
                    names.push(name.to_string());
                }
            }
        }
        names.sort();
        Ok(names)
    }

    /// Case-insensitive substring filter over [`NoteShelf::list`].
    pub fn filter(&self, query: &str) -> NoteResult<Vec<String>> {
        let needle = query.to_lowercase();
        Ok(self
            .list()?
            .into_iter()
            .filter(|name| name.to_lowercase().contains(&needle))
            .collect())
    }

    /// Writes a templated note; `.md` is appended when missing. An existing
    /// file of the same name is overwritten.
    pub fn create(&self, name: &str) -> NoteResult<PathBuf> {
        let trimmed = name.trim();
        if trimmed.is_empty() || trimmed.contains(['/', '\\']) || trimmed == ".." {
            return Err(NoteError::InvalidName(name.to_string()));
        }
        let file_name = if trimmed.ends_with(NEW_NOTE_EXTENSION) {
            trimmed.to_string()
        } else {
            format!("{trimmed}{NEW_NOTE_EXTENSION}")
        };
        let path = self.dir.join(&file_name);
        std::fs::write(&path, note_template(&file_name)).map_err(io_error(&path))?;
        info!(
            "event=note_create module=note_pad status=ok path={}",
            path.display()
        );
        Ok(path)
    }

    pub fn path_of(&self, file_name: &str) -> PathBuf {
        self.dir.join(file_name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteMode {
    Edit,
    Preview,
}

/// The note panel: shelf, open note and view mode.
#[derive(Debug)]
pub struct NotePad {
    shelf: NoteShelf,
    current: Option<PathBuf>,
    buffer: String,
    mode: NoteMode,
    preview_html: String,
}

impl NotePad {
    pub fn new(shelf: NoteShelf) -> Self {
        Self {
            shelf,
            current: None,
            buffer: String::new(),
            mode: NoteMode::Edit,
            preview_html: String::new(),
        }
    }

    pub fn shelf(&self) -> &NoteShelf {
        &self.shelf
    }

    pub fn current(&self) -> Option<&Path> {
        self.current.as_deref()
    }

    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    pub fn mode(&self) -> NoteMode {
        self.mode
    }

    pub fn preview_html(&self) -> &str {
        &self.preview_html
    }

    /// Loads `file_name`, renders it and switches to preview.
    pub fn open(&mut self, file_name: &str) -> NoteResult<()> {
        let path = self.shelf.path_of(file_name);
        let content = std::fs::read_to_string(&path).map_err(|source| {
            error!(
                "event=note_open module=note_pad status=error path={} error={}",
                path.display(),
                source
            );
            NoteError::Io {
                path: path.clone(),
                source,
            }
        })?;
        self.current = Some(path);
        self.buffer = content;
        self.set_mode(NoteMode::Preview);
        Ok(())
    }

    /// Overwrites the open note with the buffer; re-renders when previewing.
    pub fn save(&mut self) -> NoteResult<()> {
        let path = self.current.as_ref().ok_or(NoteError::NoNoteOpen)?;
        std::fs::write(path, &self.buffer).map_err(io_error(path))?;
        info!(
            "event=note_save module=note_pad status=ok path={}",
            path.display()
        );
        if self.mode == NoteMode::Preview {
            self.render();
        }
        Ok(())
    }

    pub fn set_buffer(&mut self, text: impl Into<String>) {
        self.buffer = text.into();
    }

    /// Entering preview renders the buffer.
    pub fn set_mode(&mut self, mode: NoteMode) {
        self.mode = mode;
        if mode == NoteMode::Preview {
            self.render();
        }
    }

    pub fn toggle_mode(&mut self) -> NoteMode {
        let next = match self.mode {
            NoteMode::Edit => NoteMode::Preview,
            NoteMode::Preview => NoteMode::Edit,
        };
        self.set_mode(next);
        next
    }

    /// Inserts `markup` around `selection` (char offsets) and returns the new
    /// caret. `None` while previewing.
    pub fn insert_markup(&mut self, selection: Range<usize>, markup: &Markup) -> Option<usize> {
        if self.mode != NoteMode::Edit {
            return None;
        }
        let edit = apply_markup(&self.buffer, selection, markup);
        self.buffer = edit.text;
        Some(edit.caret)
    }

    fn render(&mut self) {
        self.preview_html = render_preview(&self.buffer);
    }
}
