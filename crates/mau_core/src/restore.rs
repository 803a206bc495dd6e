//! Data restore from a backup `_internal` folder.
//!
//! # Responsibility
//! - Copy `storage` and `database` from a backup into the data directory.
//! - Render the deferred restore script used when files are still locked.
//!
//! # Invariants
//! - The source folder must be named `_internal`.
//! - A failed restore is not rolled back.

use crate::paths::{DATABASE_DIR_NAME, STORAGE_DIR_NAME};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const BACKUP_DIR_NAME: &str = "_internal";
pub const RESTORED_FOLDERS: [&str; 2] = [STORAGE_DIR_NAME, DATABASE_DIR_NAME];
const REMOVE_ATTEMPTS: u32 = 3;
const REMOVE_RETRY_DELAY: Duration = Duration::from_secs(1);

#[derive(Debug)]
pub enum RestoreError {
    /// Source folder is not named `_internal`.
    WrongSourceName(PathBuf),
    MissingDestination(PathBuf),
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl Display for RestoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::WrongSourceName(path) => write!(
                f,
                "you must select the folder named `{BACKUP_DIR_NAME}`, got `{}`",
                path.display()
            ),
            Self::MissingDestination(path) => {
                write!(f, "destination folder not found: `{}`", path.display())
            }
            Self::Io { path, source } => {
                write!(f, "restore failed at `{}`: {source}", path.display())
            }
        }
    }
}

impl Error for RestoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> RestoreError + '_ {
    move |source| RestoreError::Io {
        path: path.to_path_buf(),
        source,
    }
}

/// Retry policy for removing a destination folder.
#[derive(Debug, Clone, Copy)]
pub struct RestoreOptions {
    pub remove_attempts: u32,
    pub retry_delay: Duration,
}

impl Default for RestoreOptions {
    fn default() -> Self {
        Self {
            remove_attempts: REMOVE_ATTEMPTS,
            retry_delay: REMOVE_RETRY_DELAY,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RestoreReport {
    pub copied: Vec<String>,
    /// Folders absent from the backup; left untouched at the destination.
    pub skipped: Vec<String>,
}

pub fn validate_source(source: &Path) -> Result<(), RestoreError> {
    if source.file_name().and_then(|name| name.to_str()) != Some(BACKUP_DIR_NAME) {
        return Err(RestoreError::WrongSourceName(source.to_path_buf()));
    }
    Ok(())
}

/// Replaces `storage` and `database` under `data_dir` with the backup copies.
pub fn restore_from(
    source: &Path,
    data_dir: &Path,
    options: RestoreOptions,
) -> Result<RestoreReport, RestoreError> {
    validate_source(source)?;
    if !data_dir.is_dir() {
        return Err(RestoreError::MissingDestination(data_dir.to_path_buf()));
    }

    let mut report = RestoreReport::default();
    for folder in RESTORED_FOLDERS {
        let from = source.join(folder);
        let to = data_dir.join(folder);
        if !from.is_dir() {
            warn!(
                "event=restore_copy module=restore status=skipped folder={} reason=missing_in_source",
                folder
            );
            report.skipped.push(folder.to_string());
            continue;
        }
        if to.exists() {
            remove_with_retry(&to, options)?;
        }
        copy_dir_recursive(&from, &to)?;
        info!(
            "event=restore_copy module=restore status=ok folder={} dest={}",
            folder,
            to.display()
        );
        report.copied.push(folder.to_string());
    }
    Ok(report)
}

fn remove_with_retry(path: &Path, options: RestoreOptions) -> Result<(), RestoreError> {
    let attempts = options.remove_attempts.max(1);
    let mut attempt = 1;
    loop {
        match std::fs::remove_dir_all(path) {
            Ok(()) => return Ok(()),
            Err(err) if attempt < attempts => {
                warn!(
                    "event=restore_remove module=restore status=retry attempt={} path={} error={}",
                    attempt,
                    path.display(),
                    err
                );
                attempt += 1;
                std::thread::sleep(options.retry_delay);
            }
            Err(err) => return Err(io_error(path)(err)),
        }
    }
}

/// Copies a directory tree; `to` must not exist yet.
pub fn copy_dir_recursive(from: &Path, to: &Path) -> Result<(), RestoreError> {
    std::fs::create_dir_all(to).map_err(io_error(to))?;
    for entry in std::fs::read_dir(from).map_err(io_error(from))? {
        let entry = entry.map_err(io_error(from))?;
        let source = entry.path();
        let target = to.join(entry.file_name());
        if entry.file_type().map_err(io_error(&source))?.is_dir() {
            copy_dir_recursive(&source, &target)?;
        } else {
            std::fs::copy(&source, &target).map_err(io_error(&source))?;
        }
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptFlavor {
    Batch,
    Shell,
}

impl ScriptFlavor {
    pub fn for_current_os() -> Self {
        if cfg!(windows) {
            Self::Batch
        } else {
            Self::Shell
        }
    }

    pub fn file_name(self) -> &'static str {
        match self {
            Self::Batch => "update_data.bat",
            Self::Shell => "update_data.sh",
        }
    }
}

/// Script that waits for the program to exit, swaps both folders, starts
/// `exe` again and deletes itself.
pub fn render_restore_script(
    flavor: ScriptFlavor,
    source: &Path,
    data_dir: &Path,
    exe: &Path,
) -> String {
    let mut lines = Vec::new();
    match flavor {
        ScriptFlavor::Batch => {
            lines.push("@echo off".to_string());
            lines.push("timeout /t 2 /nobreak > nul".to_string());
            for folder in RESTORED_FOLDERS {
                let src = source.join(folder);
                let dest = data_dir.join(folder);
                lines.push(format!(
                    "if exist \"{0}\" rd /s /q \"{0}\"",
                    dest.display()
                ));
                lines.push(format!(
                    "if exist \"{}\" xcopy \"{}\" \"{}\" /e /i /y",
                    src.display(),
                    src.display(),
                    dest.display()
                ));
            }
            lines.push(format!("start \"\" \"{}\"", exe.display()));
            lines.push("del \"%~f0\"".to_string());
        }
        ScriptFlavor::Shell => {
            lines.push("#!/bin/sh".to_string());
            lines.push("sleep 2".to_string());
            for folder in RESTORED_FOLDERS {
                let src = source.join(folder);
                let dest = data_dir.join(folder);
                lines.push(format!("rm -rf {}", shell_quote(&dest)));
                lines.push(format!(
                    "if [ -d {0} ]; then cp -R {0} {1}; fi",
                    shell_quote(&src),
                    shell_quote(&dest)
                ));
            }
            lines.push(format!("{} &", shell_quote(exe)));
            lines.push("rm -- \"$0\"".to_string());
        }
    }
    let mut script = lines.join(line_ending(flavor));
    script.push_str(line_ending(flavor));
    script
}

/// Single-quoted shell word; embedded quotes become `'\''`.
fn shell_quote(path: &Path) -> String {
    format!("'{}'", path.display().to_string().replace('\'', "'\\''"))
}

fn line_ending(flavor: ScriptFlavor) -> &'static str {
    match flavor {
        ScriptFlavor::Batch => "\r\n",
        ScriptFlavor::Shell => "\n",
    }
}

/// Writes the restore script next to `exe` and returns its path.
pub fn write_restore_script(
    source: &Path,
    data_dir: &Path,
    exe: &Path,
) -> Result<PathBuf, RestoreError> {
    validate_source(source)?;
    let flavor = ScriptFlavor::for_current_os();
    let dir = exe.parent().unwrap_or(data_dir);
    let path = dir.join(flavor.file_name());
    let script = render_restore_script(flavor, source, data_dir, exe);
    std::fs::write(&path, script).map_err(io_error(&path))?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755))
            .map_err(io_error(&path))?;
    }
    info!(
        "event=restore_script module=restore status=ok path={}",
        path.display()
    );
    Ok(path)
}

/// Starts the script detached; the caller should exit right after.
pub fn launch_restore_script(script: &Path) -> Result<(), RestoreError> {
    let mut command = match ScriptFlavor::for_current_os() {
        ScriptFlavor::Batch => {
            let mut command = std::process::Command::new("cmd");
            command.arg("/C").arg(script);
            command
        }
        ScriptFlavor::Shell => {
            let mut command = std::process::Command::new("sh");
            command.arg(script);
            command
        }
    };
    command.spawn().map_err(io_error(script))?;
    Ok(())
}
