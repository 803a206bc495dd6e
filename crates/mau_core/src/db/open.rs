//! Connection bootstrap for the embedded store.
//!
//! # Responsibility
//! - Open the store file (creating its directory) or a scratch in-memory store.
//! - Configure the connection and bring the schema up to date.
//!
//! # Invariants
//! - Returned connections have migrations fully applied.

use super::migrations::apply_migrations;
use super::{DbError, DbResult};
use log::{error, info};
use rusqlite::Connection;
use std::path::Path;
use std::time::{Duration, Instant};

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Where a connection points.
#[derive(Debug, Clone, Copy)]
enum StoreLocation<'a> {
    File(&'a Path),
    Memory,
}

impl StoreLocation<'_> {
    fn label(self) -> &'static str {
        match self {
            Self::File(_) => "file",
            Self::Memory => "memory",
        }
    }
}

/// Opens the store file at `path`, creating its parent directory.
pub fn open_db(path: impl AsRef<Path>) -> DbResult<Connection> {
    open_at(StoreLocation::File(path.as_ref()))
}

/// Opens a throwaway in-memory store; used by tests and dry runs.
pub fn open_db_in_memory() -> DbResult<Connection> {
    open_at(StoreLocation::Memory)
}

fn open_at(location: StoreLocation<'_>) -> DbResult<Connection> {
    let started_at = Instant::now();
    let mode = location.label();
    info!("event=db_open module=db status=start mode={}", mode);

    match connect(location) {
        Ok(conn) => {
            info!(
                "event=db_open module=db status=ok mode={} duration_ms={}",
                mode,
                started_at.elapsed().as_millis()
            );
            Ok(conn)
        }
        Err(err) => {
            error!(
                "event=db_open module=db status=error mode={} duration_ms={} error={}",
                mode,
                started_at.elapsed().as_millis(),
                err
            );
            Err(err)
        }
    }
}

fn connect(location: StoreLocation<'_>) -> DbResult<Connection> {
    let mut conn = match location {
        StoreLocation::File(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent).map_err(|source| DbError::Io {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
            let conn = Connection::open(path)?;
            // `journal_mode` answers with a row, so it cannot go through execute.
            conn.query_row("PRAGMA journal_mode = WAL;", [], |_| Ok(()))?;
            conn
        }
        StoreLocation::Memory => Connection::open_in_memory()?,
    };
    conn.busy_timeout(BUSY_TIMEOUT)?;
    apply_migrations(&mut conn)?;
    Ok(conn)
}
