//! Embedded schema migrations.
//!
//! # Invariants
//! - Versions start at 1 and increase by one.
//! - Each step runs in its own transaction together with its
//!   `PRAGMA user_version` bump, so a failed step leaves earlier ones applied.

use crate::db::{DbError, DbResult};
use log::info;
use rusqlite::Connection;

/// `(version, sql)` in application order.
const STEPS: &[(u32, &str)] = &[(1, include_str!("0001_init.sql"))];

/// Schema version this binary writes.
pub fn latest_version() -> u32 {
    STEPS.last().map_or(0, |(version, _)| *version)
}

/// Schema version recorded in the store.
pub fn schema_version(conn: &Connection) -> DbResult<u32> {
    Ok(conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?)
}

/// Brings `conn` up to [`latest_version`]; refuses stores written by a newer
/// binary.
pub fn apply_migrations(conn: &mut Connection) -> DbResult<()> {
    let found = schema_version(conn)?;
    let latest = latest_version();
    if found > latest {
        return Err(DbError::UnsupportedSchemaVersion {
            db_version: found,
            latest_supported: latest,
        });
    }

    for (version, sql) in STEPS.iter().filter(|(version, _)| *version > found) {
        let tx = conn.transaction()?;
        tx.execute_batch(sql)?;
        tx.pragma_update(None, "user_version", version)?;
        tx.commit()?;
        info!(
            "event=db_migrate module=db status=ok to_version={}",
            version
        );
    }
    Ok(())
}
