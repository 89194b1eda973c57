//! Embedded SQLite schema migrations.
//!
//! # Responsibility
//! - Bring any database at or below the current schema up to date.
//!
//! # Invariants
//! - Versions are strictly increasing; each migration runs in its own
//!   transaction with `PRAGMA user_version` updated alongside it.
//! - A database from a newer binary is rejected, never rewritten.

use crate::db::{DbError, DbResult};
use rusqlite::Connection;

const MIGRATIONS: &[(u32, &str)] = &[
    (1, include_str!("0001_init.sql")),
    (2, include_str!("0002_retrospectives.sql")),
];

/// Returns the latest migration version known by this binary.
pub fn latest_version() -> u32 {
    MIGRATIONS.last().map_or(0, |(version, _)| *version)
}

/// Applies all pending migrations on the provided connection.
pub fn apply_migrations(conn: &mut Connection) -> DbResult<()> {
    let applied = conn.query_row("PRAGMA user_version;", [], |row| row.get::<_, u32>(0))?;

    if applied > latest_version() {
        return Err(DbError::UnsupportedSchemaVersion {
            db_version: applied,
            latest_supported: latest_version(),
        });
    }

    for &(version, sql) in MIGRATIONS {
        if version <= applied {
            continue;
        }

        let tx = conn.transaction()?;
        tx.execute_batch(sql)?;
        tx.execute_batch(&format!("PRAGMA user_version = {version};"))?;
        tx.commit()?;
    }

    Ok(())
}
