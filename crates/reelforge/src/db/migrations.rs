//! Schema migrations for the snapshot database.
//!
//! Each migration is applied once; a row in `_migrations` records it.

use rusqlite::Connection;

use super::error::DatabaseError;

/// Ordered (version, description, sql) triples. Versions are contiguous
/// and start at 1.
const MIGRATIONS: &[(u32, &str, &str)] = &[(
    1,
    "create_snapshots",
    include_str!("sql/001_create_snapshots.sql"),
)];

/// Brings the schema up to date, applying every migration newer than the
/// recorded version.
pub fn run_all(conn: &Connection) -> Result<(), DatabaseError> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS _migrations (
            version     INTEGER PRIMARY KEY,
            description TEXT NOT NULL,
            applied_at  TEXT NOT NULL DEFAULT (datetime('now'))
        );",
    )?;

    let applied: u32 = conn.query_row(
        "SELECT COALESCE(MAX(version), 0) FROM _migrations",
        [],
        |row| row.get(0),
    )?;

    for (version, description, sql) in MIGRATIONS.iter().filter(|(v, _, _)| *v > applied) {
        log::info!("Applying schema migration v{}: {}", version, description);

        conn.execute_batch(sql).map_err(|e| DatabaseError::Migration {
            version: *version,
            reason: e.to_string(),
        })?;
        conn.execute(
            "INSERT INTO _migrations (version, description) VALUES (?1, ?2)",
            rusqlite::params![version, description],
        )?;
    }

    Ok(())
}
