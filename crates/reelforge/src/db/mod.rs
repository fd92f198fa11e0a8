//! Best-effort local persistence.
//!
//! One SQLite file holds the whitelisted state subset (user, current
//! project, videos) as keyed JSON snapshots. Writes are fire-and-forget
//! from the store's perspective: a failure is logged by the caller and
//! never blocks or fails a mutation.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use rusqlite::Connection;

pub mod error;
pub mod migrations;
pub mod snapshot_repo;

pub use error::DatabaseError;

/// Shared handle to the snapshot database.
///
/// Clones are cheap and share one underlying connection guarded by a
/// mutex. The snapshot workload is a handful of rows, so a single
/// serialized connection is plenty; WAL mode keeps readers off the write
/// path for the file-backed variant.
#[derive(Clone)]
pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    /// Opens (or creates) the snapshot database at `path`, creating
    /// missing parent directories and bringing the schema up to date.
    pub fn open(path: &Path) -> Result<Self, DatabaseError> {
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir).map_err(|e| DatabaseError::Io {
                path: dir.to_path_buf(),
                source: e,
            })?;
        }

        let conn = Connection::open(path)?;
        conn.execute_batch("PRAGMA journal_mode=WAL;")?;
        let db = Self::from_connection(conn)?;
        log::info!("Snapshot database ready at {}", path.display());
        Ok(db)
    }

    /// In-memory database for tests. The schema is applied the same way
    /// as for the file-backed variant.
    pub fn open_in_memory() -> Result<Self, DatabaseError> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self, DatabaseError> {
        migrations::run_all(&conn)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Runs `f` with exclusive access to the connection.
    pub fn with_conn<F, T>(&self, f: F) -> Result<T, DatabaseError>
    where
        F: FnOnce(&Connection) -> Result<T, DatabaseError>,
    {
        let guard = self.conn.lock().map_err(|_| DatabaseError::LockPoisoned)?;
        f(&guard)
    }
}

/// Default location of the snapshot file: `~/.reelforge/data/reelforge.db`.
pub fn default_database_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".reelforge").join("data").join("reelforge.db"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_memory_schema_is_ready() {
        let db = Database::open_in_memory().unwrap();
        snapshot_repo::put(&db, "probe", &serde_json::json!({"ok": true})).unwrap();
        assert!(snapshot_repo::get(&db, "probe").unwrap().is_some());
    }

    #[test]
    fn test_file_db_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("snapshots.db");

        {
            let db = Database::open(&path).unwrap();
            snapshot_repo::put(&db, "k", &serde_json::json!(42)).unwrap();
        }

        let reopened = Database::open(&path).unwrap();
        assert_eq!(
            snapshot_repo::get(&reopened, "k").unwrap(),
            Some(serde_json::json!(42))
        );
    }

    #[test]
    fn test_open_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("deeper").join("s.db");
        Database::open(&path).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_clones_share_the_connection() {
        let db = Database::open_in_memory().unwrap();
        let other = db.clone();

        snapshot_repo::put(&db, "shared", &serde_json::json!("yes")).unwrap();
        assert_eq!(
            snapshot_repo::get(&other, "shared").unwrap(),
            Some(serde_json::json!("yes"))
        );
    }

    #[test]
    fn test_default_database_path() {
        let path = default_database_path().unwrap();
        assert!(path.ends_with("data/reelforge.db"));
        assert!(path.to_string_lossy().contains(".reelforge"));
    }
}
