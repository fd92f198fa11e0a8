//! Snapshot repository — keyed JSON values for the persisted state subset.
//!
//! Only the whitelisted fields (user, current project, videos) ever land
//! here; jobs, notifications, and UI state are never persisted.

use chrono::Utc;
use rusqlite::params;
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::{Database, DatabaseError};

pub const KEY_USER: &str = "user";
pub const KEY_PROJECT: &str = "current_project";
pub const KEY_VIDEOS: &str = "videos";

/// Upserts the JSON value stored under `key`.
pub fn put(db: &Database, key: &str, value: &serde_json::Value) -> Result<(), DatabaseError> {
    let now = Utc::now().to_rfc3339();
    db.with_conn(|conn| {
        conn.execute(
            "INSERT INTO snapshots (key, value, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET value=?2, updated_at=?3",
            params![key, value.to_string(), now],
        )?;
        Ok(())
    })
}

/// Fetches the JSON value stored under `key`.
pub fn get(db: &Database, key: &str) -> Result<Option<serde_json::Value>, DatabaseError> {
    db.with_conn(|conn| {
        let mut stmt = conn.prepare("SELECT value FROM snapshots WHERE key = ?1")?;
        let mut rows = stmt.query_map(params![key], |row| row.get::<_, String>(0))?;
        match rows.next() {
            Some(Ok(raw)) => {
                let value =
                    serde_json::from_str(&raw).map_err(|e| DatabaseError::Decode {
                        key: key.to_string(),
                        source: e,
                    })?;
                Ok(Some(value))
            }
            Some(Err(e)) => Err(DatabaseError::Sqlite(e)),
            None => Ok(None),
        }
    })
}

/// Serializes and stores a typed value under `key`.
pub fn put_typed<T: Serialize>(db: &Database, key: &str, value: &T) -> Result<(), DatabaseError> {
    let json = serde_json::to_value(value).map_err(|e| DatabaseError::Encode {
        key: key.to_string(),
        source: e,
    })?;
    put(db, key, &json)
}

/// Fetches and deserializes a typed value stored under `key`.
pub fn get_typed<T: DeserializeOwned>(
    db: &Database,
    key: &str,
) -> Result<Option<T>, DatabaseError> {
    match get(db, key)? {
        Some(value) => {
            let typed = serde_json::from_value(value).map_err(|e| DatabaseError::Decode {
                key: key.to_string(),
                source: e,
            })?;
            Ok(Some(typed))
        }
        None => Ok(None),
    }
}

/// Deletes the value stored under `key`.
pub fn delete(db: &Database, key: &str) -> Result<(), DatabaseError> {
    db.with_conn(|conn| {
        conn.execute("DELETE FROM snapshots WHERE key = ?1", params![key])?;
        Ok(())
    })
}

/// Removes every stored snapshot.
pub fn clear(db: &Database) -> Result<(), DatabaseError> {
    db.with_conn(|conn| {
        conn.execute("DELETE FROM snapshots", [])?;
        Ok(())
    })
}
