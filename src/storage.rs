//! SQLite storage layer.
//!
//! One key/value table. The roster is stored as a single JSON blob under a
//! fixed key; nothing else is persisted.

use chrono::Utc;
use rusqlite::{Connection, OptionalExtension, params};
use tracing::{debug, warn};

use crate::error::Result;
use crate::roster::Roster;

/// Storage backend. Owns the SQLite connection.
pub struct Storage {
    conn: Connection,
}

impl Storage {
    /// Open or create a database at the given path.
    pub fn open(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let conn = Connection::open(path)?;
        let storage = Self { conn };
        storage.init()?;
        Ok(storage)
    }

    /// Create an in-memory database (for testing).
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let storage = Self { conn };
        storage.init()?;
        Ok(storage)
    }

    fn init(&self) -> Result<()> {
        self.conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS kv (
                key         TEXT PRIMARY KEY,
                value       TEXT NOT NULL,
                updated_at  TEXT NOT NULL
            );
            ",
        )?;
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Raw slot access
    // -----------------------------------------------------------------------

    /// Read the raw value stored under `key`.
    pub fn get(&self, key: &str) -> Result<Option<String>> {
        let value: Option<String> = self
            .conn
            .query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| {
                row.get(0)
            })
            .optional()?;
        Ok(value)
    }

    /// Write `value` under `key`, replacing what was there.
    pub fn put(&self, key: &str, value: &str) -> Result<()> {
        self.conn.execute(
            "INSERT INTO kv (key, value, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
            params![key, value, Utc::now().to_rfc3339()],
        )?;
        Ok(())
    }

    /// Delete the value under `key`. Deleting an absent key is not an error.
    pub fn clear(&self, key: &str) -> Result<()> {
        self.conn
            .execute("DELETE FROM kv WHERE key = ?1", params![key])?;
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Roster
    // -----------------------------------------------------------------------

    /// Save the whole roster under `key`.
    pub fn save_roster(&self, key: &str, roster: &Roster) -> Result<()> {
        let blob = serde_json::to_string(roster)?;
        self.put(key, &blob)?;
        debug!(key, workers = roster.len(), "roster saved");
        Ok(())
    }

    /// Load the roster under `key`. `None` if nothing was saved; an error if
    /// the blob does not parse.
    pub fn load_roster(&self, key: &str) -> Result<Option<Roster>> {
        let Some(blob) = self.get(key)? else {
            return Ok(None);
        };
        let roster: Roster = serde_json::from_str(&blob)?;
        Ok(Some(roster))
    }

    /// Load the roster under `key`, falling back to `default` when the slot is
    /// empty, unreadable, or holds a record with duplicate or exhausted ids.
    pub fn load_roster_or(&self, key: &str, default: Roster) -> Roster {
        match self.load_roster(key) {
            Ok(Some(roster)) if !roster.has_unique_ids() => {
                warn!(key, "stored roster has duplicate ids, using defaults");
                default
            }
            Ok(Some(roster)) if !roster.has_free_id() => {
                warn!(key, "stored roster has no ids left to assign, using defaults");
                default
            }
            Ok(Some(roster)) => roster,
            Ok(None) => {
                debug!(key, "no stored roster, using defaults");
                default
            }
            Err(e) => {
                warn!(key, error = %e, "stored roster is unreadable, using defaults");
                default
            }
        }
    }
}
