//! SQLite-backed [`Substrate`]: one row per key in `kv_store`.

use rusqlite::{params, Connection, OptionalExtension};

use super::Substrate;
use crate::error::PersistenceError;

pub struct SqliteSubstrate {
    conn: Connection,
}

impl SqliteSubstrate {
    /// Wrap a connection that already has the schema applied
    /// (see [`crate::db::open_database`]).
    pub fn new(conn: Connection) -> Self {
        Self { conn }
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}

impl Substrate for SqliteSubstrate {
    fn get(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        self.conn
            .query_row(
                "SELECT value FROM kv_store WHERE key = ?1",
                params![key],
                |row| row.get::<_, String>(0),
            )
            .optional()
            .map_err(|e| PersistenceError::Read {
                key: key.to_string(),
                reason: e.to_string(),
            })
    }

    fn set(&self, key: &str, value: &str) -> Result<(), PersistenceError> {
        let now = chrono::Utc::now().to_rfc3339();
        self.conn
            .execute(
                "INSERT INTO kv_store (key, value, updated_at) VALUES (?1, ?2, ?3) \
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
                params![key, value, now],
            )
            .map(|_| ())
            .map_err(|e| PersistenceError::Write {
                key: key.to_string(),
                reason: e.to_string(),
            })
    }
}
