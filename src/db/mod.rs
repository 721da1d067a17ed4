pub mod migrations;
pub mod schema;

use anyhow::{Context, Result};
use rusqlite::{Connection, OptionalExtension};
use std::path::Path;

/// Open (or create) the Almanac database at the given path with schema initialized
/// and migrations applied.
pub fn open_database(path: impl AsRef<Path>) -> Result<Connection> {
    let path = path.as_ref();

    // Ensure parent directory exists
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create directory {}", parent.display()))?;
    }

    let conn = Connection::open(path)
        .with_context(|| format!("failed to open database at {}", path.display()))?;

    conn.pragma_update(None, "journal_mode", "WAL")?;
    conn.pragma_update(None, "busy_timeout", 5000)?;

    schema::init_schema(&conn).context("failed to initialize schema")?;
    migrations::run_migrations(&conn).context("failed to run migrations")?;

    tracing::info!(path = %path.display(), "database initialized");
    Ok(conn)
}

/// Open a fully migrated in-memory database. Nothing survives the connection.
pub fn open_memory_database() -> Result<Connection> {
    let conn = Connection::open_in_memory().context("failed to open in-memory database")?;
    schema::init_schema(&conn).context("failed to initialize schema")?;
    migrations::run_migrations(&conn).context("failed to run migrations")?;
    Ok(conn)
}

/// Result of [`check_database_health`].
#[derive(Debug)]
pub struct HealthReport {
    pub integrity_ok: bool,
    pub integrity_details: String,
    pub schema_version: u32,
    pub key_count: u64,
    /// Size in bytes of the stored knowledge base value, if present.
    pub stored_bytes: Option<u64>,
    /// Number of articles in the stored value, or `None` if absent or unreadable.
    pub stored_articles: Option<usize>,
    pub last_saved: Option<String>,
}

/// Run integrity and content checks against an open database.
///
/// `storage_key` names the key holding the serialized knowledge base.
pub fn check_database_health(conn: &Connection, storage_key: &str) -> Result<HealthReport> {
    let integrity: String = conn.query_row("PRAGMA integrity_check", [], |row| row.get(0))?;
    let schema_version = migrations::get_schema_version(conn)?;
    let key_count: i64 = conn.query_row("SELECT COUNT(*) FROM kv_store", [], |row| row.get(0))?;

    let stored: Option<(String, Option<String>)> = conn
        .query_row(
            "SELECT value, updated_at FROM kv_store WHERE key = ?1",
            [storage_key],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )
        .optional()?;

    let (stored_bytes, stored_articles, last_saved) = match stored {
        Some((value, updated_at)) => {
            let count = serde_json::from_str::<Vec<serde_json::Value>>(&value)
                .ok()
                .map(|items| items.len());
            (Some(value.len() as u64), count, updated_at)
        }
        None => (None, None, None),
    };

    Ok(HealthReport {
        integrity_ok: integrity == "ok",
        integrity_details: integrity,
        schema_version,
        key_count: key_count as u64,
        stored_bytes,
        stored_articles,
        last_saved,
    })
}
