pub mod ask;
pub mod doctor;
pub mod export;
pub mod import;
pub mod ingest;
pub mod inspect;
pub mod reset;
pub mod search;

use anyhow::Result;

use almanac::config::AlmanacConfig;
use almanac::knowledge::seed::default_articles;
use almanac::knowledge::KnowledgeStore;
use almanac::substrate::SqliteSubstrate;

/// Open the configured database and load the knowledge base from it.
pub fn open_store(config: &AlmanacConfig) -> Result<KnowledgeStore> {
    let db_path = config.resolved_db_path();
    let conn = almanac::db::open_database(&db_path)?;

    Ok(KnowledgeStore::load(
        Box::new(SqliteSubstrate::new(conn)),
        config.storage.storage_key.clone(),
        default_articles(),
    ))
}

/// Print a warning if the last write did not reach the database.
pub fn report_durability(store: &KnowledgeStore) {
    if let Some(err) = store.last_persist_error() {
        eprintln!(
            "Warning: changes to \"{}\" are not saved to disk: {err}",
            store.storage_key()
        );
    }
}

/// First `max` characters of `text`, with an ellipsis if anything was cut.
pub fn preview(text: &str, max: usize) -> String {
    let cut = almanac::extraction::prompt::truncate_chars(text, max);
    if cut.len() < text.len() {
        format!("{cut}...")
    } else {
        cut.to_string()
    }
}
