mod helpers;

use std::collections::HashSet;

use almanac::db;
use almanac::knowledge::seed::default_articles;
use almanac::knowledge::types::Article;
use almanac::knowledge::KnowledgeStore;
use almanac::substrate::{MemorySubstrate, SqliteSubstrate};
use helpers::{ids, seeded_store, store_with_raw, KEY};
use tempfile::TempDir;

#[test]
fn absent_key_loads_seed_articles_without_writing() {
    let (store, substrate) = seeded_store();

    assert_eq!(ids(store.articles()), vec!["feat-001", "policy-002", "setup-003"]);
    assert_eq!(substrate.write_count(), 0);
    assert!(substrate.raw(KEY).is_none());
}

#[test]
fn malformed_value_falls_back_to_seed() {
    let (store, _) = store_with_raw("{this is not json");
    assert_eq!(store.get_all(), default_articles());
}

#[test]
fn non_array_value_falls_back_to_seed() {
    let (store, _) = store_with_raw(r#"{"id":"x"}"#);
    assert_eq!(store.len(), 3);
}

#[test]
fn unreadable_substrate_falls_back_to_seed() {
    let substrate = MemorySubstrate::with_value(KEY, "[]");
    substrate.set_fail_reads(true);

    let store = KnowledgeStore::load(Box::new(substrate), KEY, default_articles());
    assert_eq!(store.len(), 3);
}

#[test]
fn stored_empty_array_is_respected() {
    let (store, _) = store_with_raw("[]");
    assert!(store.is_empty());
}

#[test]
fn append_persists_whole_collection() {
    let (mut store, substrate) = seeded_store();

    let article = Article::new("Warranty", "Two years.", vec!["warranty".into()]);
    store.append(article.clone());

    assert_eq!(store.len(), 4);
    assert_eq!(substrate.write_count(), 1);

    let saved: Vec<Article> = serde_json::from_str(&substrate.raw(KEY).unwrap()).unwrap();
    assert_eq!(saved.len(), 4);
    assert_eq!(saved.last(), Some(&article));
}

#[test]
fn appended_ids_stay_unique() {
    let (mut store, _) = seeded_store();
    for i in 0..50 {
        store.append(Article::new(format!("Doc {i}"), "body", vec![]));
    }

    let unique: HashSet<&str> = store.articles().iter().map(|a| a.id.as_str()).collect();
    assert_eq!(unique.len(), store.len());
}

#[test]
fn failed_write_keeps_in_memory_state() {
    let (mut store, substrate) = seeded_store();
    substrate.set_fail_writes(true);

    assert!(!store.append(Article::new("Offline", "Not saved.", vec!["offline".into()])));

    assert_eq!(store.len(), 4);
    assert!(store.last_persist_error().is_some());
    assert!(substrate.raw(KEY).is_none());

    // Next successful write clears the error and catches up
    substrate.set_fail_writes(false);
    assert!(store.persist());
    assert!(store.last_persist_error().is_none());
    let saved: Vec<Article> = serde_json::from_str(&substrate.raw(KEY).unwrap()).unwrap();
    assert_eq!(saved.len(), 4);
}

#[test]
fn get_returns_article_by_id() {
    let (store, _) = seeded_store();
    assert_eq!(store.get("policy-002").unwrap().title, "Return Policy");
    assert!(store.get("missing").is_none());
}

#[test]
fn sqlite_store_survives_reopen() {
    let tmp = TempDir::new().unwrap();
    let db_path = tmp.path().join("knowledge.db");

    let added = {
        let conn = db::open_database(&db_path).unwrap();
        let mut store =
            KnowledgeStore::load(Box::new(SqliteSubstrate::new(conn)), KEY, default_articles());
        let article = Article::new("Shipping", "Ships in 2 days.", vec!["shipping".into()]);
        store.append(article.clone());
        article
    };

    let conn = db::open_database(&db_path).unwrap();
    let store = KnowledgeStore::load(Box::new(SqliteSubstrate::new(conn)), KEY, default_articles());

    assert_eq!(store.len(), 4);
    assert_eq!(store.get(&added.id), Some(added));
    assert_eq!(ids(&store.articles()[..3]), vec!["feat-001", "policy-002", "setup-003"]);
}
