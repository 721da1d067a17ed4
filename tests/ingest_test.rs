mod helpers;

use almanac::error::ModelError;
use almanac::extraction::prompt::build_extraction_prompt;
use almanac::knowledge::ingest::ingest;
use almanac::knowledge::lock_store;
use almanac::knowledge::search::search;
use helpers::{shared_store, FakeExtractor, KEY};

const MAX_CHARS: usize = 20_000;
const GOOD_REPLY: &str = r#"{"title":"X","content":"Y","keywords":["x","y"]}"#;

#[tokio::test]
async fn successful_extraction_appends_one_article() {
    let (store, substrate) = shared_store();
    let extractor = FakeExtractor::replying(GOOD_REPLY);

    let article = ingest(&store, &extractor, "notes.txt", "some raw text", MAX_CHARS)
        .await
        .unwrap()
        .article;

    assert_eq!(article.title, "X");
    assert_eq!(article.content, "Y");
    assert_eq!(article.keywords, vec!["x", "y"]);
    assert!(article.id.starts_with("doc-"));

    let store = lock_store(&store);
    assert_eq!(store.len(), 4);
    assert_eq!(store.articles().last(), Some(&article));
    assert_eq!(substrate.write_count(), 1);
    assert!(substrate.raw(KEY).unwrap().contains(&article.id));
}

#[tokio::test]
async fn extractor_sees_source_name_and_text() {
    let (store, _) = shared_store();
    let extractor = FakeExtractor::replying(GOOD_REPLY);

    ingest(&store, &extractor, "manual.md", "hello", MAX_CHARS).await.unwrap();

    let calls = extractor.calls.lock().unwrap();
    assert_eq!(calls.as_slice(), &[("manual.md".to_string(), "hello".to_string())]);
}

#[tokio::test]
async fn extractor_receives_capped_prefix_of_long_documents() {
    let (store, _) = shared_store();
    let extractor = FakeExtractor::replying(GOOD_REPLY);
    let long = format!("{}{}", "a".repeat(MAX_CHARS), "b".repeat(30_000));

    ingest(&store, &extractor, "big.txt", &long, MAX_CHARS).await.unwrap();

    let calls = extractor.calls.lock().unwrap();
    let sent = &calls[0].1;
    assert_eq!(sent.chars().count(), MAX_CHARS);
    assert!(!sent.contains('b'));
}

#[tokio::test]
async fn cap_counts_characters_not_bytes() {
    let (store, _) = shared_store();
    let extractor = FakeExtractor::replying(GOOD_REPLY);
    let text = "é".repeat(50);

    ingest(&store, &extractor, "accents.txt", &text, 10).await.unwrap();

    let calls = extractor.calls.lock().unwrap();
    assert_eq!(calls[0].1, "é".repeat(10));
}

#[tokio::test]
async fn failed_write_is_reported_but_article_kept() {
    let (store, substrate) = shared_store();
    substrate.set_fail_writes(true);
    let extractor = FakeExtractor::replying(GOOD_REPLY);

    let ingested = ingest(&store, &extractor, "notes.txt", "text", MAX_CHARS).await.unwrap();

    assert!(!ingested.saved);
    assert_eq!(lock_store(&store).len(), 4);

    substrate.set_fail_writes(false);
    let ingested = ingest(&store, &extractor, "notes.txt", "text", MAX_CHARS).await.unwrap();
    assert!(ingested.saved);
}

#[tokio::test]
async fn non_json_reply_is_extraction_error_and_store_unchanged() {
    let (store, substrate) = shared_store();
    let extractor = FakeExtractor::replying("I'm sorry, I can't summarize that.");

    let err = ingest(&store, &extractor, "notes.txt", "text", MAX_CHARS).await.unwrap_err();

    assert!(matches!(err, ModelError::Extraction(_)));
    assert_eq!(lock_store(&store).len(), 3);
    assert_eq!(substrate.write_count(), 0);
}

#[tokio::test]
async fn reply_missing_keywords_is_extraction_error() {
    let (store, _) = shared_store();
    let extractor = FakeExtractor::replying(r#"{"title":"X","content":"Y"}"#);

    let err = ingest(&store, &extractor, "notes.txt", "text", MAX_CHARS).await.unwrap_err();

    assert!(matches!(err, ModelError::Extraction(_)));
    assert_eq!(lock_store(&store).len(), 3);
}

#[tokio::test]
async fn unreachable_model_is_external_call_error() {
    let (store, substrate) = shared_store();
    let extractor = FakeExtractor::unreachable();

    let err = ingest(&store, &extractor, "notes.txt", "text", MAX_CHARS).await.unwrap_err();

    assert!(matches!(err, ModelError::ExternalCall(_)));
    assert_eq!(lock_store(&store).len(), 3);
    assert_eq!(substrate.write_count(), 0);
}

#[tokio::test]
async fn reingesting_same_text_creates_distinct_articles() {
    let (store, _) = shared_store();
    let extractor = FakeExtractor::replying(GOOD_REPLY);

    let first = ingest(&store, &extractor, "a.txt", "same", MAX_CHARS).await.unwrap().article;
    let second = ingest(&store, &extractor, "a.txt", "same", MAX_CHARS).await.unwrap().article;

    assert_ne!(first.id, second.id);
    assert_eq!(lock_store(&store).len(), 5);
    assert_eq!(extractor.call_count(), 2);
}

#[tokio::test]
async fn ingested_article_is_searchable() {
    let (store, _) = shared_store();
    let extractor = FakeExtractor::replying(
        r#"{"title":"Battery Care","content":"Charge to 80%.","keywords":["battery","charging"]}"#,
    );

    let article = ingest(&store, &extractor, "battery.txt", "...", MAX_CHARS).await.unwrap().article;

    let store = lock_store(&store);
    let results = search(store.articles(), "battery");
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].id, article.id);
}

#[test]
fn extraction_prompt_caps_input_at_limit() {
    let long = "a".repeat(25_000);
    let prompt = build_extraction_prompt("big.txt", &long, 20_000);

    assert!(prompt.contains(&"a".repeat(20_000)));
    assert!(!prompt.contains(&"a".repeat(20_001)));
    assert!(prompt.contains("big.txt"));
}

#[test]
fn extraction_prompt_cuts_on_char_boundary() {
    let text = "é".repeat(30);
    let prompt = build_extraction_prompt("accents.txt", &text, 10);

    assert!(prompt.contains(&"é".repeat(10)));
    assert!(!prompt.contains(&"é".repeat(11)));
}
