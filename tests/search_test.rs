mod helpers;

use almanac::knowledge::search::{rank, search};
use almanac::knowledge::seed::default_articles;
use almanac::knowledge::types::Article;
use helpers::article;

#[test]
fn refund_query_finds_return_policy() {
    let articles = default_articles();

    let results = search(&articles, "refund");
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].id, "policy-002");
}

#[test]
fn return_policy_query_ranks_policy_article_alone() {
    let articles = default_articles();

    let ranked = rank(&articles, "return policy");
    assert_eq!(ranked.len(), 1);
    assert_eq!(ranked[0].article.id, "policy-002");
    // "return" and "policy" keywords, plus the title bonus
    assert_eq!(ranked[0].score, 4);
}

#[test]
fn tied_seed_articles_keep_seed_order() {
    let articles = default_articles();

    let ranked = rank(&articles, "setup quantum");
    let order: Vec<&str> = ranked.iter().map(|s| s.article.id.as_str()).collect();
    assert_eq!(order, vec!["feat-001", "setup-003"]);
    assert_eq!(ranked[0].score, 3);
    assert_eq!(ranked[1].score, 3);
}

#[test]
fn title_bonus_outranks_single_keyword() {
    let articles = vec![
        article("kw", "Misc", &["router"]),
        article("title", "Router Manual", &["manual"]),
    ];

    let ranked = rank(&articles, "router");
    assert_eq!(ranked[0].article.id, "title");
    assert_eq!(ranked[0].score, 2);
    assert_eq!(ranked[1].score, 1);
}

#[test]
fn score_counts_keywords_and_title_bonus_once() {
    let articles = vec![article("a", "Drive Drive", &["drive", "drives", "overdrive", "other"])];

    let ranked = rank(&articles, "drive DRIVE");
    assert_eq!(ranked.len(), 1);
    // three keywords contain "drive", title bonus counted once
    assert_eq!(ranked[0].score, 3 + 2);
}

#[test]
fn matching_is_substring_and_case_insensitive() {
    let articles = vec![article("a", "Untitled", &["Getting Started"])];

    assert_eq!(search(&articles, "START").len(), 1);
    assert_eq!(search(&articles, "ted sta").len(), 1);
    assert!(search(&articles, "started-now").is_empty());
}

#[test]
fn zero_score_articles_are_excluded() {
    let articles = default_articles();
    assert!(search(&articles, "zebra").is_empty());
}

#[test]
fn blank_query_returns_nothing() {
    let articles = default_articles();
    assert!(search(&articles, "").is_empty());
    assert!(search(&articles, "   \t\n").is_empty());
}

#[test]
fn equal_scores_keep_insertion_order() {
    let articles = vec![
        article("first", "One", &["alpha"]),
        article("second", "Two", &["alpha"]),
        article("third", "Three", &["alpha"]),
    ];

    let results = search(&articles, "alpha");
    let order: Vec<&str> = results.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(order, vec!["first", "second", "third"]);
}

#[test]
fn higher_scores_come_first() {
    let articles = vec![
        article("low", "Low", &["alpha"]),
        article("high", "Alpha Guide", &["alpha", "beta"]),
    ];

    let results = search(&articles, "alpha beta");
    assert_eq!(results[0].id, "high");
    assert_eq!(results[1].id, "low");
}

#[test]
fn results_omit_keywords() {
    let articles = default_articles();
    let results = search(&articles, "bluetooth");

    let json = serde_json::to_value(&results).unwrap();
    let hit = json[0].as_object().unwrap();
    assert_eq!(hit.len(), 3);
    assert!(!hit.contains_key("keywords"));
    assert_eq!(hit["title"], "Initial Setup Guide");
}

#[test]
fn search_does_not_touch_articles() {
    let articles: Vec<Article> = default_articles();
    let before = articles.clone();
    let _ = search(&articles, "quantum refund setup");
    assert_eq!(articles, before);
}
