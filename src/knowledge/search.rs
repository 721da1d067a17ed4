//! Keyword-overlap ranking.
//!
//! Each query token is matched as a case-insensitive substring:
//!
//! - every article keyword containing any token adds 1 (at most 1 per keyword)
//! - a title containing any token adds a flat 2 (once per article)
//!
//! Articles scoring 0 are dropped, the rest are sorted by score descending with
//! ties kept in insertion order.

use serde::Serialize;

use crate::knowledge::types::{Article, ArticleSummary};

/// Points for a title match.
pub const TITLE_BONUS: u32 = 2;

/// An article with its computed score, borrowed from the store.
#[derive(Debug, Clone, Serialize)]
pub struct ScoredArticle<'a> {
    pub article: &'a Article,
    pub score: u32,
}

/// Lowercase and split on whitespace. Returns an empty vec for a blank query.
pub fn tokenize(query: &str) -> Vec<String> {
    query.split_whitespace().map(str::to_lowercase).collect()
}

/// Score one article against already-lowercased tokens.
pub fn score_article(article: &Article, tokens: &[String]) -> u32 {
    let matches = |haystack: &str| {
        let haystack = haystack.to_lowercase();
        tokens.iter().any(|t| haystack.contains(t.as_str()))
    };

    let keyword_hits = article.keywords.iter().filter(|k| matches(k)).count() as u32;
    let title_bonus = if matches(&article.title) { TITLE_BONUS } else { 0 };

    keyword_hits + title_bonus
}

/// Score, filter and order `articles` for `query`.
///
/// A blank query returns immediately without looking at any article.
pub fn rank<'a>(articles: &'a [Article], query: &str) -> Vec<ScoredArticle<'a>> {
    let tokens = tokenize(query);
    if tokens.is_empty() {
        return Vec::new();
    }

    let mut scored: Vec<ScoredArticle<'a>> = articles
        .iter()
        .map(|article| ScoredArticle {
            article,
            score: score_article(article, &tokens),
        })
        .filter(|s| s.score > 0)
        .collect();

    // sort_by is stable: equal scores keep insertion order
    scored.sort_by(|a, b| b.score.cmp(&a.score));

    tracing::debug!(query = %query, matched = scored.len(), "ranked articles");
    scored
}

/// Ranked search results without keywords.
pub fn search(articles: &[Article], query: &str) -> Vec<ArticleSummary> {
    rank(articles, query)
        .into_iter()
        .map(|s| s.article.summary())
        .collect()
}
