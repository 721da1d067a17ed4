//! Core knowledge type definitions.
//!
//! Defines [`Article`] (a stored unit of knowledge), [`ArticleSummary`] (the
//! keyword-free projection returned by search), and [`ExtractedArticle`] (what
//! the model hands back during ingestion).

use serde::{Deserialize, Serialize};

/// A stored unit of knowledge. This is also the exact JSON shape of each element
/// in the persisted and exported collection.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Article {
    /// Opaque unique id, `doc-<millis>-<suffix>` for ingested articles. Never mutated.
    pub id: String,
    /// Short human-readable title. Matches against it earn the title bonus.
    pub title: String,
    /// Body text (original or summarized). Used as answering context.
    pub content: String,
    /// Ranking keywords. Case is preserved here and ignored when matching.
    pub keywords: Vec<String>,
}

impl Article {
    /// Build a new article with a freshly generated id.
    pub fn new(title: impl Into<String>, content: impl Into<String>, keywords: Vec<String>) -> Self {
        Self {
            id: generate_article_id(),
            title: title.into(),
            content: content.into(),
            keywords,
        }
    }

    /// Projection that hides ranking internals.
    pub fn summary(&self) -> ArticleSummary {
        ArticleSummary {
            id: self.id.clone(),
            title: self.title.clone(),
            content: self.content.clone(),
        }
    }
}

impl From<ExtractedArticle> for Article {
    fn from(extracted: ExtractedArticle) -> Self {
        Article::new(extracted.title, extracted.content, extracted.keywords)
    }
}

/// A search hit: an article without its keywords.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleSummary {
    pub id: String,
    pub title: String,
    pub content: String,
}

/// Structured output of the extraction capability.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedArticle {
    pub title: String,
    /// Roughly a 100–150 word summary of the source text.
    pub content: String,
    /// Usually 5–7 search keywords.
    pub keywords: Vec<String>,
}

/// Generate a fresh article id from the current time plus a random suffix.
///
/// The suffix is taken from the random tail of a UUID v7, so two ids minted in
/// the same millisecond still differ.
pub fn generate_article_id() -> String {
    let millis = chrono::Utc::now().timestamp_millis();
    let uuid = uuid::Uuid::now_v7().simple().to_string();
    format!("doc-{millis}-{}", &uuid[uuid.len() - 9..])
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn ids_have_expected_shape() {
        let id = generate_article_id();
        let parts: Vec<&str> = id.splitn(3, '-').collect();
        assert_eq!(parts[0], "doc");
        assert!(parts[1].parse::<i64>().is_ok());
        assert_eq!(parts[2].len(), 9);
    }

    #[test]
    fn ids_are_unique_in_a_tight_loop() {
        let ids: HashSet<String> = (0..1000).map(|_| generate_article_id()).collect();
        assert_eq!(ids.len(), 1000);
    }

    #[test]
    fn summary_drops_keywords() {
        let article = Article::new("T", "C", vec!["k".into()]);
        let json = serde_json::to_value(article.summary()).unwrap();
        assert!(json.get("keywords").is_none());
        assert_eq!(json["title"], "T");
    }
}
