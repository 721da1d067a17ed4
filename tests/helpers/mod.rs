#![allow(dead_code)]

use std::sync::Mutex;

use almanac::error::ModelError;
use almanac::extraction::{parse_extraction, Extractor, Generator};
use almanac::knowledge::seed::default_articles;
use almanac::knowledge::types::{Article, ExtractedArticle};
use almanac::knowledge::{KnowledgeStore, SharedStore};
use almanac::substrate::MemorySubstrate;
use async_trait::async_trait;

pub const KEY: &str = "knowledgeBase";

/// Load a store over a fresh in-memory substrate with the seed articles.
/// The returned substrate handle shares state with the store's.
pub fn seeded_store() -> (KnowledgeStore, MemorySubstrate) {
    let substrate = MemorySubstrate::new();
    let store = KnowledgeStore::load(Box::new(substrate.clone()), KEY, default_articles());
    (store, substrate)
}

/// Load a store whose substrate already holds `raw` under the storage key.
pub fn store_with_raw(raw: &str) -> (KnowledgeStore, MemorySubstrate) {
    let substrate = MemorySubstrate::with_value(KEY, raw);
    let store = KnowledgeStore::load(Box::new(substrate.clone()), KEY, default_articles());
    (store, substrate)
}

/// Same as [`seeded_store`], wrapped for sharing with async code.
pub fn shared_store() -> (SharedStore, MemorySubstrate) {
    let (store, substrate) = seeded_store();
    (store.into_shared(), substrate)
}

/// An article with a fixed id, for building ranking fixtures.
pub fn article(id: &str, title: &str, keywords: &[&str]) -> Article {
    Article {
        id: id.to_string(),
        title: title.to_string(),
        content: format!("{title} content"),
        keywords: keywords.iter().map(|k| k.to_string()).collect(),
    }
}

/// What a scripted model call returns.
pub enum Reply {
    /// Raw model text, run through the real response parser.
    Text(String),
    /// The model could not be reached.
    Unreachable,
}

/// Extractor that replays a canned reply and records every input it sees.
pub struct FakeExtractor {
    reply: Reply,
    pub calls: Mutex<Vec<(String, String)>>,
}

impl FakeExtractor {
    pub fn replying(text: &str) -> Self {
        Self {
            reply: Reply::Text(text.to_string()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn unreachable() -> Self {
        Self {
            reply: Reply::Unreachable,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl Extractor for FakeExtractor {
    async fn extract(&self, source_name: &str, text: &str) -> Result<ExtractedArticle, ModelError> {
        self.calls
            .lock()
            .unwrap()
            .push((source_name.to_string(), text.to_string()));
        match &self.reply {
            Reply::Text(raw) => parse_extraction(raw),
            Reply::Unreachable => Err(ModelError::ExternalCall("connection refused".into())),
        }
    }
}

/// Generator that returns a fixed answer and records the prompts it received.
pub struct FakeGenerator {
    answer: String,
    pub prompts: Mutex<Vec<String>>,
}

impl FakeGenerator {
    pub fn answering(answer: &str) -> Self {
        Self {
            answer: answer.to_string(),
            prompts: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl Generator for FakeGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, ModelError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        Ok(self.answer.clone())
    }
}

pub fn ids(articles: &[Article]) -> Vec<&str> {
    articles.iter().map(|a| a.id.as_str()).collect()
}
