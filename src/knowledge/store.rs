//! The article store: an ordered in-memory collection backed by a [`Substrate`].
//!
//! The in-memory collection is authoritative for the session. Every mutation is
//! followed by a whole-collection write under a single key; a failed write is
//! logged and remembered but never undoes the mutation. Loading never fails: a
//! missing or unreadable value falls back to the seed articles.

use std::sync::{Arc, Mutex, MutexGuard};

use crate::error::PersistenceError;
use crate::knowledge::types::Article;
use crate::substrate::Substrate;

/// Store handle shared between the server, the autosave task and in-flight ingestions.
pub type SharedStore = Arc<Mutex<KnowledgeStore>>;

/// Lock a shared store. Every mutation is a single assignment or push, so a
/// poisoned lock still guards a consistent collection.
pub fn lock_store(store: &SharedStore) -> MutexGuard<'_, KnowledgeStore> {
    store.lock().unwrap_or_else(|e| e.into_inner())
}

pub struct KnowledgeStore {
    substrate: Box<dyn Substrate>,
    key: String,
    articles: Vec<Article>,
    last_persist_error: Option<String>,
}

impl KnowledgeStore {
    /// Initialize from the substrate, falling back to `defaults` when the key is
    /// absent, unreadable, or does not hold a JSON array of articles.
    pub fn load(
        substrate: Box<dyn Substrate>,
        key: impl Into<String>,
        defaults: Vec<Article>,
    ) -> Self {
        let key = key.into();

        let articles = match substrate.get(&key) {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<Article>>(&raw) {
                Ok(articles) => {
                    tracing::info!(key = %key, count = articles.len(), "knowledge base loaded");
                    articles
                }
                Err(e) => {
                    tracing::warn!(key = %key, error = %e, "stored knowledge base is malformed, using defaults");
                    defaults
                }
            },
            Ok(None) => {
                tracing::info!(key = %key, "no stored knowledge base, using defaults");
                defaults
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to read knowledge base, using defaults");
                defaults
            }
        };

        Self {
            substrate,
            key,
            articles,
            last_persist_error: None,
        }
    }

    /// Convenience wrapper for sharing across tasks.
    pub fn into_shared(self) -> SharedStore {
        Arc::new(Mutex::new(self))
    }

    /// Snapshot copy of every article, in insertion order.
    pub fn get_all(&self) -> Vec<Article> {
        self.articles.clone()
    }

    /// Borrowed read-only view, for search and export.
    pub fn articles(&self) -> &[Article] {
        &self.articles
    }

    /// Look up a single article (with content) by id.
    pub fn get(&self, id: &str) -> Option<Article> {
        self.articles.iter().find(|a| a.id == id).cloned()
    }

    pub fn len(&self) -> usize {
        self.articles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.articles.is_empty()
    }

    pub fn storage_key(&self) -> &str {
        &self.key
    }

    /// Append one article and persist. No duplicate-id check; ids come from
    /// [`generate_article_id`](crate::knowledge::types::generate_article_id).
    ///
    /// Returns whether this write reached the substrate.
    pub fn append(&mut self, article: Article) -> bool {
        tracing::debug!(id = %article.id, title = %article.title, "appending article");
        self.articles.push(article);
        self.persist()
    }

    /// Swap the whole collection and persist. The caller has already validated it.
    ///
    /// Returns whether this write reached the substrate.
    pub fn replace_all(&mut self, articles: Vec<Article>) -> bool {
        tracing::info!(old = self.articles.len(), new = articles.len(), "replacing knowledge base");
        self.articles = articles;
        self.persist()
    }

    /// Write the whole collection to the substrate.
    ///
    /// Returns `true` if the write succeeded. A failure is logged and kept in
    /// [`last_persist_error`](Self::last_persist_error); the in-memory state is
    /// unaffected either way.
    pub fn persist(&mut self) -> bool {
        match self.write_snapshot() {
            Ok(()) => {
                self.last_persist_error = None;
                true
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to persist knowledge base, keeping in-memory state");
                self.last_persist_error = Some(e.to_string());
                false
            }
        }
    }

    /// The error from the most recent failed write, cleared by the next successful one.
    pub fn last_persist_error(&self) -> Option<&str> {
        self.last_persist_error.as_deref()
    }

    fn write_snapshot(&self) -> Result<(), PersistenceError> {
        let json = serde_json::to_string(&self.articles).map_err(|e| PersistenceError::Write {
            key: self.key.clone(),
            reason: e.to_string(),
        })?;
        self.substrate.set(&self.key, &json)
    }
}

impl std::fmt::Debug for KnowledgeStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KnowledgeStore")
            .field("key", &self.key)
            .field("articles", &self.articles.len())
            .field("last_persist_error", &self.last_persist_error)
            .finish()
    }
}
