//! Ingestion: raw uploaded text → structured [`Article`] → store.
//!
//! The store lock is never held across the model call, so searches keep
//! working against the pre-ingestion state while extraction is pending. If the
//! caller drops the returned future before it resolves, the append never runs.

use crate::error::ModelError;
use crate::extraction::prompt::truncate_chars;
use crate::extraction::Extractor;
use crate::knowledge::store::{lock_store, SharedStore};
use crate::knowledge::types::Article;

/// Outcome of a successful [`ingest`].
#[derive(Debug, Clone)]
pub struct Ingested {
    pub article: Article,
    /// Whether the write that followed this append reached the substrate.
    pub saved: bool,
}

/// Extract an article from the first `max_input_chars` characters of
/// `raw_text` and append it to `store`.
///
/// On any error the store is left exactly as it was. Re-ingesting the same
/// text yields a second, distinct article.
pub async fn ingest(
    store: &SharedStore,
    extractor: &dyn Extractor,
    source_name: &str,
    raw_text: &str,
    max_input_chars: usize,
) -> Result<Ingested, ModelError> {
    let text = truncate_chars(raw_text, max_input_chars);
    tracing::info!(
        source = %source_name,
        chars = raw_text.chars().count(),
        truncated = text.len() < raw_text.len(),
        "ingesting document"
    );

    let extracted = extractor.extract(source_name, text).await?;
    let article = Article::from(extracted);

    let saved = {
        let mut store = lock_store(store);
        let saved = store.append(article.clone());
        tracing::info!(
            id = %article.id,
            title = %article.title,
            keywords = article.keywords.len(),
            total = store.len(),
            saved,
            "article added"
        );
        saved
    };

    Ok(Ingested { article, saved })
}
