//! The knowledge core: article store, ranking, ingestion, transfer and answering.

pub mod autosave;
pub mod ingest;
pub mod query;
pub mod search;
pub mod seed;
pub mod store;
pub mod transfer;
pub mod types;

pub use store::{lock_store, KnowledgeStore, SharedStore};
pub use types::{Article, ArticleSummary, ExtractedArticle};
