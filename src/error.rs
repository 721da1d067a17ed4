//! Typed failure kinds surfaced by the knowledge core.
//!
//! Every core operation either succeeds or fails with exactly one of these, so
//! callers (CLI, MCP tools) can tell a malformed import apart from a flaky
//! model call without string matching.

use thiserror::Error;

/// The substrate could not be read or written.
///
/// Reads are masked by [`KnowledgeStore::load`](crate::knowledge::store::KnowledgeStore::load)
/// (fallback to the seed articles); writes are logged and remembered, never propagated.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("failed to read key `{key}`: {reason}")]
    Read { key: String, reason: String },

    #[error("failed to write key `{key}`: {reason}")]
    Write { key: String, reason: String },
}

/// Failure of the external model capability used by ingestion and answering.
#[derive(Debug, Error)]
pub enum ModelError {
    /// The model answered, but not with the structured data that was asked for.
    #[error("failed to process file content, the AI response was not valid structured data: {0}")]
    Extraction(String),

    /// The model could not be reached or refused the request (network, auth, quota).
    #[error("model request failed: {0}")]
    ExternalCall(String),
}

/// An import payload was rejected. The store is never touched when this is returned.
#[derive(Debug, Error)]
pub enum FormatError {
    #[error("import payload is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error(
        "invalid knowledge base file format: {0}. Ensure it's an array of articles with id, title, content, and keywords"
    )]
    Shape(String),

    #[error("invalid knowledge base file format: duplicate article id `{0}`")]
    DuplicateId(String),
}
