//! A personal knowledge base with AI-assisted ingestion and keyword retrieval.
//!
//! Almanac keeps a small ordered collection of short text articles, persisted
//! as one JSON value in a durable key-value substrate. New articles are created
//! by asking a language model to extract a title, summary and keywords from an
//! uploaded document. Lookup is a keyword-overlap ranking, and a selected
//! article can be used as context for a model-written answer.
//!
//! # Architecture
//!
//! - **Storage**: a `key → string` [`substrate`]; SQLite on disk, an in-memory fake for tests
//! - **Store**: the whole collection is rewritten on every mutation and on a fixed autosave interval
//! - **Search**: case-insensitive substring matching of query tokens against keywords (+1 each)
//!   and the title (+2 once)
//! - **Ingestion**: schema-constrained JSON generation through the [`extraction`] traits
//! - **Transport**: MCP over stdio or Streamable HTTP, plus a terminal CLI
//!
//! # Modules
//!
//! - [`config`]: Configuration loading from TOML files and environment variables
//! - [`db`]: SQLite database initialization, schema, migrations, and health checks
//! - [`substrate`]: The key-value persistence interface and its implementations
//! - [`knowledge`]: Store, search, ingestion, import/export, autosave, answering
//! - [`extraction`]: Model capability traits and the Gemini client
//! - [`error`]: Typed failure kinds

pub mod config;
pub mod db;
pub mod error;
pub mod extraction;
pub mod knowledge;
pub mod substrate;
