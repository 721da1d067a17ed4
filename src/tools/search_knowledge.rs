//! MCP `search_knowledge` tool parameter definition.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Parameters for the `search_knowledge` MCP tool.
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct SearchKnowledgeParams {
    /// Space-separated keywords. Matching is case-insensitive substring matching.
    #[schemars(description = "Keywords to search for, e.g. 'return policy'")]
    pub query: String,

    /// Maximum number of results to return. Defaults to the configured value.
    #[schemars(description = "Maximum number of results to return. Defaults to 10.")]
    pub max_results: Option<usize>,
}
