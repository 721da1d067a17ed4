//! MCP `import_knowledge` tool parameter definition.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Parameters for the `import_knowledge` MCP tool.
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct ImportKnowledgeParams {
    /// Text in the export format. Replaces the whole knowledge base on success.
    #[schemars(
        description = "JSON array of articles ({id, title, content, keywords}) as produced by export_knowledge. Replaces ALL existing articles; '[]' clears the knowledge base."
    )]
    pub payload: String,
}
