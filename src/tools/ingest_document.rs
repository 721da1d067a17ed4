//! MCP `ingest_document` tool parameter definition.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Parameters for the `ingest_document` MCP tool.
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct IngestDocumentParams {
    #[schemars(description = "Name of the uploaded file, e.g. 'warranty.txt'")]
    pub source_name: String,

    /// Only the first 20,000 characters are sent to the model.
    #[schemars(description = "Full text content of the document")]
    pub content: String,
}
