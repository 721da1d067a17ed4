use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct AskKnowledgeParams {
    #[schemars(description = "The question to answer")]
    pub question: String,

    #[schemars(
        description = "ID of the article to use as context. Defaults to the best keyword match for the question."
    )]
    pub article_id: Option<String>,
}
