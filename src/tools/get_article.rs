use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct GetArticleParams {
    #[schemars(description = "ID of the article to fetch")]
    pub id: String,
}
