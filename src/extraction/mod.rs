//! The external model capability, behind two narrow traits.
//!
//! [`Extractor`] turns raw text into an [`ExtractedArticle`]; [`Generator`]
//! produces free text for retrieval-augmented answers. The knowledge core
//! depends only on these traits, never on a provider's wire format. The one
//! provider shipped is Gemini ([`gemini::GeminiClient`]), created via
//! [`create_client`] from configuration.

pub mod gemini;
pub mod prompt;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::ModelError;
use crate::knowledge::types::ExtractedArticle;

/// Structured extraction: title, summary and keywords for a piece of text.
#[async_trait]
pub trait Extractor: Send + Sync {
    /// `text` is the full source; implementations cap what they send.
    async fn extract(&self, source_name: &str, text: &str) -> Result<ExtractedArticle, ModelError>;
}

/// Plain text completion.
#[async_trait]
pub trait Generator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, ModelError>;
}

/// Parse a model response into an [`ExtractedArticle`].
///
/// The text must be a JSON object with a non-blank string `title`, a string
/// `content`, and a non-empty array of strings `keywords`. Anything else is a
/// [`ModelError::Extraction`].
pub fn parse_extraction(text: &str) -> Result<ExtractedArticle, ModelError> {
    let value: Value = serde_json::from_str(text.trim())
        .map_err(|e| ModelError::Extraction(format!("response is not JSON: {e}")))?;

    let obj = value
        .as_object()
        .ok_or_else(|| ModelError::Extraction("response is not a JSON object".into()))?;

    let string_field = |name: &str| -> Result<String, ModelError> {
        obj.get(name)
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| ModelError::Extraction(format!("`{name}` missing or not a string")))
    };

    let title = string_field("title")?;
    let content = string_field("content")?;

    let keywords = obj
        .get("keywords")
        .and_then(Value::as_array)
        .ok_or_else(|| ModelError::Extraction("`keywords` missing or not an array".into()))?
        .iter()
        .map(|k| {
            k.as_str()
                .map(str::to_string)
                .ok_or_else(|| ModelError::Extraction("`keywords` contains a non-string".into()))
        })
        .collect::<Result<Vec<_>, _>>()?;

    if title.trim().is_empty() {
        return Err(ModelError::Extraction("`title` is blank".into()));
    }
    if keywords.is_empty() {
        return Err(ModelError::Extraction("`keywords` is empty".into()));
    }

    Ok(ExtractedArticle {
        title,
        content,
        keywords,
    })
}

/// Create the model client named by `config.provider`.
///
/// Currently only `"gemini"` is supported.
pub fn create_client(
    config: &crate::config::ExtractionConfig,
) -> anyhow::Result<gemini::GeminiClient> {
    match config.provider.as_str() {
        "gemini" => gemini::GeminiClient::new(config),
        other => anyhow::bail!("unknown extraction provider: {other}. Supported: gemini"),
    }
}
