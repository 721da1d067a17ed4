//! Gemini `generateContent` client.
//!
//! Authentication is an API key passed as the `key` query parameter. Extraction
//! requests set `responseMimeType: application/json` plus a `responseSchema`
//! so the model is constrained to `{title, content, keywords}`; answer requests
//! are plain text. The reply text lives at `candidates[0].content.parts[*].text`.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::prompt::build_extraction_prompt;
use super::{parse_extraction, Extractor, Generator};
use crate::config::ExtractionConfig;
use crate::error::ModelError;
use crate::knowledge::types::ExtractedArticle;

// ── Wire types ───────────────────────────────────────────────────────────────

#[derive(Debug, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
struct Part {
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    /// Set on reasoning parts, which are not part of the answer.
    #[serde(skip_serializing_if = "Option::is_none")]
    thought: Option<bool>,
}

#[derive(Debug, Serialize, Deserialize, Default)]
#[serde(default)]
struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Default)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    response_mime_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_schema: Option<Value>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Content,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorDetail {
    message: String,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorResponse {
    error: GeminiErrorDetail,
}

const EMPTY_RESPONSE: &str =
    "no content in Gemini response - the model may have been blocked by safety filters";

/// JSON schema the extraction response must conform to.
fn extraction_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "title": { "type": "STRING" },
            "content": { "type": "STRING" },
            "keywords": {
                "type": "ARRAY",
                "items": { "type": "STRING" }
            }
        },
        "required": ["title", "content", "keywords"]
    })
}

// ── Client ───────────────────────────────────────────────────────────────────

pub struct GeminiClient {
    client: Client,
    api_base: String,
    /// `None` when the configured environment variable is unset; every call then
    /// fails with [`ModelError::ExternalCall`].
    api_key: Option<String>,
    api_key_env: String,
    extraction_model: String,
    answer_model: String,
    max_input_chars: usize,
}

impl GeminiClient {
    pub fn new(config: &ExtractionConfig) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        let api_key = std::env::var(&config.api_key_env).ok().filter(|k| !k.is_empty());
        if api_key.is_none() {
            tracing::warn!(env = %config.api_key_env, "API key not set; model calls will fail");
        }

        Ok(Self {
            client,
            api_base: config.api_base.trim_end_matches('/').to_string(),
            api_key,
            api_key_env: config.api_key_env.clone(),
            extraction_model: config.extraction_model.clone(),
            answer_model: config.answer_model.clone(),
            max_input_chars: config.max_input_chars,
        })
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    fn build_request(prompt: &str, structured: bool) -> GenerateContentRequest {
        let generation_config = structured.then(|| GenerationConfig {
            response_mime_type: Some("application/json".into()),
            response_schema: Some(extraction_schema()),
        });

        GenerateContentRequest {
            contents: vec![Content {
                role: Some("user".into()),
                parts: vec![Part {
                    text: Some(prompt.to_string()),
                    thought: None,
                }],
            }],
            generation_config,
        }
    }

    /// Send one `generateContent` call and return the concatenated answer text,
    /// or `None` if the model produced no text at all.
    async fn generate_content(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<Option<String>, ModelError> {
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            ModelError::ExternalCall(format!("{} environment variable is not set", self.api_key_env))
        })?;

        // never log `url`, it carries the key
        let url = format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            self.api_base, model, api_key
        );
        tracing::debug!(model = %model, "sending Gemini request");

        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                ModelError::ExternalCall(format!("request to {model} failed: {}", e.without_url()))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<GeminiErrorResponse>(&body)
                .map(|r| r.error.message)
                .unwrap_or(body);
            return Err(ModelError::ExternalCall(format!(
                "Gemini API error ({status}): {message}"
            )));
        }

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| {
                ModelError::ExternalCall(format!("unreadable Gemini response: {}", e.without_url()))
            })?;

        Ok(response_text(parsed))
    }
}

/// Join the non-thought text parts of the first candidate.
fn response_text(response: GenerateContentResponse) -> Option<String> {
    let candidate = response.candidates?.into_iter().next()?;
    let text: String = candidate
        .content
        .parts
        .into_iter()
        .filter(|p| !p.thought.unwrap_or(false))
        .filter_map(|p| p.text)
        .collect();
    (!text.is_empty()).then_some(text)
}

#[async_trait]
impl Extractor for GeminiClient {
    async fn extract(&self, source_name: &str, text: &str) -> Result<ExtractedArticle, ModelError> {
        let prompt = build_extraction_prompt(source_name, text, self.max_input_chars);
        let request = Self::build_request(&prompt, true);

        let raw = self
            .generate_content(&self.extraction_model, &request)
            .await?
            .ok_or_else(|| ModelError::Extraction(EMPTY_RESPONSE.into()))?;
        parse_extraction(&raw).inspect_err(|e| {
            tracing::warn!(source = %source_name, error = %e, "extraction response rejected");
        })
    }
}

#[async_trait]
impl Generator for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String, ModelError> {
        let request = Self::build_request(prompt, false);
        self.generate_content(&self.answer_model, &request)
            .await?
            .ok_or_else(|| ModelError::ExternalCall(EMPTY_RESPONSE.into()))
    }
}
