//! LLM Client — the single point of entry for all model calls in the insights API.
//!
//! ARCHITECTURAL RULE: No other module may call the Gemini API directly.
//! All model interactions go through a `CompletionOracle`, injected at startup.
//!
//! No retries: a failed call is a terminal outcome for that request.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

pub mod stub;

pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
const MODEL_PREFIX: &str = "models/";
const LIST_PAGE_SIZE: u32 = 1000;

/// Models tried in order when no preference is configured.
pub const DEFAULT_MODEL_PREFERENCE: &[&str] = &[
    "gemini-2.5-pro-exp-03-25",
    "gemini-2.0-pro-exp",
    "gemini-1.5-pro-latest",
    "gemini-1.5-pro",
    "gemini-1.5-pro-002",
    "gemini-1.5-pro-001",
];

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("LLM returned empty content")]
    EmptyContent,
}

/// The text-completion service behind insight generation.
///
/// Carried by the orchestrator as `Arc<dyn CompletionOracle>` so tests and the
/// offline mode can swap in `stub::StubOracle`.
#[async_trait]
pub trait CompletionOracle: Send + Sync {
    /// Model identifiers the oracle currently serves, without the `models/` prefix.
    async fn list_models(&self) -> Result<Vec<String>, LlmError>;

    /// Sends one prompt to `model` and returns the reply text.
    async fn complete(&self, model: &str, prompt: &str) -> Result<String, LlmError>;
}

/// Picks the first entry of `preference` that appears in `available`.
/// Names in `available` may carry the `models/` prefix.
pub fn select_model(available: &[String], preference: &[String]) -> Option<String> {
    preference
        .iter()
        .find(|wanted| {
            available
                .iter()
                .any(|name| strip_model_prefix(name) == wanted.as_str())
        })
        .cloned()
}

fn strip_model_prefix(name: &str) -> &str {
    name.strip_prefix(MODEL_PREFIX).unwrap_or(name)
}

// ────────────────────────────────────────────────────────────────────────────
// Gemini wire types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    role: &'a str,
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    pub usage_metadata: Option<UsageMetadata>,
}

#[derive(Debug, Deserialize)]
pub struct Candidate {
    pub content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
pub struct CandidatePart {
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageMetadata {
    #[serde(default)]
    pub prompt_token_count: u32,
    #[serde(default)]
    pub candidates_token_count: u32,
}

impl GenerateContentResponse {
    /// Concatenated text parts of the first candidate.
    pub fn text(&self) -> Option<String> {
        let parts = &self.candidates.first()?.content.as_ref()?.parts;
        let text: String = parts.iter().filter_map(|p| p.text.as_deref()).collect();
        Some(text)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListModelsResponse {
    #[serde(default)]
    models: Vec<ModelInfo>,
    next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ModelInfo {
    name: String,
}

#[derive(Debug, Deserialize)]
struct GeminiError {
    error: GeminiErrorBody,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorBody {
    message: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Client
// ────────────────────────────────────────────────────────────────────────────

/// Gemini REST client (`generativelanguage.googleapis.com`).
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    api_base: String,
    api_key: String,
}

impl GeminiClient {
    pub fn new(api_key: String, api_base: String, timeout: Duration) -> Result<Self, LlmError> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            api_base: api_base.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    async fn list_page(&self, page_token: Option<&str>) -> Result<ListModelsResponse, LlmError> {
        let mut request = self
            .client
            .get(format!("{}/models", self.api_base))
            .header("x-goog-api-key", &self.api_key)
            .query(&[("pageSize", LIST_PAGE_SIZE.to_string())]);
        if let Some(token) = page_token {
            request = request.query(&[("pageToken", token)]);
        }

        let response = request.send().await?;
        read_json(response).await
    }
}

#[async_trait]
impl CompletionOracle for GeminiClient {
    async fn list_models(&self) -> Result<Vec<String>, LlmError> {
        let mut names = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let page = self.list_page(page_token.as_deref()).await?;
            names.extend(
                page.models
                    .into_iter()
                    .map(|m| strip_model_prefix(&m.name).to_string()),
            );
            match page.next_page_token {
                Some(token) if !token.is_empty() => page_token = Some(token),
                _ => break,
            }
        }

        Ok(names)
    }

    async fn complete(&self, model: &str, prompt: &str) -> Result<String, LlmError> {
        let request_body = GenerateContentRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![Part { text: prompt }],
            }],
        };

        let response = self
            .client
            .post(format!(
                "{}/models/{}:generateContent",
                self.api_base,
                strip_model_prefix(model)
            ))
            .header("x-goog-api-key", &self.api_key)
            .json(&request_body)
            .send()
            .await?;

        let body: GenerateContentResponse = read_json(response).await?;

        if let Some(usage) = &body.usage_metadata {
            debug!(
                "Gemini call succeeded: prompt_tokens={}, output_tokens={}",
                usage.prompt_token_count, usage.candidates_token_count
            );
        }

        body.text()
            .filter(|text| !text.trim().is_empty())
            .ok_or(LlmError::EmptyContent)
    }
}

/// Maps non-2xx responses to `LlmError::Api`, otherwise decodes the JSON body.
async fn read_json<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, LlmError> {
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        return Err(LlmError::Api {
            status: status.as_u16(),
            message: api_error_message(&body),
        });
    }

    serde_json::from_str(&body).map_err(LlmError::Parse)
}

/// Pulls `error.message` out of Gemini's error envelope, falling back to the raw body.
fn api_error_message(body: &str) -> String {
    serde_json::from_str::<GeminiError>(body)
        .map(|e| e.error.message)
        .unwrap_or_else(|_| body.to_string())
}
