//! Google Gemini `generateContent` over HTTPS.
//!
//! The request is a single blocking `ureq` call moved onto tokio's blocking
//! pool, so callers can await it without stalling the runtime.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::NarrativeError;
use crate::generator::{BoxFuture, TextGenerator};

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

// ── Wire types ───────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

// ── Generator ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct GeminiGenerator {
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiGenerator {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Read the API key from environment variable `var`.
    ///
    /// Fails with [`NarrativeError::MissingCredential`] when the variable is
    /// unset or blank, before any request is attempted.
    pub fn from_env(var: &str) -> Result<Self, NarrativeError> {
        match std::env::var(var) {
            Ok(key) if !key.trim().is_empty() => Ok(Self::new(key.trim())),
            _ => Err(NarrativeError::MissingCredential(var.to_string())),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        )
    }

    fn send(url: &str, api_key: &str, prompt: String) -> Result<String, NarrativeError> {
        let body = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part { text: Some(prompt) }],
            }],
        };

        let mut response = ureq::post(url)
            .header("x-goog-api-key", api_key)
            .send_json(&body)?;

        let body = response
            .body_mut()
            .read_to_string()
            .map_err(|e| NarrativeError::ResponseParse(e.to_string()))?;

        parse_response(&body)
    }
}

/// Concatenate the text parts of a `generateContent` response body.
///
/// A response with no text at all is [`NarrativeError::EmptyResponse`].
pub fn parse_response(body: &str) -> Result<String, NarrativeError> {
    let response: GenerateContentResponse = serde_json::from_str(body)
        .map_err(|e| NarrativeError::ResponseParse(e.to_string()))?;

    let text = response
        .candidates
        .into_iter()
        .filter_map(|c| c.content)
        .flat_map(|c| c.parts)
        .filter_map(|p| p.text)
        .collect::<Vec<_>>()
        .join("");

    if text.trim().is_empty() {
        return Err(NarrativeError::EmptyResponse);
    }
    Ok(text)
}

impl TextGenerator for GeminiGenerator {
    fn model(&self) -> &str {
        &self.model
    }

    fn generate<'a>(&'a self, prompt: &'a str) -> BoxFuture<'a, Result<String, NarrativeError>> {
        let url = self.endpoint();
        let api_key = self.api_key.clone();
        let prompt = prompt.to_string();

        Box::pin(async move {
            info!(model = %self.model, prompt_chars = prompt.len(), "requesting narrative");
            let text = tokio::task::spawn_blocking(move || Self::send(&url, &api_key, prompt))
                .await
                .map_err(|e| NarrativeError::Invocation(e.to_string()))??;
            info!(model = %self.model, response_chars = text.len(), "narrative received");
            Ok(text)
        })
    }
}
