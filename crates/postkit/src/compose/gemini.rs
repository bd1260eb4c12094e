//! Gemini `generateContent` client

use super::TextGenerator;
use crate::config::{DEFAULT_GEMINI_BASE_URL, DEFAULT_MODEL, GEMINI_API_KEY_VAR};
use crate::error::PostError;
use async_trait::async_trait;
use reqwest::header::{HeaderValue, CONTENT_TYPE};
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use url::Url;

/// Generation can take a while for long templates
const GENERATE_TIMEOUT: Duration = Duration::from_secs(180);

/// Client for Google's generative-text API
pub struct GeminiClient {
    api_key: Option<String>,
    model: String,
    base_url: String,
}

impl GeminiClient {
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            api_key,
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Point at a different API host
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn api_key(&self) -> Result<&str, PostError> {
        self.api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
            .ok_or(PostError::MissingCredential(GEMINI_API_KEY_VAR))
    }

    fn endpoint(&self, api_key: &str) -> Result<Url, PostError> {
        let endpoint = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        );
        Url::parse_with_params(&endpoint, &[("key", api_key)]).map_err(|e| {
            PostError::InvalidEndpoint {
                service: "gemini",
                reason: e.to_string(),
            }
        })
    }
}

/// generateContent response (partial)
#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

impl GenerateResponse {
    /// Text of the first candidate, parts concatenated
    fn into_text(self) -> Option<String> {
        let content = self.candidates.into_iter().next()?.content?;
        let text: String = content.parts.into_iter().filter_map(|p| p.text).collect();
        if text.trim().is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    fn name(&self) -> &'static str {
        "gemini"
    }

    fn check_ready(&self) -> Result<(), PostError> {
        self.api_key().map(|_| ())
    }

    async fn generate(&self, prompt: &str) -> Result<String, PostError> {
        let api_key = self.api_key()?;

        let client = reqwest::Client::builder()
            .timeout(GENERATE_TIMEOUT)
            .build()
            .map_err(PostError::ClientBuildError)?;

        let body = json!({
            "contents": [{ "parts": [{ "text": prompt }] }]
        });

        let response = client
            .post(self.endpoint(api_key)?.as_str())
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
            .json(&body)
            .send()
            .await
            .map_err(PostError::from_reqwest)?;

        let status = response.status();
        if !status.is_success() {
            return Err(PostError::UpstreamStatus {
                service: "gemini",
                status: status.as_u16(),
            });
        }

        let parsed: GenerateResponse = response
            .json()
            .await
            .map_err(|e| PostError::unexpected("gemini", e.to_string()))?;

        parsed
            .into_text()
            .ok_or_else(|| PostError::unexpected("gemini", "no text in response"))
    }
}
