//! Gemini Client
//!
//! LLM client implementation for the Google Gemini API.

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use serde::Deserialize;

use crate::llm_client::LlmClient;

/// Default Gemini model
const DEFAULT_MODEL: &str = "gemini-2.5-pro";

const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Gemini API client
#[derive(Clone)]
pub struct GeminiClient {
    api_key: String,
    client: reqwest::Client,
    model: String,
}

impl GeminiClient {
    /// Create a new Gemini client with the given API key
    pub fn new(api_key: String) -> Self {
        let model = std::env::var("GEMINI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        Self {
            api_key,
            client: reqwest::Client::new(),
            model,
        }
    }

    /// Create with a specific model
    pub fn with_model(api_key: String, model: &str) -> Self {
        Self {
            api_key,
            client: reqwest::Client::new(),
            model: model.to_string(),
        }
    }

    /// Create from environment variables
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("GEMINI_API_KEY")
            .map_err(|_| anyhow!("GEMINI_API_KEY environment variable not set"))?;
        Ok(Self::new(api_key))
    }

    /// Internal API call implementation
    async fn call_api(&self, prompt: &str) -> Result<String> {
        let body = serde_json::json!({
            "contents": [
                {"parts": [{"text": prompt}]}
            ]
        });

        let url = format!("{}/{}:generateContent", API_BASE, self.model);
        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow!("Gemini API error {}: {}", status, body));
        }

        #[derive(Deserialize)]
        struct Part {
            text: Option<String>,
        }
        #[derive(Deserialize)]
        struct Content {
            #[serde(default)]
            parts: Vec<Part>,
        }
        #[derive(Deserialize)]
        struct Candidate {
            content: Option<Content>,
        }
        #[derive(Deserialize)]
        struct ApiResponse {
            #[serde(default)]
            candidates: Vec<Candidate>,
        }

        let api_response: ApiResponse = response.json().await?;

        // A candidate without content (e.g. a safety block) is a failure; a
        // candidate with empty text is handled downstream by normalization.
        api_response
            .candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|content| {
                content
                    .parts
                    .iter()
                    .filter_map(|p| p.text.as_deref())
                    .collect::<String>()
            })
            .ok_or_else(|| anyhow!("Gemini returned no candidates"))
    }
}

#[async_trait]
impl LlmClient for GeminiClient {
    async fn complete(&self, prompt: &str) -> Result<String> {
        self.call_api(prompt).await
    }

    fn model_name(&self) -> &str {
        &self.model
    }

    fn provider_name(&self) -> &str {
        "Gemini"
    }
}
