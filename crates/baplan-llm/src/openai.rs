//! OpenAI-compatible Chat Completions backend.
//!
//! Asks for `response_format: json_object` so the reply content is a bare
//! JSON object. Any server speaking the same API (a proxy, a local model
//! server) works by pointing `base_url` at it.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use baplan_core::models::token_count::TokenCount;

use crate::backend::{Completion, CompletionBackend};
use crate::error::PlanError;

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-4o";

#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    /// Upper bound on a whole request, connect through last body byte.
    pub timeout: Duration,
}

pub struct OpenAiBackend {
    model: String,
    api_key: String,
    base_url: String,
    http: Client,
}

impl OpenAiBackend {
    pub fn new(config: OpenAiConfig) -> Result<Self, PlanError> {
        if config.api_key.trim().is_empty() {
            return Err(PlanError::Config("OpenAI API key is empty".to_string()));
        }

        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| PlanError::Config(e.to_string()))?;

        Ok(Self {
            model: config.model,
            api_key: config.api_key,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    fn request_body(&self, system_prompt: &str, user_message: &str) -> serde_json::Value {
        serde_json::json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": system_prompt },
                { "role": "user", "content": user_message },
            ],
            "response_format": { "type": "json_object" },
        })
    }
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Usage {
    #[serde(default)]
    prompt_tokens: u64,
    #[serde(default)]
    completion_tokens: u64,
}

impl ChatResponse {
    fn into_completion(self) -> Completion {
        let text = self
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .unwrap_or_default();
        let usage = self
            .usage
            .map(|u| TokenCount {
                input: u.prompt_tokens,
                output: u.completion_tokens,
            })
            .unwrap_or_default();
        Completion { text, usage }
    }
}

#[async_trait]
impl CompletionBackend for OpenAiBackend {
    fn model_id(&self) -> &str {
        &self.model
    }

    async fn complete_json(
        &self,
        system_prompt: &str,
        user_message: &str,
    ) -> Result<Completion, PlanError> {
        let url = format!("{}/chat/completions", self.base_url);
        debug!(%url, model = %self.model, "sending chat completion request");

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&self.request_body(system_prompt, user_message))
            .send()
            .await
            .map_err(|e| PlanError::Upstream(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(PlanError::Upstream(format!("HTTP {status}: {body}")));
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| PlanError::Upstream(format!("unreadable completion envelope: {e}")))?;

        Ok(parsed.into_completion())
    }
}
