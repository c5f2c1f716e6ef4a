//! Amazon Bedrock backend via the Converse API.
//!
//! Converse has no JSON mode, so the system prompt carries the whole shape
//! instruction and [`crate::normalize`] tolerates fenced replies. The
//! `model_id` must be an inference profile ID (e.g.
//! `us.anthropic.claude-sonnet-4-20250514-v1:0`); bare foundation model IDs
//! are rejected by Converse for on-demand throughput.

use async_trait::async_trait;
use aws_sdk_bedrockruntime::types::{ContentBlock, ConversationRole, Message, SystemContentBlock};
use aws_sdk_bedrockruntime::Client;
use tracing::debug;

use baplan_core::models::token_count::TokenCount;

use crate::backend::{Completion, CompletionBackend};
use crate::error::PlanError;

pub struct BedrockBackend {
    client: Client,
    model_id: String,
}

impl BedrockBackend {
    pub fn new(config: &aws_config::SdkConfig, model_id: impl Into<String>) -> Self {
        Self {
            client: Client::new(config),
            model_id: model_id.into(),
        }
    }

    /// Build a backend from the default AWS credential chain and region.
    pub async fn from_env(model_id: impl Into<String>) -> Self {
        let config = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .load()
            .await;
        Self::new(&config, model_id)
    }
}

#[async_trait]
impl CompletionBackend for BedrockBackend {
    fn model_id(&self) -> &str {
        &self.model_id
    }

    async fn complete_json(
        &self,
        system_prompt: &str,
        user_message: &str,
    ) -> Result<Completion, PlanError> {
        debug!(model = %self.model_id, "sending converse request");

        let message = Message::builder()
            .role(ConversationRole::User)
            .content(ContentBlock::Text(user_message.to_string()))
            .build()
            .map_err(|e| PlanError::Upstream(e.to_string()))?;

        let response = self
            .client
            .converse()
            .model_id(&self.model_id)
            .system(SystemContentBlock::Text(system_prompt.to_string()))
            .messages(message)
            .send()
            .await
            .map_err(|e| PlanError::Upstream(e.into_service_error().to_string()))?;

        let text = response
            .output()
            .and_then(|o| o.as_message().ok())
            .map(|m| {
                m.content()
                    .iter()
                    .filter_map(|block| {
                        if let ContentBlock::Text(text) = block {
                            Some(text.as_str())
                        } else {
                            None
                        }
                    })
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();

        let usage = response
            .usage()
            .map(|u| TokenCount {
                input: u.input_tokens.max(0) as u64,
                output: u.output_tokens.max(0) as u64,
            })
            .unwrap_or_default();

        Ok(Completion { text, usage })
    }
}
