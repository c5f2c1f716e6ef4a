use async_trait::async_trait;

use baplan_core::models::token_count::TokenCount;

use crate::error::PlanError;

/// Raw reply from a model backend.
#[derive(Debug, Clone, Default)]
pub struct Completion {
    /// Concatenated text content. Empty when the service returned none.
    pub text: String,
    pub usage: TokenCount,
}

/// A text-generation service that can be asked for a JSON object.
///
/// Backends report transport and service failures as
/// [`PlanError::Upstream`]. An empty reply is not an error at this level;
/// the generator decides what an empty reply means.
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    /// Identifier of the model this backend calls, for logs.
    fn model_id(&self) -> &str;

    async fn complete_json(
        &self,
        system_prompt: &str,
        user_message: &str,
    ) -> Result<Completion, PlanError>;
}
