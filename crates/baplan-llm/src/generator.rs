use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;

use baplan_core::models::plan::GeneratedPlan;
use baplan_core::models::survey::SurveyRecord;
use baplan_core::models::token_count::TokenCount;

use crate::backend::CompletionBackend;
use crate::error::PlanError;
use crate::{normalize, prompt};

/// One finished generation, before the plan is persisted.
#[derive(Debug, Clone)]
pub struct GenerationResult {
    pub id: Uuid,
    pub model_id: String,
    pub usage: TokenCount,
    pub plan: GeneratedPlan,
}

/// Turns survey records into plans using whichever backend it was built
/// with. One attempt per call.
#[derive(Clone)]
pub struct PlanGenerator {
    backend: Arc<dyn CompletionBackend>,
}

impl PlanGenerator {
    pub fn new(backend: Arc<dyn CompletionBackend>) -> Self {
        Self { backend }
    }

    pub fn model_id(&self) -> &str {
        self.backend.model_id()
    }

    /// Send the record to the model and coerce its reply into a plan.
    pub async fn generate(&self, record: &SurveyRecord) -> Result<GenerationResult, PlanError> {
        let generation_id = Uuid::new_v4();
        let model_id = self.backend.model_id().to_string();
        info!(%generation_id, survey_id = record.id, model = %model_id, "starting plan generation");

        let user_message = prompt::build_user_message(record)?;
        let completion = self
            .backend
            .complete_json(prompt::SYSTEM_PROMPT, &user_message)
            .await?;

        if completion.text.trim().is_empty() {
            warn!(%generation_id, survey_id = record.id, "model returned no content");
            return Err(PlanError::EmptyResponse);
        }

        let plan = normalize::parse_plan(&completion.text)?;

        info!(
            %generation_id,
            survey_id = record.id,
            input_tokens = completion.usage.input,
            output_tokens = completion.usage.output,
            "plan generation complete"
        );

        Ok(GenerationResult {
            id: generation_id,
            model_id,
            usage: completion.usage,
            plan,
        })
    }
}
