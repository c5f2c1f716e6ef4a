use std::sync::Arc;

use baplan_llm::backend::CompletionBackend;
use baplan_llm::bedrock::BedrockBackend;
use baplan_llm::generator::PlanGenerator;
use baplan_llm::openai::OpenAiBackend;
use baplan_storage::memory::MemoryStore;
use baplan_storage::sqlite::SqliteStore;
use baplan_storage::SurveyStore;

use crate::config::{ProviderConfig, ServerConfig, StoreConfig};

/// Shared application state, injected into all route handlers via Axum state.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn SurveyStore>,
    pub generator: PlanGenerator,
}

impl AppState {
    pub fn new(store: Arc<dyn SurveyStore>, generator: PlanGenerator) -> Self {
        Self { store, generator }
    }

    /// Open the configured store and build the configured model backend.
    pub async fn from_config(config: &ServerConfig) -> eyre::Result<Self> {
        let store: Arc<dyn SurveyStore> = match &config.store {
            StoreConfig::Memory => {
                tracing::warn!("using in-memory store; surveys are lost on restart");
                Arc::new(MemoryStore::new())
            }
            StoreConfig::Sqlite { path } => Arc::new(SqliteStore::open(path)?),
        };

        let backend: Arc<dyn CompletionBackend> = match &config.provider {
            ProviderConfig::OpenAi(openai) => Arc::new(OpenAiBackend::new(openai.clone())?),
            ProviderConfig::Bedrock { model_id } => {
                Arc::new(BedrockBackend::from_env(model_id.clone()).await)
            }
        };

        Ok(Self::new(store, PlanGenerator::new(backend)))
    }
}
