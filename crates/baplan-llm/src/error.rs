use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlanError {
    #[error("model returned an empty response")]
    EmptyResponse,

    #[error("model service call failed: {0}")]
    Upstream(String),

    #[error("model response did not match the plan shape: {0}")]
    MalformedResponse(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("backend configuration error: {0}")]
    Config(String),
}
