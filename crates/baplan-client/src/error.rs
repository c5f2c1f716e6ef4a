use thiserror::Error;

use baplan_core::error::ValidationError;
use baplan_core::models::field::SurveyField;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("server responded {status}: {message}")]
    Api { status: u16, message: String },

    #[error("plan rendering failed: {0}")]
    Render(String),
}

impl From<tera::Error> for ClientError {
    fn from(e: tera::Error) -> Self {
        ClientError::Render(e.to_string())
    }
}

#[derive(Debug, Error)]
pub enum WizardError {
    #[error("unknown field: {0}")]
    UnknownField(String),

    #[error("{field} expects a {expected} value")]
    TypeMismatch {
        field: SurveyField,
        expected: &'static str,
    },

    #[error("objective slot {0} does not exist")]
    ObjectiveSlot(usize),

    #[error("at most {max} objectives allowed, got {got}")]
    TooManyObjectives { max: usize, got: usize },

    #[error("the survey can only be submitted from the last step")]
    NotAtLastStep,

    #[error(transparent)]
    Invalid(#[from] ValidationError),
}
