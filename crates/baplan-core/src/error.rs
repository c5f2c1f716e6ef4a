use std::fmt;

use thiserror::Error;

use crate::models::field::SurveyField;

/// A single rule a submitted field broke.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldIssue {
    pub field: SurveyField,
    pub message: String,
}

impl fmt::Display for FieldIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("request body is not valid JSON: {0}")]
    Malformed(String),

    #[error("invalid survey: {0}")]
    Shape(String),

    #[error("invalid survey: {}", join_issues(.0))]
    Fields(Vec<FieldIssue>),
}

fn join_issues(issues: &[FieldIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
