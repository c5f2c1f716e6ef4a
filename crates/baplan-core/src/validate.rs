//! Submission validation.
//!
//! Parsing enforces presence and JSON types (missing `currentMood`, a string
//! where a flag belongs, an unknown activity frequency). [`check`] then
//! enforces the rules serde cannot express and reports every broken rule at
//! once rather than stopping at the first.

use serde_json::error::Category;

use crate::error::{FieldIssue, ValidationError};
use crate::models::field::SurveyField;
use crate::models::survey::{NewSurvey, MAX_OBJECTIVES, MOOD_MAX, MOOD_MIN};

/// Parse and validate a raw request body into a [`NewSurvey`].
pub fn parse_submission(body: &[u8]) -> Result<NewSurvey, ValidationError> {
    let survey: NewSurvey = serde_json::from_slice(body).map_err(|e| match e.classify() {
        Category::Data => ValidationError::Shape(e.to_string()),
        Category::Syntax | Category::Eof | Category::Io => {
            ValidationError::Malformed(e.to_string())
        }
    })?;
    check(&survey)?;
    Ok(survey)
}

/// Check range and length rules on an already-typed submission.
pub fn check(survey: &NewSurvey) -> Result<(), ValidationError> {
    let mut issues = Vec::new();

    for (field, value) in [
        (SurveyField::CurrentMood, survey.current_mood),
        (SurveyField::LastWeekMood, survey.last_week_mood),
    ] {
        if !(MOOD_MIN..=MOOD_MAX).contains(&value) {
            issues.push(FieldIssue {
                field,
                message: format!("must be between {MOOD_MIN} and {MOOD_MAX}, got {value}"),
            });
        }
    }

    if survey.objectives.len() > MAX_OBJECTIVES {
        issues.push(FieldIssue {
            field: SurveyField::Objectives,
            message: format!(
                "at most {MAX_OBJECTIVES} objectives allowed, got {}",
                survey.objectives.len()
            ),
        });
    }
    if let Some(i) = survey.objectives.iter().position(|o| o.trim().is_empty()) {
        issues.push(FieldIssue {
            field: SurveyField::Objectives,
            message: format!("objective {} is blank", i + 1),
        });
    }

    if issues.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::Fields(issues))
    }
}
