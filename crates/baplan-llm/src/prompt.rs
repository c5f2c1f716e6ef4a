use baplan_core::models::survey::SurveyRecord;

use crate::error::PlanError;

pub const SYSTEM_PROMPT: &str = "\
You are an expert in Behavioral Activation therapy. \
Generate a personalized plan based on the user's survey responses. \
Include preliminary objectives and SMART goal guidance. \
Format the response as a single JSON object with the keys: \
summary (a string), objectives, smartGoals, actionSteps, reminders \
(each an array of strings). Return only the JSON object.";

/// The user turn: the full survey record as JSON.
pub fn build_user_message(record: &SurveyRecord) -> Result<String, PlanError> {
    Ok(serde_json::to_string(record)?)
}
