use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// The Behavioral Activation plan produced for one survey.
///
/// Every list is an ordered sequence of plain strings. Upstream replies that
/// use other shapes are coerced before they reach this type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct GeneratedPlan {
    pub summary: String,
    pub objectives: Vec<String>,
    pub smart_goals: Vec<String>,
    pub action_steps: Vec<String>,
    pub reminders: Vec<String>,
}

impl GeneratedPlan {
    /// The four list sections in display order, with their headings.
    pub fn sections(&self) -> [(&'static str, &[String]); 4] {
        [
            ("Objectives", self.objectives.as_slice()),
            ("SMART Goals", self.smart_goals.as_slice()),
            ("Action Steps", self.action_steps.as_slice()),
            ("Reminders", self.reminders.as_slice()),
        ]
    }
}
