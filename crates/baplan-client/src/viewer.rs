//! Displaying a stored plan.

use baplan_core::models::plan::GeneratedPlan;
use baplan_core::models::survey::SurveyRecord;

use crate::error::ClientError;
use crate::render;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanView {
    pub id: i64,
    pub plan: GeneratedPlan,
}

/// What the viewer shows for one survey.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewState {
    Loading,
    Failed(String),
    Ready(PlanView),
}

impl ViewState {
    /// Settle a finished fetch. A record without a plan is a failure from
    /// the viewer's point of view.
    pub fn from_fetch(result: Result<SurveyRecord, ClientError>) -> Self {
        match result {
            Ok(SurveyRecord {
                id,
                generated_plan: Some(plan),
                ..
            }) => ViewState::Ready(PlanView { id, plan }),
            Ok(record) => {
                ViewState::Failed(format!("survey {} has no generated plan", record.id))
            }
            Err(e) => ViewState::Failed(e.to_string()),
        }
    }

    /// Why the viewer has no plan to show, if it settled without one.
    pub fn failure(&self) -> Option<&str> {
        match self {
            ViewState::Failed(reason) => Some(reason.as_str()),
            _ => None,
        }
    }

    pub fn render(&self) -> Result<String, ClientError> {
        match self {
            ViewState::Loading => Ok("Loading plan...".to_string()),
            ViewState::Failed(reason) => Ok(format!("Could not load plan: {reason}")),
            ViewState::Ready(view) => render::render_plan(view.id, &view.plan),
        }
    }
}
