use baplan_client::error::ClientError;
use baplan_client::viewer::ViewState;
use baplan_core::models::plan::GeneratedPlan;
use baplan_core::models::survey::{NewSurvey, SurveyRecord};

fn record_with(plan: Option<GeneratedPlan>) -> SurveyRecord {
    let mut record = SurveyRecord::new(7, NewSurvey::with_moods(4, 6));
    record.generated_plan = plan;
    record
}

#[test]
fn fetch_error_is_failed_state() {
    let state = ViewState::from_fetch(Err(ClientError::Api {
        status: 404,
        message: "survey 7 not found".to_string(),
    }));
    let ViewState::Failed(reason) = &state else {
        panic!("expected failure, got {state:?}");
    };
    assert!(reason.contains("survey 7 not found"));
    assert_eq!(state.failure(), Some(reason.as_str()));
    assert!(state.render().unwrap().contains("Could not load plan"));
}

#[test]
fn record_without_plan_is_failed_state() {
    let state = ViewState::from_fetch(Ok(record_with(None)));
    assert!(matches!(state, ViewState::Failed(_)));
}

#[test]
fn loading_state_renders_placeholder() {
    assert_eq!(ViewState::Loading.render().unwrap(), "Loading plan...");
}

#[test]
fn only_non_empty_sections_render() {
    let plan = GeneratedPlan {
        summary: "Start small.".to_string(),
        objectives: vec!["Walk daily".to_string(), "See friends".to_string()],
        smart_goals: Vec::new(),
        action_steps: vec!["Set an alarm".to_string()],
        reminders: Vec::new(),
    };
    let state = ViewState::from_fetch(Ok(record_with(Some(plan))));
    assert_eq!(state.failure(), None);
    let text = state.render().unwrap();

    assert!(text.contains("survey #7"));
    assert!(text.contains("Summary\nStart small."));
    assert!(text.contains("Objectives\n  - Walk daily\n  - See friends"));
    assert!(text.contains("Action Steps\n  - Set an alarm"));
    assert!(!text.contains("SMART Goals"));
    assert!(!text.contains("Reminders"));
}

#[test]
fn summary_renders_even_when_empty() {
    let state = ViewState::from_fetch(Ok(record_with(Some(GeneratedPlan::default()))));
    let text = state.render().unwrap();
    assert!(text.contains("Summary"));
    assert!(!text.contains("Objectives"));
}
