use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use baplan_core::models::survey::{NewSurvey, SurveyRecord};
use baplan_core::models::token_count::TokenCount;
use baplan_llm::backend::{Completion, CompletionBackend};
use baplan_llm::error::PlanError;
use baplan_llm::generator::PlanGenerator;
use baplan_llm::prompt::SYSTEM_PROMPT;

/// Replies with a fixed result and remembers what it was asked.
struct ScriptedBackend {
    reply: Result<String, String>,
    seen: Mutex<Vec<(String, String)>>,
}

impl ScriptedBackend {
    fn replying(text: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Ok(text.to_string()),
            seen: Mutex::new(Vec::new()),
        })
    }

    fn failing(message: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Err(message.to_string()),
            seen: Mutex::new(Vec::new()),
        })
    }
}

#[async_trait]
impl CompletionBackend for ScriptedBackend {
    fn model_id(&self) -> &str {
        "scripted"
    }

    async fn complete_json(
        &self,
        system_prompt: &str,
        user_message: &str,
    ) -> Result<Completion, PlanError> {
        self.seen
            .lock()
            .unwrap()
            .push((system_prompt.to_string(), user_message.to_string()));
        match &self.reply {
            Ok(text) => Ok(Completion {
                text: text.clone(),
                usage: TokenCount {
                    input: 100,
                    output: 40,
                },
            }),
            Err(message) => Err(PlanError::Upstream(message.clone())),
        }
    }
}

fn record() -> SurveyRecord {
    let mut survey = NewSurvey::with_moods(3, 4);
    survey.objectives = vec!["Walk daily".to_string()];
    SurveyRecord::new(42, survey)
}

#[tokio::test]
async fn sends_full_record_with_fixed_prompt() {
    let backend = ScriptedBackend::replying(r#"{"summary":"ok","objectives":["a"]}"#);
    let generator = PlanGenerator::new(backend.clone());

    let result = generator.generate(&record()).await.unwrap();
    assert_eq!(result.model_id, "scripted");
    assert_eq!(result.usage.total(), 140);
    assert_eq!(result.plan.objectives, vec!["a"]);

    let seen = backend.seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].0, SYSTEM_PROMPT);
    let sent: serde_json::Value = serde_json::from_str(&seen[0].1).unwrap();
    assert_eq!(sent["id"], 42);
    assert_eq!(sent["currentMood"], 3);
    assert_eq!(sent["objectives"][0], "Walk daily");
    assert!(sent["generatedPlan"].is_null());
}

#[tokio::test]
async fn mapping_reply_is_normalized() {
    let backend = ScriptedBackend::replying(
        r#"{"summary":"s","objectives":{"1":"one","2":"two"},"actionSteps":{"a":"step"}}"#,
    );
    let result = PlanGenerator::new(backend).generate(&record()).await.unwrap();
    assert_eq!(result.plan.objectives, vec!["one", "two"]);
    assert_eq!(result.plan.action_steps, vec!["step"]);
    assert!(result.plan.reminders.is_empty());
}

#[tokio::test]
async fn blank_reply_is_empty_response() {
    let backend = ScriptedBackend::replying("  \n");
    let err = PlanGenerator::new(backend).generate(&record()).await.unwrap_err();
    assert!(matches!(err, PlanError::EmptyResponse));
}

#[tokio::test]
async fn unparseable_reply_is_malformed() {
    let backend = ScriptedBackend::replying("I cannot help with that.");
    let err = PlanGenerator::new(backend).generate(&record()).await.unwrap_err();
    assert!(matches!(err, PlanError::MalformedResponse(_)));
}

#[tokio::test]
async fn backend_failure_is_upstream() {
    let backend = ScriptedBackend::failing("HTTP 429 Too Many Requests: slow down");
    let err = PlanGenerator::new(backend).generate(&record()).await.unwrap_err();
    assert!(matches!(err, PlanError::Upstream(ref m) if m.contains("429")));
}
