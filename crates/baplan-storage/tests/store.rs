use std::collections::HashSet;
use std::sync::Arc;

use baplan_core::models::plan::GeneratedPlan;
use baplan_core::models::survey::{ActivityFrequency, NewSurvey};
use baplan_storage::error::StorageError;
use baplan_storage::memory::MemoryStore;
use baplan_storage::sqlite::SqliteStore;
use baplan_storage::SurveyStore;

fn sample_survey() -> NewSurvey {
    let mut survey = NewSurvey::with_moods(4, 6);
    survey.mood_variability = true;
    survey.sleep_disturbance = true;
    survey.typical_day = Some("Work, then television".to_string());
    survey.activity_frequency = Some(ActivityFrequency::OneToTwoDays);
    survey.objectives = vec!["Walk daily".to_string(), "Call my sister".to_string()];
    survey
}

fn sample_plan() -> GeneratedPlan {
    GeneratedPlan {
        summary: "Start small and build momentum.".to_string(),
        objectives: vec!["Reconnect with walking".to_string()],
        smart_goals: vec!["Walk 15 minutes on 3 weekdays".to_string()],
        action_steps: vec!["Put shoes by the door".to_string()],
        reminders: vec!["Progress over perfection".to_string()],
    }
}

async fn create_then_read(store: &dyn SurveyStore) {
    let created = store.create(sample_survey()).await.unwrap();
    assert!(created.id > 0);
    assert!(created.generated_plan.is_none());

    let fetched = store.get_by_id(created.id).await.unwrap().unwrap();
    assert_eq!(fetched, created);
}

async fn plan_update_replaces_plan(store: &dyn SurveyStore) {
    let created = store.create(sample_survey()).await.unwrap();
    let updated = store.update_plan(created.id, sample_plan()).await.unwrap();

    assert_eq!(updated.id, created.id);
    assert_eq!(updated.survey, created.survey);
    assert_eq!(updated.generated_plan, Some(sample_plan()));

    let fetched = store.get_by_id(created.id).await.unwrap().unwrap();
    assert_eq!(fetched, updated);
}

async fn unknown_id_behaviour(store: &dyn SurveyStore) {
    assert!(store.get_by_id(999).await.unwrap().is_none());

    let err = store.update_plan(999, sample_plan()).await.unwrap_err();
    assert!(matches!(err, StorageError::NotFound { id: 999 }));
    assert!(store.get_by_id(999).await.unwrap().is_none());
}

async fn ids_are_sequential(store: &dyn SurveyStore) {
    let a = store.create(sample_survey()).await.unwrap();
    let b = store.create(sample_survey()).await.unwrap();
    let c = store.create(sample_survey()).await.unwrap();
    assert!(a.id < b.id && b.id < c.id);
}

async fn concurrent_creates_get_distinct_ids(store: Arc<dyn SurveyStore>) {
    let mut handles = Vec::new();
    for _ in 0..32 {
        let store = Arc::clone(&store);
        handles.push(tokio::spawn(async move {
            store.create(sample_survey()).await.unwrap().id
        }));
    }

    let mut ids = Vec::new();
    for handle in handles {
        ids.push(handle.await.unwrap());
    }

    let unique: HashSet<i64> = ids.iter().copied().collect();
    assert_eq!(unique.len(), ids.len(), "duplicate ids: {ids:?}");
    assert!(ids.iter().all(|id| *id > 0));

    let next = store.create(sample_survey()).await.unwrap().id;
    assert!(ids.iter().all(|id| *id < next));
}

#[tokio::test]
async fn memory_create_then_read() {
    create_then_read(&MemoryStore::new()).await;
}

#[tokio::test]
async fn memory_plan_update() {
    plan_update_replaces_plan(&MemoryStore::new()).await;
}

#[tokio::test]
async fn memory_unknown_id() {
    unknown_id_behaviour(&MemoryStore::new()).await;
}

#[tokio::test]
async fn memory_ids_start_at_one() {
    let store = MemoryStore::new();
    assert_eq!(store.create(sample_survey()).await.unwrap().id, 1);
    ids_are_sequential(&store).await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn memory_concurrent_creates() {
    concurrent_creates_get_distinct_ids(Arc::new(MemoryStore::new())).await;
}

#[tokio::test]
async fn sqlite_create_then_read() {
    create_then_read(&SqliteStore::open_in_memory().unwrap()).await;
}

#[tokio::test]
async fn sqlite_plan_update() {
    plan_update_replaces_plan(&SqliteStore::open_in_memory().unwrap()).await;
}

#[tokio::test]
async fn sqlite_unknown_id() {
    unknown_id_behaviour(&SqliteStore::open_in_memory().unwrap()).await;
}

#[tokio::test]
async fn sqlite_ids_are_sequential() {
    ids_are_sequential(&SqliteStore::open_in_memory().unwrap()).await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn sqlite_concurrent_creates() {
    let store = SqliteStore::open_in_memory().unwrap();
    concurrent_creates_get_distinct_ids(Arc::new(store)).await;
}

#[tokio::test]
async fn sqlite_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("surveys.db");

    let id = {
        let store = SqliteStore::open(&path).unwrap();
        let created = store.create(sample_survey()).await.unwrap();
        store.update_plan(created.id, sample_plan()).await.unwrap();
        created.id
    };

    let reopened = SqliteStore::open(&path).unwrap();
    let record = reopened.get_by_id(id).await.unwrap().unwrap();
    assert_eq!(record.survey, sample_survey());
    assert_eq!(record.generated_plan, Some(sample_plan()));

    let next = reopened.create(sample_survey()).await.unwrap();
    assert!(next.id > id);
}
