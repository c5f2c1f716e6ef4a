use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::debug;

use baplan_core::models::plan::GeneratedPlan;
use baplan_core::models::survey::{NewSurvey, SurveyRecord};

use crate::error::StorageError;
use crate::store::SurveyStore;

struct Inner {
    next_id: i64,
    surveys: BTreeMap<i64, SurveyRecord>,
}

/// Process-local store. Contents are lost on restart.
///
/// The id counter and the record map sit behind one lock, so assigning an
/// id and inserting its record happen as a single step.
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                next_id: 1,
                surveys: BTreeMap::new(),
            }),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SurveyStore for MemoryStore {
    async fn create(&self, survey: NewSurvey) -> Result<SurveyRecord, StorageError> {
        let mut inner = self.inner.lock().await;
        let id = inner.next_id;
        inner.next_id += 1;

        let record = SurveyRecord::new(id, survey);
        inner.surveys.insert(id, record.clone());
        debug!(survey_id = id, "survey stored in memory");
        Ok(record)
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<SurveyRecord>, StorageError> {
        let inner = self.inner.lock().await;
        Ok(inner.surveys.get(&id).cloned())
    }

    async fn update_plan(
        &self,
        id: i64,
        plan: GeneratedPlan,
    ) -> Result<SurveyRecord, StorageError> {
        let mut inner = self.inner.lock().await;
        let record = inner
            .surveys
            .get_mut(&id)
            .ok_or(StorageError::NotFound { id })?;
        record.generated_plan = Some(plan);
        Ok(record.clone())
    }
}
