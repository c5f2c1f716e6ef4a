use async_trait::async_trait;

use baplan_core::models::plan::GeneratedPlan;
use baplan_core::models::survey::{NewSurvey, SurveyRecord};

use crate::error::StorageError;

/// The only writer of survey records.
///
/// Implementations assign ids atomically: concurrent `create` calls get
/// distinct, increasing ids and an id is never handed out twice.
#[async_trait]
pub trait SurveyStore: Send + Sync {
    /// Store a validated submission under the next unused id. The returned
    /// record has no plan yet.
    async fn create(&self, survey: NewSurvey) -> Result<SurveyRecord, StorageError>;

    /// `Ok(None)` when no record has this id.
    async fn get_by_id(&self, id: i64) -> Result<Option<SurveyRecord>, StorageError>;

    /// Replace the plan of an existing record, returning the updated record.
    ///
    /// Fails with [`StorageError::NotFound`] and leaves the store untouched
    /// when the id is unknown.
    async fn update_plan(&self, id: i64, plan: GeneratedPlan)
    -> Result<SurveyRecord, StorageError>;
}
