use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::Json;
use tracing::{error, info};

use baplan_core::models::survey::SurveyRecord;
use baplan_core::validate;

use crate::error::ApiError;
use crate::state::AppState;

/// Validate, store, generate, persist the plan, respond.
///
/// A generation failure leaves the stored survey without a plan; it is not
/// rolled back.
pub async fn create_survey(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<SurveyRecord>, ApiError> {
    let survey = validate::parse_submission(&body)?;

    let record = state.store.create(survey).await?;
    info!(survey_id = record.id, "survey created");

    let generation = state.generator.generate(&record).await.map_err(|e| {
        error!(survey_id = record.id, error = %e, "plan generation failed, survey left without a plan");
        ApiError::from(e)
    })?;

    let updated = state
        .store
        .update_plan(record.id, generation.plan)
        .await
        .map_err(|e| {
            error!(survey_id = record.id, error = %e, "failed to store generated plan");
            ApiError::from(e)
        })?;

    info!(
        survey_id = updated.id,
        generation_id = %generation.id,
        model = %generation.model_id,
        "plan stored"
    );

    Ok(Json(updated))
}

pub async fn get_survey(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SurveyRecord>, ApiError> {
    let id: i64 = id
        .parse()
        .map_err(|_| ApiError::BadRequest(format!("invalid survey id: {id:?}")))?;

    let record = state
        .store
        .get_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("survey {id} not found")))?;

    Ok(Json(record))
}
