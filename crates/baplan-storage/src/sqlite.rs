//! Single-table SQLite store.
//!
//! One row per survey in `ba_surveys`. `objectives` and `generated_plan`
//! are JSON text columns; everything else maps to a scalar column.
//! `AUTOINCREMENT` keeps SQLite from ever reusing an id.

use std::path::Path;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use rusqlite::{named_params, Connection, OptionalExtension, Row};
use tracing::{debug, info};

use baplan_core::models::plan::GeneratedPlan;
use baplan_core::models::survey::{ActivityFrequency, NewSurvey, SurveyRecord};

use crate::error::StorageError;
use crate::store::SurveyStore;

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS ba_surveys (
    id                       INTEGER PRIMARY KEY AUTOINCREMENT,
    current_mood             INTEGER NOT NULL,
    last_week_mood           INTEGER NOT NULL,
    mood_variability         INTEGER NOT NULL DEFAULT 0,
    mood_description         TEXT,
    daily_energy_mood        TEXT,
    mood_pattern_time        TEXT,
    mood_pattern_description TEXT,
    depressed_mood           INTEGER NOT NULL DEFAULT 0,
    loss_of_interest         INTEGER NOT NULL DEFAULT 0,
    weight_changes           INTEGER NOT NULL DEFAULT 0,
    sleep_disturbance        INTEGER NOT NULL DEFAULT 0,
    psychomotor_changes      INTEGER NOT NULL DEFAULT 0,
    fatigue_loss_of_energy   INTEGER NOT NULL DEFAULT 0,
    worthlessness_guilt      INTEGER NOT NULL DEFAULT 0,
    concentration_difficulty INTEGER NOT NULL DEFAULT 0,
    typical_day              TEXT,
    past_activities          TEXT,
    activity_frequency       TEXT,
    peak_energy_moments      TEXT,
    personal_interests       TEXT,
    motivators_goals         TEXT,
    positive_experience      TEXT,
    obstacles                TEXT,
    environmental_barriers   TEXT,
    barrier_details          TEXT,
    social_support           TEXT,
    community_resources      TEXT,
    objectives               TEXT NOT NULL DEFAULT '[]',
    short_term_goal          TEXT,
    generated_plan           TEXT
);
";

const INSERT: &str = "
INSERT INTO ba_surveys (
    current_mood, last_week_mood, mood_variability, mood_description,
    daily_energy_mood, mood_pattern_time, mood_pattern_description,
    depressed_mood, loss_of_interest, weight_changes, sleep_disturbance,
    psychomotor_changes, fatigue_loss_of_energy, worthlessness_guilt,
    concentration_difficulty, typical_day, past_activities, activity_frequency,
    peak_energy_moments, personal_interests, motivators_goals,
    positive_experience, obstacles, environmental_barriers, barrier_details,
    social_support, community_resources, objectives, short_term_goal
) VALUES (
    :current_mood, :last_week_mood, :mood_variability, :mood_description,
    :daily_energy_mood, :mood_pattern_time, :mood_pattern_description,
    :depressed_mood, :loss_of_interest, :weight_changes, :sleep_disturbance,
    :psychomotor_changes, :fatigue_loss_of_energy, :worthlessness_guilt,
    :concentration_difficulty, :typical_day, :past_activities, :activity_frequency,
    :peak_energy_moments, :personal_interests, :motivators_goals,
    :positive_experience, :obstacles, :environmental_barriers, :barrier_details,
    :social_support, :community_resources, :objectives, :short_term_goal
)";

/// SQLite-backed store. The connection is shared behind a mutex and every
/// query runs on the blocking pool.
#[derive(Clone)]
pub struct SqliteStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteStore {
    /// Open (or create) the database file and make sure the table exists.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let path = path.as_ref();
        let conn = Connection::open(path)?;
        info!(path = %path.display(), "opened survey database");
        Self::init(conn)
    }

    /// A private database that disappears with the store.
    pub fn open_in_memory() -> Result<Self, StorageError> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self, StorageError> {
        conn.execute_batch(SCHEMA)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    async fn with_conn<T, F>(&self, f: F) -> Result<T, StorageError>
    where
        T: Send + 'static,
        F: FnOnce(&Connection) -> Result<T, StorageError> + Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || {
            let guard = conn.lock().map_err(|_| StorageError::Poisoned)?;
            f(&guard)
        })
        .await
        .map_err(|e| StorageError::Task(e.to_string()))?
    }
}

fn insert(conn: &Connection, survey: &NewSurvey) -> Result<i64, StorageError> {
    let objectives = serde_json::to_string(&survey.objectives)?;
    conn.execute(
        INSERT,
        named_params! {
            ":current_mood": survey.current_mood,
            ":last_week_mood": survey.last_week_mood,
            ":mood_variability": survey.mood_variability,
            ":mood_description": survey.mood_description,
            ":daily_energy_mood": survey.daily_energy_mood,
            ":mood_pattern_time": survey.mood_pattern_time,
            ":mood_pattern_description": survey.mood_pattern_description,
            ":depressed_mood": survey.depressed_mood,
            ":loss_of_interest": survey.loss_of_interest,
            ":weight_changes": survey.weight_changes,
            ":sleep_disturbance": survey.sleep_disturbance,
            ":psychomotor_changes": survey.psychomotor_changes,
            ":fatigue_loss_of_energy": survey.fatigue_loss_of_energy,
            ":worthlessness_guilt": survey.worthlessness_guilt,
            ":concentration_difficulty": survey.concentration_difficulty,
            ":typical_day": survey.typical_day,
            ":past_activities": survey.past_activities,
            ":activity_frequency": survey.activity_frequency.map(ActivityFrequency::label),
            ":peak_energy_moments": survey.peak_energy_moments,
            ":personal_interests": survey.personal_interests,
            ":motivators_goals": survey.motivators_goals,
            ":positive_experience": survey.positive_experience,
            ":obstacles": survey.obstacles,
            ":environmental_barriers": survey.environmental_barriers,
            ":barrier_details": survey.barrier_details,
            ":social_support": survey.social_support,
            ":community_resources": survey.community_resources,
            ":objectives": objectives,
            ":short_term_goal": survey.short_term_goal,
        },
    )?;
    Ok(conn.last_insert_rowid())
}

/// Columns as they come off the row, before the JSON and enum columns are
/// decoded.
struct RawSurvey {
    id: i64,
    survey: NewSurvey,
    activity_frequency: Option<String>,
    objectives: String,
    generated_plan: Option<String>,
}

impl RawSurvey {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        let mut survey = NewSurvey::with_moods(row.get("current_mood")?, row.get("last_week_mood")?);
        survey.mood_variability = row.get("mood_variability")?;
        survey.mood_description = row.get("mood_description")?;
        survey.daily_energy_mood = row.get("daily_energy_mood")?;
        survey.mood_pattern_time = row.get("mood_pattern_time")?;
        survey.mood_pattern_description = row.get("mood_pattern_description")?;
        survey.depressed_mood = row.get("depressed_mood")?;
        survey.loss_of_interest = row.get("loss_of_interest")?;
        survey.weight_changes = row.get("weight_changes")?;
        survey.sleep_disturbance = row.get("sleep_disturbance")?;
        survey.psychomotor_changes = row.get("psychomotor_changes")?;
        survey.fatigue_loss_of_energy = row.get("fatigue_loss_of_energy")?;
        survey.worthlessness_guilt = row.get("worthlessness_guilt")?;
        survey.concentration_difficulty = row.get("concentration_difficulty")?;
        survey.typical_day = row.get("typical_day")?;
        survey.past_activities = row.get("past_activities")?;
        survey.peak_energy_moments = row.get("peak_energy_moments")?;
        survey.personal_interests = row.get("personal_interests")?;
        survey.motivators_goals = row.get("motivators_goals")?;
        survey.positive_experience = row.get("positive_experience")?;
        survey.obstacles = row.get("obstacles")?;
        survey.environmental_barriers = row.get("environmental_barriers")?;
        survey.barrier_details = row.get("barrier_details")?;
        survey.social_support = row.get("social_support")?;
        survey.community_resources = row.get("community_resources")?;
        survey.short_term_goal = row.get("short_term_goal")?;

        Ok(Self {
            id: row.get("id")?,
            survey,
            activity_frequency: row.get("activity_frequency")?,
            objectives: row.get("objectives")?,
            generated_plan: row.get("generated_plan")?,
        })
    }

    fn into_record(self) -> Result<SurveyRecord, StorageError> {
        let mut survey = self.survey;
        survey.objectives = serde_json::from_str(&self.objectives)?;
        survey.activity_frequency = match self.activity_frequency {
            Some(label) => Some(ActivityFrequency::from_label(&label).ok_or_else(|| {
                StorageError::Corrupt(format!(
                    "survey {}: unknown activity frequency {label:?}",
                    self.id
                ))
            })?),
            None => None,
        };
        let generated_plan = self
            .generated_plan
            .as_deref()
            .map(serde_json::from_str::<GeneratedPlan>)
            .transpose()?;

        Ok(SurveyRecord {
            id: self.id,
            survey,
            generated_plan,
        })
    }
}

fn select(conn: &Connection, id: i64) -> Result<Option<SurveyRecord>, StorageError> {
    let raw = conn
        .query_row(
            "SELECT * FROM ba_surveys WHERE id = ?1",
            [id],
            RawSurvey::from_row,
        )
        .optional()?;
    raw.map(RawSurvey::into_record).transpose()
}

#[async_trait]
impl SurveyStore for SqliteStore {
    async fn create(&self, survey: NewSurvey) -> Result<SurveyRecord, StorageError> {
        self.with_conn(move |conn| {
            let id = insert(conn, &survey)?;
            debug!(survey_id = id, "survey row inserted");
            Ok(SurveyRecord::new(id, survey))
        })
        .await
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<SurveyRecord>, StorageError> {
        self.with_conn(move |conn| select(conn, id)).await
    }

    async fn update_plan(
        &self,
        id: i64,
        plan: GeneratedPlan,
    ) -> Result<SurveyRecord, StorageError> {
        self.with_conn(move |conn| {
            let body = serde_json::to_string(&plan)?;
            let changed = conn.execute(
                "UPDATE ba_surveys SET generated_plan = ?1 WHERE id = ?2",
                rusqlite::params![body, id],
            )?;
            if changed == 0 {
                return Err(StorageError::NotFound { id });
            }
            select(conn, id)?.ok_or(StorageError::NotFound { id })
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corrupt_frequency_is_reported() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(SCHEMA).unwrap();
        conn.execute(
            "INSERT INTO ba_surveys (current_mood, last_week_mood, activity_frequency) VALUES (4, 4, 'daily')",
            [],
        )
        .unwrap();

        let err = select(&conn, 1).unwrap_err();
        assert!(matches!(err, StorageError::Corrupt(_)));
    }

    #[test]
    fn schema_is_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(SCHEMA).unwrap();
        conn.execute_batch(SCHEMA).unwrap();
    }
}
