use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use ts_rs::TS;

use super::plan::GeneratedPlan;

/// Lowest and highest value on the mood scale.
pub const MOOD_MIN: i32 = 1;
pub const MOOD_MAX: i32 = 10;

/// Upper bound on user-supplied objectives.
pub const MAX_OBJECTIVES: usize = 3;

/// Days in the past week spent on an enjoyable activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum ActivityFrequency {
    #[serde(rename = "0 days")]
    NoDays,
    #[serde(rename = "1-2 days")]
    OneToTwoDays,
    #[serde(rename = "3-4 days")]
    ThreeToFourDays,
    #[serde(rename = "5+ days")]
    FivePlusDays,
}

impl ActivityFrequency {
    pub const ALL: [ActivityFrequency; 4] = [
        ActivityFrequency::NoDays,
        ActivityFrequency::OneToTwoDays,
        ActivityFrequency::ThreeToFourDays,
        ActivityFrequency::FivePlusDays,
    ];

    /// The wire label, e.g. `"3-4 days"`.
    pub fn label(self) -> &'static str {
        match self {
            ActivityFrequency::NoDays => "0 days",
            ActivityFrequency::OneToTwoDays => "1-2 days",
            ActivityFrequency::ThreeToFourDays => "3-4 days",
            ActivityFrequency::FivePlusDays => "5+ days",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.label() == label)
    }
}

impl fmt::Display for ActivityFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A survey submission before the store has assigned an id.
///
/// Required: both mood ratings. Flags default to `false`, narrative fields
/// to `None`, objectives to empty. Range and length checks live in
/// [`crate::validate`]; a value of this type coming out of
/// [`crate::validate::parse_submission`] has passed them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct NewSurvey {
    // Mood assessment
    pub current_mood: i32,
    pub last_week_mood: i32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub mood_variability: bool,
    #[serde(default)]
    pub mood_description: Option<String>,
    #[serde(default)]
    pub daily_energy_mood: Option<String>,
    #[serde(default)]
    pub mood_pattern_time: Option<String>,
    #[serde(default)]
    pub mood_pattern_description: Option<String>,

    // Symptom checklist
    #[serde(default, deserialize_with = "null_as_default")]
    pub depressed_mood: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub loss_of_interest: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub weight_changes: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub sleep_disturbance: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub psychomotor_changes: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub fatigue_loss_of_energy: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub worthlessness_guilt: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub concentration_difficulty: bool,

    // Daily routine
    #[serde(default)]
    pub typical_day: Option<String>,
    #[serde(default)]
    pub past_activities: Option<String>,
    #[serde(default)]
    pub activity_frequency: Option<ActivityFrequency>,
    #[serde(default)]
    pub peak_energy_moments: Option<String>,

    // Values
    #[serde(default)]
    pub personal_interests: Option<String>,
    #[serde(default)]
    pub motivators_goals: Option<String>,
    #[serde(default)]
    pub positive_experience: Option<String>,

    // Challenges
    #[serde(default)]
    pub obstacles: Option<String>,
    #[serde(default)]
    pub environmental_barriers: Option<String>,
    #[serde(default)]
    pub barrier_details: Option<String>,

    // Support
    #[serde(default)]
    pub social_support: Option<String>,
    #[serde(default)]
    pub community_resources: Option<String>,

    // Goals
    #[serde(default, deserialize_with = "null_as_default")]
    pub objectives: Vec<String>,
    #[serde(default)]
    pub short_term_goal: Option<String>,
}

/// Treats an explicit `null` the same as a missing key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl NewSurvey {
    /// A submission with the given mood ratings and every optional answer
    /// left at its default.
    pub fn with_moods(current_mood: i32, last_week_mood: i32) -> Self {
        Self {
            current_mood,
            last_week_mood,
            mood_variability: false,
            mood_description: None,
            daily_energy_mood: None,
            mood_pattern_time: None,
            mood_pattern_description: None,
            depressed_mood: false,
            loss_of_interest: false,
            weight_changes: false,
            sleep_disturbance: false,
            psychomotor_changes: false,
            fatigue_loss_of_energy: false,
            worthlessness_guilt: false,
            concentration_difficulty: false,
            typical_day: None,
            past_activities: None,
            activity_frequency: None,
            peak_energy_moments: None,
            personal_interests: None,
            motivators_goals: None,
            positive_experience: None,
            obstacles: None,
            environmental_barriers: None,
            barrier_details: None,
            social_support: None,
            community_resources: None,
            objectives: Vec::new(),
            short_term_goal: None,
        }
    }
}

/// A persisted survey. `generated_plan` stays `None` until the plan update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct SurveyRecord {
    pub id: i64,
    #[serde(flatten)]
    pub survey: NewSurvey,
    pub generated_plan: Option<GeneratedPlan>,
}

impl SurveyRecord {
    pub fn new(id: i64, survey: NewSurvey) -> Self {
        Self {
            id,
            survey,
            generated_plan: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_serializes_flat_with_null_plan() {
        let mut survey = NewSurvey::with_moods(5, 5);
        survey.activity_frequency = Some(ActivityFrequency::NoDays);
        survey.objectives = vec!["Walk daily".to_string()];
        let record = SurveyRecord::new(1, survey);

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["id"], 1);
        assert_eq!(value["currentMood"], 5);
        assert_eq!(value["activityFrequency"], "0 days");
        assert_eq!(value["objectives"][0], "Walk daily");
        assert!(value["generatedPlan"].is_null());
        assert!(value.get("survey").is_none());
    }

    #[test]
    fn record_round_trips_through_json() {
        let record = SurveyRecord::new(7, NewSurvey::with_moods(3, 8));
        let json = serde_json::to_string(&record).unwrap();
        let back: SurveyRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn activity_frequency_labels() {
        assert_eq!(
            ActivityFrequency::from_label("5+ days"),
            Some(ActivityFrequency::FivePlusDays)
        );
        assert_eq!(ActivityFrequency::from_label("6 days"), None);
        assert_eq!(ActivityFrequency::OneToTwoDays.to_string(), "1-2 days");
    }
}
