//! The multi-step survey form.
//!
//! A [`Wizard`] walks a fixed, ordered list of [`Section`]s and accumulates
//! every answer into one draft [`NewSurvey`]. Nothing is persisted: the draft
//! lives only as long as the wizard. Submitting is only possible from the
//! last section and runs the same checks the server applies.

use baplan_core::models::field::{FieldKind, SurveyField};
use baplan_core::models::survey::{ActivityFrequency, NewSurvey, MAX_OBJECTIVES};
use baplan_core::validate;

use crate::error::WizardError;

/// A group of fields shown together on one step.
#[derive(Debug)]
pub struct Section {
    pub title: &'static str,
    pub description: &'static str,
    pub fields: &'static [SurveyField],
}

pub const SECTIONS: &[Section] = &[
    Section {
        title: "Mood Assessment",
        description: "Let's understand your current emotional state",
        fields: &[
            SurveyField::CurrentMood,
            SurveyField::LastWeekMood,
            SurveyField::MoodVariability,
            SurveyField::DepressedMood,
            SurveyField::LossOfInterest,
            SurveyField::WeightChanges,
            SurveyField::SleepDisturbance,
            SurveyField::PsychomotorChanges,
            SurveyField::FatigueLossOfEnergy,
            SurveyField::WorthlessnessGuilt,
            SurveyField::ConcentrationDifficulty,
        ],
    },
    Section {
        title: "Daily Routine and Activity",
        description: "Tell us about your daily activities and energy levels",
        fields: &[
            SurveyField::TypicalDay,
            SurveyField::PastActivities,
            SurveyField::ActivityFrequency,
            SurveyField::PeakEnergyMoments,
        ],
    },
    Section {
        title: "Personal Values",
        description: "Help us understand what matters to you",
        fields: &[
            SurveyField::PersonalInterests,
            SurveyField::MotivatorsGoals,
            SurveyField::PositiveExperience,
        ],
    },
    Section {
        title: "Challenges",
        description: "Let's identify what's holding you back",
        fields: &[
            SurveyField::Obstacles,
            SurveyField::EnvironmentalBarriers,
            SurveyField::BarrierDetails,
        ],
    },
    Section {
        title: "Support System",
        description: "Tell us about your support network",
        fields: &[SurveyField::SocialSupport, SurveyField::CommunityResources],
    },
    Section {
        title: "Goals",
        description: "Optional: Set your objectives or let AI help guide you",
        fields: &[SurveyField::Objectives, SurveyField::ShortTermGoal],
    },
];

/// A typed answer for one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Rating(i32),
    Flag(bool),
    /// Free text. Blank text clears the answer.
    Text(String),
    Frequency(ActivityFrequency),
    List(Vec<String>),
}

impl FieldValue {
    fn kind(&self) -> FieldKind {
        match self {
            FieldValue::Rating(_) => FieldKind::Rating,
            FieldValue::Flag(_) => FieldKind::Flag,
            FieldValue::Text(_) => FieldKind::Text,
            FieldValue::Frequency(_) => FieldKind::Frequency,
            FieldValue::List(_) => FieldKind::List,
        }
    }
}

fn kind_name(kind: FieldKind) -> &'static str {
    match kind {
        FieldKind::Rating => "rating",
        FieldKind::Flag => "yes/no",
        FieldKind::Text => "text",
        FieldKind::Frequency => "frequency",
        FieldKind::List => "list",
    }
}

#[derive(Debug, Clone)]
pub struct Wizard {
    step: usize,
    draft: NewSurvey,
    objective_slots: [String; MAX_OBJECTIVES],
}

impl Default for Wizard {
    fn default() -> Self {
        Self::new()
    }
}

impl Wizard {
    /// A wizard on the first step with moods at the scale midpoint and the
    /// activity frequency at "0 days".
    pub fn new() -> Self {
        let mut draft = NewSurvey::with_moods(5, 5);
        draft.activity_frequency = Some(ActivityFrequency::NoDays);
        Self {
            step: 0,
            draft,
            objective_slots: Default::default(),
        }
    }

    pub fn step(&self) -> usize {
        self.step
    }

    pub fn section(&self) -> &'static Section {
        &SECTIONS[self.step]
    }

    pub fn is_first(&self) -> bool {
        self.step == 0
    }

    pub fn is_last(&self) -> bool {
        self.step == SECTIONS.len() - 1
    }

    /// Move to the next section. Stays put on the last one.
    pub fn advance(&mut self) -> usize {
        self.step = (self.step + 1).min(SECTIONS.len() - 1);
        self.step
    }

    /// Move to the previous section. Stays put on the first one.
    pub fn retreat(&mut self) -> usize {
        self.step = self.step.saturating_sub(1);
        self.step
    }

    /// Percentage of sections reached, counting the current one.
    pub fn progress(&self) -> u8 {
        ((self.step + 1) * 100 / SECTIONS.len()) as u8
    }

    pub fn draft(&self) -> &NewSurvey {
        &self.draft
    }

    pub fn objective_slots(&self) -> &[String] {
        &self.objective_slots
    }

    pub fn update_by_name(&mut self, name: &str, value: FieldValue) -> Result<(), WizardError> {
        let field =
            SurveyField::from_name(name).ok_or_else(|| WizardError::UnknownField(name.to_string()))?;
        self.update(field, value)
    }

    /// Write one answer into the draft. The value's kind must match the
    /// field's.
    pub fn update(&mut self, field: SurveyField, value: FieldValue) -> Result<(), WizardError> {
        if value.kind() != field.kind() {
            return Err(WizardError::TypeMismatch {
                field,
                expected: kind_name(field.kind()),
            });
        }

        match value {
            FieldValue::Rating(rating) => match field {
                SurveyField::CurrentMood => self.draft.current_mood = rating,
                _ => self.draft.last_week_mood = rating,
            },
            FieldValue::Flag(flag) => {
                if let Some(slot) = flag_slot(&mut self.draft, field) {
                    *slot = flag;
                }
            }
            FieldValue::Text(text) => {
                if let Some(slot) = text_slot(&mut self.draft, field) {
                    let trimmed = text.trim();
                    *slot = (!trimmed.is_empty()).then(|| trimmed.to_string());
                }
            }
            FieldValue::Frequency(frequency) => self.draft.activity_frequency = Some(frequency),
            FieldValue::List(items) => {
                if items.len() > MAX_OBJECTIVES {
                    return Err(WizardError::TooManyObjectives {
                        max: MAX_OBJECTIVES,
                        got: items.len(),
                    });
                }
                let mut slots: [String; MAX_OBJECTIVES] = Default::default();
                for (slot, item) in slots.iter_mut().zip(items) {
                    *slot = item;
                }
                self.objective_slots = slots;
                self.sync_objectives();
            }
        }
        Ok(())
    }

    /// Fill one of the objective inputs. Blank slots are left out of the
    /// submitted list.
    pub fn set_objective(&mut self, slot: usize, text: impl Into<String>) -> Result<(), WizardError> {
        let target = self
            .objective_slots
            .get_mut(slot)
            .ok_or(WizardError::ObjectiveSlot(slot))?;
        *target = text.into();
        self.sync_objectives();
        Ok(())
    }

    fn sync_objectives(&mut self) {
        self.draft.objectives = self
            .objective_slots
            .iter()
            .map(|o| o.trim())
            .filter(|o| !o.is_empty())
            .map(str::to_string)
            .collect();
    }

    /// Hand back the finished submission.
    pub fn submit(&self) -> Result<NewSurvey, WizardError> {
        if !self.is_last() {
            return Err(WizardError::NotAtLastStep);
        }
        validate::check(&self.draft)?;
        Ok(self.draft.clone())
    }
}

fn flag_slot(draft: &mut NewSurvey, field: SurveyField) -> Option<&mut bool> {
    let slot = match field {
        SurveyField::MoodVariability => &mut draft.mood_variability,
        SurveyField::DepressedMood => &mut draft.depressed_mood,
        SurveyField::LossOfInterest => &mut draft.loss_of_interest,
        SurveyField::WeightChanges => &mut draft.weight_changes,
        SurveyField::SleepDisturbance => &mut draft.sleep_disturbance,
        SurveyField::PsychomotorChanges => &mut draft.psychomotor_changes,
        SurveyField::FatigueLossOfEnergy => &mut draft.fatigue_loss_of_energy,
        SurveyField::WorthlessnessGuilt => &mut draft.worthlessness_guilt,
        SurveyField::ConcentrationDifficulty => &mut draft.concentration_difficulty,
        _ => return None,
    };
    Some(slot)
}

fn text_slot(draft: &mut NewSurvey, field: SurveyField) -> Option<&mut Option<String>> {
    let slot = match field {
        SurveyField::MoodDescription => &mut draft.mood_description,
        SurveyField::DailyEnergyMood => &mut draft.daily_energy_mood,
        SurveyField::MoodPatternTime => &mut draft.mood_pattern_time,
        SurveyField::MoodPatternDescription => &mut draft.mood_pattern_description,
        SurveyField::TypicalDay => &mut draft.typical_day,
        SurveyField::PastActivities => &mut draft.past_activities,
        SurveyField::PeakEnergyMoments => &mut draft.peak_energy_moments,
        SurveyField::PersonalInterests => &mut draft.personal_interests,
        SurveyField::MotivatorsGoals => &mut draft.motivators_goals,
        SurveyField::PositiveExperience => &mut draft.positive_experience,
        SurveyField::Obstacles => &mut draft.obstacles,
        SurveyField::EnvironmentalBarriers => &mut draft.environmental_barriers,
        SurveyField::BarrierDetails => &mut draft.barrier_details,
        SurveyField::SocialSupport => &mut draft.social_support,
        SurveyField::CommunityResources => &mut draft.community_resources,
        SurveyField::ShortTermGoal => &mut draft.short_term_goal,
        _ => return None,
    };
    Some(slot)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_field_has_a_writable_slot() {
        let mut draft = NewSurvey::with_moods(5, 5);
        for field in SurveyField::ALL {
            let writable = match field.kind() {
                FieldKind::Flag => flag_slot(&mut draft, *field).is_some(),
                FieldKind::Text => text_slot(&mut draft, *field).is_some(),
                _ => true,
            };
            assert!(writable, "{field} has no slot");
        }
    }

    #[test]
    fn sections_cover_each_field_at_most_once() {
        let mut seen = Vec::new();
        for section in SECTIONS {
            for field in section.fields {
                assert!(!seen.contains(field), "{field} appears twice");
                seen.push(*field);
            }
        }
        assert!(seen.contains(&SurveyField::CurrentMood));
        assert!(seen.contains(&SurveyField::Objectives));
    }

    #[test]
    fn progress_reaches_full_on_last_step() {
        let mut wizard = Wizard::new();
        assert_eq!(wizard.progress(), 16);
        while !wizard.is_last() {
            wizard.advance();
        }
        assert_eq!(wizard.progress(), 100);
    }

    #[test]
    fn blank_text_clears_answer() {
        let mut wizard = Wizard::new();
        wizard
            .update(SurveyField::Obstacles, FieldValue::Text(" time ".to_string()))
            .unwrap();
        assert_eq!(wizard.draft().obstacles.as_deref(), Some("time"));
        wizard
            .update(SurveyField::Obstacles, FieldValue::Text("   ".to_string()))
            .unwrap();
        assert_eq!(wizard.draft().obstacles, None);
    }
}
