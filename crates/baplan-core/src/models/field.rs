//! Field names of a survey submission.
//!
//! The form wizard writes answers keyed by these names and validation
//! reports issues against them, so both sides agree on the camelCase wire
//! spelling.

use std::fmt;

/// The kind of value a field holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Integer on the 1..=10 mood scale.
    Rating,
    Flag,
    Text,
    Frequency,
    List,
}

macro_rules! survey_fields {
    ($($variant:ident => $name:literal, $kind:ident;)+) => {
        /// Every answer a survey can carry.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum SurveyField {
            $($variant,)+
        }

        impl SurveyField {
            pub const ALL: &'static [SurveyField] = &[$(SurveyField::$variant,)+];

            /// camelCase name used on the wire.
            pub fn name(self) -> &'static str {
                match self {
                    $(SurveyField::$variant => $name,)+
                }
            }

            pub fn kind(self) -> FieldKind {
                match self {
                    $(SurveyField::$variant => FieldKind::$kind,)+
                }
            }

            pub fn from_name(name: &str) -> Option<Self> {
                match name {
                    $($name => Some(SurveyField::$variant),)+
                    _ => None,
                }
            }
        }
    };
}

survey_fields! {
    CurrentMood => "currentMood", Rating;
    LastWeekMood => "lastWeekMood", Rating;
    MoodVariability => "moodVariability", Flag;
    MoodDescription => "moodDescription", Text;
    DailyEnergyMood => "dailyEnergyMood", Text;
    MoodPatternTime => "moodPatternTime", Text;
    MoodPatternDescription => "moodPatternDescription", Text;
    DepressedMood => "depressedMood", Flag;
    LossOfInterest => "lossOfInterest", Flag;
    WeightChanges => "weightChanges", Flag;
    SleepDisturbance => "sleepDisturbance", Flag;
    PsychomotorChanges => "psychomotorChanges", Flag;
    FatigueLossOfEnergy => "fatigueLossOfEnergy", Flag;
    WorthlessnessGuilt => "worthlessnessGuilt", Flag;
    ConcentrationDifficulty => "concentrationDifficulty", Flag;
    TypicalDay => "typicalDay", Text;
    PastActivities => "pastActivities", Text;
    ActivityFrequency => "activityFrequency", Frequency;
    PeakEnergyMoments => "peakEnergyMoments", Text;
    PersonalInterests => "personalInterests", Text;
    MotivatorsGoals => "motivatorsGoals", Text;
    PositiveExperience => "positiveExperience", Text;
    Obstacles => "obstacles", Text;
    EnvironmentalBarriers => "environmentalBarriers", Text;
    BarrierDetails => "barrierDetails", Text;
    SocialSupport => "socialSupport", Text;
    CommunityResources => "communityResources", Text;
    Objectives => "objectives", List;
    ShortTermGoal => "shortTermGoal", Text;
}

impl SurveyField {
    /// Human-readable label, e.g. `"Typical Day"` for `typicalDay`.
    pub fn label(self) -> String {
        let mut label = String::new();
        for (i, c) in self.name().chars().enumerate() {
            if i == 0 {
                label.extend(c.to_uppercase());
            } else if c.is_ascii_uppercase() {
                label.push(' ');
                label.push(c);
            } else {
                label.push(c);
            }
        }
        label
    }
}

impl fmt::Display for SurveyField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip() {
        for field in SurveyField::ALL {
            assert_eq!(SurveyField::from_name(field.name()), Some(*field));
        }
        assert_eq!(SurveyField::from_name("id"), None);
    }

    #[test]
    fn label_splits_camel_case() {
        assert_eq!(SurveyField::TypicalDay.label(), "Typical Day");
        assert_eq!(SurveyField::Obstacles.label(), "Obstacles");
        assert_eq!(
            SurveyField::FatigueLossOfEnergy.label(),
            "Fatigue Loss Of Energy"
        );
    }
}
