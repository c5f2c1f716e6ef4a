//! Terminal prompts that drive a [`Wizard`] one section at a time.

use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, Input, Select};
use eyre::Result;

use baplan_core::models::field::{FieldKind, SurveyField};
use baplan_core::models::survey::{ActivityFrequency, NewSurvey, MOOD_MAX, MOOD_MIN};
use baplan_client::wizard::{FieldValue, Wizard};

/// Walk every section and return the submission, or `None` if the user
/// cancelled on the last step.
pub fn run(wizard: &mut Wizard) -> Result<Option<NewSurvey>> {
    let theme = ColorfulTheme::default();

    loop {
        let section = wizard.section();
        println!();
        println!("{} ({}%)", section.title, wizard.progress());
        println!("{}", section.description);

        for field in section.fields {
            ask(&theme, wizard, *field)?;
        }

        let mut choices = Vec::new();
        if wizard.is_last() {
            choices.push("Generate plan");
        } else {
            choices.push("Next");
        }
        if !wizard.is_first() {
            choices.push("Back");
        }
        if wizard.is_last() {
            choices.push("Cancel");
        }

        let picked = Select::with_theme(&theme)
            .items(&choices)
            .default(0)
            .interact()?;
        match choices[picked] {
            "Next" => {
                wizard.advance();
            }
            "Back" => {
                wizard.retreat();
            }
            "Cancel" => return Ok(None),
            _ => match wizard.submit() {
                Ok(survey) => return Ok(Some(survey)),
                Err(e) => println!("{e}"),
            },
        }
    }
}

fn ask(theme: &ColorfulTheme, wizard: &mut Wizard, field: SurveyField) -> Result<()> {
    let draft = wizard.draft();
    let question = question(field);

    let value = match field.kind() {
        FieldKind::Rating => {
            let current = match field {
                SurveyField::CurrentMood => draft.current_mood,
                _ => draft.last_week_mood,
            };
            let rating = Input::<i32>::with_theme(theme)
                .with_prompt(format!("{question} ({MOOD_MIN}-{MOOD_MAX})"))
                .default(current)
                .validate_with(|v: &i32| -> Result<(), String> {
                    if (MOOD_MIN..=MOOD_MAX).contains(v) {
                        Ok(())
                    } else {
                        Err(format!("enter a number from {MOOD_MIN} to {MOOD_MAX}"))
                    }
                })
                .interact_text()?;
            FieldValue::Rating(rating)
        }
        FieldKind::Flag => {
            let current = flag_answer(draft, field);
            let answer = Confirm::with_theme(theme)
                .with_prompt(question)
                .default(current)
                .interact()?;
            FieldValue::Flag(answer)
        }
        FieldKind::Text => {
            let current = text_answer(draft, field).unwrap_or_default();
            let text = Input::<String>::with_theme(theme)
                .with_prompt(question)
                .with_initial_text(current)
                .allow_empty(true)
                .interact_text()?;
            FieldValue::Text(text)
        }
        FieldKind::Frequency => {
            let labels: Vec<&str> = ActivityFrequency::ALL.iter().map(|f| f.label()).collect();
            let current = draft
                .activity_frequency
                .and_then(|f| ActivityFrequency::ALL.iter().position(|a| *a == f))
                .unwrap_or(0);
            let picked = Select::with_theme(theme)
                .with_prompt(question)
                .items(&labels)
                .default(current)
                .interact()?;
            FieldValue::Frequency(ActivityFrequency::ALL[picked])
        }
        FieldKind::List => {
            let slots = wizard.objective_slots().to_vec();
            for (i, current) in slots.into_iter().enumerate() {
                let text = Input::<String>::with_theme(theme)
                    .with_prompt(format!("Objective {} (optional)", i + 1))
                    .with_initial_text(current)
                    .allow_empty(true)
                    .interact_text()?;
                wizard.set_objective(i, text)?;
            }
            return Ok(());
        }
    };

    wizard.update(field, value)?;
    Ok(())
}

fn question(field: SurveyField) -> String {
    let text = match field {
        SurveyField::CurrentMood => "How would you rate your mood today?",
        SurveyField::LastWeekMood => "How would you rate your mood over the last week?",
        SurveyField::MoodVariability => "Does your mood change a lot during the day?",
        SurveyField::DepressedMood => "Depressed mood most of the day, nearly every day",
        SurveyField::LossOfInterest => "Markedly diminished interest or pleasure in activities",
        SurveyField::WeightChanges => "Significant weight loss/gain or appetite changes",
        SurveyField::SleepDisturbance => "Insomnia or hypersomnia",
        SurveyField::PsychomotorChanges => "Psychomotor agitation or retardation",
        SurveyField::FatigueLossOfEnergy => "Fatigue or loss of energy",
        SurveyField::WorthlessnessGuilt => "Feelings of worthlessness or excessive guilt",
        SurveyField::ConcentrationDifficulty => "Diminished ability to think or concentrate",
        SurveyField::ActivityFrequency => "Activity Frequency",
        _ => return field.label(),
    };
    text.to_string()
}

fn flag_answer(draft: &NewSurvey, field: SurveyField) -> bool {
    match field {
        SurveyField::MoodVariability => draft.mood_variability,
        SurveyField::DepressedMood => draft.depressed_mood,
        SurveyField::LossOfInterest => draft.loss_of_interest,
        SurveyField::WeightChanges => draft.weight_changes,
        SurveyField::SleepDisturbance => draft.sleep_disturbance,
        SurveyField::PsychomotorChanges => draft.psychomotor_changes,
        SurveyField::FatigueLossOfEnergy => draft.fatigue_loss_of_energy,
        SurveyField::WorthlessnessGuilt => draft.worthlessness_guilt,
        SurveyField::ConcentrationDifficulty => draft.concentration_difficulty,
        _ => false,
    }
}

fn text_answer(draft: &NewSurvey, field: SurveyField) -> Option<String> {
    let answer = match field {
        SurveyField::TypicalDay => &draft.typical_day,
        SurveyField::PastActivities => &draft.past_activities,
        SurveyField::PeakEnergyMoments => &draft.peak_energy_moments,
        SurveyField::PersonalInterests => &draft.personal_interests,
        SurveyField::MotivatorsGoals => &draft.motivators_goals,
        SurveyField::PositiveExperience => &draft.positive_experience,
        SurveyField::Obstacles => &draft.obstacles,
        SurveyField::EnvironmentalBarriers => &draft.environmental_barriers,
        SurveyField::BarrierDetails => &draft.barrier_details,
        SurveyField::SocialSupport => &draft.social_support,
        SurveyField::CommunityResources => &draft.community_resources,
        SurveyField::ShortTermGoal => &draft.short_term_goal,
        _ => return None,
    };
    answer.clone()
}
