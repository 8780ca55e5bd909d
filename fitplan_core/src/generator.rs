//! Plan generation pipeline and plan assembly.
//!
//! Generation is a straight pipeline with no feedback between stages:
//! schedule planner → day builder → prescription mapper → assembler.

use crate::builder::{build_day, ExerciseSelector};
use crate::schedule::plan_week;
use crate::{Catalog, Choice, DayPlan, Experience, Goal, PlanOverview, UserPreferences, WorkoutPlan};

/// Suggestions appended to every plan for the following week
pub const NEXT_WEEK_PROGRESSION: [&str; 3] = [
    "Increase reps by 1-2 on all sets",
    "Reduce rest times by 10 seconds",
    "Try the harder substitution for ease exercises",
];

/// Generate a weekly plan from validated preferences
pub fn generate_plan(
    catalog: &Catalog,
    prefs: &UserPreferences,
    selector: &mut dyn ExerciseSelector,
) -> WorkoutPlan {
    let difficulty = prefs.experience.difficulty();
    let schedule = plan_week(prefs.days_per_week, prefs.focus);

    let days: Vec<DayPlan> = schedule
        .into_iter()
        .enumerate()
        .map(|(index, day_type)| {
            let day_name = format!("Day {}", index + 1);
            build_day(catalog, &day_name, day_type, prefs, difficulty, &mut *selector)
        })
        .collect();

    let partial = days.iter().filter(|d| d.is_partial()).count();
    if partial > 0 {
        tracing::info!("{} of {} days are missing movement patterns", partial, days.len());
    }

    assemble(prefs, days)
}

/// Wrap built days into the final plan with summary metadata
pub fn assemble(prefs: &UserPreferences, days: Vec<DayPlan>) -> WorkoutPlan {
    WorkoutPlan {
        plan_name: plan_name(prefs.goal),
        overview: PlanOverview {
            goal: format_goal(prefs.goal),
            weekly_structure: format!(
                "{} days/week - {} focus",
                prefs.days_per_week,
                prefs.focus.as_str()
            ),
            intensity_guidance: intensity_guidance(prefs.experience, prefs.goal).to_string(),
        },
        days,
        next_week_progression: NEXT_WEEK_PROGRESSION.iter().map(|s| s.to_string()).collect(),
    }
}

/// "fat_loss" → "Fat Loss"
pub fn format_goal(goal: Goal) -> String {
    goal.as_str()
        .split('_')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

pub fn plan_name(goal: Goal) -> String {
    format!("Custom {} Plan", format_goal(goal))
}

/// Guidance keyed on experience only; `_goal` is reserved for goal-specific text
pub fn intensity_guidance(experience: Experience, _goal: Goal) -> &'static str {
    match experience {
        Experience::Beginner => "Focus on form first. Stop 2-3 reps before failure.",
        Experience::Intermediate | Experience::Advanced => {
            "Push hard but maintain perfect technique. RPE 8-9 on last sets."
        }
    }
}
