//! Day builder.
//!
//! For each workout day:
//! 1. Pick movement patterns from the day type (plus cardio for conditioning goals)
//! 2. Query the catalog for each pattern and pick one candidate
//! 3. Wrap the picks in a single "Main Circuit" block between a fixed
//!    warmup and cooldown
//!
//! Exercise selection is the only randomized step, so the picker is injected.

use crate::prescription::prescribe;
use crate::{
    BlockFormat, CardioPreference, Catalog, DayPlan, DayStatus, DayType, Difficulty, Goal,
    MovementPattern, TimedDrill, UserPreferences, WorkoutBlock,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub const MAIN_BLOCK_NAME: &str = "Main Circuit";
pub const STRETCH_SECONDS: u32 = 180;

/// Chooses one exercise among eligible candidates
pub trait ExerciseSelector {
    /// Return an index in `0..candidates`. Never called with zero candidates.
    fn pick(&mut self, candidates: usize) -> usize;
}

/// Uniform random pick, optionally seeded for reproducible plans
pub struct RandomSelector {
    rng: StdRng,
}

impl RandomSelector {
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl ExerciseSelector for RandomSelector {
    fn pick(&mut self, candidates: usize) -> usize {
        self.rng.random_range(0..candidates)
    }
}

/// Always takes the first candidate in catalog order
#[derive(Clone, Copy, Debug, Default)]
pub struct FirstCandidate;

impl ExerciseSelector for FirstCandidate {
    fn pick(&mut self, _candidates: usize) -> usize {
        0
    }
}

/// Ordered movement patterns for a day type
///
/// Order determines exercise order inside the block. Cardio is appended when
/// the user wants cardio and trains for fat loss or endurance.
pub fn patterns_for(day_type: DayType, goal: Goal, cardio: CardioPreference) -> Vec<MovementPattern> {
    use MovementPattern::*;

    let mut patterns = match day_type {
        DayType::FullBody => vec![Squat, Push, Hinge, Pull, Core],
        DayType::UpperBody => vec![Push, Pull, Core],
        DayType::LowerBody | DayType::Legs => vec![Squat, Hinge, Core],
        DayType::Push => vec![Push, Squat, Core],
        DayType::Pull => vec![Pull, Hinge, Core],
        DayType::Rest => return vec![],
    };

    if cardio != CardioPreference::None && matches!(goal, Goal::FatLoss | Goal::Endurance) {
        patterns.push(Cardio);
    }

    patterns
}

pub fn warmup() -> TimedDrill {
    TimedDrill {
        name: "Dynamic Stretching".into(),
        time_seconds: STRETCH_SECONDS,
        cues: vec!["Arm circles".into(), "Leg swings".into(), "Torso twists".into()],
    }
}

pub fn cooldown() -> TimedDrill {
    TimedDrill {
        name: "Static Stretching".into(),
        time_seconds: STRETCH_SECONDS,
        cues: vec![
            "Hamstring stretch".into(),
            "Chest stretch".into(),
            "Child's pose".into(),
        ],
    }
}

/// Build one day of the plan
///
/// A pattern with no eligible catalog entry is skipped and recorded in the
/// day's status as `Partial`, so such a day has fewer exercises than others.
pub fn build_day(
    catalog: &Catalog,
    day_name: &str,
    day_type: DayType,
    prefs: &UserPreferences,
    difficulty: Difficulty,
    selector: &mut dyn ExerciseSelector,
) -> DayPlan {
    if day_type == DayType::Rest {
        return DayPlan::rest(day_name);
    }

    let mut exercises = Vec::new();
    let mut skipped = Vec::new();

    for pattern in patterns_for(day_type, prefs.goal, prefs.cardio_preference) {
        let candidates = catalog.query(pattern, prefs.household_items_allowed, difficulty);
        if candidates.is_empty() {
            tracing::warn!(
                "No eligible {} exercise for {} (difficulty {}), skipping",
                pattern,
                day_name,
                difficulty.level()
            );
            skipped.push(pattern);
            continue;
        }

        let index = selector.pick(candidates.len());
        debug_assert!(
            index < candidates.len(),
            "selector returned index {} for {} candidates",
            index,
            candidates.len()
        );
        let choice = match candidates.get(index) {
            Some(choice) => *choice,
            None => {
                tracing::warn!(
                    "Selector returned index {} for {} {} candidates, using the first",
                    index,
                    candidates.len(),
                    pattern
                );
                candidates[0]
            }
        };
        tracing::debug!("{} {}: selected {}", day_name, pattern, choice.id);
        exercises.push(prescribe(choice, prefs.goal, difficulty));
    }

    let status = if skipped.is_empty() {
        DayStatus::Complete
    } else {
        DayStatus::Partial {
            skipped_patterns: skipped,
        }
    };

    DayPlan {
        day: day_name.to_string(),
        focus: day_type.label().to_string(),
        duration_minutes: prefs.minutes_per_session,
        warmup: vec![warmup()],
        workout: vec![WorkoutBlock {
            block_name: MAIN_BLOCK_NAME.into(),
            format: BlockFormat::Circuit,
            exercises,
        }],
        cooldown: vec![cooldown()],
        is_rest_day: false,
        status,
    }
}
