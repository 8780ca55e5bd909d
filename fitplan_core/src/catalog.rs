//! Default exercise catalog and catalog queries.
//!
//! The library is built once and never mutated; callers only get shared
//! references and run pure queries over it.

use crate::types::*;
use once_cell::sync::Lazy;
use std::collections::HashSet;

/// Cached default catalog - built once and reused across all operations
static DEFAULT_CATALOG: Lazy<Catalog> = Lazy::new(build_default_catalog_internal);

/// Get a reference to the cached default catalog
pub fn get_default_catalog() -> &'static Catalog {
    &DEFAULT_CATALOG
}

/// Builds the default catalog with the built-in exercise library
///
/// **Note**: For production use, prefer `get_default_catalog()` which returns a
/// cached reference. This function is retained for testing and custom catalog creation.
pub fn build_default_catalog() -> Catalog {
    build_default_catalog_internal()
}

fn exercise(
    id: &str,
    name: &str,
    pattern: MovementPattern,
    equipment: Equipment,
    difficulty: Difficulty,
    cues: &[&str],
    substitutions: SubstitutionHints,
) -> ExerciseDefinition {
    ExerciseDefinition {
        id: id.into(),
        name: name.into(),
        pattern,
        equipment,
        difficulty,
        cues: cues.iter().map(|c| c.to_string()).collect(),
        substitutions,
    }
}

fn hint(text: &str) -> Option<String> {
    Some(text.into())
}

fn build_default_catalog_internal() -> Catalog {
    use Difficulty::{Advanced, Foundational, Intermediate};
    use MovementPattern::*;

    let exercises = vec![
        // ====================================================================
        // Push
        // ====================================================================
        exercise(
            "pushup_std",
            "Standard Pushups",
            Push,
            Equipment::None,
            Intermediate,
            &["Hands shoulder-width", "Core tight", "Chest to floor"],
            SubstitutionHints {
                easier: hint("Knee Pushups"),
                harder: hint("Decline Pushups (feet elevated)"),
                wrist_friendly: hint("Knuckle Pushups or Wall Pushups"),
                ..Default::default()
            },
        ),
        exercise(
            "pushup_knee",
            "Knee Pushups",
            Push,
            Equipment::None,
            Foundational,
            &["Knees on floor", "Straight line from head to knees"],
            SubstitutionHints {
                harder: hint("Standard Pushups"),
                wrist_friendly: hint("Wall Pushups"),
                ..Default::default()
            },
        ),
        // Feet on a chair or sofa
        exercise(
            "pushup_decline",
            "Decline Pushups",
            Push,
            Equipment::Household,
            Advanced,
            &["Feet elevated on chair", "Control the descent"],
            SubstitutionHints {
                easier: hint("Standard Pushups"),
                ..Default::default()
            },
        ),
        exercise(
            "pike_pushup",
            "Pike Pushups",
            Push,
            Equipment::None,
            Intermediate,
            &["Hips high like a V", "Lower head towards floor"],
            SubstitutionHints {
                easier: hint("Pike Hold"),
                harder: hint("Handstand Pushup negatives"),
                ..Default::default()
            },
        ),
        exercise(
            "dips_chair",
            "Chair Dips",
            Push,
            Equipment::Household,
            Intermediate,
            &["Hands on chair edge", "Lower hips, keep back close to chair"],
            SubstitutionHints {
                easier: hint("Bent-knee Chair Dips"),
                harder: hint("Straight-leg Chair Dips"),
                wrist_friendly: hint("Tricep Pushups (on floor)"),
                ..Default::default()
            },
        ),
        // ====================================================================
        // Pull
        // ====================================================================
        exercise(
            "door_row",
            "Doorframe Rows",
            Pull,
            Equipment::None,
            Foundational,
            &["Grip doorframe", "Lean back", "Pull chest to door"],
            SubstitutionHints {
                harder: hint("Single-arm Door Row"),
                ..Default::default()
            },
        ),
        exercise(
            "towel_row",
            "Floor Towel Rows",
            Pull,
            Equipment::Household,
            Intermediate,
            &["Lie on stomach", "Hold towel", "Pull towel apart and row to chest"],
            SubstitutionHints {
                easier: hint("Superman Hold"),
                ..Default::default()
            },
        ),
        exercise(
            "table_row",
            "Inverted Rows (under table)",
            Pull,
            Equipment::Household,
            Advanced,
            &["Lie under sturdy table", "Grip edge", "Pull chest to table"],
            SubstitutionHints {
                easier: hint("Doorframe Rows"),
                ..Default::default()
            },
        ),
        // ====================================================================
        // Squat
        // ====================================================================
        exercise(
            "squat_bw",
            "Bodyweight Squats",
            Squat,
            Equipment::None,
            Foundational,
            &["Feet shoulder width", "Chest up", "Knees out"],
            SubstitutionHints {
                harder: hint("Jump Squats"),
                knee_friendly: hint("Box Squats (to chair)"),
                ..Default::default()
            },
        ),
        exercise(
            "squat_jump",
            "Jump Squats",
            Squat,
            Equipment::None,
            Intermediate,
            &["Explosive jump up", "Soft landing"],
            SubstitutionHints {
                easier: hint("Bodyweight Squats"),
                knee_friendly: hint("Speed Squats (no jump)"),
                ..Default::default()
            },
        ),
        exercise(
            "lunge_reverse",
            "Reverse Lunges",
            Squat,
            Equipment::None,
            Intermediate,
            &["Step back", "Back knee hovers floor", "Front knee stable"],
            SubstitutionHints {
                easier: hint("Split Squat (stationary)"),
                harder: hint("Jumping Lunges"),
                knee_friendly: hint("Glute Bridges"),
                ..Default::default()
            },
        ),
        exercise(
            "bulgarian_split_squat",
            "Bulgarian Split Squats",
            Squat,
            Equipment::Household,
            Advanced,
            &["Back foot on chair", "Lower hips straight down"],
            SubstitutionHints {
                easier: hint("Reverse Lunges"),
                knee_friendly: hint("Step-ups"),
                ..Default::default()
            },
        ),
        // ====================================================================
        // Hinge
        // ====================================================================
        exercise(
            "glute_bridge",
            "Glute Bridges",
            Hinge,
            Equipment::None,
            Foundational,
            &["Lie on back", "Squeeze glutes to lift hips"],
            SubstitutionHints {
                harder: hint("Single-leg Glute Bridge"),
                ..Default::default()
            },
        ),
        exercise(
            "single_leg_bridge",
            "Single-Leg Glute Bridge",
            Hinge,
            Equipment::None,
            Intermediate,
            &["One foot grounded", "Drive through heel"],
            SubstitutionHints {
                easier: hint("Glute Bridge"),
                harder: hint("Feet-elevated Glute Bridge (household item)"),
                ..Default::default()
            },
        ),
        exercise(
            "romanian_deadlift_bw",
            "Single-Leg RDL (Bodyweight)",
            Hinge,
            Equipment::None,
            Intermediate,
            &["Hinge at hips", "Back flat", "Slight knee bend"],
            SubstitutionHints {
                easier: hint("Good Mornings"),
                ..Default::default()
            },
        ),
        // ====================================================================
        // Core
        // ====================================================================
        exercise(
            "plank",
            "Forearm Plank",
            Core,
            Equipment::None,
            Foundational,
            &["Elbows under shoulders", "Body in straight line", "Squeeze glutes"],
            SubstitutionHints {
                easier: hint("Knee Plank"),
                harder: hint("Plank with Shoulder Taps"),
                ..Default::default()
            },
        ),
        exercise(
            "mountain_climbers",
            "Mountain Climbers",
            Core,
            Equipment::None,
            Intermediate,
            &["Pushup position", "Drive knees to chest rapidly"],
            SubstitutionHints {
                easier: hint("Slow Mountain Climbers"),
                wrist_friendly: hint("Dead Bug"),
                ..Default::default()
            },
        ),
        exercise(
            "dead_bug",
            "Dead Bug",
            Core,
            Equipment::None,
            Foundational,
            &["Lower opposite arm and leg", "Keep lower back glued to floor"],
            SubstitutionHints {
                harder: hint("Hollow Body Hold"),
                ..Default::default()
            },
        ),
        // ====================================================================
        // Cardio
        // ====================================================================
        exercise(
            "burpees",
            "Burpees",
            Cardio,
            Equipment::None,
            Advanced,
            &["Chest to floor", "Jump up", "Clap overhead"],
            SubstitutionHints {
                easier: hint("No-Pushup Burpees"),
                low_impact: hint("Step-out Burpees (no jump)"),
                ..Default::default()
            },
        ),
        exercise(
            "jumping_jacks",
            "Jumping Jacks",
            Cardio,
            Equipment::None,
            Foundational,
            &["Full range of motion", "Light on feet"],
            SubstitutionHints {
                low_impact: hint("Step Jacks"),
                ..Default::default()
            },
        ),
        exercise(
            "high_knees",
            "High Knees",
            Cardio,
            Equipment::None,
            Intermediate,
            &["Knees to hip height", "Fast pace"],
            SubstitutionHints {
                low_impact: hint("March in Place"),
                ..Default::default()
            },
        ),
    ];

    Catalog { exercises }
}

impl Catalog {
    pub fn new(exercises: Vec<ExerciseDefinition>) -> Self {
        Self { exercises }
    }

    pub fn len(&self) -> usize {
        self.exercises.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exercises.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&ExerciseDefinition> {
        self.exercises.iter().find(|e| e.id == id)
    }

    /// Entries eligible for a movement pattern
    ///
    /// Keeps entries whose pattern matches exactly, whose equipment is
    /// `None` (or anything, when household items are allowed), and whose
    /// difficulty does not exceed `max_difficulty`. Results keep catalog
    /// declaration order.
    pub fn query(
        &self,
        pattern: MovementPattern,
        allow_household: bool,
        max_difficulty: Difficulty,
    ) -> Vec<&ExerciseDefinition> {
        self.exercises
            .iter()
            .filter(|e| e.pattern == pattern)
            .filter(|e| allow_household || e.equipment == Equipment::None)
            .filter(|e| e.difficulty <= max_difficulty)
            .collect()
    }

    /// Validate the catalog for consistency and completeness
    ///
    /// Returns a list of validation errors, or empty Vec if valid.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        let mut seen_ids = HashSet::new();

        for exercise in &self.exercises {
            if exercise.id.is_empty() {
                errors.push(format!("Exercise '{}' has empty ID", exercise.name));
            } else if !seen_ids.insert(exercise.id.as_str()) {
                errors.push(format!("Duplicate exercise ID '{}'", exercise.id));
            }
            if exercise.name.is_empty() {
                errors.push(format!("Exercise '{}' has empty name", exercise.id));
            }
            if exercise.cues.is_empty() {
                errors.push(format!("Exercise '{}' has no form cues", exercise.id));
            }
            if exercise.cues.iter().any(|c| c.trim().is_empty()) {
                errors.push(format!("Exercise '{}' has a blank form cue", exercise.id));
            }
        }

        // Every pattern the day builder asks for needs an entry a beginner
        // without household items can do
        for pattern in [
            MovementPattern::Push,
            MovementPattern::Pull,
            MovementPattern::Squat,
            MovementPattern::Hinge,
            MovementPattern::Core,
            MovementPattern::Cardio,
        ] {
            if self.query(pattern, false, Difficulty::Foundational).is_empty() {
                errors.push(format!(
                    "Catalog has no equipment-free beginner {} exercise",
                    pattern
                ));
            }
        }

        errors
    }
}
