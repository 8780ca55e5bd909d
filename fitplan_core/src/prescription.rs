//! Prescription mapper.
//!
//! Turns a catalog entry plus the user's goal and difficulty into sets,
//! reps, rest, tempo and target effort.

use crate::{Difficulty, ExerciseDefinition, Goal, Prescription, Substitutions};

/// Tempo used for every prescription (eccentric-pause-concentric)
pub const DEFAULT_TEMPO: &str = "2-0-2";

/// Shown when the catalog has no easier/harder variant
pub const NO_VARIANT: &str = "None defined";

/// Shown when the catalog has no joint-friendly variant
pub const REST_INSTEAD: &str = "Rest";

/// Sets, rep range and rest for a goal
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Volume {
    pub sets: u32,
    pub reps: &'static str,
    pub rest_seconds: u32,
}

/// Volume table keyed by goal
pub fn volume_for(goal: Goal) -> Volume {
    match goal {
        Goal::Strength => Volume {
            sets: 4,
            reps: "5-8",
            rest_seconds: 90,
        },
        Goal::Endurance | Goal::FatLoss => Volume {
            sets: 3,
            reps: "15-20",
            rest_seconds: 30,
        },
        Goal::MuscleGain | Goal::Mobility => Volume {
            sets: 3,
            reps: "10-12",
            rest_seconds: 60,
        },
    }
}

/// Target RPE: 7.5, 8.0 or 8.5 for difficulty 1, 2 or 3
pub fn target_rpe(difficulty: Difficulty) -> f64 {
    7.0 + 0.5 * f64::from(difficulty.level())
}

/// Map a catalog entry to a concrete prescription
pub fn prescribe(def: &ExerciseDefinition, goal: Goal, difficulty: Difficulty) -> Prescription {
    let volume = volume_for(goal);
    let hints = &def.substitutions;
    let or_fallback = |hint: &Option<String>, fallback: &str| {
        hint.clone().unwrap_or_else(|| fallback.to_string())
    };

    Prescription {
        name: def.name.clone(),
        sets: volume.sets,
        reps: volume.reps.to_string(),
        rest_seconds: volume.rest_seconds,
        tempo: DEFAULT_TEMPO.to_string(),
        rpe: target_rpe(difficulty),
        form_cues: def.cues.clone(),
        substitutions: Substitutions {
            easier: or_fallback(&hints.easier, NO_VARIANT),
            harder: or_fallback(&hints.harder, NO_VARIANT),
            knee_friendly: or_fallback(&hints.knee_friendly, REST_INSTEAD),
            wrist_friendly: or_fallback(&hints.wrist_friendly, REST_INSTEAD),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build_default_catalog;

    #[test]
    fn test_strength_volume() {
        let catalog = build_default_catalog();
        let squat = catalog.get("squat_bw").unwrap();

        let p = prescribe(squat, Goal::Strength, Difficulty::Advanced);
        assert_eq!(p.sets, 4);
        assert_eq!(p.reps, "5-8");
        assert_eq!(p.rest_seconds, 90);
        assert_eq!(p.rpe, 8.5);
    }

    #[test]
    fn test_conditioning_goals_share_volume() {
        assert_eq!(volume_for(Goal::FatLoss), volume_for(Goal::Endurance));
        let v = volume_for(Goal::FatLoss);
        assert_eq!((v.sets, v.reps, v.rest_seconds), (3, "15-20", 30));
    }

    #[test]
    fn test_hypertrophy_and_mobility_use_default_volume() {
        for goal in [Goal::MuscleGain, Goal::Mobility] {
            let v = volume_for(goal);
            assert_eq!((v.sets, v.reps, v.rest_seconds), (3, "10-12", 60));
        }
    }

    #[test]
    fn test_rpe_scales_with_difficulty() {
        assert_eq!(target_rpe(Difficulty::Foundational), 7.5);
        assert_eq!(target_rpe(Difficulty::Intermediate), 8.0);
        assert_eq!(target_rpe(Difficulty::Advanced), 8.5);
    }

    #[test]
    fn test_tempo_and_cues_copied() {
        let catalog = build_default_catalog();
        let plank = catalog.get("plank").unwrap();

        let p = prescribe(plank, Goal::MuscleGain, Difficulty::Foundational);
        assert_eq!(p.name, "Forearm Plank");
        assert_eq!(p.tempo, "2-0-2");
        assert_eq!(p.form_cues, plank.cues);
    }

    #[test]
    fn test_missing_substitutions_use_sentinels() {
        let catalog = build_default_catalog();
        // Jumping jacks only define a low-impact variant
        let jacks = catalog.get("jumping_jacks").unwrap();

        let p = prescribe(jacks, Goal::FatLoss, Difficulty::Foundational);
        assert_eq!(p.substitutions.easier, "None defined");
        assert_eq!(p.substitutions.harder, "None defined");
        assert_eq!(p.substitutions.knee_friendly, "Rest");
        assert_eq!(p.substitutions.wrist_friendly, "Rest");
    }

    #[test]
    fn test_present_substitutions_copied() {
        let catalog = build_default_catalog();
        let lunge = catalog.get("lunge_reverse").unwrap();

        let p = prescribe(lunge, Goal::Strength, Difficulty::Intermediate);
        assert_eq!(p.substitutions.easier, "Split Squat (stationary)");
        assert_eq!(p.substitutions.harder, "Jumping Lunges");
        assert_eq!(p.substitutions.knee_friendly, "Glute Bridges");
        assert_eq!(p.substitutions.wrist_friendly, "Rest");
    }
}
