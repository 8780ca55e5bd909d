//! Core domain types for the workout plan generator.
//!
//! This module defines the fundamental types used throughout the system:
//! - Exercise definitions and the catalog that holds them
//! - User preferences collected by the questionnaire
//! - The generated plan (days, blocks, prescriptions)
//! - Saved workouts owned by a user

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// A closed set of string-keyed options accepted from user input.
///
/// The string form is the same one used on the wire (snake_case).
pub trait Choice: Sized + Copy + 'static {
    const ALL: &'static [Self];

    fn as_str(&self) -> &'static str;

    fn parse(value: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|c| c.as_str() == value)
    }
}

// ============================================================================
// Catalog Types
// ============================================================================

/// Movement category used to group interchangeable exercises
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum MovementPattern {
    Push,
    Pull,
    Squat,
    Hinge,
    Core,
    Cardio,
    Mobility,
}

impl Choice for MovementPattern {
    const ALL: &'static [Self] = &[
        Self::Push,
        Self::Pull,
        Self::Squat,
        Self::Hinge,
        Self::Core,
        Self::Cardio,
        Self::Mobility,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            Self::Push => "push",
            Self::Pull => "pull",
            Self::Squat => "squat",
            Self::Hinge => "hinge",
            Self::Core => "core",
            Self::Cardio => "cardio",
            Self::Mobility => "mobility",
        }
    }
}

impl fmt::Display for MovementPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Equipment an exercise needs
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Equipment {
    None,
    /// Chairs, tables, towels, door frames that need a sturdy edge
    Household,
}

/// Ordinal difficulty tier (1-3)
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Foundational = 1,
    Intermediate = 2,
    Advanced = 3,
}

impl Difficulty {
    pub fn level(self) -> u8 {
        self as u8
    }

    pub fn from_level(level: u8) -> Option<Self> {
        match level {
            1 => Some(Self::Foundational),
            2 => Some(Self::Intermediate),
            3 => Some(Self::Advanced),
            _ => None,
        }
    }
}

/// Optional substitution hints, keyed by modifier type
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct SubstitutionHints {
    pub easier: Option<String>,
    pub harder: Option<String>,
    pub knee_friendly: Option<String>,
    pub wrist_friendly: Option<String>,
    pub low_impact: Option<String>,
}

/// An exercise definition from the catalog (e.g., "Knee Pushups")
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ExerciseDefinition {
    pub id: String,
    pub name: String,
    pub pattern: MovementPattern,
    pub equipment: Equipment,
    pub difficulty: Difficulty,
    pub cues: Vec<String>,
    pub substitutions: SubstitutionHints,
}

/// The exercise library, in declaration order
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    pub exercises: Vec<ExerciseDefinition>,
}

// ============================================================================
// Preference Types
// ============================================================================

/// Training goal
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Goal {
    FatLoss,
    MuscleGain,
    Strength,
    Endurance,
    Mobility,
}

impl Choice for Goal {
    const ALL: &'static [Self] = &[
        Self::FatLoss,
        Self::MuscleGain,
        Self::Strength,
        Self::Endurance,
        Self::Mobility,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            Self::FatLoss => "fat_loss",
            Self::MuscleGain => "muscle_gain",
            Self::Strength => "strength",
            Self::Endurance => "endurance",
            Self::Mobility => "mobility",
        }
    }
}

/// Training experience, which bounds catalog difficulty
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Experience {
    Beginner,
    Intermediate,
    Advanced,
}

impl Experience {
    pub fn difficulty(self) -> Difficulty {
        match self {
            Self::Beginner => Difficulty::Foundational,
            Self::Intermediate => Difficulty::Intermediate,
            Self::Advanced => Difficulty::Advanced,
        }
    }
}

impl Choice for Experience {
    const ALL: &'static [Self] = &[Self::Beginner, Self::Intermediate, Self::Advanced];

    fn as_str(&self) -> &'static str {
        match self {
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
        }
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CardioPreference {
    None,
    LowImpact,
    HiitOk,
    RunningOk,
}

impl Choice for CardioPreference {
    const ALL: &'static [Self] = &[Self::None, Self::LowImpact, Self::HiitOk, Self::RunningOk];

    fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::LowImpact => "low_impact",
            Self::HiitOk => "hiit_ok",
            Self::RunningOk => "running_ok",
        }
    }
}

/// Body area the user wants to emphasise
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FocusArea {
    FullBody,
    Upper,
    Lower,
    Core,
    Glutes,
    Posture,
}

impl Choice for FocusArea {
    const ALL: &'static [Self] = &[
        Self::FullBody,
        Self::Upper,
        Self::Lower,
        Self::Core,
        Self::Glutes,
        Self::Posture,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            Self::FullBody => "full_body",
            Self::Upper => "upper",
            Self::Lower => "lower",
            Self::Core => "core",
            Self::Glutes => "glutes",
            Self::Posture => "posture",
        }
    }
}

/// Self-reported baseline numbers (accepted, not used by any rule)
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct Baselines {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pushups_max: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub squats_max: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plank_seconds: Option<f64>,
}

/// Validated questionnaire answers, one per generation request
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct UserPreferences {
    pub goal: Goal,
    pub experience: Experience,
    pub days_per_week: u8,
    pub minutes_per_session: u16,
    pub cardio_preference: CardioPreference,
    /// Free text such as "knee pain"; carried through, never applied
    #[serde(skip_serializing_if = "Option::is_none")]
    pub constraints: Option<String>,
    pub focus: FocusArea,
    pub household_items_allowed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub baselines: Option<Baselines>,
}

// ============================================================================
// Plan Types
// ============================================================================

/// Day-type label produced by the schedule planner
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DayType {
    FullBody,
    UpperBody,
    LowerBody,
    Push,
    Pull,
    Legs,
    Rest,
}

impl DayType {
    pub fn label(&self) -> &'static str {
        match self {
            Self::FullBody => "Full Body",
            Self::UpperBody => "Upper Body",
            Self::LowerBody => "Lower Body",
            Self::Push => "Push",
            Self::Pull => "Pull",
            Self::Legs => "Legs",
            Self::Rest => "Rest",
        }
    }
}

impl fmt::Display for DayType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Resolved substitution text for a prescription
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Substitutions {
    pub easier: String,
    pub harder: String,
    pub knee_friendly: String,
    pub wrist_friendly: String,
}

/// A concrete exercise prescription within a block
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Prescription {
    pub name: String,
    pub sets: u32,
    /// A range ("10-12") or a token ("AMRAP"), not always a single integer
    pub reps: String,
    pub rest_seconds: u32,
    pub tempo: String,
    pub rpe: f64,
    pub form_cues: Vec<String>,
    pub substitutions: Substitutions,
}

/// Training format of a block
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum BlockFormat {
    SetsReps,
    Emom,
    Amrap,
    Circuit,
    Intervals,
}

/// A named group of prescriptions within a day
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct WorkoutBlock {
    pub block_name: String,
    pub format: BlockFormat,
    pub exercises: Vec<Prescription>,
}

/// A timed warmup or cooldown entry
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct TimedDrill {
    pub name: String,
    pub time_seconds: u32,
    pub cues: Vec<String>,
}

/// Whether every requested movement pattern made it into the day
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DayStatus {
    #[default]
    Complete,
    /// No eligible catalog entry existed for these patterns
    Partial {
        skipped_patterns: Vec<MovementPattern>,
    },
}

/// One day of the weekly plan, either a workout or a rest day
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct DayPlan {
    pub day: String,
    pub focus: String,
    pub duration_minutes: u16,
    pub warmup: Vec<TimedDrill>,
    pub workout: Vec<WorkoutBlock>,
    pub cooldown: Vec<TimedDrill>,
    #[serde(default)]
    pub is_rest_day: bool,
    #[serde(default)]
    pub status: DayStatus,
}

impl DayPlan {
    /// Rest day: zero duration and empty sections
    pub fn rest(day: impl Into<String>) -> Self {
        Self {
            day: day.into(),
            focus: "Rest & Recovery".into(),
            duration_minutes: 0,
            warmup: vec![],
            workout: vec![],
            cooldown: vec![],
            is_rest_day: true,
            status: DayStatus::Complete,
        }
    }

    pub fn is_partial(&self) -> bool {
        matches!(self.status, DayStatus::Partial { .. })
    }

    /// All prescriptions across the day's blocks
    pub fn prescriptions(&self) -> impl Iterator<Item = &Prescription> {
        self.workout.iter().flat_map(|b| b.exercises.iter())
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct PlanOverview {
    pub goal: String,
    pub weekly_structure: String,
    pub intensity_guidance: String,
}

/// The complete generated weekly plan
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct WorkoutPlan {
    pub plan_name: String,
    pub overview: PlanOverview,
    pub days: Vec<DayPlan>,
    pub next_week_progression: Vec<String>,
}

// ============================================================================
// Persistence Types
// ============================================================================

/// A plan a user explicitly saved
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct SavedWorkout {
    pub id: Uuid,
    pub owner_id: String,
    pub name: String,
    pub plan: WorkoutPlan,
    pub created_at: DateTime<Utc>,
}
