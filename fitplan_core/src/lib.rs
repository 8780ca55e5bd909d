#![forbid(unsafe_code)]

//! Core domain model and business logic for the Fitplan workout generator.
//!
//! This crate provides:
//! - Domain types (exercises, preferences, plans, saved workouts)
//! - The exercise catalog and its queries
//! - Plan generation (schedule planner, day builder, prescription mapper, assembler)
//! - Questionnaire validation
//! - Saved workout persistence
//! - Request handlers tying the above together

pub mod types;
pub mod error;
pub mod catalog;
pub mod config;
pub mod logging;
pub mod schedule;
pub mod prescription;
pub mod builder;
pub mod generator;
pub mod validation;
pub mod store;
pub mod api;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use catalog::{build_default_catalog, get_default_catalog};
pub use config::Config;
pub use builder::{ExerciseSelector, FirstCandidate, RandomSelector};
pub use generator::generate_plan;
pub use validation::parse_preferences;
pub use store::{JsonFileStore, WorkoutStore, MAX_SAVED_PER_USER};
pub use api::{ApiError, ErrorBody};
