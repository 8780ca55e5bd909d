//! Request handlers for plan generation and saved workouts.
//!
//! Each handler returns either its payload or an `ApiError` carrying a status
//! code and a serializable body. Unexpected failures are logged here and
//! surfaced with a fixed message only.

use crate::builder::{ExerciseSelector, RandomSelector};
use crate::config::GenerationConfig;
use crate::generator::generate_plan;
use crate::store::WorkoutStore;
use crate::validation::parse_preferences;
use crate::{Catalog, Error, SavedWorkout, WorkoutPlan};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use uuid::Uuid;

pub const STATUS_BAD_REQUEST: u16 = 400;
pub const STATUS_NOT_FOUND: u16 = 404;
pub const STATUS_CONFLICT: u16 = 409;
pub const STATUS_INTERNAL: u16 = 500;

/// Error payload returned to the client
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ErrorBody {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ApiError {
    pub status: u16,
    pub body: ErrorBody,
}

impl ApiError {
    fn new(status: u16, message: impl Into<String>, field: Option<String>) -> Self {
        Self {
            status,
            body: ErrorBody {
                message: message.into(),
                field,
            },
        }
    }

    /// Map a library error; anything unexpected becomes a 500 with `fallback`
    pub fn from_error(err: Error, fallback: &str) -> Self {
        match err {
            Error::Validation { field, message } => {
                let field = if field.is_empty() { None } else { Some(field) };
                Self::new(STATUS_BAD_REQUEST, message, field)
            }
            Error::CapacityReached { limit } => Self::new(
                STATUS_CONFLICT,
                format!(
                    "You can save up to {} workouts. Delete one to save another.",
                    limit
                ),
                None,
            ),
            Error::NotFound(_) => Self::new(STATUS_NOT_FOUND, "Workout not found", None),
            other => {
                tracing::error!("{}: {}", fallback, other);
                Self::new(STATUS_INTERNAL, fallback, None)
            }
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.body.field {
            Some(field) => write!(f, "{} ({}): {}", self.status, field, self.body.message),
            None => write!(f, "{}: {}", self.status, self.body.message),
        }
    }
}

impl std::error::Error for ApiError {}

pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// Parse a raw request body as JSON
pub fn parse_body(raw: &str) -> ApiResult<Value> {
    serde_json::from_str(raw).map_err(|e| {
        ApiError::new(STATUS_BAD_REQUEST, format!("Malformed JSON body: {}", e), None)
    })
}

/// Exercise selector honouring the configured seed
pub fn selector_for(config: &GenerationConfig) -> RandomSelector {
    match config.seed {
        Some(seed) => RandomSelector::seeded(seed),
        None => RandomSelector::from_entropy(),
    }
}

/// Generate a plan from a raw preferences body
///
/// Waits `config.response_delay()` before returning a successful plan.
pub fn generate(
    input: &Value,
    catalog: &Catalog,
    config: &GenerationConfig,
    selector: &mut dyn ExerciseSelector,
) -> ApiResult<WorkoutPlan> {
    let prefs = parse_preferences(input).map_err(|e| {
        tracing::info!("Rejected preferences: {}", e);
        ApiError::from_error(e, "Failed to generate plan")
    })?;

    let plan = generate_plan(catalog, &prefs, selector);

    let delay = config.response_delay();
    if !delay.is_zero() {
        std::thread::sleep(delay);
    }

    Ok(plan)
}

pub fn save_plan(
    store: &mut dyn WorkoutStore,
    owner_id: &str,
    plan: WorkoutPlan,
) -> ApiResult<SavedWorkout> {
    store
        .insert(owner_id, plan)
        .map_err(|e| ApiError::from_error(e, "Failed to save workout"))
}

/// Save a client-supplied plan body
pub fn save_plan_json(
    store: &mut dyn WorkoutStore,
    owner_id: &str,
    body: &Value,
) -> ApiResult<SavedWorkout> {
    let plan: WorkoutPlan = serde_json::from_value(body.clone()).map_err(|e| {
        ApiError::new(
            STATUS_BAD_REQUEST,
            format!("Invalid workout plan: {}", e),
            Some("planData".into()),
        )
    })?;
    save_plan(store, owner_id, plan)
}

pub fn list_saved(store: &dyn WorkoutStore, owner_id: &str) -> ApiResult<Vec<SavedWorkout>> {
    store
        .list_by_owner(owner_id)
        .map_err(|e| ApiError::from_error(e, "Failed to load saved workouts"))
}

pub fn show_saved(store: &dyn WorkoutStore, owner_id: &str, id: Uuid) -> ApiResult<SavedWorkout> {
    store
        .get(owner_id, id)
        .map_err(|e| ApiError::from_error(e, "Failed to load saved workout"))
}

pub fn delete_saved(store: &mut dyn WorkoutStore, owner_id: &str, id: Uuid) -> ApiResult<()> {
    store
        .delete(owner_id, id)
        .map_err(|e| ApiError::from_error(e, "Failed to delete workout"))
}
