//! Questionnaire input validation.
//!
//! Raw input is a JSON object. Fields are checked in a fixed order and the
//! first failure is returned as `Error::Validation` with a dotted field path
//! (for example `baselines.plank_seconds`). Unknown fields are ignored.

use crate::{
    Baselines, CardioPreference, Choice, Error, Experience, FocusArea, Goal, Result,
    UserPreferences,
};
use serde_json::{Map, Value};

pub const DAYS_PER_WEEK: (i64, i64) = (3, 7);
pub const MINUTES_PER_SESSION: (i64, i64) = (15, 60);

/// Validate a raw request body into `UserPreferences`
pub fn parse_preferences(input: &Value) -> Result<UserPreferences> {
    let obj = input
        .as_object()
        .ok_or_else(|| Error::validation("", format!("Expected object, received {}", kind(input))))?;

    let prefs = UserPreferences {
        goal: required_choice::<Goal>(obj, "goal")?,
        experience: required_choice::<Experience>(obj, "experience")?,
        days_per_week: required_int(obj, "days_per_week", DAYS_PER_WEEK)? as u8,
        minutes_per_session: required_int(obj, "minutes_per_session", MINUTES_PER_SESSION)?
            as u16,
        cardio_preference: required_choice::<CardioPreference>(obj, "cardio_preference")?,
        constraints: optional_string(obj, "constraints")?,
        focus: required_choice::<FocusArea>(obj, "focus")?,
        household_items_allowed: required_bool(obj, "household_items_allowed")?,
        baselines: optional_baselines(obj)?,
    };

    if prefs.constraints.is_some() || prefs.baselines.is_some() {
        tracing::debug!(
            "Accepted constraints {:?} and baselines {:?} (not used by generation rules)",
            prefs.constraints,
            prefs.baselines
        );
    }

    Ok(prefs)
}

/// JSON type name as shown in validation messages
fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Only an absent key counts as missing; an explicit `null` is type-checked
fn present<'a>(obj: &'a Map<String, Value>, field: &str) -> Option<&'a Value> {
    obj.get(field)
}

fn required<'a>(obj: &'a Map<String, Value>, field: &str) -> Result<&'a Value> {
    present(obj, field).ok_or_else(|| Error::validation(field, "Required"))
}

fn required_choice<T: Choice>(obj: &Map<String, Value>, field: &str) -> Result<T> {
    let value = required(obj, field)?;
    let options = || {
        T::ALL
            .iter()
            .map(|c| format!("'{}'", c.as_str()))
            .collect::<Vec<_>>()
            .join(" | ")
    };

    match value.as_str() {
        Some(s) => T::parse(s).ok_or_else(|| {
            Error::validation(
                field,
                format!("Invalid enum value. Expected {}, received '{}'", options(), s),
            )
        }),
        None => Err(Error::validation(
            field,
            format!("Expected {}, received {}", options(), kind(value)),
        )),
    }
}

fn required_int(obj: &Map<String, Value>, field: &str, (min, max): (i64, i64)) -> Result<i64> {
    let value = required(obj, field)?;
    let number = value.as_f64().ok_or_else(|| {
        Error::validation(field, format!("Expected number, received {}", kind(value)))
    })?;

    if number < min as f64 {
        return Err(Error::validation(
            field,
            format!("Number must be greater than or equal to {}", min),
        ));
    }
    if number > max as f64 {
        return Err(Error::validation(
            field,
            format!("Number must be less than or equal to {}", max),
        ));
    }
    if number.fract() != 0.0 {
        return Err(Error::validation(field, "Expected integer, received float"));
    }

    Ok(number as i64)
}

fn required_bool(obj: &Map<String, Value>, field: &str) -> Result<bool> {
    let value = required(obj, field)?;
    value.as_bool().ok_or_else(|| {
        Error::validation(field, format!("Expected boolean, received {}", kind(value)))
    })
}

fn optional_string(obj: &Map<String, Value>, field: &str) -> Result<Option<String>> {
    match present(obj, field) {
        None => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(other) => Err(Error::validation(
            field,
            format!("Expected string, received {}", kind(other)),
        )),
    }
}

fn optional_number(obj: &Map<String, Value>, parent: &str, field: &str) -> Result<Option<f64>> {
    match present(obj, field) {
        None => Ok(None),
        Some(value) => value.as_f64().map(Some).ok_or_else(|| {
            Error::validation(
                format!("{}.{}", parent, field),
                format!("Expected number, received {}", kind(value)),
            )
        }),
    }
}

fn optional_baselines(obj: &Map<String, Value>) -> Result<Option<Baselines>> {
    let Some(value) = present(obj, "baselines") else {
        return Ok(None);
    };
    let inner = value.as_object().ok_or_else(|| {
        Error::validation(
            "baselines",
            format!("Expected object, received {}", kind(value)),
        )
    })?;

    Ok(Some(Baselines {
        pushups_max: optional_number(inner, "baselines", "pushups_max")?,
        squats_max: optional_number(inner, "baselines", "squats_max")?,
        plank_seconds: optional_number(inner, "baselines", "plank_seconds")?,
    }))
}
