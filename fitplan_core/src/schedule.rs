//! Weekly schedule planner.
//!
//! Maps (days per week, focus area) to an ordered list of day types. This is
//! a fixed lookup table:
//! - Upper focus: 3 and 4 day weeks lean on upper-body days
//! - Lower/glutes focus: 3 and 4 day weeks lean on lower-body days
//! - Everything else: full body, upper/lower, or push/pull/legs by day count

use crate::{Choice, DayType, FocusArea};

/// Push/pull/legs rotation used for 5+ day weeks
const PPL_CYCLE: [DayType; 3] = [DayType::Push, DayType::Pull, DayType::Legs];

/// Plan the sequence of day types for a week
///
/// The result always has exactly `days_per_week` entries. Weeks of six or
/// more days repeat the push/pull/legs rotation, so a seven-day week ends
/// with a second Push day.
pub fn plan_week(days_per_week: u8, focus: FocusArea) -> Vec<DayType> {
    use DayType::*;

    let week = match (focus, days_per_week) {
        (FocusArea::Upper, 3) => vec![UpperBody, UpperBody, FullBody],
        (FocusArea::Upper, 4) => vec![UpperBody, LowerBody, UpperBody, LowerBody],
        (FocusArea::Lower | FocusArea::Glutes, 3) => vec![LowerBody, UpperBody, LowerBody],
        (FocusArea::Lower | FocusArea::Glutes, 4) => {
            vec![LowerBody, UpperBody, LowerBody, UpperBody]
        }
        (_, 3) => vec![FullBody, FullBody, FullBody],
        (_, 4) => vec![UpperBody, LowerBody, UpperBody, LowerBody],
        (_, 5) => vec![Push, Pull, Legs, UpperBody, LowerBody],
        (_, n) if n >= 6 => PPL_CYCLE.iter().copied().cycle().take(n as usize).collect(),
        (_, n) => vec![FullBody; n as usize],
    };

    tracing::info!(
        "Planned {} day week ({} focus): {:?}",
        days_per_week,
        focus.as_str(),
        week.iter().map(DayType::label).collect::<Vec<_>>()
    );

    week
}
