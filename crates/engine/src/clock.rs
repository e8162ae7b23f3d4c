//! Explicit clock input for time-dependent transitions.

use chrono::NaiveDate;
use pacer_core::Time;

/// The clock values a transition is allowed to see.
///
/// The reducer never reads a global clock; every time-dependent computation
/// takes this as an explicit input so tests can pin arbitrary dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Clock {
    /// "Today" as a date-only value; the start of every plan window
    pub today: NaiveDate,

    /// Wall-clock instant stamped onto created entities
    pub now: Time,
}

impl Clock {
    /// Clock derived from a wall-clock instant.
    pub fn at(now: Time) -> Self {
        Self {
            today: now.date_naive(),
            now,
        }
    }

    /// Clock pinned to a fixed date, with `now` at noon UTC of that day.
    pub fn on(today: NaiveDate) -> Self {
        let noon = today
            .and_hms_opt(12, 0, 0)
            .expect("noon is a valid time of day");
        Self {
            today,
            now: noon.and_utc(),
        }
    }
}
