//! Calendar day-range generation.

use chrono::NaiveDate;

/// Ordered sequence of calendar days from `start` to `end`, inclusive.
///
/// Returns an empty sequence when `start > end`. `NaiveDate` carries no
/// time-of-day, so daylight-saving or timezone artifacts can never drop or
/// duplicate a day.
pub fn days(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    if start > end {
        return Vec::new();
    }

    let span = (end - start).num_days() as usize + 1;
    let mut out = Vec::with_capacity(span);
    let mut current = start;
    while current <= end {
        out.push(current);
        match current.succ_opt() {
            Some(next) => current = next,
            None => break,
        }
    }
    out
}
