//! Humanized relative timestamps ("3 days ago").

use chrono::{DateTime, Utc};

/// Size of each unit in terms of the previous one, starting from seconds.
const STEPS: [f64; 6] = [60.0, 60.0, 24.0, 7.0, 365.0 / 7.0 / 12.0, 12.0];
const UNITS: [&str; 7] = ["second", "minute", "hour", "day", "week", "month", "year"];

/// Describe `then` relative to `now`.
///
/// Counts are floored; anything under ten seconds is "just now" (or "right now"
/// when `then` is in the future).
pub fn format_relative(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let millis = (now - then).num_milliseconds();
    let future = millis < 0;
    let mut amount = millis.unsigned_abs() as f64 / 1000.0;

    let mut unit = 0;
    while unit < STEPS.len() && amount >= STEPS[unit] {
        amount /= STEPS[unit];
        unit += 1;
    }
    let amount = amount.floor() as u64;

    if unit == 0 && amount <= 9 {
        return if future { "right now" } else { "just now" }.to_string();
    }

    let name = UNITS[unit];
    let phrase = if amount > 1 || unit == 0 {
        format!("{amount} {name}s")
    } else {
        format!("1 {name}")
    };
    if future {
        format!("in {phrase}")
    } else {
        format!("{phrase} ago")
    }
}
