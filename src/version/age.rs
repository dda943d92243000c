//! Package age calculation

use chrono::{DateTime, Utc};

const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// Computes how many days ago a version was published
pub trait AgeCalculator: Send + Sync {
    fn calculate_age(&self, published: DateTime<Utc>) -> i64;
}

/// Age calculator backed by the system clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl AgeCalculator for SystemClock {
    fn calculate_age(&self, published: DateTime<Utc>) -> i64 {
        age_in_days(published, Utc::now())
    }
}

/// Age calculator pinned to a fixed "now"
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl AgeCalculator for FixedClock {
    fn calculate_age(&self, published: DateTime<Utc>) -> i64 {
        age_in_days(published, self.0)
    }
}

/// Whole days between `published` and `now`, rounded up
///
/// The distance is absolute: a timestamp in the future yields the same age
/// as one equally far in the past.
pub fn age_in_days(published: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    let diff_ms = (now - published).num_milliseconds().abs();
    (diff_ms + MILLIS_PER_DAY - 1) / MILLIS_PER_DAY
}
