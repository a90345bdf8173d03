//! Recurrence rules for preventive maintenance.
//!
//! A preventive request may carry a rule such as "every 30 days". When an
//! occurrence is repaired, the engine generates the next one.
//!
//! # Cadence
//!
//! The next start is computed from the current occurrence's *scheduled*
//! start, not from the completion time. A monthly check repaired two days
//! late still recurs on its original cadence instead of drifting.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Interval unit for a recurrence rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RecurrenceUnit {
    Hours,
    Days,
    Weeks,
}

/// A recurrence rule: repeat every `every` units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecurrenceRule {
    /// Interval count (must be non-zero).
    pub every: u32,
    /// Interval unit.
    pub unit: RecurrenceUnit,
}

impl RecurrenceRule {
    /// Creates a rule repeating every `every` units.
    pub fn new(every: u32, unit: RecurrenceUnit) -> Self {
        Self { every, unit }
    }

    /// Creates an every-n-hours rule.
    pub fn hours(every: u32) -> Self {
        Self::new(every, RecurrenceUnit::Hours)
    }

    /// Creates an every-n-days rule.
    pub fn days(every: u32) -> Self {
        Self::new(every, RecurrenceUnit::Days)
    }

    /// Creates an every-n-weeks rule.
    pub fn weeks(every: u32) -> Self {
        Self::new(every, RecurrenceUnit::Weeks)
    }

    /// The interval as a duration.
    pub fn interval(&self) -> Duration {
        let every = i64::from(self.every);
        match self.unit {
            RecurrenceUnit::Hours => Duration::hours(every),
            RecurrenceUnit::Days => Duration::days(every),
            RecurrenceUnit::Weeks => Duration::weeks(every),
        }
    }

    /// Next occurrence start, one interval after the current start.
    pub fn next_start(&self, current_start: DateTime<Utc>) -> DateTime<Utc> {
        current_start + self.interval()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_interval_units() {
        assert_eq!(RecurrenceRule::hours(6).interval(), Duration::hours(6));
        assert_eq!(RecurrenceRule::days(30).interval(), Duration::days(30));
        assert_eq!(RecurrenceRule::weeks(2).interval(), Duration::days(14));
    }

    #[test]
    fn test_next_start_preserves_cadence() {
        let scheduled = Utc.with_ymd_and_hms(2025, 1, 1, 9, 0, 0).unwrap();
        let rule = RecurrenceRule::days(30);
        // Completion date is irrelevant; only the scheduled start counts.
        assert_eq!(
            rule.next_start(scheduled),
            Utc.with_ymd_and_hms(2025, 1, 31, 9, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_serde_wire_names() {
        let rule = RecurrenceRule::days(30);
        let json = serde_json::to_string(&rule).unwrap();
        assert!(json.contains("\"DAYS\""));
        let back: RecurrenceRule = serde_json::from_str(&json).unwrap();
        assert_eq!(back, rule);
    }
}
