//! Time window model.
//!
//! A window is the half-open interval [start, end) a maintenance request
//! occupies. Conflict detection is defined entirely in terms of window
//! overlap, so the comparison rule lives here.
//!
//! # Overlap Semantics
//!
//! Two windows overlap iff `a.start < b.end && b.start < a.end`. With
//! half-open intervals, a window ending at 10:00 and another starting at
//! 10:00 do NOT overlap: a technician can finish one job and start the
//! next back-to-back.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// A half-open time interval [start, end).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct TimeWindow {
    /// Interval start (inclusive).
    pub start: DateTime<Utc>,
    /// Interval end (exclusive).
    pub end: DateTime<Utc>,
}

impl TimeWindow {
    /// Creates a new time window.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    /// Creates a window from a start time and a duration in minutes.
    pub fn from_start(start: DateTime<Utc>, duration_minutes: i64) -> Self {
        Self {
            start,
            end: start + Duration::minutes(duration_minutes),
        }
    }

    /// Length of this window.
    #[inline]
    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// Whether a timestamp falls within this window.
    #[inline]
    pub fn contains(&self, t: DateTime<Utc>) -> bool {
        t >= self.start && t < self.end
    }

    /// Whether two windows overlap (half-open comparison).
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start < other.end && other.start < self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 10, h, m, 0).unwrap()
    }

    #[test]
    fn test_window_contains() {
        let w = TimeWindow::new(at(9, 0), at(10, 0));
        assert!(w.contains(at(9, 0)));
        assert!(w.contains(at(9, 59)));
        assert!(!w.contains(at(10, 0))); // exclusive end
        assert!(!w.contains(at(8, 59)));
    }

    #[test]
    fn test_window_overlap() {
        let a = TimeWindow::new(at(10, 0), at(12, 0));
        let b = TimeWindow::new(at(11, 0), at(13, 0));
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
    }

    #[test]
    fn test_touching_windows_do_not_overlap() {
        let a = TimeWindow::new(at(9, 0), at(10, 0));
        let b = TimeWindow::new(at(10, 0), at(11, 0));
        assert!(!a.overlaps(&b));
        assert!(!b.overlaps(&a));
    }

    #[test]
    fn test_from_start() {
        let w = TimeWindow::from_start(at(9, 0), 90);
        assert_eq!(w.end, at(10, 30));
        assert_eq!(w.duration(), Duration::minutes(90));
    }

    #[test]
    fn test_contained_window_overlaps() {
        let outer = TimeWindow::new(at(8, 0), at(18, 0));
        let inner = TimeWindow::new(at(12, 0), at(13, 0));
        assert!(outer.overlaps(&inner));
        assert!(inner.overlaps(&outer));
    }
}
