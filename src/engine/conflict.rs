//! Time-window conflict detection.
//!
//! A proposed window conflicts with an active (non-terminal) request when
//! both touch the same technician or the same equipment and their
//! half-open windows overlap. Callers run this inside a store transaction
//! so the check and the following write form one atomic unit.
//!
//! # Reference
//! Kleinberg & Tardos (2006), "Algorithm Design", Ch. 4.1 (interval scheduling)

use crate::models::{MaintenanceRequest, RequestId, TimeWindow};

/// Finds an active request whose window overlaps `window` for the same
/// technician or the same equipment.
///
/// `exclude` skips the request being rescheduled. When several requests
/// conflict, the earliest-starting one (ties broken by id) is reported,
/// keeping the error deterministic.
pub(crate) fn find_conflict<'a>(
    requests: impl Iterator<Item = &'a MaintenanceRequest>,
    technician: &str,
    equipment: &str,
    window: &TimeWindow,
    exclude: Option<RequestId>,
) -> Option<RequestId> {
    requests
        .filter(|r| r.is_active())
        .filter(|r| exclude != Some(r.id))
        .filter(|r| r.technician == technician || r.equipment == equipment)
        .filter(|r| r.window().overlaps(window))
        .min_by_key(|r| (r.scheduled_start, r.id))
        .map(|r| r.id)
}
