//! Read-only reporting views.
//!
//! Aggregations over store and registry snapshots, enough to validate
//! scheduling behavior and feed dashboards/boards. Never returns live
//! references.
//!
//! # Views
//!
//! | View | Answers |
//! |------|---------|
//! | `overdue` | Which active requests slipped past their window? |
//! | `technician_workload` | How loaded is a technician in a range? |
//! | `equipment_history` | What has been done to this asset? |
//! | `upcoming_preventive` | What preventive work is due in a range? |
//! | `board` | How many requests sit in each status column? |

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::MaintenanceResult;
use crate::models::{RequestStatus, RequestSummary, RequestType, TimeWindow};
use crate::registry::EntityRegistry;
use crate::store::RequestStore;

/// Per-status request counts (kanban columns).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusBoard {
    pub new: usize,
    pub in_progress: usize,
    pub repaired: usize,
    pub scrapped: usize,
    pub cancelled: usize,
}

/// A technician's scheduled load within a range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TechnicianWorkload {
    /// Technician username.
    pub technician: String,
    /// Active requests whose windows overlap the range.
    pub request_count: usize,
    /// Total scheduled minutes across those requests.
    pub scheduled_minutes: i64,
}

/// Read-only views over an engine's store and registry.
pub struct ReportingFacade<'a> {
    store: &'a RequestStore,
    registry: &'a EntityRegistry,
}

impl<'a> ReportingFacade<'a> {
    pub(crate) fn new(store: &'a RequestStore, registry: &'a EntityRegistry) -> Self {
        Self { store, registry }
    }

    /// Active requests whose window ended before `now`, ordered by
    /// scheduled start.
    pub fn overdue(&self, now: DateTime<Utc>) -> Vec<RequestSummary> {
        let mut rows: Vec<RequestSummary> = [RequestStatus::New, RequestStatus::InProgress]
            .into_iter()
            .flat_map(|status| self.store.list_by_status(status))
            .filter(|r| r.window().end < now)
            .map(|r| RequestSummary::from(&r))
            .collect();
        rows.sort_by_key(|r| r.window.start);
        rows
    }

    /// A technician's load within `range`. Fails with `NotFound` for an
    /// unregistered technician.
    pub fn technician_workload(
        &self,
        technician: &str,
        range: &TimeWindow,
    ) -> MaintenanceResult<TechnicianWorkload> {
        self.registry.lookup_technician(technician)?;
        let rows = self.store.list_by_technician(technician, Some(range));
        let active: Vec<_> = rows.iter().filter(|r| r.is_active()).collect();
        Ok(TechnicianWorkload {
            technician: technician.to_string(),
            request_count: active.len(),
            scheduled_minutes: active.iter().map(|r| r.duration_minutes).sum(),
        })
    }

    /// Full maintenance history of an asset (terminal requests included),
    /// ordered by scheduled start. Fails with `NotFound` for an
    /// unregistered serial.
    pub fn equipment_history(&self, serial: &str) -> MaintenanceResult<Vec<RequestSummary>> {
        self.registry.lookup_equipment(serial)?;
        Ok(self
            .store
            .list_by_equipment(serial)
            .iter()
            .map(RequestSummary::from)
            .collect())
    }

    /// Pending (NEW) preventive requests whose window overlaps `range`,
    /// ordered by scheduled start.
    pub fn upcoming_preventive(&self, range: &TimeWindow) -> Vec<RequestSummary> {
        self.store
            .list_by_status(RequestStatus::New)
            .iter()
            .filter(|r| r.request_type == RequestType::Preventive)
            .filter(|r| r.window().overlaps(range))
            .map(RequestSummary::from)
            .collect()
    }

    /// Request counts per status.
    pub fn board(&self) -> StatusBoard {
        StatusBoard {
            new: self.store.list_by_status(RequestStatus::New).len(),
            in_progress: self.store.list_by_status(RequestStatus::InProgress).len(),
            repaired: self.store.list_by_status(RequestStatus::Repaired).len(),
            scrapped: self.store.list_by_status(RequestStatus::Scrapped).len(),
            cancelled: self.store.list_by_status(RequestStatus::Cancelled).len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::MaintenanceEngine;
    use crate::error::MaintenanceError;
    use crate::models::{Equipment, NewRequest, RecurrenceRule, Team, Technician};
    use chrono::TimeZone;

    fn at(day: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 9, day, h, 0, 0).unwrap()
    }

    fn make_engine() -> MaintenanceEngine {
        let engine = MaintenanceEngine::new();
        let registry = engine.registry();
        registry.register_technician(Technician::new("vikram_singh"));
        registry.register_technician(Technician::new("sneha_reddy"));
        registry
            .register_team(
                Team::new("HVAC Team")
                    .with_member("vikram_singh")
                    .with_member("sneha_reddy"),
            )
            .unwrap();
        registry
            .register_equipment(
                Equipment::new("HVAC-2023-003")
                    .with_name("HVAC Unit - Central Cooling")
                    .with_default_team("HVAC Team")
                    .with_default_technician("sneha_reddy"),
            )
            .unwrap();
        engine
    }

    #[test]
    fn test_overdue_reports_slipped_active_requests() {
        let engine = make_engine();
        let late = engine
            .create_request(NewRequest::new(
                "Quarterly HVAC filter replacement",
                "HVAC-2023-003",
                RequestType::Preventive,
                at(1, 9),
                90,
            ))
            .unwrap();
        let done = engine
            .create_request(NewRequest::new(
                "Refrigerant top-up",
                "HVAC-2023-003",
                RequestType::Corrective,
                at(2, 9),
                60,
            ))
            .unwrap();
        engine.transition(done, RequestStatus::InProgress).unwrap();
        engine.transition(done, RequestStatus::Repaired).unwrap();

        let overdue = engine.reports().overdue(at(3, 0));
        assert_eq!(overdue.len(), 1);
        assert_eq!(overdue[0].id, late);

        // Before the window closes nothing is overdue.
        assert!(engine.reports().overdue(at(1, 9)).is_empty());
    }

    #[test]
    fn test_technician_workload_counts_active_only() {
        let engine = make_engine();
        engine
            .create_request(NewRequest::new(
                "Quarterly HVAC filter replacement",
                "HVAC-2023-003",
                RequestType::Preventive,
                at(1, 9),
                90,
            ))
            .unwrap();
        let cancelled = engine
            .create_request(NewRequest::new(
                "Duct inspection",
                "HVAC-2023-003",
                RequestType::Preventive,
                at(1, 14),
                60,
            ))
            .unwrap();
        engine.cancel(cancelled).unwrap();

        let week = TimeWindow::new(at(1, 0), at(7, 0));
        let load = engine
            .reports()
            .technician_workload("sneha_reddy", &week)
            .unwrap();
        assert_eq!(load.request_count, 1);
        assert_eq!(load.scheduled_minutes, 90);

        let err = engine
            .reports()
            .technician_workload("nobody", &week)
            .unwrap_err();
        assert!(matches!(err, MaintenanceError::NotFound { .. }));
    }

    #[test]
    fn test_equipment_history_includes_terminal() {
        let engine = make_engine();
        let done = engine
            .create_request(NewRequest::new(
                "Refrigerant top-up",
                "HVAC-2023-003",
                RequestType::Corrective,
                at(1, 9),
                60,
            ))
            .unwrap();
        engine.transition(done, RequestStatus::InProgress).unwrap();
        engine.transition(done, RequestStatus::Repaired).unwrap();
        engine
            .create_request(NewRequest::new(
                "Quarterly HVAC filter replacement",
                "HVAC-2023-003",
                RequestType::Preventive,
                at(5, 9),
                90,
            ))
            .unwrap();

        let history = engine.reports().equipment_history("HVAC-2023-003").unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].status, RequestStatus::Repaired);
        assert!(history[0].window.start < history[1].window.start);

        assert!(engine.reports().equipment_history("NOPE").is_err());
    }

    #[test]
    fn test_upcoming_preventive_filters_type_and_range() {
        let engine = make_engine();
        engine
            .create_request(
                NewRequest::new(
                    "Quarterly HVAC filter replacement",
                    "HVAC-2023-003",
                    RequestType::Preventive,
                    at(5, 9),
                    90,
                )
                .with_recurrence(RecurrenceRule::days(90)),
            )
            .unwrap();
        engine
            .create_request(
                NewRequest::new(
                    "Compressor rattle",
                    "HVAC-2023-003",
                    RequestType::Corrective,
                    at(6, 9),
                    120,
                )
                .with_technician("vikram_singh"),
            )
            .unwrap();

        let week = TimeWindow::new(at(4, 0), at(8, 0));
        let upcoming = engine.reports().upcoming_preventive(&week);
        assert_eq!(upcoming.len(), 1);
        assert_eq!(upcoming[0].request_type, RequestType::Preventive);

        let later = TimeWindow::new(at(20, 0), at(25, 0));
        assert!(engine.reports().upcoming_preventive(&later).is_empty());
    }

    #[test]
    fn test_board_counts() {
        let engine = make_engine();
        let a = engine
            .create_request(NewRequest::new(
                "Refrigerant top-up",
                "HVAC-2023-003",
                RequestType::Corrective,
                at(1, 9),
                60,
            ))
            .unwrap();
        engine
            .create_request(NewRequest::new(
                "Quarterly HVAC filter replacement",
                "HVAC-2023-003",
                RequestType::Preventive,
                at(2, 9),
                90,
            ))
            .unwrap();
        engine.transition(a, RequestStatus::InProgress).unwrap();

        let board = engine.reports().board();
        assert_eq!(board.new, 1);
        assert_eq!(board.in_progress, 1);
        assert_eq!(board.repaired + board.scrapped + board.cancelled, 0);
    }
}
