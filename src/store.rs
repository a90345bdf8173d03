//! Request store: owns the collection of maintenance requests.
//!
//! # Snapshot Semantics
//!
//! All reads return owned copies. Callers cannot mutate stored state
//! directly; every mutation goes through [`RequestStore::update`] or an
//! engine transaction, so invariants are enforced in one place.
//!
//! # Concurrency
//!
//! A single `parking_lot::RwLock` guards the collection. The write lock is
//! the serialization point for the engine: conflict detection and the
//! subsequent insert/transition run inside one [`RequestStore::transact`]
//! critical section, so two concurrent callers cannot both pass an overlap
//! check before either commits. Terminal requests are archived in place,
//! never deleted; history queries read them like any other row.

use parking_lot::RwLock;
use std::collections::HashMap;

use crate::error::{MaintenanceError, MaintenanceResult};
use crate::models::{MaintenanceRequest, RequestId, RequestStatus, TimeWindow};

/// In-memory collection of maintenance requests.
#[derive(Debug, Default)]
pub struct RequestStore {
    inner: RwLock<HashMap<RequestId, MaintenanceRequest>>,
}

impl RequestStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a request and returns its id.
    pub fn create(&self, request: MaintenanceRequest) -> RequestId {
        let id = request.id;
        self.inner.write().insert(id, request);
        id
    }

    /// Returns a snapshot of the request with the given id.
    pub fn get(&self, id: RequestId) -> MaintenanceResult<MaintenanceRequest> {
        self.inner
            .read()
            .get(&id)
            .cloned()
            .ok_or_else(|| MaintenanceError::NotFound {
                entity: "request",
                id: id.to_string(),
            })
    }

    /// All requests for an asset, ordered by scheduled start.
    pub fn list_by_equipment(&self, serial: &str) -> Vec<MaintenanceRequest> {
        let mut rows: Vec<_> = self
            .inner
            .read()
            .values()
            .filter(|r| r.equipment == serial)
            .cloned()
            .collect();
        rows.sort_by_key(|r| r.scheduled_start);
        rows
    }

    /// Requests assigned to a technician, optionally restricted to those
    /// whose window overlaps `range`. Ordered by scheduled start.
    pub fn list_by_technician(
        &self,
        technician: &str,
        range: Option<&TimeWindow>,
    ) -> Vec<MaintenanceRequest> {
        let mut rows: Vec<_> = self
            .inner
            .read()
            .values()
            .filter(|r| r.technician == technician)
            .filter(|r| range.is_none_or(|w| r.window().overlaps(w)))
            .cloned()
            .collect();
        rows.sort_by_key(|r| r.scheduled_start);
        rows
    }

    /// Requests in the given status, ordered by scheduled start.
    pub fn list_by_status(&self, status: RequestStatus) -> Vec<MaintenanceRequest> {
        let mut rows: Vec<_> = self
            .inner
            .read()
            .values()
            .filter(|r| r.status == status)
            .cloned()
            .collect();
        rows.sort_by_key(|r| r.scheduled_start);
        rows
    }

    /// Applies `mutator` to the stored request under the write lock.
    ///
    /// Fails with `NotFound` if the id is absent.
    pub fn update(
        &self,
        id: RequestId,
        mutator: impl FnOnce(&mut MaintenanceRequest),
    ) -> MaintenanceResult<()> {
        let mut inner = self.inner.write();
        let request = inner.get_mut(&id).ok_or_else(|| MaintenanceError::NotFound {
            entity: "request",
            id: id.to_string(),
        })?;
        mutator(request);
        Ok(())
    }

    /// Runs `f` as one atomic unit under the write lock.
    ///
    /// This is the engine's critical section: read-then-write sequences
    /// (overlap check + insert, transition + side effects) are serialized
    /// against every other mutation.
    pub(crate) fn transact<T>(
        &self,
        f: impl FnOnce(&mut StoreTxn<'_>) -> MaintenanceResult<T>,
    ) -> MaintenanceResult<T> {
        let mut inner = self.inner.write();
        let mut txn = StoreTxn {
            requests: &mut *inner,
        };
        f(&mut txn)
    }
}

/// Mutable view of the store inside a [`RequestStore::transact`] call.
pub(crate) struct StoreTxn<'a> {
    requests: &'a mut HashMap<RequestId, MaintenanceRequest>,
}

impl StoreTxn<'_> {
    pub(crate) fn get(&self, id: RequestId) -> MaintenanceResult<&MaintenanceRequest> {
        self.requests.get(&id).ok_or_else(|| MaintenanceError::NotFound {
            entity: "request",
            id: id.to_string(),
        })
    }

    pub(crate) fn get_mut(&mut self, id: RequestId) -> MaintenanceResult<&mut MaintenanceRequest> {
        self.requests
            .get_mut(&id)
            .ok_or_else(|| MaintenanceError::NotFound {
                entity: "request",
                id: id.to_string(),
            })
    }

    pub(crate) fn insert(&mut self, request: MaintenanceRequest) -> RequestId {
        let id = request.id;
        self.requests.insert(id, request);
        id
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &MaintenanceRequest> {
        self.requests.values()
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut MaintenanceRequest> {
        self.requests.values_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RequestType;
    use chrono::{TimeZone, Utc};

    fn make_request(technician: &str, equipment: &str, start_hour: u32) -> MaintenanceRequest {
        MaintenanceRequest {
            id: RequestId::new(),
            subject: format!("work on {equipment}"),
            equipment: equipment.into(),
            request_type: RequestType::Corrective,
            team: "Mechanical Team".into(),
            technician: technician.into(),
            scheduled_start: Utc.with_ymd_and_hms(2025, 5, 2, start_hour, 0, 0).unwrap(),
            duration_minutes: 60,
            status: RequestStatus::New,
            created_by: technician.into(),
            recurrence: None,
            force_closed: false,
        }
    }

    #[test]
    fn test_create_and_get() {
        let store = RequestStore::new();
        let id = store.create(make_request("arjun_kumar", "CMP-2024-002", 9));
        let row = store.get(id).unwrap();
        assert_eq!(row.technician, "arjun_kumar");

        let missing = store.get(RequestId::new()).unwrap_err();
        assert!(matches!(missing, MaintenanceError::NotFound { entity: "request", .. }));
    }

    #[test]
    fn test_get_returns_snapshot() {
        let store = RequestStore::new();
        let id = store.create(make_request("arjun_kumar", "CMP-2024-002", 9));

        let mut copy = store.get(id).unwrap();
        copy.status = RequestStatus::Cancelled; // only the copy changes

        assert_eq!(store.get(id).unwrap().status, RequestStatus::New);
    }

    #[test]
    fn test_list_by_equipment_ordered() {
        let store = RequestStore::new();
        store.create(make_request("a", "CB-1200", 14));
        store.create(make_request("b", "CB-1200", 9));
        store.create(make_request("c", "OTHER", 10));

        let rows = store.list_by_equipment("CB-1200");
        assert_eq!(rows.len(), 2);
        assert!(rows[0].scheduled_start < rows[1].scheduled_start);
    }

    #[test]
    fn test_list_by_technician_with_range() {
        let store = RequestStore::new();
        store.create(make_request("sneha_reddy", "HVAC-2023-003", 8));
        store.create(make_request("sneha_reddy", "HVAC-2023-003", 15));

        let morning = TimeWindow::new(
            Utc.with_ymd_and_hms(2025, 5, 2, 7, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2025, 5, 2, 12, 0, 0).unwrap(),
        );
        let rows = store.list_by_technician("sneha_reddy", Some(&morning));
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].scheduled_start.format("%H").to_string(), "08");

        let all = store.list_by_technician("sneha_reddy", None);
        assert_eq!(all.len(), 2);
    }

    #[test]
    fn test_list_by_status() {
        let store = RequestStore::new();
        let id = store.create(make_request("a", "X", 9));
        store.create(make_request("b", "Y", 10));
        store.update(id, |r| r.status = RequestStatus::InProgress).unwrap();

        assert_eq!(store.list_by_status(RequestStatus::New).len(), 1);
        assert_eq!(store.list_by_status(RequestStatus::InProgress).len(), 1);
        assert!(store.list_by_status(RequestStatus::Repaired).is_empty());
    }

    #[test]
    fn test_update_missing_is_not_found() {
        let store = RequestStore::new();
        let err = store
            .update(RequestId::new(), |r| r.duration_minutes = 30)
            .unwrap_err();
        assert!(matches!(err, MaintenanceError::NotFound { .. }));
    }

    #[test]
    fn test_transact_rolls_nothing_back_on_error() {
        // A failed transaction must not have inserted anything.
        let store = RequestStore::new();
        let result: MaintenanceResult<()> = store.transact(|txn| {
            let _probe = txn.iter().count();
            Err(MaintenanceError::Validation("boom".into()))
        });
        assert!(result.is_err());
        assert!(store.list_by_status(RequestStatus::New).is_empty());
    }
}
