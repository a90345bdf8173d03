//! Maintenance scheduling engine.
//!
//! The engine is the single write path for maintenance requests. It
//! resolves assignments, detects window conflicts, enforces the lifecycle
//! state machine, applies equipment side effects, and generates the next
//! occurrence of recurring preventive work.
//!
//! # Atomicity
//!
//! Every mutating operation runs inside one store transaction: the
//! conflict check and the write it guards happen under the same write
//! lock, and registry side effects are applied inside that section (lock
//! order is always store, then registry). Two concurrent calls cannot
//! both pass an overlap check before either commits.
//!
//! # Modules
//!
//! - `assignment`: explicit-choice / equipment-default resolution
//! - `conflict`: half-open window overlap detection

mod assignment;
mod conflict;

pub use assignment::ResolvedAssignment;

use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use tracing::{debug, info, warn};

use crate::error::{MaintenanceError, MaintenanceResult};
use crate::lifecycle;
use crate::models::{
    MaintenanceRequest, NewRequest, RequestId, RequestStatus, RequestSummary, RequestType,
    TimeWindow,
};
use crate::registry::EntityRegistry;
use crate::reporting::ReportingFacade;
use crate::store::{RequestStore, StoreTxn};

/// Scheduling and lifecycle engine for maintenance requests.
///
/// # Example
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use gearguard_core::engine::MaintenanceEngine;
/// use gearguard_core::models::{Equipment, NewRequest, RequestStatus, RequestType, Team, Technician};
///
/// let engine = MaintenanceEngine::new();
/// engine.registry().register_technician(Technician::new("raj_sharma"));
/// engine
///     .registry()
///     .register_team(Team::new("Electrical Team").with_member("raj_sharma"))
///     .unwrap();
/// engine
///     .registry()
///     .register_equipment(Equipment::new("GEN-2024-001").with_default_team("Electrical Team"))
///     .unwrap();
///
/// let start = Utc.with_ymd_and_hms(2025, 7, 1, 9, 0, 0).unwrap();
/// let id = engine
///     .create_request(NewRequest::new(
///         "Monthly preventive maintenance check",
///         "GEN-2024-001",
///         RequestType::Preventive,
///         start,
///         120,
///     ))
///     .unwrap();
///
/// engine.transition(id, RequestStatus::InProgress).unwrap();
/// engine.transition(id, RequestStatus::Repaired).unwrap();
/// ```
#[derive(Debug)]
pub struct MaintenanceEngine {
    registry: Arc<EntityRegistry>,
    store: RequestStore,
    /// Next occurrences whose windows conflicted at generation time,
    /// held for `retry_pending_recurrences`.
    pending_recurrences: Mutex<Vec<MaintenanceRequest>>,
}

impl MaintenanceEngine {
    /// Creates an engine with its own empty registry.
    pub fn new() -> Self {
        Self::with_registry(Arc::new(EntityRegistry::new()))
    }

    /// Creates an engine over a shared registry.
    pub fn with_registry(registry: Arc<EntityRegistry>) -> Self {
        Self {
            registry,
            store: RequestStore::new(),
            pending_recurrences: Mutex::new(Vec::new()),
        }
    }

    /// The entity registry backing this engine.
    pub fn registry(&self) -> &EntityRegistry {
        &self.registry
    }

    /// The request store backing this engine (snapshot reads only).
    pub fn store(&self) -> &RequestStore {
        &self.store
    }

    /// Read-only reporting views over this engine's state.
    pub fn reports(&self) -> ReportingFacade<'_> {
        ReportingFacade::new(&self.store, &self.registry)
    }

    // ---- Creation ----

    /// Creates a request: resolves the assignment, checks equipment
    /// condition and window conflicts, and stores it with status NEW.
    pub fn create_request(&self, draft: NewRequest) -> MaintenanceResult<RequestId> {
        validate_draft(&draft)?;
        let equipment = self.registry.lookup_equipment(&draft.equipment)?;
        let assignment = assignment::resolve(
            &self.registry,
            &equipment,
            draft.team.as_deref(),
            draft.technician.as_deref(),
        )?;
        self.store
            .transact(|txn| self.create_in_txn(txn, draft, assignment))
    }

    /// Idempotent variant keyed by (subject, equipment), for
    /// bulk-loading and import flows: when a request with the same key
    /// already exists its id is returned and nothing is created.
    pub fn create_request_idempotent(&self, draft: NewRequest) -> MaintenanceResult<RequestId> {
        validate_draft(&draft)?;
        let equipment = self.registry.lookup_equipment(&draft.equipment)?;
        let assignment = assignment::resolve(
            &self.registry,
            &equipment,
            draft.team.as_deref(),
            draft.technician.as_deref(),
        )?;
        self.store.transact(|txn| {
            if let Some(existing) = txn
                .iter()
                .find(|r| r.subject == draft.subject && r.equipment == draft.equipment)
            {
                debug!(request = %existing.id, subject = %draft.subject, "idempotent create matched existing request");
                return Ok(existing.id);
            }
            self.create_in_txn(txn, draft, assignment)
        })
    }

    fn create_in_txn(
        &self,
        txn: &mut StoreTxn<'_>,
        draft: NewRequest,
        assignment: ResolvedAssignment,
    ) -> MaintenanceResult<RequestId> {
        // Condition flags only change inside store transactions, so this
        // re-read is race-free against concurrent lifecycle side effects.
        let equipment = self.registry.lookup_equipment(&draft.equipment)?;
        if equipment.is_scrapped
            || (!equipment.is_usable && draft.request_type == RequestType::Preventive)
        {
            return Err(MaintenanceError::EquipmentUnusable(draft.equipment));
        }

        let request = build_request(draft, assignment);
        let window = request.window();
        if let Some(conflicting) = conflict::find_conflict(
            txn.iter(),
            &request.technician,
            &request.equipment,
            &window,
            None,
        ) {
            return Err(MaintenanceError::SchedulingConflict { conflicting });
        }

        debug!(
            request = %request.id,
            equipment = %request.equipment,
            technician = %request.technician,
            "request created"
        );
        Ok(txn.insert(request))
    }

    // ---- Lifecycle ----

    /// Applies a normal status transition with its side effects.
    pub fn transition(&self, id: RequestId, target: RequestStatus) -> MaintenanceResult<()> {
        self.store.transact(|txn| {
            let current = txn.get(id)?.clone();
            lifecycle::check_transition(current.status, target)?;
            if target == RequestStatus::InProgress
                && (current.team.is_empty() || current.technician.is_empty())
            {
                return Err(MaintenanceError::Validation(
                    "cannot start a request without a team/technician assignment".into(),
                ));
            }

            // Fallible side effects first, so an error leaves the status
            // untouched; the flag flip and the status change then commit
            // together under the store lock.
            match target {
                RequestStatus::Repaired if current.request_type == RequestType::Corrective => {
                    // Scrapping is permanent: repairing another request on
                    // the same asset must not resurrect it.
                    let equipment = self.registry.lookup_equipment(&current.equipment)?;
                    if !equipment.is_scrapped {
                        self.registry
                            .set_equipment_usability(&current.equipment, true)?;
                    }
                }
                RequestStatus::Scrapped => {
                    self.registry.mark_equipment_scrapped(&current.equipment)?;
                }
                _ => {}
            }

            txn.get_mut(id)?.status = target;
            info!(request = %id, from = %current.status, to = %target, "status transition");

            if target == RequestStatus::Scrapped {
                self.cancel_pending_recurring(txn, &current.equipment);
            }
            if target == RequestStatus::Repaired {
                if let (RequestType::Preventive, Some(rule)) =
                    (current.request_type, current.recurrence)
                {
                    self.generate_next_occurrence(txn, &current, rule.next_start(current.scheduled_start));
                }
            }
            Ok(())
        })
    }

    /// Cancels a NEW request. Any other status is rejected with
    /// `InvalidTransition`, including a second cancel.
    pub fn cancel(&self, id: RequestId) -> MaintenanceResult<()> {
        self.store.transact(|txn| {
            let current = txn.get(id)?.status;
            lifecycle::check_transition(current, RequestStatus::Cancelled)?;
            txn.get_mut(id)?.status = RequestStatus::Cancelled;
            info!(request = %id, "request cancelled");
            Ok(())
        })
    }

    /// Administrative override: closes an IN_PROGRESS request without a
    /// repair outcome. Logged separately from normal transitions and
    /// marked on the request.
    pub fn force_close(&self, id: RequestId) -> MaintenanceResult<()> {
        self.store.transact(|txn| {
            let current = txn.get(id)?.status;
            if current != RequestStatus::InProgress {
                return Err(MaintenanceError::InvalidTransition {
                    from: current,
                    to: RequestStatus::Cancelled,
                });
            }
            let request = txn.get_mut(id)?;
            request.status = RequestStatus::Cancelled;
            request.force_closed = true;
            warn!(request = %id, "request force-closed by administrative override");
            Ok(())
        })
    }

    // ---- Scheduling ----

    /// Moves a request to a new window, re-running conflict detection
    /// (the request's own current window is excluded).
    pub fn reschedule(
        &self,
        id: RequestId,
        new_start: DateTime<Utc>,
        new_duration_minutes: i64,
    ) -> MaintenanceResult<()> {
        if new_duration_minutes < 0 {
            return Err(MaintenanceError::Validation(
                "duration must be non-negative".into(),
            ));
        }
        self.store.transact(|txn| {
            let current = txn.get(id)?.clone();
            if current.status.is_terminal() {
                return Err(MaintenanceError::Validation(format!(
                    "cannot reschedule request in terminal status {}",
                    current.status
                )));
            }
            let window = TimeWindow::from_start(new_start, new_duration_minutes);
            if let Some(conflicting) = conflict::find_conflict(
                txn.iter(),
                &current.technician,
                &current.equipment,
                &window,
                Some(id),
            ) {
                return Err(MaintenanceError::SchedulingConflict { conflicting });
            }
            let request = txn.get_mut(id)?;
            request.scheduled_start = new_start;
            request.duration_minutes = new_duration_minutes;
            info!(request = %id, start = %new_start, minutes = new_duration_minutes, "request rescheduled");
            Ok(())
        })
    }

    /// Active requests for a technician whose windows overlap
    /// [from, to), as summaries ordered by scheduled start.
    pub fn list_upcoming(
        &self,
        technician: &str,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Vec<RequestSummary> {
        let range = TimeWindow::new(from, to);
        self.store
            .list_by_technician(technician, Some(&range))
            .iter()
            .filter(|r| r.is_active())
            .map(RequestSummary::from)
            .collect()
    }

    /// Ids of active requests for a technician whose windows overlap the
    /// given window, ordered by scheduled start.
    pub fn find_conflicts(&self, technician: &str, window: &TimeWindow) -> Vec<RequestId> {
        self.store
            .list_by_technician(technician, Some(window))
            .iter()
            .filter(|r| r.is_active())
            .map(|r| r.id)
            .collect()
    }

    // ---- Recurrence ----

    /// Re-attempts queued next occurrences whose generation conflicted.
    /// Occurrences for since-scrapped equipment are dropped. Returns the
    /// number of requests created.
    pub fn retry_pending_recurrences(&self) -> usize {
        let pending: Vec<MaintenanceRequest> = self.pending_recurrences.lock().drain(..).collect();
        let mut created = 0;
        let mut requeue = Vec::new();

        for request in pending {
            match self.registry.lookup_equipment(&request.equipment) {
                Ok(equipment) if equipment.is_scrapped => {
                    debug!(request = %request.id, "dropping queued occurrence for scrapped equipment");
                    continue;
                }
                Ok(_) => {}
                Err(_) => continue,
            }
            let outcome = self.store.transact(|txn| {
                if let Some(conflicting) = conflict::find_conflict(
                    txn.iter(),
                    &request.technician,
                    &request.equipment,
                    &request.window(),
                    None,
                ) {
                    return Err(MaintenanceError::SchedulingConflict { conflicting });
                }
                txn.insert(request.clone());
                Ok(())
            });
            match outcome {
                Ok(()) => {
                    info!(request = %request.id, "queued preventive occurrence created");
                    created += 1;
                }
                Err(_) => requeue.push(request),
            }
        }

        if !requeue.is_empty() {
            self.pending_recurrences.lock().extend(requeue);
        }
        created
    }

    /// Generates the next preventive occurrence inside the repairing
    /// transaction. On conflict the occurrence is queued instead; the
    /// repair itself is never rolled back.
    fn generate_next_occurrence(
        &self,
        txn: &mut StoreTxn<'_>,
        source: &MaintenanceRequest,
        next_start: DateTime<Utc>,
    ) {
        let scrapped = match self.registry.lookup_equipment(&source.equipment) {
            Ok(equipment) => equipment.is_scrapped,
            Err(_) => true, // asset gone from the registry; nothing to maintain
        };
        if scrapped {
            debug!(request = %source.id, equipment = %source.equipment, "recurrence skipped: equipment scrapped");
            return;
        }

        let next = MaintenanceRequest {
            id: RequestId::new(),
            scheduled_start: next_start,
            status: RequestStatus::New,
            force_closed: false,
            ..source.clone()
        };
        let window = next.window();
        if let Some(conflicting) = conflict::find_conflict(
            txn.iter(),
            &next.technician,
            &next.equipment,
            &window,
            None,
        ) {
            warn!(
                request = %next.id,
                conflicting = %conflicting,
                "next preventive occurrence conflicts; queued for retry"
            );
            self.pending_recurrences.lock().push(next);
        } else {
            info!(request = %next.id, start = %next.scheduled_start, "generated next preventive occurrence");
            txn.insert(next);
        }
    }

    fn cancel_pending_recurring(&self, txn: &mut StoreTxn<'_>, equipment: &str) {
        for request in txn.iter_mut() {
            if request.equipment == equipment
                && request.status == RequestStatus::New
                && request.recurrence.is_some()
            {
                request.status = RequestStatus::Cancelled;
                info!(request = %request.id, "pending recurring request cancelled with scrapped equipment");
            }
        }
    }
}

impl Default for MaintenanceEngine {
    fn default() -> Self {
        Self::new()
    }
}

fn validate_draft(draft: &NewRequest) -> MaintenanceResult<()> {
    if draft.subject.trim().is_empty() {
        return Err(MaintenanceError::Validation("subject must not be empty".into()));
    }
    if draft.duration_minutes < 0 {
        return Err(MaintenanceError::Validation(
            "duration must be non-negative".into(),
        ));
    }
    if let Some(rule) = &draft.recurrence {
        if rule.every == 0 {
            return Err(MaintenanceError::Validation(
                "recurrence interval must be non-zero".into(),
            ));
        }
    }
    Ok(())
}

fn build_request(draft: NewRequest, assignment: ResolvedAssignment) -> MaintenanceRequest {
    MaintenanceRequest {
        id: RequestId::new(),
        subject: draft.subject,
        equipment: draft.equipment,
        request_type: draft.request_type,
        team: assignment.team,
        technician: assignment.technician,
        scheduled_start: draft.scheduled_start,
        duration_minutes: draft.duration_minutes,
        status: RequestStatus::New,
        created_by: draft.created_by,
        recurrence: draft.recurrence,
        force_closed: false,
    }
}
