//! Error taxonomy for the maintenance core.
//!
//! Every fallible operation returns [`MaintenanceResult`]. Errors are typed
//! and carried to the caller; nothing is silently swallowed. The one
//! exception is recurrence generation after a repair, which is retried
//! rather than surfaced (see `engine`).

use thiserror::Error;

use crate::models::{RequestId, RequestStatus};

/// Errors produced by the registry, store, and scheduling engine.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MaintenanceError {
    /// An entity id was looked up but is not registered/stored.
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// A reference names an entity that does not satisfy the relation
    /// (unregistered team member, technician outside the assigned team).
    #[error("invalid reference: {0}")]
    InvalidReference(String),

    /// A status change not permitted by the lifecycle state machine.
    #[error("invalid transition: {from} -> {to}")]
    InvalidTransition {
        from: RequestStatus,
        to: RequestStatus,
    },

    /// The proposed window overlaps an active request for the same
    /// technician or the same equipment.
    #[error("scheduling conflict with request {conflicting}")]
    SchedulingConflict { conflicting: RequestId },

    /// Preventive work proposed against unusable equipment, or any work
    /// proposed against scrapped equipment.
    #[error("equipment {0} cannot accept this request in its current condition")]
    EquipmentUnusable(String),

    /// No team was supplied and the equipment carries no default team.
    #[error("equipment {0} has no default team and none was supplied")]
    UnassignableEquipment(String),

    /// Malformed input: negative duration, empty subject, empty roster,
    /// zero-length recurrence interval.
    #[error("validation failed: {0}")]
    Validation(String),
}

/// Result alias used throughout the crate.
pub type MaintenanceResult<T> = Result<T, MaintenanceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let e = MaintenanceError::NotFound {
            entity: "equipment",
            id: "GEN-2024-001".into(),
        };
        assert_eq!(e.to_string(), "equipment not found: GEN-2024-001");

        let e = MaintenanceError::InvalidTransition {
            from: RequestStatus::New,
            to: RequestStatus::Repaired,
        };
        assert_eq!(e.to_string(), "invalid transition: NEW -> REPAIRED");

        let e = MaintenanceError::UnassignableEquipment("CMP-2024-002".into());
        assert!(e.to_string().contains("no default team"));
    }
}
