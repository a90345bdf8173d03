//! Lifecycle state machine for maintenance requests.
//!
//! ```text
//!             +-> REPAIRED   (terminal)
//! NEW -> IN_PROGRESS
//!   |         +-> SCRAPPED   (terminal)
//!   +-> CANCELLED            (terminal)
//! ```
//!
//! The transition check is pure; side effects (equipment flags, recurrence
//! generation, cancelling pending recurring work) are applied by the engine
//! inside the same store transaction that commits the status change.
//! CANCELLED is reachable from NEW through [`crate::engine::MaintenanceEngine::cancel`],
//! and from IN_PROGRESS only through the administrative
//! [`crate::engine::MaintenanceEngine::force_close`] override.

use crate::error::{MaintenanceError, MaintenanceResult};
use crate::models::RequestStatus;

/// Whether `from -> to` is a permitted normal transition.
///
/// Force-close is not a normal transition and is handled separately.
pub fn is_valid_transition(from: RequestStatus, to: RequestStatus) -> bool {
    use RequestStatus::*;
    matches!(
        (from, to),
        (New, InProgress) | (New, Cancelled) | (InProgress, Repaired) | (InProgress, Scrapped)
    )
}

/// Checks a transition, returning `InvalidTransition` when not permitted.
pub fn check_transition(from: RequestStatus, to: RequestStatus) -> MaintenanceResult<()> {
    if is_valid_transition(from, to) {
        Ok(())
    } else {
        Err(MaintenanceError::InvalidTransition { from, to })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use RequestStatus::*;

    const ALL: [RequestStatus; 5] = [New, InProgress, Repaired, Scrapped, Cancelled];

    #[test]
    fn test_permitted_transitions() {
        assert!(is_valid_transition(New, InProgress));
        assert!(is_valid_transition(New, Cancelled));
        assert!(is_valid_transition(InProgress, Repaired));
        assert!(is_valid_transition(InProgress, Scrapped));
    }

    #[test]
    fn test_skipping_new_is_rejected() {
        assert!(!is_valid_transition(New, Repaired));
        assert!(!is_valid_transition(New, Scrapped));
    }

    #[test]
    fn test_in_progress_cannot_cancel_normally() {
        assert!(!is_valid_transition(InProgress, Cancelled));
    }

    #[test]
    fn test_terminal_states_absorb() {
        for terminal in [Repaired, Scrapped, Cancelled] {
            for target in ALL {
                assert!(
                    !is_valid_transition(terminal, target),
                    "{terminal} -> {target} must be rejected"
                );
            }
        }
    }

    #[test]
    fn test_no_self_transitions() {
        for status in ALL {
            assert!(!is_valid_transition(status, status));
        }
    }

    #[test]
    fn test_check_transition_error_carries_endpoints() {
        let err = check_transition(New, Repaired).unwrap_err();
        assert_eq!(
            err,
            MaintenanceError::InvalidTransition {
                from: New,
                to: Repaired
            }
        );
    }
}
