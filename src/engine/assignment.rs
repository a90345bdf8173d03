//! Assignment resolution.
//!
//! Decides which team and technician handle a request, combining the
//! caller's explicit choices with the equipment's defaults.
//!
//! # Resolution Order
//!
//! 1. Team: the supplied team, else the equipment's default team, else
//!    `UnassignableEquipment`.
//! 2. The resolved team must have a non-empty roster.
//! 3. Technician: the supplied technician, who must be a roster member
//!    (`InvalidReference` otherwise); else the equipment's default
//!    technician when they belong to the resolved team; else the first
//!    roster member. Defaults are hints and may be inconsistent with the
//!    team, so the fallback is silent; an explicit choice is not.

use crate::error::{MaintenanceError, MaintenanceResult};
use crate::models::Equipment;
use crate::registry::EntityRegistry;

/// Team and technician chosen for a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedAssignment {
    /// Assigned team name.
    pub team: String,
    /// Assigned technician username, a member of `team`.
    pub technician: String,
}

/// Resolves the assignment for a request against `equipment`.
pub(crate) fn resolve(
    registry: &EntityRegistry,
    equipment: &Equipment,
    team: Option<&str>,
    technician: Option<&str>,
) -> MaintenanceResult<ResolvedAssignment> {
    let team_name = team
        .or(equipment.default_team.as_deref())
        .ok_or_else(|| MaintenanceError::UnassignableEquipment(equipment.serial_number.clone()))?;

    let team = registry.lookup_team(team_name)?;
    if team.members.is_empty() {
        return Err(MaintenanceError::Validation(format!(
            "team '{}' has no members and cannot be assigned",
            team.name
        )));
    }

    let technician = match technician {
        Some(explicit) => {
            registry.lookup_technician(explicit)?;
            if !team.has_member(explicit) {
                return Err(MaintenanceError::InvalidReference(format!(
                    "technician '{}' is not a member of team '{}'",
                    explicit, team.name
                )));
            }
            explicit.to_string()
        }
        None => equipment
            .default_technician
            .as_deref()
            .filter(|t| team.has_member(t))
            .unwrap_or_else(|| {
                // Non-empty roster was checked above.
                team.first_member().unwrap_or_default()
            })
            .to_string(),
    };

    Ok(ResolvedAssignment {
        team: team.name,
        technician,
    })
}
