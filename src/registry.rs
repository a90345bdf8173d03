//! Entity registry: equipment, teams, and technicians.
//!
//! In-memory registry with insert-or-update registration and snapshot
//! lookups. Registration enforces referential integrity: a team may only
//! list technicians that are already registered, and equipment defaults
//! may only name registered entities.
//!
//! Equipment condition flags (`is_usable`, `is_scrapped`) are mutated only
//! through `pub(crate)` methods invoked by the engine's lifecycle path;
//! external callers observe them via lookups but cannot flip them.

use parking_lot::RwLock;
use std::collections::HashMap;
use tracing::debug;

use crate::error::{MaintenanceError, MaintenanceResult};
use crate::models::{Equipment, Team, Technician};

#[derive(Debug, Default)]
struct RegistryInner {
    equipment: HashMap<String, Equipment>,
    teams: HashMap<String, Team>,
    technicians: HashMap<String, Technician>,
}

/// Shared registry of maintainable assets, teams, and technicians.
///
/// All lookups return owned snapshots; the registry's copy changes only
/// through registration or lifecycle side effects.
#[derive(Debug, Default)]
pub struct EntityRegistry {
    inner: RwLock<RegistryInner>,
}

impl EntityRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a technician (insert-or-update by username).
    pub fn register_technician(&self, technician: Technician) {
        let mut inner = self.inner.write();
        debug!(username = %technician.username, "registering technician");
        inner
            .technicians
            .insert(technician.username.clone(), technician);
    }

    /// Registers a team (insert-or-update by name).
    ///
    /// Fails with `InvalidReference` if any member is not a registered
    /// technician.
    pub fn register_team(&self, team: Team) -> MaintenanceResult<()> {
        let mut inner = self.inner.write();
        for member in &team.members {
            if !inner.technicians.contains_key(member) {
                return Err(MaintenanceError::InvalidReference(format!(
                    "team '{}' references unregistered technician '{}'",
                    team.name, member
                )));
            }
        }
        debug!(team = %team.name, members = team.members.len(), "registering team");
        inner.teams.insert(team.name.clone(), team);
        Ok(())
    }

    /// Registers equipment (insert-or-update by serial number).
    ///
    /// Fails with `InvalidReference` if the default team or technician is
    /// not registered. Defaults are not checked for membership consistency;
    /// the engine resolves that at scheduling time.
    pub fn register_equipment(&self, equipment: Equipment) -> MaintenanceResult<()> {
        let mut inner = self.inner.write();
        if let Some(team) = &equipment.default_team {
            if !inner.teams.contains_key(team) {
                return Err(MaintenanceError::InvalidReference(format!(
                    "equipment '{}' references unregistered team '{}'",
                    equipment.serial_number, team
                )));
            }
        }
        if let Some(technician) = &equipment.default_technician {
            if !inner.technicians.contains_key(technician) {
                return Err(MaintenanceError::InvalidReference(format!(
                    "equipment '{}' references unregistered technician '{}'",
                    equipment.serial_number, technician
                )));
            }
        }
        debug!(serial = %equipment.serial_number, "registering equipment");
        inner
            .equipment
            .insert(equipment.serial_number.clone(), equipment);
        Ok(())
    }

    /// Returns a snapshot of the equipment with the given serial number.
    pub fn lookup_equipment(&self, serial: &str) -> MaintenanceResult<Equipment> {
        self.inner
            .read()
            .equipment
            .get(serial)
            .cloned()
            .ok_or_else(|| MaintenanceError::NotFound {
                entity: "equipment",
                id: serial.to_string(),
            })
    }

    /// Returns a snapshot of the team with the given name.
    pub fn lookup_team(&self, name: &str) -> MaintenanceResult<Team> {
        self.inner
            .read()
            .teams
            .get(name)
            .cloned()
            .ok_or_else(|| MaintenanceError::NotFound {
                entity: "team",
                id: name.to_string(),
            })
    }

    /// Returns a snapshot of the technician with the given username.
    pub fn lookup_technician(&self, username: &str) -> MaintenanceResult<Technician> {
        self.inner
            .read()
            .technicians
            .get(username)
            .cloned()
            .ok_or_else(|| MaintenanceError::NotFound {
                entity: "technician",
                id: username.to_string(),
            })
    }

    /// Lifecycle side effect: flips the usability flag.
    pub(crate) fn set_equipment_usability(
        &self,
        serial: &str,
        is_usable: bool,
    ) -> MaintenanceResult<()> {
        let mut inner = self.inner.write();
        let equipment = inner
            .equipment
            .get_mut(serial)
            .ok_or_else(|| MaintenanceError::NotFound {
                entity: "equipment",
                id: serial.to_string(),
            })?;
        equipment.is_usable = is_usable;
        Ok(())
    }

    /// Lifecycle side effect: permanently retires the asset.
    pub(crate) fn mark_equipment_scrapped(&self, serial: &str) -> MaintenanceResult<()> {
        let mut inner = self.inner.write();
        let equipment = inner
            .equipment
            .get_mut(serial)
            .ok_or_else(|| MaintenanceError::NotFound {
                entity: "equipment",
                id: serial.to_string(),
            })?;
        equipment.is_usable = false;
        equipment.is_scrapped = true;
        Ok(())
    }
}
