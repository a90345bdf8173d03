//! Maintenance request model.
//!
//! A request is one unit of maintenance work against one asset: who does
//! it (team + technician), when (scheduled start + duration), what kind
//! (preventive or corrective), and where it stands in its lifecycle.
//!
//! # Wire Names
//!
//! Status and type enums serialize with their original
//! SCREAMING_SNAKE_CASE names (`NEW`, `IN_PROGRESS`, `PREVENTIVE`, ...)
//! so external transports stay compatible with existing consumers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use super::{RecurrenceRule, TimeWindow};

/// Unique identifier for a maintenance request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestId(Uuid);

impl RequestId {
    /// Generates a fresh random id.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Kind of maintenance work.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RequestType {
    /// Recurring, schedule-driven maintenance not triggered by a fault.
    Preventive,
    /// Maintenance triggered by an observed fault or failure.
    Corrective,
}

/// Lifecycle status of a request.
///
/// Valid transitions are enforced by the `lifecycle` module:
/// NEW -> IN_PROGRESS -> {REPAIRED, SCRAPPED}, with CANCELLED reachable
/// only from NEW (or via administrative force-close).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RequestStatus {
    New,
    InProgress,
    Repaired,
    Scrapped,
    Cancelled,
}

impl RequestStatus {
    /// Whether no further transition is permitted from this status.
    #[inline]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Repaired | Self::Scrapped | Self::Cancelled)
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::New => "NEW",
            Self::InProgress => "IN_PROGRESS",
            Self::Repaired => "REPAIRED",
            Self::Scrapped => "SCRAPPED",
            Self::Cancelled => "CANCELLED",
        };
        f.write_str(name)
    }
}

/// A maintenance request against a single asset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaintenanceRequest {
    /// Unique request identifier.
    pub id: RequestId,
    /// Short description of the work.
    pub subject: String,
    /// Serial number of the equipment worked on.
    pub equipment: String,
    /// Preventive or corrective.
    pub request_type: RequestType,
    /// Assigned team name.
    pub team: String,
    /// Assigned technician username (a member of `team`).
    pub technician: String,
    /// Scheduled start time.
    pub scheduled_start: DateTime<Utc>,
    /// Scheduled duration in whole minutes (non-negative).
    pub duration_minutes: i64,
    /// Lifecycle status.
    pub status: RequestStatus,
    /// Username of the creator.
    pub created_by: String,
    /// Recurrence rule; meaningful only for preventive requests.
    pub recurrence: Option<RecurrenceRule>,
    /// Set when the request was closed by administrative override.
    pub force_closed: bool,
}

impl MaintenanceRequest {
    /// The half-open window [scheduled_start, scheduled_start + duration)
    /// this request occupies.
    #[inline]
    pub fn window(&self) -> TimeWindow {
        TimeWindow::from_start(self.scheduled_start, self.duration_minutes)
    }

    /// Whether this request still participates in conflict checks.
    #[inline]
    pub fn is_active(&self) -> bool {
        !self.status.is_terminal()
    }
}

/// Input for creating a request.
///
/// Team and technician are optional; when omitted the engine resolves them
/// from the equipment's defaults. The engine fills in the id and the
/// initial NEW status.
#[derive(Debug, Clone)]
pub struct NewRequest {
    /// Short description of the work.
    pub subject: String,
    /// Serial number of the target equipment.
    pub equipment: String,
    /// Preventive or corrective.
    pub request_type: RequestType,
    /// Scheduled start time.
    pub scheduled_start: DateTime<Utc>,
    /// Scheduled duration in whole minutes.
    pub duration_minutes: i64,
    /// Explicit team assignment (falls back to the equipment default).
    pub team: Option<String>,
    /// Explicit technician assignment (falls back to the equipment default).
    pub technician: Option<String>,
    /// Username of the creator.
    pub created_by: String,
    /// Recurrence rule for preventive requests.
    pub recurrence: Option<RecurrenceRule>,
}

impl NewRequest {
    /// Creates a draft with the required fields.
    pub fn new(
        subject: impl Into<String>,
        equipment: impl Into<String>,
        request_type: RequestType,
        scheduled_start: DateTime<Utc>,
        duration_minutes: i64,
    ) -> Self {
        Self {
            subject: subject.into(),
            equipment: equipment.into(),
            request_type,
            scheduled_start,
            duration_minutes,
            team: None,
            technician: None,
            created_by: String::new(),
            recurrence: None,
        }
    }

    /// Sets an explicit team.
    pub fn with_team(mut self, team: impl Into<String>) -> Self {
        self.team = Some(team.into());
        self
    }

    /// Sets an explicit technician.
    pub fn with_technician(mut self, technician: impl Into<String>) -> Self {
        self.technician = Some(technician.into());
        self
    }

    /// Sets the creator.
    pub fn with_created_by(mut self, username: impl Into<String>) -> Self {
        self.created_by = username.into();
        self
    }

    /// Sets a recurrence rule.
    pub fn with_recurrence(mut self, rule: RecurrenceRule) -> Self {
        self.recurrence = Some(rule);
        self
    }
}

/// Read-only view of a request, returned by queries and reports.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestSummary {
    /// Request identifier.
    pub id: RequestId,
    /// Short description of the work.
    pub subject: String,
    /// Equipment serial number.
    pub equipment: String,
    /// Preventive or corrective.
    pub request_type: RequestType,
    /// Assigned team name.
    pub team: String,
    /// Assigned technician username.
    pub technician: String,
    /// Lifecycle status.
    pub status: RequestStatus,
    /// Occupied time window.
    pub window: TimeWindow,
}

impl From<&MaintenanceRequest> for RequestSummary {
    fn from(req: &MaintenanceRequest) -> Self {
        Self {
            id: req.id,
            subject: req.subject.clone(),
            equipment: req.equipment.clone(),
            request_type: req.request_type,
            team: req.team.clone(),
            technician: req.technician.clone(),
            status: req.status,
            window: req.window(),
        }
    }
}
