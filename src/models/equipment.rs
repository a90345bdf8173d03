//! Equipment (asset) model.
//!
//! A piece of physical equipment tracked for maintenance: a generator, a
//! compressor, an HVAC unit. Identified by its serial number. May carry a
//! default team and technician used when a request is created without an
//! explicit assignment.
//!
//! # Condition Flags
//!
//! `is_usable` and `is_scrapped` are snapshots of the asset's condition.
//! They are flipped only by the lifecycle state machine as request side
//! effects (a corrective repair restores usability, scrapping retires the
//! asset); the registry exposes no public mutator for them.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A maintainable asset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Equipment {
    /// Unique serial number (identity).
    pub serial_number: String,
    /// Human-readable name.
    pub name: String,
    /// Owning department or cost center.
    pub department: String,
    /// Physical location.
    pub location: String,
    /// Purchase date, if known.
    pub purchase_date: Option<NaiveDate>,
    /// Warranty end date, if known.
    pub warranty_end: Option<NaiveDate>,
    /// Team that handles this asset's requests by default.
    pub default_team: Option<String>,
    /// Technician assigned by default.
    pub default_technician: Option<String>,
    /// Whether the asset is currently operational.
    pub is_usable: bool,
    /// Whether the asset has been permanently retired.
    pub is_scrapped: bool,
    /// Domain-specific key-value metadata.
    pub attributes: HashMap<String, String>,
}

impl Equipment {
    /// Creates a new usable asset with the given serial number.
    pub fn new(serial_number: impl Into<String>) -> Self {
        Self {
            serial_number: serial_number.into(),
            name: String::new(),
            department: String::new(),
            location: String::new(),
            purchase_date: None,
            warranty_end: None,
            default_team: None,
            default_technician: None,
            is_usable: true,
            is_scrapped: false,
            attributes: HashMap::new(),
        }
    }

    /// Sets the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the owning department.
    pub fn with_department(mut self, department: impl Into<String>) -> Self {
        self.department = department.into();
        self
    }

    /// Sets the physical location.
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    /// Sets the purchase date.
    pub fn with_purchase_date(mut self, date: NaiveDate) -> Self {
        self.purchase_date = Some(date);
        self
    }

    /// Sets the warranty end date.
    pub fn with_warranty_end(mut self, date: NaiveDate) -> Self {
        self.warranty_end = Some(date);
        self
    }

    /// Sets the default team.
    pub fn with_default_team(mut self, team: impl Into<String>) -> Self {
        self.default_team = Some(team.into());
        self
    }

    /// Sets the default technician.
    pub fn with_default_technician(mut self, technician: impl Into<String>) -> Self {
        self.default_technician = Some(technician.into());
        self
    }

    /// Sets the usability flag (asset onboarding only; afterwards the
    /// lifecycle state machine owns this flag).
    pub fn usable(mut self, is_usable: bool) -> Self {
        self.is_usable = is_usable;
        self
    }

    /// Adds a domain-specific attribute.
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Whether the warranty covers the given date.
    pub fn under_warranty(&self, date: NaiveDate) -> bool {
        self.warranty_end.is_some_and(|end| date <= end)
    }
}
