//! Maintenance teams and technicians.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A maintenance team: a named roster of technicians.
///
/// Membership is a set; ordering carries no meaning. A team must have at
/// least one member to be assignable to new requests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Team {
    /// Unique team name (identity).
    pub name: String,
    /// Usernames of member technicians.
    pub members: BTreeSet<String>,
}

impl Team {
    /// Creates an empty team.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            members: BTreeSet::new(),
        }
    }

    /// Adds a member technician.
    pub fn with_member(mut self, username: impl Into<String>) -> Self {
        self.members.insert(username.into());
        self
    }

    /// Whether the given technician belongs to this team.
    #[inline]
    pub fn has_member(&self, username: &str) -> bool {
        self.members.contains(username)
    }

    /// First roster member in deterministic (lexicographic) order.
    pub fn first_member(&self) -> Option<&str> {
        self.members.iter().next().map(String::as_str)
    }
}

/// A technician referenced by teams and requests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Technician {
    /// Unique username (identity).
    pub username: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Contact email.
    pub email: String,
}

impl Technician {
    /// Creates a technician with the given username.
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            first_name: String::new(),
            last_name: String::new(),
            email: String::new(),
        }
    }

    /// Sets the given and family names.
    pub fn with_name(mut self, first: impl Into<String>, last: impl Into<String>) -> Self {
        self.first_name = first.into();
        self.last_name = last.into();
        self
    }

    /// Sets the contact email.
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    /// Display name, falling back to the username.
    pub fn display_name(&self) -> String {
        if self.first_name.is_empty() && self.last_name.is_empty() {
            self.username.clone()
        } else {
            format!("{} {}", self.first_name, self.last_name)
                .trim()
                .to_string()
        }
    }
}
