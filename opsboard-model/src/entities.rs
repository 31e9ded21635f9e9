//! Flat record types stored by the dashboard.
//!
//! Identifiers are SQLite rowids, unique within each kind. A `Shift` carries
//! an optional `user_id` reference to the login identity it belongs to;
//! records created before the reference existed may leave it unset.

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Well-known shift status values.
///
/// `status` is free text as far as storage is concerned; only these three
/// values carry meaning for the toggle flow.
pub mod status {
    pub const SCHEDULED: &str = "Scheduled";
    pub const ON_DUTY: &str = "On Duty";
    pub const OFF_DUTY: &str = "Off Duty";
}

/// Access role of a login identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Worker,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Worker => "worker",
        }
    }
}

impl Display for Role {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Role::Admin),
            "worker" => Ok(Role::Worker),
            other => Err(UnknownRole(other.to_owned())),
        }
    }
}

/// Error returned when a stored role string is not a known variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownRole(pub String);

impl Display for UnknownRole {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "unknown role: {}", self.0)
    }
}

impl std::error::Error for UnknownRole {}

/// A login identity. Never serialized to the wire; the credential hash stays
/// server-side.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub password_hash: String,
    pub role: Role,
}

/// A duty record for one worker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Shift {
    pub id: i64,
    /// Login identity this shift belongs to, when known.
    pub user_id: Option<i64>,
    pub name: String,
    pub role: String,
    pub time: String,
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Delivery {
    pub id: i64,
    pub label: String,
    pub items: String,
    pub address: String,
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Training {
    pub id: i64,
    pub topic: String,
    pub trainer: String,
    pub time: String,
    pub attendees: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Appointment {
    pub id: i64,
    /// Counterparty name. Serialized as `with` on the wire.
    #[serde(rename = "with")]
    pub with_name: String,
    pub purpose: String,
    pub time: String,
    pub location: String,
}

/// The four entity kinds a generic field update may target.
///
/// Unknown categories fail at deserialization rather than being matched
/// against an allow-list at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Shifts,
    Deliveries,
    Training,
    Appointments,
}

impl EntryKind {
    pub fn as_str(self) -> &'static str {
        match self {
            EntryKind::Shifts => "shifts",
            EntryKind::Deliveries => "deliveries",
            EntryKind::Training => "training",
            EntryKind::Appointments => "appointments",
        }
    }
}

impl Display for EntryKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
