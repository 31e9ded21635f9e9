//! Core data model definitions shared across Opsboard crates.

pub mod entities;
pub mod messages;
pub mod snapshot;

pub use entities::{
    Appointment, Delivery, EntryKind, Role, Shift, Training, User, status,
};
pub use messages::{ClientMessage, LoginRequest, LoginResponse, ServerMessage};
pub use snapshot::Snapshot;
