//! Aggregate read of the four non-user entity kinds.

use serde::{Deserialize, Serialize};

use crate::entities::{Appointment, Delivery, Shift, Training};

/// Full contents of every dashboard table, sent to a client on connect.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub shifts: Vec<Shift>,
    pub deliveries: Vec<Delivery>,
    pub training: Vec<Training>,
    pub appointments: Vec<Appointment>,
}
