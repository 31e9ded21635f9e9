//! Wire types for the realtime channel and the login endpoint.

use serde::{Deserialize, Deserializer, Serialize, de};
use serde_json::Value;

use crate::entities::{EntryKind, Role, Shift};
use crate::snapshot::Snapshot;

/// Messages a client may send over the realtime channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "camelCase")]
pub enum ClientMessage {
    AddWorker {
        name: String,
        role: String,
        time: String,
    },
    UpdateEntry {
        category: EntryKind,
        #[serde(deserialize_with = "lenient_id")]
        id: i64,
        field: String,
        value: Value,
    },
    WorkerToggleStatus {
        name: String,
    },
}

/// Messages the server pushes to connected clients.
///
/// `Init` carries the full snapshot on connect; after a mutation only the
/// changed record or field is broadcast.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "camelCase")]
pub enum ServerMessage {
    Init(Snapshot),
    ShiftAdded {
        shift: Shift,
    },
    EntryUpdated {
        kind: EntryKind,
        id: i64,
        field: String,
        value: Value,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub success: bool,
    pub role: Role,
    pub name: String,
}

// Identifiers arrive as numbers or numeric strings depending on the client.
fn lenient_id<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Number(n) => n
            .as_i64()
            .ok_or_else(|| de::Error::custom("id is not an integer")),
        Value::String(s) => s
            .trim()
            .parse::<i64>()
            .map_err(|_| de::Error::custom("id is not an integer")),
        other => Err(de::Error::custom(format!(
            "id must be an integer, got {other}"
        ))),
    }
}
