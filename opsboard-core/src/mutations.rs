//! The three dashboard mutations.
//!
//! Each mutation writes through the store and reports what changed so the
//! caller can broadcast an incremental notification. Not-found conditions are
//! outcomes, not errors.

use opsboard_model::{EntryKind, Role, Shift, status};
use serde_json::Value;
use tracing::warn;

use crate::auth;
use crate::error::Result;
use crate::store::{ColumnValue, NewShift, Store};

/// Initial password for worker accounts created through the dashboard.
/// Workers are expected to change it on first login.
pub const DEFAULT_WORKER_PASSWORD: &str = "changeme";

/// Result of a generic field update.
#[derive(Debug, Clone, PartialEq)]
pub enum UpdateOutcome {
    /// The write happened; carries the broadcastable change.
    Applied {
        kind: EntryKind,
        id: i64,
        field: String,
        value: Value,
    },
    /// No row with that id; silently ignorable.
    NotFound,
    /// The field is not in the kind's column set; nothing written.
    UnknownField,
    /// The value does not fit the field's type; nothing written.
    InvalidValue,
}

/// A status flip performed by [`toggle_status`].
#[derive(Debug, Clone, PartialEq)]
pub struct StatusChange {
    pub shift_id: i64,
    pub status: String,
}

/// Create a worker login identity and its duty record.
///
/// Two separate writes, not a transaction: a duplicate username aborts before
/// the shift exists, while a shift failure after the user write leaves the
/// user behind. The second case is accepted; the identity can still log in
/// and a shift can be attached later.
pub async fn add_worker(
    store: &Store,
    name: &str,
    role: &str,
    time: &str,
) -> Result<Shift> {
    let password_hash = auth::hash_password(DEFAULT_WORKER_PASSWORD)?;
    let user = store.create_user(name, &password_hash, Role::Worker).await?;

    store
        .create_shift(NewShift {
            user_id: Some(user.id),
            name,
            role,
            time,
            status: status::SCHEDULED,
        })
        .await
}

/// Set one field on one record of the given kind.
pub async fn update_entry(
    store: &Store,
    kind: EntryKind,
    id: i64,
    field: &str,
    value: &Value,
) -> Result<UpdateOutcome> {
    let Some(spec) = field_spec(kind, field) else {
        warn!(%kind, field, "rejected update for unknown field");
        return Ok(UpdateOutcome::UnknownField);
    };

    let Some(column_value) = spec.coerce(value) else {
        warn!(%kind, field, %value, "rejected update with mismatched value type");
        return Ok(UpdateOutcome::InvalidValue);
    };

    let broadcast_value = match &column_value {
        ColumnValue::Text(text) => Value::String(text.clone()),
        ColumnValue::Integer(n) => Value::from(*n),
    };

    let affected = store
        .update_column(table_for(kind), spec.column, id, column_value)
        .await?;
    if affected == 0 {
        return Ok(UpdateOutcome::NotFound);
    }

    Ok(UpdateOutcome::Applied {
        kind,
        id,
        field: spec.field.to_owned(),
        value: broadcast_value,
    })
}

/// Flip a worker's shift between "On Duty" and "Off Duty".
///
/// The shift is resolved through the worker's login identity, not by matching
/// display names. Returns `None` when there is no such worker, no linked
/// shift, or the current status is outside the toggle pair ("Scheduled" stays
/// "Scheduled").
pub async fn toggle_status(
    store: &Store,
    name: &str,
) -> Result<Option<StatusChange>> {
    let Some(user) = store.user_by_username(name).await? else {
        return Ok(None);
    };
    let Some(shift) = store.shift_by_user(user.id).await? else {
        return Ok(None);
    };

    let next = match shift.status.as_str() {
        status::ON_DUTY => status::OFF_DUTY,
        status::OFF_DUTY => status::ON_DUTY,
        _ => return Ok(None),
    };

    let affected = store
        .update_column(
            table_for(EntryKind::Shifts),
            "status",
            shift.id,
            ColumnValue::Text(next.to_owned()),
        )
        .await?;
    if affected == 0 {
        // The shift vanished between the read and the write.
        return Ok(None);
    }

    Ok(Some(StatusChange {
        shift_id: shift.id,
        status: next.to_owned(),
    }))
}

fn table_for(kind: EntryKind) -> &'static str {
    match kind {
        EntryKind::Shifts => "shifts",
        EntryKind::Deliveries => "deliveries",
        EntryKind::Training => "training",
        EntryKind::Appointments => "appointments",
    }
}

#[derive(Debug, Clone, Copy)]
enum FieldType {
    Text,
    Integer,
}

#[derive(Debug, Clone, Copy)]
struct FieldSpec {
    /// Wire name of the field.
    field: &'static str,
    /// Column it maps to.
    column: &'static str,
    ty: FieldType,
}

impl FieldSpec {
    const fn text(name: &'static str) -> Self {
        Self {
            field: name,
            column: name,
            ty: FieldType::Text,
        }
    }

    fn coerce(&self, value: &Value) -> Option<ColumnValue> {
        match self.ty {
            FieldType::Text => match value {
                Value::String(s) => Some(ColumnValue::Text(s.clone())),
                // Numeric input into a text field keeps its rendering.
                Value::Number(n) => Some(ColumnValue::Text(n.to_string())),
                _ => None,
            },
            FieldType::Integer => match value {
                Value::Number(n) => n.as_i64().map(ColumnValue::Integer),
                Value::String(s) => {
                    s.trim().parse::<i64>().ok().map(ColumnValue::Integer)
                }
                _ => None,
            },
        }
    }
}

/// Per-kind column sets. Any field outside these is rejected, which replaces
/// the old behavior of writing arbitrary keys into the row.
fn field_spec(kind: EntryKind, field: &str) -> Option<FieldSpec> {
    const SHIFTS: [FieldSpec; 4] = [
        FieldSpec::text("name"),
        FieldSpec::text("role"),
        FieldSpec::text("time"),
        FieldSpec::text("status"),
    ];
    const DELIVERIES: [FieldSpec; 4] = [
        FieldSpec::text("label"),
        FieldSpec::text("items"),
        FieldSpec::text("address"),
        FieldSpec::text("status"),
    ];
    const TRAINING: [FieldSpec; 4] = [
        FieldSpec::text("topic"),
        FieldSpec::text("trainer"),
        FieldSpec::text("time"),
        FieldSpec {
            field: "attendees",
            column: "attendees",
            ty: FieldType::Integer,
        },
    ];
    const APPOINTMENTS: [FieldSpec; 4] = [
        FieldSpec {
            field: "with",
            column: "with_name",
            ty: FieldType::Text,
        },
        FieldSpec::text("purpose"),
        FieldSpec::text("time"),
        FieldSpec::text("location"),
    ];

    let specs: &[FieldSpec] = match kind {
        EntryKind::Shifts => &SHIFTS,
        EntryKind::Deliveries => &DELIVERIES,
        EntryKind::Training => &TRAINING,
        EntryKind::Appointments => &APPOINTMENTS,
    };

    specs.iter().copied().find(|spec| spec.field == field)
}
