//! First-run data.
//!
//! Guarded solely by the admin-existence check: if the admin user is present
//! the sample records are assumed to exist too and nothing is re-created.

use opsboard_model::{Role, status};
use tracing::info;

use crate::auth;
use crate::error::Result;
use crate::store::{NewShift, Store};

pub const ADMIN_USERNAME: &str = "admin";
pub const ADMIN_PASSWORD: &str = "123";

/// Ensure the admin user and the two sample records exist.
///
/// Returns `true` when seeding ran, `false` when the store was already
/// seeded. Idempotent either way.
pub async fn run(store: &Store) -> Result<bool> {
    if store.user_by_username(ADMIN_USERNAME).await?.is_some() {
        return Ok(false);
    }

    let admin_hash = auth::hash_password(ADMIN_PASSWORD)?;
    store
        .create_user(ADMIN_USERNAME, &admin_hash, Role::Admin)
        .await?;

    // Sample roster entry. The worker gets a real login identity so the
    // shift's user_id reference resolves, same as add_worker.
    let worker_hash =
        auth::hash_password(crate::mutations::DEFAULT_WORKER_PASSWORD)?;
    let sarah = store
        .create_user("Sarah Connor", &worker_hash, Role::Worker)
        .await?;
    store
        .create_shift(NewShift {
            user_id: Some(sarah.id),
            name: "Sarah Connor",
            role: "Server",
            time: "09:00 - 17:00",
            status: status::ON_DUTY,
        })
        .await?;

    store
        .create_delivery(
            "#ORD-992",
            "Produce, dry goods (12 crates)",
            "44 Brannan St",
            "In Transit",
        )
        .await?;

    info!("seeded admin user and sample records");
    Ok(true)
}
