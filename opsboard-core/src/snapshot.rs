//! Aggregate read side: the full contents of the four dashboard tables.

use opsboard_model::Snapshot;

use crate::error::Result;
use crate::store::Store;

/// Read every dashboard table and compose one snapshot.
///
/// Fail-fast: the first store error aborts the whole read. A partial snapshot
/// is never returned.
pub async fn assemble(store: &Store) -> Result<Snapshot> {
    Ok(Snapshot {
        shifts: store.all_shifts().await?,
        deliveries: store.all_deliveries().await?,
        training: store.all_training().await?,
        appointments: store.all_appointments().await?,
    })
}
