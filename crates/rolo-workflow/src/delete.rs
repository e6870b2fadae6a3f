//! Record deletion with link cascade.

use tracing::debug;
use uuid::Uuid;

use rolo_core::{LinkStore, RecordDeleter, Result};

/// Delete a record and every edge touching it.
///
/// Order is fixed: edges first, unconditionally, then the row itself from
/// the one store owning the record's type. Not transactional; both steps
/// are idempotent no-ops when re-run. Returns the number of edges removed.
pub async fn delete_record(
    links: &dyn LinkStore,
    store: &dyn RecordDeleter,
    record_id: Uuid,
) -> Result<u64> {
    let removed = links.delete_links_touching(record_id).await?;
    store.delete_by_id(record_id).await?;

    debug!(
        subsystem = "workflow",
        component = "delete_record",
        record_id = %record_id,
        removed_count = removed,
        "record deleted"
    );
    Ok(removed)
}
