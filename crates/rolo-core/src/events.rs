//! Change-notification bus powering live queries.
//!
//! Every successful mutation in the persistence layer emits a [`ChangeEvent`]
//! onto a shared broadcast channel. Live queries subscribe and re-run their
//! underlying SQL whenever a table they depend on changes. Consumers that
//! fall behind are lagged by the channel, never blocked; a lagged live query
//! resynchronizes by re-querying.

use tokio::sync::broadcast;
use tracing::trace;
use uuid::Uuid;

use crate::defaults::CHANGE_BUS_CAPACITY;
use crate::models::RecordType;

/// A mutable table in the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Table {
    Note,
    Contact,
    Organization,
    Category,
    Item,
    LinkedRecord,
}

impl From<RecordType> for Table {
    fn from(ty: RecordType) -> Self {
        match ty {
            RecordType::Note => Table::Note,
            RecordType::Contact => Table::Contact,
            RecordType::Organization => Table::Organization,
            RecordType::Category => Table::Category,
            RecordType::Item => Table::Item,
        }
    }
}

/// Notification that rows in `table` changed.
///
/// `record_id` identifies the touched record for single-row mutations; bulk
/// mutations (cascades) carry `None` and consumers must re-query.
#[derive(Debug, Clone, Copy)]
pub struct ChangeEvent {
    pub table: Table,
    pub record_id: Option<Uuid>,
}

/// Broadcast bus for change notifications.
///
/// Cloning shares the underlying channel; subscribers created from any clone
/// see every event emitted after their subscription.
#[derive(Debug, Clone)]
pub struct ChangeBus {
    tx: broadcast::Sender<ChangeEvent>,
}

impl ChangeBus {
    /// Create a bus with the default buffered capacity.
    pub fn new() -> Self {
        Self::with_capacity(CHANGE_BUS_CAPACITY)
    }

    /// Create a bus with an explicit buffered capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    /// Subscribe to change events emitted from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<ChangeEvent> {
        self.tx.subscribe()
    }

    /// Emit a change event.
    ///
    /// A send error only means no live query is currently subscribed, so it
    /// is swallowed.
    pub fn emit(&self, event: ChangeEvent) {
        trace!(?event, "change event");
        let _ = self.tx.send(event);
    }

    /// Current number of subscribers.
    pub fn receiver_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for ChangeBus {
    fn default() -> Self {
        Self::new()
    }
}
