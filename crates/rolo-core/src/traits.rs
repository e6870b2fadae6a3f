//! Repository traits at the persistence seam.
//!
//! These traits define the interfaces the concrete SQLite layer satisfies,
//! keeping the workflow crate decoupled from SQL and testable against
//! in-memory stores.

use std::pin::Pin;

use async_trait::async_trait;
use futures::Stream;
use uuid::Uuid;

use crate::error::Result;
use crate::models::{LinkedRecordTypeCount, RecordType, SearchResult};

/// A live query result: emits the current value immediately, then re-emits
/// whenever underlying data changes. Never completes while the store lives;
/// consumers stop it by dropping it.
pub type LiveStream<T> = Pin<Box<dyn Stream<Item = Result<T>> + Send>>;

// =============================================================================
// RECORD STORES
// =============================================================================

/// CRUD surface of one per-type record store.
///
/// Behavior is identical across the five record types; only the row shape
/// and display ordering differ.
#[async_trait]
pub trait RecordStore: Send + Sync {
    type Record: Send + 'static;

    /// Fetch one record. Fails with [`crate::Error::RecordNotFound`] if no
    /// row matches.
    async fn get(&self, id: Uuid) -> Result<Self::Record>;

    /// All records of this type, sorted by the type's natural display key.
    async fn get_all(&self) -> Result<Vec<Self::Record>>;

    /// Live single-row view of one record.
    fn watch(&self, id: Uuid) -> LiveStream<Self::Record>;

    /// Live ordered list of all records of this type.
    fn watch_all(&self) -> LiveStream<Vec<Self::Record>>;

    /// Insert. The record's id must already be populated (client-generated
    /// UUID); the canonical id is returned for immediate use.
    async fn add(&self, record: &Self::Record) -> Result<Uuid>;

    /// Full-row replace by id. Silent no-op if the id is absent; no
    /// existence check is performed.
    async fn update(&self, record: &Self::Record) -> Result<()>;

    /// Remove the row. Silent no-op if absent.
    async fn delete_by_id(&self, id: Uuid) -> Result<()>;
}

/// Object-safe deletion surface, the one thing the delete-record workflow
/// needs from whichever single store owns the record's type.
#[async_trait]
pub trait RecordDeleter: Send + Sync {
    /// Remove the row. Silent no-op if absent.
    async fn delete_by_id(&self, id: Uuid) -> Result<()>;
}

// =============================================================================
// LINKED-RECORD STORE
// =============================================================================

/// The untyped pairwise-link store.
///
/// Edges are symmetric in meaning but directionally stored; every read here
/// already unions both directions, so callers never see the asymmetry.
#[async_trait]
pub trait LinkStore: Send + Sync {
    /// Insert one edge. No de-duplication and no self-link guard: calling
    /// twice for the same pair produces two edges.
    async fn add_link(
        &self,
        record1_id: Uuid,
        record1_type: RecordType,
        record2_id: Uuid,
        record2_type: RecordType,
    ) -> Result<Uuid>;

    /// Remove every edge touching `record_id` as either endpoint; returns
    /// the number of rows removed. First step of any record deletion.
    async fn delete_links_touching(&self, record_id: Uuid) -> Result<u64>;

    /// Distinct other-endpoint types with edge counts, ordered by count
    /// descending. Drives detail-page tab generation.
    async fn linked_type_counts(&self, record_id: Uuid) -> Result<Vec<LinkedRecordTypeCount>>;

    /// Live variant of [`Self::linked_type_counts`].
    fn watch_type_counts(&self, record_id: Uuid) -> LiveStream<Vec<LinkedRecordTypeCount>>;

    /// All other-endpoint ids, both directions. Edge multiplicity is
    /// preserved: a record linked via two edges yields two ids.
    async fn linked_ids(&self, record_id: Uuid) -> Result<Vec<Uuid>>;

    /// Live variant of [`Self::linked_ids`].
    fn watch_linked_ids(&self, record_id: Uuid) -> LiveStream<Vec<Uuid>>;
}

// =============================================================================
// SEARCH INDEX
// =============================================================================

/// Cross-type keyword lookup over the union of all record tables.
#[async_trait]
pub trait SearchIndex: Send + Sync {
    /// Substring match over every record's display title. The caller wraps
    /// the raw query text in `%...%`; matching is LIKE-style,
    /// case-insensitive. Unranked, unpaginated.
    async fn search(&self, pattern: &str) -> Result<Vec<SearchResult>>;

    /// Live variant of [`Self::search`] for a fixed pattern.
    fn watch(&self, pattern: &str) -> LiveStream<Vec<SearchResult>>;
}
