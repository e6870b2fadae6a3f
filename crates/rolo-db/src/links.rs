//! Linked-record store: the untyped pairwise association table.
//!
//! Edges are symmetric in meaning but physically stored as an ordered pair,
//! so every read must union both directions. All neighbor lookups funnel
//! through [`NEIGHBOR_UNION_SQL`]; no call site can forget a direction.
//!
//! Two behaviors are preserved from the product as observed, not as
//! guarantees: `add_link` performs no de-duplication and no self-link guard,
//! and neighbor ids keep edge multiplicity (a record linked through two
//! edges appears twice).

use async_trait::async_trait;
use sqlx::sqlite::SqlitePool;
use sqlx::Row;
use tracing::{debug, warn};
use uuid::Uuid;

use rolo_core::{
    ChangeBus, ChangeEvent, Error, LinkedRecord, LinkedRecordTypeCount, LinkStore, LiveStream,
    RecordType, Result, Table,
};

use crate::live::live;
use crate::records::StoredRecord;

/// Both-direction neighbor projection for `$1` as the source record.
///
/// `UNION ALL`, not `UNION`: edge multiplicity must survive so that
/// type counts count edges and duplicate edges stay observable.
const NEIGHBOR_UNION_SQL: &str = "\
    SELECT record2_id AS neighbor_id, record2_type_id AS neighbor_type_id \
      FROM LinkedRecord WHERE record1_id = $1 \
    UNION ALL \
    SELECT record1_id AS neighbor_id, record1_type_id AS neighbor_type_id \
      FROM LinkedRecord WHERE record2_id = $1";

/// SQLite store for linked-record edges.
#[derive(Clone)]
pub struct SqliteLinkStore {
    pool: SqlitePool,
    changes: ChangeBus,
}

async fn fetch_type_counts(pool: &SqlitePool, record_id: Uuid) -> Result<Vec<LinkedRecordTypeCount>> {
    let sql = format!(
        "SELECT neighbor_type_id, COUNT(*) AS link_count \
           FROM ({NEIGHBOR_UNION_SQL}) \
          GROUP BY neighbor_type_id \
          ORDER BY link_count DESC"
    );
    let rows = sqlx::query(&sql)
        .bind(record_id)
        .fetch_all(pool)
        .await
        .map_err(Error::Database)?;

    let mut counts = Vec::with_capacity(rows.len());
    for row in &rows {
        let tag: i64 = row.try_get("neighbor_type_id")?;
        let count: i64 = row.try_get("link_count")?;
        match RecordType::from_id(tag) {
            Some(record_type) => counts.push(LinkedRecordTypeCount { record_type, count }),
            // Possible only via external edits to the file; the row is
            // unreachable from any store, so skip rather than fail the query.
            None => warn!(
                subsystem = "database",
                component = "link_store",
                record_type = tag,
                "skipping edge with unknown record type tag"
            ),
        }
    }
    Ok(counts)
}

async fn fetch_linked_ids(pool: &SqlitePool, record_id: Uuid) -> Result<Vec<Uuid>> {
    let sql = format!("SELECT neighbor_id FROM ({NEIGHBOR_UNION_SQL})");
    let rows = sqlx::query(&sql)
        .bind(record_id)
        .fetch_all(pool)
        .await
        .map_err(Error::Database)?;

    rows.iter()
        .map(|row| row.try_get("neighbor_id").map_err(Error::Database))
        .collect()
}

async fn fetch_linked_records<R: StoredRecord>(
    pool: &SqlitePool,
    record_id: Uuid,
) -> Result<Vec<R>> {
    let sql = format!(
        "SELECT {cols} FROM {table} \
          WHERE id IN (SELECT neighbor_id FROM ({union}) WHERE neighbor_type_id = $2) \
          ORDER BY {order}",
        cols = R::COLUMNS,
        table = R::TYPE.table(),
        union = NEIGHBOR_UNION_SQL,
        order = R::ORDER_BY,
    );
    let rows = sqlx::query(&sql)
        .bind(record_id)
        .bind(R::TYPE.id())
        .fetch_all(pool)
        .await
        .map_err(Error::Database)?;

    rows.iter().map(R::from_row).collect()
}

impl SqliteLinkStore {
    /// Create a link store over the given pool and change bus.
    pub fn new(pool: SqlitePool, changes: ChangeBus) -> Self {
        Self { pool, changes }
    }

    /// Insert one edge row; returns the edge id.
    ///
    /// No de-duplication check and no self-link guard; duplicate and
    /// reflexive edges are stored as-is.
    pub async fn add_link(
        &self,
        record1_id: Uuid,
        record1_type: RecordType,
        record2_id: Uuid,
        record2_type: RecordType,
    ) -> Result<Uuid> {
        let edge = LinkedRecord::new(record1_id, record1_type, record2_id, record2_type);

        sqlx::query(
            "INSERT INTO LinkedRecord \
             (id, owner_db_id, record1_id, record1_type_id, record2_id, record2_type_id) \
             VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(edge.id)
        .bind(edge.owner_db_id.as_str())
        .bind(edge.record1_id)
        .bind(edge.record1_type.id())
        .bind(edge.record2_id)
        .bind(edge.record2_type.id())
        .execute(&self.pool)
        .await
        .map_err(Error::Database)?;

        debug!(
            subsystem = "database",
            component = "link_store",
            op = "add_link",
            record_id = %record1_id,
            "edge inserted"
        );

        self.changes.emit(ChangeEvent {
            table: Table::LinkedRecord,
            record_id: None,
        });
        Ok(edge.id)
    }

    /// Remove every edge touching `record_id` as either endpoint.
    ///
    /// First step of any record deletion; returns the number of rows
    /// removed.
    pub async fn delete_links_touching(&self, record_id: Uuid) -> Result<u64> {
        let result =
            sqlx::query("DELETE FROM LinkedRecord WHERE record1_id = $1 OR record2_id = $1")
                .bind(record_id)
                .execute(&self.pool)
                .await
                .map_err(Error::Database)?;

        let removed = result.rows_affected();
        debug!(
            subsystem = "database",
            component = "link_store",
            op = "delete_links_touching",
            record_id = %record_id,
            removed_count = removed,
            "edges removed"
        );

        if removed > 0 {
            self.changes.emit(ChangeEvent {
                table: Table::LinkedRecord,
                record_id: None,
            });
        }
        Ok(removed)
    }

    /// Distinct linked record types with edge counts, most-populous first.
    pub async fn linked_type_counts(&self, record_id: Uuid) -> Result<Vec<LinkedRecordTypeCount>> {
        fetch_type_counts(&self.pool, record_id).await
    }

    /// Live variant of [`Self::linked_type_counts`].
    pub fn watch_type_counts(&self, record_id: Uuid) -> LiveStream<Vec<LinkedRecordTypeCount>> {
        let pool = self.pool.clone();
        live(&self.changes, vec![Table::LinkedRecord], move || {
            let pool = pool.clone();
            async move { fetch_type_counts(&pool, record_id).await }
        })
    }

    /// All other-endpoint ids for `record_id`, edge multiplicity preserved.
    pub async fn linked_ids(&self, record_id: Uuid) -> Result<Vec<Uuid>> {
        fetch_linked_ids(&self.pool, record_id).await
    }

    /// Live variant of [`Self::linked_ids`].
    pub fn watch_linked_ids(&self, record_id: Uuid) -> LiveStream<Vec<Uuid>> {
        let pool = self.pool.clone();
        live(&self.changes, vec![Table::LinkedRecord], move || {
            let pool = pool.clone();
            async move { fetch_linked_ids(&pool, record_id).await }
        })
    }

    /// Records of type `R` linked to `record_id`, in `R`'s display order.
    ///
    /// The single parameterized form of the per-type-pair link queries: the
    /// bidirectional neighbor union filtered by `R`'s type tag, joined to
    /// `R`'s table through the [`RecordType::table`] dispatch.
    pub async fn linked_records<R: StoredRecord>(&self, record_id: Uuid) -> Result<Vec<R>> {
        fetch_linked_records(&self.pool, record_id).await
    }

    /// Live variant of [`Self::linked_records`].
    ///
    /// Tracks the target table as well as `LinkedRecord`: renaming or
    /// deleting a linked record changes this list even when no edge moves.
    pub fn watch_linked_records<R: StoredRecord>(&self, record_id: Uuid) -> LiveStream<Vec<R>> {
        let pool = self.pool.clone();
        live(
            &self.changes,
            vec![Table::LinkedRecord, Table::from(R::TYPE)],
            move || {
                let pool = pool.clone();
                async move { fetch_linked_records::<R>(&pool, record_id).await }
            },
        )
    }

    /// Total number of edge rows in the store.
    pub async fn count(&self) -> Result<i64> {
        let row = sqlx::query("SELECT COUNT(*) AS count FROM LinkedRecord")
            .fetch_one(&self.pool)
            .await
            .map_err(Error::Database)?;
        row.try_get("count").map_err(Error::Database)
    }
}

#[async_trait]
impl LinkStore for SqliteLinkStore {
    async fn add_link(
        &self,
        record1_id: Uuid,
        record1_type: RecordType,
        record2_id: Uuid,
        record2_type: RecordType,
    ) -> Result<Uuid> {
        SqliteLinkStore::add_link(self, record1_id, record1_type, record2_id, record2_type).await
    }

    async fn delete_links_touching(&self, record_id: Uuid) -> Result<u64> {
        SqliteLinkStore::delete_links_touching(self, record_id).await
    }

    async fn linked_type_counts(&self, record_id: Uuid) -> Result<Vec<LinkedRecordTypeCount>> {
        SqliteLinkStore::linked_type_counts(self, record_id).await
    }

    fn watch_type_counts(&self, record_id: Uuid) -> LiveStream<Vec<LinkedRecordTypeCount>> {
        SqliteLinkStore::watch_type_counts(self, record_id)
    }

    async fn linked_ids(&self, record_id: Uuid) -> Result<Vec<Uuid>> {
        SqliteLinkStore::linked_ids(self, record_id).await
    }

    fn watch_linked_ids(&self, record_id: Uuid) -> LiveStream<Vec<Uuid>> {
        SqliteLinkStore::watch_linked_ids(self, record_id)
    }
}
