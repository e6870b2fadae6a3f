//! Cross-type keyword search.
//!
//! Every record is exposed as a uniform (id, title, type tag) row through a
//! union of five per-type projections, filtered by a LIKE pattern the caller
//! has already wrapped in `%...%`. SQLite LIKE is case-insensitive for
//! ASCII. No ranking beyond the union order, no pagination.

use std::time::Instant;

use async_trait::async_trait;
use sqlx::sqlite::SqlitePool;
use sqlx::Row;
use tracing::{debug, warn};

use rolo_core::{
    ChangeBus, Error, LiveStream, RecordType, Result, SearchIndex, SearchResult, Table,
};

use crate::live::live;

/// Five-way union projection. Type tags are the fixed RecordType wire
/// values; Contact matches either name field but displays "last, first".
const SEARCH_SQL: &str = "\
    SELECT id AS record_id, 1 AS record_type_id, title AS title \
      FROM Note WHERE title LIKE $1 \
    UNION ALL \
    SELECT id, 2, last_name || ', ' || first_name \
      FROM Contact WHERE last_name LIKE $1 OR first_name LIKE $1 \
    UNION ALL \
    SELECT id, 3, organization_name \
      FROM Organization WHERE organization_name LIKE $1 \
    UNION ALL \
    SELECT id, 4, category_name \
      FROM Category WHERE category_name LIKE $1 \
    UNION ALL \
    SELECT id, 5, item_name \
      FROM Item WHERE item_name LIKE $1";

/// Tables the search projection reads from.
const SEARCH_TABLES: [Table; 5] = [
    Table::Note,
    Table::Contact,
    Table::Organization,
    Table::Category,
    Table::Item,
];

/// SQLite implementation of the cross-type search index.
#[derive(Clone)]
pub struct SqliteSearchIndex {
    pool: SqlitePool,
    changes: ChangeBus,
}

async fn run_search(pool: &SqlitePool, pattern: &str) -> Result<Vec<SearchResult>> {
    let rows = sqlx::query(SEARCH_SQL)
        .bind(pattern)
        .fetch_all(pool)
        .await
        .map_err(Error::Database)?;

    let mut results = Vec::with_capacity(rows.len());
    for row in &rows {
        let tag: i64 = row.try_get("record_type_id")?;
        let Some(record_type) = RecordType::from_id(tag) else {
            warn!(
                subsystem = "search",
                component = "index",
                record_type = tag,
                "skipping row with unknown record type tag"
            );
            continue;
        };
        results.push(SearchResult {
            record_id: row.try_get("record_id")?,
            record_type,
            title: row.try_get("title")?,
            is_selected: false,
            is_linked: false,
        });
    }
    Ok(results)
}

impl SqliteSearchIndex {
    /// Create a search index over the given pool and change bus.
    pub fn new(pool: SqlitePool, changes: ChangeBus) -> Self {
        Self { pool, changes }
    }

    /// Keyword lookup. `pattern` is the already-`%`-wrapped LIKE pattern.
    pub async fn search(&self, pattern: &str) -> Result<Vec<SearchResult>> {
        let start = Instant::now();
        let results = run_search(&self.pool, pattern).await?;

        debug!(
            subsystem = "search",
            component = "index",
            op = "search",
            query = pattern,
            result_count = results.len(),
            duration_ms = start.elapsed().as_millis() as u64,
            "search complete"
        );
        Ok(results)
    }

    /// Live variant of [`Self::search`] for a fixed pattern.
    pub fn watch(&self, pattern: &str) -> LiveStream<Vec<SearchResult>> {
        let pool = self.pool.clone();
        let pattern = pattern.to_string();
        live(&self.changes, SEARCH_TABLES.to_vec(), move || {
            let pool = pool.clone();
            let pattern = pattern.clone();
            async move { run_search(&pool, &pattern).await }
        })
    }
}

#[async_trait]
impl SearchIndex for SqliteSearchIndex {
    async fn search(&self, pattern: &str) -> Result<Vec<SearchResult>> {
        SqliteSearchIndex::search(self, pattern).await
    }

    fn watch(&self, pattern: &str) -> LiveStream<Vec<SearchResult>> {
        SqliteSearchIndex::watch(self, pattern)
    }
}
