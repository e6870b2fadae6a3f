//! Generic per-type record store.
//!
//! The five record kinds share identical store behavior; only the row shape
//! and display ordering differ. Instead of five near-identical repositories,
//! each model implements [`StoredRecord`] (table metadata, binds, row
//! mapping) and [`SqliteStore`] provides the store once, generically.
//!
//! Store contract:
//! - ids are client-generated UUIDs populated before insert; `add` returns
//!   the canonical id (the SQLite rowid is only debug-logged),
//! - `update` and `delete_by_id` of a missing id silently succeed; no
//!   existence check is performed.

use std::marker::PhantomData;

use async_trait::async_trait;
use sqlx::query::Query;
use sqlx::sqlite::{SqliteArguments, SqlitePool, SqliteRow};
use sqlx::{Row, Sqlite};
use tracing::debug;
use uuid::Uuid;

use rolo_core::{
    Category, ChangeBus, ChangeEvent, Contact, Error, Item, LiveStream, Note, Organization,
    RecordDeleter, RecordStore, RecordType, Result, Table,
};

use crate::live::live;

/// Alias for an unprepared SQLite query being bound.
pub type SqliteQuery<'q> = Query<'q, Sqlite, SqliteArguments<'q>>;

/// Table metadata and row plumbing for one of the five record kinds.
///
/// `bind_insert` and `bind_update` must bind in parameter-number order
/// (`$1`, `$2`, ...) of the corresponding SQL constant.
pub trait StoredRecord: Clone + Send + Sync + Unpin + 'static {
    /// Which of the five record kinds this is. `TYPE.table()` is the owning
    /// SQL table.
    const TYPE: RecordType;
    /// Comma-separated column list, id first.
    const COLUMNS: &'static str;
    /// Natural display ordering for list queries.
    const ORDER_BY: &'static str;
    /// Full-row insert statement matching `bind_insert`.
    const INSERT_SQL: &'static str;
    /// Full-row replace statement matching `bind_update`.
    const UPDATE_SQL: &'static str;

    fn id(&self) -> Uuid;
    fn from_row(row: &SqliteRow) -> Result<Self>;
    fn bind_insert<'q>(&'q self, query: SqliteQuery<'q>) -> SqliteQuery<'q>;
    fn bind_update<'q>(&'q self, query: SqliteQuery<'q>) -> SqliteQuery<'q>;
}

impl StoredRecord for Contact {
    const TYPE: RecordType = RecordType::Contact;
    const COLUMNS: &'static str = "id, owner_db_id, last_name, first_name, comments";
    const ORDER_BY: &'static str = "last_name COLLATE NOCASE ASC, first_name COLLATE NOCASE ASC";
    const INSERT_SQL: &'static str = "INSERT INTO Contact \
        (id, owner_db_id, last_name, first_name, comments) \
        VALUES ($1, $2, $3, $4, $5)";
    const UPDATE_SQL: &'static str = "UPDATE Contact SET \
        owner_db_id = $2, last_name = $3, first_name = $4, comments = $5 \
        WHERE id = $1";

    fn id(&self) -> Uuid {
        self.id
    }

    fn from_row(row: &SqliteRow) -> Result<Self> {
        Ok(Self {
            id: row.try_get("id")?,
            owner_db_id: row.try_get("owner_db_id")?,
            last_name: row.try_get("last_name")?,
            first_name: row.try_get("first_name")?,
            comments: row.try_get("comments")?,
        })
    }

    fn bind_insert<'q>(&'q self, query: SqliteQuery<'q>) -> SqliteQuery<'q> {
        query
            .bind(self.id)
            .bind(self.owner_db_id.as_str())
            .bind(self.last_name.as_str())
            .bind(self.first_name.as_str())
            .bind(self.comments.as_str())
    }

    fn bind_update<'q>(&'q self, query: SqliteQuery<'q>) -> SqliteQuery<'q> {
        self.bind_insert(query)
    }
}

impl StoredRecord for Organization {
    const TYPE: RecordType = RecordType::Organization;
    const COLUMNS: &'static str = "id, owner_db_id, organization_name, comments";
    const ORDER_BY: &'static str = "organization_name COLLATE NOCASE ASC";
    const INSERT_SQL: &'static str = "INSERT INTO Organization \
        (id, owner_db_id, organization_name, comments) \
        VALUES ($1, $2, $3, $4)";
    const UPDATE_SQL: &'static str = "UPDATE Organization SET \
        owner_db_id = $2, organization_name = $3, comments = $4 \
        WHERE id = $1";

    fn id(&self) -> Uuid {
        self.id
    }

    fn from_row(row: &SqliteRow) -> Result<Self> {
        Ok(Self {
            id: row.try_get("id")?,
            owner_db_id: row.try_get("owner_db_id")?,
            organization_name: row.try_get("organization_name")?,
            comments: row.try_get("comments")?,
        })
    }

    fn bind_insert<'q>(&'q self, query: SqliteQuery<'q>) -> SqliteQuery<'q> {
        query
            .bind(self.id)
            .bind(self.owner_db_id.as_str())
            .bind(self.organization_name.as_str())
            .bind(self.comments.as_str())
    }

    fn bind_update<'q>(&'q self, query: SqliteQuery<'q>) -> SqliteQuery<'q> {
        self.bind_insert(query)
    }
}

impl StoredRecord for Note {
    const TYPE: RecordType = RecordType::Note;
    const COLUMNS: &'static str = "id, owner_db_id, title, body, created_at_utc, created_on_day";
    // Note lists show newest first, unlike the name-sorted types.
    const ORDER_BY: &'static str = "created_at_utc DESC";
    const INSERT_SQL: &'static str = "INSERT INTO Note \
        (id, owner_db_id, title, body, created_at_utc, created_on_day) \
        VALUES ($1, $2, $3, $4, $5, $6)";
    const UPDATE_SQL: &'static str = "UPDATE Note SET \
        owner_db_id = $2, title = $3, body = $4, created_at_utc = $5, created_on_day = $6 \
        WHERE id = $1";

    fn id(&self) -> Uuid {
        self.id
    }

    fn from_row(row: &SqliteRow) -> Result<Self> {
        Ok(Self {
            id: row.try_get("id")?,
            owner_db_id: row.try_get("owner_db_id")?,
            title: row.try_get("title")?,
            body: row.try_get("body")?,
            created_at_utc: row.try_get("created_at_utc")?,
            created_on_day: row.try_get("created_on_day")?,
        })
    }

    fn bind_insert<'q>(&'q self, query: SqliteQuery<'q>) -> SqliteQuery<'q> {
        query
            .bind(self.id)
            .bind(self.owner_db_id.as_str())
            .bind(self.title.as_str())
            .bind(self.body.as_str())
            .bind(self.created_at_utc)
            .bind(self.created_on_day)
    }

    fn bind_update<'q>(&'q self, query: SqliteQuery<'q>) -> SqliteQuery<'q> {
        self.bind_insert(query)
    }
}

impl StoredRecord for Category {
    const TYPE: RecordType = RecordType::Category;
    const COLUMNS: &'static str = "id, owner_db_id, category_name, comments";
    const ORDER_BY: &'static str = "category_name COLLATE NOCASE ASC";
    const INSERT_SQL: &'static str = "INSERT INTO Category \
        (id, owner_db_id, category_name, comments) \
        VALUES ($1, $2, $3, $4)";
    const UPDATE_SQL: &'static str = "UPDATE Category SET \
        owner_db_id = $2, category_name = $3, comments = $4 \
        WHERE id = $1";

    fn id(&self) -> Uuid {
        self.id
    }

    fn from_row(row: &SqliteRow) -> Result<Self> {
        Ok(Self {
            id: row.try_get("id")?,
            owner_db_id: row.try_get("owner_db_id")?,
            category_name: row.try_get("category_name")?,
            comments: row.try_get("comments")?,
        })
    }

    fn bind_insert<'q>(&'q self, query: SqliteQuery<'q>) -> SqliteQuery<'q> {
        query
            .bind(self.id)
            .bind(self.owner_db_id.as_str())
            .bind(self.category_name.as_str())
            .bind(self.comments.as_str())
    }

    fn bind_update<'q>(&'q self, query: SqliteQuery<'q>) -> SqliteQuery<'q> {
        self.bind_insert(query)
    }
}

impl StoredRecord for Item {
    const TYPE: RecordType = RecordType::Item;
    const COLUMNS: &'static str = "id, owner_db_id, item_name, comments";
    const ORDER_BY: &'static str = "item_name COLLATE NOCASE ASC";
    const INSERT_SQL: &'static str = "INSERT INTO Item \
        (id, owner_db_id, item_name, comments) \
        VALUES ($1, $2, $3, $4)";
    const UPDATE_SQL: &'static str = "UPDATE Item SET \
        owner_db_id = $2, item_name = $3, comments = $4 \
        WHERE id = $1";

    fn id(&self) -> Uuid {
        self.id
    }

    fn from_row(row: &SqliteRow) -> Result<Self> {
        Ok(Self {
            id: row.try_get("id")?,
            owner_db_id: row.try_get("owner_db_id")?,
            item_name: row.try_get("item_name")?,
            comments: row.try_get("comments")?,
        })
    }

    fn bind_insert<'q>(&'q self, query: SqliteQuery<'q>) -> SqliteQuery<'q> {
        query
            .bind(self.id)
            .bind(self.owner_db_id.as_str())
            .bind(self.item_name.as_str())
            .bind(self.comments.as_str())
    }

    fn bind_update<'q>(&'q self, query: SqliteQuery<'q>) -> SqliteQuery<'q> {
        self.bind_insert(query)
    }
}

// =============================================================================
// GENERIC STORE
// =============================================================================

/// SQLite store for one record kind.
#[derive(Clone)]
pub struct SqliteStore<R: StoredRecord> {
    pool: SqlitePool,
    changes: ChangeBus,
    _record: PhantomData<fn() -> R>,
}

async fn fetch_one<R: StoredRecord>(pool: &SqlitePool, id: Uuid) -> Result<R> {
    let sql = format!(
        "SELECT {} FROM {} WHERE id = $1",
        R::COLUMNS,
        R::TYPE.table()
    );
    let row = sqlx::query(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await
        .map_err(Error::Database)?;

    match row {
        Some(row) => R::from_row(&row),
        None => Err(Error::RecordNotFound(id)),
    }
}

async fn fetch_all<R: StoredRecord>(pool: &SqlitePool) -> Result<Vec<R>> {
    let sql = format!(
        "SELECT {} FROM {} ORDER BY {}",
        R::COLUMNS,
        R::TYPE.table(),
        R::ORDER_BY
    );
    let rows = sqlx::query(&sql)
        .fetch_all(pool)
        .await
        .map_err(Error::Database)?;

    rows.iter().map(R::from_row).collect()
}

impl<R: StoredRecord> SqliteStore<R> {
    /// Create a store over the given pool and change bus.
    pub fn new(pool: SqlitePool, changes: ChangeBus) -> Self {
        Self {
            pool,
            changes,
            _record: PhantomData,
        }
    }

    /// Fetch one record, failing with [`Error::RecordNotFound`] if absent.
    pub async fn get(&self, id: Uuid) -> Result<R> {
        fetch_one(&self.pool, id).await
    }

    /// All records of this type in display order.
    pub async fn get_all(&self) -> Result<Vec<R>> {
        fetch_all(&self.pool).await
    }

    /// Live single-row view of one record.
    pub fn watch(&self, id: Uuid) -> LiveStream<R> {
        let pool = self.pool.clone();
        live(&self.changes, vec![Table::from(R::TYPE)], move || {
            let pool = pool.clone();
            async move { fetch_one::<R>(&pool, id).await }
        })
    }

    /// Live ordered list of all records of this type.
    pub fn watch_all(&self) -> LiveStream<Vec<R>> {
        let pool = self.pool.clone();
        live(&self.changes, vec![Table::from(R::TYPE)], move || {
            let pool = pool.clone();
            async move { fetch_all::<R>(&pool).await }
        })
    }

    /// Insert `record`, returning its (caller-populated) canonical id.
    pub async fn add(&self, record: &R) -> Result<Uuid> {
        let result = record
            .bind_insert(sqlx::query(R::INSERT_SQL))
            .execute(&self.pool)
            .await
            .map_err(Error::Database)?;

        debug!(
            subsystem = "database",
            component = "record_store",
            op = "add",
            db_table = R::TYPE.table(),
            record_id = %record.id(),
            rowid = result.last_insert_rowid(),
            "record inserted"
        );

        self.changes.emit(ChangeEvent {
            table: Table::from(R::TYPE),
            record_id: Some(record.id()),
        });
        Ok(record.id())
    }

    /// Full-row replace by id. Silent no-op if the id is absent.
    pub async fn update(&self, record: &R) -> Result<()> {
        let result = record
            .bind_update(sqlx::query(R::UPDATE_SQL))
            .execute(&self.pool)
            .await
            .map_err(Error::Database)?;

        if result.rows_affected() == 0 {
            debug!(
                subsystem = "database",
                component = "record_store",
                op = "update",
                db_table = R::TYPE.table(),
                record_id = %record.id(),
                "update matched no row"
            );
            return Ok(());
        }

        self.changes.emit(ChangeEvent {
            table: Table::from(R::TYPE),
            record_id: Some(record.id()),
        });
        Ok(())
    }

    /// Remove the row. Silent no-op if absent.
    pub async fn delete_by_id(&self, id: Uuid) -> Result<()> {
        let sql = format!("DELETE FROM {} WHERE id = $1", R::TYPE.table());
        let result = sqlx::query(&sql)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(Error::Database)?;

        if result.rows_affected() == 0 {
            debug!(
                subsystem = "database",
                component = "record_store",
                op = "delete_by_id",
                db_table = R::TYPE.table(),
                record_id = %id,
                "delete matched no row"
            );
            return Ok(());
        }

        self.changes.emit(ChangeEvent {
            table: Table::from(R::TYPE),
            record_id: Some(id),
        });
        Ok(())
    }
}

#[async_trait]
impl<R: StoredRecord> RecordStore for SqliteStore<R> {
    type Record = R;

    async fn get(&self, id: Uuid) -> Result<R> {
        SqliteStore::get(self, id).await
    }

    async fn get_all(&self) -> Result<Vec<R>> {
        SqliteStore::get_all(self).await
    }

    fn watch(&self, id: Uuid) -> LiveStream<R> {
        SqliteStore::watch(self, id)
    }

    fn watch_all(&self) -> LiveStream<Vec<R>> {
        SqliteStore::watch_all(self)
    }

    async fn add(&self, record: &R) -> Result<Uuid> {
        SqliteStore::add(self, record).await
    }

    async fn update(&self, record: &R) -> Result<()> {
        SqliteStore::update(self, record).await
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<()> {
        SqliteStore::delete_by_id(self, id).await
    }
}

#[async_trait]
impl<R: StoredRecord> RecordDeleter for SqliteStore<R> {
    async fn delete_by_id(&self, id: Uuid) -> Result<()> {
        SqliteStore::delete_by_id(self, id).await
    }
}
