//! # rolo-db
//!
//! SQLite persistence layer for the rolo personal CRM engine.
//!
//! This crate provides:
//! - Connection pool management over a single local database file
//! - The generic per-type record store ([`SqliteStore`])
//! - The linked-record store with its bidirectional-union queries
//! - The cross-type keyword search index
//! - Live queries that re-emit whenever underlying tables change
//!
//! ## Example
//!
//! ```rust,ignore
//! use rolo_db::Database;
//! use rolo_core::Contact;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let db = Database::connect("rolo.db").await?;
//!     db.migrate().await?;
//!
//!     let contact = Contact::new("Smith", "John");
//!     let id = db.contacts.add(&contact).await?;
//!
//!     println!("Created contact: {}", id);
//!     Ok(())
//! }
//! ```

pub mod links;
mod live;
pub mod pool;
pub mod records;
pub mod schema;
pub mod search;

use std::path::Path;

use sqlx::sqlite::SqlitePool;

// Re-export core types
pub use rolo_core::*;

pub use links::SqliteLinkStore;
pub use pool::{create_pool, create_pool_with_config, PoolConfig};
pub use records::{SqliteStore, StoredRecord};
pub use search::SqliteSearchIndex;

/// Store for contacts.
pub type ContactStore = SqliteStore<Contact>;
/// Store for organizations.
pub type OrganizationStore = SqliteStore<Organization>;
/// Store for notes.
pub type NoteStore = SqliteStore<Note>;
/// Store for categories.
pub type CategoryStore = SqliteStore<Category>;
/// Store for items.
pub type ItemStore = SqliteStore<Item>;

/// Aggregate handle over every store backed by one database file.
///
/// All stores share one pool and one change bus, so a mutation through any
/// store wakes every live query that depends on the touched table.
#[derive(Clone)]
pub struct Database {
    pub contacts: ContactStore,
    pub organizations: OrganizationStore,
    pub notes: NoteStore,
    pub categories: CategoryStore,
    pub items: ItemStore,
    pub links: SqliteLinkStore,
    pub search: SqliteSearchIndex,
    pool: SqlitePool,
    changes: ChangeBus,
}

impl Database {
    /// Create a new Database over an existing connection pool.
    pub fn new(pool: SqlitePool) -> Self {
        let changes = ChangeBus::new();
        Self {
            contacts: SqliteStore::new(pool.clone(), changes.clone()),
            organizations: SqliteStore::new(pool.clone(), changes.clone()),
            notes: SqliteStore::new(pool.clone(), changes.clone()),
            categories: SqliteStore::new(pool.clone(), changes.clone()),
            items: SqliteStore::new(pool.clone(), changes.clone()),
            links: SqliteLinkStore::new(pool.clone(), changes.clone()),
            search: SqliteSearchIndex::new(pool.clone(), changes.clone()),
            pool,
            changes,
        }
    }

    /// Open (creating if missing) the database file at `path`.
    ///
    /// Does not touch the schema; call [`Database::migrate`] before first
    /// use of a fresh file.
    pub async fn connect(path: impl AsRef<Path>) -> Result<Self> {
        let pool = create_pool(path).await?;
        Ok(Self::new(pool))
    }

    /// Open the database file at `path` with custom pool configuration.
    pub async fn connect_with_config(path: impl AsRef<Path>, config: PoolConfig) -> Result<Self> {
        let pool = create_pool_with_config(path, config).await?;
        Ok(Self::new(pool))
    }

    /// Open a fresh in-memory database with the schema applied.
    ///
    /// Intended for tests; the data lives only as long as the pool.
    pub async fn in_memory() -> Result<Self> {
        let pool = pool::create_memory_pool().await?;
        let db = Self::new(pool);
        db.migrate().await?;
        Ok(db)
    }

    /// Apply the schema bootstrap. Idempotent; safe on every open.
    pub async fn migrate(&self) -> Result<()> {
        schema::migrate(&self.pool).await
    }

    /// Get the underlying connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Get the change-notification bus shared by every store.
    pub fn changes(&self) -> &ChangeBus {
        &self.changes
    }
}
