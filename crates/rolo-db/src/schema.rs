//! Schema bootstrap for the single-file store.
//!
//! The schema is a fixed local bootstrap, not a versioned server migration
//! chain, so every statement is an idempotent `CREATE ... IF NOT EXISTS` and
//! [`migrate`] can run unconditionally on every open.
//!
//! Record ids are client-generated UUIDs; `LinkedRecord` endpoints reference
//! them by value only, with no foreign keys. Cascade on record deletion is
//! performed by the delete workflow.

use sqlx::sqlite::SqlitePool;
use tracing::info;

use rolo_core::{Error, Result};

/// Idempotent DDL, applied in order.
const SCHEMA_DDL: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS Contact (
        id           TEXT PRIMARY KEY,
        owner_db_id  TEXT NOT NULL,
        last_name    TEXT NOT NULL,
        first_name   TEXT NOT NULL,
        comments     TEXT NOT NULL DEFAULT ''
    )",
    "CREATE TABLE IF NOT EXISTS Organization (
        id                 TEXT PRIMARY KEY,
        owner_db_id        TEXT NOT NULL,
        organization_name  TEXT NOT NULL,
        comments           TEXT NOT NULL DEFAULT ''
    )",
    "CREATE TABLE IF NOT EXISTS Note (
        id              TEXT PRIMARY KEY,
        owner_db_id     TEXT NOT NULL,
        title           TEXT NOT NULL,
        body            TEXT NOT NULL DEFAULT '',
        created_at_utc  TEXT NOT NULL,
        created_on_day  TEXT NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS Category (
        id             TEXT PRIMARY KEY,
        owner_db_id    TEXT NOT NULL,
        category_name  TEXT NOT NULL,
        comments       TEXT NOT NULL DEFAULT ''
    )",
    "CREATE TABLE IF NOT EXISTS Item (
        id           TEXT PRIMARY KEY,
        owner_db_id  TEXT NOT NULL,
        item_name    TEXT NOT NULL,
        comments     TEXT NOT NULL DEFAULT ''
    )",
    "CREATE TABLE IF NOT EXISTS LinkedRecord (
        id               TEXT PRIMARY KEY,
        owner_db_id      TEXT NOT NULL,
        record1_id       TEXT NOT NULL,
        record1_type_id  INTEGER NOT NULL,
        record2_id       TEXT NOT NULL,
        record2_type_id  INTEGER NOT NULL
    )",
    "CREATE INDEX IF NOT EXISTS idx_linked_record_record1 ON LinkedRecord (record1_id)",
    "CREATE INDEX IF NOT EXISTS idx_linked_record_record2 ON LinkedRecord (record2_id)",
    // Reserved for the multi-device sharing feature. Created so a future
    // version can populate them without a schema migration; nothing reads or
    // writes them today.
    "CREATE TABLE IF NOT EXISTS \"Database\" (
        id              TEXT PRIMARY KEY,
        name            TEXT NOT NULL DEFAULT '',
        created_at_utc  TEXT
    )",
    "CREATE TABLE IF NOT EXISTS Incoming (
        id       TEXT PRIMARY KEY,
        payload  TEXT
    )",
    "CREATE TABLE IF NOT EXISTS SharedRecord (
        id           TEXT PRIMARY KEY,
        record_id    TEXT,
        database_id  TEXT
    )",
];

/// Apply the schema to `pool`. Safe to call on every open.
pub async fn migrate(pool: &SqlitePool) -> Result<()> {
    for statement in SCHEMA_DDL {
        sqlx::query(statement)
            .execute(pool)
            .await
            .map_err(Error::Database)?;
    }

    info!(
        subsystem = "database",
        component = "schema",
        op = "migrate",
        statement_count = SCHEMA_DDL.len(),
        "Schema bootstrap complete"
    );
    Ok(())
}
