//! Structured logging field name constants for the rolo engine.
//!
//! All crates use these constants for consistent structured logging fields,
//! so log output can be filtered by standardized field names across every
//! subsystem.
//!
//! ## Log Level Contract
//!
//! | Level | Usage |
//! |-------|-------|
//! | ERROR | Degraded store, requires attention |
//! | WARN  | Recoverable issue, fallback applied |
//! | INFO  | Lifecycle events (open, migrate), operation completions |
//! | DEBUG | Decision points, intermediate values |
//! | TRACE | Per-row iteration, high-volume data |

// ─── Identity fields ───────────────────────────────────────────────────────

/// Subsystem originating the log event.
/// Values: "database", "search", "workflow"
pub const SUBSYSTEM: &str = "subsystem";

/// Component within a subsystem.
/// Examples: "pool", "record_store", "link_store", "picker"
pub const COMPONENT: &str = "component";

/// Logical operation name.
/// Examples: "add", "update", "delete_links_touching", "search"
pub const OPERATION: &str = "op";

// ─── Entity fields ─────────────────────────────────────────────────────────

/// Record UUID being operated on.
pub const RECORD_ID: &str = "record_id";

/// Record type tag (integer wire value).
pub const RECORD_TYPE: &str = "record_type";

/// Database table affected.
pub const DB_TABLE: &str = "db_table";

/// Search query text.
pub const QUERY: &str = "query";

// ─── Measurement fields ────────────────────────────────────────────────────

/// Wall-clock duration in milliseconds.
pub const DURATION_MS: &str = "duration_ms";

/// Number of rows returned by a query.
pub const RESULT_COUNT: &str = "result_count";

/// Number of rows removed by a delete.
pub const REMOVED_COUNT: &str = "removed_count";

// ─── Database fields ───────────────────────────────────────────────────────

/// Number of active connections in the pool.
pub const POOL_SIZE: &str = "pool_size";

/// Number of idle connections in the pool.
pub const POOL_IDLE: &str = "pool_idle";
