//! Centralized default constants for the rolo engine.
//!
//! **This module is the single source of truth** for all shared default
//! values. All crates should reference these constants instead of defining
//! their own magic numbers.

use std::time::Duration;

// =============================================================================
// OWNING DATABASE
// =============================================================================

/// Tag stamped onto every record's `owner_db_id` column.
///
/// Scaffolding for the planned multi-database sharing feature. Until that
/// ships, every record in a local file belongs to this one placeholder
/// database.
pub const OWNER_DB_ID: &str = "local";

// =============================================================================
// RECORD TYPES
// =============================================================================

/// Reserved wire tag for link rows themselves in future sharing payloads.
///
/// Declared for schema compatibility with the sharing feature; no query
/// produces it and [`crate::RecordType::from_id`] rejects it.
pub const LINKED_RECORD_TYPE_ID: i64 = 5001;

// =============================================================================
// SEARCH / LINK PICKER
// =============================================================================

/// Debounce applied to link-picker search queries.
///
/// Keystrokes within this window collapse into a single search so the store
/// is not flooded with one query per character.
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(1000);

// =============================================================================
// CHANGE BUS
// =============================================================================

/// Buffered capacity of the change-notification broadcast channel.
///
/// A lagged live query resynchronizes by re-running its underlying query,
/// so overflow costs a redundant re-query, never a missed update.
pub const CHANGE_BUS_CAPACITY: usize = 256;
