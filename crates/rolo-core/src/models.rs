//! Core data models for the rolo engine.
//!
//! These types are shared across all rolo crates and represent the domain
//! entities: the five primary record kinds, the linked-record edge, and the
//! derived rows produced by the search index and the link queries.
//!
//! Record ids are client-generated v4 UUIDs populated before insert; the
//! store never assigns them. Every record also carries an `owner_db_id` tag,
//! currently always [`crate::defaults::OWNER_DB_ID`], reserved for the
//! unbuilt multi-database sharing feature.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::defaults;

// =============================================================================
// RECORD TYPE
// =============================================================================

/// Closed enumeration of the five primary record kinds.
///
/// The integer tags are wire values: they are stored as plain integers in
/// `LinkedRecord` rows and in search projections wherever an untyped
/// reference must be disambiguated. They must never be renumbered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RecordType {
    Note = 1,
    Contact = 2,
    Organization = 3,
    Category = 4,
    Item = 5,
}

impl RecordType {
    /// All record types, in tag order.
    pub const ALL: [RecordType; 5] = [
        RecordType::Note,
        RecordType::Contact,
        RecordType::Organization,
        RecordType::Category,
        RecordType::Item,
    ];

    /// The stored integer tag for this type.
    pub fn id(self) -> i64 {
        self as i64
    }

    /// Decode a stored integer tag.
    ///
    /// Returns `None` for unknown tags, including the reserved
    /// [`defaults::LINKED_RECORD_TYPE_ID`] pseudo-tag.
    pub fn from_id(id: i64) -> Option<RecordType> {
        match id {
            1 => Some(RecordType::Note),
            2 => Some(RecordType::Contact),
            3 => Some(RecordType::Organization),
            4 => Some(RecordType::Category),
            5 => Some(RecordType::Item),
            _ => None,
        }
    }

    /// Dispatch table from record type to its owning SQL table.
    ///
    /// Every untyped query (link joins, search projections) goes through
    /// this single mapping rather than hand-specialized per-type SQL.
    pub fn table(self) -> &'static str {
        match self {
            RecordType::Note => "Note",
            RecordType::Contact => "Contact",
            RecordType::Organization => "Organization",
            RecordType::Category => "Category",
            RecordType::Item => "Item",
        }
    }
}

impl std::fmt::Display for RecordType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.table())
    }
}

// =============================================================================
// PRIMARY RECORDS
// =============================================================================

/// A person. Displayed and sorted as "last, first".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    pub id: Uuid,
    pub owner_db_id: String,
    pub last_name: String,
    pub first_name: String,
    pub comments: String,
}

impl Contact {
    /// Create a contact with a fresh id and the local owner tag.
    pub fn new(last_name: impl Into<String>, first_name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            owner_db_id: defaults::OWNER_DB_ID.to_string(),
            last_name: last_name.into(),
            first_name: first_name.into(),
            comments: String::new(),
        }
    }

    /// Display title in "last, first" form.
    pub fn title(&self) -> String {
        format!("{}, {}", self.last_name, self.first_name)
    }
}

/// An organization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Organization {
    pub id: Uuid,
    pub owner_db_id: String,
    pub organization_name: String,
    pub comments: String,
}

impl Organization {
    /// Create an organization with a fresh id and the local owner tag.
    pub fn new(organization_name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            owner_db_id: defaults::OWNER_DB_ID.to_string(),
            organization_name: organization_name.into(),
            comments: String::new(),
        }
    }
}

/// A free-form note with a creation instant and its day-boundary truncation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    pub id: Uuid,
    pub owner_db_id: String,
    pub title: String,
    pub body: String,
    /// Full creation instant; note lists sort by this, newest first.
    pub created_at_utc: DateTime<Utc>,
    /// Creation instant truncated to its day boundary, for day grouping.
    pub created_on_day: NaiveDate,
}

impl Note {
    /// Create a note stamped with the current instant and its day.
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            owner_db_id: defaults::OWNER_DB_ID.to_string(),
            title: title.into(),
            body: body.into(),
            created_at_utc: now,
            created_on_day: now.date_naive(),
        }
    }
}

/// A user-defined grouping label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: Uuid,
    pub owner_db_id: String,
    pub category_name: String,
    pub comments: String,
}

impl Category {
    /// Create a category with a fresh id and the local owner tag.
    pub fn new(category_name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            owner_db_id: defaults::OWNER_DB_ID.to_string(),
            category_name: category_name.into(),
            comments: String::new(),
        }
    }
}

/// A tracked thing (possession, document, anything nameable).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: Uuid,
    pub owner_db_id: String,
    pub item_name: String,
    pub comments: String,
}

impl Item {
    /// Create an item with a fresh id and the local owner tag.
    pub fn new(item_name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            owner_db_id: defaults::OWNER_DB_ID.to_string(),
            item_name: item_name.into(),
            comments: String::new(),
        }
    }
}

// =============================================================================
// LINKED RECORD
// =============================================================================

/// An undirected association between two records, stored as one directional
/// row.
///
/// The edge is symmetric in meaning (A↔B) even though storage orders the
/// endpoints; every read query must union both directions. Endpoints are
/// weak references (id + type tag) with no foreign-key integrity; cascade on
/// record deletion is the caller's responsibility.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkedRecord {
    pub id: Uuid,
    pub owner_db_id: String,
    pub record1_id: Uuid,
    pub record1_type: RecordType,
    pub record2_id: Uuid,
    pub record2_type: RecordType,
}

impl LinkedRecord {
    /// Create an edge row with a fresh id and the local owner tag.
    pub fn new(r1: Uuid, t1: RecordType, r2: Uuid, t2: RecordType) -> Self {
        Self {
            id: Uuid::new_v4(),
            owner_db_id: defaults::OWNER_DB_ID.to_string(),
            record1_id: r1,
            record1_type: t1,
            record2_id: r2,
            record2_type: t2,
        }
    }

    /// The endpoint opposite to `record_id`, if this edge touches it.
    pub fn other_endpoint(&self, record_id: Uuid) -> Option<(Uuid, RecordType)> {
        if self.record1_id == record_id {
            Some((self.record2_id, self.record2_type))
        } else if self.record2_id == record_id {
            Some((self.record1_id, self.record1_type))
        } else {
            None
        }
    }
}

// =============================================================================
// DERIVED ROWS
// =============================================================================

/// One keyword-search hit: a uniform (id, type, title) projection of any
/// record, plus the two transient link-picker flags.
///
/// `is_selected` and `is_linked` are session-scoped UI state, never
/// persisted; they default to false outside a picker session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub record_id: Uuid,
    pub record_type: RecordType,
    pub title: String,
    #[serde(default)]
    pub is_selected: bool,
    #[serde(default)]
    pub is_linked: bool,
}

/// Edge count toward one record type, for a given source record.
///
/// Drives detail-page tab generation: a tab appears only for types with at
/// least one linked record, most-populous first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkedRecordTypeCount {
    pub record_type: RecordType,
    pub count: i64,
}
