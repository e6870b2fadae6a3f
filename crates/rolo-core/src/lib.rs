//! # rolo-core
//!
//! Core types, traits, and abstractions for the rolo personal CRM engine.
//!
//! This crate provides the foundational data structures and trait definitions
//! that the persistence and workflow crates depend on: the five record types,
//! the closed [`RecordType`] enumeration, the linked-record edge model, the
//! repository traits, and the change-notification bus that powers live
//! queries.

pub mod defaults;
pub mod error;
pub mod events;
pub mod logging;
pub mod models;
pub mod traits;

// Re-export commonly used types at crate root
pub use error::{Error, Result};
pub use events::{ChangeBus, ChangeEvent, Table};
pub use models::{
    Category, Contact, Item, LinkedRecord, LinkedRecordTypeCount, Note, Organization, RecordType,
    SearchResult,
};
pub use traits::{LinkStore, LiveStream, RecordDeleter, RecordStore, SearchIndex};
