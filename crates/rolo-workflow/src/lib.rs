//! # rolo-workflow
//!
//! Cross-cutting workflows composed over the repository traits: the
//! delete-record cascade and the link-picker session that drives the
//! "link existing record" screen.
//!
//! This crate contains no SQL; it orchestrates [`rolo_core`] traits only,
//! so it runs unchanged against any store implementation.

pub mod delete;
pub mod picker;

pub use delete::delete_record;
pub use picker::LinkPicker;
