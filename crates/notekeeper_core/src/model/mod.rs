//! Notebook/note domain model and the persisted document shape.
//!
//! # Responsibility
//! - Define the records serialized into the single stored JSON document.
//! - Issue timestamp-derived identifiers for new records.
//!
//! # Invariants
//! - Every note is owned by exactly one notebook's `notes` list.
//! - `Note::notebook_id` always names the containing notebook.
//! - Wire field names are camelCase (`notebookId`, `postedOn`).

pub mod document;
pub mod id;
