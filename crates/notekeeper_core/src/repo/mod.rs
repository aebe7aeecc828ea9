//! Repository layer over the stored notebook document.
//!
//! # Responsibility
//! - Define the notebook/note CRUD contract used by services and callers.
//! - Run every operation as read-modify-write against `DocumentStore`.
//!
//! # Invariants
//! - Each operation reloads the document before acting.
//! - Mutations are flushed before the operation returns.
//! - A lookup miss fails with a typed not-found error and writes nothing.

use crate::kv::KvError;
use crate::model::document::{Note, NoteDraft, NoteId, NotePatch, Notebook, NotebookId};
use crate::store::StoreError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod document_repo;
pub mod lookup;

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for notebook/note operations.
#[derive(Debug)]
pub enum RepoError {
    NotebookNotFound(NotebookId),
    NoteNotFound(NoteId),
    /// Stored document was unreadable and has been reset to empty.
    StorageCorrupt(String),
    StorageUnavailable(KvError),
    Serialization(serde_json::Error),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotebookNotFound(id) => write!(f, "notebook not found: {id}"),
            Self::NoteNotFound(id) => write!(f, "note not found: {id}"),
            Self::StorageCorrupt(reason) => write!(f, "stored document is corrupt: {reason}"),
            Self::StorageUnavailable(err) => write!(f, "{err}"),
            Self::Serialization(err) => write!(f, "failed to encode document: {err}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::StorageUnavailable(err) => Some(err),
            Self::Serialization(err) => Some(err),
            Self::NotebookNotFound(_) | Self::NoteNotFound(_) | Self::StorageCorrupt(_) => None,
        }
    }
}

impl From<StoreError> for RepoError {
    fn from(value: StoreError) -> Self {
        match value {
            StoreError::Corrupt(reason) => Self::StorageCorrupt(reason),
            StoreError::Unavailable(err) => Self::StorageUnavailable(err),
            StoreError::Serialization(err) => Self::Serialization(err),
        }
    }
}

impl From<KvError> for RepoError {
    fn from(value: KvError) -> Self {
        Self::StorageUnavailable(value)
    }
}

/// CRUD contract over notebooks and their notes.
///
/// Read operations take `&mut self` because they refresh the mirrored
/// document from storage.
pub trait NotebookRepository {
    /// Appends a new empty notebook and returns it.
    fn create_notebook(&mut self, name: &str) -> RepoResult<Notebook>;
    /// Inserts a note at the head of the notebook's list and returns it.
    fn create_note(&mut self, notebook_id: &str, draft: &NoteDraft) -> RepoResult<Note>;
    /// Returns all notebooks with nested notes, in insertion order.
    fn list_notebooks(&mut self) -> RepoResult<Vec<Notebook>>;
    /// Returns the notes of one notebook, most recent first.
    fn list_notes(&mut self, notebook_id: &str) -> RepoResult<Vec<Note>>;
    /// Looks up one notebook by id.
    fn find_notebook(&mut self, notebook_id: &str) -> RepoResult<Option<Notebook>>;
    /// Looks up one note by id across all notebooks.
    fn find_note(&mut self, note_id: &str) -> RepoResult<Option<Note>>;
    /// Renames a notebook and returns it.
    fn update_notebook(&mut self, notebook_id: &str, name: &str) -> RepoResult<Notebook>;
    /// Shallow-merges `patch` onto a note and returns the merged note.
    fn update_note(&mut self, note_id: &str, patch: &NotePatch) -> RepoResult<Note>;
    /// Removes a notebook together with all its notes.
    fn delete_notebook(&mut self, notebook_id: &str) -> RepoResult<()>;
    /// Removes one note and returns the notebook's remaining notes.
    fn delete_note(&mut self, notebook_id: &str, note_id: &str) -> RepoResult<Vec<Note>>;
}
