//! Notebook, note and document records.
//!
//! # Responsibility
//! - Define the canonical shape of the stored JSON document.
//! - Provide construction and merge helpers used by the repository.
//!
//! # Invariants
//! - `Notebook::id` and `Note::id` never change after creation.
//! - Notes are kept most-recent-first inside their notebook.
//! - `NotePatch` only touches user-editable fields (`title`, `text`).
//! - Stored keys this model does not know are kept in `extra` and written
//!   back unchanged.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Unrecognized keys carried through a read-modify-write cycle.
pub type ExtraFields = Map<String, Value>;

/// Identifier of a notebook, a decimal epoch-millisecond string.
pub type NotebookId = String;

/// Identifier of a note, a decimal epoch-millisecond string.
pub type NoteId = String;

/// Root of the persisted state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Notebooks in insertion order.
    pub notebooks: Vec<Notebook>,
    #[serde(flatten)]
    pub extra: ExtraFields,
}

impl Document {
    /// Creates the empty document written on first run.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Total number of notes across all notebooks.
    pub fn note_count(&self) -> usize {
        self.notebooks.iter().map(|notebook| notebook.notes.len()).sum()
    }

    /// Returns whether any notebook or note already uses `id`.
    pub fn contains_id(&self, id: &str) -> bool {
        self.notebooks.iter().any(|notebook| {
            notebook.id == id || notebook.notes.iter().any(|note| note.id == id)
        })
    }
}

/// Named container for notes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notebook {
    pub id: NotebookId,
    pub name: String,
    /// Most recent note first.
    pub notes: Vec<Note>,
    #[serde(flatten)]
    pub extra: ExtraFields,
}

impl Notebook {
    /// Creates an empty notebook.
    pub fn new(id: impl Into<NotebookId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            notes: Vec::new(),
            extra: ExtraFields::new(),
        }
    }
}

/// Titled text entry owned by one notebook.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: NoteId,
    /// Back-reference to the containing notebook.
    pub notebook_id: NotebookId,
    pub title: String,
    pub text: String,
    /// Creation time in Unix epoch milliseconds.
    pub posted_on: i64,
    #[serde(flatten)]
    pub extra: ExtraFields,
}

impl Note {
    /// Builds a note for `notebook_id` from user input.
    pub fn from_draft(
        id: impl Into<NoteId>,
        notebook_id: impl Into<NotebookId>,
        draft: &NoteDraft,
        posted_on: i64,
    ) -> Self {
        Self {
            id: id.into(),
            notebook_id: notebook_id.into(),
            title: draft.title.clone(),
            text: draft.text.clone(),
            posted_on,
            extra: ExtraFields::new(),
        }
    }

    /// Shallow-merges the set fields of `patch` onto this note.
    pub fn apply(&mut self, patch: &NotePatch) {
        if let Some(title) = patch.title.as_ref() {
            self.title = title.clone();
        }
        if let Some(text) = patch.text.as_ref() {
            self.text = text.clone();
        }
    }
}

/// User input for a new note.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteDraft {
    pub title: String,
    pub text: String,
}

impl NoteDraft {
    pub fn new(title: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            text: text.into(),
        }
    }
}

/// Partial note update. `None` fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotePatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl NotePatch {
    pub fn title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            text: None,
        }
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self {
            title: None,
            text: Some(text.into()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.text.is_none()
    }
}
