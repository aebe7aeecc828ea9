//! Linear-scan lookups over a loaded document.
//!
//! Scan order is notebook insertion order, then each notebook's note order
//! (most recent first). The first match wins.

use crate::model::document::{Document, Note, Notebook};

pub fn find_notebook<'a>(document: &'a Document, notebook_id: &str) -> Option<&'a Notebook> {
    document
        .notebooks
        .iter()
        .find(|notebook| notebook.id == notebook_id)
}

pub fn find_notebook_mut<'a>(
    document: &'a mut Document,
    notebook_id: &str,
) -> Option<&'a mut Notebook> {
    document
        .notebooks
        .iter_mut()
        .find(|notebook| notebook.id == notebook_id)
}

pub fn find_notebook_index(document: &Document, notebook_id: &str) -> Option<usize> {
    document
        .notebooks
        .iter()
        .position(|notebook| notebook.id == notebook_id)
}

/// Finds a note by id across every notebook.
pub fn find_note<'a>(document: &'a Document, note_id: &str) -> Option<&'a Note> {
    document
        .notebooks
        .iter()
        .flat_map(|notebook| notebook.notes.iter())
        .find(|note| note.id == note_id)
}

pub fn find_note_mut<'a>(document: &'a mut Document, note_id: &str) -> Option<&'a mut Note> {
    document
        .notebooks
        .iter_mut()
        .flat_map(|notebook| notebook.notes.iter_mut())
        .find(|note| note.id == note_id)
}

/// Position of a note inside one notebook's list.
pub fn find_note_index(notebook: &Notebook, note_id: &str) -> Option<usize> {
    notebook.notes.iter().position(|note| note.id == note_id)
}
