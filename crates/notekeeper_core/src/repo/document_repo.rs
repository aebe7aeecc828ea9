//! Notebook repository backed by a single stored JSON document.
//!
//! # Responsibility
//! - Implement `NotebookRepository` on top of `DocumentStore`.
//! - Assign timestamp ids and `postedOn` values to new records.
//!
//! # Invariants
//! - Every call starts with `DocumentStore::read`.
//! - Only successful mutations call `DocumentStore::write`.
//! - New notes are inserted at index 0 of their notebook.
//! - A note's `postedOn` equals the tick its id was derived from.

use crate::kv::KeyValueStore;
use crate::model::document::{Note, NoteDraft, NotePatch, Notebook};
use crate::model::id::IdGenerator;
use crate::repo::lookup::{
    find_note, find_note_index, find_note_mut, find_notebook, find_notebook_index,
    find_notebook_mut,
};
use crate::repo::{NotebookRepository, RepoError, RepoResult};
use crate::store::DocumentStore;
use crate::time::{Clock, SystemClock};
use log::{info, warn};

/// `NotebookRepository` over one JSON document in a key-value substrate.
pub struct DocumentNotebookRepository<S: KeyValueStore, C: Clock = SystemClock> {
    store: DocumentStore<S>,
    ids: IdGenerator<C>,
}

impl<S: KeyValueStore> DocumentNotebookRepository<S, SystemClock> {
    /// Opens the repository on `backend` with the default key and wall clock.
    ///
    /// Seeds an empty document on first run.
    pub fn try_new(backend: S) -> RepoResult<Self> {
        Self::from_store(DocumentStore::new(backend), SystemClock)
    }
}

impl<S: KeyValueStore, C: Clock> DocumentNotebookRepository<S, C> {
    /// Opens the repository on `backend` using `clock` for ids and timestamps.
    pub fn with_clock(backend: S, clock: C) -> RepoResult<Self> {
        Self::from_store(DocumentStore::new(backend), clock)
    }

    /// Opens the repository on a preconfigured document store.
    pub fn from_store(mut store: DocumentStore<S>, clock: C) -> RepoResult<Self> {
        store.initialize()?;
        Ok(Self {
            store,
            ids: IdGenerator::new(clock),
        })
    }

    pub fn store(&self) -> &DocumentStore<S> {
        &self.store
    }

    pub fn into_store(self) -> DocumentStore<S> {
        self.store
    }
}

impl<S: KeyValueStore, C: Clock> NotebookRepository for DocumentNotebookRepository<S, C> {
    fn create_notebook(&mut self, name: &str) -> RepoResult<Notebook> {
        let document = self.store.read()?;
        let issued = self.ids.next_unused(document);
        let notebook = Notebook::new(issued.id, name);
        document.notebooks.push(notebook.clone());
        self.store.write()?;

        info!(
            "event=notebook_create module=repo status=ok notebook_id={}",
            notebook.id
        );
        Ok(notebook)
    }

    fn create_note(&mut self, notebook_id: &str, draft: &NoteDraft) -> RepoResult<Note> {
        let document = self.store.read()?;
        if find_notebook(document, notebook_id).is_none() {
            return Err(not_found_notebook("note_create", notebook_id));
        }

        let issued = self.ids.next_unused(document);
        let note = Note::from_draft(issued.id, notebook_id, draft, issued.issued_at);
        let notebook = find_notebook_mut(document, notebook_id)
            .ok_or_else(|| RepoError::NotebookNotFound(notebook_id.to_string()))?;
        notebook.notes.insert(0, note.clone());
        self.store.write()?;

        info!(
            "event=note_create module=repo status=ok notebook_id={} note_id={}",
            notebook_id, note.id
        );
        Ok(note)
    }

    fn list_notebooks(&mut self) -> RepoResult<Vec<Notebook>> {
        Ok(self.store.read()?.notebooks.clone())
    }

    fn list_notes(&mut self, notebook_id: &str) -> RepoResult<Vec<Note>> {
        let document = self.store.read()?;
        find_notebook(document, notebook_id)
            .map(|notebook| notebook.notes.clone())
            .ok_or_else(|| RepoError::NotebookNotFound(notebook_id.to_string()))
    }

    fn find_notebook(&mut self, notebook_id: &str) -> RepoResult<Option<Notebook>> {
        let document = self.store.read()?;
        Ok(find_notebook(document, notebook_id).cloned())
    }

    fn find_note(&mut self, note_id: &str) -> RepoResult<Option<Note>> {
        let document = self.store.read()?;
        Ok(find_note(document, note_id).cloned())
    }

    fn update_notebook(&mut self, notebook_id: &str, name: &str) -> RepoResult<Notebook> {
        let document = self.store.read()?;
        let Some(notebook) = find_notebook_mut(document, notebook_id) else {
            return Err(not_found_notebook("notebook_update", notebook_id));
        };
        notebook.name = name.to_string();
        let updated = notebook.clone();
        self.store.write()?;

        info!(
            "event=notebook_update module=repo status=ok notebook_id={}",
            notebook_id
        );
        Ok(updated)
    }

    fn update_note(&mut self, note_id: &str, patch: &NotePatch) -> RepoResult<Note> {
        let document = self.store.read()?;
        let Some(note) = find_note_mut(document, note_id) else {
            warn!(
                "event=note_update module=repo status=error error_code=note_not_found note_id={}",
                note_id
            );
            return Err(RepoError::NoteNotFound(note_id.to_string()));
        };
        note.apply(patch);
        let merged = note.clone();
        self.store.write()?;

        info!(
            "event=note_update module=repo status=ok note_id={} title_changed={} text_changed={}",
            note_id,
            patch.title.is_some(),
            patch.text.is_some()
        );
        Ok(merged)
    }

    fn delete_notebook(&mut self, notebook_id: &str) -> RepoResult<()> {
        let document = self.store.read()?;
        let Some(index) = find_notebook_index(document, notebook_id) else {
            return Err(not_found_notebook("notebook_delete", notebook_id));
        };
        let removed = document.notebooks.remove(index);
        self.store.write()?;

        info!(
            "event=notebook_delete module=repo status=ok notebook_id={} notes_discarded={}",
            notebook_id,
            removed.notes.len()
        );
        Ok(())
    }

    fn delete_note(&mut self, notebook_id: &str, note_id: &str) -> RepoResult<Vec<Note>> {
        let document = self.store.read()?;
        let Some(notebook) = find_notebook_mut(document, notebook_id) else {
            return Err(not_found_notebook("note_delete", notebook_id));
        };
        let Some(index) = find_note_index(notebook, note_id) else {
            warn!(
                "event=note_delete module=repo status=error error_code=note_not_found notebook_id={} note_id={}",
                notebook_id, note_id
            );
            return Err(RepoError::NoteNotFound(note_id.to_string()));
        };
        notebook.notes.remove(index);
        let remaining = notebook.notes.clone();
        self.store.write()?;

        info!(
            "event=note_delete module=repo status=ok notebook_id={} note_id={} remaining={}",
            notebook_id,
            note_id,
            remaining.len()
        );
        Ok(remaining)
    }
}

fn not_found_notebook(event: &str, notebook_id: &str) -> RepoError {
    warn!(
        "event={event} module=repo status=error error_code=notebook_not_found notebook_id={notebook_id}"
    );
    RepoError::NotebookNotFound(notebook_id.to_string())
}
