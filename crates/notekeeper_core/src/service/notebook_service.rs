//! Notebook/note use-case service.
//!
//! # Responsibility
//! - Apply the notebook-name fallback and note submission rule.
//! - Project notes into display cards with relative time labels.
//! - Translate repository errors into use-case errors.
//!
//! # Invariants
//! - An empty notebook name is stored as `Untitled`; other names are kept as typed.
//! - Note titles and text are stored exactly as entered.
//! - A note whose title and text are both blank is never stored.
//! - Renaming to a blank name is rejected.

use crate::model::document::{Note, NoteDraft, NoteId, NotePatch, Notebook, NotebookId};
use crate::repo::{NotebookRepository, RepoError};
use crate::time::relative_time_label;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Name given to a notebook created with an empty name.
pub const UNTITLED: &str = "Untitled";

/// Service error for notebook/note use-cases.
#[derive(Debug)]
pub enum NotebookServiceError {
    /// Notebook name is blank after trimming.
    InvalidName(String),
    /// Note title and text are both blank.
    EmptyNote,
    NotebookNotFound(NotebookId),
    NoteNotFound(NoteId),
    /// Persistence-layer failure.
    Repo(RepoError),
}

impl Display for NotebookServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidName(value) => write!(f, "invalid notebook name: `{value}`"),
            Self::EmptyNote => write!(f, "note needs a title or text"),
            Self::NotebookNotFound(id) => write!(f, "notebook not found: {id}"),
            Self::NoteNotFound(id) => write!(f, "note not found: {id}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for NotebookServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for NotebookServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotebookNotFound(id) => Self::NotebookNotFound(id),
            RepoError::NoteNotFound(id) => Self::NoteNotFound(id),
            other => Self::Repo(other),
        }
    }
}

pub type ServiceResult<T> = Result<T, NotebookServiceError>;

/// Display projection of one note.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteCard {
    pub note_id: NoteId,
    pub notebook_id: NotebookId,
    pub title: String,
    pub text: String,
    /// e.g. `Just now`, `5 min ago`.
    pub posted_label: String,
}

impl NoteCard {
    fn from_note(note: Note, now_ms: i64) -> Self {
        Self {
            posted_label: relative_time_label(note.posted_on, now_ms),
            note_id: note.id,
            notebook_id: note.notebook_id,
            title: note.title,
            text: note.text,
        }
    }
}

/// Notebook service facade over repository implementations.
pub struct NotebookService<R: NotebookRepository> {
    repo: R,
}

impl<R: NotebookRepository> NotebookService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Creates a notebook; an empty name becomes `Untitled`.
    pub fn create_notebook(&mut self, name: &str) -> ServiceResult<Notebook> {
        let name = if name.is_empty() { UNTITLED } else { name };
        Ok(self.repo.create_notebook(name)?)
    }

    /// Renames a notebook, rejecting blank names.
    pub fn rename_notebook(&mut self, notebook_id: &str, name: &str) -> ServiceResult<Notebook> {
        if name.trim().is_empty() {
            return Err(NotebookServiceError::InvalidName(name.to_string()));
        }
        Ok(self.repo.update_notebook(notebook_id, name)?)
    }

    /// Adds a note to a notebook.
    ///
    /// # Errors
    /// - `EmptyNote` when both title and text are blank after trimming.
    pub fn create_note(
        &mut self,
        notebook_id: &str,
        title: &str,
        text: &str,
    ) -> ServiceResult<Note> {
        if title.trim().is_empty() && text.trim().is_empty() {
            return Err(NotebookServiceError::EmptyNote);
        }
        let draft = NoteDraft::new(title, text);
        Ok(self.repo.create_note(notebook_id, &draft)?)
    }

    pub fn update_note(&mut self, note_id: &str, patch: &NotePatch) -> ServiceResult<Note> {
        Ok(self.repo.update_note(note_id, patch)?)
    }

    pub fn delete_notebook(&mut self, notebook_id: &str) -> ServiceResult<()> {
        Ok(self.repo.delete_notebook(notebook_id)?)
    }

    pub fn delete_note(&mut self, notebook_id: &str, note_id: &str) -> ServiceResult<Vec<Note>> {
        Ok(self.repo.delete_note(notebook_id, note_id)?)
    }

    pub fn list_notebooks(&mut self) -> ServiceResult<Vec<Notebook>> {
        Ok(self.repo.list_notebooks()?)
    }

    pub fn list_notes(&mut self, notebook_id: &str) -> ServiceResult<Vec<Note>> {
        Ok(self.repo.list_notes(notebook_id)?)
    }

    pub fn find_note(&mut self, note_id: &str) -> ServiceResult<Option<Note>> {
        Ok(self.repo.find_note(note_id)?)
    }

    /// Notes of one notebook as display cards, most recent first.
    pub fn note_cards(&mut self, notebook_id: &str, now_ms: i64) -> ServiceResult<Vec<NoteCard>> {
        let notes = self.repo.list_notes(notebook_id)?;
        Ok(notes
            .into_iter()
            .map(|note| NoteCard::from_note(note, now_ms))
            .collect())
    }

    pub fn into_repo(self) -> R {
        self.repo
    }
}
