//! Single-document accessor over a key-value substrate.
//!
//! # Responsibility
//! - Load the whole notebook document from one well-known key.
//! - Flush the in-memory mirror back to the same key in its entirety.
//! - Seed an empty document on first run.
//!
//! # Invariants
//! - The stored value is always a complete serialized `Document`.
//! - `read` replaces the mirror wholesale; nothing is merged.
//! - A stored value that cannot be decoded is reset to an empty document
//!   before `StoreError::Corrupt` is returned.

use crate::kv::{KeyValueStore, KvError};
use crate::model::document::Document;
use log::{debug, error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Storage key used by the original browser application.
pub const DEFAULT_DOCUMENT_KEY: &str = "notekeeperDB";

pub type StoreResult<T> = Result<T, StoreError>;

/// Failure while loading or flushing the document.
#[derive(Debug)]
pub enum StoreError {
    /// Stored value missing or not a valid document. The store has been reset.
    Corrupt(String),
    /// Substrate refused the read or write.
    Unavailable(KvError),
    /// Mirror could not be encoded.
    Serialization(serde_json::Error),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Corrupt(reason) => write!(f, "stored document is corrupt: {reason}"),
            Self::Unavailable(err) => write!(f, "{err}"),
            Self::Serialization(err) => write!(f, "failed to encode document: {err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Corrupt(_) => None,
            Self::Unavailable(err) => Some(err),
            Self::Serialization(err) => Some(err),
        }
    }
}

impl From<KvError> for StoreError {
    fn from(value: KvError) -> Self {
        Self::Unavailable(value)
    }
}

/// Owns a substrate plus the in-memory mirror of the stored document.
#[derive(Debug)]
pub struct DocumentStore<S: KeyValueStore> {
    backend: S,
    key: String,
    mirror: Document,
}

impl<S: KeyValueStore> DocumentStore<S> {
    /// Creates an accessor using `DEFAULT_DOCUMENT_KEY`.
    pub fn new(backend: S) -> Self {
        Self::with_key(backend, DEFAULT_DOCUMENT_KEY)
    }

    pub fn with_key(backend: S, key: impl Into<String>) -> Self {
        Self {
            backend,
            key: key.into(),
            mirror: Document::empty(),
        }
    }

    /// Seeds `{ "notebooks": [] }` when nothing is stored yet.
    ///
    /// Returns `true` when the empty document was written, `false` when data
    /// already existed and was left untouched.
    pub fn initialize(&mut self) -> StoreResult<bool> {
        if self.backend.get(&self.key)?.is_some() {
            debug!("event=document_init module=store status=ok created=false");
            return Ok(false);
        }

        self.mirror = Document::empty();
        self.write()?;
        info!("event=document_init module=store status=ok created=true");
        Ok(true)
    }

    /// Reloads the mirror from the substrate and returns it for mutation.
    ///
    /// # Errors
    /// - `StoreError::Corrupt` when the value is missing or undecodable; the
    ///   stored value is replaced by an empty document first.
    /// - `StoreError::Unavailable` when the substrate fails.
    pub fn read(&mut self) -> StoreResult<&mut Document> {
        let raw = self.backend.get(&self.key)?;
        let decoded = match raw.as_deref() {
            Some(text) => serde_json::from_str::<Document>(text).map_err(|err| err.to_string()),
            None => Err(format!("no document stored under `{}`", self.key)),
        };

        match decoded {
            Ok(document) => {
                debug!(
                    "event=document_read module=store status=ok notebooks={} notes={}",
                    document.notebooks.len(),
                    document.note_count()
                );
                self.mirror = document;
                Ok(&mut self.mirror)
            }
            Err(reason) => {
                error!(
                    "event=document_read module=store status=error error_code=document_corrupt error={reason}"
                );
                self.reset()?;
                Err(StoreError::Corrupt(reason))
            }
        }
    }

    /// Serializes the mirror and overwrites the stored value.
    pub fn write(&mut self) -> StoreResult<()> {
        let encoded = serde_json::to_string(&self.mirror).map_err(StoreError::Serialization)?;
        self.backend.set(&self.key, &encoded)?;
        debug!(
            "event=document_write module=store status=ok bytes={}",
            encoded.len()
        );
        Ok(())
    }

    /// Swaps the mirror for `document` without touching the substrate.
    pub fn replace(&mut self, document: Document) {
        self.mirror = document;
    }

    /// Last document loaded or staged.
    pub fn mirror(&self) -> &Document {
        &self.mirror
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn backend(&self) -> &S {
        &self.backend
    }

    pub fn into_backend(self) -> S {
        self.backend
    }

    fn reset(&mut self) -> StoreResult<()> {
        self.mirror = Document::empty();
        self.write()?;
        info!("event=document_reset module=store status=ok");
        Ok(())
    }
}
