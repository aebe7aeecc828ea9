//! Core data layer for Notekeeper.
//! Notebooks and notes live in one JSON document inside a key-value store.

pub mod config;
pub mod db;
pub mod kv;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod store;
pub mod time;

pub use config::CoreConfig;
pub use kv::{KeyValueStore, KvError, KvResult, MemoryKeyValueStore, SqliteKeyValueStore};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::document::{
    Document, ExtraFields, Note, NoteDraft, NoteId, NotePatch, Notebook, NotebookId,
};
pub use model::id::{generate_id, IdGenerator, IssuedId};
pub use repo::document_repo::DocumentNotebookRepository;
pub use repo::{NotebookRepository, RepoError, RepoResult};
pub use service::notebook_service::{NoteCard, NotebookService, NotebookServiceError, UNTITLED};
pub use store::{DocumentStore, StoreError, StoreResult, DEFAULT_DOCUMENT_KEY};
pub use time::{greeting, relative_time_label, Clock, FixedClock, SystemClock};

/// Minimal health-check API for host integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
