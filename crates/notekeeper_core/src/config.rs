//! Core runtime configuration.
//!
//! # Responsibility
//! - Collect the few knobs hosts may override: storage key, SQLite file
//!   name and log level.
//! - Open stores, repositories and logging from those knobs.

use crate::db::{open_db, DbResult};
use crate::kv::KeyValueStore;
use crate::logging::{default_log_level, init_logging};
use crate::repo::document_repo::DocumentNotebookRepository;
use crate::repo::RepoResult;
use crate::store::{DocumentStore, DEFAULT_DOCUMENT_KEY};
use crate::time::Clock;
use std::path::{Path, PathBuf};

const DEFAULT_DB_FILE_NAME: &str = "notekeeper.sqlite3";

/// Host-provided settings for the notekeeper core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreConfig {
    /// Key the document is stored under.
    pub document_key: String,
    /// SQLite file name, relative to the host's data directory.
    pub db_file_name: String,
    /// One of `trace|debug|info|warn|error`.
    pub log_level: String,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            document_key: DEFAULT_DOCUMENT_KEY.to_string(),
            db_file_name: DEFAULT_DB_FILE_NAME.to_string(),
            log_level: default_log_level().to_string(),
        }
    }
}

impl CoreConfig {
    /// Full SQLite path inside `data_dir`.
    pub fn db_path(&self, data_dir: impl AsRef<Path>) -> PathBuf {
        data_dir.as_ref().join(&self.db_file_name)
    }

    /// Opens the SQLite store inside `data_dir`, creating it if needed.
    pub fn open_db(&self, data_dir: impl AsRef<Path>) -> DbResult<rusqlite::Connection> {
        open_db(self.db_path(data_dir))
    }

    /// Document accessor over `backend` using the configured key.
    pub fn document_store<S: KeyValueStore>(&self, backend: S) -> DocumentStore<S> {
        DocumentStore::with_key(backend, self.document_key.as_str())
    }

    /// Opens a repository over `backend` using the configured key.
    pub fn open_repository<S: KeyValueStore, C: Clock>(
        &self,
        backend: S,
        clock: C,
    ) -> RepoResult<DocumentNotebookRepository<S, C>> {
        DocumentNotebookRepository::from_store(self.document_store(backend), clock)
    }

    /// Starts file logging at the configured level under `log_dir`.
    ///
    /// `log_dir` must be absolute; see `logging::init_logging`.
    pub fn init_logging(&self, log_dir: &str) -> Result<(), String> {
        init_logging(&self.log_level, log_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::CoreConfig;
    use crate::kv::{KeyValueStore, MemoryKeyValueStore};
    use crate::repo::NotebookRepository;
    use crate::store::DEFAULT_DOCUMENT_KEY;
    use crate::time::FixedClock;
    use std::path::Path;

    #[test]
    fn defaults_match_browser_key() {
        let config = CoreConfig::default();
        assert_eq!(config.document_key, "notekeeperDB");
        assert_eq!(
            config.db_path("/data"),
            Path::new("/data").join("notekeeper.sqlite3")
        );
    }

    #[test]
    fn configured_document_key_reaches_the_substrate() {
        let config = CoreConfig {
            document_key: "notekeeper-work".to_string(),
            ..CoreConfig::default()
        };
        let mut backend = MemoryKeyValueStore::new();
        {
            let mut repo = config
                .open_repository(&mut backend, FixedClock(1))
                .unwrap();
            assert_eq!(repo.store().key(), "notekeeper-work");
            repo.create_notebook("Work").unwrap();
        }

        let stored = backend.get("notekeeper-work").unwrap().unwrap();
        assert!(stored.contains("Work"));
        assert!(backend.get(DEFAULT_DOCUMENT_KEY).unwrap().is_none());
    }

    #[test]
    fn init_logging_rejects_relative_dir_with_configured_level() {
        let err = CoreConfig::default().init_logging("logs").unwrap_err();
        assert!(err.contains("absolute"));
    }
}
