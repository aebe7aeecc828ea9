//! SQLite file backing the key-value substrate.
//!
//! # Responsibility
//! - Hand out connections whose `kv_entries` table is ready for
//!   `SqliteKeyValueStore`.
//!
//! # Invariants
//! - The `kv_entries` schema version lives in `PRAGMA user_version`.
//! - A file stamped by a newer build is refused and left untouched.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod migrations;
mod open;

pub use open::{open_db, open_db_in_memory};

/// Failure while opening or migrating the key-value file.
#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
    /// `kv_entries` schema `found` is past the `supported` one.
    SchemaTooNew { found: u32, supported: u32 },
}

pub type DbResult<T> = Result<T, DbError>;

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "kv sqlite: {err}"),
            Self::SchemaTooNew { found, supported } => write!(
                f,
                "kv_entries schema v{found} was written by a newer build (supports up to v{supported})"
            ),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::SchemaTooNew { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
