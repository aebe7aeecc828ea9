//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `notekeeper_core` linkage without any UI host.
//! - Start core logging from `CoreConfig` (`NOTEKEEPER_LOG_DIR`, else the
//!   system temp dir).
//! - Run one notebook/note round trip against an in-memory SQLite store.

use notekeeper_core::db::open_db_in_memory;
use notekeeper_core::{CoreConfig, NotebookService, SqliteKeyValueStore, SystemClock};
use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;

const LOG_DIR_ENV: &str = "NOTEKEEPER_LOG_DIR";

fn main() -> ExitCode {
    let config = CoreConfig::default();
    let log_dir = log_dir();

    println!("notekeeper_core ping={}", notekeeper_core::ping());
    println!("notekeeper_core version={}", notekeeper_core::core_version());
    match config.init_logging(&log_dir.to_string_lossy()) {
        Ok(()) => println!(
            "notekeeper_core log_level={} log_dir={}",
            config.log_level,
            log_dir.display()
        ),
        Err(err) => eprintln!("notekeeper_core logging=disabled error={err}"),
    }

    match round_trip(&config) {
        Ok(summary) => {
            println!("{summary}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("notekeeper_core round_trip=failed error={err}");
            ExitCode::FAILURE
        }
    }
}

fn log_dir() -> PathBuf {
    std::env::var_os(LOG_DIR_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| std::env::temp_dir().join("notekeeper-logs"))
}

fn round_trip(config: &CoreConfig) -> Result<String, Box<dyn Error>> {
    let conn = open_db_in_memory()?;
    let backend = SqliteKeyValueStore::try_new(&conn)?;
    let repo = config.open_repository(backend, SystemClock)?;
    let mut service = NotebookService::new(repo);

    let notebook = service.create_notebook("Smoke")?;
    service.create_note(&notebook.id, "", "smoke body")?;
    let notes = service.list_notes(&notebook.id)?;
    service.delete_notebook(&notebook.id)?;
    let remaining = service.list_notebooks()?;

    Ok(format!(
        "notekeeper_core round_trip=ok document_key={} notes_created={} notebooks_after_delete={}",
        config.document_key,
        notes.len(),
        remaining.len()
    ))
}
