use notekeeper_core::db::migrations::latest_version;
use notekeeper_core::db::{open_db, open_db_in_memory, DbError};
use notekeeper_core::{CoreConfig, KeyValueStore, SqliteKeyValueStore};
use rusqlite::Connection;

#[test]
fn open_db_in_memory_creates_kv_table() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(schema_version(&conn), latest_version());
    assert!(SqliteKeyValueStore::try_new(&conn).is_ok());
}

#[test]
fn reopening_same_file_keeps_schema_and_entries() {
    let dir = tempfile::tempdir().unwrap();
    let config = CoreConfig::default();

    {
        let conn = config.open_db(dir.path()).unwrap();
        let mut store = SqliteKeyValueStore::try_new(&conn).unwrap();
        store.set("k", "v").unwrap();
    }

    let conn = open_db(config.db_path(dir.path())).unwrap();
    assert_eq!(schema_version(&conn), latest_version());
    let store = SqliteKeyValueStore::try_new(&conn).unwrap();
    assert_eq!(store.get("k").unwrap().as_deref(), Some("v"));
}

#[test]
fn newer_schema_version_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.sqlite3");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    let err = open_db(&path).unwrap_err();
    assert!(err.to_string().contains("v999"));
    match err {
        DbError::SchemaTooNew { found, supported } => {
            assert_eq!(found, 999);
            assert_eq!(supported, latest_version());
        }
        other => panic!("unexpected error: {other}"),
    }

    let conn = Connection::open(&path).unwrap();
    assert_eq!(schema_version(&conn), 999);
}

fn schema_version(conn: &Connection) -> u32 {
    conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap()
}
