use notekeeper_core::db::open_db;
use notekeeper_core::{
    Document, DocumentNotebookRepository, DocumentStore, FixedClock, KeyValueStore, KvError,
    KvResult, MemoryKeyValueStore, NoteDraft, NotePatch, Notebook, NotebookRepository, RepoError,
    SqliteKeyValueStore, DEFAULT_DOCUMENT_KEY,
};

/// Substrate that refuses every call, like storage disabled by the host.
struct DisabledStore;

impl KeyValueStore for DisabledStore {
    fn get(&self, _key: &str) -> KvResult<Option<String>> {
        Err(KvError::Unavailable("storage disabled".to_string()))
    }

    fn set(&mut self, _key: &str, _value: &str) -> KvResult<()> {
        Err(KvError::Unavailable("storage disabled".to_string()))
    }

    fn remove(&mut self, _key: &str) -> KvResult<()> {
        Err(KvError::Unavailable("storage disabled".to_string()))
    }
}

#[test]
fn opening_on_disabled_storage_fails_with_storage_unavailable() {
    let err = DocumentNotebookRepository::with_clock(DisabledStore, FixedClock(1))
        .err()
        .unwrap();
    assert!(matches!(
        err,
        RepoError::StorageUnavailable(KvError::Unavailable(_))
    ));
}

#[test]
fn corrupt_document_fails_once_then_repository_starts_empty() {
    let mut backend = MemoryKeyValueStore::with_entry(DEFAULT_DOCUMENT_KEY, "not json");
    let mut repo = DocumentNotebookRepository::with_clock(&mut backend, FixedClock(1)).unwrap();

    let err = repo.list_notebooks().unwrap_err();
    assert!(matches!(err, RepoError::StorageCorrupt(_)));
    assert!(repo.list_notebooks().unwrap().is_empty());

    repo.create_notebook("Fresh").unwrap();
    drop(repo);
    let stored = backend.get(DEFAULT_DOCUMENT_KEY).unwrap().unwrap();
    assert!(stored.contains("Fresh"));
}

#[test]
fn document_with_wrong_shape_is_corrupt() {
    let mut backend = MemoryKeyValueStore::with_entry(DEFAULT_DOCUMENT_KEY, r#"{"notebooks":3}"#);
    let mut repo = DocumentNotebookRepository::with_clock(&mut backend, FixedClock(1)).unwrap();
    assert!(matches!(
        repo.create_notebook("x"),
        Err(RepoError::StorageCorrupt(_))
    ));
}

#[test]
fn write_then_read_roundtrip_on_sqlite_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notekeeper.sqlite3");

    let mut document = Document::empty();
    document.notebooks.push(Notebook::new("10", "Work"));

    {
        let conn = open_db(&path).unwrap();
        let mut store = DocumentStore::new(SqliteKeyValueStore::try_new(&conn).unwrap());
        store.replace(document.clone());
        store.write().unwrap();
    }

    let conn = open_db(&path).unwrap();
    let mut store = DocumentStore::new(SqliteKeyValueStore::try_new(&conn).unwrap());
    assert!(!store.initialize().unwrap());
    assert_eq!(store.read().unwrap(), &document);
}

#[test]
fn repository_persists_across_sqlite_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notekeeper.sqlite3");

    let notebook_id = {
        let conn = open_db(&path).unwrap();
        let backend = SqliteKeyValueStore::try_new(&conn).unwrap();
        let mut repo = DocumentNotebookRepository::with_clock(backend, FixedClock(500)).unwrap();
        let work = repo.create_notebook("Work").unwrap();
        repo.create_note(&work.id, &NoteDraft::new("A", "B"))
            .unwrap();
        work.id
    };

    let conn = open_db(&path).unwrap();
    let backend = SqliteKeyValueStore::try_new(&conn).unwrap();
    let mut repo = DocumentNotebookRepository::with_clock(backend, FixedClock(500)).unwrap();
    let notes = repo.list_notes(&notebook_id).unwrap();
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].posted_on, 501);
}

#[test]
fn custom_document_key_is_isolated_from_default() {
    let mut backend = MemoryKeyValueStore::new();
    {
        let store = DocumentStore::with_key(&mut backend, "other");
        let mut repo = DocumentNotebookRepository::from_store(store, FixedClock(1)).unwrap();
        repo.create_notebook("Work").unwrap();
    }
    assert!(backend.get("other").unwrap().is_some());
    assert!(backend.get(DEFAULT_DOCUMENT_KEY).unwrap().is_none());
}

#[test]
fn unknown_stored_fields_survive_a_rewrite() {
    let stored = r#"{
        "notebooks": [
            {
                "id": "1",
                "name": "Work",
                "color": "teal",
                "notes": [
                    {
                        "id": "2",
                        "notebookId": "1",
                        "title": "A",
                        "text": "B",
                        "postedOn": 2,
                        "pinned": true
                    }
                ]
            }
        ],
        "theme": "dark"
    }"#;
    let mut backend = MemoryKeyValueStore::with_entry(DEFAULT_DOCUMENT_KEY, stored);
    {
        let mut repo =
            DocumentNotebookRepository::with_clock(&mut backend, FixedClock(10)).unwrap();
        repo.update_note("2", &NotePatch::text("C")).unwrap();
        repo.update_notebook("1", "Office").unwrap();
    }

    let rewritten: serde_json::Value =
        serde_json::from_str(&backend.get(DEFAULT_DOCUMENT_KEY).unwrap().unwrap()).unwrap();
    assert_eq!(rewritten["theme"], "dark");
    assert_eq!(rewritten["notebooks"][0]["color"], "teal");
    assert_eq!(rewritten["notebooks"][0]["name"], "Office");
    assert_eq!(rewritten["notebooks"][0]["notes"][0]["pinned"], true);
    assert_eq!(rewritten["notebooks"][0]["notes"][0]["text"], "C");
}
