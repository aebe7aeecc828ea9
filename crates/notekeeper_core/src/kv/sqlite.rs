use super::{KeyValueStore, KvError, KvResult};
use rusqlite::{params, Connection, OptionalExtension};

const KV_TABLE: &str = "kv_entries";
const KV_COLUMNS: [&str; 3] = ["key", "value", "updated_at"];

/// SQLite-backed substrate over the `kv_entries` table.
///
/// Expects a connection prepared by `db::open_db` or `db::open_db_in_memory`.
pub struct SqliteKeyValueStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteKeyValueStore<'conn> {
    /// Wraps a migrated connection.
    ///
    /// # Errors
    /// - `KvError::Unavailable` when the `kv_entries` table or one of its
    ///   columns is missing.
    pub fn try_new(conn: &'conn Connection) -> KvResult<Self> {
        ensure_kv_table_ready(conn)?;
        Ok(Self { conn })
    }
}

impl KeyValueStore for SqliteKeyValueStore<'_> {
    fn get(&self, key: &str) -> KvResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv_entries WHERE key = ?1;",
                [key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set(&mut self, key: &str, value: &str) -> KvResult<()> {
        self.conn.execute(
            "INSERT INTO kv_entries (key, value, updated_at)
             VALUES (?1, ?2, (strftime('%s', 'now') * 1000))
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at;",
            params![key, value],
        )?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> KvResult<()> {
        self.conn
            .execute("DELETE FROM kv_entries WHERE key = ?1;", [key])?;
        Ok(())
    }
}

fn ensure_kv_table_ready(conn: &Connection) -> KvResult<()> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({KV_TABLE});"))?;
    let mut rows = stmt.query([])?;
    let mut present = Vec::new();
    while let Some(row) = rows.next()? {
        present.push(row.get::<_, String>(1)?);
    }

    if present.is_empty() {
        return Err(KvError::Unavailable(format!(
            "missing required table `{KV_TABLE}`"
        )));
    }
    for column in KV_COLUMNS {
        if !present.iter().any(|name| name == column) {
            return Err(KvError::Unavailable(format!(
                "missing required column `{KV_TABLE}.{column}`"
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::SqliteKeyValueStore;
    use crate::db::open_db_in_memory;
    use crate::kv::{KeyValueStore, KvError};
    use rusqlite::Connection;

    #[test]
    fn set_get_remove_roundtrip() {
        let conn = open_db_in_memory().unwrap();
        let mut store = SqliteKeyValueStore::try_new(&conn).unwrap();

        store.set("doc", "{}").unwrap();
        store.set("doc", "{\"notebooks\":[]}").unwrap();
        assert_eq!(
            store.get("doc").unwrap().as_deref(),
            Some("{\"notebooks\":[]}")
        );

        store.remove("doc").unwrap();
        assert_eq!(store.get("doc").unwrap(), None);
    }

    #[test]
    fn try_new_rejects_unmigrated_connection() {
        let conn = Connection::open_in_memory().unwrap();
        let err = SqliteKeyValueStore::try_new(&conn).err().unwrap();
        assert!(matches!(err, KvError::Unavailable(_)));
    }
}
