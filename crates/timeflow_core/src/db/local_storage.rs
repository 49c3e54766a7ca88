//! Key/value local storage over the `local_storage` table.
//!
//! # Invariants
//! - Values are stored and returned verbatim.
//! - `set_item` overwrites; `remove_item` on a missing key is a no-op.

use super::DbResult;
use rusqlite::{params, Connection, OptionalExtension};

/// Browser-style key/value storage contract.
pub trait LocalStorage {
    fn get_item(&self, key: &str) -> DbResult<Option<String>>;
    fn set_item(&self, key: &str, value: &str) -> DbResult<()>;
    fn remove_item(&self, key: &str) -> DbResult<()>;
}

/// SQLite-backed local storage.
#[derive(Debug, Clone, Copy)]
pub struct SqliteLocalStorage<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteLocalStorage<'conn> {
    /// Wraps a connection returned by `open_db`/`open_db_in_memory`.
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl LocalStorage for SqliteLocalStorage<'_> {
    fn get_item(&self, key: &str) -> DbResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM local_storage WHERE key = ?1;",
                [key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set_item(&self, key: &str, value: &str) -> DbResult<()> {
        self.conn.execute(
            "INSERT INTO local_storage (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = (strftime('%s', 'now') * 1000);",
            params![key, value],
        )?;
        Ok(())
    }

    fn remove_item(&self, key: &str) -> DbResult<()> {
        self.conn
            .execute("DELETE FROM local_storage WHERE key = ?1;", [key])?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{LocalStorage, SqliteLocalStorage};
    use crate::db::open_db_in_memory;

    #[test]
    fn set_get_overwrite_and_remove() {
        let conn = open_db_in_memory().unwrap();
        let storage = SqliteLocalStorage::new(&conn);

        assert_eq!(storage.get_item("user").unwrap(), None);
        storage.set_item("user", "{\"id\":1}").unwrap();
        storage.set_item("user", "{\"id\":2}").unwrap();
        assert_eq!(
            storage.get_item("user").unwrap().as_deref(),
            Some("{\"id\":2}")
        );

        storage.remove_item("user").unwrap();
        storage.remove_item("user").unwrap();
        assert_eq!(storage.get_item("user").unwrap(), None);
    }
}
