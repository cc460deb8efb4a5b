//! Key-value storage contracts and implementations.
//!
//! # Invariants
//! - `write` is synchronous: once it returns `Ok`, a later `read` of the same
//!   key observes the new value.
//! - Each write is one statement, so a key is never left half-written.

use crate::db::DbError;
use rusqlite::{params, Connection, OptionalExtension};
use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type KvResult<T> = Result<T, KvError>;

/// Failure of the durable key-value backend.
#[derive(Debug)]
pub enum KvError {
    Db(DbError),
    /// Backend refused the operation (disabled, quota, permissions).
    Unavailable(String),
}

impl Display for KvError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Unavailable(reason) => write!(f, "storage unavailable: {reason}"),
        }
    }
}

impl Error for KvError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Unavailable(_) => None,
        }
    }
}

impl From<DbError> for KvError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for KvError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Durable string-to-string storage.
pub trait KeyValueStore {
    fn read(&self, key: &str) -> KvResult<Option<String>>;
    fn write(&self, key: &str, value: &str) -> KvResult<()>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for &T {
    fn read(&self, key: &str) -> KvResult<Option<String>> {
        (**self).read(key)
    }

    fn write(&self, key: &str, value: &str) -> KvResult<()> {
        (**self).write(key, value)
    }
}

/// SQLite-backed key-value store over the `kv_entries` table.
///
/// Borrows a migrated connection; copies share the same connection.
#[derive(Clone, Copy)]
pub struct SqliteKeyValueStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteKeyValueStore<'conn> {
    /// Wraps a connection returned by `open_db`/`open_db_in_memory`.
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl KeyValueStore for SqliteKeyValueStore<'_> {
    fn read(&self, key: &str) -> KvResult<Option<String>> {
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

    fn write(&self, key: &str, value: &str) -> KvResult<()> {
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
}

/// Process-local key-value store.
///
/// Used for the in-memory fallback when no database can be opened, and by
/// tests. `set_available(false)` makes every call fail with
/// `KvError::Unavailable`.
#[derive(Debug, Default)]
pub struct MemoryKeyValueStore {
    entries: RefCell<BTreeMap<String, String>>,
    unavailable: Cell<bool>,
}

impl MemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_available(&self, available: bool) {
        self.unavailable.set(!available);
    }

    /// Seeds a raw value, bypassing availability checks.
    pub fn insert_raw(&self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.borrow_mut().insert(key.into(), value.into());
    }

    /// Returns the raw stored value, bypassing availability checks.
    pub fn raw(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn ensure_available(&self) -> KvResult<()> {
        if self.unavailable.get() {
            return Err(KvError::Unavailable("memory store disabled".to_string()));
        }
        Ok(())
    }
}

impl KeyValueStore for MemoryKeyValueStore {
    fn read(&self, key: &str) -> KvResult<Option<String>> {
        self.ensure_available()?;
        Ok(self.raw(key))
    }

    fn write(&self, key: &str, value: &str) -> KvResult<()> {
        self.ensure_available()?;
        self.insert_raw(key, value);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{KeyValueStore, KvError, MemoryKeyValueStore};

    #[test]
    fn memory_store_reads_its_writes() {
        let store = MemoryKeyValueStore::new();
        assert_eq!(store.read("k").unwrap(), None);
        store.write("k", "v1").unwrap();
        store.write("k", "v2").unwrap();
        assert_eq!(store.read("k").unwrap().as_deref(), Some("v2"));
    }

    #[test]
    fn disabled_memory_store_rejects_reads_and_writes() {
        let store = MemoryKeyValueStore::new();
        store.set_available(false);
        assert!(matches!(store.read("k"), Err(KvError::Unavailable(_))));
        assert!(matches!(store.write("k", "v"), Err(KvError::Unavailable(_))));
        assert_eq!(store.raw("k"), None);
    }
}
