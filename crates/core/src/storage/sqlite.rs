//! SQLite-backed blob store

use std::path::Path;
use std::sync::Mutex;

use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};
use tracing::instrument;

use super::{migrations, BlobStore};
use crate::error::{Error, Result};

/// Durable blob store in a single SQLite file
pub struct SqliteBlobStore {
    conn: Mutex<Connection>,
}

impl SqliteBlobStore {
    /// Open or create database at the given path
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path)?;
        Self::init(conn)
    }

    /// Open in-memory database (for testing)
    #[instrument]
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Self::init(conn)
    }

    fn init(conn: Connection) -> Result<Self> {
        migrations::run_migrations(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Get current schema version
    pub fn schema_version(&self) -> Result<u32> {
        let conn = self.conn.lock().map_err(|_| Error::StoragePoisoned)?;
        migrations::get_current_version(&conn)
    }
}

impl BlobStore for SqliteBlobStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let conn = self.conn.lock().map_err(|_| Error::StoragePoisoned)?;
        let value = conn
            .query_row(
                "SELECT value FROM blobs WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let conn = self.conn.lock().map_err(|_| Error::StoragePoisoned)?;
        conn.execute(
            "INSERT OR REPLACE INTO blobs (key, value, updated_at) VALUES (?1, ?2, ?3)",
            params![key, value, Utc::now().to_rfc3339()],
        )?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let conn = self.conn.lock().map_err(|_| Error::StoragePoisoned)?;
        conn.execute("DELETE FROM blobs WHERE key = ?1", params![key])?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_in_memory() {
        let store = SqliteBlobStore::open_in_memory().unwrap();
        assert_eq!(store.schema_version().unwrap(), migrations::latest_version());

        assert!(store.get("parkease_user").unwrap().is_none());
        store.set("parkease_user", "{}").unwrap();
        store.set("parkease_user", "{\"a\":1}").unwrap();
        assert_eq!(
            store.get("parkease_user").unwrap().as_deref(),
            Some("{\"a\":1}")
        );

        store.remove("parkease_user").unwrap();
        assert!(store.get("parkease_user").unwrap().is_none());
    }

    #[test]
    fn test_values_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("parkease.db");

        {
            let store = SqliteBlobStore::open(&path).unwrap();
            store.set("parkease_bookings", "[]").unwrap();
        }

        let store = SqliteBlobStore::open(&path).unwrap();
        assert_eq!(store.get("parkease_bookings").unwrap().as_deref(), Some("[]"));
    }
}
