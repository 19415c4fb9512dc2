//! Blob value parsing utilities
//!
//! Tables are JSON arrays, single records are JSON objects.

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::error;

use super::BlobStore;
use crate::error::Result;

/// Read a table, distinguishing "never written" from "empty"
pub fn read_table_opt<T: DeserializeOwned>(
    blobs: &dyn BlobStore,
    key: &str,
) -> Result<Option<Vec<T>>> {
    read_record(blobs, key)
}

/// Read a table; a missing key reads as empty
pub fn read_table<T: DeserializeOwned>(blobs: &dyn BlobStore, key: &str) -> Result<Vec<T>> {
    Ok(read_table_opt(blobs, key)?.unwrap_or_default())
}

pub fn write_table<T: Serialize>(blobs: &dyn BlobStore, key: &str, rows: &[T]) -> Result<()> {
    write_record(blobs, key, &rows)
}

pub fn read_record<T: DeserializeOwned>(blobs: &dyn BlobStore, key: &str) -> Result<Option<T>> {
    let Some(raw) = blobs.get(key)? else {
        return Ok(None);
    };
    let value = serde_json::from_str(&raw).map_err(|e| {
        error!(key, error = %e, "Stored value is not valid JSON for its table");
        e
    })?;
    Ok(Some(value))
}

pub fn write_record<T: Serialize + ?Sized>(
    blobs: &dyn BlobStore,
    key: &str,
    value: &T,
) -> Result<()> {
    let raw = serde_json::to_string(value)?;
    blobs.set(key, &raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryBlobStore;

    #[test]
    fn test_missing_table_reads_empty() {
        let blobs = MemoryBlobStore::new();
        let rows: Vec<u32> = read_table(&blobs, "t").unwrap();
        assert!(rows.is_empty());
        let rows: Option<Vec<u32>> = read_table_opt(&blobs, "t").unwrap();
        assert!(rows.is_none());
    }

    #[test]
    fn test_corrupt_table_is_an_error() {
        let blobs = MemoryBlobStore::new();
        blobs.set("t", "not json").unwrap();
        let result: Result<Vec<u32>> = read_table(&blobs, "t");
        assert!(result.is_err());
    }

    #[test]
    fn test_table_is_stored_as_json_array() {
        let blobs = MemoryBlobStore::new();
        write_table(&blobs, "t", &[1u32, 2, 3]).unwrap();
        assert_eq!(blobs.get("t").unwrap().as_deref(), Some("[1,2,3]"));
    }
}
