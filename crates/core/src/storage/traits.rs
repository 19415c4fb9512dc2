//! Storage backend trait
//!
//! The store only needs a string key-value blob interface, which keeps
//! backends interchangeable (SQLite, in-memory, future remote store).

use std::sync::Arc;

use crate::error::Result;

/// Key-value storage of JSON documents
pub trait BlobStore: Send + Sync {
    /// Read the value stored under `key`
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Insert or overwrite the value under `key`
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Delete `key`; absent keys are not an error
    fn remove(&self, key: &str) -> Result<()>;
}

impl<T: BlobStore + ?Sized> BlobStore for Arc<T> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<()> {
        (**self).remove(key)
    }
}

impl<T: BlobStore + ?Sized> BlobStore for Box<T> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<()> {
        (**self).remove(key)
    }
}
