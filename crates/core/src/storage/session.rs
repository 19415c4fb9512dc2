//! Current session slot

use super::parse::{read_record, write_record};
use super::{keys, BlobStore};
use crate::error::Result;
use crate::models::Session;

/// The single "who is signed in" record
pub struct SessionSlot<'a> {
    blobs: &'a dyn BlobStore,
}

impl<'a> SessionSlot<'a> {
    pub fn new(blobs: &'a dyn BlobStore) -> Self {
        Self { blobs }
    }

    pub fn current(&self) -> Result<Option<Session>> {
        read_record(self.blobs, keys::CURRENT_SESSION)
    }

    /// Replace whatever session was stored
    pub fn store(&self, session: &Session) -> Result<()> {
        write_record(self.blobs, keys::CURRENT_SESSION, session)
    }

    pub fn clear(&self) -> Result<()> {
        self.blobs.remove(keys::CURRENT_SESSION)
    }
}
