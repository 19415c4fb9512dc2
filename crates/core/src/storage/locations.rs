//! User-added location table
//!
//! Seed locations never live here; they are owned by the store in memory.

use super::parse::{read_table, write_table};
use super::{keys, BlobStore};
use crate::error::Result;
use crate::invariants::assert_unique_location_ids;
use crate::models::Location;

pub struct LocationTable<'a> {
    blobs: &'a dyn BlobStore,
}

impl<'a> LocationTable<'a> {
    pub fn new(blobs: &'a dyn BlobStore) -> Self {
        Self { blobs }
    }

    pub fn all(&self) -> Result<Vec<Location>> {
        read_table(self.blobs, keys::LOCATIONS)
    }

    pub fn insert(&self, location: Location) -> Result<()> {
        let mut locations = self.all()?;
        locations.push(location);
        assert_unique_location_ids(&locations);
        write_table(self.blobs, keys::LOCATIONS, &locations)
    }

    /// Remove by id. Returns false when nothing matched.
    pub fn remove(&self, id: &str) -> Result<bool> {
        let mut locations = self.all()?;
        let before = locations.len();
        locations.retain(|l| l.id != id);
        if locations.len() == before {
            return Ok(false);
        }
        write_table(self.blobs, keys::LOCATIONS, &locations)?;
        Ok(true)
    }
}
