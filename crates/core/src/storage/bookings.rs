//! Booking table operations

use tracing::instrument;

use super::parse::{read_table, read_table_opt, write_table};
use super::{keys, BlobStore};
use crate::error::{Error, Result};
use crate::invariants::assert_unique_booking_ids;
use crate::models::Booking;

pub struct BookingTable<'a> {
    blobs: &'a dyn BlobStore,
}

impl<'a> BookingTable<'a> {
    pub fn new(blobs: &'a dyn BlobStore) -> Self {
        Self { blobs }
    }

    pub fn all(&self) -> Result<Vec<Booking>> {
        read_table(self.blobs, keys::BOOKINGS)
    }

    pub fn contains(&self, id: &str) -> Result<bool> {
        Ok(self.all()?.iter().any(|b| b.id == id))
    }

    /// Bookings owned by the given account id
    pub fn for_user(&self, user_id: &str) -> Result<Vec<Booking>> {
        Ok(self
            .all()?
            .into_iter()
            .filter(|b| b.user_id.as_deref() == Some(user_id))
            .collect())
    }

    #[instrument(skip(self, booking), fields(id = %booking.id))]
    pub fn insert(&self, booking: Booking) -> Result<()> {
        let mut bookings = self.all()?;
        bookings.push(booking);
        assert_unique_booking_ids(&bookings);
        write_table(self.blobs, keys::BOOKINGS, &bookings)
    }

    /// Cancel a booking and return it
    #[instrument(skip(self))]
    pub fn cancel(&self, id: &str) -> Result<Booking> {
        let Some(mut bookings) = read_table_opt::<Booking>(self.blobs, keys::BOOKINGS)? else {
            return Err(Error::NotFound("No bookings found".to_string()));
        };

        let booking = bookings
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or_else(|| Error::NotFound(format!("Booking {} not found", id)))?;

        if !booking.cancel() {
            return Err(Error::Conflict(format!(
                "Booking {} is {} and cannot be cancelled",
                id, booking.status
            )));
        }
        let cancelled = booking.clone();

        write_table(self.blobs, keys::BOOKINGS, &bookings)?;
        Ok(cancelled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BookingRequest, BookingStatus};
    use crate::storage::MemoryBlobStore;

    fn booking(id: &str, user_id: Option<&str>) -> Booking {
        let request = BookingRequest {
            user_id: user_id.map(str::to_string),
            location_id: None,
            location_name: "X".into(),
            start_time: "2025-01-01T10:00:00".parse().unwrap(),
            duration: 2,
            price: 10.0,
        };
        Booking::from_request(id.to_string(), request)
    }

    #[test]
    fn test_cancel_without_table() {
        let blobs = MemoryBlobStore::new();
        let table = BookingTable::new(&blobs);
        let err = table.cancel("BK-1").unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }

    #[test]
    fn test_cancel_unknown_id() {
        let blobs = MemoryBlobStore::new();
        let table = BookingTable::new(&blobs);
        table.insert(booking("BK-1", None)).unwrap();

        let err = table.cancel("BK-2").unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
        assert_eq!(table.all().unwrap()[0].status, BookingStatus::Upcoming);
    }

    #[test]
    fn test_cancel_persists() {
        let blobs = MemoryBlobStore::new();
        let table = BookingTable::new(&blobs);
        table.insert(booking("BK-1", None)).unwrap();
        table.insert(booking("BK-2", None)).unwrap();

        table.cancel("BK-2").unwrap();
        let all = table.all().unwrap();
        assert_eq!(all[0].status, BookingStatus::Upcoming);
        assert_eq!(all[1].status, BookingStatus::Cancelled);
    }

    #[test]
    fn test_for_user() {
        let blobs = MemoryBlobStore::new();
        let table = BookingTable::new(&blobs);
        table.insert(booking("BK-1", Some("USER001"))).unwrap();
        table.insert(booking("BK-2", Some("USER002"))).unwrap();
        table.insert(booking("BK-3", None)).unwrap();

        let mine = table.for_user("USER001").unwrap();
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].id, "BK-1");
        assert!(table.contains("BK-3").unwrap());
    }
}
