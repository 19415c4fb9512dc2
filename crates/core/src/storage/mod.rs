//! Blob storage layer for ParkEase
//!
//! Every table is one JSON document under a fixed key. Typed table views
//! borrow a [`BlobStore`] and do a full read-modify-write per mutation;
//! callers serialize those through the store's write lock.

mod bookings;
mod locations;
mod memory;
mod migrations;
mod parse;
mod session;
mod sqlite;
mod traits;
mod users;

pub use bookings::BookingTable;
pub use locations::LocationTable;
pub use memory::MemoryBlobStore;
pub use session::SessionSlot;
pub use sqlite::SqliteBlobStore;
pub use traits::BlobStore;
pub use users::UserTable;

/// Fixed blob keys
pub mod keys {
    /// Registered users, including password hashes
    pub const USERS: &str = "parkease_users_db";
    /// The signed-in session, absent when logged out
    pub const CURRENT_SESSION: &str = "parkease_user";
    /// User-added locations
    pub const LOCATIONS: &str = "parkease_locations";
    pub const BOOKINGS: &str = "parkease_bookings";
}
