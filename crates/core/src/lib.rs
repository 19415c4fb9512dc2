//! ParkEase Core Library
//!
//! Models, blob storage and the reservation/session store behind the
//! ParkEase parking application.

pub mod api;
pub mod config;
pub mod error;
pub mod events;
pub mod ids;
pub mod invariants;
pub mod models;
pub mod password;
pub mod reply;
pub mod storage;
pub mod store;

pub use api::{Operation, ParkingApi, Registration};
pub use config::{ConfigError, LatencyConfig, StoreConfig};
pub use error::{Error, ErrorKind, Result};
pub use events::StoreEvent;
pub use models::*;
pub use reply::{IntoReply, Reply};
pub use storage::{BlobStore, MemoryBlobStore, SqliteBlobStore};
pub use store::ParkingStore;
