//! Store events
//!
//! Side effects the browser version performed directly (redirect after
//! logout and friends) are published here for the embedding layer.

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "camelCase")]
pub enum StoreEvent {
    SessionStarted { email: String },
    /// The embedding layer should return to its landing screen
    LoggedOut,
    BookingCreated { id: String },
    BookingCancelled { id: String },
    LocationAdded { id: String },
    LocationDeleted { id: String },
}

/// Capacity of the event channel; slow subscribers lose the oldest events
pub const EVENT_CAPACITY: usize = 64;
