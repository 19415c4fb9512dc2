//! Booking model

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle of a booking. The only transition is into `Cancelled`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BookingStatus {
    Upcoming,
    Active,
    Completed,
    Cancelled,
}

impl BookingStatus {
    pub fn can_cancel(&self) -> bool {
        matches!(
            self,
            BookingStatus::Upcoming | BookingStatus::Active | BookingStatus::Cancelled
        )
    }
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            BookingStatus::Upcoming => "Upcoming",
            BookingStatus::Active => "Active",
            BookingStatus::Completed => "Completed",
            BookingStatus::Cancelled => "Cancelled",
        };
        f.write_str(s)
    }
}

/// What the caller sends to reserve a spot
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    /// Account id; the current session's id is used when absent
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default, rename = "locId")]
    pub location_id: Option<String>,
    pub location_name: String,
    pub start_time: NaiveDateTime,
    /// Hours
    pub duration: u32,
    pub price: f64,
}

/// A stored reservation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: String,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default, rename = "locId")]
    pub location_id: Option<String>,
    pub location_name: String,
    pub start_time: NaiveDateTime,
    pub duration: u32,
    pub price: f64,
    pub status: BookingStatus,
    pub timestamp: DateTime<Utc>,
}

impl Booking {
    pub fn from_request(id: String, request: BookingRequest) -> Self {
        Self {
            id,
            user_id: request.user_id,
            location_id: request.location_id,
            location_name: request.location_name,
            start_time: request.start_time,
            duration: request.duration,
            price: request.price,
            status: BookingStatus::Upcoming,
            timestamp: Utc::now(),
        }
    }

    /// Mark as cancelled. Returns false when the status does not allow it.
    pub fn cancel(&mut self) -> bool {
        if !self.status.can_cancel() {
            return false;
        }
        self.status = BookingStatus::Cancelled;
        true
    }
}
