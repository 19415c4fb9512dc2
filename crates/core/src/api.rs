//! Operation contract shared by every ParkEase backend
//!
//! The presentation layer talks to this trait only, so the local mock
//! store and a future HTTP client are interchangeable.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::models::{
    Booking, BookingRequest, Location, NewLocation, Role, Session, Slot, SlotStatus, SlotToggle,
    Stats, UserProfile,
};

/// Named store operations, used for latency simulation and logging
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Register,
    Login,
    Logout,
    GetLocations,
    GetLocationById,
    AddLocation,
    DeleteLocation,
    GetBookings,
    SaveBooking,
    CancelBooking,
    GetStats,
    GetAdminSlots,
    ToggleSlotStatus,
    GetProfile,
}

impl Operation {
    /// Round-trip time the operation pretends to take
    pub fn base_delay(&self) -> Duration {
        let ms = match self {
            Operation::Register => 1200,
            Operation::Login | Operation::AddLocation | Operation::SaveBooking => 800,
            Operation::GetLocations => 600,
            Operation::DeleteLocation | Operation::CancelBooking | Operation::GetStats => 500,
            Operation::GetLocationById | Operation::GetAdminSlots => 400,
            Operation::GetBookings | Operation::ToggleSlotStatus | Operation::GetProfile => 300,
            Operation::Logout => 200,
        };
        Duration::from_millis(ms)
    }
}

/// Acknowledgement of a new account. Registration does not sign in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    pub custom_id: String,
    pub role: Role,
    pub message: String,
}

/// Every operation the presentation layer may call
#[allow(async_fn_in_trait)]
pub trait ParkingApi {
    async fn register(
        &self,
        email: &str,
        password: &str,
        admin_code: Option<&str>,
    ) -> Result<Registration>;

    async fn login(&self, email: &str, password: &str) -> Result<Session>;

    async fn logout(&self) -> Result<()>;

    async fn current_session(&self) -> Result<Option<Session>>;

    async fn get_locations(&self) -> Result<Vec<Location>>;

    async fn get_location_by_id(&self, id: &str) -> Result<Option<Location>>;

    async fn add_location(&self, data: NewLocation) -> Result<Location>;

    async fn delete_location(&self, id: &str) -> Result<()>;

    async fn get_bookings(&self) -> Result<Vec<Booking>>;

    async fn user_bookings(&self, user_id: &str) -> Result<Vec<Booking>>;

    async fn save_booking(&self, request: BookingRequest) -> Result<Booking>;

    async fn cancel_booking(&self, id: &str) -> Result<Booking>;

    async fn get_stats(&self) -> Result<Stats>;

    async fn get_admin_slots(&self) -> Result<Vec<Slot>>;

    async fn toggle_slot_status(&self, id: &str, current: SlotStatus) -> Result<SlotToggle>;

    async fn user_profile(&self, email: &str) -> Result<UserProfile>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heavier_operations_wait_longer() {
        assert!(Operation::Register.base_delay() > Operation::Login.base_delay());
        assert!(Operation::Login.base_delay() > Operation::Logout.base_delay());
        assert_eq!(Operation::GetBookings.base_delay(), Duration::from_millis(300));
    }
}
