//! Developer guardrails and invariants
//!
//! Debug assertions for detecting impossible states during development.
//! These checks are compiled out in release builds.

use std::collections::HashSet;

use crate::models::{Booking, Location, User};

/// Emails are the user table's key
pub fn assert_user_table_invariants(users: &[User]) {
    if cfg!(debug_assertions) {
        let mut seen = HashSet::new();
        for user in users {
            debug_assert!(
                seen.insert(user.email.as_str()),
                "User table has duplicate email {}",
                user.email
            );
            debug_assert!(
                !user.password_hash.is_empty(),
                "User {} stored without a password hash",
                user.email
            );
        }
    }
}

pub fn assert_unique_booking_ids(bookings: &[Booking]) {
    if cfg!(debug_assertions) {
        let mut seen = HashSet::new();
        for booking in bookings {
            debug_assert!(
                seen.insert(booking.id.as_str()),
                "Booking table has duplicate id {}",
                booking.id
            );
        }
    }
}

pub fn assert_unique_location_ids(locations: &[Location]) {
    if cfg!(debug_assertions) {
        let mut seen = HashSet::new();
        for location in locations {
            debug_assert!(
                seen.insert(location.id.as_str()),
                "Location list has duplicate id {}",
                location.id
            );
        }
    }
}
