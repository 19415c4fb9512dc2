//! Data models for ParkEase

mod admin;
mod booking;
mod location;
mod user;

pub use admin::*;
pub use booking::*;
pub use location::*;
pub use user::*;
