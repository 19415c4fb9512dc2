//! Structured replies for the presentation layer
//!
//! Mutating operations are reported as
//! `{ "success": bool, "message"?: string, ...payload }` so callers branch
//! on `success` instead of handling errors.

use serde::Serialize;
use serde_json::{Map, Value};
use tracing::error;

use crate::api::Registration;
use crate::error::{Error, Result};
use crate::models::{Booking, Location, Session, SlotToggle};

/// Message shown for failures the caller cannot do anything about
pub const UNEXPECTED_FAILURE: &str = "Unexpected storage failure";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Reply {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(flatten)]
    pub payload: Map<String, Value>,
}

impl Reply {
    pub fn ok() -> Self {
        Self {
            success: true,
            message: None,
            payload: Map::new(),
        }
    }

    pub fn failure(err: &Error) -> Self {
        let message = if err.is_domain() {
            err.to_string()
        } else {
            error!(error = %err, "Operation failed on storage");
            UNEXPECTED_FAILURE.to_string()
        };
        Self {
            success: false,
            message: Some(message),
            payload: Map::new(),
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Attach a payload field
    pub fn with<T: Serialize>(mut self, key: &str, value: &T) -> Self {
        match serde_json::to_value(value) {
            Ok(v) => {
                self.payload.insert(key.to_string(), v);
            }
            Err(e) => error!(key, error = %e, "Failed to serialize reply payload"),
        }
        self
    }

    pub fn from_result<T: IntoReply>(result: Result<T>) -> Self {
        match result {
            Ok(value) => value.into_reply(),
            Err(err) => Self::failure(&err),
        }
    }
}

/// Successful operation outputs that know their reply shape
pub trait IntoReply {
    fn into_reply(self) -> Reply;
}

impl IntoReply for () {
    fn into_reply(self) -> Reply {
        Reply::ok()
    }
}

impl IntoReply for Registration {
    fn into_reply(self) -> Reply {
        Reply::ok().with_message(self.message)
    }
}

impl IntoReply for Session {
    fn into_reply(self) -> Reply {
        Reply::ok().with("user", &self)
    }
}

impl IntoReply for Location {
    fn into_reply(self) -> Reply {
        Reply::ok().with("location", &self)
    }
}

impl IntoReply for Booking {
    fn into_reply(self) -> Reply {
        Reply::ok().with("booking", &self)
    }
}

impl IntoReply for SlotToggle {
    fn into_reply(self) -> Reply {
        Reply::ok().with("newStatus", &self.new_status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Role, SlotStatus};

    #[test]
    fn test_success_flattens_payload() {
        let session = Session::synthesized("a@test.com", Role::User, "mock-jwt-1".into());
        let json = serde_json::to_value(Reply::from_result(Ok(session))).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["user"]["email"], "a@test.com");
        assert!(json.get("message").is_none());
    }

    #[test]
    fn test_domain_failure_keeps_message() {
        let reply = Reply::from_result::<()>(Err(Error::Forbidden("Cannot delete demo data".into())));
        assert!(!reply.success);
        assert_eq!(reply.message.as_deref(), Some("Cannot delete demo data"));
    }

    #[test]
    fn test_storage_failure_is_generic() {
        let reply = Reply::from_result::<()>(Err(Error::StoragePoisoned));
        assert!(!reply.success);
        assert_eq!(reply.message.as_deref(), Some(UNEXPECTED_FAILURE));
    }

    #[test]
    fn test_toggle_reply_shape() {
        let toggle = SlotToggle {
            slot_id: "A-1".into(),
            new_status: SlotStatus::Maintenance,
        };
        let json = serde_json::to_value(toggle.into_reply()).unwrap();
        assert_eq!(json["newStatus"], "MAINTENANCE");
    }
}
