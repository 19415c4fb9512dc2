//! User and session models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Account role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    User,
    Admin,
}

impl Role {
    /// Prefix used for human-readable account ids (`USER001`, `ADMIN005`)
    pub fn id_prefix(&self) -> &'static str {
        match self {
            Role::User => "USER",
            Role::Admin => "ADMIN",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::User => write!(f, "user"),
            Role::Admin => write!(f, "admin"),
        }
    }
}

/// A registered account, as stored in the user table
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub custom_id: String,
    pub email: String,
    pub password_hash: String,
    pub name: String,
    pub role: Role,
    #[serde(default)]
    pub wallet_balance: f64,
    #[serde(default)]
    pub loyalty_points: u32,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// `sequence` is the 1-based position of the account in the user table
    pub fn new(email: String, password_hash: String, role: Role, sequence: usize) -> Self {
        Self {
            id: Uuid::new_v4(),
            custom_id: format!("{}{:03}", role.id_prefix(), sequence),
            name: display_name(&email),
            email,
            password_hash,
            role,
            wallet_balance: 0.0,
            loyalty_points: 0,
            created_at: Utc::now(),
        }
    }

    pub fn profile(&self) -> UserProfile {
        UserProfile {
            name: self.name.clone(),
            email: self.email.clone(),
            wallet_balance: self.wallet_balance,
            loyalty_points: self.loyalty_points,
        }
    }
}

/// Name shown for an account: the local part of its email
pub fn display_name(email: &str) -> String {
    email.split('@').next().unwrap_or_default().to_string()
}

/// The signed-in identity. Never carries the password.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub id: Uuid,
    pub custom_id: String,
    pub email: String,
    pub name: String,
    pub role: Role,
    pub token: String,
    pub issued_at: DateTime<Utc>,
}

impl Session {
    pub fn for_user(user: &User, token: String) -> Self {
        Self {
            id: user.id,
            custom_id: user.custom_id.clone(),
            email: user.email.clone(),
            name: user.name.clone(),
            role: user.role,
            token,
            issued_at: Utc::now(),
        }
    }

    /// Session for an identity that has no row in the user table
    pub fn synthesized(email: &str, role: Role, token: String) -> Self {
        let id = Uuid::new_v4();
        Self {
            id,
            custom_id: format!("u_{}", id.simple()),
            email: email.to_string(),
            name: display_name(email),
            role,
            token,
            issued_at: Utc::now(),
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// Public account summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub name: String,
    pub email: String,
    pub wallet_balance: f64,
    pub loyalty_points: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_custom_id_uses_role_prefix() {
        let user = User::new("a@test.com".into(), "hash".into(), Role::User, 1);
        assert_eq!(user.custom_id, "USER001");
        assert_eq!(user.name, "a");

        let admin = User::new("boss@test.com".into(), "hash".into(), Role::Admin, 12);
        assert_eq!(admin.custom_id, "ADMIN012");
    }

    #[test]
    fn test_session_json_has_no_password() {
        let user = User::new("a@test.com".into(), "secret-hash".into(), Role::User, 1);
        let session = Session::for_user(&user, "mock-jwt-1".into());
        let json = serde_json::to_string(&session).unwrap();
        assert!(!json.contains("password"));
        assert!(!json.contains("secret-hash"));
        assert!(json.contains("\"token\":\"mock-jwt-1\""));
    }

    #[test]
    fn test_role_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"admin\"");
        assert_eq!(Role::User.to_string(), "user");
    }
}
