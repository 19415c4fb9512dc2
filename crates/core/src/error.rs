//! Error types for ParkEase Core

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    Authentication(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),

    #[error("Password hashing failed: {0}")]
    PasswordHash(String),

    #[error("Storage lock poisoned")]
    StoragePoisoned,
}

/// Coarse classification used when surfacing errors to callers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Conflict,
    Auth,
    NotFound,
    Forbidden,
    /// Storage or other infrastructure failure
    Unexpected,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Validation(_) => ErrorKind::Validation,
            Error::Conflict(_) => ErrorKind::Conflict,
            Error::Authentication(_) => ErrorKind::Auth,
            Error::NotFound(_) => ErrorKind::NotFound,
            Error::Forbidden(_) => ErrorKind::Forbidden,
            Error::Database(_)
            | Error::Io(_)
            | Error::Serialization(_)
            | Error::Config(_)
            | Error::PasswordHash(_)
            | Error::StoragePoisoned => ErrorKind::Unexpected,
        }
    }

    /// True for errors the caller can act on (bad input, duplicates, ...)
    pub fn is_domain(&self) -> bool {
        self.kind() != ErrorKind::Unexpected
    }
}

pub type Result<T> = std::result::Result<T, Error>;
