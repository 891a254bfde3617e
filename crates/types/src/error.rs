//! Error types shared by storage backends and remote clients.

use std::io;

use thiserror::Error;

/// Failure reported by a backend `list`, `create`, `read`, or `update` call.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BackendError {
    #[error("{path} was not found")]
    NotFound { path: String },

    #[error("{path} already exists")]
    Conflict { path: String },

    #[error("permission denied: {path}")]
    PermissionDenied { path: String },

    #[error("invalid name: {name}")]
    InvalidName { name: String },

    #[error("operation cancelled")]
    Cancelled,

    #[error("I/O error on {path}: {message}")]
    Io { path: String, message: String },

    #[error("serialization error: {message}")]
    Serialization { message: String },
}

impl BackendError {
    pub fn not_found(path: impl Into<String>) -> Self {
        Self::NotFound { path: path.into() }
    }

    pub fn conflict(path: impl Into<String>) -> Self {
        Self::Conflict { path: path.into() }
    }

    pub fn invalid_name(name: impl Into<String>) -> Self {
        Self::InvalidName { name: name.into() }
    }

    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization { message: message.into() }
    }

    /// Maps an I/O error raised while touching `path` onto the backend taxonomy.
    pub fn from_io(path: impl Into<String>, error: io::Error) -> Self {
        let path = path.into();
        match error.kind() {
            io::ErrorKind::NotFound => Self::NotFound { path },
            io::ErrorKind::AlreadyExists => Self::Conflict { path },
            io::ErrorKind::PermissionDenied => Self::PermissionDenied { path },
            _ => Self::Io {
                path,
                message: error.to_string(),
            },
        }
    }
}

/// Failure of a remote login flow. Cloneable so concurrent waiters can share one outcome.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("login to {backend} was rejected: {reason}")]
    Rejected { backend: String, reason: String },

    #[error("login to {backend} was cancelled")]
    Cancelled { backend: String },
}

impl AuthError {
    pub fn rejected(backend: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Rejected {
            backend: backend.into(),
            reason: reason.into(),
        }
    }

    pub fn cancelled(backend: impl Into<String>) -> Self {
        Self::Cancelled { backend: backend.into() }
    }
}
