//! Error types for Twostep Auth.
//!
//! This module defines the `AuthError` enum which represents all error
//! cases surfaced by the authentication core. Verification failures
//! (wrong password, wrong code, unknown user) are *not* errors; they are
//! denied outcomes. Errors cover configuration problems and collaborator
//! failures only.

use thiserror::Error;

/// The main error type for Twostep Auth operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The authenticator is wired to an incompatible host environment.
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// No password hasher is registered under the requested name.
    #[error("Unknown password hasher: {name}")]
    UnknownHasher { name: String },

    /// No finder is registered under the requested name.
    #[error("Unknown finder: {name}")]
    UnknownFinder { name: String },

    /// A credential store operation failed.
    #[error("Store error: {message}")]
    Store { message: String },

    /// Password hashing failed.
    #[error("Hashing error: {message}")]
    Hashing { message: String },

    /// Serialization/deserialization failed.
    #[error("Serialization error: {message}")]
    Serialization { message: String },
}

impl AuthError {
    /// Creates a new configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Creates a new store error.
    pub fn store(message: impl Into<String>) -> Self {
        Self::Store {
            message: message.into(),
        }
    }

    /// Creates a new hashing error.
    pub fn hashing(message: impl Into<String>) -> Self {
        Self::Hashing {
            message: message.into(),
        }
    }

    /// Returns true for errors caused by how the core was wired up,
    /// as opposed to collaborator failures at runtime.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::Configuration { .. } | Self::UnknownHasher { .. } | Self::UnknownFinder { .. }
        )
    }
}

/// A Result type alias using AuthError.
pub type AuthResult<T> = Result<T, AuthError>;

impl From<serde_json::Error> for AuthError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            message: err.to_string(),
        }
    }
}
