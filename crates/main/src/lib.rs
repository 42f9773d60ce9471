//! # Twostep Auth
//!
//! Two-step authentication for Rust: a username/password check backed by
//! a time-based one-time code for users that carry a secret.
//!
//! The heart of the system is [`FormAuthenticator`], a state machine
//! that extracts credentials from a request (or from pending-login
//! session state), verifies the password under a selectable hashing
//! scheme, and, when the matched record carries a secret, drives the
//! one-time-code round-trip through the host's coordinator hooks.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use twostep_auth::prelude::*;
//! use twostep_auth_memory::{MemoryCredentialStore, MemorySession};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), AuthError> {
//!     let store = Arc::new(MemoryCredentialStore::new());
//!     let auth = FormAuthenticator::new(
//!         AuthenticatorConfig::default(),
//!         store,
//!         host_coordinator,
//!     )?;
//!
//!     let session = MemorySession::new();
//!     let request = AuthRequest::new()
//!         .with_field("username", "mariano")
//!         .with_field("password", "password");
//!
//!     match auth.authenticate(&request, &session).await? {
//!         AuthOutcome::Authenticated { user, .. } => println!("welcome {user:?}"),
//!         outcome => println!("not yet: {outcome:?}"),
//!     }
//!     Ok(())
//! }
//! ```

// Re-export core types
pub use twostep_auth_core::*;

// Re-export the authenticator and its configuration
pub use twostep_auth_form::{
    AuthOutcome, AuthenticatorConfig, FieldMapping, FormAuthenticator, RawCredentials,
    CODE_FIELD, INVALID_CODE_MESSAGE, PENDING_CREDENTIALS_KEY,
};

// Re-export hashing schemes and the code verifier
pub use twostep_auth_hashers::{DefaultHasher, HasherRegistry, LegacyHasher, PasswordHasher};
pub use twostep_auth_totp::TotpVerifier;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use twostep_auth_core::error::{AuthError, AuthResult};
    pub use twostep_auth_core::{
        AuthRequest, Coordinator, CredentialStore, Credentials, SessionStore, UserRecord,
    };
    pub use twostep_auth_form::{AuthOutcome, AuthenticatorConfig, FormAuthenticator};
    pub use twostep_auth_hashers::{HasherRegistry, PasswordHasher};
    pub use twostep_auth_totp::TotpVerifier;
}
