//! # Twostep Auth Core
//!
//! This crate provides the foundational types and traits for the Twostep
//! Auth system: the open `UserRecord` map, transient `Credentials`, the
//! error type, and the trait interfaces behind which the host framework's
//! credential store, session, and auth coordinator live.

pub mod coordinator;
pub mod error;
pub mod request;
pub mod session;
pub mod store;
pub mod types;

// Re-export commonly used items at the crate root
pub use coordinator::Coordinator;
pub use error::{AuthError, AuthResult};
pub use request::AuthRequest;
pub use session::SessionStore;
pub use store::CredentialStore;
pub use types::{Credentials, UserRecord};
