//! Access control
//!
//! Holds the shared password/protection pair and extracts the credential
//! a client presents with each request.

pub mod credentials;
pub mod gate;

pub use credentials::basic_auth_password;
pub use gate::{AccessGate, AccessState, AuthDecision, SharedAccessGate};
