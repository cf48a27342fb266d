//! Access gate
//!
//! The password and the protection flag live in one record behind one
//! lock, so no reader ever pairs a new flag with an old password or the
//! other way round.

use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::AuthError;

/// The shared (password, protection) pair
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccessState {
    pub password: String,
    pub protection_enabled: bool,
}

/// Outcome of a credential check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthDecision {
    Allow,
    Deny,
}

impl AccessState {
    /// Open when protection is off, otherwise an exact byte match is needed
    pub fn authorize(&self, credential: Option<&str>) -> AuthDecision {
        if !self.protection_enabled {
            return AuthDecision::Allow;
        }
        match credential {
            Some(provided) if provided.as_bytes() == self.password.as_bytes() => {
                AuthDecision::Allow
            }
            _ => AuthDecision::Deny,
        }
    }
}

/// Process-wide access control, owned by the server and shared by handlers.
///
/// Starts with an empty password and protection disabled. Nothing is
/// persisted; a restart resets it.
#[derive(Debug, Default)]
pub struct AccessGate {
    state: RwLock<AccessState>,
}

/// Thread-safe handle passed to request handlers
pub type SharedAccessGate = Arc<AccessGate>;

impl AccessGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn authorize(&self, credential: Option<&str>) -> AuthDecision {
        self.state.read().await.authorize(credential)
    }

    /// Same as `authorize`, as a `Result` for `?` propagation
    pub async fn check(&self, credential: Option<&str>) -> Result<(), AuthError> {
        match self.authorize(credential).await {
            AuthDecision::Allow => Ok(()),
            AuthDecision::Deny => Err(AuthError::Unauthorized),
        }
    }

    /// Replaces the password. Whether the caller must be authorized first is
    /// decided by the HTTP layer.
    pub async fn set_password(&self, new_password: String) {
        self.state.write().await.password = new_password;
    }

    /// Flips protection and returns the new value
    pub async fn toggle_protection(&self) -> bool {
        let mut state = self.state.write().await;
        state.protection_enabled = !state.protection_enabled;
        state.protection_enabled
    }

    /// Replaces password and protection together in one critical section
    pub async fn configure(&self, password: String, protection_enabled: bool) {
        *self.state.write().await = AccessState {
            password,
            protection_enabled,
        };
    }

    /// A consistent copy of both fields
    pub async fn snapshot(&self) -> AccessState {
        self.state.read().await.clone()
    }
}
