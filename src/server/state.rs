//! Shared application state
//!
//! Everything a request handler needs, owned by the server and cloned
//! cheaply into each request.

use std::sync::Arc;

use crate::auth::{AccessGate, SharedAccessGate};
use crate::config::ServerConfig;
use crate::storage::SandboxRoot;

#[derive(Debug, Clone)]
pub struct AppState {
    pub root: Arc<SandboxRoot>,
    pub gate: SharedAccessGate,
    pub config: Arc<ServerConfig>,
}

impl AppState {
    /// Fresh state with an open access gate
    pub fn new(root: SandboxRoot, config: ServerConfig) -> Self {
        Self {
            root: Arc::new(root),
            gate: Arc::new(AccessGate::new()),
            config: Arc::new(config),
        }
    }
}
