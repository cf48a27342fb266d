//! Server core functionality
//!
//! Bootstraps the sandbox, binds the listener and owns the shared state.

pub mod core;
pub mod state;

pub use self::core::Server;
pub use state::AppState;
