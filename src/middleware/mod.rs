//! Server middleware
//!
//! Request logging and the access gate check.

pub mod access;
pub mod logging;

pub use access::require_access;
pub use logging::log_requests;
