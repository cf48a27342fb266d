//! HTTP protocol surface
//!
//! Routes, request handlers and the JSON bodies they exchange.

pub mod handlers;
pub mod responses;
pub mod routes;

pub use responses::OperationResponse;
pub use routes::create_router;
