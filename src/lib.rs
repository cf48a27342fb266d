pub mod auth;
pub mod config;
pub mod error;
pub mod middleware;
pub mod protocol;
pub mod server;
pub mod storage;

pub use server::{AppState, Server};
