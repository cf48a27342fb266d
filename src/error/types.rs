//! Error types
//!
//! Defines domain-specific error types for each module of the file manager.

use std::io;
use thiserror::Error;

/// Storage module errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Path escapes the sandbox: {0}")]
    PathEscape(String),
    #[error("Invalid path: {0}")]
    InvalidPath(String),
    #[error("Directory not found: {0}")]
    DirectoryNotFound(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Not a file: {0}")]
    NotAFile(String),
    #[error("Destination already exists: {0}")]
    DestinationExists(String),
    #[error("The sandbox root itself cannot be renamed or deleted")]
    RootNotModifiable,
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Access gate errors
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Unauthorized")]
    Unauthorized,
}

/// General error that encompasses every failure the service can surface
#[derive(Debug, Error)]
pub enum FileManagerError {
    #[error("{0}")]
    Storage(#[from] StorageError),
    #[error("{0}")]
    Auth(#[from] AuthError),
    #[error("Bad request: {0}")]
    BadRequest(String),
    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),
    #[error("Worker task failed: {0}")]
    Task(String),
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl From<tokio::task::JoinError> for FileManagerError {
    fn from(error: tokio::task::JoinError) -> Self {
        FileManagerError::Task(error.to_string())
    }
}
