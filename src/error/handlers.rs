//! Error handlers
//!
//! Converts errors into the structured failure responses sent to clients.

use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::Json;
use log::{error, warn};

use crate::error::types::{AuthError, FileManagerError, StorageError};
use crate::protocol::responses::OperationResponse;

pub const AUTH_REALM: &str = r#"Basic realm="Restricted""#;

/// Convert error to HTTP status code
pub fn status_code(err: &FileManagerError) -> StatusCode {
    match err {
        FileManagerError::Storage(e) => match e {
            StorageError::PathEscape(_) => StatusCode::FORBIDDEN,
            StorageError::InvalidPath(_)
            | StorageError::NotAFile(_)
            | StorageError::RootNotModifiable => StatusCode::BAD_REQUEST,
            StorageError::DirectoryNotFound(_) | StorageError::NotFound(_) => {
                StatusCode::NOT_FOUND
            }
            StorageError::DestinationExists(_) => StatusCode::CONFLICT,
            StorageError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        },
        FileManagerError::Auth(AuthError::Unauthorized) => StatusCode::UNAUTHORIZED,
        FileManagerError::BadRequest(_) => StatusCode::BAD_REQUEST,
        FileManagerError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
        FileManagerError::Task(_) | FileManagerError::Config(_) | FileManagerError::Io(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

/// Log an error at a level matching its severity
pub fn log_error(err: &FileManagerError) {
    if status_code(err).is_server_error() {
        error!("Request failed: {}", err);
    } else {
        warn!("Request rejected: {}", err);
    }
}

impl IntoResponse for FileManagerError {
    fn into_response(self) -> Response {
        log_error(&self);
        let status = status_code(&self);
        let mut response = (status, Json(OperationResponse::failure(self.to_string()))).into_response();
        if status == StatusCode::UNAUTHORIZED {
            response
                .headers_mut()
                .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static(AUTH_REALM));
        }
        response
    }
}
