//! Access middleware
//!
//! Rejects requests before any path is resolved when protection is on and
//! the presented password does not match.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;

use crate::auth::basic_auth_password;
use crate::error::FileManagerError;
use crate::server::AppState;

pub async fn require_access(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, FileManagerError> {
    let credential = basic_auth_password(request.headers());
    state.gate.check(credential.as_deref()).await?;
    Ok(next.run(request).await)
}
