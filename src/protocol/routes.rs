//! Router assembly
//!
//! File routes always pass through the access gate. The two settings
//! routes do too unless `settings_require_auth` is turned off.

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::middleware::{from_fn, from_fn_with_state};
use axum::routing::{get, post};

use crate::middleware::{log_requests, require_access};
use crate::protocol::handlers;
use crate::server::AppState;

pub fn create_router(state: AppState) -> Router {
    let files = Router::new()
        .route("/", get(handlers::index))
        .route("/api/list", get(handlers::list_entries))
        .route("/upload", post(handlers::upload))
        .route("/files/{*path}", get(handlers::download))
        .route("/rename", post(handlers::rename_entry))
        .route("/delete", post(handlers::delete_entry))
        .route("/create-folder", post(handlers::create_folder))
        .route_layer(from_fn_with_state(state.clone(), require_access));

    let mut settings = Router::new()
        .route("/set-password", post(handlers::set_password))
        .route("/toggle-protection", post(handlers::toggle_protection));
    if state.config.settings_require_auth {
        settings = settings.route_layer(from_fn_with_state(state.clone(), require_access));
    }

    Router::new()
        .merge(files)
        .merge(settings)
        .layer(DefaultBodyLimit::max(state.config.max_upload_size_bytes()))
        .layer(from_fn(log_requests))
        .with_state(state)
}
