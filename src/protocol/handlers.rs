//! Request handlers for the file manager.
//!
//! Each handler resolves the client's relative paths inside the sandbox
//! and hands the work to `storage` on the blocking pool. Failures leave
//! as `FileManagerError`, which renders the structured failure body.

use axum::Json;
use axum::extract::multipart::MultipartRejection;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Multipart, Path, Query, State};
use axum::http::{StatusCode, header};
use axum::response::{Html, IntoResponse, Response};
use log::info;
use std::fs;
use std::sync::Arc;

use crate::error::{FileManagerError, StorageError};
use crate::protocol::responses::{
    CreateFolderRequest, DeleteRequest, ListParams, OperationResponse, PasswordRequest,
    RenameRequest, UploadParams,
};
use crate::server::AppState;
use crate::storage::{self, Entry, ListingMode, resolve};

const INDEX_HTML: &str = include_str!("../../assets/index.html");
const UPLOAD_FIELD: &str = "file";

/// Runs blocking filesystem work off the async workers
async fn run_blocking<T, F>(task: F) -> Result<T, FileManagerError>
where
    F: FnOnce() -> Result<T, StorageError> + Send + 'static,
    T: Send + 'static,
{
    Ok(tokio::task::spawn_blocking(task).await??)
}

fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, FileManagerError> {
    payload
        .map(|Json(body)| body)
        .map_err(|e| FileManagerError::BadRequest(e.body_text()))
}

fn multipart_failure(status: StatusCode, message: String) -> FileManagerError {
    if status == StatusCode::PAYLOAD_TOO_LARGE {
        FileManagerError::PayloadTooLarge(message)
    } else {
        FileManagerError::BadRequest(message)
    }
}

/// Serves the browser UI
pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// Lists a directory, shallow or recursive
pub async fn list_entries(
    State(state): State<AppState>,
    query: Result<Query<ListParams>, QueryRejection>,
) -> Result<Json<Vec<Entry>>, FileManagerError> {
    let Query(params) = query.map_err(|e| FileManagerError::BadRequest(e.body_text()))?;
    let mode = params
        .recursive
        .map(ListingMode::from_recursive_flag)
        .unwrap_or(state.config.listing_mode);
    let dir = params.dir.unwrap_or_default();
    let root = Arc::clone(&state.root);

    let entries = run_blocking(move || {
        let directory = resolve(&root, &dir)?;
        storage::list(&root, &directory, mode)
    })
    .await?;

    Ok(Json(entries))
}

/// Stores the multipart `file` field in the requested directory
pub async fn upload(
    State(state): State<AppState>,
    query: Result<Query<UploadParams>, QueryRejection>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<OperationResponse>, FileManagerError> {
    let Query(params) = query.map_err(|e| FileManagerError::BadRequest(e.body_text()))?;
    let mut multipart = multipart.map_err(|e| multipart_failure(e.status(), e.body_text()))?;

    let mut upload = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_failure(e.status(), e.body_text()))?
    {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }
        let file_name = field.file_name().unwrap_or_default().to_string();
        let contents = field
            .bytes()
            .await
            .map_err(|e| multipart_failure(e.status(), e.body_text()))?;
        upload = Some((file_name, contents));
        break;
    }

    let (file_name, contents) = upload.ok_or_else(|| {
        FileManagerError::BadRequest(format!("missing multipart field '{}'", UPLOAD_FIELD))
    })?;

    let dir = params.dir.unwrap_or_default();
    let root = Arc::clone(&state.root);
    let stored = run_blocking(move || {
        let directory = resolve(&root, &dir)?;
        storage::store_file(&root, &directory, &file_name, &contents)
    })
    .await?;

    Ok(Json(OperationResponse::ok().with_path(stored.relative_path)))
}

/// Sends a file back with a guessed content type
pub async fn download(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Response, FileManagerError> {
    let Path(path) = path.map_err(|e| FileManagerError::BadRequest(e.body_text()))?;
    let root = Arc::clone(&state.root);
    let (file_path, contents) = run_blocking(move || {
        let absolute = resolve(&root, &path)?;
        let file_path = storage::prepare_file_retrieval(&root, &absolute)?;
        let contents = fs::read(&file_path)?;
        Ok((file_path, contents))
    })
    .await?;

    let mime = mime_guess::from_path(&file_path).first_or_octet_stream();
    Ok(([(header::CONTENT_TYPE, mime.to_string())], contents).into_response())
}

pub async fn rename_entry(
    State(state): State<AppState>,
    payload: Result<Json<RenameRequest>, JsonRejection>,
) -> Result<Json<OperationResponse>, FileManagerError> {
    let request = json_body(payload)?;
    let root = Arc::clone(&state.root);

    run_blocking(move || {
        let from = resolve(&root, &request.old_name)?;
        let to = resolve(&root, &request.new_name)?;
        storage::rename(&root, &from, &to)
    })
    .await?;

    Ok(Json(OperationResponse::ok()))
}

pub async fn delete_entry(
    State(state): State<AppState>,
    payload: Result<Json<DeleteRequest>, JsonRejection>,
) -> Result<Json<OperationResponse>, FileManagerError> {
    let request = json_body(payload)?;
    let root = Arc::clone(&state.root);

    run_blocking(move || {
        let path = resolve(&root, &request.path)?;
        storage::delete(&root, &path)
    })
    .await?;

    Ok(Json(OperationResponse::ok()))
}

pub async fn create_folder(
    State(state): State<AppState>,
    payload: Result<Json<CreateFolderRequest>, JsonRejection>,
) -> Result<Json<OperationResponse>, FileManagerError> {
    let request = json_body(payload)?;
    let root = Arc::clone(&state.root);

    run_blocking(move || {
        let path = resolve(&root, &request.name)?;
        storage::create_folder(&root, &path)
    })
    .await?;

    Ok(Json(OperationResponse::ok()))
}

pub async fn set_password(
    State(state): State<AppState>,
    payload: Result<Json<PasswordRequest>, JsonRejection>,
) -> Result<Json<OperationResponse>, FileManagerError> {
    let request = json_body(payload)?;
    state.gate.set_password(request.password).await;
    info!("Access password updated");
    Ok(Json(OperationResponse::ok()))
}

pub async fn toggle_protection(State(state): State<AppState>) -> Json<OperationResponse> {
    let is_protected = state.gate.toggle_protection().await;
    info!(
        "Password protection {}",
        if is_protected { "enabled" } else { "disabled" }
    );
    Json(OperationResponse::ok().with_protection(is_protected))
}
