use super::form::read_upload_form;
use super::state::AppState;
use crate::errors::ApiError;
use crate::models::{DeleteQuery, DeleteResponse, ListQuery};
use axum::{
    extract::{Multipart, Query, State},
    response::Json,
};
use upgate_models::{UploadRequest, UploadResult};

/// `GET /api/upload?folder=` - public URLs stored under a folder
pub async fn list_uploads(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<String>>, ApiError> {
    let folder = query
        .folder
        .filter(|folder| !folder.is_empty())
        .unwrap_or_else(|| state.uploader.default_folder().to_string());

    let urls = state.uploader.list(&folder).await?;
    Ok(Json(urls))
}

/// `POST /api/upload` - multipart `files` plus optional `entityType` / `entityId`
///
/// Per-file failures are reported in the response body, never as an HTTP error.
pub async fn upload_files(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<Vec<UploadResult>>, ApiError> {
    let form = read_upload_form(multipart, state.max_file_size_bytes).await?;

    if form.files.is_empty() {
        return Err(ApiError::Validation("No files were sent to upload".to_string()));
    }

    let folder = state
        .uploader
        .folder_for(form.entity_type.as_deref(), form.entity_id.as_deref());

    tracing::info!(folder = %folder, count = form.files.len(), "Received upload batch");

    let requests = form
        .files
        .into_iter()
        .map(|file| UploadRequest::new(file.filename, file.content_type, file.data, folder.clone()))
        .collect();

    let results = state.uploader.upload_many(requests).await;
    Ok(Json(results))
}

/// `DELETE /api/upload?filename=` - accepts a public URL or a bare key
pub async fn delete_upload(
    State(state): State<AppState>,
    Query(query): Query<DeleteQuery>,
) -> Result<Json<DeleteResponse>, ApiError> {
    let filename = query
        .filename
        .filter(|name| !name.trim().is_empty())
        .ok_or_else(|| ApiError::Validation("Missing filename to delete".to_string()))?;

    let key = state.uploader.delete(&filename).await?;

    Ok(Json(DeleteResponse {
        message: format!("Deleted {}", filename),
        key,
    }))
}
