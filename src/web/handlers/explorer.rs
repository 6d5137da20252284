//! Explorer handlers for Web API.

use axum::{
    extract::{Multipart, Query, State},
    Json,
};
use std::sync::Arc;

use crate::explorer::{EntryKind, FileEntry, FolderEntry, RenameOutcome};
use crate::web::dto::{
    ApiResponse, CreateFolderRequest, DeleteRequest, MessageResponse, RecentQuery, RenameRequest,
    TreeQuery, ValidatedJson,
};
use crate::web::error::ApiError;
use crate::web::handlers::AppState;

/// GET /api/filesystem - List a folder tree.
#[utoipa::path(
    get,
    path = "/api/filesystem",
    tag = "explorer",
    params(TreeQuery),
    responses(
        (status = 200, description = "Folder tree", body = FolderEntry),
        (status = 400, description = "Path is not a directory or escapes the root"),
        (status = 404, description = "Directory not found")
    )
)]
pub async fn list_tree(
    State(state): State<Arc<AppState>>,
    Query(query): Query<TreeQuery>,
) -> Result<Json<ApiResponse<FolderEntry>>, ApiError> {
    let tree = state
        .explorer
        .list_tree(&query.path)
        .map_err(|e| ApiError::from_explorer(e, "Failed to read filesystem"))?;

    Ok(Json(ApiResponse::new(tree)))
}

/// GET /api/recent - List the most recently modified files.
#[utoipa::path(
    get,
    path = "/api/recent",
    tag = "explorer",
    params(RecentQuery),
    responses(
        (status = 200, description = "Recent files, most recent first", body = Vec<FileEntry>)
    )
)]
pub async fn list_recent(
    State(state): State<Arc<AppState>>,
    Query(query): Query<RecentQuery>,
) -> Result<Json<ApiResponse<Vec<FileEntry>>>, ApiError> {
    let limit = query.limit.unwrap_or(state.recent_limit);

    let files = state
        .explorer
        .list_recent(limit)
        .map_err(|e| ApiError::from_explorer(e, "Failed to fetch recent files"))?;

    Ok(Json(ApiResponse::new(files)))
}

/// POST /api/filesystem - Create a folder.
#[utoipa::path(
    post,
    path = "/api/filesystem",
    tag = "explorer",
    request_body = CreateFolderRequest,
    responses(
        (status = 200, description = "Folder created", body = FolderEntry),
        (status = 400, description = "Invalid folder name or path"),
        (status = 409, description = "Folder already exists")
    )
)]
pub async fn create_folder(
    State(state): State<Arc<AppState>>,
    ValidatedJson(req): ValidatedJson<CreateFolderRequest>,
) -> Result<Json<ApiResponse<FolderEntry>>, ApiError> {
    let folder = state
        .explorer
        .create_folder(&req.folder_path, &req.name)
        .map_err(|e| ApiError::from_explorer(e, "Failed to create folder"))?;

    Ok(Json(ApiResponse::new(folder)))
}

/// POST /api/upload - Upload a file.
///
/// Request body: multipart/form-data with a "file" field and optional
/// "folderPath" and "name" fields.
#[utoipa::path(
    post,
    path = "/api/upload",
    tag = "explorer",
    request_body(content_type = "multipart/form-data", description = "file, folderPath?, name?"),
    responses(
        (status = 200, description = "File uploaded", body = FileEntry),
        (status = 400, description = "No file provided, invalid name or file too large"),
        (status = 409, description = "A file with the stored name already exists")
    )
)]
pub async fn upload_file(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Json<ApiResponse<FileEntry>>, ApiError> {
    let mut folder_path = String::new();
    let mut provided_name: Option<String> = None;
    let mut filename: Option<String> = None;
    let mut content: Option<Vec<u8>> = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        tracing::warn!("Failed to read multipart field: {}", e);
        ApiError::bad_request("Invalid multipart data")
    })? {
        let name = field.name().unwrap_or("").to_string();

        match name.as_str() {
            "file" => {
                filename = field.file_name().map(|s| s.to_string());
                content = Some(
                    field
                        .bytes()
                        .await
                        .map_err(|e| {
                            tracing::warn!("Failed to read file content: {}", e);
                            ApiError::bad_request("Failed to read file")
                        })?
                        .to_vec(),
                );
            }
            "folderPath" => {
                folder_path = field.text().await.map_err(|e| {
                    tracing::warn!("Failed to read folder path: {}", e);
                    ApiError::bad_request("Invalid folder path")
                })?;
            }
            "name" => {
                provided_name = Some(field.text().await.map_err(|e| {
                    tracing::warn!("Failed to read file name: {}", e);
                    ApiError::bad_request("Invalid file name")
                })?);
            }
            _ => {}
        }
    }

    let content = content.ok_or_else(|| ApiError::bad_request("No file provided"))?;

    if content.len() as u64 > state.max_upload_size {
        let max_mb = state.max_upload_size / 1024 / 1024;
        return Err(ApiError::bad_request(format!(
            "File too large (max {}MB)",
            max_mb
        )));
    }

    let suggested_name = provided_name
        .filter(|name| !name.trim().is_empty())
        .or(filename)
        .ok_or_else(|| ApiError::bad_request("No file name provided"))?;

    let file = state
        .explorer
        .upload_file(&folder_path, &content, &suggested_name)
        .map_err(|e| ApiError::from_explorer(e, "Failed to save file to server"))?;

    Ok(Json(ApiResponse::new(file)))
}

/// PATCH /api/rename - Rename a file or folder.
#[utoipa::path(
    patch,
    path = "/api/rename",
    tag = "explorer",
    request_body = RenameRequest,
    responses(
        (status = 200, description = "Item renamed", body = RenameOutcome),
        (status = 400, description = "Blank or invalid name"),
        (status = 404, description = "File or folder not found"),
        (status = 409, description = "A file or folder with this name already exists")
    )
)]
pub async fn rename_item(
    State(state): State<Arc<AppState>>,
    ValidatedJson(req): ValidatedJson<RenameRequest>,
) -> Result<Json<ApiResponse<RenameOutcome>>, ApiError> {
    let outcome = state
        .explorer
        .rename_item(&req.old_path, &req.new_name)
        .map_err(|e| ApiError::from_explorer(e, "Failed to rename item"))?;

    Ok(Json(ApiResponse::new(outcome)))
}

/// DELETE /api/delete - Delete a file, or a folder with everything in it.
#[utoipa::path(
    delete,
    path = "/api/delete",
    tag = "explorer",
    request_body = DeleteRequest,
    responses(
        (status = 200, description = "Item deleted", body = MessageResponse),
        (status = 400, description = "Invalid path"),
        (status = 404, description = "File or folder not found")
    )
)]
pub async fn delete_item(
    State(state): State<Arc<AppState>>,
    ValidatedJson(req): ValidatedJson<DeleteRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    let kind = state
        .explorer
        .delete_item(&req.path)
        .map_err(|e| ApiError::from_explorer(e, "Failed to delete item"))?;

    let message = match kind {
        EntryKind::Folder => "Folder deleted successfully",
        EntryKind::File => "File deleted successfully",
    };

    Ok(Json(MessageResponse::new(message)))
}
