//! Request DTOs for Web API.

use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::validation::not_empty_trimmed;

/// Folder creation request.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateFolderRequest {
    /// Parent folder, relative to the managed root (empty for the root).
    #[serde(default)]
    pub folder_path: String,
    /// Name of the new folder.
    #[validate(custom(function = "not_empty_trimmed", message = "Folder name is required"))]
    pub name: String,
}

/// Rename request.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RenameRequest {
    /// Current path of the item.
    #[validate(custom(function = "not_empty_trimmed", message = "Old path is required"))]
    pub old_path: String,
    /// New leaf name.
    #[validate(custom(function = "not_empty_trimmed", message = "New name cannot be empty"))]
    pub new_name: String,
}

/// Delete request.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct DeleteRequest {
    /// Path of the item to delete.
    #[validate(custom(function = "not_empty_trimmed", message = "Path is required"))]
    pub path: String,
}

/// Query parameters for the tree listing.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct TreeQuery {
    /// Folder to list, relative to the managed root (empty for the root).
    #[serde(default)]
    pub path: String,
}

/// Query parameters for the recent files view.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct RecentQuery {
    /// Maximum number of files (defaults to the configured limit).
    pub limit: Option<usize>,
}
