//! OpenAPI document for the Filedeck web API.

use utoipa::OpenApi;

use crate::explorer::{Entry, EntryKind, FileEntry, FolderEntry, RenameOutcome};
use crate::web::dto::{CreateFolderRequest, DeleteRequest, MessageResponse, RenameRequest};
use crate::web::handlers;

/// Generated API documentation served under `/api-docs/openapi.json`.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Filedeck API",
        description = "Browse and manage files under a single managed root directory"
    ),
    paths(
        handlers::explorer::list_tree,
        handlers::explorer::list_recent,
        handlers::explorer::create_folder,
        handlers::explorer::upload_file,
        handlers::explorer::rename_item,
        handlers::explorer::delete_item,
        handlers::files::serve_file,
    ),
    components(schemas(
        Entry,
        EntryKind,
        FileEntry,
        FolderEntry,
        RenameOutcome,
        CreateFolderRequest,
        RenameRequest,
        DeleteRequest,
        MessageResponse,
    )),
    tags(
        (name = "explorer", description = "Directory tree and item management"),
        (name = "files", description = "Raw file content")
    )
)]
pub struct ApiDoc;
