//! File explorer core for Filedeck.
//!
//! This module provides the directory-tree facade over the managed root:
//! - Recursive listing and the most-recently-modified view
//! - Listing order (most recent first, folders first on ties)
//! - Folder creation, upload, rename and delete
//! - Name sanitizing, MIME classification and root containment

mod entry;
mod lister;
mod mime;
mod path;
mod recent;
mod sanitize;
mod service;
mod sort;

pub use entry::{Entry, EntryKind, FileEntry, FolderEntry, ROOT_ID};
pub use lister::list_tree;
pub use mime::{content_type, extension, is_previewable, mime_type, DEFAULT_MIME_TYPE};
pub use path::RelativePath;
pub use recent::{recent_files, DEFAULT_RECENT_LIMIT};
pub use sanitize::{
    clean_file_name, safe_file_name, validate_item_name, MAX_NAME_LENGTH, RESERVED_CHARS,
};
pub use service::{Explorer, FileContent, RenameOutcome};
pub use sort::{compare, sort_by_last_update, SortKey};
