//! Filedeck - a browser file explorer backend.
//!
//! Serves a tree view, a recent files view and basic file management
//! (create folder, upload, rename, delete) over a single managed root
//! directory.

pub mod config;
pub mod error;
pub mod explorer;
pub mod logging;
pub mod web;

pub use config::Config;
pub use error::{FiledeckError, Result};
pub use explorer::{
    Entry, EntryKind, Explorer, FileContent, FileEntry, FolderEntry, RelativePath, RenameOutcome,
};
