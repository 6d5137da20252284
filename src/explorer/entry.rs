//! Entry descriptors.
//!
//! Entries are built fresh for every read and discarded afterwards; the
//! backing directory tree is the only persistent state. An entry's `id` is
//! its root-relative path, so it stays meaningful across requests as long
//! as the item is not moved.

use std::fs::Metadata;
use std::time::SystemTime;

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use super::mime;
use super::path::RelativePath;

/// Identifier of the managed root folder.
pub const ROOT_ID: &str = "root";

/// Kind of an entry.
///
/// Folders order before files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Folder,
    File,
}

/// A file descriptor.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FileEntry {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: EntryKind,
    /// Root-relative path with `/` separators.
    pub path: String,
    /// Size in bytes.
    pub size: Option<u64>,
    /// Lowercased extension without the dot.
    pub extension: String,
    pub mime_type: String,
    pub previewable: bool,
    pub created_at: Option<DateTime<Utc>>,
    pub modified_at: Option<DateTime<Utc>>,
}

/// A folder descriptor with its children.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FolderEntry {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: EntryKind,
    /// Root-relative path with `/` separators.
    pub path: String,
    pub children: Vec<Entry>,
    pub created_at: Option<DateTime<Utc>>,
    pub modified_at: Option<DateTime<Utc>>,
}

/// A file or folder.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(untagged)]
pub enum Entry {
    File(FileEntry),
    Folder(FolderEntry),
}

fn entry_id(path: &RelativePath) -> String {
    if path.is_root() {
        ROOT_ID.to_string()
    } else {
        path.to_string()
    }
}

fn timestamp(time: std::io::Result<SystemTime>) -> Option<DateTime<Utc>> {
    time.ok().map(DateTime::<Utc>::from)
}

impl FileEntry {
    fn build(
        path: &RelativePath,
        name: String,
        size: Option<u64>,
        created_at: Option<DateTime<Utc>>,
        modified_at: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            id: entry_id(path),
            extension: mime::extension(&name),
            mime_type: mime::mime_type(&name).to_string(),
            previewable: mime::is_previewable(&name),
            name,
            kind: EntryKind::File,
            path: path.to_string(),
            size,
            created_at,
            modified_at,
        }
    }

    /// Describe a file from store metadata.
    pub fn from_metadata(path: &RelativePath, name: String, metadata: &Metadata) -> Self {
        Self::build(
            path,
            name,
            Some(metadata.len()),
            timestamp(metadata.created()),
            timestamp(metadata.modified()),
        )
    }

    /// Describe a file that was just written.
    pub fn written_now(path: &RelativePath, name: String, size: u64) -> Self {
        let now = Utc::now();
        Self::build(path, name, Some(size), Some(now), Some(now))
    }
}

impl FolderEntry {
    /// Describe a folder from store metadata.
    pub fn from_metadata(
        path: &RelativePath,
        name: String,
        metadata: &Metadata,
        children: Vec<Entry>,
    ) -> Self {
        Self {
            id: entry_id(path),
            name,
            kind: EntryKind::Folder,
            path: path.to_string(),
            children,
            created_at: timestamp(metadata.created()),
            modified_at: timestamp(metadata.modified()),
        }
    }
}

impl Entry {
    pub fn kind(&self) -> EntryKind {
        match self {
            Entry::File(_) => EntryKind::File,
            Entry::Folder(_) => EntryKind::Folder,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Entry::File(file) => &file.name,
            Entry::Folder(folder) => &folder.name,
        }
    }

    pub fn modified_at(&self) -> Option<DateTime<Utc>> {
        match self {
            Entry::File(file) => file.modified_at,
            Entry::Folder(folder) => folder.modified_at,
        }
    }

    /// All files in this subtree, in pre-order. Folders contribute only
    /// their descendants.
    pub fn into_files(self) -> Vec<FileEntry> {
        let mut files = Vec::new();
        self.collect_files(&mut files);
        files
    }

    fn collect_files(self, out: &mut Vec<FileEntry>) {
        match self {
            Entry::File(file) => out.push(file),
            Entry::Folder(folder) => {
                for child in folder.children {
                    child.collect_files(out);
                }
            }
        }
    }
}
