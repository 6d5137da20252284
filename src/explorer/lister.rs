//! Recursive directory listing.

use std::fs;
use std::io;
use std::path::Path;

use super::entry::{Entry, FileEntry, FolderEntry};
use super::path::{is_missing, RelativePath};
use super::sort::sort_by_last_update;
use crate::{FiledeckError, Result};

/// List `path` below `root` as a folder tree.
///
/// `root_name` names the result when `path` is the root itself.
///
/// A child that cannot be inspected is left out and a subfolder that cannot
/// be read is listed with no children, so the result can be a strict subset
/// of the tree on disk. Only a failure on `path` itself is an error.
pub fn list_tree(root: &Path, path: &RelativePath, root_name: &str) -> Result<FolderEntry> {
    let dir = path.resolve_unlinked(root)?;

    let metadata = match fs::metadata(&dir) {
        Ok(metadata) => metadata,
        Err(e) if is_missing(&e) => {
            return Err(FiledeckError::NotFound(format!("directory '{path}'")));
        }
        Err(e) => return Err(e.into()),
    };
    if !metadata.is_dir() {
        return Err(FiledeckError::InvalidPath(format!(
            "'{path}' is not a directory"
        )));
    }

    let children = read_children(&dir, path)?;
    let name = path.leaf().unwrap_or(root_name).to_string();

    Ok(FolderEntry::from_metadata(path, name, &metadata, children))
}

fn read_children(dir: &Path, path: &RelativePath) -> io::Result<Vec<Entry>> {
    let mut entries = Vec::new();

    for dir_entry in fs::read_dir(dir)? {
        let dir_entry = match dir_entry {
            Ok(dir_entry) => dir_entry,
            Err(e) => {
                tracing::warn!(dir = %dir.display(), error = %e, "Skipping unreadable entry");
                continue;
            }
        };

        let name = dir_entry.file_name().to_string_lossy().into_owned();
        let child_path = path.child(&name);

        let metadata = match fs::metadata(dir_entry.path()) {
            Ok(metadata) => metadata,
            Err(e) => {
                tracing::warn!(path = %child_path, error = %e, "Skipping entry without metadata");
                continue;
            }
        };

        if metadata.is_dir() {
            let children = if is_symlink(&dir_entry) {
                Vec::new()
            } else {
                read_children(&dir_entry.path(), &child_path).unwrap_or_else(|e| {
                    tracing::warn!(path = %child_path, error = %e, "Listing folder without children");
                    Vec::new()
                })
            };
            entries.push(Entry::Folder(FolderEntry::from_metadata(
                &child_path,
                name,
                &metadata,
                children,
            )));
        } else {
            entries.push(Entry::File(FileEntry::from_metadata(
                &child_path,
                name,
                &metadata,
            )));
        }
    }

    sort_by_last_update(&mut entries, true);
    Ok(entries)
}

// Linked directories are listed but never descended, so a link cycle cannot
// recurse forever.
fn is_symlink(dir_entry: &fs::DirEntry) -> bool {
    dir_entry
        .file_type()
        .map(|file_type| file_type.is_symlink())
        .unwrap_or(false)
}
