//! Most recently modified files across the whole tree.

use std::path::Path;

use super::entry::{Entry, FileEntry};
use super::lister::list_tree;
use super::path::RelativePath;
use super::sort::sort_by_last_update;
use crate::Result;

/// Default number of recent files returned.
pub const DEFAULT_RECENT_LIMIT: usize = 20;

/// Up to `limit` files from anywhere below `root`, most recent first.
///
/// Folders contribute only their descendants. Files without a modification
/// time are left out. Ties fall back to the name, then the path.
pub fn recent_files(root: &Path, limit: usize) -> Result<Vec<FileEntry>> {
    if limit == 0 {
        return Ok(Vec::new());
    }

    let tree = list_tree(root, &RelativePath::root(), "")?;
    let mut files: Vec<FileEntry> = Entry::Folder(tree)
        .into_files()
        .into_iter()
        .filter(|file| file.modified_at.is_some())
        .collect();

    files.sort_by(|a, b| a.path.cmp(&b.path));
    sort_by_last_update(&mut files, false);
    files.truncate(limit);

    Ok(files)
}
