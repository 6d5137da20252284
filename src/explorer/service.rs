//! Explorer service for Filedeck.
//!
//! All reads and mutations against the managed root go through
//! [`Explorer`]. Every argument path is parsed into a [`RelativePath`]
//! before the store is touched, so nothing outside the root can be read
//! or changed.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::Utc;
use serde::Serialize;
use utoipa::ToSchema;

use super::entry::{EntryKind, FileEntry, FolderEntry};
use super::lister::list_tree;
use super::path::{is_missing, RelativePath};
use super::recent::recent_files;
use super::sanitize::{safe_file_name, validate_item_name};
use crate::{FiledeckError, Result};

/// Result of a successful rename.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RenameOutcome {
    pub old_path: String,
    pub new_path: String,
    pub new_name: String,
}

/// A file read back for preview or download.
#[derive(Debug, Clone)]
pub struct FileContent {
    pub name: String,
    pub content: Vec<u8>,
}

/// Facade over the managed root directory.
///
/// The root is the only state; the value is cheap to clone and safe to share
/// between request handlers.
#[derive(Debug, Clone)]
pub struct Explorer {
    /// Managed root directory.
    root: PathBuf,
    /// Whether uploads get a `_<millis>` suffix.
    timestamp_uploads: bool,
}

impl Explorer {
    /// Create an explorer over `root`.
    ///
    /// The root directory will be created if it doesn't exist.
    pub fn new(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root)?;

        Ok(Self {
            root,
            timestamp_uploads: true,
        })
    }

    /// Enable or disable the upload name suffix.
    pub fn with_timestamp_uploads(mut self, enabled: bool) -> Self {
        self.timestamp_uploads = enabled;
        self
    }

    /// Get the managed root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn root_name(&self) -> String {
        self.root
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "root".to_string())
    }

    /// List the folder at `path` (empty for the root), recursively.
    pub fn list_tree(&self, path: &str) -> Result<FolderEntry> {
        let path = RelativePath::parse(path)?;
        list_tree(&self.root, &path, &self.root_name())
    }

    /// Up to `limit` most recently modified files.
    pub fn list_recent(&self, limit: usize) -> Result<Vec<FileEntry>> {
        recent_files(&self.root, limit)
    }

    /// Create folder `name` inside `parent`.
    ///
    /// Missing folders along `parent` are created. The final directory is
    /// created with fail-if-exists semantics, so of two racing calls for the
    /// same path exactly one succeeds and the other gets a conflict.
    pub fn create_folder(&self, parent: &str, name: &str) -> Result<FolderEntry> {
        let parent = RelativePath::parse(parent)?;
        let name = validate_item_name(name)?;
        let target = parent.child(name);

        self.ensure_directory(&parent)?;

        let dir = target.resolve(&self.root);
        match fs::create_dir(&dir) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                return Err(FiledeckError::Conflict(format!("'{target}'")));
            }
            Err(e) => return Err(e.into()),
        }

        let metadata = fs::metadata(&dir)?;
        tracing::info!(path = %target, "Folder created");

        Ok(FolderEntry::from_metadata(
            &target,
            name.to_string(),
            &metadata,
            Vec::new(),
        ))
    }

    /// Store `content` inside `parent` under a name derived from
    /// `suggested_name`.
    ///
    /// The file is opened create-new, so an existing file is never
    /// overwritten; a clash is reported as a conflict.
    pub fn upload_file(
        &self,
        parent: &str,
        content: &[u8],
        suggested_name: &str,
    ) -> Result<FileEntry> {
        let parent = RelativePath::parse(parent)?;
        let timestamp = self
            .timestamp_uploads
            .then(|| Utc::now().timestamp_millis());
        let name = safe_file_name(suggested_name, timestamp)?;
        let target = parent.child(&name);

        self.ensure_directory(&parent)?;

        match write_new_file(&target.resolve(&self.root), content) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                return Err(FiledeckError::Conflict(format!("'{target}'")));
            }
            Err(e) => return Err(e.into()),
        }

        tracing::info!(path = %target, size = content.len(), "File uploaded");

        Ok(FileEntry::written_now(&target, name, content.len() as u64))
    }

    /// Rename the item at `old_path` within its folder.
    pub fn rename_item(&self, old_path: &str, new_name: &str) -> Result<RenameOutcome> {
        let old = RelativePath::parse(old_path)?;
        if old.is_root() {
            return Err(FiledeckError::InvalidPath(
                "the managed root cannot be renamed".to_string(),
            ));
        }
        let new_name = validate_item_name(new_name)?;
        let new = old.sibling(new_name);

        old.parent().unwrap_or_default().resolve_unlinked(&self.root)?;
        let source = old.resolve(&self.root);
        let destination = new.resolve(&self.root);

        if !exists(&source)? {
            return Err(FiledeckError::NotFound(format!("'{old}'")));
        }
        // fs::rename replaces an existing destination on Unix, so a sibling
        // created between this check and the rename is overwritten.
        if exists(&destination)? {
            return Err(FiledeckError::Conflict(format!("'{new}'")));
        }

        match fs::rename(&source, &destination) {
            Ok(()) => {}
            Err(e) if is_missing(&e) => {
                return Err(FiledeckError::NotFound(format!("'{old}'")));
            }
            Err(e) => return Err(e.into()),
        }

        tracing::info!(from = %old, to = %new, "Item renamed");

        Ok(RenameOutcome {
            old_path: old.to_string(),
            new_path: new.to_string(),
            new_name: new_name.to_string(),
        })
    }

    /// Delete the item at `path`. Folders are removed with all descendants.
    ///
    /// Returns the kind of item that was removed.
    pub fn delete_item(&self, path: &str) -> Result<EntryKind> {
        let path = RelativePath::parse(path)?;
        if path.is_root() {
            return Err(FiledeckError::InvalidPath(
                "the managed root cannot be deleted".to_string(),
            ));
        }
        path.parent().unwrap_or_default().resolve_unlinked(&self.root)?;
        let target = path.resolve(&self.root);

        let metadata = match fs::symlink_metadata(&target) {
            Ok(metadata) => metadata,
            Err(e) if is_missing(&e) => {
                return Err(FiledeckError::NotFound(format!("'{path}'")));
            }
            Err(e) => return Err(e.into()),
        };

        let (kind, removed) = if metadata.is_dir() {
            (EntryKind::Folder, fs::remove_dir_all(&target))
        } else {
            (EntryKind::File, fs::remove_file(&target))
        };
        match removed {
            Ok(()) => {}
            Err(e) if is_missing(&e) => {
                return Err(FiledeckError::NotFound(format!("'{path}'")));
            }
            Err(e) => return Err(e.into()),
        }

        tracing::info!(path = %path, kind = ?kind, "Item deleted");

        Ok(kind)
    }

    /// Read the file at `path`.
    pub fn read_file(&self, path: &str) -> Result<FileContent> {
        let path = RelativePath::parse(path)?;
        let name = path
            .leaf()
            .ok_or_else(|| FiledeckError::InvalidPath("the managed root is a folder".to_string()))?
            .to_string();
        let target = path.resolve_unlinked(&self.root)?;

        match fs::metadata(&target) {
            Ok(metadata) if metadata.is_dir() => {
                return Err(FiledeckError::InvalidPath(format!("'{path}' is a folder")));
            }
            Ok(_) => {}
            Err(e) if is_missing(&e) => {
                return Err(FiledeckError::NotFound(format!("'{path}'")));
            }
            Err(e) => return Err(e.into()),
        }

        let content = fs::read(&target)?;
        Ok(FileContent { name, content })
    }

    fn ensure_directory(&self, path: &RelativePath) -> Result<()> {
        let dir = path.resolve_unlinked(&self.root)?;
        match fs::metadata(&dir) {
            Ok(metadata) if metadata.is_dir() => Ok(()),
            Ok(_) => Err(FiledeckError::InvalidPath(format!(
                "'{path}' is not a directory"
            ))),
            Err(e) if e.kind() == io::ErrorKind::NotADirectory => Err(
                FiledeckError::InvalidPath(format!("'{path}' runs through a file")),
            ),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                fs::create_dir_all(&dir)?;
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }
}

fn exists(path: &Path) -> Result<bool> {
    match fs::symlink_metadata(path) {
        Ok(_) => Ok(true),
        Err(e) if is_missing(&e) => Ok(false),
        Err(e) => Err(e.into()),
    }
}

// Create `path` (it must not exist yet) holding `content`.
fn write_new_file(path: &Path, content: &[u8]) -> io::Result<()> {
    let file = OpenOptions::new().write(true).create_new(true).open(path)?;
    fill_or_remove(path, file, content)
}

// A failed write removes the partial file so a retry is not blocked by it.
fn fill_or_remove<W: Write>(path: &Path, mut writer: W, content: &[u8]) -> io::Result<()> {
    let written = writer.write_all(content).and_then(|()| writer.flush());
    if let Err(e) = written {
        drop(writer);
        if let Err(remove_err) = fs::remove_file(path) {
            tracing::warn!(path = %path.display(), error = %remove_err, "Failed to remove partial upload");
        }
        return Err(e);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::explorer::entry::Entry;
    use tempfile::TempDir;

    fn setup_explorer() -> (TempDir, Explorer) {
        let temp_dir = TempDir::new().unwrap();
        let explorer = Explorer::new(temp_dir.path()).unwrap();
        (temp_dir, explorer)
    }

    #[test]
    fn test_new_creates_root() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("public");

        assert!(!root.exists());
        let explorer = Explorer::new(&root).unwrap();

        assert!(root.is_dir());
        assert_eq!(explorer.root(), root);
        assert_eq!(explorer.list_tree("").unwrap().name, "public");
    }

    #[test]
    fn test_create_folder_with_missing_parent() {
        let (temp_dir, explorer) = setup_explorer();

        let folder = explorer.create_folder("docs", "photos").unwrap();

        assert!(temp_dir.path().join("docs").join("photos").is_dir());
        assert_eq!(folder.name, "photos");
        assert_eq!(folder.path, "docs/photos");
        assert!(folder.children.is_empty());
    }

    #[test]
    fn test_create_folder_twice_conflicts() {
        let (_temp_dir, explorer) = setup_explorer();

        explorer.create_folder("docs", "photos").unwrap();
        let result = explorer.create_folder("docs", "photos");

        assert!(matches!(result, Err(FiledeckError::Conflict(_))));
    }

    #[test]
    fn test_create_folder_trims_name() {
        let (temp_dir, explorer) = setup_explorer();

        let folder = explorer.create_folder("", "  music  ").unwrap();

        assert_eq!(folder.name, "music");
        assert!(temp_dir.path().join("music").is_dir());
    }

    #[test]
    fn test_create_folder_rejects_blank_and_reserved() {
        let (_temp_dir, explorer) = setup_explorer();

        assert!(matches!(
            explorer.create_folder("", "   "),
            Err(FiledeckError::InvalidInput(_))
        ));
        assert!(matches!(
            explorer.create_folder("", "a/b"),
            Err(FiledeckError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_create_folder_under_file_is_invalid() {
        let (temp_dir, explorer) = setup_explorer();
        fs::write(temp_dir.path().join("a.txt"), b"a").unwrap();

        let result = explorer.create_folder("a.txt", "child");
        assert!(matches!(result, Err(FiledeckError::InvalidPath(_))));
    }

    #[test]
    fn test_upload_file_with_timestamp() {
        let (temp_dir, explorer) = setup_explorer();

        let file = explorer
            .upload_file("reports", b"%PDF-1.4", "report.pdf")
            .unwrap();

        let stem = file
            .name
            .strip_prefix("report_")
            .and_then(|rest| rest.strip_suffix(".pdf"))
            .unwrap();
        assert!(!stem.is_empty());
        assert!(stem.chars().all(|c| c.is_ascii_digit()));
        assert_eq!(file.mime_type, "application/pdf");
        assert_eq!(file.extension, "pdf");
        assert_eq!(file.size, Some(8));
        assert_eq!(file.path, format!("reports/{}", file.name));

        let stored = fs::read(temp_dir.path().join("reports").join(&file.name)).unwrap();
        assert_eq!(stored, b"%PDF-1.4");
    }

    #[test]
    fn test_upload_file_without_timestamp() {
        let (temp_dir, explorer) = setup_explorer();
        let explorer = explorer.with_timestamp_uploads(false);

        let file = explorer
            .upload_file("", b"hello", "C:\\Users\\me\\notes.txt")
            .unwrap();

        assert_eq!(file.name, "notes.txt");
        assert!(temp_dir.path().join("notes.txt").is_file());
    }

    #[test]
    fn test_upload_file_never_overwrites() {
        let (temp_dir, explorer) = setup_explorer();
        let explorer = explorer.with_timestamp_uploads(false);
        fs::write(temp_dir.path().join("notes.txt"), b"original").unwrap();

        let result = explorer.upload_file("", b"replacement", "notes.txt");

        assert!(matches!(result, Err(FiledeckError::Conflict(_))));
        assert_eq!(
            fs::read(temp_dir.path().join("notes.txt")).unwrap(),
            b"original"
        );
    }

    #[test]
    fn test_upload_empty_file() {
        let (_temp_dir, explorer) = setup_explorer();

        let file = explorer.upload_file("", b"", "empty.txt").unwrap();
        assert_eq!(file.size, Some(0));
    }

    #[test]
    fn test_upload_requires_name() {
        let (_temp_dir, explorer) = setup_explorer();

        let result = explorer.upload_file("", b"data", "  ");
        assert!(matches!(result, Err(FiledeckError::InvalidInput(_))));
    }

    #[test]
    fn test_rename_item() {
        let (temp_dir, explorer) = setup_explorer();
        fs::create_dir(temp_dir.path().join("docs")).unwrap();
        fs::write(temp_dir.path().join("docs").join("a.txt"), b"a").unwrap();

        let outcome = explorer.rename_item("docs/a.txt", " b.txt ").unwrap();

        assert_eq!(
            outcome,
            RenameOutcome {
                old_path: "docs/a.txt".to_string(),
                new_path: "docs/b.txt".to_string(),
                new_name: "b.txt".to_string(),
            }
        );
        assert!(!temp_dir.path().join("docs").join("a.txt").exists());
        assert_eq!(
            fs::read(temp_dir.path().join("docs").join("b.txt")).unwrap(),
            b"a"
        );
    }

    #[test]
    fn test_rename_folder() {
        let (temp_dir, explorer) = setup_explorer();
        fs::create_dir_all(temp_dir.path().join("old").join("inner")).unwrap();

        explorer.rename_item("old", "new").unwrap();

        assert!(temp_dir.path().join("new").join("inner").is_dir());
    }

    #[test]
    fn test_rename_onto_existing_sibling_conflicts() {
        let (temp_dir, explorer) = setup_explorer();
        fs::write(temp_dir.path().join("a.txt"), b"a").unwrap();
        fs::write(temp_dir.path().join("b.txt"), b"b").unwrap();

        let result = explorer.rename_item("a.txt", "b.txt");

        assert!(matches!(result, Err(FiledeckError::Conflict(_))));
        assert_eq!(fs::read(temp_dir.path().join("a.txt")).unwrap(), b"a");
        assert_eq!(fs::read(temp_dir.path().join("b.txt")).unwrap(), b"b");
    }

    #[test]
    fn test_rename_missing_source() {
        let (_temp_dir, explorer) = setup_explorer();

        let result = explorer.rename_item("ghost.txt", "b.txt");
        assert!(matches!(result, Err(FiledeckError::NotFound(_))));
    }

    #[test]
    fn test_rename_rejects_invalid_names() {
        let (temp_dir, explorer) = setup_explorer();
        fs::write(temp_dir.path().join("a.txt"), b"a").unwrap();

        for name in ["", "   ", "x/y", "x:y", "what?"] {
            let result = explorer.rename_item("a.txt", name);
            assert!(
                matches!(result, Err(FiledeckError::InvalidInput(_))),
                "{name:?} should be rejected"
            );
        }
        assert!(temp_dir.path().join("a.txt").exists());
    }

    #[test]
    fn test_rename_root_is_invalid() {
        let (_temp_dir, explorer) = setup_explorer();

        let result = explorer.rename_item("/", "other");
        assert!(matches!(result, Err(FiledeckError::InvalidPath(_))));
    }

    #[test]
    fn test_delete_folder_recursively() {
        let (temp_dir, explorer) = setup_explorer();
        fs::create_dir_all(temp_dir.path().join("docs").join("deep")).unwrap();
        fs::write(temp_dir.path().join("docs").join("deep").join("a.txt"), b"a").unwrap();

        let kind = explorer.delete_item("docs").unwrap();

        assert_eq!(kind, EntryKind::Folder);
        assert!(!temp_dir.path().join("docs").exists());
        let tree = explorer.list_tree("").unwrap();
        assert!(tree.children.iter().all(|e| e.name() != "docs"));
    }

    #[test]
    fn test_delete_file() {
        let (temp_dir, explorer) = setup_explorer();
        fs::write(temp_dir.path().join("a.txt"), b"a").unwrap();
        fs::write(temp_dir.path().join("b.txt"), b"b").unwrap();

        assert_eq!(explorer.delete_item("a.txt").unwrap(), EntryKind::File);

        assert!(!temp_dir.path().join("a.txt").exists());
        assert!(temp_dir.path().join("b.txt").exists());
    }

    #[test]
    fn test_delete_missing() {
        let (_temp_dir, explorer) = setup_explorer();

        let result = explorer.delete_item("nothing-here");
        assert!(matches!(result, Err(FiledeckError::NotFound(_))));
    }

    #[test]
    fn test_delete_root_is_invalid() {
        let (temp_dir, explorer) = setup_explorer();

        let result = explorer.delete_item("./");
        assert!(matches!(result, Err(FiledeckError::InvalidPath(_))));
        assert!(temp_dir.path().exists());
    }

    #[test]
    fn test_traversal_rejected_before_store_access() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("public");
        let explorer = Explorer::new(&root).unwrap();
        let outside = temp_dir.path().join("secret.txt");
        fs::write(&outside, b"secret").unwrap();

        assert!(matches!(
            explorer.list_tree(".."),
            Err(FiledeckError::InvalidPath(_))
        ));
        assert!(matches!(
            explorer.create_folder("../escape", "x"),
            Err(FiledeckError::InvalidPath(_))
        ));
        assert!(matches!(
            explorer.upload_file("..", b"x", "evil.txt"),
            Err(FiledeckError::InvalidPath(_))
        ));
        assert!(matches!(
            explorer.rename_item("../secret.txt", "stolen.txt"),
            Err(FiledeckError::InvalidPath(_))
        ));
        assert!(matches!(
            explorer.delete_item("../secret.txt"),
            Err(FiledeckError::InvalidPath(_))
        ));
        assert!(matches!(
            explorer.read_file("docs/../../secret.txt"),
            Err(FiledeckError::InvalidPath(_))
        ));

        assert!(outside.exists());
        assert!(!temp_dir.path().join("escape").exists());
        assert!(!temp_dir.path().join("evil.txt").exists());
        assert!(!temp_dir.path().join("stolen.txt").exists());
    }

    #[test]
    fn test_read_file() {
        let (temp_dir, explorer) = setup_explorer();
        fs::create_dir(temp_dir.path().join("docs")).unwrap();
        fs::write(temp_dir.path().join("docs").join("a.txt"), b"hello").unwrap();

        let file = explorer.read_file("docs/a.txt").unwrap();
        assert_eq!(file.name, "a.txt");
        assert_eq!(file.content, b"hello");

        assert!(matches!(
            explorer.read_file("docs"),
            Err(FiledeckError::InvalidPath(_))
        ));
        assert!(matches!(
            explorer.read_file("docs/missing.txt"),
            Err(FiledeckError::NotFound(_))
        ));
    }

    #[test]
    fn test_list_recent_through_explorer() {
        let (_temp_dir, explorer) = setup_explorer();
        explorer.upload_file("a", b"1", "one.txt").unwrap();
        explorer.upload_file("b", b"2", "two.txt").unwrap();

        let recent = explorer.list_recent(1).unwrap();
        assert_eq!(recent.len(), 1);

        let tree = explorer.list_tree("").unwrap();
        assert!(tree
            .children
            .iter()
            .all(|entry| matches!(entry, Entry::Folder(_))));
    }

    #[test]
    fn test_paths_through_a_file() {
        let (temp_dir, explorer) = setup_explorer();
        fs::write(temp_dir.path().join("a.txt"), b"a").unwrap();

        assert!(matches!(
            explorer.delete_item("a.txt/x"),
            Err(FiledeckError::NotFound(_))
        ));
        assert!(matches!(
            explorer.rename_item("a.txt/x", "y"),
            Err(FiledeckError::NotFound(_))
        ));
        assert!(matches!(
            explorer.list_tree("a.txt/x"),
            Err(FiledeckError::NotFound(_))
        ));
        assert!(matches!(
            explorer.read_file("a.txt/x"),
            Err(FiledeckError::NotFound(_))
        ));
        assert!(matches!(
            explorer.create_folder("a.txt/x", "y"),
            Err(FiledeckError::InvalidPath(_))
        ));
        assert!(matches!(
            explorer.upload_file("a.txt/x", b"data", "y.txt"),
            Err(FiledeckError::InvalidPath(_))
        ));

        assert_eq!(fs::read(temp_dir.path().join("a.txt")).unwrap(), b"a");
    }

    #[test]
    fn test_rename_onto_existing_folder_conflicts() {
        let (temp_dir, explorer) = setup_explorer();
        fs::create_dir(temp_dir.path().join("a")).unwrap();
        fs::create_dir(temp_dir.path().join("b")).unwrap();

        assert!(matches!(
            explorer.rename_item("a", "b"),
            Err(FiledeckError::Conflict(_))
        ));
        assert!(temp_dir.path().join("a").is_dir());
    }

    #[cfg(unix)]
    #[test]
    fn test_links_out_of_the_root_are_refused() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("public");
        let outside = temp_dir.path().join("outside");
        fs::create_dir(&outside).unwrap();
        fs::write(outside.join("secret.txt"), b"secret").unwrap();
        let explorer = Explorer::new(&root).unwrap().with_timestamp_uploads(false);
        std::os::unix::fs::symlink(&outside, root.join("link")).unwrap();

        assert!(matches!(
            explorer.read_file("link/secret.txt"),
            Err(FiledeckError::InvalidPath(_))
        ));
        assert!(matches!(
            explorer.list_tree("link"),
            Err(FiledeckError::InvalidPath(_))
        ));
        assert!(matches!(
            explorer.upload_file("link", b"x", "dropped.txt"),
            Err(FiledeckError::InvalidPath(_))
        ));
        assert!(matches!(
            explorer.create_folder("link", "made"),
            Err(FiledeckError::InvalidPath(_))
        ));
        assert!(matches!(
            explorer.rename_item("link/secret.txt", "moved.txt"),
            Err(FiledeckError::InvalidPath(_))
        ));
        assert!(matches!(
            explorer.delete_item("link/secret.txt"),
            Err(FiledeckError::InvalidPath(_))
        ));

        assert!(outside.join("secret.txt").exists());
        assert!(!outside.join("dropped.txt").exists());
        assert!(!outside.join("made").exists());
        assert!(!outside.join("moved.txt").exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_deleting_a_link_keeps_its_target() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("public");
        let outside = temp_dir.path().join("outside");
        fs::create_dir(&outside).unwrap();
        fs::write(outside.join("keep.txt"), b"keep").unwrap();
        let explorer = Explorer::new(&root).unwrap();
        std::os::unix::fs::symlink(&outside, root.join("link")).unwrap();

        assert_eq!(explorer.delete_item("link").unwrap(), EntryKind::File);
        assert!(!root.join("link").exists());
        assert!(outside.join("keep.txt").exists());
    }

    struct FailingWriter;

    impl Write for FailingWriter {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::Other, "no space left"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_failed_write_leaves_no_file() {
        let (temp_dir, explorer) = setup_explorer();
        let path = temp_dir.path().join("partial.bin");
        fs::write(&path, b"").unwrap();

        let result = fill_or_remove(&path, FailingWriter, b"payload");
        assert!(result.is_err());
        assert!(!path.exists());

        let retried = explorer
            .with_timestamp_uploads(false)
            .upload_file("", b"payload", "partial.bin")
            .unwrap();
        assert_eq!(retried.size, Some(7));
        assert_eq!(fs::read(&path).unwrap(), b"payload");
    }
}
