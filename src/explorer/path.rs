//! Root-relative paths.
//!
//! Every path that crosses the API boundary is relative to the managed root
//! and uses `/` as its separator. [`RelativePath::parse`] is the only way to
//! build one from caller input, and it rejects anything that could resolve
//! outside the root before the store is touched.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

use crate::{FiledeckError, Result};

/// A normalized path below the managed root.
///
/// The empty path is the root itself.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RelativePath {
    segments: Vec<String>,
}

impl RelativePath {
    /// The managed root.
    pub fn root() -> Self {
        Self::default()
    }

    /// Parse caller input into a contained path.
    ///
    /// Both `/` and `\` separate segments; empty and `.` segments are
    /// dropped. A `..` segment, a drive or root prefix, or a NUL byte is
    /// rejected with [`FiledeckError::InvalidPath`].
    pub fn parse(raw: &str) -> Result<Self> {
        let mut segments = Vec::new();

        for segment in raw.split(['/', '\\']) {
            if segment.is_empty() || segment == "." {
                continue;
            }
            if segment == ".." {
                return Err(FiledeckError::InvalidPath(format!(
                    "'{raw}' escapes the managed root"
                )));
            }
            if segment.contains('\0') || !is_single_component(segment) {
                return Err(FiledeckError::InvalidPath(format!(
                    "'{raw}' contains an invalid segment"
                )));
            }
            segments.push(segment.to_string());
        }

        Ok(Self { segments })
    }

    /// Whether this is the managed root.
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// The final segment, or `None` for the root.
    pub fn leaf(&self) -> Option<&str> {
        self.segments.last().map(String::as_str)
    }

    /// The containing folder, or `None` for the root.
    pub fn parent(&self) -> Option<Self> {
        if self.is_root() {
            return None;
        }
        let mut segments = self.segments.clone();
        segments.pop();
        Some(Self { segments })
    }

    /// A direct child of this path.
    ///
    /// `name` must already be a single safe segment (a directory entry name
    /// or a validated item name).
    pub fn child(&self, name: &str) -> Self {
        let mut segments = self.segments.clone();
        segments.push(name.to_string());
        Self { segments }
    }

    /// A sibling of this path with a different leaf name.
    pub fn sibling(&self, name: &str) -> Self {
        self.parent().unwrap_or_default().child(name)
    }

    /// The on-disk location of this path below `root`.
    pub fn resolve(&self, root: &Path) -> PathBuf {
        let mut path = root.to_path_buf();
        for segment in &self.segments {
            path.push(segment);
        }
        path
    }

    /// Like [`resolve`](Self::resolve), but refuses to pass through a link.
    ///
    /// Every existing segment is checked with `symlink_metadata`; a link
    /// anywhere along the path is [`FiledeckError::InvalidPath`]. Checking
    /// stops at the first segment that does not exist.
    pub fn resolve_unlinked(&self, root: &Path) -> Result<PathBuf> {
        let mut path = root.to_path_buf();
        let mut walking = true;

        for segment in &self.segments {
            path.push(segment);
            if !walking {
                continue;
            }
            match fs::symlink_metadata(&path) {
                Ok(metadata) if metadata.file_type().is_symlink() => {
                    return Err(FiledeckError::InvalidPath(format!(
                        "'{self}' passes through a link"
                    )));
                }
                Ok(_) => {}
                Err(e) if is_missing(&e) => walking = false,
                Err(e) => return Err(e.into()),
            }
        }

        Ok(path)
    }
}

/// Whether `err` means the path does not exist.
///
/// A path running through a regular file (`a.txt/x`) fails with
/// `NotADirectory` rather than `NotFound`; both mean nothing is there.
pub(crate) fn is_missing(err: &io::Error) -> bool {
    matches!(
        err.kind(),
        io::ErrorKind::NotFound | io::ErrorKind::NotADirectory
    )
}

impl fmt::Display for RelativePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join("/"))
    }
}

fn is_single_component(segment: &str) -> bool {
    let mut components = Path::new(segment).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}
