//! Listing order.
//!
//! Entries sort by last modification (most recent first). Entries without a
//! timestamp count as the epoch and land last. Ties go to folders first when
//! `prioritize_folders` is set, then to the name.

use std::cmp::Ordering;

use super::entry::{Entry, EntryKind, FileEntry};

/// The fields the listing order looks at.
pub trait SortKey {
    /// Modification time in epoch milliseconds; 0 when unknown.
    fn modified_millis(&self) -> i64;
    fn kind(&self) -> EntryKind;
    fn name(&self) -> &str;
}

impl SortKey for Entry {
    fn modified_millis(&self) -> i64 {
        self.modified_at().map_or(0, |t| t.timestamp_millis())
    }

    fn kind(&self) -> EntryKind {
        Entry::kind(self)
    }

    fn name(&self) -> &str {
        Entry::name(self)
    }
}

impl SortKey for FileEntry {
    fn modified_millis(&self) -> i64 {
        self.modified_at.map_or(0, |t| t.timestamp_millis())
    }

    fn kind(&self) -> EntryKind {
        EntryKind::File
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Compare two entries in listing order.
pub fn compare<T: SortKey>(a: &T, b: &T, prioritize_folders: bool) -> Ordering {
    b.modified_millis()
        .cmp(&a.modified_millis())
        .then_with(|| {
            if prioritize_folders {
                a.kind().cmp(&b.kind())
            } else {
                Ordering::Equal
            }
        })
        .then_with(|| compare_names(a.name(), b.name()))
}

/// Sort in place. The sort is stable, so entries that compare equal keep
/// their relative order and re-sorting is a no-op.
pub fn sort_by_last_update<T: SortKey>(items: &mut [T], prioritize_folders: bool) {
    items.sort_by(|a, b| compare(a, b, prioritize_folders));
}

// Case-insensitive first, so "apple" < "Banana" < "cherry". Names that differ
// only in case put lowercase first ("banana" < "Banana"), which is what a
// browser's locale compare does; reversing the byte order gives exactly that.
fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| b.cmp(a))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Item {
        millis: i64,
        kind: EntryKind,
        name: &'static str,
    }

    impl SortKey for Item {
        fn modified_millis(&self) -> i64 {
            self.millis
        }
        fn kind(&self) -> EntryKind {
            self.kind
        }
        fn name(&self) -> &str {
            self.name
        }
    }

    fn item(millis: i64, kind: EntryKind, name: &'static str) -> Item {
        Item { millis, kind, name }
    }

    fn names(items: &[Item]) -> Vec<&'static str> {
        items.iter().map(|i| i.name).collect()
    }

    #[test]
    fn test_most_recent_first() {
        let mut items = vec![
            item(100, EntryKind::File, "old"),
            item(300, EntryKind::File, "new"),
            item(200, EntryKind::Folder, "mid"),
        ];
        sort_by_last_update(&mut items, true);
        assert_eq!(names(&items), vec!["new", "mid", "old"]);
    }

    #[test]
    fn test_missing_timestamp_sorts_last() {
        let mut items = vec![
            item(0, EntryKind::File, "unknown"),
            item(5, EntryKind::File, "known"),
        ];
        sort_by_last_update(&mut items, false);
        assert_eq!(names(&items), vec!["known", "unknown"]);
    }

    #[test]
    fn test_tie_folders_first_when_prioritized() {
        let mut items = vec![
            item(10, EntryKind::File, "a.txt"),
            item(10, EntryKind::Folder, "z"),
        ];
        sort_by_last_update(&mut items, true);
        assert_eq!(names(&items), vec!["z", "a.txt"]);
    }

    #[test]
    fn test_tie_by_name_only_when_not_prioritized() {
        let mut items = vec![
            item(10, EntryKind::Folder, "z"),
            item(10, EntryKind::File, "a.txt"),
        ];
        sort_by_last_update(&mut items, false);
        assert_eq!(names(&items), vec!["a.txt", "z"]);
    }

    #[test]
    fn test_name_order() {
        let mut items = vec![
            item(1, EntryKind::File, "cherry"),
            item(1, EntryKind::File, "Banana"),
            item(1, EntryKind::File, "apple"),
            item(1, EntryKind::File, "banana"),
        ];
        sort_by_last_update(&mut items, false);
        assert_eq!(names(&items), vec!["apple", "banana", "Banana", "cherry"]);
    }

    #[test]
    fn test_case_only_differences_put_lowercase_first() {
        assert_eq!(compare_names("banana", "Banana"), Ordering::Less);
        assert_eq!(compare_names("aB", "Ab"), Ordering::Less);
        assert_eq!(compare_names("README", "readme"), Ordering::Greater);
        assert_eq!(compare_names("same", "same"), Ordering::Equal);
    }

    #[test]
    fn test_idempotent() {
        let mut items = vec![
            item(3, EntryKind::File, "b"),
            item(3, EntryKind::Folder, "c"),
            item(7, EntryKind::File, "a"),
            item(0, EntryKind::Folder, "d"),
            item(3, EntryKind::File, "a"),
        ];
        sort_by_last_update(&mut items, true);
        let once = items.clone();
        sort_by_last_update(&mut items, true);
        assert_eq!(items, once);
    }
}
