//! Concurrency tests for Filedeck.
//!
//! These tests race mutations against the same path and verify that the
//! store never ends up with a silently overwritten item.

use std::sync::{Arc, Barrier};
use std::thread;

use filedeck::{Explorer, FiledeckError};
use tempfile::TempDir;

/// Setup an explorer over a fresh managed root.
fn setup_explorer() -> (Explorer, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let explorer = Explorer::new(temp_dir.path())
        .unwrap()
        .with_timestamp_uploads(false);
    (explorer, temp_dir)
}

/// Run `attempt` on `n` threads released at the same instant.
fn race<T, F>(n: usize, attempt: F) -> Vec<T>
where
    T: Send + 'static,
    F: Fn(usize) -> T + Send + Sync + 'static,
{
    let barrier = Arc::new(Barrier::new(n));
    let attempt = Arc::new(attempt);

    let handles: Vec<_> = (0..n)
        .map(|i| {
            let barrier = Arc::clone(&barrier);
            let attempt = Arc::clone(&attempt);
            thread::spawn(move || {
                barrier.wait();
                attempt(i)
            })
        })
        .collect();

    handles.into_iter().map(|h| h.join().unwrap()).collect()
}

/// Two racing folder creations for the same path: exactly one wins.
#[test]
fn test_concurrent_create_folder_same_name() {
    let (explorer, _root) = setup_explorer();

    let results = race(2, move |_| explorer.create_folder("shared", "docs"));

    let successes = results.iter().filter(|r| r.is_ok()).count();
    let conflicts = results
        .iter()
        .filter(|r| matches!(r, Err(FiledeckError::Conflict(_))))
        .count();

    assert_eq!(successes, 1);
    assert_eq!(conflicts, 1);
}

/// Many racing creations of the same folder still produce a single winner.
#[test]
fn test_concurrent_create_folder_many() {
    const NUM_THREADS: usize = 8;
    let (explorer, root) = setup_explorer();

    let results = race(NUM_THREADS, move |_| explorer.create_folder("", "inbox"));

    assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
    assert!(root.path().join("inbox").is_dir());
}

/// Distinct folder names created concurrently all succeed.
#[test]
fn test_concurrent_create_distinct_folders() {
    const NUM_THREADS: usize = 8;
    let (explorer, root) = setup_explorer();

    let results = race(NUM_THREADS, move |i| {
        explorer.create_folder("parent", &format!("child-{i}"))
    });

    assert!(results.iter().all(|r| r.is_ok()));
    let count = std::fs::read_dir(root.path().join("parent")).unwrap().count();
    assert_eq!(count, NUM_THREADS);
}

/// Racing uploads under the same stored name: one file is written, the
/// rest conflict, and the stored content is one of the uploads intact.
#[test]
fn test_concurrent_upload_same_name() {
    const NUM_THREADS: usize = 4;
    let (explorer, root) = setup_explorer();

    let results = race(NUM_THREADS, move |i| {
        let content = vec![b'a' + i as u8; 1024];
        explorer
            .upload_file("", &content, "report.txt")
            .map(|_| content)
    });

    let winners: Vec<&Vec<u8>> = results.iter().filter_map(|r| r.as_ref().ok()).collect();
    assert_eq!(winners.len(), 1);
    assert!(results
        .iter()
        .filter(|r| r.is_err())
        .all(|r| matches!(r, Err(FiledeckError::Conflict(_)))));

    let stored = std::fs::read(root.path().join("report.txt")).unwrap();
    assert_eq!(&stored, winners[0]);
}
