//! Integration tests for sharing published versions across threads.
//!
//! With the `arc` feature, a snapshot taken on one thread can be read on
//! any number of others while the owning collection keeps mutating.

#![cfg(feature = "arc")]

use retrace::persistent::{PersistentArray, PersistentLinkedList, PersistentMap, Undoable};
use rstest::rstest;
use std::sync::Arc;
use std::thread;

// =============================================================================
// Snapshots
// =============================================================================

#[rstest]
fn test_array_snapshot_read_from_threads() {
    let mut array: PersistentArray<usize> = (0..1000).collect();
    let snapshot = Arc::new(array.snapshot());

    let handles: Vec<_> = (0..4)
        .map(|offset| {
            let snapshot = Arc::clone(&snapshot);
            thread::spawn(move || {
                (offset..1000)
                    .step_by(4)
                    .all(|index| snapshot.get(index) == Ok(&index))
            })
        })
        .collect();

    array.clear();
    array.push(42).unwrap();

    for handle in handles {
        assert!(handle.join().expect("Thread panicked"));
    }
    assert_eq!(snapshot.len(), 1000);
}

#[rstest]
fn test_list_snapshot_moves_to_thread() {
    let mut list: PersistentLinkedList<String> =
        ["a", "b", "c"].into_iter().map(String::from).collect();
    let snapshot = list.snapshot();
    list.remove(1).unwrap();

    let joined = thread::spawn(move || snapshot.iter().cloned().collect::<Vec<_>>().join(","))
        .join()
        .expect("Thread panicked");

    assert_eq!(joined, "a,b,c");
    assert_eq!(list.to_string(), "[a, c]");
}

// =============================================================================
// Whole Collections
// =============================================================================

#[rstest]
fn test_map_mutated_on_worker_thread() {
    let mut map = PersistentMap::new();
    map.put("main".to_string(), 0).unwrap();
    let original = map.clone();

    let worker = thread::spawn(move || {
        for index in 1..=10 {
            map.put(format!("worker{index}"), index).unwrap();
        }
        map.undo();
        map
    });

    let map = worker.join().expect("Thread panicked");
    assert_eq!(map.len(), 10);
    assert_eq!(original.len(), 1);
}
