//! Integration tests for PersistentArray.
//!
//! Covers the undo/redo timeline, middle inserts and the bulk operations
//! through the public API only.

use retrace::persistent::{CollectionError, PersistentArray, TrieConfig, Undoable};
use rstest::rstest;

fn strings(values: &[&str]) -> PersistentArray<String> {
    let mut array = PersistentArray::with_capacity(1);
    for value in values {
        array.push((*value).to_string()).unwrap();
    }
    array
}

// =============================================================================
// Undo / Redo
// =============================================================================

#[rstest]
fn test_undo_redo_timeline() {
    let mut array = strings(&["1", "2", "3"]);
    assert_eq!(array.to_string(), "[1, 2, 3]");

    array.undo();
    array.undo();
    assert_eq!(array.to_string(), "[1]");

    array.redo();
    assert_eq!(array.to_string(), "[1, 2]");

    array.undo();
    array.undo();
    assert_eq!(array.to_string(), "[]");

    array.redo();
    array.redo();
    array.redo();
    assert_eq!(array.to_string(), "[1, 2, 3]");
}

#[rstest]
fn test_undo_on_initial_version_is_noop() {
    let mut array: PersistentArray<i32> = PersistentArray::new();
    assert!(!array.undo());
    assert!(!array.redo());
    assert!(array.is_empty());
    assert_eq!(array.version_count(), 1);
}

#[rstest]
fn test_new_mutation_drops_redo() {
    let mut array = strings(&["a", "b"]);
    array.undo();
    array.push("c".to_string()).unwrap();
    assert!(!array.can_redo());
    assert!(!array.redo());
    assert_eq!(array.to_string(), "[a, c]");
}

#[rstest]
fn test_clone_has_independent_timeline() {
    let mut array = strings(&["a", "b"]);
    let copy = array.clone();
    array.undo();
    array.push("z".to_string()).unwrap();
    assert_eq!(copy.to_string(), "[a, b]");
    assert_eq!(copy.version_count(), 3);
    assert_eq!(array.to_string(), "[a, z]");
}

// =============================================================================
// Middle Insert
// =============================================================================

#[rstest]
fn test_middle_insert() {
    let mut array = strings(&["3", "7", "6", "9", "1"]);
    array.insert(3, "8".to_string()).unwrap();
    assert_eq!(array.to_string(), "[3, 7, 6, 8, 9, 1]");
}

#[rstest]
#[case(usize::MAX)]
#[case(6)]
#[case(9999)]
fn test_middle_insert_rejects_invalid_positions(#[case] index: usize) {
    let mut array = strings(&["3", "7", "6", "9", "1"]);
    array.insert(3, "8".to_string()).unwrap();
    let result = array.insert(index, "8".to_string());
    assert_eq!(
        result,
        Err(CollectionError::IndexOutOfBounds { index, length: 6 })
    );
    assert_eq!(array.to_string(), "[3, 7, 6, 8, 9, 1]");
}

#[rstest]
fn test_insert_across_many_leaves() {
    let mut array: PersistentArray<usize> = (0..200).collect();
    array.insert(17, 1000).unwrap();
    assert_eq!(array.len(), 201);
    assert_eq!(array.get(16), Ok(&16));
    assert_eq!(array.get(17), Ok(&1000));
    assert_eq!(array.get(18), Ok(&17));
    assert_eq!(array.last(), Some(&199));
    array.undo();
    assert_eq!(array.get(17), Ok(&17));
}

#[rstest]
fn test_remove_across_many_leaves() {
    let mut array: PersistentArray<usize> = (0..100).collect();
    assert_eq!(array.remove(40), Ok(40));
    assert_eq!(array.len(), 99);
    assert!(array.iter().copied().eq((0..100).filter(|&value| value != 40)));
}

// =============================================================================
// Nested Collections
// =============================================================================

#[rstest]
fn test_array_of_arrays_undo_and_reinsert() {
    let mut parent: PersistentArray<PersistentArray<String>> = PersistentArray::new();
    parent.push(strings(&["a", "b"])).unwrap();
    parent.push(strings(&["c"])).unwrap();
    assert_eq!(parent.to_string(), "[[a, b], [c]]");

    let mut child = parent.get(0).unwrap().clone();
    child.push("x".to_string()).unwrap();
    parent.set(0, child).unwrap();
    assert_eq!(parent.to_string(), "[[a, b, x], [c]]");

    let mut second = parent.get(1).unwrap().clone();
    second.set(0, "z".to_string()).unwrap();
    parent.set(1, second).unwrap();
    assert_eq!(parent.to_string(), "[[a, b, x], [z]]");

    parent.undo();
    assert_eq!(parent.to_string(), "[[a, b, x], [c]]");
    parent.undo();
    assert_eq!(parent.to_string(), "[[a, b], [c]]");
    parent.redo();
    parent.redo();
    assert_eq!(parent.to_string(), "[[a, b, x], [z]]");

    let first = parent.remove(0).unwrap();
    assert_eq!(parent.to_string(), "[[z]]");
    parent.insert(0, first.clone()).unwrap();
    assert_eq!(parent.to_string(), "[[a, b, x], [z]]");

    // A child carries its own history.
    let mut detached = first;
    assert!(detached.undo());
    assert_eq!(detached.to_string(), "[a, b]");
    assert_eq!(parent.get(0).unwrap().to_string(), "[a, b, x]");
}

#[rstest]
fn test_functional_updates_share_history() {
    let base = strings(&["a", "b"]);
    let grown = base.conj("c".to_string()).unwrap();
    let mut changed = grown.assoc(0, "z".to_string()).unwrap();

    assert_eq!(base.to_string(), "[a, b]");
    assert_eq!(grown.to_string(), "[a, b, c]");
    assert_eq!(changed.to_string(), "[z, b, c]");

    assert_eq!(changed.undo_steps(2), 2);
    assert_eq!(changed, base);
}

#[rstest]
fn test_collect_large_input_keeps_every_value() {
    let array: PersistentArray<usize> = (0..5000).collect();
    assert_eq!(array.len(), 5000);
    assert!(array.iter().copied().eq(0..5000));
    assert_eq!(array.version_count(), 1);
}

// =============================================================================
// Bulk Operations
// =============================================================================

#[rstest]
fn test_extend_from_is_one_version() {
    let mut array = strings(&["a"]);
    array.extend_from(["b", "c", "d"].map(String::from)).unwrap();
    assert_eq!(array.to_string(), "[a, b, c, d]");
    array.undo();
    assert_eq!(array.to_string(), "[a]");
}

#[rstest]
fn test_insert_all_then_undo() {
    let mut array = strings(&["a", "d"]);
    array.insert_all(1, ["b", "c"].map(String::from)).unwrap();
    assert_eq!(array.to_string(), "[a, b, c, d]");
    assert!(array.insert_all(5, ["x".to_string()]).is_err());
    array.undo();
    assert_eq!(array.to_string(), "[a, d]");
}

#[rstest]
fn test_clear_then_undo_restores_contents() {
    let mut array = strings(&["a", "b", "c"]);
    array.clear();
    assert_eq!(array.to_string(), "[]");
    array.undo();
    assert_eq!(array.to_string(), "[a, b, c]");
    array.redo();
    assert!(array.is_empty());
}

#[rstest]
fn test_sub_list_and_retain() {
    let array: PersistentArray<i32> = (1..=10).collect();
    let mut middle = array.sub_list(2, 8).unwrap();
    assert_eq!(middle.to_string(), "[3, 4, 5, 6, 7, 8]");
    assert_eq!(middle.retain(|value| value % 3 == 0), Ok(4));
    assert_eq!(middle.to_string(), "[3, 6]");
    assert_eq!(array.len(), 10);
}

#[rstest]
fn test_search_by_value() {
    let mut array = strings(&["x", "y", "x"]);
    assert_eq!(array.index_of(&"x".to_string()), Some(0));
    assert_eq!(array.last_index_of(&"x".to_string()), Some(2));
    assert!(array.remove_item(&"y".to_string()));
    assert_eq!(array.to_string(), "[x, x]");
}

// =============================================================================
// Configuration
// =============================================================================

#[rstest]
#[case(1)]
#[case(2)]
#[case(4)]
#[case(6)]
fn test_every_fanout_stores_the_same_values(#[case] bits: u32) {
    let config = TrieConfig::builder().bits(bits).build().unwrap();
    let mut array = PersistentArray::with_config(config);
    array.extend_from(0..300).unwrap();
    assert_eq!(array.len(), 300);
    assert!(array.iter().copied().eq(0..300));
    array.set(150, -1).unwrap();
    assert_eq!(array.get(150), Ok(&-1));
}

#[rstest]
fn test_snapshot_iterates_detached_version() {
    let mut array: PersistentArray<i32> = (0..5).collect();
    let snapshot = array.snapshot();
    array.clear();
    assert_eq!(snapshot.into_iter().collect::<Vec<_>>(), vec![0, 1, 2, 3, 4]);
}
