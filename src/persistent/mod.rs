//! Persistent collections with undo/redo.
//!
//! Every collection in this module is built on one engine, a path-copying
//! [`RadixTrie`], and keeps a linear [`History`] of its versions:
//!
//! - [`PersistentArray`]: indexed sequence
//! - [`PersistentLinkedList`]: doubly-linked sequence whose cells live in a
//!   trie
//! - [`PersistentMap`]: chained hash map whose buckets are linked lists
//!
//! # Structural Sharing
//!
//! A mutation copies only the trie nodes on the path to the slots it
//! touches; every other node is shared with the previous version. Keeping
//! a version alive on the undo stack therefore costs one path of nodes,
//! not a copy of the collection.
//!
//! # Examples
//!
//! ## `PersistentArray`
//!
//! ```rust
//! use retrace::persistent::{PersistentArray, Undoable};
//!
//! let mut array = PersistentArray::new();
//! array.push(1).unwrap();
//! array.push(2).unwrap();
//! let before = array.snapshot();
//!
//! array.set(0, 100).unwrap();
//! assert_eq!(array.get(0), Ok(&100));
//! assert_eq!(before.get(0), Ok(&1)); // Old version unchanged
//!
//! array.undo();
//! assert_eq!(array.get(0), Ok(&1));
//! ```
//!
//! ## `PersistentLinkedList`
//!
//! ```rust
//! use retrace::persistent::{PersistentLinkedList, Undoable};
//!
//! let mut list: PersistentLinkedList<i32> = [0, 1, 2].into_iter().collect();
//! list.remove(1).unwrap();
//! list.set(1, 9).unwrap();
//! list.push_back(10).unwrap();
//! assert_eq!(list.to_string(), "[0, 9, 10]");
//!
//! list.undo();
//! assert_eq!(list.to_string(), "[0, 9]");
//! ```
//!
//! ## `PersistentMap`
//!
//! ```rust
//! use retrace::persistent::{PersistentMap, Undoable};
//!
//! let mut map = PersistentMap::new();
//! map.put("one", 1).unwrap();
//! map.put_all([("two", 2), ("three", 3)]).unwrap();
//! assert_eq!(map.len(), 3);
//!
//! map.undo(); // the whole batch
//! assert_eq!(map.len(), 1);
//! ```

// =============================================================================
// Reference Counter Type Alias
// =============================================================================

/// Reference-counted smart pointer type.
///
/// When the `arc` feature is enabled, this is `std::sync::Arc`,
/// which is thread-safe but has slightly higher overhead.
///
/// When the `arc` feature is disabled (default), this is `std::rc::Rc`,
/// which is faster but not thread-safe.
#[cfg(feature = "arc")]
pub(crate) type ReferenceCounter<T> = std::sync::Arc<T>;

#[cfg(not(feature = "arc"))]
pub(crate) type ReferenceCounter<T> = std::rc::Rc<T>;

mod array;
mod config;
mod error;
mod history;
mod linked_list;
mod map;
mod node;
mod stack;
mod trie;

pub use array::Iter as PersistentArrayIterator;
pub use array::PersistentArray;
pub use config::{
    DEFAULT_BITS, DEFAULT_INITIAL_SIZE, MAX_BITS, MIN_BITS, TrieConfig, TrieConfigBuilder,
};
pub use error::CollectionError;
pub use history::{History, Undoable};
pub use linked_list::Iter as PersistentLinkedListIterator;
pub use linked_list::{ListVersion, PersistentLinkedList};
pub use map::{Entry, PersistentMap, TABLE_SIZE, bucket_index};
pub use trie::IntoIter as RadixTrieIntoIterator;
pub use trie::Iter as RadixTrieIterator;
pub use trie::RadixTrie;

// =============================================================================
// Thread Safety
// =============================================================================

// Rc-backed versions must stay on the thread that built them.
#[cfg(not(feature = "arc"))]
mod rc_send_sync_verification {
    use super::{ListVersion, PersistentArray, PersistentLinkedList, PersistentMap, RadixTrie};

    static_assertions::assert_not_impl_any!(RadixTrie<i32>: Send, Sync);
    static_assertions::assert_not_impl_any!(ListVersion<i32>: Send, Sync);
    static_assertions::assert_not_impl_any!(PersistentArray<i32>: Send, Sync);
    static_assertions::assert_not_impl_any!(PersistentLinkedList<i32>: Send, Sync);
    static_assertions::assert_not_impl_any!(PersistentMap<i32, i32>: Send, Sync);
}

// With Arc, published versions can be read from other threads.
#[cfg(feature = "arc")]
mod arc_send_sync_verification {
    use super::{ListVersion, PersistentArray, PersistentLinkedList, PersistentMap, RadixTrie};

    static_assertions::assert_impl_all!(RadixTrie<i32>: Send, Sync);
    static_assertions::assert_impl_all!(RadixTrie<String>: Send, Sync);
    static_assertions::assert_impl_all!(ListVersion<String>: Send, Sync);
    static_assertions::assert_impl_all!(PersistentArray<i32>: Send, Sync);
    static_assertions::assert_impl_all!(PersistentLinkedList<i32>: Send, Sync);
    static_assertions::assert_impl_all!(PersistentMap<String, i32>: Send, Sync);
}

// =============================================================================
// Tests
// =============================================================================
