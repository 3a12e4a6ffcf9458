//! # retrace
//!
//! Persistent collections with undo and redo.
//!
//! ## Overview
//!
//! Every collection in this crate is fully immutable underneath: a mutation
//! builds a new version by path copying over a radix trie and pushes it on
//! a linear version history. `undo` and `redo` move along that history in
//! constant time.
//!
//! - **Array**: indexed sequence, one trie slot per index
//! - **Linked list**: doubly-linked cells stored in a trie by slot number
//! - **Map**: 32-bucket hash map whose buckets are persistent linked lists,
//!   with a composite history spanning bucket and table versions
//!
//! ## Feature Flags
//!
//! - `arc`: share trie nodes through `Arc` instead of `Rc`, making
//!   published versions `Send + Sync`
//! - `serde`: serialize and deserialize [`TrieConfig`](persistent::TrieConfig)
//! - `fxhash`: hash map keys with `rustc-hash`
//! - `ahash`: hash map keys with `ahash`
//! - `full`: Enable all optional features except the hasher choices
//!
//! ## Example
//!
//! ```rust
//! use retrace::prelude::*;
//!
//! let mut array = PersistentArray::new();
//! array.push("1").unwrap();
//! array.push("2").unwrap();
//! array.push("3").unwrap();
//! assert_eq!(array.to_string(), "[1, 2, 3]");
//!
//! array.undo();
//! array.undo();
//! assert_eq!(array.to_string(), "[1]");
//! array.redo();
//! assert_eq!(array.to_string(), "[1, 2]");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
// Note: Disabling redundant_closure_for_method_calls due to clippy 0.1.92 panic bug
#![allow(clippy::redundant_closure_for_method_calls)]

/// Prelude module for convenient imports.
///
/// Re-exports commonly used types and traits.
///
/// # Usage
///
/// ```rust
/// use retrace::prelude::*;
/// ```
pub mod prelude {
    pub use crate::persistent::*;
}

pub mod persistent;
