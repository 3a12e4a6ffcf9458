//! Error types for the persistent collections.
//!
//! Every fallible operation in this crate returns [`CollectionError`].
//! Because published versions are immutable, an error never leaves a
//! half-applied change behind: the new version is simply not committed.

use thiserror::Error;

/// Errors raised by the persistent collections and their trie.
///
/// # Examples
///
/// ```rust
/// use retrace::persistent::{CollectionError, PersistentArray};
///
/// let array: PersistentArray<i32> = PersistentArray::new();
/// assert_eq!(
///     array.get(3),
///     Err(CollectionError::IndexOutOfBounds { index: 3, length: 0 })
/// );
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum CollectionError {
    /// An index was outside the valid range of the collection.
    #[error("index {index} is out of bounds for length {length}")]
    IndexOutOfBounds {
        /// The rejected index.
        index: usize,
        /// The length of the collection at the time of the call.
        length: usize,
    },
    /// The trie reached its configured depth cap and cannot allocate
    /// another slot.
    #[error("capacity of {capacity} slots exceeded")]
    CapacityExceeded {
        /// The number of slots the capped trie can hold.
        capacity: usize,
    },
    /// A [`TrieConfig`](super::TrieConfig) was built from invalid values.
    #[error("invalid trie configuration: {reason}")]
    InvalidConfiguration {
        /// Why the configuration was rejected.
        reason: String,
    },
}

impl CollectionError {
    /// Shorthand for [`CollectionError::IndexOutOfBounds`].
    pub(crate) const fn out_of_bounds(index: usize, length: usize) -> Self {
        Self::IndexOutOfBounds { index, length }
    }

    /// Returns `true` if this is an [`IndexOutOfBounds`](Self::IndexOutOfBounds) error.
    #[must_use]
    pub const fn is_index_out_of_bounds(&self) -> bool {
        matches!(self, Self::IndexOutOfBounds { .. })
    }

    /// Returns `true` if this is a [`CapacityExceeded`](Self::CapacityExceeded) error.
    #[must_use]
    pub const fn is_capacity_exceeded(&self) -> bool {
        matches!(self, Self::CapacityExceeded { .. })
    }
}
