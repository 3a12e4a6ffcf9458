//! Persistent doubly-linked list with undo/redo.
//!
//! The list never moves its cells. Each value lives in a link cell stored
//! at a fixed trie slot, and the chain is threaded through the `prev` and
//! `next` slot numbers of those cells. Inserting or removing copies at most
//! two neighbour cells plus the new one, each by path copying.
//!
//! Slots are handed out in allocation order. A removed cell stays in the
//! trie as a tombstone because older versions may still link to it; the
//! trie is only replaced by a fresh one when the last live cell goes.
//!
//! # Examples
//!
//! ```rust
//! use retrace::persistent::{PersistentLinkedList, Undoable};
//!
//! let mut list = PersistentLinkedList::new();
//! list.push_back(1).unwrap();
//! list.push_back(2).unwrap();
//! list.push_back(3).unwrap();
//! list.push_front(4).unwrap();
//!
//! assert_eq!(list.to_string(), "[4, 1, 2, 3]");
//! assert_eq!(list.first_slot(), Some(3));
//! assert_eq!(list.last_slot(), Some(2));
//!
//! list.undo();
//! assert_eq!(list.to_string(), "[1, 2, 3]");
//! ```

use std::fmt;
use std::iter::FusedIterator;

use super::{CollectionError, History, RadixTrie, TrieConfig, Undoable};

// =============================================================================
// Link Cells and Versions
// =============================================================================

#[derive(Clone, Debug, PartialEq, Eq)]
struct LinkCell<T> {
    prev: Option<usize>,
    next: Option<usize>,
    value: T,
}

impl<T: Clone> LinkCell<T> {
    fn with_prev(&self, prev: Option<usize>) -> Self {
        Self {
            prev,
            ..self.clone()
        }
    }

    fn with_next(&self, next: Option<usize>) -> Self {
        Self {
            next,
            ..self.clone()
        }
    }
}

/// One immutable version of a linked list.
///
/// Obtained from [`PersistentLinkedList::snapshot`]; it can be iterated
/// and indexed long after the list has moved on.
pub struct ListVersion<T> {
    cells: RadixTrie<LinkCell<T>>,
    first: Option<usize>,
    last: Option<usize>,
    length: usize,
}

impl<T> ListVersion<T> {
    fn empty(config: TrieConfig) -> Self {
        Self {
            cells: RadixTrie::with_config(config),
            first: None,
            last: None,
            length: 0,
        }
    }

    /// Number of live cells.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.length
    }

    /// Returns `true` if no cell is live.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Slot of the head cell.
    #[must_use]
    pub const fn first_slot(&self) -> Option<usize> {
        self.first
    }

    /// Slot of the tail cell.
    #[must_use]
    pub const fn last_slot(&self) -> Option<usize> {
        self.last
    }

    /// Slots taken in the trie, tombstones included. This is also the slot
    /// the next new cell gets.
    #[must_use]
    pub const fn allocated_slots(&self) -> usize {
        self.cells.len()
    }

    /// Slots whose cells are no longer part of the chain.
    #[must_use]
    pub const fn tombstones(&self) -> usize {
        self.cells.len() - self.length
    }

    fn cell(&self, slot: usize) -> Result<&LinkCell<T>, CollectionError> {
        self.cells.get(slot)
    }

    /// Finds the slot of the `index`-th live cell, walking from whichever
    /// end is nearer.
    fn slot_at(&self, index: usize) -> Result<usize, CollectionError> {
        let broken = || CollectionError::out_of_bounds(index, self.length);
        if index >= self.length {
            return Err(broken());
        }
        if index < self.length / 2 {
            let mut slot = self.first.ok_or_else(broken)?;
            for _ in 0..index {
                slot = self.cell(slot)?.next.ok_or_else(broken)?;
            }
            Ok(slot)
        } else {
            let mut slot = self.last.ok_or_else(broken)?;
            for _ in index + 1..self.length {
                slot = self.cell(slot)?.prev.ok_or_else(broken)?;
            }
            Ok(slot)
        }
    }

    /// Returns the value at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::IndexOutOfBounds`] if `index >= len()`.
    pub fn get(&self, index: usize) -> Result<&T, CollectionError> {
        self.slot_at(index)
            .and_then(|slot| self.cell(slot))
            .map(|cell| &cell.value)
    }

    /// Walks the chain from head to tail. Reversible.
    #[must_use]
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            cells: &self.cells,
            front: self.first,
            back: self.last,
            remaining: self.length,
        }
    }
}

impl<T: Clone> ListVersion<T> {
    /// Builds the chain `0 -> 1 -> ... -> n-1` in one trie with no depth
    /// cap.
    fn from_values(config: TrieConfig, values: Vec<T>) -> Self {
        let length = values.len();
        let cells = values
            .into_iter()
            .enumerate()
            .map(|(slot, value)| LinkCell {
                prev: slot.checked_sub(1),
                next: (slot + 1 < length).then_some(slot + 1),
                value,
            })
            .collect();
        Self {
            cells: RadixTrie::from_values_uncapped(config, cells),
            first: (length > 0).then_some(0),
            last: length.checked_sub(1),
            length,
        }
    }

    fn push_back(&self, value: T) -> Result<Self, CollectionError> {
        let Some(last) = self.last else {
            let cells = RadixTrie::with_config(*self.cells.config()).append(LinkCell {
                prev: None,
                next: None,
                value,
            })?;
            return Ok(Self {
                cells,
                first: Some(0),
                last: Some(0),
                length: 1,
            });
        };

        let free = self.cells.len();
        let linked = self.cell(last)?.with_next(Some(free));
        let cells = self.cells.set(last, linked)?.append(LinkCell {
            prev: Some(last),
            next: None,
            value,
        })?;
        Ok(Self {
            cells,
            first: self.first,
            last: Some(free),
            length: self.length + 1,
        })
    }

    fn insert(&self, index: usize, value: T) -> Result<Self, CollectionError> {
        let successor = self.slot_at(index)?;
        let successor_cell = self.cell(successor)?;
        let predecessor = successor_cell.prev;
        let free = self.cells.len();

        let mut cells = self
            .cells
            .set(successor, successor_cell.with_prev(Some(free)))?;
        let first = match predecessor {
            Some(slot) => {
                let linked = cells.get(slot)?.with_next(Some(free));
                cells = cells.set(slot, linked)?;
                self.first
            }
            None => Some(free),
        };
        let cells = cells.append(LinkCell {
            prev: predecessor,
            next: Some(successor),
            value,
        })?;

        Ok(Self {
            cells,
            first,
            last: self.last,
            length: self.length + 1,
        })
    }

    fn remove(&self, index: usize) -> Result<(Self, T), CollectionError> {
        let slot = self.slot_at(index)?;
        let removed = self.cell(slot)?;
        let value = removed.value.clone();

        if self.length == 1 {
            tracing::trace!(
                tombstones = self.cells.len(),
                "last live cell removed, starting a fresh trie"
            );
            return Ok((Self::empty(*self.cells.config()), value));
        }

        let (prev, next) = (removed.prev, removed.next);
        let mut cells = self.cells.clone();
        let first = match prev {
            Some(prev) => {
                let linked = cells.get(prev)?.with_next(next);
                cells = cells.set(prev, linked)?;
                self.first
            }
            None => next,
        };
        let last = match next {
            Some(next) => {
                let linked = cells.get(next)?.with_prev(prev);
                cells = cells.set(next, linked)?;
                self.last
            }
            None => prev,
        };

        Ok((
            Self {
                cells,
                first,
                last,
                length: self.length - 1,
            },
            value,
        ))
    }

    fn set(&self, index: usize, value: T) -> Result<(Self, T), CollectionError> {
        let slot = self.slot_at(index)?;
        let cell = self.cell(slot)?;
        let previous = cell.value.clone();
        let cells = self.cells.set(
            slot,
            LinkCell {
                prev: cell.prev,
                next: cell.next,
                value,
            },
        )?;
        Ok((
            Self {
                cells,
                first: self.first,
                last: self.last,
                length: self.length,
            },
            previous,
        ))
    }
}

impl<T> Clone for ListVersion<T> {
    fn clone(&self) -> Self {
        Self {
            cells: self.cells.clone(),
            first: self.first,
            last: self.last,
            length: self.length,
        }
    }
}

impl<'a, T> IntoIterator for &'a ListVersion<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: fmt::Debug> fmt::Debug for ListVersion<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_list().entries(self.iter()).finish()
    }
}

// =============================================================================
// PersistentLinkedList Definition
// =============================================================================

/// Doubly-linked list with a linear version history.
///
/// # Time Complexity
///
/// | Operation                  | Complexity       |
/// |----------------------------|------------------|
/// | `push_back` / `push_front` | O(log_W N)       |
/// | `pop_back` / `pop_front`   | O(log_W N)       |
/// | `get` / `set`              | O(N + log_W N)   |
/// | `insert` / `remove`        | O(N + log_W N)   |
/// | `undo` / `redo`            | O(1)             |
///
/// `N` counts allocated slots, so tombstones weigh on the trie depth.
pub struct PersistentLinkedList<T> {
    history: History<ListVersion<T>>,
}

impl<T> PersistentLinkedList<T> {
    /// Creates an empty list with an unbounded trie of fanout 16.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(TrieConfig::default())
    }

    /// Creates an empty list laid out by `config`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use retrace::persistent::{PersistentLinkedList, TrieConfig};
    ///
    /// let mut list = PersistentLinkedList::with_config(TrieConfig::compact());
    /// for value in 0..4096 {
    ///     list.push_back(value).unwrap();
    /// }
    /// assert!(list.is_full());
    /// assert!(list.push_back(4096).unwrap_err().is_capacity_exceeded());
    /// ```
    #[must_use]
    pub fn with_config(config: TrieConfig) -> Self {
        Self {
            history: History::new(ListVersion::empty(config)),
        }
    }

    #[inline]
    fn current(&self) -> &ListVersion<T> {
        self.history.current()
    }

    /// The trie layout of this list.
    #[must_use]
    pub fn config(&self) -> &TrieConfig {
        self.current().cells.config()
    }

    /// Number of values in the current version.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.current().len()
    }

    /// Returns `true` if the current version is empty.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.current().is_empty()
    }

    /// Returns the value at `index`, walking from the nearer end.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::IndexOutOfBounds`] if `index >= len()`.
    pub fn get(&self, index: usize) -> Result<&T, CollectionError> {
        self.current().get(index)
    }

    /// Head value.
    #[must_use]
    pub fn first(&self) -> Option<&T> {
        self.iter().next()
    }

    /// Tail value.
    #[must_use]
    pub fn last(&self) -> Option<&T> {
        self.iter().next_back()
    }

    /// Slot of the head cell.
    #[must_use]
    pub fn first_slot(&self) -> Option<usize> {
        self.current().first_slot()
    }

    /// Slot of the tail cell.
    #[must_use]
    pub fn last_slot(&self) -> Option<usize> {
        self.current().last_slot()
    }

    /// Slots taken in the current trie, tombstones included.
    #[must_use]
    pub fn allocated_slots(&self) -> usize {
        self.current().allocated_slots()
    }

    /// Slots in the current trie whose cells left the chain.
    #[must_use]
    pub fn tombstones(&self) -> usize {
        self.current().tombstones()
    }

    /// Returns `true` if the trie has a depth cap and no free slot is left.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.current().cells.is_full()
    }

    /// Iterates over the current version in chain order.
    #[must_use]
    pub fn iter(&self) -> Iter<'_, T> {
        self.current().iter()
    }

    /// A detached handle to the current version.
    #[must_use]
    pub fn snapshot(&self) -> ListVersion<T> {
        self.current().clone()
    }

    /// Versions reachable through undo and redo, the current one included.
    #[must_use]
    pub const fn version_count(&self) -> usize {
        self.history.version_count()
    }
}

impl<T: Clone> PersistentLinkedList<T> {
    /// Appends `value` after the tail.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::CapacityExceeded`] if the trie is capped
    /// and full.
    pub fn push_back(&mut self, value: T) -> Result<(), CollectionError> {
        let version = self.current().push_back(value)?;
        self.history.commit(version);
        Ok(())
    }

    /// Prepends `value` before the head.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::CapacityExceeded`] if the trie is capped
    /// and full.
    pub fn push_front(&mut self, value: T) -> Result<(), CollectionError> {
        if self.is_empty() {
            self.push_back(value)
        } else {
            self.insert(0, value)
        }
    }

    /// Inserts `value` before the element at `index`.
    ///
    /// Only positions of existing elements are accepted; use
    /// [`push_back`](Self::push_back) to append.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::IndexOutOfBounds`] if `index >= len()`,
    /// or [`CollectionError::CapacityExceeded`] if no slot is free.
    pub fn insert(&mut self, index: usize, value: T) -> Result<(), CollectionError> {
        let version = self.current().insert(index, value)?;
        self.history.commit(version);
        Ok(())
    }

    /// Unlinks and returns the element at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::IndexOutOfBounds`] if `index >= len()`.
    pub fn remove(&mut self, index: usize) -> Result<T, CollectionError> {
        let (version, value) = self.current().remove(index)?;
        self.history.commit(version);
        Ok(value)
    }

    /// Removes and returns the head value.
    pub fn pop_front(&mut self) -> Option<T> {
        self.remove(0).ok()
    }

    /// Removes and returns the tail value.
    pub fn pop_back(&mut self) -> Option<T> {
        let index = self.len().checked_sub(1)?;
        self.remove(index).ok()
    }

    /// Replaces the element at `index` and returns the old one.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::IndexOutOfBounds`] if `index >= len()`.
    pub fn set(&mut self, index: usize, value: T) -> Result<T, CollectionError> {
        let (version, previous) = self.current().set(index, value)?;
        self.history.commit(version);
        Ok(previous)
    }

    /// Commits an empty version on a fresh trie.
    pub fn clear(&mut self) {
        let config = *self.config();
        self.history.commit(ListVersion::empty(config));
    }
}

impl<T: PartialEq> PersistentLinkedList<T> {
    /// Position of the first element equal to `value`.
    #[must_use]
    pub fn index_of(&self, value: &T) -> Option<usize> {
        self.iter().position(|element| element == value)
    }

    /// Returns `true` if some element equals `value`.
    #[must_use]
    pub fn contains(&self, value: &T) -> bool {
        self.index_of(value).is_some()
    }
}

// =============================================================================
// Iterator
// =============================================================================

/// Chain-order iterator over a list version.
///
/// Forward steps follow `next` from the head, backward steps follow `prev`
/// from the tail; the two ends meet after `len()` cells.
pub struct Iter<'a, T> {
    cells: &'a RadixTrie<LinkCell<T>>,
    front: Option<usize>,
    back: Option<usize>,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let cell = self.cells.get(self.front?).ok()?;
        self.front = cell.next;
        self.remaining -= 1;
        Some(&cell.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> DoubleEndedIterator for Iter<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let cell = self.cells.get(self.back?).ok()?;
        self.back = cell.prev;
        self.remaining -= 1;
        Some(&cell.value)
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

// =============================================================================
// Trait Implementations
// =============================================================================

impl<T> Undoable for PersistentLinkedList<T> {
    fn undo(&mut self) -> bool {
        self.history.undo()
    }

    fn redo(&mut self) -> bool {
        self.history.redo()
    }

    fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    fn can_redo(&self) -> bool {
        self.history.can_redo()
    }
}

impl<T> Clone for PersistentLinkedList<T> {
    fn clone(&self) -> Self {
        Self {
            history: self.history.clone(),
        }
    }
}

impl<T> Default for PersistentLinkedList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> FromIterator<T> for PersistentLinkedList<T> {
    /// Builds the whole chain as the initial version.
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let config = TrieConfig::default();
        let values: Vec<T> = iter.into_iter().collect();
        Self {
            history: History::new(ListVersion::from_values(config, values)),
        }
    }
}

impl<'a, T> IntoIterator for &'a PersistentLinkedList<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: PartialEq> PartialEq for PersistentLinkedList<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for PersistentLinkedList<T> {}

impl<T: fmt::Debug> fmt::Debug for PersistentLinkedList<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_list().entries(self.iter()).finish()
    }
}

impl<T: fmt::Display> fmt::Display for PersistentLinkedList<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "[")?;
        for (position, element) in self.iter().enumerate() {
            if position > 0 {
                write!(formatter, ", ")?;
            }
            write!(formatter, "{element}")?;
        }
        write!(formatter, "]")
    }
}

// =============================================================================
// Tests
// =============================================================================
