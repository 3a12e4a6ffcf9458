//! Persistent array with undo/redo.
//!
//! [`PersistentArray`] maps index `i` to slot `i` of a [`RadixTrie`]. Each
//! mutating call builds one new trie version by path copying and commits it
//! to the array's [`History`]; `undo` and `redo` move between versions.
//!
//! # Examples
//!
//! ```rust
//! use retrace::persistent::{PersistentArray, Undoable};
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
//!
//! array.redo();
//! assert_eq!(array.to_string(), "[1, 2]");
//! ```
//!
//! Inserting or removing in the middle rebuilds the tail of the trie, but
//! still produces a single version:
//!
//! ```rust
//! use retrace::persistent::{PersistentArray, Undoable};
//!
//! let mut array: PersistentArray<i32> = [3, 7, 6, 9, 1].into_iter().collect();
//! array.insert(3, 8).unwrap();
//! assert_eq!(array.to_string(), "[3, 7, 6, 8, 9, 1]");
//!
//! array.undo();
//! assert_eq!(array.to_string(), "[3, 7, 6, 9, 1]");
//! ```

use std::fmt;
use std::iter::FusedIterator;

use super::{CollectionError, History, RadixTrie, TrieConfig, Undoable};

// =============================================================================
// PersistentArray Definition
// =============================================================================

/// Indexed sequence with a linear version history.
///
/// # Time Complexity
///
/// | Operation        | Complexity   |
/// |------------------|--------------|
/// | `get`            | O(log_W N)   |
/// | `set`            | O(log_W N)   |
/// | `push` / `pop`   | O(log_W N)   |
/// | `insert`         | O(N log_W N) |
/// | `remove`         | O(N log_W N) |
/// | `undo` / `redo`  | O(1)         |
/// | `clone`          | O(1)         |
pub struct PersistentArray<T> {
    history: History<RadixTrie<T>>,
}

impl<T> PersistentArray<T> {
    /// Creates an empty array with the default initial size of 8.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(TrieConfig::default())
    }

    /// Creates an empty array whose trie starts deep enough for
    /// `initial_size` values.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use retrace::persistent::PersistentArray;
    ///
    /// let array: PersistentArray<u8> = PersistentArray::with_capacity(1000);
    /// assert_eq!(array.snapshot().depth(), 3);
    /// ```
    #[must_use]
    pub fn with_capacity(initial_size: usize) -> Self {
        Self::with_config(TrieConfig::with_initial_size(initial_size))
    }

    /// Creates an empty array laid out by `config`.
    #[must_use]
    pub fn with_config(config: TrieConfig) -> Self {
        Self::from_version(RadixTrie::with_config(config))
    }

    const fn from_version(version: RadixTrie<T>) -> Self {
        Self {
            history: History::new(version),
        }
    }

    #[inline]
    fn current(&self) -> &RadixTrie<T> {
        self.history.current()
    }

    /// The trie layout used by every version of this array.
    #[must_use]
    pub fn config(&self) -> &TrieConfig {
        self.current().config()
    }

    /// Number of elements in the current version.
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

    /// Returns the element at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::IndexOutOfBounds`] if `index >= len()`.
    pub fn get(&self, index: usize) -> Result<&T, CollectionError> {
        self.current().get(index)
    }

    /// First element, if any.
    #[must_use]
    pub fn first(&self) -> Option<&T> {
        self.current().first()
    }

    /// Last element, if any.
    #[must_use]
    pub fn last(&self) -> Option<&T> {
        self.current().last()
    }

    /// Iterates over the current version.
    ///
    /// The iterator borrows the array, so the version it walks cannot
    /// change underneath it.
    #[must_use]
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            trie: self.current(),
            front: 0,
            back: self.len(),
        }
    }

    /// A detached handle to the current version.
    ///
    /// The snapshot is immutable and stays valid whatever happens to the
    /// array afterwards.
    #[must_use]
    pub fn snapshot(&self) -> RadixTrie<T> {
        self.current().clone()
    }

    /// Versions reachable through undo and redo, the current one included.
    #[must_use]
    pub const fn version_count(&self) -> usize {
        self.history.version_count()
    }
}

impl<T: Clone> PersistentArray<T> {
    fn commit(&mut self, version: RadixTrie<T>) {
        self.history.commit(version);
    }

    /// Replaces the element at `index` and returns the old one.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::IndexOutOfBounds`] if `index >= len()`.
    pub fn set(&mut self, index: usize, value: T) -> Result<T, CollectionError> {
        let previous = self.get(index)?.clone();
        let version = self.current().set(index, value)?;
        self.commit(version);
        Ok(previous)
    }

    /// Appends `value` at the end.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::CapacityExceeded`] if the configured depth
    /// cap is reached.
    pub fn push(&mut self, value: T) -> Result<(), CollectionError> {
        let version = self.current().append(value)?;
        self.commit(version);
        Ok(())
    }

    /// Removes and returns the last element.
    pub fn pop(&mut self) -> Option<T> {
        let (version, value) = self.current().pop_last().ok()?;
        self.commit(version);
        Some(value)
    }

    /// Returns a copy with `value` appended, leaving `self` untouched.
    ///
    /// The copy shares the receiver's history, so its `undo` steps back to
    /// the receiver's current version.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::CapacityExceeded`] if the configured depth
    /// cap is reached.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use retrace::persistent::{PersistentArray, Undoable};
    ///
    /// let base: PersistentArray<i32> = [1, 2].into_iter().collect();
    /// let mut grown = base.conj(3).unwrap();
    /// assert_eq!(base.to_string(), "[1, 2]");
    /// assert_eq!(grown.to_string(), "[1, 2, 3]");
    ///
    /// grown.undo();
    /// assert_eq!(grown, base);
    /// ```
    pub fn conj(&self, value: T) -> Result<Self, CollectionError> {
        let mut next = self.clone();
        next.push(value)?;
        Ok(next)
    }

    /// Returns a copy with the element at `index` replaced, leaving `self`
    /// untouched.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::IndexOutOfBounds`] if `index >= len()`.
    pub fn assoc(&self, index: usize, value: T) -> Result<Self, CollectionError> {
        let mut next = self.clone();
        next.set(index, value)?;
        Ok(next)
    }

    /// Inserts `value` before the element at `index`.
    ///
    /// Only positions of existing elements are accepted; use
    /// [`push`](Self::push) to append.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::IndexOutOfBounds`] if `index >= len()`,
    /// or [`CollectionError::CapacityExceeded`] if the result does not fit
    /// under the depth cap.
    pub fn insert(&mut self, index: usize, value: T) -> Result<(), CollectionError> {
        let current = self.current();
        if index >= current.len() {
            return Err(CollectionError::out_of_bounds(index, current.len()));
        }
        let head = current.prefix_copy(index)?.append(value)?;
        let version = replay(head, current.iter().skip(index).cloned())?;
        self.commit(version);
        Ok(())
    }

    /// Removes and returns the element at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::IndexOutOfBounds`] if `index >= len()`.
    pub fn remove(&mut self, index: usize) -> Result<T, CollectionError> {
        let current = self.current();
        let removed = current.get(index)?.clone();
        let version = if index + 1 == current.len() {
            current.pop_last()?.0
        } else {
            replay(
                current.prefix_copy(index)?,
                current.iter().skip(index + 1).cloned(),
            )?
        };
        self.commit(version);
        Ok(removed)
    }

    /// Commits an empty version. The cleared contents come back with
    /// `undo`.
    pub fn clear(&mut self) {
        let config = *self.config();
        self.commit(RadixTrie::with_config(config));
    }

    /// Appends every value as a single version.
    ///
    /// Nothing is committed when `values` is empty.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::CapacityExceeded`] if the values do not
    /// fit; the array is left unchanged.
    pub fn extend_from<I>(&mut self, values: I) -> Result<(), CollectionError>
    where
        I: IntoIterator<Item = T>,
    {
        let mut values = values.into_iter().peekable();
        if values.peek().is_none() {
            return Ok(());
        }
        let version = values.try_fold(self.current().clone(), |trie, value| trie.append(value))?;
        self.commit(version);
        Ok(())
    }

    /// Inserts every value before `index` as a single version.
    ///
    /// `index == len()` appends. Nothing is committed when `values` is
    /// empty.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::IndexOutOfBounds`] if `index > len()`.
    pub fn insert_all<I>(&mut self, index: usize, values: I) -> Result<(), CollectionError>
    where
        I: IntoIterator<Item = T>,
    {
        let current = self.current();
        if index > current.len() {
            return Err(CollectionError::out_of_bounds(index, current.len()));
        }
        let mut values = values.into_iter().peekable();
        if values.peek().is_none() {
            return Ok(());
        }
        let head = replay(current.prefix_copy(index)?, values)?;
        let version = replay(head, current.iter().skip(index).cloned())?;
        self.commit(version);
        Ok(())
    }

    /// Copies `from..to` into a new array with a single version.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::IndexOutOfBounds`] unless
    /// `from <= to <= len()`.
    pub fn sub_list(&self, from: usize, to: usize) -> Result<Self, CollectionError> {
        let current = self.current();
        if to > current.len() {
            return Err(CollectionError::out_of_bounds(to, current.len()));
        }
        if from > to {
            return Err(CollectionError::out_of_bounds(from, to));
        }
        let values = current.iter().skip(from).take(to - from).cloned().collect();
        RadixTrie::from_values(*current.config(), values).map(Self::from_version)
    }

    /// Keeps only the elements matching `predicate`, as a single version.
    ///
    /// Returns the number of elements removed; nothing is committed when
    /// that number is zero.
    ///
    /// # Errors
    ///
    /// Propagates [`CollectionError::CapacityExceeded`] from rebuilding the
    /// trie under the array's config. The array is left unchanged.
    pub fn retain<F>(&mut self, mut predicate: F) -> Result<usize, CollectionError>
    where
        F: FnMut(&T) -> bool,
    {
        let current = self.current();
        let kept: Vec<T> = current
            .iter()
            .filter(|value| predicate(value))
            .cloned()
            .collect();
        let removed = current.len() - kept.len();
        if removed > 0 {
            self.reset(kept)?;
        }
        Ok(removed)
    }

    /// Commits a single version holding exactly `values`.
    pub(crate) fn reset(&mut self, values: Vec<T>) -> Result<(), CollectionError> {
        let version = RadixTrie::from_values(*self.config(), values)?;
        self.commit(version);
        Ok(())
    }

    /// Forgets versions waiting on the redo stack.
    pub(crate) fn discard_redo(&mut self) {
        self.history.discard_redo();
    }

    /// Rewrites slot `index` of the current version without committing.
    pub(crate) fn amend(&mut self, index: usize, value: T) -> Result<(), CollectionError> {
        let version = self.current().set(index, value)?;
        self.history.amend(version);
        Ok(())
    }
}

impl<T: PartialEq> PersistentArray<T> {
    /// Index of the first element equal to `value`.
    #[must_use]
    pub fn index_of(&self, value: &T) -> Option<usize> {
        self.iter().position(|element| element == value)
    }

    /// Index of the last element equal to `value`.
    #[must_use]
    pub fn last_index_of(&self, value: &T) -> Option<usize> {
        self.iter().rposition(|element| element == value)
    }

    /// Returns `true` if some element equals `value`.
    #[must_use]
    pub fn contains(&self, value: &T) -> bool {
        self.index_of(value).is_some()
    }

    /// Returns `true` if every item of `values` is contained.
    pub fn contains_all<'a, I>(&self, values: I) -> bool
    where
        I: IntoIterator<Item = &'a T>,
        T: 'a,
    {
        values.into_iter().all(|value| self.contains(value))
    }
}

impl<T: Clone + PartialEq> PersistentArray<T> {
    /// Removes the first element equal to `value`.
    ///
    /// Returns `false` and commits nothing when no element matches.
    pub fn remove_item(&mut self, value: &T) -> bool {
        self.index_of(value).is_some_and(|index| self.remove(index).is_ok())
    }
}

/// Appends `values` to `trie` one by one.
fn replay<T, I>(trie: RadixTrie<T>, values: I) -> Result<RadixTrie<T>, CollectionError>
where
    T: Clone,
    I: IntoIterator<Item = T>,
{
    values.into_iter().try_fold(trie, |trie, value| trie.append(value))
}

// =============================================================================
// Iterator
// =============================================================================

/// Borrowing double-ended iterator over an array version.
pub struct Iter<'a, T> {
    trie: &'a RadixTrie<T>,
    front: usize,
    back: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.front >= self.back {
            return None;
        }
        let value = self.trie.get(self.front).ok();
        self.front += 1;
        value
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.back - self.front;
        (remaining, Some(remaining))
    }
}

impl<T> DoubleEndedIterator for Iter<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.front >= self.back {
            return None;
        }
        self.back -= 1;
        self.trie.get(self.back).ok()
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

// =============================================================================
// Trait Implementations
// =============================================================================

impl<T> Undoable for PersistentArray<T> {
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

impl<T> Clone for PersistentArray<T> {
    fn clone(&self) -> Self {
        Self {
            history: self.history.clone(),
        }
    }
}

impl<T> Default for PersistentArray<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> FromIterator<T> for PersistentArray<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let values: Vec<T> = iter.into_iter().collect();
        let config = TrieConfig::with_initial_size(values.len());
        Self::from_version(RadixTrie::from_values_uncapped(config, values))
    }
}

impl<'a, T> IntoIterator for &'a PersistentArray<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: PartialEq> PartialEq for PersistentArray<T> {
    fn eq(&self, other: &Self) -> bool {
        self.current() == other.current()
    }
}

impl<T: Eq> Eq for PersistentArray<T> {}

impl<T: fmt::Debug> fmt::Debug for PersistentArray<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_list().entries(self.iter()).finish()
    }
}

impl<T: fmt::Display> fmt::Display for PersistentArray<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "[")?;
        let mut first = true;
        for element in self {
            if first {
                first = false;
            } else {
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

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn array_of(values: &[i32]) -> PersistentArray<i32> {
        let mut array = PersistentArray::new();
        array.extend_from(values.iter().copied()).unwrap();
        array
    }

    #[rstest]
    fn test_push_commits_one_version_each() {
        let mut array = PersistentArray::new();
        array.push(1).unwrap();
        array.push(2).unwrap();
        assert_eq!(array.version_count(), 3);
        assert_eq!(array.get(1), Ok(&2));
    }

    #[rstest]
    fn test_set_returns_previous_value() {
        let mut array = array_of(&[1, 2, 3]);
        assert_eq!(array.set(1, 20), Ok(2));
        assert_eq!(array.to_string(), "[1, 20, 3]");
        array.undo();
        assert_eq!(array.to_string(), "[1, 2, 3]");
    }

    #[rstest]
    fn test_failed_set_commits_nothing() {
        let mut array = array_of(&[1]);
        let versions = array.version_count();
        assert!(array.set(5, 0).is_err());
        assert_eq!(array.version_count(), versions);
    }

    #[rstest]
    #[case(0, "[9, 1, 2, 3]")]
    #[case(1, "[1, 9, 2, 3]")]
    #[case(2, "[1, 2, 9, 3]")]
    fn test_insert_positions(#[case] index: usize, #[case] expected: &str) {
        let mut array = array_of(&[1, 2, 3]);
        array.insert(index, 9).unwrap();
        assert_eq!(array.to_string(), expected);
        assert_eq!(array.version_count(), 3);
    }

    #[rstest]
    #[case(3)]
    #[case(usize::MAX)]
    fn test_insert_rejects_length_and_beyond(#[case] index: usize) {
        let mut array = array_of(&[1, 2, 3]);
        assert_eq!(
            array.insert(index, 0),
            Err(CollectionError::out_of_bounds(index, 3))
        );
    }

    #[rstest]
    #[case(0, "[2, 3]")]
    #[case(1, "[1, 3]")]
    #[case(2, "[1, 2]")]
    fn test_remove_positions(#[case] index: usize, #[case] expected: &str) {
        let mut array = array_of(&[1, 2, 3]);
        let removed = array.remove(index).unwrap();
        assert_eq!(removed, i32::try_from(index).unwrap() + 1);
        assert_eq!(array.to_string(), expected);
    }

    #[rstest]
    fn test_pop_and_undo() {
        let mut array = array_of(&[1, 2]);
        assert_eq!(array.pop(), Some(2));
        assert_eq!(array.pop(), Some(1));
        assert_eq!(array.pop(), None);
        array.undo();
        assert_eq!(array.to_string(), "[1]");
    }

    #[rstest]
    fn test_clear_then_undo_restores() {
        let mut array = array_of(&[1, 2, 3]);
        array.clear();
        assert!(array.is_empty());
        array.undo();
        assert_eq!(array.to_string(), "[1, 2, 3]");
    }

    #[rstest]
    fn test_extend_from_empty_commits_nothing() {
        let mut array = array_of(&[1]);
        array.extend_from(std::iter::empty()).unwrap();
        assert_eq!(array.version_count(), 2);
    }

    #[rstest]
    #[case(0, "[7, 8, 1, 2]")]
    #[case(1, "[1, 7, 8, 2]")]
    #[case(2, "[1, 2, 7, 8]")]
    fn test_insert_all(#[case] index: usize, #[case] expected: &str) {
        let mut array = array_of(&[1, 2]);
        array.insert_all(index, [7, 8]).unwrap();
        assert_eq!(array.to_string(), expected);
        assert_eq!(array.version_count(), 3);
    }

    #[rstest]
    fn test_search_operations() {
        let array = array_of(&[4, 5, 4, 6]);
        assert_eq!(array.index_of(&4), Some(0));
        assert_eq!(array.last_index_of(&4), Some(2));
        assert_eq!(array.index_of(&9), None);
        assert!(array.contains(&6));
        assert!(array.contains_all(&[4, 6]));
        assert!(!array.contains_all(&[4, 7]));
    }

    #[rstest]
    fn test_remove_item() {
        let mut array = array_of(&[4, 5, 4]);
        assert!(array.remove_item(&4));
        assert_eq!(array.to_string(), "[5, 4]");
        assert!(!array.remove_item(&9));
        assert_eq!(array.version_count(), 3);
    }

    #[rstest]
    fn test_sub_list_has_single_version() {
        let array = array_of(&[0, 1, 2, 3, 4]);
        let sub = array.sub_list(1, 4).unwrap();
        assert_eq!(sub.to_string(), "[1, 2, 3]");
        assert_eq!(sub.version_count(), 1);
        assert!(array.sub_list(3, 2).is_err());
        assert!(array.sub_list(0, 6).is_err());
    }

    #[rstest]
    fn test_retain() {
        let mut array = array_of(&[1, 2, 3, 4, 5]);
        assert_eq!(array.retain(|value| value % 2 == 1), Ok(2));
        assert_eq!(array.to_string(), "[1, 3, 5]");
        assert_eq!(array.retain(|_| true), Ok(0));
        array.undo();
        assert_eq!(array.len(), 5);
    }

    #[rstest]
    fn test_conj_leaves_receiver_alone() {
        let base = array_of(&[1, 2]);
        let grown = base.conj(3).unwrap();
        assert_eq!(base.to_string(), "[1, 2]");
        assert_eq!(base.version_count(), 2);
        assert_eq!(grown.to_string(), "[1, 2, 3]");
        assert_eq!(grown.version_count(), 3);
    }

    #[rstest]
    fn test_assoc_leaves_receiver_alone() {
        let base = array_of(&[1, 2]);
        let mut changed = base.assoc(0, 10).unwrap();
        assert_eq!(base.to_string(), "[1, 2]");
        assert_eq!(changed.to_string(), "[10, 2]");
        assert!(changed.undo());
        assert_eq!(changed, base);
        assert!(!base.can_redo());
    }

    #[rstest]
    fn test_assoc_out_of_bounds() {
        let base = array_of(&[1]);
        assert_eq!(
            base.assoc(1, 5).map(|array| array.len()),
            Err(CollectionError::out_of_bounds(1, 1))
        );
    }

    #[rstest]
    fn test_amend_keeps_history_height() {
        let mut array = array_of(&[1, 2]);
        array.amend(0, 10).unwrap();
        assert_eq!(array.to_string(), "[10, 2]");
        assert_eq!(array.version_count(), 2);
    }

    #[rstest]
    fn test_reset_commits_one_version() {
        let mut array = array_of(&[1, 2]);
        array.reset(vec![7; 40]).unwrap();
        assert_eq!(array.len(), 40);
        array.undo();
        assert_eq!(array.to_string(), "[1, 2]");
    }

    #[rstest]
    fn test_iter_is_double_ended() {
        let array = array_of(&[1, 2, 3, 4]);
        let mut iterator = array.iter();
        assert_eq!(iterator.next(), Some(&1));
        assert_eq!(iterator.next_back(), Some(&4));
        assert_eq!(iterator.len(), 2);
        assert_eq!(iterator.rev().copied().collect::<Vec<_>>(), vec![3, 2]);
    }

    #[rstest]
    fn test_snapshot_survives_mutation() {
        let mut array = array_of(&[1, 2]);
        let snapshot = array.snapshot();
        array.push(3).unwrap();
        array.set(0, 100).unwrap();
        assert_eq!(snapshot.iter().copied().collect::<Vec<_>>(), vec![1, 2]);
    }

    #[rstest]
    fn test_display_and_debug() {
        let array: PersistentArray<i32> = PersistentArray::new();
        assert_eq!(array.to_string(), "[]");
        let array = array_of(&[1, 2]);
        assert_eq!(format!("{array:?}"), "[1, 2]");
    }

    #[rstest]
    fn test_capped_array_reports_capacity() {
        let config = TrieConfig::builder()
            .bits(1)
            .initial_size(1)
            .max_depth(2)
            .build()
            .unwrap();
        let mut array = PersistentArray::with_config(config);
        for value in 0..4 {
            array.push(value).unwrap();
        }
        assert_eq!(
            array.push(4),
            Err(CollectionError::CapacityExceeded { capacity: 4 })
        );
        assert_eq!(array.len(), 4);
    }
}
