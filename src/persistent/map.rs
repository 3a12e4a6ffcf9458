//! Persistent hash map with composite undo/redo.
//!
//! [`PersistentMap`] is a fixed table of [`TABLE_SIZE`] buckets. Each bucket
//! is a [`PersistentLinkedList`] of entries with its own version history,
//! and the table itself is a [`PersistentArray`] of those lists.
//!
//! A mutation advances exactly one history and records which one on a mark
//! stack:
//!
//! - `put` / `remove` advance the history of one bucket;
//! - `clear` advances the history of the table;
//! - `put_all` records its individual puts, then one batch mark covering
//!   them.
//!
//! `undo` pops a mark and steps back the history it names; `redo` does the
//! reverse. When a bucket moves, the table's current version is rewritten
//! in place to hold the bucket's new handle, without adding a table
//! version.
//!
//! # Examples
//!
//! ```rust
//! use retrace::persistent::{PersistentMap, Undoable};
//!
//! let mut map = PersistentMap::new();
//! map.put("key1", 1).unwrap();
//! map.put("key2", 2).unwrap();
//! map.put("key3", 3).unwrap();
//!
//! map.undo();
//! assert!(!map.contains_key("key3"));
//! assert_eq!(map.len(), 2);
//!
//! map.redo();
//! assert_eq!(map.get("key3"), Some(&3));
//! ```

use std::borrow::Borrow;
use std::fmt;
use std::hash::{Hash, Hasher};

use super::stack::PersistentStack;
use super::{CollectionError, PersistentArray, PersistentLinkedList, TrieConfig, Undoable};

/// Number of buckets in every map.
pub const TABLE_SIZE: usize = 32;

#[cfg(feature = "fxhash")]
type BucketHasher = rustc_hash::FxHasher;

#[cfg(all(feature = "ahash", not(feature = "fxhash")))]
type BucketHasher = ahash::AHasher;

#[cfg(not(any(feature = "fxhash", feature = "ahash")))]
type BucketHasher = std::collections::hash_map::DefaultHasher;

/// Bucket a key is stored in: its hash masked to the table size.
///
/// The hasher is `std`'s `DefaultHasher`, or `FxHasher` / `AHasher` when
/// the `fxhash` / `ahash` feature is enabled. All three are deterministic
/// within a build.
///
/// # Examples
///
/// ```rust
/// use retrace::persistent::{TABLE_SIZE, bucket_index};
///
/// assert!(bucket_index("key") < TABLE_SIZE);
/// assert_eq!(bucket_index("key"), bucket_index(&"key".to_string()));
/// ```
#[must_use]
pub fn bucket_index<Q: Hash + ?Sized>(key: &Q) -> usize {
    let mut hasher = BucketHasher::default();
    key.hash(&mut hasher);
    // Truncation is fine: only the low bits are kept.
    #[allow(clippy::cast_possible_truncation)]
    let hash = hasher.finish() as usize;
    hash & (TABLE_SIZE - 1)
}

// =============================================================================
// Entries and Marks
// =============================================================================

/// A key-value pair stored in a bucket.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Entry<K, V> {
    key: K,
    value: V,
}

impl<K, V> Entry<K, V> {
    /// The entry's key.
    #[must_use]
    pub const fn key(&self) -> &K {
        &self.key
    }

    /// The entry's value.
    #[must_use]
    pub const fn value(&self) -> &V {
        &self.value
    }
}

impl<K: fmt::Display, V: fmt::Display> fmt::Display for Entry<K, V> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}={}", self.key, self.value)
    }
}

/// Which history a recorded mutation advanced.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Mark {
    /// The history of one bucket.
    Bucket(usize),
    /// The history of the table.
    Clear,
    /// The next `n` marks below, recorded by one `put_all`.
    Batch(usize),
}

type Bucket<K, V> = PersistentLinkedList<Entry<K, V>>;

// =============================================================================
// PersistentMap Definition
// =============================================================================

/// Chained hash map with a linear, composite version history.
///
/// # Time Complexity
///
/// | Operation         | Complexity                  |
/// |-------------------|-----------------------------|
/// | `get`             | O(log 32 + bucket length)   |
/// | `put` / `remove`  | O(bucket length · log)      |
/// | `clear`           | O(32)                       |
/// | `len`             | O(32)                       |
/// | `undo` / `redo`   | O(1), O(n) for a batch of n |
pub struct PersistentMap<K, V> {
    table: PersistentArray<Bucket<K, V>>,
    undo_marks: PersistentStack<Mark>,
    redo_marks: PersistentStack<Mark>,
    bucket_config: TrieConfig,
}

impl<K, V> PersistentMap<K, V> {
    /// Creates an empty map whose buckets use the default trie layout.
    #[must_use]
    pub fn new() -> Self {
        Self::with_bucket_config(TrieConfig::default())
    }

    /// Creates an empty map whose bucket lists are laid out by `config`.
    ///
    /// A capped config limits how many slots each bucket can allocate.
    #[must_use]
    pub fn with_bucket_config(config: TrieConfig) -> Self {
        let table = std::iter::repeat_with(|| PersistentLinkedList::with_config(config))
            .take(TABLE_SIZE)
            .collect();
        Self::from_table(table, config)
    }

    fn from_table(table: PersistentArray<Bucket<K, V>>, bucket_config: TrieConfig) -> Self {
        Self {
            table,
            undo_marks: PersistentStack::new(),
            redo_marks: PersistentStack::new(),
            bucket_config,
        }
    }

    /// The trie layout of the bucket lists.
    #[must_use]
    pub const fn bucket_config(&self) -> &TrieConfig {
        &self.bucket_config
    }

    /// Number of entries, summed over all buckets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.table.iter().map(PersistentLinkedList::len).sum()
    }

    /// Returns `true` if no bucket holds an entry.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.table.iter().all(PersistentLinkedList::is_empty)
    }

    /// Iterates over the entries, bucket by bucket.
    pub fn entries(&self) -> impl Iterator<Item = &Entry<K, V>> {
        self.table.iter().flat_map(PersistentLinkedList::iter)
    }

    /// Iterates over key-value pairs, bucket by bucket.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.entries().map(|entry| (&entry.key, &entry.value))
    }

    /// Iterates over the keys.
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.entries().map(Entry::key)
    }

    /// Iterates over the values.
    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.entries().map(Entry::value)
    }

    /// Number of marks on the undo stack. A batch counts its own mark plus
    /// one per put.
    #[must_use]
    pub const fn undo_depth(&self) -> usize {
        self.undo_marks.len()
    }

    /// Number of marks waiting for `redo`.
    #[must_use]
    pub const fn redo_depth(&self) -> usize {
        self.redo_marks.len()
    }

    fn record(&mut self, mark: Mark) {
        self.undo_marks = self.undo_marks.push(mark);
        self.redo_marks = PersistentStack::new();
        self.table.discard_redo();
        tracing::debug!(?mark, undo_depth = self.undo_depth(), "recorded map mutation");
    }

    /// Steps bucket `index` through its own history and stores the moved
    /// handle in the table's current version.
    fn navigate_bucket<F>(&mut self, index: usize, step: F) -> bool
    where
        F: FnOnce(&mut Bucket<K, V>) -> bool,
    {
        let Ok(bucket) = self.table.get(index) else {
            return false;
        };
        let mut bucket = bucket.clone();
        step(&mut bucket) && self.table.amend(index, bucket).is_ok()
    }

    fn undo_mark(&mut self, mark: Mark) {
        match mark {
            Mark::Bucket(index) => {
                self.navigate_bucket(index, |bucket| bucket.undo());
            }
            Mark::Clear => {
                self.table.undo();
            }
            Mark::Batch(count) => {
                for _ in 0..count {
                    let Some((inner, rest)) = self.undo_marks.pop() else {
                        break;
                    };
                    self.undo_marks = rest;
                    self.undo_mark(inner);
                    self.redo_marks = self.redo_marks.push(inner);
                }
            }
        }
    }

    fn redo_mark(&mut self, mark: Mark) {
        match mark {
            Mark::Bucket(index) => {
                self.navigate_bucket(index, |bucket| bucket.redo());
            }
            Mark::Clear => {
                self.table.redo();
            }
            Mark::Batch(count) => {
                for _ in 0..count {
                    let Some((inner, rest)) = self.redo_marks.pop() else {
                        break;
                    };
                    self.redo_marks = rest;
                    self.redo_mark(inner);
                    self.undo_marks = self.undo_marks.push(inner);
                }
            }
        }
    }
}

impl<K, V> PersistentMap<K, V>
where
    K: Hash + Eq,
{
    fn bucket<Q>(&self, key: &Q) -> Option<&Bucket<K, V>>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.table.get(bucket_index(key)).ok()
    }

    fn entry<Q>(&self, key: &Q) -> Option<&Entry<K, V>>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.bucket(key)?
            .iter()
            .find(|entry| entry.key.borrow() == key)
    }

    /// Returns the value stored under `key`.
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.entry(key).map(Entry::value)
    }

    /// Returns `true` if `key` is present.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.entry(key).is_some()
    }
}

impl<K, V> PersistentMap<K, V>
where
    K: Hash + Eq + Clone,
    V: Clone,
{
    /// Stores `value` under `key` and returns the value it replaced.
    ///
    /// A new key is appended to its bucket; an existing one has its entry
    /// replaced in place. Either way one bucket version and one undo mark
    /// are recorded.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::CapacityExceeded`] if the bucket trie is
    /// capped and full. The map is left unchanged.
    pub fn put(&mut self, key: K, value: V) -> Result<Option<V>, CollectionError> {
        let index = bucket_index(&key);
        let mut bucket = self.table.get(index)?.clone();
        let position = bucket.iter().position(|entry| entry.key == key);
        let entry = Entry { key, value };
        let previous = match position {
            Some(position) => Some(bucket.set(position, entry)?.value),
            None => {
                bucket.push_back(entry)?;
                None
            }
        };
        self.table.amend(index, bucket)?;
        self.record(Mark::Bucket(index));
        Ok(previous)
    }

    /// Removes `key` and returns its value.
    ///
    /// An absent key changes nothing and records no mark.
    ///
    /// # Errors
    ///
    /// Propagates trie errors from the bucket; none are expected for a
    /// consistent map.
    pub fn remove<Q>(&mut self, key: &Q) -> Result<Option<V>, CollectionError>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let index = bucket_index(key);
        let mut bucket = self.table.get(index)?.clone();
        let Some(position) = bucket.iter().position(|entry| entry.key.borrow() == key) else {
            return Ok(None);
        };
        let removed = bucket.remove(position)?;
        self.table.amend(index, bucket)?;
        self.record(Mark::Bucket(index));
        Ok(Some(removed.value))
    }

    /// Replaces the table with empty buckets as one table version.
    ///
    /// A single `undo` brings every entry back.
    ///
    /// # Errors
    ///
    /// Propagates trie errors from building the new table.
    pub fn clear(&mut self) -> Result<(), CollectionError> {
        let empty = PersistentLinkedList::with_config(self.bucket_config);
        self.table.reset(vec![empty; TABLE_SIZE])?;
        self.record(Mark::Clear);
        Ok(())
    }

    /// Puts every pair, then records one batch mark so that a single
    /// `undo` or `redo` covers them all.
    ///
    /// Nothing is recorded for an empty input.
    ///
    /// # Errors
    ///
    /// Stops at the first failing put and returns its error. The map, its
    /// undo marks and its redo marks are restored to their state before the
    /// call.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use retrace::persistent::{PersistentMap, Undoable};
    ///
    /// let mut map = PersistentMap::new();
    /// map.put(0, "zero").unwrap();
    /// map.put_all([(1, "one"), (2, "two"), (3, "three")]).unwrap();
    /// assert_eq!(map.len(), 4);
    ///
    /// map.undo();
    /// assert_eq!(map.len(), 1);
    /// map.redo();
    /// assert_eq!(map.get(&2), Some(&"two"));
    /// ```
    pub fn put_all<I>(&mut self, pairs: I) -> Result<(), CollectionError>
    where
        I: IntoIterator<Item = (K, V)>,
    {
        let checkpoint = self.clone();
        let mut applied = 0;
        for (key, value) in pairs {
            if let Err(error) = self.put(key, value) {
                *self = checkpoint;
                tracing::debug!(applied, "rolled back map batch");
                return Err(error);
            }
            applied += 1;
        }
        if applied > 0 {
            let mark = Mark::Batch(applied);
            self.undo_marks = self.undo_marks.push(mark);
            tracing::debug!(?mark, undo_depth = self.undo_depth(), "recorded map batch");
        }
        Ok(())
    }
}

impl<K, V: PartialEq> PersistentMap<K, V> {
    /// Returns `true` if some entry holds `value`.
    pub fn contains_value(&self, value: &V) -> bool {
        self.values().any(|candidate| candidate == value)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

impl<K, V> Undoable for PersistentMap<K, V> {
    fn undo(&mut self) -> bool {
        let Some((mark, rest)) = self.undo_marks.pop() else {
            return false;
        };
        self.undo_marks = rest;
        self.undo_mark(mark);
        self.redo_marks = self.redo_marks.push(mark);
        tracing::debug!(?mark, redo_depth = self.redo_depth(), "map undo");
        true
    }

    fn redo(&mut self) -> bool {
        let Some((mark, rest)) = self.redo_marks.pop() else {
            return false;
        };
        self.redo_marks = rest;
        self.redo_mark(mark);
        self.undo_marks = self.undo_marks.push(mark);
        tracing::debug!(?mark, undo_depth = self.undo_depth(), "map redo");
        true
    }

    fn can_undo(&self) -> bool {
        !self.undo_marks.is_empty()
    }

    fn can_redo(&self) -> bool {
        !self.redo_marks.is_empty()
    }
}

impl<K, V> Clone for PersistentMap<K, V> {
    fn clone(&self) -> Self {
        Self {
            table: self.table.clone(),
            undo_marks: self.undo_marks.clone(),
            redo_marks: self.redo_marks.clone(),
            bucket_config: self.bucket_config,
        }
    }
}

impl<K, V> Default for PersistentMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> FromIterator<(K, V)> for PersistentMap<K, V>
where
    K: Hash + Eq + Clone,
    V: Clone,
{
    /// Builds the map as its initial state; nothing is recorded for undo.
    /// Later pairs win over earlier ones with the same key.
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut buckets: Vec<Vec<Entry<K, V>>> = std::iter::repeat_with(Vec::new)
            .take(TABLE_SIZE)
            .collect();
        for (key, value) in iter {
            let bucket = &mut buckets[bucket_index(&key)];
            match bucket.iter_mut().find(|entry| entry.key == key) {
                Some(entry) => entry.value = value,
                None => bucket.push(Entry { key, value }),
            }
        }
        let table = buckets
            .into_iter()
            .map(|entries| entries.into_iter().collect::<Bucket<K, V>>())
            .collect();
        Self::from_table(table, TrieConfig::default())
    }
}

impl<K, V> PartialEq for PersistentMap<K, V>
where
    K: Hash + Eq,
    V: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .all(|(key, value)| other.get(key) == Some(value))
    }
}

impl<K: Hash + Eq, V: Eq> Eq for PersistentMap<K, V> {}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for PersistentMap<K, V> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_map().entries(self.iter()).finish()
    }
}

impl<K: fmt::Display, V: fmt::Display> fmt::Display for PersistentMap<K, V> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{{")?;
        for (position, entry) in self.entries().enumerate() {
            if position > 0 {
                write!(formatter, ", ")?;
            }
            write!(formatter, "{entry}")?;
        }
        write!(formatter, "}}")
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    /// `count` distinct keys that all land in one bucket.
    fn colliding_keys(count: usize) -> Vec<u32> {
        let target = bucket_index(&0_u32);
        (0_u32..)
            .filter(|key| bucket_index(key) == target)
            .take(count)
            .collect()
    }

    fn map_of(pairs: &[(&'static str, i32)]) -> PersistentMap<&'static str, i32> {
        let mut map = PersistentMap::new();
        for &(key, value) in pairs {
            map.put(key, value).unwrap();
        }
        map
    }

    #[rstest]
    fn test_bucket_index_stays_in_table() {
        for key in 0..1000 {
            assert!(bucket_index(&key) < TABLE_SIZE);
        }
    }

    #[rstest]
    fn test_put_returns_previous_value() {
        let mut map = PersistentMap::new();
        assert_eq!(map.put("a", 1), Ok(None));
        assert_eq!(map.put("a", 2), Ok(Some(1)));
        assert_eq!(map.get("a"), Some(&2));
        assert_eq!(map.len(), 1);
    }

    #[rstest]
    fn test_undo_replaced_value() {
        let mut map = map_of(&[("a", 1)]);
        map.put("a", 2).unwrap();
        assert!(map.undo());
        assert_eq!(map.get("a"), Some(&1));
        assert!(map.redo());
        assert_eq!(map.get("a"), Some(&2));
    }

    #[rstest]
    fn test_remove_absent_key_records_nothing() {
        let mut map = map_of(&[("a", 1)]);
        assert_eq!(map.remove("zzz"), Ok(None));
        assert_eq!(map.undo_depth(), 1);
    }

    #[rstest]
    fn test_remove_then_undo() {
        let mut map = map_of(&[("a", 1), ("b", 2)]);
        assert_eq!(map.remove("a"), Ok(Some(1)));
        assert!(!map.contains_key("a"));
        map.undo();
        assert_eq!(map.get("a"), Some(&1));
    }

    #[rstest]
    fn test_clear_is_one_step() {
        let mut map = map_of(&[("a", 1), ("b", 2)]);
        map.clear().unwrap();
        assert!(map.is_empty());
        assert!(map.undo());
        assert_eq!(map.len(), 2);
        assert!(map.undo());
        assert_eq!(map.len(), 1);
        assert!(map.redo());
        assert!(map.redo());
        assert!(map.is_empty());
        assert!(!map.redo());
    }

    #[rstest]
    fn test_mutation_after_undoing_clear_forgets_clear() {
        let mut map = map_of(&[("a", 1)]);
        map.clear().unwrap();
        map.undo();
        map.put("b", 2).unwrap();
        assert!(!map.can_redo());
        assert_eq!(map.len(), 2);
        map.undo();
        map.undo();
        assert!(map.is_empty());
        assert!(!map.undo());
    }

    #[rstest]
    fn test_colliding_keys_share_bucket_history() {
        let keys = colliding_keys(4);
        let mut map = PersistentMap::new();
        for (value, &key) in keys.iter().enumerate() {
            map.put(key, value).unwrap();
        }
        assert_eq!(map.len(), 4);
        map.remove(&keys[1]).unwrap();
        map.put(keys[2], 20).unwrap();

        map.undo();
        assert_eq!(map.get(&keys[2]), Some(&2));
        map.undo();
        assert_eq!(map.get(&keys[1]), Some(&1));
        map.undo();
        assert!(!map.contains_key(&keys[3]));
        assert_eq!(map.len(), 3);

        assert_eq!(map.redo_steps(3), 3);
        assert_eq!(map.get(&keys[2]), Some(&20));
        assert!(!map.contains_key(&keys[1]));
    }

    #[rstest]
    fn test_put_all_empty_records_nothing() {
        let mut map: PersistentMap<i32, i32> = PersistentMap::new();
        map.put_all(std::iter::empty()).unwrap();
        assert!(!map.can_undo());
    }

    #[rstest]
    fn test_put_all_undo_redo_as_one() {
        let mut map: PersistentMap<i32, i32> = PersistentMap::new();
        map.put(100, 0).unwrap();
        map.put_all((0..6).map(|key| (key, key * 10))).unwrap();
        assert_eq!(map.len(), 7);
        assert!(map.undo());
        assert_eq!(map.len(), 1);
        assert!(map.redo());
        assert_eq!(map.len(), 7);
        assert_eq!(map.get(&5), Some(&50));
    }

    fn two_slot_buckets() -> TrieConfig {
        TrieConfig::builder()
            .bits(1)
            .initial_size(1)
            .max_depth(1)
            .build()
            .unwrap()
    }

    #[rstest]
    fn test_put_all_failure_leaves_map_unchanged() {
        let keys = colliding_keys(3);
        let mut map = PersistentMap::with_bucket_config(two_slot_buckets());
        let result = map.put_all(keys.iter().map(|&key| (key, key)));
        assert!(result.unwrap_err().is_capacity_exceeded());
        assert!(map.is_empty());
        assert!(!map.can_undo());
        assert!(!map.can_redo());
    }

    #[rstest]
    fn test_put_all_failure_keeps_redo() {
        let keys = colliding_keys(3);
        let mut map = PersistentMap::with_bucket_config(two_slot_buckets());
        map.put(keys[0], 0).unwrap();
        map.undo();

        let result = map.put_all(keys.iter().map(|&key| (key, key)));
        assert!(result.is_err());
        assert!(map.is_empty());
        assert!(map.can_redo());

        assert!(map.redo());
        assert_eq!(map.get(&keys[0]), Some(&0));
        assert_eq!(map.len(), 1);
    }

    #[rstest]
    fn test_views() {
        let map = map_of(&[("a", 1), ("b", 2)]);
        let mut keys: Vec<_> = map.keys().copied().collect();
        keys.sort_unstable();
        assert_eq!(keys, vec!["a", "b"]);
        let mut values: Vec<_> = map.values().copied().collect();
        values.sort_unstable();
        assert_eq!(values, vec![1, 2]);
        assert!(map.contains_value(&2));
        assert!(!map.contains_value(&3));
    }

    #[rstest]
    fn test_display() {
        let empty: PersistentMap<&str, i32> = PersistentMap::new();
        assert_eq!(empty.to_string(), "{}");
        let map = map_of(&[("a", 1)]);
        assert_eq!(map.to_string(), "{a=1}");
    }

    #[rstest]
    fn test_from_iter_last_pair_wins() {
        let map: PersistentMap<&str, i32> = [("a", 1), ("b", 2), ("a", 3)].into_iter().collect();
        assert_eq!(map.len(), 2);
        assert_eq!(map.get("a"), Some(&3));
        assert!(!map.can_undo());
    }

    #[rstest]
    fn test_equality_ignores_history() {
        let left = map_of(&[("a", 1), ("b", 2)]);
        let right: PersistentMap<&str, i32> = [("b", 2), ("a", 1)].into_iter().collect();
        assert_eq!(left, right);
    }
}
