//! Path-copying radix trie.
//!
//! [`RadixTrie`] is the engine under every collection in this crate. An
//! index is split into groups of `B` bits; each group picks a child on the
//! way down and the last group picks a value inside a leaf.
//!
//! # Overview
//!
//! - O(D) `get`, where `D = ceil(log_W N)`
//! - O(D) `set`, allocating exactly `D` nodes (one per level)
//! - O(D) `append`, promoting the root when the trie is full
//! - O(D) `pop_last` and `prefix_copy`
//!
//! Every operation that changes content returns a new trie and leaves the
//! receiver untouched. Unchanged subtrees are shared by reference.
//!
//! # Examples
//!
//! ```rust
//! use retrace::persistent::RadixTrie;
//!
//! let trie = RadixTrie::new()
//!     .append(1)
//!     .and_then(|trie| trie.append(2))
//!     .and_then(|trie| trie.append(3))
//!     .unwrap();
//!
//! let updated = trie.set(1, 20).unwrap();
//! assert_eq!(trie.get(1), Ok(&2));     // Original unchanged
//! assert_eq!(updated.get(1), Ok(&20)); // New version
//! ```

use std::fmt;
use std::iter::FusedIterator;

use smallvec::SmallVec;

use super::node::{Node, NodeRef};
use super::{CollectionError, ReferenceCounter, TrieConfig};

// =============================================================================
// RadixTrie Definition
// =============================================================================

/// One immutable version of a radix trie.
///
/// Cloning is O(1): the clone shares the root with the original.
///
/// # Time Complexity
///
/// | Operation     | Complexity |
/// |---------------|------------|
/// | `get`         | O(D)       |
/// | `set`         | O(D · W)   |
/// | `append`      | O(D · W)   |
/// | `pop_last`    | O(D · W)   |
/// | `prefix_copy` | O(D · W)   |
/// | `len`         | O(1)       |
pub struct RadixTrie<T> {
    root: NodeRef<T>,
    length: usize,
    depth: usize,
    config: TrieConfig,
}

impl<T> RadixTrie<T> {
    /// Creates an empty trie with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(TrieConfig::default())
    }

    /// Creates an empty trie whose depth is derived from
    /// [`TrieConfig::initial_depth`].
    #[must_use]
    pub fn with_config(config: TrieConfig) -> Self {
        let depth = config.initial_depth();
        Self::empty_at_depth(config, depth)
    }

    fn empty_at_depth(config: TrieConfig, depth: usize) -> Self {
        Self {
            root: ReferenceCounter::new(Node::empty_root(depth)),
            length: 0,
            depth,
            config,
        }
    }

    /// Number of values stored.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.length
    }

    /// Returns `true` if no values are stored.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Current number of levels, counting the leaf level.
    #[inline]
    #[must_use]
    pub const fn depth(&self) -> usize {
        self.depth
    }

    /// The configuration this trie was built with.
    #[inline]
    #[must_use]
    pub const fn config(&self) -> &TrieConfig {
        &self.config
    }

    /// Values the trie can hold before the next root promotion.
    #[inline]
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.config.capacity_at(self.depth)
    }

    /// Returns `true` if a depth cap is configured and every slot under it
    /// is taken.
    #[must_use]
    pub const fn is_full(&self) -> bool {
        match self.config.max_capacity() {
            Some(capacity) => self.length >= capacity,
            None => false,
        }
    }

    /// Returns `true` if both tries are the same version: same root node
    /// and same length.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        ReferenceCounter::ptr_eq(&self.root, &other.root) && self.length == other.length
    }

    #[inline]
    const fn slot(&self, index: usize, level: usize) -> usize {
        (index >> (self.config.bits() as usize * level)) & self.config.mask()
    }

    /// Returns a reference to the value at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::IndexOutOfBounds`] if `index >= len()`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use retrace::persistent::{RadixTrie, TrieConfig};
    ///
    /// let trie = RadixTrie::from_values(TrieConfig::default(), (0..100).collect()).unwrap();
    /// assert_eq!(trie.get(42), Ok(&42));
    /// assert!(trie.get(100).is_err());
    /// ```
    pub fn get(&self, index: usize) -> Result<&T, CollectionError> {
        if index >= self.length {
            return Err(CollectionError::out_of_bounds(index, self.length));
        }
        self.lookup(index)
            .ok_or_else(|| CollectionError::out_of_bounds(index, self.length))
    }

    fn lookup(&self, index: usize) -> Option<&T> {
        let mut node = self.root.as_ref();
        for level in (1..self.depth).rev() {
            let Node::Branch(children) = node else {
                return None;
            };
            node = children.get(self.slot(index, level))?.as_ref();
        }
        match node {
            Node::Leaf(values) => values.get(self.slot(index, 0)),
            Node::Branch(_) => None,
        }
    }

    /// First value, if any.
    #[must_use]
    pub fn first(&self) -> Option<&T> {
        self.lookup(0).filter(|_| !self.is_empty())
    }

    /// Last value, if any.
    #[must_use]
    pub fn last(&self) -> Option<&T> {
        self.length
            .checked_sub(1)
            .and_then(|index| self.lookup(index))
    }

    /// Iterates over the values in index order.
    ///
    /// The walk visits every node once, so a full pass is O(N).
    #[must_use]
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(self)
    }
}

impl<T: Clone> RadixTrie<T> {
    /// Builds a single trie version holding `values`, bottom-up.
    ///
    /// The depth is the smallest one, not below the configured initial
    /// depth, whose capacity fits every value.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::CapacityExceeded`] when the values do not
    /// fit under the configured depth cap.
    pub fn from_values(config: TrieConfig, values: Vec<T>) -> Result<Self, CollectionError> {
        let depth = required_depth(&config, values.len());
        if let Some(max_depth) = config.max_depth()
            && depth > max_depth
        {
            return Err(CollectionError::CapacityExceeded {
                capacity: config.capacity_at(max_depth),
            });
        }
        Ok(Self::build(config, values, depth))
    }

    /// Like [`from_values`](Self::from_values), but drops the depth cap
    /// from `config` first, so every input fits.
    pub(crate) fn from_values_uncapped(config: TrieConfig, values: Vec<T>) -> Self {
        let config = config.without_depth_cap();
        let depth = required_depth(&config, values.len());
        Self::build(config, values, depth)
    }

    fn build(config: TrieConfig, values: Vec<T>, depth: usize) -> Self {
        let length = values.len();
        let fanout = config.fanout();
        let mut nodes: Vec<Node<T>> = chunked(values, fanout)
            .into_iter()
            .map(Node::Leaf)
            .collect();
        for _ in 1..depth {
            let branches = chunked(nodes, fanout);
            nodes = branches
                .into_iter()
                .map(|children| {
                    Node::Branch(children.into_iter().map(ReferenceCounter::new).collect())
                })
                .collect();
        }

        let root = nodes.pop().unwrap_or_else(|| Node::empty_root(depth));
        Self {
            root: ReferenceCounter::new(root),
            length,
            depth,
            config,
        }
    }

    /// Returns a new version with `value` stored at `index`.
    ///
    /// Exactly one node per level is copied; all other subtrees are shared
    /// with `self`.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::IndexOutOfBounds`] if `index >= len()`.
    pub fn set(&self, index: usize, value: T) -> Result<Self, CollectionError> {
        if index >= self.length {
            return Err(CollectionError::out_of_bounds(index, self.length));
        }
        let root = self.set_in(&self.root, self.depth - 1, index, value);
        Ok(Self {
            root: ReferenceCounter::new(root),
            length: self.length,
            depth: self.depth,
            config: self.config,
        })
    }

    fn set_in(&self, node: &Node<T>, level: usize, index: usize, value: T) -> Node<T> {
        let slot = self.slot(index, level);
        let mut copy = node.shallow_copy();
        match &mut copy {
            Node::Branch(children) => {
                let child = self.set_in(&children[slot], level - 1, index, value);
                children[slot] = ReferenceCounter::new(child);
            }
            Node::Leaf(values) => values[slot] = value,
        }
        copy
    }

    /// Returns a new version with `value` appended at index `len()`.
    ///
    /// When the trie is full the root is promoted first: the new root is a
    /// branch whose only child is the old root.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::CapacityExceeded`] if promotion would go
    /// past the configured depth cap.
    pub fn append(&self, value: T) -> Result<Self, CollectionError> {
        let mut root = self.root.clone();
        let mut depth = self.depth;

        if self.length >= self.capacity() {
            if let Some(max_depth) = self.config.max_depth()
                && depth >= max_depth
            {
                tracing::trace!(
                    capacity = self.capacity(),
                    "refusing append: trie is at its depth cap"
                );
                return Err(CollectionError::CapacityExceeded {
                    capacity: self.capacity(),
                });
            }
            root = ReferenceCounter::new(Node::Branch(vec![root]));
            depth += 1;
            tracing::trace!(depth, length = self.length, "promoted trie root");
        }

        let root = self.append_in(&root, depth - 1, self.length, value);
        Ok(Self {
            root: ReferenceCounter::new(root),
            length: self.length + 1,
            depth,
            config: self.config,
        })
    }

    fn append_in(&self, node: &Node<T>, level: usize, index: usize, value: T) -> Node<T> {
        let mut copy = node.shallow_copy();
        match &mut copy {
            Node::Branch(children) => {
                let slot = self.slot(index, level);
                if slot < children.len() {
                    let child = self.append_in(&children[slot], level - 1, index, value);
                    children[slot] = ReferenceCounter::new(child);
                } else {
                    children.push(ReferenceCounter::new(fresh_path(level - 1, value)));
                }
            }
            Node::Leaf(values) => values.push(value),
        }
        copy
    }

    /// Returns a new version without the last value, together with that
    /// value.
    ///
    /// Leaves and branches emptied by the removal are dropped from their
    /// parent. The depth never shrinks.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::IndexOutOfBounds`] on an empty trie.
    pub fn pop_last(&self) -> Result<(Self, T), CollectionError> {
        let empty = || CollectionError::out_of_bounds(0, 0);
        let index = self.length.checked_sub(1).ok_or_else(empty)?;
        let (root, value) = self
            .pop_in(&self.root, self.depth - 1, index)
            .ok_or_else(empty)?;
        let root = root.unwrap_or_else(|| Node::empty_root(self.depth));
        Ok((
            Self {
                root: ReferenceCounter::new(root),
                length: index,
                depth: self.depth,
                config: self.config,
            },
            value,
        ))
    }

    fn pop_in(&self, node: &Node<T>, level: usize, index: usize) -> Option<(Option<Node<T>>, T)> {
        match node {
            Node::Branch(children) => {
                let slot = self.slot(index, level);
                let (child, value) = self.pop_in(children.get(slot)?, level - 1, index)?;
                let mut copy = node.prefix_copy(slot);
                if let Node::Branch(copied) = &mut copy {
                    match child {
                        Some(child) => copied[slot] = ReferenceCounter::new(child),
                        None => {
                            copied.pop();
                        }
                    }
                }
                let remaining = (!copy.is_empty()).then_some(copy);
                Some((remaining, value))
            }
            Node::Leaf(values) => {
                let (last, rest) = values.split_last()?;
                let remaining = (!rest.is_empty()).then(|| Node::Leaf(rest.to_vec()));
                Some((remaining, last.clone()))
            }
        }
    }

    /// Returns a new version holding only indices `0..count`.
    ///
    /// The path to index `count - 1` is rebuilt with prefix copies; every
    /// subtree to its left is shared.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::IndexOutOfBounds`] if `count > len()`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use retrace::persistent::{RadixTrie, TrieConfig};
    ///
    /// let trie = RadixTrie::from_values(TrieConfig::default(), (0..40).collect()).unwrap();
    /// let prefix = trie.prefix_copy(17).unwrap();
    /// assert_eq!(prefix.len(), 17);
    /// assert_eq!(prefix.iter().copied().collect::<Vec<_>>(), (0..17).collect::<Vec<_>>());
    /// ```
    pub fn prefix_copy(&self, count: usize) -> Result<Self, CollectionError> {
        if count > self.length {
            return Err(CollectionError::out_of_bounds(count, self.length));
        }
        if count == self.length {
            return Ok(self.clone());
        }
        if count == 0 {
            return Ok(Self::empty_at_depth(self.config, self.depth));
        }

        let root = self.prefix_in(&self.root, self.depth - 1, count - 1);
        Ok(Self {
            root: ReferenceCounter::new(root),
            length: count,
            depth: self.depth,
            config: self.config,
        })
    }

    fn prefix_in(&self, node: &Node<T>, level: usize, last: usize) -> Node<T> {
        let slot = self.slot(last, level);
        let mut copy = node.prefix_copy(slot);
        if let Node::Branch(children) = &mut copy {
            let child = self.prefix_in(&children[slot], level - 1, last);
            children[slot] = ReferenceCounter::new(child);
        }
        copy
    }
}

/// Builds a chain of single-child branches ending in a one-value leaf.
fn fresh_path<T>(level: usize, value: T) -> Node<T> {
    if level == 0 {
        Node::Leaf(vec![value])
    } else {
        Node::Branch(vec![ReferenceCounter::new(fresh_path(level - 1, value))])
    }
}

/// Smallest depth, starting from the configured initial one, whose
/// capacity holds `length` values.
fn required_depth(config: &TrieConfig, length: usize) -> usize {
    let mut depth = config.initial_depth();
    while config.capacity_at(depth) < length {
        depth += 1;
    }
    depth
}

/// Splits `items` into consecutive groups of at most `width`.
fn chunked<U>(items: Vec<U>, width: usize) -> Vec<Vec<U>> {
    let mut groups = Vec::with_capacity(items.len().div_ceil(width));
    let mut items = items.into_iter().peekable();
    while items.peek().is_some() {
        groups.push(items.by_ref().take(width).collect());
    }
    groups
}

// =============================================================================
// Iterators
// =============================================================================

/// Borrowing in-order iterator over a [`RadixTrie`].
pub struct Iter<'a, T> {
    stack: SmallVec<[std::slice::Iter<'a, NodeRef<T>>; 8]>,
    leaf: std::slice::Iter<'a, T>,
    remaining: usize,
}

impl<'a, T> Iter<'a, T> {
    fn new(trie: &'a RadixTrie<T>) -> Self {
        let mut iterator = Self {
            stack: SmallVec::new(),
            leaf: std::slice::Iter::default(),
            remaining: trie.length,
        };
        iterator.enter(trie.root.as_ref());
        iterator
    }

    fn enter(&mut self, node: &'a Node<T>) {
        match node {
            Node::Branch(children) => self.stack.push(children.iter()),
            Node::Leaf(values) => self.leaf = values.iter(),
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(value) = self.leaf.next() {
                self.remaining -= 1;
                return Some(value);
            }
            let child = self.stack.last_mut()?.next();
            match child {
                Some(child) => self.enter(child.as_ref()),
                None => {
                    self.stack.pop();
                }
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

/// Owning iterator over a trie version.
///
/// Holds its own handle to the version, so it is unaffected by anything
/// that happens to the collection it was taken from.
pub struct IntoIter<T> {
    trie: RadixTrie<T>,
    index: usize,
}

impl<T: Clone> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        let value = self.trie.lookup(self.index).cloned();
        if value.is_some() && self.index < self.trie.length {
            self.index += 1;
            value
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.trie.length - self.index;
        (remaining, Some(remaining))
    }
}

impl<T: Clone> ExactSizeIterator for IntoIter<T> {}

// =============================================================================
// Standard Trait Implementations
// =============================================================================

impl<T> Clone for RadixTrie<T> {
    fn clone(&self) -> Self {
        Self {
            root: self.root.clone(),
            length: self.length,
            depth: self.depth,
            config: self.config,
        }
    }
}

impl<T> Default for RadixTrie<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, T> IntoIterator for &'a RadixTrie<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: Clone> IntoIterator for RadixTrie<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            trie: self,
            index: 0,
        }
    }
}

impl<T: PartialEq> PartialEq for RadixTrie<T> {
    fn eq(&self, other: &Self) -> bool {
        self.length == other.length && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for RadixTrie<T> {}

impl<T: fmt::Debug> fmt::Debug for RadixTrie<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_list().entries(self.iter()).finish()
    }
}

// =============================================================================
// Tests
// =============================================================================
