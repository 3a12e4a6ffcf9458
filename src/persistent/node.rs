//! Trie node shared by every persistent collection.
//!
//! A node is either a branch of child handles or a leaf of values; the
//! depth of a node inside its trie decides which one it is. Nodes are never
//! mutated once a trie version holding them has been published, so any
//! number of versions may point at the same node.

use super::ReferenceCounter;

/// Handle to a shared node.
pub(crate) type NodeRef<T> = ReferenceCounter<Node<T>>;

/// Immutable radix trie cell.
pub(crate) enum Node<T> {
    /// Up to `W` children, densely packed from slot 0.
    Branch(Vec<NodeRef<T>>),
    /// Up to `W` values, densely packed from slot 0.
    Leaf(Vec<T>),
}

impl<T> Node<T> {
    /// Creates an empty branch node.
    #[inline]
    pub(crate) const fn empty_branch() -> Self {
        Self::Branch(Vec::new())
    }

    /// Creates an empty leaf node.
    #[inline]
    pub(crate) const fn empty_leaf() -> Self {
        Self::Leaf(Vec::new())
    }

    /// Creates the empty root of a trie with `depth` levels.
    pub(crate) const fn empty_root(depth: usize) -> Self {
        if depth <= 1 {
            Self::empty_leaf()
        } else {
            Self::empty_branch()
        }
    }

    /// Number of occupied slots.
    #[inline]
    pub(crate) fn len(&self) -> usize {
        match self {
            Self::Branch(children) => children.len(),
            Self::Leaf(values) => values.len(),
        }
    }

    #[inline]
    pub(crate) fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T: Clone> Node<T> {
    /// Copies the slot list into a new node.
    ///
    /// Branch children are shared by reference; only the outer container is
    /// new. The caller then replaces exactly one slot.
    pub(crate) fn shallow_copy(&self) -> Self {
        match self {
            Self::Branch(children) => Self::Branch(children.clone()),
            Self::Leaf(values) => Self::Leaf(values.clone()),
        }
    }

    /// Copies slots `0..=last_slot` into a new node.
    pub(crate) fn prefix_copy(&self, last_slot: usize) -> Self {
        match self {
            Self::Branch(children) => {
                let end = (last_slot + 1).min(children.len());
                Self::Branch(children[..end].to_vec())
            }
            Self::Leaf(values) => {
                let end = (last_slot + 1).min(values.len());
                Self::Leaf(values[..end].to_vec())
            }
        }
    }
}
