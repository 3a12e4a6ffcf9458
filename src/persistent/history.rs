//! Linear version history with undo and redo.
//!
//! [`History`] keeps the current version on top of an undo stack and the
//! versions stepped back over on a redo stack. Committing a new version
//! clears the redo stack, so the timeline never branches.
//!
//! # Examples
//!
//! ```rust
//! use retrace::persistent::History;
//!
//! let mut history = History::new("a");
//! history.commit("b");
//! history.commit("c");
//!
//! assert!(history.undo());
//! assert_eq!(*history.current(), "b");
//! assert!(history.redo());
//! assert_eq!(*history.current(), "c");
//!
//! history.undo();
//! history.commit("d"); // drops "c" from the redo stack
//! assert!(!history.redo());
//! ```

use super::stack::PersistentStack;

/// Undo/redo stacks of immutable versions.
///
/// The undo stack always holds at least the initial version, which
/// [`undo`](Self::undo) never removes. Cloning copies both stacks in O(1)
/// and shares every version.
#[derive(Clone, Debug)]
pub struct History<V> {
    current: V,
    past: PersistentStack<V>,
    future: PersistentStack<V>,
}

impl<V> History<V> {
    /// Starts a history whose only version is `initial`.
    pub const fn new(initial: V) -> Self {
        Self {
            current: initial,
            past: PersistentStack::new(),
            future: PersistentStack::new(),
        }
    }

    /// The version on top of the undo stack.
    #[inline]
    pub const fn current(&self) -> &V {
        &self.current
    }

    /// Pushes `version` on the undo stack and clears the redo stack.
    pub fn commit(&mut self, version: V) {
        let previous = std::mem::replace(&mut self.current, version);
        self.past = self.past.push(previous);
        self.future = PersistentStack::new();
        tracing::debug!(undo_depth = self.undo_depth(), "committed version");
    }

    /// Replaces the current version in place.
    ///
    /// Neither stack changes height and the redo stack is left alone. This
    /// is how a container rewrites its current version after a nested
    /// collection moved through its own history.
    pub fn amend(&mut self, version: V) {
        self.current = version;
    }

    /// Drops every version on the redo stack.
    pub fn discard_redo(&mut self) {
        self.future = PersistentStack::new();
    }

    /// Number of versions below the current one.
    #[inline]
    pub const fn undo_depth(&self) -> usize {
        self.past.len()
    }

    /// Number of versions waiting on the redo stack.
    #[inline]
    pub const fn redo_depth(&self) -> usize {
        self.future.len()
    }

    /// Versions reachable through undo and redo, the current one included.
    #[inline]
    pub const fn version_count(&self) -> usize {
        self.past.len() + 1 + self.future.len()
    }

    /// Returns `true` if [`undo`](Self::undo) would change the current
    /// version.
    #[inline]
    pub const fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    /// Returns `true` if [`redo`](Self::redo) would change the current
    /// version.
    #[inline]
    pub const fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    /// Iterates from the current version down to the initial one.
    pub fn versions(&self) -> impl Iterator<Item = &V> {
        std::iter::once(&self.current).chain(self.past.iter())
    }
}

impl<V: Clone> History<V> {
    /// Moves the current version to the redo stack.
    ///
    /// Returns `false` and changes nothing when only the initial version
    /// is left.
    pub fn undo(&mut self) -> bool {
        let Some((previous, past)) = self.past.pop() else {
            return false;
        };
        let undone = std::mem::replace(&mut self.current, previous);
        self.past = past;
        self.future = self.future.push(undone);
        tracing::debug!(
            undo_depth = self.undo_depth(),
            redo_depth = self.redo_depth(),
            "undo"
        );
        true
    }

    /// Moves the top of the redo stack back onto the undo stack.
    ///
    /// Returns `false` when there is nothing to redo.
    pub fn redo(&mut self) -> bool {
        let Some((next, future)) = self.future.pop() else {
            return false;
        };
        let redone = std::mem::replace(&mut self.current, next);
        self.future = future;
        self.past = self.past.push(redone);
        tracing::debug!(
            undo_depth = self.undo_depth(),
            redo_depth = self.redo_depth(),
            "redo"
        );
        true
    }
}

// =============================================================================
// Undoable
// =============================================================================

/// Collections that navigate a linear version history.
///
/// # Examples
///
/// ```rust
/// use retrace::persistent::{PersistentArray, Undoable};
///
/// let mut array = PersistentArray::new();
/// array.push(1).unwrap();
/// array.push(2).unwrap();
/// array.push(3).unwrap();
///
/// assert_eq!(array.undo_steps(5), 3);
/// assert!(array.is_empty());
/// assert_eq!(array.redo_steps(2), 2);
/// assert_eq!(array.to_string(), "[1, 2]");
/// ```
pub trait Undoable {
    /// Steps back one version. Returns `false` if there was none.
    fn undo(&mut self) -> bool;

    /// Steps forward one version. Returns `false` if there was none.
    fn redo(&mut self) -> bool;

    /// Returns `true` if an earlier version exists.
    fn can_undo(&self) -> bool;

    /// Returns `true` if a later version exists.
    fn can_redo(&self) -> bool;

    /// Undoes up to `steps` versions and returns how many were undone.
    fn undo_steps(&mut self, steps: usize) -> usize {
        (0..steps).take_while(|_| self.undo()).count()
    }

    /// Redoes up to `steps` versions and returns how many were redone.
    fn redo_steps(&mut self, steps: usize) -> usize {
        (0..steps).take_while(|_| self.redo()).count()
    }
}

impl<V: Clone> Undoable for History<V> {
    fn undo(&mut self) -> bool {
        Self::undo(self)
    }

    fn redo(&mut self) -> bool {
        Self::redo(self)
    }

    fn can_undo(&self) -> bool {
        Self::can_undo(self)
    }

    fn can_redo(&self) -> bool {
        Self::can_redo(self)
    }
}
