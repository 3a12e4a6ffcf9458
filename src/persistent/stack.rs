//! Persistent cons stack used to hold versions.
//!
//! Pushing shares the whole stack below the new frame, so cloning a stack
//! of any height costs one reference count increment.

use std::fmt;

use super::ReferenceCounter;

struct Frame<T> {
    value: T,
    below: Option<ReferenceCounter<Self>>,
}

/// Immutable LIFO stack with structural sharing.
pub(crate) struct PersistentStack<T> {
    top: Option<ReferenceCounter<Frame<T>>>,
    length: usize,
}

impl<T> PersistentStack<T> {
    #[inline]
    pub(crate) const fn new() -> Self {
        Self {
            top: None,
            length: 0,
        }
    }

    #[inline]
    pub(crate) const fn len(&self) -> usize {
        self.length
    }

    #[inline]
    pub(crate) const fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Returns a new stack with `value` on top of `self`.
    pub(crate) fn push(&self, value: T) -> Self {
        Self {
            top: Some(ReferenceCounter::new(Frame {
                value,
                below: self.top.clone(),
            })),
            length: self.length + 1,
        }
    }

    pub(crate) fn peek(&self) -> Option<&T> {
        self.top.as_ref().map(|frame| &frame.value)
    }

    /// The stack without its top frame. Empty stays empty.
    pub(crate) fn tail(&self) -> Self {
        self.top.as_ref().map_or_else(Self::new, |frame| Self {
            top: frame.below.clone(),
            length: self.length.saturating_sub(1),
        })
    }

    pub(crate) fn iter(&self) -> Iter<'_, T> {
        Iter {
            current: self.top.as_deref(),
        }
    }
}

impl<T: Clone> PersistentStack<T> {
    /// Splits off the top value.
    pub(crate) fn pop(&self) -> Option<(T, Self)> {
        self.peek().cloned().map(|value| (value, self.tail()))
    }
}

impl<T> Clone for PersistentStack<T> {
    fn clone(&self) -> Self {
        Self {
            top: self.top.clone(),
            length: self.length,
        }
    }
}

impl<T> Default for PersistentStack<T> {
    fn default() -> Self {
        Self::new()
    }
}

// Long histories would otherwise drop frame by frame through recursion.
impl<T> Drop for PersistentStack<T> {
    fn drop(&mut self) {
        let mut next = self.top.take();
        while let Some(frame) = next {
            match ReferenceCounter::try_unwrap(frame) {
                Ok(mut frame) => next = frame.below.take(),
                Err(_) => break,
            }
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for PersistentStack<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_list().entries(self.iter()).finish()
    }
}

/// Top-to-bottom iterator.
pub(crate) struct Iter<'a, T> {
    current: Option<&'a Frame<T>>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.current.map(|frame| {
            self.current = frame.below.as_deref();
            &frame.value
        })
    }
}
