//! Construction options for the radix trie.
//!
//! [`TrieConfig`] carries the branching bits `B` (fanout `W = 2^B`), the
//! initial size used to pick a starting depth, and an optional depth cap.
//! A config can only be obtained through [`TrieConfigBuilder::build`] or one
//! of the presets, so every value in circulation is valid.
//!
//! # Examples
//!
//! ```rust
//! use retrace::persistent::TrieConfig;
//!
//! let config = TrieConfig::builder()
//!     .bits(2)
//!     .initial_size(20)
//!     .max_depth(6)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.fanout(), 4);
//! assert_eq!(config.initial_depth(), 3); // 4^3 = 64 >= 20
//! assert_eq!(config.max_capacity(), Some(4096));
//! ```

use super::CollectionError;

/// Smallest accepted number of branching bits.
pub const MIN_BITS: u32 = 1;

/// Largest accepted number of branching bits (fanout 64).
pub const MAX_BITS: u32 = 6;

/// Default branching bits (fanout 16).
pub const DEFAULT_BITS: u32 = 4;

/// Default initial size of an array.
pub const DEFAULT_INITIAL_SIZE: usize = 8;

/// Validated trie construction options.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "TrieConfigBuilder")
)]
pub struct TrieConfig {
    bits: u32,
    initial_size: usize,
    max_depth: Option<usize>,
}

impl TrieConfig {
    /// Starts a builder populated with the default values.
    #[must_use]
    pub const fn builder() -> TrieConfigBuilder {
        TrieConfigBuilder::new()
    }

    /// The narrow, capped layout used for linked-list storage in some
    /// deployments: `B = 2` (fanout 4) with at most 6 levels, i.e. 4096
    /// slots.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use retrace::persistent::TrieConfig;
    ///
    /// let config = TrieConfig::compact();
    /// assert_eq!(config.fanout(), 4);
    /// assert_eq!(config.max_capacity(), Some(4096));
    /// ```
    #[must_use]
    pub const fn compact() -> Self {
        Self {
            bits: 2,
            initial_size: 1,
            max_depth: Some(6),
        }
    }

    /// The default layout with another initial size. Zero is treated as
    /// one.
    #[must_use]
    pub const fn with_initial_size(initial_size: usize) -> Self {
        Self {
            bits: DEFAULT_BITS,
            initial_size: if initial_size == 0 { 1 } else { initial_size },
            max_depth: None,
        }
    }

    /// The same layout with no depth cap.
    pub(crate) const fn without_depth_cap(self) -> Self {
        Self {
            max_depth: None,
            ..self
        }
    }

    /// Number of index bits consumed per trie level.
    #[inline]
    #[must_use]
    pub const fn bits(&self) -> u32 {
        self.bits
    }

    /// Children per branch, `2^bits`.
    #[inline]
    #[must_use]
    pub const fn fanout(&self) -> usize {
        1 << self.bits
    }

    /// Mask selecting one level's slot from an index.
    #[inline]
    #[must_use]
    pub const fn mask(&self) -> usize {
        self.fanout() - 1
    }

    /// The initial size hint.
    #[inline]
    #[must_use]
    pub const fn initial_size(&self) -> usize {
        self.initial_size
    }

    /// The depth cap, if any.
    #[inline]
    #[must_use]
    pub const fn max_depth(&self) -> Option<usize> {
        self.max_depth
    }

    /// Depth of a freshly created trie: `ceil(log_W(initial_size))`, at
    /// least 1.
    #[must_use]
    pub const fn initial_depth(&self) -> usize {
        let mut depth = 1;
        while capacity_for(self.bits, depth) < self.initial_size {
            depth += 1;
        }
        depth
    }

    /// Number of values a trie of `depth` levels can hold.
    #[inline]
    #[must_use]
    pub const fn capacity_at(&self, depth: usize) -> usize {
        capacity_for(self.bits, depth)
    }

    /// Total slots available under the depth cap, or `None` when unbounded.
    #[must_use]
    pub const fn max_capacity(&self) -> Option<usize> {
        match self.max_depth {
            Some(depth) => Some(capacity_for(self.bits, depth)),
            None => None,
        }
    }
}

impl Default for TrieConfig {
    fn default() -> Self {
        Self {
            bits: DEFAULT_BITS,
            initial_size: DEFAULT_INITIAL_SIZE,
            max_depth: None,
        }
    }
}

/// `W^depth`, saturating at `usize::MAX`.
const fn capacity_for(bits: u32, depth: usize) -> usize {
    let shift = bits as usize * depth;
    if shift >= usize::BITS as usize {
        usize::MAX
    } else {
        1 << shift
    }
}

/// Builder for [`TrieConfig`].
///
/// Unset fields keep the defaults of [`TrieConfig::default`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct TrieConfigBuilder {
    bits: u32,
    initial_size: usize,
    max_depth: Option<usize>,
}

impl TrieConfigBuilder {
    /// Creates a builder with default values.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            bits: DEFAULT_BITS,
            initial_size: DEFAULT_INITIAL_SIZE,
            max_depth: None,
        }
    }

    /// Sets the branching bits.
    #[must_use]
    pub const fn bits(mut self, bits: u32) -> Self {
        self.bits = bits;
        self
    }

    /// Sets the initial size hint.
    #[must_use]
    pub const fn initial_size(mut self, initial_size: usize) -> Self {
        self.initial_size = initial_size;
        self
    }

    /// Caps the trie depth.
    #[must_use]
    pub const fn max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = Some(max_depth);
        self
    }

    /// Removes any depth cap.
    #[must_use]
    pub const fn unbounded(mut self) -> Self {
        self.max_depth = None;
        self
    }

    /// Validates the values and produces a [`TrieConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::InvalidConfiguration`] when `bits` is
    /// outside `1..=6`, `initial_size` is zero, or the depth cap is zero,
    /// smaller than the initial depth, or too deep to index with `usize`.
    pub fn build(self) -> Result<TrieConfig, CollectionError> {
        if !(MIN_BITS..=MAX_BITS).contains(&self.bits) {
            return Err(invalid(format!(
                "bits must be between {MIN_BITS} and {MAX_BITS}, got {}",
                self.bits
            )));
        }
        if self.initial_size == 0 {
            return Err(invalid("initial size must be at least 1".to_string()));
        }

        let config = TrieConfig {
            bits: self.bits,
            initial_size: self.initial_size,
            max_depth: self.max_depth,
        };

        if let Some(max_depth) = self.max_depth {
            if max_depth == 0 {
                return Err(invalid("max depth must be at least 1".to_string()));
            }
            if self.bits as usize * max_depth >= usize::BITS as usize {
                return Err(invalid(format!(
                    "max depth {max_depth} with {} bits overflows the index space",
                    self.bits
                )));
            }
            let initial_depth = config.initial_depth();
            if max_depth < initial_depth {
                return Err(invalid(format!(
                    "max depth {max_depth} is below the initial depth {initial_depth}"
                )));
            }
        }

        Ok(config)
    }
}

impl Default for TrieConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TryFrom<TrieConfigBuilder> for TrieConfig {
    type Error = CollectionError;

    fn try_from(builder: TrieConfigBuilder) -> Result<Self, Self::Error> {
        builder.build()
    }
}

fn invalid(reason: String) -> CollectionError {
    CollectionError::InvalidConfiguration { reason }
}
