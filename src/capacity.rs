//! Chunk budget configuration.
//!
//! ## The Problem
//!
//! The chunker packs whole paragraphs greedily, so chunk size is governed by
//! two numbers:
//!
//! - `target_chars`: the size a chunk grows toward before it is flushed.
//! - `overlap`: how many trailing characters of a flushed chunk seed the next.
//!
//! ```text
//! target = 1200, overlap = 120
//!
//! Chunk 0: [para 1][para 2][para 3]         <- next para would pass 1200
//! Chunk 1: [last 120 chars of chunk 0][para 4][para 5]...
//! ```
//!
//! The chunker itself takes these as raw numbers and does not check them.
//! `ChunkBudget` is the validated form used by configuration: a zero target
//! or an overlap that swallows the whole target is rejected up front.

use crate::{Error, Result};

/// Default chunk target in characters.
pub const DEFAULT_TARGET_CHARS: usize = 1200;

/// Default overlap in characters.
pub const DEFAULT_OVERLAP: usize = 120;

/// Width of the blank-line separator counted against the target per block.
pub const SEPARATOR_CHARS: usize = 2;

/// Validated chunk target and overlap.
///
/// # Examples
///
/// ```rust
/// use folios::ChunkBudget;
///
/// let budget = ChunkBudget::new(400, 50).unwrap();
/// assert_eq!(budget.target_chars(), 400);
/// assert_eq!(budget.overlap(), 50);
///
/// assert!(ChunkBudget::new(0, 0).is_err());
/// assert!(ChunkBudget::new(100, 100).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkBudget {
    target_chars: usize,
    overlap: usize,
}

impl ChunkBudget {
    /// Create a budget.
    ///
    /// # Errors
    ///
    /// Returns an error if `target_chars == 0` or `overlap >= target_chars`.
    pub fn new(target_chars: usize, overlap: usize) -> Result<Self> {
        if target_chars == 0 {
            return Err(Error::InvalidTargetChars(target_chars));
        }
        if overlap >= target_chars {
            return Err(Error::OverlapExceedsTarget {
                target_chars,
                overlap,
            });
        }
        Ok(Self {
            target_chars,
            overlap,
        })
    }

    /// Create a budget with no overlap.
    ///
    /// # Errors
    ///
    /// Returns an error if `target_chars == 0`.
    pub fn no_overlap(target_chars: usize) -> Result<Self> {
        Self::new(target_chars, 0)
    }

    /// The size a chunk grows toward before it is flushed.
    #[must_use]
    pub const fn target_chars(&self) -> usize {
        self.target_chars
    }

    /// Characters carried from one chunk into the next.
    #[must_use]
    pub const fn overlap(&self) -> usize {
        self.overlap
    }

    /// Check if appending a block of `block_chars` to a buffer of `current`
    /// would pass the target. The separator is counted with the block.
    #[must_use]
    pub fn would_overflow(&self, current: usize, block_chars: usize) -> bool {
        would_overflow(self.target_chars, current, block_chars)
    }
}

impl Default for ChunkBudget {
    fn default() -> Self {
        Self {
            target_chars: DEFAULT_TARGET_CHARS,
            overlap: DEFAULT_OVERLAP,
        }
    }
}

impl TryFrom<(usize, usize)> for ChunkBudget {
    type Error = crate::Error;

    fn try_from((target_chars, overlap): (usize, usize)) -> Result<Self> {
        Self::new(target_chars, overlap)
    }
}

pub(crate) fn would_overflow(target_chars: usize, current: usize, block_chars: usize) -> bool {
    current
        .saturating_add(block_chars)
        .saturating_add(SEPARATOR_CHARS)
        > target_chars
}
