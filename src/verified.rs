// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! A block that is known to be sorted.
//!
//! `Block::search` trusts the caller to have sorted with the same comparator.
//! `SortedBlock` removes the trust: it holds the comparator next to the data and
//! only exists once sortedness has been established, either by sorting or by
//! checking. The cost is paid once upfront; every search afterwards meets its
//! precondition by construction.
//!
//! # Example
//!
//! ```
//! use smoki::compare::ascending;
//! use smoki::{Block, SortedBlock};
//!
//! let block = Block::from_vec(vec![4, 1, 3]);
//! let sorted = SortedBlock::sort(block, ascending);
//! assert_eq!(sorted.search(&3), Some(&3));
//!
//! // Construction from unsorted data is rejected
//! let unsorted = Block::from_vec(vec![2, 1]);
//! assert!(SortedBlock::new(unsorted, ascending).is_err());
//! ```

use crate::block::Block;
use crate::contracts::first_unsorted;
use std::cmp::Ordering;
use std::fmt;

/// Error type for invariant violations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvariantError {
    /// `items[position]` is ordered before its predecessor.
    Unsorted { position: usize },
}

impl fmt::Display for InvariantError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvariantError::Unsorted { position } => {
                write!(f, "block not sorted at position {}", position)
            }
        }
    }
}

impl std::error::Error for InvariantError {}

/// A block sorted under the comparator it carries.
///
/// # Invariants (enforced at construction)
/// - For every adjacent pair, `compare(a, b) != Greater`
pub struct SortedBlock<T, C> {
    block: Block<T>,
    compare: C,
}

impl<T, C> SortedBlock<T, C>
where
    C: Fn(&T, &T) -> Ordering,
{
    /// Sort `block` with `compare` and keep both.
    pub fn sort(mut block: Block<T>, compare: C) -> Self {
        block.sort_by(&compare);
        Self { block, compare }
    }

    /// Accept `block` only if it is already sorted under `compare`.
    pub fn new(block: Block<T>, compare: C) -> Result<Self, InvariantError> {
        let mut check = &compare;
        if let Some(position) = first_unsorted(block.as_slice(), &mut check) {
            return Err(InvariantError::Unsorted { position });
        }
        Ok(Self { block, compare })
    }

    /// Binary search for an element equal to `key`.
    pub fn search(&self, key: &T) -> Option<&T> {
        self.block.search(key, &self.compare)
    }

    /// True if some element compares equal to `key`.
    pub fn contains(&self, key: &T) -> bool {
        self.search(key).is_some()
    }

    pub fn as_block(&self) -> &Block<T> {
        &self.block
    }

    pub fn len(&self) -> usize {
        self.block.len()
    }

    pub fn is_empty(&self) -> bool {
        self.block.is_empty()
    }

    /// Give the block back; sortedness is no longer tracked.
    pub fn into_inner(self) -> Block<T> {
        self.block
    }
}

impl<T: fmt::Debug, C> fmt::Debug for SortedBlock<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SortedBlock")
            .field("block", &self.block)
            .finish_non_exhaustive()
    }
}
