// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Errors raised by [`Block`](super::Block) operations.
//!
//! Every failing operation leaves the block exactly as it was before the call.

use std::fmt;

/// Error type for block operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockError {
    /// Storage for `requested` elements of `element_size` bytes could not be obtained.
    Allocation {
        requested: usize,
        element_size: usize,
    },
    /// `operation` needs at least one element but the block is empty.
    EmptyBlock { operation: &'static str },
    /// `index` is not below the block's `length`.
    IndexOutOfRange { index: usize, length: usize },
}

impl BlockError {
    pub(crate) fn allocation<T>(requested: usize) -> Self {
        BlockError::Allocation {
            requested,
            element_size: std::mem::size_of::<T>(),
        }
    }

    pub(crate) fn empty(operation: &'static str) -> Self {
        BlockError::EmptyBlock { operation }
    }

    pub(crate) fn out_of_range(index: usize, length: usize) -> Self {
        BlockError::IndexOutOfRange { index, length }
    }
}

impl fmt::Display for BlockError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlockError::Allocation {
                requested,
                element_size,
            } => {
                write!(
                    f,
                    "cannot allocate {} elements of {} bytes",
                    requested, element_size
                )
            }
            BlockError::EmptyBlock { operation } => {
                write!(f, "{} on an empty block", operation)
            }
            BlockError::IndexOutOfRange { index, length } => {
                write!(f, "index {} >= length {}", index, length)
            }
        }
    }
}

impl std::error::Error for BlockError {}
