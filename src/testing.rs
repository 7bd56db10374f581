//! Test utilities shared across unit and integration tests.
//!
//! This module is always compiled but hidden from documentation.
//! It provides canonical implementations of test helpers to avoid duplication.

#![doc(hidden)]

use crate::block::Block;
use crate::signal::BitBlock;

/// Build a block from a slice, with `capacity() == len()`.
pub fn block_of<T: Clone>(values: &[T]) -> Block<T> {
    Block::from_vec(values.to_vec())
}

/// Build a bit block from a `"0101"` pattern. Any character other than `'1'`
/// is a zero.
pub fn bits_of(pattern: &str) -> BitBlock {
    pattern.chars().map(|c| c == '1').collect()
}

/// Assert the capacity invariant and return the block for chaining.
pub fn assert_well_formed<T>(block: &Block<T>) -> &Block<T> {
    assert!(
        block.capacity() >= block.len(),
        "capacity {} < length {}",
        block.capacity(),
        block.len()
    );
    block
}
