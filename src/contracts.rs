// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Runtime contracts for block invariants.
//!
//! Debug-mode assertions that re-check, after each mutating call, the
//! properties `Block` promises. They:
//!
//! 1. Are **zero-cost in release builds** (`debug_assert!` / `cfg!(debug_assertions)`)
//! 2. Fail **at the call that broke the invariant**, not at the next read
//!
//! # INVARIANTS (DO NOT REMOVE THESE CHECKS)
//!
//! | Contract Function              | Property                                        |
//! |--------------------------------|-------------------------------------------------|
//! | `check_capacity_covers_length` | `capacity >= length`                            |
//! | `check_growth_law`             | capacity = smallest `max(1,c)·2^k` ≥ request    |
//! | `check_sorted`                 | adjacent pairs satisfy `compare(a, b) <= Equal` |
//! | `check_bit`                    | bit values stay in `{0, 1}`                     |

use crate::block::growth::obeys_growth_law;
use std::cmp::Ordering;

// ============================================================================
// CAPACITY CONTRACTS
// ============================================================================

/// Check that a block owns at least as many slots as it has elements.
///
/// # Panics (debug builds only)
/// Panics if `capacity < length`.
#[inline]
pub fn check_capacity_covers_length(length: usize, capacity: usize) {
    // INVARIANT: capacity >= length
    debug_assert!(
        capacity >= length,
        "Contract violation: capacity {} < length {}",
        capacity,
        length
    );
}

/// Check that a growth step produced exactly the doubling-law capacity.
///
/// # Panics (debug builds only)
/// Panics if `capacity` is not the growth-law result for `previous → request`.
#[inline]
pub fn check_growth_law(previous: usize, request: usize, capacity: usize) {
    // INVARIANT: growth is monotonic-by-doubling
    debug_assert!(
        obeys_growth_law(previous, request, capacity),
        "Contract violation: growing capacity {} for {} elements produced {}",
        previous,
        request,
        capacity
    );
}

// ============================================================================
// ORDERING CONTRACTS
// ============================================================================

/// Check that `items` is sorted under `compare`.
///
/// # Panics (debug builds only)
/// Panics at the first adjacent pair that compares `Greater`.
#[inline]
pub fn check_sorted<T, F>(items: &[T], compare: &mut F)
where
    F: FnMut(&T, &T) -> Ordering,
{
    if !cfg!(debug_assertions) {
        return;
    }

    // INVARIANT: after sort_by, compare(items[i], items[i + 1]) <= Equal
    if let Some(position) = first_unsorted(items, compare) {
        panic!(
            "Contract violation: sorted - items[{}] > items[{}]",
            position - 1,
            position
        );
    }
}

/// Index of the first element ordered before its predecessor, if any.
pub(crate) fn first_unsorted<T, F>(items: &[T], compare: &mut F) -> Option<usize>
where
    F: FnMut(&T, &T) -> Ordering,
{
    items
        .windows(2)
        .position(|pair| compare(&pair[0], &pair[1]) == Ordering::Greater)
        .map(|i| i + 1)
}

// ============================================================================
// BIT CONTRACTS
// ============================================================================

/// Check that an integer bit is 0 or 1.
///
/// # Panics (debug builds only)
#[inline]
pub fn check_bit(value: u64) {
    // INVARIANT: bits are 0 or 1
    debug_assert!(value <= 1, "Contract violation: bit value {} > 1", value);
}
