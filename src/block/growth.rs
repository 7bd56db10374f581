// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Capacity arithmetic for [`Block`](super::Block).
//!
//! Pure arithmetic: checked at compile time below, model-checked by the Kani
//! harness, and reused by the debug contracts.
//!
//! # Growth law
//!
//! Growing from capacity `c` to hold `n` elements yields the smallest value of
//! the form `max(1, c) * 2^k` (k ≥ 0) that is ≥ `n`. If `c ≥ n` the capacity is
//! left untouched; capacity never shrinks through this path.

/// Capacity needed to hold `request` elements, starting from `current`.
///
/// Returns `None` when doubling would overflow `usize`. Callers turn that into
/// an allocation failure before touching their storage.
///
/// ```
/// use smoki::block::growth::grown_capacity;
///
/// assert_eq!(grown_capacity(0, 0), Some(0));
/// assert_eq!(grown_capacity(0, 5), Some(8));
/// assert_eq!(grown_capacity(3, 7), Some(12));
/// assert_eq!(grown_capacity(16, 9), Some(16));
/// ```
pub const fn grown_capacity(current: usize, request: usize) -> Option<usize> {
    if request <= current {
        return Some(current);
    }

    let mut expanded = if current == 0 { 1 } else { current };
    while expanded < request {
        expanded = match expanded.checked_mul(2) {
            Some(doubled) => doubled,
            None => return None,
        };
    }
    Some(expanded)
}

/// True when `capacity` is a legal result of growing `previous` to `request`.
pub fn obeys_growth_law(previous: usize, request: usize, capacity: usize) -> bool {
    grown_capacity(previous, request) == Some(capacity)
}

// ============================================================================
// COMPILE-TIME ASSERTIONS (evaluated at build time)
// ============================================================================

const _: () = {
    // INVARIANT: empty blocks start doubling from one slot
    assert!(matches!(grown_capacity(0, 1), Some(1)));
    assert!(matches!(grown_capacity(0, 5), Some(8)));

    // INVARIANT: sufficient capacity is never touched
    assert!(matches!(grown_capacity(8, 8), Some(8)));
    assert!(matches!(grown_capacity(8, 2), Some(8)));

    // INVARIANT: doubling past usize::MAX is reported, not wrapped
    assert!(grown_capacity(usize::MAX / 2 + 2, usize::MAX).is_none());
};
