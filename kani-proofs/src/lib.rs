// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Kani model checking proofs for smoki's pure primitives.
//!
//! This standalone crate extracts the block growth arithmetic and the bit
//! counter used by the signaling demo, and proves their properties with Kani.
//!
//! Run with: `cargo kani`
//!
//! ## Verified Properties
//!
//! 1. **No silent overflow**: grown_capacity returns None instead of wrapping
//! 2. **Fits**: a grown capacity always holds the request
//! 3. **Shape**: a grown capacity is max(1, c) * 2^k
//! 4. **Stable**: sufficient capacity is returned unchanged
//! 5. **Counter**: increment_bits adds one modulo 2^width
//!
//! `cargo xtask verify` fails if either copy drifts from the crate source.

// ============================================================================
// GROWTH ARITHMETIC (copied from src/block/growth.rs)
// ============================================================================

/// Capacity needed to hold `request` elements, starting from `current`.
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

// ============================================================================
// BIT COUNTER (copied from src/signal.rs)
// ============================================================================

/// Add one to the little-endian number in `bits`, wrapping to zero.
pub fn increment_bits(bits: &mut [bool]) {
    for bit in bits.iter_mut() {
        let carry = *bit;
        *bit = !*bit;
        if !carry {
            break;
        }
    }
}

/// Little-endian value of `bits` (at most 64 of them).
pub fn value_of(bits: &[bool]) -> u64 {
    bits.iter()
        .enumerate()
        .fold(0, |acc, (i, bit)| acc | ((*bit as u64) << i))
}

// ============================================================================
// KANI MODEL CHECKING PROOFS
// ============================================================================

#[cfg(kani)]
mod kani_proofs {
    use super::*;

    /// Verify grown_capacity never wraps and always fits the request.
    #[kani::proof]
    #[kani::unwind(66)] // usize doubles at most 64 times + 2
    fn verify_growth_fits_or_fails() {
        let current: usize = kani::any();
        let request: usize = kani::any();

        match grown_capacity(current, request) {
            Some(capacity) => {
                kani::assert(capacity >= request, "capacity must hold the request");
                kani::assert(capacity >= current, "capacity must never shrink");
            }
            None => {
                kani::assert(request > current, "only growth can overflow");
                kani::assert(
                    request > usize::MAX / 2,
                    "overflow only near the top of usize",
                );
            }
        }
    }

    /// Verify a grown capacity is max(1, c) times a power of two, and minimal.
    #[kani::proof]
    #[kani::unwind(66)]
    fn verify_growth_shape() {
        let current: usize = kani::any();
        let request: usize = kani::any();
        kani::assume(request > current);

        if let Some(capacity) = grown_capacity(current, request) {
            let base = if current == 0 { 1 } else { current };
            kani::assert(capacity % base == 0, "capacity must be a multiple of the base");

            let factor = capacity / base;
            kani::assert(factor.is_power_of_two(), "growth factor must be 2^k");
            kani::assert(
                factor == 1 || capacity / 2 < request,
                "capacity must be the smallest doubling that fits",
            );
        }
    }

    /// Verify sufficient capacity is returned untouched.
    #[kani::proof]
    fn verify_growth_stable() {
        let current: usize = kani::any();
        let request: usize = kani::any();
        kani::assume(request <= current);

        kani::assert(
            grown_capacity(current, request) == Some(current),
            "capacity must be unchanged when it already suffices",
        );
    }

    /// Verify increment_bits adds one modulo 2^8 for every byte-wide counter.
    #[kani::proof]
    #[kani::unwind(10)]
    fn verify_increment_adds_one() {
        let mut bits: [bool; 8] = kani::any();
        let before = value_of(&bits);

        increment_bits(&mut bits);

        kani::assert(
            value_of(&bits) == (before + 1) % 256,
            "increment_bits must add one modulo 2^width",
        );
    }
}
