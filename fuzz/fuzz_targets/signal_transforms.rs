// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for the bit transforms behind the signaling demo.
//!
//! Arbitrary text and signatures go through encode, xor and transform. None of
//! them may panic, widths must be preserved, and xor must undo itself.

#![no_main]

use libfuzzer_sys::fuzz_target;
use smoki::signal::{increment, render_bits, text_to_bits, transform, xor, xor_in_place};
use smoki::BitBlock;

#[derive(Debug, arbitrary::Arbitrary)]
struct TransformInput {
    text: String,
    signature: Vec<bool>,
}

fuzz_target!(|input: TransformInput| {
    let identity = match text_to_bits(&input.text) {
        Ok(bits) => bits,
        Err(_) => return,
    };
    assert_eq!(identity.len(), input.text.len() * 8);

    let signature: BitBlock = input.signature.iter().copied().collect();
    let mut result = BitBlock::new();

    match xor(&identity, &signature, &mut result) {
        Ok(()) => {
            assert_eq!(result.len(), identity.len());
            xor_in_place(&mut result, &signature).unwrap();
            assert_eq!(render_bits(&result), render_bits(&identity));

            transform(&identity, &signature, &mut result).unwrap();
            assert_eq!(result.len(), identity.len());
        }
        Err(_) => {
            // Short signatures are rejected without touching the output
            assert!(signature.len() < identity.len());
            assert!(result.is_empty());
        }
    }

    let mut counter = identity;
    increment(&mut counter);
    assert_eq!(counter.len(), input.text.len() * 8);
});
