//! Bit transform laws.

use proptest::prelude::*;
use smoki::signal::{increment, ones, render_bits, text_to_bits, transform, xor, xor_in_place};
use smoki::{BitBlock, RandomSource, Session, SessionConfig};

/// Bit blocks of a fixed width paired for binary transforms.
fn bit_pair(max: usize) -> impl Strategy<Value = (Vec<bool>, Vec<bool>)> {
    (0..max).prop_flat_map(|n| {
        (
            prop::collection::vec(any::<bool>(), n),
            prop::collection::vec(any::<bool>(), n),
        )
    })
}

fn to_number(bits: &BitBlock) -> u64 {
    bits.iter()
        .enumerate()
        .fold(0, |acc, (i, bit)| acc | ((*bit as u64) << i))
}

proptest! {
    /// Property: text encoding has eight bits per byte, LSB first.
    #[test]
    fn prop_text_bits_per_byte(text in "[ -~]{0,16}") {
        let bits = text_to_bits(&text).unwrap();
        prop_assert_eq!(bits.len(), text.len() * 8);

        for (i, byte) in text.bytes().enumerate() {
            let chunk = &bits.as_slice()[i * 8..i * 8 + 8];
            let rebuilt = chunk
                .iter()
                .enumerate()
                .fold(0u8, |acc, (shift, bit)| acc | ((*bit as u8) << shift));
            prop_assert_eq!(rebuilt, byte);
        }
    }

    /// Property: increment adds one modulo 2^width.
    #[test]
    fn prop_increment_adds_one(bits in prop::collection::vec(any::<bool>(), 1..40)) {
        let mut block: BitBlock = bits.iter().copied().collect();
        let before = to_number(&block);
        increment(&mut block);

        let modulus = 1u64 << bits.len();
        prop_assert_eq!(to_number(&block), (before + 1) % modulus);
    }

    /// Property: xor is its own inverse.
    #[test]
    fn prop_xor_involution((a, b) in bit_pair(64)) {
        let a: BitBlock = a.into_iter().collect();
        let b: BitBlock = b.into_iter().collect();

        let mut once = BitBlock::new();
        xor(&a, &b, &mut once).unwrap();
        xor_in_place(&mut once, &b).unwrap();
        prop_assert_eq!(render_bits(&once), render_bits(&a));
    }

    /// Property: transform never changes the width.
    #[test]
    fn prop_transform_keeps_width((a, b) in bit_pair(64)) {
        let a: BitBlock = a.into_iter().collect();
        let b: BitBlock = b.into_iter().collect();

        let mut result = BitBlock::new();
        transform(&a, &b, &mut result).unwrap();
        prop_assert_eq!(result.len(), a.len());
        prop_assert!(ones(&result) <= a.len());
    }

    /// Property: every session sends exactly the configured message.
    #[test]
    fn prop_session_delivers(seed in any::<u64>(), bits in 1u32..16, text in "[a-z]{0,6}") {
        let config = SessionConfig {
            message_bits: bits,
            seed: Some(seed),
            ..Default::default()
        };
        let report = Session::run(&text, &config, &mut RandomSource::seeded(seed)).unwrap();

        prop_assert_eq!(report.rounds.len(), bits as usize);
        prop_assert!(report.message <= config.message_mask());
        prop_assert_eq!(report.received, report.message);
        prop_assert_eq!(report.final_state.len(), text.len() * 8);
    }
}
