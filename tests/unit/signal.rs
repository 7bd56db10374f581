//! Bit transforms and full signaling sessions.

use super::common::bits_of;
use smoki::signal::{
    increment, ones, pad, randomize, randomize_biased, render_bits, text_to_bits, transform, xor,
};
use smoki::{BitBlock, Block, RandomSource, Session, SessionConfig, SignalError};

#[test]
fn test_text_encoding() {
    // 'h' = 0x68 = 0b0110_1000, emitted lowest bit first
    assert_eq!(render_bits(&text_to_bits("h").unwrap()), "00010110");
    let bits = text_to_bits("smoki").unwrap();
    assert_eq!(bits.len(), 40);
    assert_eq!(bits.capacity(), 64);
}

#[test]
fn test_increment_examples() {
    let mut bits = bits_of("0000");
    increment(&mut bits);
    assert_eq!(render_bits(&bits), "1000");
    increment(&mut bits);
    assert_eq!(render_bits(&bits), "0100");
}

#[test]
fn test_xor_and_transform() {
    let mut result = BitBlock::new();
    xor(&bits_of("1100"), &bits_of("1010"), &mut result).unwrap();
    assert_eq!(render_bits(&result), "0110");

    transform(&bits_of("1100"), &bits_of("1010"), &mut result).unwrap();
    assert_eq!(render_bits(&result), "1110");
}

#[test]
fn test_randomize_is_seed_determined() {
    let mut a: BitBlock = Block::make(128).unwrap();
    let mut b: BitBlock = Block::make(128).unwrap();
    randomize(&mut a, &mut RandomSource::seeded(99)).unwrap();
    randomize(&mut b, &mut RandomSource::seeded(99)).unwrap();
    assert_eq!(a, b);
    assert!(ones(&a) > 0);
}

#[test]
fn test_biased_with_certain_flip_inverts() {
    let mut bits = bits_of("1010");
    randomize_biased(&mut bits, 1, &mut RandomSource::seeded(0)).unwrap();
    assert_eq!(render_bits(&bits), "0101");
}

#[test]
fn test_pad_grows_with_random_bits() {
    let mut bits = bits_of("11");
    pad(&mut bits, 10, &mut RandomSource::seeded(4)).unwrap();
    assert_eq!(bits.len(), 10);
    assert_eq!(&render_bits(&bits)[..2], "11");
}

#[test]
fn test_session_runs_every_round() {
    let config = SessionConfig {
        message: Some(0b1011_0010),
        seed: Some(1),
        ..Default::default()
    };
    let report = Session::run("hello", &config, &mut RandomSource::seeded(1)).unwrap();

    assert_eq!(report.rounds.len(), 8);
    assert_eq!(report.message, 0b1011_0010);
    assert_eq!(report.initial.len(), 40);
    assert_eq!(report.final_state.len(), 40);
    assert!(report.delivered);

    let sent: Vec<bool> = report.rounds.iter().map(|r| r.sent).collect();
    assert_eq!(
        sent,
        vec![false, true, false, false, true, true, false, true]
    );
    assert_eq!(report.rounds.back().unwrap().shared, report.final_state);
}

#[test]
fn test_session_is_reproducible() {
    let config = SessionConfig::default();
    let a = Session::run("abc", &config, &mut RandomSource::seeded(21)).unwrap();
    let b = Session::run("abc", &config, &mut RandomSource::seeded(21)).unwrap();
    assert_eq!(a.message, b.message);
    assert_eq!(a.final_state, b.final_state);
}

#[test]
fn test_session_rejects_bad_config() {
    let config = SessionConfig {
        flip_odds: 0,
        ..Default::default()
    };
    let err = Session::run("x", &config, &mut RandomSource::seeded(0)).unwrap_err();
    assert!(matches!(err, SignalError::Config(_)));
}

#[test]
fn test_report_json_shape() {
    let config = SessionConfig {
        message_bits: 2,
        message: Some(1),
        ..Default::default()
    };
    let report = Session::run("A", &config, &mut RandomSource::seeded(3)).unwrap();
    let json: serde_json::Value = serde_json::to_value(&report).unwrap();

    assert_eq!(json["text"], "A");
    assert_eq!(json["initial"], "10000010");
    assert_eq!(json["config"]["messageBits"], 2);
    assert_eq!(json["rounds"].as_array().unwrap().len(), 2);
    assert!(json["finalState"].is_string());
}
