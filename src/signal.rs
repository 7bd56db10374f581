//! A toy bit-signaling protocol built on [`Block<bool>`].
//!
//! Two parties share a bit string (the encoded text). Each round the sender
//! transmits one message bit by choosing which stream to fold into the shared
//! state: a *biased* copy of the state (each bit flipped with probability
//! `1 / flip_odds`) for a one, or fresh *noise* for a zero. Folding is
//! `shared := (shared XOR stream) + 1`. A running XOR of consecutive states is
//! kept as *hints*.
//!
//! All bit strings are least-significant-bit first: index 0 is the lowest bit
//! of the first byte.
//!
//! # Example
//!
//! ```
//! use smoki::signal::{render_bits, text_to_bits, Session};
//! use smoki::{RandomSource, SessionConfig};
//!
//! assert_eq!(render_bits(&text_to_bits("A")?), "10000010");
//!
//! let config = SessionConfig { seed: Some(1), message: Some(0b1011), ..Default::default() };
//! let mut rng = RandomSource::seeded(1);
//! let report = Session::run("hi", &config, &mut rng)?;
//! assert_eq!(report.received, 0b1011);
//! assert!(report.delivered);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use crate::block::{Block, BlockError};
use crate::config::{ConfigError, SessionConfig};
use crate::contracts::check_bit;
use crate::random::{RandomError, RandomSource};
use rand::RngCore;
use serde::{Serialize, Serializer};
use std::fmt;
use tracing::{debug, info};

/// A string of bits, lowest first.
pub type BitBlock = Block<bool>;

// ============================================================================
// ERRORS
// ============================================================================

/// Anything that can stop a signaling session.
#[derive(Debug)]
pub enum SignalError {
    Block(BlockError),
    Random(RandomError),
    Config(ConfigError),
}

impl fmt::Display for SignalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SignalError::Block(e) => write!(f, "block error: {}", e),
            SignalError::Random(e) => write!(f, "{}", e),
            SignalError::Config(e) => write!(f, "invalid configuration: {}", e),
        }
    }
}

impl std::error::Error for SignalError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SignalError::Block(e) => Some(e),
            SignalError::Random(e) => Some(e),
            SignalError::Config(e) => Some(e),
        }
    }
}

impl From<BlockError> for SignalError {
    fn from(e: BlockError) -> Self {
        SignalError::Block(e)
    }
}

impl From<RandomError> for SignalError {
    fn from(e: RandomError) -> Self {
        SignalError::Random(e)
    }
}

impl From<ConfigError> for SignalError {
    fn from(e: ConfigError) -> Self {
        SignalError::Config(e)
    }
}

// ============================================================================
// BIT TRANSFORMS
// ============================================================================

/// Encode every byte of `text` as eight bits, lowest bit first.
pub fn text_to_bits(text: &str) -> Result<BitBlock, BlockError> {
    let mut bits = Block::new();
    for byte in text.bytes() {
        for shift in 0..8 {
            bits.push((byte >> shift) & 1 == 1)?;
        }
    }
    Ok(bits)
}

/// Truncate `bits` to `width`, or extend it to exactly `width` with random bits.
pub fn pad<R: RngCore>(
    bits: &mut BitBlock,
    width: usize,
    rng: &mut RandomSource<R>,
) -> Result<(), SignalError> {
    if bits.len() > width {
        bits.resize(width)?;
        return Ok(());
    }
    while bits.len() < width {
        bits.push(rng.random_bit()?)?;
    }
    Ok(())
}

/// Replace every bit with a fresh random bit.
pub fn randomize<R: RngCore>(
    bits: &mut BitBlock,
    rng: &mut RandomSource<R>,
) -> Result<(), RandomError> {
    rng.fill_bits(bits)
}

/// Flip each bit independently with probability `1 / odds`.
pub fn randomize_biased<R: RngCore>(
    bits: &mut BitBlock,
    odds: u64,
    rng: &mut RandomSource<R>,
) -> Result<(), RandomError> {
    for bit in bits.as_mut_slice() {
        if rng.one_in(odds)? {
            *bit = !*bit;
        }
    }
    Ok(())
}

/// Add one to the number `bits` encodes. Overflow wraps to all zeros.
pub fn increment(bits: &mut BitBlock) {
    increment_bits(bits.as_mut_slice());
}

/// Little-endian counter step over a plain slice; `increment` delegates here.
pub fn increment_bits(bits: &mut [bool]) {
    for bit in bits.iter_mut() {
        let carry = *bit;
        *bit = !*bit;
        if !carry {
            break;
        }
    }
}

/// `result[i] = identity[i] != signature[i]` over the length of `identity`.
///
/// `result` is resized to match `identity`. Fails without touching `result`
/// when `signature` is shorter than `identity`.
pub fn xor(
    identity: &BitBlock,
    signature: &BitBlock,
    result: &mut BitBlock,
) -> Result<(), BlockError> {
    if signature.len() < identity.len() {
        return Err(BlockError::IndexOutOfRange {
            index: signature.len(),
            length: signature.len(),
        });
    }

    result.resize(identity.len())?;
    for ((out, a), b) in result
        .as_mut_slice()
        .iter_mut()
        .zip(identity.iter())
        .zip(signature.iter())
    {
        *out = a != b;
    }
    Ok(())
}

/// `target[i] ^= other[i]` over the length of `target`.
pub fn xor_in_place(target: &mut BitBlock, other: &BitBlock) -> Result<(), BlockError> {
    if other.len() < target.len() {
        return Err(BlockError::IndexOutOfRange {
            index: other.len(),
            length: other.len(),
        });
    }
    for (out, b) in target.as_mut_slice().iter_mut().zip(other.iter()) {
        *out ^= *b;
    }
    Ok(())
}

/// `result = (identity XOR signature) + 1`.
pub fn transform(
    identity: &BitBlock,
    signature: &BitBlock,
    result: &mut BitBlock,
) -> Result<(), BlockError> {
    xor(identity, signature, result)?;
    increment(result);
    Ok(())
}

/// `target = (target XOR signature) + 1`.
pub fn transform_in_place(target: &mut BitBlock, signature: &BitBlock) -> Result<(), BlockError> {
    xor_in_place(target, signature)?;
    increment(target);
    Ok(())
}

/// Number of set bits.
pub fn ones(bits: &BitBlock) -> usize {
    bits.iter().filter(|bit| **bit).count()
}

/// `"1"`/`"0"` per bit, index 0 first.
pub fn render_bits(bits: &BitBlock) -> String {
    bits.iter().map(|bit| if *bit { '1' } else { '0' }).collect()
}

fn serialize_bits<S: Serializer>(bits: &BitBlock, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&render_bits(bits))
}

// ============================================================================
// SESSION
// ============================================================================

/// State after one round.
#[derive(Debug, Clone, Serialize)]
pub struct Round {
    pub index: u32,
    /// Message bit transmitted this round.
    pub sent: bool,
    #[serde(serialize_with = "serialize_bits")]
    pub shared: BitBlock,
    #[serde(serialize_with = "serialize_bits")]
    pub hints: BitBlock,
    /// Set bits in the shared state.
    pub ones: usize,
}

/// Outcome of a full session.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionReport {
    pub text: String,
    pub config: SessionConfig,
    #[serde(serialize_with = "serialize_bits")]
    pub initial: BitBlock,
    pub message: u64,
    pub rounds: Block<Round>,
    #[serde(serialize_with = "serialize_bits")]
    pub final_state: BitBlock,
    pub received: u64,
    pub delivered: bool,
}

/// Runs signaling sessions.
pub struct Session;

impl Session {
    /// Encode `text`, then send one message bit per round.
    pub fn run<R: RngCore>(
        text: &str,
        config: &SessionConfig,
        rng: &mut RandomSource<R>,
    ) -> Result<SessionReport, SignalError> {
        config.validate()?;

        let mut shared = text_to_bits(text)?;
        if shared.len() % 2 == 1 {
            let width = shared.len() + 1;
            pad(&mut shared, width, rng)?;
        }
        let length = shared.len();

        let initial = shared.try_clone()?;
        let mut hints = shared.try_clone()?;
        let mut biased: BitBlock = Block::make(length)?;
        let mut noise: BitBlock = Block::make(length)?;

        let message = match config.message {
            Some(message) => message,
            None => rng.random_u64()? & config.message_mask(),
        };
        info!(
            bits = length,
            rounds = config.message_bits,
            "signaling session started"
        );

        let mut rounds = Block::new();
        let mut received = 0u64;
        for index in 0..config.message_bits {
            biased.copy_from(&shared)?;
            randomize_biased(&mut biased, config.flip_odds, rng)?;
            randomize(&mut noise, rng)?;

            let bit = (message >> index) & 1;
            check_bit(bit);
            let sent = bit == 1;

            transform_in_place(&mut shared, if sent { &biased } else { &noise })?;
            if sent {
                received |= 1 << index;
            }
            xor_in_place(&mut hints, &shared)?;

            let set = ones(&shared);
            debug!(round = index, sent, ones = set, "round complete");
            rounds.push(Round {
                index,
                sent,
                shared: shared.try_clone()?,
                hints: hints.try_clone()?,
                ones: set,
            })?;
        }

        let delivered = received == message;
        info!(message, received, delivered, "signaling session finished");

        Ok(SessionReport {
            text: text.to_string(),
            config: config.clone(),
            initial,
            message,
            rounds,
            final_state: shared,
            received,
            delivered,
        })
    }
}
