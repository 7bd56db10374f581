//! Random bytes and bits for the signaling demo.
//!
//! A `RandomSource` is an explicit object: create it, pass it by `&mut` to
//! whatever needs randomness, drop it when done. There is no process-wide
//! handle. Two streams are provided:
//!
//! - [`RandomSource::os`]: the operating system's secure stream (`OsRng`)
//! - [`RandomSource::seeded`]: ChaCha8 from a `u64` seed, for reproducible runs
//!
//! Failures of the underlying stream are returned as [`RandomError`]; a
//! caller never receives bytes that were not actually produced.

use crate::block::Block;
use rand::rngs::OsRng;
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::fmt;
use tracing::warn;

/// Bytes drawn per refill of the bit pool.
pub const POOL_BYTES: usize = 512;

const POOL_BITS: usize = POOL_BYTES * 8;

/// The underlying random stream failed.
#[derive(Debug)]
pub struct RandomError {
    source: rand::Error,
}

impl fmt::Display for RandomError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "random source failed: {}", self.source)
    }
}

impl std::error::Error for RandomError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.source)
    }
}

impl From<rand::Error> for RandomError {
    fn from(source: rand::Error) -> Self {
        Self { source }
    }
}

/// Buffered random stream handing out bytes, words and single bits.
pub struct RandomSource<R> {
    rng: R,
    pool: [u8; POOL_BYTES],
    /// Next unread bit of `pool`; `POOL_BITS` means the pool is spent.
    cursor: usize,
}

impl RandomSource<OsRng> {
    /// Source backed by the operating system's secure random stream.
    pub fn os() -> Self {
        Self::new(OsRng)
    }
}

impl RandomSource<ChaCha8Rng> {
    /// Deterministic source; the same seed always yields the same stream.
    pub fn seeded(seed: u64) -> Self {
        Self::new(ChaCha8Rng::seed_from_u64(seed))
    }
}

impl<R: RngCore> RandomSource<R> {
    pub fn new(rng: R) -> Self {
        Self {
            rng,
            pool: [0; POOL_BYTES],
            cursor: POOL_BITS,
        }
    }

    /// Fill `buffer` entirely from the stream.
    pub fn fill(&mut self, buffer: &mut [u8]) -> Result<(), RandomError> {
        self.rng.try_fill_bytes(buffer).map_err(|e| {
            warn!(error = %e, bytes = buffer.len(), "random source failed");
            RandomError::from(e)
        })
    }

    pub fn random_byte(&mut self) -> Result<u8, RandomError> {
        let mut byte = [0u8; 1];
        self.fill(&mut byte)?;
        Ok(byte[0])
    }

    pub fn random_u64(&mut self) -> Result<u64, RandomError> {
        let mut word = [0u8; 8];
        self.fill(&mut word)?;
        Ok(u64::from_le_bytes(word))
    }

    /// One fair bit, drawn least-significant-first from the pool.
    pub fn random_bit(&mut self) -> Result<bool, RandomError> {
        if self.cursor >= POOL_BITS {
            let mut pool = [0u8; POOL_BYTES];
            self.fill(&mut pool)?;
            self.pool = pool;
            self.cursor = 0;
        }

        let byte = self.pool[self.cursor / 8];
        let bit = (byte >> (self.cursor % 8)) & 1;
        self.cursor += 1;
        Ok(bit == 1)
    }

    /// Uniform value in `0..bound`. `bound` must be non-zero.
    fn below(&mut self, bound: u64) -> Result<u64, RandomError> {
        debug_assert!(bound > 0);
        // Reject the tail so every residue is equally likely
        let zone = u64::MAX - (u64::MAX % bound);
        loop {
            let value = self.random_u64()?;
            if value < zone {
                return Ok(value % bound);
            }
        }
    }

    /// True with probability `1 / odds`. `odds == 0` is never true.
    pub fn one_in(&mut self, odds: u64) -> Result<bool, RandomError> {
        match odds {
            0 => Ok(false),
            1 => Ok(true),
            _ => Ok(self.below(odds)? == 0),
        }
    }

    /// Overwrite every element of `bits` with a fresh random bit.
    pub fn fill_bits(&mut self, bits: &mut Block<bool>) -> Result<(), RandomError> {
        for slot in bits.as_mut_slice() {
            *slot = self.random_bit()?;
        }
        Ok(())
    }
}

impl<R> fmt::Debug for RandomSource<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RandomSource")
            .field("cursor", &self.cursor)
            .finish_non_exhaustive()
    }
}
