//! Session configuration for the signaling demo.
//!
//! The demo works with zero arguments: every field has a default, and the
//! only source of values besides the defaults is the command line. The chosen
//! configuration is echoed into every report so runs can be reproduced.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Widest message a session can carry (one bit per round).
pub const MAX_MESSAGE_BITS: u32 = 64;

/// Rounds per session unless overridden.
pub const DEFAULT_MESSAGE_BITS: u32 = 8;

/// A biased stream flips each bit with probability `1 / DEFAULT_FLIP_ODDS`.
pub const DEFAULT_FLIP_ODDS: u64 = 3;

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// `message_bits` outside `1..=64`.
    MessageBits(u32),
    /// `flip_odds` of zero would never flip anything.
    FlipOdds(u64),
    /// Explicit message does not fit in `message_bits`.
    MessageTooWide { message: u64, bits: u32 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::MessageBits(bits) => {
                write!(
                    f,
                    "message bits must be in 1..={}, got {}",
                    MAX_MESSAGE_BITS, bits
                )
            }
            ConfigError::FlipOdds(odds) => write!(f, "flip odds must be at least 1, got {}", odds),
            ConfigError::MessageTooWide { message, bits } => {
                write!(f, "message {} does not fit in {} bits", message, bits)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Everything that shapes one signaling session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionConfig {
    /// Rounds to run; one message bit is sent per round.
    pub message_bits: u32,
    /// Each bit of the biased stream flips with probability `1 / flip_odds`.
    pub flip_odds: u64,
    /// Seed for a reproducible stream; the OS stream is used when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    /// Message to send; drawn at random when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<u64>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            message_bits: DEFAULT_MESSAGE_BITS,
            flip_odds: DEFAULT_FLIP_ODDS,
            seed: None,
            message: None,
        }
    }
}

impl SessionConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.message_bits == 0 || self.message_bits > MAX_MESSAGE_BITS {
            return Err(ConfigError::MessageBits(self.message_bits));
        }
        if self.flip_odds == 0 {
            return Err(ConfigError::FlipOdds(self.flip_odds));
        }
        if let Some(message) = self.message {
            if message & !self.message_mask() != 0 {
                return Err(ConfigError::MessageTooWide {
                    message,
                    bits: self.message_bits,
                });
            }
        }
        Ok(())
    }

    /// Mask selecting the low `message_bits` bits.
    pub fn message_mask(&self) -> u64 {
        if self.message_bits >= MAX_MESSAGE_BITS {
            u64::MAX
        } else {
            (1u64 << self.message_bits) - 1
        }
    }
}
