// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! CLI definitions for the smoki command-line interface.
//!
//! Three subcommands: `run` to play signaling sessions over one or more
//! texts, `encode` to show how a text becomes a bit block, and `sort` to sort
//! and search values with the comparator family.

pub mod display;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "smoki",
    about = "Growable typed blocks and a bit-signaling demo built on them",
    version
)]
pub struct Cli {
    /// Log level (trace, debug, info, warn, error); RUST_LOG takes precedence
    #[arg(long, default_value = "warn", global = true)]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run one signaling session per text
    Run {
        /// Texts to encode as the initial shared state (defaults to the program name)
        texts: Vec<String>,

        /// Seed for a reproducible random stream (OS randomness when omitted)
        #[arg(long)]
        seed: Option<u64>,

        /// Message to send instead of a random one
        #[arg(long)]
        message: Option<u64>,

        /// Message width in bits; one round per bit
        #[arg(long, default_value = "8")]
        bits: u32,

        /// Flip each biased bit with probability 1/N
        #[arg(long, default_value = "3")]
        flip_odds: u64,

        /// Print reports as JSON instead of boxes
        #[arg(long)]
        json: bool,
    },

    /// Show the bit encoding of a text
    Encode {
        /// Text to encode
        text: String,
    },

    /// Sort values with the built-in comparators
    Sort {
        /// Values to sort; the literal `null` is an absent string
        #[arg(allow_negative_numbers = true)]
        values: Vec<String>,

        /// Largest first (absent strings last)
        #[arg(short, long)]
        descending: bool,

        /// Compare as numbers instead of strings
        #[arg(short, long)]
        numeric: bool,

        /// Binary-search the sorted values for this one
        #[arg(long, allow_negative_numbers = true)]
        find: Option<String>,
    },
}
