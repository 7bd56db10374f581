//! Growable typed blocks with explicit length/capacity and checked growth.
//!
//! The centerpiece is [`Block<T>`]: an array that grows by doubling, exposes
//! its capacity, zero-fills on growth, bounds-checks access, and turns every
//! caller mistake (reading past the end, popping an empty block, asking for
//! impossible sizes) into a [`BlockError`] instead of undefined behavior.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌──────────────┐     ┌──────────────┐
//! │   block/    │◀────│  compare.rs  │     │  random.rs   │
//! │ (Block<T>,  │     │ (ascending,  │     │(RandomSource)│
//! │  growth)    │     │  strings_*)  │     │              │
//! └─────────────┘     └──────────────┘     └──────────────┘
//!        │                   │                    │
//!        ▼                   ▼                    ▼
//! ┌─────────────────────────────────────────────────────┐
//! │  verified.rs (SortedBlock)   signal.rs (Session)    │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! `contracts` re-checks block invariants in debug builds; `signal` is a small
//! bit-signaling demo that exercises the block API end to end.
//!
//! # Usage
//!
//! ```
//! use smoki::compare::ascending;
//! use smoki::Block;
//!
//! let mut block = Block::new();
//! for value in [5, 3, 9, 1] {
//!     block.push(value)?;
//! }
//! block.sort_by(ascending);
//!
//! assert_eq!(block.search(&9, ascending), Some(&9));
//! assert!(block.pop().is_ok());
//! # Ok::<(), smoki::BlockError>(())
//! ```

// Module declarations
pub mod block;
pub mod compare;
pub mod config;
pub mod contracts;
pub mod random;
pub mod signal;
pub mod testing;
pub mod verified;

// Re-exports for public API
pub use block::{Block, BlockError};
pub use compare::{ascending, descending, strings_ascending, strings_descending, Direction};
pub use config::{ConfigError, SessionConfig};
pub use random::{RandomError, RandomSource};
pub use signal::{BitBlock, Session, SessionReport, SignalError};
pub use verified::{InvariantError, SortedBlock};
