// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for arbitrary sequences of block operations.
//!
//! Every operation is mirrored on a `Vec`. After each step the block must hold
//! the same elements as the oracle, and capacity must cover length. Failing
//! operations must leave both untouched.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use smoki::block::growth::obeys_growth_law;
use smoki::compare::{ascending, descending};
use smoki::Block;

/// Indices and lengths are kept small so the fuzzer explores logic, not the
/// allocator.
#[derive(Debug, Arbitrary)]
enum Op {
    Push(i16),
    Pop,
    Insert(u8, i16),
    Set(u8, i16),
    Get(u8),
    Resize(u8),
    ZeroRange(u8, u8),
    Clear,
    Append(Vec<i16>),
    CopyFrom(Vec<i16>),
    SwapWith(Vec<i16>),
    SortAscending,
    SortDescending,
    Search(i16),
    Release,
}

fuzz_target!(|ops: Vec<Op>| {
    let mut block: Block<i16> = Block::new();
    let mut oracle: Vec<i16> = Vec::new();

    for op in &ops {
        let before = block.capacity();

        match op {
            Op::Push(v) => {
                block.push(*v).unwrap();
                oracle.push(*v);
            }
            Op::Pop => assert_eq!(block.pop().ok(), oracle.pop()),
            Op::Insert(i, v) => {
                let i = *i as usize;
                block.insert(i, *v).unwrap();
                if i >= oracle.len() {
                    oracle.resize(i + 1, 0);
                }
                oracle[i] = *v;
            }
            Op::Set(i, v) => {
                let i = *i as usize;
                let result = block.set(i, *v);
                assert_eq!(result.is_ok(), i < oracle.len());
                if i < oracle.len() {
                    oracle[i] = *v;
                }
            }
            Op::Get(i) => {
                assert_eq!(block.get(*i as usize).ok(), oracle.get(*i as usize));
            }
            Op::Resize(n) => {
                block.resize(*n as usize).unwrap();
                oracle.resize(*n as usize, 0);
            }
            Op::ZeroRange(start, end) => {
                let (start, end) = (*start as usize, *end as usize);
                let ok = start <= end && end <= oracle.len();
                assert_eq!(block.zero_range(start, end).is_ok(), ok);
                if ok {
                    oracle[start..end].fill(0);
                }
            }
            Op::Clear => {
                block.clear();
                oracle.clear();
            }
            Op::Append(values) => {
                block.append(&Block::from_vec(values.clone())).unwrap();
                oracle.extend_from_slice(values);
            }
            Op::CopyFrom(values) => {
                block.copy_from(&Block::from_vec(values.clone())).unwrap();
                oracle = values.clone();
            }
            Op::SwapWith(values) => {
                let mut other = Block::from_vec(values.clone());
                block.swap(&mut other);
                assert_eq!(other.as_slice(), oracle.as_slice());
                oracle = values.clone();
            }
            Op::SortAscending => {
                block.sort_by(ascending);
                oracle.sort();
            }
            Op::SortDescending => {
                block.sort_by(descending);
                oracle.sort_by(|a, b| b.cmp(a));
            }
            Op::Search(key) => {
                let mut sorted = block.try_clone().unwrap();
                sorted.sort_by(ascending);
                assert_eq!(
                    sorted.search(key, ascending).is_some(),
                    oracle.contains(key)
                );
            }
            Op::Release => {
                block.release();
                oracle.clear();
                assert_eq!(block.capacity(), 0);
            }
        }

        assert_eq!(block.as_slice(), oracle.as_slice(), "after {:?}", op);
        assert!(block.capacity() >= block.len());

        let after = block.capacity();
        let replaced = matches!(op, Op::SwapWith(_) | Op::Release);
        if after > before && !replaced {
            assert!(
                obeys_growth_law(before, block.len(), after),
                "capacity {} -> {} for length {}",
                before,
                after,
                block.len()
            );
        }
    }
});
