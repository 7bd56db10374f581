//! Block lifecycle, access and growth through the public API.

use super::common::{assert_well_formed, block_of};
use smoki::{Block, BlockError};

// ============================================================================
// CONSTRUCTION
// ============================================================================

#[test]
fn test_make_is_exact_and_zeroed() {
    let block: Block<u32> = Block::make(5).unwrap();
    assert_eq!(block.len(), 5);
    assert_eq!(block.capacity(), 5);
    assert!(block.iter().all(|v| *v == 0));
}

#[test]
fn test_make_zero_owns_nothing() {
    let block: Block<u8> = Block::make(0).unwrap();
    assert!(block.is_empty());
    assert_eq!(block.capacity(), 0);
}

#[test]
fn test_make_huge_fails_cleanly() {
    let err = Block::<u64>::make(usize::MAX).unwrap_err();
    assert!(matches!(err, BlockError::Allocation { element_size: 8, .. }));
}

#[test]
fn test_release_is_repeatable() {
    let mut block = block_of(&[1, 2, 3]);
    block.release();
    assert_eq!((block.len(), block.capacity()), (0, 0));
    block.release();
    assert_eq!((block.len(), block.capacity()), (0, 0));

    // Usable again after release
    block.push(9).unwrap();
    assert_eq!(block.as_slice(), &[9]);
}

// ============================================================================
// ACCESS
// ============================================================================

#[test]
fn test_get_and_set_are_bounds_checked() {
    let mut block = block_of(&['a', 'b']);
    assert_eq!(block.get(1), Ok(&'b'));
    assert_eq!(
        block.get(2),
        Err(BlockError::IndexOutOfRange {
            index: 2,
            length: 2
        })
    );

    block.set(0, 'z').unwrap();
    assert!(block.set(2, 'q').is_err());
    assert_eq!(block.as_slice(), &['z', 'b']);
    assert_eq!(block.capacity(), 2);
}

#[test]
fn test_front_back_pop_on_empty() {
    let mut block: Block<i64> = Block::new();
    assert_eq!(
        block.front(),
        Err(BlockError::EmptyBlock { operation: "front" })
    );
    assert_eq!(block.back(), Err(BlockError::EmptyBlock { operation: "back" }));
    assert_eq!(block.pop(), Err(BlockError::EmptyBlock { operation: "pop" }));
}

#[test]
fn test_error_messages() {
    assert_eq!(
        BlockError::IndexOutOfRange {
            index: 4,
            length: 2
        }
        .to_string(),
        "index 4 >= length 2"
    );
    assert_eq!(
        BlockError::EmptyBlock { operation: "pop" }.to_string(),
        "pop on an empty block"
    );
}

// ============================================================================
// GROWTH
// ============================================================================

#[test]
fn test_push_doubles_from_one() {
    let mut block = Block::new();
    let mut capacities = Vec::new();
    for i in 0..9 {
        block.push(i).unwrap();
        capacities.push(block.capacity());
    }
    assert_eq!(capacities, vec![1, 2, 4, 4, 8, 8, 8, 8, 16]);
    assert_eq!(block.front(), Ok(&0));
    assert_eq!(block.back(), Ok(&8));
}

#[test]
fn test_push_pop_scenario() {
    let mut block = Block::new();
    for v in [3, 1, 2] {
        block.push(v).unwrap();
    }
    assert_eq!(block.pop(), Ok(2));
    assert_eq!(block.as_slice(), &[3, 1]);
    assert_eq!(block.capacity(), 4);
}

#[test]
fn test_insert_past_end_zero_fills_gap() {
    let mut block = block_of(&[7u8]);
    block.insert(4, 9).unwrap();
    assert_eq!(block.as_slice(), &[7, 0, 0, 0, 9]);
    assert_eq!(block.capacity(), 8);
    assert_well_formed(&block);
}

#[test]
fn test_shrink_then_regrow_reads_zeros() {
    let mut block = block_of(&[5, 6, 7, 8]);
    block.resize(1).unwrap();
    assert_eq!(block.capacity(), 4);
    block.resize(4).unwrap();
    assert_eq!(block.as_slice(), &[5, 0, 0, 0]);
}

#[test]
fn test_failed_growth_changes_nothing() {
    let mut block = block_of(&[1u32, 2, 3]);
    assert!(block.resize(usize::MAX).is_err());
    assert!(block.insert(usize::MAX - 1, 4).is_err());
    assert_eq!(block.as_slice(), &[1, 2, 3]);
    assert_eq!(block.capacity(), 3);
}

#[test]
fn test_zero_range_and_zero() {
    let mut block = block_of(&[1, 2, 3, 4]);
    block.zero_range(1, 3).unwrap();
    assert_eq!(block.as_slice(), &[1, 0, 0, 4]);
    assert!(block.zero_range(2, 5).is_err());
    assert!(block.zero_range(3, 2).is_err());

    block.zero();
    assert_eq!(block.as_slice(), &[0, 0, 0, 0]);
}

// ============================================================================
// BULK OPERATIONS
// ============================================================================

#[test]
fn test_append_grows_once() {
    let mut block = block_of(&[1, 2, 3]);
    block.append(&block_of(&[4, 5, 6, 7, 8])).unwrap();
    assert_eq!(block.as_slice(), &[1, 2, 3, 4, 5, 6, 7, 8]);
    assert_eq!(block.capacity(), 12);
}

#[test]
fn test_append_empty_is_noop() {
    let mut block = block_of(&[1]);
    block.append(&Block::new()).unwrap();
    assert_eq!(block.as_slice(), &[1]);
    assert_eq!(block.capacity(), 1);
}

#[test]
fn test_copy_from_replaces_contents() {
    let mut target = block_of(&[9, 9, 9, 9, 9]);
    target.copy_from(&block_of(&[1, 2])).unwrap();
    assert_eq!(target.as_slice(), &[1, 2]);
    assert_eq!(target.capacity(), 5);

    let mut small = block_of(&[0]);
    small.copy_from(&block_of(&[1, 2, 3])).unwrap();
    assert_eq!(small.as_slice(), &[1, 2, 3]);
    assert_well_formed(&small);
}

#[test]
fn test_clone_is_independent() {
    let mut original = Block::new();
    for v in 0..5 {
        original.push(v).unwrap();
    }
    let copy = original.try_clone().unwrap();
    assert_eq!(copy.capacity(), 5);

    original.set(0, 100).unwrap();
    assert_eq!(copy.get(0), Ok(&0));
}

#[test]
fn test_swap_exchanges_everything() {
    let mut a = block_of(&[1, 2, 3]);
    let mut b = Block::new();
    b.push(4).unwrap();
    b.push(5).unwrap();
    b.push(6).unwrap();

    let (a_ptr, b_ptr) = (a.as_ptr(), b.as_ptr());
    a.swap(&mut b);

    assert_eq!(a.as_slice(), &[4, 5, 6]);
    assert_eq!(a.capacity(), 4);
    assert_eq!(b.as_slice(), &[1, 2, 3]);
    assert_eq!(b.capacity(), 3);
    assert_eq!(a.as_ptr(), b_ptr);
    assert_eq!(b.as_ptr(), a_ptr);
}

#[test]
fn test_for_each_visits_in_order() {
    let block = block_of(&["x", "y", "z"]);
    let mut seen = Vec::new();
    block.for_each(|value, index| seen.push((index, *value)));
    assert_eq!(seen, vec![(0, "x"), (1, "y"), (2, "z")]);

    let mut calls = 0;
    Block::<u8>::new().for_each(|_, _| calls += 1);
    assert_eq!(calls, 0);
}

#[test]
fn test_iterators_and_collect() {
    let block: Block<i32> = (1..=4).collect();
    assert_eq!(block.capacity(), 4);
    let doubled: Vec<i32> = block.iter().map(|v| v * 2).collect();
    assert_eq!(doubled, vec![2, 4, 6, 8]);

    let mut sum = 0;
    for v in &block {
        sum += v;
    }
    assert_eq!(sum, 10);
    assert_eq!(block.into_vec(), vec![1, 2, 3, 4]);
}

#[test]
fn test_serde_sequence() {
    let block = block_of(&[Some("a".to_string()), None]);
    let json = serde_json::to_string(&block).unwrap();
    assert_eq!(json, r#"["a",null]"#);

    let back: Block<Option<String>> = serde_json::from_str(&json).unwrap();
    assert_eq!(back, block);
    assert_eq!(back.capacity(), 2);
}
