//! Sorting, searching and the comparator family.

use super::common::block_of;
use smoki::compare::Direction;
use smoki::{
    ascending, descending, strings_ascending, strings_descending, Block, InvariantError,
    SortedBlock,
};
use std::cmp::Ordering;

#[test]
fn test_sort_descending_then_search() {
    let mut block = block_of(&[3, 1, 2]);
    block.sort_by(descending);
    assert_eq!(block.as_slice(), &[3, 2, 1]);
    assert_eq!(block.search(&2, descending), Some(&2));
    assert_eq!(block.search(&5, descending), None);
}

#[test]
fn test_sort_floats() {
    let mut block = block_of(&[2.5f64, -1.0, 0.0, 10.25]);
    block.sort_by(ascending);
    assert_eq!(block.as_slice(), &[-1.0, 0.0, 2.5, 10.25]);
    assert_eq!(block.search(&2.5, ascending), Some(&2.5));
}

#[test]
fn test_sort_every_integer_width() {
    let mut bytes = block_of(&[200u8, 3, 77]);
    bytes.sort_by(ascending);
    assert_eq!(bytes.as_slice(), &[3, 77, 200]);

    let mut wide = block_of(&[i64::MIN, i64::MAX, 0]);
    wide.sort_by(descending);
    assert_eq!(wide.as_slice(), &[i64::MAX, 0, i64::MIN]);

    let mut chars = block_of(&['q', 'a', 'm']);
    chars.sort_by(ascending);
    assert_eq!(chars.as_slice(), &['a', 'm', 'q']);
}

#[test]
fn test_search_empty_block() {
    let block: Block<i32> = Block::new();
    assert_eq!(block.search(&1, ascending), None);
}

#[test]
fn test_nullable_strings_sort_nulls_first_ascending() {
    let mut block = block_of(&[Some("pear"), None, Some("apple")]);
    block.sort_by(strings_ascending);
    assert_eq!(block.as_slice(), &[None, Some("apple"), Some("pear")]);
    assert_eq!(block.search(&Some("pear"), strings_ascending), Some(&Some("pear")));
}

#[test]
fn test_nullable_strings_sort_nulls_last_descending() {
    let mut block = block_of(&[
        Some("pear".to_string()),
        None,
        Some("apple".to_string()),
    ]);
    block.sort_by(strings_descending);
    assert_eq!(
        block.as_slice(),
        &[Some("pear".to_string()), Some("apple".to_string()), None]
    );
}

#[test]
fn test_comparator_signs() {
    assert_eq!(strings_ascending::<&str>(&None, &Some("a")), Ordering::Less);
    assert_eq!(strings_ascending(&Some("a"), &None), Ordering::Greater);
    assert_eq!(strings_ascending::<&str>(&None, &None), Ordering::Equal);
    assert_eq!(strings_descending::<&str>(&None, &Some("a")), Ordering::Greater);
    assert_eq!(ascending(&f64::NAN, &1.0), Ordering::Equal);
}

#[test]
fn test_direction_dispatch() {
    assert_eq!(Direction::default(), Direction::Ascending);
    assert_eq!(Direction::Descending.apply(&1, &2), Ordering::Greater);
    assert_eq!(
        Direction::Descending.apply_strings(&Some("b"), &Some("a")),
        Ordering::Less
    );
    assert_eq!(
        Direction::Ascending.apply_strings(&None, &Some("a")),
        Ordering::Less
    );
}

#[test]
fn test_sorted_block_round_trip() {
    let sorted = SortedBlock::sort(block_of(&[5, 3, 9, 1]), ascending);
    assert!(sorted.contains(&9));
    assert!(!sorted.contains(&4));

    let block = sorted.into_inner();
    assert!(SortedBlock::new(block, ascending).is_ok());
}

#[test]
fn test_sorted_block_rejects_unsorted() {
    let err = SortedBlock::new(block_of(&[1, 3, 2]), ascending).unwrap_err();
    assert_eq!(err, InvariantError::Unsorted { position: 2 });
}
