//! Three-way comparators for [`Block::sort_by`](crate::Block::sort_by) and
//! [`Block::search`](crate::Block::search).
//!
//! One generic pair covers every primitive numeric type. Strings come in a
//! nullable flavor where an absent string sorts first when ascending and last
//! when descending; two present strings compare byte-wise lexicographically.
//!
//! ```
//! use smoki::compare::{ascending, strings_descending};
//! use smoki::Block;
//!
//! let mut numbers = Block::from_vec(vec![3.5, -1.0, 2.0]);
//! numbers.sort_by(ascending);
//! assert_eq!(numbers.as_slice(), &[-1.0, 2.0, 3.5]);
//!
//! let mut names = Block::from_vec(vec![Some("b"), None, Some("a")]);
//! names.sort_by(strings_descending);
//! assert_eq!(names.as_slice(), &[Some("b"), Some("a"), None]);
//! ```

use std::cmp::Ordering;

/// Smaller values first.
///
/// Values that are neither less nor greater (including NaN against anything)
/// compare `Equal`, so float blocks containing NaN have no meaningful order.
#[inline]
pub fn ascending<T: PartialOrd>(lhs: &T, rhs: &T) -> Ordering {
    if lhs < rhs {
        Ordering::Less
    } else if lhs > rhs {
        Ordering::Greater
    } else {
        Ordering::Equal
    }
}

/// Larger values first.
#[inline]
pub fn descending<T: PartialOrd>(lhs: &T, rhs: &T) -> Ordering {
    ascending(rhs, lhs)
}

/// Absent strings first, then lexicographic order.
pub fn strings_ascending<S: AsRef<str>>(lhs: &Option<S>, rhs: &Option<S>) -> Ordering {
    match (lhs, rhs) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(l), Some(r)) => l.as_ref().cmp(r.as_ref()),
    }
}

/// Reverse lexicographic order, absent strings last.
pub fn strings_descending<S: AsRef<str>>(lhs: &Option<S>, rhs: &Option<S>) -> Ordering {
    strings_ascending(rhs, lhs)
}

/// Sort direction chosen at run time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Ascending,
    Descending,
}

impl Direction {
    /// Compare two values in this direction.
    #[inline]
    pub fn apply<T: PartialOrd>(self, lhs: &T, rhs: &T) -> Ordering {
        match self {
            Direction::Ascending => ascending(lhs, rhs),
            Direction::Descending => descending(lhs, rhs),
        }
    }

    /// Compare two nullable strings in this direction.
    #[inline]
    pub fn apply_strings<S: AsRef<str>>(self, lhs: &Option<S>, rhs: &Option<S>) -> Ordering {
        match self {
            Direction::Ascending => strings_ascending(lhs, rhs),
            Direction::Descending => strings_descending(lhs, rhs),
        }
    }
}
