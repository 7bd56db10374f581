// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! A growable, typed block of elements with explicit length and capacity.
//!
//! `Block<T>` behaves like a resizable array, but it tracks its capacity
//! itself instead of deferring to the allocator, so the growth policy is
//! exact and observable: capacity doubles from `max(1, capacity)` until it
//! covers the request, and never shrinks implicitly.
//!
//! # Invariants
//!
//! - `capacity() >= len()` after every call, including on an empty block
//!   (`len == capacity == 0`).
//! - Capacity growth follows [`growth::grown_capacity`] exactly.
//! - Elements exposed by growing the length are the type's zero value
//!   (`T::default()`), including slots that held data before a truncation.
//! - A failing call leaves length, capacity and contents untouched.
//!
//! # Relocation
//!
//! Any call that can grow the block (`resize`, `insert`, `push`, `append`,
//! `copy_from`) may move the storage. The borrow checker already forbids
//! holding element references across these calls; raw pointers obtained via
//! [`Block::as_ptr`] are invalidated by them.
//!
//! # Example
//!
//! ```
//! use smoki::Block;
//!
//! let mut block: Block<i32> = Block::new();
//! block.push(1)?;
//! block.push(2)?;
//! block.resize(5)?;
//!
//! assert_eq!(block.as_slice(), &[1, 2, 0, 0, 0]);
//! assert_eq!(block.capacity(), 8);
//! # Ok::<(), smoki::BlockError>(())
//! ```

mod error;
pub mod growth;

pub use error::BlockError;

use crate::contracts::{check_capacity_covers_length, check_growth_law, check_sorted};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use tracing::trace;

/// Growable typed storage with an explicit capacity.
#[derive(Debug)]
pub struct Block<T> {
    /// Live elements; `items.len()` is the logical length.
    items: Vec<T>,
    /// Slots owned by this block. The allocator may hand out more; this is
    /// the figure the growth law speaks about.
    capacity: usize,
}

impl<T> Block<T> {
    /// An empty block owning no storage.
    pub const fn new() -> Self {
        Self {
            items: Vec::new(),
            capacity: 0,
        }
    }

    /// Allocate exactly `length` elements, each set to the zero value.
    ///
    /// Unlike growth through [`resize`](Self::resize), no doubling happens:
    /// `len() == capacity() == length`.
    pub fn make(length: usize) -> Result<Self, BlockError>
    where
        T: Default,
    {
        if length > Self::max_capacity() {
            return Err(BlockError::allocation::<T>(length));
        }
        let mut items = Vec::new();
        items
            .try_reserve_exact(length)
            .map_err(|_| BlockError::allocation::<T>(length))?;
        items.resize_with(length, T::default);

        Ok(Self {
            items,
            capacity: length,
        })
    }

    /// Wrap an existing vector. Capacity is set to its length.
    pub fn from_vec(items: Vec<T>) -> Self {
        let capacity = items.len();
        Self { items, capacity }
    }

    /// Free the storage and return to the empty state.
    ///
    /// Safe to call any number of times.
    pub fn release(&mut self) {
        self.items = Vec::new();
        self.capacity = 0;
    }

    /// Number of live elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Number of slots owned.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    // ========================================================================
    // ELEMENT ACCESS
    // ========================================================================

    /// Element at `index`, or `IndexOutOfRange` when `index >= len()`.
    #[inline]
    pub fn get(&self, index: usize) -> Result<&T, BlockError> {
        self.items
            .get(index)
            .ok_or_else(|| BlockError::out_of_range(index, self.items.len()))
    }

    #[inline]
    pub fn get_mut(&mut self, index: usize) -> Result<&mut T, BlockError> {
        let length = self.items.len();
        self.items
            .get_mut(index)
            .ok_or_else(|| BlockError::out_of_range(index, length))
    }

    /// Overwrite the element at `index`. Never grows the block.
    pub fn set(&mut self, index: usize, value: T) -> Result<(), BlockError> {
        *self.get_mut(index)? = value;
        Ok(())
    }

    /// First element.
    pub fn front(&self) -> Result<&T, BlockError> {
        self.items.first().ok_or_else(|| BlockError::empty("front"))
    }

    /// Last element.
    pub fn back(&self) -> Result<&T, BlockError> {
        self.items.last().ok_or_else(|| BlockError::empty("back"))
    }

    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.items
    }

    /// Address of the first slot. Only meaningful until the next growing call.
    #[inline]
    pub fn as_ptr(&self) -> *const T {
        self.items.as_ptr()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    // ========================================================================
    // GROWTH
    // ========================================================================

    /// Raise capacity so `request` elements fit, following the growth law.
    ///
    /// Nothing is modified unless the reservation succeeds. Capacity never
    /// exceeds `isize::MAX` bytes, counting zero-sized elements as one byte
    /// each, so a block of `()` is refused at the same element count as a
    /// block of `u8`.
    fn ensure_capacity(&mut self, request: usize) -> Result<(), BlockError> {
        if request <= self.capacity {
            return Ok(());
        }

        let previous = self.capacity;
        let expanded = growth::grown_capacity(previous, request)
            .filter(|&expanded| expanded <= Self::max_capacity())
            .ok_or_else(|| BlockError::allocation::<T>(request))?;

        // INVARIANT: items.len() <= capacity < expanded, so this cannot underflow
        let additional = expanded - self.items.len();
        self.items
            .try_reserve_exact(additional)
            .map_err(|_| BlockError::allocation::<T>(expanded))?;
        self.capacity = expanded;

        check_growth_law(previous, request, expanded);
        trace!(previous, request, capacity = expanded, "block grew");
        Ok(())
    }

    /// Largest capacity a block of `T` may reach.
    const fn max_capacity() -> usize {
        let size = std::mem::size_of::<T>();
        isize::MAX as usize / if size == 0 { 1 } else { size }
    }

    /// Set the logical length to `length`.
    ///
    /// Growing zero-fills `[len(), length)`; shrinking only truncates and keeps
    /// the capacity. Every new element is written, so growth takes time
    /// linear in `length` even for zero-sized `T`.
    pub fn resize(&mut self, length: usize) -> Result<(), BlockError>
    where
        T: Default,
    {
        self.ensure_capacity(length)?;
        self.items.resize_with(length, T::default);

        check_capacity_covers_length(self.items.len(), self.capacity);
        Ok(())
    }

    /// Write `value` at `index`, growing the block to `index + 1` first if
    /// needed (the gap is zero-filled).
    pub fn insert(&mut self, index: usize, value: T) -> Result<(), BlockError>
    where
        T: Default,
    {
        if index >= self.items.len() {
            let length = index
                .checked_add(1)
                .ok_or_else(|| BlockError::allocation::<T>(index))?;
            self.resize(length)?;
        }
        self.set(index, value)
    }

    /// Append one element. Amortized O(1).
    pub fn push(&mut self, value: T) -> Result<(), BlockError> {
        let length = self.items.len();
        let request = length
            .checked_add(1)
            .ok_or_else(|| BlockError::allocation::<T>(length))?;
        self.ensure_capacity(request)?;
        self.items.push(value);

        check_capacity_covers_length(self.items.len(), self.capacity);
        Ok(())
    }

    /// Remove and return the last element.
    pub fn pop(&mut self) -> Result<T, BlockError> {
        self.items.pop().ok_or_else(|| BlockError::empty("pop"))
    }

    /// Drop every element but keep the capacity.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Overwrite `[start, end)` with the zero value.
    pub fn zero_range(&mut self, start: usize, end: usize) -> Result<(), BlockError>
    where
        T: Default,
    {
        let length = self.items.len();
        if end > length {
            return Err(BlockError::out_of_range(end, length));
        }
        if start > end {
            return Err(BlockError::out_of_range(start, end));
        }
        self.items[start..end].fill_with(T::default);
        Ok(())
    }

    /// Overwrite every element with the zero value.
    pub fn zero(&mut self)
    where
        T: Default,
    {
        self.items.fill_with(T::default);
    }

    // ========================================================================
    // BULK OPERATIONS
    // ========================================================================

    /// Copy all of `other` onto the end of this block in one pass.
    pub fn append(&mut self, other: &Block<T>) -> Result<(), BlockError>
    where
        T: Clone,
    {
        let length = self.items.len();
        let request = length
            .checked_add(other.len())
            .ok_or_else(|| BlockError::allocation::<T>(usize::MAX))?;
        self.ensure_capacity(request)?;
        self.items.extend_from_slice(&other.items);

        check_capacity_covers_length(self.items.len(), self.capacity);
        Ok(())
    }

    /// Replace this block's contents with a copy of `source`, reusing the
    /// existing capacity where it suffices.
    pub fn copy_from(&mut self, source: &Block<T>) -> Result<(), BlockError>
    where
        T: Clone,
    {
        // Reserve before clearing so a failure keeps the old contents
        self.ensure_capacity(source.len())?;
        self.items.clear();
        self.items.extend_from_slice(&source.items);

        check_capacity_covers_length(self.items.len(), self.capacity);
        Ok(())
    }

    /// Independent copy with `capacity() == len()`.
    pub fn try_clone(&self) -> Result<Self, BlockError>
    where
        T: Clone,
    {
        let length = self.items.len();
        let mut items = Vec::new();
        items
            .try_reserve_exact(length)
            .map_err(|_| BlockError::allocation::<T>(length))?;
        items.extend_from_slice(&self.items);

        Ok(Self {
            items,
            capacity: length,
        })
    }

    /// Exchange storage, length and capacity with `other`. No element is copied.
    #[inline]
    pub fn swap(&mut self, other: &mut Block<T>) {
        std::mem::swap(self, other);
    }

    /// Visit every element with its index, in ascending order.
    pub fn for_each<F>(&self, mut action: F)
    where
        F: FnMut(&T, usize),
    {
        for (index, item) in self.items.iter().enumerate() {
            action(item, index);
        }
    }

    // ========================================================================
    // ORDERING
    // ========================================================================

    /// Sort in place with a three-way comparator. Not stable.
    ///
    /// The comparator must be a consistent total order.
    pub fn sort_by<F>(&mut self, mut compare: F)
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        self.items.sort_unstable_by(&mut compare);
        check_sorted(&self.items, &mut compare);
    }

    /// Binary search for an element comparing `Equal` to `key`.
    ///
    /// The block must already be sorted by `compare`; otherwise the result is
    /// unspecified (but never out of bounds). When several elements match,
    /// any one of them may be returned.
    pub fn search<F>(&self, key: &T, mut compare: F) -> Option<&T>
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        self.items
            .binary_search_by(|probe| compare(probe, key))
            .ok()
            .map(|index| &self.items[index])
    }

    /// Consume the block and return its elements.
    pub fn into_vec(self) -> Vec<T> {
        self.items
    }
}

impl<T> Default for Block<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for Block<T> {
    fn clone(&self) -> Self {
        Self::from_vec(self.items.clone())
    }
}

/// Blocks compare by contents; capacity is not part of the value.
impl<T: PartialEq> PartialEq for Block<T> {
    fn eq(&self, other: &Self) -> bool {
        self.items == other.items
    }
}

impl<T: Eq> Eq for Block<T> {}

impl<T> From<Vec<T>> for Block<T> {
    fn from(items: Vec<T>) -> Self {
        Self::from_vec(items)
    }
}

impl<T> FromIterator<T> for Block<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_vec(iter.into_iter().collect())
    }
}

impl<T> IntoIterator for Block<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a Block<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

// ============================================================================
// SERDE: blocks travel as plain sequences
// ============================================================================

impl<T: Serialize> Serialize for Block<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.items.iter())
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Block<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Vec::<T>::deserialize(deserializer).map(Self::from_vec)
    }
}
