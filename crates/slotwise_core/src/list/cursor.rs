//! # List Iteration
//!
//! Two ways to walk a [`ReusableArrayList`](super::ReusableArrayList):
//!
//! - [`Iter`] borrows the list, so it cannot be invalidated.
//! - [`Cursor`] holds no borrow between steps. It records the list version
//!   and the next step fails if the list was structurally changed in between.

use std::iter::FusedIterator;

/// Borrowing iterator over live `(index, &element)` pairs.
///
/// Skips holes left by deferred removals.
#[derive(Clone, Debug)]
pub struct Iter<'a, T> {
    items: &'a [T],
    deleted: &'a [bool],
    next: usize,
}

impl<'a, T> Iter<'a, T> {
    pub(super) fn new(items: &'a [T], deleted: &'a [bool]) -> Self {
        Self {
            items,
            deleted,
            next: 0,
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = (usize, &'a T);

    fn next(&mut self) -> Option<Self::Item> {
        while self.next < self.items.len() {
            let index = self.next;
            self.next += 1;
            if !self.deleted[index] {
                return Some((index, &self.items[index]));
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.items.len() - self.next))
    }
}

impl<T> FusedIterator for Iter<'_, T> {}

/// Detached position in a list.
///
/// Created by [`ReusableArrayList::cursor`](super::ReusableArrayList::cursor)
/// and moved with
/// [`ReusableArrayList::advance`](super::ReusableArrayList::advance).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cursor {
    pub(super) next: usize,
    pub(super) version: u64,
}

impl Cursor {
    /// Returns the list version this cursor was created against.
    #[inline]
    #[must_use]
    pub const fn version(&self) -> u64 {
        self.version
    }
}
