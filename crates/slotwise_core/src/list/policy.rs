//! # List Policies
//!
//! The decisions a [`ReusableArrayList`](super::ReusableArrayList) makes from
//! its size: how to remove, how to search, how much to grow. Each is a plain
//! function of the config so it can be tested on its own.

use slotwise_shared::{ListConfig, MAX_LIST_LENGTH};

/// How `remove_at` gets rid of an element.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RemovalPolicy {
    /// Remove and shift later elements left. Keeps the list dense and in
    /// order but renumbers every index after the removed one.
    Shift,
    /// Leave a hole for `compact` or `frame_cleanup` to reclaim. O(1) and
    /// keeps every other index stable.
    Defer,
}

impl RemovalPolicy {
    /// Picks the policy for a list holding `live` elements.
    ///
    /// Shifting is used up to and including `defer_threshold` live elements.
    #[inline]
    #[must_use]
    pub const fn select(live: usize, defer_threshold: usize) -> Self {
        if live > defer_threshold {
            Self::Defer
        } else {
            Self::Shift
        }
    }
}

/// How queries walk the list.
///
/// Both strategies visit the same elements in the same order, so results
/// never depend on which one ran.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScanStrategy {
    /// Index loop over the buffer, checking the hole flag per slot.
    Indexed,
    /// The hole-aware iterator.
    Iterator,
}

impl ScanStrategy {
    /// Picks the strategy for a list holding `live` elements.
    #[inline]
    #[must_use]
    pub const fn select(live: usize, scan_threshold: usize) -> Self {
        if live > scan_threshold {
            Self::Iterator
        } else {
            Self::Indexed
        }
    }
}

/// Returns the buffer capacity to grow to from `current`.
///
/// Below `growth_threshold` the buffer grows by a fixed `min_grow`. Above it
/// the buffer grows by `current * (growth_factor - 1)`, but never by less
/// than `min_grow`. The result is capped at [`MAX_LIST_LENGTH`].
///
/// Returns `None` once `current` has reached the cap.
#[must_use]
pub fn next_capacity(current: usize, config: &ListConfig) -> Option<usize> {
    if current >= MAX_LIST_LENGTH {
        return None;
    }

    let step = if current < config.growth_threshold {
        config.min_grow
    } else {
        let proportional = (current as f64 * f64::from(config.growth_factor - 1.0)) as usize;
        proportional.max(config.min_grow)
    };

    Some(current.saturating_add(step).min(MAX_LIST_LENGTH))
}
