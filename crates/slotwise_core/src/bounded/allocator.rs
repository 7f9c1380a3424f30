//! # Bounded Slot Allocator
//!
//! Fixed-capacity container whose `add`/`remove_at`/`get`/`set` can be called
//! from any number of threads at once, without locks.

use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};

use bytemuck::Pod;
use slotwise_shared::{AllocatorConfig, MAX_SLOT_STORAGE_BYTES};

use super::cells::SlotCells;
use super::occupancy::OccupancyBitmap;
use crate::compare::{Comparator, NaturalOrder};
use crate::error::{SlotError, SlotResult};

/// A fixed set of slots shared by concurrent workers.
///
/// Callers get an index from [`add`](Self::add) and use it as a handle until
/// they pass it to [`remove_at`](Self::remove_at). Values are copied in and
/// out; the allocator never lends out references to its storage.
///
/// # Thread Safety
///
/// `add`, `remove_at`, `get`, `set` and the read-only accessors take `&self`
/// and are lock-free. [`clear`](Self::clear), [`compact`](Self::compact) and
/// [`sort`](Self::sort) take `&mut self`, so the borrow checker guarantees no
/// other operation runs while they do. All three renumber or invalidate every
/// index handed out so far.
///
/// # Example
///
/// ```rust
/// use slotwise_core::BoundedSlotAllocator;
///
/// let slots: BoundedSlotAllocator<u32> = BoundedSlotAllocator::with_capacity(4)?;
///
/// let a = slots.add(10)?;
/// assert_eq!(slots.get(a), Some(10));
///
/// assert!(slots.remove_at(a));
/// assert_eq!(slots.get(a), None);
/// # Ok::<(), slotwise_core::SlotError>(())
/// ```
pub struct BoundedSlotAllocator<T> {
    /// Element storage.
    cells: SlotCells<T>,
    /// Released-slot bitmap.
    occupancy: OccupancyBitmap,
    /// Slots ever claimed through the append path.
    high_water_mark: AtomicUsize,
    /// Approximate number of released slots below the high-water mark.
    free_hint: AtomicUsize,
    /// Fixed slot count.
    capacity: usize,
}

impl<T: Pod> BoundedSlotAllocator<T> {
    /// Creates an allocator with the default capacity of 256 slots.
    #[must_use]
    pub fn new() -> Self {
        Self::build(AllocatorConfig::default().capacity)
    }

    /// Creates an allocator with `capacity` slots.
    ///
    /// # Errors
    ///
    /// Returns [`SlotError::InvalidConfig`] if `capacity` is zero, above
    /// [`MAX_SLOT_CAPACITY`](slotwise_shared::MAX_SLOT_CAPACITY), or needs
    /// more than [`MAX_SLOT_STORAGE_BYTES`] of storage for this `T`.
    pub fn with_capacity(capacity: usize) -> SlotResult<Self> {
        Self::from_config(&AllocatorConfig::with_capacity(capacity))
    }

    /// Creates an allocator from a validated config.
    ///
    /// # Errors
    ///
    /// Returns [`SlotError::InvalidConfig`] if the config fails validation,
    /// or if the slot storage exceeds [`MAX_SLOT_STORAGE_BYTES`] or cannot
    /// be allocated.
    pub fn from_config(config: &AllocatorConfig) -> SlotResult<Self> {
        config.validate()?;
        let cells = SlotCells::try_new(config.capacity, MAX_SLOT_STORAGE_BYTES)?;
        Ok(Self::assemble(cells, config.capacity))
    }

    fn build(capacity: usize) -> Self {
        Self::assemble(SlotCells::new(capacity), capacity)
    }

    fn assemble(cells: SlotCells<T>, capacity: usize) -> Self {
        Self {
            cells,
            occupancy: OccupancyBitmap::new(capacity),
            high_water_mark: AtomicUsize::new(0),
            free_hint: AtomicUsize::new(0),
            capacity,
        }
    }

    /// Returns the fixed slot count.
    #[inline]
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns how many slots have been claimed through the append path.
    #[inline]
    #[must_use]
    pub fn high_water_mark(&self) -> usize {
        self.high_water_mark.load(Ordering::Acquire)
    }

    /// Returns the released-slot hint used to skip the reuse scan.
    ///
    /// Approximate under concurrent use. Not a size.
    #[inline]
    #[must_use]
    pub fn free_hint(&self) -> usize {
        self.free_hint.load(Ordering::Relaxed)
    }

    /// Returns the number of live elements.
    ///
    /// Counted from the bitmap: slots below the high-water mark whose bit is
    /// not released. Under concurrent use this is a snapshot.
    #[must_use]
    pub fn count(&self) -> usize {
        let limit = self.high_water_mark();
        limit.saturating_sub(self.occupancy.count_released(limit))
    }

    /// Returns `true` if no slot holds a live element.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }

    /// Returns `true` if every slot holds a live element.
    #[inline]
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.count() == self.capacity
    }

    /// Returns `true` if `index` currently holds a live element.
    #[inline]
    #[must_use]
    pub fn is_occupied(&self, index: usize) -> bool {
        index < self.high_water_mark() && !self.occupancy.is_released(index)
    }

    /// Stores `value` in a free slot and returns its index.
    ///
    /// Released slots are reused before new ones are claimed, which keeps the
    /// touched range small under churn.
    ///
    /// # Errors
    ///
    /// Returns [`SlotError::Full`] when no slot is free. This is a normal
    /// outcome; retry after some other caller removes an element.
    pub fn add(&self, value: T) -> SlotResult<usize> {
        let index = match self.claim_released() {
            Some(index) => index,
            None => self.claim_fresh()?,
        };
        self.cells.write(index, value);
        Ok(index)
    }

    /// Fast path: take a released slot below the high-water mark.
    fn claim_released(&self) -> Option<usize> {
        if self.free_hint.load(Ordering::Relaxed) == 0 {
            return None;
        }
        let limit = self.high_water_mark.load(Ordering::Acquire);
        let index = self.occupancy.claim_released(limit)?;
        self.free_hint.fetch_sub(1, Ordering::Relaxed);
        Some(index)
    }

    /// Slow path: bump the high-water mark.
    ///
    /// A successful CAS from `c` to `c + 1` makes the caller the only owner
    /// of slot `c`, whose bit has been 0 since the last reset.
    fn claim_fresh(&self) -> SlotResult<usize> {
        let mut current = self.high_water_mark.load(Ordering::Acquire);
        loop {
            if current >= self.capacity {
                tracing::trace!(capacity = self.capacity, "bounded allocator full");
                return Err(SlotError::Full {
                    capacity: self.capacity,
                });
            }
            match self.high_water_mark.compare_exchange_weak(
                current,
                current + 1,
                Ordering::AcqRel,
                Ordering::Acquire,
            ) {
                Ok(_) => return Ok(current),
                Err(actual) => current = actual,
            }
        }
    }

    /// Releases the slot at `index`.
    ///
    /// The stored value is left in place until a later `add` overwrites it.
    ///
    /// Returns `false` if `index` is out of range, never claimed, or already
    /// released.
    pub fn remove_at(&self, index: usize) -> bool {
        if !self.is_occupied(index) {
            return false;
        }
        // The hint goes up before the bit is set so that a claimer's
        // decrement always follows a matching increment.
        self.free_hint.fetch_add(1, Ordering::Relaxed);
        if self.occupancy.release(index) {
            true
        } else {
            self.free_hint.fetch_sub(1, Ordering::Relaxed);
            false
        }
    }

    /// Returns a copy of the value at `index`, or `None` if the slot is not
    /// live.
    #[inline]
    #[must_use]
    pub fn get(&self, index: usize) -> Option<T> {
        self.is_occupied(index).then(|| self.cells.read(index))
    }

    /// Overwrites the value at a live `index`.
    ///
    /// Returns `false`, and stores nothing, if the slot is not live. This
    /// never claims a slot.
    #[inline]
    pub fn set(&self, index: usize, value: T) -> bool {
        if !self.is_occupied(index) {
            return false;
        }
        self.cells.write(index, value);
        true
    }

    /// Iterates over live `(index, value)` pairs in ascending index order.
    ///
    /// Each value is copied when the iterator reaches it.
    pub fn iter(&self) -> impl Iterator<Item = (usize, T)> + '_ {
        (0..self.high_water_mark()).filter_map(move |index| self.get(index).map(|v| (index, v)))
    }

    /// Copies every live value, in ascending index order.
    #[must_use]
    pub fn to_vec(&self) -> Vec<T> {
        self.iter().map(|(_, value)| value).collect()
    }

    /// Releases every slot.
    ///
    /// All previously returned indices become invalid.
    pub fn clear(&mut self) {
        let dropped = self.count();
        *self.high_water_mark.get_mut() = 0;
        *self.free_hint.get_mut() = 0;
        self.occupancy.reset();
        tracing::debug!(dropped, "bounded allocator cleared");
    }

    /// Moves live elements down to `[0, count)`, keeping their relative
    /// order, and returns the number of holes removed.
    ///
    /// Every index is renumbered.
    pub fn compact(&mut self) -> usize {
        let limit = *self.high_water_mark.get_mut();
        let mut write = 0;
        for read in 0..limit {
            if self.occupancy.is_released(read) {
                continue;
            }
            if read != write {
                let value = self.cells.read(read);
                self.cells.write(write, value);
            }
            write += 1;
        }

        self.occupancy.reset();
        *self.high_water_mark.get_mut() = write;
        *self.free_hint.get_mut() = 0;

        let removed = limit - write;
        tracing::debug!(live = write, removed, "bounded allocator compacted");
        removed
    }

    /// Sorts live elements with `comparator` and stores them densely at
    /// `[0, count)`.
    ///
    /// Live values are gathered in index order, stably sorted, and then the
    /// allocator is cleared and refilled in sorted order. Every index is
    /// renumbered.
    pub fn sort<C: Comparator<T>>(&mut self, comparator: C) {
        let mut values = self.to_vec();
        values.sort_by(|a, b| comparator.compare(a, b));

        self.clear();
        for (index, value) in values.iter().enumerate() {
            self.cells.write(index, *value);
        }
        *self.high_water_mark.get_mut() = values.len();
        tracing::debug!(live = values.len(), "bounded allocator sorted");
    }

    /// Sorts live elements by their natural order.
    pub fn sort_natural(&mut self)
    where
        T: Ord,
    {
        self.sort(NaturalOrder);
    }
}

impl<T: Pod> Default for BoundedSlotAllocator<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Pod> fmt::Debug for BoundedSlotAllocator<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoundedSlotAllocator")
            .field("capacity", &self.capacity)
            .field("count", &self.count())
            .field("high_water_mark", &self.high_water_mark())
            .field("free_hint", &self.free_hint())
            .finish()
    }
}
