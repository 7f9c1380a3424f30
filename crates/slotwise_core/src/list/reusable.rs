//! # Reusable Array List
//!
//! Single-threaded list for small sets that churn every frame.

use slotwise_shared::{ListConfig, MAX_LIST_LENGTH};

use super::cursor::{Cursor, Iter};
use super::policy::{next_capacity, RemovalPolicy, ScanStrategy};
use crate::compare::{Comparator, NaturalOrder};
use crate::error::{ListError, ListResult};

/// A growable array that reuses freed slots.
///
/// `add` fills the most recently freed slot before growing. `remove_at`
/// shifts while the list is small and leaves a hole once it holds more than
/// `defer_threshold` live elements; holes are reclaimed by
/// [`compact`](Self::compact) or, a few per call, by
/// [`frame_cleanup`](Self::frame_cleanup).
///
/// Indices are stable between calls except across `compact`,
/// `frame_cleanup`, `sort`, and a shifting `remove_at`, which renumber.
///
/// # Thread Safety
///
/// Not thread-safe. Use one list per thread or wrap it in a mutex.
///
/// # Example
///
/// ```rust
/// use slotwise_core::ReusableArrayList;
///
/// let mut list: ReusableArrayList<u32> = ReusableArrayList::new();
/// let a = list.add(7);
/// list.add(3);
///
/// assert_eq!(list.get(a), Some(&7));
/// assert!(list.exists(|v| *v == 3));
///
/// list.sort();
/// assert_eq!(list.index_of(&3), Some(0));
/// ```
#[derive(Clone, Debug)]
pub struct ReusableArrayList<T, C = NaturalOrder> {
    /// Claimed slots, live or deleted. `buffer.len()` is the claimed count.
    buffer: Vec<T>,
    /// Per-slot hole flag, same length as `buffer`.
    deleted: Vec<bool>,
    /// Deleted indices, most recently freed last.
    free_slots: Vec<usize>,
    /// Bumped on every structural change.
    version: u64,
    /// Growth and policy thresholds.
    config: ListConfig,
    /// Default sort order.
    comparator: C,
}

impl<T: Default> ReusableArrayList<T, NaturalOrder> {
    /// Creates an empty list with the default config and natural ordering.
    #[must_use]
    pub fn new() -> Self {
        Self::build(ListConfig::default(), NaturalOrder)
    }

    /// Creates an empty list with `config` and natural ordering.
    ///
    /// # Errors
    ///
    /// Returns [`ListError::InvalidConfig`] if the config fails validation.
    pub fn with_config(config: ListConfig) -> ListResult<Self> {
        Self::with_comparator(config, NaturalOrder)
    }
}

impl<T: Default> Default for ReusableArrayList<T, NaturalOrder> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Default, C> ReusableArrayList<T, C> {
    /// Creates an empty list with `config` and a default sort order.
    ///
    /// # Errors
    ///
    /// Returns [`ListError::InvalidConfig`] if the config fails validation.
    pub fn with_comparator(config: ListConfig, comparator: C) -> ListResult<Self> {
        config.validate()?;
        Ok(Self::build(config, comparator))
    }

    fn build(config: ListConfig, comparator: C) -> Self {
        Self {
            buffer: Vec::with_capacity(config.initial_capacity),
            deleted: Vec::with_capacity(config.initial_capacity),
            free_slots: Vec::new(),
            version: 0,
            config,
            comparator,
        }
    }

    /// Returns the number of live elements.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.buffer.len() - self.free_slots.len()
    }

    /// Returns `true` if the list holds no live element.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the number of claimed slots, holes included.
    #[inline]
    #[must_use]
    pub fn count(&self) -> usize {
        self.buffer.len()
    }

    /// Returns the number of holes awaiting reclamation.
    #[inline]
    #[must_use]
    pub fn hole_count(&self) -> usize {
        self.free_slots.len()
    }

    /// Returns the buffer capacity.
    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.buffer.capacity()
    }

    /// Returns the structural version.
    #[inline]
    #[must_use]
    pub const fn version(&self) -> u64 {
        self.version
    }

    /// Returns the config the list was built with.
    #[inline]
    #[must_use]
    pub const fn config(&self) -> &ListConfig {
        &self.config
    }

    #[inline]
    fn is_live(&self, index: usize) -> bool {
        index < self.buffer.len() && !self.deleted[index]
    }

    #[inline]
    fn bump_version(&mut self) {
        self.version = self.version.wrapping_add(1);
    }

    /// Adds `item` and returns its index.
    ///
    /// Reuses the most recently freed slot if there is one, otherwise
    /// appends, growing the buffer per the config's growth policy.
    ///
    /// # Panics
    ///
    /// Panics if the list already holds [`MAX_LIST_LENGTH`] claimed slots.
    pub fn add(&mut self, item: T) -> usize {
        self.bump_version();

        if let Some(index) = self.free_slots.pop() {
            self.buffer[index] = item;
            self.deleted[index] = false;
            return index;
        }

        if self.buffer.len() == self.buffer.capacity() {
            self.grow();
        }
        self.buffer.push(item);
        self.deleted.push(false);
        self.buffer.len() - 1
    }

    fn grow(&mut self) {
        let current = self.buffer.capacity();
        let Some(target) = next_capacity(current, &self.config) else {
            panic!("list length cannot exceed {MAX_LIST_LENGTH}");
        };
        let additional = target - self.buffer.len();
        self.buffer.reserve_exact(additional);
        self.deleted.reserve_exact(additional);
        tracing::debug!(from = current, to = target, "list buffer grown");
    }

    /// Returns the element at `index` if it is live.
    #[inline]
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&T> {
        self.is_live(index).then(|| &self.buffer[index])
    }

    /// Returns the element at `index` mutably if it is live.
    #[inline]
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        if self.is_live(index) {
            Some(&mut self.buffer[index])
        } else {
            None
        }
    }

    /// Overwrites the element at a live `index`.
    ///
    /// Returns `false` if `index` is out of range or a hole.
    #[inline]
    pub fn set(&mut self, index: usize, item: T) -> bool {
        match self.get_mut(index) {
            Some(slot) => {
                *slot = item;
                true
            }
            None => false,
        }
    }

    /// Removes the element at `index`.
    ///
    /// With `defer_threshold` or fewer live elements the later elements shift
    /// left (renumbering them). Above it the slot becomes a hole, reset to
    /// `T::default()`, and later indices stay put.
    ///
    /// Returns `false` if `index` is out of range or already a hole.
    pub fn remove_at(&mut self, index: usize) -> bool {
        if !self.is_live(index) {
            return false;
        }

        match RemovalPolicy::select(self.len(), self.config.defer_threshold) {
            RemovalPolicy::Shift => self.shift_out(index),
            RemovalPolicy::Defer => {
                self.buffer[index] = T::default();
                self.deleted[index] = true;
                self.free_slots.push(index);
            }
        }
        self.bump_version();
        true
    }

    /// Removes slot `index` from the buffer and renumbers the holes above it.
    fn shift_out(&mut self, index: usize) {
        self.buffer.remove(index);
        self.deleted.remove(index);
        for slot in &mut self.free_slots {
            if *slot > index {
                *slot -= 1;
            }
        }
    }

    /// Removes the first live element equal to `item`.
    ///
    /// Returns `false` if there is none.
    pub fn remove(&mut self, item: &T) -> bool
    where
        T: PartialEq,
    {
        match self.index_of(item) {
            Some(index) => self.remove_at(index),
            None => false,
        }
    }

    /// Removes every hole, packing live elements into `[0, len)` in their
    /// current order. Returns the number of holes removed.
    ///
    /// Does nothing, and leaves the version alone, when there are no holes,
    /// so a second call in a row is a no-op.
    pub fn compact(&mut self) -> usize {
        let holes = self.free_slots.len();
        if holes == 0 {
            return 0;
        }

        let mut write = 0;
        for read in 0..self.buffer.len() {
            if !self.deleted[read] {
                self.buffer.swap(write, read);
                write += 1;
            }
        }
        self.buffer.truncate(write);
        self.deleted.clear();
        self.deleted.resize(write, false);
        self.free_slots.clear();
        self.bump_version();

        tracing::debug!(live = write, holes, "list compacted");
        holes
    }

    /// Reclaims at most `max_holes` holes and returns how many were handled.
    ///
    /// Highest-index holes go first, each shifting the elements above it
    /// left. Spreading cleanup across frames this way bounds the cost of any
    /// single call.
    pub fn frame_cleanup(&mut self, max_holes: usize) -> usize {
        let mut processed = 0;
        while processed < max_holes {
            let Some((position, _)) = self
                .free_slots
                .iter()
                .enumerate()
                .max_by_key(|(_, index)| **index)
            else {
                break;
            };
            // Remaining holes stay in push order.
            let index = self.free_slots.remove(position);
            // Highest hole first: no remaining hole sits above `index`.
            self.buffer.remove(index);
            self.deleted.remove(index);
            processed += 1;
        }

        if processed > 0 {
            self.bump_version();
            tracing::debug!(processed, remaining = self.free_slots.len(), "list frame cleanup");
        }
        processed
    }

    /// Removes every element, keeping the allocated buffer.
    pub fn clear(&mut self) {
        self.buffer.clear();
        self.deleted.clear();
        self.free_slots.clear();
        self.bump_version();
    }

    /// Removes every element and shrinks the buffer back to the configured
    /// initial capacity.
    pub fn clear_and_release(&mut self) {
        self.clear();
        self.buffer.shrink_to(self.config.initial_capacity);
        self.deleted.shrink_to(self.config.initial_capacity);
        self.free_slots.shrink_to_fit();
        tracing::debug!(capacity = self.buffer.capacity(), "list memory released");
    }

    /// Iterates over live `(index, &element)` pairs in index order.
    #[inline]
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(&self.buffer, &self.deleted)
    }

    /// Creates a detached cursor at the start of the list.
    #[inline]
    #[must_use]
    pub const fn cursor(&self) -> Cursor {
        Cursor {
            next: 0,
            version: self.version,
        }
    }

    /// Moves `cursor` to the next live element and returns it.
    ///
    /// Returns `Ok(None)` at the end of the list.
    ///
    /// # Errors
    ///
    /// Returns [`ListError::ConcurrentModification`] if the list was
    /// structurally changed since the cursor was created. The cursor is left
    /// where it was.
    pub fn advance(&self, cursor: &mut Cursor) -> ListResult<Option<(usize, &T)>> {
        if cursor.version != self.version {
            return Err(ListError::ConcurrentModification {
                expected: cursor.version,
                found: self.version,
            });
        }

        while cursor.next < self.buffer.len() {
            let index = cursor.next;
            cursor.next += 1;
            if !self.deleted[index] {
                return Ok(Some((index, &self.buffer[index])));
            }
        }
        Ok(None)
    }

    /// Returns the index of the first live element matching `predicate`.
    pub fn position<P>(&self, mut predicate: P) -> Option<usize>
    where
        P: FnMut(&T) -> bool,
    {
        match ScanStrategy::select(self.len(), self.config.scan_threshold) {
            ScanStrategy::Indexed => {
                (0..self.buffer.len()).find(|&i| !self.deleted[i] && predicate(&self.buffer[i]))
            }
            ScanStrategy::Iterator => self
                .iter()
                .find(|&(_, item)| predicate(item))
                .map(|(index, _)| index),
        }
    }

    /// Returns the first live element matching `predicate`.
    pub fn find<P>(&self, predicate: P) -> Option<&T>
    where
        P: FnMut(&T) -> bool,
    {
        self.position(predicate).map(|index| &self.buffer[index])
    }

    /// Returns every live element matching `predicate`, in index order.
    pub fn find_all<P>(&self, mut predicate: P) -> Vec<&T>
    where
        P: FnMut(&T) -> bool,
    {
        match ScanStrategy::select(self.len(), self.config.scan_threshold) {
            ScanStrategy::Indexed => (0..self.buffer.len())
                .filter(|&i| !self.deleted[i] && predicate(&self.buffer[i]))
                .map(|i| &self.buffer[i])
                .collect(),
            ScanStrategy::Iterator => self
                .iter()
                .filter(|&(_, item)| predicate(item))
                .map(|(_, item)| item)
                .collect(),
        }
    }

    /// Returns `true` if any live element matches `predicate`.
    pub fn exists<P>(&self, predicate: P) -> bool
    where
        P: FnMut(&T) -> bool,
    {
        self.position(predicate).is_some()
    }

    /// Returns the index of the first live element equal to `item`.
    pub fn index_of(&self, item: &T) -> Option<usize>
    where
        T: PartialEq,
    {
        self.position(|candidate| candidate == item)
    }

    /// Copies live elements into a dense `Vec`, in index order.
    #[must_use]
    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.iter().map(|(_, item)| item.clone()).collect()
    }

    /// Compacts, then stably sorts live elements with `compare`.
    pub fn sort_by<F>(&mut self, mut compare: F)
    where
        F: FnMut(&T, &T) -> std::cmp::Ordering,
    {
        self.compact();
        self.buffer.sort_by(|a, b| compare(a, b));
        self.bump_version();
    }
}

impl<T: Default, C: Comparator<T>> ReusableArrayList<T, C> {
    /// Compacts, then stably sorts live elements with the list's comparator.
    pub fn sort(&mut self) {
        self.compact();
        let comparator = &self.comparator;
        self.buffer.sort_by(|a, b| comparator.compare(a, b));
        self.bump_version();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compare::Reversed;

    /// List that shifts up to `defer_threshold` live elements.
    fn list_with(defer_threshold: usize, scan_threshold: usize) -> ReusableArrayList<i32> {
        ReusableArrayList::with_config(ListConfig {
            defer_threshold,
            scan_threshold,
            ..ListConfig::default()
        })
        .unwrap()
    }

    /// List that always defers removals.
    fn deferring() -> ReusableArrayList<i32> {
        list_with(0, 32)
    }

    #[test]
    fn test_add_returns_sequential_indices() {
        let mut list = ReusableArrayList::new();
        for value in 0..5 {
            assert_eq!(list.add(value * 10), value as usize);
        }
        assert_eq!(list.len(), 5);
        assert_eq!(list.get(3), Some(&30));
    }

    #[test]
    fn test_shift_removal_preserves_order() {
        let mut list = list_with(64, 32);
        for value in [1, 2, 3, 4] {
            list.add(value);
        }
        assert!(list.remove_at(1));
        assert_eq!(list.to_vec(), vec![1, 3, 4]);
        assert_eq!(list.count(), 3);
        assert_eq!(list.hole_count(), 0);
        assert_eq!(list.get(1), Some(&3));
    }

    #[test]
    fn test_deferred_removal_keeps_indices() {
        let mut list = deferring();
        for value in [1, 2, 3, 4] {
            list.add(value);
        }
        assert!(list.remove_at(1));
        assert!(!list.remove_at(1));
        assert_eq!(list.count(), 4);
        assert_eq!(list.len(), 3);
        assert_eq!(list.get(1), None);
        assert_eq!(list.get(2), Some(&3));
    }

    #[test]
    fn test_freed_slots_reused_most_recent_first() {
        let mut list = deferring();
        for value in 0..6 {
            list.add(value);
        }
        list.remove_at(1);
        list.remove_at(4);

        assert_eq!(list.add(40), 4);
        assert_eq!(list.add(10), 1);
        assert_eq!(list.add(60), 6);
        assert_eq!(list.hole_count(), 0);
    }

    #[test]
    fn test_shift_renumbers_pending_holes() {
        let mut list = list_with(3, 32);
        for value in [0, 1, 2, 3, 4] {
            list.add(value);
        }
        // 5 live > 3: deferred hole at 3.
        list.remove_at(3);
        // 4 live > 3: deferred hole at 0.
        list.remove_at(0);
        // 3 live: shift removal of index 1 moves the hole at 3 down to 2.
        assert!(list.remove_at(1));
        assert_eq!(list.count(), 4);
        assert_eq!(list.get(2), None);
        assert_eq!(list.to_vec(), vec![2, 4]);

        assert_eq!(list.add(9), 0);
        assert_eq!(list.add(8), 2);
        assert_eq!(list.to_vec(), vec![9, 2, 8, 4]);
    }

    #[test]
    fn test_remove_out_of_range() {
        let mut list = ReusableArrayList::new();
        list.add(1);
        assert!(!list.remove_at(1));
        assert!(!list.remove_at(usize::MAX));
        assert!(!list.set(5, 3));
    }

    #[test]
    fn test_compact_is_idempotent() {
        let mut list = deferring();
        for value in 0..8 {
            list.add(value);
        }
        for index in [0, 3, 7] {
            list.remove_at(index);
        }

        assert_eq!(list.compact(), 3);
        let version = list.version();
        let snapshot = list.to_vec();
        let capacity = list.capacity();

        assert_eq!(list.compact(), 0);
        assert_eq!(list.version(), version);
        assert_eq!(list.to_vec(), snapshot);
        assert_eq!(list.capacity(), capacity);
        assert_eq!(snapshot, vec![1, 2, 4, 5, 6]);
        assert_eq!(list.count(), 5);
    }

    #[test]
    fn test_frame_cleanup_is_bounded() {
        let mut list = deferring();
        for value in 0..10 {
            list.add(value);
        }
        for index in [1, 4, 6, 8] {
            list.remove_at(index);
        }

        assert_eq!(list.frame_cleanup(3), 3);
        assert_eq!(list.hole_count(), 1);
        assert_eq!(list.count(), 7);
        assert_eq!(list.get(1), None);

        assert_eq!(list.frame_cleanup(3), 1);
        assert_eq!(list.frame_cleanup(3), 0);
        assert_eq!(list.to_vec(), vec![0, 2, 3, 5, 7, 9]);
        assert_eq!(list.count(), 6);
    }

    #[test]
    fn test_frame_cleanup_keeps_reuse_order() {
        let mut list = deferring();
        for value in 0..12 {
            list.add(value);
        }
        list.remove_at(9);
        list.remove_at(2);
        list.remove_at(4);

        // Reclaims slot 9, the highest hole.
        assert_eq!(list.frame_cleanup(1), 1);
        assert_eq!(list.hole_count(), 2);

        // Slot 4 was freed last, so it is reused first.
        assert_eq!(list.add(100), 4);
        assert_eq!(list.add(101), 2);
        assert_eq!(list.add(102), 11);
    }

    #[test]
    fn test_query_paths_agree() {
        let mut indexed = list_with(0, usize::MAX);
        let mut iterated = list_with(0, 0);
        for list in [&mut indexed, &mut iterated] {
            for value in 0..20 {
                list.add(value);
            }
            for index in [0, 5, 10, 15] {
                list.remove_at(index);
            }
        }

        let even = |v: &i32| v % 2 == 0;
        assert_eq!(indexed.find_all(even), iterated.find_all(even));
        assert_eq!(indexed.find(|v| *v > 10), iterated.find(|v| *v > 10));
        assert_eq!(indexed.index_of(&11), Some(11));
        assert_eq!(iterated.index_of(&11), Some(11));
        assert_eq!(indexed.index_of(&10), None);
        assert_eq!(iterated.index_of(&10), None);
        assert!(indexed.exists(|v| *v == 19));
        assert!(!iterated.exists(|v| *v == 5));
    }

    #[test]
    fn test_cursor_detects_mutation() {
        let mut list = deferring();
        for value in [1, 2, 3] {
            list.add(value);
        }
        list.remove_at(1);

        let mut cursor = list.cursor();
        assert_eq!(list.advance(&mut cursor), Ok(Some((0, &1))));
        assert_eq!(list.advance(&mut cursor), Ok(Some((2, &3))));
        assert_eq!(list.advance(&mut cursor), Ok(None));

        let mut cursor = list.cursor();
        assert!(list.advance(&mut cursor).is_ok());
        list.add(4);
        let err = list.advance(&mut cursor).unwrap_err();
        assert!(matches!(err, ListError::ConcurrentModification { .. }));
    }

    #[test]
    fn test_set_does_not_invalidate_cursor() {
        let mut list = ReusableArrayList::new();
        list.add(1);
        list.add(2);
        let mut cursor = list.cursor();
        assert!(list.set(1, 5));
        assert_eq!(list.advance(&mut cursor), Ok(Some((0, &1))));
        assert_eq!(list.advance(&mut cursor), Ok(Some((1, &5))));
    }

    #[test]
    fn test_sort_uses_comparator() {
        let mut list =
            ReusableArrayList::with_comparator(ListConfig::default(), Reversed(NaturalOrder))
                .unwrap();
        for value in [3, 9, 1, 4] {
            list.add(value);
        }
        list.sort();
        assert_eq!(list.to_vec(), vec![9, 4, 3, 1]);

        list.sort_by(|a, b| a.cmp(b));
        assert_eq!(list.to_vec(), vec![1, 3, 4, 9]);
    }

    #[test]
    fn test_sort_compacts_first() {
        let mut list = deferring();
        for value in [5, 1, 4, 2] {
            list.add(value);
        }
        list.remove_at(2);
        list.sort();
        assert_eq!(list.hole_count(), 0);
        assert_eq!(list.count(), 3);
        assert_eq!(list.to_vec(), vec![1, 2, 5]);
    }

    #[test]
    fn test_growth_follows_policy() {
        let mut list = ReusableArrayList::with_config(ListConfig {
            initial_capacity: 0,
            min_grow: 4,
            ..ListConfig::default()
        })
        .unwrap();
        list.add(0u8);
        assert!(list.capacity() >= 4);
        for value in 1..5 {
            list.add(value);
        }
        assert!(list.capacity() >= 8);
    }

    #[test]
    fn test_clear_and_release() {
        let mut list = ReusableArrayList::new();
        for value in 0..1000 {
            list.add(value);
        }
        let version = list.version();

        list.clear();
        assert!(list.is_empty());
        assert!(list.capacity() >= 1000);
        assert!(list.version() > version);

        list.clear_and_release();
        assert!(list.capacity() < 1000);
        assert_eq!(list.add(1), 0);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = ListConfig {
            min_grow: 0,
            ..ListConfig::default()
        };
        let err = ReusableArrayList::<u32>::with_config(config).unwrap_err();
        assert!(matches!(err, ListError::InvalidConfig(_)));
    }

    #[test]
    fn test_remove_by_value() {
        let mut list = ReusableArrayList::new();
        for value in [7, 8, 7] {
            list.add(value);
        }
        assert!(list.remove(&7));
        assert_eq!(list.to_vec(), vec![8, 7]);
        assert!(!list.remove(&1));
    }
}
