//! # Slot Cells
//!
//! Element storage for the bounded allocator.
//!
//! Each slot is a run of [`AtomicU64`] words holding the raw bytes of one
//! `T: Pod`. Values go in and out by copy; no reference into a slot ever
//! leaves this module. Since any bit pattern is a valid `Pod` value, a read
//! that races a write on the same slot can observe a mix of old and new
//! bytes, but never undefined behavior. Keeping readers and writers of one
//! slot apart is the caller's job.

use std::marker::PhantomData;
use std::mem::size_of;
use std::sync::atomic::{AtomicU64, Ordering};

use bytemuck::Pod;
use slotwise_shared::{ConfigError, ConfigResult};

/// Bytes per storage word.
const WORD_BYTES: usize = size_of::<u64>();

/// Fixed array of word-backed slots.
pub(crate) struct SlotCells<T> {
    /// `capacity * words_per_slot` words, slot after slot.
    words: Box<[AtomicU64]>,
    /// Words needed to hold one `T`.
    words_per_slot: usize,
    /// Values are stored as bytes, so `T` itself is never shared.
    _marker: PhantomData<fn() -> T>,
}

impl<T: Pod> SlotCells<T> {
    /// Allocates zeroed storage for `capacity` slots.
    pub(crate) fn new(capacity: usize) -> Self {
        let words_per_slot = size_of::<T>().div_ceil(WORD_BYTES);
        let words = (0..capacity * words_per_slot)
            .map(|_| AtomicU64::new(0))
            .collect();
        Self {
            words,
            words_per_slot,
            _marker: PhantomData,
        }
    }

    /// Allocates zeroed storage for `capacity` slots, refusing anything above
    /// `max_bytes`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for `capacity` if the storage
    /// size overflows, exceeds `max_bytes`, or cannot be allocated.
    pub(crate) fn try_new(capacity: usize, max_bytes: usize) -> ConfigResult<Self> {
        let words_per_slot = size_of::<T>().div_ceil(WORD_BYTES);
        let too_large = |reason: String| ConfigError::InvalidValue {
            field: "capacity",
            reason,
        };

        let len = capacity
            .checked_mul(words_per_slot)
            .filter(|len| len.checked_mul(WORD_BYTES).is_some_and(|bytes| bytes <= max_bytes))
            .ok_or_else(|| {
                too_large(format!(
                    "{capacity} slots of {} bytes exceed the {max_bytes} byte storage limit",
                    words_per_slot * WORD_BYTES
                ))
            })?;

        let mut words = Vec::new();
        words
            .try_reserve_exact(len)
            .map_err(|e| too_large(format!("cannot allocate slot storage: {e}")))?;
        words.extend((0..len).map(|_| AtomicU64::new(0)));

        Ok(Self {
            words: words.into_boxed_slice(),
            words_per_slot,
            _marker: PhantomData,
        })
    }

    #[inline]
    fn slot_words(&self, index: usize) -> &[AtomicU64] {
        let start = index * self.words_per_slot;
        &self.words[start..start + self.words_per_slot]
    }

    /// Copies `value` into slot `index`.
    #[inline]
    pub(crate) fn write(&self, index: usize, value: T) {
        let bytes = bytemuck::bytes_of(&value);
        for (word, chunk) in self.slot_words(index).iter().zip(bytes.chunks(WORD_BYTES)) {
            let mut raw = [0u8; WORD_BYTES];
            raw[..chunk.len()].copy_from_slice(chunk);
            word.store(u64::from_ne_bytes(raw), Ordering::Release);
        }
    }

    /// Copies the value out of slot `index`.
    #[inline]
    pub(crate) fn read(&self, index: usize) -> T {
        let mut value = T::zeroed();
        let bytes = bytemuck::bytes_of_mut(&mut value);
        for (word, chunk) in self.slot_words(index).iter().zip(bytes.chunks_mut(WORD_BYTES)) {
            let raw = word.load(Ordering::Acquire).to_ne_bytes();
            chunk.copy_from_slice(&raw[..chunk.len()]);
        }
        value
    }
}
