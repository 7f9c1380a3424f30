//! # Atomic Occupancy Bitmap
//!
//! One bit per slot, packed eight to an [`AtomicU8`].
//!
//! - bit = 1: the slot was released and may be reclaimed
//! - bit = 0: the slot holds a live element, or has never been claimed
//!
//! Whether a 0 bit is live or unclaimed is decided by the allocator's
//! high-water mark, not by the bitmap. Every mutation is a compare-and-swap
//! on the containing byte.

use std::sync::atomic::{AtomicU8, Ordering};

/// Lock-free bitmap of released slots.
pub(crate) struct OccupancyBitmap {
    /// Bitset: 1 = released. 8 slots per byte.
    bytes: Box<[AtomicU8]>,
    /// Number of slots tracked.
    len: usize,
}

impl OccupancyBitmap {
    /// Creates a bitmap for `len` slots with no bit set.
    pub(crate) fn new(len: usize) -> Self {
        let bytes = (0..len.div_ceil(8)).map(|_| AtomicU8::new(0)).collect();
        Self { bytes, len }
    }

    /// Splits a slot index into its byte index and bit flag.
    #[inline]
    const fn locate(index: usize) -> (usize, u8) {
        (index / 8, 1 << (index % 8))
    }

    /// Mask of the bits in byte `byte_index` that address slots below `limit`.
    #[inline]
    fn limit_mask(byte_index: usize, limit: usize) -> u8 {
        let remaining = limit.saturating_sub(byte_index * 8);
        match remaining {
            0 => 0,
            1..=7 => u8::MAX >> (8 - remaining),
            _ => u8::MAX,
        }
    }

    /// Returns whether the slot's bit is set.
    #[inline]
    pub(crate) fn is_released(&self, index: usize) -> bool {
        debug_assert!(index < self.len, "Index out of bounds");
        let (byte_index, flag) = Self::locate(index);
        self.bytes[byte_index].load(Ordering::Acquire) & flag != 0
    }

    /// Claims one released slot below `limit`, clearing its bit.
    ///
    /// Scans bytes in ascending order and tries the lowest candidate bit
    /// first. A lost CAS is retried only while the contested bit is still
    /// set (another bit of the same byte changed). Once the bit is gone the
    /// scan moves on, so every claim finishes within one pass over the
    /// bitmap plus retries caused by other threads making progress.
    pub(crate) fn claim_released(&self, limit: usize) -> Option<usize> {
        let limit = limit.min(self.len);

        for (byte_index, byte) in self.bytes[..limit.div_ceil(8)].iter().enumerate() {
            let mask = Self::limit_mask(byte_index, limit);
            let mut observed = byte.load(Ordering::Acquire);
            let mut candidates = observed & mask;

            while candidates != 0 {
                let bit = candidates.trailing_zeros();
                let flag = 1u8 << bit;
                match byte.compare_exchange(
                    observed,
                    observed & !flag,
                    Ordering::AcqRel,
                    Ordering::Acquire,
                ) {
                    Ok(_) => return Some(byte_index * 8 + bit as usize),
                    Err(actual) => {
                        tracing::trace!(
                            slot = byte_index * 8 + bit as usize,
                            "occupancy CAS contended"
                        );
                        observed = actual;
                        candidates = actual & mask & (u8::MAX << bit);
                    }
                }
            }
        }

        None
    }

    /// Sets the slot's bit.
    ///
    /// Returns `true` if this call moved the slot from occupied to released,
    /// `false` if the bit was already set.
    pub(crate) fn release(&self, index: usize) -> bool {
        debug_assert!(index < self.len, "Index out of bounds");
        let (byte_index, flag) = Self::locate(index);
        let byte = &self.bytes[byte_index];

        let mut observed = byte.load(Ordering::Acquire);
        loop {
            if observed & flag != 0 {
                return false;
            }
            match byte.compare_exchange(
                observed,
                observed | flag,
                Ordering::AcqRel,
                Ordering::Acquire,
            ) {
                Ok(_) => return true,
                Err(actual) => observed = actual,
            }
        }
    }

    /// Counts set bits among slots below `limit`.
    pub(crate) fn count_released(&self, limit: usize) -> usize {
        let limit = limit.min(self.len);
        self.bytes[..limit.div_ceil(8)]
            .iter()
            .enumerate()
            .map(|(byte_index, byte)| {
                let bits = byte.load(Ordering::Acquire) & Self::limit_mask(byte_index, limit);
                bits.count_ones() as usize
            })
            .sum()
    }

    /// Clears every bit.
    ///
    /// Takes `&mut self`: no other thread can observe the reset.
    pub(crate) fn reset(&mut self) {
        for byte in self.bytes.iter_mut() {
            *byte.get_mut() = 0;
        }
    }
}
