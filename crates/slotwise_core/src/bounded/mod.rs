//! # Bounded Slot Allocation
//!
//! A fixed block of slots that many worker threads fill and drain at once.
//!
//! ## Layout
//!
//! ```text
//!   slots:      [ v0 | v1 | v2 | v3 | v4 | .. | .. | .. ]
//!   bitmap:     [ 0  | 1  | 0  | 0  | 1  | 0  | 0  | 0  ]   1 = released
//!                                         ^
//!                                 high_water_mark = 5
//!
//!   live = indices below the mark whose bit is 0  ->  {0, 2, 3}
//! ```
//!
//! `add` first tries to reclaim a released bit below the mark, then falls
//! back to bumping the mark. Slots at or above the mark always have bit 0,
//! so the two paths never compete for the same index.
//!
//! ## Memory ordering
//!
//! One contract for every call site:
//!
//! - bitmap bytes: CAS with `AcqRel` on success and `Acquire` on failure,
//!   plain loads with `Acquire`
//! - high-water mark: CAS with `AcqRel`/`Acquire`, loads with `Acquire`
//! - slot words: stores with `Release`, loads with `Acquire`
//! - free hint: `Relaxed`; it only decides whether to scan
//!
//! Index ownership comes from a successful CAS (on a bitmap byte or on the
//! mark). A value written after claiming is visible to any thread that later
//! learns the index through its own synchronization with the writer.

mod allocator;
mod cells;
mod occupancy;

pub use allocator::BoundedSlotAllocator;
