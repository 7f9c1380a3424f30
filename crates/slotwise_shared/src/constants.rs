//! # Container Defaults
//!
//! Baseline tuning for both container types.
//!
//! The list values target small sets (a few hundred live elements), where
//! shifting a handful of elements is cheaper than tracking holes.

// =============================================================================
// BOUNDED SLOT ALLOCATOR
// =============================================================================

/// Default number of slots in a bounded allocator.
pub const DEFAULT_SLOT_CAPACITY: usize = 256;

/// Largest capacity a bounded allocator accepts (16M slots).
pub const MAX_SLOT_CAPACITY: usize = 1 << 24;

/// Largest slot storage a bounded allocator will allocate (1 GiB).
///
/// Checked against `capacity * slot size` at construction, so a large `T`
/// lowers the usable capacity.
pub const MAX_SLOT_STORAGE_BYTES: usize = 1 << 30;

// =============================================================================
// REUSABLE ARRAY LIST
// =============================================================================

/// Initial buffer capacity of a new list.
pub const DEFAULT_INITIAL_CAPACITY: usize = 16;

/// Multiplicative growth applied above [`DEFAULT_GROWTH_THRESHOLD`].
pub const DEFAULT_GROWTH_FACTOR: f32 = 1.5;

/// Minimum absolute growth per resize.
pub const DEFAULT_MIN_GROW: usize = 16;

/// Buffer length below which growth is a fixed `min_grow` step.
pub const DEFAULT_GROWTH_THRESHOLD: usize = 256;

/// Live count above which `remove_at` defers deletion instead of shifting.
pub const DEFAULT_DEFER_THRESHOLD: usize = 64;

/// Live count above which queries walk the hole-aware iterator.
pub const DEFAULT_SCAN_THRESHOLD: usize = 32;

/// Maximum representable list length.
pub const MAX_LIST_LENGTH: usize = 0x7FFF_FFC7;
