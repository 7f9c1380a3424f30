//! # Container Error Types
//!
//! Invalid indices are not errors here. They come back as `false` or `None`,
//! because under concurrent use the slot may change state again before the
//! caller looks at the result.

use slotwise_shared::ConfigError;
use thiserror::Error;

/// Errors reported by the bounded slot allocator.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SlotError {
    /// Every slot is claimed and none has been released.
    ///
    /// Retryable once some other caller removes an element.
    #[error("allocator full: all {capacity} slots are in use")]
    Full {
        /// Fixed slot count of the allocator.
        capacity: usize,
    },

    /// The construction config was rejected.
    #[error(transparent)]
    InvalidConfig(#[from] ConfigError),
}

/// Result type for allocator operations.
pub type SlotResult<T> = Result<T, SlotError>;

/// Errors reported by the reusable array list.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ListError {
    /// The list was structurally modified while a cursor was walking it.
    #[error("list modified during iteration: cursor expected version {expected}, found {found}")]
    ConcurrentModification {
        /// Version recorded when the cursor was created.
        expected: u64,
        /// Version the list had at the failing step.
        found: u64,
    },

    /// The construction config was rejected.
    #[error(transparent)]
    InvalidConfig(#[from] ConfigError),
}

/// Result type for list operations.
pub type ListResult<T> = Result<T, ListError>;
