//! # Slotwise Core
//!
//! Bounded containers for code that adds and removes elements constantly
//! and cannot afford allocator traffic while doing it:
//! - [`BoundedSlotAllocator`]: fixed capacity, lock-free `add`/`remove_at`
//!   from any number of threads
//! - [`ReusableArrayList`]: single-threaded, reuses freed slots, defers
//!   compaction once the list grows past a threshold
//!
//! ## Architecture Rules
//!
//! 1. **Capacity is fixed up front** - the allocator never grows
//! 2. **Indices are handles** - valid until removed or renumbered
//! 3. **Failures are values** - `Full`, `false` and `None`, never panics
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use std::thread;
//!
//! use slotwise_core::BoundedSlotAllocator;
//!
//! let slots: Arc<BoundedSlotAllocator<u64>> = Arc::new(BoundedSlotAllocator::new());
//!
//! let workers: Vec<_> = (0..4)
//!     .map(|worker| {
//!         let slots = Arc::clone(&slots);
//!         thread::spawn(move || slots.add(worker).ok())
//!     })
//!     .collect();
//!
//! for worker in workers {
//!     assert!(worker.join().unwrap().is_some());
//! }
//! assert_eq!(slots.count(), 4);
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod bounded;
pub mod compare;
pub mod error;
pub mod list;

pub use bounded::BoundedSlotAllocator;
pub use compare::{Comparator, NaturalOrder, Reversed};
pub use error::{ListError, ListResult, SlotError, SlotResult};
pub use list::{Cursor, ReusableArrayList};
pub use slotwise_shared::{AllocatorConfig, ConfigError, ListConfig};
