//! # Reusable Array List
//!
//! Single-threaded baseline to compare against the bounded allocator.
//!
//! ## Design Philosophy
//!
//! For a few hundred elements, shifting is cheap and keeps the list dense.
//! Past a threshold, removals leave holes instead, and the caller decides
//! when to pay for reclaiming them:
//!
//! ```text
//! remove_at(1), live <= defer_threshold     remove_at(1), live > defer_threshold
//!   [a b c d] -> [a c d]                      [a b c d] -> [a _ c d]   free = [1]
//! ```

mod cursor;
mod policy;
mod reusable;

pub use cursor::{Cursor, Iter};
pub use policy::{next_capacity, RemovalPolicy, ScanStrategy};
pub use reusable::ReusableArrayList;
