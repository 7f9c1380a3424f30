//! # Slotwise Shared
//!
//! Defaults and construction-time configuration for the slotwise containers.
//!
//! ## Rule
//!
//! Nothing here runs in a hot path. Configs are parsed and validated once,
//! before a container exists.

#![deny(missing_docs)]
#![deny(unsafe_code)]

pub mod config;
pub mod constants;

pub use config::{AllocatorConfig, ConfigError, ConfigResult, ListConfig};
pub use constants::{
    DEFAULT_SLOT_CAPACITY, MAX_LIST_LENGTH, MAX_SLOT_CAPACITY, MAX_SLOT_STORAGE_BYTES,
};
