//! # Container Configuration
//!
//! Construction-time settings for both container types.
//!
//! Configs can be built in code or read from TOML. Every field has a default,
//! so a partial file only overrides what it names:
//!
//! ```toml
//! initial_capacity = 32
//! defer_threshold = 128
//! ```
//!
//! Validation happens once, up front. A bad value is rejected when the
//! container is built, never later.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{
    DEFAULT_DEFER_THRESHOLD, DEFAULT_GROWTH_FACTOR, DEFAULT_GROWTH_THRESHOLD,
    DEFAULT_INITIAL_CAPACITY, DEFAULT_MIN_GROW, DEFAULT_SCAN_THRESHOLD, DEFAULT_SLOT_CAPACITY,
    MAX_LIST_LENGTH, MAX_SLOT_CAPACITY,
};

/// Errors raised while loading or validating a config.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// The TOML source could not be parsed.
    #[error("invalid config file: {0}")]
    Parse(String),

    /// A field holds a value the container cannot work with.
    #[error("invalid value for `{field}`: {reason}")]
    InvalidValue {
        /// Name of the offending field.
        field: &'static str,
        /// What is wrong with it.
        reason: String,
    },
}

/// Result type for config operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Settings for a bounded slot allocator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AllocatorConfig {
    /// Number of slots, fixed for the allocator's lifetime.
    pub capacity: usize,
}

impl AllocatorConfig {
    /// Creates a config with the given slot count.
    #[inline]
    #[must_use]
    pub const fn with_capacity(capacity: usize) -> Self {
        Self { capacity }
    }

    /// Parses a config from TOML and validates it.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] on malformed TOML and
    /// [`ConfigError::InvalidValue`] if validation fails.
    pub fn from_toml_str(source: &str) -> ConfigResult<Self> {
        let config: Self = toml::from_str(source).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Checks every field.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] if the capacity is zero or larger
    /// than [`MAX_SLOT_CAPACITY`].
    pub fn validate(&self) -> ConfigResult<()> {
        if self.capacity == 0 {
            return Err(ConfigError::InvalidValue {
                field: "capacity",
                reason: "must be greater than zero".into(),
            });
        }
        if self.capacity > MAX_SLOT_CAPACITY {
            return Err(ConfigError::InvalidValue {
                field: "capacity",
                reason: format!("must not exceed {MAX_SLOT_CAPACITY}"),
            });
        }
        Ok(())
    }
}

impl Default for AllocatorConfig {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_SLOT_CAPACITY)
    }
}

/// Settings for a reusable array list.
///
/// The comparator is not part of this struct. It is a type parameter of the
/// list so that it is resolved at compile time.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListConfig {
    /// Starting buffer size.
    pub initial_capacity: usize,
    /// Multiplicative growth above `growth_threshold`. Must be greater than 1.
    pub growth_factor: f32,
    /// Minimum absolute growth per resize.
    pub min_grow: usize,
    /// Buffer length below which growth is a fixed `min_grow` step.
    pub growth_threshold: usize,
    /// Live count above which removals leave a hole instead of shifting.
    pub defer_threshold: usize,
    /// Live count above which queries use the hole-aware iterator.
    pub scan_threshold: usize,
}

impl ListConfig {
    /// Parses a config from TOML and validates it.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] on malformed TOML and
    /// [`ConfigError::InvalidValue`] if validation fails.
    pub fn from_toml_str(source: &str) -> ConfigResult<Self> {
        let config: Self = toml::from_str(source).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Checks every field.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] naming the first bad field.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.initial_capacity > MAX_LIST_LENGTH {
            return Err(ConfigError::InvalidValue {
                field: "initial_capacity",
                reason: format!("must not exceed {MAX_LIST_LENGTH}"),
            });
        }
        if !self.growth_factor.is_finite() || self.growth_factor <= 1.0 {
            return Err(ConfigError::InvalidValue {
                field: "growth_factor",
                reason: format!("must be a finite value above 1.0, got {}", self.growth_factor),
            });
        }
        if self.min_grow == 0 {
            return Err(ConfigError::InvalidValue {
                field: "min_grow",
                reason: "must be greater than zero".into(),
            });
        }
        Ok(())
    }
}

impl Default for ListConfig {
    fn default() -> Self {
        Self {
            initial_capacity: DEFAULT_INITIAL_CAPACITY,
            growth_factor: DEFAULT_GROWTH_FACTOR,
            min_grow: DEFAULT_MIN_GROW,
            growth_threshold: DEFAULT_GROWTH_THRESHOLD,
            defer_threshold: DEFAULT_DEFER_THRESHOLD,
            scan_threshold: DEFAULT_SCAN_THRESHOLD,
        }
    }
}
