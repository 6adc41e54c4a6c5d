//! TableConfig: construction-time knobs for `ChainTable`.

use crate::error::ConfigError;

/// Buckets allocated by `ChainTable::new`.
pub const DEFAULT_CAPACITY: usize = 8;

/// Growth threshold. Chains tolerate far higher occupancy than open
/// addressing, so the table doubles only once the average chain reaches 4.
pub const DEFAULT_MAX_LOAD_FACTOR: f64 = 4.0;

/// Smallest accepted growth threshold. Below it the table would double its
/// bucket count on nearly every insert.
pub const MIN_MAX_LOAD_FACTOR: f64 = 0.25;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TableConfig {
    pub initial_capacity: usize,
    pub max_load_factor: f64,
}

impl TableConfig {
    pub const fn new() -> Self {
        Self {
            initial_capacity: DEFAULT_CAPACITY,
            max_load_factor: DEFAULT_MAX_LOAD_FACTOR,
        }
    }

    pub const fn with_initial_capacity(mut self, buckets: usize) -> Self {
        self.initial_capacity = buckets;
        self
    }

    pub fn with_max_load_factor(mut self, load_factor: f64) -> Self {
        self.max_load_factor = load_factor;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.initial_capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        if !self.max_load_factor.is_finite() || self.max_load_factor < MIN_MAX_LOAD_FACTOR {
            return Err(ConfigError::InvalidLoadFactor(self.max_load_factor));
        }
        Ok(())
    }
}

impl Default for TableConfig {
    fn default() -> Self {
        Self::new()
    }
}
