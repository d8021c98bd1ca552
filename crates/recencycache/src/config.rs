//! Cache configuration

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Capacity used when none is configured
pub const DEFAULT_CAPACITY: usize = 5;

/// Settings fixed at cache construction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Maximum number of resident keys
    pub capacity: usize,
}

impl CacheConfig {
    /// Config with the given capacity
    pub fn new(capacity: usize) -> Self {
        Self { capacity }
    }

    /// Reject configurations no cache can be built from
    pub fn validate(&self) -> Result<()> {
        if self.capacity < 1 {
            return Err(Error::InvalidConfiguration(format!(
                "capacity must be at least 1, got {}",
                self.capacity
            )));
        }
        Ok(())
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
        }
    }
}
