//! Cache statistics tracking

/// Counters for touches and evictions
///
/// Read-only queries (`peek`, `get`, `snapshot`) are not counted.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    hits: u64,
    misses: u64,
    evictions: u64,
}

impl CacheStats {
    /// Create new stats tracker
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub(crate) fn record_miss(&mut self) {
        self.misses += 1;
    }

    pub(crate) fn record_eviction(&mut self) {
        self.evictions += 1;
    }

    /// Touches of a resident key
    pub fn hits(&self) -> u64 {
        self.hits
    }

    /// Touches that admitted a new key
    pub fn misses(&self) -> u64 {
        self.misses
    }

    /// Keys dropped because capacity was exceeded
    pub fn evictions(&self) -> u64 {
        self.evictions
    }

    /// Calculate hit ratio (0.0 to 1.0)
    pub fn hit_ratio(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    /// Reset all statistics
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
