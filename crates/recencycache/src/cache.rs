//! RecencyCache: key index plus order sequence

use std::collections::HashMap;
use std::fmt;
use std::iter::FusedIterator;

use ahash::RandomState;
use tracing::{debug, trace};

use crate::config::CacheConfig;
use crate::error::Result;
use crate::order::{Iter, OrderSequence};
use crate::stats::CacheStats;

/// Upper bound on slots reserved up front; larger caches grow on demand
const PREALLOC_LIMIT: usize = 4096;

/// What a touch did to the cache
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Touch {
    /// Key was resident and moved to the front
    Hit,
    /// Key was admitted at the front without exceeding capacity
    Inserted,
    /// Key was admitted and the least recently used key was dropped
    Evicted(String),
}

impl Touch {
    /// True when the key was already resident
    pub fn is_hit(&self) -> bool {
        matches!(self, Touch::Hit)
    }

    /// Key dropped by this touch, if any
    pub fn evicted(&self) -> Option<&str> {
        match self {
            Touch::Evicted(key) => Some(key.as_str()),
            _ => None,
        }
    }

    /// Short lowercase name of the outcome
    pub fn as_str(&self) -> &'static str {
        match self {
            Touch::Hit => "hit",
            Touch::Inserted => "inserted",
            Touch::Evicted(_) => "evicted",
        }
    }
}

/// Fixed-capacity cache that keeps the most recently touched keys
///
/// Every key is held twice: once in an ahash index for O(1) lookup and once
/// in an order sequence (most recent first) for O(1) relocation and
/// eviction. Both always hold the same set of keys.
///
/// `V` is an opaque payload; presence-only caches use the default `()`.
pub struct RecencyCache<V = ()> {
    /// Key -> slot in `order`
    index: HashMap<String, usize, RandomState>,

    /// Recency order, front = most recently used
    order: OrderSequence<V>,

    /// Maximum resident keys
    capacity: usize,

    /// Touch statistics
    stats: CacheStats,
}

impl RecencyCache {
    /// Create a presence-only cache holding at most `capacity` keys
    ///
    /// # Errors
    /// [`Error::InvalidConfiguration`](crate::Error::InvalidConfiguration)
    /// if `capacity` is zero.
    pub fn new(capacity: usize) -> Result<Self> {
        Self::with_capacity(capacity)
    }
}

impl<V> RecencyCache<V> {
    /// Create a cache with payload type `V` holding at most `capacity` keys
    ///
    /// # Errors
    /// [`Error::InvalidConfiguration`](crate::Error::InvalidConfiguration)
    /// if `capacity` is zero.
    pub fn with_capacity(capacity: usize) -> Result<Self> {
        Self::from_config(&CacheConfig::new(capacity))
    }

    /// Create a cache from a validated configuration
    pub fn from_config(config: &CacheConfig) -> Result<Self> {
        config.validate()?;

        let capacity = config.capacity;
        // One spare slot: the entry admitted just before an eviction
        let reserve = capacity.saturating_add(1).min(PREALLOC_LIMIT);
        debug!(capacity, "recency cache created");

        Ok(Self {
            index: HashMap::with_capacity_and_hasher(reserve, RandomState::new()),
            order: OrderSequence::with_capacity(reserve),
            capacity,
            stats: CacheStats::new(),
        })
    }

    /// Mark `key` as just used
    ///
    /// A resident key moves to the front. A new key is admitted at the front
    /// with a default payload; if that overflows capacity, the least recently
    /// used key is evicted. Any string, including `""`, is a valid key.
    pub fn touch(&mut self, key: &str) -> Touch
    where
        V: Default,
    {
        if let Some(&idx) = self.index.get(key) {
            self.promote(key, idx);
            return Touch::Hit;
        }

        self.admit(key, V::default())
    }

    /// Touch `key` and store `value` as its payload
    ///
    /// On a hit the previous payload is replaced.
    pub fn insert(&mut self, key: &str, value: V) -> Touch {
        if let Some(&idx) = self.index.get(key) {
            if let Some(slot) = self.order.value_mut(idx) {
                *slot = value;
            }
            self.promote(key, idx);
            return Touch::Hit;
        }

        self.admit(key, value)
    }

    /// Check residency without touching
    pub fn peek(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    /// Payload of a resident key, without touching
    pub fn get(&self, key: &str) -> Option<&V> {
        let &idx = self.index.get(key)?;
        self.order.value(idx)
    }

    /// Drop `key` from the cache and return its payload
    ///
    /// Not counted as an eviction.
    pub fn remove(&mut self, key: &str) -> Option<V> {
        let idx = self.index.remove(key)?;
        let (_, value) = self.order.remove(idx)?;
        trace!(key, "removed");
        self.check_sync();
        Some(value)
    }

    /// Drop every entry and reset statistics. Capacity is unchanged.
    pub fn clear(&mut self) {
        self.index.clear();
        self.order.clear();
        self.stats.reset();
        debug!("recency cache cleared");
    }

    /// Current number of resident keys
    pub fn size(&self) -> usize {
        self.order.len()
    }

    /// Same as [`size`](Self::size)
    pub fn len(&self) -> usize {
        self.size()
    }

    /// Check if no keys are resident
    pub fn is_empty(&self) -> bool {
        self.size() == 0
    }

    /// Maximum number of resident keys
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Resident keys from most to least recently used
    pub fn snapshot(&self) -> Snapshot<'_, V> {
        Snapshot {
            inner: self.order.iter(),
        }
    }

    /// Resident `(key, payload)` pairs from most to least recently used
    pub fn entries(&self) -> Iter<'_, V> {
        self.order.iter()
    }

    /// Most recently used key
    pub fn mru_key(&self) -> Option<&str> {
        self.order.front().and_then(|idx| self.order.key(idx))
    }

    /// Least recently used key, the next one to be evicted
    pub fn lru_key(&self) -> Option<&str> {
        self.order.back().and_then(|idx| self.order.key(idx))
    }

    /// Get cache statistics
    pub fn stats(&self) -> &CacheStats {
        &self.stats
    }

    fn promote(&mut self, key: &str, idx: usize) {
        self.order.move_to_front(idx);
        self.stats.record_hit();
        trace!(key, "moved to front");
    }

    fn admit(&mut self, key: &str, value: V) -> Touch {
        let idx = self.order.push_front(key.to_owned(), value);
        self.index.insert(key.to_owned(), idx);
        self.stats.record_miss();
        debug!(key, "added at front");

        let outcome = if self.order.len() > self.capacity {
            match self.evict() {
                Some(evicted) => Touch::Evicted(evicted),
                None => Touch::Inserted,
            }
        } else {
            Touch::Inserted
        };

        self.check_sync();
        outcome
    }

    fn evict(&mut self) -> Option<String> {
        let (key, _) = self.order.pop_back()?;
        self.index.remove(&key);
        self.stats.record_eviction();
        debug!(key = key.as_str(), "evicted least recently used");
        Some(key)
    }

    fn check_sync(&self) {
        debug_assert_eq!(
            self.order.len(),
            self.index.len(),
            "order sequence and key index out of sync"
        );
        debug_assert!(self.order.len() <= self.capacity);
    }
}

impl<V: fmt::Debug> fmt::Debug for RecencyCache<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecencyCache")
            .field("capacity", &self.capacity)
            .field("entries", &DebugEntries(self))
            .field("stats", &self.stats)
            .finish()
    }
}

struct DebugEntries<'a, V>(&'a RecencyCache<V>);

impl<V: fmt::Debug> fmt::Debug for DebugEntries<'_, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.0.entries()).finish()
    }
}

/// Lazy view of resident keys, most recently used first
///
/// Borrows the cache, so the cache cannot change while it is consumed.
pub struct Snapshot<'a, V> {
    inner: Iter<'a, V>,
}

impl<'a, V> Iterator for Snapshot<'a, V> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(key, _)| key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<V> DoubleEndedIterator for Snapshot<'_, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(key, _)| key)
    }
}

impl<V> ExactSizeIterator for Snapshot<'_, V> {}

impl<V> FusedIterator for Snapshot<'_, V> {}
