//! # recencycache
//!
//! Fixed-capacity recency (LRU) cache.
//!
//! ## Architecture
//! - **Key Index**: AHash map from key to slot (O(1) lookup)
//! - **Order Sequence**: slot-linked doubly linked list, most recent first
//!   (O(1) relocate and evict)
//!
//! A touch on a resident key moves it to the front. A touch on a new key
//! admits it at the front and, once capacity is exceeded, evicts the key at
//! the back.
//!
//! ```
//! use recencycache::RecencyCache;
//!
//! let mut cache = RecencyCache::new(2)?;
//! cache.touch("a");
//! cache.touch("b");
//! cache.touch("c");
//!
//! assert_eq!(cache.snapshot().collect::<Vec<_>>(), ["c", "b"]);
//! assert!(!cache.peek("a"));
//! # Ok::<(), recencycache::Error>(())
//! ```

#![warn(missing_docs)]

mod cache;
mod config;
mod error;
mod order;
mod stats;

pub use cache::{RecencyCache, Snapshot, Touch};
pub use config::{CacheConfig, DEFAULT_CAPACITY};
pub use error::{Error, Result};
pub use order::Iter as Entries;
pub use stats::CacheStats;
