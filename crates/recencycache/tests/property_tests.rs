//! Property tests: RecencyCache against a naive Vec-backed LRU model

use proptest::prelude::*;
use recencycache::{RecencyCache, Touch};

/// Obviously-correct LRU: a Vec with the most recent key first
struct Model {
    keys: Vec<String>,
    capacity: usize,
}

impl Model {
    fn new(capacity: usize) -> Self {
        Self {
            keys: Vec::new(),
            capacity,
        }
    }

    fn touch(&mut self, key: &str) -> Touch {
        if let Some(pos) = self.keys.iter().position(|k| k == key) {
            let k = self.keys.remove(pos);
            self.keys.insert(0, k);
            return Touch::Hit;
        }
        self.keys.insert(0, key.to_string());
        if self.keys.len() > self.capacity {
            let evicted = self.keys.pop().unwrap();
            return Touch::Evicted(evicted);
        }
        Touch::Inserted
    }

    fn remove(&mut self, key: &str) -> bool {
        match self.keys.iter().position(|k| k == key) {
            Some(pos) => {
                self.keys.remove(pos);
                true
            }
            None => false,
        }
    }
}

#[derive(Debug, Clone)]
enum Op {
    Touch(String),
    Peek(String),
    Remove(String),
}

/// Small key space so hits, misses and evictions all happen often
fn key() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        "[a-h]",
        "[a-h]{2}",
    ]
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        6 => key().prop_map(Op::Touch),
        2 => key().prop_map(Op::Peek),
        1 => key().prop_map(Op::Remove),
    ]
}

proptest! {
    #[test]
    fn test_matches_model(capacity in 1usize..8, ops in prop::collection::vec(op(), 0..200)) {
        let mut cache = RecencyCache::new(capacity).unwrap();
        let mut model = Model::new(capacity);

        for op in &ops {
            match op {
                Op::Touch(key) => {
                    prop_assert_eq!(cache.touch(key), model.touch(key));
                }
                Op::Peek(key) => {
                    prop_assert_eq!(cache.peek(key), model.keys.contains(key));
                }
                Op::Remove(key) => {
                    prop_assert_eq!(cache.remove(key).is_some(), model.remove(key));
                }
            }

            let snapshot: Vec<&str> = cache.snapshot().collect();
            prop_assert_eq!(&snapshot, &model.keys);
            prop_assert_eq!(cache.size(), snapshot.len());
            prop_assert!(cache.size() <= cache.capacity());
        }
    }

    #[test]
    fn test_capacity_bound(capacity in 1usize..16, keys in prop::collection::vec(key(), 0..100)) {
        let mut cache = RecencyCache::new(capacity).unwrap();

        for key in &keys {
            cache.touch(key);
            prop_assert!(cache.size() <= capacity);
            prop_assert_eq!(cache.snapshot().count(), cache.size());
        }
    }

    #[test]
    fn test_peek_is_idempotent(keys in prop::collection::vec(key(), 1..50), probes in prop::collection::vec(key(), 0..50)) {
        let mut cache = RecencyCache::new(4).unwrap();
        for key in &keys {
            cache.touch(key);
        }

        let before: Vec<String> = cache.snapshot().map(str::to_owned).collect();
        let stats = *cache.stats();
        for probe in &probes {
            cache.peek(probe);
        }
        let after: Vec<String> = cache.snapshot().map(str::to_owned).collect();

        prop_assert_eq!(before, after);
        prop_assert_eq!(stats, *cache.stats());
    }

    #[test]
    fn test_recency_order(capacity in 2usize..10, n in 2usize..10) {
        let mut cache = RecencyCache::new(capacity).unwrap();
        let keys: Vec<String> = (0..n).map(|i| format!("k{}", i)).collect();

        for key in &keys {
            cache.touch(key);
        }

        // Later touches come first; only the newest `capacity` survive
        let expected: Vec<&str> = keys.iter().rev().take(capacity).map(String::as_str).collect();
        let snapshot: Vec<&str> = cache.snapshot().collect();
        prop_assert_eq!(snapshot, expected);
    }

    #[test]
    fn test_eviction_of_first_key(capacity in 1usize..32) {
        let mut cache = RecencyCache::new(capacity).unwrap();
        let keys: Vec<String> = (0..=capacity).map(|i| format!("k{}", i)).collect();

        for key in &keys {
            cache.touch(key);
        }

        prop_assert_eq!(cache.size(), capacity);
        prop_assert!(!cache.peek(&keys[0]));
        for key in &keys[1..] {
            prop_assert!(cache.peek(key));
        }
        prop_assert_eq!(cache.stats().evictions(), 1);
    }
}
