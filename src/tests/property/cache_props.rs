//! Property-based tests for the bounded caches
//!
//! Tests invariants:
//! - Size never exceeds capacity, whatever the insert sequence
//! - The most recently inserted key is always present
//! - Hits plus misses equals the number of lookups

use proptest::prelude::*;

use crate::core::cache::{similarity_key, BoundedCache};

fn arb_keys() -> impl Strategy<Value = Vec<u16>> {
    prop::collection::vec(0u16..200, 0..400)
}

proptest! {
    #[test]
    fn prop_size_bounded(capacity in 1usize..64, keys in arb_keys()) {
        let cache = BoundedCache::new("prop", capacity);
        for key in keys {
            cache.insert(key, key as u32 * 2);
            prop_assert!(cache.len() <= capacity);
        }
    }

    #[test]
    fn prop_last_insert_readable(capacity in 1usize..64, keys in arb_keys()) {
        let cache = BoundedCache::new("prop", capacity);
        for key in keys {
            cache.insert(key, key as u32);
            prop_assert_eq!(cache.get(&key), Some(key as u32));
        }
    }

    #[test]
    fn prop_lookups_counted(keys in arb_keys()) {
        let cache = BoundedCache::new("prop", 32);
        for &key in &keys {
            cache.get_or_insert_with(key, || key);
        }
        let stats = cache.stats();
        prop_assert_eq!(stats.hits + stats.misses, keys.len() as u64);
        prop_assert!(stats.current_size <= stats.capacity);
    }

    #[test]
    fn prop_similarity_key_orderless(a in "[a-z]{0,8}", b in "[a-z]{0,8}") {
        prop_assert_eq!(similarity_key(&a, &b), similarity_key(&b, &a));
    }
}
