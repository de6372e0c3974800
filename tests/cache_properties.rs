//! Property-based tests for the response cache

use matchday::cache::{category, CacheManager, ManualClock, StrategyTable};
use proptest::prelude::*;
use std::sync::Arc;

fn params_and_shuffle() -> impl Strategy<Value = (Vec<(String, String)>, Vec<(String, String)>)> {
    prop::collection::btree_map("[a-z_]{1,10}", "[a-z0-9]{0,6}", 0..8).prop_flat_map(|map| {
        let pairs: Vec<(String, String)> = map.into_iter().collect();
        (Just(pairs.clone()), Just(pairs).prop_shuffle())
    })
}

proptest! {
    #[test]
    fn test_key_ignores_parameter_order((ordered, shuffled) in params_and_shuffle()) {
        let a = CacheManager::generate_key("scores/live", ordered.iter().map(|(k, v)| (k, v)));
        let b = CacheManager::generate_key("scores/live", shuffled.iter().map(|(k, v)| (k, v)));
        prop_assert_eq!(a, b);
    }

    #[test]
    fn test_size_never_exceeds_bound(
        capacity in 1usize..40,
        keys in prop::collection::vec("[a-z]{1,4}", 1..120)
    ) {
        let cache = CacheManager::new(StrategyTable::builtin(), capacity);
        for key in &keys {
            cache.set(key, &1u8, category::HISTORY).unwrap();
            prop_assert!(cache.len() <= capacity);
        }
    }

    #[test]
    fn test_live_entry_lives_exactly_its_ttl(key in "[a-z0-9/?=&]{1,30}", value in any::<i64>()) {
        let clock = Arc::new(ManualClock::default());
        let cache = CacheManager::with_clock(StrategyTable::builtin(), 100, clock.clone());

        cache.set(&key, &value, category::LIVE).unwrap();
        prop_assert_eq!(cache.get::<i64>(&key, category::LIVE), Some(value));

        clock.advance_ms(30_000);
        prop_assert!(cache.has(&key, category::LIVE));

        clock.advance_ms(1);
        prop_assert_eq!(cache.get::<i64>(&key, category::LIVE), None);
        prop_assert!(cache.is_empty());
    }
}
