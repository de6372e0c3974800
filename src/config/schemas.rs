use crate::config_struct;
use std::collections::BTreeMap;

// ============================================================================
// UPSTREAM API
// ============================================================================

config_struct! {
    /// Upstream sports-data API connection settings
    pub struct ApiConfig {
        base_url: String = "https://livescore-api.com/api-client".to_string(),
        /// Sent as the `key` query parameter
        api_key: String = String::new(),
        /// Sent as the `secret` query parameter
        api_secret: String = String::new(),
        timeout_ms: u64 = 10_000,
        /// Not used by the core; exposed for wrappers that add a retry policy
        retry_attempts: u32 = 3,
        /// 0 disables client-side rate limiting
        rate_limit_per_minute: u32 = 0,
    }
}

// ============================================================================
// CACHE
// ============================================================================

config_struct! {
    /// Cache capacity, sweep cadence and per-category TTL overrides
    pub struct CacheSettings {
        /// Global bound on stored entries across all categories
        max_entries: usize = 500,
        sweep_interval_secs: u64 = 60,
        /// Size of the request performance ring buffer
        performance_samples: usize = 1000,
        /// category name -> TTL in milliseconds
        ttl_overrides: BTreeMap<String, u64> = BTreeMap::new(),
    }
}

// ============================================================================
// LOGO LOOKUP
// ============================================================================

config_struct! {
    pub struct LogoConfig {
        enabled: bool = true,
        base_url: String = "https://www.thesportsdb.com/api/v1/json/3".to_string(),
        placeholder_url: String = "/images/no-logo.png".to_string(),
        timeout_ms: u64 = 5_000,
    }
}

// ============================================================================
// AGGREGATION
// ============================================================================

config_struct! {
    /// Composite extraction and presentation ordering
    pub struct AggregationConfig {
        /// Competitions that get standings and top scorers in a full extraction
        top_n_competitions: usize = 5,
        /// Competition priority on Tuesday, Wednesday and Thursday
        priority_midweek: Vec<String> = ["3", "4", "683", "152", "302", "207", "175", "168"]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        /// Competition priority on the other days
        priority_default: Vec<String> = ["152", "302", "207", "175", "168", "3", "4", "683"]
            .iter()
            .map(|s| s.to_string())
            .collect(),
    }
}

// ============================================================================
// ROOT CONFIGURATION
// ============================================================================

config_struct! {
    /// Root configuration
    pub struct Config {
        api: ApiConfig = ApiConfig::default(),
        cache: CacheSettings = CacheSettings::default(),
        logos: LogoConfig = LogoConfig::default(),
        aggregation: AggregationConfig = AggregationConfig::default(),
    }
}
