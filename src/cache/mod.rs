//! Category-aware TTL cache for upstream API responses

pub mod clock;
pub mod config;
pub mod manager;
pub mod metrics;
pub mod sweeper;
pub mod types;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{category, CacheStrategy, StrategyTable};
pub use manager::CacheManager;
pub use metrics::{LookupMetrics, LookupOutcome};
pub use sweeper::spawn_sweeper;
pub use types::{is_expired, CacheEntry, CacheStats};
