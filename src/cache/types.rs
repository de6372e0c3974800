use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

/// Stored cache entry
///
/// Entries are immutable once written; a refresh replaces the whole entry.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub key: String,
    pub category: String,
    pub data: serde_json::Value,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    /// Insertion order, breaks ties between entries created at the same instant
    pub(crate) sequence: u64,
}

/// The single freshness predicate: an entry is served while `now <= expires_at`
pub fn is_expired(entry: &CacheEntry, now: DateTime<Utc>) -> bool {
    now > entry.expires_at
}

/// Point-in-time cache statistics, recomputed from the sample windows on demand
#[derive(Debug, Clone, Default, Serialize)]
pub struct CacheStats {
    pub total_entries: usize,
    pub max_entries: usize,
    /// Entries past expiry that the sweep has not removed yet
    pub expired_entries: usize,
    pub entries_per_category: BTreeMap<String, usize>,
    pub hits: usize,
    pub misses: usize,
    pub expired: usize,
    pub hit_rate: f64,
    pub avg_lookup_ms: f64,
    pub evictions: u64,
    pub sweeps: u64,
}
