/// In-memory cache with per-category TTL, capacity bound and eviction
///
/// One instance is created at startup and shared by `Arc` with every client.
/// Values are stored as JSON and deserialized on read, so one manager holds
/// every payload type.
use super::clock::{Clock, SystemClock};
use super::config::StrategyTable;
use super::metrics::{LookupMetrics, LookupOutcome};
use super::types::{is_expired, CacheEntry, CacheStats};
use crate::logger::{self, LogTag};
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use regex::Regex;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

/// Share of entries removed when a capacity bound is hit
const EVICTION_FRACTION: f64 = 0.10;

pub const DEFAULT_CAPACITY: usize = 500;

pub struct CacheManager {
    entries: Mutex<HashMap<String, CacheEntry>>,
    strategies: StrategyTable,
    max_entries: usize,
    clock: Arc<dyn Clock>,
    metrics: Mutex<LookupMetrics>,
    next_sequence: AtomicU64,
    evictions: AtomicU64,
    sweeps: AtomicU64,
    sweep_in_progress: AtomicBool,
}

impl CacheManager {
    pub fn new(strategies: StrategyTable, max_entries: usize) -> Self {
        Self::with_clock(strategies, max_entries, Arc::new(SystemClock))
    }

    pub fn with_clock(strategies: StrategyTable, max_entries: usize, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            strategies,
            max_entries: max_entries.max(1),
            clock,
            metrics: Mutex::new(LookupMetrics::new()),
            next_sequence: AtomicU64::new(0),
            evictions: AtomicU64::new(0),
            sweeps: AtomicU64::new(0),
            sweep_in_progress: AtomicBool::new(false),
        }
    }

    /// Build from the `[cache]` configuration section
    pub fn from_settings(settings: &crate::config::CacheSettings) -> Self {
        Self::new(
            StrategyTable::with_overrides(&settings.ttl_overrides),
            settings.max_entries,
        )
    }

    /// Request signature: endpoint plus parameters sorted by name
    ///
    /// `scores/live` with `{b: 2, a: 1}` becomes `scores/live?a=1&b=2`. Pure and
    /// independent of parameter insertion order.
    pub fn generate_key<I, K, V>(endpoint: &str, params: I) -> String
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut pairs: Vec<(String, String)> = params
            .into_iter()
            .map(|(k, v)| (k.as_ref().to_string(), v.as_ref().to_string()))
            .collect();

        if pairs.is_empty() {
            return endpoint.to_string();
        }

        pairs.sort();
        let query = pairs
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join("&");

        format!("{}?{}", endpoint, query)
    }

    fn storage_key(key: &str, category: &str) -> String {
        format!("{}:{}", category, key)
    }

    /// Fresh value for `key` in `category`, or `None`
    ///
    /// Stale entries are removed on the spot. A stored value that does not
    /// deserialize as `T` is dropped and counted as a miss.
    pub fn get<T>(&self, key: &str, category: &str) -> Option<T>
    where
        T: DeserializeOwned,
    {
        let started = Instant::now();
        let storage_key = Self::storage_key(key, category);
        let now = self.clock.now();

        let lookup = {
            let mut entries = self.entries.lock();
            match entries.get(&storage_key) {
                None => Err(LookupOutcome::Miss),
                Some(entry) if is_expired(entry, now) => {
                    entries.remove(&storage_key);
                    Err(LookupOutcome::Expired)
                }
                Some(entry) => Ok(entry.data.clone()),
            }
        };

        let (outcome, value) = match lookup {
            Ok(data) => match serde_json::from_value::<T>(data) {
                Ok(value) => (LookupOutcome::Hit, Some(value)),
                Err(e) => {
                    logger::warning(
                        LogTag::Cache,
                        &format!("Dropping undecodable entry {}: {}", storage_key, e),
                    );
                    self.entries.lock().remove(&storage_key);
                    (LookupOutcome::Miss, None)
                }
            },
            Err(outcome) => (outcome, None),
        };

        let latency_ms = started.elapsed().as_secs_f64() * 1000.0;
        self.metrics.lock().record(outcome, latency_ms);

        logger::debug(
            LogTag::Cache,
            &format!("{:?}: {} ({:.3}ms)", outcome, storage_key, latency_ms),
        );

        value
    }

    /// Store `value` under `key` in `category`
    ///
    /// Expiry comes from the category strategy (default when unregistered).
    /// A new key first makes room: at the global bound the oldest 10% of all
    /// entries go, at the category bound the oldest 10% of that category.
    pub fn set<T>(&self, key: &str, value: &T, category: &str) -> Result<(), serde_json::Error>
    where
        T: Serialize + ?Sized,
    {
        let data = serde_json::to_value(value)?;
        let strategy = self.strategies.get(category);
        let now = self.clock.now();
        let storage_key = Self::storage_key(key, category);

        let entry = CacheEntry {
            key: storage_key.clone(),
            category: category.to_string(),
            data,
            created_at: now,
            expires_at: expiry(now, strategy.ttl_millis()),
            sequence: self.next_sequence.fetch_add(1, Ordering::Relaxed),
        };

        let mut entries = self.entries.lock();
        if !entries.contains_key(&storage_key) {
            if entries.len() >= self.max_entries {
                let evicted = self.evict_oldest(&mut entries, None);
                logger::debug(
                    LogTag::Cache,
                    &format!("Capacity {} reached, evicted {} entries", self.max_entries, evicted),
                );
            }

            let in_category = entries.values().filter(|e| e.category == category).count();
            if in_category >= strategy.max_entries {
                let evicted = self.evict_oldest(&mut entries, Some(category));
                logger::debug(
                    LogTag::Cache,
                    &format!(
                        "Category '{}' at {} entries, evicted {}",
                        category, strategy.max_entries, evicted
                    ),
                );
            }
        }
        entries.insert(storage_key, entry);

        Ok(())
    }

    /// Same freshness check as `get` without returning data
    pub fn has(&self, key: &str, category: &str) -> bool {
        let storage_key = Self::storage_key(key, category);
        let now = self.clock.now();
        let mut entries = self.entries.lock();

        match entries.get(&storage_key) {
            Some(entry) if is_expired(entry, now) => {
                entries.remove(&storage_key);
                false
            }
            Some(_) => true,
            None => false,
        }
    }

    pub fn remove(&self, key: &str, category: &str) -> bool {
        self.entries
            .lock()
            .remove(&Self::storage_key(key, category))
            .is_some()
    }

    /// Remove every stored key (`category:signature`) matching `pattern`
    pub fn invalidate_pattern(&self, pattern: &Regex) -> usize {
        let mut entries = self.entries.lock();
        let before = entries.len();
        entries.retain(|key, _| !pattern.is_match(key));
        let removed = before - entries.len();

        logger::info(
            LogTag::Cache,
            &format!("Invalidated {} entries matching /{}/", removed, pattern.as_str()),
        );
        removed
    }

    /// Remove every entry stored under `category`
    pub fn invalidate_category(&self, category: &str) -> usize {
        let mut entries = self.entries.lock();
        let before = entries.len();
        entries.retain(|_, entry| entry.category != category);
        let removed = before - entries.len();

        logger::info(
            LogTag::Cache,
            &format!("Invalidated {} entries in category '{}'", removed, category),
        );
        removed
    }

    /// Drop all entries and reset the lookup metrics
    pub fn clear(&self) {
        self.entries.lock().clear();
        self.metrics.lock().reset();
    }

    /// One sweep over all entries, removing the expired ones
    ///
    /// Returns 0 without scanning if another sweep is still running.
    pub fn cleanup_expired(&self) -> usize {
        if self
            .sweep_in_progress
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            logger::debug(LogTag::Cache, "Sweep already running, skipping");
            return 0;
        }

        let now = self.clock.now();
        let removed = {
            let mut entries = self.entries.lock();
            let before = entries.len();
            entries.retain(|_, entry| !is_expired(entry, now));
            before - entries.len()
        };

        self.sweeps.fetch_add(1, Ordering::Relaxed);
        self.sweep_in_progress.store(false, Ordering::Release);

        if removed > 0 {
            logger::debug(LogTag::Cache, &format!("Sweep removed {} expired entries", removed));
        }
        removed
    }

    pub fn stats(&self) -> CacheStats {
        let now = self.clock.now();
        let (total_entries, expired_entries, entries_per_category) = {
            let entries = self.entries.lock();
            let mut per_category: BTreeMap<String, usize> = BTreeMap::new();
            let mut expired = 0;
            for entry in entries.values() {
                *per_category.entry(entry.category.clone()).or_default() += 1;
                if is_expired(entry, now) {
                    expired += 1;
                }
            }
            (entries.len(), expired, per_category)
        };

        let metrics = self.metrics.lock();
        CacheStats {
            total_entries,
            max_entries: self.max_entries,
            expired_entries,
            entries_per_category,
            hits: metrics.hits(),
            misses: metrics.misses(),
            expired: metrics.expired(),
            hit_rate: metrics.hit_rate(),
            avg_lookup_ms: metrics.avg_lookup_ms(),
            evictions: self.evictions.load(Ordering::Relaxed),
            sweeps: self.sweeps.load(Ordering::Relaxed),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn max_entries(&self) -> usize {
        self.max_entries
    }

    pub fn strategies(&self) -> &StrategyTable {
        &self.strategies
    }

    // Remove the oldest-created 10% (at least one) of all entries, or of one category
    fn evict_oldest(&self, entries: &mut HashMap<String, CacheEntry>, category: Option<&str>) -> usize {
        let mut candidates: Vec<(DateTime<Utc>, u64, String)> = entries
            .values()
            .filter(|e| category.map_or(true, |c| e.category == c))
            .map(|e| (e.created_at, e.sequence, e.key.clone()))
            .collect();

        if candidates.is_empty() {
            return 0;
        }

        let count = ((candidates.len() as f64 * EVICTION_FRACTION).ceil() as usize).max(1);
        candidates.sort();

        for (_, _, key) in candidates.iter().take(count) {
            entries.remove(key);
        }

        self.evictions.fetch_add(count as u64, Ordering::Relaxed);
        count
    }
}

/// `now + ttl`, saturating at the latest representable instant
fn expiry(now: DateTime<Utc>, ttl_ms: u64) -> DateTime<Utc> {
    i64::try_from(ttl_ms)
        .ok()
        .and_then(chrono::Duration::try_milliseconds)
        .and_then(|ttl| now.checked_add_signed(ttl))
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}

impl Default for CacheManager {
    fn default() -> Self {
        Self::new(StrategyTable::builtin(), DEFAULT_CAPACITY)
    }
}
