/// Cache strategy per data category
///
/// TTLs follow how fast each kind of data changes upstream:
/// - Live scores, events, commentary: 30s
/// - Statistics: 1min, lineups: 5min
/// - Fixtures, standings: 10min, history and top scorers: 30min
/// - Teams: 1h, geography (countries/competitions/federations) and logos: 24h
use std::collections::HashMap;
use std::time::Duration;

/// Category names used by the API client and aggregators
pub mod category {
    pub const LIVE: &str = "live";
    pub const EVENTS: &str = "events";
    pub const STATISTICS: &str = "statistics";
    pub const LINEUPS: &str = "lineups";
    pub const COMMENTARY: &str = "commentary";
    pub const HISTORY: &str = "history";
    pub const FIXTURES: &str = "fixtures";
    pub const TEAMS: &str = "teams";
    pub const STANDINGS: &str = "standings";
    pub const TOP_SCORERS: &str = "topscorers";
    pub const GEOGRAPHY: &str = "geography";
    pub const LOGOS: &str = "logos";
    pub const COMPREHENSIVE: &str = "comprehensive";
}

pub const DEFAULT_TTL_MS: u64 = 300_000;
pub const DEFAULT_MAX_ENTRIES: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheStrategy {
    pub category: String,
    pub ttl: Duration,
    /// Per-category bound; oldest entries of the category are evicted past it
    pub max_entries: usize,
}

impl CacheStrategy {
    pub fn new(category: &str, ttl_ms: u64, max_entries: usize) -> Self {
        Self {
            category: category.to_string(),
            ttl: Duration::from_millis(ttl_ms),
            max_entries,
        }
    }

    pub fn ttl_millis(&self) -> u64 {
        self.ttl.as_millis() as u64
    }
}

/// Immutable table of strategies keyed by category name
#[derive(Debug, Clone)]
pub struct StrategyTable {
    strategies: HashMap<String, CacheStrategy>,
    fallback: CacheStrategy,
}

impl StrategyTable {
    /// Built-in strategies for every category the client uses
    pub fn builtin() -> Self {
        let strategies = [
            CacheStrategy::new(category::LIVE, 30_000, 50),
            CacheStrategy::new(category::EVENTS, 30_000, 200),
            CacheStrategy::new(category::STATISTICS, 60_000, 200),
            CacheStrategy::new(category::LINEUPS, 300_000, 200),
            CacheStrategy::new(category::COMMENTARY, 30_000, 200),
            CacheStrategy::new(category::HISTORY, 1_800_000, 100),
            CacheStrategy::new(category::FIXTURES, 600_000, 100),
            CacheStrategy::new(category::TEAMS, 3_600_000, 100),
            CacheStrategy::new(category::STANDINGS, 600_000, 50),
            CacheStrategy::new(category::TOP_SCORERS, 1_800_000, 50),
            CacheStrategy::new(category::GEOGRAPHY, 86_400_000, 50),
            CacheStrategy::new(category::LOGOS, 86_400_000, 500),
            CacheStrategy::new(category::COMPREHENSIVE, 120_000, 20),
        ]
        .into_iter()
        .map(|s| (s.category.clone(), s))
        .collect();

        Self {
            strategies,
            fallback: CacheStrategy::new("default", DEFAULT_TTL_MS, DEFAULT_MAX_ENTRIES),
        }
    }

    /// Built-in table with TTLs replaced from configuration (category -> ms)
    ///
    /// Overrides for unknown categories register a new strategy with the
    /// default capacity.
    pub fn with_overrides<'a, I>(overrides: I) -> Self
    where
        I: IntoIterator<Item = (&'a String, &'a u64)>,
    {
        let mut table = Self::builtin();
        for (name, ttl_ms) in overrides {
            let max_entries = table
                .strategies
                .get(name)
                .map(|s| s.max_entries)
                .unwrap_or(DEFAULT_MAX_ENTRIES);
            table
                .strategies
                .insert(name.clone(), CacheStrategy::new(name, *ttl_ms, max_entries));
        }
        table
    }

    /// Strategy for a category, or the default one when unregistered
    pub fn get(&self, category: &str) -> &CacheStrategy {
        self.strategies.get(category).unwrap_or(&self.fallback)
    }

    pub fn is_registered(&self, category: &str) -> bool {
        self.strategies.contains_key(category)
    }
}

impl Default for StrategyTable {
    fn default() -> Self {
        Self::builtin()
    }
}
