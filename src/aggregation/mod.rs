//! Composite reads: live match enrichment, lookups and full extraction

pub mod analytics;
pub mod priority;
pub mod service;
pub mod types;

pub use analytics::compute_analytics;
pub use priority::{is_midweek, priority_list, sort_by_priority};
pub use service::MatchService;
pub use types::{
    Analytics, CompetitionMatches, CompetitionTables, ComprehensiveData, DataCompleteness,
    EnrichedMatch, FixtureQuery, HistoryQuery, LiveQuery, ReferenceData, StatusFilter,
};
