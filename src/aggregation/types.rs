/// Composite result types produced by the match service
use crate::apis::livescore::{
    CommentaryEntry, Competition, Country, Federation, Fixture, Lineups, Match, MatchEvent,
    MatchStatistics, StandingEntry, Team, TopScorer,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ============================================================================
// QUERIES
// ============================================================================

/// Coarse match state derived from the upstream status string
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusFilter {
    InPlay,
    HalfTime,
    Finished,
    NotStarted,
}

impl StatusFilter {
    pub fn matches(&self, status: &str) -> bool {
        let status = status.trim().to_ascii_uppercase();
        match self {
            StatusFilter::InPlay => status == "IN PLAY" || status == "ADDED TIME",
            StatusFilter::HalfTime => status.contains("HALF TIME"),
            StatusFilter::Finished => status == "FINISHED",
            StatusFilter::NotStarted => status == "NOT STARTED",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().replace(['-', ' '], "_").as_str() {
            "in_play" | "live" => Some(StatusFilter::InPlay),
            "half_time" | "ht" => Some(StatusFilter::HalfTime),
            "finished" | "ft" => Some(StatusFilter::Finished),
            "not_started" | "scheduled" => Some(StatusFilter::NotStarted),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LiveQuery {
    pub competition_id: Option<String>,
    pub status: Option<StatusFilter>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct HistoryQuery {
    pub from: Option<String>,
    pub to: Option<String>,
    pub competition_id: Option<String>,
    pub team_id: Option<String>,
    pub page: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FixtureQuery {
    pub competition_id: Option<String>,
    pub team_id: Option<String>,
    pub date: Option<String>,
}

// ============================================================================
// COMPOSITES
// ============================================================================

/// A live match with its per-match sub-resources
///
/// A sub-resource that could not be fetched holds its default (empty list,
/// zeroed statistics, empty lineups).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EnrichedMatch {
    #[serde(rename = "match")]
    pub base: Match,
    pub events: Vec<MatchEvent>,
    pub statistics: MatchStatistics,
    pub lineups: Lineups,
    pub commentary: Vec<CommentaryEntry>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DataCompleteness {
    pub matches_with_scores: f64,
    pub matches_with_competition: f64,
    pub matches_with_country: f64,
    /// Share of requested top competitions whose standings came back
    pub standings_coverage: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Analytics {
    pub total_matches: usize,
    pub total_goals: u64,
    pub average_goals: f64,
    pub matches_per_competition: BTreeMap<String, usize>,
    pub matches_per_country: BTreeMap<String, usize>,
    pub status_distribution: BTreeMap<String, usize>,
    pub completeness: DataCompleteness,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReferenceData {
    pub countries: Vec<Country>,
    pub competitions: Vec<Competition>,
    pub federations: Vec<Federation>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompetitionMatches {
    pub competition_id: String,
    pub live: Vec<Match>,
    pub history: Vec<Match>,
    pub fixtures: Vec<Fixture>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompetitionTables {
    pub competition_id: String,
    /// `None` when the standings request failed
    pub standings: Option<Vec<StandingEntry>>,
    pub top_scorers: Vec<TopScorer>,
}

/// Output of a full extraction run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComprehensiveData {
    pub competition_ids: Vec<String>,
    pub reference: ReferenceData,
    pub matches: Vec<CompetitionMatches>,
    pub teams: Vec<Team>,
    pub tables: Vec<CompetitionTables>,
    pub analytics: Analytics,
    pub generated_at: chrono::DateTime<chrono::Utc>,
}
