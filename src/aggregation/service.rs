/// Match service: composite reads over the live-score client
///
/// Single-resource reads propagate `ApiError` unchanged. Fan-out reads never
/// fail because of one sub-request: the failed piece is replaced by its
/// default and a warning is logged.
use super::analytics::compute_analytics;
use super::priority::{priority_list, sort_by_priority};
use super::types::{
    CompetitionMatches, CompetitionTables, ComprehensiveData, EnrichedMatch, FixtureQuery,
    HistoryQuery, LiveQuery, ReferenceData,
};
use crate::apis::livescore::{Fixture, LiveScoreClient, Match, StandingEntry, Team, TopScorer};
use crate::apis::logos::LogoClient;
use crate::cache::{category, CacheManager, Clock, SystemClock};
use crate::config::AggregationConfig;
use crate::errors::{ApiError, ApiResult};
use crate::logger::{self, LogTag};
use chrono::Datelike;
use futures::future::join_all;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Instant;
use url::form_urlencoded;

const MAXIMUM_DATA_KEY: &str = "maximum_data";
const MATCH_COMPREHENSIVE_KEY: &str = "match/comprehensive";

pub struct MatchService {
    client: Arc<LiveScoreClient>,
    logos: Option<Arc<LogoClient>>,
    config: AggregationConfig,
    clock: Arc<dyn Clock>,
}

/// Default value for a failed fan-out leaf
fn degrade<T: Default>(what: &str, id: &str, result: ApiResult<T>) -> T {
    result.unwrap_or_else(|e| {
        logger::warning(
            LogTag::Aggregator,
            &format!("{} for {} unavailable, using default: {}", what, id, e),
        );
        T::default()
    })
}

impl MatchService {
    pub fn new(
        client: Arc<LiveScoreClient>,
        logos: Option<Arc<LogoClient>>,
        config: AggregationConfig,
    ) -> Self {
        Self::with_clock(client, logos, config, Arc::new(SystemClock))
    }

    pub fn with_clock(
        client: Arc<LiveScoreClient>,
        logos: Option<Arc<LogoClient>>,
        config: AggregationConfig,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            client,
            logos,
            config,
            clock,
        }
    }

    pub fn client(&self) -> &Arc<LiveScoreClient> {
        &self.client
    }

    pub fn cache(&self) -> &Arc<CacheManager> {
        self.client.cache()
    }

    // ========================================================================
    // LIVE MATCHES
    // ========================================================================

    /// Live matches filtered by status and ordered by today's competition priority
    pub async fn live_matches(&self, query: &LiveQuery) -> ApiResult<Vec<Match>> {
        let mut matches = self
            .client
            .live_scores(query.competition_id.as_deref())
            .await?;

        if let Some(status) = query.status {
            matches.retain(|m| status.matches(&m.status));
        }

        let today = self.clock.now().weekday();
        sort_by_priority(&mut matches, priority_list(&self.config, today));
        self.decorate_logos(&mut matches).await;

        Ok(matches)
    }

    /// Live matches, each with events, statistics, lineups and commentary
    ///
    /// Output is positionally aligned with `live_matches` for the same query.
    pub async fn enriched_live_matches(&self, query: &LiveQuery) -> ApiResult<Vec<EnrichedMatch>> {
        let matches = self.live_matches(query).await?;
        let started = Instant::now();
        let count = matches.len();

        let enriched = join_all(matches.into_iter().map(|m| self.enrich(m))).await;

        logger::debug(
            LogTag::Aggregator,
            &format!(
                "Enriched {} live matches in {}ms",
                count,
                started.elapsed().as_millis()
            ),
        );
        Ok(enriched)
    }

    /// One live match with all sub-resources
    ///
    /// The ID must be present in the current live snapshot. The assembled
    /// result is cached as one unit under `comprehensive`, so a repeat read
    /// never mixes sub-resources of different ages.
    pub async fn match_comprehensive(&self, match_id: &str) -> ApiResult<EnrichedMatch> {
        let snapshot = self.client.live_scores(None).await?;
        let mut found = snapshot
            .into_iter()
            .find(|m| m.id == match_id)
            .ok_or_else(|| ApiError::not_found("Match", match_id))?;

        let key = CacheManager::generate_key(MATCH_COMPREHENSIVE_KEY, [("id", match_id)]);
        if let Some(cached) = self.cache().get::<EnrichedMatch>(&key, category::COMPREHENSIVE) {
            logger::debug(LogTag::Aggregator, &format!("Serving {} from cache", key));
            return Ok(cached);
        }

        self.decorate_logos(std::slice::from_mut(&mut found)).await;
        let enriched = self.enrich(found).await;

        if let Err(e) = self.cache().set(&key, &enriched, category::COMPREHENSIVE) {
            logger::warning(
                LogTag::Aggregator,
                &format!("Failed to cache {}: {}", key, e),
            );
        }
        Ok(enriched)
    }

    /// Live matches involving a team from the current snapshot
    pub async fn team_matches(&self, team_id: &str) -> ApiResult<Vec<Match>> {
        let snapshot = self.client.live_scores(None).await?;
        let matches: Vec<Match> = snapshot
            .into_iter()
            .filter(|m| m.involves_team(team_id))
            .collect();

        if matches.is_empty() {
            return Err(ApiError::not_found("Team", team_id));
        }
        Ok(matches)
    }

    async fn enrich(&self, base: Match) -> EnrichedMatch {
        let id = base.id.as_str();
        let (events, statistics, lineups, commentary) = tokio::join!(
            self.client.match_events(id),
            self.client.match_statistics(id),
            self.client.match_lineups(id),
            self.client.match_commentary(id),
        );

        EnrichedMatch {
            events: degrade("Events", id, events),
            statistics: degrade("Statistics", id, statistics),
            lineups: degrade("Lineups", id, lineups),
            commentary: degrade("Commentary", id, commentary),
            base,
        }
    }

    /// Fill missing team logos from the badge service
    async fn decorate_logos(&self, matches: &mut [Match]) {
        let logos = match &self.logos {
            Some(logos) => logos,
            None => return,
        };

        let names: Vec<String> = matches
            .iter()
            .flat_map(|m| [&m.home, &m.away])
            .filter(|team| team.logo.is_none())
            .map(|team| team.name.clone())
            .collect();
        if names.is_empty() {
            return;
        }

        let mut badges = logos.team_badges(&names).await.into_iter();
        for team in matches
            .iter_mut()
            .flat_map(|m| [&mut m.home, &mut m.away])
            .filter(|team| team.logo.is_none())
        {
            team.logo = badges.next();
        }
    }

    // ========================================================================
    // SINGLE-RESOURCE PASSTHROUGHS
    // ========================================================================

    pub async fn history(&self, query: &HistoryQuery) -> ApiResult<Vec<Match>> {
        self.client
            .history(
                query.from.as_deref(),
                query.to.as_deref(),
                query.competition_id.as_deref(),
                query.team_id.as_deref(),
                query.page,
            )
            .await
    }

    pub async fn fixtures(&self, query: &FixtureQuery) -> ApiResult<Vec<Fixture>> {
        self.client
            .fixtures(
                query.competition_id.as_deref(),
                query.team_id.as_deref(),
                query.date.as_deref(),
            )
            .await
    }

    pub async fn standings(&self, competition_id: &str) -> ApiResult<Vec<StandingEntry>> {
        self.client.standings(competition_id).await
    }

    pub async fn top_scorers(&self, competition_id: &str) -> ApiResult<Vec<TopScorer>> {
        self.client.top_scorers(competition_id).await
    }

    pub async fn teams(&self, country_id: Option<&str>) -> ApiResult<Vec<Team>> {
        self.client.teams(country_id).await
    }

    // ========================================================================
    // MAXIMUM DATA EXTRACTION
    // ========================================================================

    /// Phased extraction across competitions, cached as one composite
    ///
    /// An empty `competition_ids` means today's priority list. Always
    /// completes; failed sub-calls show up as empty collections and in the
    /// completeness figures.
    pub async fn maximum_data(&self, competition_ids: &[String]) -> ComprehensiveData {
        let ids: Vec<String> = if competition_ids.is_empty() {
            priority_list(&self.config, self.clock.now().weekday()).to_vec()
        } else {
            competition_ids.to_vec()
        };

        let key = extraction_key(&ids);
        if let Some(cached) = self.cache().get::<ComprehensiveData>(&key, category::COMPREHENSIVE) {
            logger::debug(LogTag::Aggregator, &format!("Serving {} from cache", key));
            return cached;
        }

        let started = Instant::now();

        // Phase 1: reference data
        let reference = self.fetch_reference_data().await;
        logger::info(
            LogTag::Aggregator,
            &format!(
                "Phase 1: {} countries, {} competitions, {} federations",
                reference.countries.len(),
                reference.competitions.len(),
                reference.federations.len()
            ),
        );

        // Phase 2: match data per competition
        let matches = join_all(ids.iter().map(|id| self.fetch_competition_matches(id))).await;
        logger::info(
            LogTag::Aggregator,
            &format!(
                "Phase 2: {} live, {} finished, {} scheduled across {} competitions",
                matches.iter().map(|c| c.live.len()).sum::<usize>(),
                matches.iter().map(|c| c.history.len()).sum::<usize>(),
                matches.iter().map(|c| c.fixtures.len()).sum::<usize>(),
                matches.len()
            ),
        );

        // Phase 3: teams seen in match data
        let teams = derive_teams(&matches);
        logger::info(LogTag::Aggregator, &format!("Phase 3: {} teams", teams.len()));

        // Phase 4: tables for the top N competitions
        let top_n = self.config.top_n_competitions.min(ids.len());
        let tables = join_all(ids[..top_n].iter().map(|id| self.fetch_tables(id))).await;
        logger::info(
            LogTag::Aggregator,
            &format!(
                "Phase 4: standings for {}/{} competitions",
                tables.iter().filter(|t| t.standings.is_some()).count(),
                tables.len()
            ),
        );

        // Phase 5: analytics
        let analytics = compute_analytics(&matches, &tables);

        let data = ComprehensiveData {
            competition_ids: ids,
            reference,
            matches,
            teams,
            tables,
            analytics,
            generated_at: self.clock.now(),
        };

        if let Err(e) = self.cache().set(&key, &data, category::COMPREHENSIVE) {
            logger::warning(
                LogTag::Aggregator,
                &format!("Failed to cache extraction {}: {}", key, e),
            );
        }

        logger::info(
            LogTag::Aggregator,
            &format!(
                "Extraction complete: {} matches, {} goals in {}ms",
                data.analytics.total_matches,
                data.analytics.total_goals,
                started.elapsed().as_millis()
            ),
        );
        data
    }

    async fn fetch_reference_data(&self) -> ReferenceData {
        let (countries, competitions, federations) = tokio::join!(
            self.client.countries(),
            self.client.competitions(None),
            self.client.federations(),
        );

        ReferenceData {
            countries: degrade("Countries", "reference data", countries),
            competitions: degrade("Competitions", "reference data", competitions),
            federations: degrade("Federations", "reference data", federations),
        }
    }

    async fn fetch_competition_matches(&self, competition_id: &str) -> CompetitionMatches {
        let id = Some(competition_id);
        let (live, history, fixtures) = tokio::join!(
            self.client.live_scores(id),
            self.client.history(None, None, id, None, None),
            self.client.fixtures(id, None, None),
        );

        CompetitionMatches {
            competition_id: competition_id.to_string(),
            live: degrade("Live matches", competition_id, live),
            history: degrade("History", competition_id, history),
            fixtures: degrade("Fixtures", competition_id, fixtures),
        }
    }

    async fn fetch_tables(&self, competition_id: &str) -> CompetitionTables {
        let (standings, top_scorers) = tokio::join!(
            self.client.standings(competition_id),
            self.client.top_scorers(competition_id),
        );

        let standings = match standings {
            Ok(table) => Some(table),
            Err(e) => {
                logger::warning(
                    LogTag::Aggregator,
                    &format!("Standings for {} unavailable: {}", competition_id, e),
                );
                None
            }
        };

        CompetitionTables {
            competition_id: competition_id.to_string(),
            standings,
            top_scorers: degrade("Top scorers", competition_id, top_scorers),
        }
    }
}

/// Cache signature of an extraction: one indexed, encoded parameter per ID
fn extraction_key(ids: &[String]) -> String {
    let params: Vec<(String, String)> = ids
        .iter()
        .enumerate()
        .map(|(i, id)| {
            (
                format!("c{}", i),
                form_urlencoded::byte_serialize(id.as_bytes()).collect(),
            )
        })
        .collect();
    CacheManager::generate_key(MAXIMUM_DATA_KEY, params)
}

/// Distinct teams from matches and fixtures, first-seen order
fn derive_teams(matches: &[CompetitionMatches]) -> Vec<Team> {
    let mut seen = HashSet::new();
    let mut teams = Vec::new();

    for competition in matches {
        for m in competition.live.iter().chain(competition.history.iter()) {
            for side in [&m.home, &m.away] {
                if !side.id.is_empty() && seen.insert(side.id.clone()) {
                    teams.push(Team::from(side));
                }
            }
        }
        for f in &competition.fixtures {
            for (id, name) in [(&f.home_id, &f.home_name), (&f.away_id, &f.away_name)] {
                if !id.is_empty() && seen.insert(id.clone()) {
                    teams.push(Team {
                        id: id.clone(),
                        name: name.clone(),
                        ..Team::default()
                    });
                }
            }
        }
    }

    teams
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregation::types::StatusFilter;
    use crate::apis::livescore::StatPair;
    use crate::apis::mock::{ok, MockReply, MockTransport};
    use crate::cache::{ManualClock, StrategyTable};
    use crate::config::{ApiConfig, LogoConfig};
    use chrono::{TimeZone, Utc};
    use serde_json::{json, Value};

    fn team(id: u32, name: &str) -> Value {
        json!({"id": id, "name": name})
    }

    fn live_payload() -> Value {
        json!({"match": [
            {"id": 1001, "home": team(19, "Arsenal"), "away": team(7, "Chelsea"),
             "competition": {"id": 999, "name": "Friendly"}, "country": {"id": 1, "name": "England"},
             "scores": {"score": "1 - 0"}, "status": "IN PLAY", "time": "34"},
            {"id": 1002, "home": team(45, "Lazio"), "away": team(46, "Roma"),
             "competition": {"id": 152, "name": "Serie A"}, "country": {"id": 2, "name": "Italy"},
             "scores": {"score": "0 - 0"}, "status": "HALF TIME BREAK", "time": "HT"},
            {"id": 1003, "home": team(80, "Ajax"), "away": team(81, "PSV"),
             "competition": {"id": 3, "name": "Champions League"}, "country": null,
             "scores": {"score": "2 - 2"}, "status": "IN PLAY", "time": "71"}
        ]})
    }

    fn detail_routes(transport: MockTransport) -> MockTransport {
        transport
            .route("scores/events", ok(json!({"event": [
                {"id": 1, "match_id": 1001, "player": "Saka", "time": "12", "event": "GOAL", "home_away": "h"}
            ]})))
            .route("matches/stats", ok(json!({"possesion": "60:40", "corners": "5:2"})))
            .route("matches/lineups", ok(json!({"lineup": {"home": {"formation": "4-3-3", "players": [{"name": "Raya"}]}}})))
            .route("matches/commentary", ok(json!({"commentary": [{"minute": 12, "text": "Goal!"}]})))
    }

    /// Wednesday 2024-05-01
    fn midweek_clock() -> Arc<ManualClock> {
        Arc::new(ManualClock::new(Utc.with_ymd_and_hms(2024, 5, 1, 20, 0, 0).unwrap()))
    }

    fn service(transport: Arc<MockTransport>) -> MatchService {
        let clock = midweek_clock();
        let cache = Arc::new(CacheManager::with_clock(
            StrategyTable::builtin(),
            500,
            clock.clone(),
        ));
        let api = ApiConfig {
            api_key: "k".to_string(),
            api_secret: "s".to_string(),
            ..ApiConfig::default()
        };
        let client = Arc::new(LiveScoreClient::new(&api, transport, cache, 100));
        MatchService::with_clock(client, None, AggregationConfig::default(), clock)
    }

    #[tokio::test]
    async fn test_live_matches_follow_midweek_priority() {
        let transport = Arc::new(MockTransport::new().route("scores/live", ok(live_payload())));
        let svc = service(transport);

        let matches = svc.live_matches(&LiveQuery::default()).await.unwrap();
        let order: Vec<&str> = matches.iter().map(|m| m.id.as_str()).collect();
        // midweek list starts with 3, then 4, 683, 152
        assert_eq!(order, vec!["1003", "1002", "1001"]);
    }

    #[tokio::test]
    async fn test_status_filter_applies() {
        let transport = Arc::new(MockTransport::new().route("scores/live", ok(live_payload())));
        let svc = service(transport);

        let query = LiveQuery {
            competition_id: None,
            status: Some(StatusFilter::HalfTime),
        };
        let matches = svc.live_matches(&query).await.unwrap();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].id, "1002");
    }

    #[tokio::test]
    async fn test_fan_out_degrades_single_failure() {
        let transport = MockTransport::new()
            .route("scores/live", ok(live_payload()))
            .route("match_id=1002", MockReply::Fail("connection reset".to_string()));
        let transport = Arc::new(detail_routes(transport));
        let svc = service(transport);

        let enriched = svc.enriched_live_matches(&LiveQuery::default()).await.unwrap();
        assert_eq!(enriched.len(), 3);

        let failed = enriched.iter().find(|e| e.base.id == "1002").unwrap();
        assert_eq!(failed.statistics, Default::default());
        assert!(failed.lineups.is_empty());
        assert!(failed.commentary.is_empty());
        // events are keyed by `id`, not `match_id`
        assert_eq!(failed.events.len(), 1);

        let healthy = enriched.iter().find(|e| e.base.id == "1001").unwrap();
        assert_eq!(healthy.statistics.possession, StatPair { home: 60, away: 40 });
        assert_eq!(healthy.lineups.home.formation.as_deref(), Some("4-3-3"));
        assert_eq!(healthy.commentary[0].text, "Goal!");
    }

    #[tokio::test]
    async fn test_enrichment_is_cached_per_sub_resource() {
        let transport = Arc::new(detail_routes(
            MockTransport::new().route("scores/live", ok(live_payload())),
        ));
        let svc = service(transport.clone());

        let first = svc.enriched_live_matches(&LiveQuery::default()).await.unwrap();
        // 1 live + 3 matches x 4 sub-resources
        assert_eq!(transport.calls(), 13);

        let second = svc.enriched_live_matches(&LiveQuery::default()).await.unwrap();
        assert_eq!(transport.calls(), 13);
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_unknown_match_is_not_found() {
        let transport = Arc::new(detail_routes(
            MockTransport::new().route("scores/live", ok(live_payload())),
        ));
        let svc = service(transport);

        let err = svc.match_comprehensive("424242").await.unwrap_err();
        assert_eq!(err, ApiError::not_found("Match", "424242"));
        assert!(err.to_string().contains("424242"));

        let found = svc.match_comprehensive("1001").await.unwrap();
        assert_eq!(found.base.home.name, "Arsenal");
        assert_eq!(found.events.len(), 1);
    }

    #[tokio::test]
    async fn test_comprehensive_match_is_cached_as_one_unit() {
        let transport = Arc::new(detail_routes(
            MockTransport::new().route("scores/live", ok(live_payload())),
        ));
        let svc = service(transport.clone());

        let first = svc.match_comprehensive("1001").await.unwrap();
        // 1 live + 4 sub-resources
        assert_eq!(transport.calls(), 5);
        assert_eq!(
            svc.cache().stats().entries_per_category.get(category::COMPREHENSIVE),
            Some(&1)
        );

        for sub in [category::EVENTS, category::STATISTICS, category::LINEUPS, category::COMMENTARY] {
            svc.cache().invalidate_category(sub);
        }
        let second = svc.match_comprehensive("1001").await.unwrap();
        assert_eq!(transport.calls(), 5);
        assert_eq!(second, first);
    }

    #[tokio::test]
    async fn test_comprehensive_match_fills_logos() {
        let badge = json!({"teams": [{"strBadge": "https://img/arsenal.png"}]}).to_string();
        let transport = Arc::new(detail_routes(
            MockTransport::new()
                .route("scores/live", ok(live_payload()))
                .route("searchteams.php?t=Arsenal", MockReply::Body(200, badge))
                .route("searchteams.php", MockReply::Fail("connection reset".to_string())),
        ));
        let clock = midweek_clock();
        let cache = Arc::new(CacheManager::with_clock(StrategyTable::builtin(), 500, clock.clone()));
        let api = ApiConfig {
            api_key: "k".to_string(),
            api_secret: "s".to_string(),
            ..ApiConfig::default()
        };
        let client = Arc::new(LiveScoreClient::new(&api, transport.clone(), cache.clone(), 100));
        let logos = Arc::new(LogoClient::new(LogoConfig::default(), transport.clone(), cache));
        let svc = MatchService::with_clock(client, Some(logos), AggregationConfig::default(), clock);

        let found = svc.match_comprehensive("1001").await.unwrap();
        assert_eq!(found.base.home.logo.as_deref(), Some("https://img/arsenal.png"));
        assert_eq!(found.base.away.logo.as_deref(), Some("/images/no-logo.png"));
        assert_eq!(transport.calls_matching("searchteams.php"), 2);
    }

    #[tokio::test]
    async fn test_teams_passthrough() {
        let transport = Arc::new(
            MockTransport::new().route("teams/list", ok(json!({"teams": [{"id": 19, "name": "Arsenal"}]}))),
        );
        let svc = service(transport.clone());

        let teams = svc.teams(None).await.unwrap();
        assert_eq!(teams[0].name, "Arsenal");
        assert!(!transport.requested_urls()[0].contains("country_id"));
    }

    #[tokio::test]
    async fn test_team_matches() {
        let transport = Arc::new(MockTransport::new().route("scores/live", ok(live_payload())));
        let svc = service(transport);

        let matches = svc.team_matches("46").await.unwrap();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].id, "1002");

        assert_eq!(
            svc.team_matches("1").await.unwrap_err(),
            ApiError::not_found("Team", "1")
        );
    }

    #[tokio::test]
    async fn test_upstream_failure_propagates_for_single_reads() {
        let transport = Arc::new(MockTransport::new().route(
            "scores/live",
            MockReply::Body(200, json!({"success": false, "error": "Plan expired"}).to_string()),
        ));
        let svc = service(transport);

        let err = svc.live_matches(&LiveQuery::default()).await.unwrap_err();
        assert!(matches!(err, ApiError::Upstream { ref message, .. } if message == "Plan expired"));
    }

    fn extraction_transport() -> Arc<MockTransport> {
        Arc::new(
            MockTransport::new()
                .route("countries/list", ok(json!({"country": [{"id": 1, "name": "England"}]})))
                .route("competitions/list", ok(json!({"competition": [{"id": 152, "name": "Serie A"}]})))
                .route("federations/list", MockReply::Fail("timeout".to_string()))
                .route("scores/live.json?key=k&secret=s&competition_id=152", ok(json!({"match": [
                    {"id": 1002, "home": team(45, "Lazio"), "away": team(46, "Roma"),
                     "competition": {"id": 152, "name": "Serie A"}, "country": {"id": 2, "name": "Italy"},
                     "scores": {"score": "3 - 1"}, "status": "IN PLAY"}
                ]})))
                .route("scores/live", ok(json!({"match": []})))
                .route("scores/history", ok(json!({"match": [
                    {"id": 900, "home": team(46, "Roma"), "away": team(47, "Milan"),
                     "competition": {"id": 152, "name": "Serie A"},
                     "scores": {"score": "1 - 1"}, "status": "FINISHED"}
                ]})))
                .route("fixtures/matches", ok(json!({"fixtures": [
                    {"id": 5, "home_id": 48, "home_name": "Inter", "away_id": 45, "away_name": "Lazio"}
                ]})))
                .route("competitions/standings.json?key=k&secret=s&competition_id=302", MockReply::Fail("boom".to_string()))
                .route("competitions/standings", ok(json!({"table": [{"rank": 1, "team_id": 48, "name": "Inter", "points": 80}]})))
                .route("competitions/topscorers", ok(json!({"topscorers": []}))),
        )
    }

    #[tokio::test]
    async fn test_maximum_data_completes_with_partial_failures() {
        let transport = extraction_transport();
        let svc = service(transport.clone());
        let ids = vec!["152".to_string(), "302".to_string()];

        let data = svc.maximum_data(&ids).await;

        assert_eq!(data.reference.countries.len(), 1);
        assert!(data.reference.federations.is_empty());
        assert_eq!(data.matches.len(), 2);
        assert_eq!(data.matches[0].live.len(), 1);
        assert!(data.matches[1].live.is_empty());

        // Lazio, Roma, Milan from matches, Inter from fixtures
        let team_ids: Vec<&str> = data.teams.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(team_ids, vec!["45", "46", "47", "48"]);

        assert_eq!(data.tables.len(), 2);
        assert!(data.tables[0].standings.is_some());
        assert!(data.tables[1].standings.is_none());
        assert_eq!(data.analytics.completeness.standings_coverage, 0.5);

        // match 1002 once, match 900 once (history repeated per competition)
        assert_eq!(data.analytics.total_matches, 2);
        assert_eq!(data.analytics.total_goals, 6);

        let calls = transport.calls();
        let again = svc.maximum_data(&ids).await;
        assert_eq!(transport.calls(), calls);
        assert_eq!(again, data);
        assert_eq!(
            svc.cache().stats().entries_per_category.get(category::COMPREHENSIVE),
            Some(&1)
        );
    }

    #[test]
    fn test_extraction_key_keeps_id_lists_distinct() {
        let ids = |list: &[&str]| list.iter().map(|s| s.to_string()).collect::<Vec<_>>();

        assert_ne!(extraction_key(&ids(&["1,2"])), extraction_key(&ids(&["1", "2"])));
        assert_ne!(extraction_key(&ids(&["1&c1=2"])), extraction_key(&ids(&["1", "2"])));
        assert_ne!(extraction_key(&ids(&["152", "3"])), extraction_key(&ids(&["3", "152"])));
        assert_eq!(extraction_key(&ids(&["152", "3"])), extraction_key(&ids(&["152", "3"])));
    }

    #[tokio::test]
    async fn test_maximum_data_limits_tables_to_top_n() {
        let transport = extraction_transport();
        let clock = midweek_clock();
        let cache = Arc::new(CacheManager::with_clock(StrategyTable::builtin(), 500, clock.clone()));
        let api = ApiConfig {
            api_key: "k".to_string(),
            api_secret: "s".to_string(),
            ..ApiConfig::default()
        };
        let client = Arc::new(LiveScoreClient::new(&api, transport.clone(), cache, 100));
        let config = AggregationConfig {
            top_n_competitions: 1,
            ..AggregationConfig::default()
        };
        let svc = MatchService::with_clock(client, None, config, clock);

        let data = svc
            .maximum_data(&["152".to_string(), "302".to_string(), "3".to_string()])
            .await;
        assert_eq!(data.tables.len(), 1);
        assert_eq!(transport.calls_matching("competitions/standings"), 1);
    }
}
