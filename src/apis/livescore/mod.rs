/// Live-score API client
///
/// Every call goes through `request`, which checks the shared cache first and
/// only reaches upstream on a miss. Successful payloads are stored under the
/// category the caller names, so TTL and capacity follow the data kind.
///
/// Endpoints implemented:
/// 1. scores/live - Live matches
/// 2. scores/events - Events of one match
/// 3. matches/stats, matches/lineups, matches/commentary - Per-match detail
/// 4. scores/history - Finished matches
/// 5. fixtures/matches - Scheduled matches
/// 6. competitions/standings, competitions/topscorers - Tables
/// 7. teams/list, countries/list, competitions/list, federations/list - Reference data
pub mod types;

pub use self::types::{
    CommentaryEntry, Competition, CompetitionRef, Country, CountryRef, Envelope, Federation,
    Fixture, LineupPlayer, LineupSide, Lineups, Match, MatchEvent, MatchStatistics, PlayerRef,
    Scores, StandingEntry, StatPair, Team, TeamRef, TopScorer,
};

use self::types::{
    CommentaryPayload, CompetitionsPayload, CountriesPayload, EventsPayload, FederationsPayload,
    FixturesPayload, LineupsPayload, MatchListPayload, StandingsPayload, TeamsPayload,
    TopScorersPayload,
};
use crate::apis::client::{HttpTransport, RateLimiter, TransportResponse};
use crate::apis::params::Params;
use crate::apis::stats::{PerformanceStats, PerformanceTracker};
use crate::cache::{category, CacheManager};
use crate::config::ApiConfig;
use crate::errors::{ApiError, ApiResult};
use crate::logger::{self, LogTag};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use std::time::{Duration, Instant};
use url::Url;

// ============================================================================
// ENDPOINTS
// ============================================================================

pub mod endpoint {
    pub const LIVE: &str = "scores/live";
    pub const EVENTS: &str = "scores/events";
    pub const STATISTICS: &str = "matches/stats";
    pub const LINEUPS: &str = "matches/lineups";
    pub const COMMENTARY: &str = "matches/commentary";
    pub const HISTORY: &str = "scores/history";
    pub const FIXTURES: &str = "fixtures/matches";
    pub const STANDINGS: &str = "competitions/standings";
    pub const TOP_SCORERS: &str = "competitions/topscorers";
    pub const TEAMS: &str = "teams/list";
    pub const COUNTRIES: &str = "countries/list";
    pub const COMPETITIONS: &str = "competitions/list";
    pub const FEDERATIONS: &str = "federations/list";
}

// ============================================================================
// CLIENT IMPLEMENTATION
// ============================================================================

pub struct LiveScoreClient {
    transport: Arc<dyn HttpTransport>,
    cache: Arc<CacheManager>,
    stats: PerformanceTracker,
    rate_limiter: Option<RateLimiter>,
    base_url: String,
    api_key: String,
    api_secret: String,
    timeout: Duration,
}

impl LiveScoreClient {
    pub fn new(
        config: &ApiConfig,
        transport: Arc<dyn HttpTransport>,
        cache: Arc<CacheManager>,
        performance_samples: usize,
    ) -> Self {
        let rate_limiter = if config.rate_limit_per_minute > 0 {
            Some(RateLimiter::new(config.rate_limit_per_minute as usize))
        } else {
            None
        };

        Self {
            transport,
            cache,
            stats: PerformanceTracker::new(performance_samples),
            rate_limiter,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            api_secret: config.api_secret.clone(),
            timeout: Duration::from_millis(config.timeout_ms),
        }
    }

    pub fn cache(&self) -> &Arc<CacheManager> {
        &self.cache
    }

    pub fn performance_stats(&self) -> PerformanceStats {
        self.stats.stats()
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Cached request against one endpoint
    ///
    /// A hit returns without touching the network. On a miss the payload is
    /// fetched, decoded into `T` and only then written to the cache.
    pub async fn request<T>(&self, endpoint: &str, params: &Params, category: &str) -> ApiResult<T>
    where
        T: DeserializeOwned,
    {
        let key = CacheManager::generate_key(endpoint, params.present());
        let lookup_start = Instant::now();

        if let Some(cached) = self.cache.get::<T>(&key, category) {
            self.stats
                .record(endpoint, elapsed_ms(lookup_start), true, true);
            logger::debug(LogTag::Api, &format!("Cache hit for {}", key));
            return Ok(cached);
        }

        let start = Instant::now();
        let result = self.fetch_data(endpoint, &key, params).await;
        let elapsed = elapsed_ms(start);

        let data = match result {
            Ok(data) => data,
            Err(err) => {
                self.stats.record(endpoint, elapsed, false, false);
                logger::warning(LogTag::Api, &format!("{} failed: {}", endpoint, err));
                return Err(err);
            }
        };

        let value: T = match serde_json::from_value(data.clone()) {
            Ok(value) => value,
            Err(err) => {
                self.stats.record(endpoint, elapsed, false, false);
                return Err(ApiError::Parse {
                    endpoint: endpoint.to_string(),
                    message: err.to_string(),
                });
            }
        };

        self.stats.record(endpoint, elapsed, true, false);
        if let Err(err) = self.cache.set(&key, &data, category) {
            logger::warning(
                LogTag::Cache,
                &format!("Failed to store {} under {}: {}", key, category, err),
            );
        }

        logger::debug(
            LogTag::Api,
            &format!("Fetched {} in {:.0}ms (category={})", key, elapsed, category),
        );
        Ok(value)
    }

    /// Build the outbound URL: auth first, then caller params in order
    fn build_url(&self, endpoint: &str, params: &Params) -> ApiResult<Url> {
        let raw = format!("{}/{}.json", self.base_url, endpoint);
        let mut url = Url::parse(&raw)
            .map_err(|e| ApiError::InvalidRequest(format!("Bad URL '{}': {}", raw, e)))?;

        {
            let mut query = url.query_pairs_mut();
            query.append_pair("key", &self.api_key);
            query.append_pair("secret", &self.api_secret);
            for (name, value) in params.present() {
                query.append_pair(name, value);
            }
        }

        Ok(url)
    }

    /// Rate-limit wait and transport call share one deadline
    async fn execute_request(&self, endpoint: &str, url: &Url) -> ApiResult<TransportResponse> {
        let attempt = async {
            if let Some(limiter) = &self.rate_limiter {
                limiter.acquire().await;
            }
            self.transport.get(url).await
        };

        match tokio::time::timeout(self.timeout, attempt).await {
            Ok(Ok(response)) => Ok(response),
            Ok(Err(message)) => Err(ApiError::Transport {
                endpoint: endpoint.to_string(),
                message,
            }),
            Err(_) => Err(ApiError::Timeout {
                endpoint: endpoint.to_string(),
                timeout_ms: self.timeout.as_millis() as u64,
            }),
        }
    }

    /// Fetch and unwrap the envelope, returning its `data` member
    async fn fetch_data(&self, endpoint: &str, key: &str, params: &Params) -> ApiResult<Value> {
        let url = self.build_url(endpoint, params)?;
        let response = self.execute_request(endpoint, &url).await?;

        if !response.is_success() {
            return Err(ApiError::Upstream {
                endpoint: endpoint.to_string(),
                key: key.to_string(),
                message: format!("HTTP {}: {}", response.status, truncate(&response.body, 200)),
            });
        }

        let envelope: Envelope =
            serde_json::from_str(&response.body).map_err(|e| ApiError::Parse {
                endpoint: endpoint.to_string(),
                message: e.to_string(),
            })?;

        if !envelope.success {
            return Err(ApiError::Upstream {
                endpoint: endpoint.to_string(),
                key: key.to_string(),
                message: envelope.failure_message(),
            });
        }

        Ok(envelope.data.unwrap_or(Value::Null))
    }

    // ========================================================================
    // MATCHES
    // ========================================================================

    pub async fn live_scores(&self, competition_id: Option<&str>) -> ApiResult<Vec<Match>> {
        let params = Params::new().with_opt("competition_id", competition_id);
        let payload: MatchListPayload = self
            .request(endpoint::LIVE, &params, category::LIVE)
            .await?;
        Ok(payload.matches)
    }

    pub async fn match_events(&self, match_id: &str) -> ApiResult<Vec<MatchEvent>> {
        let params = Params::new().with("id", match_id);
        let payload: EventsPayload = self
            .request(endpoint::EVENTS, &params, category::EVENTS)
            .await?;
        Ok(payload.event)
    }

    pub async fn match_statistics(&self, match_id: &str) -> ApiResult<MatchStatistics> {
        let params = Params::new().with("match_id", match_id);
        let stats: Option<MatchStatistics> = self
            .request(endpoint::STATISTICS, &params, category::STATISTICS)
            .await?;
        Ok(stats.unwrap_or_default())
    }

    pub async fn match_lineups(&self, match_id: &str) -> ApiResult<Lineups> {
        let params = Params::new().with("match_id", match_id);
        let payload: Option<LineupsPayload> = self
            .request(endpoint::LINEUPS, &params, category::LINEUPS)
            .await?;
        Ok(payload.map(|p| p.lineup).unwrap_or_default())
    }

    pub async fn match_commentary(&self, match_id: &str) -> ApiResult<Vec<CommentaryEntry>> {
        let params = Params::new().with("match_id", match_id);
        let payload: Option<CommentaryPayload> = self
            .request(endpoint::COMMENTARY, &params, category::COMMENTARY)
            .await?;
        Ok(payload.map(|p| p.commentary).unwrap_or_default())
    }

    /// Finished matches, optionally filtered by date range, competition or team
    pub async fn history(
        &self,
        from: Option<&str>,
        to: Option<&str>,
        competition_id: Option<&str>,
        team_id: Option<&str>,
        page: Option<u32>,
    ) -> ApiResult<Vec<Match>> {
        let params = Params::new()
            .with_opt("from", from)
            .with_opt("to", to)
            .with_opt("competition_id", competition_id)
            .with_opt("team_id", team_id)
            .with_opt("page", page);
        let payload: MatchListPayload = self
            .request(endpoint::HISTORY, &params, category::HISTORY)
            .await?;
        Ok(payload.matches)
    }

    pub async fn fixtures(
        &self,
        competition_id: Option<&str>,
        team_id: Option<&str>,
        date: Option<&str>,
    ) -> ApiResult<Vec<Fixture>> {
        let params = Params::new()
            .with_opt("competition_id", competition_id)
            .with_opt("team", team_id)
            .with_opt("date", date);
        let payload: FixturesPayload = self
            .request(endpoint::FIXTURES, &params, category::FIXTURES)
            .await?;
        Ok(payload.fixtures)
    }

    // ========================================================================
    // COMPETITIONS
    // ========================================================================

    pub async fn standings(&self, competition_id: &str) -> ApiResult<Vec<StandingEntry>> {
        let params = Params::new().with("competition_id", competition_id);
        let payload: StandingsPayload = self
            .request(endpoint::STANDINGS, &params, category::STANDINGS)
            .await?;
        Ok(payload.table)
    }

    pub async fn top_scorers(&self, competition_id: &str) -> ApiResult<Vec<TopScorer>> {
        let params = Params::new().with("competition_id", competition_id);
        let payload: TopScorersPayload = self
            .request(endpoint::TOP_SCORERS, &params, category::TOP_SCORERS)
            .await?;
        Ok(payload.topscorers)
    }

    // ========================================================================
    // REFERENCE DATA
    // ========================================================================

    pub async fn teams(&self, country_id: Option<&str>) -> ApiResult<Vec<Team>> {
        let params = Params::new().with_opt("country_id", country_id);
        let payload: TeamsPayload = self
            .request(endpoint::TEAMS, &params, category::TEAMS)
            .await?;
        Ok(payload.teams)
    }

    pub async fn countries(&self) -> ApiResult<Vec<Country>> {
        let payload: CountriesPayload = self
            .request(endpoint::COUNTRIES, &Params::new(), category::GEOGRAPHY)
            .await?;
        Ok(payload.country)
    }

    pub async fn competitions(&self, country_id: Option<&str>) -> ApiResult<Vec<Competition>> {
        let params = Params::new().with_opt("country_id", country_id);
        let payload: CompetitionsPayload = self
            .request(endpoint::COMPETITIONS, &params, category::GEOGRAPHY)
            .await?;
        Ok(payload.competition)
    }

    pub async fn federations(&self) -> ApiResult<Vec<Federation>> {
        let payload: FederationsPayload = self
            .request(endpoint::FEDERATIONS, &Params::new(), category::GEOGRAPHY)
            .await?;
        Ok(payload.federation)
    }
}

fn elapsed_ms(start: Instant) -> f64 {
    start.elapsed().as_secs_f64() * 1000.0
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max_chars).collect();
        format!("{}...", cut)
    }
}
