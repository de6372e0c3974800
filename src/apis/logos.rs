/// Team badge lookup against a TheSportsDB-style side service
///
/// Lookups never fail the caller: a disabled service, transport error, bad
/// payload or unknown team all resolve to the configured placeholder. Only
/// real badge URLs are cached.
use crate::apis::client::HttpTransport;
use crate::cache::{category, CacheManager};
use crate::config::LogoConfig;
use crate::logger::{self, LogTag};
use futures::future::join_all;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

const SEARCH_TEAMS: &str = "searchteams.php";

#[derive(Debug, Deserialize)]
struct SearchTeamsResponse {
    #[serde(default)]
    teams: Option<Vec<SportsDbTeam>>,
}

#[derive(Debug, Deserialize)]
struct SportsDbTeam {
    #[serde(rename = "strBadge", default)]
    badge: Option<String>,
    #[serde(rename = "strTeamBadge", default)]
    team_badge: Option<String>,
}

impl SportsDbTeam {
    fn badge_url(self) -> Option<String> {
        self.badge
            .filter(|b| !b.is_empty())
            .or(self.team_badge.filter(|b| !b.is_empty()))
    }
}

pub struct LogoClient {
    transport: Arc<dyn HttpTransport>,
    cache: Arc<CacheManager>,
    config: LogoConfig,
}

impl LogoClient {
    pub fn new(config: LogoConfig, transport: Arc<dyn HttpTransport>, cache: Arc<CacheManager>) -> Self {
        Self {
            transport,
            cache,
            config,
        }
    }

    /// Badge URL for a team display name, or the placeholder
    pub async fn team_badge(&self, team_name: &str) -> String {
        let name = team_name.trim();
        if !self.config.enabled || name.is_empty() {
            return self.config.placeholder_url.clone();
        }

        let key = CacheManager::generate_key(SEARCH_TEAMS, [("t", name)]);
        if let Some(url) = self.cache.get::<String>(&key, category::LOGOS) {
            return url;
        }

        match self.lookup(name).await {
            Ok(Some(url)) => {
                if let Err(e) = self.cache.set(&key, &url, category::LOGOS) {
                    logger::warning(LogTag::Logos, &format!("Failed to cache badge for {}: {}", name, e));
                }
                url
            }
            Ok(None) => {
                logger::debug(LogTag::Logos, &format!("No badge for '{}'", name));
                self.config.placeholder_url.clone()
            }
            Err(e) => {
                logger::debug(LogTag::Logos, &format!("Badge lookup for '{}' failed: {}", name, e));
                self.config.placeholder_url.clone()
            }
        }
    }

    /// Badges for many names, positionally aligned with the input
    pub async fn team_badges(&self, team_names: &[String]) -> Vec<String> {
        join_all(team_names.iter().map(|name| self.team_badge(name))).await
    }

    async fn lookup(&self, name: &str) -> Result<Option<String>, String> {
        let raw = format!("{}/{}", self.config.base_url.trim_end_matches('/'), SEARCH_TEAMS);
        let mut url = Url::parse(&raw).map_err(|e| format!("Bad logo URL '{}': {}", raw, e))?;
        url.query_pairs_mut().append_pair("t", name);

        let timeout = Duration::from_millis(self.config.timeout_ms);
        let response = tokio::time::timeout(timeout, self.transport.get(&url))
            .await
            .map_err(|_| format!("Timed out after {}ms", self.config.timeout_ms))??;

        if !response.is_success() {
            return Err(format!("HTTP {}", response.status));
        }

        let parsed: SearchTeamsResponse = serde_json::from_str(&response.body)
            .map_err(|e| format!("Invalid response: {}", e))?;

        Ok(parsed
            .teams
            .unwrap_or_default()
            .into_iter()
            .next()
            .and_then(SportsDbTeam::badge_url))
    }
}
