/// API client bundle, built once at startup from configuration
///
/// Both clients share one transport and the process-wide cache instance.
use std::sync::Arc;
use std::time::Duration;

use crate::apis::client::{HttpTransport, ReqwestTransport};
use crate::apis::livescore::LiveScoreClient;
use crate::apis::logos::LogoClient;
use crate::cache::CacheManager;
use crate::config::Config;
use crate::logger::{self, LogTag};

pub struct ApiManager {
    pub livescore: Arc<LiveScoreClient>,
    pub logos: Arc<LogoClient>,
}

impl ApiManager {
    /// Production clients over reqwest
    ///
    /// The transport timeout is the larger of the two configured budgets; each
    /// client still enforces its own budget per call.
    pub fn new(config: &Config, cache: Arc<CacheManager>) -> Result<Self, String> {
        let timeout_ms = config.api.timeout_ms.max(config.logos.timeout_ms);
        let transport = ReqwestTransport::new(Duration::from_millis(timeout_ms))?;
        Ok(Self::with_transport(config, cache, Arc::new(transport)))
    }

    pub fn with_transport(
        config: &Config,
        cache: Arc<CacheManager>,
        transport: Arc<dyn HttpTransport>,
    ) -> Self {
        let livescore = LiveScoreClient::new(
            &config.api,
            transport.clone(),
            cache.clone(),
            config.cache.performance_samples,
        );
        let logos = LogoClient::new(config.logos.clone(), transport, cache);

        if config.api.api_key.is_empty() || config.api.api_secret.is_empty() {
            logger::warning(
                LogTag::Api,
                "API credentials are not configured; upstream calls will be rejected",
            );
        }

        logger::debug(
            LogTag::Api,
            &format!(
                "API clients ready (base_url={}, timeout={}ms, rate_limit={}/min, logos={})",
                config.api.base_url,
                config.api.timeout_ms,
                config.api.rate_limit_per_minute,
                config.logos.enabled
            ),
        );

        Self {
            livescore: Arc::new(livescore),
            logos: Arc::new(logos),
        }
    }
}
