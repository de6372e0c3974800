/// HTTP plumbing shared by the API clients: transport seam and rate limiter
use async_trait::async_trait;
use reqwest::Client;
use parking_lot::Mutex;
use std::time::Duration;
use tokio::time::Instant;
use url::Url;

/// Raw response handed back by a transport
#[derive(Debug, Clone)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

impl TransportResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Outbound GET seam; production uses reqwest, tests an in-memory double
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn get(&self, url: &Url) -> Result<TransportResponse, String>;
}

/// reqwest-backed transport with a connection-level timeout
pub struct ReqwestTransport {
    client: Client,
    timeout: Duration,
}

impl ReqwestTransport {
    pub fn new(timeout: Duration) -> Result<Self, String> {
        if timeout.is_zero() {
            return Err("Timeout must be greater than zero".to_string());
        }

        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("matchday/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| format!("Failed to create HTTP client: {}", e))?;

        Ok(Self { client, timeout })
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn get(&self, url: &Url) -> Result<TransportResponse, String> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| format!("Request failed: {}", e))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| format!("Failed to read response body: {}", e))?;

        Ok(TransportResponse { status, body })
    }
}

/// Client-side rate limiter: minimum spacing between request starts
///
/// Each caller reserves the next free start slot under the lock and then
/// sleeps outside it, so no caller holds anything while its request is in
/// flight and a cancelled waiter only wastes its own slot.
pub struct RateLimiter {
    next_slot: Mutex<Option<Instant>>,
    min_interval: Duration,
}

impl RateLimiter {
    pub fn new(max_per_minute: usize) -> Self {
        let min_interval = if max_per_minute > 0 {
            Duration::from_secs_f64(60.0 / max_per_minute as f64)
        } else {
            Duration::ZERO
        };

        Self {
            next_slot: Mutex::new(None),
            min_interval,
        }
    }

    /// Wait until this caller's start slot arrives
    pub async fn acquire(&self) {
        if self.min_interval.is_zero() {
            return;
        }

        let slot = {
            let mut last = self.next_slot.lock();
            let now = Instant::now();
            let slot = match *last {
                Some(previous) => (previous + self.min_interval).max(now),
                None => now,
            };
            *last = Some(slot);
            slot
        };

        tokio::time::sleep_until(slot).await;
    }

    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }
}
