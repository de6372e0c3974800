//! Upstream API access: live-score client, logo side service and shared plumbing

pub mod client;
pub mod livescore;
pub mod logos;
pub mod manager;
pub mod params;
pub mod stats;

#[cfg(test)]
pub(crate) mod mock;

pub use client::{HttpTransport, RateLimiter, ReqwestTransport, TransportResponse};
pub use livescore::LiveScoreClient;
pub use logos::LogoClient;
pub use manager::ApiManager;
pub use params::Params;
pub use stats::{PerformanceStats, PerformanceTracker};
