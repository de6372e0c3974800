/// Request performance tracking
///
/// Samples live in a bounded ring buffer; every figure in `PerformanceStats`
/// is derived from the samples currently retained. Used for reporting only.
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::Serialize;
use std::collections::{BTreeMap, VecDeque};

pub const DEFAULT_SAMPLE_CAPACITY: usize = 1000;

#[derive(Debug, Clone, Serialize)]
pub struct PerformanceSample {
    pub endpoint: String,
    pub response_time_ms: f64,
    pub success: bool,
    pub cache_hit: bool,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct EndpointStats {
    pub requests: usize,
    pub failures: usize,
    pub cache_hits: usize,
    pub avg_response_ms: f64,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct PerformanceStats {
    pub total_requests: usize,
    pub cache_hits: usize,
    pub cache_hit_rate: f64,
    pub success_rate: f64,
    pub avg_response_ms: f64,
    /// Average over samples that reached upstream
    pub avg_upstream_ms: f64,
    pub per_endpoint: BTreeMap<String, EndpointStats>,
}

pub struct PerformanceTracker {
    samples: Mutex<VecDeque<PerformanceSample>>,
    capacity: usize,
}

impl PerformanceTracker {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            samples: Mutex::new(VecDeque::with_capacity(capacity)),
            capacity,
        }
    }

    pub fn record(&self, endpoint: &str, response_time_ms: f64, success: bool, cache_hit: bool) {
        let mut samples = self.samples.lock();
        if samples.len() >= self.capacity {
            samples.pop_front();
        }
        samples.push_back(PerformanceSample {
            endpoint: endpoint.to_string(),
            response_time_ms,
            success,
            cache_hit,
            timestamp: Utc::now(),
        });
    }

    pub fn stats(&self) -> PerformanceStats {
        let samples = self.samples.lock();
        let total = samples.len();
        if total == 0 {
            return PerformanceStats::default();
        }

        let cache_hits = samples.iter().filter(|s| s.cache_hit).count();
        let successes = samples.iter().filter(|s| s.success).count();
        let total_ms: f64 = samples.iter().map(|s| s.response_time_ms).sum();

        let upstream: Vec<f64> = samples
            .iter()
            .filter(|s| !s.cache_hit)
            .map(|s| s.response_time_ms)
            .collect();
        let avg_upstream_ms = if upstream.is_empty() {
            0.0
        } else {
            upstream.iter().sum::<f64>() / upstream.len() as f64
        };

        let mut per_endpoint: BTreeMap<String, (EndpointStats, f64)> = BTreeMap::new();
        for sample in samples.iter() {
            let (stats, sum_ms) = per_endpoint.entry(sample.endpoint.clone()).or_default();
            stats.requests += 1;
            if !sample.success {
                stats.failures += 1;
            }
            if sample.cache_hit {
                stats.cache_hits += 1;
            }
            *sum_ms += sample.response_time_ms;
        }

        PerformanceStats {
            total_requests: total,
            cache_hits,
            cache_hit_rate: cache_hits as f64 / total as f64,
            success_rate: successes as f64 / total as f64,
            avg_response_ms: total_ms / total as f64,
            avg_upstream_ms,
            per_endpoint: per_endpoint
                .into_iter()
                .map(|(endpoint, (mut stats, sum_ms))| {
                    stats.avg_response_ms = sum_ms / stats.requests as f64;
                    (endpoint, stats)
                })
                .collect(),
        }
    }
}

impl Default for PerformanceTracker {
    fn default() -> Self {
        Self::new(DEFAULT_SAMPLE_CAPACITY)
    }
}
