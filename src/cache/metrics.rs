/// Lookup metrics kept as bounded sample windows
///
/// Nothing is pre-aggregated: hit rate and average latency are recomputed
/// from the retained samples every time they are read.
use std::collections::VecDeque;

/// Samples retained per outcome type
pub const SAMPLE_WINDOW: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupOutcome {
    Hit,
    Miss,
    Expired,
}

#[derive(Debug, Clone, Default)]
pub struct LookupMetrics {
    hits: VecDeque<f64>,
    misses: VecDeque<f64>,
    expired: VecDeque<f64>,
}

impl LookupMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one lookup and its latency in milliseconds
    pub fn record(&mut self, outcome: LookupOutcome, latency_ms: f64) {
        let window = match outcome {
            LookupOutcome::Hit => &mut self.hits,
            LookupOutcome::Miss => &mut self.misses,
            LookupOutcome::Expired => &mut self.expired,
        };
        if window.len() >= SAMPLE_WINDOW {
            window.pop_front();
        }
        window.push_back(latency_ms);
    }

    pub fn hits(&self) -> usize {
        self.hits.len()
    }

    pub fn misses(&self) -> usize {
        self.misses.len()
    }

    pub fn expired(&self) -> usize {
        self.expired.len()
    }

    /// hits / (hits + misses + expired), 0.0 without samples
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits() + self.misses() + self.expired();
        if total == 0 {
            0.0
        } else {
            self.hits() as f64 / total as f64
        }
    }

    pub fn avg_lookup_ms(&self) -> f64 {
        let samples = self.hits.iter().chain(&self.misses).chain(&self.expired);
        let (sum, count) = samples.fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
        if count == 0 {
            0.0
        } else {
            sum / count as f64
        }
    }

    pub fn reset(&mut self) {
        self.hits.clear();
        self.misses.clear();
        self.expired.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hit_rate_counts_expired_as_non_hits() {
        let mut metrics = LookupMetrics::new();
        metrics.record(LookupOutcome::Hit, 0.2);
        metrics.record(LookupOutcome::Hit, 0.4);
        metrics.record(LookupOutcome::Miss, 0.1);
        metrics.record(LookupOutcome::Expired, 0.1);

        assert_eq!(metrics.hit_rate(), 0.5);
        assert!((metrics.avg_lookup_ms() - 0.2).abs() < 1e-9);
    }

    #[test]
    fn test_window_is_bounded() {
        let mut metrics = LookupMetrics::new();
        for _ in 0..(SAMPLE_WINDOW + 25) {
            metrics.record(LookupOutcome::Miss, 1.0);
        }
        metrics.record(LookupOutcome::Hit, 1.0);

        assert_eq!(metrics.misses(), SAMPLE_WINDOW);
        assert_eq!(metrics.hits(), 1);
    }

    #[test]
    fn test_reset_zeroes_rate() {
        let mut metrics = LookupMetrics::new();
        metrics.record(LookupOutcome::Hit, 1.0);
        metrics.reset();
        assert_eq!(metrics.hit_rate(), 0.0);
        assert_eq!(metrics.avg_lookup_ms(), 0.0);
    }
}
