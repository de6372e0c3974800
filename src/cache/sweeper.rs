/// Background sweep removing expired entries on a fixed interval
///
/// Bounds memory held by keys that are never queried again. Runs until the
/// shutdown notification fires.
use super::manager::CacheManager;
use crate::logger::{self, LogTag};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Notify;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

pub fn spawn_sweeper(
    cache: Arc<CacheManager>,
    interval: Duration,
    shutdown: Arc<Notify>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        logger::info(
            LogTag::Cache,
            &format!("Cache sweeper started (every {}s)", interval.as_secs()),
        );

        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        // first tick completes immediately
        ticker.tick().await;

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    let removed = cache.cleanup_expired();
                    if removed > 0 {
                        logger::debug(
                            LogTag::Cache,
                            &format!("Sweep: {} expired, {} remaining", removed, cache.len()),
                        );
                    }
                }
                _ = shutdown.notified() => {
                    logger::info(LogTag::Cache, "Cache sweeper stopped");
                    break;
                }
            }
        }
    })
}
