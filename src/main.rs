use anyhow::{Context, Result};
use clap::Parser;
use matchday::{
    aggregation::{FixtureQuery, HistoryQuery, LiveQuery, MatchService},
    apis::ApiManager,
    arguments::{strip_logger_flags, Cli, Command},
    cache::{spawn_sweeper, CacheManager},
    config,
    logger::{self, LogTag},
};
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Notify;

/// Entry point for the matchday CLI
///
/// Builds one cache instance and one set of API clients, runs a single
/// command and prints its result as JSON on stdout. Every log line goes to
/// stderr, so stdout can be piped into a JSON tool.
#[tokio::main]
async fn main() -> Result<()> {
    let raw_args: Vec<String> = std::env::args().collect();
    logger::init(&raw_args);
    let cli = Cli::parse_from(strip_logger_flags(&raw_args));

    let config = config::load_config_from_path(&cli.config)
        .with_context(|| format!("Failed to load configuration from {}", cli.config.display()))?;
    logger::debug(
        LogTag::Config,
        &format!("Configuration loaded from {}", cli.config.display()),
    );

    let cache = Arc::new(CacheManager::from_settings(&config.cache));
    let shutdown = Arc::new(Notify::new());
    let sweeper = spawn_sweeper(
        cache.clone(),
        Duration::from_secs(config.cache.sweep_interval_secs),
        shutdown.clone(),
    );

    let apis = ApiManager::new(&config, cache.clone())
        .map_err(anyhow::Error::msg)
        .context("Failed to create API clients")?;
    let service = MatchService::new(
        apis.livescore.clone(),
        Some(apis.logos.clone()),
        config.aggregation.clone(),
    );

    let result = run(&service, cli.command, cli.compact).await;

    shutdown.notify_one();
    if let Err(e) = sweeper.await {
        logger::warning(LogTag::System, &format!("Sweeper task ended abnormally: {}", e));
    }

    if let Err(e) = &result {
        logger::error(LogTag::System, &format!("{:#}", e));
    }
    result
}

async fn run(service: &MatchService, command: Command, compact: bool) -> Result<()> {
    match command {
        Command::Live {
            competition,
            status,
            enrich,
        } => {
            let query = LiveQuery {
                competition_id: competition,
                status,
            };
            if enrich {
                print_json(&service.enriched_live_matches(&query).await?, compact)
            } else {
                print_json(&service.live_matches(&query).await?, compact)
            }
        }
        Command::Match { id } => print_json(&service.match_comprehensive(&id).await?, compact),
        Command::Team { id } => print_json(&service.team_matches(&id).await?, compact),
        Command::History {
            from,
            to,
            competition,
            team,
            page,
        } => {
            let query = HistoryQuery {
                from,
                to,
                competition_id: competition,
                team_id: team,
                page,
            };
            print_json(&service.history(&query).await?, compact)
        }
        Command::Fixtures {
            competition,
            team,
            date,
        } => {
            let query = FixtureQuery {
                competition_id: competition,
                team_id: team,
                date,
            };
            print_json(&service.fixtures(&query).await?, compact)
        }
        Command::Standings { competition } => {
            print_json(&service.standings(&competition).await?, compact)
        }
        Command::Scorers { competition } => {
            print_json(&service.top_scorers(&competition).await?, compact)
        }
        Command::Teams { country } => {
            print_json(&service.teams(country.as_deref()).await?, compact)
        }
        Command::Extract { competitions } => {
            print_json(&service.maximum_data(&competitions).await, compact)
        }
        Command::Stats => {
            if let Err(e) = service.live_matches(&LiveQuery::default()).await {
                logger::warning(LogTag::Api, &format!("Live scores fetch failed: {}", e));
            }
            let report = json!({
                "cache": service.cache().stats(),
                "requests": service.client().performance_stats(),
            });
            print_json(&report, compact)
        }
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T, compact: bool) -> Result<()> {
    let text = if compact {
        serde_json::to_string(value)?
    } else {
        serde_json::to_string_pretty(value)?
    };
    println!("{}", text);
    Ok(())
}
