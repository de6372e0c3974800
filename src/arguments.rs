/// Command-line interface for the matchday binary
///
/// Logger flags (`--debug-<tag>`, `--verbose`, `--quiet`, `--log-level=`) are
/// read by the logger from the raw arguments and stripped before clap sees
/// them, so they may appear anywhere on the command line.
use crate::aggregation::StatusFilter;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "matchday")]
#[command(about = "Live football scores with a category-aware response cache", long_about = None)]
pub struct Cli {
    /// Path to the TOML configuration file
    #[arg(long, global = true, default_value = crate::config::CONFIG_FILE_PATH)]
    pub config: PathBuf,

    /// Print compact JSON instead of pretty JSON
    #[arg(long, global = true)]
    pub compact: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Live matches, ordered by competition priority
    Live {
        #[arg(long)]
        competition: Option<String>,
        /// in-play, half-time, finished or not-started
        #[arg(long, value_parser = parse_status)]
        status: Option<StatusFilter>,
        /// Attach events, statistics, lineups and commentary
        #[arg(long)]
        enrich: bool,
    },
    /// One live match with all of its sub-resources
    Match { id: String },
    /// Live matches involving a team
    Team { id: String },
    /// Finished matches
    History {
        #[arg(long)]
        from: Option<String>,
        #[arg(long)]
        to: Option<String>,
        #[arg(long)]
        competition: Option<String>,
        #[arg(long)]
        team: Option<String>,
        #[arg(long)]
        page: Option<u32>,
    },
    /// Scheduled matches
    Fixtures {
        #[arg(long)]
        competition: Option<String>,
        #[arg(long)]
        team: Option<String>,
        #[arg(long)]
        date: Option<String>,
    },
    /// League table of a competition
    Standings { competition: String },
    /// Top scorers of a competition
    Scorers { competition: String },
    /// Teams, optionally restricted to one country
    Teams {
        #[arg(long)]
        country: Option<String>,
    },
    /// Full extraction across competitions (today's priority list when none given)
    Extract { competitions: Vec<String> },
    /// Cache and request statistics after a live scores fetch
    Stats,
}

fn parse_status(raw: &str) -> Result<StatusFilter, String> {
    StatusFilter::parse(raw).ok_or_else(|| {
        format!(
            "unknown status '{}' (expected in-play, half-time, finished or not-started)",
            raw
        )
    })
}

/// Whether an argument is consumed by the logger
pub fn is_logger_flag(arg: &str) -> bool {
    arg == "--quiet"
        || arg == "--verbose"
        || arg.starts_with("--debug-")
        || arg.starts_with("--verbose-")
        || arg.starts_with("--log-level=")
}

pub fn strip_logger_flags(args: &[String]) -> Vec<String> {
    args.iter()
        .filter(|arg| !is_logger_flag(arg))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_logger_flags_are_stripped() {
        let raw = args(&["matchday", "--debug-cache", "live", "--verbose", "--competition", "152"]);
        assert_eq!(
            strip_logger_flags(&raw),
            args(&["matchday", "live", "--competition", "152"])
        );
    }

    #[test]
    fn test_parse_live_with_status() {
        let cli = Cli::try_parse_from(args(&["matchday", "live", "--status", "half-time", "--enrich"]))
            .unwrap();
        match cli.command {
            Command::Live {
                competition,
                status,
                enrich,
            } => {
                assert_eq!(competition, None);
                assert_eq!(status, Some(StatusFilter::HalfTime));
                assert!(enrich);
            }
            other => panic!("unexpected command: {:?}", other),
        }
        assert_eq!(cli.config, PathBuf::from("data/config.toml"));
    }

    #[test]
    fn test_unknown_status_rejected() {
        assert!(Cli::try_parse_from(args(&["matchday", "live", "--status", "abandoned"])).is_err());
    }

    #[test]
    fn test_extract_collects_ids() {
        let cli = Cli::try_parse_from(args(&["matchday", "--config", "x.toml", "extract", "152", "3"]))
            .unwrap();
        assert_eq!(cli.config, PathBuf::from("x.toml"));
        match cli.command {
            Command::Extract { competitions } => assert_eq!(competitions, vec!["152", "3"]),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_teams_country_is_optional() {
        let cli = Cli::try_parse_from(args(&["matchday", "teams", "--country", "19"])).unwrap();
        match cli.command {
            Command::Teams { country } => assert_eq!(country.as_deref(), Some("19")),
            other => panic!("unexpected command: {:?}", other),
        }
        let cli = Cli::try_parse_from(args(&["matchday", "teams"])).unwrap();
        assert!(matches!(cli.command, Command::Teams { country: None }));
    }
}
