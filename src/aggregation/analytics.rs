/// Derived analytics over an assembled extraction
///
/// Pure reduction: no I/O, no clock. Matches seen both live and in history
/// count once.
use super::types::{Analytics, CompetitionMatches, CompetitionTables, DataCompleteness};
use crate::apis::livescore::Match;
use std::collections::HashSet;

const UNKNOWN: &str = "Unknown";

pub fn compute_analytics(matches: &[CompetitionMatches], tables: &[CompetitionTables]) -> Analytics {
    let mut seen = HashSet::new();
    let unique: Vec<&Match> = matches
        .iter()
        .flat_map(|c| c.live.iter().chain(c.history.iter()))
        .filter(|m| seen.insert(m.id.as_str()))
        .collect();

    let mut analytics = Analytics {
        total_matches: unique.len(),
        ..Analytics::default()
    };

    let mut with_scores = 0usize;
    let mut with_competition = 0usize;
    let mut with_country = 0usize;

    for m in &unique {
        if let Some((home, away)) = m.scores.goals() {
            analytics.total_goals = analytics
                .total_goals
                .saturating_add(u64::from(home) + u64::from(away));
            with_scores += 1;
        }

        let competition = match &m.competition {
            Some(c) if !c.name.is_empty() => {
                with_competition += 1;
                c.name.as_str()
            }
            _ => UNKNOWN,
        };
        *analytics
            .matches_per_competition
            .entry(competition.to_string())
            .or_default() += 1;

        let country = match &m.country {
            Some(c) if !c.name.is_empty() => {
                with_country += 1;
                c.name.as_str()
            }
            _ => UNKNOWN,
        };
        *analytics
            .matches_per_country
            .entry(country.to_string())
            .or_default() += 1;

        let status = if m.status.trim().is_empty() {
            UNKNOWN.to_string()
        } else {
            m.status.trim().to_uppercase()
        };
        *analytics.status_distribution.entry(status).or_default() += 1;
    }

    if with_scores > 0 {
        analytics.average_goals = analytics.total_goals as f64 / with_scores as f64;
    }

    let with_standings = tables.iter().filter(|t| t.standings.is_some()).count();
    analytics.completeness = DataCompleteness {
        matches_with_scores: ratio(with_scores, unique.len()),
        matches_with_competition: ratio(with_competition, unique.len()),
        matches_with_country: ratio(with_country, unique.len()),
        standings_coverage: ratio(with_standings, tables.len()),
    };

    analytics
}

fn ratio(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64
    }
}
