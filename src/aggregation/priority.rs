/// Competition priority ordering for live match lists
///
/// The order is plain configuration: one list for Tuesday to Thursday, one for
/// the rest of the week.
use crate::apis::livescore::Match;
use crate::config::AggregationConfig;
use chrono::Weekday;

pub fn is_midweek(day: Weekday) -> bool {
    matches!(day, Weekday::Tue | Weekday::Wed | Weekday::Thu)
}

pub fn priority_list(config: &AggregationConfig, day: Weekday) -> &[String] {
    if is_midweek(day) {
        &config.priority_midweek
    } else {
        &config.priority_default
    }
}

/// Listed competitions first in list order; the rest keep their relative order
pub fn sort_by_priority(matches: &mut [Match], priority: &[String]) {
    matches.sort_by_key(|m| {
        m.competition_id()
            .and_then(|id| priority.iter().position(|p| p == id))
            .unwrap_or(priority.len())
    });
}
