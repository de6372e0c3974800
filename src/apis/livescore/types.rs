/// Live-score API response types
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

// ============================================================================
// CUSTOM DESERIALIZERS - Handle API inconsistencies
// ============================================================================

/// IDs arrive as numbers on some endpoints and strings on others
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(opt_string_or_number(deserializer)?.unwrap_or_default())
}

fn opt_string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(other) => Err(Error::custom(format!(
            "Expected string or number for id field, got: {}",
            other
        ))),
    }
}

/// Counters arrive as numbers, numeric strings, empty strings or null
fn lenient_u32<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Number(n)) => n.as_u64().unwrap_or(0) as u32,
        Some(Value::String(s)) => s.trim().parse().unwrap_or(0),
        _ => 0,
    })
}

fn lenient_i32<'de, D>(deserializer: D) -> Result<i32, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Number(n)) => n.as_i64().unwrap_or(0) as i32,
        Some(Value::String(s)) => s.trim().trim_start_matches('+').parse().unwrap_or(0),
        _ => 0,
    })
}

// ============================================================================
// ENVELOPE
// ============================================================================

/// Wrapper around every upstream response
///
/// Anything other than `success: true` is a failed call.
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub data: Option<Value>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<Value>,
}

impl Envelope {
    /// Failure text from `error`, then `message`
    pub fn failure_message(&self) -> String {
        match &self.error {
            Some(Value::String(s)) if !s.is_empty() => return s.clone(),
            Some(Value::Null) | None => {}
            Some(other) => return other.to_string(),
        }
        self.message
            .clone()
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| "Upstream reported failure without a message".to_string())
    }
}

// ============================================================================
// SHARED REFERENCES
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TeamRef {
    #[serde(default, deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub logo: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompetitionRef {
    #[serde(default, deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CountryRef {
    #[serde(default, deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default)]
    pub name: String,
}

// ============================================================================
// MATCHES
// ============================================================================

/// Score strings as sent upstream, e.g. `"2 - 1"`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Scores {
    #[serde(default)]
    pub score: String,
    #[serde(default)]
    pub ht_score: String,
    #[serde(default)]
    pub ft_score: String,
    #[serde(default)]
    pub et_score: String,
    #[serde(default)]
    pub ps_score: String,
}

impl Scores {
    /// Current (home, away) goals, if the score string parses
    pub fn goals(&self) -> Option<(u32, u32)> {
        parse_pair(&self.score, '-')
    }
}

/// Parse `"2 - 1"` / `"55:45"` style pairs
pub fn parse_pair(raw: &str, separator: char) -> Option<(u32, u32)> {
    let (home, away) = raw.split_once(separator)?;
    Some((home.trim().parse().ok()?, away.trim().parse().ok()?))
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Match {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default)]
    pub home: TeamRef,
    #[serde(default)]
    pub away: TeamRef,
    #[serde(default)]
    pub competition: Option<CompetitionRef>,
    #[serde(default)]
    pub country: Option<CountryRef>,
    #[serde(default)]
    pub scores: Scores,
    /// e.g. "IN PLAY", "HALF TIME BREAK", "FINISHED", "NOT STARTED"
    #[serde(default)]
    pub status: String,
    /// Match minute as displayed upstream
    #[serde(default, deserialize_with = "string_or_number")]
    pub time: String,
    #[serde(default)]
    pub scheduled: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub last_changed: Option<String>,
}

impl Match {
    pub fn competition_id(&self) -> Option<&str> {
        self.competition.as_ref().map(|c| c.id.as_str()).filter(|id| !id.is_empty())
    }

    pub fn involves_team(&self, team_id: &str) -> bool {
        self.home.id == team_id || self.away.id == team_id
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchEvent {
    #[serde(default, deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default, deserialize_with = "string_or_number")]
    pub match_id: String,
    #[serde(default)]
    pub player: String,
    #[serde(default, deserialize_with = "string_or_number")]
    pub time: String,
    /// GOAL, GOAL_PENALTY, OWN_GOAL, YELLOW_CARD, RED_CARD, SUBSTITUTION, ...
    #[serde(default)]
    pub event: String,
    /// "h" or "a"
    #[serde(default)]
    pub home_away: String,
    #[serde(default)]
    pub info: Option<String>,
}

// ============================================================================
// STATISTICS
// ============================================================================

/// Home/away pair; upstream format is `"home:away"`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatPair {
    pub home: u32,
    pub away: u32,
}

impl Serialize for StatPair {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format!("{}:{}", self.home, self.away))
    }
}

impl<'de> Deserialize<'de> for StatPair {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<Value>::deserialize(deserializer)?;
        Ok(match raw {
            Some(Value::String(s)) => parse_pair(&s, ':')
                .map(|(home, away)| StatPair { home, away })
                .unwrap_or_default(),
            _ => StatPair::default(),
        })
    }
}

/// Match statistics; missing values read as 0:0
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchStatistics {
    #[serde(alias = "possesion")]
    pub possession: StatPair,
    pub shots_on_target: StatPair,
    pub shots_off_target: StatPair,
    pub attempts_on_goal: StatPair,
    pub corners: StatPair,
    pub offsides: StatPair,
    #[serde(alias = "fauls")]
    pub fouls: StatPair,
    pub yellow_cards: StatPair,
    pub red_cards: StatPair,
    pub saves: StatPair,
    pub dangerous_attacks: StatPair,
    pub attacks: StatPair,
}

// ============================================================================
// LINEUPS / COMMENTARY
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LineupPlayer {
    #[serde(default)]
    pub name: String,
    #[serde(default, deserialize_with = "opt_string_or_number")]
    pub shirt_number: Option<String>,
    #[serde(default)]
    pub position: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LineupSide {
    #[serde(default)]
    pub formation: Option<String>,
    #[serde(default)]
    pub players: Vec<LineupPlayer>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Lineups {
    #[serde(default)]
    pub home: LineupSide,
    #[serde(default)]
    pub away: LineupSide,
}

impl Lineups {
    pub fn is_empty(&self) -> bool {
        self.home.players.is_empty() && self.away.players.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CommentaryEntry {
    #[serde(default, deserialize_with = "opt_string_or_number")]
    pub minute: Option<String>,
    #[serde(default)]
    pub text: String,
}

// ============================================================================
// FIXTURES / STANDINGS / SCORERS
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Fixture {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub time: String,
    #[serde(default, deserialize_with = "string_or_number")]
    pub home_id: String,
    #[serde(default)]
    pub home_name: String,
    #[serde(default, deserialize_with = "string_or_number")]
    pub away_id: String,
    #[serde(default)]
    pub away_name: String,
    #[serde(default)]
    pub competition: Option<CompetitionRef>,
    #[serde(default)]
    pub location: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StandingEntry {
    #[serde(default, deserialize_with = "lenient_u32")]
    pub rank: u32,
    #[serde(default, deserialize_with = "string_or_number")]
    pub team_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_u32")]
    pub matches: u32,
    #[serde(default, deserialize_with = "lenient_u32")]
    pub won: u32,
    #[serde(default, deserialize_with = "lenient_u32")]
    pub drawn: u32,
    #[serde(default, deserialize_with = "lenient_u32")]
    pub lost: u32,
    #[serde(default, deserialize_with = "lenient_u32")]
    pub goals_scored: u32,
    #[serde(default, deserialize_with = "lenient_u32")]
    pub goals_conceded: u32,
    #[serde(default, deserialize_with = "lenient_i32")]
    pub goal_diff: i32,
    #[serde(default, deserialize_with = "lenient_u32")]
    pub points: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerRef {
    #[serde(default, deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TopScorer {
    #[serde(default)]
    pub player: PlayerRef,
    #[serde(default)]
    pub team: TeamRef,
    #[serde(default, deserialize_with = "lenient_u32")]
    pub goals: u32,
    #[serde(default, deserialize_with = "lenient_u32")]
    pub assists: u32,
    #[serde(default, deserialize_with = "lenient_u32")]
    pub played: u32,
}

// ============================================================================
// REFERENCE DATA
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Team {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub logo: Option<String>,
    #[serde(default)]
    pub stadium: Option<String>,
}

impl From<&TeamRef> for Team {
    fn from(team: &TeamRef) -> Self {
        Team {
            id: team.id.clone(),
            name: team.name.clone(),
            logo: team.logo.clone(),
            stadium: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Competition {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub countries: Vec<CountryRef>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Country {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub flag: Option<String>,
    #[serde(default)]
    pub fifa_code: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Federation {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default)]
    pub name: String,
}

// ============================================================================
// PAYLOADS - the `data` member per endpoint
// ============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MatchListPayload {
    #[serde(rename = "match", default)]
    pub matches: Vec<Match>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventsPayload {
    #[serde(default)]
    pub event: Vec<MatchEvent>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LineupsPayload {
    #[serde(default)]
    pub lineup: Lineups,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CommentaryPayload {
    #[serde(default)]
    pub commentary: Vec<CommentaryEntry>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FixturesPayload {
    #[serde(default)]
    pub fixtures: Vec<Fixture>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StandingsPayload {
    #[serde(default)]
    pub table: Vec<StandingEntry>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TopScorersPayload {
    #[serde(default)]
    pub topscorers: Vec<TopScorer>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TeamsPayload {
    #[serde(default)]
    pub teams: Vec<Team>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CountriesPayload {
    #[serde(default)]
    pub country: Vec<Country>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CompetitionsPayload {
    #[serde(default)]
    pub competition: Vec<Competition>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FederationsPayload {
    #[serde(default)]
    pub federation: Vec<Federation>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_match_accepts_numeric_ids() {
        let raw = json!({
            "id": 4242,
            "home": {"id": 19, "name": "Arsenal"},
            "away": {"id": "7", "name": "Chelsea"},
            "competition": {"id": 152, "name": "Premier League"},
            "scores": {"score": "2 - 1"},
            "status": "IN PLAY",
            "time": 67
        });

        let m: Match = serde_json::from_value(raw).unwrap();
        assert_eq!(m.id, "4242");
        assert_eq!(m.home.id, "19");
        assert_eq!(m.time, "67");
        assert_eq!(m.competition_id(), Some("152"));
        assert_eq!(m.scores.goals(), Some((2, 1)));
        assert!(m.involves_team("7"));
    }

    #[test]
    fn test_statistics_tolerate_nulls_and_typos() {
        let raw = json!({"possesion": "55:45", "fauls": "10:12", "corners": null});
        let stats: MatchStatistics = serde_json::from_value(raw).unwrap();

        assert_eq!(stats.possession, StatPair { home: 55, away: 45 });
        assert_eq!(stats.fouls, StatPair { home: 10, away: 12 });
        assert_eq!(stats.corners, StatPair::default());

        // cached composites are re-read from their serialized form
        let again: MatchStatistics =
            serde_json::from_value(serde_json::to_value(&stats).unwrap()).unwrap();
        assert_eq!(again, stats);
    }

    #[test]
    fn test_standings_accept_string_counters() {
        let raw = json!({"rank": "1", "team_id": 19, "name": "Arsenal", "points": "71", "goal_diff": "-3"});
        let entry: StandingEntry = serde_json::from_value(raw).unwrap();
        assert_eq!((entry.rank, entry.points, entry.goal_diff), (1, 71, -3));
        assert_eq!(entry.won, 0);
    }

    #[test]
    fn test_envelope_failure_message_prefers_error() {
        let env: Envelope =
            serde_json::from_value(json!({"success": false, "error": "Invalid secret", "message": "x"}))
                .unwrap();
        assert_eq!(env.failure_message(), "Invalid secret");

        let env: Envelope = serde_json::from_value(json!({"message": "quota exceeded"})).unwrap();
        assert!(!env.success);
        assert_eq!(env.failure_message(), "quota exceeded");
    }

    #[test]
    fn test_parse_pair() {
        assert_eq!(parse_pair("3 - 0", '-'), Some((3, 0)));
        assert_eq!(parse_pair("?", '-'), None);
        assert_eq!(parse_pair("", '-'), None);
    }
}
