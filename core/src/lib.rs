pub mod error;
pub mod guard;
pub mod persist;
pub mod seed;
pub mod snapshot;
pub mod standings;
pub mod store;

pub use error::{PersistError, SnapshotError, ValidationError};
pub use guard::{MatchRejection, TeamRejection};
pub use persist::{JsonFilePersister, MemoryPersister, Persister};
pub use snapshot::Snapshot;
pub use standings::{UNKNOWN_TEAM, calculate_standings, has_match, team_name};
pub use store::{NewMatch, StateStore, StoreView, SubscriptionId};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ---------------------------------------------------------------------------
// Domain types. The serialized shape doubles as the snapshot wire format.
// ---------------------------------------------------------------------------

/// One of the three independent competitions. Closed set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum League {
    #[default]
    Premier,
    Eurobasket,
    Wimbledon,
}

impl League {
    pub const ALL: [League; 3] = [League::Premier, League::Eurobasket, League::Wimbledon];

    pub fn key(&self) -> &'static str {
        match self {
            League::Premier => "premier",
            League::Eurobasket => "eurobasket",
            League::Wimbledon => "wimbledon",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            League::Premier => "Premier League",
            League::Eurobasket => "EuroBasket",
            League::Wimbledon => "Wimbledon",
        }
    }

    /// What a participant is called in this league's forms and tables.
    pub fn participant(&self) -> &'static str {
        match self {
            League::Wimbledon => "Player",
            League::Premier | League::Eurobasket => "Team",
        }
    }

    pub fn next(self) -> Self {
        match self {
            League::Premier => League::Eurobasket,
            League::Eurobasket => League::Wimbledon,
            League::Wimbledon => League::Premier,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            League::Premier => League::Wimbledon,
            League::Eurobasket => League::Premier,
            League::Wimbledon => League::Eurobasket,
        }
    }
}

impl fmt::Display for League {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown league: {0}")]
pub struct UnknownLeague(pub String);

impl FromStr for League {
    type Err = UnknownLeague;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        League::ALL
            .into_iter()
            .find(|l| l.key().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownLeague(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub id: String,
    pub name: String,
    pub league: League,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Match {
    pub id: String,
    pub home_team_id: String,
    pub away_team_id: String,
    pub home_score: u32,
    pub away_score: u32,
    pub league: League,
    #[serde(rename = "date", alias = "timestamp")]
    pub timestamp: DateTime<Utc>,
}

impl Match {
    /// True when the match was played between `a` and `b`, in either order.
    pub fn involves_pair(&self, a: &str, b: &str) -> bool {
        (self.home_team_id == a && self.away_team_id == b)
            || (self.home_team_id == b && self.away_team_id == a)
    }
}

/// Derived per-team aggregate. Recomputed on every query, never stored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Standing {
    pub team_id: String,
    pub played: u32,
    pub wins: u32,
    pub draws: u32,
    pub losses: u32,
    pub points: u32,
    pub goals_for: u32,
    pub goals_against: u32,
}

impl Standing {
    pub fn new(team_id: impl Into<String>) -> Self {
        Self {
            team_id: team_id.into(),
            ..Self::default()
        }
    }

    pub fn goal_difference(&self) -> i64 {
        i64::from(self.goals_for) - i64::from(self.goals_against)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn league_parses_case_insensitively() {
        assert_eq!("Premier".parse::<League>(), Ok(League::Premier));
        assert_eq!(" wimbledon ".parse::<League>(), Ok(League::Wimbledon));
        assert!("serie-a".parse::<League>().is_err());
    }

    #[test]
    fn league_cycle_visits_every_league() {
        let mut league = League::Premier;
        for expected in [League::Eurobasket, League::Wimbledon, League::Premier] {
            league = league.next();
            assert_eq!(league, expected);
        }
        assert_eq!(League::Premier.prev(), League::Wimbledon);
        assert_eq!(League::Wimbledon.prev().next(), League::Wimbledon);
    }

    #[test]
    fn league_serializes_as_lowercase_key() {
        assert_eq!(serde_json::to_string(&League::Eurobasket).unwrap(), "\"eurobasket\"");
    }

    #[test]
    fn match_timestamp_uses_date_key() {
        let json = r#"{
            "id": "m1",
            "homeTeamId": "t1",
            "awayTeamId": "t2",
            "homeScore": 2,
            "awayScore": 1,
            "league": "premier",
            "date": "2024-01-15T14:30:00.000Z"
        }"#;
        let m: Match = serde_json::from_str(json).unwrap();
        assert_eq!(m.home_score, 2);
        assert_eq!(m.timestamp.to_rfc3339(), "2024-01-15T14:30:00+00:00");

        let out = serde_json::to_value(&m).unwrap();
        assert!(out.get("date").is_some());
        assert!(out.get("timestamp").is_none());
    }

    #[test]
    fn involves_pair_ignores_order() {
        let m = crate::seed::default_matches().remove(0);
        assert!(m.involves_pair("t1", "t2"));
        assert!(m.involves_pair("t2", "t1"));
        assert!(!m.involves_pair("t1", "t3"));
    }

    #[test]
    fn goal_difference_can_be_negative() {
        let s = Standing {
            goals_for: 1,
            goals_against: 4,
            ..Standing::new("x")
        };
        assert_eq!(s.goal_difference(), -3);
    }
}
