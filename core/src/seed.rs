//! Demo dataset loaded on first run and by `reset_to_defaults`.
//!
//! Every call builds fresh owned values, so nothing handed out here can be
//! mutated behind a later caller's back.

use crate::{League, Match, Snapshot, Team};
use chrono::{DateTime, TimeZone, Utc};

const TEAMS: &[(&str, &str, League)] = &[
    ("t1", "Man U", League::Premier),
    ("t2", "Liverpool", League::Premier),
    ("t3", "Arsenal", League::Premier),
    ("t4", "Chelsea", League::Premier),
    ("e1", "France", League::Eurobasket),
    ("e2", "Spain", League::Eurobasket),
    ("e3", "Germany", League::Eurobasket),
    ("e4", "Lithuania", League::Eurobasket),
    ("w1", "Djokovic", League::Wimbledon),
    ("w2", "Nadal", League::Wimbledon),
    ("w3", "Alcaraz", League::Wimbledon),
    ("w4", "Murray", League::Wimbledon),
    ("w5", "Zverev", League::Wimbledon),
];

struct SeedMatch {
    id: &'static str,
    home: &'static str,
    away: &'static str,
    score: (u32, u32),
    league: League,
    // (year, month, day, hour, minute), UTC
    at: (i32, u32, u32, u32, u32),
}

const MATCHES: &[SeedMatch] = &[
    SeedMatch {
        id: "m1",
        home: "t1",
        away: "t2",
        score: (2, 1),
        league: League::Premier,
        at: (2024, 1, 15, 14, 30),
    },
    SeedMatch {
        id: "m2",
        home: "e4",
        away: "e2",
        score: (82, 77),
        league: League::Eurobasket,
        at: (2024, 1, 16, 18, 0),
    },
    SeedMatch {
        id: "m3",
        home: "e1",
        away: "e3",
        score: (71, 71),
        league: League::Eurobasket,
        at: (2024, 1, 14, 16, 45),
    },
    SeedMatch {
        id: "w_m1",
        home: "w1",
        away: "w2",
        score: (3, 2),
        league: League::Wimbledon,
        at: (2024, 1, 12, 10, 0),
    },
];

pub fn default_teams() -> Vec<Team> {
    TEAMS
        .iter()
        .map(|&(id, name, league)| Team {
            id: id.to_string(),
            name: name.to_string(),
            league,
        })
        .collect()
}

pub fn default_matches() -> Vec<Match> {
    MATCHES
        .iter()
        .map(|m| Match {
            id: m.id.to_string(),
            home_team_id: m.home.to_string(),
            away_team_id: m.away.to_string(),
            home_score: m.score.0,
            away_score: m.score.1,
            league: m.league,
            timestamp: utc(m.at),
        })
        .collect()
}

pub fn default_snapshot() -> Snapshot {
    Snapshot {
        teams: default_teams(),
        matches: default_matches(),
        current_league: League::default(),
    }
}

fn utc((year, month, day, hour, minute): (i32, u32, u32, u32, u32)) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, minute, 0)
        .single()
        .unwrap_or_default()
}
