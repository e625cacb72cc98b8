//! Entry checks run by callers before committing a team or match.
//!
//! The store itself stays permissive; these are the rules a form applies so
//! the user gets a message instead of a silently duplicated record.

use crate::standings::has_match;
use crate::{League, Match, Team};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatchRejection {
    #[error("All fields are required.")]
    MissingTeam,
    #[error("Participants must be different.")]
    SameTeam,
    #[error("Match already recorded.")]
    AlreadyRecorded,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TeamRejection {
    #[error("Name is required.")]
    EmptyName,
    #[error("{0} already exists in this league.")]
    DuplicateName(String),
}

pub fn would_duplicate_match(matches: &[Match], league: League, a: &str, b: &str) -> bool {
    has_match(matches, league, a, b)
}

/// Case-insensitive name clash within `league`. Surrounding whitespace is ignored.
pub fn would_duplicate_team_name(teams: &[Team], league: League, name: &str) -> bool {
    let wanted = name.trim().to_lowercase();
    teams
        .iter()
        .filter(|t| t.league == league)
        .any(|t| t.name.trim().to_lowercase() == wanted)
}

/// Validate a prospective match between `home` and `away` in `league`.
pub fn check_match(
    matches: &[Match],
    league: League,
    home: Option<&str>,
    away: Option<&str>,
) -> Result<(), MatchRejection> {
    let (Some(home), Some(away)) = (home, away) else {
        return Err(MatchRejection::MissingTeam);
    };
    if home.is_empty() || away.is_empty() {
        return Err(MatchRejection::MissingTeam);
    }
    if home == away {
        return Err(MatchRejection::SameTeam);
    }
    if would_duplicate_match(matches, league, home, away) {
        return Err(MatchRejection::AlreadyRecorded);
    }
    Ok(())
}

/// Validate a prospective team name, returning it trimmed.
pub fn check_team(teams: &[Team], league: League, name: &str) -> Result<String, TeamRejection> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(TeamRejection::EmptyName);
    }
    if would_duplicate_team_name(teams, league, trimmed) {
        return Err(TeamRejection::DuplicateName(trimmed.to_string()));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed;

    #[test]
    fn rejects_missing_and_identical_teams() {
        let matches = seed::default_matches();
        assert_eq!(
            check_match(&matches, League::Premier, None, Some("t2")),
            Err(MatchRejection::MissingTeam)
        );
        assert_eq!(
            check_match(&matches, League::Premier, Some(""), Some("t2")),
            Err(MatchRejection::MissingTeam)
        );
        assert_eq!(
            check_match(&matches, League::Premier, Some("t3"), Some("t3")),
            Err(MatchRejection::SameTeam)
        );
    }

    #[test]
    fn rejects_reverse_fixture() {
        let matches = seed::default_matches();
        // m1 is t1 vs t2; the reverse pairing counts as the same match.
        assert_eq!(
            check_match(&matches, League::Premier, Some("t2"), Some("t1")),
            Err(MatchRejection::AlreadyRecorded)
        );
        assert_eq!(check_match(&matches, League::Premier, Some("t3"), Some("t4")), Ok(()));
    }

    #[test]
    fn duplicate_match_is_league_scoped() {
        let matches = seed::default_matches();
        assert!(would_duplicate_match(&matches, League::Premier, "t1", "t2"));
        assert!(!would_duplicate_match(&matches, League::Wimbledon, "t1", "t2"));
    }

    #[test]
    fn team_names_clash_case_insensitively_within_league() {
        let teams = seed::default_teams();
        assert!(would_duplicate_team_name(&teams, League::Premier, "  arsenal "));
        assert!(!would_duplicate_team_name(&teams, League::Eurobasket, "Arsenal"));
        assert_eq!(
            check_team(&teams, League::Premier, "LIVERPOOL"),
            Err(TeamRejection::DuplicateName("LIVERPOOL".to_string()))
        );
    }

    #[test]
    fn team_name_is_trimmed() {
        let teams = seed::default_teams();
        assert_eq!(check_team(&teams, League::Premier, "  Spurs "), Ok("Spurs".to_string()));
        assert_eq!(check_team(&teams, League::Premier, "   "), Err(TeamRejection::EmptyName));
    }

    #[test]
    fn rejection_messages_are_user_facing() {
        assert_eq!(MatchRejection::AlreadyRecorded.to_string(), "Match already recorded.");
        assert_eq!(MatchRejection::SameTeam.to_string(), "Participants must be different.");
    }
}
