use crate::{League, Match, Standing, Team};
use std::cmp::Ordering;
use std::collections::HashMap;

/// Name shown for a team id that no longer resolves.
pub const UNKNOWN_TEAM: &str = "Unknown";

const WIN_POINTS: u32 = 3;
const DRAW_POINTS: u32 = 1;

/// Fold `matches` into one ranked [`Standing`] per team in `teams`.
///
/// Callers pass data already filtered to a single league. A match whose home
/// or away id is not in `teams` is skipped and contributes nothing to either
/// side. Ranking is points, then goal difference, then goals for; teams still
/// level keep their order from `teams`.
pub fn calculate_standings(teams: &[Team], matches: &[Match]) -> Vec<Standing> {
    let mut table: Vec<Standing> = Vec::with_capacity(teams.len());
    let mut index: HashMap<&str, usize> = HashMap::with_capacity(teams.len());

    for team in teams {
        index.entry(team.id.as_str()).or_insert_with(|| {
            table.push(Standing::new(team.id.clone()));
            table.len() - 1
        });
    }

    for m in matches {
        let (Some(&home), Some(&away)) = (
            index.get(m.home_team_id.as_str()),
            index.get(m.away_team_id.as_str()),
        ) else {
            continue;
        };
        record(&mut table[home], m.home_score, m.away_score);
        record(&mut table[away], m.away_score, m.home_score);
    }

    // `sort_by` is stable, which keeps the tie order promised above.
    table.sort_by(compare_rank);
    table
}

fn record(standing: &mut Standing, scored: u32, conceded: u32) {
    standing.played += 1;
    standing.goals_for = standing.goals_for.saturating_add(scored);
    standing.goals_against = standing.goals_against.saturating_add(conceded);
    match scored.cmp(&conceded) {
        Ordering::Greater => {
            standing.wins += 1;
            standing.points += WIN_POINTS;
        }
        Ordering::Less => standing.losses += 1,
        Ordering::Equal => {
            standing.draws += 1;
            standing.points += DRAW_POINTS;
        }
    }
}

fn compare_rank(a: &Standing, b: &Standing) -> Ordering {
    b.points
        .cmp(&a.points)
        .then_with(|| b.goal_difference().cmp(&a.goal_difference()))
        .then_with(|| b.goals_for.cmp(&a.goals_for))
}

/// Display name for `id`, or [`UNKNOWN_TEAM`] for a dangling reference.
pub fn team_name<'a>(teams: &'a [Team], id: &str) -> &'a str {
    teams
        .iter()
        .find(|t| t.id == id)
        .map(|t| t.name.as_str())
        .unwrap_or(UNKNOWN_TEAM)
}

/// Whether `a` and `b` already met in `league`, in either home/away order.
pub fn has_match(matches: &[Match], league: League, a: &str, b: &str) -> bool {
    matches
        .iter()
        .any(|m| m.league == league && m.involves_pair(a, b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};

    fn team(id: &str) -> Team {
        Team {
            id: id.to_string(),
            name: id.to_uppercase(),
            league: League::Premier,
        }
    }

    fn result(home: &str, away: &str, hs: u32, aws: u32) -> Match {
        Match {
            id: format!("{home}-{away}"),
            home_team_id: home.to_string(),
            away_team_id: away.to_string(),
            home_score: hs,
            away_score: aws,
            league: League::Premier,
            timestamp: DateTime::<Utc>::default(),
        }
    }

    fn find<'a>(table: &'a [Standing], id: &str) -> &'a Standing {
        table.iter().find(|s| s.team_id == id).unwrap()
    }

    #[test]
    fn empty_input_yields_empty_table() {
        assert!(calculate_standings(&[], &[]).is_empty());
        assert!(calculate_standings(&[], &[result("a", "b", 1, 0)]).is_empty());
    }

    #[test]
    fn home_win_awards_three_points() {
        let table = calculate_standings(&[team("a"), team("b")], &[result("a", "b", 2, 1)]);
        let home = find(&table, "a");
        let away = find(&table, "b");
        assert_eq!((home.wins, home.points, home.played), (1, 3, 1));
        assert_eq!((away.losses, away.points, away.played), (1, 0, 1));
        assert_eq!((home.goals_for, home.goals_against), (2, 1));
        assert_eq!((away.goals_for, away.goals_against), (1, 2));
    }

    #[test]
    fn away_win_is_mirrored() {
        let table = calculate_standings(&[team("a"), team("b")], &[result("a", "b", 0, 3)]);
        assert_eq!(table[0].team_id, "b");
        assert_eq!((table[0].wins, table[0].points), (1, 3));
        assert_eq!((table[1].losses, table[1].points), (1, 0));
    }

    #[test]
    fn draw_gives_one_point_each() {
        let table = calculate_standings(&[team("a"), team("b")], &[result("a", "b", 1, 1)]);
        for s in &table {
            assert_eq!((s.draws, s.points, s.played), (1, 1, 1));
        }
    }

    #[test]
    fn dangling_reference_is_inert() {
        let table = calculate_standings(
            &[team("a"), team("b")],
            &[result("a", "ghost", 5, 0), result("ghost", "b", 0, 2)],
        );
        assert!(table.iter().all(|s| s.played == 0 && s.points == 0));
    }

    #[test]
    fn ranks_by_points_then_goal_difference() {
        let teams = [team("a"), team("b"), team("c"), team("d")];
        let matches = [
            // a and b both finish on 3 points; b has the better difference.
            result("a", "c", 1, 0),
            result("b", "d", 4, 0),
            result("c", "d", 3, 3),
        ];
        let order: Vec<_> = calculate_standings(&teams, &matches)
            .into_iter()
            .map(|s| s.team_id)
            .collect();
        assert_eq!(order, ["b", "a", "c", "d"]);
    }

    #[test]
    fn goals_for_breaks_equal_difference() {
        let teams = [team("q"), team("p"), team("r"), team("s")];
        let matches = [result("q", "s", 1, 0), result("p", "r", 3, 2)];
        let table = calculate_standings(&teams, &matches);
        assert_eq!(table[0].team_id, "p");
        assert_eq!(table[1].team_id, "q");
        assert_eq!(table[0].goal_difference(), table[1].goal_difference());
    }

    #[test]
    fn full_ties_keep_input_order() {
        let teams = [team("z"), team("y"), team("x")];
        let order: Vec<_> = calculate_standings(&teams, &[])
            .into_iter()
            .map(|s| s.team_id)
            .collect();
        assert_eq!(order, ["z", "y", "x"]);
    }

    #[test]
    fn duplicate_team_ids_collapse_to_one_row() {
        let table = calculate_standings(&[team("a"), team("a"), team("b")], &[result("a", "b", 1, 0)]);
        assert_eq!(table.len(), 2);
        assert_eq!(find(&table, "a").played, 1);
    }

    #[test]
    fn huge_scores_saturate_instead_of_overflowing() {
        let matches = [result("a", "b", u32::MAX, 0), result("a", "b", 1, 0)];
        let table = calculate_standings(&[team("a"), team("b")], &matches);
        let a = find(&table, "a");
        assert_eq!(a.goals_for, u32::MAX);
        assert_eq!(a.points, 6);
        assert_eq!(find(&table, "b").goals_against, u32::MAX);
        assert_eq!(table[0].team_id, "a");
    }

    #[test]
    fn team_name_falls_back_to_placeholder() {
        let teams = [team("a")];
        assert_eq!(team_name(&teams, "a"), "A");
        assert_eq!(team_name(&teams, "missing"), UNKNOWN_TEAM);
    }

    #[test]
    fn has_match_is_symmetric_and_league_scoped() {
        let matches = [result("a", "b", 1, 0)];
        assert!(has_match(&matches, League::Premier, "a", "b"));
        assert!(has_match(&matches, League::Premier, "b", "a"));
        assert!(!has_match(&matches, League::Eurobasket, "a", "b"));
        assert!(!has_match(&matches, League::Premier, "a", "c"));
    }
}
