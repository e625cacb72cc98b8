use serde::Serialize;
use standings_core::{League, Standing, StoreView};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeagueTable<'a> {
    pub league: League,
    pub label: &'static str,
    pub rows: Vec<TableRow<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableRow<'a> {
    pub rank: usize,
    pub name: &'a str,
    #[serde(flatten)]
    pub standing: Standing,
    pub goal_difference: i64,
}

pub fn league_tables<'a>(view: &StoreView<'a>) -> Vec<LeagueTable<'a>> {
    League::ALL
        .into_iter()
        .map(|league| LeagueTable {
            league,
            label: league.label(),
            rows: view
                .standings(league)
                .into_iter()
                .enumerate()
                .map(|(i, standing)| TableRow {
                    rank: i + 1,
                    name: view.team_name(&standing.team_id),
                    goal_difference: standing.goal_difference(),
                    standing,
                })
                .collect(),
        })
        .collect()
}

/// Every league table as pretty JSON, for `--export`.
pub fn to_json(view: &StoreView<'_>) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&league_tables(view))
}
