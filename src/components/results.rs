use chrono::{DateTime, Local, Utc};
use standings_core::{Match, Team, team_name};
use tui::buffer::Buffer;
use tui::layout::Rect;
use tui::style::{Color, Style};
use tui::widgets::Widget;

use crate::components::standings_table::truncate_name;

const DATE_W: usize = 13;
const SCORE_W: usize = 9;

pub fn played_on(timestamp: DateTime<Utc>) -> String {
    timestamp.with_timezone(&Local).format("%d %b %H:%M").to_string()
}

/// `home  2 - 1  away`, names padded so scores line up down the list.
pub fn score_line(home: &str, away: &str, m: &Match, name_w: usize) -> String {
    let score = format!("{} - {}", m.home_score, m.away_score);
    format!(
        "{:>name_w$} {score:^SCORE_W$} {}",
        truncate_name(home, name_w),
        truncate_name(away, name_w),
    )
}

/// Result list, newest first. `matches` arrive already ordered.
pub struct ResultsList<'a> {
    pub matches: &'a [&'a Match],
    pub teams: &'a [Team],
    pub offset: usize,
}

impl Widget for ResultsList<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        let width = usize::from(area.width);

        if self.matches.is_empty() {
            buf.set_stringn(
                area.x,
                area.y,
                "No results yet. Press m to record one.",
                width,
                Style::default().fg(Color::DarkGray),
            );
            return;
        }

        let name_w = width.saturating_sub(DATE_W + SCORE_W + 2) / 2;
        let rows = self.matches.iter().skip(self.offset).take(usize::from(area.height));
        for (y, m) in (area.y..).zip(rows) {
            buf.set_stringn(
                area.x,
                y,
                played_on(m.timestamp),
                width,
                Style::default().fg(Color::DarkGray),
            );
            if width <= DATE_W {
                continue;
            }
            let line = score_line(
                team_name(self.teams, &m.home_team_id),
                team_name(self.teams, &m.away_team_id),
                m,
                name_w,
            );
            buf.set_stringn(
                area.x + DATE_W as u16,
                y,
                line,
                width.saturating_sub(DATE_W),
                Style::default().fg(Color::White),
            );
        }
    }
}
