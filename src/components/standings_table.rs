use standings_core::{Standing, Team, team_name};
use tui::buffer::Buffer;
use tui::layout::Rect;
use tui::style::{Color, Modifier, Style};
use tui::widgets::Widget;

// ---------------------------------------------------------------------------
// Column layout
// ---------------------------------------------------------------------------

const RANK_W: usize = 3;
/// Right-aligned numeric columns after the name: P W D L GF GA GD Pts.
const STAT_HEADERS: [&str; 8] = ["P", "W", "D", "L", "GF", "GA", "GD", "Pts"];
const STAT_W: usize = 5;
const MIN_NAME_W: usize = 8;

/// Width left for the name column once rank and stats are laid out.
pub fn name_width(total: u16) -> usize {
    let fixed = RANK_W + 1 + STAT_HEADERS.len() * STAT_W;
    usize::from(total).saturating_sub(fixed).max(MIN_NAME_W)
}

pub fn truncate_name(name: &str, max: usize) -> String {
    if name.chars().count() <= max {
        return name.to_string();
    }
    let mut out: String = name.chars().take(max.saturating_sub(1)).collect();
    out.push('…');
    out
}

pub fn header_line(participant: &str, name_w: usize) -> String {
    let mut line = format!("{:>RANK_W$} {:<name_w$}", "#", participant);
    for h in STAT_HEADERS {
        line.push_str(&format!("{h:>STAT_W$}"));
    }
    line
}

pub fn row_line(rank: usize, name: &str, s: &Standing, name_w: usize) -> String {
    let gd = s.goal_difference();
    let gd = if gd > 0 { format!("+{gd}") } else { gd.to_string() };
    format!(
        "{rank:>RANK_W$} {:<name_w$}{:>STAT_W$}{:>STAT_W$}{:>STAT_W$}{:>STAT_W$}{:>STAT_W$}{:>STAT_W$}{gd:>STAT_W$}{:>STAT_W$}",
        truncate_name(name, name_w),
        s.played,
        s.wins,
        s.draws,
        s.losses,
        s.goals_for,
        s.goals_against,
        s.points,
    )
}

// ---------------------------------------------------------------------------
// Widget
// ---------------------------------------------------------------------------

/// Ranked table for one league. `rows` must already be sorted.
pub struct StandingsTable<'a> {
    pub rows: &'a [Standing],
    pub teams: &'a [Team],
    pub participant: &'a str,
}

impl Widget for StandingsTable<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        let name_w = name_width(area.width);
        let width = usize::from(area.width);

        buf.set_stringn(
            area.x,
            area.y,
            header_line(self.participant, name_w),
            width,
            Style::default().fg(Color::Gray).add_modifier(Modifier::BOLD),
        );

        if self.rows.is_empty() {
            if area.height > 1 {
                buf.set_stringn(
                    area.x,
                    area.y + 1,
                    format!("No {}s yet. Press t to add one.", self.participant.to_lowercase()),
                    width,
                    Style::default().fg(Color::DarkGray),
                );
            }
            return;
        }

        for (i, standing) in self.rows.iter().enumerate() {
            let Ok(offset) = u16::try_from(i + 1) else {
                break;
            };
            if offset >= area.height {
                break;
            }
            let style = if i == 0 && standing.played > 0 {
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            let name = team_name(self.teams, &standing.team_id);
            buf.set_stringn(
                area.x,
                area.y + offset,
                row_line(i + 1, name, standing, name_w),
                width,
                style,
            );
        }
    }
}
