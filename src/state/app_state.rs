use crate::app::MenuItem;
use standings_core::Team;
use std::time::{Duration, Instant};

/// How long a first clear-all press waits for its confirmation.
pub const CONFIRM_WINDOW: Duration = Duration::from_secs(3);
/// How long a status message stays on screen.
pub const STATUS_TTL: Duration = Duration::from_secs(4);

const MAX_SCORE_DIGITS: usize = 3;

// ---------------------------------------------------------------------------
// Status line
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct StatusLine {
    pub text: String,
    pub is_error: bool,
    pub shown_at: Instant,
}

// ---------------------------------------------------------------------------
// Entry forms
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub enum Form {
    Team(TeamForm),
    Match(MatchForm),
}

#[derive(Debug, Clone, Default)]
pub struct TeamForm {
    pub name: String,
    pub error: Option<String>,
}

impl TeamForm {
    pub fn push(&mut self, c: char) {
        self.name.push(c);
        self.error = None;
    }

    pub fn backspace(&mut self) {
        self.name.pop();
        self.error = None;
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum MatchField {
    #[default]
    Home,
    Away,
    HomeScore,
    AwayScore,
}

impl MatchField {
    pub fn next(self) -> Self {
        match self {
            MatchField::Home => MatchField::Away,
            MatchField::Away => MatchField::HomeScore,
            MatchField::HomeScore => MatchField::AwayScore,
            MatchField::AwayScore => MatchField::Home,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            MatchField::Home => MatchField::AwayScore,
            MatchField::Away => MatchField::Home,
            MatchField::HomeScore => MatchField::Away,
            MatchField::AwayScore => MatchField::HomeScore,
        }
    }

    pub fn is_selector(self) -> bool {
        matches!(self, MatchField::Home | MatchField::Away)
    }
}

#[derive(Debug, Clone, Default)]
pub struct MatchForm {
    pub home: Option<String>,
    pub away: Option<String>,
    pub home_score: String,
    pub away_score: String,
    pub focus: MatchField,
    pub error: Option<String>,
}

impl MatchForm {
    /// Candidates for the away selector: every team except the chosen home side.
    pub fn away_options<'a>(&self, teams: &[&'a Team]) -> Vec<&'a Team> {
        teams
            .iter()
            .copied()
            .filter(|t| Some(t.id.as_str()) != self.home.as_deref())
            .collect()
    }

    /// Step the focused selector through `teams`. No-op on score fields.
    pub fn cycle(&mut self, teams: &[&Team], forward: bool) {
        let options = match self.focus {
            MatchField::Home => teams.to_vec(),
            MatchField::Away => self.away_options(teams),
            _ => return,
        };
        if options.is_empty() {
            return;
        }

        let current = match self.focus {
            MatchField::Home => self.home.as_deref(),
            _ => self.away.as_deref(),
        };
        let position = current.and_then(|id| options.iter().position(|t| t.id == id));
        let len = options.len();
        let index = match (position, forward) {
            (Some(i), true) => (i + 1) % len,
            (Some(i), false) => (i + len - 1) % len,
            (None, true) => 0,
            (None, false) => len - 1,
        };
        let chosen = options[index].id.clone();

        if self.focus == MatchField::Home {
            if self.away.as_deref() == Some(chosen.as_str()) {
                self.away = None;
            }
            self.home = Some(chosen);
        } else {
            self.away = Some(chosen);
        }
        self.error = None;
    }

    /// Type into the focused score field. Anything but a digit is ignored.
    pub fn push(&mut self, c: char) {
        if !c.is_ascii_digit() {
            return;
        }
        let field = match self.focus {
            MatchField::HomeScore => &mut self.home_score,
            MatchField::AwayScore => &mut self.away_score,
            _ => return,
        };
        if field.len() < MAX_SCORE_DIGITS {
            field.push(c);
            self.error = None;
        }
    }

    pub fn backspace(&mut self) {
        match self.focus {
            MatchField::HomeScore => {
                self.home_score.pop();
            }
            MatchField::AwayScore => {
                self.away_score.pop();
            }
            MatchField::Home => self.home = None,
            MatchField::Away => self.away = None,
        }
        self.error = None;
    }

    pub fn scores(&self) -> Option<(u32, u32)> {
        let home = self.home_score.parse().ok()?;
        let away = self.away_score.parse().ok()?;
        Some((home, away))
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

// ---------------------------------------------------------------------------
// Top-level UI state
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct AppState {
    pub active_tab: MenuItem,
    pub previous_tab: MenuItem,
    pub show_logs: bool,
    pub form: Option<Form>,
    pub status: Option<StatusLine>,
    pub clear_armed_at: Option<Instant>,
    pub results_offset: u16,
    pub last_saved: Option<String>,
    pub quit_requested: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_status(&mut self, text: impl Into<String>, is_error: bool, now: Instant) {
        self.status = Some(StatusLine {
            text: text.into(),
            is_error,
            shown_at: now,
        });
    }

    /// First press arms, a second press within the window confirms.
    pub fn press_clear(&mut self, now: Instant) -> bool {
        match self.clear_armed_at.take() {
            Some(armed) if now.saturating_duration_since(armed) <= CONFIRM_WINDOW => true,
            _ => {
                self.clear_armed_at = Some(now);
                false
            }
        }
    }

    pub fn clear_pending(&self) -> bool {
        self.clear_armed_at.is_some()
    }

    /// Drop anything whose time is up. Returns whether something changed.
    pub fn expire(&mut self, now: Instant) -> bool {
        let mut changed = false;
        if let Some(armed) = self.clear_armed_at
            && now.saturating_duration_since(armed) > CONFIRM_WINDOW
        {
            self.clear_armed_at = None;
            changed = true;
        }
        if let Some(status) = &self.status
            && now.saturating_duration_since(status.shown_at) > STATUS_TTL
        {
            self.status = None;
            changed = true;
        }
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use standings_core::League;

    fn teams() -> Vec<Team> {
        ["a", "b", "c"]
            .into_iter()
            .map(|id| Team {
                id: id.to_string(),
                name: id.to_uppercase(),
                league: League::Premier,
            })
            .collect()
    }

    #[test]
    fn home_selector_wraps_both_ways() {
        let teams = teams();
        let refs: Vec<&Team> = teams.iter().collect();
        let mut form = MatchForm::default();

        form.cycle(&refs, true);
        assert_eq!(form.home.as_deref(), Some("a"));
        form.cycle(&refs, false);
        assert_eq!(form.home.as_deref(), Some("c"));
        form.cycle(&refs, true);
        assert_eq!(form.home.as_deref(), Some("a"));
    }

    #[test]
    fn away_options_exclude_home() {
        let teams = teams();
        let refs: Vec<&Team> = teams.iter().collect();
        let form = MatchForm {
            home: Some("b".into()),
            ..MatchForm::default()
        };
        let ids: Vec<&str> = form.away_options(&refs).iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, ["a", "c"]);
    }

    #[test]
    fn away_selector_skips_home() {
        let teams = teams();
        let refs: Vec<&Team> = teams.iter().collect();
        let mut form = MatchForm {
            home: Some("a".into()),
            focus: MatchField::Away,
            ..MatchForm::default()
        };
        form.cycle(&refs, true);
        assert_eq!(form.away.as_deref(), Some("b"));
        form.cycle(&refs, true);
        assert_eq!(form.away.as_deref(), Some("c"));
        form.cycle(&refs, true);
        assert_eq!(form.away.as_deref(), Some("b"));
    }

    #[test]
    fn picking_away_side_as_home_clears_away() {
        let teams = teams();
        let refs: Vec<&Team> = teams.iter().collect();
        let mut form = MatchForm {
            home: Some("a".into()),
            away: Some("b".into()),
            ..MatchForm::default()
        };
        form.cycle(&refs, true);
        assert_eq!(form.home.as_deref(), Some("b"));
        assert_eq!(form.away, None);
    }

    #[test]
    fn selectors_ignore_empty_team_list() {
        let mut form = MatchForm::default();
        form.cycle(&[], true);
        assert_eq!(form.home, None);
    }

    #[test]
    fn score_fields_accept_digits_only() {
        let mut form = MatchForm {
            focus: MatchField::HomeScore,
            ..MatchForm::default()
        };
        for c in "1x2-".chars() {
            form.push(c);
        }
        assert_eq!(form.home_score, "12");
        form.focus = MatchField::AwayScore;
        for c in "12345".chars() {
            form.push(c);
        }
        assert_eq!(form.away_score, "123");
        assert_eq!(form.scores(), Some((12, 123)));
    }

    #[test]
    fn scores_need_both_fields() {
        let form = MatchForm {
            home_score: "2".into(),
            ..MatchForm::default()
        };
        assert_eq!(form.scores(), None);
    }

    #[test]
    fn typing_clears_inline_error() {
        let mut form = TeamForm {
            name: "Ar".into(),
            error: Some("Name is required.".into()),
        };
        form.push('s');
        assert_eq!(form.name, "Ars");
        assert!(form.error.is_none());
    }

    #[test]
    fn field_focus_cycles() {
        let mut field = MatchField::Home;
        for _ in 0..4 {
            field = field.next();
        }
        assert_eq!(field, MatchField::Home);
        assert_eq!(MatchField::Home.prev(), MatchField::AwayScore);
    }

    #[test]
    fn clear_needs_second_press_inside_window() {
        let mut state = AppState::new();
        let start = Instant::now();
        assert!(!state.press_clear(start));
        assert!(state.clear_pending());
        assert!(state.press_clear(start + Duration::from_secs(2)));
        assert!(!state.clear_pending());
    }

    #[test]
    fn late_second_press_rearms() {
        let mut state = AppState::new();
        let start = Instant::now();
        assert!(!state.press_clear(start));
        assert!(!state.press_clear(start + Duration::from_secs(4)));
        assert!(state.clear_pending());
    }

    #[test]
    fn pending_clear_and_status_expire() {
        let mut state = AppState::new();
        let start = Instant::now();
        state.press_clear(start);
        state.set_status("Saved", false, start);

        assert!(!state.expire(start + Duration::from_secs(1)));
        assert!(state.expire(start + Duration::from_millis(3_500)));
        assert!(!state.clear_pending());
        assert!(state.status.is_some());
        assert!(state.expire(start + Duration::from_secs(5)));
        assert!(state.status.is_none());
    }
}
