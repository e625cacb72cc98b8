use crate::state::app_settings::AppSettings;
use crate::state::app_state::{AppState, Form, MatchForm, TeamForm};
use chrono::Local;
use standings_core::guard::{self, MatchRejection};
use standings_core::{League, NewMatch, StateStore, Team};
use std::time::Instant;

#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub enum MenuItem {
    #[default]
    Standings,
    Results,
    Help,
}

pub struct App {
    pub settings: AppSettings,
    pub state: AppState,
    pub store: StateStore,
}

impl App {
    pub fn new(settings: AppSettings, store: StateStore) -> Self {
        Self {
            state: AppState::new(),
            settings,
            store,
        }
    }

    pub fn league(&self) -> League {
        self.store.current_league()
    }

    /// Teams of the league on screen, in insertion order.
    pub fn league_teams(&self) -> Vec<&Team> {
        self.store.read().teams_in(self.league())
    }

    // -----------------------------------------------------------------------
    // Navigation
    // -----------------------------------------------------------------------

    pub fn update_tab(&mut self, next: MenuItem) {
        if self.state.active_tab == next {
            return;
        }
        self.state.previous_tab = self.state.active_tab;
        self.state.active_tab = next;
        self.state.results_offset = 0;
    }

    pub fn exit_help(&mut self) {
        if self.state.active_tab == MenuItem::Help {
            self.state.active_tab = self.state.previous_tab;
        }
    }

    pub fn toggle_show_logs(&mut self) {
        self.state.show_logs = !self.state.show_logs;
    }

    /// Ask the UI loop to stop after the current event.
    pub fn request_quit(&mut self) {
        self.state.quit_requested = true;
    }

    pub fn toggle_full_screen(&mut self) {
        self.settings.full_screen = !self.settings.full_screen;
    }

    pub fn next_league(&mut self) {
        self.store.set_league(self.league().next());
        self.state.results_offset = 0;
    }

    pub fn prev_league(&mut self) {
        self.store.set_league(self.league().prev());
        self.state.results_offset = 0;
    }

    pub fn scroll_results_down(&mut self) {
        let total = self.store.read().matches_in(self.league()).len();
        let max = u16::try_from(total.saturating_sub(1)).unwrap_or(u16::MAX);
        self.state.results_offset = self.state.results_offset.saturating_add(1).min(max);
    }

    pub fn scroll_results_up(&mut self) {
        self.state.results_offset = self.state.results_offset.saturating_sub(1);
    }

    // -----------------------------------------------------------------------
    // Forms
    // -----------------------------------------------------------------------

    pub fn open_team_form(&mut self) {
        self.state.form = Some(Form::Team(TeamForm::default()));
    }

    pub fn open_match_form(&mut self) {
        self.state.form = Some(Form::Match(MatchForm::default()));
    }

    pub fn close_form(&mut self) {
        self.state.form = None;
    }

    pub fn form_input(&mut self, c: char) {
        match self.state.form.as_mut() {
            Some(Form::Team(form)) => form.push(c),
            Some(Form::Match(form)) => form.push(c),
            None => {}
        }
    }

    pub fn form_backspace(&mut self) {
        match self.state.form.as_mut() {
            Some(Form::Team(form)) => form.backspace(),
            Some(Form::Match(form)) => form.backspace(),
            None => {}
        }
    }

    pub fn form_next_field(&mut self) {
        if let Some(Form::Match(form)) = self.state.form.as_mut() {
            form.focus = form.focus.next();
        }
    }

    pub fn form_prev_field(&mut self) {
        if let Some(Form::Match(form)) = self.state.form.as_mut() {
            form.focus = form.focus.prev();
        }
    }

    pub fn form_cycle(&mut self, forward: bool) {
        let league = self.store.current_league();
        let teams = self.store.read().teams_in(league);
        if let Some(Form::Match(form)) = self.state.form.as_mut() {
            form.cycle(&teams, forward);
        }
    }

    pub fn submit_form(&mut self, now: Instant) {
        match self.state.form {
            Some(Form::Team(_)) => self.submit_team(now),
            Some(Form::Match(_)) => self.submit_match(now),
            None => {}
        }
    }

    fn submit_team(&mut self, now: Instant) {
        let league = self.store.current_league();
        let Some(Form::Team(form)) = self.state.form.as_mut() else {
            return;
        };

        let checked = guard::check_team(self.store.read().teams, league, &form.name);
        let added = checked
            .map_err(|e| e.to_string())
            .and_then(|name| self.store.add_team(&name, league).map_err(|e| e.to_string()));

        let text = match added {
            Ok(team) => {
                form.clear();
                format!("Added {}.", team.name)
            }
            Err(message) => {
                form.error = Some(message);
                return;
            }
        };
        self.state.set_status(text, false, now);
    }

    fn submit_match(&mut self, now: Instant) {
        let league = self.store.current_league();
        let Some(Form::Match(form)) = self.state.form.as_mut() else {
            return;
        };

        let rejection = match form.scores() {
            None => Some(MatchRejection::MissingTeam),
            Some(_) => guard::check_match(
                self.store.read().matches,
                league,
                form.home.as_deref(),
                form.away.as_deref(),
            )
            .err(),
        };
        if let Some(rejection) = rejection {
            form.error = Some(rejection.to_string());
            return;
        }
        let (Some((home_score, away_score)), Some(home), Some(away)) =
            (form.scores(), form.home.clone(), form.away.clone())
        else {
            return;
        };

        let recorded = self.store.add_match(NewMatch {
            home_team_id: home,
            away_team_id: away,
            home_score,
            away_score,
            league,
        });
        form.clear();

        let view = self.store.read();
        let text = format!(
            "Recorded {} {}-{} {}.",
            view.team_name(&recorded.home_team_id),
            recorded.home_score,
            recorded.away_score,
            view.team_name(&recorded.away_team_id)
        );
        self.state.set_status(text, false, now);
    }

    // -----------------------------------------------------------------------
    // Bulk resets
    // -----------------------------------------------------------------------

    pub fn press_clear(&mut self, now: Instant) {
        if self.state.press_clear(now) {
            self.store.reset_all();
            self.state.form = None;
            self.state.results_offset = 0;
            self.state.set_status("All data cleared.", false, now);
        } else {
            self.state
                .set_status("Press D again within 3s to clear all data.", true, now);
        }
    }

    pub fn reset_demo(&mut self, now: Instant) {
        self.store.reset_to_defaults();
        self.state.form = None;
        self.state.clear_armed_at = None;
        self.state.results_offset = 0;
        self.state.set_status("Demo data restored.", false, now);
    }

    // -----------------------------------------------------------------------
    // Background events
    // -----------------------------------------------------------------------

    pub fn on_tick(&mut self, now: Instant) -> bool {
        self.state.expire(now)
    }

    pub fn on_saved(&mut self) {
        self.state.last_saved = Some(Local::now().format("%H:%M:%S").to_string());
    }

    pub fn on_save_failed(&mut self, message: String, now: Instant) {
        self.state
            .set_status(format!("Could not save: {message}"), true, now);
    }
}
