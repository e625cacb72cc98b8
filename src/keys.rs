use crate::app::{App, MenuItem};
use crossterm::event::KeyCode::Char;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Mutex;

pub async fn handle_key_bindings(key_event: KeyEvent, app: &Arc<Mutex<App>>) {
    if key_event.kind == KeyEventKind::Release {
        return;
    }
    let mut guard = app.lock().await;
    let now = Instant::now();

    if guard.state.form.is_some() {
        handle_form_keys(key_event, &mut guard, now);
        return;
    }

    match (guard.state.active_tab, key_event.code, key_event.modifiers) {
        // Quit
        (_, Char('q'), _) | (_, Char('c'), KeyModifiers::CONTROL) => guard.request_quit(),

        // Tab switching
        (_, Char('1'), _) => guard.update_tab(MenuItem::Standings),
        (_, Char('2'), _) => guard.update_tab(MenuItem::Results),
        (_, Char('?'), _) => guard.update_tab(MenuItem::Help),
        (MenuItem::Help, KeyCode::Esc, _) => guard.exit_help(),

        // League selection
        (_, Char('l') | KeyCode::Right, _) => guard.next_league(),
        (_, Char('h') | KeyCode::Left, _) => guard.prev_league(),

        // Results scrolling
        (MenuItem::Results, Char('j') | KeyCode::Down, _) => guard.scroll_results_down(),
        (MenuItem::Results, Char('k') | KeyCode::Up, _) => guard.scroll_results_up(),

        // Entry
        (_, Char('t'), _) => guard.open_team_form(),
        (_, Char('m'), _) => guard.open_match_form(),
        (_, Char('D'), _) => guard.press_clear(now),
        (_, Char('R'), _) => guard.reset_demo(now),

        // Global
        (_, Char('f'), _) => guard.toggle_full_screen(),
        (_, Char('"'), _) => guard.toggle_show_logs(),

        _ => {}
    }
}

fn handle_form_keys(key_event: KeyEvent, app: &mut App, now: Instant) {
    match (key_event.code, key_event.modifiers) {
        (Char('c'), KeyModifiers::CONTROL) => app.request_quit(),
        (KeyCode::Esc, _) => app.close_form(),
        (KeyCode::Enter, _) => app.submit_form(now),
        (KeyCode::Tab | KeyCode::Down, _) => app.form_next_field(),
        (KeyCode::BackTab | KeyCode::Up, _) => app.form_prev_field(),
        (KeyCode::Right, _) => app.form_cycle(true),
        (KeyCode::Left, _) => app.form_cycle(false),
        (KeyCode::Backspace, _) => app.form_backspace(),
        (Char(c), _) => app.form_input(c),
        _ => {}
    }
}
