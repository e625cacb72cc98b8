use tui::backend::Backend;
use tui::layout::{Alignment, Constraint, Layout, Rect};
use tui::style::{Color, Modifier, Style};
use tui::text::{Line, Span};
use tui::widgets::{Block, BorderType, Borders, Clear, Paragraph, Tabs};
use tui::{Frame, Terminal};
use tui_logger::TuiLoggerWidget;

use crate::app::{App, MenuItem};
use crate::components::results::ResultsList;
use crate::components::standings_table::StandingsTable;
use crate::state::app_state::{Form, MatchField, MatchForm, TeamForm};
use crate::ui::layout::LayoutAreas;

static TABS: &[&str; 2] = &["Standings", "Results"];

const RECENT_LIMIT: usize = 5;

const HELP_LINES: &[(&str, &str)] = &[
    ("1 / 2", "standings / results"),
    ("h l  ← →", "previous / next league"),
    ("j k  ↑ ↓", "scroll results"),
    ("t", "add a team or player"),
    ("m", "record a match"),
    ("D", "clear all data (press twice)"),
    ("R", "restore demo data"),
    ("f", "toggle full screen"),
    ("\"", "toggle log pane"),
    ("q", "quit"),
];

pub fn draw<B>(terminal: &mut Terminal<B>, app: &mut App)
where
    B: Backend,
{
    let current_size = terminal.size().unwrap_or_default();
    if current_size.width <= 10 || current_size.height <= 10 {
        return;
    }

    let mut layout = LayoutAreas::new(current_size);

    let result = terminal.draw(|f| {
        layout.update(f.area(), app.settings.full_screen, app.state.show_logs);

        if !app.settings.full_screen {
            draw_tabs(f, layout.tab_bar, app);
        }

        match app.state.active_tab {
            MenuItem::Standings => draw_standings(f, layout.main, app),
            MenuItem::Results => draw_results(f, layout.main, app),
            MenuItem::Help => draw_help(f, layout.main),
        }

        if app.state.show_logs {
            draw_logs(f, layout.logs);
        }
        draw_status(f, layout.status, app);

        match &app.state.form {
            Some(Form::Team(form)) => draw_team_form(f, layout.main, app, form),
            Some(Form::Match(form)) => draw_match_form(f, layout.main, app, form),
            None => {}
        }
    });
    if let Err(e) = result {
        log::error!("Failed to draw frame: {e}");
    }
}

pub fn default_border<'a>(color: Color) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(color))
}

fn draw_tabs(f: &mut Frame, tab_bar: [Rect; 2], app: &App) {
    let style = Style::default().fg(Color::White);
    let border_type = BorderType::Rounded;

    let tab_index = match app.state.active_tab {
        MenuItem::Standings => 0,
        MenuItem::Results => 1,
        MenuItem::Help => 0,
    };

    let titles: Vec<Line> = TABS.iter().map(|t| Line::from(*t)).collect();
    let tabs = Tabs::new(titles)
        .block(
            Block::default()
                .borders(Borders::LEFT | Borders::BOTTOM | Borders::TOP)
                .border_type(border_type),
        )
        .highlight_style(Style::default().add_modifier(Modifier::UNDERLINED))
        .select(tab_index)
        .style(style);
    f.render_widget(tabs, tab_bar[0]);

    let league = Paragraph::new(format!("◀ {} ▶  ? ", app.league().label()))
        .alignment(Alignment::Right)
        .block(
            Block::default()
                .borders(Borders::RIGHT | Borders::BOTTOM | Borders::TOP)
                .border_type(border_type),
        )
        .style(style);
    f.render_widget(league, tab_bar[1]);
}

fn draw_standings(f: &mut Frame, area: Rect, app: &App) {
    let league = app.league();
    let view = app.store.read();

    let [table_area, recent_area] =
        Layout::horizontal([Constraint::Percentage(65), Constraint::Percentage(35)]).areas(area);

    let block = default_border(Color::White).title(format!(
        " {} · {} {}s ",
        league.label(),
        app.league_teams().len(),
        league.participant().to_lowercase()
    ));
    let inner = block.inner(table_area);
    f.render_widget(block, table_area);

    let rows = view.standings(league);
    f.render_widget(
        StandingsTable {
            rows: &rows,
            teams: view.teams,
            participant: league.participant(),
        },
        inner,
    );

    let block = default_border(Color::DarkGray).title(" Recent ");
    let inner = block.inner(recent_area);
    f.render_widget(block, recent_area);

    let recent = view.recent_matches(league, RECENT_LIMIT);
    f.render_widget(
        ResultsList {
            matches: &recent,
            teams: view.teams,
            offset: 0,
        },
        inner,
    );
}

fn draw_results(f: &mut Frame, area: Rect, app: &App) {
    let league = app.league();
    let view = app.store.read();
    let all = view.recent_matches(league, usize::MAX);

    let block = default_border(Color::White)
        .title(format!(" {} results ({}) ", league.label(), all.len()));
    let inner = block.inner(area);
    f.render_widget(block, area);

    f.render_widget(
        ResultsList {
            matches: &all,
            teams: view.teams,
            offset: usize::from(app.state.results_offset),
        },
        inner,
    );
}

fn draw_help(f: &mut Frame, area: Rect) {
    let block = default_border(Color::DarkGray).title(" Help ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let mut lines: Vec<Line> = HELP_LINES
        .iter()
        .map(|(keys, action)| {
            Line::from(vec![
                Span::styled(
                    format!("{keys:>10}  "),
                    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
                ),
                Span::raw(*action),
            ])
        })
        .collect();
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Esc to go back",
        Style::default().fg(Color::DarkGray),
    )));
    f.render_widget(Paragraph::new(lines), inner);
}

fn draw_logs(f: &mut Frame, area: Rect) {
    let logger = TuiLoggerWidget::default()
        .block(default_border(Color::DarkGray).title(" Logs "))
        .style_error(Style::default().fg(Color::Red))
        .style_warn(Style::default().fg(Color::Yellow))
        .style_info(Style::default().fg(Color::Gray))
        .style_debug(Style::default().fg(Color::DarkGray));
    f.render_widget(logger, area);
}

fn draw_status(f: &mut Frame, area: Rect, app: &App) {
    let [left, right] =
        Layout::horizontal([Constraint::Fill(1), Constraint::Length(18)]).areas(area);

    let (text, style) = match &app.state.status {
        Some(status) if status.is_error => (status.text.as_str(), Style::default().fg(Color::Red)),
        Some(status) => (status.text.as_str(), Style::default().fg(Color::Green)),
        None => (
            "t add · m match · h/l league · ? help",
            Style::default().fg(Color::DarkGray),
        ),
    };
    let style = if app.state.clear_pending() {
        style.add_modifier(Modifier::BOLD)
    } else {
        style
    };
    f.render_widget(Paragraph::new(format!(" {text}")).style(style), left);

    if let Some(saved) = &app.state.last_saved {
        f.render_widget(
            Paragraph::new(format!("saved {saved} "))
                .alignment(Alignment::Right)
                .style(Style::default().fg(Color::DarkGray)),
            right,
        );
    }
}

// ---------------------------------------------------------------------------
// Forms
// ---------------------------------------------------------------------------

fn form_frame(f: &mut Frame, area: Rect, title: String, height: u16) -> Rect {
    let popup = LayoutAreas::popup(area, 56, height);
    f.render_widget(Clear, popup);
    let block = default_border(Color::Cyan).title(title);
    let inner = block.inner(popup);
    f.render_widget(block, popup);
    inner
}

fn error_line(error: Option<&str>) -> Line<'_> {
    match error {
        Some(message) => Line::from(Span::styled(message, Style::default().fg(Color::Red))),
        None => Line::from(""),
    }
}

fn draw_team_form(f: &mut Frame, area: Rect, app: &App, form: &TeamForm) {
    let league = app.league();
    let inner = form_frame(
        f,
        area,
        format!(" Add {} · {} ", league.participant(), league.label()),
        7,
    );

    let lines = vec![
        Line::from(vec![
            Span::styled("Name: ", Style::default().fg(Color::Gray)),
            Span::styled(
                format!("{}_", form.name),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(""),
        error_line(form.error.as_deref()),
        Line::from(Span::styled(
            "Enter save · Esc close",
            Style::default().fg(Color::DarkGray),
        )),
    ];
    f.render_widget(Paragraph::new(lines), inner);
}

fn draw_match_form(f: &mut Frame, area: Rect, app: &App, form: &MatchForm) {
    let league = app.league();
    let participant = league.participant().to_lowercase();
    let inner = form_frame(f, area, format!(" Record Match · {} ", league.label()), 10);
    let view = app.store.read();

    let field = |label: String, value: String, which: MatchField| {
        let focused = form.focus == which;
        let value_style = if focused {
            Style::default().fg(Color::Black).bg(Color::Cyan)
        } else {
            Style::default().fg(Color::White)
        };
        let value = if which.is_selector() {
            format!("◀ {value} ▶")
        } else {
            format!("{value}_")
        };
        Line::from(vec![
            Span::styled(format!("{label:<12}"), Style::default().fg(Color::Gray)),
            Span::styled(value, value_style),
        ])
    };
    let chosen = |id: Option<&str>| match id {
        Some(id) => view.team_name(id).to_string(),
        None => format!("select {participant}"),
    };

    let lines = vec![
        field(format!("Home {participant}"), chosen(form.home.as_deref()), MatchField::Home),
        field(format!("Away {participant}"), chosen(form.away.as_deref()), MatchField::Away),
        field("Home score".to_string(), form.home_score.clone(), MatchField::HomeScore),
        field("Away score".to_string(), form.away_score.clone(), MatchField::AwayScore),
        Line::from(""),
        error_line(form.error.as_deref()),
        Line::from(Span::styled(
            "Tab field · ←/→ choose · Enter save · Esc close",
            Style::default().fg(Color::DarkGray),
        )),
    ];
    f.render_widget(Paragraph::new(lines), inner);
}
