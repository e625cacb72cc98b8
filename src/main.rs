mod app;
mod components;
mod draw;
mod export;
mod keys;
mod state;
mod ui;

use crate::app::App;
use crate::state::app_settings::AppSettings;
use crate::state::messages::{PersistResponse, UiEvent};
use crate::state::persistence::{self, PersistWorker};
use crossterm::event::{self as crossterm_event, Event};
use crossterm::{cursor, execute, terminal};
use log::{info, warn};
use standings_core::{JsonFilePersister, Persister, StateStore};
use std::io::Stdout;
use std::sync::Arc;
use std::time::Instant;
use std::{io, panic};
use tokio::sync::{Mutex, mpsc};
use tokio::time::Duration;
use tui::{Terminal, backend::CrosstermBackend};

const TICK: Duration = Duration::from_millis(250);
const FLUSH_TIMEOUT: Duration = Duration::from_secs(2);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = AppSettings::load();
    if handle_cli_args(&settings)? {
        return Ok(());
    }

    better_panic::install();

    // Level is fixed before restore so load failures are logged at it.
    let log_level = settings.log_filter();
    tui_logger::init_logger(log_level)?;
    tui_logger::set_default_level(log_level);

    let file_persister = JsonFilePersister::new(&settings.data_path);
    info!("state file: {}", file_persister.path().display());
    let persister: Arc<dyn Persister> = Arc::new(file_persister);
    let mut store = StateStore::restore(&*persister);

    let (ui_event_tx, ui_event_rx) = mpsc::channel::<UiEvent>(100);
    let (save_slot, save_rx) = persistence::save_slot();
    let (persist_resp_tx, persist_resp_rx) = mpsc::channel::<PersistResponse>(100);

    // Every committed mutation parks a save; the store never waits on it.
    store.on_change(move |view| persistence::request_save(&save_slot, view.to_snapshot()));

    let app = Arc::new(Mutex::new(App::new(settings, store)));

    let backend = CrosstermBackend::new(io::stdout());
    let terminal = Terminal::new(backend)?;

    setup_panic_hook();
    setup_terminal()?;

    // Input handler thread
    let input_handler = tokio::spawn(input_handler_task(ui_event_tx.clone()));

    // Persistence thread
    let persist_worker = PersistWorker::new(persister, save_rx, persist_resp_tx);
    let persist_task = tokio::spawn(persist_worker.run());

    // Tick thread, drives status and confirmation expiry
    let tick_tx = ui_event_tx.clone();
    let tick_task = tokio::spawn(async move {
        let mut interval = tokio::time::interval(TICK);
        loop {
            interval.tick().await;
            if tick_tx.send(UiEvent::Tick).await.is_err() {
                break;
            }
        }
    });

    // The loop consumes the app, and with it the store's save slot, so the
    // worker drains the last snapshot and returns.
    main_ui_loop(terminal, app, ui_event_rx, persist_resp_rx).await;
    tick_task.abort();

    if tokio::time::timeout(FLUSH_TIMEOUT, persist_task).await.is_err() {
        warn!("gave up waiting for the final save");
    }

    cleanup_terminal();
    input_handler.abort();
    // The input thread is parked in a blocking read the runtime cannot cancel.
    std::process::exit(0);
}

fn handle_cli_args(settings: &AppSettings) -> anyhow::Result<bool> {
    let mut args = std::env::args().skip(1);
    let Some(arg) = args.next() else {
        return Ok(false);
    };

    match arg.as_str() {
        "-h" | "--help" => {
            println!("{}", usage_text());
            Ok(true)
        }
        "-V" | "--version" => {
            println!("standings {}", env!("CARGO_PKG_VERSION"));
            Ok(true)
        }
        "--export" => {
            let store = StateStore::restore(&JsonFilePersister::new(&settings.data_path));
            println!("{}", export::to_json(&store.read())?);
            Ok(true)
        }
        _ => {
            eprintln!("Unknown argument: {arg}\n\n{}", usage_text());
            std::process::exit(2);
        }
    }
}

fn usage_text() -> &'static str {
    "standings - league tables for Premier League, EuroBasket and Wimbledon

Usage:
  standings
  standings --export
  standings --help
  standings --version

Options:
  --export          Print every league table as JSON and exit

Environment:
  STANDINGS_DATA    Path to the saved state file
                    (default $XDG_DATA_HOME/standings/state.json)
  STANDINGS_LOG     Log level: error, warn, info, debug, trace or off"
}

async fn main_ui_loop(
    mut terminal: Terminal<CrosstermBackend<Stdout>>,
    app: Arc<Mutex<App>>,
    mut ui_events: mpsc::Receiver<UiEvent>,
    mut persist_responses: mpsc::Receiver<PersistResponse>,
) {
    {
        let mut app_guard = app.lock().await;
        draw::draw(&mut terminal, &mut app_guard);
    }

    loop {
        tokio::select! {
            Some(ui_event) = ui_events.recv() => {
                let redraw = handle_ui_event(ui_event, &app).await;
                let mut app_guard = app.lock().await;
                if app_guard.state.quit_requested {
                    break;
                }
                if redraw {
                    draw::draw(&mut terminal, &mut app_guard);
                }
            }

            Some(response) = persist_responses.recv() => {
                handle_persist_response(response, &app).await;
                let mut app_guard = app.lock().await;
                draw::draw(&mut terminal, &mut app_guard);
            }

            else => break,
        }
    }
}

async fn handle_ui_event(ui_event: UiEvent, app: &Arc<Mutex<App>>) -> bool {
    match ui_event {
        UiEvent::KeyPressed(key_event) => {
            keys::handle_key_bindings(key_event, app).await;
            true
        }
        UiEvent::Resize => true,
        UiEvent::Tick => {
            let mut guard = app.lock().await;
            guard.on_tick(Instant::now())
        }
    }
}

async fn handle_persist_response(response: PersistResponse, app: &Arc<Mutex<App>>) {
    let mut guard = app.lock().await;
    match response {
        PersistResponse::Saved => guard.on_saved(),
        PersistResponse::Failed { message } => guard.on_save_failed(message, Instant::now()),
    }
}

async fn input_handler_task(ui_events: mpsc::Sender<UiEvent>) {
    loop {
        let read = tokio::task::spawn_blocking(crossterm_event::read).await;
        if let Ok(Ok(event)) = read {
            let ui_event = match event {
                Event::Key(key_event) => Some(UiEvent::KeyPressed(key_event)),
                Event::Resize(_, _) => Some(UiEvent::Resize),
                _ => None,
            };

            if let Some(ui_event) = ui_event
                && ui_events.send(ui_event).await.is_err()
            {
                break;
            }
        }
    }
}

fn setup_terminal() -> io::Result<()> {
    let mut stdout = io::stdout();
    execute!(stdout, cursor::Hide)?;
    execute!(stdout, terminal::EnterAlternateScreen)?;
    execute!(stdout, terminal::Clear(terminal::ClearType::All))?;
    terminal::enable_raw_mode()
}

pub fn cleanup_terminal() {
    let mut stdout = io::stdout();
    let _ = execute!(stdout, cursor::MoveTo(0, 0));
    let _ = execute!(stdout, terminal::Clear(terminal::ClearType::All));
    let _ = execute!(stdout, terminal::LeaveAlternateScreen);
    let _ = execute!(stdout, cursor::Show);
    let _ = terminal::disable_raw_mode();
}

fn setup_panic_hook() {
    panic::set_hook(Box::new(|panic_info| {
        cleanup_terminal();
        better_panic::Settings::auto().create_panic_handler()(panic_info);
    }));
}
