//! Terminal UI for Pairs Duel

mod app;
mod input;
mod layout;
mod presentation;
mod ui;

pub use app::App;
pub use input::move_cursor;
pub use layout::{Hit, ScreenLayout, center_rect};
pub use presentation::{Footer, Header, Sidebar, TurnIndicator};
pub use ui::{format_layout, highlight_color};

use crate::config::GameConfig;
use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{self, Stdout};
use std::time::{Duration, Instant};
use tracing::{debug, error, info, instrument};

type CrosstermTerminal = Terminal<CrosstermBackend<Stdout>>;

/// Run the TUI until the player quits.
///
/// The terminal is restored before returning, also when the loop fails.
pub async fn run_tui(config: GameConfig) -> Result<()> {
    let mut app = App::new(&config)?;
    info!(seed = app.session().seed(), "Starting Pairs Duel TUI");

    enable_raw_mode()?;
    let mut terminal = match enter_screen() {
        Ok(terminal) => terminal,
        Err(e) => {
            disable_raw_mode()?;
            execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture)?;
            return Err(e);
        }
    };

    let res = run_game_loop(&mut terminal, &mut app, config.frame_interval()).await;

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        error!(error = ?err, "Game loop error");
        return Err(err);
    }

    info!(seed = app.session().seed(), "TUI closed");
    Ok(())
}

fn enter_screen() -> Result<CrosstermTerminal> {
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    Ok(Terminal::new(backend)?)
}

/// Frame loop: input, due timers, turn events and animation, then draw.
#[instrument(skip_all, fields(frame_interval_ms = frame_interval.as_millis() as u64))]
async fn run_game_loop(
    terminal: &mut CrosstermTerminal,
    app: &mut App,
    frame_interval: Duration,
) -> Result<()> {
    debug!("Entering frame loop");
    draw(terminal, app)?;
    let mut last_frame = Instant::now();

    loop {
        // Wait for input until the next frame is due, then drain whatever queued up.
        if event::poll(frame_interval)? {
            app.handle_event(event::read()?, Instant::now());
            while event::poll(Duration::ZERO)? {
                app.handle_event(event::read()?, Instant::now());
            }
        }
        if app.should_quit() {
            break;
        }

        let now = Instant::now();
        app.tick(now, now.duration_since(last_frame));
        last_frame = now;

        draw(terminal, app)?;
        tokio::task::yield_now().await;
    }

    Ok(())
}

/// Hit-test regions are refreshed from the frame being drawn.
fn draw(terminal: &mut CrosstermTerminal, app: &mut App) -> Result<()> {
    terminal.draw(|frame| {
        app.set_viewport(frame.area());
        ui::draw(frame, app);
    })?;
    Ok(())
}
