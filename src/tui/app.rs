//! Application state and logic.

use crate::config::{ConfigError, GameConfig};
use crossterm::event::{Event, KeyCode, KeyEventKind, MouseButton, MouseEventKind};
use pairs_core::{GameSession, Player, Rejection, Selection, TileId, TurnEvent, Verdict, clock_seed};
use ratatui::layout::Rect;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use tracing::{debug, info, instrument, warn};

use super::input::move_cursor;
use super::layout::{Hit, ScreenLayout};
use super::presentation::{Header, Sidebar};

/// Main application state.
pub struct App {
    session: GameSession,
    events: mpsc::UnboundedReceiver<TurnEvent>,
    header: Header,
    sidebar: Sidebar,
    cursor: TileId,
    viewport: Rect,
    layout: ScreenLayout,
    status_message: String,
    should_quit: bool,
}

impl App {
    /// Deals the first board and wires the session's listener to the adapters.
    #[instrument(skip(config))]
    pub fn new(config: &GameConfig) -> Result<Self, ConfigError> {
        let grid = config.grid()?;
        let seed = config.seed().unwrap_or_else(clock_seed);
        let mut session = GameSession::new(grid, config.timing(), seed);

        let (event_tx, events) = mpsc::unbounded_channel();
        session.set_turn_listener(move |event: &TurnEvent| {
            if event_tx.send(*event).is_err() {
                warn!("Turn event receiver dropped");
            }
        });
        info!(seed, rows = grid.rows(), cols = grid.cols(), "Application created");

        Ok(Self {
            session,
            events,
            header: Header::new(*config.indicator_speed()),
            sidebar: Sidebar::default(),
            cursor: TileId::from_index(0),
            viewport: Rect::default(),
            layout: ScreenLayout::compute(Rect::default(), grid),
            status_message: format!("{} to pick a tile", Player::One),
            should_quit: false,
        })
    }

    /// The running session.
    pub fn session(&self) -> &GameSession {
        &self.session
    }

    /// Header state.
    pub fn header(&self) -> &Header {
        &self.header
    }

    /// Sidebar state.
    pub fn sidebar(&self) -> &Sidebar {
        &self.sidebar
    }

    /// Tile under the keyboard cursor.
    pub fn cursor(&self) -> TileId {
        self.cursor
    }

    /// Regions from the last viewport.
    pub fn layout(&self) -> &ScreenLayout {
        &self.layout
    }

    /// Gets the current status message.
    pub fn status_message(&self) -> &str {
        &self.status_message
    }

    /// Whether the user asked to leave.
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Recomputes regions when the terminal size changes.
    pub fn set_viewport(&mut self, area: Rect) {
        if area != self.viewport {
            debug!(width = area.width, height = area.height, "Viewport changed");
            self.viewport = area;
            self.layout = ScreenLayout::compute(area, self.session.board().grid());
        }
    }

    /// Dispatches one terminal event.
    pub fn handle_event(&mut self, event: Event, now: Instant) {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key.code, now),
            Event::Mouse(mouse) if mouse.kind == MouseEventKind::Down(MouseButton::Left) => {
                self.handle_click(mouse.column, mouse.row, now)
            }
            _ => {}
        }
    }

    /// Handles a key press.
    pub fn handle_key(&mut self, key: KeyCode, now: Instant) {
        match key {
            KeyCode::Char('q') | KeyCode::Esc => {
                info!("Quit requested");
                self.should_quit = true;
            }
            KeyCode::Char('r') => self.restart(),
            KeyCode::Enter | KeyCode::Char(' ') => self.select(self.cursor, now),
            KeyCode::Left | KeyCode::Right | KeyCode::Up | KeyCode::Down => {
                self.cursor = move_cursor(self.session.board().grid(), self.cursor, key);
            }
            _ => {}
        }
    }

    /// Handles a left click at a terminal cell.
    pub fn handle_click(&mut self, column: u16, row: u16, now: Instant) {
        match self.layout.hit(column, row) {
            Some(Hit::Tile(id)) => {
                self.cursor = id;
                self.select(id, now);
            }
            Some(Hit::Restart) => self.restart(),
            None => debug!(column, row, "Click outside any target"),
        }
    }

    #[instrument(skip(self, now), fields(tile = %id))]
    fn select(&mut self, id: TileId, now: Instant) {
        match self.session.select_tile(id, now) {
            Selection::FirstRevealed(_) => {
                self.status_message = format!("{} picks a second tile", self.session.board().current_player());
            }
            Selection::Compared { verdict, .. } => {
                self.status_message = match verdict {
                    Verdict::Match => "It's a pair!".to_string(),
                    Verdict::Mismatch => "Not a pair".to_string(),
                };
            }
            Selection::Ignored(Rejection::RoundOver) => {
                self.status_message = "Round over. Press 'r' or click Restart.".to_string();
            }
            Selection::Ignored(reason) => debug!(%reason, "Selection ignored"),
        }
    }

    /// Deals a fresh board and resets the header.
    pub fn restart(&mut self) {
        debug!("Restarting game");
        self.session.restart();
        self.header.reset();
        self.status_message = "Game restarted. Player 1's turn.".to_string();
    }

    /// Fires due resolutions, feeds the adapters and advances animations.
    pub fn tick(&mut self, now: Instant, dt: Duration) {
        self.session.tick(now);

        while let Ok(event) = self.events.try_recv() {
            self.header.apply(&event);
            self.sidebar.apply(&event);
            self.status_message = if event.outcome.is_over() {
                format!("{} Press 'r' to play again.", event.outcome)
            } else {
                format!("{} to pick a tile", event.current_player)
            };
        }

        self.header.update(dt);
    }
}
