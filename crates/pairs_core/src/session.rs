//! A sitting at the table: consecutive rounds on fresh boards.

use crate::board::{Board, Selection, TurnEvent};
use crate::coordinator::{FrameTimer, ResolutionTicket, RevealCoordinator, RevealTiming, Timer};
use crate::grid::GridSize;
use crate::types::TileId;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::time::{Instant, SystemTime, UNIX_EPOCH};
use tracing::{debug, info, instrument};

/// Receives a notification each time a comparison resolves.
pub trait TurnListener {
    /// Called once per resolved comparison, after the board has updated.
    fn on_turn(&mut self, event: &TurnEvent);
}

impl<F: FnMut(&TurnEvent)> TurnListener for F {
    fn on_turn(&mut self, event: &TurnEvent) {
        self(event)
    }
}

/// Seed derived from the wall clock, for sessions without a configured seed.
pub fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos() as u64)
        .unwrap_or_default()
}

/// Owns the current board, the reveal coordinator and the single listener.
pub struct GameSession<T = FrameTimer<ResolutionTicket>> {
    grid: GridSize,
    seed: u64,
    rng: StdRng,
    coordinator: RevealCoordinator<T>,
    board: Board,
    listener: Option<Box<dyn TurnListener>>,
}

impl GameSession {
    /// Starts a session polled by a [`FrameTimer`].
    pub fn new(grid: GridSize, timing: RevealTiming, seed: u64) -> Self {
        Self::with_coordinator(grid, RevealCoordinator::with_timing(timing), seed)
    }
}

impl<T: Timer<ResolutionTicket>> GameSession<T> {
    /// Starts a session on an explicit coordinator and deals the first board.
    #[instrument(skip(coordinator))]
    pub fn with_coordinator(grid: GridSize, mut coordinator: RevealCoordinator<T>, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let generation = coordinator.next_generation();
        let board = Board::new(grid, generation, &mut rng);
        info!(seed, "Game session started");

        Self {
            grid,
            seed,
            rng,
            coordinator,
            board,
            listener: None,
        }
    }

    /// Replaces the turn listener.
    pub fn set_turn_listener(&mut self, listener: impl TurnListener + 'static) {
        self.listener = Some(Box::new(listener));
    }

    /// Removes the turn listener.
    pub fn clear_turn_listener(&mut self) {
        self.listener = None;
    }

    /// The current board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Seed the session's deals are drawn from.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// The reveal coordinator.
    pub fn coordinator(&self) -> &RevealCoordinator<T> {
        &self.coordinator
    }

    /// Forwards a tile press to the board.
    pub fn select_tile(&mut self, id: TileId, now: Instant) -> Selection {
        self.board.select_tile(id, now, &mut self.coordinator)
    }

    /// Fires due resolutions and notifies the listener for each.
    ///
    /// Returns the events delivered, in firing order.
    pub fn tick(&mut self, now: Instant) -> Vec<TurnEvent> {
        let mut delivered = Vec::new();
        for ticket in self.coordinator.due(now) {
            let Some(event) = self.board.resolve(ticket) else {
                continue;
            };
            if event.outcome.is_over() {
                info!(outcome = %event.outcome, "Round finished");
            }
            if let Some(listener) = self.listener.as_mut() {
                listener.on_turn(&event);
            }
            delivered.push(event);
        }
        delivered
    }

    /// Abandons the current board and deals a new one.
    ///
    /// Pending resolutions are cancelled before the old board is dropped.
    #[instrument(skip(self), fields(generation = %self.board.generation()))]
    pub fn restart(&mut self) {
        let generation = self.coordinator.next_generation();
        self.board = Board::new(self.grid, generation, &mut self.rng);
        debug!(%generation, "Board replaced");
    }
}

impl<T> std::fmt::Debug for GameSession<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameSession")
            .field("grid", &self.grid)
            .field("seed", &self.seed)
            .field("board", &self.board)
            .field("has_listener", &self.listener.is_some())
            .finish_non_exhaustive()
    }
}
