//! Pure memory-pairs game logic.
//!
//! Two players take turns flipping two tiles. A matching pair is claimed by
//! the player who found it; either way the turn passes once the pair has been
//! on show for a short delay. When every pair is claimed the larger tally
//! wins.
//!
//! # Architecture
//!
//! - **Board**: tile grid plus the `Idle → OneSelected → Resolving` state machine
//! - **Scoreboard**: turn order and match counts
//! - **RevealCoordinator**: delayed, generation-tagged resolutions over a [`Timer`]
//! - **GameSession**: board + coordinator + listener, rebuilt on restart
//!
//! # Example
//!
//! ```
//! use std::time::{Duration, Instant};
//! use pairs_core::{GameSession, GridSize, RevealTiming, Selection, TileId};
//!
//! let mut session = GameSession::new(GridSize::STANDARD, RevealTiming::default(), 7);
//! let now = Instant::now();
//! let first = TileId::new(1).unwrap();
//! assert_eq!(session.select_tile(first, now), Selection::FirstRevealed(first));
//!
//! let second = TileId::new(2).unwrap();
//! session.select_tile(second, now);
//! assert!(session.board().is_locked());
//!
//! let events = session.tick(now + Duration::from_secs(1));
//! assert_eq!(events.len(), 1);
//! assert!(!session.board().is_locked());
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod board;
mod coordinator;
mod deal;
mod grid;
pub mod invariants;
mod palette;
mod score;
mod session;
mod tile;
mod types;

pub use board::{Board, BoardError, PendingComparison, Phase, Rejection, Selection, TurnEvent};
pub use coordinator::{FrameTimer, ResolutionTicket, RevealCoordinator, RevealTiming, Timer, TimerHandle};
pub use deal::{ShuffleSource, deal, pair_sequence, shuffle};
pub use grid::{GridError, GridSize};
pub use palette::Category;
pub use score::{Scoreboard, Scores, SeriesTally, evaluate_outcome};
pub use session::{GameSession, TurnListener, clock_seed};
pub use tile::Tile;
pub use types::{Generation, Highlight, Owner, Player, RoundOutcome, TileId, Verdict, ZeroTileId};
