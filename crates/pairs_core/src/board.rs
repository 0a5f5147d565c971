//! The tile grid and its selection state machine.
//!
//! ```text
//! Idle ──select──▶ OneSelected ──select──▶ Resolving ──resolve──▶ Idle
//! ```
//!
//! While `Resolving` the board is input-locked: every selection is ignored
//! until the scheduled resolution for the pending pair arrives.

use crate::coordinator::{ResolutionTicket, RevealCoordinator, Timer, TimerHandle};
use crate::deal::{ShuffleSource, deal};
use crate::grid::GridSize;
use crate::invariants::assert_invariants;
use crate::palette::Category;
use crate::score::{Scoreboard, Scores, evaluate_outcome};
use crate::tile::Tile;
use crate::types::{Generation, Highlight, Owner, Player, RoundOutcome, TileId, Verdict};
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Instant;
use tracing::{debug, info, instrument, warn};

/// A comparison waiting for its delayed resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingComparison {
    /// Tile selected first.
    pub first: TileId,
    /// Tile selected second.
    pub second: TileId,
    /// Outcome decided when the second tile was flipped.
    pub verdict: Verdict,
    /// Scheduled resolution.
    pub handle: TimerHandle,
}

/// Where the board is in the select/compare/resolve cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No tile is face-up awaiting a partner.
    Idle,
    /// One tile is face-up awaiting a partner.
    OneSelected(TileId),
    /// A pair is face-up; input is locked until it resolves.
    Resolving(PendingComparison),
}

/// Why a selection was ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Rejection {
    /// A comparison is still resolving.
    #[display("Board is locked while a pair resolves")]
    Locked,
    /// The round already has an outcome.
    #[display("Round is over")]
    RoundOver,
    /// The board was replaced by a newer deal.
    #[display("Board belongs to a previous deal")]
    Retired,
    /// No such tile on this grid.
    #[display("Tile {} is not on the board", _0)]
    UnknownTile(TileId),
    /// The tile already belongs to a player.
    #[display("Tile {} is already claimed", _0)]
    Claimed(TileId),
    /// The tile is the one already waiting for a partner.
    #[display("Tile {} is already selected", _0)]
    SameTile(TileId),
}

/// What a selection did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// Nothing changed.
    Ignored(Rejection),
    /// The first tile of a pair was flipped.
    FirstRevealed(TileId),
    /// The second tile was flipped and a resolution scheduled.
    Compared {
        /// Whether the pair matched.
        verdict: Verdict,
        /// The scheduled resolution.
        handle: TimerHandle,
    },
}

/// Emitted once per resolved comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnEvent {
    /// Player to move next.
    pub current_player: Player,
    /// Round result after this comparison.
    pub outcome: RoundOutcome,
    /// Match counts after this comparison.
    pub scores: Scores,
    /// Whether the comparison was a pair.
    pub verdict: Verdict,
    /// Player who made the comparison.
    pub resolved_by: Player,
}

/// A tile list that cannot form a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum BoardError {
    /// Tile count does not fit the grid.
    #[display("Expected {} tiles, found {}", expected, found)]
    WrongTileCount {
        /// Tiles the grid holds.
        expected: usize,
        /// Tiles supplied.
        found: usize,
    },
    /// A tile's id is not its row-major position.
    #[display("Tile at index {} has id {}", index, id)]
    MisplacedId {
        /// Storage index.
        index: usize,
        /// Id found there.
        id: TileId,
    },
    /// A category is not on exactly two tiles.
    #[display("{} appears {} times", category, count)]
    UnpairedCategory {
        /// The offending category.
        category: Category,
        /// How often it appears.
        count: usize,
    },
    /// A tile is face-up, claimed or highlighted before play starts.
    #[display("Tile {} is not face-down and unclaimed", id)]
    NotFresh {
        /// The offending tile.
        id: TileId,
    },
}

/// The grid of tiles plus selection, turn and outcome state.
#[derive(Debug, Clone)]
pub struct Board {
    grid: GridSize,
    tiles: Vec<Tile>,
    generation: Generation,
    phase: Phase,
    scoreboard: Scoreboard,
    resolved_pairs: usize,
    comparisons: u32,
    outcome: RoundOutcome,
}

impl Board {
    /// Deals a new board for the given generation.
    #[instrument(skip(source))]
    pub fn new<S: ShuffleSource + ?Sized>(
        grid: GridSize,
        generation: Generation,
        source: &mut S,
    ) -> Self {
        let tiles = deal(grid, source);
        info!(pairs = grid.pair_count(), "New board dealt");
        Self::assemble(grid, generation, tiles)
    }

    /// Builds a board from a prepared layout, e.g. a replayed deal.
    #[instrument(skip(tiles), fields(tiles = tiles.len()))]
    pub fn from_tiles(
        grid: GridSize,
        generation: Generation,
        tiles: Vec<Tile>,
    ) -> Result<Self, BoardError> {
        if tiles.len() != grid.tile_count() {
            return Err(BoardError::WrongTileCount {
                expected: grid.tile_count(),
                found: tiles.len(),
            });
        }

        let mut counts: HashMap<Category, usize> = HashMap::new();
        for (index, tile) in tiles.iter().enumerate() {
            if tile.id().index() != index {
                return Err(BoardError::MisplacedId {
                    index,
                    id: *tile.id(),
                });
            }
            if *tile.revealed() || tile.is_claimed() || *tile.highlight() != Highlight::Neutral {
                return Err(BoardError::NotFresh { id: *tile.id() });
            }
            *counts.entry(*tile.category()).or_default() += 1;
        }

        let mut unpaired: Vec<(Category, usize)> = counts
            .into_iter()
            .filter(|(_, count)| *count != 2)
            .collect();
        unpaired.sort_by_key(|(category, _)| category.id());
        if let Some((category, count)) = unpaired.first() {
            return Err(BoardError::UnpairedCategory {
                category: *category,
                count: *count,
            });
        }

        Ok(Self::assemble(grid, generation, tiles))
    }

    fn assemble(grid: GridSize, generation: Generation, tiles: Vec<Tile>) -> Self {
        let board = Self {
            grid,
            tiles,
            generation,
            phase: Phase::Idle,
            scoreboard: Scoreboard::new(),
            resolved_pairs: 0,
            comparisons: 0,
            outcome: RoundOutcome::Ongoing,
        };
        assert_invariants(&board);
        board
    }

    /// Grid dimensions.
    pub fn grid(&self) -> GridSize {
        self.grid
    }

    /// All tiles in row-major order.
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// Looks a tile up by id.
    pub fn tile(&self, id: TileId) -> Option<&Tile> {
        self.tiles.get(id.index())
    }

    /// Generation this board was dealt under.
    pub fn generation(&self) -> Generation {
        self.generation
    }

    /// Current phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// True while a comparison is resolving.
    pub fn is_locked(&self) -> bool {
        matches!(self.phase, Phase::Resolving(_))
    }

    /// The face-up tile waiting for a partner, if any.
    pub fn pending_selection(&self) -> Option<TileId> {
        match self.phase {
            Phase::OneSelected(id) => Some(id),
            Phase::Idle | Phase::Resolving(_) => None,
        }
    }

    /// The comparison in flight, if any.
    pub fn pending_comparison(&self) -> Option<PendingComparison> {
        match self.phase {
            Phase::Resolving(pending) => Some(pending),
            Phase::Idle | Phase::OneSelected(_) => None,
        }
    }

    /// Player whose turn it is.
    pub fn current_player(&self) -> Player {
        self.scoreboard.current()
    }

    /// Match counts.
    pub fn scores(&self) -> Scores {
        self.scoreboard.scores()
    }

    /// Pairs resolved as matches so far.
    pub fn resolved_pairs(&self) -> usize {
        self.resolved_pairs
    }

    /// Comparisons resolved so far, matched or not.
    pub fn comparisons(&self) -> u32 {
        self.comparisons
    }

    /// Round result so far.
    pub fn outcome(&self) -> RoundOutcome {
        self.outcome
    }

    /// Handles a press on a tile.
    ///
    /// Invalid selections are ignored and reported as [`Selection::Ignored`];
    /// they never change state.
    #[instrument(skip(self, now, coordinator), fields(generation = %self.generation, phase = ?self.phase))]
    pub fn select_tile<T: Timer<ResolutionTicket>>(
        &mut self,
        id: TileId,
        now: Instant,
        coordinator: &mut RevealCoordinator<T>,
    ) -> Selection {
        let selection = match self.check_selectable(id, coordinator.generation()) {
            Err(rejection) => Selection::Ignored(rejection),
            Ok(()) => match self.phase {
                Phase::Idle => self.select_first(id),
                Phase::OneSelected(first) => self.select_second(first, id, now, coordinator),
                Phase::Resolving(_) => Selection::Ignored(Rejection::Locked),
            },
        };

        match selection {
            Selection::Ignored(rejection) => debug!(%rejection, "Selection ignored"),
            _ => assert_invariants(self),
        }
        selection
    }

    fn check_selectable(&self, id: TileId, generation: Generation) -> Result<(), Rejection> {
        if generation != self.generation {
            warn!(board = %self.generation, coordinator = %generation, "Selection on a retired board");
            return Err(Rejection::Retired);
        }
        if self.is_locked() {
            return Err(Rejection::Locked);
        }
        if self.outcome.is_over() {
            return Err(Rejection::RoundOver);
        }
        let tile = self.tile(id).ok_or(Rejection::UnknownTile(id))?;
        if tile.is_claimed() {
            return Err(Rejection::Claimed(id));
        }
        if self.pending_selection() == Some(id) {
            return Err(Rejection::SameTile(id));
        }
        Ok(())
    }

    fn select_first(&mut self, id: TileId) -> Selection {
        self.tiles[id.index()].reveal(Highlight::FirstSelected);
        self.phase = Phase::OneSelected(id);
        debug!(tile = %id, "First tile revealed");
        Selection::FirstRevealed(id)
    }

    fn select_second<T: Timer<ResolutionTicket>>(
        &mut self,
        first: TileId,
        second: TileId,
        now: Instant,
        coordinator: &mut RevealCoordinator<T>,
    ) -> Selection {
        let verdict = if self.tiles[first.index()].category() == self.tiles[second.index()].category() {
            Verdict::Match
        } else {
            Verdict::Mismatch
        };
        let highlight = match verdict {
            Verdict::Match => Highlight::Correct,
            Verdict::Mismatch => Highlight::Wrong,
        };

        self.tiles[second.index()].reveal(highlight);
        self.tiles[first.index()].set_highlight(highlight);

        let handle = coordinator.schedule_resolution(now, first, second, verdict);
        self.phase = Phase::Resolving(PendingComparison {
            first,
            second,
            verdict,
            handle,
        });

        debug!(%first, %second, %verdict, %handle, "Pair compared, input locked");
        Selection::Compared { verdict, handle }
    }

    /// Finalizes the pending comparison named by `ticket`.
    ///
    /// Returns the turn event to publish, or `None` when the ticket belongs to
    /// another deal or another comparison.
    #[instrument(skip(self), fields(generation = %self.generation))]
    pub fn resolve(&mut self, ticket: ResolutionTicket) -> Option<TurnEvent> {
        if ticket.generation != self.generation {
            warn!(ticket_generation = %ticket.generation, "Ignoring resolution for another deal");
            return None;
        }

        let pending = match self.phase {
            Phase::Resolving(pending)
                if pending.first == ticket.first
                    && pending.second == ticket.second
                    && pending.verdict == ticket.verdict =>
            {
                pending
            }
            phase => {
                warn!(?phase, "Ignoring resolution that does not match the pending pair");
                return None;
            }
        };

        let player = self.scoreboard.current();
        match pending.verdict {
            Verdict::Match => {
                self.scoreboard.record_match(player);
                self.resolved_pairs += 1;
                self.tiles[pending.first.index()].claim(Owner::Claimed(player));
                self.tiles[pending.second.index()].claim(Owner::Claimed(player));
                self.outcome =
                    evaluate_outcome(self.scoreboard.scores(), self.resolved_pairs, self.grid.pair_count());
            }
            Verdict::Mismatch => {
                self.tiles[pending.first.index()].conceal();
                self.tiles[pending.second.index()].conceal();
            }
        }

        let next = self.scoreboard.advance_turn();
        self.comparisons += 1;
        self.phase = Phase::Idle;
        assert_invariants(self);

        info!(
            %player,
            verdict = %pending.verdict,
            next = %next,
            outcome = %self.outcome,
            comparisons = self.comparisons,
            "Comparison resolved"
        );

        Some(TurnEvent {
            current_player: next,
            outcome: self.outcome,
            scores: self.scoreboard.scores(),
            verdict: pending.verdict,
            resolved_by: player,
        })
    }
}
