//! Logical properties a board must satisfy between operations.
//!
//! Checked after every transition in debug builds and testable on their own.

use crate::board::{Board, Phase};
use crate::palette::Category;
use crate::types::Highlight;
use std::collections::HashMap;

/// A property that must hold for a given state.
pub trait Invariant<S> {
    /// Checks if the invariant holds for the given state.
    fn holds(state: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// Every dealt category sits on exactly two tiles.
pub struct PairedCategories;

impl Invariant<Board> for PairedCategories {
    fn holds(board: &Board) -> bool {
        let mut counts: HashMap<Category, usize> = HashMap::new();
        for tile in board.tiles() {
            *counts.entry(*tile.category()).or_default() += 1;
        }
        counts.values().all(|&count| count == 2)
    }

    fn description() -> &'static str {
        "Every category appears on exactly two tiles"
    }
}

/// At most one tile waits for a partner, and only while one is selected.
pub struct SingleFirstSelection;

impl Invariant<Board> for SingleFirstSelection {
    fn holds(board: &Board) -> bool {
        let waiting = board
            .tiles()
            .iter()
            .filter(|tile| *tile.highlight() == Highlight::FirstSelected)
            .count();
        match board.phase() {
            Phase::OneSelected(_) => waiting == 1,
            Phase::Idle | Phase::Resolving(_) => waiting == 0,
        }
    }

    fn description() -> &'static str {
        "At most one tile awaits a second selection"
    }
}

/// Claimed tiles and match counts agree.
pub struct ClaimsMatchScores;

impl Invariant<Board> for ClaimsMatchScores {
    fn holds(board: &Board) -> bool {
        let claimed = board.tiles().iter().filter(|tile| tile.is_claimed()).count();
        let scores = board.scores();
        let total = (scores.player_one + scores.player_two) as usize;
        claimed == board.resolved_pairs() * 2 && total == board.resolved_pairs()
    }

    fn description() -> &'static str {
        "Claimed tiles equal twice the pairs credited to players"
    }
}

/// Descriptions of every violated board invariant.
pub fn violations(board: &Board) -> Vec<&'static str> {
    let mut violated = Vec::new();
    if !PairedCategories::holds(board) {
        violated.push(PairedCategories::description());
    }
    if !SingleFirstSelection::holds(board) {
        violated.push(SingleFirstSelection::description());
    }
    if !ClaimsMatchScores::holds(board) {
        violated.push(ClaimsMatchScores::description());
    }
    violated
}

/// Panics in debug builds if the board breaks an invariant.
pub(crate) fn assert_invariants(board: &Board) {
    if cfg!(debug_assertions) {
        let violated = violations(board);
        assert!(violated.is_empty(), "Board invariants violated: {:?}", violated);
    }
}
