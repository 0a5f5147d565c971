//! Turn order, match counts and round results.

use crate::types::{Player, RoundOutcome};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Match counts for both players.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Scores {
    /// Pairs found by player 1.
    pub player_one: u32,
    /// Pairs found by player 2.
    pub player_two: u32,
}

impl Scores {
    /// Count for one player.
    pub fn of(&self, player: Player) -> u32 {
        match player {
            Player::One => self.player_one,
            Player::Two => self.player_two,
        }
    }
}

/// Whose turn it is and how many pairs each player holds.
///
/// The turn passes once per resolved comparison, match or not.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scoreboard {
    current: Player,
    matches: [u32; 2],
}

impl Scoreboard {
    /// Fresh scoreboard with player 1 to move.
    pub fn new() -> Self {
        Self {
            current: Player::One,
            matches: [0; 2],
        }
    }

    /// Player whose turn it is.
    pub fn current(&self) -> Player {
        self.current
    }

    /// Passes the turn and returns the player now to move.
    #[instrument(skip(self), fields(from = %self.current))]
    pub fn advance_turn(&mut self) -> Player {
        self.current = self.current.opponent();
        debug!(to = %self.current, "Turn advanced");
        self.current
    }

    /// Credits one pair to a player.
    #[instrument(skip(self))]
    pub fn record_match(&mut self, player: Player) {
        self.matches[player.index()] += 1;
    }

    /// Pairs held by a player.
    pub fn matches(&self, player: Player) -> u32 {
        self.matches[player.index()]
    }

    /// Snapshot of both counts.
    pub fn scores(&self) -> Scores {
        Scores {
            player_one: self.matches[0],
            player_two: self.matches[1],
        }
    }
}

impl Default for Scoreboard {
    fn default() -> Self {
        Self::new()
    }
}

/// Decides the round result from the tallies.
///
/// Ongoing while `resolved < total`; afterwards the strictly larger tally
/// wins and equal tallies tie.
pub fn evaluate_outcome(scores: Scores, resolved: usize, total: usize) -> RoundOutcome {
    if resolved < total {
        return RoundOutcome::Ongoing;
    }

    match scores.player_one.cmp(&scores.player_two) {
        std::cmp::Ordering::Greater => RoundOutcome::Won(Player::One),
        std::cmp::Ordering::Less => RoundOutcome::Won(Player::Two),
        std::cmp::Ordering::Equal => RoundOutcome::Tie,
    }
}

/// Wins and ties across the rounds played in one sitting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Getters, Serialize, Deserialize)]
pub struct SeriesTally {
    /// Rounds won by player 1.
    player_one_wins: u32,
    /// Rounds won by player 2.
    player_two_wins: u32,
    /// Rounds that ended level.
    ties: u32,
}

impl SeriesTally {
    /// Counts a finished round. Ongoing outcomes are ignored.
    #[instrument(skip(self))]
    pub fn record(&mut self, outcome: RoundOutcome) {
        match outcome {
            RoundOutcome::Ongoing => {}
            RoundOutcome::Won(Player::One) => self.player_one_wins += 1,
            RoundOutcome::Won(Player::Two) => self.player_two_wins += 1,
            RoundOutcome::Tie => self.ties += 1,
        }
    }

    /// Rounds won by a player.
    pub fn wins(&self, player: Player) -> u32 {
        match player {
            Player::One => self.player_one_wins,
            Player::Two => self.player_two_wins,
        }
    }

    /// Rounds that reached an outcome.
    pub fn rounds(&self) -> u32 {
        self.player_one_wins + self.player_two_wins + self.ties
    }
}
