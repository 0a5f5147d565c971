//! Core domain types for the pairs game.

use serde::{Deserialize, Serialize};

/// One of the two seats at the table.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    strum::EnumIter,
)]
pub enum Player {
    /// Player 1 (always opens a round).
    #[display("Player 1")]
    One,
    /// Player 2.
    #[display("Player 2")]
    Two,
}

impl Player {
    /// Returns the other player.
    pub fn opponent(self) -> Self {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    /// Zero-based seat index, usable for per-player arrays.
    pub fn index(self) -> usize {
        match self {
            Player::One => 0,
            Player::Two => 1,
        }
    }
}

/// Who has claimed a tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Owner {
    /// Nobody has matched this tile yet.
    #[default]
    Unowned,
    /// Matched by the given player.
    Claimed(Player),
}

impl Owner {
    /// Returns true if a player owns the tile.
    pub fn is_claimed(self) -> bool {
        matches!(self, Owner::Claimed(_))
    }

    /// Returns the owning player, if any.
    pub fn player(self) -> Option<Player> {
        match self {
            Owner::Claimed(player) => Some(player),
            Owner::Unowned => None,
        }
    }
}

/// Result of a round as known so far.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoundOutcome {
    /// Pairs remain on the board.
    Ongoing,
    /// Every pair is resolved and this player holds strictly more of them.
    Won(Player),
    /// Every pair is resolved with equal tallies.
    Tie,
}

impl RoundOutcome {
    /// Returns true once the round has a terminal result.
    pub fn is_over(self) -> bool {
        !matches!(self, RoundOutcome::Ongoing)
    }

    /// Returns the winner if there is one.
    pub fn winner(self) -> Option<Player> {
        match self {
            RoundOutcome::Won(player) => Some(player),
            _ => None,
        }
    }
}

impl std::fmt::Display for RoundOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RoundOutcome::Ongoing => write!(f, "In progress"),
            RoundOutcome::Won(player) => write!(f, "{} wins!", player),
            RoundOutcome::Tie => write!(f, "It's a tie!"),
        }
    }
}

/// Visual emphasis of a tile, decided by the board and drawn by the front end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Highlight {
    /// Resting styling (hidden back, or a claimed tile).
    #[default]
    Neutral,
    /// First tile of a comparison, waiting for its partner.
    FirstSelected,
    /// Part of a comparison that matched, until the resolution fires.
    Correct,
    /// Part of a comparison that missed, until the resolution fires.
    Wrong,
}

/// Whether a comparison found a pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
pub enum Verdict {
    /// Both tiles share a category.
    #[display("match")]
    Match,
    /// The categories differ.
    #[display("mismatch")]
    Mismatch,
}

/// Stable identity of a tile: its 1-based row-major grid position.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, derive_more::Display,
)]
#[display("#{}", _0)]
#[serde(try_from = "usize")]
pub struct TileId(usize);

/// Tile numbers start at 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("Tile ids start at 1, got 0")]
pub struct ZeroTileId;

impl TryFrom<usize> for TileId {
    type Error = ZeroTileId;

    fn try_from(id: usize) -> Result<Self, Self::Error> {
        Self::new(id).ok_or(ZeroTileId)
    }
}

impl TileId {
    /// Wraps a 1-based tile number. Returns `None` for zero.
    pub fn new(id: usize) -> Option<Self> {
        (id > 0).then_some(Self(id))
    }

    /// Builds the id of the tile stored at a zero-based index.
    pub fn from_index(index: usize) -> Self {
        Self(index + 1)
    }

    /// The 1-based tile number.
    pub fn get(self) -> usize {
        self.0
    }

    /// Zero-based index into row-major tile storage.
    pub fn index(self) -> usize {
        self.0 - 1
    }
}

/// Counter that distinguishes one dealt board from the next.
///
/// Timer payloads carry the generation they were scheduled under, so a
/// resolution that outlives its board is recognised and dropped.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize, derive_more::Display,
)]
pub struct Generation(u64);

impl Generation {
    /// Returns the following generation.
    pub fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}
