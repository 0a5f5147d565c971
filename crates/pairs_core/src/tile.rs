//! A single grid cell.

use crate::palette::Category;
use crate::types::{Highlight, Owner, TileId};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// One cell of the board with its hidden category.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct Tile {
    /// Stable identity (1-based row-major position).
    id: TileId,
    /// The image shared with exactly one other tile.
    category: Category,
    /// Who matched this tile, if anyone.
    owner: Owner,
    /// Whether the face is showing.
    revealed: bool,
    /// Current emphasis.
    highlight: Highlight,
}

impl Tile {
    /// Creates a face-down, unowned tile.
    pub fn new(id: TileId, category: Category) -> Self {
        Self {
            id,
            category,
            owner: Owner::Unowned,
            revealed: false,
            highlight: Highlight::Neutral,
        }
    }

    /// Returns true if a player has claimed this tile.
    pub fn is_claimed(&self) -> bool {
        self.owner.is_claimed()
    }

    pub(crate) fn reveal(&mut self, highlight: Highlight) {
        self.revealed = true;
        self.highlight = highlight;
    }

    pub(crate) fn set_highlight(&mut self, highlight: Highlight) {
        self.highlight = highlight;
    }

    pub(crate) fn claim(&mut self, owner: Owner) {
        self.owner = owner;
        self.highlight = Highlight::Neutral;
    }

    pub(crate) fn conceal(&mut self) {
        self.revealed = false;
        self.owner = Owner::Unowned;
        self.highlight = Highlight::Neutral;
    }
}
