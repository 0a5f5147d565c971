//! Board dimensions and tile addressing.

use crate::palette::Category;
use crate::types::TileId;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use strum::EnumCount;
use tracing::instrument;

/// Why a grid shape was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum GridError {
    /// A dimension was zero.
    #[display("Grid must have at least one row and one column")]
    Empty,

    /// Tiles cannot be split into pairs.
    #[display("Grid of {} tiles cannot be split into pairs", tiles)]
    OddTileCount {
        /// Number of tiles the shape would hold.
        tiles: usize,
    },

    /// More pairs than the palette has categories.
    #[display("Grid needs {} pairs but only {} categories exist", pairs, available)]
    PaletteExhausted {
        /// Pairs the shape would need.
        pairs: usize,
        /// Categories in the palette.
        available: usize,
    },
}

/// Rows and columns of a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridSize {
    rows: usize,
    cols: usize,
}

impl GridSize {
    /// The classic 4 × 8 table: 32 tiles, 16 pairs.
    pub const STANDARD: GridSize = GridSize { rows: 4, cols: 8 };

    /// Validates and builds a grid shape.
    #[instrument]
    pub fn new(rows: usize, cols: usize) -> Result<Self, GridError> {
        if rows == 0 || cols == 0 {
            return Err(GridError::Empty);
        }

        let tiles = rows * cols;
        if tiles % 2 != 0 {
            return Err(GridError::OddTileCount { tiles });
        }

        let pairs = tiles / 2;
        if pairs > Category::COUNT {
            return Err(GridError::PaletteExhausted {
                pairs,
                available: Category::COUNT,
            });
        }

        Ok(Self { rows, cols })
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Total tiles on the board.
    pub fn tile_count(&self) -> usize {
        self.rows * self.cols
    }

    /// Pairs needed to fill the board.
    pub fn pair_count(&self) -> usize {
        self.tile_count() / 2
    }

    /// Id of the tile at a zero-based row and column.
    pub fn id_at(&self, row: usize, col: usize) -> Option<TileId> {
        (row < self.rows && col < self.cols).then(|| TileId::from_index(row * self.cols + col))
    }

    /// Zero-based (row, column) of a tile.
    pub fn position_of(&self, id: TileId) -> Option<(usize, usize)> {
        self.contains(id)
            .then(|| (id.index() / self.cols, id.index() % self.cols))
    }

    /// Returns true if the id addresses a tile on this grid.
    pub fn contains(&self, id: TileId) -> bool {
        id.index() < self.tile_count()
    }

    /// All tile ids in row-major order.
    pub fn ids(&self) -> impl Iterator<Item = TileId> + use<> {
        (0..self.tile_count()).map(TileId::from_index)
    }
}

impl Default for GridSize {
    fn default() -> Self {
        Self::STANDARD
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_grid_has_sixteen_pairs() {
        let grid = GridSize::STANDARD;
        assert_eq!(grid.tile_count(), 32);
        assert_eq!(grid.pair_count(), 16);
    }

    #[test]
    fn test_rejects_bad_shapes() {
        assert_eq!(GridSize::new(0, 4), Err(GridError::Empty));
        assert_eq!(GridSize::new(3, 3), Err(GridError::OddTileCount { tiles: 9 }));
        assert_eq!(
            GridSize::new(6, 6),
            Err(GridError::PaletteExhausted {
                pairs: 18,
                available: 16
            })
        );
        assert!(GridSize::new(2, 3).is_ok());
    }

    #[test]
    fn test_ids_are_row_major() {
        let grid = GridSize::STANDARD;
        assert_eq!(grid.id_at(0, 0).map(TileId::get), Some(1));
        assert_eq!(grid.id_at(1, 0).map(TileId::get), Some(9));
        assert_eq!(grid.id_at(3, 7).map(TileId::get), Some(32));
        assert_eq!(grid.id_at(4, 0), None);

        let last = TileId::new(32).unwrap();
        assert_eq!(grid.position_of(last), Some((3, 7)));
        assert_eq!(grid.position_of(TileId::new(33).unwrap()), None);
    }
}
