//! Cursor movement for keyboard navigation.

use crossterm::event::KeyCode;
use pairs_core::{GridSize, TileId};

/// Moves the cursor one cell in the direction of an arrow key.
///
/// The cursor stops at the board edges. Other keys leave it where it is.
pub fn move_cursor(grid: GridSize, cursor: TileId, key: KeyCode) -> TileId {
    let Some((row, col)) = grid.position_of(cursor) else {
        return cursor;
    };

    let (row, col) = match key {
        KeyCode::Left => (row, col.saturating_sub(1)),
        KeyCode::Right => (row, (col + 1).min(grid.cols() - 1)),
        KeyCode::Up => (row.saturating_sub(1), col),
        KeyCode::Down => ((row + 1).min(grid.rows() - 1), col),
        _ => (row, col),
    };

    grid.id_at(row, col).unwrap_or(cursor)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(n: usize) -> TileId {
        TileId::new(n).unwrap()
    }

    #[test]
    fn test_arrows_move_within_row_major_grid() {
        let grid = GridSize::STANDARD;
        assert_eq!(move_cursor(grid, id(1), KeyCode::Right), id(2));
        assert_eq!(move_cursor(grid, id(1), KeyCode::Down), id(9));
        assert_eq!(move_cursor(grid, id(10), KeyCode::Up), id(2));
        assert_eq!(move_cursor(grid, id(10), KeyCode::Left), id(9));
    }

    #[test]
    fn test_cursor_clamps_at_edges() {
        let grid = GridSize::STANDARD;
        assert_eq!(move_cursor(grid, id(1), KeyCode::Left), id(1));
        assert_eq!(move_cursor(grid, id(1), KeyCode::Up), id(1));
        assert_eq!(move_cursor(grid, id(8), KeyCode::Right), id(8));
        assert_eq!(move_cursor(grid, id(32), KeyCode::Down), id(32));
    }

    #[test]
    fn test_other_keys_ignored() {
        assert_eq!(move_cursor(GridSize::STANDARD, id(5), KeyCode::Char('x')), id(5));
    }
}
