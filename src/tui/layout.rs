//! Screen regions and point-in-rect hit testing.

use pairs_core::{GridSize, TileId};
use ratatui::layout::{Constraint, Direction, Layout, Position, Rect};

/// Width of the sidebar column.
pub const SIDEBAR_WIDTH: u16 = 22;
/// Height of the header and footer bars.
pub const BAR_HEIGHT: u16 = 3;
/// Preferred tile width.
pub const CELL_WIDTH: u16 = 8;
/// Preferred tile height.
pub const CELL_HEIGHT: u16 = 3;
/// Spacing between neighbouring tiles.
pub const CELL_GAP: u16 = 1;

const RESTART_WIDTH: u16 = 14;

/// What a click landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hit {
    /// A tile on the board.
    Tile(TileId),
    /// The footer's restart button.
    Restart,
}

/// Every clickable and drawable region for one terminal size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreenLayout {
    /// Series counters.
    pub sidebar: Rect,
    /// Turn indicator and result text.
    pub header: Rect,
    /// Area the tiles are centered in.
    pub board: Rect,
    /// One rect per tile, indexed by tile position.
    pub cells: Vec<Rect>,
    /// Footer bar.
    pub footer: Rect,
    /// Restart button inside the footer.
    pub restart: Rect,
    /// Credits line inside the footer.
    pub credits: Rect,
}

impl ScreenLayout {
    /// Splits `area` into sidebar, header, board and footer, then lays out tiles.
    pub fn compute(area: Rect, grid: GridSize) -> Self {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(0)])
            .split(area);
        let sidebar = columns[0];

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(BAR_HEIGHT), // Header
                Constraint::Min(0),             // Board
                Constraint::Length(BAR_HEIGHT), // Footer
            ])
            .split(columns[1]);
        let (header, board, footer) = (rows[0], rows[1], rows[2]);

        let footer_parts = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(RESTART_WIDTH), Constraint::Min(0)])
            .split(footer);

        Self {
            sidebar,
            header,
            board,
            cells: tile_cells(board, grid),
            footer,
            restart: footer_parts[0],
            credits: footer_parts[1],
        }
    }

    /// Finds what sits under a terminal cell.
    pub fn hit(&self, column: u16, row: u16) -> Option<Hit> {
        let point = Position::new(column, row);
        if self.restart.contains(point) {
            return Some(Hit::Restart);
        }
        self.cells
            .iter()
            .position(|cell| cell.contains(point))
            .map(|index| Hit::Tile(TileId::from_index(index)))
    }

    /// Rect of a tile, if it belongs to this layout.
    pub fn cell(&self, id: TileId) -> Option<Rect> {
        self.cells.get(id.index()).copied()
    }
}

/// Shrinks tiles to fit small terminals, never below one cell.
fn tile_cells(board: Rect, grid: GridSize) -> Vec<Rect> {
    let cols = grid.cols() as u16;
    let rows = grid.rows() as u16;

    let cell_width = ((board.width + CELL_GAP) / cols)
        .saturating_sub(CELL_GAP)
        .clamp(1, CELL_WIDTH);
    let cell_height = ((board.height + CELL_GAP) / rows)
        .saturating_sub(CELL_GAP)
        .clamp(1, CELL_HEIGHT);

    let width = cols * (cell_width + CELL_GAP) - CELL_GAP;
    let height = rows * (cell_height + CELL_GAP) - CELL_GAP;
    let origin = center_rect(board, width, height);

    grid.ids()
        .filter_map(|id| grid.position_of(id))
        .map(|(row, col)| {
            Rect::new(
                origin.x + col as u16 * (cell_width + CELL_GAP),
                origin.y + row as u16 * (cell_height + CELL_GAP),
                cell_width,
                cell_height,
            )
        })
        .collect()
}

/// Centers a `width` x `height` rect inside `area`.
pub fn center_rect(area: Rect, width: u16, height: u16) -> Rect {
    Rect::new(
        area.x + area.width.saturating_sub(width) / 2,
        area.y + area.height.saturating_sub(height) / 2,
        width,
        height,
    )
}
