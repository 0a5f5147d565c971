//! Stateless UI rendering for the pairs board.

use pairs_core::{Board, Highlight, Owner, Player, Tile, TileId};
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use super::app::App;
use super::layout::center_rect;
use super::presentation::{Footer, Header, Sidebar};

const EMPTY: Color = Color::Rgb(240, 240, 240);
const FIRST_SELECTED: Color = Color::Rgb(210, 240, 240);
const CORRECT: Color = Color::Rgb(220, 255, 220);
const WRONG: Color = Color::Rgb(255, 220, 220);

const LABEL_WIDTH: u16 = 12;

/// Tile background for a highlight.
pub fn highlight_color(highlight: Highlight) -> Color {
    match highlight {
        Highlight::Neutral => EMPTY,
        Highlight::FirstSelected => FIRST_SELECTED,
        Highlight::Correct => CORRECT,
        Highlight::Wrong => WRONG,
    }
}

fn player_color(player: Player) -> Color {
    match player {
        Player::One => Color::Blue,
        Player::Two => Color::Red,
    }
}

/// Renders the whole screen from the layout computed for this frame.
pub fn draw(frame: &mut Frame, app: &App) {
    let layout = app.layout();

    draw_sidebar(frame, layout.sidebar, app.sidebar());
    draw_header(frame, layout.header, app.header(), app.status_message());
    draw_board(frame, app, frame.area());
    draw_footer(frame, layout.restart, layout.credits);
}

fn draw_sidebar(frame: &mut Frame, area: Rect, sidebar: &Sidebar) {
    let lines: Vec<Line> = sidebar
        .counters()
        .into_iter()
        .flat_map(|(label, value)| {
            [
                Line::from(Span::styled(label, Style::default().fg(Color::DarkGray))),
                Line::from(Span::styled(
                    value.to_string(),
                    Style::default().add_modifier(Modifier::BOLD),
                )),
                Line::default(),
            ]
        })
        .collect();

    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().title("Series").borders(Borders::ALL));
    frame.render_widget(paragraph, area);
}

fn draw_header(frame: &mut Frame, area: Rect, header: &Header, status: &str) {
    if area.height < 3 {
        return;
    }
    let row = |offset: u16| Rect::new(area.x, area.y + offset, area.width, 1);

    // Player labels with their scores at both ends
    let scores = header.scores();
    let left = format!(" {}: {}", Player::One, scores.player_one);
    let right = format!("{}: {} ", Player::Two, scores.player_two);
    let gap = area.width.saturating_sub((left.chars().count() + right.chars().count()) as u16);
    let labels = Line::from(vec![
        Span::styled(left, Style::default().fg(player_color(Player::One)).add_modifier(Modifier::BOLD)),
        Span::raw(" ".repeat(gap as usize)),
        Span::styled(right, Style::default().fg(player_color(Player::Two)).add_modifier(Modifier::BOLD)),
    ]);
    frame.render_widget(Paragraph::new(labels), row(0));

    // Sliding indicator
    let travel = area.width.saturating_sub(LABEL_WIDTH);
    let offset = (header.indicator().position() * f64::from(travel)).round() as u16;
    let marker = Rect::new(area.x + offset.min(travel), area.y + 1, LABEL_WIDTH.min(area.width), 1);
    frame.render_widget(
        Paragraph::new("▀".repeat(marker.width as usize))
            .style(Style::default().fg(player_color(*header.current_player()))),
        marker,
    );

    let (text, style) = match header.result_text() {
        Some(result) => (result, Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
        None => (status.to_string(), Style::default().fg(Color::Gray)),
    };
    frame.render_widget(Paragraph::new(text).style(style).alignment(Alignment::Center), row(2));
}

fn draw_board(frame: &mut Frame, app: &App, screen: Rect) {
    let board = app.session().board();
    for tile in board.tiles() {
        let Some(cell) = app.layout().cell(*tile.id()) else {
            continue;
        };
        let cell = cell.intersection(screen);
        if cell.is_empty() {
            continue;
        }
        draw_tile(frame, cell, tile, *tile.id() == app.cursor());
    }
}

fn draw_tile(frame: &mut Frame, area: Rect, tile: &Tile, under_cursor: bool) {
    let mut style = Style::default().bg(highlight_color(*tile.highlight())).fg(Color::Black);
    let mut border = Style::default().fg(Color::DarkGray);

    if let Owner::Claimed(player) = tile.owner() {
        border = border.fg(player_color(*player));
    }
    if under_cursor {
        border = Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD);
        style = style.add_modifier(Modifier::BOLD);
    }

    let face = if *tile.revealed() { tile.category().glyph() } else { "?" };

    let mut paragraph = Paragraph::new(face).style(style).alignment(Alignment::Center);
    let inner = if area.height >= 3 {
        paragraph = paragraph.block(Block::default().borders(Borders::ALL).border_style(border));
        area
    } else {
        center_rect(area, area.width, 1)
    };
    frame.render_widget(paragraph, inner);
}

fn draw_footer(frame: &mut Frame, restart: Rect, credits: Rect) {
    frame.render_widget(
        Paragraph::new(Footer::RESTART_LABEL)
            .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL)),
        restart,
    );
    frame.render_widget(
        Paragraph::new(Footer::CREDITS)
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Right)
            .block(Block::default().borders(Borders::TOP)),
        credits,
    );
}

/// Text rendering of a dealt board, one grid row per line.
pub fn format_layout(board: &Board) -> String {
    let grid = board.grid();
    let width = board
        .tiles()
        .iter()
        .map(|tile| tile.category().to_string().chars().count())
        .max()
        .unwrap_or_default();

    (0..grid.rows())
        .map(|row| {
            (0..grid.cols())
                .filter_map(|col| grid.id_at(row, col))
                .filter_map(|id: TileId| board.tile(id))
                .map(|tile| {
                    format!(
                        "{:>3} {} {:<width$}",
                        tile.id().get(),
                        tile.category().glyph(),
                        tile.category().to_string(),
                        width = width
                    )
                })
                .collect::<Vec<_>>()
                .join("  ")
                .trim_end()
                .to_string()
        })
        .collect::<Vec<_>>()
        .join("\n")
}
