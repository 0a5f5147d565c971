//! Tests for the terminal application state: clicks, keys, restarts and adapters.

use crossterm::event::KeyCode;
use pairs_core::{Category, Player, RoundOutcome, TileId};
use pairs_duel::{App, GameConfig, Hit};
use ratatui::layout::Rect;
use std::collections::HashMap;
use std::time::{Duration, Instant};

const FRAME: Duration = Duration::from_millis(16);

fn app(rows: usize, cols: usize, seed: u64) -> App {
    let config = GameConfig::default()
        .with_overrides(Some(rows), Some(cols), Some(seed), None)
        .unwrap();
    let mut app = App::new(&config).unwrap();
    app.set_viewport(Rect::new(0, 0, 120, 40));
    app
}

fn pairs_of(app: &App) -> Vec<(TileId, TileId)> {
    let mut by_category: HashMap<Category, Vec<TileId>> = HashMap::new();
    for tile in app.session().board().tiles() {
        by_category.entry(*tile.category()).or_default().push(*tile.id());
    }
    let mut pairs: Vec<(TileId, TileId)> = by_category.into_values().map(|ids| (ids[0], ids[1])).collect();
    pairs.sort();
    pairs
}

fn click_tile(app: &mut App, id: TileId, now: Instant) {
    let cell = app.layout().cell(id).unwrap();
    assert_eq!(app.layout().hit(cell.x + 1, cell.y + 1), Some(Hit::Tile(id)));
    app.handle_click(cell.x + 1, cell.y + 1, now);
}

#[test]
fn test_click_pair_updates_header_after_delay() {
    let mut app = app(4, 8, 12);
    let start = Instant::now();
    let (a, b) = pairs_of(&app)[0];

    click_tile(&mut app, a, start);
    assert_eq!(app.session().board().pending_selection(), Some(a));
    click_tile(&mut app, b, start);
    assert!(app.session().board().is_locked());

    app.tick(start + Duration::from_millis(499), FRAME);
    assert_eq!(*app.header().current_player(), Player::One);

    app.tick(start + Duration::from_millis(500), FRAME);
    assert!(!app.session().board().is_locked());
    assert_eq!(*app.header().current_player(), Player::Two);
    assert_eq!(app.header().scores().player_one, 1);
    assert!(app.header().indicator().is_moving());
    assert_eq!(app.status_message(), "Player 2 to pick a tile");
}

#[test]
fn test_click_while_locked_is_ignored() {
    let mut app = app(4, 8, 3);
    let start = Instant::now();
    let (a, _) = pairs_of(&app)[0];
    let (c, d) = pairs_of(&app)[1];

    click_tile(&mut app, a, start);
    click_tile(&mut app, c, start);
    click_tile(&mut app, d, start);

    let board = app.session().board();
    assert!(board.is_locked());
    assert!(!*board.tile(d).unwrap().revealed());
}

#[test]
fn test_restart_button_cancels_pending_reveal() {
    let mut app = app(4, 8, 8);
    let start = Instant::now();
    let (a, _) = pairs_of(&app)[0];
    let (c, _) = pairs_of(&app)[1];

    click_tile(&mut app, a, start);
    click_tile(&mut app, c, start);

    let restart = app.layout().restart;
    assert_eq!(app.layout().hit(restart.x + 1, restart.y + 1), Some(Hit::Restart));
    app.handle_click(restart.x + 1, restart.y + 1, start);

    app.tick(start + Duration::from_secs(2), FRAME);
    let board = app.session().board();
    assert!(!board.is_locked());
    assert!(board.tiles().iter().all(|tile| !*tile.revealed()));
    assert_eq!(*app.header().current_player(), Player::One);
    assert_eq!(app.sidebar().tally().rounds(), 0);
}

#[test]
fn test_keyboard_moves_cursor_and_selects() {
    let mut app = app(4, 8, 1);
    let now = Instant::now();

    app.handle_key(KeyCode::Right, now);
    app.handle_key(KeyCode::Down, now);
    assert_eq!(app.cursor(), TileId::new(10).unwrap());

    app.handle_key(KeyCode::Enter, now);
    assert_eq!(app.session().board().pending_selection(), TileId::new(10));

    app.handle_key(KeyCode::Char('q'), now);
    assert!(app.should_quit());
}

#[test]
fn test_finished_rounds_feed_sidebar() {
    let mut app = app(1, 2, 0);
    let mut clock = Instant::now();

    for round in 1..=2 {
        app.handle_key(KeyCode::Char(' '), clock);
        app.handle_key(KeyCode::Right, clock);
        app.handle_key(KeyCode::Char(' '), clock);
        clock += Duration::from_millis(500);
        app.tick(clock, FRAME);

        assert_eq!(app.session().board().outcome(), RoundOutcome::Won(Player::One));
        assert_eq!(app.header().result_text().as_deref(), Some("Player 1 wins!"));
        assert_eq!(app.sidebar().tally().wins(Player::One), round);

        app.handle_key(KeyCode::Char('r'), clock);
        app.handle_key(KeyCode::Left, clock);
        assert_eq!(app.header().result_text(), None);
    }

    assert_eq!(app.sidebar().counters()[2], ("Ties", 0));
}

#[test]
fn test_click_outside_targets_does_nothing() {
    let mut app = app(4, 8, 2);
    let sidebar = app.layout().sidebar;
    assert_eq!(app.layout().hit(sidebar.x + 1, sidebar.y + 1), None);

    app.handle_click(sidebar.x + 1, sidebar.y + 1, Instant::now());
    assert_eq!(app.session().board().pending_selection(), None);
}
