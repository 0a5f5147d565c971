//! Tests for game sessions: timing, listener delivery and restarts.

use pairs_core::{
    Category, GameSession, GridSize, Player, RevealTiming, RoundOutcome, Selection, TileId,
    TurnEvent,
};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use std::time::{Duration, Instant};

fn session(seed: u64) -> GameSession {
    GameSession::new(GridSize::STANDARD, RevealTiming::default(), seed)
}

/// Pairs of tile ids sharing a category on the current board.
fn pairs_of(session: &GameSession) -> Vec<(TileId, TileId)> {
    let mut by_category: HashMap<Category, Vec<TileId>> = HashMap::new();
    for tile in session.board().tiles() {
        by_category.entry(*tile.category()).or_default().push(*tile.id());
    }
    let mut pairs: Vec<(TileId, TileId)> = by_category.into_values().map(|ids| (ids[0], ids[1])).collect();
    pairs.sort();
    pairs
}

fn recording_listener(session: &mut GameSession) -> Rc<RefCell<Vec<TurnEvent>>> {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    session.set_turn_listener(move |event: &TurnEvent| sink.borrow_mut().push(*event));
    seen
}

#[test]
fn test_listener_notified_once_per_resolution() {
    let mut session = session(5);
    let seen = recording_listener(&mut session);
    let start = Instant::now();
    let (a, b) = pairs_of(&session)[0];

    session.select_tile(a, start);
    session.select_tile(b, start);
    assert!(session.tick(start + Duration::from_millis(100)).is_empty());
    assert!(seen.borrow().is_empty());

    let delivered = session.tick(start + Duration::from_millis(500));
    assert_eq!(delivered.len(), 1);
    assert!(session.tick(start + Duration::from_secs(10)).is_empty());

    let seen = seen.borrow();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].current_player, Player::Two);
    assert_eq!(seen[0].outcome, RoundOutcome::Ongoing);
    assert_eq!(seen[0].scores.player_one, 1);
}

#[test]
fn test_restart_cancels_pending_resolution() {
    let mut session = session(9);
    let seen = recording_listener(&mut session);
    let start = Instant::now();
    let (a, b) = pairs_of(&session)[0];
    let old_generation = session.board().generation();

    session.select_tile(a, start);
    assert!(matches!(session.select_tile(b, start), Selection::Compared { .. }));
    session.restart();

    assert_ne!(session.board().generation(), old_generation);
    assert!(!session.board().is_locked());
    assert_eq!(session.coordinator().pending(), 0);
    assert!(session.tick(start + Duration::from_secs(5)).is_empty());
    assert!(seen.borrow().is_empty());

    let board = session.board();
    assert!(board.tiles().iter().all(|tile| !tile.is_claimed() && !*tile.revealed()));
    assert_eq!(board.current_player(), Player::One);
}

#[test]
fn test_full_round_ends_in_tie_and_restart_resets() {
    let mut session = session(21);
    let seen = recording_listener(&mut session);
    let mut clock = Instant::now();

    for (a, b) in pairs_of(&session) {
        session.select_tile(a, clock);
        session.select_tile(b, clock);
        clock += Duration::from_millis(600);
        session.tick(clock);
    }

    assert_eq!(session.board().outcome(), RoundOutcome::Tie);
    assert_eq!(seen.borrow().len(), 16);
    assert_eq!(seen.borrow().last().unwrap().outcome, RoundOutcome::Tie);

    assert!(matches!(
        session.select_tile(TileId::new(1).unwrap(), clock),
        Selection::Ignored(_)
    ));

    session.restart();
    assert_eq!(session.board().outcome(), RoundOutcome::Ongoing);
    assert_eq!(session.board().resolved_pairs(), 0);
}

#[test]
fn test_same_seed_same_first_deal() {
    let first = session(77);
    let second = session(77);
    assert_eq!(first.board().tiles(), second.board().tiles());
    assert_eq!(first.seed(), 77);
}

#[test]
fn test_custom_timing_is_honoured() {
    let timing = RevealTiming::new(Duration::from_millis(50), Duration::from_millis(80));
    let mut session = GameSession::new(GridSize::STANDARD, timing, 3);
    let start = Instant::now();
    let (a, _) = pairs_of(&session)[0];
    let (c, _) = pairs_of(&session)[1];

    session.select_tile(a, start);
    session.select_tile(c, start);
    assert!(session.tick(start + Duration::from_millis(79)).is_empty());
    let events = session.tick(start + Duration::from_millis(80));
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].current_player, Player::Two);
}
