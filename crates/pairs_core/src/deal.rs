//! Building and shuffling a fresh board.
//!
//! Categories are taken from the palette in order, two of each, then the
//! whole list is shuffled and laid out row by row.

use crate::grid::GridSize;
use crate::palette::Category;
use crate::tile::Tile;
use crate::types::TileId;
use rand::Rng;
use strum::IntoEnumIterator;
use tracing::{debug, instrument};

/// A source of uniform indices for shuffling.
///
/// Every [`rand::Rng`] is one; tests may script their own.
pub trait ShuffleSource {
    /// Returns a uniformly chosen index in `0..=upper`.
    fn index_at_most(&mut self, upper: usize) -> usize;
}

impl<R: Rng + ?Sized> ShuffleSource for R {
    fn index_at_most(&mut self, upper: usize) -> usize {
        self.random_range(0..=upper)
    }
}

/// Lists `pairs` categories from the palette, each twice in a row.
///
/// Asking for more pairs than the palette holds yields only the palette.
pub fn pair_sequence(pairs: usize) -> Vec<Category> {
    Category::iter()
        .take(pairs)
        .flat_map(|category| [category, category])
        .collect()
}

/// Fisher–Yates shuffle, walking from the last element back to the second.
pub fn shuffle<T, S: ShuffleSource + ?Sized>(items: &mut [T], source: &mut S) {
    for i in (1..items.len()).rev() {
        let j = source.index_at_most(i);
        items.swap(i, j);
    }
}

/// Deals a full board: pair sequence, shuffle, row-major assignment.
#[instrument(skip(source))]
pub fn deal<S: ShuffleSource + ?Sized>(grid: GridSize, source: &mut S) -> Vec<Tile> {
    let mut categories = pair_sequence(grid.pair_count());
    shuffle(&mut categories, source);

    let tiles: Vec<Tile> = categories
        .into_iter()
        .enumerate()
        .map(|(index, category)| Tile::new(TileId::from_index(index), category))
        .collect();

    debug!(tiles = tiles.len(), "Dealt board");
    tiles
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;

    /// Replays a fixed list of picks.
    struct Scripted(VecDeque<usize>);

    impl ShuffleSource for Scripted {
        fn index_at_most(&mut self, upper: usize) -> usize {
            let pick = self.0.pop_front().expect("script exhausted");
            assert!(pick <= upper, "scripted pick {} exceeds {}", pick, upper);
            pick
        }
    }

    #[test]
    fn test_pair_sequence_repeats_then_advances() {
        let sequence = pair_sequence(3);
        assert_eq!(
            sequence,
            vec![
                Category::BeamingFace,
                Category::BeamingFace,
                Category::BirthdayCake,
                Category::BirthdayCake,
                Category::CatFace,
                Category::CatFace,
            ]
        );
    }

    #[test]
    fn test_shuffle_walks_backwards() {
        let mut items = vec!['a', 'b', 'c', 'd'];
        // i = 3 swaps with 0, i = 2 swaps with 2, i = 1 swaps with 0.
        let mut source = Scripted(VecDeque::from([0, 2, 0]));
        shuffle(&mut items, &mut source);
        assert_eq!(items, vec!['b', 'd', 'c', 'a']);
        assert!(source.0.is_empty());
    }

    #[test]
    fn test_shuffle_identity_when_every_pick_is_current_index() {
        let mut items: Vec<u32> = (0..8).collect();
        let mut source = Scripted((1..8).rev().collect());
        shuffle(&mut items, &mut source);
        assert_eq!(items, (0..8).collect::<Vec<_>>());
    }

    #[test]
    fn test_shuffle_handles_tiny_inputs() {
        let mut empty: Vec<u8> = Vec::new();
        let mut one = vec![7u8];
        let mut source = Scripted(VecDeque::new());
        shuffle(&mut empty, &mut source);
        shuffle(&mut one, &mut source);
        assert_eq!(one, vec![7]);
    }

    #[test]
    fn test_deal_assigns_row_major_ids() {
        let grid = GridSize::new(2, 2).unwrap();
        let mut source = Scripted(VecDeque::from([0, 2, 0]));
        let tiles = deal(grid, &mut source);

        let ids: Vec<usize> = tiles.iter().map(|tile| tile.id().get()).collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);

        // [Face, Face, Cake, Cake] shuffled as in test_shuffle_walks_backwards.
        let categories: Vec<Category> = tiles.iter().map(|tile| *tile.category()).collect();
        assert_eq!(
            categories,
            vec![
                Category::BeamingFace,
                Category::BirthdayCake,
                Category::BirthdayCake,
                Category::BeamingFace,
            ]
        );
    }
}
