//! Board module - tile placement, playability, pair removal and undo
//!
//! The board maps each occupied slot to its tile. Removed tiles are absent from the map
//! and live on an undo stack as pairs; a pair always leaves and returns together.
//!
//! Playability rules:
//! - A tile is covered if any slot of the 3x3 neighbourhood one level up is occupied.
//!   The check is skipped on the layout's highest level.
//! - An uncovered tile is moveable if its left or right side is free
//!   (see [`crate::geometry::lateral_neighbors_blocked`]).

use std::collections::HashMap;

use crate::error::{LayoutError, SessionError};
use crate::geometry::{is_covered, lateral_neighbors_blocked, Side};
use crate::layout::Layout;
use crate::rng::SimpleRng;
use crate::types::{Coord, Tile, TileKind, MAX_REMOVED_PAIRS};

/// Result of resolving a click on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectOutcome {
    /// Empty slot, blocked tile, or a non-matching second tile
    Ignored,
    /// The tile is now the pending selection
    Selected(Tile),
    /// The pending selection was clicked again and released
    Deselected(Tile),
    /// Both tiles were removed; `first` is the earlier selection
    Matched { first: Tile, second: Tile },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Board {
    tiles: HashMap<Coord, Tile>,
    /// Every slot of the deal, sorted by (level, col, row)
    draw_order: Vec<Coord>,
    removed: Vec<(Tile, Tile)>,
    selected: Option<Coord>,
    max_level: i32,
}

impl Board {
    /// Create an empty board
    pub fn new() -> Self {
        Self::default()
    }

    /// Deal a fresh board.
    pub fn deal(
        layout: &Layout,
        kinds: &mut [TileKind],
        rng: &mut SimpleRng,
    ) -> Result<Self, SessionError> {
        let mut board = Self::new();
        board.new_game(layout, kinds, rng)?;
        Ok(board)
    }

    /// Clear the board, shuffle `kinds` in place and lay them onto the layout slots in
    /// draw order.
    pub fn new_game(
        &mut self,
        layout: &Layout,
        kinds: &mut [TileKind],
        rng: &mut SimpleRng,
    ) -> Result<(), SessionError> {
        if kinds.len() != layout.len() {
            return Err(SessionError::TileCountMismatch {
                slots: layout.len(),
                tiles: kinds.len(),
            });
        }

        self.tiles.clear();
        self.removed.clear();
        self.selected = None;

        rng.shuffle(kinds);
        self.draw_order = layout.sorted_for_drawing();
        self.max_level = layout.max_level();
        self.tiles.reserve(self.draw_order.len());
        self.removed.reserve(MAX_REMOVED_PAIRS);
        for (&coord, &kind) in self.draw_order.iter().zip(kinds.iter()) {
            self.tiles.insert(coord, Tile::new(kind, coord));
        }
        Ok(())
    }

    /// Build a board from explicit placements, e.g. a reloaded board dump.
    ///
    /// No tile-count check is made, so partial boards can be built for analysis.
    pub fn from_placements<I>(placements: I) -> Result<Self, LayoutError>
    where
        I: IntoIterator<Item = (Coord, TileKind)>,
    {
        let mut board = Self::new();
        for (coord, kind) in placements {
            if coord.level < 0 {
                return Err(LayoutError::NegativeLevel(coord));
            }
            if !coord.in_bounds() {
                return Err(LayoutError::OutOfRange(coord));
            }
            if board.tiles.insert(coord, Tile::new(kind, coord)).is_some() {
                return Err(LayoutError::DuplicateCoordinate(coord));
            }
            board.draw_order.push(coord);
        }
        board.draw_order.sort_by_key(|c| c.draw_key());
        board.max_level = board.draw_order.iter().map(|c| c.level).max().unwrap_or(0);
        Ok(board)
    }

    /// Present tiles as (coordinate, kind), in draw order.
    pub fn placements(&self) -> Vec<(Coord, TileKind)> {
        self.tiles_in_draw_order()
            .map(|tile| (tile.coord, tile.kind))
            .collect()
    }

    #[inline]
    pub fn is_occupied(&self, coord: Coord) -> bool {
        self.tiles.contains_key(&coord)
    }

    pub fn tile(&self, coord: Coord) -> Option<&Tile> {
        self.tiles.get(&coord)
    }

    pub fn selected(&self) -> Option<Coord> {
        self.selected
    }

    /// Highest level of the deal's layout.
    pub fn max_level(&self) -> i32 {
        self.max_level
    }

    /// Whether the tile at `coord` may be picked up. Empty slots are never moveable.
    pub fn is_moveable(&self, coord: Coord) -> bool {
        if !self.is_occupied(coord) {
            return false;
        }
        let occupied = |c: Coord| self.tiles.contains_key(&c);
        if coord.level < self.max_level && is_covered(occupied, coord) {
            return false;
        }
        Side::BOTH
            .into_iter()
            .any(|side| !lateral_neighbors_blocked(occupied, coord, side))
    }

    /// Resolve a click on `coord`.
    pub fn select(&mut self, coord: Coord) -> SelectOutcome {
        let Some(clicked) = self.tiles.get(&coord).copied() else {
            return SelectOutcome::Ignored;
        };
        if !self.is_moveable(coord) {
            return SelectOutcome::Ignored;
        }

        let pending = self.selected.and_then(|c| self.tiles.get(&c).copied());
        match pending {
            None => {
                self.selected = Some(coord);
                let tile = self.set_selected(coord, true);
                SelectOutcome::Selected(tile.unwrap_or(clicked))
            }
            Some(first) if first.coord == coord => {
                self.selected = None;
                let tile = self.set_selected(coord, false);
                SelectOutcome::Deselected(tile.unwrap_or(clicked))
            }
            Some(first) if first.kind.matches(clicked.kind) => {
                self.selected = None;
                self.tiles.remove(&first.coord);
                self.tiles.remove(&coord);
                let first = Tile {
                    selected: false,
                    ..first
                };
                let second = Tile {
                    selected: false,
                    ..clicked
                };
                self.removed.push((first, second));
                SelectOutcome::Matched { first, second }
            }
            Some(_) => SelectOutcome::Ignored,
        }
    }

    fn set_selected(&mut self, coord: Coord, selected: bool) -> Option<Tile> {
        let tile = self.tiles.get_mut(&coord)?;
        tile.selected = selected;
        Some(*tile)
    }

    /// Put the most recently removed pair back. Returns false if nothing was removed.
    pub fn undo(&mut self) -> bool {
        let Some((first, second)) = self.removed.pop() else {
            return false;
        };
        self.tiles.insert(first.coord, first);
        self.tiles.insert(second.coord, second);
        true
    }

    /// Number of matching pairs among the currently moveable tiles: `sum C(n, 2)` per family.
    pub fn possible_moves(&self) -> usize {
        let mut per_family: HashMap<&'static str, usize> = HashMap::new();
        for tile in self.moveable_tiles() {
            *per_family.entry(tile.kind.label()).or_default() += 1;
        }
        per_family.values().map(|&n| n * n.saturating_sub(1) / 2).sum()
    }

    pub fn moveable_tiles(&self) -> impl Iterator<Item = &Tile> + '_ {
        self.tiles_in_draw_order()
            .filter(move |tile| self.is_moveable(tile.coord))
    }

    pub fn remaining_count(&self) -> usize {
        self.tiles.len()
    }

    /// Removed pairs, oldest first.
    pub fn removed_pairs(&self) -> &[(Tile, Tile)] {
        &self.removed
    }

    /// Present tiles, bottom levels first (the order renderers draw in).
    pub fn tiles_in_draw_order(&self) -> impl Iterator<Item = &Tile> + '_ {
        self.draw_order.iter().filter_map(|c| self.tiles.get(c))
    }

    /// Present plus removed tiles; constant for the lifetime of a deal.
    pub fn total_tiles(&self) -> usize {
        self.tiles.len() + self.removed.len() * 2
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Wind, TILE_COUNT};

    fn board(placements: &[((i32, i32, i32), TileKind)]) -> Board {
        Board::from_placements(placements.iter().map(|&(c, k)| (Coord::from(c), k))).unwrap()
    }

    #[test]
    fn lone_tile_is_moveable() {
        let b = board(&[((0, 0, 0), TileKind::Dot(1))]);
        assert!(b.is_moveable(Coord::new(0, 0, 0)));
        assert!(!b.is_moveable(Coord::new(0, 2, 0)));
    }

    #[test]
    fn tile_between_neighbours_is_blocked() {
        let b = board(&[
            ((0, 0, 0), TileKind::Dot(1)),
            ((1, 2, 0), TileKind::Dot(2)),
            ((0, 4, 0), TileKind::Dot(3)),
        ]);
        assert!(b.is_moveable(Coord::new(0, 0, 0)));
        assert!(!b.is_moveable(Coord::new(1, 2, 0)));
        assert!(b.is_moveable(Coord::new(0, 4, 0)));
    }

    #[test]
    fn placements_out_of_range_are_rejected() {
        let err = Board::from_placements([(Coord::new(0, i32::MIN, 0), TileKind::Dot(1))]);
        assert_eq!(err, Err(LayoutError::OutOfRange(Coord::new(0, i32::MIN, 0))));
        let err = Board::from_placements([(Coord::new(0, 0, i32::MAX), TileKind::Dot(1))]);
        assert!(matches!(err, Err(LayoutError::OutOfRange(_))));
    }

    #[test]
    fn covered_tile_is_not_moveable() {
        let b = board(&[
            ((4, 4, 0), TileKind::Bar(1)),
            ((5, 3, 1), TileKind::Bar(2)),
        ]);
        assert!(!b.is_moveable(Coord::new(4, 4, 0)));
        assert!(b.is_moveable(Coord::new(5, 3, 1)));
    }

    #[test]
    fn tile_two_rows_away_does_not_cover() {
        let b = board(&[
            ((4, 4, 0), TileKind::Bar(1)),
            ((6, 4, 1), TileKind::Bar(2)),
        ]);
        assert!(b.is_moveable(Coord::new(4, 4, 0)));
    }

    #[test]
    fn select_toggle_and_match() {
        let mut b = board(&[
            ((0, 0, 0), TileKind::Season(1)),
            ((0, 10, 0), TileKind::Season(3)),
            ((0, 20, 0), TileKind::Dot(1)),
        ]);
        let a = Coord::new(0, 0, 0);
        let c = Coord::new(0, 10, 0);

        assert!(matches!(b.select(a), SelectOutcome::Selected(t) if t.selected));
        assert_eq!(b.selected(), Some(a));
        assert!(matches!(b.select(a), SelectOutcome::Deselected(t) if !t.selected));
        assert_eq!(b.selected(), None);

        b.select(a);
        assert_eq!(b.select(Coord::new(0, 20, 0)), SelectOutcome::Ignored);
        assert_eq!(b.selected(), Some(a));

        match b.select(c) {
            SelectOutcome::Matched { first, second } => {
                assert_eq!(first.coord, a);
                assert_eq!(second.coord, c);
                assert!(!first.selected && !second.selected);
            }
            other => panic!("expected match, got {other:?}"),
        }
        assert_eq!(b.remaining_count(), 1);
        assert_eq!(b.selected(), None);
    }

    #[test]
    fn select_empty_slot_is_ignored() {
        let mut b = board(&[((0, 0, 0), TileKind::Dot(1))]);
        assert_eq!(b.select(Coord::new(9, 9, 0)), SelectOutcome::Ignored);
        assert_eq!(b.selected(), None);
    }

    #[test]
    fn undo_restores_pair_unselected() {
        let mut b = board(&[
            ((0, 0, 0), TileKind::Wind(Wind::East)),
            ((0, 10, 0), TileKind::Wind(Wind::East)),
        ]);
        assert!(!b.undo());

        b.select(Coord::new(0, 0, 0));
        b.select(Coord::new(0, 10, 0));
        assert_eq!(b.remaining_count(), 0);
        assert_eq!(b.removed_pairs().len(), 1);

        assert!(b.undo());
        assert_eq!(b.remaining_count(), 2);
        assert!(b.removed_pairs().is_empty());
        assert!(b.tiles_in_draw_order().all(|t| !t.selected));
        assert!(!b.undo());
    }

    #[test]
    fn possible_moves_counts_pairs_per_family() {
        let b = board(&[
            ((0, 0, 0), TileKind::Dot(1)),
            ((0, 10, 0), TileKind::Dot(1)),
            ((0, 20, 0), TileKind::Dot(1)),
            ((0, 30, 0), TileKind::Dot(1)),
            ((0, 40, 0), TileKind::Flower(1)),
            ((0, 50, 0), TileKind::Flower(2)),
            ((0, 60, 0), TileKind::Dot(2)),
        ]);
        assert_eq!(b.possible_moves(), 6 + 1);
    }

    #[test]
    fn possible_moves_ignores_blocked_tiles() {
        // Middle dot1 is blocked on both sides, leaving one moveable dot1.
        let b = board(&[
            ((0, 0, 0), TileKind::Bar(1)),
            ((0, 2, 0), TileKind::Dot(1)),
            ((0, 4, 0), TileKind::Bar(2)),
            ((0, 10, 0), TileKind::Dot(1)),
        ]);
        assert_eq!(b.possible_moves(), 0);
    }

    #[test]
    fn new_game_deals_every_slot() {
        let layout = Layout::builtin("pyramid").unwrap();
        let mut kinds = crate::tileset::standard_kinds();
        let mut rng = SimpleRng::new(5);
        let b = Board::deal(&layout, &mut kinds, &mut rng).unwrap();

        assert_eq!(b.remaining_count(), TILE_COUNT);
        assert_eq!(b.total_tiles(), TILE_COUNT);
        assert_eq!(b.max_level(), 2);
        for c in layout.coords() {
            assert!(b.is_occupied(*c));
        }
        let order: Vec<_> = b.tiles_in_draw_order().map(|t| t.coord).collect();
        assert_eq!(order, layout.sorted_for_drawing());
    }

    #[test]
    fn new_game_rejects_mismatched_tile_set() {
        let layout = Layout::builtin("flat").unwrap();
        let mut kinds = vec![TileKind::Dot(1); 10];
        let err = Board::deal(&layout, &mut kinds, &mut SimpleRng::new(1)).unwrap_err();
        assert_eq!(
            err,
            SessionError::TileCountMismatch {
                slots: 144,
                tiles: 10
            }
        );
    }

    #[test]
    fn from_placements_rejects_duplicates() {
        let err = Board::from_placements([
            (Coord::new(0, 0, 0), TileKind::Dot(1)),
            (Coord::new(0, 0, 0), TileKind::Dot(2)),
        ])
        .unwrap_err();
        assert_eq!(err, LayoutError::DuplicateCoordinate(Coord::new(0, 0, 0)));
    }
}
