//! Board tests - playability, pair removal, undo and move counting

use xmahjongg::core::{standard_kinds, Board, Layout, SelectOutcome, SimpleRng};
use xmahjongg::types::{Coord, Dragon, TileKind, TILE_COUNT};

/// Flat layout with the tile set laid out unshuffled: column 0 holds dot1-dot3 (four
/// each, top to bottom) and column 22 holds seasons, white dragons and flowers.
fn unshuffled_flat() -> Board {
    let layout = Layout::builtin("flat").unwrap();
    let placements = layout
        .sorted_for_drawing()
        .into_iter()
        .zip(standard_kinds());
    Board::from_placements(placements).unwrap()
}

fn dealt(layout: &str, seed: u32) -> Board {
    let layout = Layout::builtin(layout).unwrap();
    let mut kinds = standard_kinds();
    let mut rng = SimpleRng::new(seed);
    Board::deal(&layout, &mut kinds, &mut rng).unwrap()
}

#[test]
fn test_unshuffled_flat_layout() {
    let board = unshuffled_flat();
    assert_eq!(board.remaining_count(), TILE_COUNT);
    assert_eq!(board.tile(Coord::new(0, 0, 0)).unwrap().kind, TileKind::Dot(1));
    assert_eq!(board.tile(Coord::new(8, 0, 0)).unwrap().kind, TileKind::Dot(2));
    assert_eq!(
        board.tile(Coord::new(8, 22, 0)).unwrap().kind,
        TileKind::Dragon(Dragon::White)
    );

    // Only the two outer columns are free on a single level.
    assert_eq!(board.moveable_tiles().count(), 24);
    assert!(board.moveable_tiles().all(|t| t.coord.col == 0 || t.coord.col == 22));
    // Six families with four free tiles each: 6 * C(4, 2).
    assert_eq!(board.possible_moves(), 36);
}

#[test]
fn test_select_match_and_undo_scenario() {
    let mut board = unshuffled_flat();
    let a = Coord::new(0, 0, 0);
    let b = Coord::new(2, 0, 0);

    match board.select(a) {
        SelectOutcome::Selected(tile) => {
            assert_eq!(tile.coord, a);
            assert!(tile.selected);
        }
        other => panic!("expected Selected, got {other:?}"),
    }
    assert_eq!(board.selected(), Some(a));

    match board.select(b) {
        SelectOutcome::Matched { first, second } => {
            assert_eq!(first.coord, a);
            assert_eq!(second.coord, b);
            assert_eq!(first.kind, TileKind::Dot(1));
        }
        other => panic!("expected Matched, got {other:?}"),
    }
    assert_eq!(board.remaining_count(), TILE_COUNT - 2);
    assert_eq!(board.selected(), None);
    assert_eq!(board.removed_pairs().len(), 1);

    // The tiles next to the hole are now free on their left side.
    assert!(board.is_moveable(Coord::new(0, 2, 0)));
    assert!(board.is_moveable(Coord::new(2, 2, 0)));
    assert!(!board.is_moveable(Coord::new(4, 2, 0)));

    assert!(board.undo());
    assert_eq!(board.remaining_count(), TILE_COUNT);
    assert!(!board.tile(a).unwrap().selected);
    assert!(!board.tile(b).unwrap().selected);
    assert!(!board.undo());
}

#[test]
fn test_non_matching_second_click_is_ignored() {
    let mut board = unshuffled_flat();
    let dot1 = Coord::new(0, 0, 0);
    let dot2 = Coord::new(8, 0, 0);

    assert!(matches!(board.select(dot1), SelectOutcome::Selected(_)));
    assert_eq!(board.select(dot2), SelectOutcome::Ignored);
    // The first selection survives.
    assert_eq!(board.selected(), Some(dot1));
    assert!(matches!(board.select(dot1), SelectOutcome::Deselected(_)));
    assert_eq!(board.selected(), None);
}

#[test]
fn test_seasons_match_each_other() {
    let mut board = unshuffled_flat();
    let spring = Coord::new(0, 22, 0);
    let winter = Coord::new(6, 22, 0);
    assert_eq!(board.tile(spring).unwrap().kind, TileKind::Season(1));
    assert_eq!(board.tile(winter).unwrap().kind, TileKind::Season(4));

    board.select(spring);
    assert!(matches!(board.select(winter), SelectOutcome::Matched { .. }));
}

#[test]
fn test_covered_tile_click_is_ignored() {
    let mut board = dealt("pyramid", 3);
    // (2, 2, 0) sits under the first tile of the middle level.
    let covered = Coord::new(2, 2, 0);
    assert!(board.is_occupied(Coord::new(2, 2, 1)));
    assert!(!board.is_moveable(covered));
    assert_eq!(board.select(covered), SelectOutcome::Ignored);
    assert_eq!(board.selected(), None);
}

#[test]
fn test_covered_tile_of_same_family_does_not_match() {
    let placements = vec![
        (Coord::new(0, 0, 0), TileKind::Dot(1)),
        (Coord::new(0, 10, 0), TileKind::Dot(1)),
        (Coord::new(0, 10, 1), TileKind::Bar(1)),
    ];
    let mut board = Board::from_placements(placements).unwrap();
    let free = Coord::new(0, 0, 0);
    let covered = Coord::new(0, 10, 0);
    assert!(!board.is_moveable(covered));

    assert!(matches!(board.select(free), SelectOutcome::Selected(_)));
    assert_eq!(board.select(covered), SelectOutcome::Ignored);
    assert_eq!(board.selected(), Some(free));
    assert!(board.tile(free).unwrap().selected);
    assert!(!board.tile(covered).unwrap().selected);
    assert_eq!(board.remaining_count(), 3);
    assert!(board.removed_pairs().is_empty());
}

#[test]
fn test_empty_slot_click_is_ignored() {
    let mut board = dealt("pyramid", 3);
    assert_eq!(board.select(Coord::new(1, 1, 0)), SelectOutcome::Ignored);
    assert_eq!(board.select(Coord::new(0, 0, 7)), SelectOutcome::Ignored);
}

#[test]
fn test_top_level_tiles_are_never_covered() {
    let board = dealt("pyramid", 9);
    let top: Vec<_> = board
        .tiles_in_draw_order()
        .filter(|t| t.coord.level == 2)
        .collect();
    assert_eq!(top.len(), 16);
    // The 4x4 cap has free left and right edges.
    for t in top {
        let edge = t.coord.col == 6 || t.coord.col == 12;
        assert_eq!(board.is_moveable(t.coord), edge, "{}", t.coord);
    }
}

#[test]
fn test_tile_conservation_through_play() {
    let mut board = dealt("pyramid", 21);
    let mut rng = SimpleRng::new(5);

    for _ in 0..500 {
        assert_eq!(board.total_tiles(), TILE_COUNT);
        let free: Vec<Coord> = board.moveable_tiles().map(|t| t.coord).collect();
        if free.is_empty() {
            break;
        }
        let pick = free[rng.next_range(free.len() as u32) as usize];
        board.select(pick);
        if rng.next_range(8) == 0 {
            board.undo();
        }
    }
    assert_eq!(board.total_tiles(), TILE_COUNT);
}

#[test]
fn test_undo_restores_exact_placements() {
    let mut board = dealt("flat", 4);
    let before = board.placements();

    let mut removed = 0;
    'outer: for a in board.moveable_tiles().copied().collect::<Vec<_>>() {
        for b in board.moveable_tiles().copied().collect::<Vec<_>>() {
            if a.coord != b.coord && a.kind.matches(b.kind) {
                board.select(a.coord);
                if matches!(board.select(b.coord), SelectOutcome::Matched { .. }) {
                    removed += 1;
                }
                break 'outer;
            }
        }
    }

    for _ in 0..removed {
        assert!(board.undo());
    }
    assert_eq!(board.placements(), before);
}

#[test]
fn test_possible_moves_counts_pairs_per_family() {
    let placements = vec![
        (Coord::new(0, 0, 0), TileKind::Dot(1)),
        (Coord::new(0, 4, 0), TileKind::Dot(1)),
        (Coord::new(0, 8, 0), TileKind::Dot(1)),
        (Coord::new(0, 12, 0), TileKind::Flower(1)),
        (Coord::new(0, 16, 0), TileKind::Flower(3)),
        (Coord::new(0, 20, 0), TileKind::Bar(2)),
    ];
    let board = Board::from_placements(placements).unwrap();
    // Isolated tiles are all free: C(3, 2) dots + C(2, 2) flowers.
    assert_eq!(board.possible_moves(), 4);
}
