//! Geometry module - stacking and adjacency relations between coordinates
//!
//! Tiles are 2 half-units wide and 2 half-units tall, so two tiles on different levels
//! overlap whenever their rows and columns both differ by less than 2. Side neighbours
//! sit exactly 2 columns away and may be offset by one half-row.

use arrayvec::ArrayVec;

use crate::types::{Coord, LATERAL_STEP};

/// Lateral direction of a tile's free side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub const BOTH: [Side; 2] = [Side::Left, Side::Right];

    #[inline]
    fn col_offset(self) -> i32 {
        match self {
            Side::Left => -LATERAL_STEP,
            Side::Right => LATERAL_STEP,
        }
    }
}

/// True if `a` rests on a strictly higher level and overlaps `b`'s footprint.
#[inline]
pub fn is_directly_above(a: Coord, b: Coord) -> bool {
    a.level > b.level && (a.row - b.row).abs() < 2 && (a.col - b.col).abs() < 2
}

/// The three slots that block `coord` on `side`.
#[inline]
pub fn lateral_probes(coord: Coord, side: Side) -> [Coord; 3] {
    let col = coord.col + side.col_offset();
    [
        Coord::new(coord.row - 1, col, coord.level),
        Coord::new(coord.row, col, coord.level),
        Coord::new(coord.row + 1, col, coord.level),
    ]
}

/// The nine slots one level up that cover `coord`.
pub fn cover_probes(coord: Coord) -> ArrayVec<Coord, 9> {
    let mut out = ArrayVec::new();
    for row in coord.row - 1..=coord.row + 1 {
        for col in coord.col - 1..=coord.col + 1 {
            out.push(Coord::new(row, col, coord.level + 1));
        }
    }
    out
}

/// A side is blocked iff any of its three probe slots is occupied.
pub fn lateral_neighbors_blocked<F>(occupied: F, coord: Coord, side: Side) -> bool
where
    F: Fn(Coord) -> bool,
{
    lateral_probes(coord, side).into_iter().any(occupied)
}

/// Covered iff any slot of the 3x3 neighbourhood one level up is occupied.
pub fn is_covered<F>(occupied: F, coord: Coord) -> bool
where
    F: Fn(Coord) -> bool,
{
    cover_probes(coord).into_iter().any(occupied)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn above_requires_strictly_higher_level() {
        let base = Coord::new(4, 4, 1);
        assert!(is_directly_above(Coord::new(4, 4, 2), base));
        assert!(is_directly_above(Coord::new(5, 3, 3), base));
        assert!(!is_directly_above(Coord::new(4, 4, 1), base));
        assert!(!is_directly_above(Coord::new(4, 4, 0), base));
    }

    #[test]
    fn above_requires_overlapping_footprint() {
        let base = Coord::new(4, 4, 0);
        assert!(!is_directly_above(Coord::new(6, 4, 1), base));
        assert!(!is_directly_above(Coord::new(4, 2, 1), base));
        assert!(is_directly_above(Coord::new(3, 5, 1), base));
    }

    #[test]
    fn lateral_probes_scan_three_rows_two_columns_out() {
        let probes = lateral_probes(Coord::new(4, 6, 1), Side::Left);
        assert_eq!(
            probes,
            [
                Coord::new(3, 4, 1),
                Coord::new(4, 4, 1),
                Coord::new(5, 4, 1)
            ]
        );
        let probes = lateral_probes(Coord::new(4, 6, 1), Side::Right);
        assert!(probes.iter().all(|c| c.col == 8 && c.level == 1));
    }

    #[test]
    fn half_row_offset_neighbour_blocks() {
        let neighbour = Coord::new(5, 2, 0);
        let occupied = |c: Coord| c == neighbour;
        assert!(lateral_neighbors_blocked(occupied, Coord::new(4, 4, 0), Side::Left));
        assert!(!lateral_neighbors_blocked(occupied, Coord::new(4, 4, 0), Side::Right));
        assert!(!lateral_neighbors_blocked(occupied, Coord::new(2, 4, 0), Side::Left));
    }

    #[test]
    fn cover_probes_span_full_neighbourhood() {
        let probes = cover_probes(Coord::new(2, 2, 0));
        assert_eq!(probes.len(), 9);
        assert!(probes.contains(&Coord::new(1, 1, 1)));
        assert!(probes.contains(&Coord::new(3, 3, 1)));
        assert!(is_covered(|c| c == Coord::new(3, 1, 1), Coord::new(2, 2, 0)));
        assert!(!is_covered(|c| c == Coord::new(2, 2, 2), Coord::new(2, 2, 0)));
    }
}
