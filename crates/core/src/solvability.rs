//! Solvability heuristic for freshly dealt boards
//!
//! Three tiles of one family stacked directly on each other cannot all be paired: the
//! bottom tile only frees up after the two above it are gone, and one of those needs a
//! partner from elsewhere. The check walks each family bottom-up, counting tiles that sit
//! directly on the previous tile of the same family, and rejects the deal once a family
//! reaches three stacked tiles.
//!
//! This is a heuristic. A board that passes may still be unwinnable.

use std::collections::HashMap;

use crate::board::Board;
use crate::geometry::is_directly_above;
use crate::types::Tile;

/// Stacked same-family tiles that make a deal unsolvable
pub const STACK_LIMIT: u32 = 3;

/// Returns false if any family reaches [`STACK_LIMIT`] directly stacked tiles.
pub fn is_solvable(board: &Board) -> bool {
    let mut families: HashMap<&'static str, Vec<&Tile>> = HashMap::new();
    for tile in board.tiles_in_draw_order() {
        families.entry(tile.kind.label()).or_default().push(tile);
    }

    for tiles in families.values_mut() {
        // Stable sort keeps draw order among tiles of equal level.
        tiles.sort_by_key(|t| t.coord.level);
        // The bottom tile of the first step counts too; steps accumulate across the family.
        let mut stacked = 1;
        for pair in tiles.windows(2) {
            let (lower, upper) = (pair[0], pair[1]);
            if is_directly_above(upper.coord, lower.coord) {
                stacked += 1;
                if stacked >= STACK_LIMIT {
                    return false;
                }
            }
        }
    }
    true
}
