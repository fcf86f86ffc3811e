//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the engine.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (board engine, driver protocol, renderers).
//!
//! # Grid Units
//!
//! Coordinates are `(row, col, level)` triples in half-tile units:
//!
//! - A tile covers a 2x2 footprint of half-units, so neighbours sit 2 apart
//! - Tiles offset by 1 half-unit overlap visually (the classic staggered layouts)
//! - `level` counts upwards from 0 (the table)
//!
//! # Tile Counts
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TILE_COUNT` | 144 | Tiles in a full game |
//! | `CATALOG_LEN` | 42 | Distinct tile faces |
//! | `COPIES_PER_KIND` | 4 | Copies of every non-season/flower face |
//! | `MAX_REMOVED_PAIRS` | 72 | Depth of the undo history when the board is cleared |
//!
//! # Examples
//!
//! ```
//! use xmahjongg_types::{Coord, TileKind, Wind};
//!
//! let kind = TileKind::from_str("season3").unwrap();
//! assert_eq!(kind.label(), "season");
//! assert!(kind.matches(TileKind::Season(1)));
//! assert!(!TileKind::Dot(1).matches(TileKind::Dot(2)));
//! assert_eq!(TileKind::Wind(Wind::North).name(), "north");
//!
//! let c = Coord::new(2, 4, 1);
//! assert_eq!(c.draw_key(), (1, 4, 2));
//! ```

use std::fmt;

/// Number of tiles in a full game
pub const TILE_COUNT: usize = 144;

/// Number of distinct faces in the tile catalog
pub const CATALOG_LEN: usize = 42;

/// Copies of every ordinary face in the 144-tile set
pub const COPIES_PER_KIND: usize = 4;

/// Undo history depth once every pair has been removed
pub const MAX_REMOVED_PAIRS: usize = TILE_COUNT / 2;

/// Default cap on shuffle attempts when a solvable deal is required
pub const DEFAULT_MAX_SHUFFLE_ATTEMPTS: u32 = 10_000;

/// Lateral distance between side-by-side tiles (a full tile width in half-units)
pub const LATERAL_STEP: i32 = 2;

/// Largest accepted `|row|`, `|col|` and `level`; neighbour probes stay well inside `i32`
pub const COORD_LIMIT: i32 = 1 << 20;

/// Position of a tile slot: half-unit row/column plus stacking level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coord {
    pub row: i32,
    pub col: i32,
    pub level: i32,
}

impl Coord {
    #[inline]
    pub const fn new(row: i32, col: i32, level: i32) -> Self {
        Self { row, col, level }
    }

    /// Whether every component lies within [`COORD_LIMIT`].
    #[inline]
    pub fn in_bounds(self) -> bool {
        let range = -COORD_LIMIT..=COORD_LIMIT;
        range.contains(&self.row) && range.contains(&self.col) && self.level <= COORD_LIMIT
    }

    /// Key used to order tiles for drawing: levels bottom-up, then columns, then rows.
    #[inline]
    pub fn draw_key(self) -> (i32, i32, i32) {
        (self.level, self.col, self.row)
    }
}

impl From<(i32, i32, i32)> for Coord {
    fn from((row, col, level): (i32, i32, i32)) -> Self {
        Self::new(row, col, level)
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.row, self.col, self.level)
    }
}

/// The four wind tiles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Wind {
    North,
    West,
    South,
    East,
}

impl Wind {
    pub const ALL: [Wind; 4] = [Wind::North, Wind::West, Wind::South, Wind::East];

    pub fn as_str(&self) -> &'static str {
        match self {
            Wind::North => "north",
            Wind::West => "west",
            Wind::South => "south",
            Wind::East => "east",
        }
    }
}

/// The three dragon tiles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Dragon {
    Red,
    Green,
    White,
}

impl Dragon {
    pub fn as_str(&self) -> &'static str {
        match self {
            Dragon::Red => "red_dragon",
            Dragon::Green => "green_dragon",
            Dragon::White => "white_dragon",
        }
    }
}

const DOT_NAMES: [&str; 9] = [
    "dot1", "dot2", "dot3", "dot4", "dot5", "dot6", "dot7", "dot8", "dot9",
];
const SIGN_NAMES: [&str; 9] = [
    "sign1", "sign2", "sign3", "sign4", "sign5", "sign6", "sign7", "sign8", "sign9",
];
const BAR_NAMES: [&str; 9] = [
    "bar1", "bar2", "bar3", "bar4", "bar5", "bar6", "bar7", "bar8", "bar9",
];
const SEASON_NAMES: [&str; 4] = ["season1", "season2", "season3", "season4"];
const FLOWER_NAMES: [&str; 4] = ["flower1", "flower2", "flower3", "flower4"];

/// A tile face.
///
/// Suited faces carry their rank (1-9); season and flower faces carry their variant (1-4).
/// Every season variant shares the family label `"season"` and every flower variant the
/// label `"flower"`, so visually distinct seasons still match each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TileKind {
    Dot(u8),
    Sign(u8),
    Bar(u8),
    Wind(Wind),
    Dragon(Dragon),
    Season(u8),
    Flower(u8),
}

impl TileKind {
    /// Family label, the sole matching criterion.
    ///
    /// # Examples
    ///
    /// ```
    /// use xmahjongg_types::{Dragon, TileKind};
    ///
    /// assert_eq!(TileKind::Bar(7).label(), "bar7");
    /// assert_eq!(TileKind::Dragon(Dragon::Green).label(), "green_dragon");
    /// assert_eq!(TileKind::Flower(4).label(), "flower");
    /// ```
    pub fn label(&self) -> &'static str {
        match self {
            TileKind::Season(_) => "season",
            TileKind::Flower(_) => "flower",
            other => other.name(),
        }
    }

    /// Unique face name (`"season2"` rather than `"season"`).
    ///
    /// Out-of-range ranks are clamped into the valid range; the catalog never builds them.
    pub fn name(&self) -> &'static str {
        match *self {
            TileKind::Dot(n) => DOT_NAMES[rank_index(n, 9)],
            TileKind::Sign(n) => SIGN_NAMES[rank_index(n, 9)],
            TileKind::Bar(n) => BAR_NAMES[rank_index(n, 9)],
            TileKind::Wind(w) => w.as_str(),
            TileKind::Dragon(d) => d.as_str(),
            TileKind::Season(n) => SEASON_NAMES[rank_index(n, 4)],
            TileKind::Flower(n) => FLOWER_NAMES[rank_index(n, 4)],
        }
    }

    /// Parse a face name (case-insensitive).
    ///
    /// Bare `"season"` / `"flower"` parse to variant 1.
    ///
    /// # Examples
    ///
    /// ```
    /// use xmahjongg_types::{TileKind, Wind};
    ///
    /// assert_eq!(TileKind::from_str("DOT5"), Some(TileKind::Dot(5)));
    /// assert_eq!(TileKind::from_str("east"), Some(TileKind::Wind(Wind::East)));
    /// assert_eq!(TileKind::from_str("flower"), Some(TileKind::Flower(1)));
    /// assert_eq!(TileKind::from_str("dot0"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        let lower = s.trim().to_ascii_lowercase();
        let lower = lower.as_str();

        for w in Wind::ALL {
            if lower == w.as_str() {
                return Some(TileKind::Wind(w));
            }
        }
        match lower {
            "red_dragon" => return Some(TileKind::Dragon(Dragon::Red)),
            "green_dragon" => return Some(TileKind::Dragon(Dragon::Green)),
            "white_dragon" => return Some(TileKind::Dragon(Dragon::White)),
            "season" => return Some(TileKind::Season(1)),
            "flower" => return Some(TileKind::Flower(1)),
            _ => {}
        }

        let (prefix, max, make): (&str, u8, fn(u8) -> TileKind) = if lower.starts_with("dot") {
            ("dot", 9, TileKind::Dot)
        } else if lower.starts_with("sign") {
            ("sign", 9, TileKind::Sign)
        } else if lower.starts_with("bar") {
            ("bar", 9, TileKind::Bar)
        } else if lower.starts_with("season") {
            ("season", 4, TileKind::Season)
        } else if lower.starts_with("flower") {
            ("flower", 4, TileKind::Flower)
        } else {
            return None;
        };

        let n: u8 = lower[prefix.len()..].parse().ok()?;
        if (1..=max).contains(&n) {
            Some(make(n))
        } else {
            None
        }
    }

    /// Whether two faces form a pair.
    #[inline]
    pub fn matches(&self, other: TileKind) -> bool {
        self.label() == other.label()
    }

    /// Whether the rank or variant is in range (1-9 for suits, 1-4 for seasons and flowers).
    pub fn is_valid(&self) -> bool {
        match *self {
            TileKind::Dot(n) | TileKind::Sign(n) | TileKind::Bar(n) => (1..=9).contains(&n),
            TileKind::Season(n) | TileKind::Flower(n) => (1..=4).contains(&n),
            TileKind::Wind(_) | TileKind::Dragon(_) => true,
        }
    }

    /// Season and flower faces are single instances in the tile set.
    pub fn is_bonus(&self) -> bool {
        matches!(self, TileKind::Season(_) | TileKind::Flower(_))
    }
}

fn rank_index(n: u8, max: u8) -> usize {
    (n.clamp(1, max) - 1) as usize
}

impl fmt::Display for TileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A tile on the board.
///
/// Kind and coordinate are fixed at creation; only `selected` changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tile {
    pub kind: TileKind,
    pub coord: Coord,
    pub selected: bool,
}

impl Tile {
    pub fn new(kind: TileKind, coord: Coord) -> Self {
        Self {
            kind,
            coord,
            selected: false,
        }
    }
}

/// Selection protocol state of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionState {
    /// No game has been dealt yet
    Idle,
    /// A game is running and nothing is selected
    AwaitingFirstSelection,
    /// One tile is selected and waits for its partner
    OneSelected,
}

/// Terminal condition of a running game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameStatus {
    Playing,
    /// Every tile has been removed
    Won,
    /// Tiles remain but no moveable pair exists
    Stuck,
}

/// Event emitted after a click is resolved.
///
/// Observers (renderers, the driver protocol) react to these; the session never
/// calls back into them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionEvent {
    TileSelected(Coord),
    TileDeselected(Coord),
    /// A pair was removed; the coordinates are the earlier selection and the click.
    PairMatched {
        kind: TileKind,
        first: Coord,
        second: Coord,
    },
    NoOp,
}
