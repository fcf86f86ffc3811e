//! Layout module - the static shape of a puzzle
//!
//! A layout is an ordered list of exactly 144 distinct slots. Layout resources use the
//! xmahjongg text format: one `row col level` triple per line, `#` starts a comment line.

use std::collections::HashSet;

use crate::error::LayoutError;
use crate::types::{Coord, TILE_COUNT};

/// Validated set of tile slots
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    coords: Vec<Coord>,
}

/// A layout compiled into the binary
#[derive(Clone, Copy, Debug)]
pub struct BuiltinLayout {
    pub name: &'static str,
    build: fn() -> Vec<Coord>,
}

pub const DEFAULT_LAYOUT: &str = "pyramid";

pub const BUILTIN_LAYOUTS: &[BuiltinLayout] = &[
    BuiltinLayout {
        name: "pyramid",
        build: pyramid,
    },
    BuiltinLayout {
        name: "flat",
        build: flat,
    },
];

impl Layout {
    /// Validate a list of slots.
    pub fn new(coords: Vec<Coord>) -> Result<Self, LayoutError> {
        if coords.len() != TILE_COUNT {
            return Err(LayoutError::WrongCount {
                expected: TILE_COUNT,
                found: coords.len(),
            });
        }
        let mut seen = HashSet::with_capacity(coords.len());
        for &c in &coords {
            if c.level < 0 {
                return Err(LayoutError::NegativeLevel(c));
            }
            if !c.in_bounds() {
                return Err(LayoutError::OutOfRange(c));
            }
            if !seen.insert(c) {
                return Err(LayoutError::DuplicateCoordinate(c));
            }
        }
        Ok(Self { coords })
    }

    /// Parse the xmahjongg text format.
    ///
    /// # Examples
    ///
    /// ```
    /// use xmahjongg_core::Layout;
    ///
    /// let text: String = (0..144)
    ///     .map(|i| format!("{} {} 0\n", (i / 12) * 2, (i % 12) * 2))
    ///     .collect();
    /// let layout = Layout::parse(&format!("# flat\n{text}")).unwrap();
    /// assert_eq!(layout.len(), 144);
    /// assert!(Layout::parse("0 0 0\n").is_err());
    /// ```
    pub fn parse(text: &str) -> Result<Self, LayoutError> {
        let mut coords = Vec::with_capacity(TILE_COUNT);
        for (i, raw) in text.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            coords.push(parse_triple(line).ok_or_else(|| LayoutError::Parse {
                line: i + 1,
                content: line.to_string(),
            })?);
        }
        Self::new(coords)
    }

    /// Look up a built-in layout by name (case-insensitive).
    pub fn builtin(name: &str) -> Option<Self> {
        let name = name.trim();
        BUILTIN_LAYOUTS
            .iter()
            .find(|entry| entry.name.eq_ignore_ascii_case(name))
            .map(|entry| Self {
                coords: (entry.build)(),
            })
    }

    pub fn coords(&self) -> &[Coord] {
        &self.coords
    }

    pub fn len(&self) -> usize {
        self.coords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }

    /// Highest level used by the layout.
    pub fn max_level(&self) -> i32 {
        self.coords.iter().map(|c| c.level).max().unwrap_or(0)
    }

    /// Largest (row, col) used; renderers size their canvas from this.
    pub fn extent(&self) -> (i32, i32) {
        let rows = self.coords.iter().map(|c| c.row).max().unwrap_or(0);
        let cols = self.coords.iter().map(|c| c.col).max().unwrap_or(0);
        (rows, cols)
    }

    /// Slots in draw order: levels bottom-up, then columns, then rows.
    pub fn sorted_for_drawing(&self) -> Vec<Coord> {
        let mut coords = self.coords.clone();
        coords.sort_by_key(|c| c.draw_key());
        coords
    }
}

fn parse_triple(line: &str) -> Option<Coord> {
    let mut parts = line.split_whitespace().map(|p| p.parse::<i32>());
    let row = parts.next()?.ok()?;
    let col = parts.next()?.ok()?;
    let level = parts.next()?.ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some(Coord::new(row, col, level))
}

fn grid<R, C>(rows: R, cols: C, level: i32) -> Vec<Coord>
where
    R: Iterator<Item = i32> + Clone,
    C: Iterator<Item = i32>,
{
    cols.flat_map(|col| rows.clone().map(move |row| Coord::new(row, col, level)))
        .collect()
}

/// 10x8 base, 8x6 middle, 4x4 top.
fn pyramid() -> Vec<Coord> {
    let mut coords = grid((0..=14).step_by(2), (0..=18).step_by(2), 0);
    coords.extend(grid((2..=12).step_by(2), (2..=16).step_by(2), 1));
    coords.extend(grid((4..=10).step_by(2), (6..=12).step_by(2), 2));
    coords
}

/// 12x12 single level.
fn flat() -> Vec<Coord> {
    grid((0..=22).step_by(2), (0..=22).step_by(2), 0)
}
