//! Error types for layout loading and game setup.

use std::fmt;

use crate::types::{Coord, TileKind};

/// A layout resource that does not describe exactly 144 distinct slots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    /// A non-comment line is not three integers.
    Parse { line: usize, content: String },
    WrongCount { expected: usize, found: usize },
    DuplicateCoordinate(Coord),
    NegativeLevel(Coord),
    /// A component lies beyond [`COORD_LIMIT`](crate::types::COORD_LIMIT).
    OutOfRange(Coord),
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayoutError::Parse { line, content } => {
                write!(f, "line {line}: expected `row col level`, got {content:?}")
            }
            LayoutError::WrongCount { expected, found } => {
                write!(f, "expected {expected} tile positions, found {found}")
            }
            LayoutError::DuplicateCoordinate(c) => write!(f, "duplicate tile position {c}"),
            LayoutError::NegativeLevel(c) => write!(f, "negative level at {c}"),
            LayoutError::OutOfRange(c) => write!(f, "tile position {c} is out of range"),
        }
    }
}

impl std::error::Error for LayoutError {}

/// Failure to deal a new game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// The layout and the tile set disagree on the number of tiles.
    TileCountMismatch { slots: usize, tiles: usize },
    /// A tile face with a rank or variant outside its suit.
    InvalidKind(TileKind),
    /// No solvable deal within the configured number of shuffles.
    SolvabilityTimeout { attempts: u32 },
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::TileCountMismatch { slots, tiles } => {
                write!(f, "layout has {slots} slots but the tile set has {tiles} tiles")
            }
            SessionError::InvalidKind(kind) => write!(f, "invalid tile kind {kind:?}"),
            SessionError::SolvabilityTimeout { attempts } => {
                write!(f, "no solvable deal after {attempts} shuffles")
            }
        }
    }
}

impl std::error::Error for SessionError {}
