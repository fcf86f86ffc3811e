//! Core game logic module - pure, deterministic, and testable
//!
//! This crate contains the Mahjongg solitaire rules: the stacked board, which tiles are
//! playable, pair removal and undo, the post-shuffle solvability heuristic, and the game
//! session that deals boards and resolves clicks. It has **zero dependencies** on
//! rendering, input devices, or I/O:
//!
//! - **Deterministic**: the same seed deals the same sequence of boards
//! - **Testable**: every rule is covered by unit tests in its module
//! - **Portable**: any front end that can turn a click into a [`Coord`] can drive it
//!
//! # Module Structure
//!
//! - [`geometry`]: stacking and side-neighbour relations between coordinates
//! - [`tileset`]: the 42-face catalog and the 144-tile deal set
//! - [`layout`]: validated 144-slot layouts, parsing, built-in shapes
//! - [`board`]: tile placement, playability, selection, removal, undo, move counting
//! - [`solvability`]: rejects deals that stack three tiles of a family
//! - [`session`]: shuffle-until-solvable dealing and the click protocol
//! - [`snapshot`]: observer view of a session
//! - [`rng`]: seeded shuffle source
//!
//! # Game Rules
//!
//! - A tile is **moveable** when nothing rests on it and its left or right side is free
//! - Two moveable tiles of the same family form a pair and are removed together
//! - All four seasons form one family, and so do the four flowers
//! - Undo puts back the most recent pair
//! - The game is won when the board is empty and stuck when no moveable pair remains
//!
//! # Example
//!
//! ```
//! use xmahjongg_core::{GameSession, Layout, SessionConfig};
//! use xmahjongg_types::{GameStatus, SessionEvent};
//!
//! let layout = Layout::builtin("pyramid").unwrap();
//! let mut session = GameSession::new(layout, SessionConfig::default()).unwrap();
//! session.start_new_game().unwrap();
//! assert_eq!(session.remaining_count(), 144);
//!
//! let first = session.board().moveable_tiles().next().unwrap().coord;
//! assert_eq!(session.handle_click(first), SessionEvent::TileSelected(first));
//! assert_eq!(session.status(), GameStatus::Playing);
//! ```

pub mod board;
pub mod error;
pub mod geometry;
pub mod layout;
pub mod rng;
pub mod session;
pub mod snapshot;
pub mod solvability;
pub mod tileset;

pub use xmahjongg_types as types;

// Re-export commonly used types for convenience
pub use board::{Board, SelectOutcome};
pub use error::{LayoutError, SessionError};
pub use geometry::{is_directly_above, lateral_neighbors_blocked, Side};
pub use layout::{Layout, BUILTIN_LAYOUTS, DEFAULT_LAYOUT};
pub use rng::SimpleRng;
pub use session::{GameSession, SessionConfig, Shuffles};
pub use snapshot::{SessionSnapshot, TileSnapshot};
pub use solvability::is_solvable;
pub use tileset::{build_catalog, expand_to_144, standard_kinds, KindDescriptor};
pub use types::Coord;
