use crate::types::{Coord, GameStatus, SessionState, TileKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileSnapshot {
    pub coord: Coord,
    pub kind: TileKind,
    pub selected: bool,
    pub moveable: bool,
}

/// Observer view of a session after a state change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub state: SessionState,
    pub status: GameStatus,
    pub remaining: usize,
    pub possible_moves: usize,
    pub removed_pairs: usize,
    pub shuffle_attempts: u32,
    pub games_dealt: u32,
    pub selected: Option<Coord>,
    /// Present tiles in draw order
    pub tiles: Vec<TileSnapshot>,
}

impl Default for SessionSnapshot {
    fn default() -> Self {
        Self {
            state: SessionState::Idle,
            status: GameStatus::Playing,
            remaining: 0,
            possible_moves: 0,
            removed_pairs: 0,
            shuffle_attempts: 0,
            games_dealt: 0,
            selected: None,
            tiles: Vec::new(),
        }
    }
}
