//! Game session module - dealing policy and the click protocol
//!
//! A session owns the layout, the tile set and the RNG. New games are dealt from a lazily
//! produced sequence of shuffles ([`Shuffles`]); the session pulls deals until one passes
//! the solvability heuristic or the attempt budget runs out.

use crate::board::{Board, SelectOutcome};
use crate::error::SessionError;
use crate::layout::Layout;
use crate::rng::SimpleRng;
use crate::snapshot::{SessionSnapshot, TileSnapshot};
use crate::solvability::is_solvable;
use crate::tileset::standard_kinds;
use crate::types::{
    Coord, GameStatus, SessionEvent, SessionState, TileKind, DEFAULT_MAX_SHUFFLE_ATTEMPTS,
};

/// Dealing policy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    /// Reject deals that fail [`is_solvable`]
    pub require_solvable: bool,
    /// Shuffle budget per new game; `None` retries forever
    pub max_attempts: Option<u32>,
    pub seed: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            require_solvable: true,
            max_attempts: Some(DEFAULT_MAX_SHUFFLE_ATTEMPTS),
            seed: 1,
        }
    }
}

/// Endless sequence of fresh deals over one layout.
///
/// Each item reshuffles the shared tile set. The sequence ends early only if the tile set
/// does not fit the layout.
pub struct Shuffles<'a> {
    layout: &'a Layout,
    kinds: &'a mut [TileKind],
    rng: &'a mut SimpleRng,
}

impl<'a> Shuffles<'a> {
    pub fn new(layout: &'a Layout, kinds: &'a mut [TileKind], rng: &'a mut SimpleRng) -> Self {
        Self { layout, kinds, rng }
    }
}

impl Iterator for Shuffles<'_> {
    type Item = Board;

    fn next(&mut self) -> Option<Board> {
        Board::deal(self.layout, self.kinds, self.rng).ok()
    }
}

/// One player's game: board, selection state and dealing policy.
#[derive(Debug, Clone)]
pub struct GameSession {
    layout: Layout,
    kinds: Vec<TileKind>,
    rng: SimpleRng,
    config: SessionConfig,
    board: Board,
    state: SessionState,
    /// Shuffles used for the current deal
    shuffle_attempts: u32,
    games_dealt: u32,
}

impl GameSession {
    /// Session over the standard 144-tile set. No game is dealt until
    /// [`start_new_game`](Self::start_new_game).
    pub fn new(layout: Layout, config: SessionConfig) -> Result<Self, SessionError> {
        Self::with_kinds(layout, standard_kinds(), config)
    }

    pub fn with_kinds(
        layout: Layout,
        kinds: Vec<TileKind>,
        config: SessionConfig,
    ) -> Result<Self, SessionError> {
        if kinds.len() != layout.len() {
            return Err(SessionError::TileCountMismatch {
                slots: layout.len(),
                tiles: kinds.len(),
            });
        }
        if let Some(&kind) = kinds.iter().find(|k| !k.is_valid()) {
            return Err(SessionError::InvalidKind(kind));
        }
        Ok(Self {
            layout,
            kinds,
            rng: SimpleRng::new(config.seed),
            config,
            board: Board::new(),
            state: SessionState::Idle,
            shuffle_attempts: 0,
            games_dealt: 0,
        })
    }

    /// Deal a new game according to the session's policy.
    ///
    /// Returns the number of shuffles it took. On `SolvabilityTimeout` the previous game
    /// (if any) is left untouched.
    pub fn start_new_game(&mut self) -> Result<u32, SessionError> {
        let require_solvable = self.config.require_solvable;
        let max_attempts = self.config.max_attempts;

        let mut attempts = 0u32;
        let mut dealt = None;
        for board in Shuffles::new(&self.layout, &mut self.kinds, &mut self.rng) {
            attempts = attempts.saturating_add(1);
            if !require_solvable || is_solvable(&board) {
                dealt = Some(board);
                break;
            }
            if max_attempts.is_some_and(|max| attempts >= max) {
                break;
            }
        }

        let Some(board) = dealt else {
            return Err(SessionError::SolvabilityTimeout { attempts });
        };
        self.board = board;
        self.state = SessionState::AwaitingFirstSelection;
        self.shuffle_attempts = attempts;
        self.games_dealt += 1;
        Ok(attempts)
    }

    /// Resolve a click. Before the first deal every click is a no-op.
    pub fn handle_click(&mut self, coord: Coord) -> SessionEvent {
        if self.state == SessionState::Idle {
            return SessionEvent::NoOp;
        }
        let event = match self.board.select(coord) {
            SelectOutcome::Ignored => SessionEvent::NoOp,
            SelectOutcome::Selected(tile) => SessionEvent::TileSelected(tile.coord),
            SelectOutcome::Deselected(tile) => SessionEvent::TileDeselected(tile.coord),
            SelectOutcome::Matched { first, second } => SessionEvent::PairMatched {
                kind: first.kind,
                first: first.coord,
                second: second.coord,
            },
        };
        self.sync_state();
        event
    }

    /// Take back the last matched pair. A pending selection is kept.
    pub fn handle_undo(&mut self) -> bool {
        if self.state == SessionState::Idle {
            return false;
        }
        let undone = self.board.undo();
        self.sync_state();
        undone
    }

    /// Replace the current board, e.g. with a reloaded dump. Keeps the dealing policy.
    pub fn load_board(&mut self, board: Board) {
        self.board = board;
        self.shuffle_attempts = 0;
        self.state = SessionState::AwaitingFirstSelection;
        self.sync_state();
    }

    fn sync_state(&mut self) {
        self.state = if self.board.selected().is_some() {
            SessionState::OneSelected
        } else {
            SessionState::AwaitingFirstSelection
        };
    }

    /// `Playing` until dealt, then `Won` once cleared or `Stuck` once no pair is open.
    pub fn status(&self) -> GameStatus {
        if self.state == SessionState::Idle {
            GameStatus::Playing
        } else if self.board.remaining_count() == 0 {
            GameStatus::Won
        } else if self.board.possible_moves() == 0 {
            GameStatus::Stuck
        } else {
            GameStatus::Playing
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn shuffle_attempts(&self) -> u32 {
        self.shuffle_attempts
    }

    pub fn games_dealt(&self) -> u32 {
        self.games_dealt
    }

    pub fn remaining_count(&self) -> usize {
        self.board.remaining_count()
    }

    pub fn possible_moves(&self) -> usize {
        self.board.possible_moves()
    }

    /// Fill `out` with the observer view, reusing its tile buffer.
    pub fn snapshot_into(&self, out: &mut SessionSnapshot) {
        out.state = self.state;
        out.status = self.status();
        out.remaining = self.board.remaining_count();
        out.possible_moves = self.board.possible_moves();
        out.removed_pairs = self.board.removed_pairs().len();
        out.shuffle_attempts = self.shuffle_attempts;
        out.games_dealt = self.games_dealt;
        out.selected = self.board.selected();

        out.tiles.clear();
        out.tiles.extend(self.board.tiles_in_draw_order().map(|tile| TileSnapshot {
            coord: tile.coord,
            kind: tile.kind,
            selected: tile.selected,
            moveable: self.board.is_moveable(tile.coord),
        }));
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let mut s = SessionSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}
