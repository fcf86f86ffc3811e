//! Protocol module - JSON message types for the session driver
//!
//! Line-delimited JSON. Every message is an object tagged by `type`; client messages carry
//! a `seq` that must strictly increase, and replies echo it.

use serde::{Deserialize, Serialize};

use crate::core::{Board, LayoutError, SessionSnapshot, TileSnapshot};
use crate::types::{Coord, GameStatus, SessionEvent, SessionState, Tile, TileKind};

pub const PROTOCOL_VERSION: &str = "1.0.0";

// ============== Client -> Driver Messages ==============

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientInfo {
    pub name: String,
    pub version: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    Hello {
        seq: u64,
        #[serde(default)]
        client: Option<ClientInfo>,
    },
    /// A click already resolved to a slot by the front end
    Click {
        seq: u64,
        row: i32,
        col: i32,
        level: i32,
    },
    Undo {
        seq: u64,
    },
    NewGame {
        seq: u64,
    },
    Observe {
        seq: u64,
    },
    /// Ask for the current board's coordinate -> kind mapping
    Dump {
        seq: u64,
    },
    /// Replace the board with a previously dumped mapping
    Load {
        seq: u64,
        tiles: Vec<PlacementWire>,
    },
}

impl ClientMessage {
    pub fn seq(&self) -> u64 {
        match self {
            ClientMessage::Hello { seq, .. }
            | ClientMessage::Click { seq, .. }
            | ClientMessage::Undo { seq }
            | ClientMessage::NewGame { seq }
            | ClientMessage::Observe { seq }
            | ClientMessage::Dump { seq }
            | ClientMessage::Load { seq, .. } => *seq,
        }
    }
}

// ============== Driver -> Client Messages ==============

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    Welcome(WelcomeMessage),
    Observation(ObservationMessage),
    Board(BoardMessage),
    Error(ErrorMessage),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WelcomeMessage {
    pub seq: u64,
    pub protocol_version: String,
    pub layout: String,
    pub background: String,
    pub require_solvable: bool,
    pub seed: u32,
    /// Largest row and column of the layout, for sizing the canvas
    pub extent: [i32; 2],
    pub max_level: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObservationMessage {
    pub seq: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event: Option<EventWire>,
    pub state: StateWire,
    pub status: StatusWire,
    pub remaining: usize,
    pub possible_moves: usize,
    pub removed_pairs: usize,
    pub shuffle_attempts: u32,
    pub games_dealt: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected: Option<CoordWire>,
    pub tiles: Vec<TileWire>,
}

impl ObservationMessage {
    pub fn from_snapshot(seq: u64, event: Option<EventWire>, snap: &SessionSnapshot) -> Self {
        Self {
            seq,
            event,
            state: snap.state.into(),
            status: snap.status.into(),
            remaining: snap.remaining,
            possible_moves: snap.possible_moves,
            removed_pairs: snap.removed_pairs,
            shuffle_attempts: snap.shuffle_attempts,
            games_dealt: snap.games_dealt,
            selected: snap.selected.map(CoordWire::from),
            tiles: snap.tiles.iter().map(TileWire::from).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardMessage {
    pub seq: u64,
    pub tiles: Vec<PlacementWire>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorMessage {
    pub seq: u64,
    pub code: ErrorCode,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    InvalidMessage,
    OutOfOrder,
    MalformedLayout,
    SolvabilityTimeout,
    UnknownKind,
}

// ============== Wire Types ==============

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CoordWire {
    pub row: i32,
    pub col: i32,
    pub level: i32,
}

impl From<Coord> for CoordWire {
    fn from(c: Coord) -> Self {
        Self {
            row: c.row,
            col: c.col,
            level: c.level,
        }
    }
}

impl From<CoordWire> for Coord {
    fn from(c: CoordWire) -> Self {
        Coord::new(c.row, c.col, c.level)
    }
}

/// A tile as drawn by a renderer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileWire {
    pub row: i32,
    pub col: i32,
    pub level: i32,
    pub kind: String,
    pub selected: bool,
    pub moveable: bool,
}

impl From<&TileSnapshot> for TileWire {
    fn from(t: &TileSnapshot) -> Self {
        Self {
            row: t.coord.row,
            col: t.coord.col,
            level: t.coord.level,
            kind: t.kind.name().to_string(),
            selected: t.selected,
            moveable: t.moveable,
        }
    }
}

/// One entry of a board dump
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacementWire {
    pub row: i32,
    pub col: i32,
    pub level: i32,
    pub kind: String,
}

impl From<&Tile> for PlacementWire {
    fn from(t: &Tile) -> Self {
        Self {
            row: t.coord.row,
            col: t.coord.col,
            level: t.coord.level,
            kind: t.kind.name().to_string(),
        }
    }
}

/// Why a dump could not be turned back into a board
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    UnknownKind(String),
    Layout(LayoutError),
}

impl std::fmt::Display for LoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoadError::UnknownKind(k) => write!(f, "unknown tile kind {k:?}"),
            LoadError::Layout(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for LoadError {}

/// Serialize the present tiles of `board`, in draw order.
pub fn dump_board(board: &Board) -> Vec<PlacementWire> {
    board.tiles_in_draw_order().map(PlacementWire::from).collect()
}

/// Rebuild a board from a dump.
pub fn load_board(tiles: &[PlacementWire]) -> Result<Board, LoadError> {
    let mut placements = Vec::with_capacity(tiles.len());
    for t in tiles {
        let kind = TileKind::from_str(&t.kind)
            .ok_or_else(|| LoadError::UnknownKind(t.kind.clone()))?;
        placements.push((Coord::new(t.row, t.col, t.level), kind));
    }
    Board::from_placements(placements).map_err(LoadError::Layout)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusWire {
    Playing,
    Won,
    Stuck,
}

impl From<GameStatus> for StatusWire {
    fn from(s: GameStatus) -> Self {
        match s {
            GameStatus::Playing => StatusWire::Playing,
            GameStatus::Won => StatusWire::Won,
            GameStatus::Stuck => StatusWire::Stuck,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StateWire {
    Idle,
    AwaitingFirstSelection,
    OneSelected,
}

impl From<SessionState> for StateWire {
    fn from(s: SessionState) -> Self {
        match s {
            SessionState::Idle => StateWire::Idle,
            SessionState::AwaitingFirstSelection => StateWire::AwaitingFirstSelection,
            SessionState::OneSelected => StateWire::OneSelected,
        }
    }
}

/// What the last command did
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "name", rename_all = "snake_case")]
pub enum EventWire {
    TileSelected {
        at: CoordWire,
    },
    TileDeselected {
        at: CoordWire,
    },
    /// `kinds` are the two faces removed, for animation
    PairMatched {
        family: String,
        kinds: [String; 2],
        first: CoordWire,
        second: CoordWire,
    },
    NoOp,
    Undo {
        undone: bool,
    },
    NewGame {
        attempts: u32,
    },
    Loaded,
}

impl EventWire {
    /// Map a session event; `board` supplies the removed faces of a match.
    pub fn from_event(event: SessionEvent, board: &Board) -> Self {
        match event {
            SessionEvent::TileSelected(c) => EventWire::TileSelected { at: c.into() },
            SessionEvent::TileDeselected(c) => EventWire::TileDeselected { at: c.into() },
            SessionEvent::PairMatched {
                kind,
                first,
                second,
            } => {
                let kinds = board
                    .removed_pairs()
                    .last()
                    .map(|(a, b)| [a.kind.name().to_string(), b.kind.name().to_string()])
                    .unwrap_or_else(|| [kind.name().to_string(), kind.name().to_string()]);
                EventWire::PairMatched {
                    family: kind.label().to_string(),
                    kinds,
                    first: first.into(),
                    second: second.into(),
                }
            }
            SessionEvent::NoOp => EventWire::NoOp,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn click_parses_from_json() {
        let msg: ClientMessage =
            serde_json::from_str(r#"{"type":"click","seq":3,"row":2,"col":4,"level":1}"#).unwrap();
        assert_eq!(
            msg,
            ClientMessage::Click {
                seq: 3,
                row: 2,
                col: 4,
                level: 1
            }
        );
        assert_eq!(msg.seq(), 3);
    }

    #[test]
    fn hello_client_info_is_optional() {
        let msg: ClientMessage = serde_json::from_str(r#"{"type":"hello","seq":1}"#).unwrap();
        assert_eq!(msg, ClientMessage::Hello { seq: 1, client: None });
        let msg: ClientMessage = serde_json::from_str(r#"{"type":"new_game","seq":9}"#).unwrap();
        assert_eq!(msg, ClientMessage::NewGame { seq: 9 });
    }

    #[test]
    fn unknown_type_is_rejected() {
        assert!(serde_json::from_str::<ClientMessage>(r#"{"type":"shuffle","seq":1}"#).is_err());
        assert!(serde_json::from_str::<ClientMessage>(r#"{"type":"click","seq":1}"#).is_err());
    }

    #[test]
    fn error_serializes_with_snake_case_code() {
        let msg = ServerMessage::Error(ErrorMessage {
            seq: 4,
            code: ErrorCode::OutOfOrder,
            message: "seq must increase".to_string(),
        });
        let v: serde_json::Value = serde_json::to_value(&msg).unwrap();
        assert_eq!(v["type"], "error");
        assert_eq!(v["code"], "out_of_order");
        assert_eq!(v["seq"], 4);
    }

    #[test]
    fn pair_matched_event_names_both_faces() {
        let mut board = Board::from_placements([
            (Coord::new(0, 0, 0), TileKind::Season(1)),
            (Coord::new(0, 8, 0), TileKind::Season(2)),
        ])
        .unwrap();
        board.select(Coord::new(0, 0, 0));
        board.select(Coord::new(0, 8, 0));

        let event = SessionEvent::PairMatched {
            kind: TileKind::Season(1),
            first: Coord::new(0, 0, 0),
            second: Coord::new(0, 8, 0),
        };
        let v = serde_json::to_value(EventWire::from_event(event, &board)).unwrap();
        assert_eq!(v["name"], "pair_matched");
        assert_eq!(v["family"], "season");
        assert_eq!(v["kinds"][0], "season1");
        assert_eq!(v["kinds"][1], "season2");
    }

    #[test]
    fn load_rejects_unknown_kind() {
        let tiles = vec![PlacementWire {
            row: 0,
            col: 0,
            level: 0,
            kind: "joker".to_string(),
        }];
        assert_eq!(
            load_board(&tiles).unwrap_err(),
            LoadError::UnknownKind("joker".to_string())
        );
    }
}
