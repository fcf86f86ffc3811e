//! Adapter module - drive a game session over a line-delimited JSON protocol
//!
//! The engine has no window or input handling of its own. A front end (a GUI, a terminal
//! renderer, a bot) runs the driver and talks to it over stdin/stdout, one JSON object per
//! line. The front end resolves pixels to slots; the driver only sees coordinates.
//!
//! # Message Types
//!
//! ## Client -> Driver
//!
//! - **hello**: handshake, answered with `welcome`
//! - **click**: click on a slot `{row, col, level}`
//! - **undo** / **new_game** / **observe**
//! - **dump**: current board as a coordinate -> kind list
//! - **load**: replace the board with a dumped list
//!
//! ## Driver -> Client
//!
//! - **welcome**: protocol version, layout, background, dealing policy, seed
//! - **observation**: counts, status, the event just applied, every tile in draw order
//! - **board**: reply to `dump`
//! - **error**: error response with code and message
//!
//! # Environment Variables
//!
//! - `XMAHJONGG_LAYOUT`: layout name (default: "pyramid")
//! - `XMAHJONGG_LAYOUT_DIR`: directory searched for non-built-in layouts (default: "layouts")
//! - `XMAHJONGG_SOLVABLE`: reject deals that stack three tiles of a family (default: true)
//! - `XMAHJONGG_MAX_ATTEMPTS`: shuffle budget per deal, 0 for unbounded (default: 10000)
//! - `XMAHJONGG_SEED`: fixed RNG seed (default: clock)
//! - `XMAHJONGG_BACKGROUND`: cosmetic background name, echoed in `welcome`
//! - `XMAHJONGG_QUIET`: silence `[Driver]` logging on stderr
//!
//! # Example Protocol Flow
//!
//! ```text
//! Client -> Driver: {"type":"hello","seq":1,"client":{"name":"tk-front","version":"0.2"}}
//! Driver -> Client: {"type":"welcome","seq":1,"protocol_version":"1.0.0","layout":"pyramid",...}
//! Client -> Driver: {"type":"click","seq":2,"row":0,"col":0,"level":0}
//! Driver -> Client: {"type":"observation","seq":2,"event":{"name":"tile_selected",...},...}
//! Client -> Driver: {"type":"undo","seq":3}
//! ```

pub mod config;
pub mod driver;
pub mod protocol;

pub use xmahjongg_core as core;
pub use xmahjongg_types as types;

// Re-export protocol types for convenience
pub use config::{load_layout, DriverConfig};
pub use driver::Driver;
pub use protocol::*;
