//! Session driver
//!
//! Owns one [`GameSession`] and processes protocol lines one at a time, to completion.
//! Every reply is a single line; state-changing commands answer with a full observation
//! so a front end can redraw from the reply alone.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};

use crate::config::DriverConfig;
use crate::core::{GameSession, SessionError, SessionSnapshot};
use crate::protocol::*;
use crate::types::Coord;

pub struct Driver {
    session: GameSession,
    config: DriverConfig,
    seed: u32,
    last_seq: Option<u64>,
    snapshot: SessionSnapshot,
}

/// Pull the `seq` out of a line that failed to parse, so the error can echo it.
fn extract_seq_best_effort(s: &str) -> Option<u64> {
    let start = s.find("\"seq\"")?;
    let after_key = &s[start + 5..];
    let colon = after_key.find(':')?;
    let rest = after_key[colon + 1..].trim_start();
    let end = rest.bytes().take_while(|b| b.is_ascii_digit()).count();
    if end == 0 {
        return None;
    }
    rest[..end].parse::<u64>().ok()
}

fn error(seq: u64, code: ErrorCode, message: impl Into<String>) -> ServerMessage {
    ServerMessage::Error(ErrorMessage {
        seq,
        code,
        message: message.into(),
    })
}

fn session_error(seq: u64, err: &SessionError) -> ServerMessage {
    let code = match err {
        SessionError::SolvabilityTimeout { .. } => ErrorCode::SolvabilityTimeout,
        SessionError::TileCountMismatch { .. } => ErrorCode::MalformedLayout,
        SessionError::InvalidKind(_) => ErrorCode::UnknownKind,
    };
    error(seq, code, err.to_string())
}

impl Driver {
    /// Load the configured layout and deal the first game.
    pub fn new(config: DriverConfig) -> Result<Self> {
        let layout = config.load_layout()?;
        let session_config = config.session_config();
        let session = GameSession::new(layout, session_config)
            .with_context(|| format!("setting up layout {:?}", config.layout))?;
        let mut driver = Self::from_session(session, config);
        let attempts = driver
            .session
            .start_new_game()
            .context("dealing the first game")?;
        driver.log(format!(
            "layout {:?}, seed {}, dealt after {} shuffle(s)",
            driver.config.layout, driver.seed, attempts
        ));
        Ok(driver)
    }

    /// Wrap an existing session; no game is dealt.
    pub fn from_session(session: GameSession, config: DriverConfig) -> Self {
        let seed = session.config().seed;
        Self {
            session,
            config,
            seed,
            last_seq: None,
            snapshot: SessionSnapshot::default(),
        }
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn config(&self) -> &DriverConfig {
        &self.config
    }

    fn log(&self, message: String) {
        if !self.config.quiet {
            eprintln!("[Driver] {message}");
        }
    }

    fn check_and_update_seq(&mut self, seq: u64) -> bool {
        match self.last_seq {
            Some(prev) if seq <= prev => false,
            _ => {
                self.last_seq = Some(seq);
                true
            }
        }
    }

    /// Parse and handle one protocol line.
    pub fn handle_line(&mut self, line: &str) -> ServerMessage {
        match serde_json::from_str::<ClientMessage>(line) {
            Ok(msg) => self.handle(msg),
            Err(e) => {
                let seq = extract_seq_best_effort(line).unwrap_or(0);
                error(seq, ErrorCode::InvalidMessage, e.to_string())
            }
        }
    }

    pub fn handle(&mut self, msg: ClientMessage) -> ServerMessage {
        let seq = msg.seq();
        if !self.check_and_update_seq(seq) {
            let last = self.last_seq.unwrap_or(0);
            return error(
                seq,
                ErrorCode::OutOfOrder,
                format!("seq {seq} is not greater than {last}"),
            );
        }

        match msg {
            ClientMessage::Hello { client, .. } => {
                if let Some(client) = client {
                    self.log(format!("hello from {} {}", client.name, client.version));
                }
                self.welcome(seq)
            }
            ClientMessage::Click { row, col, level, .. } => {
                let event = self.session.handle_click(Coord::new(row, col, level));
                let wire = EventWire::from_event(event, self.session.board());
                self.observe(seq, Some(wire))
            }
            ClientMessage::Undo { .. } => {
                let undone = self.session.handle_undo();
                self.observe(seq, Some(EventWire::Undo { undone }))
            }
            ClientMessage::NewGame { .. } => match self.session.start_new_game() {
                Ok(attempts) => {
                    self.log(format!("new game dealt after {attempts} shuffle(s)"));
                    self.observe(seq, Some(EventWire::NewGame { attempts }))
                }
                Err(e) => {
                    self.log(format!("new game failed: {e}"));
                    session_error(seq, &e)
                }
            },
            ClientMessage::Observe { .. } => self.observe(seq, None),
            ClientMessage::Dump { .. } => ServerMessage::Board(BoardMessage {
                seq,
                tiles: dump_board(self.session.board()),
            }),
            ClientMessage::Load { tiles, .. } => match load_board(&tiles) {
                Ok(board) => {
                    self.session.load_board(board);
                    self.observe(seq, Some(EventWire::Loaded))
                }
                Err(e @ LoadError::UnknownKind(_)) => {
                    error(seq, ErrorCode::UnknownKind, e.to_string())
                }
                Err(e @ LoadError::Layout(_)) => {
                    error(seq, ErrorCode::MalformedLayout, e.to_string())
                }
            },
        }
    }

    fn welcome(&self, seq: u64) -> ServerMessage {
        let layout = self.session.layout();
        let (rows, cols) = layout.extent();
        ServerMessage::Welcome(WelcomeMessage {
            seq,
            protocol_version: PROTOCOL_VERSION.to_string(),
            layout: self.config.layout.clone(),
            background: self.config.background.clone(),
            require_solvable: self.session.config().require_solvable,
            seed: self.seed,
            extent: [rows, cols],
            max_level: layout.max_level(),
        })
    }

    fn observe(&mut self, seq: u64, event: Option<EventWire>) -> ServerMessage {
        self.session.snapshot_into(&mut self.snapshot);
        ServerMessage::Observation(ObservationMessage::from_snapshot(seq, event, &self.snapshot))
    }

    /// Serve line-delimited JSON until `input` is exhausted.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> Result<()> {
        let mut buf: Vec<u8> = Vec::with_capacity(4096);
        for line in input.lines() {
            let line = line.context("reading command")?;
            if line.trim().is_empty() {
                continue;
            }
            let reply = self.handle_line(&line);
            buf.clear();
            serde_json::to_writer(&mut buf, &reply)?;
            buf.push(b'\n');
            output.write_all(&buf)?;
            output.flush()?;
        }
        self.log("input closed".to_string());
        Ok(())
    }
}
