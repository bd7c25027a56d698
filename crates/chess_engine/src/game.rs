//! Game session: the interface a UI or network relay drives.
//!
//! Inbound actions are `attempt_move`, `apply_remote_move`, `play_ai_turn`,
//! `reset`, `set_difficulty` and `set_mode`. An action that is not allowed is
//! a no-op; the returned [`Rejected`] only says why, for logging or a generic
//! notice.

use std::fmt;
use std::str::FromStr;

use chess_core::{judge, Board, Color, GameState, Move, Square, Verdict};
use log::{debug, info};
use thiserror::Error;

use crate::ai::ChessAI;
use crate::config::{ConfigError, Difficulty, EngineConfig};

/// Side the computer plays in [`Mode::Pve`].
pub const AI_COLOR: Color = Color::Black;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Two players sharing one board.
    Pvp,
    /// Human plays white against the computer.
    #[default]
    Pve,
    /// One player per engine instance, moves relayed between them.
    Online { local: Color },
}

impl FromStr for Mode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pvp" => Ok(Mode::Pvp),
            "pve" => Ok(Mode::Pve),
            "online" | "online:white" => Ok(Mode::Online { local: Color::White }),
            "online:black" => Ok(Mode::Online { local: Color::Black }),
            _ => Err(ConfigError::UnknownMode(s.to_string())),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Pvp => f.write_str("pvp"),
            Mode::Pve => f.write_str("pve"),
            Mode::Online { local: Color::White } => f.write_str("online:white"),
            Mode::Online { local: Color::Black } => f.write_str("online:black"),
        }
    }
}

/// Data for the external relay to forward to the peer engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PeerMessage {
    Move { from: Square, to: Square },
    Reset,
}

impl fmt::Display for PeerMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PeerMessage::Move { from, to } => write!(f, "move {from}{to}"),
            PeerMessage::Reset => f.write_str("reset"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Rejected {
    #[error("the game is over")]
    GameOver,
    #[error("no piece on {0}")]
    EmptySquare(Square),
    #[error("it is {0:?}'s turn")]
    OutOfTurn(Color),
    #[error("{0} is not a legal move")]
    IllegalMove(Move),
    #[error("remote moves are only accepted online")]
    NotOnline,
}

/// What happened after a move was applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TurnReport {
    pub mv: Move,
    pub verdict: Verdict,
}

pub struct Game {
    board: Board,
    ai: ChessAI,
    mode: Mode,
    outbox: Vec<PeerMessage>,
}

impl Game {
    pub fn new(config: EngineConfig) -> Self {
        Self::with_ai(ChessAI::new(config))
    }

    pub fn with_ai(ai: ChessAI) -> Self {
        Self {
            board: Board::new(),
            ai,
            mode: Mode::default(),
            outbox: Vec::new(),
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn difficulty(&self) -> Difficulty {
        self.ai.difficulty()
    }

    pub fn ai(&self) -> &ChessAI {
        &self.ai
    }

    pub fn set_mode(&mut self, mode: Mode) {
        info!("mode set to {mode}");
        self.mode = mode;
    }

    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        info!("difficulty set to {difficulty}");
        self.ai.set_difficulty(difficulty);
    }

    /// Whether the computer should move now.
    pub fn is_ai_turn(&self) -> bool {
        self.mode == Mode::Pve && self.board.is_playing() && self.board.side_to_move() == AI_COLOR
    }

    /// Messages queued for the relay since the last call.
    pub fn take_peer_messages(&mut self) -> Vec<PeerMessage> {
        std::mem::take(&mut self.outbox)
    }

    /// A local player's move.
    pub fn attempt_move(&mut self, from: Square, to: Square) -> Result<TurnReport, Rejected> {
        let side = self.board.side_to_move();
        let local_turn = match self.mode {
            Mode::Pvp => true,
            Mode::Pve => side != AI_COLOR,
            Mode::Online { local } => side == local,
        };
        if !local_turn && self.board.is_playing() {
            return self.reject(Rejected::OutOfTurn(side));
        }

        let report = self.apply(from, to)?;
        if let Mode::Online { .. } = self.mode {
            self.outbox.push(PeerMessage::Move { from, to });
        }
        Ok(report)
    }

    /// A move received from the peer engine through the relay.
    pub fn apply_remote_move(&mut self, from: Square, to: Square) -> Result<TurnReport, Rejected> {
        let Mode::Online { local } = self.mode else {
            return self.reject(Rejected::NotOnline);
        };
        let side = self.board.side_to_move();
        if side == local && self.board.is_playing() {
            return self.reject(Rejected::OutOfTurn(side));
        }
        self.apply(from, to)
    }

    /// Lets the computer move if it is its turn. `None` when it is not, or
    /// when it has no move; the turn is then left as it was.
    pub fn play_ai_turn(&mut self) -> Option<TurnReport> {
        if !self.is_ai_turn() {
            return None;
        }
        let mv = self.ai.get_move(&mut self.board)?;
        self.apply(mv.from, mv.to).ok()
    }

    pub fn reset(&mut self) {
        self.board.reset();
        self.ai.clear_cache();
        if let Mode::Online { .. } = self.mode {
            self.outbox.push(PeerMessage::Reset);
        }
        info!("game reset");
    }

    /// Resets because the peer did; nothing is echoed back.
    pub fn apply_remote_reset(&mut self) {
        self.board.reset();
        self.ai.clear_cache();
        info!("game reset by peer");
    }

    fn apply(&mut self, from: Square, to: Square) -> Result<TurnReport, Rejected> {
        if let GameState::Checkmate { .. } = self.board.state() {
            return self.reject(Rejected::GameOver);
        }

        let side = self.board.side_to_move();
        match self.board.piece_at(from) {
            None => return self.reject(Rejected::EmptySquare(from)),
            Some(piece) if piece.color != side => return self.reject(Rejected::OutOfTurn(side)),
            Some(_) => {}
        }

        let mv = Move::new(from, to);
        if !mv.is_valid(&self.board) {
            return self.reject(Rejected::IllegalMove(mv));
        }

        self.board.execute_move(mv);
        self.board.switch_turn();
        let verdict = judge(&mut self.board);
        debug!("{side:?} played {mv}, verdict {verdict:?}");
        Ok(TurnReport { mv, verdict })
    }

    fn reject<T>(&self, reason: Rejected) -> Result<T, Rejected> {
        debug!("ignored action: {reason}");
        Err(reason)
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}
