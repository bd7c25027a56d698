pub mod ai;
pub mod cache;
pub mod config;
pub mod evaluation;
pub mod game;
pub mod search;

pub use ai::ChessAI;
pub use cache::PositionCache;
pub use config::{ConfigError, Difficulty, DifficultyProfile, EngineConfig};
pub use evaluation::{evaluate_position, Score, INFINITY};
pub use game::{Game, Mode, PeerMessage, Rejected, TurnReport, AI_COLOR};
pub use search::{order_moves, Searcher};
