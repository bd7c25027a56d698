// Core rules: board state, move validity, attacks and checkmate detection
pub mod attacks;
pub mod board;
pub mod checkmate;
pub mod error;
pub mod moves;
pub mod piece;
pub mod square;

// Re-export main types for convenience
pub use attacks::{is_attacked, is_in_check};
pub use board::{Board, GameState, Undo};
pub use checkmate::{can_escape, judge, Verdict};
pub use error::ChessError;
pub use moves::{generate_moves, is_legal_move, Move};
pub use piece::{Color, Piece, PieceType};
pub use square::Square;
