use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChessError {
    #[error("invalid square notation: {0:?}")]
    InvalidSquare(String),
    #[error("unknown piece character {0:?}")]
    UnknownPiece(char),
    #[error("board row {row} must have 8 squares, found {len}")]
    MalformedRow { row: usize, len: usize },
}
