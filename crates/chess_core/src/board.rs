use std::fmt;

use crate::{error::ChessError, piece::{Color, PieceType}, Move, Piece, Square};

const BACK_RANK: [PieceType; 8] = [
    PieceType::Rook,
    PieceType::Knight,
    PieceType::Bishop,
    PieceType::Queen,
    PieceType::King,
    PieceType::Bishop,
    PieceType::Knight,
    PieceType::Rook,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameState {
    Playing,
    Checkmate { winner: Color },
}

/// Everything needed to restore a square pair after [`Board::make_move`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Undo {
    pub mv: Move,
    pub moved: Piece,
    pub captured: Option<Piece>,
}

/// The full game position: grid, side to move and terminal flag.
///
/// There are no castling or en passant rights, so the grid plus the side to
/// move is the whole position.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    squares: [Option<Piece>; 64],
    side_to_move: Color,
    state: GameState,
}

impl Board {
    pub fn new() -> Self {
        let mut board = Self::empty(Color::White);
        board.setup_initial_position();
        board
    }

    pub fn empty(side_to_move: Color) -> Self {
        Self {
            squares: [None; 64],
            side_to_move,
            state: GameState::Playing,
        }
    }

    fn setup_initial_position(&mut self) {
        for color in [Color::White, Color::Black] {
            for (col, &piece_type) in BACK_RANK.iter().enumerate() {
                self.squares[color.back_row() as usize * 8 + col] = Some(Piece::new(piece_type, color));
                self.squares[color.pawn_row() as usize * 8 + col] = Some(Piece::new(PieceType::Pawn, color));
            }
        }
    }

    /// Builds a board from eight rows of eight characters, row 0 (rank 8) first.
    /// Uppercase is white, lowercase is black, anything in ". " is empty.
    pub fn from_rows(rows: [&str; 8], side_to_move: Color) -> Result<Self, ChessError> {
        let mut board = Self::empty(side_to_move);
        for (row, text) in rows.iter().enumerate() {
            let chars: Vec<char> = text.chars().collect();
            if chars.len() != 8 {
                return Err(ChessError::MalformedRow { row, len: chars.len() });
            }
            for (col, c) in chars.into_iter().enumerate() {
                if c != '.' && c != ' ' {
                    board.squares[row * 8 + col] = Some(Piece::from_char(c)?);
                }
            }
        }
        Ok(board)
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.squares[sq.index()]
    }

    pub fn set(&mut self, sq: Square, piece: Option<Piece>) {
        self.squares[sq.index()] = piece;
    }

    /// Occupied squares in row-major order.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(move |sq| self.piece_at(sq).map(|p| (sq, p)))
    }

    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    pub fn switch_turn(&mut self) {
        self.side_to_move = self.side_to_move.opponent();
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn set_state(&mut self, state: GameState) {
        self.state = state;
    }

    pub fn is_playing(&self) -> bool {
        self.state == GameState::Playing
    }

    pub fn find_king(&self, color: Color) -> Option<Square> {
        self.pieces()
            .find(|(_, piece)| piece.is(PieceType::King, color))
            .map(|(sq, _)| sq)
    }

    /// Applies a move in place and returns what is needed to take it back.
    /// A pawn landing on its promotion row becomes a queen. The side to move
    /// is left untouched. An empty origin yields `None` and changes nothing.
    pub fn make_move(&mut self, mv: Move) -> Option<Undo> {
        let moved = self.piece_at(mv.from)?;
        let captured = self.piece_at(mv.to);

        let placed = if moved.piece_type == PieceType::Pawn && mv.to.row == moved.color.promotion_row() {
            Piece::new(PieceType::Queen, moved.color)
        } else {
            moved
        };

        self.set(mv.from, None);
        self.set(mv.to, Some(placed));
        Some(Undo { mv, moved, captured })
    }

    pub fn unmake_move(&mut self, undo: Undo) {
        self.set(undo.mv.to, undo.captured);
        self.set(undo.mv.from, Some(undo.moved));
    }

    /// Relocates the piece with auto-queen promotion. Legality is the
    /// caller's concern.
    pub fn execute_move(&mut self, mv: Move) {
        let _ = self.make_move(mv);
    }

    /// 64 characters row-major, `.` for empty squares.
    pub fn serialize(&self) -> String {
        self.squares
            .iter()
            .map(|sq| sq.map_or('.', Piece::to_char))
            .collect()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let serialized = self.serialize();
        for (row, chunk) in serialized.as_bytes().chunks(8).enumerate() {
            writeln!(f, "{} {}", 8 - row, String::from_utf8_lossy(chunk))?;
        }
        write!(f, "  abcdefgh")
    }
}
