use std::fmt;

use crate::{piece::{Color, PieceType}, Board, Square};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: Square,
    pub to: Square,
}

impl Move {
    pub fn new(from: Square, to: Square) -> Self {
        Self { from, to }
    }

    /// Pseudo-legal test: shape and path clearance only. A move that leaves
    /// the mover's own king attacked still passes.
    pub fn is_valid(&self, board: &Board) -> bool {
        let piece = match board.piece_at(self.from) {
            Some(p) => p,
            None => return false,
        };

        if let Some(dest_piece) = board.piece_at(self.to) {
            if dest_piece.same_color(&piece) {
                return false;
            }
        }

        match piece.piece_type {
            PieceType::Pawn => self.is_valid_pawn_move(piece.color, board),
            PieceType::Knight => self.is_valid_knight_move(),
            PieceType::Bishop => self.is_valid_diagonal_move(board),
            PieceType::Rook => self.is_valid_straight_move(board),
            PieceType::Queen => self.is_valid_diagonal_move(board) || self.is_valid_straight_move(board),
            PieceType::King => self.is_valid_king_move(),
        }
    }

    fn deltas(&self) -> (i8, i8) {
        (
            self.to.row as i8 - self.from.row as i8,
            self.to.col as i8 - self.from.col as i8,
        )
    }

    fn is_valid_pawn_move(&self, color: Color, board: &Board) -> bool {
        let direction = color.forward();
        let (row_diff, col_diff) = self.deltas();
        let target = board.piece_at(self.to);

        if col_diff == 0 {
            if row_diff == direction {
                return target.is_none();
            }
            if row_diff == 2 * direction && self.from.row == color.pawn_row() {
                let intermediate = self.from.offset(direction, 0);
                return intermediate.map_or(false, |sq| board.piece_at(sq).is_none()) && target.is_none();
            }
            return false;
        }

        // Captures only; no en passant.
        col_diff.abs() == 1 && row_diff == direction && target.map_or(false, |p| p.color != color)
    }

    fn is_valid_knight_move(&self) -> bool {
        let (row_diff, col_diff) = self.deltas();
        let (dr, dc) = (row_diff.abs(), col_diff.abs());
        (dr == 2 && dc == 1) || (dr == 1 && dc == 2)
    }

    fn is_valid_diagonal_move(&self, board: &Board) -> bool {
        let (row_diff, col_diff) = self.deltas();
        if row_diff == 0 || row_diff.abs() != col_diff.abs() {
            return false;
        }
        self.is_path_clear(board)
    }

    fn is_valid_straight_move(&self, board: &Board) -> bool {
        let (row_diff, col_diff) = self.deltas();
        if (row_diff != 0) == (col_diff != 0) {
            return false;
        }
        self.is_path_clear(board)
    }

    fn is_valid_king_move(&self) -> bool {
        let (row_diff, col_diff) = self.deltas();
        row_diff.abs() <= 1 && col_diff.abs() <= 1
    }

    /// Every square strictly between `from` and `to` must be empty.
    fn is_path_clear(&self, board: &Board) -> bool {
        let (row_diff, col_diff) = self.deltas();
        let (row_step, col_step) = (row_diff.signum(), col_diff.signum());

        let mut current = self.from.offset(row_step, col_step);
        while let Some(sq) = current {
            if sq == self.to {
                return true;
            }
            if board.piece_at(sq).is_some() {
                return false;
            }
            current = sq.offset(row_step, col_step);
        }
        true
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)
    }
}

pub fn is_legal_move(board: &Board, from: Square, to: Square) -> bool {
    Move::new(from, to).is_valid(board)
}

/// Every pseudo-legal move for `color`, row-major over origins then destinations.
pub fn generate_moves(board: &Board, color: Color) -> Vec<Move> {
    let mut moves = Vec::new();
    for from in Square::all() {
        match board.piece_at(from) {
            Some(piece) if piece.color == color => {}
            _ => continue,
        }
        moves.extend(
            Square::all()
                .map(|to| Move::new(from, to))
                .filter(|mv| mv.is_valid(board)),
        );
    }
    moves
}
