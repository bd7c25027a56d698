use std::fmt;

use crate::error::ChessError;

/// A board coordinate. Row 0 is black's back rank, row 7 is white's.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square {
    pub row: u8, // 0-7, rank 8 down to rank 1
    pub col: u8, // 0-7, file a to h
}

impl Square {
    pub fn new(row: u8, col: u8) -> Option<Self> {
        if row < 8 && col < 8 {
            Some(Self { row, col })
        } else {
            None
        }
    }

    /// Offsets the square, returning `None` when it falls off the board.
    pub fn offset(self, d_row: i8, d_col: i8) -> Option<Self> {
        let row = self.row as i8 + d_row;
        let col = self.col as i8 + d_col;
        if (0..8).contains(&row) && (0..8).contains(&col) {
            Some(Self { row: row as u8, col: col as u8 })
        } else {
            None
        }
    }

    pub fn index(self) -> usize {
        self.row as usize * 8 + self.col as usize
    }

    /// All 64 squares in row-major order.
    pub fn all() -> impl Iterator<Item = Square> {
        (0..8u8).flat_map(|row| (0..8u8).map(move |col| Square { row, col }))
    }

    pub fn is_center(self) -> bool {
        (3..=4).contains(&self.row) && (3..=4).contains(&self.col)
    }

    pub fn from_algebraic(notation: &str) -> Result<Self, ChessError> {
        let bytes = notation.as_bytes();
        if bytes.len() != 2 {
            return Err(ChessError::InvalidSquare(notation.to_string()));
        }

        let (file, rank) = (bytes[0].to_ascii_lowercase(), bytes[1]);
        if !(b'a'..=b'h').contains(&file) || !(b'1'..=b'8').contains(&rank) {
            return Err(ChessError::InvalidSquare(notation.to_string()));
        }

        Ok(Self {
            row: b'8' - rank,
            col: file - b'a',
        })
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", (b'a' + self.col) as char, 8 - self.row)
    }
}
