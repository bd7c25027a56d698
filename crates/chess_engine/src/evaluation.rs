use chess_core::{generate_moves, is_attacked, Board, Color, PieceType, Square};

/// Scores are measured in tenths of a pawn.
pub type Score = i32;

/// Stands in for an unbounded score; negating it never overflows.
pub const INFINITY: Score = i32::MAX;

const UNIT: Score = 10; // One pawn

// Positional terms
const CENTER_BONUS: Score = 5;        // Piece on d4, e4, d5 or e5
const DEVELOPED_BONUS: Score = 3;     // Knight or bishop off its starting squares
const OPEN_FILE_BONUS: Score = 5;     // Rook on a file with no pawns
const ACTIVE_QUEEN_BONUS: Score = 5;  // Queen off its starting square
const MOBILITY_WEIGHT: Score = 1;     // Per pseudo-legal move
const DOUBLED_PAWN_PENALTY: Score = 5; // Per extra pawn on a file
const KING_ATTACKED_PENALTY: Score = 20;
const KING_CENTER_PENALTY: Score = 10;

const KNIGHT_START_COLS: [u8; 2] = [1, 6];
const BISHOP_START_COLS: [u8; 2] = [2, 5];
const QUEEN_START_COL: u8 = 3;

/// Evaluates a position from White's perspective.
/// Positive scores favor White, negative scores favor Black.
pub fn evaluate_position(board: &Board) -> Score {
    let mut score = 0;
    let mut pawns_per_file = [[0; 8]; 2];

    for (sq, piece) in board.pieces() {
        let mut value = piece.piece_type.value() * UNIT;

        if sq.is_center() {
            value += CENTER_BONUS;
        }

        match piece.piece_type {
            PieceType::Knight => value += development_bonus(sq, piece.color, &KNIGHT_START_COLS),
            PieceType::Bishop => value += development_bonus(sq, piece.color, &BISHOP_START_COLS),
            PieceType::Rook if is_open_file(board, sq.col) => value += OPEN_FILE_BONUS,
            PieceType::Queen if sq != start_square(piece.color, QUEEN_START_COL) => value += ACTIVE_QUEEN_BONUS,
            PieceType::Pawn => pawns_per_file[color_index(piece.color)][sq.col as usize] += 1,
            _ => {}
        }

        score += signed(piece.color, value);
    }

    // Mobility: more pseudo-legal moves is better
    score += MOBILITY_WEIGHT * generate_moves(board, Color::White).len() as Score;
    score -= MOBILITY_WEIGHT * generate_moves(board, Color::Black).len() as Score;

    for color in [Color::White, Color::Black] {
        let doubled: Score = pawns_per_file[color_index(color)]
            .iter()
            .map(|&count| (count - 1).max(0))
            .sum();
        score -= signed(color, doubled * DOUBLED_PAWN_PENALTY);
        score -= signed(color, king_exposure(board, color));
    }

    score
}

fn signed(color: Color, value: Score) -> Score {
    match color {
        Color::White => value,
        Color::Black => -value,
    }
}

fn color_index(color: Color) -> usize {
    match color {
        Color::White => 0,
        Color::Black => 1,
    }
}

fn start_square(color: Color, col: u8) -> Square {
    Square { row: color.back_row(), col }
}

fn development_bonus(sq: Square, color: Color, start_cols: &[u8; 2]) -> Score {
    let at_home = start_cols.iter().any(|&col| sq == start_square(color, col));
    if at_home {
        0
    } else {
        DEVELOPED_BONUS
    }
}

fn is_open_file(board: &Board, col: u8) -> bool {
    (0..8).filter_map(|row| Square::new(row, col)).all(|sq| {
        board
            .piece_at(sq)
            .map_or(true, |p| p.piece_type != PieceType::Pawn)
    })
}

/// Penalty for an attacked or centralised king. A missing king costs nothing.
fn king_exposure(board: &Board, color: Color) -> Score {
    let Some(king) = board.find_king(color) else {
        return 0;
    };

    let mut penalty = 0;
    if is_attacked(board, king, color.opponent()) {
        penalty += KING_ATTACKED_PENALTY;
    }
    if king.is_center() {
        penalty += KING_CENTER_PENALTY;
    }
    penalty
}
