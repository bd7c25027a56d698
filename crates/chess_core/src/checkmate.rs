use log::{info, warn};

use crate::{
    attacks::is_attacked,
    board::GameState,
    moves::generate_moves,
    piece::Color,
    Board,
};

/// Outcome of judging a position after a move has been executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Playing,
    /// The side to move is in check but has at least one escape.
    Check,
    Checkmate { winner: Color },
}

/// Whether any pseudo-legal move leaves `color`'s king unattacked.
/// The board is mutated and restored for each candidate.
pub fn can_escape(board: &mut Board, color: Color) -> bool {
    for mv in generate_moves(board, color) {
        let Some(undo) = board.make_move(mv) else {
            continue;
        };
        let safe = board
            .find_king(color)
            .map_or(false, |king| !is_attacked(board, king, color.opponent()));
        board.unmake_move(undo);
        if safe {
            return true;
        }
    }
    false
}

/// Judges the side now to move and records checkmate on the board.
///
/// A board missing either king is treated as checkmate for the side that
/// still has one. There is no stalemate: a side without moves that is not in
/// check stays `Playing`.
pub fn judge(board: &mut Board) -> Verdict {
    let to_move = board.side_to_move();
    let opponent = to_move.opponent();

    let king = match (board.find_king(Color::White), board.find_king(Color::Black)) {
        (Some(white), Some(black)) => if to_move == Color::White { white } else { black },
        (white, black) => {
            let winner = match (white, black) {
                (Some(_), None) => Color::White,
                (None, Some(_)) => Color::Black,
                _ => opponent,
            };
            warn!("king missing from the board, declaring {winner:?} the winner");
            board.set_state(GameState::Checkmate { winner });
            return Verdict::Checkmate { winner };
        }
    };

    if !is_attacked(board, king, opponent) {
        return Verdict::Playing;
    }

    if can_escape(board, to_move) {
        info!("{to_move:?} is in check");
        return Verdict::Check;
    }

    info!("checkmate, {opponent:?} wins");
    board.set_state(GameState::Checkmate { winner: opponent });
    Verdict::Checkmate { winner: opponent }
}
