use crate::{piece::Color, Board, Move, Square};

/// Whether any piece of `by` could move onto `target` once it is vacated.
///
/// The target is emptied on a scratch copy and ordinary move validity is
/// asked of every attacker. As a consequence pawns "attack" the squares they
/// could step forward onto, and do not attack diagonally.
pub fn is_attacked(board: &Board, target: Square, by: Color) -> bool {
    let mut probe = board.clone();
    probe.set(target, None);

    board
        .pieces()
        .filter(|(sq, piece)| piece.color == by && *sq != target)
        .any(|(from, _)| Move::new(from, target).is_valid(&probe))
}

/// Whether `color`'s king stands on an attacked square. A missing king is not in check.
pub fn is_in_check(board: &Board, color: Color) -> bool {
    board
        .find_king(color)
        .map_or(false, |king| is_attacked(board, king, color.opponent()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(notation: &str) -> Square {
        Square::from_algebraic(notation).unwrap()
    }

    #[test]
    fn sliders_attack_along_clear_lines() {
        let board = Board::from_rows(
            [
                "....k...",
                "........",
                "........",
                "........",
                "r.......",
                "........",
                "........",
                "....K...",
            ],
            Color::White,
        )
        .unwrap();

        assert!(is_attacked(&board, sq("h4"), Color::Black));
        assert!(is_attacked(&board, sq("a1"), Color::Black));
        assert!(!is_attacked(&board, sq("b3"), Color::Black));
        assert!(!is_in_check(&board, Color::White));
    }

    #[test]
    fn attacked_square_may_hold_an_enemy_or_a_friend() {
        let board = Board::from_rows(
            [
                "....k...",
                "........",
                "........",
                "........",
                "r..N...P",
                "........",
                "........",
                "....K...",
            ],
            Color::White,
        )
        .unwrap();

        assert!(is_attacked(&board, sq("d4"), Color::Black));
        // h4 sits behind the knight.
        assert!(!is_attacked(&board, sq("h4"), Color::Black));
        // White defends its own knight square with nothing.
        assert!(!is_attacked(&board, sq("d4"), Color::White));
    }

    #[test]
    fn pawns_attack_forward_not_diagonally() {
        let board = Board::from_rows(
            [
                "........",
                "........",
                "...p....",
                "....K...",
                "...K....",
                "........",
                "........",
                "....k...",
            ],
            Color::White,
        )
        .unwrap();

        // The black pawn on d6 stands diagonally in front of e5 and directly above d4.
        assert!(!is_attacked(&board, sq("e5"), Color::Black));
        assert!(!is_attacked(&board, sq("d4"), Color::Black));
        assert!(is_attacked(&board, sq("d5"), Color::Black));
    }

    #[test]
    fn pawn_forward_attack_reaches_kings() {
        let board = Board::from_rows(
            [
                "....k...",
                "........",
                "........",
                "........",
                "........",
                "........",
                "....p...",
                "....K...",
            ],
            Color::White,
        )
        .unwrap();
        assert!(is_in_check(&board, Color::White));

        let diagonal = Board::from_rows(
            [
                "....k...",
                "........",
                "........",
                "........",
                "........",
                "........",
                "...p....",
                "....K...",
            ],
            Color::White,
        )
        .unwrap();
        assert!(!is_in_check(&diagonal, Color::White));
    }

    #[test]
    fn probe_leaves_board_untouched() {
        let board = Board::new();
        let before = board.clone();
        assert!(!is_attacked(&board, sq("e1"), Color::Black));
        assert_eq!(board, before);
    }
}
