// Minimax with alpha-beta pruning over a single board mutated in place
use std::cmp::Reverse;
use std::time::Instant;

use chess_core::{generate_moves, is_attacked, Board, Color, Move};
use log::debug;

use crate::cache::{CacheKey, PositionCache, DEFAULT_CACHE_CAPACITY};
use crate::evaluation::{evaluate_position, Score, INFINITY};

// Move ordering priorities
const CAPTURE_WEIGHT: i32 = 10;        // Times the captured piece's value
const FAVORABLE_TRADE_BONUS: i32 = 50; // Victim worth at least the attacker
const CHECK_BONUS: i32 = 100;          // Move attacks the enemy king
const CENTER_BONUS: i32 = 10;          // Destination is a center square

/// Depth-limited minimax searcher.
///
/// Scores are taken from the point of view of `maximizer`; the maximizing
/// ply is always the maximizer's move. Not reentrant: one search per board
/// at a time.
#[derive(Debug, Clone)]
pub struct Searcher {
    cache: PositionCache,
    use_cache: bool,
    maximizer: Color,
    nodes: u64,
    cache_hits: u64,
}

impl Searcher {
    pub fn new(cache_capacity: usize) -> Self {
        Self {
            cache: PositionCache::new(cache_capacity),
            use_cache: true,
            maximizer: Color::Black,
            nodes: 0,
            cache_hits: 0,
        }
    }

    pub fn without_cache() -> Self {
        Self {
            use_cache: false,
            ..Self::new(DEFAULT_CACHE_CAPACITY)
        }
    }

    pub fn maximizer(&self) -> Color {
        self.maximizer
    }

    pub fn set_maximizer(&mut self, color: Color) {
        self.maximizer = color;
    }

    pub fn cache(&self) -> &PositionCache {
        &self.cache
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    fn leaf_score(&self, board: &Board) -> Score {
        let score = evaluate_position(board);
        match self.maximizer {
            Color::White => score,
            Color::Black => -score,
        }
    }

    /// Alpha-beta minimax. Every move is made on `board` and taken back
    /// before returning, so the board is unchanged afterwards.
    ///
    /// A side with no moves scores as an immediate loss for that side.
    pub fn search(&mut self, board: &mut Board, depth: u8, mut alpha: Score, mut beta: Score, maximizing: bool) -> Score {
        self.nodes += 1;

        if depth == 0 || !board.is_playing() {
            return self.leaf_score(board);
        }

        let key = if self.use_cache {
            Some(CacheKey::new(board, depth, maximizing, self.maximizer))
        } else {
            None
        };
        if let Some(score) = key.as_ref().and_then(|k| self.cache.get(k)) {
            self.cache_hits += 1;
            return score;
        }

        let player = if maximizing { self.maximizer } else { self.maximizer.opponent() };
        let moves = order_moves(board, generate_moves(board, player), player);
        if moves.is_empty() {
            return if maximizing { -INFINITY } else { INFINITY };
        }

        let (original_alpha, original_beta) = (alpha, beta);
        let mut best = if maximizing { -INFINITY } else { INFINITY };

        for mv in moves {
            let Some(undo) = board.make_move(mv) else {
                continue;
            };
            let score = self.search(board, depth - 1, alpha, beta, !maximizing);
            board.unmake_move(undo);

            if maximizing {
                best = best.max(score);
                alpha = alpha.max(best);
            } else {
                best = best.min(score);
                beta = beta.min(best);
            }

            if beta <= alpha {
                break;
            }
        }

        // Only scores strictly inside the window are exact.
        if let Some(key) = key {
            if original_alpha < best && best < original_beta {
                self.cache.insert(key, best);
            }
        }

        best
    }

    /// Picks the side to move's best reply `depth` plies deep. Ties keep the
    /// first move found in ordered sequence.
    pub fn best_move(&mut self, board: &mut Board, depth: u8) -> Option<(Move, Score)> {
        let start = Instant::now();
        let color = board.side_to_move();
        self.maximizer = color;
        self.nodes = 0;
        self.cache_hits = 0;

        let moves = order_moves(board, generate_moves(board, color), color);
        let mut best: Option<(Move, Score)> = None;

        for mv in moves {
            let Some(undo) = board.make_move(mv) else {
                continue;
            };
            let score = self.search(board, depth.saturating_sub(1), -INFINITY, INFINITY, false);
            board.unmake_move(undo);

            match best {
                Some((_, best_score)) if score <= best_score => {}
                _ => best = Some((mv, score)),
            }
        }

        debug!(
            "searched {} nodes to depth {} in {:?} ({} cache hits, {} cached)",
            self.nodes,
            depth,
            start.elapsed(),
            self.cache_hits,
            self.cache.len()
        );
        best
    }
}

impl Default for Searcher {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_CAPACITY)
    }
}

/// Sorts moves so the most forcing ones come first. The sort is stable, so
/// equal priorities keep generation order.
pub fn order_moves(board: &mut Board, moves: Vec<Move>, color: Color) -> Vec<Move> {
    let mut scored: Vec<(Move, i32)> = moves
        .into_iter()
        .map(|mv| (mv, move_priority(board, mv, color)))
        .collect();
    scored.sort_by_key(|&(_, priority)| Reverse(priority));
    scored.into_iter().map(|(mv, _)| mv).collect()
}

fn move_priority(board: &mut Board, mv: Move, color: Color) -> i32 {
    let Some(attacker) = board.piece_at(mv.from) else {
        return 0;
    };

    let mut priority = 0;
    if let Some(victim) = board.piece_at(mv.to) {
        let victim_value = victim.piece_type.value();
        priority += victim_value * CAPTURE_WEIGHT;
        if victim_value >= attacker.piece_type.value() {
            priority += FAVORABLE_TRADE_BONUS;
        }
    }

    if let Some(undo) = board.make_move(mv) {
        let gives_check = board
            .find_king(color.opponent())
            .map_or(false, |king| is_attacked(board, king, color));
        board.unmake_move(undo);
        if gives_check {
            priority += CHECK_BONUS;
        }
    }

    if mv.to.is_center() {
        priority += CENTER_BONUS;
    }

    priority
}

#[cfg(test)]
mod tests {
    use super::*;
    use chess_core::Square;

    fn sq(notation: &str) -> Square {
        Square::from_algebraic(notation).unwrap()
    }

    /// Full-width minimax, the reference pruning must agree with.
    fn minimax(searcher: &Searcher, board: &mut Board, depth: u8, maximizing: bool) -> Score {
        if depth == 0 || !board.is_playing() {
            return searcher.leaf_score(board);
        }
        let player = if maximizing { searcher.maximizer } else { searcher.maximizer.opponent() };
        let moves = generate_moves(board, player);
        if moves.is_empty() {
            return if maximizing { -INFINITY } else { INFINITY };
        }

        let scores = moves.into_iter().map(|mv| {
            let undo = board.make_move(mv).unwrap();
            let score = minimax(searcher, board, depth - 1, !maximizing);
            board.unmake_move(undo);
            score
        });
        let scores: Vec<Score> = scores.collect();
        if maximizing {
            scores.into_iter().max().unwrap()
        } else {
            scores.into_iter().min().unwrap()
        }
    }

    fn middlegame() -> Board {
        Board::from_rows(
            [
                "r...k..r",
                "ppp..ppp",
                "..n.....",
                "...qp...",
                "...P....",
                "..N..N..",
                "PPP..PPP",
                "R..QK..R",
            ],
            Color::Black,
        )
        .unwrap()
    }

    #[test]
    fn pruning_matches_full_minimax() {
        let mut board = middlegame();
        let before = board.clone();

        for maximizer in [Color::White, Color::Black] {
            for depth in 1..=2 {
                for maximizing in [true, false] {
                    let mut searcher = Searcher::without_cache();
                    searcher.set_maximizer(maximizer);
                    let expected = minimax(&searcher, &mut board, depth, maximizing);
                    let pruned = searcher.search(&mut board, depth, -INFINITY, INFINITY, maximizing);
                    assert_eq!(pruned, expected, "{maximizer:?} depth {depth} maximizing {maximizing}");
                }
            }
        }
        assert_eq!(board, before);
    }

    #[test]
    fn cache_does_not_change_scores() {
        let mut board = middlegame();
        for depth in 1..=3 {
            for maximizing in [true, false] {
                let mut plain = Searcher::without_cache();
                let mut cached = Searcher::default();
                let expected = plain.search(&mut board, depth, -INFINITY, INFINITY, maximizing);
                assert_eq!(cached.search(&mut board, depth, -INFINITY, INFINITY, maximizing), expected);
                // Second run answers from the warm cache.
                assert_eq!(cached.search(&mut board, depth, -INFINITY, INFINITY, maximizing), expected);
            }
        }
    }

    #[test]
    fn warm_cache_saves_work() {
        let mut board = middlegame();
        let mut searcher = Searcher::default();
        searcher.search(&mut board, 3, -INFINITY, INFINITY, true);
        assert!(!searcher.cache().is_empty());

        let cold = searcher.nodes();
        searcher.search(&mut board, 3, -INFINITY, INFINITY, true);
        assert!(searcher.nodes() - cold < cold);
    }

    #[test]
    fn leaf_perspective_follows_maximizer() {
        let mut board = Board::new();
        board.set(sq("d8"), None);
        let mut white = Searcher::without_cache();
        white.set_maximizer(Color::White);
        let mut black = Searcher::without_cache();
        black.set_maximizer(Color::Black);

        let w = white.search(&mut board, 0, -INFINITY, INFINITY, true);
        let b = black.search(&mut board, 0, -INFINITY, INFINITY, true);
        assert!(w > 0);
        assert_eq!(w, -b);
    }

    #[test]
    fn side_without_moves_loses_immediately() {
        let mut board = Board::from_rows(
            [
                "........",
                "........",
                "........",
                "........",
                "........",
                "........",
                "........",
                "....K...",
            ],
            Color::Black,
        )
        .unwrap();
        let mut searcher = Searcher::without_cache();
        assert_eq!(searcher.search(&mut board, 2, -INFINITY, INFINITY, true), -INFINITY);
        searcher.set_maximizer(Color::White);
        assert_eq!(searcher.search(&mut board, 2, -INFINITY, INFINITY, false), INFINITY);
    }

    #[test]
    fn finished_game_is_scored_statically() {
        let mut board = middlegame();
        board.set_state(chess_core::GameState::Checkmate { winner: Color::White });
        let mut searcher = Searcher::without_cache();
        let static_score = -evaluate_position(&board);
        assert_eq!(searcher.search(&mut board, 3, -INFINITY, INFINITY, true), static_score);
        assert_eq!(searcher.nodes(), 1);
    }

    #[test]
    fn ordering_puts_captures_and_checks_first() {
        let mut board = Board::from_rows(
            [
                "....k...",
                "........",
                "........",
                "...q....",
                "........",
                "........",
                "P.......",
                "R...K..R",
            ],
            Color::White,
        )
        .unwrap();

        let moves = generate_moves(&board, Color::White);
        let ordered = order_moves(&mut board, moves.clone(), Color::White);
        assert_eq!(ordered.len(), moves.len());

        // Only Rh8 gives check and nothing reaches the queen.
        assert_eq!(ordered[0], Move::new(sq("h1"), sq("h8")));
        assert_eq!(move_priority(&mut board, ordered[0], Color::White), CHECK_BONUS);

        let priorities: Vec<i32> = ordered
            .iter()
            .map(|mv| move_priority(&mut board, *mv, Color::White))
            .collect();
        assert!(priorities.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn capture_priority_rewards_favorable_trades() {
        let mut board = Board::from_rows(
            [
                "....k...",
                "........",
                "........",
                "...q....",
                "....P...",
                "........",
                "........",
                "...QK...",
            ],
            Color::White,
        )
        .unwrap();

        // Pawn takes queen on d5: 90 + 50 + center 10.
        let pawn_takes = Move::new(sq("e4"), sq("d5"));
        assert_eq!(move_priority(&mut board, pawn_takes, Color::White), 90 + FAVORABLE_TRADE_BONUS + CENTER_BONUS);

        // Queen takes queen is an even trade and still gets the bonus.
        let queen_takes = Move::new(sq("d1"), sq("d5"));
        assert_eq!(
            move_priority(&mut board, queen_takes, Color::White),
            90 + FAVORABLE_TRADE_BONUS + CENTER_BONUS
        );
    }

    #[test]
    fn best_move_grabs_hanging_queen() {
        let mut board = Board::from_rows(
            [
                "....k...",
                "........",
                "........",
                "...q....",
                "....P...",
                "........",
                "........",
                "....K...",
            ],
            Color::White,
        )
        .unwrap();
        let before = board.clone();

        let mut searcher = Searcher::default();
        let (mv, _) = searcher.best_move(&mut board, 2).unwrap();
        assert_eq!(mv, Move::new(sq("e4"), sq("d5")));
        assert_eq!(searcher.maximizer(), Color::White);
        assert_eq!(board, before);
    }

    #[test]
    fn best_move_none_without_moves() {
        let mut board = Board::from_rows(
            [
                "........",
                "........",
                "........",
                "........",
                "........",
                "........",
                "........",
                "....K...",
            ],
            Color::Black,
        )
        .unwrap();
        assert!(Searcher::default().best_move(&mut board, 2).is_none());
    }

    #[test]
    fn best_move_keeps_first_of_equal_moves() {
        // No kings and mirror-symmetric, so Nc3 and Nf3 score the same.
        let mut board = Board::from_rows(
            [
                "........",
                "........",
                "........",
                "........",
                "........",
                "........",
                "........",
                ".N....N.",
            ],
            Color::White,
        )
        .unwrap();
        let queen_side = Move::new(sq("b1"), sq("c3"));
        let king_side = Move::new(sq("g1"), sq("f3"));

        let moves = generate_moves(&board, Color::White);
        let ordered = order_moves(&mut board, moves, Color::White);
        let first = ordered.iter().position(|&mv| mv == queen_side).unwrap();
        let second = ordered.iter().position(|&mv| mv == king_side).unwrap();
        assert!(first < second);

        let mut searcher = Searcher::without_cache();
        let (mv, score) = searcher.best_move(&mut board, 1).unwrap();
        assert_eq!(mv, queen_side);

        let mut mirrored = board.clone();
        mirrored.execute_move(king_side);
        assert_eq!(searcher.search(&mut mirrored, 0, -INFINITY, INFINITY, false), score);
    }
}
