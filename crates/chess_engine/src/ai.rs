use chess_core::{generate_moves, Board, Move};
use log::{debug, info};
use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};

use crate::config::{Difficulty, DifficultyProfile, EngineConfig};
use crate::search::Searcher;

/// Computer opponent. Plays whichever side is to move on the board it is given.
#[derive(Debug, Clone)]
pub struct ChessAI {
    difficulty: Difficulty,
    config: EngineConfig,
    searcher: Searcher,
    rng: StdRng,
}

impl ChessAI {
    pub fn new(config: EngineConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Deterministic opponent for tests and replays.
    pub fn with_seed(config: EngineConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: EngineConfig, rng: StdRng) -> Self {
        Self {
            difficulty: Difficulty::default(),
            searcher: Searcher::new(config.cache_capacity),
            config,
            rng,
        }
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.difficulty = difficulty;
    }

    pub fn searcher(&self) -> &Searcher {
        &self.searcher
    }

    /// Forgets everything cached from earlier games.
    pub fn clear_cache(&mut self) {
        self.searcher.clear_cache();
    }

    /// Chooses a move for the side to move, or `None` when it has none.
    /// The board is restored before returning.
    pub fn get_move(&mut self, board: &mut Board) -> Option<Move> {
        let profile = self.config.profile(self.difficulty);
        let chosen = if profile.search_depth == 0 {
            self.random_move(board, profile)
        } else {
            self.searcher
                .best_move(board, profile.search_depth)
                .map(|(mv, score)| {
                    debug!("best score {score} at depth {}", profile.search_depth);
                    mv
                })
        };

        match chosen {
            Some(mv) => info!("{} AI plays {mv} for {:?}", self.difficulty, board.side_to_move()),
            None => info!("{:?} has no moves", board.side_to_move()),
        }
        chosen
    }

    fn random_move(&mut self, board: &Board, profile: DifficultyProfile) -> Option<Move> {
        let moves = generate_moves(board, board.side_to_move());
        let captures: Vec<Move> = moves
            .iter()
            .copied()
            .filter(|mv| board.piece_at(mv.to).is_some())
            .collect();

        if !captures.is_empty() && self.rng.gen_bool(profile.capture_bias.clamp(0.0, 1.0)) {
            return captures.choose(&mut self.rng).copied();
        }
        moves.choose(&mut self.rng).copied()
    }
}

impl Default for ChessAI {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}
