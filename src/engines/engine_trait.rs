//! Engine abstraction layer.
//!
//! Defines the common output payload so different move choosers can be
//! selected at runtime behind a single trait interface.

use crate::chess_errors::ChessErrors;
use crate::game_state::board::Board;
use crate::moves::chess_move::ChessMove;

#[derive(Debug, Clone, Default)]
pub struct EngineOutput {
    /// `None` when the side to move has no legal moves.
    pub best_move: Option<ChessMove>,
    pub info_lines: Vec<String>,
}

pub trait Engine {
    fn name(&self) -> &str;

    fn new_game(&mut self) {}

    fn choose_move(&mut self, board: &Board) -> Result<EngineOutput, ChessErrors>;
}

/// Engine names accepted by `engine_from_name`.
pub const ENGINE_NAMES: [&str; 3] = ["random", "greedy", "two_ply"];

/// Builds a seeded engine by name.
pub fn engine_from_name(name: &str, seed: u64) -> Option<Box<dyn Engine>> {
    use crate::engines::{engine_greedy::GreedyEngine, engine_random::RandomEngine, engine_two_ply::TwoPlyEngine};
    match name {
        "random" => Some(Box::new(RandomEngine::with_seed(seed))),
        "greedy" => Some(Box::new(GreedyEngine::with_seed(seed))),
        "two_ply" => Some(Box::new(TwoPlyEngine::with_seed(seed))),
        _ => None,
    }
}
