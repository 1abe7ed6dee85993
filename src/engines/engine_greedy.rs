use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::chess_errors::ChessErrors;
use crate::engines::engine_trait::{Engine, EngineOutput};
use crate::game_state::board::Board;
use crate::search::shallow_search::{search_one_ply, SearchOutcome};

/// Picks the move with the best material balance one ply ahead.
pub struct GreedyEngine {
    rng: StdRng,
}

impl GreedyEngine {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for GreedyEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine for GreedyEngine {
    fn name(&self) -> &str {
        "greedy"
    }

    fn choose_move(&mut self, board: &Board) -> Result<EngineOutput, ChessErrors> {
        let mut out = EngineOutput::default();
        match search_one_ply(board, &mut self.rng)? {
            SearchOutcome::BestMove { chess_move, score, tied } => {
                out.info_lines.push(format!(
                    "info string greedy_engine score {} tied {}",
                    score, tied
                ));
                out.best_move = Some(chess_move);
            }
            SearchOutcome::Checkmate { winner } => {
                out.info_lines
                    .push(format!("info string greedy_engine checkmate winner {:?}", winner));
            }
            SearchOutcome::Stalemate => {
                out.info_lines.push("info string greedy_engine stalemate".to_owned());
            }
        }
        Ok(out)
    }
}
