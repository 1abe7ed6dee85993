use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::chess_errors::ChessErrors;
use crate::engines::engine_trait::{Engine, EngineOutput};
use crate::game_state::board::Board;
use crate::search::shallow_search::{search_best_move, SearchDepth, SearchOutcome};

/// Chooses the move whose worst one-ply reply leaves the best balance.
pub struct TwoPlyEngine {
    rng: StdRng,
    depth: SearchDepth,
}

impl TwoPlyEngine {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
            depth: SearchDepth::TwoPly,
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            depth: SearchDepth::TwoPly,
        }
    }

    /// Drops to one ply, e.g. for quick tests.
    pub fn with_depth(mut self, depth: SearchDepth) -> Self {
        self.depth = depth;
        self
    }
}

impl Default for TwoPlyEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine for TwoPlyEngine {
    fn name(&self) -> &str {
        "two_ply"
    }

    fn choose_move(&mut self, board: &Board) -> Result<EngineOutput, ChessErrors> {
        let mut out = EngineOutput::default();
        out.info_lines
            .push(format!("info string two_ply_engine depth {}", self.depth.plies()));

        match search_best_move(board, self.depth, &mut self.rng)? {
            SearchOutcome::BestMove { chess_move, score, tied } => {
                out.info_lines.push(format!(
                    "info string two_ply_engine score {} tied {}",
                    score, tied
                ));
                out.best_move = Some(chess_move);
            }
            SearchOutcome::Checkmate { winner } => {
                out.info_lines
                    .push(format!("info string two_ply_engine checkmate winner {:?}", winner));
            }
            SearchOutcome::Stalemate => {
                out.info_lines.push("info string two_ply_engine stalemate".to_owned());
            }
        }
        Ok(out)
    }
}
