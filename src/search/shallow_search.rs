//! One-ply and two-ply best-move selection.
//!
//! Scores are absolute (positive favors White), so White picks the maximum
//! and Black the minimum. Every move sharing the best score is collected and
//! one is drawn uniformly from the injected random source.

use rand::prelude::IndexedRandom;
use rand::Rng;

use crate::chess_errors::ChessErrors;
use crate::game_state::board::Board;
use crate::game_state::chess_types::Color;
use crate::move_generation::legal_move_apply::apply_move;
use crate::move_generation::legal_move_generator::{generate_legal_moves, terminal_status, GameStatus};
use crate::moves::chess_move::ChessMove;
use crate::search::board_scoring::{evaluate_board, terminal_score, Score, DRAW_SCORE};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchDepth {
    OnePly,
    #[default]
    TwoPly,
}

impl SearchDepth {
    pub fn from_plies(plies: u8) -> Option<Self> {
        match plies {
            1 => Some(SearchDepth::OnePly),
            2 => Some(SearchDepth::TwoPly),
            _ => None,
        }
    }

    pub fn plies(self) -> u8 {
        match self {
            SearchDepth::OnePly => 1,
            SearchDepth::TwoPly => 2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    BestMove {
        chess_move: ChessMove,
        score: Score,
        /// How many moves shared the best score.
        tied: usize,
    },
    Checkmate { winner: Color },
    Stalemate,
}

impl SearchOutcome {
    pub fn best_move(&self) -> Option<ChessMove> {
        match self {
            SearchOutcome::BestMove { chess_move, .. } => Some(*chess_move),
            _ => None,
        }
    }
}

pub fn search_best_move<R: Rng + ?Sized>(
    board: &Board,
    depth: SearchDepth,
    rng: &mut R,
) -> Result<SearchOutcome, ChessErrors> {
    match depth {
        SearchDepth::OnePly => search_one_ply(board, rng),
        SearchDepth::TwoPly => search_two_ply(board, rng),
    }
}

/// Scores each legal move by evaluating the position it leads to.
pub fn search_one_ply<R: Rng + ?Sized>(board: &Board, rng: &mut R) -> Result<SearchOutcome, ChessErrors> {
    let scored = score_one_ply(board)?;
    pick_best(board, scored, rng)
}

/// Scores each legal move by the opponent's best one-ply reply to it.
pub fn search_two_ply<R: Rng + ?Sized>(board: &Board, rng: &mut R) -> Result<SearchOutcome, ChessErrors> {
    let moves = generate_legal_moves(board)?;
    let mut scored = Vec::with_capacity(moves.len());
    for mv in moves {
        let mut child = board.clone();
        apply_move(&mut child, &mv)?;
        let replies = score_one_ply(&child)?;
        let score = match best_score(child.side_to_move, &replies) {
            Some(score) => score,
            None => terminal_score(terminal_status(&child)).unwrap_or(DRAW_SCORE),
        };
        scored.push((mv, score));
    }
    pick_best(board, scored, rng)
}

fn score_one_ply(board: &Board) -> Result<Vec<(ChessMove, Score)>, ChessErrors> {
    let moves = generate_legal_moves(board)?;
    let mut scored = Vec::with_capacity(moves.len());
    for mv in moves {
        let mut child = board.clone();
        apply_move(&mut child, &mv)?;
        scored.push((mv, evaluate_board(&child)?));
    }
    Ok(scored)
}

fn best_score(side: Color, scored: &[(ChessMove, Score)]) -> Option<Score> {
    let scores = scored.iter().map(|(_, score)| *score);
    match side {
        Color::White => scores.max(),
        Color::Black => scores.min(),
    }
}

fn pick_best<R: Rng + ?Sized>(
    board: &Board,
    scored: Vec<(ChessMove, Score)>,
    rng: &mut R,
) -> Result<SearchOutcome, ChessErrors> {
    let Some(best) = best_score(board.side_to_move, &scored) else {
        return Ok(match terminal_status(board) {
            GameStatus::Checkmate { winner } => SearchOutcome::Checkmate { winner },
            _ => SearchOutcome::Stalemate,
        });
    };

    let tied: Vec<ChessMove> = scored
        .into_iter()
        .filter(|(_, score)| *score == best)
        .map(|(mv, _)| mv)
        .collect();
    let chess_move = *tied.choose(rng).ok_or(ChessErrors::NoLegalMoves)?;

    Ok(SearchOutcome::BestMove {
        chess_move,
        score: best,
        tied: tied.len(),
    })
}
