//! Static evaluation.
//!
//! Scores are absolute: positive favors White, negative favors Black.
//! Material uses the conventional values P=1 N=3 B=3 R=5 Q=9 K=0. A position
//! with no legal moves scores `MATE_SCORE` against the mated side, or 0 when
//! it is stalemate.

use crate::chess_errors::ChessErrors;
use crate::game_state::board::Board;
use crate::game_state::chess_types::{Color, PieceKind};
use crate::move_generation::legal_move_generator::{generate_legal_moves, terminal_status, GameStatus};

pub type Score = i32;

/// Magnitude reported for checkmate. Larger than any material balance.
pub const MATE_SCORE: Score = 1_000;

pub const DRAW_SCORE: Score = 0;

#[inline]
pub const fn piece_value(kind: PieceKind) -> Score {
    match kind {
        PieceKind::Pawn => 1,
        PieceKind::Knight => 3,
        PieceKind::Bishop => 3,
        PieceKind::Rook => 5,
        PieceKind::Queen => 9,
        PieceKind::King => 0,
    }
}

/// White material minus black material.
pub fn material_score(board: &Board) -> Score {
    let side_total = |color: Color| -> Score {
        board
            .roster(color)
            .iter()
            .map(|record| piece_value(record.kind))
            .sum()
    };
    side_total(Color::White) - side_total(Color::Black)
}

/// Score of a finished game from White's point of view.
pub fn terminal_score(status: GameStatus) -> Option<Score> {
    match status {
        GameStatus::Ongoing => None,
        GameStatus::Stalemate => Some(DRAW_SCORE),
        GameStatus::Checkmate { winner: Color::White } => Some(MATE_SCORE),
        GameStatus::Checkmate { winner: Color::Black } => Some(-MATE_SCORE),
    }
}

/// Material balance, or the terminal score when the side to move is out of moves.
pub fn evaluate_board(board: &Board) -> Result<Score, ChessErrors> {
    if generate_legal_moves(board)?.is_empty() {
        return Ok(terminal_score(terminal_status(board)).unwrap_or(DRAW_SCORE));
    }
    Ok(material_score(board))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::chess_rules::STARTING_POSITION_FEN;

    #[test]
    fn starting_position_is_balanced() {
        let board = Board::from_fen(STARTING_POSITION_FEN).unwrap();
        assert_eq!(material_score(&board), 0);
        assert_eq!(evaluate_board(&board).unwrap(), 0);
    }

    #[test]
    fn material_is_signed_white_minus_black() {
        // White: Q R P, black: N N.
        let board = Board::from_fen("4k3/8/2n1n3/8/8/8/4P3/Q3K2R w - - 0 1").unwrap();
        assert_eq!(material_score(&board), 9 + 5 + 1 - 3 - 3);
        let flipped = Board::from_fen("4k2r/q3p3/8/8/8/2N1N3/8/4K3 b - - 0 1").unwrap();
        assert_eq!(material_score(&flipped), -(9 + 5 + 1) + 3 + 3);
    }

    #[test]
    fn checkmate_scores_for_the_side_not_to_move() {
        let white_mated =
            Board::from_fen("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3").unwrap();
        assert_eq!(evaluate_board(&white_mated).unwrap(), -MATE_SCORE);

        let black_mated = Board::from_fen("R5k1/5ppp/8/8/8/8/8/6K1 b - - 0 1").unwrap();
        assert_eq!(evaluate_board(&black_mated).unwrap(), MATE_SCORE);
    }

    #[test]
    fn stalemate_scores_as_draw() {
        // White is a queen up, yet the position is drawn.
        let board = Board::from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").unwrap();
        assert_eq!(material_score(&board), 9);
        assert_eq!(evaluate_board(&board).unwrap(), DRAW_SCORE);
    }

    #[test]
    fn terminal_score_mapping() {
        assert_eq!(terminal_score(GameStatus::Ongoing), None);
        assert_eq!(terminal_score(GameStatus::Stalemate), Some(0));
        assert_eq!(
            terminal_score(GameStatus::Checkmate { winner: Color::Black }),
            Some(-MATE_SCORE)
        );
    }
}
