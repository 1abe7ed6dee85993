//! Legal move generation by simulate-and-discard.
//!
//! Every pseudo-legal candidate is applied to a clone of the board and kept
//! only if the mover's king is unattacked afterwards. This one check covers
//! pins, moving into check, staying in check and en passant discoveries.

use crate::chess_errors::ChessErrors;
use crate::game_state::board::Board;
use crate::game_state::chess_types::{Color, Square};
use crate::move_generation::attack_map::is_in_check;
use crate::move_generation::legal_move_apply::apply_move;
use crate::move_generation::pseudo_legal_moves::{generate_piece_moves, generate_pseudo_legal_moves};
use crate::moves::chess_move::ChessMove;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    Ongoing,
    Checkmate { winner: Color },
    Stalemate,
}

impl GameStatus {
    pub fn is_terminal(self) -> bool {
        !matches!(self, GameStatus::Ongoing)
    }
}

pub fn generate_legal_moves(board: &Board) -> Result<Vec<ChessMove>, ChessErrors> {
    filter_legal(board, generate_pseudo_legal_moves(board))
}

/// Legal moves of the piece on `from`. Empty when the square is empty or
/// holds a piece of the waiting side.
pub fn generate_legal_moves_from(board: &Board, from: Square) -> Result<Vec<ChessMove>, ChessErrors> {
    let piece = board.piece_at(from);
    let (Some(color), Some(kind)) = (piece.color(), piece.kind()) else {
        return Ok(Vec::new());
    };
    if color != board.side_to_move {
        return Ok(Vec::new());
    }
    let mut candidates = Vec::new();
    generate_piece_moves(board, from, kind, color, &mut candidates);
    filter_legal(board, candidates)
}

/// Destination squares for the piece on `from`, one entry per square even
/// when a pawn has four promotion choices there.
pub fn legal_destinations(board: &Board, from: Square) -> Result<Vec<Square>, ChessErrors> {
    let mut destinations: Vec<Square> = generate_legal_moves_from(board, from)?
        .into_iter()
        .map(|mv| mv.end)
        .collect();
    destinations.sort();
    destinations.dedup();
    Ok(destinations)
}

/// True when the move leaves the mover's own king unattacked.
pub fn is_legal_after_simulation(board: &Board, mv: &ChessMove) -> Result<bool, ChessErrors> {
    let mover = board.side_to_move;
    let mut probe = board.clone();
    apply_move(&mut probe, mv)?;
    Ok(!is_in_check(&probe, mover))
}

pub fn game_status(board: &Board) -> Result<GameStatus, ChessErrors> {
    if !generate_legal_moves(board)?.is_empty() {
        return Ok(GameStatus::Ongoing);
    }
    Ok(terminal_status(board))
}

/// Classifies a position already known to have no legal moves.
pub(crate) fn terminal_status(board: &Board) -> GameStatus {
    if is_in_check(board, board.side_to_move) {
        GameStatus::Checkmate {
            winner: board.waiting_side(),
        }
    } else {
        GameStatus::Stalemate
    }
}

fn filter_legal(board: &Board, candidates: Vec<ChessMove>) -> Result<Vec<ChessMove>, ChessErrors> {
    let mut legal = Vec::with_capacity(candidates.len());
    for mv in candidates {
        if is_legal_after_simulation(board, &mv)? {
            legal.push(mv);
        }
    }
    Ok(legal)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::chess_rules::{CastleSide, STARTING_POSITION_FEN};
    use crate::game_state::chess_types::PieceKind;

    fn sq(name: &str) -> Square {
        Square::from_algebraic(name).unwrap()
    }

    fn legal_strings(board: &Board) -> Vec<String> {
        let mut out: Vec<String> = generate_legal_moves(board)
            .unwrap()
            .iter()
            .map(|m| m.to_string())
            .collect();
        out.sort();
        out
    }

    #[test]
    fn every_legal_move_leaves_king_safe() {
        let fens = [
            STARTING_POSITION_FEN,
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
            "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
            "r2q1rk1/pP1p2pp/Q4n2/bbp1p3/Np6/1B3NBn/pPPP1PPP/R3K2R b KQ - 0 1",
        ];
        for fen in fens {
            let board = Board::from_fen(fen).unwrap();
            let mover = board.side_to_move;
            for mv in generate_legal_moves(&board).unwrap() {
                let mut after = board.clone();
                apply_move(&mut after, &mv).unwrap();
                assert!(!is_in_check(&after, mover), "{fen}: {mv} leaves king attacked");
            }
        }
    }

    #[test]
    fn pinned_knight_cannot_move() {
        let board = Board::from_fen("4r1k1/8/8/8/8/8/4N3/4K3 w - - 0 1").unwrap();
        assert!(generate_legal_moves_from(&board, sq("e2")).unwrap().is_empty());
        assert!(!generate_legal_moves(&board).unwrap().is_empty());
    }

    #[test]
    fn pinned_rook_slides_along_pin_line() {
        let board = Board::from_fen("4r1k1/8/8/8/8/8/4R3/4K3 w - - 0 1").unwrap();
        let mut got: Vec<String> = generate_legal_moves_from(&board, sq("e2"))
            .unwrap()
            .iter()
            .map(|m| m.end.to_string())
            .collect();
        got.sort();
        assert_eq!(got, vec!["e3", "e4", "e5", "e6", "e7", "e8"]);
    }

    #[test]
    fn king_cannot_step_onto_attacked_square() {
        let board = Board::from_fen("4k3/8/8/8/8/8/7P/r6K w - - 0 1").unwrap();
        let got = legal_strings(&board);
        assert_eq!(got, vec!["h1g2"]);
    }

    #[test]
    fn king_cannot_step_next_to_enemy_pawn_capture() {
        // d3 is empty but covered by the e4 pawn once the king stands there.
        let board = Board::from_fen("4k3/8/8/8/4p3/8/3K4/8 w - - 0 1").unwrap();
        let got = legal_strings(&board);
        assert!(!got.contains(&"d2d3".to_string()));
        assert!(got.contains(&"d2e3".to_string()));
    }

    #[test]
    fn kingside_castle_legal_when_path_clear_and_safe() {
        let mut board =
            Board::from_fen("rnbqk2r/pppp1ppp/5n2/2b1p3/2B1P3/5N2/PPPP1PPP/RNBQK2R w KQkq - 4 4")
                .unwrap();
        assert!(legal_strings(&board).contains(&"e1g1".to_string()));

        // Moving the rook out and back forfeits the right for good.
        board.apply_moves(&["h1g1", "b8c6", "g1h1", "c6b8"]).unwrap();
        assert!(!board.castling_rights.has(Color::White, CastleSide::Kingside));
        assert!(!legal_strings(&board).contains(&"e1g1".to_string()));
    }

    #[test]
    fn castle_blocked_by_attacked_transit_square() {
        // The c4 bishop covers f1.
        let board = Board::from_fen("4k3/8/8/8/2b5/8/8/4K2R w K - 0 1").unwrap();
        assert!(!legal_strings(&board).contains(&"e1g1".to_string()));
    }

    #[test]
    fn castle_blocked_by_piece_between() {
        let board = Board::from_fen("4k3/8/8/8/8/8/8/RN2K3 w Q - 0 1").unwrap();
        assert!(!legal_strings(&board).contains(&"e1c1".to_string()));
        let board = Board::from_fen("4k3/8/8/8/8/8/8/R3K3 w Q - 0 1").unwrap();
        assert!(legal_strings(&board).contains(&"e1c1".to_string()));
    }

    #[test]
    fn cannot_castle_out_of_check() {
        let board = Board::from_fen("4k3/8/8/8/8/8/4r3/R3K2R w KQ - 0 1").unwrap();
        let got = legal_strings(&board);
        assert!(!got.contains(&"e1g1".to_string()));
        assert!(!got.contains(&"e1c1".to_string()));
    }

    #[test]
    fn en_passant_capture_is_generated() {
        let mut board = Board::new_game();
        board.apply_moves(&["a2a4", "h7h5", "a4a5", "b7b5"]).unwrap();
        let ep: Vec<ChessMove> = generate_legal_moves(&board)
            .unwrap()
            .into_iter()
            .filter(|m| m.is_en_passant)
            .collect();
        assert_eq!(ep.len(), 1);
        assert_eq!(ep[0].to_string(), "a5b6");
        assert!(ep[0].is_capture);
    }

    #[test]
    fn en_passant_refused_when_it_exposes_king() {
        let board = Board::from_fen("8/8/8/K2pP2r/8/8/8/7k w - d6 0 1").unwrap();
        assert!(!legal_strings(&board).contains(&"e5d6".to_string()));
    }

    #[test]
    fn promotion_yields_four_candidates() {
        let board = Board::from_fen("4k3/1P6/8/8/8/8/8/4K3 w - - 0 1").unwrap();
        let promos: Vec<ChessMove> = generate_legal_moves_from(&board, sq("b7")).unwrap();
        assert_eq!(promos.len(), 4);
        let mut kinds: Vec<PieceKind> = promos.iter().filter_map(|m| m.promotion).collect();
        kinds.dedup();
        assert_eq!(kinds.len(), 4);
        assert!(promos.iter().all(|m| m.end == sq("b8") && m.start == sq("b7")));
        assert_eq!(legal_destinations(&board, sq("b7")).unwrap(), vec![sq("b8")]);
    }

    #[test]
    fn destinations_for_waiting_side_are_empty() {
        let board = Board::new_game();
        assert!(legal_destinations(&board, sq("e7")).unwrap().is_empty());
        assert!(legal_destinations(&board, sq("e4")).unwrap().is_empty());
        assert_eq!(
            legal_destinations(&board, sq("g1")).unwrap(),
            vec![sq("f3"), sq("h3")]
        );
    }

    #[test]
    fn checkmate_and_stalemate_are_distinguished() {
        let mated = Board::from_fen("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3").unwrap();
        assert_eq!(
            game_status(&mated).unwrap(),
            GameStatus::Checkmate { winner: Color::Black }
        );

        let stalemated = Board::from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").unwrap();
        assert_eq!(game_status(&stalemated).unwrap(), GameStatus::Stalemate);
        assert!(game_status(&stalemated).unwrap().is_terminal());

        assert_eq!(game_status(&Board::new_game()).unwrap(), GameStatus::Ongoing);
    }
}
