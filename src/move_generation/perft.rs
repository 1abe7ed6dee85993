//! Perft node counting for generator validation.

use crate::chess_errors::ChessErrors;
use crate::game_state::board::Board;
use crate::move_generation::attack_map::is_in_check;
use crate::move_generation::legal_move_apply::apply_move;
use crate::move_generation::legal_move_generator::generate_legal_moves;
use crate::moves::chess_move::ChessMove;

/// Leaf statistics. Category counters describe the moves made on the final
/// ply only, matching the published perft tables.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PerftCounts {
    pub nodes: u64,
    pub captures: u64,
    pub en_passant: u64,
    pub castles: u64,
    pub promotions: u64,
    pub checks: u64,
    pub checkmates: u64,
}

impl PerftCounts {
    fn merge(&mut self, rhs: PerftCounts) {
        self.nodes += rhs.nodes;
        self.captures += rhs.captures;
        self.en_passant += rhs.en_passant;
        self.castles += rhs.castles;
        self.promotions += rhs.promotions;
        self.checks += rhs.checks;
        self.checkmates += rhs.checkmates;
    }
}

/// Number of leaf positions `depth` plies below `board`.
pub fn perft(board: &Board, depth: u8) -> Result<u64, ChessErrors> {
    if depth == 0 {
        return Ok(1);
    }
    let moves = generate_legal_moves(board)?;
    if depth == 1 {
        return Ok(moves.len() as u64);
    }
    let mut nodes = 0;
    for mv in &moves {
        let mut child = board.clone();
        apply_move(&mut child, mv)?;
        nodes += perft(&child, depth - 1)?;
    }
    Ok(nodes)
}

/// Perft with leaf move categories.
pub fn perft_counts(board: &Board, depth: u8) -> Result<PerftCounts, ChessErrors> {
    if depth == 0 {
        return Ok(PerftCounts {
            nodes: 1,
            ..PerftCounts::default()
        });
    }
    let mut total = PerftCounts::default();
    for mv in generate_legal_moves(board)? {
        let mut child = board.clone();
        apply_move(&mut child, &mv)?;
        if depth == 1 {
            total.merge(leaf_counts(&child, &mv)?);
        } else {
            total.merge(perft_counts(&child, depth - 1)?);
        }
    }
    Ok(total)
}

/// Per-root-move node counts, sorted by move text.
pub fn perft_divide(board: &Board, depth: u8) -> Result<Vec<(ChessMove, u64)>, ChessErrors> {
    let mut out = Vec::new();
    if depth == 0 {
        return Ok(out);
    }
    for mv in generate_legal_moves(board)? {
        let mut child = board.clone();
        apply_move(&mut child, &mv)?;
        out.push((mv, perft(&child, depth - 1)?));
    }
    out.sort_by_key(|(mv, _)| mv.to_string());
    Ok(out)
}

fn leaf_counts(child: &Board, mv: &ChessMove) -> Result<PerftCounts, ChessErrors> {
    let mut counts = PerftCounts {
        nodes: 1,
        ..PerftCounts::default()
    };
    counts.captures = mv.is_capture as u64;
    counts.en_passant = mv.is_en_passant as u64;
    counts.castles = mv.castle.is_some() as u64;
    counts.promotions = mv.promotion.is_some() as u64;
    if is_in_check(child, child.side_to_move) {
        counts.checks = 1;
        if generate_legal_moves(child)?.is_empty() {
            counts.checkmates = 1;
        }
    }
    Ok(counts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::chess_rules::STARTING_POSITION_FEN;

    const KIWIPETE: &str = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";
    const POSITION_3: &str = "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1";
    const POSITION_4: &str = "r2q1rk1/pP1p2pp/Q4n2/bbp1p3/Np6/1B3NBn/pPPP1PPP/R3K2R b KQ - 0 1";
    const POSITION_5: &str = "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8";

    fn nodes(fen: &str, depth: u8) -> u64 {
        perft(&Board::from_fen(fen).unwrap(), depth).unwrap()
    }

    #[test]
    fn perft_start_position() {
        assert_eq!(nodes(STARTING_POSITION_FEN, 0), 1);
        assert_eq!(nodes(STARTING_POSITION_FEN, 1), 20);
        assert_eq!(nodes(STARTING_POSITION_FEN, 2), 400);
        assert_eq!(nodes(STARTING_POSITION_FEN, 3), 8_902);
    }

    #[test]
    fn perft_kiwipete() {
        assert_eq!(nodes(KIWIPETE, 1), 48);
        assert_eq!(nodes(KIWIPETE, 2), 2_039);
    }

    #[test]
    fn perft_position_3() {
        assert_eq!(nodes(POSITION_3, 1), 14);
        assert_eq!(nodes(POSITION_3, 2), 191);
        assert_eq!(nodes(POSITION_3, 3), 2_812);
    }

    #[test]
    fn perft_position_4() {
        assert_eq!(nodes(POSITION_4, 1), 6);
        assert_eq!(nodes(POSITION_4, 2), 264);
    }

    #[test]
    fn perft_position_5() {
        assert_eq!(nodes(POSITION_5, 1), 44);
        assert_eq!(nodes(POSITION_5, 2), 1_486);
    }

    #[test]
    fn kiwipete_leaf_categories() {
        let board = Board::from_fen(KIWIPETE).unwrap();
        let d1 = perft_counts(&board, 1).unwrap();
        assert_eq!(d1.nodes, 48);
        assert_eq!(d1.captures, 8);
        assert_eq!(d1.castles, 2);

        let d2 = perft_counts(&board, 2).unwrap();
        assert_eq!(d2.nodes, 2_039);
        assert_eq!(d2.captures, 351);
        assert_eq!(d2.en_passant, 1);
        assert_eq!(d2.castles, 91);
        assert_eq!(d2.promotions, 0);
        assert_eq!(d2.checks, 3);
        assert_eq!(d2.checkmates, 0);
    }

    #[test]
    fn start_position_leaf_categories() {
        let board = Board::new_game();
        let d3 = perft_counts(&board, 3).unwrap();
        assert_eq!(d3.nodes, 8_902);
        assert_eq!(d3.captures, 34);
        assert_eq!(d3.checks, 12);
        assert_eq!(d3.checkmates, 0);
    }

    #[test]
    fn divide_sums_to_perft() {
        let board = Board::from_fen(POSITION_3).unwrap();
        let divided = perft_divide(&board, 2).unwrap();
        assert_eq!(divided.len(), 14);
        assert_eq!(divided.iter().map(|(_, n)| n).sum::<u64>(), 191);
    }
}
