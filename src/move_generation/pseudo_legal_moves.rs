//! Pseudo-legal move generation for the side to move.
//!
//! Moves obey piece movement rules but may leave the mover's king attacked;
//! `legal_move_generator` filters those out.

use crate::game_state::board::Board;
use crate::game_state::chess_rules::{CastleSide, KING_START_FILE};
use crate::game_state::chess_types::{Color, Piece, PieceKind, Square, PROMOTION_KINDS};
use crate::move_generation::attack_map::compute_attack_map;
use crate::moves::chess_move::ChessMove;
use crate::moves::movement_tables::{for_each_reachable, pawn_capture_offsets};

pub fn generate_pseudo_legal_moves(board: &Board) -> Vec<ChessMove> {
    let mut moves = Vec::with_capacity(64);
    let color = board.side_to_move;
    for record in board.roster(color).iter() {
        generate_piece_moves(board, record.square, record.kind, color, &mut moves);
    }
    moves
}

/// Pseudo-legal moves of the single piece on `from`, appended to `out`.
pub fn generate_piece_moves(
    board: &Board,
    from: Square,
    kind: PieceKind,
    color: Color,
    out: &mut Vec<ChessMove>,
) {
    match kind {
        PieceKind::Pawn => generate_pawn_moves(board, from, color, out),
        PieceKind::King => {
            push_reachable(board, from, color, kind, out);
            generate_castling_moves(board, from, color, out);
        }
        _ => push_reachable(board, from, color, kind, out),
    }
}

fn push_reachable(board: &Board, from: Square, color: Color, kind: PieceKind, out: &mut Vec<ChessMove>) {
    for_each_reachable(board, from, color, kind, |to| {
        let is_capture = !board.piece_at(to).is_empty();
        out.push(ChessMove::new(from, to, is_capture));
    });
}

fn generate_pawn_moves(board: &Board, from: Square, color: Color, out: &mut Vec<ChessMove>) {
    let forward = color.forward();

    if let Some(one) = from.offset(0, forward) {
        if board.piece_at(one).is_empty() {
            push_pawn_move(color, ChessMove::new(from, one, false), out);
            if from.rank() == color.pawn_start_rank() {
                if let Some(two) = one.offset(0, forward) {
                    if board.piece_at(two).is_empty() {
                        out.push(ChessMove::new(from, two, false));
                    }
                }
            }
        }
    }

    for_each_reachable(board, from, color, PieceKind::Pawn, |to| {
        if board.piece_at(to).is_empty() {
            // Only the en-passant target is reachable while empty.
            out.push(ChessMove::en_passant(from, to));
        } else {
            push_pawn_move(color, ChessMove::new(from, to, true), out);
        }
    });
}

/// Expands a move onto the last rank into one candidate per promotion kind.
fn push_pawn_move(color: Color, mv: ChessMove, out: &mut Vec<ChessMove>) {
    if mv.end.rank() == color.promotion_rank() {
        out.extend(PROMOTION_KINDS.iter().map(|kind| mv.with_promotion(*kind)));
    } else {
        out.push(mv);
    }
}

fn generate_castling_moves(board: &Board, from: Square, color: Color, out: &mut Vec<ChessMove>) {
    let rights = board.castling_rights;
    if !rights.has(color, CastleSide::Kingside) && !rights.has(color, CastleSide::Queenside) {
        return;
    }
    if from != Square::at(KING_START_FILE, color.home_rank()) {
        return;
    }

    let enemy = compute_attack_map(board, color.opposite());
    if enemy.is_attacked(from) {
        return;
    }

    for side in CastleSide::BOTH {
        if !rights.has(color, side) {
            continue;
        }
        let rook = board.piece_at(side.rook_from(color));
        if !(rook.is_color(color) && rook.kind() == Some(PieceKind::Rook)) {
            continue;
        }
        if side.between(color).iter().any(|s| !board.piece_at(*s).is_empty()) {
            continue;
        }
        if side
            .king_transit(color)
            .iter()
            .any(|s| enemy.is_attacked(*s) || enemy_pawn_covers(board, *s, color))
        {
            continue;
        }
        out.push(ChessMove::castling(from, side.king_to(color), side));
    }
}

/// Enemy pawn diagonals count in the attack map only onto occupied squares,
/// so an empty transit square needs this extra look.
fn enemy_pawn_covers(board: &Board, square: Square, color: Color) -> bool {
    let enemy = color.opposite();
    pawn_capture_offsets(enemy).iter().any(|&(df, dr)| {
        square
            .offset(-df, -dr)
            .is_some_and(|from| board.piece_at(from) == Piece::new(enemy, PieceKind::Pawn))
    })
}
