//! In-place move application.
//!
//! `apply_move` trusts that the move came from the generator. It checks only
//! that the origin holds a piece of the side to move, so a stray call fails
//! before the board is touched.

use crate::chess_errors::ChessErrors;
use crate::game_state::board::Board;
use crate::game_state::chess_types::{Color, Piece, PieceKind, Square};
use crate::moves::chess_move::ChessMove;

/// Applies `mv` to `board` and returns the captured piece, if any.
pub fn apply_move(board: &mut Board, mv: &ChessMove) -> Result<Piece, ChessErrors> {
    let moving = board.piece_at(mv.start);
    let (color, kind) = match moving {
        Piece::Empty => return Err(ChessErrors::EmptyStartSquare(mv.start)),
        Piece::Occupied { color, kind } => (color, kind),
    };
    if color != board.side_to_move {
        return Err(ChessErrors::WrongSideToMove(mv.start));
    }

    let mut captured = match mv.promotion {
        Some(promoted) => {
            board.remove_piece(mv.start);
            board.place_piece(mv.end, Piece::new(color, promoted))?
        }
        None => board.move_piece(mv.start, mv.end)?,
    };

    if mv.is_en_passant {
        // The passed pawn shares the destination file and the origin rank.
        let passed = Square::at(mv.end.file(), mv.start.rank());
        captured = board.remove_piece(passed);
    }

    if let Some(side) = mv.castle {
        board.move_piece(side.rook_from(color), side.rook_to(color))?;
    }

    update_castling_rights(board, color, kind, mv);

    board.en_passant_target = double_push_midpoint(kind, mv);

    if kind == PieceKind::Pawn || !captured.is_empty() {
        board.halfmove_clock = 0;
    } else {
        board.halfmove_clock = board.halfmove_clock.saturating_add(1);
    }
    if color == Color::Black {
        board.fullmove_number = board.fullmove_number.saturating_add(1);
    }
    board.side_to_move = color.opposite();

    Ok(captured)
}

fn update_castling_rights(board: &mut Board, color: Color, kind: PieceKind, mv: &ChessMove) {
    if kind == PieceKind::King {
        board.castling_rights.clear_color(color);
    }
    // A rook leaving its corner, or anything landing on a corner, ends that right.
    board.castling_rights.clear_for_rook_corner(mv.start);
    board.castling_rights.clear_for_rook_corner(mv.end);
}

fn double_push_midpoint(kind: PieceKind, mv: &ChessMove) -> Option<Square> {
    if kind != PieceKind::Pawn {
        return None;
    }
    let start_rank = mv.start.rank() as i8;
    let end_rank = mv.end.rank() as i8;
    if (end_rank - start_rank).abs() == 2 {
        Square::try_new(mv.start.file() as i8, (start_rank + end_rank) / 2)
    } else {
        None
    }
}
