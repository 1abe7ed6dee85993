//! Direction tables for every piece kind and the single walk that interprets
//! them. Attack maps and move generation both reach squares through
//! `for_each_reachable`, so the two can never disagree.

use crate::game_state::board::Board;
use crate::game_state::chess_types::{Color, Piece, PieceKind, Square};

pub const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

pub const KING_OFFSETS: [(i8, i8); 8] = [
    (0, 1),
    (1, 1),
    (1, 0),
    (1, -1),
    (0, -1),
    (-1, -1),
    (-1, 0),
    (-1, 1),
];

pub const ORTHOGONAL_RAYS: [(i8, i8); 4] = [(0, 1), (1, 0), (0, -1), (-1, 0)];

pub const DIAGONAL_RAYS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, -1), (-1, 1)];

pub const QUEEN_RAYS: [(i8, i8); 8] = KING_OFFSETS;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MovementPattern {
    /// One step along each offset.
    Step(&'static [(i8, i8)]),
    /// Repeated steps along each ray until blocked.
    Slide(&'static [(i8, i8)]),
    /// Diagonal-forward captures only; pushes are handled by the generator.
    Pawn,
}

pub const fn movement_pattern(kind: PieceKind) -> MovementPattern {
    match kind {
        PieceKind::Pawn => MovementPattern::Pawn,
        PieceKind::Knight => MovementPattern::Step(&KNIGHT_OFFSETS),
        PieceKind::Bishop => MovementPattern::Slide(&DIAGONAL_RAYS),
        PieceKind::Rook => MovementPattern::Slide(&ORTHOGONAL_RAYS),
        PieceKind::Queen => MovementPattern::Slide(&QUEEN_RAYS),
        PieceKind::King => MovementPattern::Step(&KING_OFFSETS),
    }
}

pub const fn pawn_capture_offsets(color: Color) -> [(i8, i8); 2] {
    let forward = color.forward();
    [(-1, forward), (1, forward)]
}

/// Visits every square a `color` piece of `kind` on `from` attacks.
///
/// Same-color squares stop a walk without being visited. Opposite-color
/// squares are visited and stop a walk. Empty squares are visited and a
/// slide continues through them. Pawns only visit their forward diagonals
/// when those hold an enemy piece or equal the en-passant target.
pub fn for_each_reachable<F>(board: &Board, from: Square, color: Color, kind: PieceKind, mut visit: F)
where
    F: FnMut(Square),
{
    match movement_pattern(kind) {
        MovementPattern::Step(offsets) => {
            for &(df, dr) in offsets {
                if let Some(to) = from.offset(df, dr) {
                    if !board.piece_at(to).is_color(color) {
                        visit(to);
                    }
                }
            }
        }
        MovementPattern::Slide(rays) => {
            for &(df, dr) in rays {
                let mut cursor = from;
                while let Some(to) = cursor.offset(df, dr) {
                    match board.piece_at(to) {
                        Piece::Empty => visit(to),
                        Piece::Occupied { color: c, .. } if c == color => break,
                        Piece::Occupied { .. } => {
                            visit(to);
                            break;
                        }
                    }
                    cursor = to;
                }
            }
        }
        MovementPattern::Pawn => {
            for (df, dr) in pawn_capture_offsets(color) {
                if let Some(to) = from.offset(df, dr) {
                    let enemy_there = board.piece_at(to).is_color(color.opposite());
                    if enemy_there || board.en_passant_target == Some(to) {
                        visit(to);
                    }
                }
            }
        }
    }
}
