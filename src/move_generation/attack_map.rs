//! Attack accumulator and check detection.
//!
//! An `AttackMap` stores, per square, how many pieces of one side attack it.
//! Check detection and castling safety both read counts from it.

use crate::game_state::board::Board;
use crate::game_state::chess_types::{Color, Square};
use crate::moves::movement_tables::for_each_reachable;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttackMap {
    attacker: Color,
    counts: [[u8; 8]; 8],
}

impl AttackMap {
    pub fn attacker(&self) -> Color {
        self.attacker
    }

    #[inline]
    pub fn count(&self, square: Square) -> u8 {
        self.counts[square.rank() as usize][square.file() as usize]
    }

    #[inline]
    pub fn is_attacked(&self, square: Square) -> bool {
        self.count(square) > 0
    }

    /// Squares with a nonzero count.
    pub fn attacked_squares(&self) -> impl Iterator<Item = Square> + '_ {
        Square::all().filter(|s| self.is_attacked(*s))
    }
}

/// Builds the attack map of every piece `attacker` has on the board.
pub fn compute_attack_map(board: &Board, attacker: Color) -> AttackMap {
    let mut counts = [[0u8; 8]; 8];
    for record in board.roster(attacker).iter() {
        for_each_reachable(board, record.square, attacker, record.kind, |to| {
            counts[to.rank() as usize][to.file() as usize] += 1;
        });
    }
    AttackMap { attacker, counts }
}

/// True when `color`'s king stands on a square the other side attacks.
/// A side without a king is never in check.
pub fn is_in_check(board: &Board, color: Color) -> bool {
    match board.king_square(color) {
        Some(king) => compute_attack_map(board, color.opposite()).is_attacked(king),
        None => false,
    }
}

/// Number of enemy pieces attacking `color`'s king.
pub fn checker_count(board: &Board, color: Color) -> u8 {
    board
        .king_square(color)
        .map(|king| compute_attack_map(board, color.opposite()).count(king))
        .unwrap_or(0)
}
