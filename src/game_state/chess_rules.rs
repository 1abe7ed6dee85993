//! Canonical chess-rule constants and castling geometry.
//!
//! Stores the starting position, the fifty-move threshold and the fixed
//! squares involved in each castling move, so move generation and move
//! application agree on a single description of the rule.

use crate::game_state::chess_types::{Color, Square};

/// Standard chess starting position in Forsyth-Edwards Notation (FEN).
pub const STARTING_POSITION_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Half-move clock value at which the fifty-move rule allows a draw.
pub const FIFTY_MOVE_HALFMOVE_LIMIT: u32 = 100;

/// File of both kings in the starting position.
pub const KING_START_FILE: u8 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CastleSide {
    Kingside,
    Queenside,
}

impl CastleSide {
    pub const BOTH: [CastleSide; 2] = [CastleSide::Kingside, CastleSide::Queenside];

    pub const fn king_from(self, color: Color) -> Square {
        Square::at(KING_START_FILE, color.home_rank())
    }

    pub const fn king_to(self, color: Color) -> Square {
        match self {
            CastleSide::Kingside => Square::at(6, color.home_rank()),
            CastleSide::Queenside => Square::at(2, color.home_rank()),
        }
    }

    /// Corner the rook starts on.
    pub const fn rook_from(self, color: Color) -> Square {
        match self {
            CastleSide::Kingside => Square::at(7, color.home_rank()),
            CastleSide::Queenside => Square::at(0, color.home_rank()),
        }
    }

    pub const fn rook_to(self, color: Color) -> Square {
        match self {
            CastleSide::Kingside => Square::at(5, color.home_rank()),
            CastleSide::Queenside => Square::at(3, color.home_rank()),
        }
    }

    /// Squares between king and rook that must be empty.
    pub fn between(self, color: Color) -> &'static [Square] {
        const WHITE_KINGSIDE: [Square; 2] = [Square::at(5, 0), Square::at(6, 0)];
        const WHITE_QUEENSIDE: [Square; 3] = [Square::at(1, 0), Square::at(2, 0), Square::at(3, 0)];
        const BLACK_KINGSIDE: [Square; 2] = [Square::at(5, 7), Square::at(6, 7)];
        const BLACK_QUEENSIDE: [Square; 3] = [Square::at(1, 7), Square::at(2, 7), Square::at(3, 7)];
        match (color, self) {
            (Color::White, CastleSide::Kingside) => &WHITE_KINGSIDE,
            (Color::White, CastleSide::Queenside) => &WHITE_QUEENSIDE,
            (Color::Black, CastleSide::Kingside) => &BLACK_KINGSIDE,
            (Color::Black, CastleSide::Queenside) => &BLACK_QUEENSIDE,
        }
    }

    /// The two squares the king crosses, destination included. Each must be
    /// unattacked for the castle to be generated.
    pub fn king_transit(self, color: Color) -> [Square; 2] {
        let rank = color.home_rank();
        match self {
            CastleSide::Kingside => [Square::at(5, rank), Square::at(6, rank)],
            CastleSide::Queenside => [Square::at(3, rank), Square::at(2, rank)],
        }
    }
}

/// The four castling flags. Flags are only ever cleared during play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CastlingRights {
    pub white_kingside: bool,
    pub white_queenside: bool,
    pub black_kingside: bool,
    pub black_queenside: bool,
}

impl CastlingRights {
    pub const ALL: CastlingRights = CastlingRights {
        white_kingside: true,
        white_queenside: true,
        black_kingside: true,
        black_queenside: true,
    };

    pub const NONE: CastlingRights = CastlingRights {
        white_kingside: false,
        white_queenside: false,
        black_kingside: false,
        black_queenside: false,
    };

    pub fn has(&self, color: Color, side: CastleSide) -> bool {
        match (color, side) {
            (Color::White, CastleSide::Kingside) => self.white_kingside,
            (Color::White, CastleSide::Queenside) => self.white_queenside,
            (Color::Black, CastleSide::Kingside) => self.black_kingside,
            (Color::Black, CastleSide::Queenside) => self.black_queenside,
        }
    }

    pub fn set(&mut self, color: Color, side: CastleSide) {
        *self.flag_mut(color, side) = true;
    }

    pub fn clear(&mut self, color: Color, side: CastleSide) {
        *self.flag_mut(color, side) = false;
    }

    pub fn clear_color(&mut self, color: Color) {
        self.clear(color, CastleSide::Kingside);
        self.clear(color, CastleSide::Queenside);
    }

    /// Clears whichever right depends on a rook standing on `square`.
    pub fn clear_for_rook_corner(&mut self, square: Square) {
        for color in [Color::White, Color::Black] {
            for side in CastleSide::BOTH {
                if side.rook_from(color) == square {
                    self.clear(color, side);
                }
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::NONE
    }

    fn flag_mut(&mut self, color: Color, side: CastleSide) -> &mut bool {
        match (color, side) {
            (Color::White, CastleSide::Kingside) => &mut self.white_kingside,
            (Color::White, CastleSide::Queenside) => &mut self.white_queenside,
            (Color::Black, CastleSide::Kingside) => &mut self.black_kingside,
            (Color::Black, CastleSide::Queenside) => &mut self.black_queenside,
        }
    }
}
