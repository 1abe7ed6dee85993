//! Generated move value.

use std::fmt;

use crate::game_state::chess_rules::CastleSide;
use crate::game_state::chess_types::{PieceKind, Square};

/// A move as produced by the generator. Flags are filled in from the
/// position; callers never build castling or en passant moves by hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChessMove {
    pub start: Square,
    pub end: Square,
    pub is_capture: bool,
    pub is_en_passant: bool,
    pub castle: Option<CastleSide>,
    pub promotion: Option<PieceKind>,
}

impl ChessMove {
    pub fn new(start: Square, end: Square, is_capture: bool) -> Self {
        Self {
            start,
            end,
            is_capture,
            is_en_passant: false,
            castle: None,
            promotion: None,
        }
    }

    pub fn en_passant(start: Square, end: Square) -> Self {
        Self {
            is_en_passant: true,
            ..Self::new(start, end, true)
        }
    }

    pub fn castling(start: Square, end: Square, side: CastleSide) -> Self {
        Self {
            castle: Some(side),
            ..Self::new(start, end, false)
        }
    }

    pub fn with_promotion(self, kind: PieceKind) -> Self {
        Self {
            promotion: Some(kind),
            ..self
        }
    }

    /// Coordinate notation, e.g. "e2e4" or "e7e8q".
    pub fn to_long_algebraic(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ChessMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.start, self.end)?;
        if let Some(kind) = self.promotion {
            write!(f, "{}", kind.to_char())?;
        }
        Ok(())
    }
}
