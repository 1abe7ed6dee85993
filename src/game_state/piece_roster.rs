//! Per-side list of live pieces with a direct king reference.

use crate::chess_errors::ChessErrors;
use crate::game_state::chess_types::{Color, PieceKind, Square};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PieceRecord {
    pub kind: PieceKind,
    pub square: Square,
}

/// Live pieces of one side. The board keeps every record's square equal to
/// the grid position of that piece.
#[derive(Debug, Clone)]
pub struct PieceRoster {
    color: Color,
    pieces: Vec<PieceRecord>,
    king: Option<Square>,
}

impl PieceRoster {
    pub fn new(color: Color) -> Self {
        Self {
            color,
            pieces: Vec::with_capacity(16),
            king: None,
        }
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn king(&self) -> Option<Square> {
        self.king
    }

    pub fn len(&self) -> usize {
        self.pieces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PieceRecord> {
        self.pieces.iter()
    }

    /// Registers a piece. A second king is refused.
    pub fn add(&mut self, kind: PieceKind, square: Square) -> Result<(), ChessErrors> {
        if kind == PieceKind::King {
            if self.king.is_some() {
                return Err(ChessErrors::DuplicateKing(self.color));
            }
            self.king = Some(square);
        }
        self.pieces.push(PieceRecord { kind, square });
        Ok(())
    }

    /// Drops the record on `square`, clearing the king reference if needed.
    pub fn remove(&mut self, square: Square) -> Option<PieceRecord> {
        let index = self.pieces.iter().position(|p| p.square == square)?;
        let record = self.pieces.swap_remove(index);
        if record.kind == PieceKind::King {
            self.king = None;
        }
        Some(record)
    }

    pub fn relocate(&mut self, from: Square, to: Square) -> bool {
        let Some(record) = self.pieces.iter_mut().find(|p| p.square == from) else {
            return false;
        };
        record.square = to;
        if record.kind == PieceKind::King {
            self.king = Some(to);
        }
        true
    }

    pub fn count_kind(&self, kind: PieceKind) -> usize {
        self.pieces.iter().filter(|p| p.kind == kind).count()
    }
}
