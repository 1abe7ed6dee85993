//! Mutable chess position.
//!
//! `Board` owns the 8x8 grid, side to move, castling rights, en-passant
//! target, clocks and a roster per side. All piece placement goes through
//! `place_piece`, `remove_piece` and `move_piece`, which keep the grid and the
//! rosters in step.

use std::fmt;

use crate::chess_errors::ChessErrors;
use crate::game_state::chess_rules::CastlingRights;
use crate::game_state::chess_types::{Color, Piece, PieceKind, Square};
use crate::game_state::piece_roster::PieceRoster;
use crate::moves::chess_move::ChessMove;

const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

#[derive(Debug, Clone)]
pub struct Board {
    /// Indexed `[rank][file]`.
    grid: [[Piece; 8]; 8],
    pub side_to_move: Color,
    pub castling_rights: CastlingRights,
    pub en_passant_target: Option<Square>,
    pub halfmove_clock: u32,
    pub fullmove_number: u32,
    rosters: [PieceRoster; 2],
}

impl Board {
    /// A board with no pieces, white to move and no castling rights.
    pub fn empty() -> Self {
        Self {
            grid: [[Piece::Empty; 8]; 8],
            side_to_move: Color::White,
            castling_rights: CastlingRights::NONE,
            en_passant_target: None,
            halfmove_clock: 0,
            fullmove_number: 1,
            rosters: [PieceRoster::new(Color::White), PieceRoster::new(Color::Black)],
        }
    }

    /// The standard starting position.
    pub fn new_game() -> Self {
        let mut board = Self::empty();
        for color in [Color::White, Color::Black] {
            let pawn_rank = color.pawn_start_rank();
            let home_rank = color.home_rank();
            for (file, kind) in BACK_RANK.iter().enumerate() {
                let file = file as u8;
                board.put_fresh(Square::at(file, home_rank), Piece::new(color, *kind));
                board.put_fresh(Square::at(file, pawn_rank), Piece::new(color, PieceKind::Pawn));
            }
        }
        board.castling_rights = CastlingRights::ALL;
        board
    }

    pub fn from_fen(fen: &str) -> Result<Self, ChessErrors> {
        crate::utils::fen_parser::parse_fen(fen)
    }

    pub fn get_fen(&self) -> String {
        crate::utils::fen_generator::generate_fen(self)
    }

    #[inline]
    pub fn waiting_side(&self) -> Color {
        self.side_to_move.opposite()
    }

    #[inline]
    pub fn piece_at(&self, square: Square) -> Piece {
        self.grid[square.rank() as usize][square.file() as usize]
    }

    pub fn roster(&self, color: Color) -> &PieceRoster {
        &self.rosters[color.index()]
    }

    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.rosters[color.index()].king()
    }

    /// Puts `piece` on `square`, overwriting and returning any previous
    /// occupant. Placing a second king for a side is refused before any
    /// state changes.
    pub fn place_piece(&mut self, square: Square, piece: Piece) -> Result<Piece, ChessErrors> {
        if let Piece::Occupied { color, kind: PieceKind::King } = piece {
            let existing = self.king_square(color);
            if existing.is_some() && existing != Some(square) {
                return Err(ChessErrors::DuplicateKing(color));
            }
        }
        let previous = self.remove_piece(square);
        if let Piece::Occupied { color, kind } = piece {
            self.rosters[color.index()].add(kind, square)?;
        }
        self.set_grid(square, piece);
        Ok(previous)
    }

    /// Empties `square` and returns what was there.
    pub fn remove_piece(&mut self, square: Square) -> Piece {
        let previous = self.piece_at(square);
        if let Some(color) = previous.color() {
            self.rosters[color.index()].remove(square);
        }
        self.set_grid(square, Piece::Empty);
        previous
    }

    /// Moves the piece on `from` to `to`, capturing anything on `to`.
    pub fn move_piece(&mut self, from: Square, to: Square) -> Result<Piece, ChessErrors> {
        let moving = self.piece_at(from);
        let Some(color) = moving.color() else {
            return Err(ChessErrors::EmptyStartSquare(from));
        };
        let captured = self.remove_piece(to);
        self.set_grid(from, Piece::Empty);
        self.set_grid(to, moving);
        self.rosters[color.index()].relocate(from, to);
        Ok(captured)
    }

    /// Both sides must have exactly one king for the position to be playable.
    pub fn validate_kings(&self) -> Result<(), ChessErrors> {
        for color in [Color::White, Color::Black] {
            if self.king_square(color).is_none() {
                return Err(ChessErrors::MissingKing(color));
            }
        }
        Ok(())
    }

    /// Resolves and applies each move string in order. Stops at the first
    /// error, leaving the moves before it applied.
    pub fn apply_moves<S: AsRef<str>>(&mut self, moves: &[S]) -> Result<Vec<ChessMove>, ChessErrors> {
        let mut applied = Vec::with_capacity(moves.len());
        for text in moves {
            let mv = crate::utils::long_algebraic::resolve_long_algebraic(self, text.as_ref())?;
            crate::move_generation::legal_move_apply::apply_move(self, &mv)?;
            applied.push(mv);
        }
        Ok(applied)
    }

    /// Plain-text diagram, rank 8 at the top.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for rank in (0..8u8).rev() {
            out.push(char::from(b'1' + rank));
            out.push(' ');
            for file in 0..8u8 {
                let piece = self.piece_at(Square::at(file, rank));
                out.push(piece.to_fen_char().unwrap_or('.'));
                if file < 7 {
                    out.push(' ');
                }
            }
            out.push('\n');
        }
        out.push_str("  a b c d e f g h\n");
        out
    }

    fn set_grid(&mut self, square: Square, piece: Piece) {
        self.grid[square.rank() as usize][square.file() as usize] = piece;
    }

    /// Setup-only placement on a square known to be empty.
    fn put_fresh(&mut self, square: Square, piece: Piece) {
        if let Piece::Occupied { color, kind } = piece {
            self.set_grid(square, piece);
            // Setup squares are distinct and hold one king per side.
            let _ = self.rosters[color.index()].add(kind, square);
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new_game()
    }
}

/// Positions compare by grid and FEN state. Roster order is bookkeeping and
/// does not take part.
impl PartialEq for Board {
    fn eq(&self, other: &Self) -> bool {
        self.grid == other.grid
            && self.side_to_move == other.side_to_move
            && self.castling_rights == other.castling_rights
            && self.en_passant_target == other.en_passant_target
            && self.halfmove_clock == other.halfmove_clock
            && self.fullmove_number == other.fullmove_number
    }
}

impl Eq for Board {}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}
