//! Errors used throughout the rules engine.
//!
//! `ChessErrors` is the single error type returned by board construction,
//! notation parsing, move resolution and move application. Parsing and input
//! variants are recoverable and suitable for presenting to a user; the
//! king-bookkeeping variants indicate a position that cannot be played.
//!
//! Terminal positions (checkmate, stalemate) are not errors. Search reports
//! them through `SearchOutcome` and the generator through `GameStatus`.

use thiserror::Error;

use crate::game_state::chess_types::{Color, Square};

/// Unified error type for the crate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChessErrors {
    /// A FEN string failed to parse. No partial board is ever returned.
    ///
    /// Payload: the name of the offending field and a description.
    #[error("invalid FEN {field}: {reason}")]
    InvalidFen { field: &'static str, reason: String },

    /// A square name such as "e4" could not be parsed.
    #[error("invalid square: {0:?}")]
    InvalidSquare(String),

    /// File or rank indices outside 0..=7.
    #[error("file/rank out of range: ({0}, {1})")]
    InvalidFileOrRank(i8, i8),

    /// A coordinate move string ("e2e4", "e7e8q") was malformed.
    #[error("invalid long algebraic move: {0:?}")]
    InvalidLongAlgebraic(String),

    /// The trailing promotion letter was not one of q, r, b, n.
    #[error("invalid promotion piece: {0:?}")]
    InvalidPromotionPiece(char),

    /// A well-formed move string that is not legal in the current position.
    #[error("illegal move: {0}")]
    IllegalMove(String),

    /// Tried to move from a square holding no piece.
    #[error("no piece on {0}")]
    EmptyStartSquare(Square),

    /// Tried to move a piece belonging to the waiting side.
    #[error("piece on {0} does not belong to the side to move")]
    WrongSideToMove(Square),

    /// A second king was placed for a side that already has one.
    #[error("{0:?} already has a king")]
    DuplicateKing(Color),

    /// A position was built without a king for one side.
    #[error("{0:?} has no king")]
    MissingKing(Color),

    /// The side to move has no legal moves.
    #[error("no legal moves available")]
    NoLegalMoves,

    /// A search or perft depth that is not a supported ply count.
    #[error("invalid depth: {0:?}")]
    InvalidDepth(String),

    /// An engine returned no move although legal moves exist.
    #[error("engine {0} returned no move")]
    EngineReturnedNoMove(String),
}
