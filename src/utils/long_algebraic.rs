//! Coordinate move notation ("e2e4", "e7e8q").
//!
//! Strings carry only origin, destination and an optional promotion letter.
//! Capture, castling and en passant flags come from resolving the string
//! against the legal moves of a position.

use crate::chess_errors::ChessErrors;
use crate::game_state::board::Board;
use crate::game_state::chess_types::{PieceKind, Square, PROMOTION_KINDS};
use crate::move_generation::legal_move_generator::generate_legal_moves_from;
use crate::moves::chess_move::ChessMove;

/// Origin, destination and promotion parsed from a move string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveText {
    pub start: Square,
    pub end: Square,
    pub promotion: Option<PieceKind>,
}

pub fn parse_long_algebraic(text: &str) -> Result<MoveText, ChessErrors> {
    let text = text.trim();
    if !text.is_ascii() || !(4..=5).contains(&text.len()) {
        return Err(ChessErrors::InvalidLongAlgebraic(text.to_owned()));
    }

    let start = Square::from_algebraic(&text[0..2])
        .map_err(|_| ChessErrors::InvalidLongAlgebraic(text.to_owned()))?;
    let end = Square::from_algebraic(&text[2..4])
        .map_err(|_| ChessErrors::InvalidLongAlgebraic(text.to_owned()))?;

    let promotion = match text[4..].chars().next() {
        None => None,
        Some(ch) => {
            let kind = PieceKind::from_char(ch)
                .filter(|k| PROMOTION_KINDS.contains(k))
                .ok_or(ChessErrors::InvalidPromotionPiece(ch))?;
            Some(kind)
        }
    };

    Ok(MoveText { start, end, promotion })
}

/// Finds the legal move of `board` that `text` names.
pub fn resolve_long_algebraic(board: &Board, text: &str) -> Result<ChessMove, ChessErrors> {
    let parsed = parse_long_algebraic(text)?;

    let piece = board.piece_at(parsed.start);
    match piece.color() {
        None => return Err(ChessErrors::EmptyStartSquare(parsed.start)),
        Some(color) if color != board.side_to_move => {
            return Err(ChessErrors::WrongSideToMove(parsed.start))
        }
        Some(_) => {}
    }

    generate_legal_moves_from(board, parsed.start)?
        .into_iter()
        .find(|mv| mv.end == parsed.end && mv.promotion == parsed.promotion)
        .ok_or_else(|| ChessErrors::IllegalMove(text.trim().to_owned()))
}

pub fn move_to_long_algebraic(mv: &ChessMove) -> String {
    mv.to_long_algebraic()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::chess_rules::CastleSide;

    fn sq(name: &str) -> Square {
        Square::from_algebraic(name).unwrap()
    }

    #[test]
    fn parses_plain_and_promotion_moves() {
        let plain = parse_long_algebraic("e2e4").unwrap();
        assert_eq!((plain.start, plain.end, plain.promotion), (sq("e2"), sq("e4"), None));
        let promo = parse_long_algebraic("e7e8n").unwrap();
        assert_eq!(promo.promotion, Some(PieceKind::Knight));
        let upper = parse_long_algebraic("e7e8Q").unwrap();
        assert_eq!(upper.promotion, Some(PieceKind::Queen));
    }

    #[test]
    fn rejects_malformed_strings() {
        for bad in ["", "e2", "e2e", "e2e4qq", "z2e4", "e2e9", "é2e4"] {
            assert!(
                matches!(parse_long_algebraic(bad), Err(ChessErrors::InvalidLongAlgebraic(_))),
                "{bad:?}"
            );
        }
        assert_eq!(
            parse_long_algebraic("e7e8k"),
            Err(ChessErrors::InvalidPromotionPiece('k'))
        );
        assert_eq!(
            parse_long_algebraic("e7e8x"),
            Err(ChessErrors::InvalidPromotionPiece('x'))
        );
    }

    #[test]
    fn resolves_flags_from_position() {
        let board = Board::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
        let castle = resolve_long_algebraic(&board, "e1g1").unwrap();
        assert_eq!(castle.castle, Some(CastleSide::Kingside));
        let capture = resolve_long_algebraic(&board, "a1a8").unwrap();
        assert!(capture.is_capture);
        assert_eq!(move_to_long_algebraic(&capture), "a1a8");
    }

    #[test]
    fn reports_why_a_move_cannot_be_resolved() {
        let board = Board::new_game();
        assert_eq!(
            resolve_long_algebraic(&board, "e4e5"),
            Err(ChessErrors::EmptyStartSquare(sq("e4")))
        );
        assert_eq!(
            resolve_long_algebraic(&board, "e7e5"),
            Err(ChessErrors::WrongSideToMove(sq("e7")))
        );
        assert_eq!(
            resolve_long_algebraic(&board, "e2e5"),
            Err(ChessErrors::IllegalMove("e2e5".to_owned()))
        );
    }

    #[test]
    fn promotion_letter_is_required_on_last_rank() {
        let board = Board::from_fen("4k3/P7/8/8/8/8/8/4K3 w - - 0 1").unwrap();
        assert!(matches!(
            resolve_long_algebraic(&board, "a7a8"),
            Err(ChessErrors::IllegalMove(_))
        ));
        assert!(resolve_long_algebraic(&board, "a7a8r").is_ok());
    }
}
