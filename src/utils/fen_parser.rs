//! FEN-to-Board parser.
//!
//! Builds a fully-populated board, rosters included, from a Forsyth-Edwards
//! Notation string. Any malformed field yields an error; a partial board is
//! never returned.

use crate::chess_errors::ChessErrors;
use crate::game_state::board::Board;
use crate::game_state::chess_rules::{CastleSide, CastlingRights};
use crate::game_state::chess_types::{Color, Piece, PieceKind, Square};
use crate::move_generation::attack_map::is_in_check;

fn fen_error(field: &'static str, reason: impl Into<String>) -> ChessErrors {
    ChessErrors::InvalidFen {
        field,
        reason: reason.into(),
    }
}

pub fn parse_fen(fen: &str) -> Result<Board, ChessErrors> {
    let mut parts = fen.split_whitespace();

    let board_part = parts.next().ok_or_else(|| fen_error("placement", "missing"))?;
    let side_part = parts.next().ok_or_else(|| fen_error("side to move", "missing"))?;
    let castling_part = parts.next().ok_or_else(|| fen_error("castling", "missing"))?;
    let en_passant_part = parts.next().ok_or_else(|| fen_error("en passant", "missing"))?;
    let halfmove_part = parts.next().ok_or_else(|| fen_error("halfmove clock", "missing"))?;
    let fullmove_part = parts.next().ok_or_else(|| fen_error("fullmove number", "missing"))?;

    if parts.next().is_some() {
        return Err(fen_error("record", "extra trailing fields"));
    }

    let mut board = Board::empty();

    parse_placement(board_part, &mut board)?;
    board.validate_kings()?;
    board.side_to_move = parse_side_to_move(side_part)?;
    board.castling_rights = parse_castling_rights(castling_part)?;
    board.en_passant_target = parse_en_passant_target(en_passant_part, &board)?;
    board.halfmove_clock = parse_counter("halfmove clock", halfmove_part)?;
    board.fullmove_number = parse_counter("fullmove number", fullmove_part)?;
    if board.fullmove_number == 0 {
        return Err(fen_error("fullmove number", "must start at 1"));
    }

    // The side that just moved cannot have left its own king attacked.
    let waiting = board.waiting_side();
    if is_in_check(&board, waiting) {
        return Err(fen_error(
            "placement",
            format!("{waiting:?} is in check but not to move"),
        ));
    }

    Ok(board)
}

/// Plain decimal digits only, so the generator writes the field back unchanged.
fn parse_counter(field: &'static str, text: &str) -> Result<u32, ChessErrors> {
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return Err(fen_error(field, format!("not a number: {text}")));
    }
    text.parse::<u32>()
        .map_err(|_| fen_error(field, format!("out of range: {text}")))
}

fn parse_placement(board_part: &str, board: &mut Board) -> Result<(), ChessErrors> {
    let ranks: Vec<&str> = board_part.split('/').collect();
    if ranks.len() != 8 {
        return Err(fen_error(
            "placement",
            format!("expected 8 ranks, found {}", ranks.len()),
        ));
    }

    for (fen_rank_idx, rank_str) in ranks.iter().enumerate() {
        let rank = 7 - fen_rank_idx as i8;
        let mut file: i8 = 0;

        for ch in rank_str.chars() {
            if let Some(empty_count) = ch.to_digit(10) {
                if !(1..=8).contains(&empty_count) {
                    return Err(fen_error("placement", format!("invalid empty-square count '{ch}'")));
                }
                file += empty_count as i8;
                if file > 8 {
                    return Err(fen_error("placement", format!("rank {} has too many files", rank + 1)));
                }
                continue;
            }

            let piece = Piece::from_fen_char(ch)
                .ok_or_else(|| fen_error("placement", format!("invalid piece character '{ch}'")))?;
            let square = Square::try_new(file, rank)
                .ok_or_else(|| fen_error("placement", format!("rank {} has too many files", rank + 1)))?;
            board.place_piece(square, piece)?;
            file += 1;
        }

        if file != 8 {
            return Err(fen_error(
                "placement",
                format!("rank {} does not sum to 8 files", rank + 1),
            ));
        }
    }

    Ok(())
}

fn parse_side_to_move(side_part: &str) -> Result<Color, ChessErrors> {
    match side_part {
        "w" => Ok(Color::White),
        "b" => Ok(Color::Black),
        _ => Err(fen_error("side to move", format!("expected 'w' or 'b', found {side_part:?}"))),
    }
}

fn parse_castling_rights(castling_part: &str) -> Result<CastlingRights, ChessErrors> {
    let mut rights = CastlingRights::NONE;
    if castling_part == "-" {
        return Ok(rights);
    }

    for ch in castling_part.chars() {
        let (color, side) = match ch {
            'K' => (Color::White, CastleSide::Kingside),
            'Q' => (Color::White, CastleSide::Queenside),
            'k' => (Color::Black, CastleSide::Kingside),
            'q' => (Color::Black, CastleSide::Queenside),
            _ => return Err(fen_error("castling", format!("invalid character '{ch}'"))),
        };
        if rights.has(color, side) {
            return Err(fen_error("castling", format!("repeated character '{ch}'")));
        }
        rights.set(color, side);
    }

    Ok(rights)
}

/// The target must sit directly behind a pawn of the side that just moved.
fn parse_en_passant_target(en_passant_part: &str, board: &Board) -> Result<Option<Square>, ChessErrors> {
    if en_passant_part == "-" {
        return Ok(None);
    }

    let target = Square::from_algebraic(en_passant_part)
        .map_err(|_| fen_error("en passant", format!("invalid square {en_passant_part:?}")))?;

    let pusher = board.side_to_move.opposite();
    let expected_rank = match pusher {
        Color::White => 2,
        Color::Black => 5,
    };
    if target.rank() != expected_rank {
        return Err(fen_error(
            "en passant",
            format!("{target} is not on the skipped rank for {pusher:?}"),
        ));
    }

    let pawn_square = target
        .offset(0, pusher.forward())
        .ok_or_else(|| fen_error("en passant", format!("{target} has no pawn square")))?;
    if board.piece_at(pawn_square) != Piece::new(pusher, PieceKind::Pawn) {
        return Err(fen_error(
            "en passant",
            format!("no {pusher:?} pawn on {pawn_square} behind {target}"),
        ));
    }

    Ok(Some(target))
}
