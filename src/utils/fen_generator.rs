//! Board-to-FEN serializer, the exact inverse of `fen_parser`.

use crate::game_state::board::Board;
use crate::game_state::chess_rules::CastlingRights;
use crate::game_state::chess_types::{Color, Square};

pub fn generate_fen(board: &Board) -> String {
    let mut fen = String::with_capacity(90);

    for rank in (0..8u8).rev() {
        let mut empty_run = 0u8;
        for file in 0..8u8 {
            match board.piece_at(Square::at(file, rank)).to_fen_char() {
                Some(ch) => {
                    if empty_run > 0 {
                        fen.push(char::from(b'0' + empty_run));
                        empty_run = 0;
                    }
                    fen.push(ch);
                }
                None => empty_run += 1,
            }
        }
        if empty_run > 0 {
            fen.push(char::from(b'0' + empty_run));
        }
        if rank > 0 {
            fen.push('/');
        }
    }

    fen.push(' ');
    fen.push(match board.side_to_move {
        Color::White => 'w',
        Color::Black => 'b',
    });

    fen.push(' ');
    fen.push_str(&castling_field(&board.castling_rights));

    fen.push(' ');
    match board.en_passant_target {
        Some(square) => fen.push_str(&square.to_algebraic()),
        None => fen.push('-'),
    }

    fen.push_str(&format!(" {} {}", board.halfmove_clock, board.fullmove_number));
    fen
}

fn castling_field(rights: &CastlingRights) -> String {
    if rights.is_empty() {
        return "-".to_owned();
    }
    let mut out = String::with_capacity(4);
    if rights.white_kingside {
        out.push('K');
    }
    if rights.white_queenside {
        out.push('Q');
    }
    if rights.black_kingside {
        out.push('k');
    }
    if rights.black_queenside {
        out.push('q');
    }
    out
}
