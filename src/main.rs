//! Line-oriented driver over stdin.
//!
//! Commands:
//!   startpos                 reset to the starting position
//!   fen <six fields>         load a position
//!   move <lan> [<lan> ...]   apply moves such as e2e4 or e7e8q
//!   moves [square]           list legal moves, or destinations of one piece
//!   best [1|2]               search one or two plies and print the choice
//!   play [1|2]               search and apply the chosen move
//!   status                   ongoing, checkmate or stalemate
//!   perft <depth>            count leaf nodes
//!   show                     print the board and its FEN
//!   quit
//!
//! `--seed N` fixes the tie-break random source.

use std::io::{self, BufRead, Write};

use rand::rngs::StdRng;
use rand::SeedableRng;

use chess_core::chess_errors::ChessErrors;
use chess_core::game_state::board::Board;
use chess_core::game_state::chess_types::Square;
use chess_core::move_generation::attack_map::is_in_check;
use chess_core::move_generation::legal_move_apply::apply_move;
use chess_core::move_generation::legal_move_generator::{game_status, generate_legal_moves, legal_destinations};
use chess_core::move_generation::perft::perft;
use chess_core::search::board_scoring::evaluate_board;
use chess_core::search::shallow_search::{search_best_move, SearchDepth, SearchOutcome};

struct Session {
    board: Board,
    rng: StdRng,
}

enum Reply {
    Lines(Vec<String>),
    Quit,
}

impl Session {
    fn new(rng: StdRng) -> Self {
        Self {
            board: Board::new_game(),
            rng,
        }
    }

    fn handle(&mut self, line: &str) -> Result<Reply, ChessErrors> {
        let mut words = line.split_whitespace();
        let Some(command) = words.next() else {
            return Ok(Reply::Lines(Vec::new()));
        };
        let args: Vec<&str> = words.collect();

        let lines = match command {
            "quit" | "exit" => return Ok(Reply::Quit),
            "startpos" => {
                self.board = Board::new_game();
                vec![self.board.get_fen()]
            }
            "fen" => {
                self.board = Board::from_fen(&args.join(" "))?;
                vec![self.board.get_fen()]
            }
            "move" => {
                let applied = self.board.apply_moves(&args)?;
                vec![format!("applied {} move(s): {}", applied.len(), self.board.get_fen())]
            }
            "moves" => match args.first() {
                Some(square) => {
                    let from = Square::from_algebraic(square)?;
                    let destinations: Vec<String> = legal_destinations(&self.board, from)?
                        .iter()
                        .map(|s| s.to_string())
                        .collect();
                    vec![destinations.join(" ")]
                }
                None => {
                    let moves: Vec<String> = generate_legal_moves(&self.board)?
                        .iter()
                        .map(|m| m.to_string())
                        .collect();
                    vec![format!("{} legal: {}", moves.len(), moves.join(" "))]
                }
            },
            "best" | "play" => {
                let depth = match args.first() {
                    Some(text) => text
                        .parse::<u8>()
                        .ok()
                        .and_then(SearchDepth::from_plies)
                        .ok_or_else(|| ChessErrors::InvalidDepth((*text).to_owned()))?,
                    None => SearchDepth::default(),
                };
                let outcome = search_best_move(&self.board, depth, &mut self.rng)?;
                let mut lines = vec![describe_outcome(&outcome)];
                if let (true, Some(mv)) = (command == "play", outcome.best_move()) {
                    apply_move(&mut self.board, &mv)?;
                    lines.push(self.board.get_fen());
                }
                lines
            }
            "status" => {
                let status = game_status(&self.board)?;
                vec![format!(
                    "{:?} in_check={} eval={}",
                    status,
                    is_in_check(&self.board, self.board.side_to_move),
                    evaluate_board(&self.board)?
                )]
            }
            "perft" => {
                let depth = match args.first() {
                    Some(text) => text
                        .parse::<u8>()
                        .map_err(|_| ChessErrors::InvalidDepth((*text).to_owned()))?,
                    None => 1,
                };
                vec![format!("perft({}) = {}", depth, perft(&self.board, depth)?)]
            }
            "show" => vec![self.board.render(), self.board.get_fen()],
            other => vec![format!("unknown command: {other}")],
        };
        Ok(Reply::Lines(lines))
    }
}

fn describe_outcome(outcome: &SearchOutcome) -> String {
    match outcome {
        SearchOutcome::BestMove { chess_move, score, tied } => {
            format!("bestmove {} score {} tied {}", chess_move, score, tied)
        }
        SearchOutcome::Checkmate { winner } => format!("checkmate winner {:?}", winner),
        SearchOutcome::Stalemate => "stalemate".to_owned(),
    }
}

fn seed_from_args() -> Option<u64> {
    let args: Vec<String> = std::env::args().collect();
    args.iter()
        .position(|a| a == "--seed")
        .and_then(|i| args.get(i + 1))
        .and_then(|v| v.parse().ok())
}

fn main() -> io::Result<()> {
    let rng = match seed_from_args() {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let mut session = Session::new(rng);

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    for line in stdin.lock().lines() {
        let line = line?;
        match session.handle(line.trim()) {
            Ok(Reply::Quit) => break,
            Ok(Reply::Lines(lines)) => {
                for out in lines {
                    writeln!(stdout, "{out}")?;
                }
            }
            Err(e) => writeln!(stdout, "error: {e}")?,
        }
        stdout.flush()?;
    }
    Ok(())
}
