//! Head-to-head engine match harness for local testing.
//!
//! Runs two `Engine` implementations against each other with an optional
//! seeded random opening prefix, and aggregates results over a series.
//! Games end on checkmate, stalemate, the fifty-move rule or a ply cap.

use chrono::{DateTime, Local};
use rand::prelude::IndexedRandom;
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::time::Instant;

use crate::chess_errors::ChessErrors;
use crate::engines::engine_trait::Engine;
use crate::game_state::board::Board;
use crate::game_state::chess_rules::FIFTY_MOVE_HALFMOVE_LIMIT;
use crate::game_state::chess_types::Color;
use crate::move_generation::legal_move_apply::apply_move;
use crate::move_generation::legal_move_generator::{generate_legal_moves, terminal_status, GameStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchOutcome {
    WhiteWinCheckmate,
    BlackWinCheckmate,
    DrawStalemate,
    DrawFiftyMoveRule,
    DrawMaxPlies,
}

impl MatchOutcome {
    pub fn winner(self) -> Option<Color> {
        match self {
            MatchOutcome::WhiteWinCheckmate => Some(Color::White),
            MatchOutcome::BlackWinCheckmate => Some(Color::Black),
            _ => None,
        }
    }

    pub fn reason(self) -> &'static str {
        match self {
            MatchOutcome::WhiteWinCheckmate | MatchOutcome::BlackWinCheckmate => "checkmate",
            MatchOutcome::DrawStalemate => "stalemate",
            MatchOutcome::DrawFiftyMoveRule => "fifty-move rule",
            MatchOutcome::DrawMaxPlies => "ply limit",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerId {
    Player1,
    Player2,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeriesOutcome {
    PlayerWinCheckmate { player: PlayerId, color: Color },
    DrawStalemate,
    DrawFiftyMoveRule,
    DrawMaxPlies,
}

#[derive(Debug, Clone)]
pub struct MatchConfig {
    pub max_plies: u16,
    /// Uniformly random plies played before the engines take over.
    pub opening_random_plies: u8,
    pub verbose: bool,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            max_plies: 300,
            opening_random_plies: 4,
            verbose: false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct MatchResult {
    pub outcome: MatchOutcome,
    pub final_board: Board,
    pub opening_moves_lan: Vec<String>,
    pub played_moves_lan: Vec<String>,
    pub white_move_count: u32,
    pub black_move_count: u32,
    pub white_total_time_ns: u128,
    pub black_total_time_ns: u128,
    pub started_at: DateTime<Local>,
    pub finished_at: DateTime<Local>,
}

impl MatchResult {
    pub fn total_plies(&self) -> usize {
        self.opening_moves_lan.len() + self.played_moves_lan.len()
    }
}

#[derive(Debug, Clone)]
pub struct MatchSeriesConfig {
    pub games: u16,
    pub base_seed: u64,
    pub per_game: MatchConfig,
}

impl Default for MatchSeriesConfig {
    fn default() -> Self {
        Self {
            games: 10,
            base_seed: 0,
            per_game: MatchConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct MatchSeriesStats {
    pub games: u16,
    pub player1_wins: u16,
    pub player2_wins: u16,
    pub draws: u16,
    pub checkmates: u16,
    pub stalemates: u16,
    pub fifty_move_draws: u16,
    pub max_ply_draws: u16,
    pub outcomes: Vec<SeriesOutcome>,
    /// Plies per game, in play order.
    pub game_lengths: Vec<usize>,
    pub player1_moves: u32,
    pub player2_moves: u32,
    pub player1_total_time_ns: u128,
    pub player2_total_time_ns: u128,
    pub player1_avg_move_time_ms: f64,
    pub player2_avg_move_time_ms: f64,
}

impl MatchSeriesStats {
    pub fn average_game_length(&self) -> f64 {
        if self.game_lengths.is_empty() {
            0.0
        } else {
            self.game_lengths.iter().sum::<usize>() as f64 / self.game_lengths.len() as f64
        }
    }

    pub fn report(&self) -> String {
        format!(
            "games={} player1_wins={} player2_wins={} draws={} checkmates={} stalemates={} fifty_move={} max_plies={} avg_plies={:.1} p1_avg_ms={:.3} p2_avg_ms={:.3}",
            self.games,
            self.player1_wins,
            self.player2_wins,
            self.draws,
            self.checkmates,
            self.stalemates,
            self.fifty_move_draws,
            self.max_ply_draws,
            self.average_game_length(),
            self.player1_avg_move_time_ms,
            self.player2_avg_move_time_ms,
        )
    }

    fn record(&mut self, outcome: MatchOutcome, player1_is_white: bool) {
        let mapped = match outcome.winner() {
            Some(color) => {
                let player = if (color == Color::White) == player1_is_white {
                    self.player1_wins += 1;
                    PlayerId::Player1
                } else {
                    self.player2_wins += 1;
                    PlayerId::Player2
                };
                self.checkmates += 1;
                SeriesOutcome::PlayerWinCheckmate { player, color }
            }
            None => {
                self.draws += 1;
                match outcome {
                    MatchOutcome::DrawFiftyMoveRule => {
                        self.fifty_move_draws += 1;
                        SeriesOutcome::DrawFiftyMoveRule
                    }
                    MatchOutcome::DrawMaxPlies => {
                        self.max_ply_draws += 1;
                        SeriesOutcome::DrawMaxPlies
                    }
                    _ => {
                        self.stalemates += 1;
                        SeriesOutcome::DrawStalemate
                    }
                }
            }
        };
        self.outcomes.push(mapped);
    }
}

fn log_line(verbose: bool, message: &str) {
    if verbose {
        println!("[{}] {}", Local::now().format("%Y-%m-%d %H:%M:%S%.3f"), message);
    }
}

/// Play a single seeded engine-vs-engine match from the starting position.
pub fn play_engine_match(
    engine_white: &mut dyn Engine,
    engine_black: &mut dyn Engine,
    seed: u64,
    config: &MatchConfig,
) -> Result<MatchResult, ChessErrors> {
    play_engine_match_from_board(Board::new_game(), engine_white, engine_black, seed, config)
}

/// Play a single match from a caller-provided position.
pub fn play_engine_match_from_board(
    mut board: Board,
    engine_white: &mut dyn Engine,
    engine_black: &mut dyn Engine,
    seed: u64,
    config: &MatchConfig,
) -> Result<MatchResult, ChessErrors> {
    let started_at = Local::now();
    engine_white.new_game();
    engine_black.new_game();

    let opening_moves_lan = apply_seeded_random_opening(&mut board, seed, config.opening_random_plies)?;
    if !opening_moves_lan.is_empty() {
        log_line(
            config.verbose,
            &format!("[match] seed={} opening {}", seed, opening_moves_lan.join(" ")),
        );
    }

    let mut played_moves_lan = Vec::<String>::new();
    let mut white_move_count = 0u32;
    let mut black_move_count = 0u32;
    let mut white_total_time_ns = 0u128;
    let mut black_total_time_ns = 0u128;
    let mut outcome = MatchOutcome::DrawMaxPlies;

    for _ in 0..config.max_plies {
        let legal_moves = generate_legal_moves(&board)?;
        if legal_moves.is_empty() {
            outcome = match terminal_status(&board) {
                GameStatus::Checkmate { winner: Color::White } => MatchOutcome::WhiteWinCheckmate,
                GameStatus::Checkmate { winner: Color::Black } => MatchOutcome::BlackWinCheckmate,
                _ => MatchOutcome::DrawStalemate,
            };
            break;
        }
        if board.halfmove_clock >= FIFTY_MOVE_HALFMOVE_LIMIT {
            outcome = MatchOutcome::DrawFiftyMoveRule;
            break;
        }

        let mover = board.side_to_move;
        let started = Instant::now();
        let engine: &mut dyn Engine = match mover {
            Color::White => &mut *engine_white,
            Color::Black => &mut *engine_black,
        };
        let out = engine.choose_move(&board)?;
        let elapsed_ns = started.elapsed().as_nanos();

        match mover {
            Color::White => {
                white_move_count = white_move_count.saturating_add(1);
                white_total_time_ns = white_total_time_ns.saturating_add(elapsed_ns);
            }
            Color::Black => {
                black_move_count = black_move_count.saturating_add(1);
                black_total_time_ns = black_total_time_ns.saturating_add(elapsed_ns);
            }
        }

        let chosen = out
            .best_move
            .ok_or_else(|| ChessErrors::EngineReturnedNoMove(engine.name().to_owned()))?;
        if !legal_moves.contains(&chosen) {
            return Err(ChessErrors::IllegalMove(chosen.to_string()));
        }

        played_moves_lan.push(chosen.to_string());
        apply_move(&mut board, &chosen)?;
    }

    let result = MatchResult {
        outcome,
        final_board: board,
        opening_moves_lan,
        played_moves_lan,
        white_move_count,
        black_move_count,
        white_total_time_ns,
        black_total_time_ns,
        started_at,
        finished_at: Local::now(),
    };
    log_line(
        config.verbose,
        &format!(
            "[match] seed={} result={:?} plies={} final={}",
            seed,
            result.outcome,
            result.total_plies(),
            result.final_board.get_fen()
        ),
    );
    Ok(result)
}

/// Play a series of matches and aggregate win/loss/draw statistics.
///
/// Factories receive a per-game seed. Player colors are drawn per game,
/// deterministically from `base_seed`.
pub fn play_engine_match_series<F1, F2>(
    player1_factory: F1,
    player2_factory: F2,
    config: &MatchSeriesConfig,
) -> Result<MatchSeriesStats, ChessErrors>
where
    F1: Fn(u64) -> Box<dyn Engine>,
    F2: Fn(u64) -> Box<dyn Engine>,
{
    let mut stats = MatchSeriesStats {
        games: config.games,
        ..MatchSeriesStats::default()
    };
    let mut color_rng = StdRng::seed_from_u64(config.base_seed ^ 0xA5A5_5A5A_0123_4567);
    let verbose = config.per_game.verbose;

    for i in 0..config.games {
        let player1_is_white = color_rng.random_bool(0.5);
        let seed = config.base_seed.wrapping_add(u64::from(i));
        let mut player1 = player1_factory(seed);
        let mut player2 = player2_factory(seed.wrapping_add(1));
        log_line(
            verbose,
            &format!(
                "[series] game {}/{} seed={} white={} black={}",
                i + 1,
                config.games,
                seed,
                if player1_is_white { player1.name() } else { player2.name() },
                if player1_is_white { player2.name() } else { player1.name() },
            ),
        );

        let result = if player1_is_white {
            play_engine_match(player1.as_mut(), player2.as_mut(), seed, &config.per_game)?
        } else {
            play_engine_match(player2.as_mut(), player1.as_mut(), seed, &config.per_game)?
        };

        let (p1_moves, p2_moves, p1_ns, p2_ns) = if player1_is_white {
            (
                result.white_move_count,
                result.black_move_count,
                result.white_total_time_ns,
                result.black_total_time_ns,
            )
        } else {
            (
                result.black_move_count,
                result.white_move_count,
                result.black_total_time_ns,
                result.white_total_time_ns,
            )
        };
        stats.player1_moves = stats.player1_moves.saturating_add(p1_moves);
        stats.player2_moves = stats.player2_moves.saturating_add(p2_moves);
        stats.player1_total_time_ns = stats.player1_total_time_ns.saturating_add(p1_ns);
        stats.player2_total_time_ns = stats.player2_total_time_ns.saturating_add(p2_ns);

        stats.record(result.outcome, player1_is_white);
        stats.game_lengths.push(result.total_plies());

        log_line(
            verbose,
            &format!(
                "[series] game {}/{} result={} p1_wins={} p2_wins={} draws={}",
                i + 1,
                config.games,
                result.outcome.reason(),
                stats.player1_wins,
                stats.player2_wins,
                stats.draws
            ),
        );
    }

    stats.player1_avg_move_time_ms = avg_ns_per_move_ms(stats.player1_total_time_ns, stats.player1_moves);
    stats.player2_avg_move_time_ms = avg_ns_per_move_ms(stats.player2_total_time_ns, stats.player2_moves);

    Ok(stats)
}

#[inline]
fn avg_ns_per_move_ms(total_ns: u128, moves: u32) -> f64 {
    if moves == 0 {
        0.0
    } else {
        (total_ns as f64) / (moves as f64) / 1_000_000.0
    }
}

fn apply_seeded_random_opening(board: &mut Board, seed: u64, plies: u8) -> Result<Vec<String>, ChessErrors> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut opening_moves_lan = Vec::<String>::new();

    for _ in 0..plies {
        let legal_moves = generate_legal_moves(board)?;
        let Some(chosen) = legal_moves.as_slice().choose(&mut rng).copied() else {
            break;
        };
        opening_moves_lan.push(chosen.to_string());
        apply_move(board, &chosen)?;
    }

    Ok(opening_moves_lan)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engines::engine_greedy::GreedyEngine;
    use crate::engines::engine_random::RandomEngine;
    use crate::engines::engine_trait::EngineOutput;
    use crate::game_state::chess_types::Square;
    use crate::moves::chess_move::ChessMove;

    struct IllegalEngine;

    impl Engine for IllegalEngine {
        fn name(&self) -> &str {
            "illegal"
        }

        fn choose_move(&mut self, _board: &Board) -> Result<EngineOutput, ChessErrors> {
            let a1 = Square::from_algebraic("a1")?;
            let h8 = Square::from_algebraic("h8")?;
            Ok(EngineOutput {
                best_move: Some(ChessMove::new(a1, h8, false)),
                info_lines: Vec::new(),
            })
        }
    }

    struct SilentEngine;

    impl Engine for SilentEngine {
        fn name(&self) -> &str {
            "silent"
        }

        fn choose_move(&mut self, _board: &Board) -> Result<EngineOutput, ChessErrors> {
            Ok(EngineOutput::default())
        }
    }

    fn quiet(max_plies: u16, opening: u8) -> MatchConfig {
        MatchConfig {
            max_plies,
            opening_random_plies: opening,
            verbose: false,
        }
    }

    #[test]
    fn detects_checkmate_at_start() {
        let mated =
            Board::from_fen("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3").unwrap();
        let mut white = RandomEngine::with_seed(1);
        let mut black = RandomEngine::with_seed(2);
        let result = play_engine_match_from_board(mated, &mut white, &mut black, 0, &quiet(10, 0)).unwrap();
        assert_eq!(result.outcome, MatchOutcome::BlackWinCheckmate);
        assert_eq!(result.outcome.winner(), Some(Color::Black));
        assert_eq!(result.total_plies(), 0);
        assert!(result.finished_at >= result.started_at);
    }

    #[test]
    fn fifty_move_rule_ends_game() {
        let board = Board::from_fen("4k3/8/8/8/8/8/8/R3K3 w - - 100 80").unwrap();
        let mut white = RandomEngine::with_seed(1);
        let mut black = RandomEngine::with_seed(2);
        let result = play_engine_match_from_board(board, &mut white, &mut black, 0, &quiet(10, 0)).unwrap();
        assert_eq!(result.outcome, MatchOutcome::DrawFiftyMoveRule);
        assert_eq!(result.outcome.reason(), "fifty-move rule");
    }

    #[test]
    fn ply_cap_ends_game() {
        let mut white = RandomEngine::with_seed(1);
        let mut black = RandomEngine::with_seed(2);
        let result = play_engine_match(&mut white, &mut black, 5, &quiet(6, 2)).unwrap();
        assert_eq!(result.outcome, MatchOutcome::DrawMaxPlies);
        assert_eq!(result.opening_moves_lan.len(), 2);
        assert_eq!(result.played_moves_lan.len(), 6);
        assert_eq!(result.white_move_count + result.black_move_count, 6);
    }

    #[test]
    fn same_seed_replays_same_game() {
        let run = || {
            let mut white = GreedyEngine::with_seed(3);
            let mut black = RandomEngine::with_seed(4);
            play_engine_match(&mut white, &mut black, 77, &quiet(20, 4)).unwrap()
        };
        let a = run();
        let b = run();
        assert_eq!(a.opening_moves_lan, b.opening_moves_lan);
        assert_eq!(a.played_moves_lan, b.played_moves_lan);
        assert_eq!(a.final_board, b.final_board);
    }

    #[test]
    fn illegal_engine_move_is_an_error() {
        let mut white = IllegalEngine;
        let mut black = RandomEngine::with_seed(2);
        let result = play_engine_match(&mut white, &mut black, 0, &quiet(4, 0));
        assert!(matches!(result, Err(ChessErrors::IllegalMove(_))));
    }

    #[test]
    fn engine_without_a_move_is_an_error() {
        let mut white = RandomEngine::with_seed(1);
        let mut black = SilentEngine;
        let result = play_engine_match(&mut white, &mut black, 0, &quiet(4, 0));
        assert_eq!(result.err(), Some(ChessErrors::EngineReturnedNoMove("silent".to_owned())));
    }

    #[test]
    fn series_tallies_every_game() {
        let config = MatchSeriesConfig {
            games: 3,
            base_seed: 9,
            per_game: quiet(12, 2),
        };
        let stats = play_engine_match_series(
            |seed| Box::new(GreedyEngine::with_seed(seed)) as Box<dyn Engine>,
            |seed| Box::new(RandomEngine::with_seed(seed)) as Box<dyn Engine>,
            &config,
        )
        .unwrap();
        assert_eq!(stats.outcomes.len(), 3);
        assert_eq!(stats.game_lengths.len(), 3);
        assert_eq!(stats.player1_wins + stats.player2_wins + stats.draws, 3);
        assert_eq!(
            stats.checkmates + stats.stalemates + stats.fifty_move_draws + stats.max_ply_draws,
            3
        );
        assert!(stats.report().starts_with("games=3 "));
    }

    #[test]
    fn record_maps_colors_to_players() {
        let mut stats = MatchSeriesStats::default();
        stats.record(MatchOutcome::BlackWinCheckmate, true);
        stats.record(MatchOutcome::BlackWinCheckmate, false);
        stats.record(MatchOutcome::DrawStalemate, true);
        assert_eq!(stats.player1_wins, 1);
        assert_eq!(stats.player2_wins, 1);
        assert_eq!(stats.stalemates, 1);
        assert_eq!(
            stats.outcomes[0],
            SeriesOutcome::PlayerWinCheckmate {
                player: PlayerId::Player2,
                color: Color::Black
            }
        );
    }
}
