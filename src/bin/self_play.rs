//! Standalone engine-vs-engine series runner.
//!
//! Run with:
//! `cargo run --release --bin self_play`
//! `cargo run --release --bin self_play -- --verbose --games 20 --seed 7`
//! `cargo run --release --bin self_play -- --player1 greedy --player2 random`

use chess_core::chess_errors::ChessErrors;
use chess_core::engines::engine_trait::{engine_from_name, Engine, ENGINE_NAMES};
use chess_core::utils::engine_match_harness::{play_engine_match_series, MatchConfig, MatchSeriesConfig};

fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .map(String::as_str)
}

fn main() -> Result<(), ChessErrors> {
    let args: Vec<String> = std::env::args().collect();
    let verbose = args.iter().any(|a| a == "--verbose" || a == "-v");
    let games = flag_value(&args, "--games")
        .and_then(|v| v.parse().ok())
        .unwrap_or(10);
    let base_seed = flag_value(&args, "--seed")
        .and_then(|v| v.parse().ok())
        .unwrap_or(1234);
    let player1_name = flag_value(&args, "--player1").unwrap_or("two_ply").to_owned();
    let player2_name = flag_value(&args, "--player2").unwrap_or("greedy").to_owned();

    for name in [&player1_name, &player2_name] {
        if engine_from_name(name, 0).is_none() {
            eprintln!("unknown engine {name:?}; choose one of {ENGINE_NAMES:?}");
            std::process::exit(2);
        }
    }

    let factory = |name: String| {
        move |seed: u64| -> Box<dyn Engine> {
            engine_from_name(&name, seed).unwrap_or_else(|| {
                Box::new(chess_core::engines::engine_random::RandomEngine::with_seed(seed))
            })
        }
    };

    let stats = play_engine_match_series(
        factory(player1_name.clone()),
        factory(player2_name.clone()),
        &MatchSeriesConfig {
            games,
            base_seed,
            per_game: MatchConfig {
                max_plies: 200,
                opening_random_plies: 4,
                verbose,
            },
        },
    )?;

    println!("player1={} player2={}", player1_name, player2_name);
    println!("{}", stats.report());
    println!("outcomes: {:?}", stats.outcomes);
    Ok(())
}
