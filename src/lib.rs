//! Crate root module declarations for the chess rules engine.
//!
//! This file exposes all top-level subsystems (game state, move generation,
//! evaluation and search, engines, and notation helpers) so binaries, benches
//! and external tooling can import stable module paths.

pub mod chess_errors;

pub mod game_state {
    pub mod board;
    pub mod chess_rules;
    pub mod chess_types;
    pub mod piece_roster;
}

pub mod moves {
    pub mod chess_move;
    pub mod movement_tables;
}

pub mod move_generation {
    pub mod attack_map;
    pub mod legal_move_apply;
    pub mod legal_move_generator;
    pub mod perft;
    pub mod pseudo_legal_moves;
}

pub mod search {
    pub mod board_scoring;
    pub mod shallow_search;
}

pub mod engines {
    pub mod engine_greedy;
    pub mod engine_random;
    pub mod engine_trait;
    pub mod engine_two_ply;
}

pub mod utils {
    pub mod engine_match_harness;
    pub mod fen_generator;
    pub mod fen_parser;
    pub mod long_algebraic;
}
