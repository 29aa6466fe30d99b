//! Crate root module declarations for the Sable Chess engine.
//!
//! This file exposes the rules engine (game state, move generation), the
//! search and evaluation stack, the opening book, the computer opponent and
//! session layer, and the text helpers (squares, FEN, notation) under stable
//! module paths for hosts, tests and benches.

pub mod errors;

pub mod game_state {
    pub mod board;
    pub mod chess_rules;
    pub mod chess_types;
    pub mod game_state;
    pub mod move_record;
    pub mod position;
    pub mod transitions;
}

pub mod moves {
    pub mod king_moves;
    pub mod knight_moves;
    pub mod move_descriptions;
    pub mod pawn_moves;
    pub mod sliding_moves;
}

pub mod move_generation {
    pub mod game_status;
    pub mod legal_move_apply;
    pub mod legal_move_checks;
    pub mod legal_move_generator;
    pub mod perft;
}

pub mod search {
    pub mod alpha_beta;
    pub mod board_scoring;
    pub mod heuristics;
    pub mod iterative_deepening;
    pub mod move_ordering;
    pub mod piece_square_tables;
    pub mod transposition_table;
    pub mod zobrist;
}

pub mod tables {
    pub mod opening_book;
}

pub mod engines {
    pub mod computer_player;
    pub mod engine_trait;
    pub mod game_session;
    pub mod time_management;
}

pub mod utils {
    pub mod algebraic;
    pub mod fen_generator;
    pub mod fen_parser;
    pub mod notation;
}
