//! Zobrist hashing for transposition-table keys.
//!
//! The constant table is drawn once per process from a fixed-seed generator
//! and never regenerated, so equal positions hash equally within a run.

use std::sync::OnceLock;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::game_state::board::Board;
use crate::game_state::chess_types::{CastleSide, CastlingRights, Color, PieceKind, Square};
use crate::game_state::position::Position;

const ZOBRIST_SEED: u64 = 0x9E37_79B9;

#[derive(Debug)]
struct ZobristTables {
    piece_square: [[[u64; 64]; 6]; 2],
    white_to_move: u64,
    castling: [u64; 4],
    en_passant_file: [u64; 8],
}

static TABLES: OnceLock<ZobristTables> = OnceLock::new();

#[inline]
fn tables() -> &'static ZobristTables {
    TABLES.get_or_init(build_tables)
}

fn build_tables() -> ZobristTables {
    let mut rng = StdRng::seed_from_u64(ZOBRIST_SEED);

    let mut piece_square = [[[0u64; 64]; 6]; 2];
    for color in &mut piece_square {
        for piece in color {
            for sq in piece {
                *sq = rng.random();
            }
        }
    }

    let white_to_move = rng.random();

    let mut castling = [0u64; 4];
    for key in &mut castling {
        *key = rng.random();
    }

    let mut en_passant_file = [0u64; 8];
    for key in &mut en_passant_file {
        *key = rng.random();
    }

    ZobristTables {
        piece_square,
        white_to_move,
        castling,
        en_passant_file,
    }
}

#[inline]
pub fn piece_square_key(color: Color, piece: PieceKind, square: Square) -> u64 {
    tables().piece_square[color.index()][piece.index()][square.index()]
}

/// XOR of the per-flag constants for every castling right still held.
pub fn castling_key(rights: CastlingRights) -> u64 {
    let t = tables();
    let mut key = 0;
    for (i, (color, side)) in [
        (Color::White, CastleSide::KingSide),
        (Color::White, CastleSide::QueenSide),
        (Color::Black, CastleSide::KingSide),
        (Color::Black, CastleSide::QueenSide),
    ]
    .into_iter()
    .enumerate()
    {
        if rights.has(color, side) {
            key ^= t.castling[i];
        }
    }
    key
}

#[inline]
pub fn side_to_move_key(side: Color) -> u64 {
    match side {
        Color::White => tables().white_to_move,
        Color::Black => 0,
    }
}

#[inline]
pub fn en_passant_file_key(target: Option<Square>) -> u64 {
    target.map_or(0, |sq| tables().en_passant_file[sq.col() as usize])
}

/// Full key for a position.
pub fn hash_position(
    board: &Board,
    side_to_move: Color,
    castling_rights: CastlingRights,
    en_passant_target: Option<Square>,
) -> u64 {
    let mut key = 0u64;
    for (sq, piece) in board.pieces() {
        key ^= piece_square_key(piece.color, piece.kind, sq);
    }
    key ^ side_to_move_key(side_to_move)
        ^ castling_key(castling_rights)
        ^ en_passant_file_key(en_passant_target)
}

#[inline]
pub fn compute_zobrist_key(position: &Position) -> u64 {
    hash_position(
        &position.board,
        position.side_to_move,
        position.castling_rights,
        position.en_passant_target,
    )
}
