//! King steps and castling destinations.

use crate::game_state::board::Board;
use crate::game_state::chess_rules::KING_START_COL;
use crate::game_state::chess_types::{CastleSide, CastlingRights, Color, PieceKind, Square};
use crate::move_generation::legal_move_checks::is_square_attacked;

pub const KING_OFFSETS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

pub fn king_targets(board: &Board, from: Square, color: Color, out: &mut Vec<Square>) {
    for &(d_row, d_col) in &KING_OFFSETS {
        if let Some(to) = from.offset(d_row, d_col) {
            if board.get(to).map_or(true, |p| p.color != color) {
                out.push(to);
            }
        }
    }
}

/// Squares that must be empty between king and rook.
const fn between_cols(side: CastleSide) -> &'static [u8] {
    match side {
        CastleSide::KingSide => &[5, 6],
        CastleSide::QueenSide => &[1, 2, 3],
    }
}

/// King start square plus every square the king crosses; none may be attacked.
const fn king_path_cols(side: CastleSide) -> &'static [u8] {
    match side {
        CastleSide::KingSide => &[4, 5, 6],
        CastleSide::QueenSide => &[4, 3, 2],
    }
}

/// Destination column of the king for a castle.
pub const fn castle_king_col(side: CastleSide) -> u8 {
    match side {
        CastleSide::KingSide => 6,
        CastleSide::QueenSide => 2,
    }
}

/// Destination column of the rook for a castle.
pub const fn castle_rook_col(side: CastleSide) -> u8 {
    match side {
        CastleSide::KingSide => 5,
        CastleSide::QueenSide => 3,
    }
}

/// Whether a king move from `from` to `to` is a castle, and on which side.
pub fn castle_side_of(from: Square, to: Square) -> Option<CastleSide> {
    if from.row() != to.row() || from.col() != KING_START_COL {
        return None;
    }
    match to.col() {
        6 => Some(CastleSide::KingSide),
        2 => Some(CastleSide::QueenSide),
        _ => None,
    }
}

pub fn can_castle(
    board: &Board,
    from: Square,
    color: Color,
    rights: CastlingRights,
    side: CastleSide,
) -> bool {
    let Some(king) = board.get(from) else {
        return false;
    };
    let home_row = color.home_row();
    if !king.is(PieceKind::King, color)
        || king.has_moved
        || from.row() != home_row
        || from.col() != KING_START_COL
        || !rights.has(color, side)
    {
        return false;
    }

    let rook_ok = Square::from_row_col(home_row, side.rook_col())
        .and_then(|sq| board.get(sq))
        .is_some_and(|rook| rook.is(PieceKind::Rook, color) && !rook.has_moved);
    if !rook_ok {
        return false;
    }

    let path_clear = between_cols(side)
        .iter()
        .filter_map(|&col| Square::from_row_col(home_row, col))
        .all(|sq| board.is_empty(sq));
    if !path_clear {
        return false;
    }

    let opponent = color.opposite();
    king_path_cols(side)
        .iter()
        .filter_map(|&col| Square::from_row_col(home_row, col))
        .all(|sq| !is_square_attacked(board, sq, opponent))
}

pub fn castling_targets(
    board: &Board,
    from: Square,
    color: Color,
    rights: CastlingRights,
    out: &mut Vec<Square>,
) {
    for side in [CastleSide::KingSide, CastleSide::QueenSide] {
        if can_castle(board, from, color, rights, side) {
            if let Some(to) = Square::from_row_col(color.home_row(), castle_king_col(side)) {
                out.push(to);
            }
        }
    }
}
