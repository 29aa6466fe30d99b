//! Pawn pushes, captures and en-passant targets.
//!
//! Pawn attacks are diagonal only and deliberately separate from pawn move
//! generation: a pawn attacks squares it may not move to.

use crate::game_state::board::Board;
use crate::game_state::chess_types::{Color, PieceKind, Square};

/// Squares attacked by a pawn of `color` standing on `from`.
pub fn pawn_attack_squares(from: Square, color: Color) -> impl Iterator<Item = Square> {
    let d_row = color.forward();
    [-1i8, 1]
        .into_iter()
        .filter_map(move |d_col| from.offset(d_row, d_col))
}

pub fn pawn_targets(
    board: &Board,
    from: Square,
    color: Color,
    en_passant_target: Option<Square>,
    out: &mut Vec<Square>,
) {
    let d_row = color.forward();

    if let Some(one) = from.offset(d_row, 0) {
        if board.is_empty(one) {
            out.push(one);
            if from.row() == color.pawn_start_row() {
                if let Some(two) = one.offset(d_row, 0) {
                    if board.is_empty(two) {
                        out.push(two);
                    }
                }
            }
        }
    }

    for to in pawn_attack_squares(from, color) {
        if board.get(to).is_some_and(|p| p.color != color) {
            out.push(to);
        }
    }

    if let Some(target) = en_passant_target {
        if is_en_passant_capture(board, from, target, color) {
            out.push(target);
        }
    }
}

/// A pawn on its en-passant rank capturing onto the empty, diagonally adjacent
/// target, with an enemy pawn standing beside it.
pub fn is_en_passant_capture(board: &Board, from: Square, target: Square, color: Color) -> bool {
    from.row() == color.en_passant_row()
        && target.row() as i8 == from.row() as i8 + color.forward()
        && from.col().abs_diff(target.col()) == 1
        && board.is_empty(target)
        && Square::from_row_col(from.row(), target.col())
            .and_then(|sq| board.get(sq))
            .is_some_and(|p| p.is(PieceKind::Pawn, color.opposite()))
}
