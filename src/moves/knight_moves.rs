use crate::game_state::board::Board;
use crate::game_state::chess_types::{Color, Square};

pub const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

/// Knight destinations that are empty or hold an opponent piece.
pub fn knight_targets(board: &Board, from: Square, color: Color, out: &mut Vec<Square>) {
    for &(d_row, d_col) in &KNIGHT_OFFSETS {
        if let Some(to) = from.offset(d_row, d_col) {
            if board.get(to).map_or(true, |p| p.color != color) {
                out.push(to);
            }
        }
    }
}
