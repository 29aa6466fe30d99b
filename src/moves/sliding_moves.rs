//! Ray walking for rooks, bishops and queens.

use crate::game_state::board::Board;
use crate::game_state::chess_types::{Color, PieceKind, Square};

pub const ROOK_DIRECTIONS: [(i8, i8); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];
pub const BISHOP_DIRECTIONS: [(i8, i8); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];
pub const QUEEN_DIRECTIONS: [(i8, i8); 8] = [
    (-1, 0),
    (1, 0),
    (0, -1),
    (0, 1),
    (-1, -1),
    (-1, 1),
    (1, -1),
    (1, 1),
];

/// Ray directions for a sliding piece kind; empty for everything else.
pub fn directions_for(kind: PieceKind) -> &'static [(i8, i8)] {
    match kind {
        PieceKind::Rook => &ROOK_DIRECTIONS,
        PieceKind::Bishop => &BISHOP_DIRECTIONS,
        PieceKind::Queen => &QUEEN_DIRECTIONS,
        _ => &[],
    }
}

/// Walk each ray until blocked, including the first opponent-occupied square.
pub fn sliding_targets(
    board: &Board,
    from: Square,
    color: Color,
    directions: &[(i8, i8)],
    out: &mut Vec<Square>,
) {
    for &(d_row, d_col) in directions {
        let mut cursor = from;
        while let Some(next) = cursor.offset(d_row, d_col) {
            match board.get(next) {
                None => out.push(next),
                Some(blocker) => {
                    if blocker.color != color {
                        out.push(next);
                    }
                    break;
                }
            }
            cursor = next;
        }
    }
}

/// First occupied square along a ray, if any.
pub fn first_blocker(board: &Board, from: Square, d_row: i8, d_col: i8) -> Option<Square> {
    let mut cursor = from;
    while let Some(next) = cursor.offset(d_row, d_col) {
        if !board.is_empty(next) {
            return Some(next);
        }
        cursor = next;
    }
    None
}

#[cfg(test)]
mod tests {
    use super::{sliding_targets, QUEEN_DIRECTIONS, ROOK_DIRECTIONS};
    use crate::game_state::board::Board;
    use crate::game_state::chess_types::{Color, Piece, PieceKind};
    use crate::utils::algebraic::algebraic_to_square;

    #[test]
    fn queen_on_empty_board_sees_twenty_seven_squares() {
        let board = Board::empty();
        let d4 = algebraic_to_square("d4").expect("d4 should parse");
        let mut out = Vec::new();
        sliding_targets(&board, d4, Color::White, &QUEEN_DIRECTIONS, &mut out);
        assert_eq!(out.len(), 27);
    }

    #[test]
    fn rook_ray_stops_on_blockers() {
        let mut board = Board::empty();
        let a1 = algebraic_to_square("a1").expect("a1 should parse");
        let a4 = algebraic_to_square("a4").expect("a4 should parse");
        let c1 = algebraic_to_square("c1").expect("c1 should parse");
        board.set(a4, Some(Piece::new(PieceKind::Pawn, Color::Black)));
        board.set(c1, Some(Piece::new(PieceKind::Bishop, Color::White)));
        let mut out = Vec::new();
        sliding_targets(&board, a1, Color::White, &ROOK_DIRECTIONS, &mut out);
        let names: Vec<String> = out.iter().map(|s| s.to_string()).collect();
        assert_eq!(names, vec!["a2", "a3", "a4", "b1"]);
    }
}
