//! Attack and check detection.
//!
//! Attacks are found by looking outward from the target square for each
//! attacker pattern (pawn diagonals, knight jumps, king steps, rays), which
//! gives the same answer as scanning every opponent piece's attack set.

use crate::game_state::board::Board;
use crate::game_state::chess_types::{Color, Piece, PieceKind, Square};
use crate::moves::king_moves::KING_OFFSETS;
use crate::moves::knight_moves::KNIGHT_OFFSETS;
use crate::moves::sliding_moves::{first_blocker, BISHOP_DIRECTIONS, ROOK_DIRECTIONS};

#[inline]
pub fn king_square(board: &Board, color: Color) -> Option<Square> {
    board.find_king(color)
}

/// A side with no king on the board is never in check.
#[inline]
pub fn is_king_in_check(board: &Board, color: Color) -> bool {
    let Some(king_sq) = king_square(board, color) else {
        return false;
    };
    is_square_attacked(board, king_sq, color.opposite())
}

pub fn is_square_attacked(board: &Board, square: Square, attacker_color: Color) -> bool {
    let mut found = false;
    visit_attackers(board, square, attacker_color, |_, _| {
        found = true;
        false
    });
    found
}

/// Every piece of `attacker_color` attacking `square`.
pub fn attackers_to_square(
    board: &Board,
    square: Square,
    attacker_color: Color,
) -> Vec<(Square, Piece)> {
    let mut out = Vec::new();
    visit_attackers(board, square, attacker_color, |sq, piece| {
        out.push((sq, piece));
        true
    });
    out
}

/// Least valuable attacker kind, used by exchange estimates.
pub fn cheapest_attacker(board: &Board, square: Square, attacker_color: Color) -> Option<PieceKind> {
    attackers_to_square(board, square, attacker_color)
        .into_iter()
        .map(|(_, p)| p.kind)
        .min_by_key(|kind| kind.index())
}

/// Calls `visit` for each attacker until it returns `false`.
fn visit_attackers<F>(board: &Board, square: Square, attacker_color: Color, mut visit: F)
where
    F: FnMut(Square, Piece) -> bool,
{
    // A pawn attacks diagonally forward, so look one row "behind" the target
    // from the attacker's point of view.
    let pawn_row = -attacker_color.forward();
    for d_col in [-1i8, 1] {
        if let Some(from) = square.offset(pawn_row, d_col) {
            if let Some(p) = board.get(from) {
                if p.is(PieceKind::Pawn, attacker_color) && !visit(from, p) {
                    return;
                }
            }
        }
    }

    for &(d_row, d_col) in &KNIGHT_OFFSETS {
        if let Some(from) = square.offset(d_row, d_col) {
            if let Some(p) = board.get(from) {
                if p.is(PieceKind::Knight, attacker_color) && !visit(from, p) {
                    return;
                }
            }
        }
    }

    for &(d_row, d_col) in &BISHOP_DIRECTIONS {
        if let Some(from) = first_blocker(board, square, d_row, d_col) {
            if let Some(p) = board.get(from) {
                let slides = matches!(p.kind, PieceKind::Bishop | PieceKind::Queen);
                if p.color == attacker_color && slides && !visit(from, p) {
                    return;
                }
            }
        }
    }

    for &(d_row, d_col) in &ROOK_DIRECTIONS {
        if let Some(from) = first_blocker(board, square, d_row, d_col) {
            if let Some(p) = board.get(from) {
                let slides = matches!(p.kind, PieceKind::Rook | PieceKind::Queen);
                if p.color == attacker_color && slides && !visit(from, p) {
                    return;
                }
            }
        }
    }

    for &(d_row, d_col) in &KING_OFFSETS {
        if let Some(from) = square.offset(d_row, d_col) {
            if let Some(p) = board.get(from) {
                if p.is(PieceKind::King, attacker_color) && !visit(from, p) {
                    return;
                }
            }
        }
    }
}
