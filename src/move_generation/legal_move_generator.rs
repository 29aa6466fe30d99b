//! Legal move generation.
//!
//! Pseudo-legal targets come from the per-piece generators in `moves`; each
//! candidate is then simulated on a scratch board and dropped if it leaves
//! the mover's king attacked.

use crate::game_state::board::Board;
use crate::game_state::chess_types::{CastlingRights, Color, PieceKind, Square};
use crate::game_state::position::Position;
use crate::move_generation::legal_move_apply::{apply_effect, describe_move};
use crate::move_generation::legal_move_checks::is_king_in_check;
use crate::moves::king_moves::{castling_targets, king_targets};
use crate::moves::knight_moves::knight_targets;
use crate::moves::move_descriptions::ChessMove;
use crate::moves::pawn_moves::pawn_targets;
use crate::moves::sliding_moves::{directions_for, sliding_targets};

/// Pseudo-legal destinations for the piece on `square` if it belongs to `color`.
pub fn pseudo_legal_targets(
    board: &Board,
    square: Square,
    color: Color,
    castling_rights: CastlingRights,
    en_passant_target: Option<Square>,
) -> Vec<Square> {
    let mut out = Vec::new();
    let Some(piece) = board.get(square).filter(|p| p.color == color) else {
        return out;
    };

    match piece.kind {
        PieceKind::Pawn => pawn_targets(board, square, color, en_passant_target, &mut out),
        PieceKind::Knight => knight_targets(board, square, color, &mut out),
        PieceKind::King => {
            king_targets(board, square, color, &mut out);
            castling_targets(board, square, color, castling_rights, &mut out);
        }
        kind => sliding_targets(board, square, color, directions_for(kind), &mut out),
    }
    out
}

/// Whether moving `from` -> `to` leaves `color`'s king safe.
pub fn keeps_king_safe(
    board: &Board,
    from: Square,
    to: Square,
    color: Color,
    en_passant_target: Option<Square>,
) -> bool {
    let Some(effect) = describe_move(board, from, to, None, en_passant_target) else {
        return false;
    };
    let mut scratch = *board;
    apply_effect(&mut scratch, &effect);
    !is_king_in_check(&scratch, color)
}

/// Legal destinations for the piece on `square`.
///
/// An empty square or a piece of the other colour yields an empty set.
pub fn valid_moves(
    board: &Board,
    square: Square,
    color: Color,
    castling_rights: CastlingRights,
    en_passant_target: Option<Square>,
) -> Vec<Square> {
    pseudo_legal_targets(board, square, color, castling_rights, en_passant_target)
        .into_iter()
        .filter(|&to| keeps_king_safe(board, square, to, color, en_passant_target))
        .collect()
}

/// All legal moves for the side to move, one per promotion kind for promotions.
pub fn legal_moves(position: &Position) -> Vec<ChessMove> {
    let color = position.side_to_move;
    let mut moves = Vec::with_capacity(48);
    for (from, piece) in position.board.pieces_of(color) {
        let targets = valid_moves(
            &position.board,
            from,
            color,
            position.castling_rights,
            position.en_passant_target,
        );
        for to in targets {
            if piece.kind == PieceKind::Pawn && to.row() == color.promotion_row() {
                moves.extend(
                    PieceKind::PROMOTIONS
                        .iter()
                        .map(|&kind| ChessMove::with_promotion(from, to, kind)),
                );
            } else {
                moves.push(ChessMove::new(from, to));
            }
        }
    }
    moves
}

pub fn has_any_legal_move(
    board: &Board,
    color: Color,
    castling_rights: CastlingRights,
    en_passant_target: Option<Square>,
) -> bool {
    board.pieces_of(color).any(|(from, _)| {
        pseudo_legal_targets(board, from, color, castling_rights, en_passant_target)
            .into_iter()
            .any(|to| keeps_king_safe(board, from, to, color, en_passant_target))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::algebraic::algebraic_to_square;
    use crate::utils::fen_parser::parse_fen;

    fn sq(name: &str) -> Square {
        algebraic_to_square(name).expect("fixture square should parse")
    }

    fn names(squares: &[Square]) -> Vec<String> {
        let mut out: Vec<String> = squares.iter().map(|s| s.to_string()).collect();
        out.sort();
        out
    }

    #[test]
    fn start_position_pawn_and_knight_moves() {
        let board = Board::initial();
        let e2 = valid_moves(&board, sq("e2"), Color::White, CastlingRights::ALL, None);
        let b1 = valid_moves(&board, sq("b1"), Color::White, CastlingRights::ALL, None);
        assert_eq!(names(&e2), vec!["e3", "e4"]);
        assert_eq!(names(&b1), vec!["a3", "c3"]);
    }

    #[test]
    fn start_position_has_twenty_moves() {
        assert_eq!(legal_moves(&Position::initial()).len(), 20);
    }

    #[test]
    fn empty_or_enemy_square_yields_nothing() {
        let board = Board::initial();
        assert!(valid_moves(&board, sq("e4"), Color::White, CastlingRights::ALL, None).is_empty());
        assert!(valid_moves(&board, sq("e7"), Color::White, CastlingRights::ALL, None).is_empty());
    }

    #[test]
    fn pinned_piece_cannot_leave_the_pin_line() {
        // Bishop on e2 is pinned by the rook on e8.
        let state = parse_fen("4r1k1/8/8/8/8/8/4B3/4K3 w - - 0 1").expect("fixture FEN should parse");
        let moves = valid_moves(&state.board, sq("e2"), Color::White, CastlingRights::NONE, None);
        assert!(moves.is_empty());
    }

    #[test]
    fn en_passant_exposing_king_on_rank_is_illegal() {
        // Capturing d6 would remove both pawns from the fifth rank and expose the king.
        let state = parse_fen("8/8/8/K2pP2r/8/8/8/7k w - d6 0 1").expect("fixture FEN should parse");
        let moves = valid_moves(
            &state.board,
            sq("e5"),
            Color::White,
            CastlingRights::NONE,
            state.en_passant_target,
        );
        assert_eq!(names(&moves), vec!["e6"]);
    }

    #[test]
    fn promotion_expands_into_four_moves() {
        let state = parse_fen("7k/4P3/8/8/8/8/8/4K3 w - - 0 1").expect("fixture FEN should parse");
        let moves = legal_moves(&state.position());
        let promotions = moves.iter().filter(|m| m.promotion.is_some()).count();
        assert_eq!(promotions, 4);
    }
}
