//! Structured move application.
//!
//! A move is first described as a `MoveEffect` (what is cleared, what is
//! written, which rook rides along, which piece is captured and where). The
//! same description is then applied forward by make/redo/search and
//! reverted by undo, so the special-move branching lives in one place.

use crate::game_state::board::Board;
use crate::game_state::chess_types::{CastleSide, CastlingRights, Color, Piece, PieceKind, Square};
use crate::game_state::position::Position;
use crate::moves::king_moves::{castle_rook_col, castle_side_of};
use crate::moves::move_descriptions::ChessMove;
use crate::moves::pawn_moves::is_en_passant_capture;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capture {
    /// Where the captured piece stood (differs from the destination for en passant).
    pub square: Square,
    /// The captured piece exactly as it stood, including its has-moved flag.
    pub piece: Piece,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RookShift {
    pub side: CastleSide,
    pub from: Square,
    pub to: Square,
    /// The rook before it moved.
    pub rook: Piece,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveEffect {
    pub from: Square,
    pub to: Square,
    /// Mover before the move.
    pub moved: Piece,
    /// Piece written on `to`; differs in kind from `moved` on promotion.
    pub placed: Piece,
    pub captured: Option<Capture>,
    pub rook_shift: Option<RookShift>,
    pub en_passant: bool,
}

impl MoveEffect {
    #[inline]
    pub fn promotion(&self) -> Option<PieceKind> {
        (self.placed.kind != self.moved.kind).then_some(self.placed.kind)
    }

    #[inline]
    pub fn is_capture(&self) -> bool {
        self.captured.is_some()
    }

    #[inline]
    pub fn is_double_pawn_push(&self) -> bool {
        self.moved.kind == PieceKind::Pawn && self.from.row().abs_diff(self.to.row()) == 2
    }

    /// Pawn moves and captures reset the fifty-move counter.
    #[inline]
    pub fn resets_half_move_clock(&self) -> bool {
        self.moved.kind == PieceKind::Pawn || self.is_capture()
    }

    pub fn as_move(&self) -> ChessMove {
        ChessMove {
            from: self.from,
            to: self.to,
            promotion: self.promotion(),
        }
    }
}

/// Describe moving the piece on `from` to `to`. Returns `None` for an empty origin.
///
/// The move is assumed to be pseudo-legal; callers filter legality first.
/// A pawn arriving on its last rank becomes `promotion` (queen if unspecified).
pub fn describe_move(
    board: &Board,
    from: Square,
    to: Square,
    promotion: Option<PieceKind>,
    en_passant_target: Option<Square>,
) -> Option<MoveEffect> {
    let moved = board.get(from)?;
    let mut placed = moved.moved();
    let mut en_passant = false;

    let mut captured = board.get(to).map(|piece| Capture { square: to, piece });

    if moved.kind == PieceKind::Pawn {
        if en_passant_target == Some(to) && is_en_passant_capture(board, from, to, moved.color) {
            en_passant = true;
            captured = Square::from_row_col(from.row(), to.col())
                .and_then(|square| board.get(square).map(|piece| Capture { square, piece }));
        }
        if to.row() == moved.color.promotion_row() {
            let kind = promotion
                .filter(|k| k.is_promotion_target())
                .unwrap_or(PieceKind::Queen);
            placed.kind = kind;
        }
    }

    let mut rook_shift = None;
    if moved.kind == PieceKind::King {
        if let Some(side) = castle_side_of(from, to) {
            let row = from.row();
            let rook_from = Square::from_row_col(row, side.rook_col());
            let rook_to = Square::from_row_col(row, castle_rook_col(side));
            if let (Some(rf), Some(rt)) = (rook_from, rook_to) {
                if let Some(rook) = board.get(rf).filter(|p| p.is(PieceKind::Rook, moved.color)) {
                    rook_shift = Some(RookShift {
                        side,
                        from: rf,
                        to: rt,
                        rook,
                    });
                }
            }
        }
    }

    Some(MoveEffect {
        from,
        to,
        moved,
        placed,
        captured,
        rook_shift,
        en_passant,
    })
}

pub fn apply_effect(board: &mut Board, effect: &MoveEffect) {
    if let Some(capture) = effect.captured {
        board.set(capture.square, None);
    }
    board.set(effect.from, None);
    board.set(effect.to, Some(effect.placed));
    if let Some(shift) = effect.rook_shift {
        board.set(shift.from, None);
        board.set(shift.to, Some(shift.rook.moved()));
    }
}

/// Exact inverse of `apply_effect`.
pub fn revert_effect(board: &mut Board, effect: &MoveEffect) {
    if let Some(shift) = effect.rook_shift {
        board.set(shift.to, None);
        board.set(shift.from, Some(shift.rook));
    }
    board.set(effect.to, None);
    board.set(effect.from, Some(effect.moved));
    if let Some(capture) = effect.captured {
        board.set(capture.square, Some(capture.piece));
    }
}

/// Rook home square for `color` on `side`.
fn rook_home(color: Color, side: CastleSide) -> Option<Square> {
    Square::from_row_col(color.home_row(), side.rook_col())
}

fn home_side_of(square: Square, color: Color) -> Option<CastleSide> {
    [CastleSide::KingSide, CastleSide::QueenSide]
        .into_iter()
        .find(|&side| rook_home(color, side) == Some(square))
}

/// Castling rights after a move: rights only ever shrink.
pub fn next_castling_rights(rights: CastlingRights, effect: &MoveEffect) -> CastlingRights {
    let mover = effect.moved;
    let mut next = rights;

    match mover.kind {
        PieceKind::King => next = next.without_color(mover.color),
        PieceKind::Rook if !mover.has_moved => {
            if let Some(side) = home_side_of(effect.from, mover.color) {
                next = next.without(mover.color, side);
            }
        }
        _ => {}
    }

    if let Some(capture) = effect.captured {
        if capture.piece.kind == PieceKind::Rook {
            if let Some(side) = home_side_of(capture.square, capture.piece.color) {
                next = next.without(capture.piece.color, side);
            }
        }
    }

    next
}

/// Square passed over by a two-square pawn advance, otherwise none.
pub fn next_en_passant_target(effect: &MoveEffect) -> Option<Square> {
    if !effect.is_double_pawn_push() {
        return None;
    }
    Square::from_row_col((effect.from.row() + effect.to.row()) / 2, effect.from.col())
}

impl Position {
    /// Play `mv` without any legality check, returning the successor position.
    pub fn apply(&self, mv: ChessMove) -> Option<(Position, MoveEffect)> {
        let effect = describe_move(
            &self.board,
            mv.from,
            mv.to,
            mv.promotion,
            self.en_passant_target,
        )?;
        let mut board = self.board;
        apply_effect(&mut board, &effect);
        Some((
            Position {
                board,
                side_to_move: self.side_to_move.opposite(),
                castling_rights: next_castling_rights(self.castling_rights, &effect),
                en_passant_target: next_en_passant_target(&effect),
            },
            effect,
        ))
    }
}
