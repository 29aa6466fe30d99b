//! Immutable history entries carrying everything undo needs.

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use crate::game_state::chess_types::{CastlingRights, Color, Piece, PieceKind, Square};
use crate::move_generation::legal_move_apply::MoveEffect;

/// A pawn move to the far rank waiting for the player to choose a piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingPromotion {
    pub from: Square,
    pub to: Square,
    pub color: Color,
}

/// One committed move plus the pre-move snapshot needed to take it back.
#[derive(Debug, Clone)]
pub struct MoveRecord {
    /// Board delta shared by make, undo and redo.
    pub effect: MoveEffect,
    pub notation: String,
    pub timestamp: DateTime<Utc>,
    pub prev_castling_rights: CastlingRights,
    pub prev_en_passant_target: Option<Square>,
    pub prev_half_move_clock: u32,
    pub prev_position_counts: HashMap<String, u32>,
}

impl MoveRecord {
    #[inline]
    pub fn from(&self) -> Square {
        self.effect.from
    }

    #[inline]
    pub fn to(&self) -> Square {
        self.effect.to
    }

    /// The moved piece as it stands after the move.
    #[inline]
    pub fn piece(&self) -> Piece {
        self.effect.placed
    }

    #[inline]
    pub fn color(&self) -> Color {
        self.effect.moved.color
    }

    #[inline]
    pub fn captured(&self) -> Option<Piece> {
        self.effect.captured.map(|c| c.piece)
    }

    #[inline]
    pub fn prev_has_moved(&self) -> bool {
        self.effect.moved.has_moved
    }

    #[inline]
    pub fn prev_captured_has_moved(&self) -> Option<bool> {
        self.effect.captured.map(|c| c.piece.has_moved)
    }

    /// Where an en-passant victim stood, if this was an en-passant capture.
    #[inline]
    pub fn en_passant_capture_square(&self) -> Option<Square> {
        self.effect
            .captured
            .filter(|_| self.effect.en_passant)
            .map(|c| c.square)
    }

    #[inline]
    pub fn promotion(&self) -> Option<PieceKind> {
        self.effect.promotion()
    }
}
