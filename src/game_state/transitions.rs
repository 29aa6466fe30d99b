//! Pure state transitions: every action maps an old `GameState` to a new one.
//!
//! Moves, completed promotions and redos all funnel through `commit`, which
//! applies a `MoveEffect`, advances the clocks and repetition counts, and
//! writes the history record. Undo reverts the same effect and restores the
//! record's snapshot.

use chrono::Utc;
use tracing::debug;

use crate::game_state::chess_rules::{FIFTY_MOVE_HALF_MOVES, REPETITION_DRAW_COUNT};
use crate::game_state::chess_types::{Color, GameStatus, PieceKind, Square};
use crate::game_state::game_state::{AiSettingsPatch, GameState};
use crate::game_state::move_record::{MoveRecord, PendingPromotion};
use crate::move_generation::game_status::compute_game_status;
use crate::move_generation::legal_move_apply::{
    apply_effect, describe_move, next_castling_rights, next_en_passant_target, revert_effect,
    MoveEffect,
};
use crate::move_generation::legal_move_generator::valid_moves;
use crate::utils::notation::san_notation;

#[derive(Debug, Clone, PartialEq)]
pub enum GameAction {
    SelectSquare(Square),
    MakeMove { from: Square, to: Square },
    CompletePromotion(PieceKind),
    CancelPromotion,
    UndoMove,
    RedoMove,
    ResetGame,
    ToggleOrientation,
    ToggleMode,
    SetAiSettings(AiSettingsPatch),
    SetAiThinking(bool),
}

impl GameState {
    pub fn apply(&self, action: GameAction) -> GameState {
        match action {
            GameAction::SelectSquare(square) => self.select_square(square),
            GameAction::MakeMove { from, to } => self.make_move(from, to),
            GameAction::CompletePromotion(kind) => self.complete_promotion(kind),
            GameAction::CancelPromotion => self.cancel_promotion(),
            GameAction::UndoMove => self.undo_move(),
            GameAction::RedoMove => self.redo_move(),
            GameAction::ResetGame => self.reset_game(),
            GameAction::ToggleOrientation => self.toggle_orientation(),
            GameAction::ToggleMode => self.toggle_mode(),
            GameAction::SetAiSettings(patch) => self.set_ai_settings(&patch),
            GameAction::SetAiThinking(thinking) => self.set_ai_thinking(thinking),
        }
    }

    /// Select an own piece, or move the selected piece onto one of its targets.
    ///
    /// While a promotion is pending only re-selection is possible.
    pub fn select_square(&self, square: Square) -> GameState {
        let mut next = self.clone();
        if self.game_status.is_terminal() {
            next.clear_selection();
            return next;
        }

        if let Some(selected) = self.selected_square {
            if self.pending_promotion.is_none() && self.valid_moves.contains(&square) {
                return self.make_move(selected, square);
            }
        }

        match self.board.get(square) {
            Some(piece) if piece.color == self.current_player => {
                next.selected_square = Some(square);
                next.valid_moves = self.targets_from(square);
            }
            _ => next.clear_selection(),
        }
        next
    }

    /// Move the piece on `from` to `to` if that is legal.
    ///
    /// A pawn reaching its last rank stops at a pending promotion instead of
    /// committing.
    pub fn make_move(&self, from: Square, to: Square) -> GameState {
        if self.game_status.is_terminal() {
            debug!(%from, %to, status = ?self.game_status, "move rejected: game is over");
            return self.clone();
        }
        if self.pending_promotion.is_some() {
            debug!(%from, %to, "move rejected: promotion pending");
            return self.clone();
        }
        let Some(piece) = self.board.get(from).filter(|p| p.color == self.current_player) else {
            debug!(%from, %to, "move rejected: no piece of the side to move");
            return self.clone();
        };

        let legal = match self.selected_square {
            Some(selected) if selected == from => self.valid_moves.contains(&to),
            Some(selected) => {
                debug!(%from, %to, %selected, "move rejected: another square is selected");
                return self.clone();
            }
            None => self.targets_from(from).contains(&to),
        };
        if !legal {
            debug!(%from, %to, "move rejected: illegal destination");
            return self.clone();
        }

        if piece.kind == PieceKind::Pawn && to.row() == piece.color.promotion_row() {
            let mut next = self.clone();
            next.pending_promotion = Some(PendingPromotion {
                from,
                to,
                color: piece.color,
            });
            next.selected_square = Some(from);
            return next;
        }

        self.commit_new_move(from, to, None)
    }

    pub fn complete_promotion(&self, kind: PieceKind) -> GameState {
        let Some(pending) = self.pending_promotion else {
            return self.clone();
        };
        if !kind.is_promotion_target() {
            debug!(?kind, "promotion rejected: not a promotion piece");
            return self.clone();
        }
        if self.board.get(pending.from).is_none() {
            let mut next = self.clone();
            next.pending_promotion = None;
            return next;
        }
        self.commit_new_move(pending.from, pending.to, Some(kind))
    }

    pub fn cancel_promotion(&self) -> GameState {
        let mut next = self.clone();
        next.pending_promotion = None;
        next.clear_selection();
        next
    }

    /// Take back the last committed move and park it on the redo stack.
    pub fn undo_move(&self) -> GameState {
        let mut next = self.clone();
        let Some(record) = next.move_history.pop() else {
            return next;
        };

        revert_effect(&mut next.board, &record.effect);
        next.current_player = record.color();
        next.castling_rights = record.prev_castling_rights;
        next.en_passant_target = record.prev_en_passant_target;
        next.half_move_clock = record.prev_half_move_clock;
        next.position_counts = record.prev_position_counts.clone();
        if record.color() == Color::Black {
            next.full_move_number = next.full_move_number.saturating_sub(1).max(1);
        }
        next.pending_promotion = None;
        next.clear_selection();
        next.refresh_status();

        debug!(notation = %record.notation, "move undone");
        next.redo_history.push(record);
        next
    }

    /// Replay the most recently undone move through the same commit path as a fresh move.
    pub fn redo_move(&self) -> GameState {
        let mut base = self.clone();
        let Some(record) = base.redo_history.pop() else {
            return base;
        };
        base.pending_promotion = None;
        debug!(notation = %record.notation, "move redone");
        base.commit(record.effect)
    }

    pub fn reset_game(&self) -> GameState {
        GameState::new_game()
    }

    pub fn toggle_orientation(&self) -> GameState {
        let mut next = self.clone();
        next.orientation = self.orientation.toggled();
        next
    }

    pub fn toggle_mode(&self) -> GameState {
        let mut next = self.clone();
        next.mode = self.mode.toggled();
        next
    }

    pub fn set_ai_settings(&self, patch: &AiSettingsPatch) -> GameState {
        let mut next = self.clone();
        next.ai_settings = self.ai_settings.merged(patch);
        next
    }

    pub fn set_ai_thinking(&self, thinking: bool) -> GameState {
        let mut next = self.clone();
        next.ai_thinking = thinking;
        next
    }

    /// Recompute `game_status` and `is_in_check` for the side to move,
    /// including repetition and fifty-move draws.
    pub(crate) fn refresh_status(&mut self) {
        let rules = compute_game_status(
            &self.board,
            self.current_player,
            self.castling_rights,
            self.en_passant_target,
        );
        self.is_in_check = matches!(rules, GameStatus::Check | GameStatus::Checkmate);
        self.game_status = if rules != GameStatus::Checkmate && self.is_draw_by_rule() {
            GameStatus::Draw
        } else {
            rules
        };
    }

    fn is_draw_by_rule(&self) -> bool {
        let repeated = self
            .position_counts
            .get(&self.position_key())
            .is_some_and(|&count| count >= REPETITION_DRAW_COUNT);
        repeated || self.half_move_clock >= FIFTY_MOVE_HALF_MOVES
    }

    fn targets_from(&self, square: Square) -> Vec<Square> {
        valid_moves(
            &self.board,
            square,
            self.current_player,
            self.castling_rights,
            self.en_passant_target,
        )
    }

    fn clear_selection(&mut self) {
        self.selected_square = None;
        self.valid_moves.clear();
    }

    fn commit_new_move(&self, from: Square, to: Square, promotion: Option<PieceKind>) -> GameState {
        let Some(effect) = describe_move(&self.board, from, to, promotion, self.en_passant_target)
        else {
            return self.clone();
        };
        let mut next = self.commit(effect);
        next.redo_history.clear();
        next
    }

    fn commit(&self, effect: MoveEffect) -> GameState {
        let before = self.position();
        let mut next = self.clone();

        apply_effect(&mut next.board, &effect);
        next.castling_rights = next_castling_rights(self.castling_rights, &effect);
        next.en_passant_target = next_en_passant_target(&effect);
        next.current_player = effect.moved.color.opposite();
        next.half_move_clock = if effect.resets_half_move_clock() {
            0
        } else {
            self.half_move_clock + 1
        };
        if effect.moved.color == Color::Black {
            next.full_move_number += 1;
        }
        *next.position_counts.entry(next.position_key()).or_insert(0) += 1;
        next.refresh_status();

        let suffix_status = if next.game_status == GameStatus::Draw {
            if next.is_in_check {
                GameStatus::Check
            } else {
                GameStatus::Active
            }
        } else {
            next.game_status
        };
        let notation = san_notation(&before, &effect, suffix_status);
        debug!(%notation, status = ?next.game_status, "move committed");

        next.move_history.push(MoveRecord {
            effect,
            notation,
            timestamp: Utc::now(),
            prev_castling_rights: self.castling_rights,
            prev_en_passant_target: self.en_passant_target,
            prev_half_move_clock: self.half_move_clock,
            prev_position_counts: self.position_counts.clone(),
        });
        next.pending_promotion = None;
        next.clear_selection();
        next
    }
}
