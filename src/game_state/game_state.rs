//! The game-level state value handed to the presentation layer.
//!
//! `GameState` carries the board plus everything the rules need across
//! moves (rights, en-passant target, clocks, repetition counts), the move
//! and redo histories, UI-facing selection caches, and the computer
//! opponent settings. Transitions live in `transitions.rs`.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::errors::ChessResult;
use crate::game_state::board::Board;
use crate::game_state::chess_types::*;
use crate::game_state::move_record::{MoveRecord, PendingPromotion};
use crate::game_state::position::Position;
use crate::utils::fen_generator::{generate_fen, position_key};
use crate::utils::fen_parser::parse_fen;

/// Computer opponent configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AiSettings {
    pub ai_plays: Color,
    pub depth: u8,
    pub move_time_ms: u64,
    pub auto_analyze: bool,
    pub style: PlayStyle,
}

impl Default for AiSettings {
    fn default() -> Self {
        Self {
            ai_plays: Color::Black,
            depth: 3,
            move_time_ms: 1_200,
            auto_analyze: false,
            style: PlayStyle::Balanced,
        }
    }
}

/// Partial update for `AiSettings`; absent fields keep their value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AiSettingsPatch {
    pub ai_plays: Option<Color>,
    pub depth: Option<u8>,
    pub move_time_ms: Option<u64>,
    pub auto_analyze: Option<bool>,
    pub style: Option<PlayStyle>,
}

impl AiSettings {
    pub fn merged(self, patch: &AiSettingsPatch) -> Self {
        Self {
            ai_plays: patch.ai_plays.unwrap_or(self.ai_plays),
            depth: patch.depth.unwrap_or(self.depth),
            move_time_ms: patch.move_time_ms.unwrap_or(self.move_time_ms),
            auto_analyze: patch.auto_analyze.unwrap_or(self.auto_analyze),
            style: patch.style.unwrap_or(self.style),
        }
    }
}

#[derive(Debug, Clone)]
pub struct GameState {
    pub board: Board,
    pub current_player: Color,
    pub move_history: Vec<MoveRecord>,
    pub redo_history: Vec<MoveRecord>,
    pub game_status: GameStatus,

    // UI-facing selection cache.
    pub selected_square: Option<Square>,
    pub valid_moves: Vec<Square>,

    pub is_in_check: bool,
    pub castling_rights: CastlingRights,
    pub en_passant_target: Option<Square>,
    pub pending_promotion: Option<PendingPromotion>,
    pub orientation: Orientation,

    pub half_move_clock: u32,
    pub full_move_number: u32,
    pub position_counts: HashMap<String, u32>,

    pub mode: GameMode,
    pub ai_settings: AiSettings,
    pub ai_thinking: bool,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new_game()
    }
}

impl GameState {
    /// Standard starting position, human vs human, white at the bottom.
    pub fn new_game() -> Self {
        Self::from_parts(
            Board::initial(),
            Color::White,
            CastlingRights::ALL,
            None,
            0,
            1,
        )
    }

    /// Build a state from a rules snapshot; the position counts start at one
    /// occurrence of that snapshot.
    pub fn from_parts(
        board: Board,
        current_player: Color,
        castling_rights: CastlingRights,
        en_passant_target: Option<Square>,
        half_move_clock: u32,
        full_move_number: u32,
    ) -> Self {
        let mut state = Self {
            board,
            current_player,
            move_history: Vec::new(),
            redo_history: Vec::new(),
            game_status: GameStatus::Active,
            selected_square: None,
            valid_moves: Vec::new(),
            is_in_check: false,
            castling_rights,
            en_passant_target,
            pending_promotion: None,
            orientation: Orientation::default(),
            half_move_clock,
            full_move_number: full_move_number.max(1),
            position_counts: HashMap::new(),
            mode: GameMode::default(),
            ai_settings: AiSettings::default(),
            ai_thinking: false,
        };
        state.position_counts.insert(state.position_key(), 1);
        state.refresh_status();
        state
    }

    pub fn from_fen(fen: &str) -> ChessResult<Self> {
        parse_fen(fen)
    }

    pub fn to_fen(&self) -> String {
        generate_fen(self)
    }

    /// Rules-only snapshot for move generation and search.
    #[inline]
    pub fn position(&self) -> Position {
        Position {
            board: self.board,
            side_to_move: self.current_player,
            castling_rights: self.castling_rights,
            en_passant_target: self.en_passant_target,
        }
    }

    /// Human-readable repetition key of the current position.
    pub fn position_key(&self) -> String {
        position_key(
            &self.board,
            self.current_player,
            self.castling_rights,
            self.en_passant_target,
        )
    }

    /// Whether it is the computer's turn in a human-vs-computer game.
    pub fn is_computer_turn(&self) -> bool {
        self.mode == GameMode::HumanVsComputer
            && !self.game_status.is_terminal()
            && self.current_player == self.ai_settings.ai_plays
    }
}
