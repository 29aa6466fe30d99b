//! A hosted game: the current `GameState` plus the computer opponent.
//!
//! Every presentation-facing operation goes through `dispatch`. When a
//! human move commits in human-vs-computer mode the computer answers
//! immediately, so the state handed back already contains its reply.

use tracing::debug;

use crate::engines::computer_player::ComputerPlayer;
use crate::engines::engine_trait::Engine;
use crate::errors::ChessResult;
use crate::game_state::chess_types::{PieceKind, Square};
use crate::game_state::game_state::{AiSettingsPatch, GameState};
use crate::game_state::transitions::GameAction;

#[derive(Default)]
pub struct GameSession {
    state: GameState,
    computer: ComputerPlayer,
}

impl GameSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_fen(fen: &str) -> ChessResult<Self> {
        Ok(Self {
            state: GameState::from_fen(fen)?,
            computer: ComputerPlayer::new(),
        })
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn computer_mut(&mut self) -> &mut ComputerPlayer {
        &mut self.computer
    }

    /// Apply one action and return the resulting state.
    pub fn dispatch(&mut self, action: GameAction) -> &GameState {
        let reset = matches!(action, GameAction::ResetGame);
        let plies_before = self.state.move_history.len();
        let was_computer_turn = self.state.is_computer_turn();

        self.state = self.state.apply(action);
        if reset {
            self.computer.new_game();
        }

        let human_committed = !was_computer_turn && self.state.move_history.len() > plies_before;
        if human_committed && self.state.is_computer_turn() {
            debug!("human move committed, requesting computer reply");
            self.state = self.computer.request_computer_move(&self.state);
        }
        &self.state
    }

    pub fn select_square(&mut self, square: Square) -> &GameState {
        self.dispatch(GameAction::SelectSquare(square))
    }

    pub fn make_move(&mut self, from: Square, to: Square) -> &GameState {
        self.dispatch(GameAction::MakeMove { from, to })
    }

    pub fn complete_promotion(&mut self, kind: PieceKind) -> &GameState {
        self.dispatch(GameAction::CompletePromotion(kind))
    }

    pub fn cancel_promotion(&mut self) -> &GameState {
        self.dispatch(GameAction::CancelPromotion)
    }

    pub fn undo_move(&mut self) -> &GameState {
        self.dispatch(GameAction::UndoMove)
    }

    pub fn redo_move(&mut self) -> &GameState {
        self.dispatch(GameAction::RedoMove)
    }

    pub fn reset_game(&mut self) -> &GameState {
        self.dispatch(GameAction::ResetGame)
    }

    pub fn toggle_orientation(&mut self) -> &GameState {
        self.dispatch(GameAction::ToggleOrientation)
    }

    pub fn toggle_mode(&mut self) -> &GameState {
        self.dispatch(GameAction::ToggleMode)
    }

    pub fn set_ai_settings(&mut self, patch: AiSettingsPatch) -> &GameState {
        self.dispatch(GameAction::SetAiSettings(patch))
    }

    /// Ask the computer to move now, e.g. right after switching it on while it is its turn.
    pub fn request_computer_move(&mut self) -> &GameState {
        self.state = self.computer.request_computer_move(&self.state);
        &self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::chess_types::{Color, GameMode, GameStatus};
    use crate::utils::algebraic::algebraic_to_square;

    fn sq(name: &str) -> Square {
        algebraic_to_square(name).expect("fixture square should parse")
    }

    fn quick_settings() -> AiSettingsPatch {
        AiSettingsPatch {
            depth: Some(2),
            move_time_ms: Some(300),
            ..AiSettingsPatch::default()
        }
    }

    #[test]
    fn computer_answers_a_human_move() {
        let mut session = GameSession::new();
        session.toggle_mode();
        session.set_ai_settings(quick_settings());
        session.select_square(sq("e2"));
        let state = session.select_square(sq("e4"));
        assert_eq!(state.mode, GameMode::HumanVsComputer);
        assert_eq!(state.move_history.len(), 2);
        assert_eq!(state.current_player, Color::White);
        assert_eq!(state.move_history[1].notation, "e5");
    }

    #[test]
    fn human_vs_human_never_triggers_the_computer() {
        let mut session = GameSession::new();
        let state = session.make_move(sq("e2"), sq("e4"));
        assert_eq!(state.move_history.len(), 1);
        assert_eq!(state.current_player, Color::Black);
    }

    #[test]
    fn computer_playing_white_moves_on_request() {
        let mut session = GameSession::new();
        session.toggle_mode();
        session.set_ai_settings(AiSettingsPatch {
            ai_plays: Some(Color::White),
            ..quick_settings()
        });
        assert!(session.state().move_history.is_empty());
        let state = session.request_computer_move();
        assert_eq!(state.move_history.len(), 1);
        assert_eq!(state.current_player, Color::Black);
    }

    #[test]
    fn undo_does_not_trigger_a_reply() {
        let mut session = GameSession::new();
        session.toggle_mode();
        session.set_ai_settings(quick_settings());
        session.make_move(sq("e2"), sq("e4"));
        let state = session.undo_move();
        assert_eq!(state.move_history.len(), 1);
        assert_eq!(state.current_player, Color::Black);
    }

    #[test]
    fn reset_restores_a_fresh_game() {
        let mut session = GameSession::new();
        session.make_move(sq("e2"), sq("e4"));
        session.toggle_orientation();
        let state = session.reset_game();
        assert!(state.move_history.is_empty());
        assert_eq!(state.game_status, GameStatus::Active);
        assert_eq!(state.to_fen(), GameState::new_game().to_fen());
    }

    #[test]
    fn session_from_fen_rejects_garbage() {
        assert!(GameSession::from_fen("not a fen").is_err());
        let session = GameSession::from_fen("4k3/8/8/8/8/8/8/4K3 w - - 0 1").expect("FEN should parse");
        assert_eq!(session.state().current_player, Color::White);
    }
}
