use crate::game_state::board::Board;
use crate::game_state::chess_types::{CastlingRights, Color, Square};

/// Everything the rules and the search need to know about a position.
///
/// Clocks, histories and UI state live on `GameState`; a `Position` is the
/// cheap `Copy` snapshot the search recurses over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub board: Board,
    pub side_to_move: Color,
    pub castling_rights: CastlingRights,
    pub en_passant_target: Option<Square>,
}

impl Position {
    pub fn initial() -> Self {
        Self {
            board: Board::initial(),
            side_to_move: Color::White,
            castling_rights: CastlingRights::ALL,
            en_passant_target: None,
        }
    }

    /// Pass the turn without moving. Used by null-move pruning.
    pub fn null_move(&self) -> Self {
        Self {
            side_to_move: self.side_to_move.opposite(),
            en_passant_target: None,
            ..*self
        }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::initial()
    }
}
