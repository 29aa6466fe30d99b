//! Engine abstraction used by the computer player and the game session.

use crate::game_state::game_state::GameState;
use crate::moves::move_descriptions::ChessMove;
use crate::search::iterative_deepening::SearchResult;

/// Where a chosen move came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveSource {
    Book,
    Search,
}

#[derive(Debug, Clone, Default)]
pub struct EngineOutput {
    pub best_move: Option<ChessMove>,
    pub source: Option<MoveSource>,
    /// Present when the move came from a search.
    pub search: Option<SearchResult>,
}

pub trait Engine: Send {
    /// Forget anything learned in the previous game.
    fn new_game(&mut self) {}

    /// Pick a move for the side to move in `game_state`; `None` when it has no legal move.
    fn choose_move(&mut self, game_state: &GameState) -> EngineOutput;
}
