//! The computer opponent: opening book first, then iterative deepening.
//!
//! A `ComputerPlayer` owns the per-session search tables and a busy flag.
//! The flag is shared through an `Arc<AtomicBool>` so a host can observe
//! it from elsewhere; at most one computer-move request runs at a time.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::debug;

use crate::engines::engine_trait::{Engine, EngineOutput, MoveSource};
use crate::engines::time_management::search_config_for;
use crate::game_state::chess_types::{GameMode, PieceKind};
use crate::game_state::game_state::GameState;
use crate::search::alpha_beta::SearchContext;
use crate::search::iterative_deepening::iterative_deepening_search;
use crate::tables::opening_book::OpeningBook;

pub struct ComputerPlayer {
    context: SearchContext,
    book: OpeningBook,
    busy: Arc<AtomicBool>,
}

impl Default for ComputerPlayer {
    fn default() -> Self {
        Self::new()
    }
}

/// Releases the busy flag when the request ends, however it ends.
struct BusyGuard<'a>(&'a AtomicBool);

impl<'a> BusyGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl ComputerPlayer {
    pub fn new() -> Self {
        Self::with_book(OpeningBook::embedded())
    }

    pub fn with_book(book: OpeningBook) -> Self {
        Self {
            context: SearchContext::new(),
            book,
            busy: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn book_mut(&mut self) -> &mut OpeningBook {
        &mut self.book
    }

    pub fn busy_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.busy)
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// Play the computer's move if it is the computer's turn.
    ///
    /// Returns `state` unchanged when the game is not human-vs-computer, is
    /// over, it is the human's turn, or another request is still running.
    /// The move is applied through select and make (and promotion) so it
    /// goes through the same validation as a human move.
    pub fn request_computer_move(&mut self, state: &GameState) -> GameState {
        if state.mode != GameMode::HumanVsComputer
            || state.game_status.is_terminal()
            || state.current_player != state.ai_settings.ai_plays
        {
            return state.clone();
        }
        let busy = Arc::clone(&self.busy);
        let Some(_guard) = BusyGuard::acquire(&busy) else {
            debug!("computer move already in progress");
            return state.clone();
        };

        let thinking = state.set_ai_thinking(true);
        let output = self.choose_move(&thinking);
        let mut next = thinking;
        if let Some(mv) = output.best_move {
            next = next.select_square(mv.from).make_move(mv.from, mv.to);
            if next.pending_promotion.is_some() {
                next = next.complete_promotion(mv.promotion.unwrap_or(PieceKind::Queen));
            }
            debug!(%mv, source = ?output.source, "computer move applied");
        } else {
            debug!("computer has no move");
        }
        next.set_ai_thinking(false)
    }
}

impl Engine for ComputerPlayer {
    fn new_game(&mut self) {
        self.context.clear();
    }

    fn choose_move(&mut self, game_state: &GameState) -> EngineOutput {
        if let Some(mv) = self.book.book_move(game_state, &mut self.context) {
            return EngineOutput {
                best_move: Some(mv),
                source: Some(MoveSource::Book),
                search: None,
            };
        }

        let config = search_config_for(game_state, &game_state.ai_settings);
        let result = iterative_deepening_search(&mut self.context, &game_state.position(), &config);
        debug!(
            best = ?result.best_move.map(|m| m.to_string()),
            score = result.best_score,
            depth = result.reached_depth,
            nodes = result.nodes,
            elapsed_ms = result.elapsed_ms,
            "search finished"
        );
        EngineOutput {
            best_move: result.best_move,
            source: result.best_move.map(|_| MoveSource::Search),
            search: Some(result),
        }
    }
}
