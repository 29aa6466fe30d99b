//! Iterative deepening driver with aspiration windows.
//!
//! Depths run 1..=max under a wall-clock budget that is only checked between
//! iterations; a started iteration always finishes, so the last one may
//! overrun the nominal budget.

use std::time::{Duration, Instant};

use tracing::debug;

use crate::game_state::chess_types::PlayStyle;
use crate::game_state::position::Position;
use crate::moves::move_descriptions::ChessMove;
use crate::search::alpha_beta::{SearchContext, INFINITY, MATE_THRESHOLD};
use crate::search::transposition_table::TTStats;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchConfig {
    pub max_depth: u8,
    pub move_time_ms: u64,
    pub style: PlayStyle,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_depth: 3,
            move_time_ms: 1_200,
            style: PlayStyle::Balanced,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SearchResult {
    pub best_move: Option<ChessMove>,
    pub best_score: i32,
    pub reached_depth: u8,
    pub nodes: u64,
    pub elapsed_ms: u64,
    pub tt_stats: TTStats,
}

/// Half-width of the aspiration window around the previous iteration's score.
pub const fn aspiration_window(style: PlayStyle) -> i32 {
    match style {
        PlayStyle::Aggressive => 50,
        PlayStyle::Balanced => 35,
        PlayStyle::Positional => 25,
    }
}

#[inline]
fn budget_spent(started_at: Instant, budget: Duration) -> bool {
    started_at.elapsed() >= budget
}

pub fn iterative_deepening_search(
    context: &mut SearchContext,
    position: &Position,
    config: &SearchConfig,
) -> SearchResult {
    let started_at = Instant::now();
    let budget = Duration::from_millis(config.move_time_ms.max(1));
    let nodes_before = context.nodes;
    let mut result = SearchResult::default();
    let mut previous_score = 0;

    for depth in 1..=config.max_depth {
        // Depth 1 always runs so a legal position always yields a move.
        if depth > 1 && budget_spent(started_at, budget) {
            debug!(depth, "time budget spent before iteration");
            break;
        }

        let outcome = if depth == 1 {
            context.search(position, depth, -INFINITY, INFINITY, 0)
        } else {
            let window = aspiration_window(config.style);
            let (alpha, beta) = (previous_score - window, previous_score + window);
            let windowed = context.search(position, depth, alpha, beta, 0);
            if windowed.score <= alpha || windowed.score >= beta {
                debug!(depth, score = windowed.score, alpha, beta, "aspiration window failed");
                context.search(position, depth, -INFINITY, INFINITY, 0)
            } else {
                windowed
            }
        };

        previous_score = outcome.score;
        if let Some(mv) = outcome.best_move {
            result.best_move = Some(mv);
            result.best_score = outcome.score;
            result.reached_depth = depth;
        }

        debug!(
            depth,
            score = outcome.score,
            best = ?outcome.best_move.map(|m| m.to_string()),
            nodes = context.nodes - nodes_before,
            elapsed_ms = started_at.elapsed().as_millis() as u64,
            "iteration complete"
        );

        if outcome.best_move.is_none() || outcome.score.abs() > MATE_THRESHOLD {
            break;
        }
    }

    result.nodes = context.nodes - nodes_before;
    result.elapsed_ms = started_at.elapsed().as_millis() as u64;
    result.tt_stats = context.tt.as_ref().map(|tt| tt.stats()).unwrap_or_default();
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::move_generation::legal_move_generator::legal_moves;
    use crate::utils::fen_parser::parse_fen;

    #[test]
    fn returns_a_legal_move_from_the_start_position() {
        let position = Position::initial();
        let mut context = SearchContext::new();
        let config = SearchConfig {
            max_depth: 3,
            move_time_ms: 5_000,
            style: PlayStyle::Balanced,
        };
        let result = iterative_deepening_search(&mut context, &position, &config);
        let mv = result.best_move.expect("start position should yield a move");
        assert!(legal_moves(&position).contains(&mv));
        assert!(result.reached_depth >= 1);
        assert!(result.nodes > 0);
    }

    #[test]
    fn tiny_budget_still_completes_depth_one() {
        let position = Position::initial();
        let mut context = SearchContext::new();
        let config = SearchConfig {
            max_depth: 8,
            move_time_ms: 1,
            style: PlayStyle::Aggressive,
        };
        let result = iterative_deepening_search(&mut context, &position, &config);
        assert!(result.best_move.is_some());
        assert!(result.reached_depth < 8);
    }

    #[test]
    fn no_legal_moves_yields_none() {
        let position = parse_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1")
            .expect("fixture FEN should parse")
            .position();
        let mut context = SearchContext::new();
        let result = iterative_deepening_search(&mut context, &position, &SearchConfig::default());
        assert_eq!(result.best_move, None);
    }

    #[test]
    fn style_sets_aspiration_width() {
        assert!(aspiration_window(PlayStyle::Aggressive) > aspiration_window(PlayStyle::Balanced));
        assert!(aspiration_window(PlayStyle::Balanced) > aspiration_window(PlayStyle::Positional));
    }
}
