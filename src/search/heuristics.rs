//! Killer-move and history tables shared across searches of one session.

use crate::game_state::chess_types::Color;
use crate::moves::move_descriptions::ChessMove;

/// Deepest remaining-depth slot tracked by the killer table.
pub const MAX_KILLER_DEPTH: usize = 64;

const HISTORY_CAP: i32 = 50_000;

#[derive(Debug, Clone)]
pub struct SearchHeuristics {
    killers: [[Option<ChessMove>; 2]; MAX_KILLER_DEPTH],
    /// `[color][from][to]` cutoff counts weighted by depth squared.
    history: Box<[[[i32; 64]; 64]; 2]>,
}

impl Default for SearchHeuristics {
    fn default() -> Self {
        Self {
            killers: [[None; 2]; MAX_KILLER_DEPTH],
            history: Box::new([[[0; 64]; 64]; 2]),
        }
    }
}

impl SearchHeuristics {
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    #[inline]
    fn slot(depth: u8) -> usize {
        usize::from(depth).min(MAX_KILLER_DEPTH - 1)
    }

    pub fn killers_at(&self, depth: u8) -> [Option<ChessMove>; 2] {
        self.killers[Self::slot(depth)]
    }

    pub fn record_killer(&mut self, depth: u8, mv: ChessMove) {
        let slot = &mut self.killers[Self::slot(depth)];
        if slot[0] == Some(mv) {
            return;
        }
        slot[1] = slot[0];
        slot[0] = Some(mv);
    }

    pub fn history_score(&self, side: Color, mv: ChessMove) -> i32 {
        self.history[side.index()][mv.from.index()][mv.to.index()]
    }

    pub fn record_history(&mut self, side: Color, mv: ChessMove, depth: u8) {
        let bonus = i32::from(depth) * i32::from(depth);
        let entry = &mut self.history[side.index()][mv.from.index()][mv.to.index()];
        *entry = (*entry + bonus).min(HISTORY_CAP);
    }
}

#[cfg(test)]
mod tests {
    use super::SearchHeuristics;
    use crate::game_state::chess_types::Color;
    use crate::moves::move_descriptions::ChessMove;
    use crate::utils::algebraic::algebraic_to_square;

    fn mv(from: &str, to: &str) -> ChessMove {
        ChessMove::new(
            algebraic_to_square(from).expect("from should parse"),
            algebraic_to_square(to).expect("to should parse"),
        )
    }

    #[test]
    fn killers_shift_and_ignore_duplicates() {
        let mut h = SearchHeuristics::default();
        h.record_killer(3, mv("g1", "f3"));
        h.record_killer(3, mv("g1", "f3"));
        assert_eq!(h.killers_at(3), [Some(mv("g1", "f3")), None]);
        h.record_killer(3, mv("b1", "c3"));
        assert_eq!(h.killers_at(3), [Some(mv("b1", "c3")), Some(mv("g1", "f3"))]);
        assert_eq!(h.killers_at(2), [None, None]);
    }

    #[test]
    fn history_accumulates_by_depth_squared_per_color() {
        let mut h = SearchHeuristics::default();
        h.record_history(Color::White, mv("e2", "e4"), 3);
        h.record_history(Color::White, mv("e2", "e4"), 2);
        assert_eq!(h.history_score(Color::White, mv("e2", "e4")), 13);
        assert_eq!(h.history_score(Color::Black, mv("e2", "e4")), 0);
    }
}
