//! Perft node counting for move-generator validation and benchmarking.

use crate::game_state::position::Position;
use crate::move_generation::legal_move_checks::is_king_in_check;
use crate::move_generation::legal_move_generator::legal_moves;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PerftCounts {
    pub nodes: usize,
    pub captures: usize,
    pub en_passant: usize,
    pub castles: usize,
    pub promotions: usize,
    pub checks: usize,
}

impl PerftCounts {
    fn merge(&mut self, rhs: PerftCounts) {
        self.nodes += rhs.nodes;
        self.captures += rhs.captures;
        self.en_passant += rhs.en_passant;
        self.castles += rhs.castles;
        self.promotions += rhs.promotions;
        self.checks += rhs.checks;
    }
}

/// Count leaf nodes (and leaf move categories) `depth` plies below `position`.
pub fn perft(position: &Position, depth: u8) -> PerftCounts {
    if depth == 0 {
        return PerftCounts {
            nodes: 1,
            ..PerftCounts::default()
        };
    }

    let mut total = PerftCounts::default();
    for mv in legal_moves(position) {
        let Some((next, effect)) = position.apply(mv) else {
            continue;
        };
        if depth == 1 {
            total.nodes += 1;
            total.captures += usize::from(effect.is_capture());
            total.en_passant += usize::from(effect.en_passant);
            total.castles += usize::from(effect.rook_shift.is_some());
            total.promotions += usize::from(effect.promotion().is_some());
            total.checks += usize::from(is_king_in_check(&next.board, next.side_to_move));
        } else {
            total.merge(perft(&next, depth - 1));
        }
    }
    total
}

/// Per-root-move node counts, sorted by move text.
pub fn perft_divide(position: &Position, depth: u8) -> Vec<(String, usize)> {
    let mut out: Vec<(String, usize)> = legal_moves(position)
        .into_iter()
        .filter_map(|mv| {
            let (next, _) = position.apply(mv)?;
            let nodes = perft(&next, depth.saturating_sub(1)).nodes;
            Some((mv.to_string(), nodes))
        })
        .collect();
    out.sort();
    out
}
