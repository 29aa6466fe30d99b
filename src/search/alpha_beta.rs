//! Negamax alpha-beta with check extension, null-move pruning, a
//! transposition table, principal-variation search with late-move
//! reductions, and a capture-only quiescence search at the leaves.

use crate::game_state::board::Board;
use crate::game_state::chess_types::{Color, PieceKind};
use crate::game_state::position::Position;
use crate::move_generation::legal_move_checks::is_king_in_check;
use crate::move_generation::legal_move_generator::legal_moves;
use crate::moves::move_descriptions::ChessMove;
use crate::search::board_scoring::{evaluate_position, piece_value, MATE_SCORE};
use crate::search::heuristics::SearchHeuristics;
use crate::search::move_ordering::{score_moves, sort_moves};
use crate::search::transposition_table::{Bound, TTEntry, TranspositionTable};
use crate::search::zobrist::compute_zobrist_key;

/// Larger than any reachable score; safe to negate.
pub const INFINITY: i32 = MATE_SCORE + 1_000;

/// Scores beyond this are mate scores carrying a distance.
pub const MATE_THRESHOLD: i32 = MATE_SCORE - 1_000;

const MAX_PLY: u8 = 64;
const QUIESCENCE_MAX_PLY: u8 = 8;
const NULL_MOVE_MIN_DEPTH: u8 = 3;
const LMR_MIN_DEPTH: u8 = 4;
const LMR_MIN_INDEX: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOutcome {
    pub score: i32,
    pub best_move: Option<ChessMove>,
}

impl SearchOutcome {
    const fn score_only(score: i32) -> Self {
        Self {
            score,
            best_move: None,
        }
    }
}

/// Tables that survive from one search call to the next within a session.
#[derive(Debug, Clone)]
pub struct SearchContext {
    pub tt: Option<TranspositionTable>,
    pub heuristics: SearchHeuristics,
    pub nodes: u64,
}

impl Default for SearchContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Mate scores are stored relative to the node, not the root.
#[inline]
fn score_to_tt(score: i32, ply: u8) -> i32 {
    if score > MATE_THRESHOLD {
        score + i32::from(ply)
    } else if score < -MATE_THRESHOLD {
        score - i32::from(ply)
    } else {
        score
    }
}

#[inline]
fn score_from_tt(score: i32, ply: u8) -> i32 {
    if score > MATE_THRESHOLD {
        score - i32::from(ply)
    } else if score < -MATE_THRESHOLD {
        score + i32::from(ply)
    } else {
        score
    }
}

/// Null-move pruning is unsound in pawn-only endings.
fn has_non_pawn_material(board: &Board, color: Color) -> bool {
    board
        .pieces_of(color)
        .any(|(_, p)| !matches!(p.kind, PieceKind::Pawn | PieceKind::King))
}

impl SearchContext {
    pub fn new() -> Self {
        Self::with_table(TranspositionTable::default())
    }

    pub fn with_table(tt: TranspositionTable) -> Self {
        Self {
            tt: Some(tt),
            heuristics: SearchHeuristics::default(),
            nodes: 0,
        }
    }

    /// No transposition caching; killers and history still apply.
    pub fn without_table() -> Self {
        Self {
            tt: None,
            heuristics: SearchHeuristics::default(),
            nodes: 0,
        }
    }

    pub fn clear(&mut self) {
        if let Some(tt) = self.tt.as_mut() {
            tt.clear();
        }
        self.heuristics.clear();
        self.nodes = 0;
    }

    /// Search `position` to `depth` plies inside `(alpha, beta)`.
    ///
    /// The score is from the side to move's point of view. Whenever the
    /// position has a legal move and `depth >= 1`, a best move is returned.
    pub fn search(
        &mut self,
        position: &Position,
        depth: u8,
        alpha: i32,
        beta: i32,
        ply: u8,
    ) -> SearchOutcome {
        self.negamax(position, depth, alpha, beta, ply, true)
    }

    fn negamax(
        &mut self,
        position: &Position,
        mut depth: u8,
        mut alpha: i32,
        beta: i32,
        ply: u8,
        allow_null: bool,
    ) -> SearchOutcome {
        self.nodes += 1;
        let side = position.side_to_move;
        let moves = legal_moves(position);
        let in_check = is_king_in_check(&position.board, side);

        if moves.is_empty() {
            let score = if in_check {
                -(MATE_SCORE - i32::from(ply))
            } else {
                0
            };
            return SearchOutcome::score_only(score);
        }

        if in_check {
            depth = depth.saturating_add(1);
        }

        if depth == 0 || ply >= MAX_PLY {
            return SearchOutcome::score_only(self.quiescence(position, alpha, beta, 0));
        }

        if allow_null
            && ply > 0
            && !in_check
            && depth >= NULL_MOVE_MIN_DEPTH
            && has_non_pawn_material(&position.board, side)
        {
            let reduction = if depth >= 5 { 2 } else { 1 };
            let null = position.null_move();
            let score = -self
                .negamax(&null, depth - 1 - reduction, -beta, -beta + 1, ply + 1, false)
                .score;
            if score >= beta {
                return SearchOutcome::score_only(beta);
            }
        }

        let key = compute_zobrist_key(position);
        let mut tt_move = None;
        if let Some(entry) = self.tt.as_mut().and_then(|tt| tt.probe(key)) {
            tt_move = entry.best_move.filter(|m| moves.contains(m));
            let score = score_from_tt(entry.score, ply);
            let usable = TTEntry { score, ..entry };
            if entry.depth >= depth && usable.cuts_window(alpha, beta) && (ply > 0 || tt_move.is_some()) {
                return SearchOutcome {
                    score,
                    best_move: tt_move,
                };
            }
        }

        let killers = self.heuristics.killers_at(depth);
        let mut ordered = score_moves(position, &moves, tt_move, killers, &self.heuristics);
        sort_moves(&mut ordered);

        let original_alpha = alpha;
        let mut best_score = -INFINITY;
        let mut best_move = ordered.first().map(|m| m.mv);

        for (index, candidate) in ordered.iter().enumerate() {
            let child = &candidate.next;
            let score = if index == 0 {
                -self.negamax(child, depth - 1, -beta, -alpha, ply + 1, true).score
            } else {
                let reduce = depth >= LMR_MIN_DEPTH
                    && index > LMR_MIN_INDEX
                    && candidate.is_quiet()
                    && !in_check
                    && !candidate.gives_check;
                let probe_depth = if reduce { depth - 2 } else { depth - 1 };
                let mut score = -self
                    .negamax(child, probe_depth, -alpha - 1, -alpha, ply + 1, true)
                    .score;
                if score > alpha && (reduce || score < beta) {
                    score = -self.negamax(child, depth - 1, -beta, -alpha, ply + 1, true).score;
                }
                score
            };

            if score > best_score {
                best_score = score;
                best_move = Some(candidate.mv);
            }
            if score > alpha {
                alpha = score;
            }
            if alpha >= beta {
                if candidate.is_quiet() {
                    self.heuristics.record_killer(depth, candidate.mv);
                    self.heuristics.record_history(side, candidate.mv, depth);
                }
                break;
            }
        }

        let bound = if best_score <= original_alpha {
            Bound::Upper
        } else if best_score >= beta {
            Bound::Lower
        } else {
            Bound::Exact
        };
        if let Some(tt) = self.tt.as_mut() {
            tt.store(TTEntry {
                key,
                depth,
                score: score_to_tt(best_score, ply),
                bound,
                best_move,
            });
        }

        SearchOutcome {
            score: best_score,
            best_move,
        }
    }

    /// Stand-pat bounded capture search.
    pub fn quiescence(&mut self, position: &Position, mut alpha: i32, beta: i32, qply: u8) -> i32 {
        self.nodes += 1;
        let stand_pat = evaluate_position(position);
        if stand_pat >= beta {
            return beta;
        }
        if stand_pat > alpha {
            alpha = stand_pat;
        }
        if qply >= QUIESCENCE_MAX_PLY {
            return alpha;
        }

        let mut captures: Vec<(i32, Position)> = legal_moves(position)
            .into_iter()
            .filter_map(|mv| position.apply(mv))
            .filter_map(|(next, effect)| {
                let victim = effect.captured?;
                let order = piece_value(victim.piece.kind) * 16 - piece_value(effect.moved.kind);
                Some((order, next))
            })
            .collect();
        captures.sort_by_key(|(order, _)| std::cmp::Reverse(*order));

        for (_, next) in captures {
            let score = -self.quiescence(&next, -beta, -alpha, qply + 1);
            if score >= beta {
                return beta;
            }
            if score > alpha {
                alpha = score;
            }
        }
        alpha
    }
}
