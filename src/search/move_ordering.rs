//! Move ordering: TT move, exchange-scored captures, killers, history,
//! checking moves, and two small opening/tactical biases.

use crate::game_state::board::Board;
use crate::game_state::chess_types::{Color, PieceKind, Square};
use crate::game_state::position::Position;
use crate::move_generation::legal_move_apply::MoveEffect;
use crate::move_generation::legal_move_checks::{cheapest_attacker, is_king_in_check};
use crate::moves::move_descriptions::ChessMove;
use crate::search::board_scoring::piece_value;
use crate::search::heuristics::SearchHeuristics;

pub const TT_MOVE_SCORE: i32 = 1_000_000;
const CAPTURE_BASE: i32 = 100_000;
const PROMOTION_BASE: i32 = 90_000;
const KILLER_PRIMARY: i32 = 80_000;
const KILLER_SECONDARY: i32 = 70_000;
const CHECK_BONUS: i32 = 10_000;
const KNIGHT_SACRIFICE_PENALTY: i32 = 3_000;
const GAMBIT_DECLINE_BONUS: i32 = 1_500;
const GAMBIT_ACCEPT_PENALTY: i32 = 1_500;

/// A legal move with everything ordering and pruning need to know about it.
#[derive(Debug, Clone, Copy)]
pub struct ScoredMove {
    pub mv: ChessMove,
    pub next: Position,
    pub effect: MoveEffect,
    pub gives_check: bool,
    pub score: i32,
}

impl ScoredMove {
    /// Neither a capture nor a promotion.
    #[inline]
    pub fn is_quiet(&self) -> bool {
        !self.effect.is_capture() && self.mv.promotion.is_none()
    }
}

/// Simplified exchange estimate for a capture already played on `after`.
///
/// Gains the victim; if the opponent can recapture on the destination the
/// mover is assumed lost.
pub fn static_exchange_estimate(after: &Board, effect: &MoveEffect) -> i32 {
    let victim = effect.captured.map_or(0, |c| piece_value(c.piece.kind));
    let mover = piece_value(effect.placed.kind);
    let opponent = effect.moved.color.opposite();
    match cheapest_attacker(after, effect.to, opponent) {
        Some(_) => victim - mover,
        None => victim,
    }
}

/// A knight stepping onto a defended square for less than its own value.
pub fn is_losing_knight_sacrifice(after: &Board, effect: &MoveEffect) -> bool {
    effect.moved.kind == PieceKind::Knight
        && cheapest_attacker(after, effect.to, effect.moved.color.opposite()).is_some()
        && static_exchange_estimate(after, effect) < 0
}

fn piece_on(board: &Board, name: (u8, u8), kind: PieceKind, color: Color) -> bool {
    Square::from_row_col(name.0, name.1)
        .and_then(|sq| board.get(sq))
        .is_some_and(|p| p.is(kind, color))
}

/// Queen's Gambit structure: white pawns c4/d4 facing a black pawn on d5.
fn is_queens_gambit_offered(board: &Board) -> bool {
    piece_on(board, (4, 2), PieceKind::Pawn, Color::White)
        && piece_on(board, (4, 3), PieceKind::Pawn, Color::White)
        && piece_on(board, (3, 3), PieceKind::Pawn, Color::Black)
}

/// Prefer declining the Queen's Gambit with ...e6 over taking on c4.
pub fn gambit_bias(before: &Board, effect: &MoveEffect) -> i32 {
    if effect.moved.color != Color::Black
        || effect.moved.kind != PieceKind::Pawn
        || !is_queens_gambit_offered(before)
    {
        return 0;
    }
    let from = (effect.from.row(), effect.from.col());
    let to = (effect.to.row(), effect.to.col());
    match (from, to) {
        ((3, 3), (4, 2)) => -GAMBIT_ACCEPT_PENALTY,
        ((1, 4), (2, 4)) => GAMBIT_DECLINE_BONUS,
        _ => 0,
    }
}

/// Apply and score each move. Moves that fail to apply are dropped.
pub fn score_moves(
    position: &Position,
    moves: &[ChessMove],
    tt_move: Option<ChessMove>,
    killers: [Option<ChessMove>; 2],
    heuristics: &SearchHeuristics,
) -> Vec<ScoredMove> {
    let side = position.side_to_move;
    moves
        .iter()
        .filter_map(|&mv| {
            let (next, effect) = position.apply(mv)?;
            let gives_check = is_king_in_check(&next.board, next.side_to_move);
            let mut scored = ScoredMove {
                mv,
                next,
                effect,
                gives_check,
                score: 0,
            };
            scored.score = if tt_move == Some(mv) {
                TT_MOVE_SCORE
            } else {
                order_score(position, &scored, killers, heuristics, side)
            };
            Some(scored)
        })
        .collect()
}

fn order_score(
    position: &Position,
    scored: &ScoredMove,
    killers: [Option<ChessMove>; 2],
    heuristics: &SearchHeuristics,
    side: Color,
) -> i32 {
    let effect = &scored.effect;
    let mut score = 0;

    if effect.is_capture() {
        score += CAPTURE_BASE + static_exchange_estimate(&scored.next.board, effect) * 4;
    }
    if let Some(kind) = scored.mv.promotion {
        score += PROMOTION_BASE + piece_value(kind);
    }
    if scored.is_quiet() {
        if killers[0] == Some(scored.mv) {
            score += KILLER_PRIMARY;
        } else if killers[1] == Some(scored.mv) {
            score += KILLER_SECONDARY;
        }
        score += heuristics.history_score(side, scored.mv) / 2;
    }
    if scored.gives_check {
        score += CHECK_BONUS;
    }
    if is_losing_knight_sacrifice(&scored.next.board, effect) {
        score -= KNIGHT_SACRIFICE_PENALTY;
    }
    score + gambit_bias(&position.board, effect)
}

/// Highest score first.
#[inline]
pub fn sort_moves(moves: &mut [ScoredMove]) {
    moves.sort_by_key(|m| std::cmp::Reverse(m.score));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::move_generation::legal_move_apply::describe_move;
    use crate::move_generation::legal_move_generator::legal_moves;
    use crate::utils::algebraic::algebraic_to_square;
    use crate::utils::fen_parser::parse_fen;

    fn sq(name: &str) -> Square {
        algebraic_to_square(name).expect("fixture square should parse")
    }

    #[test]
    fn exchange_estimate_penalises_defended_targets() {
        // Queen takes a pawn defended by another pawn.
        let state = parse_fen("4k3/8/2p5/3p4/8/8/8/3QK3 w - - 0 1").expect("fixture FEN should parse");
        let effect = describe_move(&state.board, sq("d1"), sq("d5"), None, None)
            .expect("d1 holds the queen");
        let (after, _) = state
            .position()
            .apply(ChessMove::new(sq("d1"), sq("d5")))
            .expect("queen move should apply");
        assert_eq!(static_exchange_estimate(&after.board, &effect), 100 - 900);
    }

    #[test]
    fn winning_capture_is_ordered_before_quiet_moves() {
        let state =
            parse_fen("4k3/8/8/3q4/4P3/8/8/4K3 w - - 0 1").expect("fixture FEN should parse");
        let position = state.position();
        let moves = legal_moves(&position);
        let mut scored = score_moves(&position, &moves, None, [None, None], &SearchHeuristics::default());
        sort_moves(&mut scored);
        assert_eq!(scored[0].mv, ChessMove::new(sq("e4"), sq("d5")));
    }

    #[test]
    fn tt_move_comes_first() {
        let position = Position::initial();
        let moves = legal_moves(&position);
        let tt = ChessMove::new(sq("a2"), sq("a3"));
        let mut scored = score_moves(&position, &moves, Some(tt), [None, None], &SearchHeuristics::default());
        sort_moves(&mut scored);
        assert_eq!(scored[0].mv, tt);
        assert_eq!(scored[0].score, TT_MOVE_SCORE);
    }

    #[test]
    fn knight_sacrifice_into_pawn_defence_is_flagged() {
        // The pawn on e5 is defended from d6.
        let state =
            parse_fen("4k3/8/3p4/4p3/8/5N2/8/4K3 w - - 0 1").expect("fixture FEN should parse");
        let (after, effect) = state
            .position()
            .apply(ChessMove::new(sq("f3"), sq("e5")))
            .expect("knight capture should apply");
        assert!(is_losing_knight_sacrifice(&after.board, &effect));
    }

    #[test]
    fn queens_gambit_prefers_declining() {
        let state = parse_fen("rnbqkbnr/ppp1pppp/8/3p4/2PP4/8/PP2PPPP/RNBQKBNR b KQkq c3 0 2")
            .expect("fixture FEN should parse");
        let accept = describe_move(&state.board, sq("d5"), sq("c4"), None, None)
            .expect("d5 holds a pawn");
        let decline = describe_move(&state.board, sq("e7"), sq("e6"), None, None)
            .expect("e7 holds a pawn");
        assert!(gambit_bias(&state.board, &accept) < 0);
        assert!(gambit_bias(&state.board, &decline) > 0);
    }
}
