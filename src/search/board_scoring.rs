//! Static position evaluation.
//!
//! Every term is computed white-minus-black and flipped for the side asked
//! about at the very end. Piece-square values blend middlegame and endgame
//! tables by a material phase counter; king safety fades with the same
//! phase.

use crate::game_state::board::Board;
use crate::game_state::chess_types::{Color, PieceKind, Square};
use crate::game_state::position::Position;
use crate::move_generation::legal_move_checks::attackers_to_square;
use crate::moves::king_moves::KING_OFFSETS;
use crate::search::piece_square_tables::{endgame_value, middlegame_value};

pub const MATE_SCORE: i32 = 30000;

/// Phase value with every minor, rook and queen still on the board is capped here.
pub const MAX_PHASE: i32 = 16;

const DOUBLED_PAWN_PENALTY: i32 = 12;
const ISOLATED_PAWN_PENALTY: i32 = 10;
const PASSED_PAWN_STEP: i32 = 6;
const BISHOP_PAIR_BONUS: i32 = 15;
const ROOK_OPEN_FILE_BONUS: i32 = 12;
const ROOK_SEMI_OPEN_FILE_BONUS: i32 = 6;
const SHELTER_PAWN_VALUE: i32 = 5;
const KING_RING_PAWN_ATTACK: i32 = 4;
const KING_RING_KNIGHT_ATTACK: i32 = 6;
const KING_RING_SLIDER_ATTACK: i32 = 5;
const KING_OPEN_FILE_PENALTY: i32 = 10;

#[inline]
pub const fn piece_value(kind: PieceKind) -> i32 {
    match kind {
        PieceKind::Pawn => 100,
        PieceKind::Knight => 320,
        PieceKind::Bishop => 330,
        PieceKind::Rook => 500,
        PieceKind::Queen => 900,
        PieceKind::King => 0,
    }
}

#[inline]
const fn sign(color: Color) -> i32 {
    match color {
        Color::White => 1,
        Color::Black => -1,
    }
}

/// Signed score, positive favouring `side`.
pub fn evaluate(board: &Board, side: Color) -> i32 {
    let phase = game_phase(board);
    let white_minus_black = material_white_minus_black(board)
        + tapered_tables_white_minus_black(board, phase)
        + pawn_structure_white_minus_black(board)
        + bishop_pair_white_minus_black(board)
        + rook_files_white_minus_black(board)
        + king_safety_white_minus_black(board, phase);
    white_minus_black * sign(side)
}

#[inline]
pub fn evaluate_position(position: &Position) -> i32 {
    evaluate(&position.board, position.side_to_move)
}

/// Material phase: minors 1, rooks 2, queens 4, capped at `MAX_PHASE`.
pub fn game_phase(board: &Board) -> i32 {
    let raw: i32 = board
        .pieces()
        .map(|(_, p)| match p.kind {
            PieceKind::Knight | PieceKind::Bishop => 1,
            PieceKind::Rook => 2,
            PieceKind::Queen => 4,
            _ => 0,
        })
        .sum();
    raw.min(MAX_PHASE)
}

fn material_white_minus_black(board: &Board) -> i32 {
    board
        .pieces()
        .map(|(_, p)| piece_value(p.kind) * sign(p.color))
        .sum()
}

fn tapered_tables_white_minus_black(board: &Board, phase: i32) -> i32 {
    let (mut mg, mut eg) = (0, 0);
    for (sq, p) in board.pieces() {
        mg += middlegame_value(p.kind, p.color, sq) * sign(p.color);
        eg += endgame_value(p.kind, p.color, sq) * sign(p.color);
    }
    (mg * phase + eg * (MAX_PHASE - phase)) / MAX_PHASE
}

fn pawn_files(board: &Board, color: Color) -> [i32; 8] {
    let mut files = [0; 8];
    for (sq, p) in board.pieces() {
        if p.is(PieceKind::Pawn, color) {
            files[sq.col() as usize] += 1;
        }
    }
    files
}

/// No enemy pawn ahead of the pawn on its own or an adjacent file.
fn is_passed(board: &Board, square: Square, color: Color) -> bool {
    let enemy = color.opposite();
    let col = square.col() as i8;
    let mut row = square.row() as i8 + color.forward();
    while (0..8).contains(&row) {
        for c in [col - 1, col, col + 1] {
            let blocked = Square::from_row_col(row as u8, c as u8)
                .filter(|_| (0..8).contains(&c))
                .and_then(|sq| board.get(sq))
                .is_some_and(|p| p.is(PieceKind::Pawn, enemy));
            if blocked {
                return false;
            }
        }
        row += color.forward();
    }
    true
}

fn pawn_structure_white_minus_black(board: &Board) -> i32 {
    let mut score = 0;
    for color in [Color::White, Color::Black] {
        let files = pawn_files(board, color);
        let mut own = 0;
        for col in 0..8 {
            let count = files[col];
            if count > 1 {
                own -= DOUBLED_PAWN_PENALTY * (count - 1);
            }
            let left = if col == 0 { 0 } else { files[col - 1] };
            let right = if col == 7 { 0 } else { files[col + 1] };
            if count > 0 && left + right == 0 {
                own -= ISOLATED_PAWN_PENALTY;
            }
        }
        for (sq, p) in board.pieces_of(color) {
            if p.kind == PieceKind::Pawn && is_passed(board, sq, color) {
                // Rows still to travel before the pawn's second-to-last step.
                let advanced = match color {
                    Color::White => 6 - sq.row() as i32,
                    Color::Black => sq.row() as i32 - 1,
                };
                own += (PASSED_PAWN_STEP * advanced).max(0);
            }
        }
        score += own * sign(color);
    }
    score
}

fn bishop_pair_white_minus_black(board: &Board) -> i32 {
    [Color::White, Color::Black]
        .into_iter()
        .filter(|&c| board.count(PieceKind::Bishop, c) >= 2)
        .map(|c| BISHOP_PAIR_BONUS * sign(c))
        .sum()
}

fn rook_files_white_minus_black(board: &Board) -> i32 {
    let white = pawn_files(board, Color::White);
    let black = pawn_files(board, Color::Black);
    let mut score = 0;
    for (sq, p) in board.pieces() {
        if p.kind != PieceKind::Rook {
            continue;
        }
        let col = sq.col() as usize;
        let (own, theirs) = match p.color {
            Color::White => (white[col], black[col]),
            Color::Black => (black[col], white[col]),
        };
        let bonus = match (own, theirs) {
            (0, 0) => ROOK_OPEN_FILE_BONUS,
            (0, _) => ROOK_SEMI_OPEN_FILE_BONUS,
            _ => 0,
        };
        score += bonus * sign(p.color);
    }
    score
}

fn king_shelter(board: &Board, king: Square, color: Color) -> i32 {
    let shield = [-1i8, 0, 1]
        .into_iter()
        .filter_map(|d_col| king.offset(color.forward(), d_col))
        .filter(|&sq| board.get(sq).is_some_and(|p| p.is(PieceKind::Pawn, color)))
        .count() as i32;
    shield * SHELTER_PAWN_VALUE - (3 - shield) * SHELTER_PAWN_VALUE
}

/// Attack weight of enemy pieces into the king's ring plus pawnless files around it.
fn king_danger(board: &Board, king: Square, color: Color) -> i32 {
    let enemy = color.opposite();
    let mut danger = 0;
    let ring = std::iter::once(king).chain(
        KING_OFFSETS
            .iter()
            .filter_map(|&(d_row, d_col)| king.offset(d_row, d_col)),
    );
    for sq in ring {
        for (_, attacker) in attackers_to_square(board, sq, enemy) {
            danger += match attacker.kind {
                PieceKind::Pawn => KING_RING_PAWN_ATTACK,
                PieceKind::Knight => KING_RING_KNIGHT_ATTACK,
                PieceKind::Bishop | PieceKind::Rook | PieceKind::Queen => KING_RING_SLIDER_ATTACK,
                PieceKind::King => 0,
            };
        }
    }

    let files = pawn_files(board, color);
    let col = king.col() as i8;
    for c in [col - 1, col, col + 1] {
        if (0..8).contains(&c) && files[c as usize] == 0 {
            danger += KING_OPEN_FILE_PENALTY;
        }
    }
    danger
}

fn king_safety_white_minus_black(board: &Board, phase: i32) -> i32 {
    let mut score = 0;
    for color in [Color::White, Color::Black] {
        let Some(king) = board.find_king(color) else {
            continue;
        };
        let safety = king_shelter(board, king, color) - king_danger(board, king, color);
        score += safety * phase / MAX_PHASE * sign(color);
    }
    score
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::fen_parser::parse_fen;

    fn eval_fen(fen: &str, side: Color) -> i32 {
        let state = parse_fen(fen).expect("fixture FEN should parse");
        evaluate(&state.board, side)
    }

    #[test]
    fn start_position_is_balanced() {
        assert_eq!(evaluate(&Board::initial(), Color::White), 0);
        assert_eq!(evaluate(&Board::initial(), Color::Black), 0);
    }

    #[test]
    fn lone_queen_is_strictly_favoured() {
        let white = eval_fen("4k3/8/8/8/8/8/8/3QK3 w - - 0 1", Color::White);
        assert!(white > 0);
        assert_eq!(eval_fen("4k3/8/8/8/8/8/8/3QK3 w - - 0 1", Color::Black), -white);
    }

    #[test]
    fn doubled_pawns_lower_the_score() {
        let healthy = eval_fen("4k3/8/8/8/8/8/3PP3/4K3 w - - 0 1", Color::White);
        let doubled = eval_fen("4k3/8/8/8/8/4P3/4P3/4K3 w - - 0 1", Color::White);
        assert!(doubled < healthy, "doubled {doubled} should be below healthy {healthy}");
    }

    #[test]
    fn rook_on_open_file_beats_rook_behind_own_pawn() {
        let open = eval_fen("4k3/8/8/8/8/8/P7/3RK3 w - - 0 1", Color::White);
        let closed = eval_fen("4k3/8/8/8/8/8/P7/R3K3 w - - 0 1", Color::White);
        assert!(open > closed, "open {open} should beat closed {closed}");
    }

    #[test]
    fn bishop_pair_earns_a_bonus() {
        let board = parse_fen("4k3/8/8/8/8/8/8/2B1KB2 w - - 0 1")
            .expect("fixture FEN should parse")
            .board;
        assert_eq!(bishop_pair_white_minus_black(&board), BISHOP_PAIR_BONUS);
    }

    #[test]
    fn passed_pawn_outscores_blocked_pawn() {
        let passed = parse_fen("4k3/8/8/4P3/8/8/8/4K3 w - - 0 1")
            .expect("fixture FEN should parse")
            .board;
        let blocked = parse_fen("4k3/3p4/8/4P3/8/8/8/4K3 w - - 0 1")
            .expect("fixture FEN should parse")
            .board;
        assert!(pawn_structure_white_minus_black(&passed) > 0);
        assert!(
            pawn_structure_white_minus_black(&passed) > pawn_structure_white_minus_black(&blocked)
        );
    }

    #[test]
    fn phase_is_capped() {
        assert_eq!(game_phase(&Board::initial()), MAX_PHASE);
        assert_eq!(game_phase(&Board::empty()), 0);
    }

    #[test]
    fn king_with_pawn_shield_is_safer() {
        let sheltered = parse_fen("r5k1/5ppp/8/8/8/8/5PPP/R5K1 w - - 0 1")
            .expect("fixture FEN should parse")
            .board;
        let bare = parse_fen("r5k1/5ppp/8/8/8/8/PPP5/R5K1 w - - 0 1")
            .expect("fixture FEN should parse")
            .board;
        let phase = MAX_PHASE;
        assert!(
            king_safety_white_minus_black(&sheltered, phase)
                > king_safety_white_minus_black(&bare, phase)
        );
    }
}
