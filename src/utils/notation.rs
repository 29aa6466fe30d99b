//! Standard algebraic notation for committed moves.

use crate::game_state::chess_types::{CastleSide, GameStatus, PieceKind, Square};
use crate::game_state::position::Position;
use crate::move_generation::legal_move_apply::MoveEffect;
use crate::move_generation::legal_move_generator::valid_moves;

/// SAN for `effect` played from `before`, with `status` being the opponent's
/// status after the move (`+` for check, `#` for mate).
pub fn san_notation(before: &Position, effect: &MoveEffect, status: GameStatus) -> String {
    let mut out = match effect.rook_shift {
        Some(shift) => match shift.side {
            CastleSide::KingSide => "O-O".to_owned(),
            CastleSide::QueenSide => "O-O-O".to_owned(),
        },
        None if effect.moved.kind == PieceKind::Pawn => pawn_notation(effect),
        None => piece_notation(before, effect),
    };

    match status {
        GameStatus::Checkmate => out.push('#'),
        GameStatus::Check => out.push('+'),
        _ => {}
    }
    out
}

fn pawn_notation(effect: &MoveEffect) -> String {
    let mut out = String::new();
    if effect.is_capture() {
        out.push(effect.from.file_char());
        out.push('x');
    }
    out.push_str(&effect.to.to_string());
    if let Some(kind) = effect.promotion() {
        out.push('=');
        out.push(kind.letter());
    }
    if effect.en_passant {
        out.push_str(" e.p.");
    }
    out
}

fn piece_notation(before: &Position, effect: &MoveEffect) -> String {
    let mut out = String::new();
    out.push(effect.moved.kind.letter());
    if effect.moved.kind != PieceKind::King {
        out.push_str(&disambiguation(effect.from, &rival_origins(before, effect)));
    }
    if effect.is_capture() {
        out.push('x');
    }
    out.push_str(&effect.to.to_string());
    out
}

/// Other pieces of the same kind and colour that could also reach the destination.
fn rival_origins(before: &Position, effect: &MoveEffect) -> Vec<Square> {
    let mover = effect.moved;
    before
        .board
        .pieces_of(mover.color)
        .filter(|&(sq, p)| sq != effect.from && p.kind == mover.kind)
        .filter(|&(sq, _)| {
            valid_moves(
                &before.board,
                sq,
                mover.color,
                before.castling_rights,
                before.en_passant_target,
            )
            .contains(&effect.to)
        })
        .map(|(sq, _)| sq)
        .collect()
}

/// File if it is unique among rivals, else rank, else both.
fn disambiguation(from: Square, rivals: &[Square]) -> String {
    if rivals.is_empty() {
        return String::new();
    }
    if rivals.iter().all(|r| r.col() != from.col()) {
        return from.file_char().to_string();
    }
    if rivals.iter().all(|r| r.row() != from.row()) {
        return from.rank_char().to_string();
    }
    from.to_string()
}
