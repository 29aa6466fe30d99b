use crate::game_state::board::Board;
use crate::game_state::chess_types::*;
use crate::game_state::game_state::GameState;

pub fn generate_fen(game_state: &GameState) -> String {
    format!(
        "{} {} {} {} {} {}",
        generate_board_field(&game_state.board),
        generate_side_field(game_state.current_player),
        generate_castling_field(game_state.castling_rights),
        generate_en_passant_field(game_state.en_passant_target),
        game_state.half_move_clock,
        game_state.full_move_number
    )
}

/// Repetition key: board, side, rights and en-passant target joined by `:`.
///
/// Clocks and has-moved flags are not part of the key.
pub fn position_key(
    board: &Board,
    side_to_move: Color,
    castling_rights: CastlingRights,
    en_passant_target: Option<Square>,
) -> String {
    format!(
        "{}:{}:{}:{}",
        generate_board_field(board),
        generate_side_field(side_to_move),
        generate_castling_field(castling_rights),
        generate_en_passant_field(en_passant_target)
    )
}

pub fn generate_board_field(board: &Board) -> String {
    let mut out = String::new();

    for row in 0..8u8 {
        let mut empty_count = 0u8;

        for col in 0..8u8 {
            let piece = Square::from_row_col(row, col).and_then(|sq| board.get(sq));
            if let Some(piece) = piece {
                if empty_count > 0 {
                    out.push(char::from(b'0' + empty_count));
                    empty_count = 0;
                }
                out.push(piece_fen_char(piece));
            } else {
                empty_count += 1;
            }
        }

        if empty_count > 0 {
            out.push(char::from(b'0' + empty_count));
        }
        if row != 7 {
            out.push('/');
        }
    }

    out
}

fn piece_fen_char(piece: Piece) -> char {
    match piece.color {
        Color::White => piece.kind.letter(),
        Color::Black => piece.kind.letter().to_ascii_lowercase(),
    }
}

fn generate_side_field(side: Color) -> &'static str {
    match side {
        Color::White => "w",
        Color::Black => "b",
    }
}

fn generate_castling_field(castling_rights: CastlingRights) -> String {
    let flags = [
        (Color::White, CastleSide::KingSide, 'K'),
        (Color::White, CastleSide::QueenSide, 'Q'),
        (Color::Black, CastleSide::KingSide, 'k'),
        (Color::Black, CastleSide::QueenSide, 'q'),
    ];
    let out: String = flags
        .iter()
        .filter(|(color, side, _)| castling_rights.has(*color, *side))
        .map(|(_, _, ch)| *ch)
        .collect();

    if out.is_empty() {
        "-".to_owned()
    } else {
        out
    }
}

fn generate_en_passant_field(en_passant_target: Option<Square>) -> String {
    en_passant_target.map_or_else(|| "-".to_owned(), |sq| sq.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::chess_rules::STARTING_POSITION_FEN;
    use crate::utils::fen_parser::parse_fen;

    #[test]
    fn starting_position_round_trips() {
        assert_eq!(generate_fen(&GameState::new_game()), STARTING_POSITION_FEN);
    }

    #[test]
    fn kiwipete_round_trips() {
        let fen = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";
        let state = parse_fen(fen).expect("fixture FEN should parse");
        assert_eq!(generate_fen(&state), fen);
    }

    #[test]
    fn position_key_ignores_clocks() {
        let a = parse_fen("4k3/8/8/8/8/8/8/4K2R w K - 3 10").expect("fixture FEN should parse");
        let b = parse_fen("4k3/8/8/8/8/8/8/4K2R w K - 40 70").expect("fixture FEN should parse");
        assert_eq!(a.position_key(), b.position_key());
        assert_eq!(a.position_key(), "4k3/8/8/8/8/8/8/4K2R:w:K:-");
    }
}
