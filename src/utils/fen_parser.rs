//! FEN-to-GameState parser.
//!
//! Builds a ready-to-play state from a Forsyth-Edwards Notation string. FEN
//! does not record whether a piece has moved, so that flag is inferred: pawns
//! on their start rank and pieces on their opening squares count as unmoved,
//! with kings and rooks additionally needing a matching castling right.
//! The clock fields may be omitted and default to `0 1`.

use crate::errors::{ChessError, ChessResult};
use crate::game_state::board::Board;
use crate::game_state::chess_rules::KING_START_COL;
use crate::game_state::chess_types::*;
use crate::game_state::game_state::GameState;
use crate::utils::algebraic::algebraic_to_square;

const OPENING_BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

fn invalid(fen: &str, reason: impl Into<String>) -> ChessError {
    ChessError::InvalidFen {
        fen: fen.to_owned(),
        reason: reason.into(),
    }
}

pub fn parse_fen(fen: &str) -> ChessResult<GameState> {
    let fields: Vec<&str> = fen.split_whitespace().collect();
    if fields.len() != 4 && fields.len() != 6 {
        return Err(invalid(fen, format!("expected 4 or 6 fields, found {}", fields.len())));
    }

    let side = parse_side_to_move(fen, fields[1])?;
    let rights = parse_castling_rights(fen, fields[2])?;
    let en_passant = parse_en_passant_square(fen, fields[3])?;
    let board = parse_board(fen, fields[0], rights)?;

    let (half_move_clock, full_move_number) = if fields.len() == 6 {
        let half = fields[4]
            .parse::<u32>()
            .map_err(|_| invalid(fen, format!("invalid halfmove clock '{}'", fields[4])))?;
        let full = fields[5]
            .parse::<u32>()
            .map_err(|_| invalid(fen, format!("invalid fullmove number '{}'", fields[5])))?;
        (half, full)
    } else {
        (0, 1)
    };

    Ok(GameState::from_parts(
        board,
        side,
        rights,
        en_passant,
        half_move_clock,
        full_move_number,
    ))
}

fn parse_board(fen: &str, board_part: &str, rights: CastlingRights) -> ChessResult<Board> {
    let ranks: Vec<&str> = board_part.split('/').collect();
    if ranks.len() != 8 {
        return Err(invalid(fen, "board layout must contain 8 ranks"));
    }

    let mut board = Board::empty();
    for (row, rank_str) in ranks.iter().enumerate() {
        let row = row as u8;
        let mut col = 0u8;

        for ch in rank_str.chars() {
            if let Some(empty_count) = ch.to_digit(10) {
                if !(1..=8).contains(&empty_count) {
                    return Err(invalid(fen, format!("invalid empty-square count '{ch}'")));
                }
                col += empty_count as u8;
                if col > 8 {
                    return Err(invalid(fen, format!("rank {} overflows", 8 - row)));
                }
                continue;
            }

            if col >= 8 {
                return Err(invalid(fen, format!("rank {} overflows", 8 - row)));
            }
            let kind = PieceKind::from_letter(ch).ok_or(ChessError::UnknownPiece(ch))?;
            let color = if ch.is_ascii_uppercase() {
                Color::White
            } else {
                Color::Black
            };
            let square = Square::from_row_col(row, col)
                .ok_or_else(|| invalid(fen, format!("rank {} overflows", 8 - row)))?;
            let piece = Piece {
                kind,
                color,
                has_moved: !starts_unmoved(kind, color, square, rights),
            };
            board.set(square, Some(piece));
            col += 1;
        }

        if col != 8 {
            return Err(invalid(fen, format!("rank {} does not cover 8 files", 8 - row)));
        }
    }

    for color in [Color::White, Color::Black] {
        if board.count(PieceKind::King, color) != 1 {
            return Err(invalid(fen, format!("{color:?} must have exactly one king")));
        }
    }
    Ok(board)
}

fn starts_unmoved(kind: PieceKind, color: Color, square: Square, rights: CastlingRights) -> bool {
    let (row, col) = (square.row(), square.col());
    match kind {
        PieceKind::Pawn => row == color.pawn_start_row(),
        PieceKind::King => {
            row == color.home_row()
                && col == KING_START_COL
                && (rights.has(color, CastleSide::KingSide) || rights.has(color, CastleSide::QueenSide))
        }
        PieceKind::Rook => {
            row == color.home_row()
                && [CastleSide::KingSide, CastleSide::QueenSide]
                    .into_iter()
                    .any(|side| col == side.rook_col() && rights.has(color, side))
        }
        _ => row == color.home_row() && OPENING_BACK_RANK[col as usize] == kind,
    }
}

fn parse_side_to_move(fen: &str, side_part: &str) -> ChessResult<Color> {
    match side_part {
        "w" => Ok(Color::White),
        "b" => Ok(Color::Black),
        _ => match side_part.chars().next() {
            Some(ch) if side_part.len() == 1 => Err(ChessError::UnknownColor(ch)),
            _ => Err(invalid(fen, format!("invalid side to move '{side_part}'"))),
        },
    }
}

fn parse_castling_rights(fen: &str, castling_part: &str) -> ChessResult<CastlingRights> {
    if castling_part == "-" {
        return Ok(CastlingRights::NONE);
    }

    let mut rights = CastlingRights::NONE;
    for ch in castling_part.chars() {
        rights = match ch {
            'K' => rights.with(Color::White, CastleSide::KingSide),
            'Q' => rights.with(Color::White, CastleSide::QueenSide),
            'k' => rights.with(Color::Black, CastleSide::KingSide),
            'q' => rights.with(Color::Black, CastleSide::QueenSide),
            _ => return Err(invalid(fen, format!("invalid castling flag '{ch}'"))),
        };
    }
    Ok(rights)
}

fn parse_en_passant_square(fen: &str, en_passant_part: &str) -> ChessResult<Option<Square>> {
    if en_passant_part == "-" {
        return Ok(None);
    }
    let square = algebraic_to_square(en_passant_part)?;
    if square.row() != 2 && square.row() != 5 {
        return Err(invalid(fen, format!("en-passant square '{en_passant_part}' is not on rank 3 or 6")));
    }
    Ok(Some(square))
}

#[cfg(test)]
mod tests {
    use super::parse_fen;
    use crate::errors::ChessError;
    use crate::game_state::board::Board;
    use crate::game_state::chess_rules::STARTING_POSITION_FEN;
    use crate::game_state::chess_types::*;
    use crate::utils::algebraic::algebraic_to_square;

    #[test]
    fn parses_starting_position() {
        let state = parse_fen(STARTING_POSITION_FEN).expect("starting FEN should parse");
        assert_eq!(state.board, Board::initial());
        assert_eq!(state.current_player, Color::White);
        assert_eq!(state.castling_rights, CastlingRights::ALL);
        assert_eq!(state.en_passant_target, None);
        assert_eq!(state.half_move_clock, 0);
        assert_eq!(state.full_move_number, 1);
    }

    #[test]
    fn infers_moved_flags_from_rights() {
        let state = parse_fen("r3k2r/8/8/8/8/8/8/R3K2R w Kq - 0 1").expect("FEN should parse");
        let piece_at = |name: &str| {
            state
                .board
                .get(algebraic_to_square(name).expect("square should parse"))
                .expect("square should be occupied")
        };
        assert!(!piece_at("h1").has_moved);
        assert!(piece_at("a1").has_moved);
        assert!(!piece_at("a8").has_moved);
        assert!(piece_at("h8").has_moved);
        assert!(!piece_at("e1").has_moved);
    }

    #[test]
    fn clocks_are_optional() {
        let state = parse_fen("4k3/8/8/8/8/8/8/4K3 b - -").expect("short FEN should parse");
        assert_eq!(state.current_player, Color::Black);
        assert_eq!(state.full_move_number, 1);
    }

    #[test]
    fn rejects_malformed_input() {
        for bad in [
            "",
            "8/8/8/8/8/8/8 w - - 0 1",
            "4k3/8/8/8/8/8/8/4K3 x - - 0 1",
            "4k3/8/8/8/8/8/8/4K3 w X - 0 1",
            "4k3/8/8/8/8/8/8/4K3 w - e4 0 1",
            "4k3/8/8/8/8/8/8/4K3 w - - z 1",
            "4k3/8/8/8/8/8/8/8 w - - 0 1",
            "4k3/9/8/8/8/8/8/4K3 w - - 0 1",
        ] {
            assert!(parse_fen(bad).is_err(), "{bad:?} should be rejected");
        }
        assert!(matches!(
            parse_fen("4k3/8/8/8/8/8/8/4KX2 w - - 0 1"),
            Err(ChessError::UnknownPiece('X'))
        ));
    }

    #[test]
    fn over_long_ranks_are_errors() {
        for bad in [
            "88888888888888888888888888888888888/8/8/8/8/8/8/4K2k w - - 0 1",
            "8p/8/8/8/8/8/8/4K2k w - - 0 1",
            "4k3/8/8/8/8/8/8/4K3p w - - 0 1",
            "4k3/8/8/8/8/8/8/4K35 w - - 0 1",
        ] {
            assert!(
                matches!(parse_fen(bad), Err(ChessError::InvalidFen { .. })),
                "{bad:?} should be rejected as invalid FEN"
            );
        }
    }

    #[test]
    fn unknown_side_letter_is_reported() {
        assert!(matches!(
            parse_fen("4k3/8/8/8/8/8/8/4K3 x - - 0 1"),
            Err(ChessError::UnknownColor('x'))
        ));
    }
}
