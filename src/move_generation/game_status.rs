use crate::game_state::board::Board;
use crate::game_state::chess_types::{CastlingRights, Color, GameStatus, Square};
use crate::move_generation::legal_move_checks::is_king_in_check;
use crate::move_generation::legal_move_generator::has_any_legal_move;

/// Check/mate/stalemate status for `side_to_move`.
///
/// Repetition and fifty-move draws are layered on by the game state machine.
pub fn compute_game_status(
    board: &Board,
    side_to_move: Color,
    castling_rights: CastlingRights,
    en_passant_target: Option<Square>,
) -> GameStatus {
    let in_check = is_king_in_check(board, side_to_move);
    let can_move = has_any_legal_move(board, side_to_move, castling_rights, en_passant_target);
    match (in_check, can_move) {
        (false, true) => GameStatus::Active,
        (true, true) => GameStatus::Check,
        (true, false) => GameStatus::Checkmate,
        (false, false) => GameStatus::Stalemate,
    }
}

#[cfg(test)]
mod tests {
    use super::compute_game_status;
    use crate::game_state::chess_types::GameStatus;
    use crate::utils::fen_parser::parse_fen;

    fn status_of(fen: &str) -> GameStatus {
        let state = parse_fen(fen).expect("fixture FEN should parse");
        compute_game_status(
            &state.board,
            state.current_player,
            state.castling_rights,
            state.en_passant_target,
        )
    }

    #[test]
    fn classifies_terminal_and_non_terminal_positions() {
        assert_eq!(
            status_of("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"),
            GameStatus::Active
        );
        // Fool's mate.
        assert_eq!(
            status_of("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3"),
            GameStatus::Checkmate
        );
        assert_eq!(status_of("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1"), GameStatus::Stalemate);
        assert_eq!(status_of("4k3/8/8/8/8/8/8/R3K3 b - - 0 1"), GameStatus::Active);
        assert_eq!(status_of("4k3/8/8/8/8/8/8/4RK2 b - - 0 1"), GameStatus::Check);
    }
}
