//! Canonical chess-rule constants.

/// Standard chess starting position in Forsyth-Edwards Notation (FEN).
pub const STARTING_POSITION_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Occurrences of one position that end the game in a draw.
pub const REPETITION_DRAW_COUNT: u32 = 3;

/// Half-moves without a pawn move or capture that end the game in a draw.
pub const FIFTY_MOVE_HALF_MOVES: u32 = 100;

/// King column at the start of the game (e-file).
pub const KING_START_COL: u8 = 4;
