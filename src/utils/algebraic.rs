//! Square conversions for algebraic coordinates.
//!
//! Converts between human-readable coordinates (e.g., `e4`) and the
//! row/column `Square` used by the board.

use std::str::FromStr;

use crate::errors::{ChessError, ChessResult};
use crate::game_state::chess_types::Square;

/// Convert algebraic notation (for example: "e4") to a square.
#[inline]
pub fn algebraic_to_square(square: &str) -> ChessResult<Square> {
    let bytes = square.as_bytes();
    if bytes.len() != 2 {
        return Err(ChessError::InvalidSquare(square.to_owned()));
    }

    let file = bytes[0];
    let rank = bytes[1];
    if !(b'a'..=b'h').contains(&file) || !(b'1'..=b'8').contains(&rank) {
        return Err(ChessError::InvalidSquare(square.to_owned()));
    }

    Square::from_row_col(b'8' - rank, file - b'a')
        .ok_or_else(|| ChessError::InvalidSquare(square.to_owned()))
}

/// Convert a square to algebraic notation (for example: "e4").
#[inline]
pub fn square_to_algebraic(square: Square) -> String {
    square.to_string()
}

impl FromStr for Square {
    type Err = ChessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        algebraic_to_square(s)
    }
}

#[cfg(test)]
mod tests {
    use super::{algebraic_to_square, square_to_algebraic};
    use crate::game_state::chess_types::Square;

    #[test]
    fn round_trip_square_conversions() {
        let a1 = algebraic_to_square("a1").expect("a1 should parse");
        let h8 = algebraic_to_square("h8").expect("h8 should parse");
        assert_eq!((a1.row(), a1.col()), (7, 0));
        assert_eq!((h8.row(), h8.col()), (0, 7));
        assert_eq!(square_to_algebraic(a1), "a1");
        assert_eq!(square_to_algebraic(h8), "h8");
    }

    #[test]
    fn malformed_squares_are_rejected() {
        for bad in ["", "e", "i1", "a9", "a0", "e44", "E4"] {
            assert!(algebraic_to_square(bad).is_err(), "{bad} should be rejected");
        }
        assert!("e4".parse::<Square>().is_ok());
    }
}
