//! 8x8 mailbox board of optional pieces.

use crate::game_state::chess_types::{Color, Piece, PieceKind, Square};

const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [Option<Piece>; 64],
}

impl Default for Board {
    fn default() -> Self {
        Self::empty()
    }
}

impl Board {
    pub const fn empty() -> Self {
        Self { cells: [None; 64] }
    }

    /// Standard starting array with every piece unmoved.
    pub fn initial() -> Self {
        let mut board = Self::empty();
        for (col, kind) in BACK_RANK.iter().enumerate() {
            let col = col as u8;
            for color in [Color::White, Color::Black] {
                if let Some(sq) = Square::from_row_col(color.home_row(), col) {
                    board.set(sq, Some(Piece::new(*kind, color)));
                }
                if let Some(sq) = Square::from_row_col(color.pawn_start_row(), col) {
                    board.set(sq, Some(Piece::new(PieceKind::Pawn, color)));
                }
            }
        }
        board
    }

    #[inline]
    pub fn get(&self, square: Square) -> Option<Piece> {
        self.cells[square.index()]
    }

    #[inline]
    pub fn set(&mut self, square: Square, piece: Option<Piece>) {
        self.cells[square.index()] = piece;
    }

    #[inline]
    pub fn is_empty(&self, square: Square) -> bool {
        self.cells[square.index()].is_none()
    }

    /// Occupied squares with their pieces, in row-major order.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(move |sq| self.get(sq).map(|p| (sq, p)))
    }

    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.pieces().filter(move |(_, p)| p.color == color)
    }

    pub fn find_king(&self, color: Color) -> Option<Square> {
        self.pieces()
            .find(|(_, p)| p.is(PieceKind::King, color))
            .map(|(sq, _)| sq)
    }

    pub fn count(&self, kind: PieceKind, color: Color) -> usize {
        self.pieces().filter(|(_, p)| p.is(kind, color)).count()
    }
}

#[cfg(test)]
mod tests {
    use super::Board;
    use crate::game_state::chess_types::{Color, PieceKind};
    use crate::utils::algebraic::algebraic_to_square;

    #[test]
    fn initial_board_places_thirty_two_unmoved_pieces() {
        let board = Board::initial();
        assert_eq!(board.pieces().count(), 32);
        assert!(board.pieces().all(|(_, p)| !p.has_moved));
        let e1 = algebraic_to_square("e1").expect("e1 should parse");
        let d8 = algebraic_to_square("d8").expect("d8 should parse");
        assert_eq!(board.find_king(Color::White), Some(e1));
        assert_eq!(board.get(d8).map(|p| p.kind), Some(PieceKind::Queen));
        assert_eq!(board.count(PieceKind::Pawn, Color::Black), 8);
    }
}
