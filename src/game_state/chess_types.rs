//! Value types shared by the board, rules, and search layers.
//!
//! Squares use the board's natural row/column layout: row 0 is rank 8 as
//! seen from white, column 0 is the a-file.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Side to move / piece owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    White,
    Black,
}

impl Color {
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Color::White => 0,
            Color::Black => 1,
        }
    }

    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Row delta of a forward pawn step.
    #[inline]
    pub const fn forward(self) -> i8 {
        match self {
            Color::White => -1,
            Color::Black => 1,
        }
    }

    /// Row holding this side's king and rooks at the start of a game.
    #[inline]
    pub const fn home_row(self) -> u8 {
        match self {
            Color::White => 7,
            Color::Black => 0,
        }
    }

    #[inline]
    pub const fn pawn_start_row(self) -> u8 {
        match self {
            Color::White => 6,
            Color::Black => 1,
        }
    }

    #[inline]
    pub const fn promotion_row(self) -> u8 {
        match self {
            Color::White => 0,
            Color::Black => 7,
        }
    }

    /// Row a pawn must stand on to capture en passant.
    #[inline]
    pub const fn en_passant_row(self) -> u8 {
        match self {
            Color::White => 3,
            Color::Black => 4,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    pub const ALL: [PieceKind; 6] = [
        PieceKind::Pawn,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Rook,
        PieceKind::Queen,
        PieceKind::King,
    ];

    /// Kinds a pawn may promote to, strongest first.
    pub const PROMOTIONS: [PieceKind; 4] = [
        PieceKind::Queen,
        PieceKind::Rook,
        PieceKind::Bishop,
        PieceKind::Knight,
    ];

    #[inline]
    pub const fn index(self) -> usize {
        match self {
            PieceKind::Pawn => 0,
            PieceKind::Knight => 1,
            PieceKind::Bishop => 2,
            PieceKind::Rook => 3,
            PieceKind::Queen => 4,
            PieceKind::King => 5,
        }
    }

    #[inline]
    pub const fn is_promotion_target(self) -> bool {
        matches!(
            self,
            PieceKind::Queen | PieceKind::Rook | PieceKind::Bishop | PieceKind::Knight
        )
    }

    /// Upper-case notation letter (`P` for pawns, used by FEN).
    pub const fn letter(self) -> char {
        match self {
            PieceKind::Pawn => 'P',
            PieceKind::Knight => 'N',
            PieceKind::Bishop => 'B',
            PieceKind::Rook => 'R',
            PieceKind::Queen => 'Q',
            PieceKind::King => 'K',
        }
    }

    pub fn from_letter(letter: char) -> Option<Self> {
        match letter.to_ascii_uppercase() {
            'P' => Some(PieceKind::Pawn),
            'N' => Some(PieceKind::Knight),
            'B' => Some(PieceKind::Bishop),
            'R' => Some(PieceKind::Rook),
            'Q' => Some(PieceKind::Queen),
            'K' => Some(PieceKind::King),
            _ => None,
        }
    }
}

/// A piece standing on the board. Replaced, never mutated, when it moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub color: Color,
    pub has_moved: bool,
}

impl Piece {
    #[inline]
    pub const fn new(kind: PieceKind, color: Color) -> Self {
        Self {
            kind,
            color,
            has_moved: false,
        }
    }

    #[inline]
    pub const fn moved(self) -> Self {
        Self {
            has_moved: true,
            ..self
        }
    }

    #[inline]
    pub fn is(self, kind: PieceKind, color: Color) -> bool {
        self.kind == kind && self.color == color
    }
}

/// One of the 64 board squares. Index is `row * 8 + col`, row 0 = rank 8.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square(u8);

impl Square {
    #[inline]
    pub const fn from_row_col(row: u8, col: u8) -> Option<Self> {
        if row < 8 && col < 8 {
            Some(Self(row * 8 + col))
        } else {
            None
        }
    }

    /// Offset a square by a row/column delta, returning `None` off the board.
    #[inline]
    pub fn offset(self, d_row: i8, d_col: i8) -> Option<Self> {
        let row = self.row() as i8 + d_row;
        let col = self.col() as i8 + d_col;
        if (0..8).contains(&row) && (0..8).contains(&col) {
            Some(Self(row as u8 * 8 + col as u8))
        } else {
            None
        }
    }

    #[inline]
    pub const fn from_index(index: u8) -> Option<Self> {
        if index < 64 {
            Some(Self(index))
        } else {
            None
        }
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub const fn row(self) -> u8 {
        self.0 / 8
    }

    #[inline]
    pub const fn col(self) -> u8 {
        self.0 % 8
    }

    /// Rank number 1..=8.
    #[inline]
    pub const fn rank(self) -> u8 {
        8 - self.row()
    }

    #[inline]
    pub const fn file_char(self) -> char {
        (b'a' + self.col()) as char
    }

    #[inline]
    pub const fn rank_char(self) -> char {
        (b'0' + self.rank()) as char
    }

    pub fn all() -> impl Iterator<Item = Square> {
        (0u8..64).map(Square)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file_char(), self.rank_char())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CastleSide {
    KingSide,
    QueenSide,
}

impl CastleSide {
    /// Column of the rook taking part in this castle.
    #[inline]
    pub const fn rook_col(self) -> u8 {
        match self {
            CastleSide::KingSide => 7,
            CastleSide::QueenSide => 0,
        }
    }
}

pub const CASTLE_WHITE_KINGSIDE: u8 = 1 << 0;
pub const CASTLE_WHITE_QUEENSIDE: u8 = 1 << 1;
pub const CASTLE_BLACK_KINGSIDE: u8 = 1 << 2;
pub const CASTLE_BLACK_QUEENSIDE: u8 = 1 << 3;

/// Per-colour king-side / queen-side castling permission flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CastlingRights(u8);

impl CastlingRights {
    pub const ALL: CastlingRights = CastlingRights(0x0F);
    pub const NONE: CastlingRights = CastlingRights(0);

    #[inline]
    pub const fn flag(color: Color, side: CastleSide) -> u8 {
        match (color, side) {
            (Color::White, CastleSide::KingSide) => CASTLE_WHITE_KINGSIDE,
            (Color::White, CastleSide::QueenSide) => CASTLE_WHITE_QUEENSIDE,
            (Color::Black, CastleSide::KingSide) => CASTLE_BLACK_KINGSIDE,
            (Color::Black, CastleSide::QueenSide) => CASTLE_BLACK_QUEENSIDE,
        }
    }

    #[inline]
    pub const fn from_bits(bits: u8) -> Self {
        Self(bits & 0x0F)
    }

    #[inline]
    pub const fn bits(self) -> u8 {
        self.0
    }

    #[inline]
    pub const fn has(self, color: Color, side: CastleSide) -> bool {
        self.0 & Self::flag(color, side) != 0
    }

    #[inline]
    pub const fn with(self, color: Color, side: CastleSide) -> Self {
        Self(self.0 | Self::flag(color, side))
    }

    #[inline]
    pub const fn without(self, color: Color, side: CastleSide) -> Self {
        Self(self.0 & !Self::flag(color, side))
    }

    #[inline]
    pub const fn without_color(self, color: Color) -> Self {
        self.without(color, CastleSide::KingSide)
            .without(color, CastleSide::QueenSide)
    }
}

impl Default for CastlingRights {
    fn default() -> Self {
        Self::ALL
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameStatus {
    Active,
    Check,
    Checkmate,
    Stalemate,
    Draw,
}

impl GameStatus {
    /// Checkmate, stalemate and draws end the game.
    #[inline]
    pub const fn is_terminal(self) -> bool {
        matches!(
            self,
            GameStatus::Checkmate | GameStatus::Stalemate | GameStatus::Draw
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GameMode {
    #[default]
    HumanVsHuman,
    HumanVsComputer,
}

impl GameMode {
    pub const fn toggled(self) -> Self {
        match self {
            GameMode::HumanVsHuman => GameMode::HumanVsComputer,
            GameMode::HumanVsComputer => GameMode::HumanVsHuman,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Orientation {
    #[default]
    WhiteBottom,
    BlackBottom,
}

impl Orientation {
    pub const fn toggled(self) -> Self {
        match self {
            Orientation::WhiteBottom => Orientation::BlackBottom,
            Orientation::BlackBottom => Orientation::WhiteBottom,
        }
    }
}

/// Playing style of the computer opponent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayStyle {
    Aggressive,
    Positional,
    #[default]
    Balanced,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn square_layout_puts_rank_eight_on_row_zero() {
        let a8 = Square::from_row_col(0, 0).expect("a8 should exist");
        let h1 = Square::from_row_col(7, 7).expect("h1 should exist");
        assert_eq!(a8.to_string(), "a8");
        assert_eq!(h1.to_string(), "h1");
        assert_eq!(a8.offset(-1, 0), None);
        assert_eq!(h1.offset(-1, -1).map(|s| s.to_string()), Some("g2".into()));
    }

    #[test]
    fn castling_rights_flags_clear_independently() {
        let rights = CastlingRights::ALL.without(Color::White, CastleSide::KingSide);
        assert!(!rights.has(Color::White, CastleSide::KingSide));
        assert!(rights.has(Color::White, CastleSide::QueenSide));
        assert!(rights.has(Color::Black, CastleSide::KingSide));
        assert_eq!(rights.without_color(Color::Black).bits(), CASTLE_WHITE_QUEENSIDE);
    }
}
