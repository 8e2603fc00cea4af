// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use num_traits::{FromPrimitive, ToPrimitive};
use std::convert::TryFrom;
use std::error::Error;
use std::fmt::{self, Display, Write};
use std::str::FromStr;

// TableIndex is a trait for all types that can serve as an index into a table.
// It is common to use these types as indices into tables, so this trait allows
// any type implementing To and FromPrimitive to be used as table indices.
pub trait TableIndex {
    fn as_index(self) -> usize;
    fn from_index(idx: usize) -> Self;
}

impl<T> TableIndex for T
where
    T: FromPrimitive + ToPrimitive,
{
    fn as_index(self) -> usize {
        self.to_u32().unwrap() as usize
    }

    fn from_index(idx: usize) -> T {
        <T as FromPrimitive>::from_u64(idx as u64).unwrap()
    }
}

/// A square on the board, addressed by row and column. Row 0 is White's back rank and
/// column 0 is the a-file, so `Square::new(3, 4)` is e4.
#[derive(
    Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Square {
    row: u8,
    col: u8,
}

impl Square {
    pub fn new(row: u8, col: u8) -> Square {
        debug_assert!(row < 8 && col < 8, "square out of bounds: ({}, {})", row, col);
        Square { row, col }
    }

    /// Returns the square `(row, col)` if it lies on the board.
    pub fn checked(row: i32, col: i32) -> Option<Square> {
        if row < 0 || row > 7 || col < 0 || col > 7 {
            return None;
        }

        Some(Square::new(row as u8, col as u8))
    }

    pub fn row(self) -> u8 {
        self.row
    }

    pub fn col(self) -> u8 {
        self.col
    }

    /// The square `dr` rows and `dc` columns away from this one, or `None` if that would
    /// leave the board.
    pub fn offset(self, dr: i32, dc: i32) -> Option<Square> {
        Square::checked(self.row as i32 + dr, self.col as i32 + dc)
    }

    pub fn as_index(self) -> usize {
        self.row as usize * 8 + self.col as usize
    }

    pub fn from_index(idx: usize) -> Square {
        Square::new((idx / 8) as u8, (idx % 8) as u8)
    }

    /// Iterates over every square, a1 first and h8 last, row by row.
    pub fn all() -> impl Iterator<Item = Square> {
        (0..64).map(Square::from_index)
    }
}

impl Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_char((b'a' + self.col) as char)?;
        f.write_char((b'1' + self.row) as char)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SquareParseError;

impl Display for SquareParseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "invalid square")
    }
}

impl Error for SquareParseError {}

impl FromStr for Square {
    type Err = SquareParseError;

    fn from_str(s: &str) -> Result<Square, SquareParseError> {
        let bytes = s.as_bytes();
        if bytes.len() != 2 {
            return Err(SquareParseError);
        }

        let (file, rank) = (bytes[0], bytes[1]);
        if !(b'a'..=b'h').contains(&file) || !(b'1'..=b'8').contains(&rank) {
            return Err(SquareParseError);
        }

        Ok(Square::new(rank - b'1', file - b'a'))
    }
}

#[derive(
    Copy, Clone, Debug, PartialEq, Eq, Hash, FromPrimitive, ToPrimitive, Serialize, Deserialize,
)]
pub enum Color {
    White,
    Black,
}

impl Color {
    pub fn toggle(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Row delta of a forward pawn step.
    pub fn forward(self) -> i32 {
        match self {
            Color::White => 1,
            Color::Black => -1,
        }
    }

    /// Row of this color's king and rooks at the start of the game.
    pub fn back_row(self) -> u8 {
        match self {
            Color::White => 0,
            Color::Black => 7,
        }
    }

    /// Row of this color's pawns at the start of the game.
    pub fn pawn_row(self) -> u8 {
        match self {
            Color::White => 1,
            Color::Black => 6,
        }
    }

    /// Row on which this color's pawns promote.
    pub fn promotion_row(self) -> u8 {
        self.toggle().back_row()
    }
}

impl Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let chr = match self {
            Color::White => 'w',
            Color::Black => 'b',
        };
        f.write_char(chr)
    }
}

pub static COLORS: [Color; 2] = [Color::White, Color::Black];

#[derive(
    Copy, Clone, Debug, PartialEq, Eq, Hash, FromPrimitive, ToPrimitive, Serialize, Deserialize,
)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    pub fn is_sliding(self) -> bool {
        match self {
            PieceKind::Bishop | PieceKind::Rook | PieceKind::Queen => true,
            _ => false,
        }
    }

    /// Uppercase letter used by algebraic notation. Pawns have none.
    pub fn notation_letter(self) -> Option<char> {
        match self {
            PieceKind::Pawn => None,
            PieceKind::Knight => Some('N'),
            PieceKind::Bishop => Some('B'),
            PieceKind::Rook => Some('R'),
            PieceKind::Queen => Some('Q'),
            PieceKind::King => Some('K'),
        }
    }
}

impl Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let chr = match self {
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        };
        f.write_char(chr)
    }
}

pub static PIECE_KINDS: [PieceKind; 6] = [
    PieceKind::Pawn,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Rook,
    PieceKind::Queen,
    PieceKind::King,
];

/// A piece's kind and color without any of its game state. This is what FEN and board
/// diagrams deal in.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Figure {
    pub kind: PieceKind,
    pub color: Color,
}

impl Figure {
    pub fn new(kind: PieceKind, color: Color) -> Figure {
        Figure { kind, color }
    }
}

impl TryFrom<char> for Figure {
    type Error = ();

    fn try_from(c: char) -> Result<Self, Self::Error> {
        let color = if c.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };

        let kind = match c.to_ascii_lowercase() {
            'p' => PieceKind::Pawn,
            'n' => PieceKind::Knight,
            'b' => PieceKind::Bishop,
            'r' => PieceKind::Rook,
            'q' => PieceKind::Queen,
            'k' => PieceKind::King,
            _ => return Err(()),
        };

        Ok(Figure::new(kind, color))
    }
}

impl Display for Figure {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let chr = match self.kind {
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        };

        match self.color {
            Color::White => f.write_char(chr.to_ascii_uppercase()),
            Color::Black => f.write_char(chr),
        }
    }
}
