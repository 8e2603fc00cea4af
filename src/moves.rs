// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use std::fmt::{self, Write};

use crate::board::PieceId;
use crate::types::{Color, PieceKind, Square};

/// A move as the outside world sees it: a piece goes from one square to another. Everything
/// else (captures, castling, promotion) follows from the position it is played in.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Move {
    pub origin: Square,
    pub destination: Square,
}

impl Move {
    pub fn new(origin: Square, destination: Square) -> Move {
        Move {
            origin,
            destination,
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}", self.origin, self.destination)
    }
}

bitflags! {
    pub struct MoveFlags: u8 {
        const EN_PASSANT       = 0b0000_0001;
        const PAWN_DOUBLE_STEP = 0b0000_0010;
        const PROMOTION        = 0b0000_0100;
        const SHORT_CASTLE     = 0b0000_1000;
        const LONG_CASTLE      = 0b0001_0000;
    }
}

/// A piece taken off the board by a move, and where to put it back.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Capture {
    pub piece: PieceId,
    /// Where the piece stood. Differs from the move's destination for en passant.
    pub square: Square,
    /// Position of the piece in the active roster before it was removed.
    pub roster_index: usize,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Promotion {
    /// The pawn that was parked.
    pub pawn: PieceId,
    /// The piece that took its place.
    pub promoted: PieceId,
    pub kind: PieceKind,
}

/// Everything `unmake_move` needs to put the game back exactly as it was. Records must be
/// undone in the reverse order they were made.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MoveRecord {
    pub piece: PieceId,
    pub origin: Square,
    pub destination: Square,
    pub captured: Option<Capture>,
    pub promotion: Option<Promotion>,
    pub flags: MoveFlags,
}

impl MoveRecord {
    pub fn as_move(&self) -> Move {
        Move::new(self.origin, self.destination)
    }

    pub fn is_capture(&self) -> bool {
        self.captured.is_some()
    }

    pub fn is_castle(&self) -> bool {
        self.flags
            .intersects(MoveFlags::SHORT_CASTLE | MoveFlags::LONG_CASTLE)
    }
}

/// The piece a pawn turns into on the far rank.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PromotionChoice {
    Queen,
    Rook,
    Bishop,
    Knight,
}

impl PromotionChoice {
    pub fn kind(self) -> PieceKind {
        match self {
            PromotionChoice::Queen => PieceKind::Queen,
            PromotionChoice::Rook => PieceKind::Rook,
            PromotionChoice::Bishop => PieceKind::Bishop,
            PromotionChoice::Knight => PieceKind::Knight,
        }
    }

    /// Parses the lowercase suffix of coordinate notation, as in `e7e8n`.
    pub fn from_char(c: char) -> Option<PromotionChoice> {
        match c.to_ascii_lowercase() {
            'q' => Some(PromotionChoice::Queen),
            'r' => Some(PromotionChoice::Rook),
            'b' => Some(PromotionChoice::Bishop),
            'n' => Some(PromotionChoice::Knight),
            _ => None,
        }
    }
}

impl fmt::Display for PromotionChoice {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let chr = match self {
            PromotionChoice::Queen => 'Q',
            PromotionChoice::Rook => 'R',
            PromotionChoice::Bishop => 'B',
            PromotionChoice::Knight => 'N',
        };
        f.write_char(chr)
    }
}

/// Decides what a promoting pawn becomes. Consulted by `make_move` whenever a pawn reaches
/// its promotion row.
pub trait PromotionProvider {
    fn choose(&mut self, color: Color, square: Square) -> PromotionChoice;
}

/// A fixed policy: always promote to the same piece.
impl PromotionProvider for PromotionChoice {
    fn choose(&mut self, _color: Color, _square: Square) -> PromotionChoice {
        *self
    }
}

/// Adapts a closure into a `PromotionProvider`, for interactive front ends that need to ask
/// somebody.
pub struct FnPromotion<F>(pub F);

impl<F> PromotionProvider for FnPromotion<F>
where
    F: FnMut(Color, Square) -> PromotionChoice,
{
    fn choose(&mut self, color: Color, square: Square) -> PromotionChoice {
        (self.0)(color, square)
    }
}
