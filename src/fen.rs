// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Scenario setup from FEN.
//!
//! FEN describes a position, while a `GameState` carries a little history: how often each
//! piece has moved and when a pawn last advanced two squares. The translation goes like
//! this:
//!
//!   * castling rights become move counters. A king or rook starts with zero moves only if
//!     some castling right still names it, and with one move otherwise,
//!   * pawns on their starting row have never moved, all other pawns have moved once,
//!   * the en passant square marks the pawn that just advanced as having done so on the
//!     current half-move,
//!   * the full-move number becomes the half-move count. The half-move clock is checked
//!     for syntax and otherwise ignored, since the fifty-move rule isn't implemented.
use std::convert::TryFrom;
use std::error::Error;
use std::fmt::{self, Write};

use crate::game::GameState;
use crate::piece::{CastleSide, Piece};
use crate::types::{Color, Figure, PieceKind, Square, COLORS};

pub const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Possible errors that can arise when parsing a FEN string into a `GameState`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FenParseError {
    UnexpectedChar(char),
    UnexpectedEnd,
    InvalidDigit,
    FileDoesNotSumToEight,
    UnknownPiece,
    InvalidSideToMove,
    InvalidCastle,
    InvalidEnPassant,
    EmptyHalfmove,
    InvalidHalfmove,
    EmptyFullmove,
    InvalidFullmove,
    MissingKing(Color),
    TooManyKings(Color),
}

impl fmt::Display for FenParseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            FenParseError::UnexpectedChar(c) => write!(f, "unexpected character '{}'", c),
            FenParseError::UnexpectedEnd => write!(f, "unexpected end of input"),
            FenParseError::InvalidDigit => write!(f, "invalid empty square count"),
            FenParseError::FileDoesNotSumToEight => write!(f, "rank does not have eight files"),
            FenParseError::UnknownPiece => write!(f, "unknown piece"),
            FenParseError::InvalidSideToMove => write!(f, "invalid side to move"),
            FenParseError::InvalidCastle => write!(f, "invalid castling rights"),
            FenParseError::InvalidEnPassant => write!(f, "invalid en passant square"),
            FenParseError::EmptyHalfmove => write!(f, "missing halfmove clock"),
            FenParseError::InvalidHalfmove => write!(f, "invalid halfmove clock"),
            FenParseError::EmptyFullmove => write!(f, "missing fullmove number"),
            FenParseError::InvalidFullmove => write!(f, "invalid fullmove number"),
            FenParseError::MissingKing(color) => write!(f, "{:?} has no king", color),
            FenParseError::TooManyKings(color) => write!(f, "{:?} has more than one king", color),
        }
    }
}

impl Error for FenParseError {}

bitflags! {
    struct CastleRights: u8 {
        const NONE = 0;
        const WHITE_SHORT = 0b0001;
        const WHITE_LONG  = 0b0010;
        const BLACK_SHORT = 0b0100;
        const BLACK_LONG  = 0b1000;
    }
}

impl CastleRights {
    fn of(color: Color, side: CastleSide) -> CastleRights {
        match (color, side) {
            (Color::White, CastleSide::Short) => CastleRights::WHITE_SHORT,
            (Color::White, CastleSide::Long) => CastleRights::WHITE_LONG,
            (Color::Black, CastleSide::Short) => CastleRights::BLACK_SHORT,
            (Color::Black, CastleSide::Long) => CastleRights::BLACK_LONG,
        }
    }
}

const CASTLE_SIDES: [CastleSide; 2] = [CastleSide::Short, CastleSide::Long];
const KING_COL: u8 = 4;

type Placement = [[Option<Figure>; 8]; 8];

impl GameState {
    /// Constructs a game from a FEN representation of a board position.
    pub fn from_fen<S: AsRef<str>>(fen: S) -> Result<GameState, FenParseError> {
        use std::iter::Peekable;
        use std::str::Chars;

        type Stream<'a> = Peekable<Chars<'a>>;

        fn eat(iter: &mut Stream, expected: char) -> Result<(), FenParseError> {
            match iter.next() {
                Some(c) if c == expected => Ok(()),
                Some(c) => Err(FenParseError::UnexpectedChar(c)),
                None => Err(FenParseError::UnexpectedEnd),
            }
        }

        fn advance(iter: &mut Stream) {
            let _ = iter.next();
        }

        fn peek(iter: &mut Stream) -> Result<char, FenParseError> {
            iter.peek().cloned().ok_or(FenParseError::UnexpectedEnd)
        }

        fn eat_placement(iter: &mut Stream) -> Result<Placement, FenParseError> {
            let mut placement = [[None; 8]; 8];
            for row in (0..8u8).rev() {
                let mut col = 0u8;
                while col < 8 {
                    let c = peek(iter)?;
                    // digits 1 through 8 indicate empty squares.
                    if c.is_digit(10) {
                        if c < '1' || c > '8' {
                            return Err(FenParseError::InvalidDigit);
                        }

                        col += c as u8 - b'0';
                        if col > 8 {
                            return Err(FenParseError::FileDoesNotSumToEight);
                        }

                        advance(iter);
                        continue;
                    }

                    let figure = Figure::try_from(c).map_err(|_| FenParseError::UnknownPiece)?;
                    placement[row as usize][col as usize] = Some(figure);
                    advance(iter);
                    col += 1;
                }

                if row != 0 {
                    eat(iter, '/')?;
                }
            }

            Ok(placement)
        }

        fn eat_side_to_move(iter: &mut Stream) -> Result<Color, FenParseError> {
            let side = match peek(iter)? {
                'w' => Color::White,
                'b' => Color::Black,
                _ => return Err(FenParseError::InvalidSideToMove),
            };

            advance(iter);
            Ok(side)
        }

        fn eat_castle_rights(iter: &mut Stream) -> Result<CastleRights, FenParseError> {
            if peek(iter)? == '-' {
                advance(iter);
                return Ok(CastleRights::NONE);
            }

            let mut rights = CastleRights::NONE;
            for _ in 0..4 {
                match peek(iter)? {
                    'K' => rights |= CastleRights::WHITE_SHORT,
                    'Q' => rights |= CastleRights::WHITE_LONG,
                    'k' => rights |= CastleRights::BLACK_SHORT,
                    'q' => rights |= CastleRights::BLACK_LONG,
                    ' ' => break,
                    _ => return Err(FenParseError::InvalidCastle),
                }

                advance(iter);
            }

            Ok(rights)
        }

        fn eat_en_passant(iter: &mut Stream) -> Result<Option<Square>, FenParseError> {
            if peek(iter)? == '-' {
                advance(iter);
                return Ok(None);
            }

            let mut buf = String::new();
            for _ in 0..2 {
                buf.push(peek(iter)?);
                advance(iter);
            }

            buf.parse::<Square>()
                .map(Some)
                .map_err(|_| FenParseError::InvalidEnPassant)
        }

        fn eat_number(
            iter: &mut Stream,
            empty: FenParseError,
            invalid: FenParseError,
        ) -> Result<u32, FenParseError> {
            let mut buf = String::new();
            while let Some(&c) = iter.peek() {
                if !c.is_digit(10) {
                    break;
                }

                buf.push(c);
                advance(iter);
            }

            if buf.is_empty() {
                return Err(empty);
            }

            buf.parse::<u32>().map_err(|_| invalid)
        }

        let iter = &mut fen.as_ref().trim().chars().peekable();
        let placement = eat_placement(iter)?;
        eat(iter, ' ')?;
        let side = eat_side_to_move(iter)?;
        eat(iter, ' ')?;
        let rights = eat_castle_rights(iter)?;
        eat(iter, ' ')?;
        let en_passant = eat_en_passant(iter)?;
        eat(iter, ' ')?;
        let _halfmove_clock = eat_number(
            iter,
            FenParseError::EmptyHalfmove,
            FenParseError::InvalidHalfmove,
        )?;
        eat(iter, ' ')?;
        let fullmove = eat_number(
            iter,
            FenParseError::EmptyFullmove,
            FenParseError::InvalidFullmove,
        )?;
        if let Some(c) = iter.next() {
            return Err(FenParseError::UnexpectedChar(c));
        }

        check_kings(&placement)?;
        let side_offset = match side {
            Color::White => 0,
            Color::Black => 1,
        };
        let half_moves = fullmove
            .saturating_sub(1)
            .checked_mul(2)
            .and_then(|h| h.checked_add(side_offset))
            .ok_or(FenParseError::InvalidFullmove)?;

        let mut game = GameState::empty();
        game.set_side_to_move(side);
        game.set_half_moves(half_moves);
        for sq in Square::all() {
            if let Some(figure) = placement[sq.row() as usize][sq.col() as usize] {
                let mut piece = Piece::new(figure.kind, figure.color, sq);
                piece.moves = initial_moves(figure, sq, rights);
                game.add_piece(piece);
            }
        }

        if let Some(target) = en_passant {
            mark_double_step(&mut game, target)?;
        }

        debug!("parsed fen {}", fen.as_ref());
        Ok(game)
    }

    /// Produces the FEN representation of this game. Move counters that can't be expressed
    /// in FEN are lost; the halfmove clock is always written as zero.
    pub fn as_fen(&self) -> String {
        let mut buf = String::new();
        for row in (0..8).rev() {
            let mut empty_squares = 0;
            for col in 0..8 {
                match self.piece_at(Square::new(row, col)) {
                    Some(id) => {
                        if empty_squares != 0 {
                            write!(&mut buf, "{}", empty_squares).unwrap();
                            empty_squares = 0;
                        }

                        write!(&mut buf, "{}", self.piece(id).figure()).unwrap();
                    }
                    None => empty_squares += 1,
                }
            }

            if empty_squares != 0 {
                write!(&mut buf, "{}", empty_squares).unwrap();
            }

            if row != 0 {
                buf.push('/');
            }
        }

        buf.push(' ');
        write!(&mut buf, "{}", self.side_to_move()).unwrap();
        buf.push(' ');

        let mut any_rights = false;
        for &color in COLORS.iter() {
            for &side in CASTLE_SIDES.iter() {
                if self.castle_rights_intact(color, side) {
                    any_rights = true;
                    let letter = match side {
                        CastleSide::Short => 'k',
                        CastleSide::Long => 'q',
                    };
                    buf.push(match color {
                        Color::White => letter.to_ascii_uppercase(),
                        Color::Black => letter,
                    });
                }
            }
        }

        if !any_rights {
            buf.push('-');
        }

        buf.push(' ');
        match self.en_passant_square() {
            Some(sq) => write!(&mut buf, "{}", sq).unwrap(),
            None => buf.push('-'),
        }

        write!(&mut buf, " 0 {}", self.half_moves() / 2 + 1).unwrap();
        buf
    }

    /// The square a pawn could move to by capturing en passant right now, if any.
    pub fn en_passant_square(&self) -> Option<Square> {
        let pusher = self.side_to_move().toggle();
        self.pieces_of(pusher)
            .map(|id| self.piece(id))
            .find(|piece| {
                piece.kind == PieceKind::Pawn && piece.double_step == Some(self.half_moves())
            })
            .and_then(|pawn| pawn.square.offset(-pusher.forward(), 0))
    }

    fn castle_rights_intact(&self, color: Color, side: CastleSide) -> bool {
        let row = color.back_row();
        let unmoved = |sq: Square, kind: PieceKind| match self.piece_at(sq) {
            Some(id) => {
                let piece = self.piece(id);
                piece.kind == kind && piece.color == color && piece.moves == 0
            }
            None => false,
        };

        unmoved(Square::new(row, KING_COL), PieceKind::King)
            && unmoved(Square::new(row, side.rook_col()), PieceKind::Rook)
    }
}

fn check_kings(placement: &Placement) -> Result<(), FenParseError> {
    for &color in COLORS.iter() {
        let kings = placement
            .iter()
            .flat_map(|row| row.iter())
            .filter(|f| **f == Some(Figure::new(PieceKind::King, color)))
            .count();

        match kings {
            0 => return Err(FenParseError::MissingKing(color)),
            1 => {}
            _ => return Err(FenParseError::TooManyKings(color)),
        }
    }

    Ok(())
}

fn initial_moves(figure: Figure, sq: Square, rights: CastleRights) -> u32 {
    let row = figure.color.back_row();
    let has_right = |side: CastleSide| rights.contains(CastleRights::of(figure.color, side));
    let unmoved = match figure.kind {
        PieceKind::Pawn => sq.row() == figure.color.pawn_row(),
        PieceKind::King => {
            sq == Square::new(row, KING_COL) && CASTLE_SIDES.iter().any(|&s| has_right(s))
        }
        PieceKind::Rook => CASTLE_SIDES
            .iter()
            .any(|&s| sq == Square::new(row, s.rook_col()) && has_right(s)),
        PieceKind::Knight | PieceKind::Bishop | PieceKind::Queen => true,
    };

    if unmoved {
        0
    } else {
        1
    }
}

fn mark_double_step(game: &mut GameState, target: Square) -> Result<(), FenParseError> {
    let pusher = game.side_to_move().toggle();
    if target.row() as i32 != pusher.pawn_row() as i32 + pusher.forward() {
        return Err(FenParseError::InvalidEnPassant);
    }

    let pawn_square = target
        .offset(pusher.forward(), 0)
        .ok_or(FenParseError::InvalidEnPassant)?;
    let id = match game.piece_at(pawn_square) {
        Some(id) if game.piece(id).figure() == Figure::new(PieceKind::Pawn, pusher) => id,
        _ => return Err(FenParseError::InvalidEnPassant),
    };

    let half_moves = game.half_moves();
    let pawn = game.piece_mut(id);
    pawn.moves = 1;
    pawn.double_step = Some(half_moves);
    Ok(())
}
