// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use std::error::Error;
use std::fmt;

use crate::board::{Board, PieceId};
use crate::moves::{Capture, Move, MoveFlags, MoveRecord, Promotion, PromotionProvider};
use crate::piece::{CastleSide, Piece};
use crate::types::{Color, PieceKind, Square};

/// Reasons `try_make_move` refuses to play a move.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MoveError {
    NoPieceAtOrigin(Square),
    NotYourTurn(Color),
    IllegalMove(Move),
}

impl fmt::Display for MoveError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            MoveError::NoPieceAtOrigin(sq) => write!(f, "no piece on {}", sq),
            MoveError::NotYourTurn(color) => write!(f, "it is not {:?}'s turn", color),
            MoveError::IllegalMove(mov) => write!(f, "illegal move {}", mov),
        }
    }
}

impl Error for MoveError {}

const BACK_ROW: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

/// The complete state of a game in progress.
///
/// Pieces live in an arena and are referred to by `PieceId`. The board maps squares to
/// pieces, and the roster lists the pieces still in play in a fixed order. Captured pieces
/// and promoted pawns stay in the arena so that `unmake_move` can bring them back.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameState {
    pieces: Vec<Piece>,
    board: Board,
    roster: Vec<PieceId>,
    captured: Vec<PieceId>,
    parked: Vec<PieceId>,
    turn: Color,
    half_moves: u32,
}

//
// Construction
//

impl GameState {
    /// A board with nothing on it, White to move. Only useful as the start of a scenario
    /// setup; most queries assume both kings are present.
    pub(crate) fn empty() -> GameState {
        GameState {
            pieces: Vec::new(),
            board: Board::empty(),
            roster: Vec::new(),
            captured: Vec::new(),
            parked: Vec::new(),
            turn: Color::White,
            half_moves: 0,
        }
    }

    /// The initial position of a game of chess. The roster is filled square by square,
    /// a1 first, the same order scenario setup uses.
    pub fn standard_setup() -> GameState {
        let mut game = GameState::empty();
        for sq in Square::all() {
            let color = if sq.row() < 4 { Color::White } else { Color::Black };
            let kind = if sq.row() == color.back_row() {
                BACK_ROW[sq.col() as usize]
            } else if sq.row() == color.pawn_row() {
                PieceKind::Pawn
            } else {
                continue;
            };

            game.add_piece(Piece::new(kind, color, sq));
        }

        game
    }

    /// Puts a new piece on the board and at the end of the roster.
    pub(crate) fn add_piece(&mut self, piece: Piece) -> PieceId {
        debug_assert!(
            self.board.is_empty(piece.square),
            "square {} is already occupied",
            piece.square
        );

        let id = PieceId(self.pieces.len());
        self.board.set_occupant(piece.square, Some(id));
        self.pieces.push(piece);
        self.roster.push(id);
        id
    }

    pub(crate) fn set_side_to_move(&mut self, color: Color) {
        self.turn = color;
    }

    pub(crate) fn set_half_moves(&mut self, half_moves: u32) {
        self.half_moves = half_moves;
    }

    pub(crate) fn piece_mut(&mut self, id: PieceId) -> &mut Piece {
        &mut self.pieces[id.0]
    }
}

impl Default for GameState {
    fn default() -> GameState {
        GameState::standard_setup()
    }
}

//
// Game state getters
//

impl GameState {
    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn piece(&self, id: PieceId) -> &Piece {
        &self.pieces[id.0]
    }

    pub fn piece_at(&self, sq: Square) -> Option<PieceId> {
        self.board.occupant(sq)
    }

    pub fn side_to_move(&self) -> Color {
        self.turn
    }

    pub fn half_moves(&self) -> u32 {
        self.half_moves
    }

    /// Pieces still in play, in roster order.
    pub fn active_pieces(&self) -> &[PieceId] {
        &self.roster
    }

    /// Pieces taken off the board, oldest capture first.
    pub fn captured_pieces(&self) -> &[PieceId] {
        &self.captured
    }

    /// Pawns that were replaced by a promotion, oldest first.
    pub fn parked_pawns(&self) -> &[PieceId] {
        &self.parked
    }

    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = PieceId> + '_ {
        self.roster
            .iter()
            .cloned()
            .filter(move |&id| self.pieces[id.0].color == color)
    }

    pub fn king(&self, color: Color) -> Option<PieceId> {
        self.pieces_of(color)
            .find(|&id| self.pieces[id.0].kind == PieceKind::King)
    }

    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.king(color).map(|id| self.pieces[id.0].square)
    }

    /// Whether any piece of color `by` bears on `target`.
    pub fn is_attacked(&self, target: Square, by: Color) -> bool {
        self.pieces_of(by)
            .any(|id| self.pieces[id.0].attacks(self, target))
    }

    /// Whether playing `mov` would take something, en passant included.
    pub fn is_capture(&self, mov: Move) -> bool {
        if self.board.is_occupied(mov.destination) {
            return true;
        }

        match self.board.occupant(mov.origin) {
            Some(id) => {
                self.pieces[id.0].kind == PieceKind::Pawn
                    && mov.origin.col() != mov.destination.col()
            }
            None => false,
        }
    }

    /// Static evaluation from White's point of view: the value of White's pieces minus the
    /// value of Black's.
    pub fn evaluate(&self) -> f64 {
        self.roster
            .iter()
            .map(|&id| {
                let piece = &self.pieces[id.0];
                match piece.color {
                    Color::White => piece.value(),
                    Color::Black => -piece.value(),
                }
            })
            .sum()
    }
}

//
// Move application
//

impl GameState {
    /// Plays a move by `id` to `dest`, which must be legal, and returns what it takes to
    /// undo it. `provider` is consulted only if a pawn promotes.
    pub fn make_move<P>(&mut self, id: PieceId, dest: Square, provider: &mut P) -> MoveRecord
    where
        P: PromotionProvider + ?Sized,
    {
        let (origin, kind, color) = {
            let piece = &self.pieces[id.0];
            (piece.square, piece.kind, piece.color)
        };

        debug_assert_eq!(Some(id), self.board.occupant(origin));
        let row_delta = dest.row() as i32 - origin.row() as i32;
        let col_delta = dest.col() as i32 - origin.col() as i32;
        let mut flags = MoveFlags::empty();
        if kind == PieceKind::Pawn && row_delta.abs() == 2 {
            flags |= MoveFlags::PAWN_DOUBLE_STEP;
        }

        let capture_square = if kind == PieceKind::Pawn && col_delta != 0 && self.board.is_empty(dest)
        {
            flags |= MoveFlags::EN_PASSANT;
            Square::new(origin.row(), dest.col())
        } else {
            dest
        };

        let captured = match self.board.take(capture_square) {
            Some(victim) => {
                debug_assert!(
                    self.pieces[victim.0].kind != PieceKind::King,
                    "king captured on {}",
                    capture_square
                );

                let roster_index = self.roster_index(victim);
                self.roster.remove(roster_index);
                self.captured.push(victim);
                Some(Capture {
                    piece: victim,
                    square: capture_square,
                    roster_index,
                })
            }
            None => None,
        };

        self.board.take(origin);
        self.board.set_occupant(dest, Some(id));
        {
            let piece = &mut self.pieces[id.0];
            piece.square = dest;
            piece.moves += 1;
        }

        self.turn = self.turn.toggle();
        self.half_moves += 1;

        let mut promotion = None;
        if kind == PieceKind::Pawn && dest.row() == color.promotion_row() {
            let choice = provider.choose(color, dest);
            let promoted = PieceId(self.pieces.len());
            self.pieces.push(Piece::new(choice.kind(), color, dest));
            let slot = self.roster_index(id);
            self.roster[slot] = promoted;
            self.parked.push(id);
            self.board.set_occupant(dest, Some(promoted));
            flags |= MoveFlags::PROMOTION;
            promotion = Some(Promotion {
                pawn: id,
                promoted,
                kind: choice.kind(),
            });
        } else if flags.contains(MoveFlags::PAWN_DOUBLE_STEP) {
            self.pieces[id.0].double_step = Some(self.half_moves);
        } else if kind == PieceKind::King && col_delta.abs() == 2 {
            if let Some(side) = CastleSide::from_king_move(origin, dest) {
                self.move_castling_rook(origin.row(), side, false);
                flags |= match side {
                    CastleSide::Short => MoveFlags::SHORT_CASTLE,
                    CastleSide::Long => MoveFlags::LONG_CASTLE,
                };
            }
        }

        trace!("make {}{} ({:?})", origin, dest, flags);
        MoveRecord {
            piece: id,
            origin,
            destination: dest,
            captured,
            promotion,
            flags,
        }
    }

    /// Takes back a move made by `make_move`. Records must be unmade most recent first.
    pub fn unmake_move(&mut self, record: MoveRecord) {
        trace!("unmake {}{}", record.origin, record.destination);
        self.turn = self.turn.toggle();
        self.half_moves -= 1;

        let row = record.origin.row();
        if record.flags.contains(MoveFlags::SHORT_CASTLE) {
            self.move_castling_rook(row, CastleSide::Short, true);
        } else if record.flags.contains(MoveFlags::LONG_CASTLE) {
            self.move_castling_rook(row, CastleSide::Long, true);
        }

        if let Some(promotion) = record.promotion {
            let slot = self.roster_index(promotion.promoted);
            self.roster[slot] = promotion.pawn;
            let parked = self.parked.pop();
            debug_assert_eq!(Some(promotion.pawn), parked);
            let removed = self.pieces.pop();
            debug_assert!(removed.is_some() && self.pieces.len() == promotion.promoted.0);
        }

        self.board.take(record.destination);
        self.board.set_occupant(record.origin, Some(record.piece));
        {
            let piece = &mut self.pieces[record.piece.0];
            piece.square = record.origin;
            piece.moves -= 1;
            if record.flags.contains(MoveFlags::PAWN_DOUBLE_STEP) {
                piece.double_step = None;
            }
        }

        if let Some(capture) = record.captured {
            self.roster.insert(capture.roster_index, capture.piece);
            let restored = self.captured.pop();
            debug_assert_eq!(Some(capture.piece), restored);
            self.board.set_occupant(capture.square, Some(capture.piece));
        }
    }

    /// `make_move` for a move given by its squares. Like `make_move`, the move must be legal;
    /// in particular a piece must stand on `mov.origin`, or this panics. Moves from outside
    /// the engine should go through `try_make_move` instead.
    pub fn make<P>(&mut self, mov: Move, provider: &mut P) -> MoveRecord
    where
        P: PromotionProvider + ?Sized,
    {
        let id = self
            .board
            .occupant(mov.origin)
            .expect("make called with an empty origin square");
        self.make_move(id, mov.destination, provider)
    }

    /// Plays a move only if it is legal for the side to move. On error the game is left
    /// untouched.
    pub fn try_make_move<P>(
        &mut self,
        origin: Square,
        dest: Square,
        provider: &mut P,
    ) -> Result<MoveRecord, MoveError>
    where
        P: PromotionProvider + ?Sized,
    {
        let id = self
            .board
            .occupant(origin)
            .ok_or(MoveError::NoPieceAtOrigin(origin))?;
        if self.pieces[id.0].color != self.turn {
            return Err(MoveError::NotYourTurn(self.pieces[id.0].color));
        }

        if !self.is_valid_move(id, dest) {
            return Err(MoveError::IllegalMove(Move::new(origin, dest)));
        }

        Ok(self.make_move(id, dest, provider))
    }

    fn roster_index(&self, id: PieceId) -> usize {
        self.roster
            .iter()
            .position(|&p| p == id)
            .expect("piece is not in the active roster")
    }

    fn move_castling_rook(&mut self, row: u8, side: CastleSide, undo: bool) {
        let home = Square::new(row, side.rook_col());
        let target = Square::new(row, side.rook_target_col());
        let (from, to) = if undo { (target, home) } else { (home, target) };
        let rook = self
            .board
            .take(from)
            .expect("castling without a rook in place");
        self.board.set_occupant(to, Some(rook));
        let piece = &mut self.pieces[rook.0];
        piece.square = to;
        if undo {
            piece.moves -= 1;
        } else {
            piece.moves += 1;
        }
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in (0..8).rev() {
            for col in 0..8 {
                let sq = Square::new(row, col);
                if let Some(id) = self.piece_at(sq) {
                    write!(f, " {} ", self.piece(id).figure())?;
                } else {
                    write!(f, " . ")?;
                }
            }

            writeln!(f, "| {}", row + 1)?;
        }

        for _ in 0..8 {
            write!(f, "---")?;
        }

        writeln!(f)?;
        for file in "abcdefgh".chars() {
            write!(f, " {} ", file)?;
        }

        writeln!(f)?;
        Ok(())
    }
}
