// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Per-piece movement geometry.
//!
//! A piece knows nothing about the game it belongs to; every question about its movement is
//! asked with the `GameState` passed in as context. Nothing here considers king safety, that
//! is the job of the legality checks in `legality.rs`.
use arrayvec::ArrayVec;

use crate::game::GameState;
use crate::tables;
use crate::types::{Color, Figure, PieceKind, Square};

/// Enough room for a queen in the middle of an empty board (27 squares) or a king with its
/// two castling squares (10).
pub type DestinationVec = ArrayVec<[Square; 32]>;

const KNIGHT_OFFSETS: [(i32, i32); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

const KING_OFFSETS: [(i32, i32); 8] = [
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
    (0, -1),
    (1, -1),
];

const ROOK_DIRECTIONS: [(i32, i32); 4] = [(1, 0), (0, 1), (-1, 0), (0, -1)];
const BISHOP_DIRECTIONS: [(i32, i32); 4] = [(1, 1), (-1, 1), (-1, -1), (1, -1)];

/// Column the king starts on and the columns it lands on when castling.
const KING_COL: u8 = 4;
const SHORT_CASTLE_COL: u8 = 6;
const LONG_CASTLE_COL: u8 = 2;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CastleSide {
    Short,
    Long,
}

impl CastleSide {
    /// Column of the rook that takes part in this castle.
    pub fn rook_col(self) -> u8 {
        match self {
            CastleSide::Short => 7,
            CastleSide::Long => 0,
        }
    }

    /// Column the rook ends up on.
    pub fn rook_target_col(self) -> u8 {
        match self {
            CastleSide::Short => 5,
            CastleSide::Long => 3,
        }
    }

    /// Columns the king starts on, passes through and lands on, none of which may be
    /// attacked.
    fn king_path(self) -> [u8; 3] {
        match self {
            CastleSide::Short => [KING_COL, 5, SHORT_CASTLE_COL],
            CastleSide::Long => [KING_COL, 3, LONG_CASTLE_COL],
        }
    }

    /// The castle a king would be attempting by moving from `origin` to `dest`, judging by
    /// geometry alone.
    pub fn from_king_move(origin: Square, dest: Square) -> Option<CastleSide> {
        if origin.row() != dest.row() || origin.col() != KING_COL {
            return None;
        }

        match dest.col() {
            SHORT_CASTLE_COL => Some(CastleSide::Short),
            LONG_CASTLE_COL => Some(CastleSide::Long),
            _ => None,
        }
    }
}

/// A chess piece together with the bits of history the rules care about.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Piece {
    pub kind: PieceKind,
    pub color: Color,
    pub square: Square,

    /// Number of times this piece has moved. Incremented by `make_move`, decremented by
    /// `unmake_move`; castling and the pawn double step only look at whether it is zero.
    pub moves: u32,

    /// For pawns, the half-move count right after this pawn advanced two squares. A pawn
    /// can be taken en passant exactly while this equals the game's half-move count.
    pub double_step: Option<u32>,
}

impl Piece {
    pub fn new(kind: PieceKind, color: Color, square: Square) -> Piece {
        Piece {
            kind,
            color,
            square,
            moves: 0,
            double_step: None,
        }
    }

    pub fn figure(&self) -> Figure {
        Figure::new(self.kind, self.color)
    }

    /// Material plus positional worth of this piece where it stands. Always positive.
    pub fn value(&self) -> f64 {
        tables::piece_value(self.color, self.kind, self.square)
    }

    /// Candidate destinations for this piece, before any check for legality. Every square
    /// returned is on the board, and for sliders each ray stops at (and includes) the first
    /// occupied square.
    pub fn possible_destinations(&self, game: &GameState) -> DestinationVec {
        let mut dests = DestinationVec::new();
        match self.kind {
            PieceKind::Pawn => {
                let fwd = self.color.forward();
                let candidates = [(fwd, 0), (2 * fwd, 0), (fwd, -1), (fwd, 1)];
                for &(dr, dc) in candidates.iter() {
                    if let Some(sq) = self.square.offset(dr, dc) {
                        dests.push(sq);
                    }
                }
            }
            PieceKind::Knight => {
                for &(dr, dc) in KNIGHT_OFFSETS.iter() {
                    if let Some(sq) = self.square.offset(dr, dc) {
                        dests.push(sq);
                    }
                }
            }
            PieceKind::King => {
                for &(dr, dc) in KING_OFFSETS.iter() {
                    if let Some(sq) = self.square.offset(dr, dc) {
                        dests.push(sq);
                    }
                }

                for &dc in [2, -2].iter() {
                    if let Some(sq) = self.square.offset(0, dc) {
                        dests.push(sq);
                    }
                }
            }
            PieceKind::Bishop => self.push_rays(game, &BISHOP_DIRECTIONS, &mut dests),
            PieceKind::Rook => self.push_rays(game, &ROOK_DIRECTIONS, &mut dests),
            PieceKind::Queen => {
                self.push_rays(game, &BISHOP_DIRECTIONS, &mut dests);
                self.push_rays(game, &ROOK_DIRECTIONS, &mut dests);
            }
        }

        dests
    }

    fn push_rays(&self, game: &GameState, directions: &[(i32, i32)], dests: &mut DestinationVec) {
        let board = game.board();
        for &(dr, dc) in directions {
            let mut current = self.square;
            while let Some(next) = current.offset(dr, dc) {
                dests.push(next);
                if board.is_occupied(next) {
                    break;
                }

                current = next;
            }
        }
    }

    /// Whether the movement rules let this piece occupy `dest` given the current occupancy
    /// of the board: the destination is empty or holds an enemy, and the path there is
    /// open. King safety is not considered.
    pub fn is_valid_capture(&self, game: &GameState, dest: Square) -> bool {
        if dest == self.square || self.holds_friend(game, dest) {
            return false;
        }

        let (dr, dc) = delta(self.square, dest);
        match self.kind {
            PieceKind::Pawn => self.pawn_can_reach(game, dest, dr, dc),
            PieceKind::Knight => is_knight_step(dr, dc),
            PieceKind::Bishop => dr.abs() == dc.abs() && game.board().path_clear(self.square, dest),
            PieceKind::Rook => (dr == 0 || dc == 0) && game.board().path_clear(self.square, dest),
            PieceKind::Queen => {
                (dr == 0 || dc == 0 || dr.abs() == dc.abs())
                    && game.board().path_clear(self.square, dest)
            }
            PieceKind::King => {
                is_king_step(dr, dc)
                    || CastleSide::from_king_move(self.square, dest)
                        .map_or(false, |side| self.can_castle(game, side))
            }
        }
    }

    /// Whether this piece bears on `target`, whatever stands there. Unlike
    /// `is_valid_capture`, pawns only attack diagonally and kings only attack the squares
    /// around them.
    pub fn attacks(&self, game: &GameState, target: Square) -> bool {
        if target == self.square {
            return false;
        }

        let (dr, dc) = delta(self.square, target);
        match self.kind {
            PieceKind::Pawn => dr == self.color.forward() && dc.abs() == 1,
            PieceKind::Knight => is_knight_step(dr, dc),
            PieceKind::King => is_king_step(dr, dc),
            PieceKind::Bishop => {
                dr.abs() == dc.abs() && game.board().path_clear(self.square, target)
            }
            PieceKind::Rook => (dr == 0 || dc == 0) && game.board().path_clear(self.square, target),
            PieceKind::Queen => {
                (dr == 0 || dc == 0 || dr.abs() == dc.abs())
                    && game.board().path_clear(self.square, target)
            }
        }
    }

    fn holds_friend(&self, game: &GameState, sq: Square) -> bool {
        game.board()
            .occupant(sq)
            .map_or(false, |id| game.piece(id).color == self.color)
    }

    fn holds_enemy(&self, game: &GameState, sq: Square) -> bool {
        game.board()
            .occupant(sq)
            .map_or(false, |id| game.piece(id).color != self.color)
    }

    fn pawn_can_reach(&self, game: &GameState, dest: Square, dr: i32, dc: i32) -> bool {
        let fwd = self.color.forward();
        let board = game.board();
        if dc == 0 {
            // one_up
            if dr == fwd {
                return board.is_empty(dest);
            }

            // two_up
            if dr == 2 * fwd {
                let skipped = match self.square.offset(fwd, 0) {
                    Some(sq) => sq,
                    None => return false,
                };

                return self.square.row() == self.color.pawn_row()
                    && self.moves == 0
                    && board.is_empty(skipped)
                    && board.is_empty(dest);
            }

            return false;
        }

        if dc.abs() != 1 || dr != fwd {
            return false;
        }

        // capture
        if self.holds_enemy(game, dest) {
            return true;
        }

        // en_passant: the pawn being passed stands beside us, on the destination's column.
        if board.is_occupied(dest) {
            return false;
        }

        let passed = Square::new(self.square.row(), dest.col());
        match board.occupant(passed) {
            Some(id) => {
                let victim = game.piece(id);
                victim.kind == PieceKind::Pawn
                    && victim.color != self.color
                    && victim.double_step == Some(game.half_moves())
            }
            None => false,
        }
    }

    /// Castling preconditions for a king standing on its home square. The squares between
    /// king and rook are checked for emptiness before any attack test so that the attack
    /// test never has to consider the king's own destination as occupied.
    fn can_castle(&self, game: &GameState, side: CastleSide) -> bool {
        let row = self.color.back_row();
        if self.moves != 0 || self.square != Square::new(row, KING_COL) {
            return false;
        }

        let rook_square = Square::new(row, side.rook_col());
        let rook_ready = match game.board().occupant(rook_square) {
            Some(id) => {
                let rook = game.piece(id);
                rook.kind == PieceKind::Rook && rook.color == self.color && rook.moves == 0
            }
            None => false,
        };

        if !rook_ready || !game.board().path_clear(self.square, rook_square) {
            return false;
        }

        let enemy = self.color.toggle();
        side.king_path()
            .iter()
            .all(|&col| !game.is_attacked(Square::new(row, col), enemy))
    }
}

fn delta(from: Square, to: Square) -> (i32, i32) {
    (
        to.row() as i32 - from.row() as i32,
        to.col() as i32 - from.col() as i32,
    )
}

fn is_knight_step(dr: i32, dc: i32) -> bool {
    let (dr, dc) = (dr.abs(), dc.abs());
    (dr == 1 && dc == 2) || (dr == 2 && dc == 1)
}

fn is_king_step(dr: i32, dc: i32) -> bool {
    dr.abs().max(dc.abs()) == 1
}

#[cfg(test)]
mod tests {
    use super::CastleSide;
    use crate::game::GameState;
    use crate::types::{PieceKind, Square};

    fn sq(s: &str) -> Square {
        s.parse().unwrap()
    }

    #[test]
    fn destinations_stay_on_board() {
        let game = GameState::from_fen("k7/8/8/8/8/8/8/QN4K1 w - - 0 1").unwrap();
        for &id in game.active_pieces() {
            let piece = game.piece(id);
            // Square::new debug-asserts its bounds, so reaching here is the test.
            let dests = piece.possible_destinations(&game);
            assert!(!dests.is_empty());
        }
    }

    #[test]
    fn queen_rays_stop_at_blockers() {
        let game = GameState::from_fen("k7/8/8/8/3p4/8/8/Q5K1 w - - 0 1").unwrap();
        let queen = game.piece(game.piece_at(sq("a1")).unwrap());
        let dests = queen.possible_destinations(&game);

        assert!(dests.contains(&sq("d4")));
        assert!(!dests.contains(&sq("e5")));
        assert!(dests.contains(&sq("f1")));
        assert!(dests.contains(&sq("g1")));
        assert!(!dests.contains(&sq("h1")));
        assert!(dests.contains(&sq("a8")));
    }

    #[test]
    fn knight_jumps() {
        let game = GameState::standard_setup();
        let knight = game.piece(game.piece_at(sq("g1")).unwrap());
        assert!(knight.is_valid_capture(&game, sq("f3")));
        assert!(knight.is_valid_capture(&game, sq("h3")));
        assert!(!knight.is_valid_capture(&game, sq("e2")));
        assert!(!knight.is_valid_capture(&game, sq("g3")));
    }

    #[test]
    fn pawn_pushes() {
        let game = GameState::standard_setup();
        let pawn = game.piece(game.piece_at(sq("e2")).unwrap());
        assert!(pawn.is_valid_capture(&game, sq("e3")));
        assert!(pawn.is_valid_capture(&game, sq("e4")));
        assert!(!pawn.is_valid_capture(&game, sq("e5")));
        assert!(!pawn.is_valid_capture(&game, sq("d3")));
    }

    #[test]
    fn pawn_double_step_needs_start_row() {
        // A pawn that never moved but sits off its start row (only reachable through
        // scenario setup) still can't jump two squares.
        let game = GameState::from_fen("k7/8/8/8/8/4P3/8/K7 w - - 0 1").unwrap();
        let id = game.piece_at(sq("e3")).unwrap();
        let mut pawn = game.piece(id).clone();
        pawn.moves = 0;
        assert!(pawn.is_valid_capture(&game, sq("e4")));
        assert!(!pawn.is_valid_capture(&game, sq("e5")));
    }

    #[test]
    fn pawn_blocked() {
        let game = GameState::from_fen("k7/8/8/8/8/4n3/4P3/K7 w - - 0 1").unwrap();
        let pawn = game.piece(game.piece_at(sq("e2")).unwrap());
        assert!(!pawn.is_valid_capture(&game, sq("e3")));
        assert!(!pawn.is_valid_capture(&game, sq("e4")));
    }

    #[test]
    fn pawn_attacks_diagonally_only() {
        let game = GameState::standard_setup();
        let pawn = game.piece(game.piece_at(sq("e2")).unwrap());
        assert!(pawn.attacks(&game, sq("d3")));
        assert!(pawn.attacks(&game, sq("f3")));
        assert!(!pawn.attacks(&game, sq("e3")));
        assert!(!pawn.attacks(&game, sq("d1")));
    }

    #[test]
    fn rook_cannot_take_friend() {
        let game = GameState::standard_setup();
        let rook = game.piece(game.piece_at(sq("a1")).unwrap());
        assert!(!rook.is_valid_capture(&game, sq("a2")));
        assert!(!rook.is_valid_capture(&game, sq("a7")));
    }

    #[test]
    fn castle_side_geometry() {
        assert_eq!(
            Some(CastleSide::Short),
            CastleSide::from_king_move(sq("e1"), sq("g1"))
        );
        assert_eq!(
            Some(CastleSide::Long),
            CastleSide::from_king_move(sq("e8"), sq("c8"))
        );
        assert_eq!(None, CastleSide::from_king_move(sq("d1"), sq("f1")));
        assert_eq!(None, CastleSide::from_king_move(sq("e1"), sq("g2")));
    }

    #[test]
    fn values_are_positive() {
        let game = GameState::standard_setup();
        for &id in game.active_pieces() {
            let piece = game.piece(id);
            assert!(piece.value() > 0.0, "{:?}", piece);
            if piece.kind == PieceKind::King {
                assert!(piece.value() > 80.0);
            }
        }
    }
}
