// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Serializable images of a game.
//!
//! Unlike FEN, a snapshot keeps every piece's move counter and double-step marker, so
//! restoring one gives back a game whose legal moves are exactly those of the game it was taken from.
//! Captured pieces and parked pawns are not part of a snapshot; a restored game can't take
//! back moves made before it was taken.
use std::error::Error;
use std::fmt;

use crate::game::GameState;
use crate::piece::Piece;
use crate::types::{Color, PieceKind, Square, COLORS};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PieceSnapshot {
    pub kind: PieceKind,
    pub color: Color,
    pub moves: u32,
    pub double_step: Option<u32>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    /// Indexed by `Square::as_index`, a1 first.
    pub squares: Vec<Option<PieceSnapshot>>,
    pub turn: Color,
    pub half_moves: u32,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SnapshotError {
    WrongSquareCount(usize),
    MissingKing(Color),
    TooManyKings(Color),
}

impl fmt::Display for SnapshotError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SnapshotError::WrongSquareCount(n) => write!(f, "expected 64 squares, got {}", n),
            SnapshotError::MissingKing(color) => write!(f, "{:?} has no king", color),
            SnapshotError::TooManyKings(color) => write!(f, "{:?} has more than one king", color),
        }
    }
}

impl Error for SnapshotError {}

impl GameState {
    pub fn snapshot(&self) -> GameSnapshot {
        let squares = Square::all()
            .map(|sq| {
                self.piece_at(sq).map(|id| {
                    let piece = self.piece(id);
                    PieceSnapshot {
                        kind: piece.kind,
                        color: piece.color,
                        moves: piece.moves,
                        double_step: piece.double_step,
                    }
                })
            })
            .collect();

        GameSnapshot {
            squares,
            turn: self.side_to_move(),
            half_moves: self.half_moves(),
        }
    }

    /// Rebuilds a game from a snapshot. The roster is filled in square order, a1 first.
    pub fn from_snapshot(snapshot: &GameSnapshot) -> Result<GameState, SnapshotError> {
        if snapshot.squares.len() != 64 {
            return Err(SnapshotError::WrongSquareCount(snapshot.squares.len()));
        }

        for &color in COLORS.iter() {
            let kings = snapshot
                .squares
                .iter()
                .flatten()
                .filter(|p| p.kind == PieceKind::King && p.color == color)
                .count();
            match kings {
                0 => return Err(SnapshotError::MissingKing(color)),
                1 => {}
                _ => return Err(SnapshotError::TooManyKings(color)),
            }
        }

        let mut game = GameState::empty();
        game.set_side_to_move(snapshot.turn);
        game.set_half_moves(snapshot.half_moves);
        for (idx, entry) in snapshot.squares.iter().enumerate() {
            if let Some(snap) = entry {
                let mut piece = Piece::new(snap.kind, snap.color, Square::from_index(idx));
                piece.moves = snap.moves;
                piece.double_step = snap.double_step;
                game.add_piece(piece);
            }
        }

        Ok(game)
    }
}
