// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Material values and piece-square tables.
//!
//! The tables below are written the way a board diagram is drawn: the first line is the
//! eighth rank as seen by White. They are expanded once into per-color lookup tables
//! indexed by `Square::as_index`, so that a White piece on row `r` scores exactly what a
//! Black piece on row `7 - r` does.
use crate::types::{Color, PieceKind, Square, TableIndex, COLORS, PIECE_KINDS};

/// Weight of the positional bonus relative to one pawn of material.
pub const POSITIONAL_WEIGHT: f64 = 0.1;

pub fn material_value(kind: PieceKind) -> f64 {
    match kind {
        PieceKind::Pawn => 1.0,
        PieceKind::Knight => 3.0,
        PieceKind::Bishop => 3.0,
        PieceKind::Rook => 5.0,
        PieceKind::Queen => 9.0,
        // Kings can't be traded; this only keeps the sum symmetric.
        PieceKind::King => 90.0,
    }
}

type Diagram = [[f64; 8]; 8];

const PAWN_DIAGRAM: Diagram = [
    [0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
    [5.0, 5.0, 5.0, 5.0, 5.0, 5.0, 5.0, 5.0],
    [1.0, 1.0, 2.0, 3.0, 3.0, 2.0, 1.0, 1.0],
    [0.5, 0.5, 1.0, 2.5, 2.5, 1.0, 0.5, 0.5],
    [0.0, 0.0, 0.0, 2.0, 2.0, 0.0, 0.0, 0.0],
    [0.5, -0.5, -1.0, 0.0, 0.0, -1.0, -0.5, 0.5],
    [0.5, 1.0, 1.0, -2.0, -2.0, 1.0, 1.0, 0.5],
    [0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
];

const KNIGHT_DIAGRAM: Diagram = [
    [-5.0, -4.0, -3.0, -3.0, -3.0, -3.0, -4.0, -5.0],
    [-4.0, -2.0, 0.0, 0.0, 0.0, 0.0, -2.0, -4.0],
    [-3.0, 0.0, 1.0, 1.5, 1.5, 1.0, 0.0, -3.0],
    [-3.0, 0.5, 1.5, 2.0, 2.0, 1.5, 0.5, -3.0],
    [-3.0, 0.0, 1.5, 2.0, 2.0, 1.5, 0.0, -3.0],
    [-3.0, 0.5, 1.0, 1.5, 1.5, 1.0, 0.5, -3.0],
    [-4.0, -2.0, 0.0, 0.5, 0.5, 0.0, -2.0, -4.0],
    [-5.0, -4.0, -3.0, -3.0, -3.0, -3.0, -4.0, -5.0],
];

const BISHOP_DIAGRAM: Diagram = [
    [-2.0, -1.0, -1.0, -1.0, -1.0, -1.0, -1.0, -2.0],
    [-1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, -1.0],
    [-1.0, 0.0, 0.5, 1.0, 1.0, 0.5, 0.0, -1.0],
    [-1.0, 0.5, 0.5, 1.0, 1.0, 0.5, 0.5, -1.0],
    [-1.0, 0.0, 1.0, 1.0, 1.0, 1.0, 0.0, -1.0],
    [-1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, -1.0],
    [-1.0, 0.5, 0.0, 0.0, 0.0, 0.0, 0.5, -1.0],
    [-2.0, -1.0, -1.0, -1.0, -1.0, -1.0, -1.0, -2.0],
];

const ROOK_DIAGRAM: Diagram = [
    [0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
    [0.5, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 0.5],
    [-0.5, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, -0.5],
    [-0.5, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, -0.5],
    [-0.5, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, -0.5],
    [-0.5, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, -0.5],
    [-0.5, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, -0.5],
    [0.0, 0.0, 0.0, 0.5, 0.5, 0.0, 0.0, 0.0],
];

const QUEEN_DIAGRAM: Diagram = [
    [-2.0, -1.0, -1.0, -0.5, -0.5, -1.0, -1.0, -2.0],
    [-1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, -1.0],
    [-1.0, 0.0, 0.5, 0.5, 0.5, 0.5, 0.0, -1.0],
    [-0.5, 0.0, 0.5, 0.5, 0.5, 0.5, 0.0, -0.5],
    [0.0, 0.0, 0.5, 0.5, 0.5, 0.5, 0.0, -0.5],
    [-1.0, 0.5, 0.5, 0.5, 0.5, 0.5, 0.0, -1.0],
    [-1.0, 0.0, 0.5, 0.0, 0.0, 0.0, 0.0, -1.0],
    [-2.0, -1.0, -1.0, -0.5, -0.5, -1.0, -1.0, -2.0],
];

const KING_DIAGRAM: Diagram = [
    [-3.0, -4.0, -4.0, -5.0, -5.0, -4.0, -4.0, -3.0],
    [-3.0, -4.0, -4.0, -5.0, -5.0, -4.0, -4.0, -3.0],
    [-3.0, -4.0, -4.0, -5.0, -5.0, -4.0, -4.0, -3.0],
    [-3.0, -4.0, -4.0, -5.0, -5.0, -4.0, -4.0, -3.0],
    [-2.0, -3.0, -3.0, -4.0, -4.0, -3.0, -3.0, -2.0],
    [-1.0, -2.0, -2.0, -2.0, -2.0, -2.0, -2.0, -1.0],
    [2.0, 2.0, 0.0, 0.0, 0.0, 0.0, 2.0, 2.0],
    [2.0, 3.0, 1.0, 0.0, 0.0, 1.0, 3.0, 2.0],
];

fn diagram(kind: PieceKind) -> &'static Diagram {
    match kind {
        PieceKind::Pawn => &PAWN_DIAGRAM,
        PieceKind::Knight => &KNIGHT_DIAGRAM,
        PieceKind::Bishop => &BISHOP_DIAGRAM,
        PieceKind::Rook => &ROOK_DIAGRAM,
        PieceKind::Queen => &QUEEN_DIAGRAM,
        PieceKind::King => &KING_DIAGRAM,
    }
}

struct PositionalTable {
    // [color][kind][square]
    table: [[[f64; 64]; 6]; 2],
}

impl PositionalTable {
    fn new() -> PositionalTable {
        let mut pt = PositionalTable {
            table: [[[0.0; 64]; 6]; 2],
        };

        for &color in COLORS.iter() {
            for &kind in PIECE_KINDS.iter() {
                let diagram = diagram(kind);
                for sq in Square::all() {
                    let line = match color {
                        Color::White => 7 - sq.row() as usize,
                        Color::Black => sq.row() as usize,
                    };

                    pt.table[color.as_index()][kind.as_index()][sq.as_index()] =
                        diagram[line][sq.col() as usize];
                }
            }
        }

        pt
    }

    fn lookup(&self, color: Color, kind: PieceKind, sq: Square) -> f64 {
        self.table[color.as_index()][kind.as_index()][sq.as_index()]
    }
}

lazy_static! {
    static ref POSITIONAL_TABLE: PositionalTable = PositionalTable::new();
}

/// Raw table entry for a piece of the given kind and color on `sq`, before weighting.
pub fn positional_value(color: Color, kind: PieceKind, sq: Square) -> f64 {
    POSITIONAL_TABLE.lookup(color, kind, sq)
}

/// Material plus weighted positional bonus. Always positive-for-the-owner; callers apply
/// the sign for the color.
pub fn piece_value(color: Color, kind: PieceKind, sq: Square) -> f64 {
    material_value(kind) + POSITIONAL_WEIGHT * positional_value(color, kind, sq)
}
