// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Move legality: piece geometry plus king safety.
//!
//! King safety is decided by actually playing the move, asking whether the mover's king is
//! attacked, and taking the move back. The trial always promotes to a queen; the kind of
//! the promoted piece can't change whether the mover's own king is left in check.
use crate::board::PieceId;
use crate::game::GameState;
use crate::moves::{Move, PromotionChoice};
use crate::types::{Color, PieceKind, Square};

impl GameState {
    /// Whether piece `id` may legally move to `dest`. The game is mutated during the check
    /// but is restored before this returns.
    pub fn is_valid_move(&mut self, id: PieceId, dest: Square) -> bool {
        let color = {
            let piece = self.piece(id);
            if !piece.is_valid_capture(self, dest) {
                return false;
            }

            piece.color
        };

        if let Some(occupant) = self.piece_at(dest) {
            if self.piece(occupant).kind == PieceKind::King {
                return false;
            }
        }

        let record = self.make_move(id, dest, &mut PromotionChoice::Queen);
        let safe = !self.in_check(color);
        self.unmake_move(record);
        safe
    }

    /// Whether `color`'s king can be taken by an enemy piece. A side without a king (only
    /// possible in hand-built positions) is never in check.
    pub fn in_check(&self, color: Color) -> bool {
        let king_square = match self.king_square(color) {
            Some(sq) => sq,
            None => return false,
        };

        self.pieces_of(color.toggle())
            .any(|id| self.piece(id).is_valid_capture(self, king_square))
    }

    /// Whether moving `id` to `dest` leaves the opponent in check. Assumes the move is legal.
    pub fn gives_check(&mut self, id: PieceId, dest: Square) -> bool {
        let opponent = self.piece(id).color.toggle();
        let record = self.make_move(id, dest, &mut PromotionChoice::Queen);
        let check = self.in_check(opponent);
        self.unmake_move(record);
        check
    }

    /// Every legal move for `color`, grouped by piece in roster order.
    pub fn legal_moves(&mut self, color: Color) -> Vec<Move> {
        let mut moves = Vec::new();
        let ids: Vec<PieceId> = self.pieces_of(color).collect();
        for id in ids {
            let piece = self.piece(id);
            let origin = piece.square;
            let dests = piece.possible_destinations(self);
            for dest in dests {
                if self.is_valid_move(id, dest) {
                    moves.push(Move::new(origin, dest));
                }
            }
        }

        moves
    }

    /// Legal destinations of a single piece.
    pub fn legal_destinations(&mut self, id: PieceId) -> Vec<Square> {
        let dests = self.piece(id).possible_destinations(self);
        dests
            .into_iter()
            .filter(|&dest| self.is_valid_move(id, dest))
            .collect()
    }

    /// Whether `color` has at least one legal move. Stops at the first one found.
    pub fn has_legal_move(&mut self, color: Color) -> bool {
        let ids: Vec<PieceId> = self.pieces_of(color).collect();
        for id in ids {
            let dests = self.piece(id).possible_destinations(self);
            for dest in dests {
                if self.is_valid_move(id, dest) {
                    return true;
                }
            }
        }

        false
    }

    pub fn is_checkmate(&mut self, color: Color) -> bool {
        self.in_check(color) && !self.has_legal_move(color)
    }

    pub fn is_stalemate(&mut self, color: Color) -> bool {
        !self.in_check(color) && !self.has_legal_move(color)
    }

    /// Draw by insufficient material: the two kings alone, or the two kings and a single
    /// knight or bishop.
    pub fn is_draw(&self) -> bool {
        let active = self.active_pieces();
        match active.len() {
            2 => true,
            3 => active.iter().any(|&id| {
                let kind = self.piece(id).kind;
                kind == PieceKind::Knight || kind == PieceKind::Bishop
            }),
            _ => false,
        }
    }
}
