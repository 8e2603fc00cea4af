// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use crate::types::Square;

/// Handle to a piece owned by a `GameState`. Handles stay valid for as long as the piece
/// exists, whether it is on the board, captured or parked by a promotion.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PieceId(pub(crate) usize);

impl PieceId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// The 8x8 occupancy grid. The board is the only authority on which piece stands where;
/// it performs no validation beyond the bounds that `Square` already guarantees.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    squares: [[Option<PieceId>; 8]; 8],
}

impl Board {
    pub fn empty() -> Board {
        Board {
            squares: [[None; 8]; 8],
        }
    }

    pub fn occupant(&self, sq: Square) -> Option<PieceId> {
        self.squares[sq.row() as usize][sq.col() as usize]
    }

    pub fn set_occupant(&mut self, sq: Square, piece: Option<PieceId>) {
        self.squares[sq.row() as usize][sq.col() as usize] = piece;
    }

    /// Clears `sq` and returns whatever stood there.
    pub fn take(&mut self, sq: Square) -> Option<PieceId> {
        self.squares[sq.row() as usize][sq.col() as usize].take()
    }

    pub fn is_occupied(&self, sq: Square) -> bool {
        self.occupant(sq).is_some()
    }

    pub fn is_empty(&self, sq: Square) -> bool {
        self.occupant(sq).is_none()
    }

    /// Whether every square strictly between `from` and `to` is empty. The two squares must
    /// share a row, a column or a diagonal.
    pub fn path_clear(&self, from: Square, to: Square) -> bool {
        let dr = (to.row() as i32 - from.row() as i32).signum();
        let dc = (to.col() as i32 - from.col() as i32).signum();
        debug_assert!(
            from.row() == to.row()
                || from.col() == to.col()
                || (to.row() as i32 - from.row() as i32).abs()
                    == (to.col() as i32 - from.col() as i32).abs(),
            "path_clear called on unaligned squares {} and {}",
            from,
            to
        );

        let mut current = from;
        loop {
            current = match current.offset(dr, dc) {
                Some(next) => next,
                None => return true,
            };

            if current == to {
                return true;
            }

            if self.is_occupied(current) {
                return false;
            }
        }
    }
}

impl Default for Board {
    fn default() -> Board {
        Board::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::{Board, PieceId};
    use crate::types::Square;

    #[test]
    fn occupancy() {
        let mut board = Board::empty();
        let e4 = Square::new(3, 4);
        assert!(board.is_empty(e4));
        board.set_occupant(e4, Some(PieceId(3)));
        assert!(board.is_occupied(e4));
        assert_eq!(Some(PieceId(3)), board.occupant(e4));
        assert_eq!(Some(PieceId(3)), board.take(e4));
        assert!(board.is_empty(e4));
    }

    #[test]
    fn path_clear_rank() {
        let mut board = Board::empty();
        let a1 = Square::new(0, 0);
        let h1 = Square::new(0, 7);
        assert!(board.path_clear(a1, h1));

        board.set_occupant(Square::new(0, 3), Some(PieceId(0)));
        assert!(!board.path_clear(a1, h1));

        // endpoints don't count
        assert!(board.path_clear(a1, Square::new(0, 3)));
    }

    #[test]
    fn path_clear_diagonal() {
        let mut board = Board::empty();
        let c1 = Square::new(0, 2);
        let h6 = Square::new(5, 7);
        assert!(board.path_clear(c1, h6));
        board.set_occupant(Square::new(3, 5), Some(PieceId(1)));
        assert!(!board.path_clear(c1, h6));
        assert!(board.path_clear(h6, Square::new(3, 5)));
    }

    #[test]
    fn path_clear_adjacent() {
        let board = Board::empty();
        assert!(board.path_clear(Square::new(4, 4), Square::new(5, 5)));
    }
}
