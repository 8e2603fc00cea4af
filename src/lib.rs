// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

#[macro_use]
extern crate num_derive;
#[macro_use]
extern crate bitflags;
#[macro_use]
extern crate lazy_static;
#[macro_use]
extern crate log;
#[macro_use]
extern crate serde_derive;

mod board;
pub mod eval;
mod fen;
mod game;
mod legality;
mod moves;
pub mod notation;
mod perft;
mod piece;
pub mod search;
mod snapshot;
mod tables;
mod types;

pub use board::{Board, PieceId};
pub use fen::{FenParseError, START_FEN};
pub use game::{GameState, MoveError};
pub use moves::{
    Capture, FnPromotion, Move, MoveFlags, MoveRecord, Promotion, PromotionChoice,
    PromotionProvider,
};
pub use perft::{divide, perft};
pub use piece::{CastleSide, DestinationVec, Piece};
pub use search::search;
pub use snapshot::{GameSnapshot, PieceSnapshot, SnapshotError};
pub use tables::{material_value, positional_value};
pub use types::{Color, Figure, PieceKind, Square, SquareParseError};
