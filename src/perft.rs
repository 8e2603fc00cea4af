// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Move path enumeration, for checking the rules engine against known node counts.
//!
//! Moves are origin/destination pairs and promotions always pick a queen, so a promotion
//! counts once rather than four times. Counts only match the published tables for
//! positions where no pawn can promote within the searched depth.
use hashbrown::HashMap;
use rayon::prelude::*;

use crate::game::GameState;
use crate::moves::{Move, PromotionChoice};

/// Number of leaf nodes of the legal move tree `depth` plies below `game`. Subtrees of the
/// root moves are counted in parallel, each on its own copy of the game.
pub fn perft(game: &GameState, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }

    let mut root = game.clone();
    let side = root.side_to_move();
    let moves = root.legal_moves(side);
    moves
        .par_iter()
        .map(|&mov| {
            let mut child = game.clone();
            child.make(mov, &mut PromotionChoice::Queen);
            perft_serial(&mut child, depth - 1)
        })
        .sum()
}

/// Node counts below each root move.
pub fn divide(game: &GameState, depth: u32) -> HashMap<Move, u64> {
    let mut root = game.clone();
    let side = root.side_to_move();
    let moves = root.legal_moves(side);
    moves
        .par_iter()
        .map(|&mov| {
            let mut child = game.clone();
            child.make(mov, &mut PromotionChoice::Queen);
            (mov, perft_serial(&mut child, depth.saturating_sub(1)))
        })
        .collect::<Vec<_>>()
        .into_iter()
        .collect()
}

fn perft_serial(game: &mut GameState, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }

    let side = game.side_to_move();
    let moves = game.legal_moves(side);
    if depth == 1 {
        return moves.len() as u64;
    }

    let mut nodes = 0;
    for mov in moves {
        let record = game.make(mov, &mut PromotionChoice::Queen);
        nodes += perft_serial(game, depth - 1);
        game.unmake_move(record);
    }

    nodes
}
