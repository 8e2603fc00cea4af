// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use crate::game::GameState;

mod material_evaluator;
mod score;

pub use material_evaluator::MaterialEvaluator;
pub use score::Score;

/// Static evaluation of a position, from White's point of view. The search only consults
/// an evaluator on positions that are neither mate, stalemate nor a material draw.
pub trait BoardEvaluator: Default {
    fn evaluate(&self, game: &GameState) -> Score;
}
