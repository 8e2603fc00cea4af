// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use crate::eval::{BoardEvaluator, Score};
use crate::game::GameState;

/// Sums material and piece-square bonuses for both sides; see `tables` for the values.
pub struct MaterialEvaluator;

impl MaterialEvaluator {
    pub fn new() -> MaterialEvaluator {
        MaterialEvaluator
    }
}

impl Default for MaterialEvaluator {
    fn default() -> MaterialEvaluator {
        MaterialEvaluator
    }
}

impl BoardEvaluator for MaterialEvaluator {
    fn evaluate(&self, game: &GameState) -> Score {
        Score::Evaluated(game.evaluate())
    }
}

#[cfg(test)]
mod tests {
    use super::MaterialEvaluator;
    use crate::eval::{BoardEvaluator, Score};
    use crate::game::GameState;

    #[test]
    fn start_is_even() {
        let game = GameState::standard_setup();
        match MaterialEvaluator::new().evaluate(&game) {
            Score::Evaluated(v) => assert!(v.abs() < 1e-9),
            s => panic!("unexpected score {}", s),
        }
    }

    #[test]
    fn extra_queen_favors_owner() {
        let white_up = GameState::from_fen("3qk3/8/8/8/8/8/8/3QK2Q w - - 0 1").unwrap();
        let black_up = GameState::from_fen("3qk2q/8/8/8/8/8/8/3QK3 w - - 0 1").unwrap();
        let eval = MaterialEvaluator::new();
        assert!(eval.evaluate(&white_up) > Score::Evaluated(8.0));
        assert!(eval.evaluate(&black_up) < Score::Evaluated(-8.0));
    }
}
