// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use std::cmp::Ordering;
use std::fmt;
use std::ops::Neg;

/// Score is the value the search assigns to a position, always from White's point of view:
/// White is the maximizing player and Black the minimizing one.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Score {
    /// White mates, the given number of plies from the root of the search.
    Win(u32),

    /// Black mates, the given number of plies from the root of the search.
    Loss(u32),

    /// Neither side has a forced mate within the search horizon; the evaluator assigned
    /// this material and positional balance.
    Evaluated(f64),
}

impl Score {
    /// The scalar form of this score, with mates mapped to infinities.
    pub fn as_f64(self) -> f64 {
        match self {
            Score::Win(_) => f64::INFINITY,
            Score::Loss(_) => f64::NEG_INFINITY,
            Score::Evaluated(score) => score,
        }
    }

    pub fn is_mate(self) -> bool {
        match self {
            Score::Win(_) | Score::Loss(_) => true,
            Score::Evaluated(_) => false,
        }
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Score::Win(plies) => write!(f, "#{}", plies),
            Score::Loss(plies) => write!(f, "#-{}", plies),
            Score::Evaluated(score) => write!(f, "{:.2}", score),
        }
    }
}

impl Eq for Score {}

impl PartialOrd for Score {
    fn partial_cmp(&self, other: &Score) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Score {
    fn cmp(&self, other: &Score) -> Ordering {
        // Scores are ordered by how good they are for White:
        //   1. A win is better than another win if it mates in fewer plies.
        //   2. A loss is better than another loss if it is mated in more plies.
        //   3. A win is better than everything that isn't a win.
        //   4. A loss is worse than everything that isn't a loss.
        //   5. Two evaluated scores compare like any other number.
        match (self, other) {
            // Rules 1 and 2
            (Score::Win(self_win), Score::Win(other_win)) => other_win.cmp(self_win),
            (Score::Loss(self_loss), Score::Loss(other_loss)) => self_loss.cmp(other_loss),

            // Rules 3 and 4
            (Score::Win(_), _) => Ordering::Greater,
            (_, Score::Win(_)) => Ordering::Less,
            (Score::Loss(_), _) => Ordering::Less,
            (_, Score::Loss(_)) => Ordering::Greater,

            // Rule 5
            (Score::Evaluated(self_score), Score::Evaluated(other_score)) => self_score
                .partial_cmp(other_score)
                .expect("NaN in score comparison"),
        }
    }
}

impl Neg for Score {
    type Output = Score;

    fn neg(self) -> Score {
        match self {
            Score::Win(plies) => Score::Loss(plies),
            Score::Loss(plies) => Score::Win(plies),
            Score::Evaluated(score) => Score::Evaluated(-score),
        }
    }
}
