// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use crate::eval::MaterialEvaluator;
use crate::game::GameState;

mod data;
mod searcher;

pub use data::{CsvDataRecorder, DataRecorder, NullDataRecorder, Record};
pub use searcher::{SearchResult, Searcher};

/// Search depth, in plies, used when the caller doesn't ask for one.
pub const DEFAULT_DEPTH: u32 = 4;

/// Searches `game` to `depth` plies with the default evaluator, no time limit and no data
/// recording.
pub fn search(game: &mut GameState, depth: u32) -> SearchResult {
    let mut searcher: Searcher<MaterialEvaluator> = Searcher::new();
    searcher.search(game, depth, None, &NullDataRecorder)
}
