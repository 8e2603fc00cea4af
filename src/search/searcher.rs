// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use std::time::{Duration, Instant};

use crate::eval::{BoardEvaluator, Score};
use crate::game::GameState;
use crate::moves::{Move, PromotionChoice};
use crate::search::{DataRecorder, Record};
use crate::types::Color;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SearchResult {
    /// `None` only when the side to move has no legal move at all.
    pub best_move: Option<Move>,
    pub nodes_searched: u64,
    pub score: Score,
    /// False if the time budget ran out before every root move was searched.
    pub completed: bool,
}

/// Depth-first alpha-beta minimax over a single `GameState`, playing and taking back moves
/// in place. White maximizes and Black minimizes; all scores are from White's point of view.
pub struct Searcher<E> {
    evaluator: E,
}

impl<E: BoardEvaluator> Searcher<E> {
    pub fn new() -> Searcher<E> {
        Searcher {
            evaluator: Default::default(),
        }
    }

    pub fn with_evaluator(evaluator: E) -> Searcher<E> {
        Searcher { evaluator }
    }

    /// Searches `depth` plies below `game` and reports the best move for the side to move.
    /// A depth of zero is treated as one. `game` is left exactly as it was given.
    pub fn search<R: DataRecorder + ?Sized>(
        &mut self,
        game: &mut GameState,
        depth: u32,
        time_budget: Option<Duration>,
        recorder: &R,
    ) -> SearchResult {
        let depth = depth.max(1);
        let mut search = Search {
            evaluator: &self.evaluator,
            time_budget,
            start_time: Instant::now(),
            timed_out: false,
            stats: Record {
                depth,
                ..Default::default()
            },
        };

        let result = search.search_root(game, depth);
        search.stats.completed = result.completed;
        search.stats.score = result.score.to_string();
        search.stats.best_move = result
            .best_move
            .map(|m| m.to_string())
            .unwrap_or_default();
        search.stats.elapsed_ms = search.start_time.elapsed().as_millis() as u64;
        info!(
            "searched {} nodes to depth {}: best {} score {}",
            result.nodes_searched, depth, search.stats.best_move, result.score
        );
        recorder.record(game, &search.stats);
        result
    }
}

impl<E: BoardEvaluator> Default for Searcher<E> {
    fn default() -> Searcher<E> {
        Searcher::new()
    }
}

struct Search<'a, E> {
    evaluator: &'a E,
    time_budget: Option<Duration>,
    start_time: Instant,
    timed_out: bool,
    stats: Record,
}

impl<'a, E: BoardEvaluator> Search<'a, E> {
    fn search_root(&mut self, game: &mut GameState, depth: u32) -> SearchResult {
        self.stats.nodes += 1;
        let side = game.side_to_move();
        let mut moves = game.legal_moves(side);
        if moves.is_empty() {
            let score = self.terminal_score(game, side, 0);
            return SearchResult {
                best_move: None,
                nodes_searched: self.stats.nodes,
                score,
                completed: true,
            };
        }

        order_moves(game, &mut moves);
        let mut alpha = Score::Loss(0);
        let mut beta = Score::Win(0);
        let mut best: Option<(Move, Score)> = None;
        for mov in moves {
            // The first move is always searched so that there is something to report.
            if best.is_some() && self.out_of_time() {
                break;
            }

            let record = game.make(mov, &mut PromotionChoice::Queen);
            let score = self.alpha_beta(game, depth - 1, 1, alpha, beta);
            game.unmake_move(record);
            debug!("root move {} scored {}", mov, score);

            let improves = match best {
                None => true,
                Some((_, best_score)) => is_better(side, score, best_score),
            };

            if improves {
                best = Some((mov, score));
            }

            match side {
                Color::White => alpha = alpha.max(score),
                Color::Black => beta = beta.min(score),
            }
        }

        let (best_move, score) = match best {
            Some((mov, score)) => (Some(mov), score),
            None => (None, Score::Evaluated(0.0)),
        };

        SearchResult {
            best_move,
            nodes_searched: self.stats.nodes,
            score,
            completed: !self.timed_out,
        }
    }

    fn alpha_beta(
        &mut self,
        game: &mut GameState,
        depth: u32,
        ply: u32,
        mut alpha: Score,
        mut beta: Score,
    ) -> Score {
        self.stats.nodes += 1;
        let side = game.side_to_move();

        // Terminal positions are scored as such even at the horizon.
        let mut moves = game.legal_moves(side);
        if moves.is_empty() {
            self.stats.terminal_nodes += 1;
            return self.terminal_score(game, side, ply);
        }

        if game.is_draw() {
            self.stats.terminal_nodes += 1;
            return Score::Evaluated(0.0);
        }

        if depth == 0 {
            self.stats.leaf_nodes += 1;
            return self.evaluator.evaluate(game);
        }

        order_moves(game, &mut moves);
        let mut best: Option<Score> = None;
        for mov in moves {
            if self.out_of_time() {
                break;
            }

            let record = game.make(mov, &mut PromotionChoice::Queen);
            let score = self.alpha_beta(game, depth - 1, ply + 1, alpha, beta);
            game.unmake_move(record);

            best = Some(match best {
                Some(current) if !is_better(side, score, current) => current,
                _ => score,
            });

            match side {
                Color::White => alpha = alpha.max(score),
                Color::Black => beta = beta.min(score),
            }

            if beta <= alpha {
                trace!("cutoff at ply {} after {}", ply, mov);
                self.stats.beta_cutoffs += 1;
                break;
            }
        }

        // Only reachable without a best score if the clock ran out before the first child.
        match best {
            Some(score) => score,
            None => self.evaluator.evaluate(game),
        }
    }

    /// Score of a position where `side` has no legal move: mate if in check, otherwise a
    /// stalemate.
    fn terminal_score(&self, game: &GameState, side: Color, ply: u32) -> Score {
        if !game.in_check(side) {
            return Score::Evaluated(0.0);
        }

        match side {
            Color::White => Score::Loss(ply),
            Color::Black => Score::Win(ply),
        }
    }

    fn out_of_time(&mut self) -> bool {
        if self.timed_out {
            return true;
        }

        if let Some(budget) = self.time_budget {
            if self.start_time.elapsed() > budget {
                debug!("search ran out of time after {} nodes", self.stats.nodes);
                self.timed_out = true;
            }
        }

        self.timed_out
    }
}

fn is_better(side: Color, candidate: Score, current: Score) -> bool {
    match side {
        Color::White => candidate > current,
        Color::Black => candidate < current,
    }
}

/// Captures first, everything else after, each group in generation order.
fn order_moves(game: &GameState, moves: &mut Vec<Move>) {
    moves.sort_by_key(|&mov| !game.is_capture(mov));
}
