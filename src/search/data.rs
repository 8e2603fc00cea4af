// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use std::io::Write;
use std::sync::Mutex;

use csv::Writer;

use crate::game::GameState;

/// Statistics gathered over one call to `Searcher::search`.
#[derive(Clone, Default, Debug, Serialize, Deserialize)]
pub struct Record {
    pub fen: String,
    pub depth: u32,
    pub nodes: u64,
    pub leaf_nodes: u64,
    pub terminal_nodes: u64,
    pub beta_cutoffs: u64,
    pub completed: bool,
    pub best_move: String,
    pub score: String,
    pub elapsed_ms: u64,
}

pub trait DataRecorder {
    fn record(&self, game: &GameState, rec: &Record);
}

pub struct NullDataRecorder;
impl DataRecorder for NullDataRecorder {
    fn record(&self, _game: &GameState, _rec: &Record) {}
}

/// Appends one CSV row per search.
pub struct CsvDataRecorder<W: Write> {
    writer: Mutex<Writer<W>>,
}

impl<W: Write> CsvDataRecorder<W> {
    pub fn new(writer: W) -> CsvDataRecorder<W> {
        CsvDataRecorder {
            writer: Mutex::new(Writer::from_writer(writer)),
        }
    }
}

impl<W: Write> DataRecorder for CsvDataRecorder<W> {
    fn record(&self, game: &GameState, rec: &Record) {
        let mut copy = rec.clone();
        copy.fen = game.as_fen();
        let mut writer = match self.writer.lock() {
            Ok(writer) => writer,
            Err(poisoned) => poisoned.into_inner(),
        };

        if let Err(err) = writer.serialize(&copy) {
            warn!("failed to record search data: {}", err);
            return;
        }

        if let Err(err) = writer.flush() {
            warn!("failed to flush search data: {}", err);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{CsvDataRecorder, DataRecorder, Record};
    use crate::game::GameState;

    #[test]
    fn csv_rows_carry_the_fen() {
        let mut out = Vec::new();
        {
            let recorder = CsvDataRecorder::new(&mut out);
            let game = GameState::standard_setup();
            let rec = Record {
                depth: 2,
                nodes: 420,
                completed: true,
                best_move: "e2e4".to_owned(),
                ..Default::default()
            };
            recorder.record(&game, &rec);
        }

        let text = String::from_utf8(out).unwrap();
        let mut lines = text.lines();
        let header = lines.next().unwrap();
        assert!(header.starts_with("fen,depth,nodes"));
        let row = lines.next().unwrap();
        assert!(row.starts_with("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1,2,420"));
        assert!(row.contains("e2e4"));
    }
}
