// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

#[macro_use]
extern crate clap;
#[macro_use]
extern crate lazy_static;

use std::fs::File;
use std::io::{self, BufRead, Write};
use std::process;
use std::time::Instant;

use clap::{App, Arg, ArgMatches, SubCommand};
use rand::seq::SliceRandom;
use regex::Regex;

use knightfall::eval::MaterialEvaluator;
use knightfall::notation;
use knightfall::search::{
    CsvDataRecorder, DataRecorder, NullDataRecorder, Searcher, DEFAULT_DEPTH,
};
use knightfall::{divide, perft, Color, GameState, Move, PromotionChoice, Square, START_FEN};

lazy_static! {
    static ref MOVE_RE: Regex = Regex::new(r"^([a-h][1-8])([a-h][1-8])([qrbn])?$").unwrap();
}

fn main() {
    env_logger::init();
    let matches = App::new(crate_name!())
        .version(crate_version!())
        .author(crate_authors!())
        .about(crate_description!())
        .subcommand(
            SubCommand::with_name("perft")
                .about("PERFT analysis of board positions")
                .arg(
                    Arg::with_name("FEN")
                        .help("FEN string for a board position")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::with_name("depth")
                        .help("Depth of move tree to search")
                        .value_name("DEPTH")
                        .short("-d")
                        .long("--depth")
                        .takes_value(true),
                )
                .arg(
                    Arg::with_name("divide")
                        .help("Print node counts for each root move")
                        .long("--divide"),
                ),
        )
        .subcommand(
            SubCommand::with_name("evaluate")
                .about("Evaluate a board position")
                .arg(
                    Arg::with_name("FEN")
                        .help("FEN string for a board position")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::with_name("depth")
                        .help("Depth of move tree to search")
                        .value_name("DEPTH")
                        .short("-d")
                        .long("--depth")
                        .takes_value(true),
                )
                .arg(
                    Arg::with_name("data")
                        .help("CSV file to append search statistics to")
                        .value_name("FILE")
                        .long("--data")
                        .takes_value(true),
                ),
        )
        .subcommand(
            SubCommand::with_name("play")
                .about("Play White against the engine")
                .arg(
                    Arg::with_name("depth")
                        .help("Depth the engine searches to")
                        .value_name("DEPTH")
                        .short("-d")
                        .long("--depth")
                        .takes_value(true),
                )
                .arg(
                    Arg::with_name("fen")
                        .help("Start from this position instead of the initial one")
                        .value_name("FEN")
                        .long("--fen")
                        .takes_value(true),
                )
                .arg(
                    Arg::with_name("random")
                        .help("Black plays random legal moves instead of searching")
                        .long("--random"),
                ),
        )
        .get_matches();

    if let Some(matches) = matches.subcommand_matches("perft") {
        run_perft(matches);
    }

    if let Some(matches) = matches.subcommand_matches("evaluate") {
        run_evaluate(matches);
    }

    if let Some(matches) = matches.subcommand_matches("play") {
        run_play(matches);
    }

    println!("{}", matches.usage());
}

fn parse_fen_or_exit(fen: &str) -> GameState {
    match GameState::from_fen(fen) {
        Ok(game) => game,
        Err(err) => {
            println!("invalid fen: {}", err);
            process::exit(1);
        }
    }
}

fn depth_or_default(matches: &ArgMatches) -> u32 {
    if matches.is_present("depth") {
        value_t_or_exit!(matches, "depth", u32)
    } else {
        DEFAULT_DEPTH
    }
}

fn run_perft(matches: &ArgMatches) -> ! {
    let fen = matches.value_of("FEN").unwrap();
    let depth = value_t_or_exit!(matches, "depth", u32);
    let game = parse_fen_or_exit(fen);

    println!("fen:   {}", fen);
    println!("depth: {}", depth);
    println!();
    println!("{}", game);
    println!();
    if matches.is_present("divide") {
        let mut counts: Vec<_> = divide(&game, depth).into_iter().collect();
        counts.sort();
        for (mov, count) in &counts {
            println!("{}: {}", mov, count);
        }

        println!();
        println!("total: {}", counts.iter().map(|(_, c)| c).sum::<u64>());
        process::exit(0);
    }

    for i in 1..=depth {
        let start = Instant::now();
        let results = perft(&game, i);
        let ms = start.elapsed().as_millis();
        println!("perft({}) = {} ({} ms)", i, results, ms);
    }

    process::exit(0);
}

fn run_evaluate(matches: &ArgMatches) -> ! {
    let fen = matches.value_of("FEN").unwrap();
    let depth = depth_or_default(matches);
    let mut game = parse_fen_or_exit(fen);

    println!("fen:   {}", fen);
    println!("depth: {}", depth);
    println!();
    println!("{}", game);
    println!();

    let recorder: Box<dyn DataRecorder> = match matches.value_of("data") {
        Some(path) => match File::create(path) {
            Ok(file) => Box::new(CsvDataRecorder::new(file)),
            Err(err) => {
                println!("can't open {}: {}", path, err);
                process::exit(1);
            }
        },
        None => Box::new(NullDataRecorder),
    };

    let mut searcher: Searcher<MaterialEvaluator> = Searcher::new();
    let result = searcher.search(&mut game, depth, None, recorder.as_ref());
    match result.best_move {
        Some(mov) => {
            println!("best move: {} ({})", mov, notation::algebraic(&mut game, mov, None))
        }
        None => println!("best move: none"),
    }

    println!("    score: {}", result.score);
    println!("    nodes: {}", result.nodes_searched);
    process::exit(0);
}

fn parse_move(text: &str) -> Option<(Square, Square, Option<PromotionChoice>)> {
    let caps = MOVE_RE.captures(text)?;
    let origin = caps.get(1)?.as_str().parse().ok()?;
    let dest = caps.get(2)?.as_str().parse().ok()?;
    let promotion = caps
        .get(3)
        .and_then(|m| m.as_str().chars().next())
        .and_then(PromotionChoice::from_char);
    Some((origin, dest, promotion))
}

fn run_play(matches: &ArgMatches) -> ! {
    let depth = depth_or_default(matches);
    let mut game = parse_fen_or_exit(matches.value_of("fen").unwrap_or(START_FEN));
    let random = matches.is_present("random");
    let mut searcher: Searcher<MaterialEvaluator> = Searcher::new();
    let mut rng = rand::thread_rng();
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        println!("{}", game);
        let side = game.side_to_move();
        if game.is_checkmate(side) {
            println!("checkmate, {:?} wins", side.toggle());
            break;
        }

        if game.is_stalemate(side) {
            println!("stalemate");
            break;
        }

        if game.is_draw() {
            println!("draw by insufficient material");
            break;
        }

        match side {
            Color::White => {
                print!("your move: ");
                let _ = io::stdout().flush();
                let line = match lines.next() {
                    Some(Ok(line)) => line,
                    _ => break,
                };

                let line = line.trim();
                if line == "quit" {
                    break;
                }

                let (origin, dest, promotion) = match parse_move(line) {
                    Some(parsed) => parsed,
                    None => {
                        println!("moves look like e2e4, or e7e8n to promote to a knight");
                        continue;
                    }
                };

                let mov = Move::new(origin, dest);
                let text = if game.legal_moves(side).contains(&mov) {
                    notation::algebraic(&mut game, mov, promotion)
                } else {
                    mov.to_string()
                };

                let mut choice = promotion.unwrap_or(PromotionChoice::Queen);
                match game.try_make_move(origin, dest, &mut choice) {
                    Ok(_) => println!("you played {}", text),
                    Err(err) => println!("{}", err),
                }
            }
            Color::Black => {
                let mov = if random {
                    game.legal_moves(side).choose(&mut rng).cloned()
                } else {
                    searcher
                        .search(&mut game, depth, None, &NullDataRecorder)
                        .best_move
                };

                let mov = match mov {
                    Some(mov) => mov,
                    None => break,
                };

                let text = notation::algebraic(&mut game, mov, None);
                game.make(mov, &mut PromotionChoice::Queen);
                println!("black plays {}", text);
            }
        }
    }

    process::exit(0);
}
