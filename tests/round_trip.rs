// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use knightfall::{Color, FnPromotion, GameState, PromotionChoice, Square, START_FEN};

const POSITIONS: &[&str] = &[
    START_FEN,
    // kiwipete: castling both ways, pins, captures everywhere
    "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
    // en passant available
    "4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 3",
    // promotions with and without capture
    "r1n1k3/1P6/8/8/8/8/6p1/4K2R w K - 0 1",
    "r1n1k3/1P6/8/8/8/8/6p1/4K2R b K - 0 1",
    // horizontal pins through en passant territory
    "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
    // promotion by capture, castling, knight check
    "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8",
];

fn check_every_move(game: &mut GameState) {
    let side = game.side_to_move();
    let moves = game.legal_moves(side);
    assert!(!moves.is_empty());
    for mov in moves {
        let before = game.clone();
        let snapshot = game.snapshot();
        let record = game.make(mov, &mut PromotionChoice::Queen);
        assert_ne!(before, *game, "{} changed nothing", mov);
        game.unmake_move(record);
        assert_eq!(before, *game, "{} did not round trip", mov);
        assert_eq!(snapshot, game.snapshot());
    }
}

#[test]
fn every_move_round_trips() {
    for fen in POSITIONS {
        let mut game = GameState::from_fen(fen).unwrap();
        check_every_move(&mut game);
    }
}

#[test]
fn nested_moves_round_trip() {
    for fen in POSITIONS {
        let mut game = GameState::from_fen(fen).unwrap();
        let original = game.clone();
        let side = game.side_to_move();
        for first in game.legal_moves(side) {
            let outer = game.make(first, &mut PromotionChoice::Queen);
            let reply_side = game.side_to_move();
            for reply in game.legal_moves(reply_side) {
                let before = game.clone();
                let inner = game.make(reply, &mut PromotionChoice::Queen);
                game.unmake_move(inner);
                assert_eq!(before, game, "{} {} did not round trip", first, reply);
            }

            game.unmake_move(outer);
            assert_eq!(original, game, "{} did not round trip", first);
        }
    }
}

#[test]
fn underpromotions_round_trip() {
    let choices = [
        PromotionChoice::Rook,
        PromotionChoice::Bishop,
        PromotionChoice::Knight,
    ];

    for &choice in choices.iter() {
        let mut game = GameState::from_fen("r1n1k3/1P6/8/8/8/8/6p1/4K2R w K - 0 1").unwrap();
        let before = game.clone();
        for mov in game.legal_moves(game.side_to_move()) {
            let mut asked = false;
            let record = game.make(mov, &mut FnPromotion(|_: Color, _: Square| {
                asked = true;
                choice
            }));

            if asked {
                let promoted = game.piece_at(mov.destination).unwrap();
                assert_eq!(choice.kind(), game.piece(promoted).kind);
            }

            game.unmake_move(record);
            assert_eq!(before, game);
        }
    }
}

#[test]
fn destinations_are_on_the_board() {
    for fen in POSITIONS {
        let game = GameState::from_fen(fen).unwrap();
        for &id in game.active_pieces() {
            for dest in game.piece(id).possible_destinations(&game) {
                assert!(dest.row() < 8 && dest.col() < 8);
                assert_ne!(game.piece(id).square, dest);
            }
        }
    }
}

#[test]
fn a_short_game_unwinds() {
    let mut game = GameState::standard_setup();
    let start = game.clone();
    let mut records = Vec::new();
    let queen = &mut PromotionChoice::Queen;
    for text in &[
        "e2e4", "d7d5", "e4d5", "d8d5", "b1c3", "d5a5", "g1f3", "c8g4", "f1e2", "b8c6", "e1g1",
        "e8c8",
    ] {
        let origin = text[0..2].parse().unwrap();
        let dest = text[2..4].parse().unwrap();
        records.push(game.try_make_move(origin, dest, queen).unwrap());
    }

    assert_eq!(12, game.half_moves());
    assert_eq!(2, game.captured_pieces().len());
    while let Some(record) = records.pop() {
        game.unmake_move(record);
    }

    assert_eq!(start, game);
}
