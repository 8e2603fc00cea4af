// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use knightfall::{
    Color, FnPromotion, GameState, MoveFlags, PieceKind, PromotionChoice, Square,
};

fn sq(s: &str) -> Square {
    s.parse().unwrap()
}

fn play(game: &mut GameState, moves: &[&str]) {
    for text in moves {
        let origin = sq(&text[0..2]);
        let dest = sq(&text[2..4]);
        if let Err(err) = game.try_make_move(origin, dest, &mut PromotionChoice::Queen) {
            panic!("{} rejected: {}", text, err);
        }
    }
}

fn can_move(game: &mut GameState, origin: &str, dest: &str) -> bool {
    let id = game.piece_at(sq(origin)).unwrap();
    game.is_valid_move(id, sq(dest))
}

//
// En passant
//

const EN_PASSANT_SETUP: &str = "4k3/3p4/8/4P3/8/8/8/4K3 b - - 0 1";

#[test]
fn en_passant_right_after_double_step() {
    let mut game = GameState::from_fen(EN_PASSANT_SETUP).unwrap();
    play(&mut game, &["d7d5"]);
    assert!(can_move(&mut game, "e5", "d6"));
    assert_eq!(Some(sq("d6")), game.en_passant_square());
}

#[test]
fn en_passant_expires_after_one_turn() {
    let mut game = GameState::from_fen(EN_PASSANT_SETUP).unwrap();
    play(&mut game, &["d7d5", "e1e2", "e8e7"]);
    assert!(!can_move(&mut game, "e5", "d6"));
    assert_eq!(None, game.en_passant_square());
}

#[test]
fn two_single_steps_are_not_a_double_step() {
    let mut game = GameState::from_fen(EN_PASSANT_SETUP).unwrap();
    play(&mut game, &["d7d6", "e1e2", "d6d5"]);
    assert!(!can_move(&mut game, "e5", "d6"));
}

#[test]
fn en_passant_removes_the_passed_pawn() {
    let mut game = GameState::from_fen(EN_PASSANT_SETUP).unwrap();
    play(&mut game, &["d7d5"]);
    let before = game.clone();
    let record = game
        .try_make_move(sq("e5"), sq("d6"), &mut PromotionChoice::Queen)
        .unwrap();

    assert!(record.flags.contains(MoveFlags::EN_PASSANT));
    assert_eq!(sq("d5"), record.captured.unwrap().square);
    assert_eq!(None, game.piece_at(sq("d5")));
    assert_eq!(1, game.captured_pieces().len());
    assert_eq!("4k3/8/3P4/8/8/8/8/4K3 b - - 0 2", game.as_fen());

    game.unmake_move(record);
    assert_eq!(before, game);
}

#[test]
fn en_passant_cannot_expose_the_king() {
    // both pawns stand between the white king and the black rook
    let mut game = GameState::from_fen("8/8/8/K2pP2r/8/8/8/4k3 w - d6 0 2").unwrap();
    assert!(!can_move(&mut game, "e5", "d6"));
    assert!(can_move(&mut game, "e5", "e6"));
}

//
// Castling
//

#[test]
fn castle_both_ways() {
    let mut game = GameState::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
    assert!(can_move(&mut game, "e1", "g1"));
    assert!(can_move(&mut game, "e1", "c1"));

    let before = game.clone();
    let record = game
        .try_make_move(sq("e1"), sq("g1"), &mut PromotionChoice::Queen)
        .unwrap();
    assert!(record.is_castle());
    assert!(record.flags.contains(MoveFlags::SHORT_CASTLE));
    assert_eq!(
        PieceKind::Rook,
        game.piece(game.piece_at(sq("f1")).unwrap()).kind
    );
    assert_eq!(None, game.piece_at(sq("h1")));

    assert!(can_move(&mut game, "e8", "c8"));
    let reply = game
        .try_make_move(sq("e8"), sq("c8"), &mut PromotionChoice::Queen)
        .unwrap();
    assert!(reply.flags.contains(MoveFlags::LONG_CASTLE));
    assert_eq!(
        PieceKind::Rook,
        game.piece(game.piece_at(sq("d8")).unwrap()).kind
    );
    assert_eq!("2kr3r/8/8/8/8/8/8/R4RK1 w - - 0 2", game.as_fen());

    game.unmake_move(reply);
    game.unmake_move(record);
    assert_eq!(before, game);
}

#[test]
fn no_castling_out_of_check() {
    let mut game = GameState::from_fen("4r1k1/8/8/8/8/8/8/R3K2R w KQ - 0 1").unwrap();
    assert!(game.in_check(Color::White));
    assert!(!can_move(&mut game, "e1", "g1"));
    assert!(!can_move(&mut game, "e1", "c1"));
}

#[test]
fn no_castling_through_check() {
    let mut game = GameState::from_fen("5rk1/8/8/8/8/8/8/R3K2R w KQ - 0 1").unwrap();
    assert!(!can_move(&mut game, "e1", "g1"));
    assert!(can_move(&mut game, "e1", "c1"));
}

#[test]
fn no_castling_into_check() {
    let mut game = GameState::from_fen("6rk/8/8/8/8/8/8/R3K2R w KQ - 0 1").unwrap();
    assert!(!can_move(&mut game, "e1", "g1"));
    assert!(can_move(&mut game, "e1", "c1"));
}

#[test]
fn long_castle_ignores_attacks_on_the_rook_side() {
    let mut game = GameState::from_fen("1r2k3/8/8/8/8/8/8/R3K2R w KQ - 0 1").unwrap();
    assert!(can_move(&mut game, "e1", "c1"));
}

#[test]
fn no_castling_through_pieces() {
    let mut game = GameState::from_fen("4k3/8/8/8/8/8/8/RN2K2R w KQ - 0 1").unwrap();
    assert!(!can_move(&mut game, "e1", "c1"));
    assert!(can_move(&mut game, "e1", "g1"));
}

#[test]
fn no_castling_without_the_right() {
    let mut game = GameState::from_fen("4k3/8/8/8/8/8/8/R3K2R w K - 0 1").unwrap();
    assert!(!can_move(&mut game, "e1", "c1"));
    assert!(can_move(&mut game, "e1", "g1"));
}

#[test]
fn no_castling_after_rook_returns() {
    let mut game = GameState::from_fen("4k3/8/8/8/8/8/8/R3K2R w KQ - 0 1").unwrap();
    play(&mut game, &["h1h2", "e8d8", "h2h1", "d8e8"]);
    assert!(!can_move(&mut game, "e1", "g1"));
    assert!(can_move(&mut game, "e1", "c1"));
}

#[test]
fn no_castling_after_king_returns() {
    let mut game = GameState::from_fen("4k3/8/8/8/8/8/8/R3K2R w KQ - 0 1").unwrap();
    play(&mut game, &["e1f1", "e8d8", "f1e1", "d8e8"]);
    assert!(!can_move(&mut game, "e1", "g1"));
    assert!(!can_move(&mut game, "e1", "c1"));
}

#[test]
fn pawn_attacks_stop_castling() {
    // the pawn on e2 cannot move onto f1 or d1, but it attacks both
    let mut game = GameState::from_fen("4k3/8/8/8/8/8/4p3/R3K2R w KQ - 0 1").unwrap();
    assert!(!game.in_check(Color::White));
    assert!(!can_move(&mut game, "e1", "g1"));
    assert!(!can_move(&mut game, "e1", "c1"));
}

//
// Promotion
//

#[test]
fn promotion_asks_the_provider() {
    let mut game = GameState::from_fen("4k3/P7/8/8/8/8/8/4K3 w - - 0 1").unwrap();
    let before = game.clone();
    let mut asked = Vec::new();
    let record = game
        .try_make_move(
            sq("a7"),
            sq("a8"),
            &mut FnPromotion(|color: Color, square: Square| {
                asked.push((color, square));
                PromotionChoice::Knight
            }),
        )
        .unwrap();

    assert_eq!(vec![(Color::White, sq("a8"))], asked);
    assert!(record.flags.contains(MoveFlags::PROMOTION));
    let knight = game.piece_at(sq("a8")).unwrap();
    assert_eq!(PieceKind::Knight, game.piece(knight).kind);
    assert_eq!(1, game.parked_pawns().len());
    assert_eq!(2, game.pieces_of(Color::White).count());
    assert_eq!("N3k3/8/8/8/8/8/8/4K3 b - - 0 1", game.as_fen());

    game.unmake_move(record);
    assert_eq!(before, game);
    assert!(game.parked_pawns().is_empty());
}

#[test]
fn promotion_by_capture() {
    let mut game = GameState::from_fen("1r2k3/P7/8/8/8/8/8/4K3 w - - 0 1").unwrap();
    let record = game
        .try_make_move(sq("a7"), sq("b8"), &mut PromotionChoice::Queen)
        .unwrap();

    assert!(record.is_capture());
    assert_eq!(Some(PieceKind::Queen), record.promotion.map(|p| p.kind));
    assert!(game.in_check(Color::Black));
}

#[test]
fn promoted_piece_moves_like_its_kind() {
    let mut game = GameState::from_fen("7k/P7/8/8/8/8/8/4K3 w - - 0 1").unwrap();
    play(&mut game, &["a7a8", "h8h7"]);
    assert!(can_move(&mut game, "a8", "h1"));
    assert!(can_move(&mut game, "a8", "a1"));
}
