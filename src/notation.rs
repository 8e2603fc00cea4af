// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Standard algebraic notation for moves.
use crate::board::PieceId;
use crate::game::GameState;
use crate::moves::{Move, PromotionChoice};
use crate::piece::CastleSide;
use crate::types::{PieceKind, Square};

/// Writes `mov` in standard algebraic notation (`Nbd7`, `exd6`, `e8=N+`, `O-O#`). The move
/// must be legal and not yet played; `game` is restored before this returns.
///
/// When other pieces of the same kind could also reach the destination, the origin file is
/// added if no rival shares it, otherwise the origin rank if no rival shares that, otherwise
/// both.
pub fn algebraic(game: &mut GameState, mov: Move, promotion: Option<PromotionChoice>) -> String {
    let id = match game.piece_at(mov.origin) {
        Some(id) => id,
        None => return mov.to_string(),
    };

    let (kind, color) = {
        let piece = game.piece(id);
        (piece.kind, piece.color)
    };

    let mut text = String::new();
    let castle = if kind == PieceKind::King {
        CastleSide::from_king_move(mov.origin, mov.destination)
    } else {
        None
    };

    match castle {
        Some(CastleSide::Short) => text.push_str("O-O"),
        Some(CastleSide::Long) => text.push_str("O-O-O"),
        None => {
            let capture = game.is_capture(mov);
            match kind.notation_letter() {
                Some(letter) => {
                    text.push(letter);
                    text.push_str(&disambiguation(game, id, mov));
                    if capture {
                        text.push('x');
                    }
                }
                None => {
                    if capture {
                        text.push(file_char(mov.origin));
                        text.push('x');
                    }
                }
            }

            text.push_str(&mov.destination.to_string());
            if kind == PieceKind::Pawn && mov.destination.row() == color.promotion_row() {
                text.push('=');
                text.push_str(&promotion.unwrap_or(PromotionChoice::Queen).to_string());
            }
        }
    }

    let mut choice = promotion.unwrap_or(PromotionChoice::Queen);
    let record = game.make_move(id, mov.destination, &mut choice);
    let opponent = color.toggle();
    if game.is_checkmate(opponent) {
        text.push('#');
    } else if game.in_check(opponent) {
        text.push('+');
    }

    game.unmake_move(record);
    text
}

fn disambiguation(game: &mut GameState, id: PieceId, mov: Move) -> String {
    let (kind, color) = {
        let piece = game.piece(id);
        (piece.kind, piece.color)
    };

    let candidates: Vec<PieceId> = game
        .pieces_of(color)
        .filter(|&other| other != id && game.piece(other).kind == kind)
        .collect();

    let mut rivals: Vec<Square> = Vec::new();
    for other in candidates {
        if game.is_valid_move(other, mov.destination) {
            rivals.push(game.piece(other).square);
        }
    }

    if rivals.is_empty() {
        return String::new();
    }

    let origin = mov.origin;
    if rivals.iter().all(|sq| sq.col() != origin.col()) {
        file_char(origin).to_string()
    } else if rivals.iter().all(|sq| sq.row() != origin.row()) {
        rank_char(origin).to_string()
    } else {
        origin.to_string()
    }
}

fn file_char(sq: Square) -> char {
    (b'a' + sq.col()) as char
}

fn rank_char(sq: Square) -> char {
    (b'1' + sq.row()) as char
}

#[cfg(test)]
mod tests {
    use super::algebraic;
    use crate::game::GameState;
    use crate::moves::{Move, PromotionChoice};
    use crate::types::Square;

    fn mv(from: &str, to: &str) -> Move {
        Move::new(from.parse::<Square>().unwrap(), to.parse::<Square>().unwrap())
    }

    fn san(fen: &str, from: &str, to: &str) -> String {
        let mut game = GameState::from_fen(fen).unwrap();
        let before = game.clone();
        let text = algebraic(&mut game, mv(from, to), None);
        assert_eq!(before, game);
        text
    }

    #[test]
    fn quiet_moves() {
        let start = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";
        assert_eq!("e4", san(start, "e2", "e4"));
        assert_eq!("Nf3", san(start, "g1", "f3"));
    }

    #[test]
    fn captures() {
        let fen = "4k3/8/8/3p4/4P3/8/8/3QK3 w - - 0 1";
        assert_eq!("exd5", san(fen, "e4", "d5"));
        assert_eq!("Qxd5", san(fen, "d1", "d5"));
    }

    #[test]
    fn en_passant_capture() {
        let fen = "4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 3";
        assert_eq!("exd6", san(fen, "e5", "d6"));
    }

    #[test]
    fn castling() {
        let fen = "4k3/8/8/8/8/8/8/R3K2R w KQ - 0 1";
        assert_eq!("O-O", san(fen, "e1", "g1"));
        assert_eq!("O-O-O", san(fen, "e1", "c1"));
    }

    #[test]
    fn check_and_mate() {
        assert_eq!("Ra8#", san("6k1/5ppp/8/8/8/8/8/R5K1 w - - 0 1", "a1", "a8"));
        assert_eq!("Ra8+", san("6k1/5pp1/8/8/8/8/8/R5K1 w - - 0 1", "a1", "a8"));
    }

    #[test]
    fn promotion_suffix() {
        let mut game = GameState::from_fen("8/1P6/8/8/8/8/k7/4K3 w - - 0 1").unwrap();
        assert_eq!("b8=Q", algebraic(&mut game, mv("b7", "b8"), None));
        assert_eq!(
            "b8=N",
            algebraic(&mut game, mv("b7", "b8"), Some(PromotionChoice::Knight))
        );
    }

    #[test]
    fn disambiguate_by_file() {
        // both knights reach d2
        let fen = "4k3/8/8/8/8/8/8/1N2KN2 w - - 0 1";
        assert_eq!("Nbd2", san(fen, "b1", "d2"));
        assert_eq!("Nfd2", san(fen, "f1", "d2"));
    }

    #[test]
    fn disambiguate_by_rank() {
        // rooks on a1 and a5 both reach a3
        let fen = "4k3/8/8/R7/8/8/8/R3K3 w - - 0 1";
        assert_eq!("R1a3", san(fen, "a1", "a3"));
        assert_eq!("R5a3", san(fen, "a5", "a3"));
    }

    #[test]
    fn disambiguate_by_both() {
        // queens on a1, a5 and e1 all reach e5; a1 shares its file with a5 and its rank
        // with e1
        let fen = "1k6/8/8/Q7/8/8/8/Q3Q2K w - - 0 1";
        assert_eq!("Qa1e5+", san(fen, "a1", "e5"));
    }

    #[test]
    fn pinned_rival_does_not_count() {
        // the f3 knight is pinned against the h1 king and can't go to d2
        let fen = "4k3/8/8/3b4/8/5N2/8/1N5K w - - 0 1";
        assert_eq!("Nd2", san(fen, "b1", "d2"));
    }
}
