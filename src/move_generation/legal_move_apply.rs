//! Move application and reversal.
//!
//! `make_move`/`unmake_move` are the in-place primitives shared by legality
//! filtering, perft and search: they push and pop one `UndoState` each and
//! never touch the repetition table. `apply_move`/`undo_move` are the public
//! game-level operations layered on top: they validate, keep repetition
//! counts current and return a verbose `MoveRecord`.

use log::trace;

use crate::chess_errors::{ChessError, ChessResult};
use crate::game_state::chess_rules::{pawn_push, rook_home};
use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_generator::generate_legal_moves;
use crate::move_generation::move_generator::MoveFilter;
use crate::moves::move_descriptions::{
    Move, MoveRecord, FLAG_BIG_PAWN, FLAG_EP_CAPTURE, FLAG_KSIDE_CASTLE, FLAG_QSIDE_CASTLE,
};
use crate::utils::san::move_to_san;

/// Rook origin and destination for a castling king move.
#[inline]
fn castling_rook_squares(mv: &Move) -> Option<(Square, Square)> {
    if mv.has_flag(FLAG_KSIDE_CASTLE) {
        Some((mv.to + 1, mv.to - 1))
    } else if mv.has_flag(FLAG_QSIDE_CASTLE) {
        Some((mv.to - 2, mv.to + 1))
    } else {
        None
    }
}

/// Square of the pawn removed by an en-passant capture.
#[inline]
fn en_passant_victim(mv: &Move) -> Square {
    (i16::from(mv.to) - pawn_push(mv.color)) as Square
}

impl GameState {
    /// Play `mv` without any legality check. `mv` must have been generated
    /// for the current position.
    pub(crate) fn make_move(&mut self, mv: Move) {
        let us = mv.color;
        let them = us.opposite();

        let victim = if mv.has_flag(FLAG_EP_CAPTURE) {
            self.board[en_passant_victim(&mv) as usize].take()
        } else {
            None
        };

        self.undo_stack.push(UndoState {
            mv,
            prev_side_to_move: self.side_to_move,
            prev_castling: self.castling,
            prev_en_passant: self.en_passant,
            prev_halfmove_clock: self.halfmove_clock,
            prev_fullmove_number: self.fullmove_number,
            prev_kings: self.kings,
            en_passant_victim: victim,
        });

        let placed = Piece::new(us, mv.promotion.unwrap_or(mv.piece));
        self.board[mv.from as usize] = None;
        self.board[mv.to as usize] = Some(placed);

        if let Some((rook_from, rook_to)) = castling_rook_squares(&mv) {
            self.board[rook_to as usize] = self.board[rook_from as usize].take();
        }

        if mv.piece == PieceKind::King {
            self.kings[us.index()] = Some(mv.to);
            self.castling[us.index()] = 0;
        }

        // A rook leaving or being captured on its home square ends that right.
        for color in [us, them] {
            if self.castling[color.index()] == 0 {
                continue;
            }
            for side in [CastleSide::Kingside, CastleSide::Queenside] {
                let home = rook_home(color, side);
                if mv.from == home || mv.to == home {
                    self.castling[color.index()] &= !side.right();
                }
            }
        }

        self.en_passant = if mv.has_flag(FLAG_BIG_PAWN) {
            offset_square(mv.from, pawn_push(us))
        } else {
            None
        };

        if mv.piece == PieceKind::Pawn || mv.is_capture() {
            self.halfmove_clock = 0;
        } else {
            self.halfmove_clock += 1;
        }

        if us == Color::Black {
            self.fullmove_number += 1;
        }

        self.side_to_move = them;
    }

    /// Reverse the most recent `make_move`.
    pub(crate) fn unmake_move(&mut self) -> Option<Move> {
        let undo = self.undo_stack.pop()?;
        let mv = undo.mv;
        let us = mv.color;

        self.side_to_move = undo.prev_side_to_move;
        self.castling = undo.prev_castling;
        self.en_passant = undo.prev_en_passant;
        self.halfmove_clock = undo.prev_halfmove_clock;
        self.fullmove_number = undo.prev_fullmove_number;
        self.kings = undo.prev_kings;

        self.board[mv.from as usize] = Some(Piece::new(us, mv.piece));
        self.board[mv.to as usize] = None;

        if mv.has_flag(FLAG_EP_CAPTURE) {
            self.board[en_passant_victim(&mv) as usize] = undo.en_passant_victim;
        } else if let Some(captured) = mv.captured {
            self.board[mv.to as usize] = Some(Piece::new(us.opposite(), captured));
        }

        if let Some((rook_from, rook_to)) = castling_rook_squares(&mv) {
            self.board[rook_from as usize] = self.board[rook_to as usize].take();
        }

        Some(mv)
    }

    /// Play a legal move and return its verbose record.
    ///
    /// `mv` is matched against the legal moves of its origin square by
    /// destination and promotion piece, so a caller may build it by hand.
    pub fn apply_move(&mut self, mv: Move) -> ChessResult<MoveRecord> {
        let legal = generate_legal_moves(self, MoveFilter::from_square(mv.from))
            .into_iter()
            .find(|candidate| candidate.to == mv.to && candidate.promotion == mv.promotion)
            .ok_or_else(|| ChessError::IllegalMove(mv.to_lan()))?;

        Ok(self.commit_move(legal))
    }

    /// Play an already validated legal move.
    pub(crate) fn commit_move(&mut self, mv: Move) -> MoveRecord {
        let san = move_to_san(self, &mv);
        let before = self.get_fen();

        self.make_move(mv);
        self.record_position();

        let after = self.get_fen();
        trace!("applied {san} -> {after}");

        MoveRecord {
            mv,
            san,
            lan: mv.to_lan(),
            before,
            after,
        }
    }

    /// Take back the last move played.
    pub fn undo_move(&mut self) -> ChessResult<MoveRecord> {
        if self.undo_stack.is_empty() {
            return Err(ChessError::EmptyHistory);
        }

        let after = self.get_fen();
        self.forget_position();
        let mv = self.unmake_move().ok_or(ChessError::EmptyHistory)?;
        let before = self.get_fen();
        let san = move_to_san(self, &mv);

        Ok(MoveRecord {
            mv,
            san,
            lan: mv.to_lan(),
            before,
            after,
        })
    }

    /// Number of moves played since the position was loaded.
    #[inline]
    pub fn history_len(&self) -> usize {
        self.undo_stack.len()
    }
}

#[cfg(test)]
mod tests {
    use crate::chess_errors::ChessError;
    use crate::game_state::chess_types::{Color, GameState, Piece, PieceKind};

    fn play_all(game: &mut GameState, sans: &[&str]) {
        for san in sans {
            game.play(san).expect("move should be legal");
        }
    }

    #[test]
    fn every_move_round_trips_through_undo() {
        let fens = [
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
            "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
            "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1",
            "rnbqkbnr/ppp1p1pp/8/3pPp2/8/8/PPPP1PPP/RNBQKBNR w KQkq f6 0 3",
        ];
        for fen in fens {
            let mut game = GameState::from_fen(fen).expect("FEN should parse");
            let mover = game.turn();
            let clock = game.halfmove_clock();
            for mv in game.moves() {
                let record = game.apply_move(mv).expect("generated move should apply");
                assert_eq!(record.before, fen);
                assert_eq!(game.turn(), mover.opposite(), "side to move after {}", record.san);
                let expected_clock = if mv.piece == PieceKind::Pawn || mv.is_capture() { 0 } else { clock + 1 };
                assert_eq!(game.halfmove_clock(), expected_clock, "half-move clock after {}", record.san);
                game.undo_move().expect("undo should succeed");
                assert_eq!(game.get_fen(), fen, "after undoing {}", record.san);
                assert_eq!(game.position_count(), 1);
            }
        }
    }

    #[test]
    fn halfmove_clock_resets_on_pawn_moves_and_captures() {
        let mut game = GameState::new_game();
        play_all(&mut game, &["Nf3", "Nc6"]);
        assert_eq!(game.halfmove_clock(), 2);
        assert_eq!(game.move_number(), 2);
        play_all(&mut game, &["e4"]);
        assert_eq!(game.halfmove_clock(), 0);
        play_all(&mut game, &["Nb4", "Nc3", "Nxa2"]);
        assert_eq!(game.halfmove_clock(), 0);
        assert_eq!(game.turn(), Color::White);
    }

    #[test]
    fn en_passant_removes_pawn_behind_destination() {
        let mut game = GameState::from_fen("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 2")
            .expect("FEN should parse");
        let record = game.play("exd6").expect("en passant should be legal");
        assert_eq!(record.flags(), "e");
        assert_eq!(game.get("d5").expect("valid square"), None);
        assert_eq!(
            game.get("d6").expect("valid square"),
            Some(Piece::new(Color::White, PieceKind::Pawn))
        );
        game.undo_move().expect("undo should succeed");
        assert_eq!(game.get_fen(), "4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 2");
    }

    #[test]
    fn en_passant_target_without_victim_adds_no_pawn() {
        let fen = "4k3/8/8/4P3/8/8/8/4K3 w - d6 0 1";
        let mut game = GameState::from_fen(fen).expect("FEN should parse");
        let lans: Vec<String> = game.moves().iter().map(|m| m.to_lan()).collect();
        assert!(!lans.contains(&"e5d6".to_owned()));
        assert_eq!(game.get("d5").expect("valid square"), None);
        assert_eq!(game.get_fen(), "4k3/8/8/4P3/8/8/8/4K3 w - - 0 1");
        assert!(game.play("exd6").is_err());
    }

    #[test]
    fn castling_moves_rook_and_clears_rights() {
        let mut game = GameState::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1")
            .expect("FEN should parse");
        game.play("O-O").expect("castling should be legal");
        assert_eq!(game.get_fen(), "r3k2r/8/8/8/8/8/8/R4RK1 b kq - 1 1");
        game.play("O-O-O").expect("castling should be legal");
        assert_eq!(game.get_fen(), "2kr3r/8/8/8/8/8/8/R4RK1 w - - 2 2");
    }

    #[test]
    fn capturing_a_home_rook_revokes_its_right() {
        let mut game = GameState::from_fen("r3k2r/8/8/8/8/8/6b1/R3K2R b KQkq - 0 1")
            .expect("FEN should parse");
        game.play("Bxh1").expect("capture should be legal");
        assert_eq!(game.castling_rights(Color::White), (false, true));
    }

    #[test]
    fn promotion_replaces_pawn() {
        let mut game = GameState::from_fen("7k/4P3/8/8/8/8/8/4K3 w - - 0 1")
            .expect("FEN should parse");
        game.play("e8=N").expect("promotion should be legal");
        assert_eq!(
            game.get("e8").expect("valid square"),
            Some(Piece::new(Color::White, PieceKind::Knight))
        );
        game.undo_move().expect("undo should succeed");
        assert_eq!(
            game.get("e7").expect("valid square"),
            Some(Piece::new(Color::White, PieceKind::Pawn))
        );
    }

    #[test]
    fn undo_on_fresh_game_is_an_error() {
        let mut game = GameState::new_game();
        assert_eq!(game.undo_move(), Err(ChessError::EmptyHistory));
    }

    #[test]
    fn illegal_structured_move_is_rejected_without_mutation() {
        let mut game = GameState::new_game();
        let mut mv = game.moves()[0];
        mv.to = mv.from;
        assert!(matches!(game.apply_move(mv), Err(ChessError::IllegalMove(_))));
        assert_eq!(game.history_len(), 0);
    }
}
