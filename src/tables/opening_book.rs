//! Tiny built-in opening book.
//!
//! Book lines are SAN sequences replayed from the starting position once at
//! construction. Every position reached along a line is indexed by its
//! normalized position key, so transpositions between lines share entries.

use std::collections::HashMap;

use log::trace;
use rand::Rng;

use crate::chess_errors::{ChessError, ChessResult};
use crate::game_state::chess_types::GameState;
use crate::moves::move_descriptions::Move;
use crate::utils::san::san_to_move;

/// `weight` followed by the SAN moves of the line.
const BUILTIN_LINES: &str = "\
8 e4 e5 Nf3 Nc6 Bb5 a6 Ba4 Nf6
6 e4 e5 Nf3 Nc6 Bc4 Bc5 c3 Nf6
3 e4 e5 Nf3 Nf6 Nxe5 d6 Nf3 Nxe4
7 e4 c5 Nf3 d6 d4 cxd4 Nxd4 Nf6 Nc3 a6
4 e4 c5 Nf3 Nc6 d4 cxd4 Nxd4 Nf6
4 e4 e6 d4 d5 Nc3 Nf6
4 e4 c6 d4 d5 Nc3 dxe4 Nxe4 Bf5
7 d4 d5 c4 e6 Nc3 Nf6 Bg5 Be7
4 d4 d5 c4 c6 Nf3 Nf6 Nc3 dxc4
6 d4 Nf6 c4 e6 Nc3 Bb4 e3 O-O
5 d4 Nf6 c4 g6 Nc3 Bg7 e4 d6
4 c4 e5 Nc3 Nf6 Nf3 Nc6
4 Nf3 d5 g3 Nf6 Bg2 e6 O-O Be7
";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookMove {
    pub mv: Move,
    pub weight: u32,
}

#[derive(Debug, Clone, Default)]
pub struct OpeningBook {
    by_position: HashMap<String, Vec<BookMove>>,
}

impl OpeningBook {
    pub fn builtin() -> Self {
        Self::from_lines(BUILTIN_LINES).expect("built-in book lines should replay")
    }

    /// Build a book from lines of `weight san san ...`. A missing leading
    /// weight counts as 1; blank lines and `#` comments are skipped.
    pub fn from_lines(text: &str) -> ChessResult<Self> {
        let mut by_position_and_move: HashMap<String, Vec<BookMove>> = HashMap::new();

        for line in text.lines().map(str::trim) {
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let mut tokens = line.split_whitespace().peekable();
            let row_weight = match tokens.peek().and_then(|t| t.parse::<u32>().ok()) {
                Some(weight) => {
                    tokens.next();
                    weight.max(1)
                }
                None => 1,
            };

            let mut state = GameState::new_game();
            for token in tokens {
                let mv = san_to_move(&mut state, token).map_err(|e| {
                    ChessError::InvalidSan(format!("book line '{line}': {e}"))
                })?;

                let row = by_position_and_move.entry(state.position_key()).or_default();
                match row.iter_mut().find(|book_move| book_move.mv == mv) {
                    Some(existing) => existing.weight = existing.weight.saturating_add(row_weight),
                    None => row.push(BookMove {
                        mv,
                        weight: row_weight,
                    }),
                }

                state.make_move(mv);
            }
        }

        Ok(Self {
            by_position: by_position_and_move,
        })
    }

    pub fn len(&self) -> usize {
        self.by_position.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_position.is_empty()
    }

    pub fn moves_for(&self, game_state: &GameState) -> Option<&[BookMove]> {
        self.by_position
            .get(&game_state.position_key())
            .map(|v| v.as_slice())
    }

    pub fn choose_weighted_move<R: Rng + ?Sized>(
        &self,
        game_state: &GameState,
        rng: &mut R,
    ) -> Option<Move> {
        let moves = self.moves_for(game_state)?;
        if moves.is_empty() {
            return None;
        }

        let total_weight: u64 = moves.iter().map(|m| u64::from(m.weight)).sum();
        if total_weight == 0 {
            return Some(moves[0].mv);
        }

        let mut pick = rng.random_range(0..total_weight);
        for m in moves {
            let w = u64::from(m.weight);
            if pick < w {
                trace!("book hit {} ({} candidates)", m.mv.to_lan(), moves.len());
                return Some(m.mv);
            }
            pick -= w;
        }

        Some(moves[0].mv)
    }
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use super::OpeningBook;
    use crate::chess_errors::ChessError;
    use crate::game_state::chess_types::GameState;

    #[test]
    fn builtin_book_indexes_start_position() {
        let book = OpeningBook::builtin();
        assert!(!book.is_empty());
        let start = GameState::new_game();
        let row = book.moves_for(&start).expect("start position should be indexed");
        let mut lans: Vec<String> = row.iter().map(|m| m.mv.to_lan()).collect();
        lans.sort();
        assert_eq!(lans, vec!["c2c4", "d2d4", "e2e4", "g1f3"]);
    }

    #[test]
    fn shared_prefixes_accumulate_weight() {
        let book = OpeningBook::from_lines("3 e4 e5\n2 e4 c5\nd4").expect("book should parse");
        let start = GameState::new_game();
        let row = book.moves_for(&start).expect("start position should be indexed");
        let e4 = row
            .iter()
            .find(|m| m.mv.to_lan() == "e2e4")
            .expect("e4 should be in the book");
        assert_eq!(e4.weight, 5);
        let d4 = row
            .iter()
            .find(|m| m.mv.to_lan() == "d2d4")
            .expect("d4 should be in the book");
        assert_eq!(d4.weight, 1);
    }

    #[test]
    fn weighted_pick_is_a_book_move() {
        let book = OpeningBook::from_lines("4 e4 e5\n1 d4 d5").expect("book should parse");
        let mut game = GameState::new_game();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..20 {
            let mv = book
                .choose_weighted_move(&game, &mut rng)
                .expect("book should choose");
            assert!(mv.to_lan() == "e2e4" || mv.to_lan() == "d2d4");
        }

        game.play("e4").expect("e4 is legal");
        let reply = book
            .choose_weighted_move(&game, &mut rng)
            .expect("reply should be in the book");
        assert_eq!(reply.to_lan(), "e7e5");

        game.play("Nf6").expect("Nf6 is legal");
        assert!(book.choose_weighted_move(&game, &mut rng).is_none());
    }

    #[test]
    fn illegal_book_line_is_rejected() {
        assert!(matches!(
            OpeningBook::from_lines("e4 e4"),
            Err(ChessError::InvalidSan(_))
        ));
    }
}
