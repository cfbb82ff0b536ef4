//! Perft node counting for move-generator correctness checks.

use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_checks::is_king_in_check;
use crate::move_generation::legal_move_generator::{generate_legal_moves, has_legal_move};
use crate::move_generation::move_generator::MoveFilter;
use crate::moves::move_descriptions::{Move, FLAG_EP_CAPTURE};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PerftCounts {
    pub nodes: usize,
    pub captures: usize,
    pub en_passant: usize,
    pub castles: usize,
    pub promotions: usize,
    pub checks: usize,
    pub checkmates: usize,
}

impl GameState {
    /// Number of leaf positions reachable in exactly `depth` plies.
    pub fn perft(&mut self, depth: u8) -> usize {
        perft(self, depth).nodes
    }
}

pub fn perft(game_state: &mut GameState, depth: u8) -> PerftCounts {
    let mut total = PerftCounts::default();
    if depth == 0 {
        total.nodes = 1;
        return total;
    }

    for mv in generate_legal_moves(game_state, MoveFilter::all()) {
        perft_recurse(game_state, mv, depth, 1, &mut total);
    }
    total
}

fn perft_recurse(
    game_state: &mut GameState,
    mv: Move,
    search_depth: u8,
    current_depth: u8,
    counts: &mut PerftCounts,
) {
    game_state.make_move(mv);

    if current_depth == search_depth {
        counts.nodes += 1;
        if mv.is_capture() {
            counts.captures += 1;
        }
        if mv.has_flag(FLAG_EP_CAPTURE) {
            counts.en_passant += 1;
        }
        if mv.is_castle() {
            counts.castles += 1;
        }
        if mv.is_promotion() {
            counts.promotions += 1;
        }
        if is_king_in_check(game_state, game_state.side_to_move) {
            counts.checks += 1;
            if !has_legal_move(game_state) {
                counts.checkmates += 1;
            }
        }
    } else {
        for child in generate_legal_moves(game_state, MoveFilter::all()) {
            perft_recurse(game_state, child, search_depth, current_depth + 1, counts);
        }
    }

    game_state.unmake_move();
}

#[cfg(test)]
mod tests {
    use super::*;

    const KIWIPETE: &str = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";
    const POSITION_3: &str = "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1";

    #[test]
    fn perft_depth_zero_counts_single_node() {
        let mut game = GameState::new_game();
        assert_eq!(
            perft(&mut game, 0),
            PerftCounts {
                nodes: 1,
                ..PerftCounts::default()
            }
        );
    }

    #[test]
    fn starting_position_node_counts() {
        let mut game = GameState::new_game();
        assert_eq!(game.perft(1), 20);
        assert_eq!(game.perft(2), 400);

        let counts = perft(&mut game, 3);
        assert_eq!(counts.nodes, 8902);
        assert_eq!(counts.captures, 34);
        assert_eq!(counts.checks, 12);
        assert_eq!(counts.checkmates, 0);
        assert_eq!(game.get_fen(), crate::game_state::chess_rules::STARTING_POSITION_FEN);
    }

    #[test]
    fn kiwipete_exercises_castling_and_en_passant() {
        let mut game = GameState::from_fen(KIWIPETE).expect("kiwipete FEN should parse");
        let depth_one = perft(&mut game, 1);
        assert_eq!(depth_one.nodes, 48);
        assert_eq!(depth_one.captures, 8);
        assert_eq!(depth_one.castles, 2);

        let depth_two = perft(&mut game, 2);
        assert_eq!(
            depth_two,
            PerftCounts {
                nodes: 2039,
                captures: 351,
                en_passant: 1,
                castles: 91,
                promotions: 0,
                checks: 3,
                checkmates: 0,
            }
        );
    }

    #[test]
    fn position_three_node_counts() {
        let mut game = GameState::from_fen(POSITION_3).expect("FEN should parse");
        assert_eq!(game.perft(1), 14);
        assert_eq!(game.perft(2), 191);

        let counts = perft(&mut game, 3);
        assert_eq!(counts.nodes, 2812);
        assert_eq!(counts.captures, 209);
        assert_eq!(counts.en_passant, 2);
        assert_eq!(counts.checks, 267);
    }
}
