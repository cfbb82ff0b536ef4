//! Move ordering heuristics used to maximise alpha-beta cutoffs.

use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_checks::is_king_in_check;
use crate::moves::move_descriptions::Move;
use crate::search::board_scoring::MaterialScorer;

const CAPTURE_BASE: i32 = 30_000;
const PROMOTION_BASE: i32 = 20_000;
const CHECK_BASE: i32 = 10_000;

/// Captures by (victim - attacker) value, then promotions, then checks,
/// then quiet moves. `hint` (usually the previous best move) goes first.
pub fn order_moves(game_state: &mut GameState, moves: &mut [Move], hint: Option<Move>) {
    let mut keyed: Vec<(i32, Move)> = moves
        .iter()
        .map(|mv| {
            let key = if Some(*mv) == hint {
                i32::MAX
            } else {
                move_order_score(game_state, mv)
            };
            (key, *mv)
        })
        .collect();

    keyed.sort_by(|a, b| b.0.cmp(&a.0));
    for (slot, (_, mv)) in moves.iter_mut().zip(keyed) {
        *slot = mv;
    }
}

pub fn move_order_score(game_state: &mut GameState, mv: &Move) -> i32 {
    if let Some(victim) = mv.captured {
        return CAPTURE_BASE + MaterialScorer::piece_value(victim)
            - MaterialScorer::piece_value(mv.piece);
    }
    if let Some(promo) = mv.promotion {
        return PROMOTION_BASE + MaterialScorer::piece_value(promo);
    }

    game_state.make_move(*mv);
    let gives_check = is_king_in_check(game_state, game_state.side_to_move);
    game_state.unmake_move();

    if gives_check {
        CHECK_BASE
    } else {
        0
    }
}
