//! Full legal move generation pipeline.
//!
//! Generates pseudo-legal moves, plays each one, and keeps it only when the
//! mover's own king is not attacked afterwards.

use crate::chess_errors::ChessResult;
use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_checks::is_king_in_check;
use crate::move_generation::move_generator::{generate_pseudo_legal_moves, MoveFilter};
use crate::moves::move_descriptions::Move;
use crate::utils::algebraic::algebraic_to_square;
use crate::utils::san::move_to_san;

pub fn generate_legal_moves(game_state: &mut GameState, filter: MoveFilter) -> Vec<Move> {
    let mut pseudo = Vec::<Move>::with_capacity(64);
    generate_pseudo_legal_moves(game_state, filter, &mut pseudo);

    let us = game_state.side_to_move;
    pseudo.retain(|mv| {
        game_state.make_move(*mv);
        // Illegal if own king is in check after move.
        let legal = !is_king_in_check(game_state, us);
        game_state.unmake_move();
        legal
    });
    pseudo
}

/// Whether the side to move has at least one legal move.
pub fn has_legal_move(game_state: &mut GameState) -> bool {
    let mut pseudo = Vec::<Move>::with_capacity(64);
    generate_pseudo_legal_moves(game_state, MoveFilter::all(), &mut pseudo);

    let us = game_state.side_to_move;
    pseudo.into_iter().any(|mv| {
        game_state.make_move(mv);
        let legal = !is_king_in_check(game_state, us);
        game_state.unmake_move();
        legal
    })
}

impl GameState {
    /// Every legal move for the side to move.
    pub fn moves(&mut self) -> Vec<Move> {
        generate_legal_moves(self, MoveFilter::all())
    }

    /// Legal moves of the piece standing on `square`.
    pub fn moves_from(&mut self, square: &str) -> ChessResult<Vec<Move>> {
        let from = algebraic_to_square(square)?;
        Ok(generate_legal_moves(self, MoveFilter::from_square(from)))
    }

    pub fn moves_with(&mut self, filter: MoveFilter) -> Vec<Move> {
        generate_legal_moves(self, filter)
    }

    /// Legal moves rendered as SAN, in generation order.
    pub fn moves_san(&mut self) -> Vec<String> {
        let moves = self.moves();
        moves.iter().map(|mv| move_to_san(self, mv)).collect()
    }
}
