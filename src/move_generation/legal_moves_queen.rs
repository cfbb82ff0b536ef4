use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_shared::generate_slider_moves;
use crate::moves::move_descriptions::Move;

#[inline]
pub fn generate_queen_moves(game_state: &GameState, from: Square, out: &mut Vec<Move>) {
    generate_slider_moves(game_state, from, PieceKind::Queen, out);
}
