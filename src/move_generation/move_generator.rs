//! Pseudo-legal move generation entry point.
//!
//! Walks the board, dispatches each piece of the side to move to its
//! per-piece generator, and honours an optional origin-square and
//! piece-type filter. King safety is not checked here.

use crate::game_state::chess_types::*;
use crate::move_generation::legal_moves_bishop::generate_bishop_moves;
use crate::move_generation::legal_moves_king::generate_king_moves;
use crate::move_generation::legal_moves_knight::generate_knight_moves;
use crate::move_generation::legal_moves_pawn::generate_pawn_moves;
use crate::move_generation::legal_moves_queen::generate_queen_moves;
use crate::move_generation::legal_moves_rook::generate_rook_moves;
use crate::moves::move_descriptions::Move;

/// Restricts generation to one origin square and/or one piece type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MoveFilter {
    pub square: Option<Square>,
    pub piece: Option<PieceKind>,
}

impl MoveFilter {
    #[inline]
    pub fn all() -> Self {
        Self::default()
    }

    #[inline]
    pub fn from_square(square: Square) -> Self {
        Self {
            square: Some(square),
            piece: None,
        }
    }

    #[inline]
    pub fn piece(kind: PieceKind) -> Self {
        Self {
            square: None,
            piece: Some(kind),
        }
    }
}

pub fn generate_pseudo_legal_moves(game_state: &GameState, filter: MoveFilter, out: &mut Vec<Move>) {
    let us = game_state.side_to_move;

    let mut visit = |from: Square| {
        let Some(piece) = game_state.board[from as usize] else {
            return;
        };
        if piece.color != us || filter.piece.is_some_and(|kind| kind != piece.kind) {
            return;
        }

        match piece.kind {
            PieceKind::Pawn => generate_pawn_moves(game_state, from, out),
            PieceKind::Knight => generate_knight_moves(game_state, from, out),
            PieceKind::Bishop => generate_bishop_moves(game_state, from, out),
            PieceKind::Rook => generate_rook_moves(game_state, from, out),
            PieceKind::Queen => generate_queen_moves(game_state, from, out),
            PieceKind::King => generate_king_moves(game_state, from, out),
        }
    };

    match filter.square {
        Some(square) if square & 0x88 == 0 => visit(square),
        Some(_) => {}
        None => all_squares().for_each(visit),
    }
}
