//! Helpers shared by the per-piece pseudo-legal generators.

use crate::game_state::chess_rules::promotion_rank;
use crate::game_state::chess_types::*;
use crate::moves::attack_tables::piece_offsets;
use crate::moves::move_descriptions::{Move, MoveFlags, FLAG_CAPTURE, FLAG_NORMAL, FLAG_PROMOTION};

#[inline]
pub fn enemy_piece_on(game_state: &GameState, square: Square) -> Option<PieceKind> {
    match game_state.board[square as usize] {
        Some(piece) if piece.color != game_state.side_to_move => Some(piece.kind),
        _ => None,
    }
}

/// Build a move for the side to move, filling the captured piece from the
/// destination square.
#[inline]
pub fn build_move(
    game_state: &GameState,
    from: Square,
    to: Square,
    piece: PieceKind,
    flags: MoveFlags,
) -> Move {
    let captured = enemy_piece_on(game_state, to);
    let flags = if captured.is_some() {
        flags | FLAG_CAPTURE
    } else {
        flags
    };

    Move {
        color: game_state.side_to_move,
        from,
        to,
        piece,
        captured,
        promotion: None,
        flags,
    }
}

/// Push a pawn move, expanding to the four promotion choices on the back rank.
pub fn push_pawn_move(
    game_state: &GameState,
    from: Square,
    to: Square,
    flags: MoveFlags,
    out: &mut Vec<Move>,
) {
    let mv = build_move(game_state, from, to, PieceKind::Pawn, flags);

    if rank_of(to) == promotion_rank(game_state.side_to_move) {
        for promo in PieceKind::PROMOTIONS {
            out.push(Move {
                promotion: Some(promo),
                flags: mv.flags | FLAG_PROMOTION,
                ..mv
            });
        }
    } else {
        out.push(mv);
    }
}

/// Knight and king single steps: one occupancy check per offset.
pub fn generate_step_moves(
    game_state: &GameState,
    from: Square,
    kind: PieceKind,
    out: &mut Vec<Move>,
) {
    let us = game_state.side_to_move;
    for &offset in piece_offsets(kind) {
        let Some(to) = offset_square(from, offset) else {
            continue;
        };
        match game_state.board[to as usize] {
            Some(piece) if piece.color == us => {}
            Some(_) => out.push(build_move(game_state, from, to, kind, 0)),
            None => out.push(build_move(game_state, from, to, kind, FLAG_NORMAL)),
        }
    }
}

/// Bishop, rook and queen rays: quiet moves until a blocker, then a capture
/// if the blocker is an enemy.
pub fn generate_slider_moves(
    game_state: &GameState,
    from: Square,
    kind: PieceKind,
    out: &mut Vec<Move>,
) {
    let us = game_state.side_to_move;
    for &offset in piece_offsets(kind) {
        let mut cursor = from;
        while let Some(to) = offset_square(cursor, offset) {
            match game_state.board[to as usize] {
                None => out.push(build_move(game_state, from, to, kind, FLAG_NORMAL)),
                Some(piece) => {
                    if piece.color != us {
                        out.push(build_move(game_state, from, to, kind, 0));
                    }
                    break;
                }
            }
            cursor = to;
        }
    }
}
