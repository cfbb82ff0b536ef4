use crate::game_state::chess_rules::{pawn_push, pawn_start_rank};
use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_shared::{enemy_piece_on, push_pawn_move};
use crate::moves::move_descriptions::{Move, FLAG_BIG_PAWN, FLAG_EP_CAPTURE, FLAG_NORMAL};

pub fn generate_pawn_moves(game_state: &GameState, from: Square, out: &mut Vec<Move>) {
    let side = game_state.side_to_move;
    let push = pawn_push(side);

    if let Some(one_step) = offset_square(from, push) {
        if game_state.board[one_step as usize].is_none() {
            push_pawn_move(game_state, from, one_step, FLAG_NORMAL, out);

            if rank_of(from) == pawn_start_rank(side) {
                if let Some(two_step) = offset_square(one_step, push) {
                    if game_state.board[two_step as usize].is_none() {
                        out.push(Move {
                            color: side,
                            from,
                            to: two_step,
                            piece: PieceKind::Pawn,
                            captured: None,
                            promotion: None,
                            flags: FLAG_BIG_PAWN,
                        });
                    }
                }
            }
        }
    }

    // captures and en-passant
    for side_step in [-1i16, 1] {
        let Some(to) = offset_square(from, push + side_step) else {
            continue;
        };
        if enemy_piece_on(game_state, to).is_some() {
            push_pawn_move(game_state, from, to, 0, out);
        } else if game_state.en_passant == Some(to) {
            out.push(Move {
                color: side,
                from,
                to,
                piece: PieceKind::Pawn,
                captured: Some(PieceKind::Pawn),
                promotion: None,
                flags: FLAG_EP_CAPTURE,
            });
        }
    }
}
