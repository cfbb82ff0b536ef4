//! GameState-to-FEN serializer.
//!
//! The en-passant field follows strict FEN semantics: a stored target is
//! only written when a pawn of the side to move could actually capture
//! there without exposing its own king.

use crate::game_state::chess_rules::pawn_push;
use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_checks::is_square_attacked_on;
use crate::utils::algebraic::square_to_algebraic;

pub fn generate_fen(game_state: &GameState) -> String {
    format!(
        "{} {} {}",
        position_key(game_state),
        game_state.halfmove_clock,
        game_state.fullmove_number
    )
}

/// First four FEN fields; the normalized key for repetition counting.
pub fn position_key(game_state: &GameState) -> String {
    format!(
        "{} {} {} {}",
        generate_board_field(game_state),
        game_state.side_to_move.fen_char(),
        generate_castling_field(&game_state.castling),
        generate_en_passant_field(game_state)
    )
}

fn generate_board_field(game_state: &GameState) -> String {
    let mut out = String::new();

    for rank in (0..8u8).rev() {
        let mut empty_count = 0u8;

        for file in 0..8u8 {
            match game_state.board[square_at(file, rank) as usize] {
                Some(piece) => {
                    if empty_count > 0 {
                        out.push(char::from(b'0' + empty_count));
                        empty_count = 0;
                    }
                    out.push(piece.fen_char());
                }
                None => empty_count += 1,
            }
        }

        if empty_count > 0 {
            out.push(char::from(b'0' + empty_count));
        }

        if rank > 0 {
            out.push('/');
        }
    }

    out
}

fn generate_castling_field(rights: &[CastlingRights; 2]) -> String {
    let mut out = String::new();

    for (color, king_char, queen_char) in [(Color::White, 'K', 'Q'), (Color::Black, 'k', 'q')] {
        if rights[color.index()] & CASTLE_KINGSIDE != 0 {
            out.push(king_char);
        }
        if rights[color.index()] & CASTLE_QUEENSIDE != 0 {
            out.push(queen_char);
        }
    }

    if out.is_empty() {
        out.push('-');
    }

    out
}

fn generate_en_passant_field(game_state: &GameState) -> String {
    match en_passant_capturable(game_state) {
        Some(square) => square_to_algebraic(square),
        None => "-".to_owned(),
    }
}

/// The stored target if some pawn of the side to move can legally take on it.
fn en_passant_capturable(game_state: &GameState) -> Option<Square> {
    let ep = game_state.en_passant?;
    let us = game_state.side_to_move;
    let push = pawn_push(us);
    let victim = offset_square(ep, -push)?;
    let our_pawn = Piece::new(us, PieceKind::Pawn);

    for side in [-1i16, 1] {
        let Some(from) = offset_square(victim, side) else {
            continue;
        };
        if game_state.board[from as usize] != Some(our_pawn) {
            continue;
        }

        // Play the capture on a scratch copy of the placement only.
        let mut board = game_state.board;
        board[from as usize] = None;
        board[victim as usize] = None;
        board[ep as usize] = Some(our_pawn);

        let king_safe = match game_state.kings[us.index()] {
            Some(king) => !is_square_attacked_on(&board, king, us.opposite()),
            None => true,
        };
        if king_safe {
            return Some(ep);
        }
    }

    None
}
