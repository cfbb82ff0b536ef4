//! Canonical chess-rule constants.
//!
//! Starting FEN, original king/rook squares used for castling bookkeeping,
//! and the rank indices pawns start on and promote at.

use crate::game_state::chess_types::{square_at, CastleSide, Color, Square};

/// Standard chess starting position in Forsyth-Edwards Notation (FEN).
pub const STARTING_POSITION_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

pub const A1: Square = square_at(0, 0);
pub const E1: Square = square_at(4, 0);
pub const H1: Square = square_at(7, 0);
pub const A8: Square = square_at(0, 7);
pub const E8: Square = square_at(4, 7);
pub const H8: Square = square_at(7, 7);

/// Original king square per color.
#[inline]
pub const fn king_home(color: Color) -> Square {
    match color {
        Color::White => E1,
        Color::Black => E8,
    }
}

/// Original rook square for one castling side.
#[inline]
pub const fn rook_home(color: Color, side: CastleSide) -> Square {
    match (color, side) {
        (Color::White, CastleSide::Kingside) => H1,
        (Color::White, CastleSide::Queenside) => A1,
        (Color::Black, CastleSide::Kingside) => H8,
        (Color::Black, CastleSide::Queenside) => A8,
    }
}

/// Rank a pawn of `color` double-pushes from.
#[inline]
pub const fn pawn_start_rank(color: Color) -> u8 {
    match color {
        Color::White => 1,
        Color::Black => 6,
    }
}

/// Rank a pawn of `color` promotes on.
#[inline]
pub const fn promotion_rank(color: Color) -> u8 {
    match color {
        Color::White => 7,
        Color::Black => 0,
    }
}

/// Direction of pawn travel for `color` in 0x88 steps.
#[inline]
pub const fn pawn_push(color: Color) -> i16 {
    match color {
        Color::White => 16,
        Color::Black => -16,
    }
}

/// Half-move clock value at which the fifty-move rule applies.
pub const FIFTY_MOVE_HALFMOVES: u32 = 100;
