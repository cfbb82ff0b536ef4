use crate::game_state::chess_types::*;
use crate::moves::move_descriptions::Move;

/// Single undo record for `make_move` / `unmake_move`.
///
/// Snapshots every field a move can change besides piece placement; the
/// placement itself is restored from the move's own from/to/captured data,
/// except for the pawn removed by en passant.
#[derive(Debug, Clone)]
pub struct UndoState {
    pub mv: Move,
    pub prev_side_to_move: Color,
    pub prev_castling: [CastlingRights; 2],
    pub prev_en_passant: Option<Square>,
    pub prev_halfmove_clock: u32,
    pub prev_fullmove_number: u32,
    pub prev_kings: [Option<Square>; 2],
    /// Whatever stood behind the destination of an en-passant capture.
    pub en_passant_victim: Option<Piece>,
}
