//! Move-string classification.
//!
//! A move string is one of three shapes: a castling token, a coordinate
//! move (`e2e4`, `e7e8q`) or a SAN move. `classify_move_input` decides which
//! before any legality work happens, and `GameState::play` routes each
//! shape to its resolver.

use crate::chess_errors::{ChessError, ChessResult};
use crate::game_state::chess_types::*;
use crate::moves::move_descriptions::MoveRecord;
use crate::utils::algebraic::algebraic_to_square;
use crate::utils::long_algebraic::{
    is_long_algebraic, parse_long_algebraic, resolve_coordinate_move, CoordinateMove,
};
use crate::utils::san::{castling_move, parse_san_token, resolve_san_token, strip_san_decorations, SanToken};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveInput {
    Castle(CastleSide),
    Coordinate(CoordinateMove),
    San(SanToken),
}

pub fn classify_move_input(text: &str) -> ChessResult<MoveInput> {
    let bare = strip_san_decorations(text);
    match bare {
        "O-O" | "0-0" => return Ok(MoveInput::Castle(CastleSide::Kingside)),
        "O-O-O" | "0-0-0" => return Ok(MoveInput::Castle(CastleSide::Queenside)),
        _ => {}
    }

    if is_long_algebraic(bare) {
        return Ok(MoveInput::Coordinate(parse_long_algebraic(bare)?));
    }

    Ok(MoveInput::San(parse_san_token(text)?))
}

impl GameState {
    /// Play a move given as SAN, a castling token or a coordinate string.
    pub fn play(&mut self, text: &str) -> ChessResult<MoveRecord> {
        let mv = match classify_move_input(text)? {
            MoveInput::Castle(side) => castling_move(self, side)
                .ok_or_else(|| ChessError::InvalidSan(text.to_owned()))?,
            MoveInput::Coordinate(request) => resolve_coordinate_move(self, request)?,
            MoveInput::San(token) => resolve_san_token(self, &token, text)?,
        };
        Ok(self.commit_move(mv))
    }

    /// Play the move from `from` to `to`. `promotion` is required for a pawn
    /// reaching the last rank and rejected for every other piece.
    pub fn play_coordinates(
        &mut self,
        from: &str,
        to: &str,
        promotion: Option<PieceKind>,
    ) -> ChessResult<MoveRecord> {
        if let Some(kind) = promotion {
            if !PieceKind::PROMOTIONS.contains(&kind) {
                return Err(ChessError::InvalidPromotion(format!(
                    "cannot promote to {kind:?}"
                )));
            }
        }

        let request = CoordinateMove {
            from: algebraic_to_square(from)?,
            to: algebraic_to_square(to)?,
            promotion,
        };
        let mv = resolve_coordinate_move(self, request)?;
        Ok(self.commit_move(mv))
    }
}
