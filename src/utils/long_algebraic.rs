//! Coordinate (long algebraic / UCI) move strings such as `e2e4` and `e7e8q`.

use crate::chess_errors::{ChessError, ChessResult};
use crate::game_state::chess_rules::promotion_rank;
use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_generator::generate_legal_moves;
use crate::move_generation::move_generator::MoveFilter;
use crate::moves::move_descriptions::Move;
use crate::utils::algebraic::{algebraic_to_square, square_to_algebraic};

/// Origin, destination and optional promotion piece, not yet checked for legality.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoordinateMove {
    pub from: Square,
    pub to: Square,
    pub promotion: Option<PieceKind>,
}

/// Cheap shape test: two squares and an optional promotion letter.
pub fn is_long_algebraic(text: &str) -> bool {
    let bytes = text.as_bytes();
    let is_square = |i: usize| {
        (b'a'..=b'h').contains(&bytes[i]) && (b'1'..=b'8').contains(&bytes[i + 1])
    };
    match bytes.len() {
        4 => is_square(0) && is_square(2),
        5 => is_square(0) && is_square(2) && b"nbrqNBRQ".contains(&bytes[4]),
        _ => false,
    }
}

pub fn parse_long_algebraic(text: &str) -> ChessResult<CoordinateMove> {
    if !text.is_ascii() || (text.len() != 4 && text.len() != 5) {
        return Err(ChessError::IllegalMove(text.to_owned()));
    }

    let from = algebraic_to_square(&text[0..2])?;
    let to = algebraic_to_square(&text[2..4])?;
    let promotion = match text[4..].chars().next() {
        Some(ch) => Some(char_to_promotion(ch)?),
        None => None,
    };

    Ok(CoordinateMove {
        from,
        to,
        promotion,
    })
}

fn char_to_promotion(ch: char) -> ChessResult<PieceKind> {
    match PieceKind::from_char(ch) {
        Some(kind) if PieceKind::PROMOTIONS.contains(&kind) => Ok(kind),
        _ => Err(ChessError::InvalidPromotion(format!(
            "invalid promotion piece character: {ch}"
        ))),
    }
}

/// Match a coordinate request against the legal moves of its origin square.
pub fn resolve_coordinate_move(game_state: &mut GameState, request: CoordinateMove) -> ChessResult<Move> {
    let label = || {
        let mut s = square_to_algebraic(request.from);
        s.push_str(&square_to_algebraic(request.to));
        if let Some(promo) = request.promotion {
            s.push(promo.to_char());
        }
        s
    };

    let Some(piece) = game_state.piece_at(request.from) else {
        return Err(ChessError::IllegalMove(label()));
    };
    if piece.kind != PieceKind::Pawn && request.promotion.is_some() {
        return Err(ChessError::InvalidPromotion(format!(
            "{}: only pawns promote",
            label()
        )));
    }
    if piece.kind == PieceKind::Pawn
        && request.promotion.is_none()
        && rank_of(request.to) == promotion_rank(piece.color)
    {
        return Err(ChessError::InvalidPromotion(format!(
            "{}: promotion piece required",
            label()
        )));
    }

    generate_legal_moves(game_state, MoveFilter::from_square(request.from))
        .into_iter()
        .find(|mv| mv.to == request.to && mv.promotion == request.promotion)
        .ok_or_else(|| ChessError::IllegalMove(label()))
}

pub fn long_algebraic_to_move(game_state: &mut GameState, text: &str) -> ChessResult<Move> {
    resolve_coordinate_move(game_state, parse_long_algebraic(text)?)
}
