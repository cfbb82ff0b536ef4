//! FEN validation and parsing.
//!
//! Every field is checked before anything is returned, so callers can
//! commit the parsed position in one step or not at all.

use crate::chess_errors::{ChessError, ChessResult};
use crate::game_state::chess_types::*;
use crate::game_state::game_state::Board;
use crate::utils::algebraic::algebraic_to_square;

/// Fully validated FEN contents.
#[derive(Debug, Clone)]
pub struct ParsedFen {
    pub board: Board,
    pub side_to_move: Color,
    pub castling: [CastlingRights; 2],
    pub en_passant: Option<Square>,
    pub halfmove_clock: u32,
    pub fullmove_number: u32,
}

/// Validate `fen` without building a position.
pub fn validate_fen(fen: &str) -> ChessResult<()> {
    parse_fen(fen).map(|_| ())
}

pub fn parse_fen(fen: &str) -> ChessResult<ParsedFen> {
    let fields: Vec<&str> = fen.split_whitespace().collect();
    if fields.len() != 6 {
        return Err(ChessError::fen(
            "structure",
            format!("expected 6 space-separated fields, found {}", fields.len()),
        ));
    }

    let board = parse_board(fields[0])?;
    let side_to_move = parse_side_to_move(fields[1])?;
    let castling = parse_castling_rights(fields[2])?;
    let en_passant = parse_en_passant_square(fields[3], side_to_move)?;
    let halfmove_clock = parse_counter("halfmove clock", fields[4])?;
    let fullmove_number = parse_counter("fullmove number", fields[5])?;

    validate_kings(&board)?;
    validate_pawn_ranks(&board)?;

    Ok(ParsedFen {
        board,
        side_to_move,
        castling,
        en_passant,
        halfmove_clock,
        fullmove_number,
    })
}

fn parse_board(board_part: &str) -> ChessResult<Board> {
    let ranks: Vec<&str> = board_part.split('/').collect();
    if ranks.len() != 8 {
        return Err(ChessError::fen(
            "placement",
            format!("expected 8 ranks separated by '/', found {}", ranks.len()),
        ));
    }

    let mut board: Board = [None; 128];

    for (fen_rank_idx, rank_str) in ranks.iter().enumerate() {
        let rank = 7 - fen_rank_idx as u8;
        let mut file = 0u8;
        let mut previous_was_digit = false;

        for ch in rank_str.chars() {
            if let Some(empty_count) = ch.to_digit(10) {
                if !(1..=8).contains(&empty_count) {
                    return Err(ChessError::fen(
                        "placement",
                        format!("invalid empty-square count '{ch}' on rank {}", rank + 1),
                    ));
                }
                if previous_was_digit {
                    return Err(ChessError::fen(
                        "placement",
                        format!("consecutive digits on rank {}", rank + 1),
                    ));
                }
                file += empty_count as u8;
                previous_was_digit = true;
            } else {
                let piece = Piece::from_fen_char(ch).ok_or_else(|| {
                    ChessError::fen("placement", format!("invalid piece character '{ch}'"))
                })?;
                if file < 8 {
                    board[square_at(file, rank) as usize] = Some(piece);
                }
                file += 1;
                previous_was_digit = false;
            }

            if file > 8 {
                return Err(ChessError::fen(
                    "placement",
                    format!("rank {} has more than 8 files", rank + 1),
                ));
            }
        }

        if file != 8 {
            return Err(ChessError::fen(
                "placement",
                format!("rank {} does not sum to 8 files", rank + 1),
            ));
        }
    }

    Ok(board)
}

fn parse_side_to_move(side_part: &str) -> ChessResult<Color> {
    match side_part {
        "w" => Ok(Color::White),
        "b" => Ok(Color::Black),
        _ => Err(ChessError::fen(
            "side to move",
            format!("expected 'w' or 'b', found '{side_part}'"),
        )),
    }
}

fn parse_castling_rights(castling_part: &str) -> ChessResult<[CastlingRights; 2]> {
    let mut rights = [0 as CastlingRights; 2];
    if castling_part == "-" {
        return Ok(rights);
    }

    for ch in castling_part.chars() {
        match ch {
            'K' => rights[Color::White.index()] |= CASTLE_KINGSIDE,
            'Q' => rights[Color::White.index()] |= CASTLE_QUEENSIDE,
            'k' => rights[Color::Black.index()] |= CASTLE_KINGSIDE,
            'q' => rights[Color::Black.index()] |= CASTLE_QUEENSIDE,
            _ => {
                return Err(ChessError::fen(
                    "castling",
                    format!("unexpected character '{ch}' in '{castling_part}'"),
                ))
            }
        }
    }

    Ok(rights)
}

fn parse_en_passant_square(en_passant_part: &str, side_to_move: Color) -> ChessResult<Option<Square>> {
    if en_passant_part == "-" {
        return Ok(None);
    }

    let square = algebraic_to_square(en_passant_part).map_err(|_| {
        ChessError::fen("en passant", format!("invalid square '{en_passant_part}'"))
    })?;

    let expected_rank = match side_to_move {
        Color::White => 5,
        Color::Black => 2,
    };
    if rank_of(square) != expected_rank {
        return Err(ChessError::fen(
            "en passant",
            format!("'{en_passant_part}' is not on the rank behind a pawn that just advanced"),
        ));
    }

    Ok(Some(square))
}

fn parse_counter(field: &'static str, value: &str) -> ChessResult<u32> {
    // `u32::from_str` also takes a leading '+', which would not survive a round trip.
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ChessError::fen(field, format!("expected a non-negative integer, found '{value}'")));
    }
    value
        .parse::<u32>()
        .map_err(|_| ChessError::fen(field, format!("expected a non-negative integer, found '{value}'")))
}

fn validate_kings(board: &Board) -> ChessResult<()> {
    for color in [Color::White, Color::Black] {
        let king = Piece::new(color, PieceKind::King);
        let count = all_squares()
            .filter(|sq| board[*sq as usize] == Some(king))
            .count();
        match count {
            1 => {}
            0 => return Err(ChessError::fen("kings", format!("missing {color} king"))),
            n => return Err(ChessError::fen("kings", format!("{n} {color} kings"))),
        }
    }
    Ok(())
}

fn validate_pawn_ranks(board: &Board) -> ChessResult<()> {
    let on_edge = all_squares().any(|sq| {
        matches!(rank_of(sq), 0 | 7)
            && board[sq as usize].is_some_and(|p| p.kind == PieceKind::Pawn)
    });
    if on_edge {
        return Err(ChessError::fen(
            "placement",
            "pawns may not stand on the first or eighth rank",
        ));
    }
    Ok(())
}
