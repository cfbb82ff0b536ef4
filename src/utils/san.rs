//! Standard Algebraic Notation.
//!
//! Generation adds the shortest disambiguator among same-type pieces that
//! can legally reach the destination (file, then rank, then both) and a
//! `+`/`#` suffix found by playing the move. Parsing turns a token into a
//! `SanToken` and matches it against the legal moves of that piece type.

use crate::chess_errors::{ChessError, ChessResult};
use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_checks::is_king_in_check;
use crate::move_generation::legal_move_generator::{generate_legal_moves, has_legal_move};
use crate::move_generation::move_generator::MoveFilter;
use crate::moves::move_descriptions::{Move, FLAG_KSIDE_CASTLE, FLAG_QSIDE_CASTLE};
use crate::utils::algebraic::{algebraic_to_square, file_char, rank_char, square_to_algebraic};

/// A parsed, not yet resolved, SAN move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SanToken {
    pub piece: PieceKind,
    pub from_file: Option<u8>,
    pub from_rank: Option<u8>,
    pub capture: bool,
    pub to: Square,
    pub promotion: Option<PieceKind>,
}

/// Render `mv`, which must be legal in `game_state`.
pub fn move_to_san(game_state: &mut GameState, mv: &Move) -> String {
    let mut out = if mv.has_flag(FLAG_KSIDE_CASTLE) {
        "O-O".to_owned()
    } else if mv.has_flag(FLAG_QSIDE_CASTLE) {
        "O-O-O".to_owned()
    } else {
        let mut s = String::new();

        if mv.piece == PieceKind::Pawn {
            if mv.is_capture() {
                s.push(file_char(mv.from));
            }
        } else {
            s.push(mv.piece.to_char().to_ascii_uppercase());
            s.push_str(&disambiguator(game_state, mv));
        }

        if mv.is_capture() {
            s.push('x');
        }
        s.push_str(&square_to_algebraic(mv.to));

        if let Some(promo) = mv.promotion {
            s.push('=');
            s.push(promo.to_char().to_ascii_uppercase());
        }
        s
    };

    game_state.make_move(*mv);
    if is_king_in_check(game_state, game_state.side_to_move) {
        out.push(if has_legal_move(game_state) { '+' } else { '#' });
    }
    game_state.unmake_move();

    out
}

fn disambiguator(game_state: &mut GameState, mv: &Move) -> String {
    let rivals: Vec<Square> = generate_legal_moves(game_state, MoveFilter::piece(mv.piece))
        .into_iter()
        .filter(|other| other.to == mv.to && other.from != mv.from)
        .map(|other| other.from)
        .collect();

    if rivals.is_empty() {
        return String::new();
    }

    let same_file = rivals.iter().any(|sq| file_of(*sq) == file_of(mv.from));
    let same_rank = rivals.iter().any(|sq| rank_of(*sq) == rank_of(mv.from));

    if !same_file {
        file_char(mv.from).to_string()
    } else if !same_rank {
        rank_char(mv.from).to_string()
    } else {
        square_to_algebraic(mv.from)
    }
}

/// Drop check, mate and annotation marks from the end of a move token.
pub fn strip_san_decorations(text: &str) -> &str {
    let text = text.trim();
    let text = text.strip_suffix("e.p.").unwrap_or(text).trim_end();
    text.trim_end_matches(['+', '#', '!', '?'])
}

/// Parse a non-castling SAN token.
pub fn parse_san_token(text: &str) -> ChessResult<SanToken> {
    let invalid = || ChessError::InvalidSan(text.to_owned());
    let body = strip_san_decorations(text);
    if !body.is_ascii() || body.len() < 2 {
        return Err(invalid());
    }

    let (body, promotion) = split_promotion(body).ok_or_else(invalid)?;
    if body.len() < 2 {
        return Err(invalid());
    }

    let (prefix, dest) = body.split_at(body.len() - 2);
    let to = algebraic_to_square(dest).map_err(|_| invalid())?;

    let mut chars = prefix.chars().peekable();
    let piece = match chars.peek() {
        Some(ch) if "NBRQK".contains(*ch) => {
            let kind = PieceKind::from_char(*ch).ok_or_else(invalid)?;
            chars.next();
            kind
        }
        _ => PieceKind::Pawn,
    };

    let mut from_file = None;
    let mut from_rank = None;
    let mut capture = false;
    for ch in chars {
        match ch {
            'a'..='h' if !capture && from_file.is_none() && from_rank.is_none() => {
                from_file = Some(ch as u8 - b'a');
            }
            '1'..='8' if !capture && from_rank.is_none() => {
                from_rank = Some(ch as u8 - b'1');
            }
            'x' | ':' if !capture => capture = true,
            _ => return Err(invalid()),
        }
    }

    if promotion.is_some() && piece != PieceKind::Pawn {
        return Err(ChessError::InvalidPromotion(text.to_owned()));
    }

    Ok(SanToken {
        piece,
        from_file,
        from_rank,
        capture,
        to,
        promotion,
    })
}

/// Split `e8=Q` / `e8Q` / `e8q`-style promotion suffixes off the body.
fn split_promotion(body: &str) -> Option<(&str, Option<PieceKind>)> {
    let last = body.chars().last()?;
    if !last.is_ascii_alphabetic() {
        return Some((body, None));
    }

    let kind = PieceKind::from_char(last)?;
    if !PieceKind::PROMOTIONS.contains(&kind) {
        return None;
    }
    let rest = &body[..body.len() - 1];
    let rest = rest.strip_suffix('=').unwrap_or(rest);
    Some((rest, Some(kind)))
}

/// Resolve a parsed token against the legal moves of its piece type.
pub fn resolve_san_token(game_state: &mut GameState, token: &SanToken, text: &str) -> ChessResult<Move> {
    let matches: Vec<Move> = generate_legal_moves(game_state, MoveFilter::piece(token.piece))
        .into_iter()
        .filter(|mv| {
            mv.to == token.to
                && mv.promotion == token.promotion
                && token.from_file.map_or(true, |f| file_of(mv.from) == f)
                && token.from_rank.map_or(true, |r| rank_of(mv.from) == r)
                && (!token.capture || mv.is_capture())
        })
        .collect();

    match matches.as_slice() {
        [single] => Ok(*single),
        [] => Err(ChessError::InvalidSan(text.to_owned())),
        _ => Err(ChessError::AmbiguousSan(text.to_owned())),
    }
}

/// Castling move for `side`, if legal.
pub fn castling_move(game_state: &mut GameState, side: CastleSide) -> Option<Move> {
    let flag = match side {
        CastleSide::Kingside => FLAG_KSIDE_CASTLE,
        CastleSide::Queenside => FLAG_QSIDE_CASTLE,
    };
    generate_legal_moves(game_state, MoveFilter::piece(PieceKind::King))
        .into_iter()
        .find(|mv| mv.has_flag(flag))
}

/// Parse any SAN string, castling included, into a legal move.
pub fn san_to_move(game_state: &mut GameState, text: &str) -> ChessResult<Move> {
    match strip_san_decorations(text) {
        "O-O" | "0-0" => castling_move(game_state, CastleSide::Kingside)
            .ok_or_else(|| ChessError::InvalidSan(text.to_owned())),
        "O-O-O" | "0-0-0" => castling_move(game_state, CastleSide::Queenside)
            .ok_or_else(|| ChessError::InvalidSan(text.to_owned())),
        _ => {
            let token = parse_san_token(text)?;
            resolve_san_token(game_state, &token, text)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game(fen: &str) -> GameState {
        GameState::from_fen(fen).expect("FEN should parse")
    }

    #[test]
    fn every_legal_move_round_trips_through_san() {
        let fens = [
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
            "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1",
            "N3k2N/8/8/3N4/N4N1N/2R5/1R6/4K3 w - - 0 1",
        ];
        for fen in fens {
            let mut g = game(fen);
            for mv in g.moves() {
                let san = move_to_san(&mut g, &mv);
                let parsed = san_to_move(&mut g, &san).expect("generated SAN should parse");
                assert_eq!(parsed, mv, "{san}");
                assert_eq!(move_to_san(&mut g, &parsed), san);
            }
        }
    }

    #[test]
    fn disambiguates_by_file_then_rank_then_square() {
        let mut g = game("N3k2N/8/8/3N4/N4N1N/2R5/1R6/4K3 w - - 0 1");
        let sans = g.moves_san();
        for expected in [
            // a8, a4 and d5 all reach b6.
            "N8b6", "N4b6", "Ndb6",
            // h8, h4 and f4 all reach g6.
            "N8g6", "Nh4g6", "Nfg6",
            // Rooks on b2 and c3 share neither file nor rank.
            "Rbb3", "Rcb3", "Rbc2", "Rcc2",
        ] {
            assert!(sans.contains(&expected.to_owned()), "missing {expected} in {sans:?}");
        }
        assert!(sans.contains(&"Nac7+".to_owned()));
        assert!(sans.contains(&"Ndc7+".to_owned()));
    }

    #[test]
    fn suffixes_mark_check_and_mate() {
        let mut g = game("6k1/5ppp/8/8/8/8/8/R3K3 w - - 0 1");
        let mate = san_to_move(&mut g, "Ra8").expect("Ra8 should be legal");
        assert_eq!(move_to_san(&mut g, &mate), "Ra8#");

        let mut g = game("4k3/8/8/8/8/8/8/R3K3 w - - 0 1");
        let check = san_to_move(&mut g, "Ra8").expect("Ra8 should be legal");
        assert_eq!(move_to_san(&mut g, &check), "Ra8+");
    }

    #[test]
    fn parses_decorated_and_loose_tokens() {
        let mut g = GameState::new_game();
        assert!(san_to_move(&mut g, "e4!?").is_ok());
        assert!(san_to_move(&mut g, "Nf3+").is_ok());

        let mut g = game("7k/4P3/8/8/8/8/8/4K3 w - - 0 1");
        let a = san_to_move(&mut g, "e8=Q+").expect("promotion should parse");
        let b = san_to_move(&mut g, "e8Q").expect("promotion without '=' should parse");
        assert_eq!(a, b);
        assert_eq!(a.promotion, Some(PieceKind::Queen));
    }

    #[test]
    fn rejects_ambiguous_and_unmatched_tokens() {
        let mut g = game("4k3/8/8/8/8/8/4K3/R6R w - - 0 1");
        assert_eq!(
            san_to_move(&mut g, "Rf1"),
            Err(ChessError::AmbiguousSan("Rf1".to_owned()))
        );
        assert!(san_to_move(&mut g, "Rhf1").is_ok());
        assert_eq!(
            san_to_move(&mut g, "Nf3"),
            Err(ChessError::InvalidSan("Nf3".to_owned()))
        );
        assert!(matches!(san_to_move(&mut g, "Zz9"), Err(ChessError::InvalidSan(_))));
        assert!(matches!(san_to_move(&mut g, "O-O"), Err(ChessError::InvalidSan(_))));
    }

    #[test]
    fn token_fields_are_extracted() {
        let token = parse_san_token("Nbxd7").expect("token should parse");
        assert_eq!(token.piece, PieceKind::Knight);
        assert_eq!(token.from_file, Some(1));
        assert_eq!(token.from_rank, None);
        assert!(token.capture);
        assert_eq!(square_to_algebraic(token.to), "d7");

        let token = parse_san_token("exd8=N#").expect("token should parse");
        assert_eq!(token.piece, PieceKind::Pawn);
        assert_eq!(token.from_file, Some(4));
        assert_eq!(token.promotion, Some(PieceKind::Knight));

        assert!(matches!(parse_san_token("Ne8=Q"), Err(ChessError::InvalidPromotion(_))));
    }
}
