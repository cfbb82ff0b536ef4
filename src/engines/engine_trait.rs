//! Engine abstraction layer.
//!
//! Defines the search request and result payloads shared by the built-in bot
//! and by adapters that substitute an external engine. External engines talk
//! UCI-style text, so `SearchOutcome` can be rendered to and parsed from the
//! `info ...` / `bestmove ...` lines.

use std::time::Duration;

use crate::chess_errors::{ChessError, ChessResult};
use crate::game_state::chess_types::GameState;
use crate::moves::move_descriptions::Move;
use crate::utils::long_algebraic::long_algebraic_to_move;

#[derive(Debug, Clone, Default)]
pub struct SearchOptions {
    pub depth: Option<u8>,
    pub move_time: Option<Duration>,
    /// Ignore the engine's default time budget and search to depth only.
    pub infinite: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchOutcome {
    pub best_move: Option<Move>,
    /// Centipawns, or signed moves-to-mate when `is_mate` is set.
    pub score: i32,
    pub is_mate: bool,
    pub depth: u8,
    pub nodes: u64,
    pub pv: Vec<Move>,
}

impl SearchOutcome {
    pub fn to_info_line(&self) -> String {
        let score = if self.is_mate {
            format!("mate {}", self.score)
        } else {
            format!("cp {}", self.score)
        };
        let mut line = format!("info depth {} score {} nodes {}", self.depth, score, self.nodes);
        if !self.pv.is_empty() {
            line.push_str(" pv");
            for mv in &self.pv {
                line.push(' ');
                line.push_str(&mv.to_lan());
            }
        }
        line
    }

    pub fn to_bestmove_line(&self) -> String {
        match self.best_move {
            Some(mv) => format!("bestmove {}", mv.to_lan()),
            None => "bestmove (none)".to_owned(),
        }
    }
}

pub trait Engine {
    fn name(&self) -> &str;

    fn new_game(&mut self) {}

    fn set_option(&mut self, name: &str, _value: &str) -> ChessResult<()> {
        Err(ChessError::InvalidEngineText(format!("unknown option '{name}'")))
    }

    fn search(&mut self, game_state: &GameState, options: &SearchOptions) -> ChessResult<SearchOutcome>;
}

#[derive(Debug, Default)]
struct InfoFields {
    depth: Option<u8>,
    score: Option<(i32, bool)>,
    nodes: Option<u64>,
    pv: Vec<String>,
}

/// Parse UCI-style engine output against `game_state`.
///
/// The last `info` line carrying a score supplies score/depth/nodes/pv and the
/// `bestmove` line supplies the move. Every move is checked for legality by
/// replaying it on a copy of the position.
pub fn parse_engine_output(game_state: &GameState, text: &str) -> ChessResult<SearchOutcome> {
    let mut info: Option<InfoFields> = None;
    let mut bestmove: Option<Option<String>> = None;

    for line in text.lines() {
        let mut tokens = line.split_whitespace();
        match tokens.next() {
            Some("info") => {
                let fields = parse_info_tokens(tokens.collect())?;
                if fields.score.is_some() {
                    info = Some(fields);
                }
            }
            Some("bestmove") => {
                let token = tokens.next().ok_or_else(|| {
                    ChessError::InvalidEngineText(format!("bestmove without a move: '{line}'"))
                })?;
                bestmove = Some(match token {
                    "(none)" | "0000" => None,
                    other => Some(other.to_owned()),
                });
            }
            _ => {}
        }
    }

    if info.is_none() && bestmove.is_none() {
        return Err(ChessError::InvalidEngineText(
            "no info or bestmove line found".to_owned(),
        ));
    }

    let info = info.unwrap_or_default();
    let pv = replay_moves(game_state, &info.pv)?;

    let best_move = match bestmove {
        Some(Some(text)) => replay_moves(game_state, std::slice::from_ref(&text))?.first().copied(),
        Some(None) => None,
        None => pv.first().copied(),
    };

    let (score, is_mate) = info.score.unwrap_or((0, false));
    Ok(SearchOutcome {
        best_move,
        score,
        is_mate,
        depth: info.depth.unwrap_or(0),
        nodes: info.nodes.unwrap_or(0),
        pv,
    })
}

fn parse_info_tokens(tokens: Vec<&str>) -> ChessResult<InfoFields> {
    let mut fields = InfoFields::default();
    let mut i = 0;

    while i < tokens.len() {
        match tokens[i] {
            "depth" => {
                fields.depth = Some(parse_number("depth", tokens.get(i + 1))?);
                i += 2;
            }
            "nodes" => {
                fields.nodes = Some(parse_number("nodes", tokens.get(i + 1))?);
                i += 2;
            }
            "score" => {
                let is_mate = match tokens.get(i + 1) {
                    Some(&"cp") => false,
                    Some(&"mate") => true,
                    other => {
                        return Err(ChessError::InvalidEngineText(format!(
                            "expected 'cp' or 'mate' after score, found {other:?}"
                        )))
                    }
                };
                let value: i32 = parse_number("score", tokens.get(i + 2))?;
                fields.score = Some((value, is_mate));
                i += 3;
            }
            "pv" => {
                fields.pv = tokens[i + 1..].iter().map(|t| (*t).to_owned()).collect();
                break;
            }
            _ => i += 1,
        }
    }

    Ok(fields)
}

fn parse_number<T: std::str::FromStr>(label: &str, token: Option<&&str>) -> ChessResult<T> {
    token
        .and_then(|t| t.parse::<T>().ok())
        .ok_or_else(|| ChessError::InvalidEngineText(format!("bad {label} value {token:?}")))
}

fn replay_moves(game_state: &GameState, texts: &[String]) -> ChessResult<Vec<Move>> {
    let mut scratch = game_state.clone();
    let mut moves = Vec::with_capacity(texts.len());
    for text in texts {
        let mv = long_algebraic_to_move(&mut scratch, text)
            .map_err(|e| ChessError::InvalidEngineText(format!("'{text}': {e}")))?;
        scratch.make_move(mv);
        moves.push(mv);
    }
    Ok(moves)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_uci_style_lines() {
        let mut game = GameState::new_game();
        let e4 = long_algebraic_to_move(&mut game, "e2e4").expect("e2e4 is legal");
        let outcome = SearchOutcome {
            best_move: Some(e4),
            score: 35,
            is_mate: false,
            depth: 3,
            nodes: 1200,
            pv: vec![e4],
        };
        assert_eq!(outcome.to_info_line(), "info depth 3 score cp 35 nodes 1200 pv e2e4");
        assert_eq!(outcome.to_bestmove_line(), "bestmove e2e4");

        let none = SearchOutcome::default();
        assert_eq!(none.to_bestmove_line(), "bestmove (none)");
        assert_eq!(none.to_info_line(), "info depth 0 score cp 0 nodes 0");
    }

    #[test]
    fn parses_external_engine_text() {
        let game = GameState::new_game();
        let text = "info string hello\n\
                    info depth 1 score cp 10 nodes 20 pv d2d4\n\
                    info depth 2 seldepth 4 score cp 25 nodes 400 nps 1000 pv e2e4 e7e5\n\
                    bestmove e2e4 ponder e7e5\n";
        let outcome = parse_engine_output(&game, text).expect("text should parse");
        assert_eq!(outcome.depth, 2);
        assert_eq!(outcome.score, 25);
        assert!(!outcome.is_mate);
        assert_eq!(outcome.nodes, 400);
        assert_eq!(outcome.best_move.map(|m| m.to_lan()), Some("e2e4".to_owned()));
        let pv: Vec<String> = outcome.pv.iter().map(Move::to_lan).collect();
        assert_eq!(pv, vec!["e2e4", "e7e5"]);
        assert_eq!(game.get_fen(), GameState::new_game().get_fen());
    }

    #[test]
    fn parses_mate_scores_and_missing_bestmove() {
        let game = GameState::from_fen("6k1/5ppp/8/8/8/8/8/Q3K3 w - - 0 1").expect("FEN should parse");
        let outcome = parse_engine_output(&game, "info depth 1 score mate 1 nodes 7 pv a1a8")
            .expect("text should parse");
        assert!(outcome.is_mate);
        assert_eq!(outcome.score, 1);
        assert_eq!(outcome.best_move.map(|m| m.to_lan()), Some("a1a8".to_owned()));
    }

    #[test]
    fn rejects_illegal_or_garbled_text() {
        let game = GameState::new_game();
        for text in [
            "",
            "readyok",
            "bestmove e2e5",
            "bestmove",
            "info depth 2 score cp 10 pv e2e4 e2e4",
            "info depth x score cp 10",
            "info score lots 3",
        ] {
            assert!(
                matches!(parse_engine_output(&game, text), Err(ChessError::InvalidEngineText(_))),
                "{text:?} should be rejected"
            );
        }
    }

    #[test]
    fn bestmove_none_means_no_move() {
        let game = GameState::from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").expect("FEN should parse");
        let outcome = parse_engine_output(&game, "info depth 0 score cp 0\nbestmove (none)")
            .expect("text should parse");
        assert_eq!(outcome.best_move, None);
    }
}
