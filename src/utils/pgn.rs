//! PGN read/write utilities for game history interchange.
//!
//! Serializes the played moves, headers and comments of a `GameState` to
//! PGN text and parses PGN back into a fully replayed `GameState`.

use chrono::Local;
use log::debug;

use crate::chess_errors::{ChessError, ChessResult};
use crate::game_state::chess_types::*;
use crate::utils::san::san_to_move;

/// Seven-tag roster, in the order it is written.
const SEVEN_TAG_ROSTER: [&str; 7] = ["Event", "Site", "Date", "Round", "White", "Black", "Result"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PgnOptions {
    /// Wrap movetext lines at this many characters; 0 disables wrapping.
    pub max_width: usize,
    pub newline: String,
}

impl Default for PgnOptions {
    fn default() -> Self {
        Self {
            max_width: 0,
            newline: "\n".to_owned(),
        }
    }
}

pub fn write_pgn(game_state: &GameState, options: &PgnOptions) -> String {
    let nl = options.newline.as_str();
    let mut out = String::new();

    for (key, value) in header_block(game_state) {
        out.push_str(&format!("[{} \"{}\"]{}", key, escape_pgn_value(&value), nl));
    }
    out.push_str(nl);

    let history = game_state.history();
    let comment_for = |fen: &str| game_state.comments.get(fen).map(|c| format!("{{{c}}}"));

    let mut words = Vec::<String>::with_capacity(history.len() * 2 + 2);
    if let Some(first) = history.first() {
        if let Some(comment) = comment_for(&first.before) {
            words.push(comment);
        }
    } else if let Some(comment) = comment_for(&game_state.get_fen()) {
        words.push(comment);
    }

    for (idx, record) in history.iter().enumerate() {
        let move_number = fen_fullmove(&record.before);
        match record.mv.color {
            Color::White => words.push(format!("{move_number}.")),
            Color::Black if idx == 0 => words.push(format!("{move_number}...")),
            Color::Black => {}
        }
        words.push(record.san.clone());
        if let Some(comment) = comment_for(&record.after) {
            words.push(comment);
        }
    }

    words.push(normalize_result(game_state.header("Result").unwrap_or("*")).to_owned());

    out.push_str(&wrap_words(&words, options.max_width, nl));
    debug!("wrote PGN with {} moves", history.len());
    out
}

/// Roster tags first (filled with defaults when unset), then every other
/// header in insertion order.
fn header_block(game_state: &GameState) -> Vec<(String, String)> {
    let mut block = Vec::with_capacity(game_state.headers.len() + SEVEN_TAG_ROSTER.len());
    for key in SEVEN_TAG_ROSTER {
        let value = match game_state.header(key) {
            Some(value) => value.to_owned(),
            None => default_roster_value(key),
        };
        block.push((key.to_owned(), value));
    }
    for (key, value) in &game_state.headers {
        if !SEVEN_TAG_ROSTER.contains(&key.as_str()) {
            block.push((key.clone(), value.clone()));
        }
    }
    block
}

fn default_roster_value(key: &str) -> String {
    match key {
        "Date" => Local::now().format("%Y.%m.%d").to_string(),
        "Result" => "*".to_owned(),
        _ => "?".to_owned(),
    }
}

fn fen_fullmove(fen: &str) -> &str {
    fen.rsplit(' ').next().unwrap_or("1")
}

fn wrap_words(words: &[String], max_width: usize, nl: &str) -> String {
    let mut out = String::new();
    let mut line_len = 0usize;

    for word in words.iter().flat_map(|w| w.split(' ')) {
        if line_len > 0 {
            if max_width > 0 && line_len + 1 + word.len() > max_width {
                out.push_str(nl);
                line_len = 0;
            } else {
                out.push(' ');
                line_len += 1;
            }
        }
        out.push_str(word);
        line_len += word.len();
    }

    out
}

/// Parse `pgn` and replay it from its start position. Nothing is returned
/// unless every header and every move is valid.
pub fn read_pgn(pgn: &str) -> ChessResult<GameState> {
    let mut headers = Vec::<(String, String)>::new();
    let mut movetext_lines = Vec::<&str>::new();

    for line in pgn.lines() {
        let trimmed = line.trim();
        if movetext_lines.is_empty() && trimmed.starts_with('[') {
            headers.push(parse_header_line(trimmed)?);
        } else if !trimmed.is_empty() {
            movetext_lines.push(line);
        }
    }

    let fen_header = headers.iter().find(|(k, _)| k == "FEN").map(|(_, v)| v.as_str());
    let mut game = match fen_header {
        Some(fen) => GameState::from_fen(fen).map_err(|err| ChessError::pgn(err.to_string()))?,
        None => GameState::new_game(),
    };
    for (key, value) in &headers {
        game.set_header(key, value);
    }

    let movetext = movetext_lines.join("\n");
    let mut movetext_result = None;

    for token in tokenize_movetext(&movetext)? {
        match token {
            MovetextToken::Comment(text) => {
                let fen = game.get_fen();
                let merged = match game.comments.get(&fen) {
                    Some(existing) => format!("{existing} {text}"),
                    None => text,
                };
                game.set_comment(&merged);
            }
            MovetextToken::Result(result) => {
                movetext_result = Some(result);
                break;
            }
            MovetextToken::Move(san) => {
                let mv = san_to_move(&mut game, &san)
                    .map_err(|err| ChessError::pgn(format!("move {san}: {err}")))?;
                game.commit_move(mv);
            }
        }
    }

    if let Some(result) = movetext_result {
        if game.header("Result").is_none() {
            game.set_header("Result", &result);
        }
    }

    debug!("read PGN with {} moves", game.history_len());
    Ok(game)
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum MovetextToken {
    Comment(String),
    Move(String),
    Result(String),
}

/// Split movetext into comments, SAN moves and the result token. Move
/// numbers, NAGs and variations are dropped.
fn tokenize_movetext(text: &str) -> ChessResult<Vec<MovetextToken>> {
    let mut tokens = Vec::new();
    let mut chars = text.chars().peekable();
    let mut variation_depth = 0usize;

    while let Some(ch) = chars.next() {
        match ch {
            '{' => {
                let mut comment = String::new();
                loop {
                    match chars.next() {
                        Some('}') => break,
                        Some(c) => comment.push(c),
                        None => return Err(ChessError::pgn("unterminated comment")),
                    }
                }
                if variation_depth == 0 {
                    let comment = comment.split_whitespace().collect::<Vec<_>>().join(" ");
                    tokens.push(MovetextToken::Comment(comment));
                }
            }
            ';' => {
                let comment: String = chars.by_ref().take_while(|c| *c != '\n').collect();
                if variation_depth == 0 {
                    tokens.push(MovetextToken::Comment(comment.trim().to_owned()));
                }
            }
            '(' => variation_depth += 1,
            ')' => {
                variation_depth = variation_depth
                    .checked_sub(1)
                    .ok_or_else(|| ChessError::pgn("unbalanced ')' in movetext"))?;
            }
            c if c.is_whitespace() => {}
            c => {
                let mut word = String::from(c);
                while let Some(&next) = chars.peek() {
                    if next.is_whitespace() || matches!(next, '{' | '}' | '(' | ')' | ';') {
                        break;
                    }
                    word.push(next);
                    chars.next();
                }
                if variation_depth > 0 {
                    continue;
                }
                if let Some(token) = classify_word(&word) {
                    tokens.push(token);
                }
            }
        }
    }

    if variation_depth != 0 {
        return Err(ChessError::pgn("unterminated variation"));
    }
    Ok(tokens)
}

fn classify_word(word: &str) -> Option<MovetextToken> {
    if is_result_token(word) {
        return Some(MovetextToken::Result(word.to_owned()));
    }
    if word.starts_with('$') || word.chars().all(|c| matches!(c, '!' | '?')) {
        return None;
    }

    // "12." / "12..." alone, or glued to the move as in "12.e4".
    let san = match word.find(|c: char| !c.is_ascii_digit()) {
        Some(idx) if idx > 0 && word[idx..].starts_with('.') => word[idx..].trim_start_matches('.'),
        _ => word,
    };
    if san.is_empty() || san == "e.p." {
        return None;
    }
    Some(MovetextToken::Move(san.to_owned()))
}

fn parse_header_line(line: &str) -> ChessResult<(String, String)> {
    let invalid = || ChessError::pgn(format!("invalid header line: {line}"));
    if !line.starts_with('[') || !line.ends_with(']') {
        return Err(invalid());
    }
    let inner = line[1..line.len() - 1].trim();
    let (key, value_raw) = inner.split_once(char::is_whitespace).ok_or_else(invalid)?;
    let value_raw = value_raw.trim();

    if !value_raw.starts_with('"') || !value_raw.ends_with('"') || value_raw.len() < 2 {
        return Err(invalid());
    }
    let value = value_raw[1..value_raw.len() - 1]
        .replace("\\\"", "\"")
        .replace("\\\\", "\\");
    Ok((key.to_owned(), value))
}

fn is_result_token(token: &str) -> bool {
    matches!(token, "1-0" | "0-1" | "1/2-1/2" | "*")
}

fn normalize_result(result: &str) -> &str {
    if is_result_token(result) {
        result
    } else {
        "*"
    }
}

fn escape_pgn_value(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

impl GameState {
    /// PGN text of the game with default options.
    pub fn pgn(&self) -> String {
        write_pgn(self, &PgnOptions::default())
    }

    pub fn pgn_with(&self, options: &PgnOptions) -> String {
        write_pgn(self, options)
    }

    /// Replace this game with the one described by `pgn`. On error the
    /// current game is left as it was.
    pub fn load_pgn(&mut self, pgn: &str) -> ChessResult<()> {
        *self = read_pgn(pgn)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::chess_rules::STARTING_POSITION_FEN;

    #[test]
    fn pgn_round_trip_start_position_history() {
        let mut game = GameState::new_game();
        game.set_header("White", "Ann");
        for san in ["e4", "e5", "Nf3", "Nc6"] {
            game.play(san).expect("move should be legal");
        }
        game.set_comment("main line");

        let pgn = game.pgn();
        assert!(pgn.starts_with("[Event \"?\"]\n[Site \"?\"]\n[Date \""));
        assert!(pgn.contains("[White \"Ann\"]"));
        assert!(pgn.ends_with("1. e4 e5 2. Nf3 Nc6 {main line} *"));

        let parsed = read_pgn(&pgn).expect("PGN should parse");
        assert_eq!(parsed.get_fen(), game.get_fen());
        assert_eq!(parsed.history_san(), game.history_san());
        assert_eq!(parsed.comment(), Some("main line"));
        assert_eq!(parsed.header("White"), Some("Ann"));
    }

    #[test]
    fn date_header_defaults_to_local_date() {
        let pgn = GameState::new_game().pgn();
        let date_line = pgn
            .lines()
            .find(|line| line.starts_with("[Date "))
            .expect("date header should be written");
        let date = &date_line[7..date_line.len() - 2];
        assert_eq!(date.len(), 10);
        assert_eq!(date.matches('.').count(), 2);
    }

    #[test]
    fn pgn_round_trip_custom_fen_setup() {
        let mut game = GameState::from_fen("4k3/8/8/8/8/8/4P3/4K3 b - - 0 1")
            .expect("FEN should parse");
        game.set_header("Result", "1-0");
        game.play("Kd7").expect("move should be legal");
        game.play("e4").expect("move should be legal");

        let pgn = game.pgn();
        assert!(pgn.contains("[SetUp \"1\"]"));
        assert!(pgn.contains("[FEN \"4k3/8/8/8/8/8/4P3/4K3 b - - 0 1\"]"));
        assert!(pgn.ends_with("1... Kd7 2. e4 1-0"));

        let parsed = read_pgn(&pgn).expect("PGN should parse");
        assert_eq!(parsed.initial_fen(), "4k3/8/8/8/8/8/4P3/4K3 b - - 0 1");
        assert_eq!(parsed.get_fen(), game.get_fen());
        assert_eq!(parsed.header("Result"), Some("1-0"));
    }

    #[test]
    fn reader_skips_variations_nags_and_glyphs() {
        let pgn = "[Event \"Casual\"]\n\n\
                   1. e4 $1 e5!? 2. Nf3 (2. f4 exf4 {gambit} 3. Nf3) 2... Nc6 ; rest of line\n\
                   3.Bb5 a6 {Ruy Lopez} 1/2-1/2";
        let game = read_pgn(pgn).expect("PGN should parse");
        assert_eq!(game.history_san(), vec!["e4", "e5", "Nf3", "Nc6", "Bb5", "a6"]);
        assert_eq!(game.header("Result"), Some("1/2-1/2"));
        assert_eq!(game.header("Event"), Some("Casual"));
        assert_eq!(game.comment(), Some("Ruy Lopez"));
    }

    #[test]
    fn illegal_move_fails_the_whole_load() {
        let mut game = GameState::new_game();
        game.play("d4").expect("move should be legal");
        let before = game.get_fen();

        let err = game
            .load_pgn("1. e4 e5 2. Ke3 *")
            .expect_err("Ke3 is not legal");
        assert!(matches!(err, ChessError::InvalidPgn { .. }));
        assert_eq!(game.get_fen(), before);
        assert_eq!(game.history_len(), 1);
    }

    #[test]
    fn malformed_movetext_and_headers_are_rejected() {
        for pgn in [
            "1. e4 {never closed e5 *",
            "1. e4 e5 ) 2. Nf3 *",
            "1. e4 (1. d4 d5 2. c4 *",
            "[Event Casual]\n\n1. e4 *",
            "[Event \"Casual\"\n\n1. e4 *",
            "[Event]\n\n1. e4 *",
        ] {
            assert!(
                matches!(read_pgn(pgn), Err(ChessError::InvalidPgn { .. })),
                "{pgn:?} should be rejected"
            );
        }
    }

    #[test]
    fn wraps_movetext_at_max_width() {
        let mut game = GameState::new_game();
        for san in ["e4", "e5", "Nf3", "Nc6", "Bb5", "a6", "Ba4", "Nf6"] {
            game.play(san).expect("move should be legal");
        }
        let options = PgnOptions {
            max_width: 16,
            ..PgnOptions::default()
        };
        let pgn = game.pgn_with(&options);
        let movetext: Vec<&str> = pgn.split("\n\n").nth(1).expect("movetext").lines().collect();
        assert!(movetext.len() > 1);
        assert!(movetext.iter().all(|line| line.len() <= 16));
        assert_eq!(movetext.join(" "), "1. e4 e5 2. Nf3 Nc6 3. Bb5 a6 4. Ba4 Nf6 *");
    }

    #[test]
    fn starting_game_without_moves_writes_result_only() {
        let game = GameState::new_game();
        assert_eq!(game.get_fen(), STARTING_POSITION_FEN);
        assert!(game.pgn().ends_with("\n\n*"));
    }
}
