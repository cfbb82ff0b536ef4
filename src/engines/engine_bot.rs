//! Built-in difficulty-scaled bot.
//!
//! Difficulty 1..=10 picks the search depth and how often the bot throws away
//! its computed move for a random legal one. The two lowest levels also swap
//! alpha-beta for plain minimax. Early positions found in the opening book
//! are answered from the book without searching.

use std::time::Duration;

use log::debug;
use rand::prelude::IndexedRandom;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::chess_errors::{ChessError, ChessResult};
use crate::engines::engine_trait::{Engine, SearchOptions, SearchOutcome};
use crate::game_state::chess_types::GameState;
use crate::move_generation::legal_move_generator::generate_legal_moves;
use crate::move_generation::move_generator::MoveFilter;
use crate::search::board_scoring::StandardScorer;
use crate::search::iterative_deepening::{iterative_deepening_search, SearchAlgorithm, SearchConfig};
use crate::tables::opening_book::OpeningBook;

pub const MIN_DIFFICULTY: u8 = 1;
pub const MAX_DIFFICULTY: u8 = 10;

#[derive(Debug, Clone)]
pub struct BotConfig {
    pub difficulty: u8,
    pub use_opening_book: bool,
    pub move_time: Option<Duration>,
    pub seed: Option<u64>,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            difficulty: 5,
            use_opening_book: true,
            move_time: Some(Duration::from_millis(2_000)),
            seed: None,
        }
    }
}

pub fn depth_for_difficulty(difficulty: u8) -> u8 {
    let difficulty = difficulty.clamp(MIN_DIFFICULTY, MAX_DIFFICULTY);
    ((difficulty + 1) / 2).clamp(1, 5)
}

pub fn blunder_probability(difficulty: u8) -> f64 {
    let difficulty = difficulty.clamp(MIN_DIFFICULTY, MAX_DIFFICULTY);
    0.05 * f64::from(MAX_DIFFICULTY - difficulty)
}

pub fn algorithm_for_difficulty(difficulty: u8) -> SearchAlgorithm {
    if difficulty <= 2 {
        SearchAlgorithm::Minimax
    } else {
        SearchAlgorithm::AlphaBeta
    }
}

pub struct BotEngine {
    config: BotConfig,
    opening_book: OpeningBook,
    scorer: StandardScorer,
    rng: StdRng,
}

impl BotEngine {
    pub fn new(config: BotConfig) -> Self {
        let rng = make_rng(config.seed);
        Self {
            config,
            opening_book: OpeningBook::builtin(),
            scorer: StandardScorer,
            rng,
        }
    }

    pub fn config(&self) -> &BotConfig {
        &self.config
    }

    fn book_move(&mut self, game_state: &GameState) -> Option<SearchOutcome> {
        if !self.config.use_opening_book {
            return None;
        }
        let mv = self.opening_book.choose_weighted_move(game_state, &mut self.rng)?;
        Some(SearchOutcome {
            best_move: Some(mv),
            pv: vec![mv],
            ..SearchOutcome::default()
        })
    }
}

impl Default for BotEngine {
    fn default() -> Self {
        Self::new(BotConfig::default())
    }
}

fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}

fn parse_bool_option(name: &str, value: &str) -> ChessResult<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(ChessError::InvalidEngineText(format!(
            "invalid {name} value '{value}'"
        ))),
    }
}

fn parse_number_option<T: std::str::FromStr>(name: &str, value: &str) -> ChessResult<T> {
    value
        .trim()
        .parse::<T>()
        .map_err(|_| ChessError::InvalidEngineText(format!("invalid {name} value '{value}'")))
}

impl Engine for BotEngine {
    fn name(&self) -> &str {
        "chess_rules bot"
    }

    fn new_game(&mut self) {
        self.rng = make_rng(self.config.seed);
    }

    fn set_option(&mut self, name: &str, value: &str) -> ChessResult<()> {
        if name.eq_ignore_ascii_case("Difficulty") {
            let difficulty: u8 = parse_number_option(name, value)?;
            if !(MIN_DIFFICULTY..=MAX_DIFFICULTY).contains(&difficulty) {
                return Err(ChessError::InvalidEngineText(format!(
                    "Difficulty must be {MIN_DIFFICULTY}..={MAX_DIFFICULTY}, got {difficulty}"
                )));
            }
            self.config.difficulty = difficulty;
            return Ok(());
        }
        if name.eq_ignore_ascii_case("OwnBook") {
            self.config.use_opening_book = parse_bool_option(name, value)?;
            return Ok(());
        }
        if name.eq_ignore_ascii_case("MoveTime") {
            let ms: u64 = parse_number_option(name, value)?;
            self.config.move_time = (ms > 0).then(|| Duration::from_millis(ms));
            return Ok(());
        }
        if name.eq_ignore_ascii_case("Seed") {
            let seed: u64 = parse_number_option(name, value)?;
            self.config.seed = Some(seed);
            self.rng = StdRng::seed_from_u64(seed);
            return Ok(());
        }
        Err(ChessError::InvalidEngineText(format!("unknown option '{name}'")))
    }

    fn search(&mut self, game_state: &GameState, options: &SearchOptions) -> ChessResult<SearchOutcome> {
        // Explicit depth requests always search.
        if options.depth.is_none() {
            if let Some(outcome) = self.book_move(game_state) {
                return Ok(outcome);
            }
        }

        let difficulty = self.config.difficulty;
        let move_time = if options.infinite {
            None
        } else {
            options.move_time.or(self.config.move_time)
        };
        let config = SearchConfig {
            max_depth: options.depth.unwrap_or_else(|| depth_for_difficulty(difficulty)).max(1),
            move_time,
            algorithm: algorithm_for_difficulty(difficulty),
        };

        let mut scratch = game_state.clone();
        let result = iterative_deepening_search(&mut scratch, &self.scorer, config);

        let mut outcome = SearchOutcome {
            best_move: result.best_move,
            score: result.mate_in().unwrap_or(result.best_score),
            is_mate: result.is_mate(),
            depth: result.reached_depth,
            nodes: result.nodes,
            pv: result.pv.clone(),
        };

        if outcome.best_move.is_some() && self.rng.random_bool(blunder_probability(difficulty)) {
            let legal = generate_legal_moves(&mut scratch, MoveFilter::all());
            if let Some(&random) = legal.as_slice().choose(&mut self.rng) {
                debug!("difficulty {difficulty} blunder {} instead of search move", random.to_lan());
                outcome.best_move = Some(random);
                outcome.pv = vec![random];
            }
        }

        Ok(outcome)
    }
}
