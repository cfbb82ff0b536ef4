//! Iterative deepening search over minimax or negamax alpha-beta.
//!
//! Each iteration searches the root moves in order, best move of the
//! previous iteration first. The time budget is only checked between root
//! moves; once it is spent the current iteration is abandoned and the result
//! of the last completed one is kept.

use std::time::{Duration, Instant};

use log::{debug, trace};

use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_checks::is_king_in_check;
use crate::move_generation::legal_move_generator::generate_legal_moves;
use crate::move_generation::move_generator::MoveFilter;
use crate::moves::move_descriptions::Move;
use crate::search::board_scoring::{BoardScorer, MATE_SCORE};
use crate::search::move_ordering::order_moves;

const INFINITY: i32 = MATE_SCORE + 1_000;
const MAX_QUIESCENCE_PLIES: u8 = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchAlgorithm {
    /// Exhaustive minimax with no pruning and no quiescence extension.
    Minimax,
    /// Negamax with alpha-beta pruning, move ordering and quiescence search.
    AlphaBeta,
}

#[derive(Debug, Clone, Copy)]
pub struct SearchConfig {
    pub max_depth: u8,
    pub move_time: Option<Duration>,
    pub algorithm: SearchAlgorithm,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_depth: 3,
            move_time: None,
            algorithm: SearchAlgorithm::AlphaBeta,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchResult {
    pub best_move: Option<Move>,
    /// Side-to-move score in centipawns, or a mate score beyond `MATE_SCORE`.
    pub best_score: i32,
    pub reached_depth: u8,
    pub nodes: u64,
    pub pv: Vec<Move>,
    pub timed_out: bool,
}

impl SearchResult {
    #[inline]
    pub fn is_mate(&self) -> bool {
        self.best_score.abs() >= MATE_SCORE
    }

    /// Signed full moves until mate, positive when the side to move mates.
    pub fn mate_in(&self) -> Option<i32> {
        if !self.is_mate() {
            return None;
        }
        let remaining = self.best_score.abs() - MATE_SCORE;
        let plies = (i32::from(self.reached_depth) - remaining).max(1);
        let moves = (plies + 1) / 2;
        Some(if self.best_score > 0 { moves } else { -moves })
    }
}

struct RootOutcome {
    best_move: Move,
    score: i32,
    pv: Vec<Move>,
}

pub fn iterative_deepening_search<S: BoardScorer>(
    game_state: &mut GameState,
    scorer: &S,
    config: SearchConfig,
) -> SearchResult {
    let started_at = Instant::now();
    let deadline = config.move_time.map(|budget| started_at + budget);

    let mut result = SearchResult::default();
    let mut root_moves = generate_legal_moves(game_state, MoveFilter::all());
    if root_moves.is_empty() {
        result.best_score = terminal_score(game_state, 0);
        result.nodes = 1;
        return result;
    }

    order_moves(game_state, &mut root_moves, None);
    let mut partial_best: Option<Move> = None;

    for depth in 1..=config.max_depth.max(1) {
        if deadline.is_some_and(|limit| Instant::now() >= limit) {
            result.timed_out = true;
            break;
        }

        let mut nodes = 0u64;
        let outcome = search_root(
            game_state,
            scorer,
            &root_moves,
            depth,
            config.algorithm,
            deadline,
            &mut nodes,
            &mut partial_best,
        );
        result.nodes += nodes;

        let Some(outcome) = outcome else {
            result.timed_out = true;
            break;
        };

        result.best_move = Some(outcome.best_move);
        result.best_score = outcome.score;
        result.reached_depth = depth;
        result.pv = outcome.pv;
        debug!(
            "depth {depth} score {} nodes {} best {}",
            outcome.score,
            result.nodes,
            outcome.best_move.to_lan()
        );

        // Search the previous best first next time.
        order_moves(game_state, &mut root_moves, Some(outcome.best_move));

        if result.is_mate() && result.best_score > 0 {
            break;
        }
    }

    if result.best_move.is_none() {
        let fallback = partial_best.unwrap_or(root_moves[0]);
        result.best_move = Some(fallback);
        result.pv = vec![fallback];
    }

    result
}

/// One root iteration. Returns `None` when the deadline cut it short;
/// `partial_best` tracks the best move seen before that happened.
#[allow(clippy::too_many_arguments)]
fn search_root<S: BoardScorer>(
    game_state: &mut GameState,
    scorer: &S,
    root_moves: &[Move],
    depth: u8,
    algorithm: SearchAlgorithm,
    deadline: Option<Instant>,
    nodes: &mut u64,
    partial_best: &mut Option<Move>,
) -> Option<RootOutcome> {
    let mut alpha = -INFINITY;
    let beta = INFINITY;
    let mut best: Option<RootOutcome> = None;

    for &mv in root_moves {
        if deadline.is_some_and(|limit| Instant::now() >= limit) {
            if let Some(found) = &best {
                *partial_best = Some(found.best_move);
            }
            return None;
        }

        let mut child_pv = Vec::new();
        game_state.make_move(mv);
        let score = match algorithm {
            SearchAlgorithm::AlphaBeta => -negamax(
                game_state,
                scorer,
                depth - 1,
                -beta,
                -alpha,
                nodes,
                &mut child_pv,
            ),
            SearchAlgorithm::Minimax => -minimax(game_state, scorer, depth - 1, nodes, &mut child_pv),
        };
        game_state.unmake_move();
        trace!("depth {depth} root {} score {score}", mv.to_lan());

        if best.as_ref().map_or(true, |b| score > b.score) {
            let mut pv = Vec::with_capacity(child_pv.len() + 1);
            pv.push(mv);
            pv.extend(child_pv);
            best = Some(RootOutcome {
                best_move: mv,
                score,
                pv,
            });
        }
        if algorithm == SearchAlgorithm::AlphaBeta && score > alpha {
            alpha = score;
        }
    }

    best
}

/// Mate or stalemate score for a position with no legal moves.
#[inline]
fn terminal_score(game_state: &GameState, depth: u8) -> i32 {
    if is_king_in_check(game_state, game_state.side_to_move) {
        -MATE_SCORE - i32::from(depth)
    } else {
        0
    }
}

#[inline]
fn is_rule_draw(game_state: &GameState) -> bool {
    game_state.is_fifty_move_draw() || game_state.is_insufficient_material()
}

fn negamax<S: BoardScorer>(
    game_state: &mut GameState,
    scorer: &S,
    depth: u8,
    mut alpha: i32,
    beta: i32,
    nodes: &mut u64,
    pv: &mut Vec<Move>,
) -> i32 {
    *nodes += 1;

    let mut moves = generate_legal_moves(game_state, MoveFilter::all());
    if moves.is_empty() {
        return terminal_score(game_state, depth);
    }
    if is_rule_draw(game_state) {
        return 0;
    }
    if depth == 0 {
        return quiescence(game_state, scorer, alpha, beta, 0, nodes);
    }

    order_moves(game_state, &mut moves, None);

    let mut best = -INFINITY;
    for mv in moves {
        let mut child_pv = Vec::new();
        game_state.make_move(mv);
        let score = -negamax(game_state, scorer, depth - 1, -beta, -alpha, nodes, &mut child_pv);
        game_state.unmake_move();

        if score > best {
            best = score;
        }
        if score > alpha {
            alpha = score;
            pv.clear();
            pv.push(mv);
            pv.extend(child_pv);
        }
        if alpha >= beta {
            break;
        }
    }

    best
}

/// Capture-only extension below the search horizon.
fn quiescence<S: BoardScorer>(
    game_state: &mut GameState,
    scorer: &S,
    mut alpha: i32,
    beta: i32,
    ply: u8,
    nodes: &mut u64,
) -> i32 {
    *nodes += 1;

    let stand_pat = scorer.score(game_state);
    if stand_pat >= beta {
        return beta;
    }
    if stand_pat > alpha {
        alpha = stand_pat;
    }
    if ply >= MAX_QUIESCENCE_PLIES {
        return alpha;
    }

    let mut moves = generate_legal_moves(game_state, MoveFilter::all());
    moves.retain(|mv| mv.is_capture());
    order_moves(game_state, &mut moves, None);

    for mv in moves {
        game_state.make_move(mv);
        let score = -quiescence(game_state, scorer, -beta, -alpha, ply + 1, nodes);
        game_state.unmake_move();

        if score >= beta {
            return beta;
        }
        if score > alpha {
            alpha = score;
        }
    }

    alpha
}

/// Plain minimax: every branch to `depth`, scored by the static evaluation.
fn minimax<S: BoardScorer>(
    game_state: &mut GameState,
    scorer: &S,
    depth: u8,
    nodes: &mut u64,
    pv: &mut Vec<Move>,
) -> i32 {
    *nodes += 1;

    let moves = generate_legal_moves(game_state, MoveFilter::all());
    if moves.is_empty() {
        return terminal_score(game_state, depth);
    }
    if is_rule_draw(game_state) {
        return 0;
    }
    if depth == 0 {
        return scorer.score(game_state);
    }

    let mut best = -INFINITY;
    for mv in moves {
        let mut child_pv = Vec::new();
        game_state.make_move(mv);
        let score = -minimax(game_state, scorer, depth - 1, nodes, &mut child_pv);
        game_state.unmake_move();

        if score > best {
            best = score;
            pv.clear();
            pv.push(mv);
            pv.extend(child_pv);
        }
    }

    best
}
