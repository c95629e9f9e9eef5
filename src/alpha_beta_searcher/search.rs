//! Minimax search with alpha-beta pruning.
//!
//! Alpha-beta pruning keeps a window `[alpha, beta]` of scores that can still
//! influence the decision at the root. A subtree whose score falls outside
//! the window cannot change the final choice and is cut off early. The pruned
//! search returns the same score as exhaustive minimax while visiting fewer
//! nodes.
//!
//! The searcher owns no position state. Every node applies a candidate move
//! to the borrowed rules engine, recurses, and undoes it again, so the engine
//! comes back to the caller exactly as it was handed in. There is no
//! transposition cache, no deepening schedule, and no quiescence extension:
//! the search burns straight down to the depth it is given and trusts the
//! evaluator at the leaves.

use std::cmp::{max, min};
use std::time::{Duration, Instant};

use thiserror::Error;

use super::{Evaluator, MoveCollection, RulesEngine};

#[derive(Error, Debug)]
pub enum SearchError {
    #[error("depth must be at least 1")]
    DepthTooLow,
}

/// Statistics collected during search.
struct SearchStats {
    position_count: usize,
    cutoff_count: usize,
    move_gen_calls: usize,
    last_score: Option<i16>,
    last_duration: Option<Duration>,
}

impl SearchStats {
    fn new() -> Self {
        Self {
            position_count: 0,
            cutoff_count: 0,
            move_gen_calls: 0,
            last_score: None,
            last_duration: None,
        }
    }

    fn reset(&mut self) {
        self.position_count = 0;
        self.cutoff_count = 0;
        self.move_gen_calls = 0;
    }

    fn record_result(&mut self, score: i16, duration: Duration) {
        self.last_score = Some(score);
        self.last_duration = Some(duration);
    }
}

/// Per-session search state: the configured depth plus counters describing
/// the most recent selection. Search runs on one thread, so the counters are
/// plain integers.
pub struct SearchContext {
    depth: u8,
    stats: SearchStats,
}

impl SearchContext {
    pub fn new(depth: u8) -> Self {
        Self {
            depth,
            stats: SearchStats::new(),
        }
    }

    pub fn search_depth(&self) -> u8 {
        self.depth
    }

    pub fn reset_stats(&mut self) {
        self.stats.reset();
    }

    pub fn searched_position_count(&self) -> usize {
        self.stats.position_count
    }

    pub fn cutoff_count(&self) -> usize {
        self.stats.cutoff_count
    }

    pub fn move_gen_calls(&self) -> usize {
        self.stats.move_gen_calls
    }

    pub fn last_score(&self) -> Option<i16> {
        self.stats.last_score
    }

    pub fn last_search_duration(&self) -> Option<Duration> {
        self.stats.last_duration
    }

    pub(super) fn record_result(&mut self, score: i16, start: Instant) {
        self.stats.record_result(score, start.elapsed());
    }

    fn increment_position_count(&mut self) {
        self.stats.position_count += 1;
    }

    fn increment_cutoffs(&mut self) {
        self.stats.cutoff_count += 1;
    }

    fn increment_move_gen_calls(&mut self) {
        self.stats.move_gen_calls += 1;
    }
}

/// Applies a move, executes a closure against the resulting position, then
/// undoes the move, restoring the position the caller passed in.
///
/// Move application and undo must succeed here: the move came from the
/// engine's own legal move list, so a rejection is a broken engine, not a
/// recoverable condition.
pub(super) fn with_move_applied<R, F, T>(game_move: &R::Move, rules: &mut R, f: F) -> T
where
    R: RulesEngine,
    F: FnOnce(&mut R) -> T,
{
    rules
        .apply_move(game_move)
        .expect("move application should succeed in search");

    let result = f(rules);

    rules
        .undo_move()
        .expect("move undo should succeed in search");

    result
}

/// Updates best score and move if new score is better.
/// Returns true if best_score was updated.
///
/// Comparison is strict, so on equal scores the incumbent wins.
pub(super) fn update_best<M: Clone>(
    score: i16,
    candidate_move: &M,
    maximizing_player: bool,
    best_score: &mut i16,
    best_move: &mut Option<M>,
) -> bool {
    let is_better = if maximizing_player {
        score > *best_score
    } else {
        score < *best_score
    };

    if is_better {
        *best_score = score;
        *best_move = Some(candidate_move.clone());
    }
    is_better
}

/// Scores a position by searching `depth` plies ahead with the window
/// `[alpha, beta]`, for the given side of the minimax fence.
///
/// Ended positions and positions at depth 0 score as the evaluator sees them,
/// without enumerating a single move. A position that is not over but offers
/// no moves also falls back to the evaluator, on the unchanged position.
pub fn search<R, E>(
    context: &mut SearchContext,
    rules: &mut R,
    evaluator: &E,
    depth: u8,
    mut alpha: i16,
    mut beta: i16,
    maximizing_player: bool,
) -> i16
where
    R: RulesEngine,
    E: Evaluator<R>,
{
    context.increment_position_count();

    if depth == 0 || rules.is_game_over() {
        return evaluator.evaluate(rules);
    }

    context.increment_move_gen_calls();
    let candidates = rules.legal_moves();
    if candidates.is_empty() {
        return evaluator.evaluate(rules);
    }

    if maximizing_player {
        let mut best_score = i16::MIN;
        for game_move in candidates.as_ref() {
            let score = with_move_applied(game_move, rules, |rules| {
                search(context, rules, evaluator, depth - 1, alpha, beta, false)
            });
            best_score = max(best_score, score);
            alpha = max(alpha, score);
            if beta <= alpha {
                context.increment_cutoffs();
                break;
            }
        }
        best_score
    } else {
        let mut best_score = i16::MAX;
        for game_move in candidates.as_ref() {
            let score = with_move_applied(game_move, rules, |rules| {
                search(context, rules, evaluator, depth - 1, alpha, beta, true)
            });
            best_score = min(best_score, score);
            beta = min(beta, score);
            if beta <= alpha {
                context.increment_cutoffs();
                break;
            }
        }
        best_score
    }
}
