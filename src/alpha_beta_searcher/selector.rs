//! Root-move selection: drives the alpha-beta search across every legal move
//! of the current position and picks the strongest line for the side to move.

use std::time::Instant;

use log::debug;
use rand::seq::SliceRandom;
use rand::Rng;

use super::search::{search, update_best, with_move_applied, SearchContext, SearchError};
use super::{Evaluator, MoveCollection, RulesEngine};

/// Picks a move for the side to move, or `Ok(None)` when the position offers
/// no legal moves at all. Having no moves is a game-over signal for the
/// caller to interpret, not an error.
///
/// The candidate list is shuffled before iteration so equally scored moves do
/// not repeat game after game; the rng is injected so callers can seed it.
/// Each candidate is then scored by a full-window search of the resulting
/// position at one ply less than the configured depth. Candidates are
/// compared strictly, so among equal scores the first one after the shuffle
/// wins.
///
/// Which side is maximizing is read off the position itself, never supplied
/// by the caller.
pub fn select_best_move<R, E, T>(
    context: &mut SearchContext,
    rules: &mut R,
    evaluator: &E,
    rng: &mut T,
) -> Result<Option<R::Move>, SearchError>
where
    R: RulesEngine,
    E: Evaluator<R>,
    T: Rng + ?Sized,
{
    let depth = context.search_depth();
    if depth < 1 {
        return Err(SearchError::DepthTooLow);
    }

    debug!("selecting a move at depth {} for {}", depth, rules.turn());
    context.reset_stats();
    let start = Instant::now();

    let mut candidates = rules.legal_moves();
    if candidates.is_empty() {
        debug!("no legal moves to select from");
        return Ok(None);
    }

    candidates.as_mut().shuffle(rng);

    let maximizing_player = rules.turn().maximize_score();
    let mut best_move = None;
    let mut best_score = if maximizing_player {
        i16::MIN
    } else {
        i16::MAX
    };

    for candidate in candidates.as_ref() {
        let score = with_move_applied(candidate, rules, |rules| {
            search(
                context,
                rules,
                evaluator,
                depth - 1,
                i16::MIN,
                i16::MAX,
                !maximizing_player,
            )
        });
        update_best(
            score,
            candidate,
            maximizing_player,
            &mut best_score,
            &mut best_move,
        );
    }

    // The strict comparison can only leave `best_move` empty if every line
    // scores at the integer extreme; fall back to the first candidate so a
    // playable position always yields a move.
    let chosen = best_move.unwrap_or_else(|| candidates.as_ref()[0].clone());

    context.record_result(best_score, start);
    debug!("selected {:?} scoring {}", chosen, best_score);

    Ok(Some(chosen))
}
