//! Adversarial search over an injected rules engine: the recursive
//! alpha-beta scorer plus the root-move selector built on top of it.

mod search;
mod selector;
mod traits;

pub use search::{search, SearchContext, SearchError};
pub use selector::select_best_move;
pub use traits::{CoordinateMove, Evaluator, MoveCollection, Piece, RulesEngine};

#[cfg(test)]
mod tests;
