//! Position evaluation and game-ending classification.
//!
//! Evaluation is material only: each piece contributes its table value, light
//! pieces positively and dark pieces negatively, and nothing else is scored.
//! No mobility, no king safety, no square bonuses. An ended position scores
//! exactly like any other arrangement of the same material, which keeps the
//! evaluator a pure function of the board and lets the search call it at
//! terminal nodes without special cases.

use std::fmt;

use crate::alpha_beta_searcher::{Evaluator, RulesEngine};
use crate::side::Side;

/// Per-kind material worth in centipoints (a pawn-equivalent is 100). Tables
/// are plain data; hosts retune by supplying their own implementation.
pub trait PieceValues {
    type Kind;

    fn value(&self, kind: Self::Kind) -> i16;
}

/// Sums piece values over the whole board, light minus dark.
#[derive(Clone, Debug, Default)]
pub struct MaterialEvaluator<V> {
    values: V,
}

impl<V> MaterialEvaluator<V> {
    pub fn new(values: V) -> Self {
        Self { values }
    }
}

impl<R, V> Evaluator<R> for MaterialEvaluator<V>
where
    R: RulesEngine<PieceKind = V::Kind>,
    V: PieceValues,
{
    fn evaluate(&self, rules: &R) -> i16 {
        let mut score = 0;
        for piece in rules.pieces() {
            let value = self.values.value(piece.kind);
            score += match piece.side {
                Side::Light => value,
                Side::Dark => -value,
            };
        }
        score
    }
}

/// How a finished game ended. `Checkmate` carries the winner: the opponent
/// of the side left to move, since the loser is the one staring at the final
/// position.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum GameEnding {
    Checkmate(Side),
    Stalemate,
    Draw,
}

impl fmt::Display for GameEnding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameEnding::Checkmate(winner) => write!(f, "Checkmate! Winner: {}", winner),
            GameEnding::Stalemate => write!(f, "Stalemate! Draw"),
            GameEnding::Draw => write!(f, "Draw"),
        }
    }
}

/// Classifies an ended position, or returns `None` while the game is still
/// on.
pub fn game_ending<R: RulesEngine>(rules: &mut R) -> Option<GameEnding> {
    if !rules.is_game_over() {
        return None;
    }

    let ending = if rules.is_checkmate() {
        GameEnding::Checkmate(rules.turn().opposite())
    } else if rules.is_stalemate() {
        GameEnding::Stalemate
    } else if rules.is_draw() {
        GameEnding::Draw
    } else {
        // Over without any probe matching: no continuation and no winner.
        GameEnding::Stalemate
    };
    Some(ending)
}
