//! Core traits for generic alpha-beta search.

use crate::side::Side;
use smallvec::{Array, SmallVec};
use std::fmt::Debug;

/// A piece on the board as reported by a rules engine. Consumed by material
/// evaluation; the search core never inspects piece kinds itself.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Piece<K> {
    pub kind: K,
    pub side: Side,
}

impl<K> Piece<K> {
    pub fn new(kind: K, side: Side) -> Self {
        Piece { kind, side }
    }
}

/// The move-generation and legality oracle for one game. The search core
/// treats it as the single owner of position state: moves are enumerated,
/// applied, and undone through this trait, and terminal detection is
/// delegated to it entirely.
///
/// Applying a move switches the turn; `undo_move` restores the previous
/// position and turn exactly.
pub trait RulesEngine {
    type PieceKind: Copy + PartialEq + Debug;
    type Square: Copy + PartialEq + Debug;
    type Move: Clone + PartialEq + Debug;
    type MoveList: MoveCollection<Self::Move>;
    type MoveError: Debug;

    /// The side to move.
    fn turn(&self) -> Side;

    /// The piece occupying `square`, if any.
    fn piece_at(&self, square: Self::Square) -> Option<Piece<Self::PieceKind>>;

    /// Every piece currently on the board, in unspecified order.
    fn pieces(&self) -> Vec<Piece<Self::PieceKind>>;

    /// All legal moves for the side to move.
    fn legal_moves(&mut self) -> Self::MoveList;

    /// The legal moves originating from `square` (empty if the square is
    /// empty or holds an opposing piece).
    fn moves_from(&mut self, square: Self::Square) -> Self::MoveList;

    /// Applies `game_move` and switches the turn. `Err` means the engine
    /// rejected the move as illegal for the current position.
    fn apply_move(&mut self, game_move: &Self::Move) -> Result<(), Self::MoveError>;

    /// Undoes the most recently applied move. `Err` means there was nothing
    /// to undo.
    fn undo_move(&mut self) -> Result<(), Self::MoveError>;

    /// True if the game has ended (decisive result, stalemate, or draw).
    fn is_game_over(&mut self) -> bool;

    /// True if the side to move has been decisively beaten.
    fn is_checkmate(&mut self) -> bool;

    /// True if the side to move has no legal moves but is not beaten.
    fn is_stalemate(&mut self) -> bool;

    /// True if the game has ended without a winner by rule.
    fn is_draw(&mut self) -> bool;

    /// Restores the initial layout and clears any move history.
    fn reset(&mut self);
}

/// Coordinate view of a move, for engines whose moves are origin/destination
/// pairs. Required by the square-selection input seam, not by search.
pub trait CoordinateMove {
    type Square;

    fn from_square(&self) -> Self::Square;
    fn to_square(&self) -> Self::Square;
}

/// Evaluates a game position and returns a score. Higher scores favor the
/// maximizing player (`Side::Light`).
pub trait Evaluator<R: RulesEngine> {
    fn evaluate(&self, rules: &R) -> i16;
}

/// Abstraction over move collections (Vec, SmallVec, etc.)
pub trait MoveCollection<M>: AsRef<[M]> + AsMut<[M]> {
    #[inline]
    fn is_empty(&self) -> bool {
        self.as_ref().is_empty()
    }

    #[inline]
    fn len(&self) -> usize {
        self.as_ref().len()
    }
}

impl<M> MoveCollection<M> for Vec<M> {}

impl<M, A: Array<Item = M>> MoveCollection<M> for SmallVec<A> {}
