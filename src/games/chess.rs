//! Piece kinds and material values for the chess variant.
//!
//! The search core only sees chess through this table. A chess rules oracle
//! implementing `RulesEngine` with `ChessPiece` as its piece kind slots into
//! the same generic search and session machinery the demo game uses.

use crate::evaluate::{MaterialEvaluator, PieceValues};

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ChessPiece {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

/// Classical material in centipoints. The king carries no material weight:
/// its loss ends the game, which terminal detection reports long before the
/// evaluator could.
#[derive(Clone, Copy, Debug, Default)]
pub struct ChessValues;

impl PieceValues for ChessValues {
    type Kind = ChessPiece;

    fn value(&self, kind: ChessPiece) -> i16 {
        match kind {
            ChessPiece::Pawn => 100,
            ChessPiece::Knight => 300,
            ChessPiece::Bishop => 300,
            ChessPiece::Rook => 500,
            ChessPiece::Queen => 900,
            ChessPiece::King => 0,
        }
    }
}

pub type ChessEvaluator = MaterialEvaluator<ChessValues>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pawn_is_the_unit() {
        assert_eq!(100, ChessValues.value(ChessPiece::Pawn));
    }

    #[test]
    fn test_minor_pieces_are_worth_three_pawns() {
        assert_eq!(300, ChessValues.value(ChessPiece::Knight));
        assert_eq!(300, ChessValues.value(ChessPiece::Bishop));
    }

    #[test]
    fn test_major_pieces_outweigh_minors() {
        assert!(ChessValues.value(ChessPiece::Rook) > ChessValues.value(ChessPiece::Bishop));
        assert!(ChessValues.value(ChessPiece::Queen) > ChessValues.value(ChessPiece::Rook));
    }

    #[test]
    fn test_king_carries_no_material_weight() {
        assert_eq!(0, ChessValues.value(ChessPiece::King));
    }
}
