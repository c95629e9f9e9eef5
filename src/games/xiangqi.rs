//! Piece kinds and material values for the xiangqi variant.
//!
//! Same arrangement as the chess module: a kind enum plus a `PieceValues`
//! table, with the rules oracle supplied from outside. The weights reflect
//! xiangqi piece strengths, which differ from chess in shape: the chariot
//! dominates, the cannon sits between the horse and the chariot, and the
//! palace pieces are worth little more than soldiers.

use crate::evaluate::{MaterialEvaluator, PieceValues};

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum XiangqiPiece {
    General,
    Advisor,
    Elephant,
    Horse,
    Chariot,
    Cannon,
    Soldier,
}

/// Material table in centipoints (soldier = 100). The general carries no
/// material weight, mirroring the chess king.
#[derive(Clone, Copy, Debug, Default)]
pub struct XiangqiValues;

impl PieceValues for XiangqiValues {
    type Kind = XiangqiPiece;

    fn value(&self, kind: XiangqiPiece) -> i16 {
        match kind {
            XiangqiPiece::General => 0,
            XiangqiPiece::Advisor => 200,
            XiangqiPiece::Elephant => 200,
            XiangqiPiece::Horse => 400,
            XiangqiPiece::Chariot => 900,
            XiangqiPiece::Cannon => 450,
            XiangqiPiece::Soldier => 100,
        }
    }
}

pub type XiangqiEvaluator = MaterialEvaluator<XiangqiValues>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_soldier_is_the_unit() {
        assert_eq!(100, XiangqiValues.value(XiangqiPiece::Soldier));
    }

    #[test]
    fn test_cannon_sits_between_horse_and_chariot() {
        let horse = XiangqiValues.value(XiangqiPiece::Horse);
        let cannon = XiangqiValues.value(XiangqiPiece::Cannon);
        let chariot = XiangqiValues.value(XiangqiPiece::Chariot);
        assert!(horse < cannon && cannon < chariot);
    }

    #[test]
    fn test_palace_pieces_are_light() {
        assert_eq!(200, XiangqiValues.value(XiangqiPiece::Advisor));
        assert_eq!(200, XiangqiValues.value(XiangqiPiece::Elephant));
    }

    #[test]
    fn test_general_carries_no_material_weight() {
        assert_eq!(0, XiangqiValues.value(XiangqiPiece::General));
    }
}
