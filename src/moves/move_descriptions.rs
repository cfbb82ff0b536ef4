//! Move values and their flag bitset.
//!
//! A `Move` is a small `Copy` description of one transition. Its flag bits
//! record how the move alters the board beyond "piece goes from A to B" so
//! apply and undo never need to re-derive it.

use crate::game_state::chess_types::{Color, PieceKind, Square};
use crate::utils::algebraic::square_to_algebraic;

pub type MoveFlags = u8;

pub const FLAG_NORMAL: MoveFlags = 1 << 0;
pub const FLAG_CAPTURE: MoveFlags = 1 << 1;
pub const FLAG_BIG_PAWN: MoveFlags = 1 << 2;
pub const FLAG_EP_CAPTURE: MoveFlags = 1 << 3;
pub const FLAG_PROMOTION: MoveFlags = 1 << 4;
pub const FLAG_KSIDE_CASTLE: MoveFlags = 1 << 5;
pub const FLAG_QSIDE_CASTLE: MoveFlags = 1 << 6;

const FLAG_LETTERS: [(MoveFlags, char); 7] = [
    (FLAG_NORMAL, 'n'),
    (FLAG_CAPTURE, 'c'),
    (FLAG_BIG_PAWN, 'b'),
    (FLAG_EP_CAPTURE, 'e'),
    (FLAG_PROMOTION, 'p'),
    (FLAG_KSIDE_CASTLE, 'k'),
    (FLAG_QSIDE_CASTLE, 'q'),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub color: Color,
    pub from: Square,
    pub to: Square,
    pub piece: PieceKind,
    pub captured: Option<PieceKind>,
    pub promotion: Option<PieceKind>,
    pub flags: MoveFlags,
}

impl Move {
    #[inline]
    pub fn has_flag(&self, flag: MoveFlags) -> bool {
        self.flags & flag != 0
    }

    #[inline]
    pub fn is_capture(&self) -> bool {
        self.has_flag(FLAG_CAPTURE | FLAG_EP_CAPTURE)
    }

    #[inline]
    pub fn is_promotion(&self) -> bool {
        self.has_flag(FLAG_PROMOTION)
    }

    #[inline]
    pub fn is_castle(&self) -> bool {
        self.has_flag(FLAG_KSIDE_CASTLE | FLAG_QSIDE_CASTLE)
    }

    /// Coordinate form used by UCI adapters, e.g. `e7e8q`.
    pub fn to_lan(&self) -> String {
        let mut out = square_to_algebraic(self.from);
        out.push_str(&square_to_algebraic(self.to));
        if let Some(promo) = self.promotion {
            out.push(promo.to_char());
        }
        out
    }
}

/// Flag letters in the order `n c b e p k q`.
pub fn flags_to_string(flags: MoveFlags) -> String {
    FLAG_LETTERS
        .iter()
        .filter(|(bit, _)| flags & bit != 0)
        .map(|(_, letter)| *letter)
        .collect()
}

/// A played move together with its notation and surrounding positions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveRecord {
    pub mv: Move,
    pub san: String,
    pub lan: String,
    pub before: String,
    pub after: String,
}

impl MoveRecord {
    pub fn flags(&self) -> String {
        flags_to_string(self.mv.flags)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::algebraic::algebraic_to_square;

    #[test]
    fn flag_letters_follow_fixed_order() {
        assert_eq!(flags_to_string(FLAG_NORMAL), "n");
        assert_eq!(flags_to_string(FLAG_PROMOTION | FLAG_CAPTURE), "cp");
        assert_eq!(flags_to_string(FLAG_EP_CAPTURE), "e");
    }

    #[test]
    fn lan_includes_promotion_letter() {
        let mv = Move {
            color: Color::White,
            from: algebraic_to_square("e7").expect("e7 should parse"),
            to: algebraic_to_square("e8").expect("e8 should parse"),
            piece: PieceKind::Pawn,
            captured: None,
            promotion: Some(PieceKind::Knight),
            flags: FLAG_PROMOTION,
        };
        assert_eq!(mv.to_lan(), "e7e8n");
        assert!(mv.is_promotion());
        assert!(!mv.is_capture());
    }
}
