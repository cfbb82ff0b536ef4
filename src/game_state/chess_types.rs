//! Core value types shared by every subsystem.
//!
//! Squares are 0x88 indices (`rank * 16 + file`, `a1 == 0`, `h8 == 119`):
//! any index with `index & 0x88 != 0` lies off the board, which lets ray
//! walks detect an edge exit with a single mask test.

use std::fmt;

pub use crate::game_state::game_state::GameState;
pub use crate::game_state::undo_state::UndoState;

/// Side to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    White,
    Black,
}

impl Color {
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Color::White => 0,
            Color::Black => 1,
        }
    }

    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// FEN side-to-move token.
    #[inline]
    pub const fn fen_char(self) -> char {
        match self {
            Color::White => 'w',
            Color::Black => 'b',
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::White => write!(f, "white"),
            Color::Black => write!(f, "black"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    pub const ALL: [PieceKind; 6] = [
        PieceKind::Pawn,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Rook,
        PieceKind::Queen,
        PieceKind::King,
    ];

    /// Promotion choices in the order they are generated.
    pub const PROMOTIONS: [PieceKind; 4] = [
        PieceKind::Queen,
        PieceKind::Rook,
        PieceKind::Bishop,
        PieceKind::Knight,
    ];

    #[inline]
    pub const fn index(self) -> usize {
        match self {
            PieceKind::Pawn => 0,
            PieceKind::Knight => 1,
            PieceKind::Bishop => 2,
            PieceKind::Rook => 3,
            PieceKind::Queen => 4,
            PieceKind::King => 5,
        }
    }

    /// Lowercase letter used by FEN, SAN promotion suffixes and UCI moves.
    #[inline]
    pub const fn to_char(self) -> char {
        match self {
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        }
    }

    /// Case-insensitive letter lookup.
    pub fn from_char(ch: char) -> Option<Self> {
        match ch.to_ascii_lowercase() {
            'p' => Some(PieceKind::Pawn),
            'n' => Some(PieceKind::Knight),
            'b' => Some(PieceKind::Bishop),
            'r' => Some(PieceKind::Rook),
            'q' => Some(PieceKind::Queen),
            'k' => Some(PieceKind::King),
            _ => None,
        }
    }

    #[inline]
    pub const fn is_slider(self) -> bool {
        matches!(self, PieceKind::Bishop | PieceKind::Rook | PieceKind::Queen)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub color: Color,
    pub kind: PieceKind,
}

impl Piece {
    #[inline]
    pub const fn new(color: Color, kind: PieceKind) -> Self {
        Self { color, kind }
    }

    /// FEN letter: uppercase for white, lowercase for black.
    pub fn fen_char(self) -> char {
        let base = self.kind.to_char();
        match self.color {
            Color::White => base.to_ascii_uppercase(),
            Color::Black => base,
        }
    }

    pub fn from_fen_char(ch: char) -> Option<Self> {
        let color = if ch.is_ascii_uppercase() {
            Color::White
        } else if ch.is_ascii_lowercase() {
            Color::Black
        } else {
            return None;
        };
        PieceKind::from_char(ch).map(|kind| Piece { color, kind })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CastleSide {
    Kingside,
    Queenside,
}

/// Per-color castling bitmask.
pub type CastlingRights = u8;
pub const CASTLE_KINGSIDE: CastlingRights = 1 << 0;
pub const CASTLE_QUEENSIDE: CastlingRights = 1 << 1;

impl CastleSide {
    #[inline]
    pub const fn right(self) -> CastlingRights {
        match self {
            CastleSide::Kingside => CASTLE_KINGSIDE,
            CastleSide::Queenside => CASTLE_QUEENSIDE,
        }
    }
}

/// 0x88 board index.
pub type Square = u8;

#[inline]
pub const fn is_on_board(square: i16) -> bool {
    square >= 0 && (square & 0x88) == 0
}

#[inline]
pub const fn file_of(square: Square) -> u8 {
    square & 0x0F
}

#[inline]
pub const fn rank_of(square: Square) -> u8 {
    square >> 4
}

#[inline]
pub const fn square_at(file: u8, rank: u8) -> Square {
    (rank << 4) | file
}

/// Square index offset by `delta`, or `None` when the step leaves the board.
#[inline]
pub fn offset_square(square: Square, delta: i16) -> Option<Square> {
    let next = i16::from(square) + delta;
    if is_on_board(next) {
        Some(next as Square)
    } else {
        None
    }
}

/// Iterates the 64 playable squares from a1 to h8.
pub fn all_squares() -> impl Iterator<Item = Square> {
    (0u8..128).filter(|sq| sq & 0x88 == 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn padding_bits_mark_off_board_indices() {
        assert!(is_on_board(0));
        assert!(is_on_board(119));
        assert!(!is_on_board(8));
        assert!(!is_on_board(120));
        assert!(!is_on_board(-1));
        assert_eq!(all_squares().count(), 64);
        assert_eq!(offset_square(square_at(7, 0), 1), None);
        assert_eq!(offset_square(square_at(4, 1), 16), Some(square_at(4, 2)));
    }

    #[test]
    fn piece_letters_round_trip() {
        for kind in PieceKind::ALL {
            for color in [Color::White, Color::Black] {
                let piece = Piece::new(color, kind);
                assert_eq!(Piece::from_fen_char(piece.fen_char()), Some(piece));
            }
        }
        assert_eq!(Piece::from_fen_char('x'), None);
        assert_eq!(Piece::from_fen_char('3'), None);
    }
}
