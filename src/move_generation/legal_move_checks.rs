//! Attack and check detection.
//!
//! Scans every piece of the attacking color and asks the 0x88 geometry
//! table whether that piece type could hit the target; sliders then walk
//! the ray and stop at the first blocker.

use crate::chess_errors::ChessResult;
use crate::game_state::chess_types::*;
use crate::game_state::game_state::Board;
use crate::moves::attack_tables::{can_attack_by_geometry, ray_step};
use crate::utils::algebraic::{algebraic_to_square, square_to_algebraic};

/// Whether the piece on `from` attacks `target` on `board`.
fn piece_attacks(board: &Board, from: Square, piece: Piece, target: Square) -> bool {
    let diff = i16::from(target) - i16::from(from);
    if !can_attack_by_geometry(piece.kind, diff) {
        return false;
    }

    match piece.kind {
        PieceKind::Pawn => match piece.color {
            Color::White => diff > 0,
            Color::Black => diff < 0,
        },
        PieceKind::Knight | PieceKind::King => true,
        PieceKind::Bishop | PieceKind::Rook | PieceKind::Queen => {
            let step = ray_step(diff);
            let mut sq = i16::from(from) + step;
            while sq != i16::from(target) {
                if board[sq as usize].is_some() {
                    return false;
                }
                sq += step;
            }
            true
        }
    }
}

/// Whether any piece of `attacker_color` attacks `square` on `board`.
pub fn is_square_attacked_on(board: &Board, square: Square, attacker_color: Color) -> bool {
    all_squares().any(|from| match board[from as usize] {
        Some(piece) if piece.color == attacker_color => piece_attacks(board, from, piece, square),
        _ => false,
    })
}

/// Squares of every `attacker_color` piece attacking `square` on `board`.
pub fn attackers_on(board: &Board, square: Square, attacker_color: Color) -> Vec<Square> {
    all_squares()
        .filter(|from| match board[*from as usize] {
            Some(piece) if piece.color == attacker_color => {
                piece_attacks(board, *from, piece, square)
            }
            _ => false,
        })
        .collect()
}

#[inline]
pub fn is_square_attacked(game_state: &GameState, square: Square, attacker_color: Color) -> bool {
    is_square_attacked_on(&game_state.board, square, attacker_color)
}

#[inline]
pub fn is_king_in_check(game_state: &GameState, color: Color) -> bool {
    let Some(king_sq) = game_state.kings[color.index()] else {
        return false;
    };
    is_square_attacked(game_state, king_sq, color.opposite())
}

impl GameState {
    /// Whether `color` attacks `square` (given in algebraic form).
    pub fn is_attacked(&self, square: &str, color: Color) -> ChessResult<bool> {
        Ok(is_square_attacked(self, algebraic_to_square(square)?, color))
    }

    /// Squares of `color` pieces attacking `square`.
    pub fn attackers(&self, square: &str, color: Color) -> ChessResult<Vec<String>> {
        let target = algebraic_to_square(square)?;
        Ok(attackers_on(&self.board, target, color)
            .into_iter()
            .map(square_to_algebraic)
            .collect())
    }

    /// Whether the side to move is in check.
    #[inline]
    pub fn is_check(&self) -> bool {
        is_king_in_check(self, self.side_to_move)
    }
}

#[cfg(test)]
mod tests {
    use crate::game_state::chess_types::{Color, GameState};

    #[test]
    fn sliders_stop_at_first_blocker() {
        let game = GameState::from_fen("4k3/8/8/8/8/8/4P3/4R1K1 w - - 0 1")
            .expect("FEN should parse");
        assert!(game.is_attacked("e2", Color::White).expect("valid square"));
        assert!(!game.is_attacked("e3", Color::White).expect("valid square"));
        assert!(game.is_attacked("a1", Color::White).expect("valid square"));
    }

    #[test]
    fn pawns_attack_forward_diagonals_only() {
        let game = GameState::from_fen("4k3/8/8/8/4p3/8/8/4K3 w - - 0 1")
            .expect("FEN should parse");
        assert!(game.is_attacked("d3", Color::Black).expect("valid square"));
        assert!(game.is_attacked("f3", Color::Black).expect("valid square"));
        assert!(!game.is_attacked("d5", Color::Black).expect("valid square"));
        assert!(!game.is_attacked("e3", Color::Black).expect("valid square"));
    }

    #[test]
    fn attackers_lists_every_source() {
        let game = GameState::from_fen("4k3/8/8/3n4/8/4P3/8/R3K3 w - - 0 1")
            .expect("FEN should parse");
        let mut attackers = game.attackers("d4", Color::White).expect("valid square");
        attackers.sort();
        assert_eq!(attackers, vec!["e3".to_owned()]);
        assert_eq!(
            game.attackers("a8", Color::White).expect("valid square"),
            vec!["a1".to_owned()]
        );
        assert_eq!(
            game.attackers("e3", Color::Black).expect("valid square"),
            vec!["d5".to_owned()]
        );
    }

    #[test]
    fn detects_check_on_side_to_move() {
        let game = GameState::from_fen("4k3/8/8/8/8/8/8/4K2r w - - 0 1")
            .expect("FEN should parse");
        assert!(game.is_check());
        let calm = GameState::new_game();
        assert!(!calm.is_check());
    }
}
