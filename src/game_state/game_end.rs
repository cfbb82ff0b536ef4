//! Terminal-position classification: mate, stalemate and the draw rules.

use crate::game_state::chess_rules::FIFTY_MOVE_HALFMOVES;
use crate::game_state::chess_types::*;
use crate::game_state::game_state::SquareColor;
use crate::move_generation::legal_move_generator::has_legal_move;

impl GameState {
    pub fn is_checkmate(&mut self) -> bool {
        self.is_check() && !has_legal_move(self)
    }

    pub fn is_stalemate(&mut self) -> bool {
        !self.is_check() && !has_legal_move(self)
    }

    /// Bare kings, a single minor piece, or only bishops that all stand on
    /// one square color. Everything else is treated as sufficient.
    pub fn is_insufficient_material(&self) -> bool {
        let mut total = 0usize;
        let mut counts = [0usize; 6];
        let mut bishop_colors = Vec::new();

        for square in all_squares() {
            let Some(piece) = self.board[square as usize] else {
                continue;
            };
            total += 1;
            counts[piece.kind.index()] += 1;
            if piece.kind == PieceKind::Bishop {
                bishop_colors.push(square_color_of(square));
            }
        }

        let minors = counts[PieceKind::Bishop.index()] + counts[PieceKind::Knight.index()];

        match total {
            2 => true,
            3 => minors == 1,
            _ => {
                let bishops = counts[PieceKind::Bishop.index()];
                bishops + 2 == total
                    && bishop_colors.windows(2).all(|pair| pair[0] == pair[1])
            }
        }
    }

    pub fn is_threefold_repetition(&self) -> bool {
        self.position_count() >= 3
    }

    pub fn is_fifty_move_draw(&self) -> bool {
        self.halfmove_clock >= FIFTY_MOVE_HALFMOVES
    }

    pub fn is_draw(&mut self) -> bool {
        self.is_fifty_move_draw()
            || self.is_stalemate()
            || self.is_insufficient_material()
            || self.is_threefold_repetition()
    }

    pub fn is_game_over(&mut self) -> bool {
        self.is_checkmate() || self.is_stalemate() || self.is_draw()
    }
}

#[inline]
fn square_color_of(square: Square) -> SquareColor {
    if (file_of(square) + rank_of(square)) % 2 == 0 {
        SquareColor::Dark
    } else {
        SquareColor::Light
    }
}
