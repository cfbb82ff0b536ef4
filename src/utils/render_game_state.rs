//! Text board renderer.
//!
//! Produces a framed 8x8 diagram, rank 8 at the top, for debugging, tests
//! and terminal front ends.

use crate::game_state::chess_types::*;

/// Which characters to draw pieces with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BoardGlyphs {
    /// FEN letters, `.` for empty squares.
    #[default]
    Ascii,
    /// Unicode chess symbols, `·` for empty squares.
    Unicode,
}

/// Render the board with FEN letters.
pub fn render_game_state(game_state: &GameState) -> String {
    render_game_state_with(game_state, BoardGlyphs::Ascii)
}

pub fn render_game_state_with(game_state: &GameState, glyphs: BoardGlyphs) -> String {
    let mut out = String::new();

    out.push_str("   +------------------------+\n");

    for rank in (0..8u8).rev() {
        out.push(' ');
        out.push(char::from(b'1' + rank));
        out.push_str(" |");

        for file in 0..8u8 {
            let ch = match game_state.board[square_at(file, rank) as usize] {
                Some(piece) => piece_glyph(piece, glyphs),
                None => empty_glyph(glyphs),
            };
            out.push(' ');
            out.push(ch);
            out.push(' ');
        }

        out.push_str("|\n");
    }

    out.push_str("   +------------------------+\n");
    out.push_str("     a  b  c  d  e  f  g  h");

    out
}

fn empty_glyph(glyphs: BoardGlyphs) -> char {
    match glyphs {
        BoardGlyphs::Ascii => '.',
        BoardGlyphs::Unicode => '·',
    }
}

fn piece_glyph(piece: Piece, glyphs: BoardGlyphs) -> char {
    match glyphs {
        BoardGlyphs::Ascii => piece.fen_char(),
        BoardGlyphs::Unicode => piece_to_unicode(piece.color, piece.kind),
    }
}

fn piece_to_unicode(color: Color, piece: PieceKind) -> char {
    match (color, piece) {
        (Color::White, PieceKind::Pawn) => '♙',
        (Color::White, PieceKind::Knight) => '♘',
        (Color::White, PieceKind::Bishop) => '♗',
        (Color::White, PieceKind::Rook) => '♖',
        (Color::White, PieceKind::Queen) => '♕',
        (Color::White, PieceKind::King) => '♔',
        (Color::Black, PieceKind::Pawn) => '♟',
        (Color::Black, PieceKind::Knight) => '♞',
        (Color::Black, PieceKind::Bishop) => '♝',
        (Color::Black, PieceKind::Rook) => '♜',
        (Color::Black, PieceKind::Queen) => '♛',
        (Color::Black, PieceKind::King) => '♚',
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii_render_has_frame_and_fen_letters() {
        let game = GameState::new_game();
        let text = game.ascii();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 11);
        assert_eq!(lines[1], " 8 | r  n  b  q  k  b  n  r |");
        assert_eq!(lines[5], " 4 | .  .  .  .  .  .  .  . |");
        assert_eq!(lines[8], " 1 | R  N  B  Q  K  B  N  R |");
        assert_eq!(lines[10], "     a  b  c  d  e  f  g  h");
    }

    #[test]
    fn unicode_render_uses_chess_symbols() {
        let game = GameState::from_fen("4k3/8/8/8/8/8/8/4K3 w - - 0 1").expect("FEN should parse");
        let text = render_game_state_with(&game, BoardGlyphs::Unicode);
        assert!(text.contains('♔'));
        assert!(text.contains('♚'));
        assert!(!text.contains('K'));
    }
}
