//! Mutable board model.
//!
//! `GameState` owns piece placement on a padded 0x88 array, side to move,
//! per-color castling rights, the en-passant target, both move counters, a
//! king-location cache, the undo stack, the position-count table used for
//! repetition detection, and the PGN header/comment maps. Nothing here is
//! shared between instances: every game or search works on its own state.

use std::collections::HashMap;

use log::debug;

use crate::chess_errors::{ChessError, ChessResult};
use crate::game_state::chess_rules::{king_home, pawn_push, rook_home, STARTING_POSITION_FEN};
use crate::game_state::chess_types::*;
use crate::utils::algebraic::{algebraic_to_square, square_to_algebraic};
use crate::utils::fen_generator::{generate_fen, position_key};
use crate::utils::fen_parser::parse_fen;
use crate::utils::render_game_state::render_game_state;

/// Piece placement indexed by 0x88 square. Padding slots stay `None`.
pub type Board = [Option<Piece>; 128];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SquareColor {
    Light,
    Dark,
}

#[derive(Debug, Clone)]
pub struct GameState {
    pub(crate) board: Board,
    pub(crate) side_to_move: Color,
    pub(crate) castling: [CastlingRights; 2],
    pub(crate) en_passant: Option<Square>,
    pub(crate) halfmove_clock: u32,
    pub(crate) fullmove_number: u32,
    pub(crate) kings: [Option<Square>; 2],

    pub(crate) undo_stack: Vec<UndoState>,
    pub(crate) position_counts: HashMap<String, u32>,

    pub(crate) headers: Vec<(String, String)>,
    pub(crate) comments: HashMap<String, String>,
}

impl Default for GameState {
    fn default() -> Self {
        Self {
            board: [None; 128],
            side_to_move: Color::White,
            castling: [0; 2],
            en_passant: None,
            halfmove_clock: 0,
            fullmove_number: 1,
            kings: [None; 2],

            undo_stack: Vec::new(),
            position_counts: HashMap::new(),

            headers: Vec::new(),
            comments: HashMap::new(),
        }
    }
}

impl GameState {
    #[inline]
    pub fn new_game() -> Self {
        Self::from_fen(STARTING_POSITION_FEN).expect("starting FEN should always parse")
    }

    pub fn from_fen(fen: &str) -> ChessResult<Self> {
        let mut game = Self::default();
        game.load(fen)?;
        Ok(game)
    }

    /// Replace the whole position with `fen`. History, repetition counts,
    /// comments and headers are discarded.
    pub fn load(&mut self, fen: &str) -> ChessResult<()> {
        let parsed = parse_fen(fen)?;

        self.board = parsed.board;
        self.side_to_move = parsed.side_to_move;
        self.castling = parsed.castling;
        self.en_passant = parsed.en_passant;
        self.halfmove_clock = parsed.halfmove_clock;
        self.fullmove_number = parsed.fullmove_number;
        self.kings = [None; 2];
        for square in all_squares() {
            if let Some(piece) = self.board[square as usize] {
                if piece.kind == PieceKind::King {
                    self.kings[piece.color.index()] = Some(square);
                }
            }
        }

        self.update_en_passant();

        self.undo_stack.clear();
        self.position_counts.clear();
        self.comments.clear();
        self.headers.clear();
        self.record_position();
        self.update_setup();

        debug!("loaded position {}", self.get_fen());
        Ok(())
    }

    pub fn reset(&mut self) {
        *self = Self::new_game();
    }

    /// Empty board, white to move, no headers.
    pub fn clear(&mut self) {
        *self = Self::default();
        self.record_position();
        self.update_setup();
    }

    #[inline]
    pub fn get_fen(&self) -> String {
        generate_fen(self)
    }

    #[inline]
    pub fn turn(&self) -> Color {
        self.side_to_move
    }

    #[inline]
    pub fn move_number(&self) -> u32 {
        self.fullmove_number
    }

    #[inline]
    pub fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }

    /// En-passant target as stored, before the legality filter `get_fen` applies.
    #[inline]
    pub fn en_passant_square(&self) -> Option<Square> {
        self.en_passant
    }

    #[inline]
    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.kings[color.index()]
    }

    #[inline]
    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        if square & 0x88 != 0 {
            return None;
        }
        self.board[square as usize]
    }

    pub fn get(&self, square: &str) -> ChessResult<Option<Piece>> {
        Ok(self.piece_at(algebraic_to_square(square)?))
    }

    /// Place `piece` on `square`, replacing whatever stood there.
    pub fn put(&mut self, piece: Piece, square: &str) -> ChessResult<()> {
        let sq = algebraic_to_square(square)?;

        if piece.kind == PieceKind::King {
            if let Some(existing) = self.kings[piece.color.index()] {
                if existing != sq {
                    return Err(ChessError::DuplicateKing {
                        color: piece.color,
                        square: square_to_algebraic(existing),
                    });
                }
            }
        }

        if let Some(current) = self.board[sq as usize] {
            if current.kind == PieceKind::King {
                self.kings[current.color.index()] = None;
            }
        }

        self.board[sq as usize] = Some(piece);
        if piece.kind == PieceKind::King {
            self.kings[piece.color.index()] = Some(sq);
        }

        self.after_board_edit();
        Ok(())
    }

    pub fn remove(&mut self, square: &str) -> ChessResult<Option<Piece>> {
        let sq = algebraic_to_square(square)?;
        let removed = self.board[sq as usize].take();
        if let Some(piece) = removed {
            if piece.kind == PieceKind::King {
                self.kings[piece.color.index()] = None;
            }
            self.after_board_edit();
        }
        Ok(removed)
    }

    /// Rows from rank 8 down to rank 1, files a..h.
    pub fn board(&self) -> [[Option<Piece>; 8]; 8] {
        let mut rows = [[None; 8]; 8];
        for (row_idx, row) in rows.iter_mut().enumerate() {
            let rank = 7 - row_idx as u8;
            for (file, cell) in row.iter_mut().enumerate() {
                *cell = self.board[square_at(file as u8, rank) as usize];
            }
        }
        rows
    }

    pub fn find_piece(&self, piece: Piece) -> Vec<String> {
        all_squares()
            .filter(|sq| self.board[*sq as usize] == Some(piece))
            .map(square_to_algebraic)
            .collect()
    }

    pub fn square_color(square: &str) -> ChessResult<SquareColor> {
        let sq = algebraic_to_square(square)?;
        if (file_of(sq) + rank_of(sq)) % 2 == 0 {
            Ok(SquareColor::Dark)
        } else {
            Ok(SquareColor::Light)
        }
    }

    pub fn castling_rights(&self, color: Color) -> (bool, bool) {
        let rights = self.castling[color.index()];
        (
            rights & CASTLE_KINGSIDE != 0,
            rights & CASTLE_QUEENSIDE != 0,
        )
    }

    /// Grant or revoke castling rights. A right is only kept when king and
    /// rook still stand on their original squares; returns whether the
    /// resulting rights match the request.
    pub fn set_castling_rights(
        &mut self,
        color: Color,
        kingside: Option<bool>,
        queenside: Option<bool>,
    ) -> bool {
        for (request, side) in [
            (kingside, CastleSide::Kingside),
            (queenside, CastleSide::Queenside),
        ] {
            match request {
                Some(true) => self.castling[color.index()] |= side.right(),
                Some(false) => self.castling[color.index()] &= !side.right(),
                None => {}
            }
        }
        self.update_castling_rights();

        let (k, q) = self.castling_rights(color);
        kingside.map_or(true, |want| want == k) && queenside.map_or(true, |want| want == q)
    }

    pub fn ascii(&self) -> String {
        render_game_state(self)
    }

    // --- PGN headers -------------------------------------------------------

    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn set_header(&mut self, key: &str, value: &str) {
        match self.headers.iter_mut().find(|(k, _)| k == key) {
            Some(entry) => entry.1 = value.to_owned(),
            None => self.headers.push((key.to_owned(), value.to_owned())),
        }
    }

    pub fn remove_header(&mut self, key: &str) -> Option<String> {
        let idx = self.headers.iter().position(|(k, _)| k == key)?;
        Some(self.headers.remove(idx).1)
    }

    // --- Comments ----------------------------------------------------------

    pub fn comment(&self) -> Option<&str> {
        self.comments.get(&self.get_fen()).map(String::as_str)
    }

    pub fn set_comment(&mut self, comment: &str) {
        let fen = self.get_fen();
        self.comments
            .insert(fen, comment.replace('{', "[").replace('}', "]"));
    }

    pub fn remove_comment(&mut self) -> Option<String> {
        let fen = self.get_fen();
        self.comments.remove(&fen)
    }

    /// `(fen, comment)` pairs in game order. Comments on positions no longer
    /// part of the game (after an undo) are dropped.
    pub fn comments(&mut self) -> Vec<(String, String)> {
        let fens = self.game_fens();
        self.comments.retain(|fen, _| fens.contains(fen));
        fens.into_iter()
            .filter_map(|fen| self.comments.get(&fen).map(|c| (fen.clone(), c.clone())))
            .collect()
    }

    // --- Repetition bookkeeping ---------------------------------------------

    /// Normalized key (placement, turn, castling, en-passant) of the current position.
    #[inline]
    pub fn position_key(&self) -> String {
        position_key(self)
    }

    pub fn position_count(&self) -> u32 {
        self.position_counts
            .get(&self.position_key())
            .copied()
            .unwrap_or(0)
    }

    pub(crate) fn record_position(&mut self) {
        *self.position_counts.entry(self.position_key()).or_insert(0) += 1;
    }

    pub(crate) fn forget_position(&mut self) {
        let key = self.position_key();
        if let Some(count) = self.position_counts.get_mut(&key) {
            *count -= 1;
            if *count == 0 {
                self.position_counts.remove(&key);
            }
        }
    }

    // --- Internal consistency ------------------------------------------------

    fn after_board_edit(&mut self) {
        self.update_castling_rights();
        self.update_en_passant();
        self.update_setup();
    }

    /// Drop rights whose king or rook has left its original square.
    pub(crate) fn update_castling_rights(&mut self) {
        for color in [Color::White, Color::Black] {
            let king = Piece::new(color, PieceKind::King);
            if self.board[king_home(color) as usize] != Some(king) {
                self.castling[color.index()] = 0;
                continue;
            }
            let rook = Piece::new(color, PieceKind::Rook);
            for side in [CastleSide::Kingside, CastleSide::Queenside] {
                if self.board[rook_home(color, side) as usize] != Some(rook) {
                    self.castling[color.index()] &= !side.right();
                }
            }
        }
    }

    /// Clear an en-passant target that no longer matches a just-advanced
    /// enemy pawn with one of our pawns beside it.
    pub(crate) fn update_en_passant(&mut self) {
        let Some(ep) = self.en_passant else {
            return;
        };

        let us = self.side_to_move;
        let push = pawn_push(us);
        let start = offset_square(ep, push);
        let current = offset_square(ep, -push);

        let their_pawn = Piece::new(us.opposite(), PieceKind::Pawn);
        let consistent = match (start, current) {
            (Some(start), Some(current)) => {
                self.board[start as usize].is_none()
                    && self.board[ep as usize].is_none()
                    && self.board[current as usize] == Some(their_pawn)
            }
            _ => false,
        };

        let our_pawn = Piece::new(us, PieceKind::Pawn);
        let capturable = consistent
            && current.is_some_and(|current| {
                [-1i16, 1]
                    .into_iter()
                    .filter_map(|d| offset_square(current, d))
                    .any(|sq| self.board[sq as usize] == Some(our_pawn))
            });

        if !capturable {
            self.en_passant = None;
        }
    }

    /// `SetUp`/`FEN` headers track a non-standard start while no move is played.
    pub(crate) fn update_setup(&mut self) {
        if !self.undo_stack.is_empty() {
            return;
        }
        let fen = self.get_fen();
        if fen != STARTING_POSITION_FEN {
            self.set_header("SetUp", "1");
            self.set_header("FEN", &fen);
        } else {
            self.remove_header("SetUp");
            self.remove_header("FEN");
        }
    }
}
