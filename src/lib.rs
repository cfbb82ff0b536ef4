//! Crate root module declarations for the chess rules core.
//!
//! Exposes the board model, move generation and legality, game-end
//! classification, notation codecs (FEN, SAN, coordinate moves, PGN) and the
//! built-in search bot under stable module paths.

pub mod chess_errors;

pub mod game_state {
    pub mod chess_rules;
    pub mod chess_types;
    pub mod game_end;
    pub mod game_history;
    pub mod game_state;
    pub mod undo_state;
}

pub mod moves {
    pub mod attack_tables;
    pub mod move_descriptions;
    pub mod move_input;
}

pub mod move_generation {
    pub mod legal_move_apply;
    pub mod legal_move_checks;
    pub mod legal_move_generator;
    pub mod legal_move_shared;
    pub mod legal_moves_bishop;
    pub mod legal_moves_king;
    pub mod legal_moves_knight;
    pub mod legal_moves_pawn;
    pub mod legal_moves_queen;
    pub mod legal_moves_rook;
    pub mod move_generator;
    pub mod perft;
}

pub mod search {
    pub mod board_scoring;
    pub mod iterative_deepening;
    pub mod move_ordering;
}

pub mod tables {
    pub mod opening_book;
}

pub mod engines {
    pub mod engine_bot;
    pub mod engine_trait;
}

pub mod utils {
    pub mod algebraic;
    pub mod fen_generator;
    pub mod fen_parser;
    pub mod long_algebraic;
    pub mod pgn;
    pub mod render_game_state;
    pub mod san;
}

pub use chess_errors::{ChessError, ChessResult};
pub use game_state::chess_types::{CastleSide, Color, GameState, Piece, PieceKind};
pub use moves::move_descriptions::{Move, MoveRecord};
