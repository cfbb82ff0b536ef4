//! Read-only views over the moves played since the position was loaded.

use crate::game_state::chess_types::*;
use crate::moves::move_descriptions::{Move, MoveRecord};
use crate::utils::san::move_to_san;

impl GameState {
    /// Played moves, oldest first, with their SAN and surrounding FENs.
    pub fn history(&self) -> Vec<MoveRecord> {
        let mut replay = self.clone();
        let moves = rewind(&mut replay);

        let mut out = Vec::with_capacity(moves.len());
        for mv in moves {
            let san = move_to_san(&mut replay, &mv);
            let before = replay.get_fen();
            replay.make_move(mv);
            out.push(MoveRecord {
                mv,
                san,
                lan: mv.to_lan(),
                before,
                after: replay.get_fen(),
            });
        }
        out
    }

    /// SAN of every played move, oldest first.
    pub fn history_san(&self) -> Vec<String> {
        self.history().into_iter().map(|record| record.san).collect()
    }

    /// FEN of the loaded position followed by the FEN after each move.
    pub(crate) fn game_fens(&self) -> Vec<String> {
        let mut replay = self.clone();
        let moves = rewind(&mut replay);

        let mut fens = Vec::with_capacity(moves.len() + 1);
        fens.push(replay.get_fen());
        for mv in moves {
            replay.make_move(mv);
            fens.push(replay.get_fen());
        }
        fens
    }

    /// Position the game was loaded from.
    pub fn initial_fen(&self) -> String {
        let mut replay = self.clone();
        rewind(&mut replay);
        replay.get_fen()
    }
}

/// Undo every move on `game_state`, returning them oldest first.
fn rewind(game_state: &mut GameState) -> Vec<Move> {
    let mut moves = Vec::with_capacity(game_state.undo_stack.len());
    while let Some(mv) = game_state.unmake_move() {
        moves.push(mv);
    }
    moves.reverse();
    moves
}

#[cfg(test)]
mod tests {
    use crate::game_state::chess_rules::STARTING_POSITION_FEN;
    use crate::game_state::chess_types::GameState;

    #[test]
    fn history_lists_moves_oldest_first() {
        let mut game = GameState::new_game();
        for san in ["e4", "e5", "Nf3", "Nc6", "Bb5"] {
            game.play(san).expect("move should be legal");
        }
        let fen = game.get_fen();

        assert_eq!(game.history_san(), vec!["e4", "e5", "Nf3", "Nc6", "Bb5"]);
        let history = game.history();
        assert_eq!(history[0].before, STARTING_POSITION_FEN);
        assert_eq!(history[4].after, fen);
        assert_eq!(history[1].lan, "e7e5");
        assert_eq!(game.get_fen(), fen);
        assert_eq!(game.initial_fen(), STARTING_POSITION_FEN);
    }

    #[test]
    fn comments_follow_the_game_line() {
        let mut game = GameState::new_game();
        game.set_comment("start {here}");
        game.play("d4").expect("move should be legal");
        game.set_comment("queen pawn");
        game.play("d5").expect("move should be legal");
        game.set_comment("symmetry");

        let comments = game.comments();
        assert_eq!(comments.len(), 3);
        assert_eq!(comments[0], (STARTING_POSITION_FEN.to_owned(), "start [here]".to_owned()));
        assert_eq!(comments[2].1, "symmetry");

        game.undo_move().expect("undo should succeed");
        let comments = game.comments();
        assert_eq!(comments.len(), 2);
        assert_eq!(game.comment(), Some("queen pawn"));
        assert_eq!(game.remove_comment(), Some("queen pawn".to_owned()));
        assert_eq!(game.comment(), None);
    }
}
