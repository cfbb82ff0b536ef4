use crate::game_state::chess_rules::{king_home, rook_home};
use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_checks::is_square_attacked;
use crate::move_generation::legal_move_shared::{build_move, generate_step_moves};
use crate::moves::move_descriptions::{Move, FLAG_KSIDE_CASTLE, FLAG_QSIDE_CASTLE};

pub fn generate_king_moves(game_state: &GameState, from: Square, out: &mut Vec<Move>) {
    generate_step_moves(game_state, from, PieceKind::King, out);
    generate_castling_moves(game_state, from, out);
}

fn generate_castling_moves(game_state: &GameState, king_from: Square, out: &mut Vec<Move>) {
    let side = game_state.side_to_move;
    let enemy = side.opposite();
    let rights = game_state.castling[side.index()];

    if rights == 0 || king_from != king_home(side) {
        return;
    }

    // Cannot castle out of check.
    if is_square_attacked(game_state, king_from, enemy) {
        return;
    }

    let rook = Piece::new(side, PieceKind::Rook);
    for (castle_side, direction, flag) in [
        (CastleSide::Kingside, 1i16, FLAG_KSIDE_CASTLE),
        (CastleSide::Queenside, -1i16, FLAG_QSIDE_CASTLE),
    ] {
        if rights & castle_side.right() == 0 {
            continue;
        }
        let rook_from = rook_home(side, castle_side);
        if game_state.board[rook_from as usize] != Some(rook) {
            continue;
        }

        // Every square strictly between king and rook must be empty.
        let mut between = i16::from(king_from) + direction;
        let mut blocked = false;
        while between != i16::from(rook_from) {
            if game_state.board[between as usize].is_some() {
                blocked = true;
                break;
            }
            between += direction;
        }
        if blocked {
            continue;
        }

        // Transit and destination squares must not be attacked.
        let transit = (i16::from(king_from) + direction) as Square;
        let destination = (i16::from(king_from) + 2 * direction) as Square;
        if is_square_attacked(game_state, transit, enemy)
            || is_square_attacked(game_state, destination, enemy)
        {
            continue;
        }

        out.push(build_move(game_state, king_from, destination, PieceKind::King, flag));
    }
}

#[cfg(test)]
mod tests {
    use super::generate_king_moves;
    use crate::game_state::chess_types::GameState;
    use crate::moves::move_descriptions::Move;

    fn king_lans(fen: &str) -> Vec<String> {
        let game = GameState::from_fen(fen).expect("FEN should parse");
        let from = game
            .king_square(game.turn())
            .expect("side to move should have a king");
        let mut out = Vec::<Move>::new();
        generate_king_moves(&game, from, &mut out);
        out.iter().map(Move::to_lan).collect()
    }

    #[test]
    fn castles_both_ways_on_open_back_rank() {
        let lans = king_lans("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
        assert!(lans.contains(&"e1g1".to_owned()));
        assert!(lans.contains(&"e1c1".to_owned()));
    }

    #[test]
    fn no_castling_through_attacked_transit_square() {
        // Black rook on f8 covers f1.
        let lans = king_lans("5r1k/8/8/8/8/8/8/R3K2R w KQ - 0 1");
        assert!(!lans.contains(&"e1g1".to_owned()));
        assert!(lans.contains(&"e1c1".to_owned()));
    }

    #[test]
    fn queenside_b_file_may_be_attacked_but_not_occupied() {
        // b1 attacked by the rook on b8: still allowed.
        let lans = king_lans("1r5k/8/8/8/8/8/8/R3K3 w Q - 0 1");
        assert!(lans.contains(&"e1c1".to_owned()));

        let lans = king_lans("7k/8/8/8/8/8/8/RN2K3 w Q - 0 1");
        assert!(!lans.contains(&"e1c1".to_owned()));
    }

    #[test]
    fn no_castling_out_of_check() {
        let lans = king_lans("4r2k/8/8/8/8/8/8/R3K2R w KQ - 0 1");
        assert!(!lans.iter().any(|lan| lan == "e1g1" || lan == "e1c1"));
    }
}
