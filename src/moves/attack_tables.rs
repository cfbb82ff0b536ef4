//! Piece step offsets and the 0x88 attack/ray tables.
//!
//! For two on-board squares the difference `target - attacker` uniquely
//! identifies both direction and distance, so a single lookup tells whether
//! a piece type could ever attack that square and, for sliders, which step
//! walks the ray between them.

use crate::game_state::chess_types::PieceKind;

pub const KNIGHT_OFFSETS: [i16; 8] = [-33, -31, -18, -14, 14, 18, 31, 33];
pub const KING_OFFSETS: [i16; 8] = [-17, -16, -15, -1, 1, 15, 16, 17];
pub const BISHOP_OFFSETS: [i16; 4] = [-17, -15, 15, 17];
pub const ROOK_OFFSETS: [i16; 4] = [-16, -1, 1, 16];

const MASK_PAWN: u8 = 1 << 0;
const MASK_KNIGHT: u8 = 1 << 1;
const MASK_BISHOP: u8 = 1 << 2;
const MASK_ROOK: u8 = 1 << 3;
const MASK_QUEEN: u8 = 1 << 4;
const MASK_KING: u8 = 1 << 5;

const TABLE_CENTER: i16 = 119;
const TABLE_SIZE: usize = 240;

struct AttackTables {
    attacks: [u8; TABLE_SIZE],
    rays: [i8; TABLE_SIZE],
}

const fn is_diagonal(step: i16) -> bool {
    step == 15 || step == -15 || step == 17 || step == -17
}

const fn build_tables() -> AttackTables {
    let mut attacks = [0u8; TABLE_SIZE];
    let mut rays = [0i8; TABLE_SIZE];

    let mut i = 0;
    while i < 8 {
        attacks[(KNIGHT_OFFSETS[i] + TABLE_CENTER) as usize] |= MASK_KNIGHT;
        attacks[(KING_OFFSETS[i] + TABLE_CENTER) as usize] |= MASK_KING;

        let step = KING_OFFSETS[i];
        let slider_mask = if is_diagonal(step) {
            MASK_BISHOP | MASK_QUEEN
        } else {
            MASK_ROOK | MASK_QUEEN
        };
        if is_diagonal(step) {
            attacks[(step + TABLE_CENTER) as usize] |= MASK_PAWN;
        }

        let mut distance = 1;
        while distance < 8 {
            let idx = (step * distance + TABLE_CENTER) as usize;
            attacks[idx] |= slider_mask;
            rays[idx] = step as i8;
            distance += 1;
        }
        i += 1;
    }

    AttackTables { attacks, rays }
}

static TABLES: AttackTables = build_tables();

#[inline]
const fn piece_mask(kind: PieceKind) -> u8 {
    match kind {
        PieceKind::Pawn => MASK_PAWN,
        PieceKind::Knight => MASK_KNIGHT,
        PieceKind::Bishop => MASK_BISHOP,
        PieceKind::Rook => MASK_ROOK,
        PieceKind::Queen => MASK_QUEEN,
        PieceKind::King => MASK_KING,
    }
}

/// Whether a piece of `kind` could reach a square `diff` steps away on an
/// empty board. Pawn direction is not checked here.
#[inline]
pub fn can_attack_by_geometry(kind: PieceKind, diff: i16) -> bool {
    if diff == 0 || diff.abs() > TABLE_CENTER {
        return false;
    }
    TABLES.attacks[(diff + TABLE_CENTER) as usize] & piece_mask(kind) != 0
}

/// Unit step along the ray covering `diff`, or 0 when none exists.
#[inline]
pub fn ray_step(diff: i16) -> i16 {
    if diff == 0 || diff.abs() > TABLE_CENTER {
        return 0;
    }
    i16::from(TABLES.rays[(diff + TABLE_CENTER) as usize])
}

/// Step offsets for a non-pawn piece.
pub fn piece_offsets(kind: PieceKind) -> &'static [i16] {
    match kind {
        PieceKind::Knight => &KNIGHT_OFFSETS,
        PieceKind::Bishop => &BISHOP_OFFSETS,
        PieceKind::Rook => &ROOK_OFFSETS,
        PieceKind::Queen | PieceKind::King => &KING_OFFSETS,
        PieceKind::Pawn => &[],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn knight_geometry_excludes_slider_lines() {
        assert!(can_attack_by_geometry(PieceKind::Knight, 33));
        assert!(can_attack_by_geometry(PieceKind::Knight, -14));
        assert!(!can_attack_by_geometry(PieceKind::Knight, 16));
        assert_eq!(ray_step(33), 0);
    }

    #[test]
    fn slider_rays_point_from_attacker_to_target() {
        // a1 -> h8
        assert!(can_attack_by_geometry(PieceKind::Bishop, 119));
        assert_eq!(ray_step(119), 17);
        // h1 -> a1
        assert!(can_attack_by_geometry(PieceKind::Rook, -7));
        assert_eq!(ray_step(-7), -1);
        assert!(!can_attack_by_geometry(PieceKind::Rook, 17));
        assert!(can_attack_by_geometry(PieceKind::Queen, 17));
    }

    #[test]
    fn adjacent_diagonal_is_king_pawn_and_bishop() {
        for kind in [
            PieceKind::King,
            PieceKind::Pawn,
            PieceKind::Bishop,
            PieceKind::Queen,
        ] {
            assert!(can_attack_by_geometry(kind, 15), "{kind:?}");
        }
        assert!(!can_attack_by_geometry(PieceKind::Pawn, 16));
        assert!(!can_attack_by_geometry(PieceKind::King, 32));
    }
}
