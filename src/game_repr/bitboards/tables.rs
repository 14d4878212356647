// Attack, ray and mask tables. Everything here is evaluated at compile time
// and is read-only for the life of the process.

/// Precomputed knight attack tables
/// KNIGHT_ATTACKS[square] returns a bitboard of all squares a knight can attack from that square
pub static KNIGHT_ATTACKS: [u64; 64] = generate_step_attacks(&KNIGHT_STEPS);

/// Precomputed king attack tables
/// KING_ATTACKS[square] returns a bitboard of all squares a king can attack from that square
pub static KING_ATTACKS: [u64; 64] = generate_step_attacks(&KING_STEPS);

/// Precomputed pawn attack tables
/// PAWN_ATTACKS[color][square] returns a bitboard of squares a pawn can attack from that square.
///
/// Read the other way round the same table answers "which squares hold an enemy
/// pawn that attacks this square": an enemy pawn hits a white king on `sq`
/// exactly when it stands on `PAWN_ATTACKS[White][sq]`.
pub static PAWN_ATTACKS: [[u64; 64]; 2] = generate_pawn_attacks();

/// Single-step pawn push target, per color. Empty on the last rank.
pub static PAWN_PUSHES: [[u64; 64]; 2] = generate_pawn_pushes();

/// For a pawn on its starting rank, the two squares in front of it (both must
/// be empty for a double push). Zero for every other square.
pub static PAWN_DOUBLE_PATH: [[u64; 64]; 2] = generate_pawn_double_paths();

const KNIGHT_STEPS: [(i8, i8); 8] = [
    (2, 1),
    (2, -1),
    (1, 2),
    (1, -2),
    (-1, 2),
    (-1, -2),
    (-2, 1),
    (-2, -1),
];

const KING_STEPS: [(i8, i8); 8] = [
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
    (0, -1),
    (1, -1),
];

/// Generate a leaper table from (rank, file) offsets
const fn generate_step_attacks(steps: &[(i8, i8); 8]) -> [u64; 64] {
    let mut attacks = [0u64; 64];
    let mut sq = 0;

    while sq < 64 {
        let rank = (sq / 8) as i8;
        let file = (sq % 8) as i8;
        let mut attack = 0u64;

        let mut i = 0;
        while i < 8 {
            let (dr, df) = steps[i];
            let new_rank = rank + dr;
            let new_file = file + df;

            if new_rank >= 0 && new_rank < 8 && new_file >= 0 && new_file < 8 {
                attack |= 1u64 << (new_rank * 8 + new_file);
            }

            i += 1;
        }

        attacks[sq] = attack;
        sq += 1;
    }

    attacks
}

/// Index 0 = White, Index 1 = Black
const fn generate_pawn_attacks() -> [[u64; 64]; 2] {
    let mut attacks = [[0u64; 64]; 2];
    let mut sq = 0;

    while sq < 64 {
        let rank = sq / 8;
        let file = sq % 8;

        if rank < 7 {
            if file > 0 {
                attacks[0][sq] |= 1u64 << (sq + 7);
            }
            if file < 7 {
                attacks[0][sq] |= 1u64 << (sq + 9);
            }
        }
        if rank > 0 {
            if file > 0 {
                attacks[1][sq] |= 1u64 << (sq - 9);
            }
            if file < 7 {
                attacks[1][sq] |= 1u64 << (sq - 7);
            }
        }

        sq += 1;
    }

    attacks
}

const fn generate_pawn_pushes() -> [[u64; 64]; 2] {
    let mut pushes = [[0u64; 64]; 2];
    let mut sq = 0;

    while sq < 64 {
        if sq < 56 {
            pushes[0][sq] = 1u64 << (sq + 8);
        }
        if sq >= 8 {
            pushes[1][sq] = 1u64 << (sq - 8);
        }
        sq += 1;
    }

    pushes
}

const fn generate_pawn_double_paths() -> [[u64; 64]; 2] {
    let mut paths = [[0u64; 64]; 2];
    let mut file = 0;

    while file < 8 {
        let white = 8 + file;
        paths[0][white] = (1u64 << (white + 8)) | (1u64 << (white + 16));
        let black = 48 + file;
        paths[1][black] = (1u64 << (black - 8)) | (1u64 << (black - 16));
        file += 1;
    }

    paths
}

/// Ray tables for sliding pieces
/// RAYS[direction][square] returns a bitboard of all squares in that direction from the square
pub static RAYS: [[u64; 64]; 8] = RAY_TABLE;

const RAY_TABLE: [[u64; 64]; 8] = generate_rays();

// Direction indices
pub const NORTH: usize = 0;
pub const NORTH_EAST: usize = 1;
pub const EAST: usize = 2;
pub const SOUTH_EAST: usize = 3;
pub const SOUTH: usize = 4;
pub const SOUTH_WEST: usize = 5;
pub const WEST: usize = 6;
pub const NORTH_WEST: usize = 7;

/// (rank, file) step of each direction, in direction-index order
pub const DIRECTION_STEPS: [(i8, i8); 8] = [
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
    (0, -1),
    (1, -1),
];

/// Directions whose squares have increasing indices: the nearest blocker on
/// these rays is the lowest set bit, on the others it is the highest.
#[inline(always)]
pub const fn is_positive_direction(dir: usize) -> bool {
    matches!(dir, NORTH | NORTH_EAST | EAST | NORTH_WEST)
}

const fn generate_rays() -> [[u64; 64]; 8] {
    let mut rays = [[0u64; 64]; 8];
    let mut dir = 0;

    while dir < 8 {
        let (dr, df) = DIRECTION_STEPS[dir];
        let mut sq = 0;
        while sq < 64 {
            let mut r = (sq / 8) as i8 + dr;
            let mut f = (sq % 8) as i8 + df;
            while r >= 0 && r < 8 && f >= 0 && f < 8 {
                rays[dir][sq] |= 1u64 << (r * 8 + f);
                r += dr;
                f += df;
            }
            sq += 1;
        }
        dir += 1;
    }

    rays
}

/// Pin axes
pub const AXIS_VERTICAL: usize = 0;
pub const AXIS_HORIZONTAL: usize = 1;
/// Up-left to down-right (NW / SE)
pub const AXIS_ANTI_DIAGONAL: usize = 2;
/// Down-left to up-right (SW / NE)
pub const AXIS_DIAGONAL: usize = 3;

/// Axis a direction belongs to
pub const DIRECTION_AXIS: [usize; 8] = [
    AXIS_VERTICAL,
    AXIS_DIAGONAL,
    AXIS_HORIZONTAL,
    AXIS_ANTI_DIAGONAL,
    AXIS_VERTICAL,
    AXIS_DIAGONAL,
    AXIS_HORIZONTAL,
    AXIS_ANTI_DIAGONAL,
];

/// PIN_LINES[axis][square]: the full line through `square` along `axis`,
/// excluding the square itself. A piece pinned on that axis may only move here.
pub static PIN_LINES: [[u64; 64]; 4] = generate_pin_lines();

const fn generate_pin_lines() -> [[u64; 64]; 4] {
    let mut lines = [[0u64; 64]; 4];
    let mut sq = 0;

    while sq < 64 {
        lines[AXIS_VERTICAL][sq] = RAY_TABLE[NORTH][sq] | RAY_TABLE[SOUTH][sq];
        lines[AXIS_HORIZONTAL][sq] = RAY_TABLE[EAST][sq] | RAY_TABLE[WEST][sq];
        lines[AXIS_ANTI_DIAGONAL][sq] = RAY_TABLE[NORTH_WEST][sq] | RAY_TABLE[SOUTH_EAST][sq];
        lines[AXIS_DIAGONAL][sq] = RAY_TABLE[NORTH_EAST][sq] | RAY_TABLE[SOUTH_WEST][sq];
        sq += 1;
    }

    lines
}

/// BETWEEN[a][b]: squares strictly between two aligned squares, zero otherwise
pub static BETWEEN: [[u64; 64]; 64] = generate_between();

const fn generate_between() -> [[u64; 64]; 64] {
    let mut between = [[0u64; 64]; 64];
    let mut from = 0;

    while from < 64 {
        let mut dir = 0;
        while dir < 8 {
            let (dr, df) = DIRECTION_STEPS[dir];
            let mut r = (from / 8) as i8 + dr;
            let mut f = (from % 8) as i8 + df;
            let mut path = 0u64;
            while r >= 0 && r < 8 && f >= 0 && f < 8 {
                let to = (r * 8 + f) as usize;
                between[from][to] = path;
                path |= 1u64 << to;
                r += dr;
                f += df;
            }
            dir += 1;
        }
        from += 1;
    }

    between
}

// Castling. Index order matches the position's rights: WK, WQ, BK, BQ.

/// Squares between king and rook that must be empty
pub const CASTLE_CLEARANCE: [u64; 4] = [
    (1 << 5) | (1 << 6),
    (1 << 1) | (1 << 2) | (1 << 3),
    (1 << 61) | (1 << 62),
    (1 << 57) | (1 << 58) | (1 << 59),
];

/// Squares the king crosses or lands on; none may be attacked
pub const CASTLE_KING_PATH: [[usize; 2]; 4] = [[5, 6], [3, 2], [61, 62], [59, 58]];

/// (king from, king to, rook from, rook to)
pub const CASTLE_SQUARES: [(usize, usize, usize, usize); 4] = [
    (4, 6, 7, 5),
    (4, 2, 0, 3),
    (60, 62, 63, 61),
    (60, 58, 56, 59),
];

// Pawn structure masks

/// Files adjacent to a file
pub static ADJACENT_FILES: [u64; 8] = ADJACENT_TABLE;

const ADJACENT_TABLE: [u64; 8] = generate_adjacent_files();

const fn generate_adjacent_files() -> [u64; 8] {
    let mut masks = [0u64; 8];
    let mut file = 0;

    while file < 8 {
        if file > 0 {
            masks[file] |= super::file_mask(file - 1);
        }
        if file < 7 {
            masks[file] |= super::file_mask(file + 1);
        }
        file += 1;
    }

    masks
}

/// PASSED_PAWN_MASKS[color][square]: squares on the same and adjacent files
/// ahead of the pawn. A pawn is passed when no enemy pawn stands there.
pub static PASSED_PAWN_MASKS: [[u64; 64]; 2] = generate_passed_masks();

const fn generate_passed_masks() -> [[u64; 64]; 2] {
    let mut masks = [[0u64; 64]; 2];
    let mut sq = 0;

    while sq < 64 {
        let file = sq % 8;
        let span = super::file_mask(file) | ADJACENT_TABLE[file];
        let rank = sq / 8;
        // Ranks strictly above / below the pawn
        let above = if rank < 7 { !0u64 << ((rank + 1) * 8) } else { 0 };
        let below = if rank > 0 { !0u64 >> ((8 - rank) * 8) } else { 0 };
        masks[0][sq] = span & above;
        masks[1][sq] = span & below;
        sq += 1;
    }

    masks
}
