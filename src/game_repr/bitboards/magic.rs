use std::time::Instant;

use log::debug;
use once_cell::sync::Lazy;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::tables::{DIRECTION_STEPS, EAST, NORTH, NORTH_EAST, NORTH_WEST, SOUTH, SOUTH_EAST, SOUTH_WEST, WEST};

// Fancy magic bitboards. Magics are searched once at startup from a fixed
// seed, so every run builds identical tables.

const MAGIC_SEED: u64 = 0x5EED_0F_B17B0A4D;

const ROOK_DIRECTIONS: [usize; 4] = [NORTH, EAST, SOUTH, WEST];
const BISHOP_DIRECTIONS: [usize; 4] = [NORTH_EAST, SOUTH_EAST, SOUTH_WEST, NORTH_WEST];

/// Per-square magic entry
#[derive(Clone, Copy, Debug, Default)]
struct Magic {
    /// Relevant blockers (slider reach without board edges)
    mask: u64,
    magic: u64,
    /// Number of bits in `mask`; the index is the top `bits` bits of the product
    bits: u32,
    /// Start of this square's slice in the shared attack table
    offset: usize,
}

impl Magic {
    #[inline(always)]
    fn index(&self, occupied: u64) -> usize {
        let product = (occupied & self.mask).wrapping_mul(self.magic);
        self.offset + (product >> (64 - self.bits)) as usize
    }
}

struct SliderTable {
    magics: [Magic; 64],
    attacks: Vec<u64>,
}

impl SliderTable {
    #[inline(always)]
    fn attacks(&self, square: usize, occupied: u64) -> u64 {
        let magic = &self.magics[square];
        self.attacks[magic.index(occupied)]
    }
}

struct MagicTables {
    rook: SliderTable,
    bishop: SliderTable,
}

static MAGICS: Lazy<MagicTables> = Lazy::new(|| {
    let start = Instant::now();
    let mut rng = StdRng::seed_from_u64(MAGIC_SEED);
    let rook = build_slider_table(&ROOK_DIRECTIONS, &mut rng);
    let bishop = build_slider_table(&BISHOP_DIRECTIONS, &mut rng);
    debug!(
        "magic tables ready in {:?} (rook entries: {}, bishop entries: {})",
        start.elapsed(),
        rook.attacks.len(),
        bishop.attacks.len()
    );
    MagicTables { rook, bishop }
});

/// Force table construction. Called by the engine before the first search so
/// the cost is not paid inside a timed `go`.
pub fn init_magics() {
    Lazy::force(&MAGICS);
}

/// Rook attacks from `square` given the full board occupancy
#[inline(always)]
pub fn rook_attacks(square: usize, occupied: u64) -> u64 {
    MAGICS.rook.attacks(square, occupied)
}

/// Bishop attacks from `square` given the full board occupancy
#[inline(always)]
pub fn bishop_attacks(square: usize, occupied: u64) -> u64 {
    MAGICS.bishop.attacks(square, occupied)
}

#[inline(always)]
pub fn queen_attacks(square: usize, occupied: u64) -> u64 {
    rook_attacks(square, occupied) | bishop_attacks(square, occupied)
}

/// Attacks by walking each ray until the first blocker (inclusive)
pub fn sliding_attacks(square: usize, occupied: u64, directions: &[usize]) -> u64 {
    let mut attacks = 0u64;
    for &dir in directions {
        let (dr, df) = DIRECTION_STEPS[dir];
        let mut r = (square / 8) as i8 + dr;
        let mut f = (square % 8) as i8 + df;
        while (0..8).contains(&r) && (0..8).contains(&f) {
            let bit = 1u64 << (r * 8 + f);
            attacks |= bit;
            if occupied & bit != 0 {
                break;
            }
            r += dr;
            f += df;
        }
    }
    attacks
}

/// Empty-board reach with the last square of each ray dropped. Those squares
/// never change the attack set, so they stay out of the index.
fn relevant_mask(square: usize, directions: &[usize]) -> u64 {
    let mut mask = 0u64;
    for &dir in directions {
        let (dr, df) = DIRECTION_STEPS[dir];
        let mut r = (square / 8) as i8 + dr;
        let mut f = (square % 8) as i8 + df;
        while (0..8).contains(&(r + dr)) && (0..8).contains(&(f + df)) {
            mask |= 1u64 << (r * 8 + f);
            r += dr;
            f += df;
        }
    }
    mask
}

fn build_slider_table(directions: &[usize], rng: &mut StdRng) -> SliderTable {
    let mut magics = [Magic::default(); 64];
    let mut attacks = Vec::new();

    let mut occupancy = vec![0u64; 4096];
    let mut reference = vec![0u64; 4096];
    let mut epoch = vec![0u32; 4096];
    let mut used = vec![0u64; 4096];
    let mut attempt = 0u32;

    for (square, entry) in magics.iter_mut().enumerate() {
        let mask = relevant_mask(square, directions);
        let bits = mask.count_ones();

        // Carry-Rippler enumeration of every subset of the mask
        let mut size = 0usize;
        let mut subset = 0u64;
        loop {
            occupancy[size] = subset;
            reference[size] = sliding_attacks(square, subset, directions);
            size += 1;
            subset = subset.wrapping_sub(mask) & mask;
            if subset == 0 {
                break;
            }
        }

        let magic = loop {
            let candidate = sparse_random(rng);
            if (mask.wrapping_mul(candidate) & 0xFF00_0000_0000_0000).count_ones() < 6 {
                continue;
            }

            // A good magic maps every occupancy to a slot holding the right
            // attack set. `epoch` marks slots written by this attempt.
            attempt += 1;
            let mut ok = true;
            for i in 0..size {
                let idx = ((occupancy[i] & mask).wrapping_mul(candidate) >> (64 - bits)) as usize;
                if epoch[idx] < attempt {
                    epoch[idx] = attempt;
                    used[idx] = reference[i];
                } else if used[idx] != reference[i] {
                    ok = false;
                    break;
                }
            }
            if ok {
                break candidate;
            }
        };

        *entry = Magic {
            mask,
            magic,
            bits,
            offset: attacks.len(),
        };
        attacks.resize(attacks.len() + (1usize << bits), 0);
        for i in 0..size {
            let idx = entry.index(occupancy[i]);
            attacks[idx] = reference[i];
        }
    }

    SliderTable { magics, attacks }
}

/// Candidates with few set bits make good magics far more often
fn sparse_random(rng: &mut StdRng) -> u64 {
    rng.gen::<u64>() & rng.gen::<u64>() & rng.gen::<u64>()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rook_attacks_match_ray_walk() {
        let occupancies = [
            0u64,
            0x0000_0010_0800_0000,
            0xFFFF_0000_0000_FFFF,
            0x0042_0000_2400_1800,
        ];
        for sq in 0..64 {
            for &occ in &occupancies {
                assert_eq!(
                    rook_attacks(sq, occ),
                    sliding_attacks(sq, occ, &ROOK_DIRECTIONS),
                    "rook mismatch on square {} occupancy {:#x}",
                    sq,
                    occ
                );
            }
        }
    }

    #[test]
    fn test_bishop_attacks_match_ray_walk() {
        let occupancies = [0u64, 0x0000_2400_0042_0000, 0x00FF_0000_0000_FF00];
        for sq in 0..64 {
            for &occ in &occupancies {
                assert_eq!(
                    bishop_attacks(sq, occ),
                    sliding_attacks(sq, occ, &BISHOP_DIRECTIONS),
                    "bishop mismatch on square {} occupancy {:#x}",
                    sq,
                    occ
                );
            }
        }
    }

    #[test]
    fn test_rook_on_a1_with_blockers() {
        // Rook a1, blockers on a4 and d1
        let occ = (1u64 << 24) | (1u64 << 3);
        let expected = (1u64 << 8) | (1u64 << 16) | (1u64 << 24) | (1u64 << 1) | (1u64 << 2) | (1u64 << 3);
        assert_eq!(rook_attacks(0, occ), expected);
    }

    #[test]
    fn test_table_sizes_are_bounded() {
        for sq in 0..64 {
            assert!(relevant_mask(sq, &ROOK_DIRECTIONS).count_ones() <= 12);
            assert!(relevant_mask(sq, &BISHOP_DIRECTIONS).count_ones() <= 9);
        }
        assert_eq!(relevant_mask(0, &ROOK_DIRECTIONS).count_ones(), 12);
        assert_eq!(relevant_mask(27, &BISHOP_DIRECTIONS).count_ones(), 9);
    }

    #[test]
    fn test_queen_is_union() {
        let occ = 0x0000_1000_0000_0400u64;
        assert_eq!(queen_attacks(27, occ), rook_attacks(27, occ) | bishop_attacks(27, occ));
    }
}
