//! RNG oracle for deterministic random number generation.
//!
//! Every roll in combat, sieges and AI probing is derived from a seed built
//! out of the game seed and a monotonically increasing roll nonce, so a turn
//! replays identically from the same starting state.

/// RNG oracle for deterministic random number generation.
///
/// Implementations must be deterministic and produce the same values
/// given the same seed.
pub trait RngOracle: Send + Sync {
    /// Generate a random u32 value from a seed.
    fn next_u32(&self, seed: u64) -> u32;

    /// Roll a d100 (1-100 inclusive).
    fn roll_d100(&self, seed: u64) -> u32 {
        (self.next_u32(seed) % 100) + 1
    }

    /// Pick an index in `0..len`. `len` must be non-zero.
    fn pick(&self, seed: u64, len: usize) -> usize {
        (self.next_u32(seed) as usize) % len.max(1)
    }

    /// Generate a random value in range [min, max] inclusive.
    fn range(&self, seed: u64, min: i32, max: i32) -> i32 {
        if min >= max {
            return min;
        }
        let span = (max - min) as u32 + 1;
        min + (self.next_u32(seed) % span) as i32
    }
}

/// PCG random number generator (PCG-XSH-RR, 64-bit state, 32-bit output).
#[derive(Clone, Copy, Debug, Default)]
pub struct PcgRng;

impl PcgRng {
    const MULTIPLIER: u64 = 6364136223846793005;
    const INCREMENT: u64 = 1442695040888963407;

    #[inline]
    fn pcg_step(state: u64) -> u64 {
        state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
    }

    #[inline]
    fn pcg_output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }
}

impl RngOracle for PcgRng {
    fn next_u32(&self, seed: u64) -> u32 {
        Self::pcg_output(Self::pcg_step(seed))
    }
}

/// Compute a deterministic seed from game state components.
///
/// * `game_seed` - base seed set when the galaxy was created
/// * `nonce` - roll sequence number, bumped on every roll
/// * `actor` - id of the ship, fleet or realm causing the roll
/// * `context` - distinguishes several rolls made for the same effect
pub fn compute_seed(game_seed: u64, nonce: u64, actor: u32, context: u32) -> u64 {
    let mut hash = game_seed;
    hash ^= nonce.wrapping_mul(0x9e3779b97f4a7c15);
    hash ^= (actor as u64).wrapping_mul(0x517cc1b727220a95);
    hash ^= (context as u64).wrapping_mul(0x85ebca6b);

    hash ^= hash >> 33;
    hash = hash.wrapping_mul(0xff51afd7ed558ccd);
    hash ^= hash >> 33;

    hash
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pcg_is_deterministic() {
        let rng = PcgRng;
        assert_eq!(rng.next_u32(42), rng.next_u32(42));
        assert_ne!(compute_seed(1, 1, 7, 0), compute_seed(1, 2, 7, 0));
    }

    #[test]
    fn d100_stays_in_bounds() {
        let rng = PcgRng;
        for seed in 0..1_000u64 {
            let roll = rng.roll_d100(compute_seed(9, seed, 3, 1));
            assert!((1..=100).contains(&roll));
        }
    }

    #[test]
    fn range_is_inclusive() {
        let rng = PcgRng;
        for seed in 0..500u64 {
            let value = rng.range(seed, -5, 5);
            assert!((-5..=5).contains(&value));
        }
        assert_eq!(rng.range(0, 3, 3), 3);
    }
}
