// Deterministic, portable pseudo-random number generator.
//
// Implements xoshiro256++ (Blackman & Vigna, 2019) with SplitMix64 seeding.
// Hand-rolled with zero external RNG dependencies so that a given seed yields
// the same composition on every platform.
//
// This crate is the single source of randomness for `cantus_compose`. Nothing
// in the composer reaches for a global or OS-seeded generator: every compose
// pass receives a `RandomSource` explicitly, so tests can substitute a
// recording or fixed-sequence source and assert exact results.
//
// Branch seeding (`branch_seed`, `CantusRng::for_path`) derives independent
// child streams from a parent seed plus a child index. Parallel composition
// gives each subtree its own stream this way, which keeps output identical
// no matter how rayon schedules the work.
//
// **Critical constraint: determinism.** Every method here must produce
// identical output given the same prior state, regardless of platform,
// compiler version, or optimization level. No floating point in the core
// generator.

use serde::{Deserialize, Serialize};

/// A source of uniformly distributed 64-bit values.
///
/// Only `next_u64` is required; the ranged helpers are provided on top of it.
/// `CantusRng` is the production implementation.
pub trait RandomSource {
    /// Generate the next `u64` in the sequence.
    fn next_u64(&mut self) -> u64;

    /// Generate a uniform random integer in `[low, high)`.
    ///
    /// Uses rejection sampling to avoid modulo bias.
    /// Panics if `low >= high`.
    fn range_u64(&mut self, low: u64, high: u64) -> u64 {
        assert!(low < high, "range_u64: low must be less than high");
        let range = high - low;
        if range.is_power_of_two() {
            return low + (self.next_u64() & (range - 1));
        }
        let threshold = range.wrapping_neg() % range; // = (2^64 - range) % range
        loop {
            let r = self.next_u64();
            if r >= threshold {
                return low + (r % range);
            }
        }
    }

    /// Generate a uniform random `u8` in `[low, high)`.
    ///
    /// Panics if `low >= high`.
    fn range_u8(&mut self, low: u8, high: u8) -> u8 {
        self.range_u64(low as u64, high as u64) as u8
    }

    /// Generate a uniform random `usize` in `[low, high)`.
    ///
    /// Panics if `low >= high`.
    fn range_usize(&mut self, low: usize, high: usize) -> usize {
        self.range_u64(low as u64, high as u64) as usize
    }
}

/// Xoshiro256++ PRNG.
///
/// Each compose pass (or each branch of a parallel pass) owns its own
/// `CantusRng`, seeded deterministically.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CantusRng {
    s: [u64; 4],
}

impl CantusRng {
    /// Create a new PRNG seeded from a `u64`.
    ///
    /// Uses SplitMix64 to expand the seed into the 256-bit internal state.
    pub fn new(seed: u64) -> Self {
        let mut sm = seed;
        Self {
            s: [
                splitmix64(&mut sm),
                splitmix64(&mut sm),
                splitmix64(&mut sm),
                splitmix64(&mut sm),
            ],
        }
    }

    /// Create the generator for the subtree reached by `path` from `root_seed`.
    ///
    /// Equivalent to folding `branch_seed` over the path and seeding from the
    /// result. An empty path yields `CantusRng::new(root_seed)`.
    pub fn for_path(root_seed: u64, path: &[u64]) -> Self {
        let seed = path
            .iter()
            .fold(root_seed, |seed, &index| branch_seed(seed, index));
        Self::new(seed)
    }

    /// Generate 16 random bytes (used for UUID v4 generation).
    pub fn next_128_bits(&mut self) -> [u8; 16] {
        let a = self.next_u64().to_le_bytes();
        let b = self.next_u64().to_le_bytes();
        let mut out = [0u8; 16];
        out[..8].copy_from_slice(&a);
        out[8..].copy_from_slice(&b);
        out
    }
}

impl RandomSource for CantusRng {
    fn next_u64(&mut self) -> u64 {
        let result = (self.s[0].wrapping_add(self.s[3]))
            .rotate_left(23)
            .wrapping_add(self.s[0]);

        let t = self.s[1] << 17;

        self.s[2] ^= self.s[0];
        self.s[3] ^= self.s[1];
        self.s[1] ^= self.s[2];
        self.s[0] ^= self.s[3];

        self.s[2] ^= t;
        self.s[3] = self.s[3].rotate_left(45);

        result
    }
}

/// Derive the seed for child `index` of a node seeded with `parent_seed`.
///
/// Distinct indices under the same parent always produce distinct seeds:
/// the index is spread by an odd multiplier, mixed into the parent's first
/// SplitMix64 output, and finalized by another SplitMix64 step. Every stage
/// is a bijection.
pub fn branch_seed(parent_seed: u64, index: u64) -> u64 {
    let mut sm = parent_seed;
    let mut mixed = splitmix64(&mut sm) ^ index.wrapping_mul(0xd6e8_feb8_6659_fd93);
    splitmix64(&mut mixed)
}

/// SplitMix64, used for seeding xoshiro256++ and for branch derivation.
fn splitmix64(state: &mut u64) -> u64 {
    *state = state.wrapping_add(0x9e37_79b9_7f4a_7c15);
    let mut z = *state;
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^ (z >> 31)
}
