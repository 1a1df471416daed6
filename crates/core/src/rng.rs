//! Deterministic RNG for world generation.
//!
//! A 32-bit LCG (`a = 1664525`, `c = 1013904223`, `m = 2^32`) seeded per world
//! cell by [`cell_seed`] keeps the star field reproducible across runs and
//! platforms without storing it.

const MUL: u32 = 1_664_525;
const INC: u32 = 1_013_904_223;

#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Seed `0` is remapped to `1`.
    pub fn new(seed: u32) -> Self {
        Self { state: seed.max(1) }
    }

    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(MUL).wrapping_add(INC);
        self.state
    }

    /// Uniform value in `[0, max)`; `0` when `max` is `0`.
    pub fn next_range(&mut self, max: u32) -> u32 {
        // Scale by the high bits: the low bits of an LCG cycle quickly.
        ((u64::from(self.next_u32()) * u64::from(max)) >> 32) as u32
    }
}

/// Seed for one world cell, mixed from `(seed, x, y)` so neighbouring cells
/// are uncorrelated.
pub fn cell_seed(seed: u32, x: i32, y: i32) -> u32 {
    let mut h = seed ^ (x as u32).wrapping_mul(0x9E37_79B1) ^ (y as u32).wrapping_mul(0x85EB_CA77);
    h ^= h >> 16;
    h = h.wrapping_mul(0x7FEB_352D);
    h ^= h >> 15;
    h = h.wrapping_mul(0x846C_A68B);
    h ^ (h >> 16)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_sequence() {
        let mut a = SimpleRng::new(12345);
        let mut b = SimpleRng::new(12345);
        for _ in 0..100 {
            assert_eq!(a.next_u32(), b.next_u32());
        }
        assert_ne!(SimpleRng::new(1).next_u32(), SimpleRng::new(2).next_u32());
    }

    #[test]
    fn zero_seed_behaves_like_one() {
        let mut zero = SimpleRng::new(0);
        let mut one = SimpleRng::new(1);
        assert_eq!(zero.next_u32(), one.next_u32());
        assert_ne!(zero.next_u32(), zero.next_u32());
    }

    #[test]
    fn ranges_stay_in_bounds() {
        let mut rng = SimpleRng::new(7);
        for _ in 0..1000 {
            assert!(rng.next_range(3) < 3);
        }
        assert_eq!(rng.next_range(0), 0);
    }

    #[test]
    fn cell_seeds_differ_between_neighbours() {
        let a = cell_seed(1, 10, 10);
        assert_eq!(a, cell_seed(1, 10, 10));
        assert_ne!(a, cell_seed(1, 11, 10));
        assert_ne!(a, cell_seed(1, 10, 11));
        assert_ne!(a, cell_seed(2, 10, 10));
        assert_ne!(cell_seed(1, 3, 5), cell_seed(1, 5, 3));
    }
}
