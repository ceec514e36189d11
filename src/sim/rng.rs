//! Fast PRNG for match simulation. Uses SplitMix64 for throughput and good statistical quality.
//! Deterministic: same seed produces the same sequence. Not cryptographically secure.
//!
//! The engine draws through the bounded helpers below; their call order during a
//! simulation is fixed, which is what makes a seeded match reproducible.

const SPLITMIX64_GOLDEN: u64 = 0x9e3779b97f4a7c15;
const SPLITMIX64_M1: u64 = 0xbf58476d1ce4e5b9;
const SPLITMIX64_M2: u64 = 0x94d049bb133111eb;

#[derive(Debug, Clone, Copy)]
pub struct Rng {
    state: u64,
}

impl Rng {
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    #[inline]
    pub fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(SPLITMIX64_GOLDEN);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(SPLITMIX64_M1);
        z = (z ^ (z >> 27)).wrapping_mul(SPLITMIX64_M2);
        z ^ (z >> 31)
    }

    /// Uniform in `[0, 1)` with 53 bits of precision.
    #[inline]
    pub fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
    }

    /// True with probability `p` (clamped by the `[0, 1)` draw; `p <= 0` never fires).
    #[inline]
    pub fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }

    /// Uniform integer in the inclusive range `[min, max]`.
    pub fn range_u32(&mut self, min: u32, max: u32) -> u32 {
        debug_assert!(min <= max);
        let span = u64::from(max - min) + 1;
        min + (self.next_u64() % span) as u32
    }

    /// Uniform integer in the inclusive range `[min, max]`.
    pub fn range_i32(&mut self, min: i32, max: i32) -> i32 {
        debug_assert!(min <= max);
        let span = (i64::from(max) - i64::from(min) + 1) as u64;
        min + (self.next_u64() % span) as i32
    }

    /// Uniform index into a collection of `len` elements. `len` must be non-zero.
    pub fn index(&mut self, len: usize) -> usize {
        debug_assert!(len > 0);
        (self.next_u64() % len as u64) as usize
    }

    /// Fair coin flip.
    #[inline]
    pub fn coin(&mut self) -> bool {
        self.next_u64() & 1 == 1
    }

    /// Index drawn proportionally to `weights`. Total weight must be non-zero.
    pub fn weighted_index(&mut self, weights: &[u32]) -> usize {
        let total: u64 = weights.iter().map(|&w| u64::from(w)).sum();
        debug_assert!(total > 0);
        let mut roll = self.next_u64() % total;
        for (index, &weight) in weights.iter().enumerate() {
            if roll < u64::from(weight) {
                return index;
            }
            roll -= u64::from(weight);
        }
        weights.len() - 1
    }

    /// `count` distinct indices drawn uniformly from `0..population`, in draw order.
    /// Partial Fisher-Yates; `count` is capped at `population`.
    pub fn sample_distinct(&mut self, population: usize, count: usize) -> Vec<usize> {
        let count = count.min(population);
        let mut pool: Vec<usize> = (0..population).collect();
        for i in 0..count {
            let j = i + self.index(population - i);
            pool.swap(i, j);
        }
        pool.truncate(count);
        pool
    }

    /// Number of consecutive successes of a `p` trial, capped at `cap`.
    /// Explicit bounded-geometric sampler for the "keep flipping until a miss" counters.
    pub fn geometric_capped(&mut self, p: f64, cap: u32) -> u32 {
        let mut successes = 0;
        while successes < cap && self.chance(p) {
            successes += 1;
        }
        successes
    }

    /// In-place Fisher-Yates shuffle.
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        for i in (1..items.len()).rev() {
            let j = self.index(i + 1);
            items.swap(i, j);
        }
    }
}
