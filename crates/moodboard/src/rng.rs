//! Deterministic random number generation.
//!
//! Placement must be reproducible from a seed (same seed, same
//! layout), so the engine carries its own small LCG instead of pulling
//! entropy from the environment. Callers that want varied layouts seed
//! from whatever source they like and pass the stream in.

/// A seeded linear congruential generator.
///
/// Multiplier/increment are the Numerical Recipes constants; the high
/// bits feed `next_f64` for a usable [0, 1) distribution.
///
/// # Example
/// ```
/// use moodboard::rng::Rng;
///
/// let mut a = Rng::new(7);
/// let mut b = Rng::new(7);
/// assert_eq!(a.next_f64(), b.next_f64());
/// ```
#[derive(Debug, Clone)]
pub struct Rng {
    state: u64,
}

impl Rng {
    /// Create a generator. Equal seeds yield equal streams.
    #[inline]
    pub fn new(seed: u64) -> Self {
        Self { state: seed.wrapping_add(1) }
    }

    #[inline]
    pub fn next_u64(&mut self) -> u64 {
        self.state = self
            .state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.state
    }

    /// Uniform f64 in [0, 1).
    #[inline]
    pub fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Uniform f64 in [min, max). Returns `min` when the range is
    /// empty or inverted.
    #[inline]
    pub fn next_range(&mut self, min: f64, max: f64) -> f64 {
        if max <= min {
            min
        } else {
            min + self.next_f64() * (max - min)
        }
    }

    /// Uniform index in [0, len). `len` must be non-zero.
    #[inline]
    pub fn next_index(&mut self, len: usize) -> usize {
        ((self.next_f64() * len as f64) as usize).min(len - 1)
    }

    /// Fisher-Yates shuffle driven by this stream.
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        for i in (1..items.len()).rev() {
            let j = self.next_index(i + 1);
            items.swap(i, j);
        }
    }
}

impl Default for Rng {
    fn default() -> Self {
        Self::new(0)
    }
}
