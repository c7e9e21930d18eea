//! Pseudo-random sources for the 80 random bits of a [`Ulid`](crate::Ulid).
//!
//! The built-in source is xorshift64*: fast, small, and entirely non-cryptographic. Its state is a
//! single `u64` that must never be zero, since zero is a fixed point of the xorshift step.

pub mod with_rand08;

/// Multiplier applied to the xorshift state to produce each output.
const MULTIPLIER: u64 = 0x2545_f491_4f6c_dd1d;

/// Substitute for a zero seed (the 64-bit golden ratio).
const ZERO_SEED_REPLACEMENT: u64 = 0x9e37_79b9_7f4a_7c15;

/// A trait that defines the minimum random number generator interface for [`Ulid`] construction.
///
/// [`Ulid`]: crate::Ulid
pub trait RandSource {
    /// Returns the next random `u64`.
    fn next_u64(&mut self) -> u64;
}

/// Advances a xorshift64* state by one step, returning the new state before scrambling.
#[inline]
pub(crate) const fn step(mut x: u64) -> u64 {
    x ^= x >> 12;
    x ^= x << 25;
    x ^= x >> 27;
    x
}

/// Scrambles an advanced state into an output value.
#[inline]
pub(crate) const fn scramble(x: u64) -> u64 {
    x.wrapping_mul(MULTIPLIER)
}

/// Draws the next xorshift64* output from a caller-owned state, updating the state in place.
///
/// This is the primitive behind every other source in this crate, letting callers keep
/// independent streams (e.g., one per thread) without any shared mutable state. A zero `state`
/// stays zero forever and always yields zero; seed through [`XorShift64Star::new`] to rule that
/// out.
///
/// # Examples
///
/// ```rust
/// let mut state = 1u64;
/// assert_eq!(ulid64::generator::next_u64(&mut state), 0x47e4_ce4b_896c_dd1d);
/// assert_ne!(state, 1);
/// ```
#[inline]
pub fn next_u64(state: &mut u64) -> u64 {
    *state = step(*state);
    scramble(*state)
}

/// A xorshift64* generator owning its state.
///
/// # Examples
///
/// ```rust
/// use ulid64::{generator::XorShift64Star, Ulid};
///
/// let mut rng = XorShift64Star::new(42);
/// let a = Ulid::generate_core(1_700_000_000_000, &mut rng);
/// let b = Ulid::generate_core(1_700_000_000_000, &mut rng);
/// assert_ne!(a, b);
/// assert_eq!(a.timestamp_ms(), b.timestamp_ms());
/// ```
///
/// Both [`RandSource`] and [`rand::RngCore`] provide `next_u64`, and both draw the same value.
/// With both traits in scope, call it as `RandSource::next_u64(&mut rng)`.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct XorShift64Star {
    state: u64,
}

impl XorShift64Star {
    /// Creates a generator from `seed`. A zero seed is replaced by a fixed non-zero constant.
    pub const fn new(seed: u64) -> Self {
        Self {
            state: if seed == 0 {
                ZERO_SEED_REPLACEMENT
            } else {
                seed
            },
        }
    }

    /// Creates a generator seeded from the same environmental entropy as the global generator.
    ///
    /// Unlike `SeedableRng::from_entropy`, the seed also mixes in process identity and clocks.
    #[cfg(feature = "global_gen")]
    #[cfg_attr(docsrs, doc(cfg(feature = "global_gen")))]
    pub fn from_process_entropy() -> Self {
        Self::new(crate::global_gen::entropy_seed())
    }

    /// Returns the current internal state.
    pub const fn state(&self) -> u64 {
        self.state
    }
}

impl Default for XorShift64Star {
    fn default() -> Self {
        Self::new(0)
    }
}

impl RandSource for XorShift64Star {
    #[inline]
    fn next_u64(&mut self) -> u64 {
        next_u64(&mut self.state)
    }
}

impl rand::RngCore for XorShift64Star {
    fn next_u32(&mut self) -> u32 {
        // the high half is the better-mixed one
        (next_u64(&mut self.state) >> 32) as u32
    }

    fn next_u64(&mut self) -> u64 {
        next_u64(&mut self.state)
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        let mut chunks = dest.chunks_exact_mut(8);
        for chunk in &mut chunks {
            chunk.copy_from_slice(&next_u64(&mut self.state).to_le_bytes());
        }
        let rest = chunks.into_remainder();
        if !rest.is_empty() {
            let bytes = next_u64(&mut self.state).to_le_bytes();
            rest.copy_from_slice(&bytes[..rest.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl rand::SeedableRng for XorShift64Star {
    type Seed = [u8; 8];

    fn from_seed(seed: Self::Seed) -> Self {
        Self::new(u64::from_le_bytes(seed))
    }
}

#[cfg(test)]
mod tests {
    use super::{next_u64, RandSource, XorShift64Star};

    /// Produces the reference xorshift64* sequence
    #[test]
    fn produces_the_reference_xorshift64star_sequence() {
        let mut state = 1u64;
        assert_eq!(next_u64(&mut state), 0x47e4_ce4b_896c_dd1d);
        assert_eq!(next_u64(&mut state), 0xabcf_a6a8_e079_651d);
        assert_eq!(next_u64(&mut state), 0xb9d1_0d8f_eb73_1f57);
        assert_eq!(state, 0x000d_0040_0320_2803);

        let mut g = XorShift64Star::new(1);
        assert_eq!(g.next_u64(), 0x47e4_ce4b_896c_dd1d);
    }

    /// Never enters the zero state
    #[test]
    fn never_enters_the_zero_state() {
        let mut g = XorShift64Star::new(0);
        assert_ne!(g.state(), 0);
        for _ in 0..1_000_000 {
            g.next_u64();
            assert_ne!(g.state(), 0);
        }

        // the xorshift step is a bijection, so only zero maps to zero
        for seed in [1, 2, u64::MAX, 1 << 63, 0x8000_0000_0000_0001] {
            assert_ne!(super::step(seed), 0);
        }
    }

    /// Keeps explicit streams independent
    #[test]
    fn keeps_explicit_streams_independent() {
        let mut a = XorShift64Star::new(7);
        let mut b = XorShift64Star::new(7);
        let mut c = XorShift64Star::new(8);
        let xs: Vec<u64> = (0..64).map(|_| a.next_u64()).collect();
        let ys: Vec<u64> = (0..64).map(|_| b.next_u64()).collect();
        let zs: Vec<u64> = (0..64).map(|_| c.next_u64()).collect();
        assert_eq!(xs, ys);
        assert_ne!(xs, zs);
    }

    /// Fills byte buffers of any length
    #[test]
    fn fills_byte_buffers_of_any_length() {
        use rand::RngCore;
        for len in [0, 1, 7, 8, 9, 16, 33] {
            let mut g = XorShift64Star::new(3);
            let mut h = XorShift64Star::new(3);
            let mut buf = vec![0u8; len];
            g.fill_bytes(&mut buf);
            let expected: Vec<u8> = (0..len.div_ceil(8))
                .flat_map(|_| RandSource::next_u64(&mut h).to_le_bytes())
                .take(len)
                .collect();
            assert_eq!(buf, expected);
        }
    }

    /// Builds from a seed through rand
    #[test]
    fn builds_from_a_seed_through_rand() {
        use rand::{Rng, SeedableRng};
        let mut g = XorShift64Star::seed_from_u64(12345);
        assert_ne!(g.state(), 0);
        let n: u32 = g.gen_range(0..10);
        assert!(n < 10);
        assert_eq!(XorShift64Star::from_seed([0; 8]), XorShift64Star::new(0));
    }

    /// Sets random bits at roughly even rates
    #[test]
    fn sets_random_bits_at_roughly_even_rates() {
        const N_SAMPLES: usize = 100_000;
        let mut g = XorShift64Star::new(0x5eed);
        let mut bins = [0u32; 64];
        for _ in 0..N_SAMPLES {
            let x = g.next_u64();
            for (i, bin) in bins.iter_mut().enumerate() {
                *bin += ((x >> i) & 1) as u32;
            }
        }

        // set margin based on binom dist 99.999% confidence interval
        let margin = 4.417173 * (0.5 * 0.5 / N_SAMPLES as f64).sqrt();
        for (i, &bin) in bins.iter().enumerate() {
            let p = bin as f64 / N_SAMPLES as f64;
            assert!((p - 0.5).abs() < margin, "random bit {i}: {p}");
        }
    }

    /// Seeds distinct generators from process entropy
    #[cfg(feature = "global_gen")]
    #[test]
    fn seeds_distinct_generators_from_process_entropy() {
        let mut a = XorShift64Star::from_process_entropy();
        let mut b = XorShift64Star::from_process_entropy();
        assert_ne!(a.state(), 0);
        assert_ne!(b.state(), 0);
        assert_ne!(a, b);
        assert_ne!(a.next_u64(), b.next_u64());
    }

    /// Draws the same value through either trait
    #[test]
    fn draws_the_same_value_through_either_trait() {
        let mut a = XorShift64Star::new(99);
        let mut b = XorShift64Star::new(99);
        for _ in 0..100 {
            assert_eq!(
                RandSource::next_u64(&mut a),
                rand::RngCore::next_u64(&mut b)
            );
        }
    }
}
