//! Integration with `rand` (v0.8) crate.

use super::RandSource;

/// An adapter that implements [`RandSource`] for [`rand::RngCore`] types, so that any `rand`
/// generator (e.g., a cryptographically secure one) can supply the random bits of a [`Ulid`].
///
/// # Examples
///
/// ```rust
/// use ulid64::{generator::with_rand08::Adapter, Ulid};
///
/// let mut rng = Adapter(rand::rngs::OsRng);
/// let id = Ulid::generate_core(1_700_000_000_000, &mut rng);
/// assert_eq!(id.timestamp_ms(), 1_700_000_000_000);
/// ```
///
/// [`Ulid`]: crate::Ulid
#[derive(Clone, Eq, PartialEq, Debug, Default)]
pub struct Adapter<T>(/** The wrapped [`rand::RngCore`] type. */ pub T);

impl<T: rand::RngCore> RandSource for Adapter<T> {
    fn next_u64(&mut self) -> u64 {
        self.0.next_u64()
    }
}

#[cfg(test)]
mod tests {
    use super::Adapter;
    use crate::generator::{RandSource, XorShift64Star};

    /// Forwards draws to the wrapped generator
    #[test]
    fn forwards_draws_to_the_wrapped_generator() {
        let mut wrapped = Adapter(XorShift64Star::new(99));
        let mut direct = XorShift64Star::new(99);
        for _ in 0..16 {
            assert_eq!(wrapped.next_u64(), direct.next_u64());
        }
    }
}
