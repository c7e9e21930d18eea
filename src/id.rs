use core::{fmt, hash, str};

use fstr::FStr;

use crate::base32::{self, ENCODED_LEN};
use crate::generator::RandSource;
use crate::Error;

/// Represents a 128-bit lexicographically sortable identifier.
///
/// The value is held as two 64-bit halves. The most significant 48 bits are a Unix timestamp in
/// milliseconds and the remaining 80 bits are random:
///
/// ```text
/// high: | unix_ts_ms (48 bits)                            | rand (16 bits)  |
/// low:  | rand (64 bits)                                                     |
/// ```
///
/// Identifiers compare by `high` first and `low` second, so identifiers minted in different
/// milliseconds sort chronologically, while those minted within the same millisecond sort by
/// their random bits rather than by creation order.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Default)]
pub struct Ulid {
    high: u64,
    low: u64,
}

impl Ulid {
    /// The all-zero identifier (`00000000000000000000000000`).
    ///
    /// This is also the [`Default`] value. It carries a zero timestamp and has no reserved meaning
    /// beyond that.
    pub const NIL: Self = Self::from_halves(0, 0);

    /// The all-one identifier (`7ZZZZZZZZZZZZZZZZZZZZZZZZZ`).
    pub const MAX: Self = Self::from_halves(u64::MAX, u64::MAX);

    /// Length of the binary representation in bytes.
    pub const SIZE_IN_BYTES: usize = 16;

    /// Length of the text representation in characters.
    pub const ENCODED_LEN: usize = ENCODED_LEN;

    /// Creates an identifier from its two 64-bit halves.
    pub const fn from_halves(high: u64, low: u64) -> Self {
        Self { high, low }
    }

    /// Returns the two 64-bit halves as `(high, low)`.
    pub const fn to_halves(&self) -> (u64, u64) {
        (self.high, self.low)
    }

    /// Creates an identifier from field values: a millisecond timestamp, the top 16 random bits,
    /// and the bottom 64 random bits.
    ///
    /// Only the low 48 bits of `unix_ts_ms` are kept; wider values silently lose their top bits.
    pub const fn from_parts(unix_ts_ms: u64, rand_hi: u16, rand_lo: u64) -> Self {
        Self::from_halves((unix_ts_ms << 16) | rand_hi as u64, rand_lo)
    }

    /// Generates an identifier from `unix_ts_ms` and 80 bits drawn from `rng`.
    ///
    /// The first draw becomes the low 64 random bits and the low 16 bits of the second draw
    /// become the top 16. Only the low 48 bits of `unix_ts_ms` are kept.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ulid64::{generator::XorShift64Star, Ulid};
    ///
    /// let mut rng = XorShift64Star::new(1);
    /// let id = Ulid::generate_core(1, &mut rng);
    /// assert_eq!(id.timestamp_ms(), 1);
    /// ```
    pub fn generate_core<R: RandSource + ?Sized>(unix_ts_ms: u64, rng: &mut R) -> Self {
        let rand_lo = rng.next_u64();
        let rand_hi = rng.next_u64() as u16;
        Self::from_parts(unix_ts_ms, rand_hi, rand_lo)
    }

    /// Generates an identifier from the current time and 80 bits drawn from `rng`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ClockBeforeEpoch`] if the system clock is set before the Unix epoch.
    #[cfg(feature = "std")]
    #[cfg_attr(docsrs, doc(cfg(feature = "std")))]
    pub fn generate_with<R: RandSource + ?Sized>(rng: &mut R) -> Result<Self, Error> {
        Ok(Self::generate_core(crate::clock::unix_ts_ms()?, rng))
    }

    /// Generates an identifier from the current time and the process-wide generator.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ClockBeforeEpoch`] if the system clock is set before the Unix epoch.
    #[cfg(feature = "global_gen")]
    #[cfg_attr(docsrs, doc(cfg(feature = "global_gen")))]
    pub fn generate() -> Result<Self, Error> {
        Self::generate_with(&mut crate::GlobalRng::new())
    }

    /// Generates an identifier from `unix_ts_ms` and the process-wide generator.
    ///
    /// Only the low 48 bits of `unix_ts_ms` are kept.
    #[cfg(feature = "global_gen")]
    #[cfg_attr(docsrs, doc(cfg(feature = "global_gen")))]
    pub fn from_timestamp_ms(unix_ts_ms: u64) -> Self {
        Self::generate_core(unix_ts_ms, &mut crate::GlobalRng::new())
    }

    /// Generates an identifier from a [`SystemTime`](std::time::SystemTime) and the process-wide
    /// generator.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ClockBeforeEpoch`] if `time` precedes the Unix epoch.
    #[cfg(feature = "global_gen")]
    #[cfg_attr(docsrs, doc(cfg(feature = "global_gen")))]
    pub fn from_system_time(time: std::time::SystemTime) -> Result<Self, Error> {
        Ok(Self::from_timestamp_ms(
            crate::clock::system_time_to_unix_ts_ms(time)?,
        ))
    }

    /// Generates an identifier from a monotonic [`Instant`](std::time::Instant), converted to
    /// wall-clock time through the process-wide clock anchor, and the process-wide generator.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ClockBeforeEpoch`] if the converted time precedes the Unix epoch.
    #[cfg(feature = "global_gen")]
    #[cfg_attr(docsrs, doc(cfg(feature = "global_gen")))]
    pub fn from_instant(instant: std::time::Instant) -> Result<Self, Error> {
        Ok(Self::from_timestamp_ms(
            crate::clock::instant_to_unix_ts_ms(instant)?,
        ))
    }

    /// Returns the embedded Unix timestamp in milliseconds.
    pub const fn timestamp_ms(&self) -> u64 {
        self.high >> 16
    }

    /// Returns the embedded timestamp as a [`SystemTime`](std::time::SystemTime).
    #[cfg(feature = "std")]
    #[cfg_attr(docsrs, doc(cfg(feature = "std")))]
    pub fn system_time(&self) -> std::time::SystemTime {
        crate::clock::unix_ts_ms_to_system_time(self.timestamp_ms())
    }

    /// Returns the 80 random bits.
    pub const fn random_part(&self) -> u128 {
        ((self.high as u128 & 0xffff) << 64) | self.low as u128
    }

    /// Returns the 16-byte binary representation: `high` followed by `low`, each in little-endian
    /// byte order.
    pub const fn to_bytes(&self) -> [u8; 16] {
        let h = self.high.to_le_bytes();
        let l = self.low.to_le_bytes();
        [
            h[0], h[1], h[2], h[3], h[4], h[5], h[6], h[7], l[0], l[1], l[2], l[3], l[4], l[5],
            l[6], l[7],
        ]
    }

    /// Writes the 16-byte binary representation into the front of `dst`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidLength`] if `dst` is shorter than 16 bytes.
    pub fn write_bytes(&self, dst: &mut [u8]) -> Result<(), Error> {
        let actual = dst.len();
        match dst.get_mut(..Self::SIZE_IN_BYTES) {
            Some(dst) => {
                dst.copy_from_slice(&self.to_bytes());
                Ok(())
            }
            None => Err(Error::InvalidLength {
                expected: Self::SIZE_IN_BYTES,
                actual,
            }),
        }
    }

    /// Creates an identifier from the first 16 bytes of `src` (see [`Ulid::to_bytes`]).
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidLength`] if `src` is shorter than 16 bytes.
    pub fn from_bytes(src: &[u8]) -> Result<Self, Error> {
        match src.get(..Self::SIZE_IN_BYTES) {
            Some(head) => {
                let mut bytes = [0u8; 16];
                bytes.copy_from_slice(head);
                Ok(Self::from(bytes))
            }
            None => Err(Error::InvalidLength {
                expected: Self::SIZE_IN_BYTES,
                actual: src.len(),
            }),
        }
    }

    /// Creates an identifier from the first 16 bytes of `src` without checking its length.
    ///
    /// Missing bytes read as zero, so a short input yields a truncated but well-formed value.
    /// Prefer [`Ulid::from_bytes`] unless the input is known to be long enough.
    pub fn from_bytes_lossy(src: &[u8]) -> Self {
        let mut bytes = [0u8; 16];
        for (d, s) in bytes.iter_mut().zip(src) {
            *d = *s;
        }
        Self::from(bytes)
    }

    /// Creates an identifier from the 26-character representation without validation.
    ///
    /// Characters outside the alphabet and missing trailing characters decode as zero bits, and
    /// the excess bits of a first character above `7` are dropped. A malformed input therefore
    /// yields a wrong but well-formed identifier instead of an error. Prefer [`str::parse`] unless
    /// the input is known to be valid.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ulid64::Ulid;
    ///
    /// let x = Ulid::from_str_lossy("01ARZ3NDEKTSV4RRFFQ69G5FAV");
    /// assert_eq!(Ok(x), "01ARZ3NDEKTSV4RRFFQ69G5FAV".parse());
    ///
    /// // the invalid 'U' silently reads as '0'
    /// let y = Ulid::from_str_lossy("01ARZ3NDEKTSV4RRFFQ69G5FAU");
    /// assert_eq!(y, Ulid::from_str_lossy("01ARZ3NDEKTSV4RRFFQ69G5FA0"));
    /// ```
    pub fn from_str_lossy(src: &str) -> Self {
        let (high, low) = base32::decode_lossy(src.as_bytes());
        Self::from_halves(high, low)
    }

    /// Returns the 26-character Crockford base32 representation stored in a stack-allocated
    /// string type that can be dereferenced as `str` and [`Display`](fmt::Display)ed.
    ///
    /// This method is primarily for `no_std` environments where heap-allocated string types are
    /// not readily available. Use the [`fmt::Display`] trait usually to get the text
    /// representation.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ulid64::Ulid;
    ///
    /// let x = "01ARZ3NDEKTSV4RRFFQ69G5FAV".parse::<Ulid>()?;
    /// let y = x.encode();
    /// assert_eq!(&y as &str, "01ARZ3NDEKTSV4RRFFQ69G5FAV");
    /// assert_eq!(format!("{}", y), "01ARZ3NDEKTSV4RRFFQ69G5FAV");
    /// # Ok::<(), ulid64::Error>(())
    /// ```
    pub fn encode(&self) -> FStr<ENCODED_LEN> {
        let buffer = base32::encode(self.high, self.low);
        // SAFETY: the codec only emits ASCII digits from its alphabet
        unsafe { FStr::from_inner_unchecked(buffer) }
    }

    /// Writes the 26-character representation into `dst` and returns it as `str`.
    pub fn encode_to<'a>(&self, dst: &'a mut [u8; ENCODED_LEN]) -> &'a str {
        *dst = base32::encode(self.high, self.low);
        // SAFETY: the codec only emits ASCII digits from its alphabet
        unsafe { str::from_utf8_unchecked(dst) }
    }

    /// Mixes both halves into a 64-bit hash. The random `low` half is used verbatim; the time
    /// dominated `high` half goes through one multiply/xor-shift round first.
    const fn mix(&self) -> u64 {
        let mut x = self.high;
        x ^= x >> 47;
        x = x.wrapping_mul(0xc6a4_a793_5bd1_e995);
        x ^= x >> 47;
        x ^ self.low
    }
}

impl hash::Hash for Ulid {
    fn hash<H: hash::Hasher>(&self, state: &mut H) {
        state.write_u64(self.mix());
    }
}

impl fmt::Display for Ulid {
    /// Returns the 26-character Crockford base32 representation.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

impl str::FromStr for Ulid {
    type Err = Error;

    /// Creates an object from the 26-character representation, accepting lowercase letters.
    fn from_str(src: &str) -> Result<Self, Self::Err> {
        let (high, low) = base32::decode(src)?;
        Ok(Self::from_halves(high, low))
    }
}

impl From<Ulid> for [u8; 16] {
    fn from(src: Ulid) -> Self {
        src.to_bytes()
    }
}

impl From<[u8; 16]> for Ulid {
    fn from(src: [u8; 16]) -> Self {
        let (h, l) = src.split_at(8);
        let mut high = [0u8; 8];
        let mut low = [0u8; 8];
        high.copy_from_slice(h);
        low.copy_from_slice(l);
        Self::from_halves(u64::from_le_bytes(high), u64::from_le_bytes(low))
    }
}

impl TryFrom<&[u8]> for Ulid {
    type Error = Error;

    fn try_from(src: &[u8]) -> Result<Self, Self::Error> {
        Self::from_bytes(src)
    }
}

impl From<Ulid> for u128 {
    /// Returns the 128-bit value with the timestamp in the most significant bits.
    fn from(src: Ulid) -> Self {
        ((src.high as u128) << 64) | src.low as u128
    }
}

impl From<u128> for Ulid {
    fn from(src: u128) -> Self {
        Self::from_halves((src >> 64) as u64, src as u64)
    }
}

#[cfg(feature = "std")]
#[cfg_attr(docsrs, doc(cfg(feature = "std")))]
mod std_ext {
    use super::{Error, Ulid};

    impl From<Ulid> for String {
        fn from(src: Ulid) -> Self {
            src.to_string()
        }
    }

    impl TryFrom<String> for Ulid {
        type Error = Error;

        fn try_from(src: String) -> Result<Self, Self::Error> {
            src.parse()
        }
    }
}

#[cfg(feature = "uuid")]
#[cfg_attr(docsrs, doc(cfg(feature = "uuid")))]
mod uuid_support {
    use super::Ulid;

    impl From<Ulid> for uuid::Uuid {
        fn from(src: Ulid) -> Self {
            uuid::Uuid::from_u128(src.into())
        }
    }

    impl From<uuid::Uuid> for Ulid {
        fn from(src: uuid::Uuid) -> Self {
            Self::from(src.as_u128())
        }
    }

}

#[cfg(feature = "serde")]
#[cfg_attr(docsrs, doc(cfg(feature = "serde")))]
mod serde_support {
    use super::{fmt, Error, Ulid};
    use serde::{de, Deserializer, Serializer};

    impl serde::Serialize for Ulid {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            if serializer.is_human_readable() {
                serializer.serialize_str(&self.encode())
            } else {
                serializer.serialize_bytes(&self.to_bytes())
            }
        }
    }

    impl<'de> serde::Deserialize<'de> for Ulid {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            if deserializer.is_human_readable() {
                deserializer.deserialize_str(VisitorImpl)
            } else {
                deserializer.deserialize_bytes(VisitorImpl)
            }
        }
    }

    struct VisitorImpl;

    impl<'de> de::Visitor<'de> for VisitorImpl {
        type Value = Ulid;

        fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(formatter, "a ULID representation")
        }

        fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
            value.parse::<Self::Value>().map_err(de::Error::custom)
        }

        fn visit_bytes<E: de::Error>(self, value: &[u8]) -> Result<Self::Value, E> {
            <[u8; 16]>::try_from(value)
                .map(Self::Value::from)
                .map_err(|_| {
                    de::Error::custom(Error::InvalidLength {
                        expected: Ulid::SIZE_IN_BYTES,
                        actual: value.len(),
                    })
                })
        }
    }

}
