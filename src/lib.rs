//! Lexicographically sortable 128-bit identifiers
//!
//! ```rust
//! use ulid64::ulid;
//!
//! let id = ulid()?;
//! println!("{}", id); // e.g. "01HF7Y5Q3JX8W0D2S4V6T9KBNM"
//! println!("{:?}", id.to_bytes()); // as 16-byte array of little-endian halves
//! # Ok::<(), ulid64::Error>(())
//! ```
//!
//! # Field and bit layout
//!
//! An identifier is a 128-bit value held as two unsigned 64-bit halves, `high` and `low`:
//!
//! ```text
//!  0                   1                   2                   3
//!  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |                          unix_ts_ms                           |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |          unix_ts_ms           |             rand              |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |                             rand                              |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |                             rand                              |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! ```
//!
//! Where:
//!
//! - The 48-bit `unix_ts_ms` field is dedicated to the Unix timestamp in milliseconds. It forms
//!   the top 48 bits of `high`.
//! - The remaining 80 `rand` bits (the bottom 16 bits of `high` and all of `low`) are filled by
//!   a fast, non-cryptographic xorshift64* generator.
//!
//! Identifiers minted in different milliseconds compare, and sort as text, in chronological
//! order. Identifiers minted within the same millisecond are ordered by their random bits; this
//! library does not keep a counter and makes no monotonicity guarantee within a millisecond.
//!
//! # Representations
//!
//! - Text: 26 characters of Crockford base32 (`0123456789ABCDEFGHJKMNPQRSTVWXYZ`), always encoded
//!   in uppercase and decoded case-insensitively. See [`Ulid::encode`] and [`str::parse`].
//! - Binary: 16 bytes, `high` then `low`, each in little-endian byte order. See
//!   [`Ulid::to_bytes`] and [`Ulid::from_bytes`].
//!
//! Both decoders have a validating form that returns [`Error`] on malformed input and an opt-in
//! lossy form ([`Ulid::from_str_lossy`], [`Ulid::from_bytes_lossy`]) that never fails and reads
//! anything it cannot decode as zero bits.
//!
//! # Random sources
//!
//! [`ulid()`] and the other convenience constructors draw from a process-wide generator state
//! held in an atomic word and seeded once from environmental entropy. Callers needing an
//! independent stream (e.g., one per thread) pass their own [`RandSource`], typically a
//! [`XorShift64Star`], to [`Ulid::generate_core`] or [`Ulid::generate_with`].
//!
//! # Crate features
//!
//! - `std` (default): `std::error::Error`, `String` conversions, and clock-based constructors.
//! - `global_gen` (default): the process-wide generator and [`ulid()`].
//! - `serde`: `Serialize` and `Deserialize` as text or 16 bytes depending on the format.
//! - `uuid`: conversions to and from `uuid::Uuid` by 128-bit value.
//! - `tracing`: trace-level spans around one-time seeding and clock anchoring.

#![cfg_attr(not(any(feature = "std", test)), no_std)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod base32;
mod error;
mod id;

pub mod clock;
pub mod generator;

mod global_gen;

pub use error::Error;
pub use generator::{RandSource, XorShift64Star};
pub use id::Ulid;

#[cfg(feature = "global_gen")]
pub use global_gen::{ulid, GlobalRng};
