use core::fmt;

/// Error constructing a [`Ulid`](crate::Ulid) from text, bytes, or the system clock.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[non_exhaustive]
pub enum Error {
    /// The input does not have the required length: text must be exactly 26 characters and
    /// binary input at least 16 bytes.
    InvalidLength {
        /// Required length.
        expected: usize,
        /// Length actually given.
        actual: usize,
    },

    /// The text contains a character outside the Crockford base32 alphabet.
    InvalidChar {
        /// The offending character.
        ch: char,
        /// Byte offset of the offending character.
        index: usize,
    },

    /// The text encodes a value wider than 128 bits (first character greater than `7`).
    Overflow,

    /// The system clock reports a time before the Unix epoch.
    ClockBeforeEpoch,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidLength { expected, actual } => {
                write!(f, "invalid length: expected {expected}, got {actual}")
            }
            Self::InvalidChar { ch, index } => {
                write!(f, "invalid character {ch:?} at index {index}")
            }
            Self::Overflow => write!(f, "value exceeds 128 bits"),
            Self::ClockBeforeEpoch => write!(f, "system clock is set before the Unix epoch"),
        }
    }
}

#[cfg(feature = "std")]
#[cfg_attr(docsrs, doc(cfg(feature = "std")))]
impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::Error;

    /// Describes each error kind
    #[cfg(feature = "std")]
    #[test]
    fn describes_each_error_kind() {
        let cases = [
            (
                Error::InvalidLength {
                    expected: 26,
                    actual: 25,
                },
                "invalid length: expected 26, got 25",
            ),
            (
                Error::InvalidChar { ch: 'U', index: 3 },
                "invalid character 'U' at index 3",
            ),
            (Error::Overflow, "value exceeds 128 bits"),
            (
                Error::ClockBeforeEpoch,
                "system clock is set before the Unix epoch",
            ),
        ];

        for (err, message) in cases {
            assert_eq!(err.to_string(), message);
        }
    }
}
