//! Crockford base32 text codec for the two 64-bit halves.
//!
//! The 128-bit value is rendered as 26 five-bit groups, most significant first. The first group
//! carries only three payload bits, and group 13 straddles the halves: its top bit is the least
//! significant bit of `high` and its low four bits are the top four bits of `low`.

use crate::Error;

/// The Crockford base32 digits in ascending order.
pub(crate) const ALPHABET: &[u8; 32] = b"0123456789ABCDEFGHJKMNPQRSTVWXYZ";

/// Number of characters in the text representation.
pub(crate) const ENCODED_LEN: usize = 26;

const NO_VALUE: u8 = 0xff;

/// Maps every byte to its digit value, or [`NO_VALUE`]. Lowercase letters decode like their
/// uppercase counterparts.
const DECODE: [u8; 256] = {
    let mut table = [NO_VALUE; 256];
    let mut i = 0;
    while i < ALPHABET.len() {
        let c = ALPHABET[i];
        table[c as usize] = i as u8;
        if c.is_ascii_uppercase() {
            table[c.to_ascii_lowercase() as usize] = i as u8;
        }
        i += 1;
    }
    table
};

/// Returns the digit value of `c`, or `None` if `c` is not in the alphabet.
#[inline]
pub(crate) const fn digit(c: u8) -> Option<u8> {
    match DECODE[c as usize] {
        NO_VALUE => None,
        v => Some(v),
    }
}

/// Encodes the two halves into 26 uppercase ASCII digits.
pub(crate) fn encode(high: u64, low: u64) -> [u8; ENCODED_LEN] {
    let mut dst = [0u8; ENCODED_LEN];
    for (i, e) in dst[..13].iter_mut().enumerate() {
        *e = ALPHABET[((high >> (61 - 5 * i)) & 0x1f) as usize];
    }
    dst[13] = ALPHABET[(((high & 1) << 4) | (low >> 60)) as usize];
    for (i, e) in dst[14..].iter_mut().enumerate() {
        *e = ALPHABET[((low >> (55 - 5 * i)) & 0x1f) as usize];
    }
    debug_assert!(dst.is_ascii());
    dst
}

/// Decodes exactly 26 digits into `(high, low)`, rejecting characters outside the alphabet, any
/// other length, and values wider than 128 bits.
pub(crate) fn decode(src: &str) -> Result<(u64, u64), Error> {
    let bytes = src.as_bytes();
    if let Some(index) = bytes.iter().position(|&c| digit(c).is_none()) {
        // every byte before `index` is ASCII, so `index` is a char boundary
        let ch = src[index..].chars().next().unwrap_or(char::REPLACEMENT_CHARACTER);
        return Err(Error::InvalidChar { ch, index });
    }
    if bytes.len() != ENCODED_LEN {
        return Err(Error::InvalidLength {
            expected: ENCODED_LEN,
            actual: bytes.len(),
        });
    }

    let mut digits = [0u8; ENCODED_LEN];
    for (d, &c) in digits.iter_mut().zip(bytes) {
        *d = digit(c).unwrap_or(0);
    }
    if digits[0] > 7 {
        return Err(Error::Overflow);
    }

    Ok(assemble(&digits))
}

/// Decodes up to 26 digits without validation.
///
/// Characters outside the alphabet and missing trailing characters contribute zero bits, and the
/// excess bits of an over-wide first digit are dropped, so a malformed input yields a wrong but
/// well-formed value. Input beyond 26 bytes is ignored.
pub(crate) fn decode_lossy(src: &[u8]) -> (u64, u64) {
    let mut digits = [0u8; ENCODED_LEN];
    for (d, &c) in digits.iter_mut().zip(src) {
        *d = digit(c).unwrap_or(0);
    }
    assemble(&digits)
}

fn assemble(digits: &[u8; ENCODED_LEN]) -> (u64, u64) {
    let mut high = 0u64;
    for (i, &d) in digits[..13].iter().enumerate() {
        high |= (d as u64) << (61 - 5 * i);
    }
    let straddle = digits[13] as u64;
    high |= straddle >> 4;

    let mut low = (straddle & 0xf) << 60;
    for (i, &d) in digits[14..].iter().enumerate() {
        low |= (d as u64) << (55 - 5 * i);
    }
    (high, low)
}

#[cfg(test)]
mod tests {
    use super::{decode, decode_lossy, digit, encode, ALPHABET};
    use crate::Error;

    /// Returns a collection of prepared cases
    fn prepare_cases() -> &'static [((u64, u64), &'static str)] {
        &[
            ((0, 0), "00000000000000000000000000"),
            ((0x0000_0000_0001_0000, 0), "00000000010000000000000000"),
            ((1, 0), "0000000000000G000000000000"),
            ((0, 1 << 63), "00000000000008000000000000"),
            ((0, 0xf << 60), "0000000000000F000000000000"),
            (
                (0x1122_3344_5566_7788, 0x99aa_bbcc_ddee_ff00),
                "0H48SM8NB6EY49KANVSKEYXZR0",
            ),
            (
                (0x0156_3e3a_b5d3_d676, 0x4c61_efb9_9302_bd5b),
                "01ARZ3NDEKTSV4RRFFQ69G5FAV",
            ),
            ((u64::MAX, u64::MAX), "7ZZZZZZZZZZZZZZZZZZZZZZZZZ"),
        ]
    }

    /// Encodes and decodes prepared cases correctly
    #[test]
    fn encodes_and_decodes_prepared_cases_correctly() {
        for &((high, low), text) in prepare_cases() {
            assert_eq!(&encode(high, low), text.as_bytes());
            assert_eq!(decode(text), Ok((high, low)));
            assert_eq!(decode_lossy(text.as_bytes()), (high, low));
        }
    }

    /// Accepts lowercase digits
    #[test]
    fn accepts_lowercase_digits() {
        assert_eq!(
            decode("01arz3ndektsv4rrffq69g5fav"),
            decode("01ARZ3NDEKTSV4RRFFQ69G5FAV")
        );
        for &c in ALPHABET {
            assert_eq!(digit(c.to_ascii_lowercase()), digit(c));
        }
    }

    /// Maps only alphabet characters to digit values
    #[test]
    fn maps_only_alphabet_characters_to_digit_values() {
        for c in 0..=u8::MAX {
            let expected = ALPHABET
                .iter()
                .position(|&e| e == c.to_ascii_uppercase())
                .map(|v| v as u8);
            assert_eq!(digit(c), expected, "byte {c}");
        }
        for c in *b"ILOUilou" {
            assert_eq!(digit(c), None);
        }
    }

    /// Rejects inputs of wrong length
    #[test]
    fn rejects_inputs_of_wrong_length() {
        for (text, actual) in [
            ("", 0),
            ("0000000000000000000000000", 25),
            ("000000000000000000000000000", 27),
        ] {
            assert_eq!(
                decode(text),
                Err(Error::InvalidLength {
                    expected: 26,
                    actual
                })
            );
        }
    }

    /// Reports the first invalid character
    #[test]
    fn reports_the_first_invalid_character() {
        assert_eq!(
            decode("01ARZ3NDEKTSU4RRFFQ69G5FAV"),
            Err(Error::InvalidChar { ch: 'U', index: 12 })
        );
        assert_eq!(
            decode("-1ARZ3NDEKTSV4RRFFQ69G5FAV"),
            Err(Error::InvalidChar { ch: '-', index: 0 })
        );
        // 24 ASCII bytes plus a two-byte character
        assert_eq!(
            decode("01ARZ3NDEKTSV4RRFFQ69G5Fé"),
            Err(Error::InvalidChar { ch: 'é', index: 24 })
        );
        // 26 characters but 27 bytes
        assert_eq!(
            decode("01ARZ3NDEKTSV4RRFFQ69G5FAé"),
            Err(Error::InvalidChar { ch: 'é', index: 25 })
        );
        assert_eq!(
            decode("\u{1F600}1ARZ3NDEKTSV4RRFFQ69G5FA"),
            Err(Error::InvalidChar {
                ch: '\u{1F600}',
                index: 0
            })
        );
    }

    /// Rejects values wider than 128 bits
    #[test]
    fn rejects_values_wider_than_128_bits() {
        assert_eq!(decode("80000000000000000000000000"), Err(Error::Overflow));
        assert_eq!(decode("ZZZZZZZZZZZZZZZZZZZZZZZZZZ"), Err(Error::Overflow));
        assert!(decode("7ZZZZZZZZZZZZZZZZZZZZZZZZZ").is_ok());
    }

    /// Decodes malformed input lossily
    #[test]
    fn decodes_malformed_input_lossily() {
        // invalid characters become zero digits
        assert_eq!(
            decode_lossy(b"0000000001000000000000000U"),
            decode_lossy(b"00000000010000000000000000")
        );
        // missing trailing characters become zero digits
        assert_eq!(decode_lossy(b"0000000001"), (0x0000_0000_0001_0000, 0));
        assert_eq!(decode_lossy(b""), (0, 0));
        // excess bits of the first digit are dropped
        assert_eq!(
            decode_lossy(b"ZZZZZZZZZZZZZZZZZZZZZZZZZZ"),
            (u64::MAX, u64::MAX)
        );
        // trailing input is ignored
        assert_eq!(
            decode_lossy(b"01ARZ3NDEKTSV4RRFFQ69G5FAV-extra"),
            (0x0156_3e3a_b5d3_d676, 0x4c61_efb9_9302_bd5b)
        );
    }

    /// Produces fixed-width output from the alphabet
    #[test]
    fn produces_fixed_width_output_from_the_alphabet() {
        use rand::Rng;
        let mut rng = rand::thread_rng();
        for _ in 0..10_000 {
            let (high, low) = (rng.gen::<u64>(), rng.gen::<u64>());
            let text = encode(high, low);
            assert!(text.iter().all(|c| ALPHABET.contains(c)));
            assert_eq!(decode(core::str::from_utf8(&text).unwrap()), Ok((high, low)));
        }
    }
}
