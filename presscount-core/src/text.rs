//! Integer to text conversion
//!
//! Renders a signed integer as ASCII digits in any base from 2 to 36 into a
//! fixed-capacity buffer. Output is most-significant digit first with no
//! terminator. Running out of room is reported instead of overrunning the
//! buffer.

use heapless::Vec;

/// Smallest supported base
pub const MIN_BASE: u32 = 2;

/// Largest supported base (digits 0-9 then a-z)
pub const MAX_BASE: u32 = 36;

/// Room for any `i32` in base 10: sign plus ten digits
pub const INTEGER_TEXT_CAPACITY: usize = 11;

/// Decimal text of an `i32`
pub type IntegerText = Vec<u8, INTEGER_TEXT_CAPACITY>;

/// Errors from integer formatting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TextError {
    /// Base outside 2..=36
    InvalidBase,
    /// Output does not fit the destination
    BufferTooSmall,
}

/// Write `value` in `base` into `buf`, returning the number of bytes used
///
/// A leading `-` is produced only in base 10. In any other base a negative
/// value is rendered as its 32-bit two's-complement pattern, the same as
/// `{:x}` does for signed integers.
pub fn write_radix(value: i32, base: u32, buf: &mut [u8]) -> Result<usize, TextError> {
    if !(MIN_BASE..=MAX_BASE).contains(&base) {
        return Err(TextError::InvalidBase);
    }

    let negative = value < 0 && base == 10;
    let mut magnitude = if base == 10 {
        value.unsigned_abs()
    } else {
        value as u32
    };

    // Digits come out least significant first; emit them backwards into a
    // scratch array big enough for base 2.
    let mut scratch = [0u8; 32];
    let mut len = 0;
    loop {
        scratch[len] = digit(magnitude % base);
        len += 1;
        magnitude /= base;
        if magnitude == 0 {
            break;
        }
    }

    let total = len + usize::from(negative);
    if buf.len() < total {
        return Err(TextError::BufferTooSmall);
    }

    let mut pos = 0;
    if negative {
        buf[0] = b'-';
        pos = 1;
    }
    for &d in scratch[..len].iter().rev() {
        buf[pos] = d;
        pos += 1;
    }

    Ok(total)
}

/// Format `value` in `base` into a heapless vector of capacity `N`
pub fn format_radix<const N: usize>(value: i32, base: u32) -> Result<Vec<u8, N>, TextError> {
    let mut buf = [0u8; 33];
    let len = write_radix(value, base, &mut buf)?;
    Vec::from_slice(&buf[..len]).map_err(|_| TextError::BufferTooSmall)
}

/// Decimal text of `value`
///
/// Never fails: [`INTEGER_TEXT_CAPACITY`] holds every `i32`.
pub fn format_decimal(value: i32) -> IntegerText {
    // i32::MIN is "-2147483648", exactly 11 bytes
    let text = format_radix(value, 10);
    debug_assert!(text.is_ok(), "decimal text overflowed its buffer");
    text.unwrap_or_default()
}

fn digit(d: u32) -> u8 {
    if d > 9 {
        b'a' + (d - 10) as u8
    } else {
        b'0' + d as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn text<const N: usize>(v: &Vec<u8, N>) -> &str {
        core::str::from_utf8(v).unwrap()
    }

    #[test]
    fn test_zero_every_base() {
        for base in MIN_BASE..=MAX_BASE {
            let out = format_radix::<4>(0, base).unwrap();
            assert_eq!(text(&out), "0");
        }
    }

    #[test]
    fn test_decimal() {
        assert_eq!(text(&format_decimal(7)), "7");
        assert_eq!(text(&format_decimal(1234)), "1234");
        assert_eq!(text(&format_decimal(-56)), "-56");
    }

    #[test]
    fn test_decimal_extremes() {
        assert_eq!(text(&format_decimal(i32::MAX)), "2147483647");
        assert_eq!(text(&format_decimal(i32::MIN)), "-2147483648");
    }

    #[test]
    fn test_capacity_fits_widest_decimal() {
        // Shrinking the capacity trips the debug assertion in format_decimal
        assert_eq!(format_decimal(i32::MIN).len(), INTEGER_TEXT_CAPACITY);
        assert_eq!(
            format_radix::<{ INTEGER_TEXT_CAPACITY - 1 }>(i32::MIN, 10),
            Err(TextError::BufferTooSmall)
        );
    }

    #[test]
    fn test_letters_are_lowercase() {
        assert_eq!(text(&format_radix::<8>(255, 16).unwrap()), "ff");
        assert_eq!(text(&format_radix::<8>(35, 36).unwrap()), "z");
        assert_eq!(text(&format_radix::<8>(36, 36).unwrap()), "10");
    }

    #[test]
    fn test_binary() {
        assert_eq!(text(&format_radix::<8>(5, 2).unwrap()), "101");
    }

    #[test]
    fn test_negative_non_decimal_is_bit_pattern() {
        assert_eq!(text(&format_radix::<8>(-1, 16).unwrap()), "ffffffff");
        assert_eq!(
            text(&format_radix::<32>(-2, 2).unwrap()),
            "11111111111111111111111111111110"
        );
    }

    #[test]
    fn test_invalid_base() {
        let mut buf = [0u8; 8];
        assert_eq!(write_radix(10, 1, &mut buf), Err(TextError::InvalidBase));
        assert_eq!(write_radix(10, 37, &mut buf), Err(TextError::InvalidBase));
    }

    #[test]
    fn test_buffer_too_small() {
        let mut buf = [0u8; 3];
        assert_eq!(write_radix(1000, 10, &mut buf), Err(TextError::BufferTooSmall));
        assert_eq!(write_radix(-100, 10, &mut buf), Err(TextError::BufferTooSmall));
        assert_eq!(write_radix(999, 10, &mut buf), Ok(3));
        assert_eq!(&buf, b"999");

        // Needs all 11 bytes; an 8-byte buffer cannot hold this
        assert_eq!(
            format_radix::<8>(-12_345_678, 10),
            Err(TextError::BufferTooSmall)
        );
    }

    proptest! {
        #[test]
        fn prop_decimal_roundtrip(n in any::<i32>()) {
            let out = format_decimal(n);
            prop_assert_eq!(text(&out).parse::<i32>().unwrap(), n);
        }

        #[test]
        fn prop_radix_roundtrip(n in any::<i32>(), base in MIN_BASE..=MAX_BASE) {
            let out = format_radix::<33>(n, base).unwrap();
            if base == 10 {
                prop_assert_eq!(i32::from_str_radix(text(&out), base).unwrap(), n);
            } else {
                prop_assert_eq!(u32::from_str_radix(text(&out), base).unwrap(), n as u32);
            }
        }

        #[test]
        fn prop_sign_iff_negative(n in any::<i32>()) {
            let out = format_decimal(n);
            prop_assert_eq!(out.first() == Some(&b'-'), n < 0);
        }

        #[test]
        fn prop_no_leading_zero(n in 1..=i32::MAX, base in MIN_BASE..=MAX_BASE) {
            let out = format_radix::<33>(n, base).unwrap();
            prop_assert_ne!(out[0], b'0');
        }
    }
}
