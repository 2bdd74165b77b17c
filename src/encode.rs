//! Number to segment-byte encoding.

use crate::constants::{dots, DIGITS, MAX_DIGITS, MINUS};

/// How a number is laid out on the display.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct NumberFormat {
    /// Dot/colon mask, see [`write_dots`].
    pub dots: u8,
    /// Show `0` in unused high-order positions instead of blanking them.
    pub leading_zero: bool,
    /// Number of digits written, 1 to 4.
    pub length: u8,
}

impl NumberFormat {
    pub const fn new(dots: u8, leading_zero: bool, length: u8) -> Self {
        Self {
            dots,
            leading_zero,
            length,
        }
    }

    pub const fn with_dots(self, dots: u8) -> Self {
        Self { dots, ..self }
    }
}

impl Default for NumberFormat {
    fn default() -> Self {
        Self::new(dots::NONE, false, MAX_DIGITS)
    }
}

/// Segment glyph for the low nibble of `digit`; 10 to 15 show as A b C d E F.
pub fn encode_digit(digit: u8) -> u8 {
    DIGITS[(digit & 0x0F) as usize]
}

/// ORs the dot bit into each digit, taking the mask's bits from bit 7 down,
/// one per position from the left.
pub fn write_dots(mut mask: u8, digits: &mut [u8]) {
    for digit in digits.iter_mut().take(MAX_DIGITS as usize) {
        *digit |= mask & 0x80;
        mask <<= 1;
    }
}

/// Encodes `magnitude` in `base` into right-aligned segment bytes.
///
/// Only the first `len` bytes of the returned buffer are meaningful; `len` is
/// `format.length` clamped to 1..=4. Digits that do not fit are dropped, so the
/// caller is responsible for choosing a length wide enough for the value.
///
/// A zero shown without leading zeros is a lone `0` and never gets dots.
///
/// With leading zeros hidden, `negative` puts a minus sign directly left of
/// the most significant digit if a position is free for it. With leading
/// zeros shown there is never room for the sign and it is not drawn.
pub fn encode_number(
    base: u8,
    magnitude: u64,
    negative: bool,
    format: &NumberFormat,
) -> ([u8; MAX_DIGITS as usize], usize) {
    let base = base.max(1) as u64;
    let len = format.length.clamp(1, MAX_DIGITS) as usize;
    let mut digits = [0u8; MAX_DIGITS as usize];

    if magnitude == 0 && !format.leading_zero {
        digits[len - 1] = encode_digit(0);
    } else {
        let mut remaining = magnitude;
        let mut sign_pending = negative;

        for position in (0..len).rev() {
            let digit = (remaining % base) as u8;
            let exhausted = remaining == 0;

            digits[position] = if exhausted && !format.leading_zero {
                0
            } else {
                encode_digit(digit)
            };

            if exhausted && !format.leading_zero && sign_pending {
                digits[position] = MINUS;
                sign_pending = false;
            }

            remaining /= base;
        }

        if format.dots != 0 {
            write_dots(format.dots, &mut digits[..len]);
        }
    }

    (digits, len)
}
