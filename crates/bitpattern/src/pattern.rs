//! # Single byte bit patterns

use std::fmt;

/// The base-2 digits of a byte, read as a decimal number
///
/// For example, the byte `6` (`0b110`) is stored as the number `110`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct BitPattern(u32);

/// Maximum number of digits of a [`BitPattern`]
const MAX_DIGITS: usize = 8;

/// Convert a byte into its bit pattern
pub fn to_bit_pattern(byte: u8) -> BitPattern {
    let mut byte = byte;
    let mut weight = 1;
    let mut result = 0;
    while byte > 0 {
        result += u32::from(byte % 2) * weight;
        weight *= 10;
        byte /= 2;
    }
    BitPattern(result)
}

impl BitPattern {
    /// The decimal number whose digits are the bits
    pub fn value(self) -> u32 {
        self.0
    }

    /// Number of digits in the rendered pattern
    pub fn digit_count(self) -> usize {
        let mut count = 1;
        let mut rest = self.0 / 10;
        while rest > 0 {
            count += 1;
            rest /= 10;
        }
        count
    }

    /// Append the ASCII digits to `out`
    pub fn write_digits(self, out: &mut Vec<u8>) {
        let mut digits = [b'0'; MAX_DIGITS];
        let mut pos = MAX_DIGITS;
        let mut rest = self.0;
        loop {
            pos -= 1;
            digits[pos] = b'0' + (rest % 10) as u8;
            rest /= 10;
            if rest == 0 {
                break;
            }
        }
        out.extend_from_slice(&digits[pos..]);
    }
}

impl From<u8> for BitPattern {
    fn from(byte: u8) -> Self {
        to_bit_pattern(byte)
    }
}

impl fmt::Display for BitPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
