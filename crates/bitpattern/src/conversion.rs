use std::{fmt, slice};

use crate::pattern::{to_bit_pattern, BitPattern};

/// The bit patterns of a byte sequence, together with a delimiter
///
/// The delimiter is borrowed; `None` means "no delimiter", while `Some(b"")`
/// is a present but empty delimiter. Both render the same, but the distinction
/// is kept for callers that care.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Conversion<'d> {
    values: Vec<BitPattern>,
    delim: Option<&'d [u8]>,
}

/// Convert every byte of `bytes` into its bit pattern, without a delimiter
pub fn encode(bytes: &[u8]) -> Conversion<'static> {
    let mut values = Vec::with_capacity(bytes.len());
    values.extend(bytes.iter().copied().map(to_bit_pattern));
    Conversion {
        values,
        delim: None,
    }
}

impl<'d> Conversion<'d> {
    /// Set the delimiter, replacing any previous one
    #[must_use]
    pub fn with_delim<'e>(self, delim: Option<&'e [u8]>) -> Conversion<'e> {
        Conversion {
            values: self.values,
            delim,
        }
    }

    /// Set the delimiter in place
    pub fn set_delim(&mut self, delim: Option<&'d [u8]>) {
        self.delim = delim;
    }

    /// The current delimiter
    pub fn delim(&self) -> Option<&'d [u8]> {
        self.delim
    }

    /// The bit patterns, one per input byte
    pub fn values(&self) -> &[BitPattern] {
        &self.values
    }

    /// Iterate over the bit patterns
    pub fn iter(&self) -> slice::Iter<'_, BitPattern> {
        self.values.iter()
    }

    /// Number of converted bytes
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether no bytes were converted
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Append the rendered digits (and delimiters) to `out`
    pub fn write_bytes(&self, out: &mut Vec<u8>) {
        for (index, value) in self.values.iter().enumerate() {
            if index > 0 {
                if let Some(delim) = self.delim {
                    out.extend_from_slice(delim);
                }
            }
            value.write_digits(out);
        }
    }

    /// Render into a new byte buffer
    pub fn to_bytes(&self) -> Vec<u8> {
        let delim_len = self.delim.map_or(0, <[u8]>::len);
        let digits: usize = self.values.iter().map(|v| v.digit_count()).sum();
        let mut out =
            Vec::with_capacity(digits + delim_len * self.values.len().saturating_sub(1));
        self.write_bytes(&mut out);
        out
    }
}

impl<'a, 'd> IntoIterator for &'a Conversion<'d> {
    type Item = &'a BitPattern;
    type IntoIter = slice::Iter<'a, BitPattern>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}

/// Renders as text; a delimiter that is not UTF-8 is replaced lossily.
impl fmt::Display for Conversion<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let delim = self.delim.map(String::from_utf8_lossy);
        for (index, value) in self.values.iter().enumerate() {
            if index > 0 {
                if let Some(delim) = &delim {
                    f.write_str(delim)?;
                }
            }
            write!(f, "{}", value)?;
        }
        Ok(())
    }
}
