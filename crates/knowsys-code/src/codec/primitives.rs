//! Positional digit reading and writing for the code text.
//!
//! Offsets count characters, not bytes. Hex fields accept either case when
//! read and are always written in lowercase.

use std::fmt::Write as _;

use crate::codec::checksum::Checksum;
use crate::error::DecodeError;

/// Returns the value of a hex digit.
#[inline]
pub(crate) fn hex_nibble(c: char) -> Option<u8> {
    c.to_digit(16).map(|d| d as u8)
}

// =============================================================================
// DECODING
// =============================================================================

/// Reader for fixed-offset fields of a code.
///
/// Every read is bounds checked; reading past the end reports the field as
/// an invalid digit at the end position rather than panicking.
#[derive(Debug, Clone)]
pub(crate) struct Reader {
    chars: Vec<char>,
}

impl Reader {
    pub(crate) fn new(code: &str) -> Self {
        Self {
            chars: code.chars().collect(),
        }
    }

    /// Reads the character at `offset`.
    #[inline]
    pub(crate) fn read_char(&self, offset: usize, field: &'static str) -> Result<char, DecodeError> {
        self.chars
            .get(offset)
            .copied()
            .ok_or(DecodeError::InvalidDigit {
                field,
                position: offset,
                found: '\0',
            })
    }

    /// Reads `width` hex digits starting at `offset`.
    pub(crate) fn read_hex(
        &self,
        offset: usize,
        width: usize,
        field: &'static str,
    ) -> Result<u16, DecodeError> {
        let mut value: u16 = 0;
        for position in offset..offset + width {
            let c = self.read_char(position, field)?;
            let nibble = hex_nibble(c).ok_or(DecodeError::InvalidDigit {
                field,
                position,
                found: c,
            })?;
            value = (value << 4) | u16::from(nibble);
        }
        Ok(value)
    }

    /// Reads two hex digits starting at `offset`.
    #[inline]
    pub(crate) fn read_hex_byte(&self, offset: usize, field: &'static str) -> Result<u8, DecodeError> {
        // Two nibbles always fit in a byte.
        Ok(self.read_hex(offset, 2, field)? as u8)
    }

    /// Reads two decimal digits starting at `offset`.
    pub(crate) fn read_decimal_byte(
        &self,
        offset: usize,
        field: &'static str,
    ) -> Result<u8, DecodeError> {
        let mut value: u8 = 0;
        for position in offset..offset + 2 {
            let c = self.read_char(position, field)?;
            let digit = c.to_digit(10).ok_or(DecodeError::InvalidDigit {
                field,
                position,
                found: c,
            })?;
            value = value * 10 + digit as u8;
        }
        Ok(value)
    }

    /// Returns the text between character offsets `start` and `end`.
    pub(crate) fn slice(&self, start: usize, end: usize) -> String {
        self.chars
            .get(start..end.min(self.chars.len()))
            .map(|chars| chars.iter().collect())
            .unwrap_or_default()
    }
}

// =============================================================================
// ENCODING
// =============================================================================

/// Writer for code text that keeps the checksum of everything written.
///
/// Only hex digits are ever written, so the text and its checksum agree.
#[derive(Debug, Clone, Default)]
pub(crate) struct Writer {
    buf: String,
    checksum: Checksum,
}

impl Writer {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: String::with_capacity(capacity),
            checksum: Checksum::new(),
        }
    }

    /// Writes a single hex digit.
    #[inline]
    pub(crate) fn write_digit(&mut self, digit: char) {
        debug_assert!(digit.is_ascii_hexdigit(), "non-hex digit {:?}", digit);
        if let Some(nibble) = hex_nibble(digit) {
            self.checksum.push(nibble);
            self.buf.push(digit);
        }
    }

    /// Writes `value` as `width` zero-padded lowercase hex digits.
    pub(crate) fn write_hex(&mut self, value: u16, width: usize) {
        let start = self.buf.len();
        let _ = write!(self.buf, "{:0width$x}", value, width = width);
        self.fold(start);
    }

    /// Writes `value` as two zero-padded decimal digits.
    pub(crate) fn write_decimal(&mut self, value: u8) {
        let start = self.buf.len();
        let _ = write!(self.buf, "{:02}", value);
        self.fold(start);
    }

    /// Writes raw hex text such as the magic prefix.
    pub(crate) fn write_str(&mut self, s: &str) {
        for c in s.chars() {
            self.write_digit(c);
        }
    }

    /// Appends the check digit and returns the finished code.
    pub(crate) fn finish(mut self) -> String {
        let digit = self.checksum.digit();
        self.buf.push(digit);
        self.buf
    }

    fn fold(&mut self, start: usize) {
        for c in self.buf[start..].chars() {
            if let Some(nibble) = hex_nibble(c) {
                self.checksum.push(nibble);
            }
        }
    }
}
