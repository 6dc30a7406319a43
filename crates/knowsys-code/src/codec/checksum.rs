//! The trailing mod-13 check digit.
//!
//! The first 15 characters of a code are read as one base-16 number; the
//! check digit is that number mod 13, written as a lowercase hex digit
//! (`0`-`c`). The remainder is folded one nibble at a time so the decoder and
//! the encoder's writer share a single routine.

use crate::codec::primitives::hex_nibble;
use crate::error::DecodeError;
use crate::limits::{CHECKSUM_MODULUS, PREFIX_LEN};

/// Running remainder of a hex prefix.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Checksum {
    remainder: u32,
}

impl Checksum {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one hex digit value (0-15).
    #[inline]
    pub fn push(&mut self, nibble: u8) {
        self.remainder = (self.remainder * 16 + u32::from(nibble & 0x0f)) % CHECKSUM_MODULUS;
    }

    /// Current remainder as a lowercase hex digit.
    pub fn digit(&self) -> char {
        char::from_digit(self.remainder, 16).unwrap_or('0')
    }
}

/// Computes the check digit for a 15-character hex prefix.
pub fn checksum(prefix: &str) -> Result<char, DecodeError> {
    let len = prefix.chars().count();
    if len != PREFIX_LEN {
        return Err(DecodeError::InvalidPrefixLength { len });
    }
    let mut sum = Checksum::new();
    for (position, c) in prefix.chars().enumerate() {
        let nibble = hex_nibble(c).ok_or(DecodeError::InvalidDigit {
            field: "checksum prefix",
            position,
            found: c,
        })?;
        sum.push(nibble);
    }
    Ok(sum.digit())
}
