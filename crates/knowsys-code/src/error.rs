//! Error types for code encoding and decoding.

use thiserror::Error;

/// Error codes grouping decode failures by kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// K001: Wrong length or magic prefix
    InvalidFormat,
    /// K002: A character is not a valid digit for its field
    InvalidDigit,
    /// K003: Contradictory bits in the type code
    ConflictingBits,
    /// K004: Checksum digit does not match
    ChecksumMismatch,
}

impl ErrorCode {
    /// Returns the error code string (e.g., "K001").
    pub fn code(&self) -> &'static str {
        match self {
            ErrorCode::InvalidFormat => "K001",
            ErrorCode::InvalidDigit => "K002",
            ErrorCode::ConflictingBits => "K003",
            ErrorCode::ChecksumMismatch => "K004",
        }
    }
}

/// Error during code decoding.
///
/// Every variant is fatal: no partial record is returned. A checksum
/// mismatch only surfaces here when decoding in strict mode; otherwise it
/// is reported as a [`ChecksumMismatch`] warning alongside the record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    // === K001: Format ===
    #[error("[K001] code must be 16 characters, found {len}")]
    InvalidLength { len: usize },

    #[error("[K001] checksum prefix must be 15 characters, found {len}")]
    InvalidPrefixLength { len: usize },

    #[error("[K001] invalid magic prefix: expected \"10\", found {found:?}")]
    InvalidMagic { found: String },

    // === K002: Digits ===
    #[error("[K002] invalid digit {found:?} at position {position} in {field}")]
    InvalidDigit {
        field: &'static str,
        position: usize,
        found: char,
    },

    #[error("[K002] unknown direction digit {found:?}")]
    UnknownDirectionDigit { found: char },

    // === K003: Type code ===
    #[error("[K003] {flag} flag has both true and false bits set in type code {type_code:#04x}")]
    InvalidFlag { flag: &'static str, type_code: u8 },

    #[error("[K003] type code {type_code:#04x} marks the code as both a relation and an entity")]
    ConflictingCategory { type_code: u8 },

    // === K004: Checksum ===
    #[error("[K004] {0}")]
    ChecksumMismatch(ChecksumMismatch),
}

impl DecodeError {
    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            DecodeError::InvalidLength { .. }
            | DecodeError::InvalidPrefixLength { .. }
            | DecodeError::InvalidMagic { .. } => ErrorCode::InvalidFormat,
            DecodeError::InvalidDigit { .. } | DecodeError::UnknownDirectionDigit { .. } => {
                ErrorCode::InvalidDigit
            }
            DecodeError::InvalidFlag { .. } | DecodeError::ConflictingCategory { .. } => {
                ErrorCode::ConflictingBits
            }
            DecodeError::ChecksumMismatch(_) => ErrorCode::ChecksumMismatch,
        }
    }
}

/// Error during code encoding.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodeError {
    #[error("{field} value {value} exceeds maximum {max}")]
    ValueOutOfRange {
        field: &'static str,
        value: u32,
        max: u32,
    },

    #[error("direction {direction} is only allowed on relation codes")]
    DirectionOnNonRelation { direction: crate::model::Direction },
}

/// A checksum digit that disagrees with the digit computed from the prefix.
///
/// A data-quality warning by default; a decode failure only in strict mode.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("code {code} checksum mismatch: expected {expected:?}, found {found:?}")]
pub struct ChecksumMismatch {
    /// The code as it was read.
    pub code: String,
    /// Digit computed from the first 15 characters.
    pub expected: char,
    /// Digit present in the code.
    pub found: char,
}
