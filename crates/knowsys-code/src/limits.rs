//! Layout constants for version 1 codes.
//!
//! ```text
//! offset  0  1  2  3  4  5  6  7  8  9  10 11 12 13 14 15
//!         1  0  [type] [cat] [rel] [property] [l1] [l2] ck
//! ```
//!
//! For relation codes offset 8 holds the direction digit and the property id
//! narrows to offsets 9-10.

/// Code format version implemented by this crate.
pub const FORMAT_VERSION: u8 = 1;

/// Total length of a code string.
pub const CODE_LEN: usize = 16;

/// Length of the part covered by the checksum.
pub const PREFIX_LEN: usize = CODE_LEN - 1;

/// Fixed prefix of every version 1 code.
pub const MAGIC: &str = "10";

/// Modulus of the trailing checksum digit.
pub const CHECKSUM_MODULUS: u32 = 13;

// =============================================================================
// OFFSETS
// =============================================================================

pub const TYPE_CODE_OFFSET: usize = 2;
pub const CATEGORY_ID_OFFSET: usize = 4;
pub const RELATION_ID_OFFSET: usize = 6;
pub const DIRECTION_OFFSET: usize = 8;
pub const PROPERTY_ID_OFFSET: usize = 8;
pub const RELATION_PROPERTY_ID_OFFSET: usize = 9;
pub const EXTERN_L1_OFFSET: usize = 11;
pub const EXTERN_L2_OFFSET: usize = 13;
pub const CHECKSUM_OFFSET: usize = 15;

// =============================================================================
// TYPE CODE BITS
// =============================================================================

pub const RELATION_BIT: u8 = 0b1000_0000;
pub const ENTITY_BIT: u8 = 0b0100_0000;

pub const PROPERTY_TRUE_BIT: u8 = 0b0010_0000;
pub const PROPERTY_FALSE_BIT: u8 = 0b0001_0000;
pub const GROUP_TRUE_BIT: u8 = 0b0000_1000;
pub const GROUP_FALSE_BIT: u8 = 0b0000_0100;
pub const TERM_TRUE_BIT: u8 = 0b0000_0010;
pub const TERM_FALSE_BIT: u8 = 0b0000_0001;

// =============================================================================
// FIELD MAXIMA
// =============================================================================

/// Category ids are printed as two decimal digits.
pub const MAX_CATEGORY_ID: u8 = 99;

/// Relation property ids share the field with the direction digit.
pub const RELATION_PROPERTY_MASK: u8 = 0b0011_1111;
pub const MAX_RELATION_PROPERTY_ID: u16 = RELATION_PROPERTY_MASK as u16;

/// Entity and unknown property ids span three hex digits.
pub const MAX_PROPERTY_ID: u16 = 0xfff;
