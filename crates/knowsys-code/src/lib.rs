//! knowsys-code: fixed-width codes for the knowsys taxonomy.
//!
//! Every item in the taxonomy (entity types, relation types, properties and
//! terms) carries a 16-character code. This crate converts between that
//! string and its fields.
//!
//! # Quick Start
//!
//! ```rust
//! use knowsys_code::{decode_code, encode_code, CategoryType, CodeBuilder, EntityKind};
//!
//! let code = CodeBuilder::entity_kind(EntityKind::Person)
//!     .property(true)
//!     .property_id(0x12)
//!     .build();
//!
//! // Encode to the canonical string
//! let text = encode_code(&code).unwrap();
//! assert_eq!(text, "1060010001200005");
//!
//! // Decode back
//! let decoded = decode_code(&text).unwrap();
//! assert!(decoded.is_checksum_valid());
//! assert_eq!(decoded.code.category_type, CategoryType::Entity);
//! assert_eq!(decoded.code.name(), "<实体（人）>");
//! ```
//!
//! # Modules
//!
//! - [`model`]: Field types (DecodedCode, CategoryType, Direction, EntityKind)
//! - [`codec`]: Encoding, decoding and the checksum
//! - [`error`]: Error types
//! - [`limits`]: Layout constants
//!
//! # Checksums
//!
//! The last character is a mod-13 check digit over the first fifteen. Source
//! data contains codes whose check digit was never updated, so a mismatch is
//! reported through [`Decoded::checksum_mismatch`] and a `tracing` warning
//! instead of failing the decode. Use [`DecodeOptions::strict`] to reject
//! such codes.
//!
//! # Wire Format
//!
//! ```text
//! 10 TT CC RR PPP L1 L2 K
//! ```
//!
//! `TT` packs the category and three tri-state flags, `CC` is a decimal
//! category id, `PPP` is either a 3-digit property id or a direction digit
//! followed by a 2-digit property id (relations), and `K` is the check digit.

pub mod codec;
pub mod error;
pub mod limits;
pub mod model;

// Re-export commonly used types at crate root
pub use codec::{checksum, decode_code, decode_code_with_options, encode_code, DecodeOptions, Decoded};
pub use error::{ChecksumMismatch, DecodeError, EncodeError, ErrorCode};
pub use model::{CategoryType, CodeBuilder, DecodedCode, Direction, EntityKind};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Code format version this crate implements.
pub const FORMAT_VERSION: u8 = limits::FORMAT_VERSION;
