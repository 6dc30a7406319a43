//! Text encoding/decoding for knowsys codes.
//!
//! This module implements the version 1 code layout.

pub mod checksum;
pub mod code;
pub(crate) mod primitives;

pub use checksum::{checksum, Checksum};
pub use code::{decode_code, decode_code_with_options, encode_code, DecodeOptions, Decoded};
