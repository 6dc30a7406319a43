//! Data model types for knowsys codes.
//!
//! This module contains the structured side of the codec:
//! - Category kinds and relation directions
//! - The decoded code record
//! - Builders (ergonomic construction)

pub mod builder;
pub mod category;
pub mod code;

pub use builder::CodeBuilder;
pub use category::{CategoryType, Direction, EntityKind};
pub use code::DecodedCode;
