//! The structured form of a taxonomy code.

use std::fmt;
use std::str::FromStr;

use crate::codec::{decode_code, encode_code};
use crate::error::{DecodeError, EncodeError};
use crate::model::{CategoryType, Direction, EntityKind};

/// A taxonomy code split into its fields.
///
/// Built by decoding a code string, by assigning fields directly, or with
/// [`CodeBuilder`](crate::model::CodeBuilder). The checksum is not stored;
/// it is always derived from the other fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct DecodedCode {
    pub category_type: CategoryType,

    /// `None` when the code leaves the flag unset.
    pub is_property: Option<bool>,
    pub is_group: Option<bool>,
    pub is_term: Option<bool>,

    /// 0-99, written as two decimal digits.
    pub category_id: u8,
    pub relation_id: u8,

    /// Only meaningful for relation codes.
    pub direction: Direction,

    /// At most 0x3f for relations, 0xfff otherwise.
    pub property_id: u16,

    pub extern_l1_id: u8,
    pub extern_l2_id: u8,
}

impl DecodedCode {
    /// Creates an empty code of the given category.
    pub fn new(category_type: CategoryType) -> Self {
        Self {
            category_type,
            ..Self::default()
        }
    }

    pub fn is_entity(&self) -> bool {
        self.category_type == CategoryType::Entity
    }

    pub fn is_relation(&self) -> bool {
        self.category_type == CategoryType::Relation
    }

    /// Entity kind id on the source side of a relation (`category_id / 10`).
    pub fn from_entity_id(&self) -> Option<u8> {
        self.is_relation().then_some(self.category_id / 10)
    }

    /// Entity kind id on the target side of a relation (`category_id % 10`).
    pub fn to_entity_id(&self) -> Option<u8> {
        self.is_relation().then_some(self.category_id % 10)
    }

    /// Entity kind of an entity code.
    pub fn entity_kind(&self) -> Option<EntityKind> {
        if self.is_entity() {
            EntityKind::from_id(self.category_id)
        } else {
            None
        }
    }

    pub fn from_entity_kind(&self) -> Option<EntityKind> {
        self.from_entity_id().and_then(EntityKind::from_id)
    }

    pub fn to_entity_kind(&self) -> Option<EntityKind> {
        self.to_entity_id().and_then(EntityKind::from_id)
    }

    /// Display name of the category this code belongs to.
    ///
    /// ```text
    /// Entity    <实体（人）>
    /// Relation  <关系（人-地）>
    /// Unknown   <未知编码>
    /// ```
    ///
    /// Ids outside the entity-kind table are shown as numbers.
    pub fn name(&self) -> String {
        match self.category_type {
            CategoryType::Entity => format!("<实体（{}）>", kind_label(self.category_id)),
            CategoryType::Relation => format!(
                "<关系（{}-{}）>",
                kind_label(self.category_id / 10),
                kind_label(self.category_id % 10)
            ),
            CategoryType::Unknown => "<未知编码>".to_string(),
        }
    }

    /// Name followed by the three flags as Y, N or U (unset).
    pub fn describe(&self) -> String {
        format!(
            "{}:(prop: {}, group: {}, term: {})",
            self.name(),
            flag_char(self.is_property),
            flag_char(self.is_group),
            flag_char(self.is_term)
        )
    }

    /// Encodes this code into its canonical 16-character form.
    pub fn encode(&self) -> Result<String, EncodeError> {
        encode_code(self)
    }

    /// The checksum digit the canonical form of this code ends with.
    pub fn checksum(&self) -> Result<char, EncodeError> {
        let code = encode_code(self)?;
        Ok(code.chars().last().unwrap_or('0'))
    }
}

fn kind_label(id: u8) -> String {
    match EntityKind::from_id(id) {
        Some(kind) => kind.label().to_string(),
        None => id.to_string(),
    }
}

fn flag_char(flag: Option<bool>) -> char {
    match flag {
        None => 'U',
        Some(true) => 'Y',
        Some(false) => 'N',
    }
}

impl FromStr for DecodedCode {
    type Err = DecodeError;

    /// Decodes leniently; a checksum mismatch is logged and otherwise ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        decode_code(s).map(|decoded| decoded.code)
    }
}

impl fmt::Display for DecodedCode {
    /// Writes the canonical code string, or the description if the fields
    /// cannot be encoded.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match encode_code(self) {
            Ok(code) => f.write_str(&code),
            Err(_) => f.write_str(&self.describe()),
        }
    }
}
