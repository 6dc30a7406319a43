//! Builder API for ergonomic code construction.
//!
//! # Example
//!
//! ```rust
//! use knowsys_code::model::builder::CodeBuilder;
//! use knowsys_code::{Direction, EntityKind};
//!
//! let code = CodeBuilder::relation(EntityKind::Person, EntityKind::Place)
//!     .direction(Direction::Forward)
//!     .relation_id(0x2a)
//!     .property(false)
//!     .group(true)
//!     .property_id(0x3f)
//!     .externs(0xab, 0x01)
//!     .build();
//!
//! assert_eq!(code.encode().unwrap(), "1098122a13fab011");
//! ```

use crate::error::EncodeError;
use crate::model::{CategoryType, DecodedCode, Direction, EntityKind};

/// Builder for constructing a [`DecodedCode`].
#[derive(Debug, Clone, Default)]
pub struct CodeBuilder {
    code: DecodedCode,
}

impl CodeBuilder {
    /// Starts a code with no category.
    pub fn unknown() -> Self {
        Self::default()
    }

    /// Starts an entity code for the given category id.
    pub fn entity(category_id: u8) -> Self {
        Self {
            code: DecodedCode {
                category_type: CategoryType::Entity,
                category_id,
                ..DecodedCode::default()
            },
        }
    }

    /// Starts an entity code for one of the top-level entity kinds.
    pub fn entity_kind(kind: EntityKind) -> Self {
        Self::entity(kind.id())
    }

    /// Starts a relation code between two entity kinds.
    pub fn relation(from: EntityKind, to: EntityKind) -> Self {
        Self::relation_category(from.id() * 10 + to.id())
    }

    /// Starts a relation code with an explicit category id.
    pub fn relation_category(category_id: u8) -> Self {
        Self {
            code: DecodedCode {
                category_type: CategoryType::Relation,
                category_id,
                ..DecodedCode::default()
            },
        }
    }

    // =========================================================================
    // Flags
    // =========================================================================

    pub fn property(mut self, is_property: bool) -> Self {
        self.code.is_property = Some(is_property);
        self
    }

    pub fn group(mut self, is_group: bool) -> Self {
        self.code.is_group = Some(is_group);
        self
    }

    pub fn term(mut self, is_term: bool) -> Self {
        self.code.is_term = Some(is_term);
        self
    }

    /// Sets all three flags at once, including unset ones.
    pub fn flags(
        mut self,
        is_property: Option<bool>,
        is_group: Option<bool>,
        is_term: Option<bool>,
    ) -> Self {
        self.code.is_property = is_property;
        self.code.is_group = is_group;
        self.code.is_term = is_term;
        self
    }

    // =========================================================================
    // Ids
    // =========================================================================

    pub fn relation_id(mut self, relation_id: u8) -> Self {
        self.code.relation_id = relation_id;
        self
    }

    pub fn direction(mut self, direction: Direction) -> Self {
        self.code.direction = direction;
        self
    }

    pub fn property_id(mut self, property_id: u16) -> Self {
        self.code.property_id = property_id;
        self
    }

    pub fn externs(mut self, l1: u8, l2: u8) -> Self {
        self.code.extern_l1_id = l1;
        self.code.extern_l2_id = l2;
        self
    }

    /// Builds the code without validating field ranges.
    pub fn build(self) -> DecodedCode {
        self.code
    }

    /// Builds and encodes the code.
    pub fn encode(self) -> Result<String, EncodeError> {
        self.code.encode()
    }
}
