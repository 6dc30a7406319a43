//! Category kinds, relation directions and the entity-kind table.

use std::fmt;
use std::ops::Neg;

use lazy_static::lazy_static;
use rustc_hash::FxHashMap;

/// Whether a code describes an entity, a relation, or neither.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CategoryType {
    #[default]
    Unknown,
    Entity,
    Relation,
}

impl CategoryType {
    /// Returns the two category bits (7-6) of the type code.
    pub fn bits(self) -> u8 {
        match self {
            CategoryType::Unknown => 0b00,
            CategoryType::Entity => 0b01,
            CategoryType::Relation => 0b10,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            CategoryType::Unknown => "Unknown",
            CategoryType::Entity => "Entity",
            CategoryType::Relation => "Relation",
        }
    }
}

impl fmt::Display for CategoryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Direction of a relation between its two entity kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Direction {
    #[default]
    Unknown,
    Forward,
    Backward,
    BiDirection,
}

lazy_static! {
    static ref DIRECTION_LABELS: FxHashMap<&'static str, Direction> = {
        let mut labels = FxHashMap::default();
        labels.insert("双向", Direction::BiDirection);
        labels.insert("正向", Direction::Forward);
        labels.insert("反向", Direction::Backward);
        labels
    };
}

impl Direction {
    /// Creates a Direction from its digit in a relation code.
    pub fn from_digit(digit: char) -> Option<Direction> {
        match digit {
            '0' => Some(Direction::Unknown),
            '1' => Some(Direction::Forward),
            '2' => Some(Direction::Backward),
            '3' => Some(Direction::BiDirection),
            _ => None,
        }
    }

    /// Returns the digit written for this direction in a relation code.
    pub fn digit(self) -> char {
        match self {
            Direction::Unknown => '0',
            Direction::Forward => '1',
            Direction::Backward => '2',
            Direction::BiDirection => '3',
        }
    }

    /// Parses a direction label from taxonomy source sheets.
    ///
    /// Unrecognized labels map to [`Direction::Unknown`].
    pub fn from_label(label: &str) -> Direction {
        DIRECTION_LABELS
            .get(label.trim())
            .copied()
            .unwrap_or(Direction::Unknown)
    }

    /// Returns true if a relation declared with `self` also covers `other`.
    ///
    /// ```text
    /// BiDirection  contains everything
    /// Unknown      contains nothing
    /// Forward      contains Unknown, Forward
    /// Backward     contains Unknown, Backward
    /// ```
    pub fn contains(self, other: Direction) -> bool {
        match (self, other) {
            (Direction::BiDirection, _) => true,
            (Direction::Unknown, _) => false,
            (_, Direction::Unknown) => true,
            (_, Direction::BiDirection) => false,
            _ => self == other,
        }
    }

    /// Swaps Forward and Backward; Unknown and BiDirection are unchanged.
    pub fn reversed(self) -> Direction {
        match self {
            Direction::Forward => Direction::Backward,
            Direction::Backward => Direction::Forward,
            other => other,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Unknown => "Unknown",
            Direction::Forward => "Forward",
            Direction::Backward => "Backward",
            Direction::BiDirection => "BiDirection",
        }
    }
}

impl Neg for Direction {
    type Output = Direction;

    fn neg(self) -> Direction {
        self.reversed()
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Top-level entity kinds addressed by small category ids.
///
/// Relation codes pack two of these into their category id
/// (`from * 10 + to`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum EntityKind {
    Unknown = 0,
    Person = 1,
    Place = 2,
    Affair = 3,
    Object = 4,
    Organization = 5,
}

impl EntityKind {
    /// Looks up the kind for a category id.
    pub fn from_id(id: u8) -> Option<EntityKind> {
        match id {
            0 => Some(EntityKind::Unknown),
            1 => Some(EntityKind::Person),
            2 => Some(EntityKind::Place),
            3 => Some(EntityKind::Affair),
            4 => Some(EntityKind::Object),
            5 => Some(EntityKind::Organization),
            _ => None,
        }
    }

    pub fn id(self) -> u8 {
        self as u8
    }

    /// Label used in the taxonomy's display names.
    pub fn label(self) -> &'static str {
        match self {
            EntityKind::Unknown => "Unknown",
            EntityKind::Person => "人",
            EntityKind::Place => "地",
            EntityKind::Affair => "事",
            EntityKind::Object => "物",
            EntityKind::Organization => "组织",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            EntityKind::Unknown => "Unknown",
            EntityKind::Person => "Person",
            EntityKind::Place => "Place",
            EntityKind::Affair => "Affair",
            EntityKind::Object => "Object",
            EntityKind::Organization => "Organization",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
