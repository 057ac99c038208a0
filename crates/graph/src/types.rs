use serde::{Deserialize, Serialize};
use std::fmt;

/// Direction of a relationship relative to its source entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Direction {
    In,
    Out,
}

impl Direction {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::In => "IN",
            Self::Out => "OUT",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One navigable edge between two entity types
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityRelationship {
    pub source_entity: String,
    pub target_entity: String,
    /// Relationship kind, e.g. `isContainedIn`
    pub relationship_type: String,
    pub direction: Direction,
    /// Path segment to navigate the edge, e.g. `relationshipsOut.isContainedIn`
    pub field_name: String,
}

impl fmt::Display for EntityRelationship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} --[{}]--> {}",
            self.source_entity, self.field_name, self.target_entity
        )
    }
}
