//! # Hub Graph
//!
//! Entity relationship graph derived from the naming conventions of the upstream schema.
//!
//! ## Architecture
//!
//! ```text
//! SchemaSnapshot
//!     │
//!     ├──> Graph Builder (naming conventions)
//!     │      ├─ Find entity types (prefix + `_Type` suffix)
//!     │      ├─ Follow relationshipsIn / relationshipsOut containers
//!     │      ├─ Decode transliterated target names
//!     │      └─ Keep targets that resolve in the snapshot
//!     │
//!     └──> Relationship Graph
//!            ├─ Nodes: entity type names (declaration order)
//!            ├─ Edges: EntityRelationship (direction + navigable field)
//!            └─ Path finder (bounded BFS)
//! ```
//!
//! The builder is best effort: a schema that breaks the convention produces fewer edges,
//! never an error.

mod builder;
mod graph;
mod naming;
mod paths;
mod types;

pub use builder::RelationshipGraphBuilder;
pub use graph::RelationshipGraph;
pub use naming::{NamingConvention, DEFAULT_ABBREVIATIONS};
pub use paths::{RelationshipPath, DEFAULT_PATH_DEPTH, MAX_PATHS, MAX_PATH_DEPTH};
pub use types::{Direction, EntityRelationship};
