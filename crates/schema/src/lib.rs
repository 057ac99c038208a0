//! # Hub Schema
//!
//! Value types for a remote GraphQL schema and the immutable snapshot they live in.
//!
//! ## Pipeline
//!
//! ```text
//! introspection `data`
//!     │
//!     ├──> Introspection parser
//!     │      ├─ Drop `__` meta types and nameless entries
//!     │      ├─ Walk type references (bounded depth)
//!     │      └─ Skip entries that fail to parse (logged)
//!     │
//!     └──> SchemaSnapshot
//!            ├─ Declaration-ordered type list
//!            ├─ Name index
//!            └─ loaded_at timestamp
//! ```
//!
//! A snapshot is never mutated after construction. Refreshing a schema means building a new
//! snapshot and swapping it in as a whole.

mod error;
mod introspection;
mod snapshot;
mod types;

pub use error::{Result, SchemaError};
pub use introspection::{parse_introspection, MAX_TYPE_REF_DEPTH};
pub use snapshot::{RootTypes, SchemaSnapshot};
pub use types::{
    EnumValue, FieldDefinition, InputValue, TypeDefinition, TypeKind, TypeReference,
    INTROSPECTION_PREFIX,
};
