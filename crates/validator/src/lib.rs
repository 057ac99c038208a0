//! # Hub Validator
//!
//! Cheap, network-free checks run before a document is sent upstream:
//!
//! ```text
//! document text
//!     ├─ operation keyword (query / mutation / subscription / `{`)
//!     ├─ delimiter balance for `{}` and `()`
//!     ├─ type names against a schema catalog (optional, best effort)
//!     └─ complexity estimate
//! ```
//!
//! Problems are reported as data in a [`ValidationResult`], never as `Err`.
//! This is not a GraphQL parser: field names inside selections are not checked and the
//! complexity figure is an approximation.

mod catalog;
mod result;
mod validator;

pub use catalog::TypeCatalog;
pub use result::{ErrorType, ValidationError, ValidationResult};
pub use validator::{QueryValidator, ValidatorOptions, DEFAULT_ENTITY_PREFIX};
