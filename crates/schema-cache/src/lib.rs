//! # Hub Schema Cache
//!
//! Owns the one loaded schema of the process.
//!
//! ```text
//! get_schema()
//!     ├─ fresh snapshot in slot ──────────────> Arc<CachedSchema>
//!     └─ empty / expired / refresh requested
//!          └─ load gate (one loader at a time)
//!               ├─ re-check slot
//!               ├─ IntrospectionSource::introspect
//!               ├─ parse snapshot + build relationship graph
//!               └─ swap Arc into slot ─────────> Arc<CachedSchema>
//! ```
//!
//! Readers keep whatever `Arc` they obtained; a swap never mutates a published schema.

mod cached;
mod error;
mod service;
mod source;
mod store;

pub use cached::CachedSchema;
pub use error::{Result, StoreError};
pub use service::SchemaService;
pub use source::IntrospectionSource;
pub use store::{SchemaStore, StoreConfig, DEFAULT_CACHE_MAX_SIZE, DEFAULT_CACHE_TTL};
