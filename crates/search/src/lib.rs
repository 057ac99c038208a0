//! # Hub Search
//!
//! Lookups over a schema snapshot that do not need the relationship graph:
//!
//! - **Fuzzy matching** - Levenshtein "did you mean" suggestions for type and field names
//! - **Type search** - term/domain/kind filtered listing with a fixed result cap

mod error;
mod fuzzy;
mod type_search;

pub use error::{Result, SearchError};
pub use fuzzy::{find_similar_names, levenshtein, FuzzyMatcher, MAX_EDIT_DISTANCE, MAX_SUGGESTIONS};
pub use type_search::{search_types, types_by_domain, Domain, TypeQuery, MAX_SEARCH_RESULTS};
