//! # Hub Client
//!
//! Sends GraphQL documents to the upstream endpoint.
//!
//! Every attempt runs under its own timeout. Failures are classified: HTTP 5xx, 429, connect
//! errors and timeouts are retried with exponential backoff, everything else (4xx, GraphQL
//! `errors`, undecodable bodies) is returned immediately.

mod config;
mod error;
mod executor;
mod introspection;
mod types;

pub use config::{
    ClientConfig, DEFAULT_BACKOFF_BASE, DEFAULT_ENDPOINT, DEFAULT_MAX_RETRIES, DEFAULT_TIMEOUT,
};
pub use error::{ClientError, Result, BODY_EXCERPT_CHARS};
pub use executor::{ExecutionOutcome, GraphQLExecutor};
pub use introspection::{INTROSPECTION_QUERY, INTROSPECTION_QUERY_VERSION};
pub use types::{ErrorLocation, GraphQLError, GraphQLRequest, GraphQLResponse};
